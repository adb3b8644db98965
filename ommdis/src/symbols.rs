//! Well-known entry points and zero-page variables of the host BASIC.
//!
//! Both tables are built once and never mutated; components borrow them
//! read-only. Addresses with no entry anywhere get a synthesized `_xxxx`
//! label, spelled identically at the definition and at every reference.

use indexmap::IndexMap;
use once_cell::sync::Lazy;

use m65816::to_x;

/// Synthesized label for an address with no table entry.
pub fn synth(address: u32) -> String {
    to_x(address, 4, '_')
}

/// Name for a system entry point, or `""` when unknown.
pub fn resolve_global(address: u32) -> &'static str {
    GLOBALS.get(&address).copied().unwrap_or("")
}

/// Name for a zero-page variable, or `""`. Offset halves of word variables
/// are spelled as literal `name+1` aliases to match the source-level layout.
///
/// The decoder resolves direct-page operands through the general table (the
/// few zero-page routines it knows, `chrget`/`chrgot`, live there), so this
/// lookup only surfaces through direct callers.
pub fn resolve_zero_page(address: u32) -> &'static str {
    if address > 0xff {
        return "";
    }
    ZERO_PAGE.get(&address).copied().unwrap_or("")
}

static GLOBALS: Lazy<IndexMap<u32, &'static str>> = Lazy::new(|| {
    IndexMap::from([
        (0xb1, "chrget"),
        (0xb7, "chrgot"),
        // usraddr
        (0x03f8, "ommvec"),
        (0x057b, "ch80"),
        (0xc000, "kbd"),
        (0xc010, "strb"),
        (0xc061, "cmdkey"),
        (0xd393, "bltu"),
        (0xd3e3, "reason"),
        (0xd412, "error"),
        (0xd52c, "inlin"),
        (0xd539, "gdbufs"),
        (0xd553, "inchr"),
        (0xd566, "run"),
        (0xd61a, "fndlin"),
        (0xd64b, "scrtch"),
        (0xd66c, "clearc"),
        (0xd683, "stkini"),
        (0xd697, "stxtpt"),
        (0xd7d2, "newstt"),
        (0xd849, "restor"),
        (0xd858, "iscntc"),
        (0xd898, "cont"),
        (0xd93e, "goto"),
        (0xd995, "data"),
        (0xd998, "addon"),
        (0xd9a3, "datan"),
        (0xd9a6, "remn"),
        (0xda0c, "linget"),
        (0xda46, "let"),
        (0xda7b, "getspt"),
        (0xdafb, "crdo"),
        (0xdb3a, "strout"),
        (0xdb3d, "strprt"),
        (0xdb57, "outspc"),
        (0xdb5a, "outqst"),
        (0xdb5c, "outdo"),
        (0xdd67, "frmnum"),
        (0xdd6a, "chknum"),
        (0xdd6c, "chkstr"),
        (0xdd6d, "chkval"),
        (0xdd7b, "frmevl"),
        (0xde81, "strtxt"),
        (0xdeb2, "parchk"),
        (0xdeb8, "chkcls"),
        (0xdebb, "chkopn"),
        (0xdebe, "chkcom"),
        (0xdec0, "synchr"),
        (0xdfe3, "ptrget"),
        (0xe07d, "isletc"),
        (0xe10c, "ayint"),
        (0xe2f2, "givayf"),
        (0xe301, "sngflt"),
        (0xe306, "errdir"),
        (0xe3d5, "strini"),
        (0xe3dd, "strspa"),
        (0xe3e7, "strlit"),
        (0xe3ed, "strlt2"),
        (0xe42a, "putnew"),
        (0xe452, "getspa"),
        (0xe484, "garbag"),
        (0xe5d4, "movins"),
        (0xe5e2, "movstr"),
        (0xe5fd, "frestr"),
        (0xe6f8, "getbyte"),
        (0xe752, "getadr"),
        (0xfc10, "bs"),
        (0xfc1a, "up"),
        (0xfc66, "lf"),
        (0xfd8e, "crout"),
        (0xfdda, "prbyte"),
        (0xfded, "cout"),
    ])
});

static ZERO_PAGE: Lazy<IndexMap<u32, &'static str>> = Lazy::new(|| {
    IndexMap::from([
        (0x50, "linnum"),
        (0x51, "linnum+1"),
        (0x67, "txttab"),
        (0x68, "txttab+1"),
        (0x69, "vartab"),
        (0x6a, "vartab+1"),
        (0x6b, "arytab"),
        (0x6c, "arytab+1"),
        (0x6d, "strend"),
        (0x6e, "strend+1"),
        (0x6f, "fretop"),
        (0x70, "fretop+1"),
        (0x73, "memsiz"),
        (0x74, "memsiz+1"),
        (0x75, "curlin"),
        (0x76, "curlin+1"),
        (0x7b, "datlin"),
        (0x7c, "datlin+1"),
        (0x7d, "datptr"),
        (0x7e, "datptr+1"),
        (0x85, "varnam"),
        (0x86, "varnam+1"),
        (0x9d, "fac"),
        (0xa5, "arg"),
        (0xb8, "txtptr"),
        (0xb9, "txtptr+1"),
    ])
});

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn globals_resolve() {
        assert_eq!(resolve_global(0xfded), "cout");
        assert_eq!(resolve_global(0xd412), "error");
        assert_eq!(resolve_global(0xb1), "chrget");
        assert_eq!(resolve_global(0x1234), "");
    }

    #[test]
    fn zero_page_aliases() {
        assert_eq!(resolve_zero_page(0x67), "txttab");
        assert_eq!(resolve_zero_page(0x68), "txttab+1");
        assert_eq!(resolve_zero_page(0x42), "");
        // out of the zero page entirely
        assert_eq!(resolve_zero_page(0x103), "");
    }

    #[test]
    fn synth_spelling() {
        assert_eq!(synth(0x3f0), "_03f0");
        assert_eq!(synth(0x2011), "_2011");
    }
}
