//! Tokenizer for the embedded ampersand sub-table: a mix of quoted command
//! strings (zero-terminated) and keyword-token bytes, ended by `$ff`.

use m65816::{to_x, Emitter};

use crate::labels::LabelSet;

/// Keyword texts for a contiguous token byte range starting at `base`.
pub struct TokenTable {
    base: u8,
    words: &'static [&'static str],
}

impl TokenTable {
    pub const fn new(base: u8, words: &'static [&'static str]) -> Self {
        TokenTable { base, words }
    }

    pub fn get(&self, byte: u8) -> Option<&'static str> {
        let idx = byte.checked_sub(self.base)? as usize;
        self.words.get(idx).copied()
    }
}

/// Emit the sub-table starting at address `pc`, returning the number of
/// bytes consumed (including the terminating `$ff` when present). Strings
/// and keyword tokens interleave on one logical line; `$00` closes a line,
/// `$ff` closes the whole table. Labels are backpatched at line boundaries.
pub fn emit_table(
    bytes: &[u8],
    pc: u32,
    tokens: &TokenTable,
    labels: &mut LabelSet,
    em: &mut Emitter,
) -> usize {
    let mut buf = String::new();
    let mut quoted = false;
    let mut i = 0;

    while i < bytes.len() {
        if buf.is_empty() {
            labels.next_label(Some(pc + i as u32), em);
        }
        let b = bytes[i];
        i += 1;

        if (0x20..0x7f).contains(&b) {
            if !quoted {
                sep(&mut buf);
                buf.push('\'');
                quoted = true;
            }
            buf.push(b as char);
            continue;
        }
        if quoted {
            buf.push('\'');
            quoted = false;
        }

        match b {
            0x00 if !buf.is_empty() => {
                sep(&mut buf);
                buf.push('0');
                em.line("", "dc.b", &buf, "");
                buf.clear();
            }
            0xff => {
                if !buf.is_empty() {
                    em.line("", "dc.b", &buf, "");
                    buf.clear();
                }
                em.line("", "dc.b", "$ff", "");
                return i;
            }
            _ => match tokens.get(b) {
                Some(word) => {
                    sep(&mut buf);
                    buf.push_str(word);
                }
                None => {
                    if !buf.is_empty() {
                        em.line("", "dc.b", &buf, "");
                        buf.clear();
                    }
                    em.line("", "dc.b", &to_x(b as u32, 2, '$'), "");
                }
            },
        }
    }

    // ran out of data without the $ff terminator
    if quoted {
        buf.push('\'');
    }
    if !buf.is_empty() {
        em.line("", "dc.b", &buf, "");
    }
    i
}

fn sep(buf: &mut String) {
    if !buf.is_empty() {
        buf.push(',');
    }
}

/// Reserved-word spellings for token bytes `$80..=$ea`.
pub static AMPER_TOKENS: TokenTable = TokenTable::new(0x80, &KEYWORDS);

#[rustfmt::skip]
static KEYWORDS: [&str; 107] = [
    "END",     "FOR",     "NEXT",    "DATA",    // 80
    "INPUT",   "DEL",     "DIM",     "READ",    // 84
    "GR",      "TEXT",    "PR#",     "IN#",     // 88
    "CALL",    "PLOT",    "HLIN",    "VLIN",    // 8c
    "HGR2",    "HGR",     "HCOLOR=", "HPLOT",   // 90
    "DRAW",    "XDRAW",   "HTAB",    "HOME",    // 94
    "ROT=",    "SCALE=",  "SHLOAD",  "TRACE",   // 98
    "NOTRACE", "NORMAL",  "INVERSE", "FLASH",   // 9c
    "COLOR=",  "POP",     "VTAB",    "HIMEM:",  // a0
    "LOMEM:",  "ONERR",   "RESUME",  "RECALL",  // a4
    "STORE",   "SPEED=",  "LET",     "GOTO",    // a8
    "RUN",     "IF",      "RESTORE", "&",       // ac
    "GOSUB",   "RETURN",  "REM",     "STOP",    // b0
    "ON",      "WAIT",    "LOAD",    "SAVE",    // b4
    "DEF",     "POKE",    "PRINT",   "CONT",    // b8
    "LIST",    "CLEAR",   "GET",     "NEW",     // bc
    "TAB(",    "TO",      "FN",      "SPC(",    // c0
    "THEN",    "AT",      "NOT",     "STEP",    // c4
    "+",       "-",       "*",       "/",       // c8
    "^",       "AND",     "OR",      ">",       // cc
    "=",       "<",       "SGN",     "INT",     // d0
    "ABS",     "USR",     "FRE",     "SCRN(",   // d4
    "PDL",     "POS",     "SQR",     "RND",     // d8
    "LOG",     "EXP",     "COS",     "SIN",     // dc
    "TAN",     "ATN",     "PEEK",    "LEN",     // e0
    "STR$",    "VAL",     "ASC",     "CHR$",    // e4
    "LEFT$",   "RIGHT$",  "MID$",               // e8
];

#[cfg(test)]
mod tests {
    use super::*;
    use crate::header::AddressSpace;

    fn run(bytes: &[u8]) -> (Vec<String>, usize) {
        let mut labels = LabelSet::new(AddressSpace { start: 0, end: 0x10000 });
        labels.finalize();
        let mut out = Vec::new();
        let consumed = {
            let mut em = Emitter::new(&mut out);
            emit_table(bytes, 0x3000, &AMPER_TOKENS, &mut labels, &mut em)
        };
        let text = String::from_utf8(out).unwrap();
        (text.lines().map(str::to_string).collect(), consumed)
    }

    #[test]
    fn token_range() {
        assert_eq!(AMPER_TOKENS.get(0x80), Some("END"));
        assert_eq!(AMPER_TOKENS.get(0x89), Some("TEXT"));
        assert_eq!(AMPER_TOKENS.get(0xea), Some("MID$"));
        assert_eq!(AMPER_TOKENS.get(0xeb), None);
        assert_eq!(AMPER_TOKENS.get(0x7f), None);
    }

    #[test]
    fn string_then_token_then_terminator() {
        let (lines, consumed) = run(&[0x41, 0x42, 0x00, 0x89, 0xff, 0x99]);
        assert_eq!(consumed, 5, "nothing past $ff is consumed");
        assert_eq!(lines.len(), 3);
        assert!(lines[0].contains("'AB',0"), "{lines:?}");
        assert!(lines[1].contains("TEXT"), "{lines:?}");
        assert!(lines[2].contains("$ff"), "{lines:?}");
    }

    #[test]
    fn strings_and_tokens_share_a_line() {
        // "HI" token GOTO, then string end
        let (lines, _) = run(&[0x48, 0x49, 0xab, 0x00, 0xff]);
        assert!(lines[0].contains("'HI',GOTO,0"), "{lines:?}");
    }

    #[test]
    fn unrecognized_byte_is_standalone() {
        let (lines, consumed) = run(&[0x01, 0xff]);
        assert_eq!(consumed, 2);
        assert!(lines[0].contains("$01"), "{lines:?}");
        assert!(lines[1].contains("$ff"), "{lines:?}");
    }

    #[test]
    fn leading_zero_byte_is_standalone() {
        let (lines, _) = run(&[0x00, 0xff]);
        assert!(lines[0].contains("$00"), "{lines:?}");
    }

    #[test]
    fn missing_terminator_consumes_everything() {
        let (lines, consumed) = run(&[0x41, 0x42]);
        assert_eq!(consumed, 2);
        assert!(lines[0].contains("'AB'"), "{lines:?}");
    }
}
