//! Pass 2: stream the module back out as assembly source, backpatching
//! label definitions as the program counter sweeps forward.

use std::io::Write;

use m65816::{to_x, Decoder, Emitter, Format};

use crate::amper;
use crate::error::Error;
use crate::header::{Header, HEADER_LEN};
use crate::labels::LabelSet;
use crate::scan;
use crate::symbols;

/// OMM-specific formatting strategy handed to the decoder: `db`-style data
/// lines, width-keyed declaration directives, label backpatching and symbol
/// lookup over this run's label set.
pub struct OmmFormat {
    labels: LabelSet,
}

impl OmmFormat {
    pub fn new(labels: LabelSet) -> Self {
        OmmFormat { labels }
    }

    pub fn labels_mut(&mut self) -> &mut LabelSet {
        &mut self.labels
    }
}

impl Format for OmmFormat {
    fn next_label(&mut self, pc: Option<u32>, out: &mut Emitter) -> Option<u32> {
        self.labels.next_label(pc, out)
    }

    fn label_for_address(&mut self, address: u32) -> String {
        let name = symbols::resolve_global(address);
        if !name.is_empty() {
            return name.to_string();
        }
        if self.labels.contains(address) {
            return symbols::synth(address);
        }
        String::new()
    }

    fn zero_page_for_address(&mut self, address: u32) -> String {
        symbols::resolve_zero_page(address).to_string()
    }

    fn format_data(&mut self, data: &[u8]) -> (String, String) {
        let text = data
            .iter()
            .map(|b| to_x(*b as u32, 2, '$'))
            .collect::<Vec<_>>()
            .join(", ");
        ("db".to_string(), text)
    }

    fn format_data_expr(&mut self, size: usize, expr: &str) -> (String, String) {
        let op = match size {
            1 => "dc.b".to_string(),
            2 => "dc.w".to_string(),
            3 => "dc.a".to_string(),
            4 => "dc.l".to_string(),
            n => format!("{} bytes", n),
        };
        (op, expr.to_string())
    }
}

fn banner(em: &mut Emitter, title: &str) {
    em.blank();
    em.raw("*------------------------------*");
    em.raw(&format!("*{:^30}*", title));
    em.raw("*------------------------------*");
    em.blank();
}

/// Disassemble one mapped OMM image to `out`.
pub fn disassemble(data: &[u8], out: &mut dyn Write) -> Result<(), Error> {
    let h = Header::parse(data)?;
    let space = h.address_space();
    let payload = &data[HEADER_LEN..];

    // Pass 1: boundaries and the finalized label set.
    let mut labels = LabelSet::new(space);
    if h.amperct != 0 {
        labels.insert_table(h.amperct as u32);
    }
    let sections = scan::scan(&h, payload, &mut labels)?;
    labels.finalize();

    let mut d = Decoder::new(OmmFormat::new(labels), Emitter::new(out));
    d.set_pc(space.start);
    d.set_long_a(false);
    d.set_long_x(false);

    let em = d.emitter_mut();
    em.line("", "longa", "off", "");
    em.line("", "longi", "off", "");
    em.line("", "case", "on", "");
    em.blank();
    em.line("", "proc", "", "");

    banner(em, "Header Section");
    em.line("", "dc.w", &to_x(h.version as u32, 4, '$'), "version");
    let lo = (h.id & 0xff) as u8;
    let hi = (h.id >> 8) as u8;
    let id = if (0x20..0x7f).contains(&lo) && (0x20..0x7f).contains(&hi) {
        format!("'{}{}'", lo as char, hi as char)
    } else {
        to_x(h.id as u32, 4, '$')
    };
    em.line("", "dc.w", &id, "id");
    em.line("", "dc.w", "end-start", &format!("size {}", to_x(h.size as u32, 4, '$')));
    em.line("", "dc.w", &to_x(h.org as u32, 4, '$'), "org");
    let amper = if h.amperct != 0 {
        symbols::synth(h.amperct as u32)
    } else {
        to_x(0, 4, '$')
    };
    em.line("", "dc.w", &amper, "ampersand table");
    em.line("", "dc.w", &to_x(h.kind as u32, 4, '$'), "kind");
    em.line("", "dc.w", &to_x(h.res1 as u32, 4, '$'), "reserved");
    em.line("", "dc.w", &to_x(h.res2 as u32, 4, '$'), "reserved");

    banner(d.emitter_mut(), "Code Section");
    d.emitter_mut().label("start");
    d.set_code(true);
    d.prime_labels();
    for b in &payload[sections.code.clone()] {
        d.push(*b);
    }
    d.set_code(false);
    for b in &payload[sections.terminator.clone()] {
        d.push(*b);
    }
    d.flush();

    banner(d.emitter_mut(), "Immediate Section");
    for pair in payload[sections.table.clone()].chunks_exact(2) {
        let w = u16::from_le_bytes([pair[0], pair[1]]) as u32;
        let text = if space.contains(w) {
            symbols::synth(w)
        } else {
            to_x(w, 4, '$')
        };
        d.data_expr(&text, 2);
    }
    d.data_expr("0", 2);
    d.flush();

    banner(d.emitter_mut(), "Data Section");
    let amper_off = (h.amperct as usize).wrapping_sub(h.org as usize);
    if h.amperct != 0 && sections.data.contains(&amper_off) {
        for b in &payload[sections.data.start..amper_off] {
            d.push(*b);
        }
        d.flush();

        let (host, em) = d.parts();
        let consumed = amper::emit_table(
            &payload[amper_off..sections.data.end],
            h.amperct as u32,
            &amper::AMPER_TOKENS,
            host.labels_mut(),
            em,
        );
        d.set_pc(h.amperct as u32 + consumed as u32);
        d.prime_labels();
        for b in &payload[amper_off + consumed..sections.data.end] {
            d.push(*b);
        }
    } else {
        for b in &payload[sections.data.clone()] {
            d.push(*b);
        }
    }
    d.flush();

    // Anything still pending points inside a line we already emitted; one
    // warning each, then the trailer.
    let (host, em) = d.parts();
    host.labels_mut().next_label(Some(space.end), em);

    let em = d.emitter_mut();
    em.blank();
    em.label("end");
    em.line("", "end", "", "");
    em.line("", "endp", "", "");
    Ok(())
}
