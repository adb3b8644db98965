//! Streaming 65816 disassembler core.
//!
//! The [`Decoder`] is fed one raw byte at a time and buffers a full
//! instruction before formatting it. Everything format-specific (data
//! declaration directives, label backpatching, symbol lookup) goes through
//! the [`Format`] strategy supplied at construction, so the same decoder can
//! serve different container formats.

pub mod op;

pub use op::{is_flow_target, opcode, operand_size, Mode};

use std::io::Write;

/// Fixed-width hex literal with a chosen prefix character, e.g.
/// `to_x(0x12, 4, '$')` is `"$0012"` and `to_x(0x3f00, 4, '_')` is `"_3f00"`.
pub fn to_x(value: u32, width: usize, prefix: char) -> String {
    format!("{}{:0width$x}", prefix, value, width = width)
}

// ----------------------------------------------------------------------------
// Emitter

/// Line-oriented output sink. One call, one source line. A closed pipe on
/// the far end (e.g. piping into `head`) silences output instead of
/// panicking; any other write failure is fatal.
pub struct Emitter<'a> {
    out: &'a mut dyn Write,
}

impl<'a> Emitter<'a> {
    pub fn new(out: &'a mut dyn Write) -> Self {
        Emitter { out }
    }

    /// A bare label definition in column one.
    pub fn label(&mut self, label: &str) {
        self.put(label);
    }

    /// A full source line: optional label, opcode or directive, operand,
    /// trailing comment.
    pub fn line(&mut self, label: &str, op: &str, operand: &str, comment: &str) {
        let mut s = format!("{:<9} {}", label, op);
        if !operand.is_empty() {
            s = format!("{:<19} {}", s, operand);
        }
        if !comment.is_empty() {
            s = format!("{:<39} ; {}", s, comment);
        }
        self.put(s.trim_end());
    }

    /// Verbatim text, used for section banners.
    pub fn raw(&mut self, text: &str) {
        self.put(text);
    }

    pub fn blank(&mut self) {
        self.put("");
    }

    fn put(&mut self, text: &str) {
        if let Err(e) = writeln!(self.out, "{}", text) {
            if e.kind() != std::io::ErrorKind::BrokenPipe {
                panic!("failed to write output: {}", e);
            }
        }
    }
}

// ----------------------------------------------------------------------------
// Format strategy

/// Per-container-format capabilities the decoder calls back into.
pub trait Format {
    /// Label backpatching. `pc == None` peeks the smallest pending address
    /// without consuming it; otherwise every label due at or before `pc` is
    /// either defined through `out` or reported as unplaceable, and the next
    /// still-pending address is returned.
    fn next_label(&mut self, pc: Option<u32>, out: &mut Emitter) -> Option<u32>;

    /// Symbolic name for an operand address, or `""` to fall back to a
    /// numeric literal.
    fn label_for_address(&mut self, address: u32) -> String;

    /// Zero-page variable name, or `""`. The operand formatter resolves
    /// direct-page operands through `label_for_address` instead; this lookup
    /// only surfaces through callers outside the decoder.
    fn zero_page_for_address(&mut self, address: u32) -> String;

    /// Directive and operand text for a run of raw data bytes.
    fn format_data(&mut self, data: &[u8]) -> (String, String);

    /// Directive and operand text for an already-formatted expression
    /// covering `size` bytes.
    fn format_data_expr(&mut self, size: usize, expr: &str) -> (String, String);
}

// ----------------------------------------------------------------------------
// Decoder

/// Byte-at-a-time instruction decoder and data formatter.
pub struct Decoder<'a, F: Format> {
    host: F,
    em: Emitter<'a>,
    pc: u32,
    long_a: bool,
    long_x: bool,
    code: bool,
    buf: Vec<u8>,
    need: usize,
    data: Vec<u8>,
    next_label: Option<u32>,
}

/// Data-mode bytes per `db` line.
const DATA_RUN: usize = 8;

impl<'a, F: Format> Decoder<'a, F> {
    pub fn new(host: F, em: Emitter<'a>) -> Self {
        Decoder {
            host,
            em,
            pc: 0,
            long_a: false,
            long_x: false,
            code: false,
            buf: Vec::new(),
            need: 0,
            data: Vec::new(),
            next_label: None,
        }
    }

    pub fn set_pc(&mut self, pc: u32) {
        self.pc = pc;
    }

    pub fn set_long_a(&mut self, long_a: bool) {
        self.long_a = long_a;
    }

    pub fn set_long_x(&mut self, long_x: bool) {
        self.long_x = long_x;
    }

    /// Switch between instruction decoding and flat data emission. Flushes
    /// anything buffered so a partial line never crosses the switch.
    pub fn set_code(&mut self, on: bool) {
        self.flush();
        self.code = on;
    }

    pub fn emitter_mut(&mut self) -> &mut Emitter<'a> {
        &mut self.em
    }

    /// Simultaneous access to the format strategy and the emitter, for
    /// callers that drive backpatching outside the decoder.
    pub fn parts(&mut self) -> (&mut F, &mut Emitter<'a>) {
        (&mut self.host, &mut self.em)
    }

    /// Asks the format for the smallest pending label so backpatch checks
    /// can run. Call after `set_pc` and whenever labels were consumed
    /// outside the decoder.
    pub fn prime_labels(&mut self) {
        self.next_label = self.host.next_label(None, &mut self.em);
    }

    /// Feed one raw byte.
    pub fn push(&mut self, byte: u8) {
        if self.code {
            self.push_code(byte);
        } else {
            self.push_data(byte);
        }
    }

    /// Emit an already-formatted expression as a `size`-byte declaration at
    /// the current pc.
    pub fn data_expr(&mut self, expr: &str, size: usize) {
        self.flush();
        self.place_labels();
        let (op, operand) = self.host.format_data_expr(size, expr);
        self.em.line("", &op, &operand, "");
        self.pc += size as u32;
    }

    /// Flush any buffered-but-unemitted bytes. A partially fed instruction
    /// is dumped as raw data.
    pub fn flush(&mut self) {
        if !self.buf.is_empty() {
            let bytes = std::mem::take(&mut self.buf);
            let (op, operand) = self.host.format_data(&bytes);
            self.em.line("", &op, &operand, "");
            self.pc += bytes.len() as u32;
        }
        self.flush_data();
    }

    fn place_labels(&mut self) {
        if let Some(l) = self.next_label {
            if l <= self.pc {
                self.next_label = self.host.next_label(Some(self.pc), &mut self.em);
            }
        }
    }

    fn push_code(&mut self, byte: u8) {
        if self.buf.is_empty() {
            self.place_labels();
        }
        self.buf.push(byte);
        if self.buf.len() == 1 {
            self.need = 1 + operand_size(byte, self.long_a, self.long_x);
        }
        if self.buf.len() == self.need {
            self.emit_instruction();
        }
    }

    fn push_data(&mut self, byte: u8) {
        let addr = self.pc + self.data.len() as u32;
        if let Some(l) = self.next_label {
            if l <= addr {
                self.flush_data();
                self.place_labels();
            }
        }
        self.data.push(byte);
        if self.data.len() == DATA_RUN {
            self.flush_data();
        }
    }

    fn flush_data(&mut self) {
        if self.data.is_empty() {
            return;
        }
        let bytes = std::mem::take(&mut self.data);
        let (op, operand) = self.host.format_data(&bytes);
        self.em.line("", &op, &operand, "");
        self.pc += bytes.len() as u32;
    }

    fn emit_instruction(&mut self) {
        let (mnemonic, mode) = opcode(self.buf[0]);
        let operand = self.format_operand(mode);
        let mut comment = format!("{:04x}:", self.pc);
        for b in &self.buf {
            comment.push_str(&format!(" {:02x}", b));
        }
        self.em.line("", mnemonic, &operand, &comment);
        self.pc += self.buf.len() as u32;
        self.buf.clear();
    }

    fn name_or(&mut self, address: u32, width: usize) -> String {
        let name = self.host.label_for_address(address);
        if name.is_empty() {
            to_x(address, width, '$')
        } else {
            name
        }
    }

    fn format_operand(&mut self, mode: Mode) -> String {
        use Mode::*;

        let v8 = *self.buf.get(1).unwrap_or(&0) as u32;
        let v16 = v8 | (*self.buf.get(2).unwrap_or(&0) as u32) << 8;
        let v24 = v16 | (*self.buf.get(3).unwrap_or(&0) as u32) << 16;

        match mode {
            Implied => String::new(),
            Accumulator => "a".to_string(),
            ImmediateM | ImmediateX | Immediate8 => {
                let width = (self.buf.len() - 1) * 2;
                format!("#{}", to_x(if width == 2 { v8 } else { v16 }, width, '$'))
            }
            Signature => to_x(v8, 2, '$'),
            Direct => self.name_or(v8, 2),
            DirectX => format!("{},x", self.name_or(v8, 2)),
            DirectY => format!("{},y", self.name_or(v8, 2)),
            DirectIndirect => format!("({})", self.name_or(v8, 2)),
            DirectIndexedIndirect => format!("({},x)", self.name_or(v8, 2)),
            DirectIndirectIndexed => format!("({}),y", self.name_or(v8, 2)),
            DirectIndirectLong => format!("[{}]", self.name_or(v8, 2)),
            DirectIndirectLongY => format!("[{}],y", self.name_or(v8, 2)),
            StackRelative => format!("{},s", to_x(v8, 2, '$')),
            StackRelativeIndirectY => format!("({},s),y", to_x(v8, 2, '$')),
            Absolute => self.name_or(v16, 4),
            AbsoluteX => format!("{},x", self.name_or(v16, 4)),
            AbsoluteY => format!("{},y", self.name_or(v16, 4)),
            AbsoluteIndirect => format!("({})", self.name_or(v16, 4)),
            AbsoluteIndexedIndirect => format!("({},x)", self.name_or(v16, 4)),
            AbsoluteIndirectLong => format!("[{}]", self.name_or(v16, 4)),
            AbsoluteLong => self.name_or(v24, 6),
            AbsoluteLongX => format!("{},x", self.name_or(v24, 6)),
            Relative => {
                let target = relative_target(self.pc, 2, v8 as u8 as i8 as i32);
                self.name_or(target, 4)
            }
            RelativeLong => {
                let target = relative_target(self.pc, 3, v16 as u16 as i16 as i32);
                self.name_or(target, 4)
            }
            BlockMove => {
                let src = *self.buf.get(2).unwrap_or(&0) as u32;
                let dst = *self.buf.get(1).unwrap_or(&0) as u32;
                format!("{},{}", to_x(src, 2, '$'), to_x(dst, 2, '$'))
            }
        }
    }
}

/// Branch destination for a relative operand of an instruction starting at
/// `pc` and occupying `len` bytes, wrapped to the 16-bit address space.
pub fn relative_target(pc: u32, len: u32, disp: i32) -> u32 {
    (pc as i32 + len as i32 + disp) as u32 & 0xffff
}
