//! Pass 1: walk the payload to find the code / immediate-table / data
//! boundaries and collect every address that will need a label.

use std::ops::Range;

use m65816::{operand_size, relative_target, Mode};

use crate::error::Error;
use crate::header::Header;
use crate::labels::LabelSet;

/// Payload byte ranges of the three regions plus the code terminator.
/// Together they cover the payload contiguously:
/// `code ++ terminator ++ table ++ sentinel word ++ data`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sections {
    pub code: Range<usize>,
    pub terminator: Range<usize>,
    pub table: Range<usize>,
    pub data: Range<usize>,
}

/// Scan the payload (the bytes right after the header). Instruction sizing
/// runs with 8-bit accumulator and index flags, matching the emission pass.
pub fn scan(h: &Header, payload: &[u8], labels: &mut LabelSet) -> Result<Sections, Error> {
    let org = h.org as u32;

    // Code region: one opcode at a time until the terminator. Version 0
    // ends at the first zero byte in opcode position; version 1 requires
    // the whole operand to be zero as well, so a BRK with a live signature
    // byte stays part of the code. With the one-byte BRK signature the
    // version-1 terminator is two zero bytes; a third zero belongs to the
    // immediate table's sentinel word.
    let mut i = 0usize;
    let terminator = loop {
        if i >= payload.len() {
            return Err(Error::Truncated);
        }
        let op = payload[i];
        let n = operand_size(op, false, false);
        if op == 0 {
            if h.version == 0 {
                break i..i + 1;
            }
            if payload.len() >= i + 1 + n && payload[i + 1..i + 1 + n].iter().all(|&b| b == 0) {
                break i..i + 1 + n;
            }
        }
        if i + 1 + n > payload.len() {
            return Err(Error::Truncated);
        }
        collect_target(op, &payload[i + 1..i + 1 + n], org + i as u32, labels);
        i += 1 + n;
    };
    let code = 0..terminator.start;

    // Immediate table: words up to (not including) the zero sentinel. Every
    // in-range word is a reference into code or data.
    let mut j = terminator.end;
    let table_start = j;
    loop {
        if j + 2 > payload.len() {
            return Err(Error::Truncated);
        }
        let w = u16::from_le_bytes([payload[j], payload[j + 1]]);
        if w == 0 {
            break;
        }
        labels.insert(w as u32);
        j += 2;
    }

    Ok(Sections {
        code,
        terminator,
        table: table_start..j,
        data: j + 2..payload.len(),
    })
}

/// References the decoder can discover on its own: branch targets and the
/// operands of jump/call opcodes. Out-of-range targets are dropped by the
/// label set.
fn collect_target(op: u8, operand: &[u8], pc: u32, labels: &mut LabelSet) {
    let (_, mode) = m65816::opcode(op);
    match mode {
        Mode::Relative => {
            labels.insert(relative_target(pc, 2, operand[0] as i8 as i32));
        }
        Mode::RelativeLong => {
            let disp = i16::from_le_bytes([operand[0], operand[1]]) as i32;
            labels.insert(relative_target(pc, 3, disp));
        }
        Mode::Absolute
        | Mode::AbsoluteIndirect
        | Mode::AbsoluteIndexedIndirect
        | Mode::AbsoluteIndirectLong
            if m65816::is_flow_target(op) =>
        {
            labels.insert(u16::from_le_bytes([operand[0], operand[1]]) as u32);
        }
        Mode::AbsoluteLong if m65816::is_flow_target(op) => {
            let a = operand[0] as u32 | (operand[1] as u32) << 8 | (operand[2] as u32) << 16;
            labels.insert(a);
        }
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::header::AddressSpace;

    fn header(version: u16, org: u16, size: u16) -> Header {
        Header {
            version,
            id: 0,
            size,
            org,
            amperct: 0,
            kind: 0,
            res1: 0,
            res2: 0,
        }
    }

    fn run(version: u16, org: u16, payload: &[u8]) -> (Sections, LabelSet) {
        let h = header(version, org, payload.len() as u16);
        let mut labels = LabelSet::new(AddressSpace {
            start: org as u32,
            end: org as u32 + payload.len() as u32,
        });
        let sections = scan(&h, payload, &mut labels).unwrap();
        labels.finalize();
        (sections, labels)
    }

    #[test]
    fn version0_stops_at_first_zero_opcode() {
        // nop / nop / terminator / sentinel
        let (s, _) = run(0, 0x1000, &[0xea, 0xea, 0x00, 0x00, 0x00]);
        assert_eq!(s.code, 0..2);
        assert_eq!(s.terminator, 2..3);
        assert_eq!(s.table, 3..3);
        assert_eq!(s.data, 5..5);
    }

    #[test]
    fn version0_zero_operand_byte_is_not_a_terminator() {
        // lda #$00 has a zero operand byte; only opcode positions count
        let (s, _) = run(0, 0x1000, &[0xa9, 0x00, 0x00, 0x00, 0x00]);
        assert_eq!(s.code, 0..2);
        assert_eq!(s.terminator, 2..3);
    }

    #[test]
    fn version1_brk_with_signature_is_code() {
        // brk $05 is an instruction; the 00 00 pair afterwards terminates
        let (s, _) = run(1, 0x1000, &[0x00, 0x05, 0x00, 0x00, 0x00, 0x00]);
        assert_eq!(s.code, 0..2);
        assert_eq!(s.terminator, 2..4);
        assert_eq!(s.table, 4..4);
        assert_eq!(s.data, 6..6);
    }

    #[test]
    fn version1_terminator_is_opcode_plus_signature() {
        let (s, _) = run(1, 0x1000, &[0xea, 0x00, 0x00, 0x00, 0x00]);
        assert_eq!(s.code, 0..1);
        assert_eq!(s.terminator, 1..3);
    }

    #[test]
    fn version1_third_zero_feeds_the_sentinel() {
        // a run of three zeros splits two-and-then-sentinel, not three-and
        let payload = [0xea, 0x00, 0x00, 0x00, 0x00, 0x00, 0x41];
        let (s, _) = run(1, 0x1000, &payload);
        assert_eq!(s.terminator, 1..3);
        assert_eq!(s.table, 3..3);
        assert_eq!(s.data, 5..7);
    }

    #[test]
    fn immediate_words_become_labels() {
        // terminator, then 0x1000 and 0x2000... 0x2000 is out of range here
        let payload = [0x00, 0x00, 0x10, 0x00, 0x20, 0x00, 0x00];
        let (s, labels) = run(0, 0x1000, &payload);
        assert_eq!(s.table, 1..5);
        assert_eq!(s.data, 7..7);
        assert!(labels.contains(0x1000));
        assert!(!labels.contains(0x2000));
        assert_eq!(labels.len(), 1);
    }

    #[test]
    fn immediate_scan_stops_at_sentinel() {
        // both words in range when the module is large enough
        let payload = [0x00, 0x00, 0x10, 0x00, 0x20, 0x00, 0x00, 0xaa];
        let h = header(0, 0x1000, payload.len() as u16);
        let mut labels = LabelSet::new(AddressSpace { start: 0x1000, end: 0x4000 });
        let s = scan(&h, &payload, &mut labels).unwrap();
        labels.finalize();
        assert_eq!(s.table.start, 1);
        assert_eq!(s.data.start - s.table.start, 6, "table plus sentinel");
        assert!(labels.contains(0x1000));
        assert!(labels.contains(0x2000));
        assert_eq!(labels.len(), 2);
    }

    #[test]
    fn branch_and_jump_targets_are_collected() {
        // bra +2 (to 0x1004) / jsr $fded (out of range) / jmp $1000 / term / sentinel
        let payload = [
            0x80, 0x02, // bra _1004
            0x20, 0xed, 0xfd, // jsr cout
            0x4c, 0x00, 0x10, // jmp _1000
            0x00, 0x00, 0x00,
        ];
        let (_, labels) = run(0, 0x1000, &payload);
        assert!(labels.contains(0x1004));
        assert!(labels.contains(0x1000));
        assert!(!labels.contains(0xfded));
    }

    #[test]
    fn data_operands_are_not_labeled() {
        // lda $1000 references in-range data but is not a flow target
        let payload = [0xad, 0x00, 0x10, 0x00, 0x00, 0x00];
        let (_, labels) = run(0, 0x1000, &payload);
        assert!(labels.is_empty());
    }

    #[test]
    fn truncated_code_is_fatal() {
        let h = header(0, 0x1000, 2);
        let mut labels = LabelSet::new(AddressSpace { start: 0x1000, end: 0x1002 });
        assert!(matches!(
            scan(&h, &[0xea, 0xea], &mut labels),
            Err(Error::Truncated)
        ));
    }

    #[test]
    fn missing_sentinel_is_fatal() {
        let h = header(0, 0x1000, 3);
        let mut labels = LabelSet::new(AddressSpace { start: 0x1000, end: 0x1003 });
        assert!(matches!(
            scan(&h, &[0x00, 0x10, 0x10], &mut labels),
            Err(Error::Truncated)
        ));
    }
}
