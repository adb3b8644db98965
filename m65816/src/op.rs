//! 65816 opcode table: one entry per opcode byte, mnemonic plus addressing
//! mode. Operand widths for the immediate modes depend on the accumulator /
//! index register width flags.

/// Addressing mode of a 65816 instruction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Implied,
    Accumulator,
    /// `#imm`, sized by the accumulator width flag.
    ImmediateM,
    /// `#imm`, sized by the index register width flag.
    ImmediateX,
    /// `#imm`, always one byte (REP / SEP).
    Immediate8,
    /// BRK / COP / WDM signature byte.
    Signature,
    Direct,
    DirectX,
    DirectY,
    /// `(dp)`
    DirectIndirect,
    /// `(dp,x)`
    DirectIndexedIndirect,
    /// `(dp),y`
    DirectIndirectIndexed,
    /// `[dp]`
    DirectIndirectLong,
    /// `[dp],y`
    DirectIndirectLongY,
    Absolute,
    AbsoluteX,
    AbsoluteY,
    AbsoluteLong,
    AbsoluteLongX,
    /// `(abs)`
    AbsoluteIndirect,
    /// `(abs,x)`
    AbsoluteIndexedIndirect,
    /// `[abs]`
    AbsoluteIndirectLong,
    Relative,
    RelativeLong,
    /// `sr,s`
    StackRelative,
    /// `(sr,s),y`
    StackRelativeIndirectY,
    /// MVN / MVP bank pair.
    BlockMove,
}

impl Mode {
    /// Number of operand bytes, excluding the opcode byte itself.
    pub fn operand_size(self, long_a: bool, long_x: bool) -> usize {
        use Mode::*;
        match self {
            Implied | Accumulator => 0,
            ImmediateM => {
                if long_a {
                    2
                } else {
                    1
                }
            }
            ImmediateX => {
                if long_x {
                    2
                } else {
                    1
                }
            }
            Immediate8 | Signature | Relative => 1,
            Direct | DirectX | DirectY => 1,
            DirectIndirect | DirectIndexedIndirect | DirectIndirectIndexed => 1,
            DirectIndirectLong | DirectIndirectLongY => 1,
            StackRelative | StackRelativeIndirectY => 1,
            Absolute | AbsoluteX | AbsoluteY => 2,
            AbsoluteIndirect | AbsoluteIndexedIndirect | AbsoluteIndirectLong => 2,
            RelativeLong | BlockMove => 2,
            AbsoluteLong | AbsoluteLongX => 3,
        }
    }
}

/// Operand bytes consumed by `op` under the given width flags.
pub fn operand_size(op: u8, long_a: bool, long_x: bool) -> usize {
    OPCODES[op as usize].1.operand_size(long_a, long_x)
}

/// Mnemonic and addressing mode for an opcode byte.
pub fn opcode(op: u8) -> (&'static str, Mode) {
    OPCODES[op as usize]
}

/// Jump / call opcodes whose operand is a code or pointer address worth a
/// label: JSR, JSL, JMP and the indirect JMP/JSR forms, JML.
pub fn is_flow_target(op: u8) -> bool {
    matches!(op, 0x20 | 0x22 | 0x4c | 0x5c | 0x6c | 0x7c | 0xdc | 0xfc)
}

#[rustfmt::skip]
pub static OPCODES: [(&str, Mode); 256] = {
    use Mode::*;
    [
        ("brk", Signature),              // 00
        ("ora", DirectIndexedIndirect),  // 01
        ("cop", Signature),              // 02
        ("ora", StackRelative),          // 03
        ("tsb", Direct),                 // 04
        ("ora", Direct),                 // 05
        ("asl", Direct),                 // 06
        ("ora", DirectIndirectLong),     // 07
        ("php", Implied),                // 08
        ("ora", ImmediateM),             // 09
        ("asl", Accumulator),            // 0a
        ("phd", Implied),                // 0b
        ("tsb", Absolute),               // 0c
        ("ora", Absolute),               // 0d
        ("asl", Absolute),               // 0e
        ("ora", AbsoluteLong),           // 0f
        ("bpl", Relative),               // 10
        ("ora", DirectIndirectIndexed),  // 11
        ("ora", DirectIndirect),         // 12
        ("ora", StackRelativeIndirectY), // 13
        ("trb", Direct),                 // 14
        ("ora", DirectX),                // 15
        ("asl", DirectX),                // 16
        ("ora", DirectIndirectLongY),    // 17
        ("clc", Implied),                // 18
        ("ora", AbsoluteY),              // 19
        ("inc", Accumulator),            // 1a
        ("tcs", Implied),                // 1b
        ("trb", Absolute),               // 1c
        ("ora", AbsoluteX),              // 1d
        ("asl", AbsoluteX),              // 1e
        ("ora", AbsoluteLongX),          // 1f
        ("jsr", Absolute),               // 20
        ("and", DirectIndexedIndirect),  // 21
        ("jsl", AbsoluteLong),           // 22
        ("and", StackRelative),          // 23
        ("bit", Direct),                 // 24
        ("and", Direct),                 // 25
        ("rol", Direct),                 // 26
        ("and", DirectIndirectLong),     // 27
        ("plp", Implied),                // 28
        ("and", ImmediateM),             // 29
        ("rol", Accumulator),            // 2a
        ("pld", Implied),                // 2b
        ("bit", Absolute),               // 2c
        ("and", Absolute),               // 2d
        ("rol", Absolute),               // 2e
        ("and", AbsoluteLong),           // 2f
        ("bmi", Relative),               // 30
        ("and", DirectIndirectIndexed),  // 31
        ("and", DirectIndirect),         // 32
        ("and", StackRelativeIndirectY), // 33
        ("bit", DirectX),                // 34
        ("and", DirectX),                // 35
        ("rol", DirectX),                // 36
        ("and", DirectIndirectLongY),    // 37
        ("sec", Implied),                // 38
        ("and", AbsoluteY),              // 39
        ("dec", Accumulator),            // 3a
        ("tsc", Implied),                // 3b
        ("bit", AbsoluteX),              // 3c
        ("and", AbsoluteX),              // 3d
        ("rol", AbsoluteX),              // 3e
        ("and", AbsoluteLongX),          // 3f
        ("rti", Implied),                // 40
        ("eor", DirectIndexedIndirect),  // 41
        ("wdm", Signature),              // 42
        ("eor", StackRelative),          // 43
        ("mvp", BlockMove),              // 44
        ("eor", Direct),                 // 45
        ("lsr", Direct),                 // 46
        ("eor", DirectIndirectLong),     // 47
        ("pha", Implied),                // 48
        ("eor", ImmediateM),             // 49
        ("lsr", Accumulator),            // 4a
        ("phk", Implied),                // 4b
        ("jmp", Absolute),               // 4c
        ("eor", Absolute),               // 4d
        ("lsr", Absolute),               // 4e
        ("eor", AbsoluteLong),           // 4f
        ("bvc", Relative),               // 50
        ("eor", DirectIndirectIndexed),  // 51
        ("eor", DirectIndirect),         // 52
        ("eor", StackRelativeIndirectY), // 53
        ("mvn", BlockMove),              // 54
        ("eor", DirectX),                // 55
        ("lsr", DirectX),                // 56
        ("eor", DirectIndirectLongY),    // 57
        ("cli", Implied),                // 58
        ("eor", AbsoluteY),              // 59
        ("phy", Implied),                // 5a
        ("tcd", Implied),                // 5b
        ("jml", AbsoluteLong),           // 5c
        ("eor", AbsoluteX),              // 5d
        ("lsr", AbsoluteX),              // 5e
        ("eor", AbsoluteLongX),          // 5f
        ("rts", Implied),                // 60
        ("adc", DirectIndexedIndirect),  // 61
        ("per", RelativeLong),           // 62
        ("adc", StackRelative),          // 63
        ("stz", Direct),                 // 64
        ("adc", Direct),                 // 65
        ("ror", Direct),                 // 66
        ("adc", DirectIndirectLong),     // 67
        ("pla", Implied),                // 68
        ("adc", ImmediateM),             // 69
        ("ror", Accumulator),            // 6a
        ("rtl", Implied),                // 6b
        ("jmp", AbsoluteIndirect),       // 6c
        ("adc", Absolute),               // 6d
        ("ror", Absolute),               // 6e
        ("adc", AbsoluteLong),           // 6f
        ("bvs", Relative),               // 70
        ("adc", DirectIndirectIndexed),  // 71
        ("adc", DirectIndirect),         // 72
        ("adc", StackRelativeIndirectY), // 73
        ("stz", DirectX),                // 74
        ("adc", DirectX),                // 75
        ("ror", DirectX),                // 76
        ("adc", DirectIndirectLongY),    // 77
        ("sei", Implied),                // 78
        ("adc", AbsoluteY),              // 79
        ("ply", Implied),                // 7a
        ("tdc", Implied),                // 7b
        ("jmp", AbsoluteIndexedIndirect),// 7c
        ("adc", AbsoluteX),              // 7d
        ("ror", AbsoluteX),              // 7e
        ("adc", AbsoluteLongX),          // 7f
        ("bra", Relative),               // 80
        ("sta", DirectIndexedIndirect),  // 81
        ("brl", RelativeLong),           // 82
        ("sta", StackRelative),          // 83
        ("sty", Direct),                 // 84
        ("sta", Direct),                 // 85
        ("stx", Direct),                 // 86
        ("sta", DirectIndirectLong),     // 87
        ("dey", Implied),                // 88
        ("bit", ImmediateM),             // 89
        ("txa", Implied),                // 8a
        ("phb", Implied),                // 8b
        ("sty", Absolute),               // 8c
        ("sta", Absolute),               // 8d
        ("stx", Absolute),               // 8e
        ("sta", AbsoluteLong),           // 8f
        ("bcc", Relative),               // 90
        ("sta", DirectIndirectIndexed),  // 91
        ("sta", DirectIndirect),         // 92
        ("sta", StackRelativeIndirectY), // 93
        ("sty", DirectX),                // 94
        ("sta", DirectX),                // 95
        ("stx", DirectY),                // 96
        ("sta", DirectIndirectLongY),    // 97
        ("tya", Implied),                // 98
        ("sta", AbsoluteY),              // 99
        ("txs", Implied),                // 9a
        ("txy", Implied),                // 9b
        ("stz", Absolute),               // 9c
        ("sta", AbsoluteX),              // 9d
        ("stz", AbsoluteX),              // 9e
        ("sta", AbsoluteLongX),          // 9f
        ("ldy", ImmediateX),             // a0
        ("lda", DirectIndexedIndirect),  // a1
        ("ldx", ImmediateX),             // a2
        ("lda", StackRelative),          // a3
        ("ldy", Direct),                 // a4
        ("lda", Direct),                 // a5
        ("ldx", Direct),                 // a6
        ("lda", DirectIndirectLong),     // a7
        ("tay", Implied),                // a8
        ("lda", ImmediateM),             // a9
        ("tax", Implied),                // aa
        ("plb", Implied),                // ab
        ("ldy", Absolute),               // ac
        ("lda", Absolute),               // ad
        ("ldx", Absolute),               // ae
        ("lda", AbsoluteLong),           // af
        ("bcs", Relative),               // b0
        ("lda", DirectIndirectIndexed),  // b1
        ("lda", DirectIndirect),         // b2
        ("lda", StackRelativeIndirectY), // b3
        ("ldy", DirectX),                // b4
        ("lda", DirectX),                // b5
        ("ldx", DirectY),                // b6
        ("lda", DirectIndirectLongY),    // b7
        ("clv", Implied),                // b8
        ("lda", AbsoluteY),              // b9
        ("tsx", Implied),                // ba
        ("tyx", Implied),                // bb
        ("ldy", AbsoluteX),              // bc
        ("lda", AbsoluteX),              // bd
        ("ldx", AbsoluteY),              // be
        ("lda", AbsoluteLongX),          // bf
        ("cpy", ImmediateX),             // c0
        ("cmp", DirectIndexedIndirect),  // c1
        ("rep", Immediate8),             // c2
        ("cmp", StackRelative),          // c3
        ("cpy", Direct),                 // c4
        ("cmp", Direct),                 // c5
        ("dec", Direct),                 // c6
        ("cmp", DirectIndirectLong),     // c7
        ("iny", Implied),                // c8
        ("cmp", ImmediateM),             // c9
        ("dex", Implied),                // ca
        ("wai", Implied),                // cb
        ("cpy", Absolute),               // cc
        ("cmp", Absolute),               // cd
        ("dec", Absolute),               // ce
        ("cmp", AbsoluteLong),           // cf
        ("bne", Relative),               // d0
        ("cmp", DirectIndirectIndexed),  // d1
        ("cmp", DirectIndirect),         // d2
        ("cmp", StackRelativeIndirectY), // d3
        ("pei", DirectIndirect),         // d4
        ("cmp", DirectX),                // d5
        ("dec", DirectX),                // d6
        ("cmp", DirectIndirectLongY),    // d7
        ("cld", Implied),                // d8
        ("cmp", AbsoluteY),              // d9
        ("phx", Implied),                // da
        ("stp", Implied),                // db
        ("jml", AbsoluteIndirectLong),   // dc
        ("cmp", AbsoluteX),              // dd
        ("dec", AbsoluteX),              // de
        ("cmp", AbsoluteLongX),          // df
        ("cpx", ImmediateX),             // e0
        ("sbc", DirectIndexedIndirect),  // e1
        ("sep", Immediate8),             // e2
        ("sbc", StackRelative),          // e3
        ("cpx", Direct),                 // e4
        ("sbc", Direct),                 // e5
        ("inc", Direct),                 // e6
        ("sbc", DirectIndirectLong),     // e7
        ("inx", Implied),                // e8
        ("sbc", ImmediateM),             // e9
        ("nop", Implied),                // ea
        ("xba", Implied),                // eb
        ("cpx", Absolute),               // ec
        ("sbc", Absolute),               // ed
        ("inc", Absolute),               // ee
        ("sbc", AbsoluteLong),           // ef
        ("beq", Relative),               // f0
        ("sbc", DirectIndirectIndexed),  // f1
        ("sbc", DirectIndirect),         // f2
        ("sbc", StackRelativeIndirectY), // f3
        ("pea", Absolute),               // f4
        ("sbc", DirectX),                // f5
        ("inc", DirectX),                // f6
        ("sbc", DirectIndirectLongY),    // f7
        ("sed", Implied),                // f8
        ("sbc", AbsoluteY),              // f9
        ("plx", Implied),                // fa
        ("xce", Implied),                // fb
        ("jsr", AbsoluteIndexedIndirect),// fc
        ("sbc", AbsoluteX),              // fd
        ("inc", AbsoluteX),              // fe
        ("sbc", AbsoluteLongX),          // ff
    ]
};
