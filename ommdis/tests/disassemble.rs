use ommdis::{disassemble, Error};

fn header(version: u16, id: u16, size: u16, org: u16, amperct: u16, kind: u16) -> Vec<u8> {
    let mut v = Vec::new();
    for w in [version, id, size, org, amperct, kind, 0, 0] {
        v.extend_from_slice(&w.to_le_bytes());
    }
    v
}

/// A small version-0 module exercising every region: code with a branch,
/// an out-of-range call, an immediate table with one in-range and one
/// out-of-range word, flat data, an ampersand table, and a trailing byte.
fn sample_module() -> Vec<u8> {
    let payload: Vec<u8> = vec![
        0xa9, 0x41, // 2000  lda #$41
        0x20, 0xed, 0xfd, // 2002  jsr cout
        0xd0, 0xf9, // 2005  bne _2000
        0x60, // 2007  rts
        0x00, // 2008  terminator
        0x0f, 0x20, // 2009  -> _200f
        0x00, 0x03, // 200b  -> $0300
        0x00, 0x00, // 200d  sentinel
        0x01, 0x02, // 200f  flat data
        0x41, 0x42, 0x00, 0x89, 0xff, // 2011  ampersand table: "AB",0 TEXT $ff
        0x07, // 2016  trailing data
    ];
    let mut image = header(0, 0x4d4f, payload.len() as u16, 0x2000, 0x2011, 0);
    image.extend_from_slice(&payload);
    image
}

fn disasm(image: &[u8]) -> String {
    let mut out = Vec::new();
    disassemble(image, &mut out).unwrap();
    String::from_utf8(out).unwrap()
}

#[test]
fn full_module_round_trip() {
    let text = disasm(&sample_module());

    // header section
    assert!(text.contains("longa"), "{text}");
    assert!(text.contains("'OM'"), "{text}");
    assert!(text.contains("end-start"), "{text}");
    assert!(text.contains("$2000"), "{text}");

    // code section
    assert!(text.contains("start"), "{text}");
    assert!(text.contains("#$41"), "{text}");
    assert!(text.contains("cout"), "{text}");
    assert!(text.contains("bne"), "{text}");
    assert!(text.contains("_2000"), "{text}");
    assert!(text.contains("rts"), "{text}");

    // immediate section: in-range word as label, out-of-range as literal
    assert!(text.contains("_200f"), "{text}");
    assert!(text.contains("$0300"), "{text}");

    // data section: flat run, then the tokenized table
    assert!(text.contains("$01, $02"), "{text}");
    assert!(text.contains("'AB',0"), "{text}");
    assert!(text.contains("TEXT"), "{text}");
    assert!(text.contains("$ff"), "{text}");
    assert!(text.contains("$07"), "{text}");

    // trailer
    assert!(text.contains("endp"), "{text}");
}

#[test]
fn labels_are_defined_exactly_once() {
    let text = disasm(&sample_module());
    for label in ["_2000", "_200f", "_2011"] {
        let defs = text
            .lines()
            .filter(|l| l.trim_end() == label)
            .count();
        assert_eq!(defs, 1, "{label} defined {defs} times:\n{text}");
    }
}

#[test]
fn label_definitions_precede_their_region() {
    let text = disasm(&sample_module());
    let lines: Vec<&str> = text.lines().collect();
    let def = lines
        .iter()
        .position(|l| l.trim_end() == "_2011")
        .expect("table label defined");
    assert!(lines[def + 1].contains("'AB',0"), "{text}");
}

#[test]
fn nonzero_kind_is_fatal_with_no_output() {
    let mut image = sample_module();
    image[10] = 0x01; // kind field, low byte
    let mut out = Vec::new();
    let err = disassemble(&image, &mut out).unwrap_err();
    assert!(matches!(err, Error::NotOmm));
    assert_eq!(format!("{}", err), "not an OMM file");
    assert!(out.is_empty());
}

#[test]
fn version1_module_disassembles() {
    // nop, two-byte zero terminator, sentinel word
    let payload: Vec<u8> = vec![0xea, 0x00, 0x00, 0x00, 0x00];
    let mut image = header(1, 0x4d4f, payload.len() as u16, 0x3000, 0, 0);
    image.extend_from_slice(&payload);
    let text = disasm(&image);
    assert!(text.contains("nop"), "{text}");
    assert!(text.contains("$00, $00"), "{text}");
}

#[test]
fn absent_amperct_keeps_data_flat() {
    // data region holds printable bytes that must NOT become a string table
    let payload: Vec<u8> = vec![0x60, 0x00, 0x00, 0x00, 0x41, 0x42];
    let mut image = header(0, 0x4d4f, payload.len() as u16, 0x3000, 0, 0);
    image.extend_from_slice(&payload);
    let text = disasm(&image);
    assert!(text.contains("$41, $42"), "{text}");
    assert!(!text.contains("'AB'"), "{text}");
}
