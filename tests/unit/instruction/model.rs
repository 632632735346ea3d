use super::*;

fn payload(prefix: &[u8]) -> Payload {
    let mut data = [0u8; 16];
    data[..prefix.len()].copy_from_slice(prefix);
    data
}

fn encode_clut(colors: &[[u8; 3]; 8]) -> Payload {
    let mut data = [0u8; 16];
    for (i, [r, g, b]) in colors.iter().enumerate() {
        let value = (u16::from(*r) << 8) | (u16::from(*g) << 4) | u16::from(*b);
        data[2 * i] = ((value >> 6) & 0x3f) as u8;
        data[2 * i + 1] = (value & 0x3f) as u8;
    }
    data
}

#[test]
fn opcode_codes_roundtrip() {
    for op in Opcode::ALL {
        assert_eq!(Opcode::from_code(op.code()), Some(op));
    }
    assert_eq!(Opcode::from_code(3), None);
    assert_eq!(Opcode::TileBlockXor.code(), 38);
    assert_eq!(Opcode::LoadClutHigh.name(), "Load CLUT (High)");
}

#[test]
fn color_fields_are_masked_to_four_bits() {
    let p = MemoryPreset::decode(&payload(&[0xf3, 0x27]));
    assert_eq!(p, MemoryPreset { color: 3, repeat: 7 });
    assert_eq!(BorderPreset::decode(&payload(&[0x1c])).color, 12);
    assert_eq!(SetKeyColor::decode(&payload(&[0x4a])).color, 10);
}

#[test]
fn tile_block_fields_and_bit_order() {
    let mut data = payload(&[0x12, 0x3b, 0xe5, 0xc7]);
    data[4] = 0b10_0001;
    data[15] = 0b11_1111;
    let t = TileBlock::decode(&data);

    assert_eq!(t.colors, [2, 11]);
    assert_eq!(t.row, 5);
    assert_eq!(t.column, 7);
    assert_eq!(t.origin(), (42, 60));

    // MSB first: bit 5 is the leftmost pixel
    assert_eq!(t.color_at(0, 0), 11);
    assert_eq!(t.color_at(1, 0), 2);
    assert_eq!(t.color_at(5, 0), 11);
    assert!((0..6).all(|j| t.color_at(j, 11) == 11));
    assert!((0..6).all(|j| t.color_at(j, 5) == 2));
}

#[test]
fn scroll_decodes_commands_and_clamps_offsets() {
    // h: cmd 2, offset 7; v: cmd 1, offset 15
    let s = Scroll::decode(
        &payload(&[0x04, 0x27, 0x1f]),
        VerticalScrollSource::VerticalField,
    );
    assert_eq!(s.color, 4);
    assert_eq!(s.h_scroll, HScroll::Left);
    assert_eq!(s.h_offset, 5);
    assert_eq!(s.v_scroll, VScroll::Down);
    assert_eq!(s.v_offset, 11);
    assert_eq!(s.shift(), (-6, 12));

    let s = Scroll::decode(&payload(&[0, 0x03, 0x09]), VerticalScrollSource::VerticalField);
    assert_eq!((s.h_offset, s.v_offset), (3, 9));
    assert_eq!(s.shift(), (0, 0));

    // command value 3 is reserved and means no scroll
    let s = Scroll::decode(&payload(&[0, 0x30, 0x30]), VerticalScrollSource::VerticalField);
    assert_eq!(s.shift(), (0, 0));
}

#[test]
fn legacy_scroll_reads_vertical_command_from_horizontal_field() {
    // h: cmd 1 (right); v: cmd 2 (up), offset 4
    let data = payload(&[0, 0x10, 0x24]);

    let intended = Scroll::decode(&data, VerticalScrollSource::VerticalField);
    assert_eq!(intended.shift(), (6, -12));

    let legacy = Scroll::decode(&data, VerticalScrollSource::HorizontalField);
    assert_eq!(legacy.shift(), (6, 12));
    assert_eq!(legacy.v_offset, 4);
}

#[test]
fn load_clut_decodes_twelve_bit_entries() {
    let colors = [
        [0, 0, 0],
        [15, 15, 15],
        [1, 2, 3],
        [15, 0, 8],
        [7, 7, 0],
        [0, 9, 15],
        [12, 4, 1],
        [3, 14, 6],
    ];
    let c = LoadClut::decode(&encode_clut(&colors));
    assert_eq!(c.colors, colors);
}

#[test]
fn load_clut_ignores_high_bits() {
    let mut data = encode_clut(&[[5, 6, 7]; 8]);
    for b in &mut data {
        *b |= 0xc0;
    }
    assert_eq!(LoadClut::decode(&data).colors, [[5, 6, 7]; 8]);
}

#[test]
fn display_includes_details() {
    assert_eq!(Instruction::Noop.to_string(), "No-op");
    assert_eq!(
        Instruction::MemoryPreset(MemoryPreset { color: 3, repeat: 0 }).to_string(),
        "Memory Preset color index: 3"
    );

    let t = TileBlock {
        colors: [1, 2],
        row: 4,
        column: 9,
        bitmap: [0; 12],
    };
    assert_eq!(
        Instruction::TileBlockXor(t).to_string(),
        "Tile Block (XOR) row: 4, column: 9, color indexes: [1, 2]"
    );

    let s = Scroll {
        color: 0,
        h_scroll: HScroll::Left,
        h_offset: 2,
        v_scroll: VScroll::Up,
        v_offset: 1,
    };
    assert_eq!(
        Instruction::ScrollCopy(s).to_string(),
        "Scroll Copy up left vOffset: 1 hOffset: 2"
    );

    let c = LoadClut {
        colors: [[15, 0, 10]; 8],
    };
    let text = Instruction::LoadClutHigh(c).to_string();
    assert!(text.starts_with("Load CLUT (High) colors: [8: #f0a, 9: #f0a"));
    assert!(text.ends_with("15: #f0a]"));
}

#[test]
fn instruction_opcode_matches_variant() {
    let c = LoadClut {
        colors: [[0; 3]; 8],
    };
    assert_eq!(Instruction::LoadClutLow(c).opcode(), Opcode::LoadClutLow);
    assert_eq!(Instruction::Noop.name(), "No-op");
}
