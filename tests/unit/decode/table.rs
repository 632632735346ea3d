use super::*;

#[test]
fn standard_table_has_ten_opcodes() {
    let t = OpcodeTable::standard();
    assert_eq!(
        t.opcodes().collect::<Vec<_>>(),
        vec![0, 1, 2, 6, 20, 24, 28, 30, 31, 38]
    );
    assert!(!t.contains(3));
    assert!(t.get(63).is_none());
    assert!(t.get(200).is_none());
}

#[test]
fn constructors_build_matching_variants() {
    let t = OpcodeTable::standard();
    let data = [0u8; 16];
    for op in Opcode::ALL {
        let construct = t.get(op.code()).unwrap();
        assert_eq!(construct(&data).opcode(), op);
    }
}

#[test]
fn with_and_without_customise_the_table() {
    fn everything_is_noop(_: &Payload) -> Instruction {
        Instruction::Noop
    }

    let t = OpcodeTable::standard()
        .without(Opcode::TileBlockXor.code())
        .with(5, everything_is_noop)
        .unwrap();
    assert!(!t.contains(38));
    assert!(t.contains(5));

    let err = OpcodeTable::standard().with(64, everything_is_noop).unwrap_err();
    assert!(err.to_string().contains("6 bits"));

    // out-of-range removal is a no-op
    let t = OpcodeTable::empty().without(99);
    assert_eq!(t.opcodes().count(), 0);
}

#[test]
fn vertical_scroll_source_swaps_scroll_constructors() {
    // horizontal command 2 (left), vertical command 1 (down)
    let mut data = [0u8; 16];
    data[1] = 0x20;
    data[2] = 0x10;

    let standard = OpcodeTable::standard();
    let legacy =
        OpcodeTable::standard().with_vertical_scroll(VerticalScrollSource::HorizontalField);

    for code in [Opcode::ScrollPreset.code(), Opcode::ScrollCopy.code()] {
        let (Instruction::ScrollPreset(s) | Instruction::ScrollCopy(s)) =
            standard.get(code).unwrap()(&data)
        else {
            panic!("expected a scroll instruction");
        };
        assert_eq!(s.shift(), (-6, 12));

        let (Instruction::ScrollPreset(s) | Instruction::ScrollCopy(s)) =
            legacy.get(code).unwrap()(&data)
        else {
            panic!("expected a scroll instruction");
        };
        assert_eq!(s.shift(), (-6, -12));
    }
}

#[test]
fn from_settings_applies_vertical_scroll_choice() {
    let settings = PlayerSettings {
        vertical_scroll: VerticalScrollSource::HorizontalField,
        ..PlayerSettings::default()
    };
    let t = OpcodeTable::from_settings(&settings);

    let mut data = [0u8; 16];
    data[1] = 0x10;
    let Instruction::ScrollCopy(s) = t.get(24).unwrap()(&data) else {
        panic!("expected scroll copy");
    };
    assert_eq!(s.shift(), (6, 12));
}

#[test]
fn debug_lists_registered_opcodes() {
    let t = OpcodeTable::empty().with(6, |_: &Payload| Instruction::Noop).unwrap();
    assert_eq!(format!("{t:?}"), "{6}");
}
