use super::*;

fn raw(command: u8, opcode: u8) -> [u8; PACKET_SIZE] {
    let mut p = [0u8; PACKET_SIZE];
    p[0] = command;
    p[1] = opcode;
    for (i, b) in p[DATA_OFFSET..DATA_OFFSET + DATA_LEN].iter_mut().enumerate() {
        *b = i as u8;
    }
    p
}

#[test]
fn command_and_opcode_are_masked() {
    let bytes = raw(0xc9, 0x40 | 6);
    let p = Packet::new(&bytes);
    assert_eq!(p.command(), CDG_COMMAND);
    assert!(p.is_cdg());
    assert_eq!(p.opcode(), 6);

    let bytes = raw(0x08, 6);
    assert!(!Packet::new(&bytes).is_cdg());
}

#[test]
fn payload_skips_parity() {
    let mut bytes = raw(CDG_COMMAND, 1);
    bytes[2] = 0xaa;
    bytes[3] = 0xbb;
    bytes[20] = 0xcc;
    let p = Packet::new(&bytes);
    assert_eq!(p.payload()[0], 0);
    assert_eq!(p.payload()[15], 15);
}

#[test]
fn at_requires_full_packet() {
    let bytes = [0u8; 50];
    assert!(Packet::at(&bytes, 0).is_ok());
    assert!(Packet::at(&bytes, 24).is_ok());
    assert!(Packet::at(&bytes, 27).is_err());
    assert!(Packet::at(&bytes, usize::MAX).is_err());
}

#[test]
fn packets_drop_partial_tail() {
    let bytes = vec![0u8; PACKET_SIZE * 3 + 7];
    assert_eq!(packets(&bytes).count(), 3);
    assert_eq!(trailing_bytes(bytes.len()), 7);
    assert_eq!(packets(&[]).count(), 0);
}

#[test]
fn hex_renders_all_bytes() {
    let bytes = raw(CDG_COMMAND, 0x1e);
    let hex = Packet::new(&bytes).hex();
    assert_eq!(hex.len(), 48);
    assert!(hex.starts_with("091e0000000102"));
}
