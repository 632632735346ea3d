use std::fmt::Write as _;

use crate::foundation::error::{CdgError, CdgResult};

/// Bytes per subchannel packet.
pub const PACKET_SIZE: usize = 24;
/// Mask applied to the command and instruction bytes.
pub const COMMAND_MASK: u8 = 0x3f;
/// Command value marking a CD+G packet.
pub const CDG_COMMAND: u8 = 0x09;
/// Offset of the payload within a packet.
pub const DATA_OFFSET: usize = 4;
/// Payload length.
pub const DATA_LEN: usize = 16;

/// The 16 payload bytes of a packet.
pub type Payload = [u8; DATA_LEN];

/// Borrowed view of one 24-byte packet.
///
/// Byte 0 is the command, byte 1 the instruction, bytes 4..20 the payload;
/// the parity bytes 2..4 and 20..24 are carried but never read.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Packet<'a>(&'a [u8; PACKET_SIZE]);

impl<'a> Packet<'a> {
    pub fn new(bytes: &'a [u8; PACKET_SIZE]) -> Self {
        Self(bytes)
    }

    /// View the packet starting at `offset`; fails if fewer than 24 bytes remain.
    pub fn at(bytes: &'a [u8], offset: usize) -> CdgResult<Self> {
        offset
            .checked_add(PACKET_SIZE)
            .and_then(|end| bytes.get(offset..end))
            .and_then(|s| <&[u8; PACKET_SIZE]>::try_from(s).ok())
            .map(Self)
            .ok_or_else(|| {
                CdgError::validation(format!(
                    "no full packet at offset {offset} (stream is {} bytes)",
                    bytes.len()
                ))
            })
    }

    pub fn bytes(self) -> &'a [u8; PACKET_SIZE] {
        self.0
    }

    pub fn command(self) -> u8 {
        self.0[0] & COMMAND_MASK
    }

    pub fn is_cdg(self) -> bool {
        self.command() == CDG_COMMAND
    }

    pub fn opcode(self) -> u8 {
        self.0[1] & COMMAND_MASK
    }

    pub fn payload(self) -> &'a Payload {
        let [_, _, _, _, payload @ .., _, _, _, _] = self.0;
        payload
    }

    /// Lowercase hex of all 24 bytes.
    pub fn hex(self) -> String {
        let mut out = String::with_capacity(PACKET_SIZE * 2);
        for b in self.0 {
            let _ = write!(out, "{b:02x}");
        }
        out
    }
}

/// Iterate the full packets of `bytes`; a trailing partial packet is skipped.
pub fn packets(bytes: &[u8]) -> impl Iterator<Item = Packet<'_>> {
    bytes
        .chunks_exact(PACKET_SIZE)
        .filter_map(|c| <&[u8; PACKET_SIZE]>::try_from(c).ok())
        .map(Packet)
}

/// Bytes beyond the last full packet.
pub fn trailing_bytes(len: usize) -> usize {
    len % PACKET_SIZE
}

#[cfg(test)]
#[path = "../../tests/unit/decode/packet.rs"]
mod tests;
