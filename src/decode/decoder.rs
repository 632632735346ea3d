use crate::{
    decode::{
        packet::{PACKET_SIZE, Packet, packets, trailing_bytes},
        table::OpcodeTable,
    },
    foundation::diagnostics::{Diagnostic, DiagnosticSink},
    instruction::model::Instruction,
};

/// Turns CD+G bytes into instructions, one per 24-byte packet.
///
/// Decoding never fails: non-CD+G packets and opcodes missing from the table
/// become [`Instruction::Noop`] so the result stays aligned with the timeline.
#[derive(Clone, Debug, Default)]
pub struct Decoder {
    table: OpcodeTable,
}

impl Decoder {
    pub fn new(table: OpcodeTable) -> Self {
        Self { table }
    }

    pub fn table(&self) -> &OpcodeTable {
        &self.table
    }

    /// Decode every full packet; the result has `bytes.len() / 24` entries.
    #[tracing::instrument(skip_all, fields(len = bytes.len()))]
    pub fn decode_stream(&self, bytes: &[u8], diag: &mut dyn DiagnosticSink) -> Vec<Instruction> {
        let mut out = Vec::with_capacity(bytes.len() / PACKET_SIZE);
        for (index, packet) in packets(bytes).enumerate() {
            out.push(self.decode(packet, Some(index), diag));
        }

        let trailing = trailing_bytes(bytes.len());
        if trailing > 0 {
            diag.report(Diagnostic::TruncatedStream {
                trailing_bytes: trailing,
            });
        }
        out
    }

    /// Decode the packet starting at `offset`.
    ///
    /// A short read yields a no-op plus a truncation diagnostic. Diagnostics
    /// carry a packet index only when `offset` is packet-aligned.
    pub fn decode_packet(
        &self,
        bytes: &[u8],
        offset: usize,
        diag: &mut dyn DiagnosticSink,
    ) -> Instruction {
        match Packet::at(bytes, offset) {
            Ok(packet) => {
                let index = (offset % PACKET_SIZE == 0).then_some(offset / PACKET_SIZE);
                self.decode(packet, index, diag)
            }
            Err(_) => {
                diag.report(Diagnostic::TruncatedStream {
                    trailing_bytes: bytes.len().saturating_sub(offset),
                });
                Instruction::Noop
            }
        }
    }

    pub fn decode(
        &self,
        packet: Packet<'_>,
        index: Option<usize>,
        diag: &mut dyn DiagnosticSink,
    ) -> Instruction {
        if !packet.is_cdg() {
            return Instruction::Noop;
        }

        let opcode = packet.opcode();
        match self.table.get(opcode) {
            Some(construct) => construct(packet.payload()),
            None => {
                diag.report(Diagnostic::UnknownOpcode {
                    packet: index,
                    opcode,
                });
                Instruction::Noop
            }
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/decode/decoder.rs"]
mod tests;
