//! Recoverable stream conditions and the sinks that receive them.
//!
//! Nothing in the decoder or the playback clock fails; anything unusual in the
//! packet stream is described by a [`Diagnostic`] and handed to whatever
//! [`DiagnosticSink`] the host injected. Whether a sink is present never
//! changes what gets decoded or drawn.

use std::fmt;

/// A recoverable condition found while decoding or executing a stream.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Diagnostic {
    /// Opcode absent from the dispatch table; the packet became a no-op.
    UnknownOpcode {
        /// Stream index of the packet, if known.
        packet: Option<usize>,
        opcode: u8,
    },
    /// Tile block aimed outside the raster; the whole instruction was skipped.
    OutOfBoundsDraw { row: u8, column: u8 },
    /// Bytes left over after the last full packet; they were dropped.
    TruncatedStream { trailing_bytes: usize },
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownOpcode {
                packet: Some(packet),
                opcode,
            } => write!(f, "unknown CDG instruction {opcode} at packet {packet}"),
            Self::UnknownOpcode {
                packet: None,
                opcode,
            } => write!(f, "unknown CDG instruction {opcode}"),
            Self::OutOfBoundsDraw { row, column } => {
                write!(f, "tile block out of bounds (row {row}, column {column})")
            }
            Self::TruncatedStream { trailing_bytes } => {
                write!(f, "dropped {trailing_bytes} trailing bytes of partial packet")
            }
        }
    }
}

/// Receives diagnostics from the decoder and instruction execution.
pub trait DiagnosticSink {
    fn report(&mut self, diagnostic: Diagnostic);
}

impl<F: FnMut(Diagnostic)> DiagnosticSink for F {
    fn report(&mut self, diagnostic: Diagnostic) {
        self(diagnostic)
    }
}

/// Default sink: forwards to `tracing`.
///
/// Truncation is logged at debug level only, so a short tail is silent at the
/// usual verbosity.
#[derive(Clone, Copy, Debug, Default)]
pub struct TracingSink;

impl DiagnosticSink for TracingSink {
    fn report(&mut self, diagnostic: Diagnostic) {
        match diagnostic {
            Diagnostic::TruncatedStream { .. } => tracing::debug!("{diagnostic}"),
            _ => tracing::warn!("{diagnostic}"),
        }
    }
}

/// Discards everything.
#[derive(Clone, Copy, Debug, Default)]
pub struct NullSink;

impl DiagnosticSink for NullSink {
    fn report(&mut self, _diagnostic: Diagnostic) {}
}

/// Keeps every diagnostic in arrival order.
#[derive(Clone, Debug, Default)]
pub struct CollectingSink {
    pub diagnostics: Vec<Diagnostic>,
}

impl CollectingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.diagnostics.len()
    }

    pub fn is_empty(&self) -> bool {
        self.diagnostics.is_empty()
    }

    pub fn take(&mut self) -> Vec<Diagnostic> {
        std::mem::take(&mut self.diagnostics)
    }
}

impl DiagnosticSink for CollectingSink {
    fn report(&mut self, diagnostic: Diagnostic) {
        self.diagnostics.push(diagnostic);
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/diagnostics.rs"]
mod tests;
