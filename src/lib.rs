//! CD+Graphics (CDG) decoding and playback.
//!
//! A CDG stream is a flat sequence of 24-byte subcode packets delivered at 300
//! packets per second alongside CD audio. This crate turns those bytes into a
//! 300x216 RGBA picture synchronized to an audio clock.
//!
//! # Pipeline overview
//!
//! 1. **Decode**: `&[u8] -> Vec<Instruction>` through an [`OpcodeTable`] (one
//!    instruction per packet; unknown or non-graphics packets become no-ops)
//! 2. **Execute**: [`Instruction::apply`] mutates a [`RasterContext`] (indexed
//!    pixels, 16-entry palette, scroll offsets, color references)
//! 3. **Compose**: [`RasterContext::compose_frame`] maps the indexed raster
//!    through the palette into a [`FrameRGBA`], with the key color transparent
//! 4. **Schedule**: [`PlaybackClock`] converts elapsed or externally reported
//!    time into a packet index and steps the stream forward
//!
//! Malformed input never fails: anything unusual is reported to a
//! [`DiagnosticSink`] and playback carries on.
#![forbid(unsafe_code)]

mod decode;
mod foundation;
mod instruction;
mod playback;
mod raster;
mod settings;

pub use decode::decoder::Decoder;
pub use decode::packet::{
    CDG_COMMAND, COMMAND_MASK, DATA_LEN, DATA_OFFSET, PACKET_SIZE, Packet, Payload, packets,
    trailing_bytes,
};
pub use decode::table::{Constructor, OpcodeTable};
pub use foundation::core::{
    BORDER_HEIGHT, BORDER_WIDTH, DISPLAY_PIXELS, HEIGHT, Interior, PALETTE_LEN, PacketRate, Rgb8,
    TILE_HEIGHT, TILE_WIDTH, TILES_X, TILES_Y, WIDTH,
};
pub use foundation::diagnostics::{
    CollectingSink, Diagnostic, DiagnosticSink, NullSink, TracingSink,
};
pub use foundation::error::{CdgError, CdgResult};
pub use instruction::exec::TileOp;
pub use instruction::model::{
    BorderPreset, HScroll, Instruction, LoadClut, MemoryPreset, Opcode, Scroll, SetKeyColor,
    TileBlock, VScroll, VerticalScrollSource,
};
pub use playback::clock::{InstructionStream, PlaybackClock, PlaybackState};
pub use playback::sink::{DiscardFrames, FrameSink};
pub use playback::time::{ManualTime, MonotonicTime, TimeSource};
pub use raster::context::{RasterContext, ScrollFill};
pub use raster::frame::FrameRGBA;
pub use settings::PlayerSettings;
