//! Packet-rate playback clock.
//!
//! The clock owns the decoded instruction stream, the raster it mutates and
//! the packet pointer. A host calls [`PlaybackClock::tick`] once per display
//! frame while playing; each tick turns elapsed time into a packet index at
//! 300 packets/s and executes every instruction up to it. An external audio
//! clock can pin the position with [`PlaybackClock::sync`] to correct drift.
//!
//! Everything here is single-threaded and synchronous: the host serializes
//! `tick` and `sync` calls, and the only suspension point is between ticks.

use crate::{
    decode::{decoder::Decoder, table::OpcodeTable},
    foundation::{
        core::PacketRate,
        diagnostics::{DiagnosticSink, TracingSink},
    },
    instruction::model::Instruction,
    playback::{
        sink::{DiscardFrames, FrameSink},
        time::TimeSource,
    },
    raster::context::RasterContext,
    settings::PlayerSettings,
};

/// Lifecycle of a [`PlaybackClock`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PlaybackState {
    /// Nothing loaded yet.
    Idle,
    /// Loaded and positioned, not scheduling ticks.
    Ready,
    /// Ticks advance playback.
    Running,
    /// The pointer ran past the end of the stream; playback stopped itself.
    Finished,
}

/// Decoded instructions in timeline order, one per packet.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct InstructionStream {
    instructions: Vec<Instruction>,
}

impl InstructionStream {
    pub fn new(instructions: Vec<Instruction>) -> Self {
        Self { instructions }
    }

    pub fn len(&self) -> usize {
        self.instructions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.instructions.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Instruction> {
        self.instructions.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Instruction> {
        self.instructions.iter()
    }
}

impl From<Vec<Instruction>> for InstructionStream {
    fn from(instructions: Vec<Instruction>) -> Self {
        Self::new(instructions)
    }
}

/// Position reported by an external clock and the wall time it was received.
#[derive(Clone, Copy, Debug, PartialEq)]
struct SyncAnchor {
    position_ms: f64,
    wall_ms: f64,
}

/// Steps a [`RasterContext`] through an instruction stream in time.
pub struct PlaybackClock {
    decoder: Decoder,
    raster: RasterContext,
    stream: Option<InstructionStream>,
    // None while idle or after running off the end
    pointer: Option<usize>,
    position_ms: f64,
    last_tick_ms: f64,
    anchor: Option<SyncAnchor>,
    running: bool,
    rate: PacketRate,
    sync_offset_ms: f64,
    time: Box<dyn TimeSource>,
    frames: Box<dyn FrameSink>,
    diag: Box<dyn DiagnosticSink>,
}

impl std::fmt::Debug for PlaybackClock {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PlaybackClock")
            .field("state", &self.state())
            .field("pointer", &self.pointer)
            .field("len", &self.len())
            .field("position_ms", &self.position_ms)
            .field("anchor", &self.anchor)
            .finish_non_exhaustive()
    }
}

impl PlaybackClock {
    /// A clock reading wall time from `time`, with the standard opcode table,
    /// tracing diagnostics and no frame hook.
    pub fn new(time: impl TimeSource + 'static) -> Self {
        Self {
            decoder: Decoder::default(),
            raster: RasterContext::new(),
            stream: None,
            pointer: None,
            position_ms: 0.0,
            last_tick_ms: 0.0,
            anchor: None,
            running: false,
            rate: PacketRate::CD,
            sync_offset_ms: 0.0,
            time: Box::new(time),
            frames: Box::new(DiscardFrames),
            diag: Box::new(TracingSink),
        }
    }

    pub fn with_frame_sink(mut self, sink: impl FrameSink + 'static) -> Self {
        self.frames = Box::new(sink);
        self
    }

    pub fn with_diagnostics(mut self, sink: impl DiagnosticSink + 'static) -> Self {
        self.diag = Box::new(sink);
        self
    }

    pub fn with_decoder(mut self, decoder: Decoder) -> Self {
        self.decoder = decoder;
        self
    }

    /// Apply the decoder quirks and sync offset from `settings`.
    pub fn with_settings(mut self, settings: &PlayerSettings) -> Self {
        self.decoder = Decoder::new(OpcodeTable::from_settings(settings));
        self.sync_offset_ms = settings.sync_offset_ms;
        self
    }

    pub fn state(&self) -> PlaybackState {
        match (&self.stream, self.running, self.pointer) {
            (None, _, _) => PlaybackState::Idle,
            (Some(_), true, _) => PlaybackState::Running,
            (Some(_), false, None) => PlaybackState::Finished,
            (Some(_), false, Some(_)) => PlaybackState::Ready,
        }
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Index of the next instruction to execute.
    pub fn pointer(&self) -> Option<usize> {
        self.pointer
    }

    pub fn position_ms(&self) -> f64 {
        self.position_ms
    }

    pub fn len(&self) -> usize {
        self.stream.as_ref().map_or(0, InstructionStream::len)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn stream(&self) -> Option<&InstructionStream> {
        self.stream.as_ref()
    }

    pub fn raster(&self) -> &RasterContext {
        &self.raster
    }

    pub fn rate(&self) -> PacketRate {
        self.rate
    }

    /// Decode `bytes`, replace the stream and rewind to packet 0.
    #[tracing::instrument(skip_all, fields(len = bytes.len()))]
    pub fn load(&mut self, bytes: &[u8]) -> &mut Self {
        let instructions = self.decoder.decode_stream(bytes, self.diag.as_mut());
        tracing::debug!(packets = instructions.len(), "loaded CDG stream");
        self.stream = Some(InstructionStream::new(instructions));
        self.reset()
    }

    /// Rewind to packet 0 and clear the raster without re-decoding.
    pub fn reset(&mut self) -> &mut Self {
        self.pointer = Some(0);
        self.position_ms = 0.0;
        self.anchor = None;
        self.raster.reset();
        self
    }

    /// Execute the instruction under the pointer and advance it. Past the end
    /// the pointer is cleared and playback stops.
    pub fn step(&mut self) -> &mut Self {
        self.advance_one();
        self
    }

    /// Step up to `count` times, stopping early once the stream is exhausted.
    pub fn fast_forward(&mut self, count: usize) -> &mut Self {
        self.advance(count);
        self
    }

    /// Begin accepting ticks. Idempotent; ignored while idle or finished.
    pub fn play(&mut self) -> &mut Self {
        if self.running {
            return self;
        }
        if self.stream.is_none() || self.pointer.is_none() {
            tracing::debug!(state = ?self.state(), "play ignored");
            return self;
        }
        self.running = true;
        self.last_tick_ms = self.time.now_ms();
        tracing::debug!(position_ms = self.position_ms, "playback started");
        self
    }

    /// Stop accepting ticks and drop the sync anchor. Idempotent.
    pub fn stop(&mut self) -> &mut Self {
        if self.running {
            tracing::debug!(pointer = ?self.pointer, "playback stopped");
        }
        self.running = false;
        self.anchor = None;
        self
    }

    /// Pin the playback position to `ms` (minus the configured sync offset)
    /// as of the current wall time.
    pub fn sync(&mut self, ms: f64) -> &mut Self {
        self.anchor = Some(SyncAnchor {
            position_ms: ms - self.sync_offset_ms,
            wall_ms: self.time.now_ms(),
        });
        self
    }

    /// Compose the current raster and hand it to the frame hook.
    pub fn render(&mut self) -> &mut Self {
        let frame = self.raster.compose_frame();
        if self.frames.frame_ready(&frame).is_break() {
            self.stop();
        }
        self
    }

    /// Advance playback to wall time `now_ms`. Returns the number of
    /// instructions executed; a frame is delivered whenever that is non-zero
    /// or the stream ran out.
    ///
    /// Does nothing unless running. Never moves the pointer backwards.
    pub fn tick(&mut self, now_ms: f64) -> usize {
        if !self.running {
            return 0;
        }
        let Some(pointer) = self.pointer else {
            return 0;
        };

        self.position_ms = match self.anchor {
            Some(anchor) => anchor.position_ms + (now_ms - anchor.wall_ms),
            None => self.position_ms + (now_ms - self.last_tick_ms),
        };
        self.last_tick_ms = now_ms;

        let target =
            usize::try_from(self.rate.packets_at_ms(self.position_ms)).unwrap_or(usize::MAX);
        if target <= pointer {
            return 0;
        }

        let executed = self.advance(target - pointer);
        self.render();
        executed
    }

    fn advance(&mut self, count: usize) -> usize {
        let mut executed = 0;
        for _ in 0..count {
            if self.pointer.is_none() {
                break;
            }
            if self.advance_one() {
                executed += 1;
            }
        }
        executed
    }

    fn advance_one(&mut self) -> bool {
        let len = self.len();
        let Some(p) = self.pointer.filter(|&p| p < len) else {
            if self.pointer.is_some() {
                tracing::debug!(len, "end of stream");
            }
            self.pointer = None;
            self.stop();
            return false;
        };

        if let Some(instruction) = self.stream.as_ref().and_then(|s| s.get(p)) {
            instruction.apply(&mut self.raster, self.diag.as_mut());
        }
        self.pointer = Some(p + 1);
        true
    }
}

#[cfg(test)]
#[path = "../../tests/unit/playback/clock.rs"]
mod tests;
