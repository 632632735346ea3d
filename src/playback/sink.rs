use std::ops::ControlFlow;

use crate::raster::frame::FrameRGBA;

/// Frame-ready hook, called after every tick that advanced playback.
///
/// Returning [`ControlFlow::Break`] stops the clock before any further tick
/// runs; this is how a hook stops playback from inside a tick.
pub trait FrameSink {
    fn frame_ready(&mut self, frame: &FrameRGBA) -> ControlFlow<()>;
}

impl<F: FnMut(&FrameRGBA) -> ControlFlow<()>> FrameSink for F {
    fn frame_ready(&mut self, frame: &FrameRGBA) -> ControlFlow<()> {
        self(frame)
    }
}

/// Drops every frame.
#[derive(Clone, Copy, Debug, Default)]
pub struct DiscardFrames;

impl FrameSink for DiscardFrames {
    fn frame_ready(&mut self, _frame: &FrameRGBA) -> ControlFlow<()> {
        ControlFlow::Continue(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/playback/sink.rs"]
mod tests;
