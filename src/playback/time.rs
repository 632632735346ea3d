use std::{cell::Cell, rc::Rc, time::Instant};

/// Wall-clock capability supplied by the host, in milliseconds.
///
/// The clock never reads platform time on its own; everything goes through
/// the source it was built with.
pub trait TimeSource {
    fn now_ms(&self) -> f64;
}

/// Host-stepped time. Clones share the same reading, so a host can keep one
/// handle and give another to the clock.
#[derive(Clone, Debug, Default)]
pub struct ManualTime {
    now: Rc<Cell<f64>>,
}

impl ManualTime {
    pub fn new(start_ms: f64) -> Self {
        Self {
            now: Rc::new(Cell::new(start_ms)),
        }
    }

    pub fn set(&self, ms: f64) {
        self.now.set(ms);
    }

    pub fn advance(&self, ms: f64) -> f64 {
        let next = self.now.get() + ms;
        self.now.set(next);
        next
    }
}

impl TimeSource for ManualTime {
    fn now_ms(&self) -> f64 {
        self.now.get()
    }
}

/// Milliseconds since construction, from [`Instant`].
#[derive(Clone, Copy, Debug)]
pub struct MonotonicTime {
    origin: Instant,
}

impl MonotonicTime {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for MonotonicTime {
    fn default() -> Self {
        Self::new()
    }
}

impl TimeSource for MonotonicTime {
    fn now_ms(&self) -> f64 {
        self.origin.elapsed().as_secs_f64() * 1000.0
    }
}

#[cfg(test)]
#[path = "../../tests/unit/playback/time.rs"]
mod tests;
