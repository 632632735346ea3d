/// Width of a tile in pixels.
pub const TILE_WIDTH: usize = 6;
/// Height of a tile in pixels.
pub const TILE_HEIGHT: usize = 12;
/// Tiles across the full raster.
pub const TILES_X: usize = 50;
/// Tiles down the full raster.
pub const TILES_Y: usize = 18;

/// Raster width in pixels (300).
pub const WIDTH: usize = TILE_WIDTH * TILES_X;
/// Raster height in pixels (216).
pub const HEIGHT: usize = TILE_HEIGHT * TILES_Y;
/// Number of cells in the raster.
pub const DISPLAY_PIXELS: usize = WIDTH * HEIGHT;

/// Border thickness: one tile on every side.
pub const BORDER_WIDTH: usize = TILE_WIDTH;
/// Border thickness: one tile on every side.
pub const BORDER_HEIGHT: usize = TILE_HEIGHT;

/// Number of palette entries.
pub const PALETTE_LEN: usize = 16;

/// Interior (non-border) region of the raster.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Interior {
    /// First interior column.
    pub left: usize,
    /// First interior row.
    pub top: usize,
    /// One past the last interior column.
    pub right: usize,
    /// One past the last interior row.
    pub bottom: usize,
}

impl Interior {
    /// The 288x192 area inside the one-tile border.
    pub const DISPLAY: Self = Self {
        left: BORDER_WIDTH,
        top: BORDER_HEIGHT,
        right: WIDTH - BORDER_WIDTH,
        bottom: HEIGHT - BORDER_HEIGHT,
    };

    /// Whether `(x, y)` lies inside the region.
    pub fn contains(self, x: usize, y: usize) -> bool {
        self.left <= x && x < self.right && self.top <= y && y < self.bottom
    }
}

/// An expanded palette color (each component `0..=255`).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct Rgb8 {
    /// Red.
    pub r: u8,
    /// Green.
    pub g: u8,
    /// Blue.
    pub b: u8,
}

impl Rgb8 {
    /// Palette entry before any CLUT load.
    pub const BLACK: Self = Self { r: 0, g: 0, b: 0 };

    /// Expand 4-bit components to 8-bit by multiplying with 17 (0xF -> 0xFF).
    ///
    /// Inputs are expected to be pre-masked to 4 bits.
    pub fn from_nibbles(r: u8, g: u8, b: u8) -> Self {
        Self {
            r: r * 17,
            g: g * 17,
            b: b * 17,
        }
    }
}

/// Fixed CD subchannel cadence that maps wall time onto packet positions.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct PacketRate {
    /// CD sectors played per second.
    pub sectors_per_second: u32,
    /// Subcode packets carried by one sector.
    pub packets_per_sector: u32,
}

impl PacketRate {
    /// 75 sectors/s x 4 packets/sector = 300 packets/s.
    pub const CD: Self = Self {
        sectors_per_second: 75,
        packets_per_sector: 4,
    };

    pub fn packets_per_second(self) -> u32 {
        self.sectors_per_second * self.packets_per_sector
    }

    /// Packet index reached after `ms` milliseconds, `floor(pps * ms / 1000)`.
    ///
    /// Negative positions clamp to packet 0.
    pub fn packets_at_ms(self, ms: f64) -> u64 {
        (f64::from(self.packets_per_second()) * ms / 1000.0)
            .floor()
            .max(0.0) as u64
    }

    pub fn packets_to_ms(self, packets: u64) -> f64 {
        (packets as f64) * 1000.0 / f64::from(self.packets_per_second())
    }
}

impl Default for PacketRate {
    fn default() -> Self {
        Self::CD
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
