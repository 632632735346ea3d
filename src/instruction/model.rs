use std::fmt;

use crate::{
    decode::packet::Payload,
    foundation::core::{TILE_HEIGHT, TILE_WIDTH},
};

/// Instruction codes understood by the standard dispatch table.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize)]
#[repr(u8)]
pub enum Opcode {
    Noop = 0,
    MemoryPreset = 1,
    BorderPreset = 2,
    TileBlock = 6,
    ScrollPreset = 20,
    ScrollCopy = 24,
    SetKeyColor = 28,
    LoadClutLow = 30,
    LoadClutHigh = 31,
    TileBlockXor = 38,
}

impl Opcode {
    pub const ALL: [Opcode; 10] = [
        Opcode::Noop,
        Opcode::MemoryPreset,
        Opcode::BorderPreset,
        Opcode::TileBlock,
        Opcode::ScrollPreset,
        Opcode::ScrollCopy,
        Opcode::SetKeyColor,
        Opcode::LoadClutLow,
        Opcode::LoadClutHigh,
        Opcode::TileBlockXor,
    ];

    pub fn code(self) -> u8 {
        self as u8
    }

    pub fn from_code(code: u8) -> Option<Self> {
        Self::ALL.into_iter().find(|op| op.code() == code)
    }

    pub fn name(self) -> &'static str {
        match self {
            Opcode::Noop => "No-op",
            Opcode::MemoryPreset => "Memory Preset",
            Opcode::BorderPreset => "Border Preset",
            Opcode::TileBlock => "Tile Block",
            Opcode::ScrollPreset => "Scroll Preset",
            Opcode::ScrollCopy => "Scroll Copy",
            Opcode::SetKeyColor => "Set Key Color",
            Opcode::LoadClutLow => "Load CLUT (Low)",
            Opcode::LoadClutHigh => "Load CLUT (High)",
            Opcode::TileBlockXor => "Tile Block (XOR)",
        }
    }
}

/// Which payload field supplies the vertical scroll command.
///
/// Older players read the vertical command out of the horizontal field; content
/// authored against them only scrolls correctly with `HorizontalField`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VerticalScrollSource {
    #[default]
    VerticalField,
    HorizontalField,
}

/// Fill the raster with one color.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
pub struct MemoryPreset {
    pub color: u8,
    /// Repeat counter; repeated presets are parity redundancy and carry no extra meaning.
    pub repeat: u8,
}

impl MemoryPreset {
    pub fn decode(data: &Payload) -> Self {
        Self {
            color: data[0] & 0x0f,
            repeat: data[1] & 0x0f,
        }
    }
}

/// Color the one-tile border.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
pub struct BorderPreset {
    pub color: u8,
}

impl BorderPreset {
    pub fn decode(data: &Payload) -> Self {
        Self {
            color: data[0] & 0x0f,
        }
    }
}

/// Two-color 6x12 glyph placed on the tile grid.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
pub struct TileBlock {
    /// `colors[0]` for clear bits, `colors[1]` for set bits.
    pub colors: [u8; 2],
    pub row: u8,
    pub column: u8,
    /// One byte per pixel row; the low 6 bits are the row, MSB first.
    pub bitmap: [u8; TILE_HEIGHT],
}

impl TileBlock {
    pub fn decode(data: &Payload) -> Self {
        let mut bitmap = [0u8; TILE_HEIGHT];
        bitmap.copy_from_slice(&data[4..4 + TILE_HEIGHT]);
        Self {
            colors: [data[0] & 0x0f, data[1] & 0x0f],
            row: data[2] & 0x1f,
            column: data[3] & 0x3f,
            bitmap,
        }
    }

    /// Top-left pixel of the target tile.
    pub fn origin(&self) -> (usize, usize) {
        (
            usize::from(self.column) * TILE_WIDTH,
            usize::from(self.row) * TILE_HEIGHT,
        )
    }

    /// Color index for pixel `(j, i)` within the tile.
    pub fn color_at(&self, j: usize, i: usize) -> u8 {
        let bit = (self.bitmap[i] >> (TILE_WIDTH - 1 - j)) & 0x01;
        self.colors[usize::from(bit)]
    }
}

/// Whole-tile horizontal scroll request, named by the direction content moves.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum HScroll {
    None,
    Right,
    Left,
}

impl HScroll {
    fn from_bits(cmd: u8) -> Self {
        match cmd {
            1 => HScroll::Right,
            2 => HScroll::Left,
            _ => HScroll::None,
        }
    }

    /// Pixel shift applied to content.
    pub fn delta(self) -> isize {
        match self {
            HScroll::None => 0,
            HScroll::Right => TILE_WIDTH as isize,
            HScroll::Left => -(TILE_WIDTH as isize),
        }
    }
}

/// Whole-tile vertical scroll request, named by the direction content moves.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum VScroll {
    None,
    Down,
    Up,
}

impl VScroll {
    fn from_bits(cmd: u8) -> Self {
        match cmd {
            1 => VScroll::Down,
            2 => VScroll::Up,
            _ => VScroll::None,
        }
    }

    pub fn delta(self) -> isize {
        match self {
            VScroll::None => 0,
            VScroll::Down => TILE_HEIGHT as isize,
            VScroll::Up => -(TILE_HEIGHT as isize),
        }
    }
}

/// Shared fields of Scroll Preset and Scroll Copy.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
pub struct Scroll {
    pub color: u8,
    pub h_scroll: HScroll,
    /// Fine offset, clamped to `0..=5`.
    pub h_offset: u8,
    pub v_scroll: VScroll,
    /// Fine offset, clamped to `0..=11`.
    pub v_offset: u8,
}

impl Scroll {
    pub fn decode(data: &Payload, vertical: VerticalScrollSource) -> Self {
        let h = data[1] & 0x3f;
        let v = data[2] & 0x3f;
        let h_cmd = (h & 0x30) >> 4;
        let v_cmd = match vertical {
            VerticalScrollSource::VerticalField => (v & 0x30) >> 4,
            VerticalScrollSource::HorizontalField => h_cmd,
        };

        Self {
            color: data[0] & 0x0f,
            h_scroll: HScroll::from_bits(h_cmd),
            h_offset: (h & 0x07).min(TILE_WIDTH as u8 - 1),
            v_scroll: VScroll::from_bits(v_cmd),
            v_offset: (v & 0x0f).min(TILE_HEIGHT as u8 - 1),
        }
    }

    /// Whole-raster shift `(dx, dy)` requested by the commands.
    pub fn shift(&self) -> (isize, isize) {
        (self.h_scroll.delta(), self.v_scroll.delta())
    }
}

/// Make one palette index transparent.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
pub struct SetKeyColor {
    pub color: u8,
}

impl SetKeyColor {
    pub fn decode(data: &Payload) -> Self {
        Self {
            color: data[0] & 0x0f,
        }
    }
}

/// Eight palette entries as 4-bit `[r, g, b]` triples.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
pub struct LoadClut {
    pub colors: [[u8; 3]; 8],
}

impl LoadClut {
    pub fn decode(data: &Payload) -> Self {
        let mut colors = [[0u8; 3]; 8];
        for (i, color) in colors.iter_mut().enumerate() {
            let hi = u16::from(data[2 * i] & 0x3f);
            let lo = u16::from(data[2 * i + 1] & 0x3f);
            let value = (hi << 6) | lo;
            *color = [
                (value >> 8) as u8,
                ((value & 0xf0) >> 4) as u8,
                (value & 0x0f) as u8,
            ];
        }
        Self { colors }
    }
}

/// One decoded packet. Every packet of a stream decodes to exactly one of
/// these, so stream position equals timeline position.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Instruction {
    Noop,
    MemoryPreset(MemoryPreset),
    BorderPreset(BorderPreset),
    TileBlock(TileBlock),
    TileBlockXor(TileBlock),
    ScrollPreset(Scroll),
    ScrollCopy(Scroll),
    SetKeyColor(SetKeyColor),
    LoadClutLow(LoadClut),
    LoadClutHigh(LoadClut),
}

impl Instruction {
    pub fn opcode(&self) -> Opcode {
        match self {
            Instruction::Noop => Opcode::Noop,
            Instruction::MemoryPreset(_) => Opcode::MemoryPreset,
            Instruction::BorderPreset(_) => Opcode::BorderPreset,
            Instruction::TileBlock(_) => Opcode::TileBlock,
            Instruction::TileBlockXor(_) => Opcode::TileBlockXor,
            Instruction::ScrollPreset(_) => Opcode::ScrollPreset,
            Instruction::ScrollCopy(_) => Opcode::ScrollCopy,
            Instruction::SetKeyColor(_) => Opcode::SetKeyColor,
            Instruction::LoadClutLow(_) => Opcode::LoadClutLow,
            Instruction::LoadClutHigh(_) => Opcode::LoadClutHigh,
        }
    }

    pub fn name(&self) -> &'static str {
        self.opcode().name()
    }
}

impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())?;
        match self {
            Instruction::Noop => Ok(()),
            Instruction::MemoryPreset(MemoryPreset { color, .. })
            | Instruction::BorderPreset(BorderPreset { color })
            | Instruction::SetKeyColor(SetKeyColor { color }) => {
                write!(f, " color index: {color}")
            }
            Instruction::TileBlock(t) | Instruction::TileBlockXor(t) => write!(
                f,
                " row: {}, column: {}, color indexes: [{}, {}]",
                t.row, t.column, t.colors[0], t.colors[1]
            ),
            Instruction::ScrollPreset(s) | Instruction::ScrollCopy(s) => {
                match s.v_scroll {
                    VScroll::Up => f.write_str(" up")?,
                    VScroll::Down => f.write_str(" down")?,
                    VScroll::None => {}
                }
                match s.h_scroll {
                    HScroll::Left => f.write_str(" left")?,
                    HScroll::Right => f.write_str(" right")?,
                    HScroll::None => {}
                }
                write!(f, " vOffset: {} hOffset: {}", s.v_offset, s.h_offset)
            }
            Instruction::LoadClutLow(c) | Instruction::LoadClutHigh(c) => {
                let base = if matches!(self, Instruction::LoadClutHigh(_)) {
                    8
                } else {
                    0
                };
                f.write_str(" colors: [")?;
                for (i, [r, g, b]) in c.colors.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{}: #{r:x}{g:x}{b:x}", base + i)?;
                }
                f.write_str("]")
            }
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/instruction/model.rs"]
mod tests;
