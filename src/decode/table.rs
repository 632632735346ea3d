use crate::{
    decode::packet::{COMMAND_MASK, Payload},
    foundation::error::{CdgError, CdgResult},
    instruction::model::{
        BorderPreset, Instruction, LoadClut, MemoryPreset, Opcode, Scroll, SetKeyColor, TileBlock,
        VerticalScrollSource,
    },
    settings::PlayerSettings,
};

/// Builds an instruction from a packet payload.
pub type Constructor = fn(&Payload) -> Instruction;

const TABLE_LEN: usize = COMMAND_MASK as usize + 1;

/// Opcode -> constructor dispatch, fixed once handed to a [`crate::Decoder`].
#[derive(Clone)]
pub struct OpcodeTable {
    entries: [Option<Constructor>; TABLE_LEN],
}

impl std::fmt::Debug for OpcodeTable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_set().entries(self.opcodes()).finish()
    }
}

impl Default for OpcodeTable {
    fn default() -> Self {
        Self::standard()
    }
}

impl OpcodeTable {
    pub fn empty() -> Self {
        Self {
            entries: [None; TABLE_LEN],
        }
    }

    /// All ten CD+G instructions, vertical scroll read from the vertical field.
    pub fn standard() -> Self {
        let mut t = Self::empty();
        for op in Opcode::ALL {
            t.entries[usize::from(op.code())] = Some(standard_constructor(op));
        }
        t
    }

    pub fn from_settings(settings: &PlayerSettings) -> Self {
        Self::standard().with_vertical_scroll(settings.vertical_scroll)
    }

    /// Register `constructor` for `opcode`, replacing any existing entry.
    pub fn with(mut self, opcode: u8, constructor: Constructor) -> CdgResult<Self> {
        let slot = self.entries.get_mut(usize::from(opcode)).ok_or_else(|| {
            CdgError::validation(format!("opcode {opcode} does not fit in 6 bits"))
        })?;
        *slot = Some(constructor);
        Ok(self)
    }

    /// Drop `opcode`; packets carrying it will decode as unknown.
    pub fn without(mut self, opcode: u8) -> Self {
        if let Some(slot) = self.entries.get_mut(usize::from(opcode)) {
            *slot = None;
        }
        self
    }

    /// Swap the scroll constructors for the given vertical command source.
    pub fn with_vertical_scroll(mut self, source: VerticalScrollSource) -> Self {
        let (preset, copy): (Constructor, Constructor) = match source {
            VerticalScrollSource::VerticalField => (scroll_preset, scroll_copy),
            VerticalScrollSource::HorizontalField => (scroll_preset_legacy, scroll_copy_legacy),
        };
        self.entries[usize::from(Opcode::ScrollPreset.code())] = Some(preset);
        self.entries[usize::from(Opcode::ScrollCopy.code())] = Some(copy);
        self
    }

    pub fn get(&self, opcode: u8) -> Option<Constructor> {
        self.entries.get(usize::from(opcode)).copied().flatten()
    }

    pub fn contains(&self, opcode: u8) -> bool {
        self.get(opcode).is_some()
    }

    /// Registered opcodes in ascending order.
    pub fn opcodes(&self) -> impl Iterator<Item = u8> + '_ {
        self.entries
            .iter()
            .enumerate()
            .filter(|(_, e)| e.is_some())
            .map(|(i, _)| i as u8)
    }
}

fn standard_constructor(op: Opcode) -> Constructor {
    match op {
        Opcode::Noop => |_: &Payload| Instruction::Noop,
        Opcode::MemoryPreset => |d: &Payload| Instruction::MemoryPreset(MemoryPreset::decode(d)),
        Opcode::BorderPreset => |d: &Payload| Instruction::BorderPreset(BorderPreset::decode(d)),
        Opcode::TileBlock => |d: &Payload| Instruction::TileBlock(TileBlock::decode(d)),
        Opcode::TileBlockXor => |d: &Payload| Instruction::TileBlockXor(TileBlock::decode(d)),
        Opcode::ScrollPreset => scroll_preset,
        Opcode::ScrollCopy => scroll_copy,
        Opcode::SetKeyColor => |d: &Payload| Instruction::SetKeyColor(SetKeyColor::decode(d)),
        Opcode::LoadClutLow => |d: &Payload| Instruction::LoadClutLow(LoadClut::decode(d)),
        Opcode::LoadClutHigh => |d: &Payload| Instruction::LoadClutHigh(LoadClut::decode(d)),
    }
}

fn scroll_preset(d: &Payload) -> Instruction {
    Instruction::ScrollPreset(Scroll::decode(d, VerticalScrollSource::VerticalField))
}

fn scroll_copy(d: &Payload) -> Instruction {
    Instruction::ScrollCopy(Scroll::decode(d, VerticalScrollSource::VerticalField))
}

fn scroll_preset_legacy(d: &Payload) -> Instruction {
    Instruction::ScrollPreset(Scroll::decode(d, VerticalScrollSource::HorizontalField))
}

fn scroll_copy_legacy(d: &Payload) -> Instruction {
    Instruction::ScrollCopy(Scroll::decode(d, VerticalScrollSource::HorizontalField))
}

#[cfg(test)]
#[path = "../../tests/unit/decode/table.rs"]
mod tests;
