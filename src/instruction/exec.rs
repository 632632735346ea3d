//! Instruction semantics: one function per opcode, each a pure mutation of a
//! [`RasterContext`].

use crate::{
    foundation::{
        core::{HEIGHT, Interior, TILE_HEIGHT, TILE_WIDTH, WIDTH},
        diagnostics::{Diagnostic, DiagnosticSink},
    },
    instruction::model::{
        BorderPreset, Instruction, LoadClut, MemoryPreset, Scroll, SetKeyColor, TileBlock,
    },
    raster::context::{RasterContext, ScrollFill},
};

impl Instruction {
    /// Apply this instruction to `ctx`. Recoverable problems (tile blocks out of
    /// bounds) go to `diag` and leave the raster untouched.
    pub fn apply(&self, ctx: &mut RasterContext, diag: &mut dyn DiagnosticSink) {
        match self {
            Instruction::Noop => {}
            Instruction::MemoryPreset(p) => memory_preset(ctx, p),
            Instruction::BorderPreset(p) => border_preset(ctx, p),
            Instruction::TileBlock(t) => tile_block(ctx, t, TileOp::Set, diag),
            Instruction::TileBlockXor(t) => tile_block(ctx, t, TileOp::Xor, diag),
            Instruction::ScrollPreset(s) => scroll(ctx, s, ScrollFill::Color(s.color)),
            Instruction::ScrollCopy(s) => scroll(ctx, s, ScrollFill::Wrap),
            Instruction::SetKeyColor(k) => set_key_color(ctx, k),
            Instruction::LoadClutLow(c) => load_clut(ctx, c, 0),
            Instruction::LoadClutHigh(c) => load_clut(ctx, c, 8),
        }
    }
}

pub fn memory_preset(ctx: &mut RasterContext, p: &MemoryPreset) {
    ctx.set_memory_color(p.color);
    ctx.set_background_color(p.color);
    ctx.fill(p.color);
}

pub fn border_preset(ctx: &mut RasterContext, p: &BorderPreset) {
    ctx.set_border_color(p.color);
    ctx.set_background_color(p.color);

    let interior = Interior::DISPLAY;
    for y in 0..HEIGHT {
        if (interior.top..interior.bottom).contains(&y) {
            for x in (0..interior.left).chain(interior.right..WIDTH) {
                ctx.set_pixel(x, y, p.color);
            }
        } else {
            for x in 0..WIDTH {
                ctx.set_pixel(x, y, p.color);
            }
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TileOp {
    Set,
    Xor,
}

pub fn tile_block(
    ctx: &mut RasterContext,
    t: &TileBlock,
    op: TileOp,
    diag: &mut dyn DiagnosticSink,
) {
    let (x, y) = t.origin();
    if x + TILE_WIDTH > WIDTH || y + TILE_HEIGHT > HEIGHT {
        diag.report(Diagnostic::OutOfBoundsDraw {
            row: t.row,
            column: t.column,
        });
        return;
    }

    for i in 0..TILE_HEIGHT {
        for j in 0..TILE_WIDTH {
            let color = t.color_at(j, i);
            let value = match op {
                TileOp::Set => color,
                TileOp::Xor => ctx.get_pixel(x + j, y + i) ^ color,
            };
            ctx.set_pixel(x + j, y + i, value);
        }
    }
}

pub fn scroll(ctx: &mut RasterContext, s: &Scroll, fill: ScrollFill) {
    ctx.set_background_color(s.color);
    ctx.set_offsets(s.h_offset, s.v_offset);
    let (dx, dy) = s.shift();
    ctx.shift(dx, dy, fill);
}

pub fn set_key_color(ctx: &mut RasterContext, k: &SetKeyColor) {
    ctx.set_key_color(k.color);
}

pub fn load_clut(ctx: &mut RasterContext, c: &LoadClut, base: usize) {
    for (i, [r, g, b]) in c.colors.iter().copied().enumerate() {
        ctx.set_palette_entry(base + i, r, g, b);
    }
}

#[cfg(test)]
#[path = "../../tests/unit/instruction/exec.rs"]
mod tests;
