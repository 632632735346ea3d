use crate::foundation::core::{DISPLAY_PIXELS, HEIGHT, PALETTE_LEN, Rgb8, WIDTH};

/// How pixels uncovered by a whole-tile scroll are filled.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ScrollFill {
    /// Uncovered cells take this palette index.
    Color(u8),
    /// Uncovered cells wrap around from the opposite edge.
    Wrap,
}

/// Raster state mutated by instructions: palette, indexed pixels, scroll
/// offsets and the four color references.
///
/// Primitives index directly; out-of-range coordinates or palette indices are
/// contract violations and panic.
#[derive(Clone, Debug)]
pub struct RasterContext {
    palette: [Rgb8; PALETTE_LEN],
    pixels: Box<[u8]>,
    // second buffer for whole-raster scrolls, swapped with `pixels`
    scratch: Box<[u8]>,
    h_offset: u8,
    v_offset: u8,
    key_color: Option<u8>,
    background_color: Option<u8>,
    border_color: Option<u8>,
    memory_color: Option<u8>,
}

impl Default for RasterContext {
    fn default() -> Self {
        Self::new()
    }
}

impl RasterContext {
    /// Black palette, all pixels 0, no color references set.
    pub fn new() -> Self {
        Self {
            palette: [Rgb8::BLACK; PALETTE_LEN],
            pixels: vec![0; DISPLAY_PIXELS].into_boxed_slice(),
            scratch: vec![0; DISPLAY_PIXELS].into_boxed_slice(),
            h_offset: 0,
            v_offset: 0,
            key_color: None,
            background_color: None,
            border_color: None,
            memory_color: None,
        }
    }

    /// Zero offsets, clear all color references and fill the raster with 0.
    ///
    /// The palette is left as is.
    pub fn reset(&mut self) {
        self.h_offset = 0;
        self.v_offset = 0;
        self.key_color = None;
        self.background_color = None;
        self.border_color = None;
        self.memory_color = None;
        self.pixels.fill(0);
    }

    /// Store the 4-bit components `r`, `g`, `b` expanded to 8 bits at `index`.
    pub fn set_palette_entry(&mut self, index: usize, r: u8, g: u8, b: u8) {
        assert!(
            r < 16 && g < 16 && b < 16,
            "palette components ({r}, {g}, {b}) exceed 4 bits"
        );
        self.palette[index] = Rgb8::from_nibbles(r, g, b);
    }

    pub fn palette(&self) -> &[Rgb8; PALETTE_LEN] {
        &self.palette
    }

    pub fn set_pixel(&mut self, x: usize, y: usize, color_index: u8) {
        assert!(x < WIDTH && y < HEIGHT, "pixel ({x}, {y}) out of raster");
        assert_color_index(color_index);
        self.pixels[x + y * WIDTH] = color_index;
    }

    pub fn get_pixel(&self, x: usize, y: usize) -> u8 {
        assert!(x < WIDTH && y < HEIGHT, "pixel ({x}, {y}) out of raster");
        self.pixels[x + y * WIDTH]
    }

    /// Row-major indexed pixels, `WIDTH * HEIGHT` cells.
    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    pub fn fill(&mut self, color_index: u8) {
        assert_color_index(color_index);
        self.pixels.fill(color_index);
    }

    pub fn h_offset(&self) -> u8 {
        self.h_offset
    }

    pub fn v_offset(&self) -> u8 {
        self.v_offset
    }

    /// Store fine scroll offsets; callers clamp to `0..=5` / `0..=11`.
    pub fn set_offsets(&mut self, h_offset: u8, v_offset: u8) {
        self.h_offset = h_offset;
        self.v_offset = v_offset;
    }

    pub fn key_color(&self) -> Option<u8> {
        self.key_color
    }

    pub fn set_key_color(&mut self, color: u8) {
        self.key_color = Some(color);
    }

    pub fn background_color(&self) -> Option<u8> {
        self.background_color
    }

    pub fn set_background_color(&mut self, color: u8) {
        self.background_color = Some(color);
    }

    pub fn border_color(&self) -> Option<u8> {
        self.border_color
    }

    pub fn set_border_color(&mut self, color: u8) {
        self.border_color = Some(color);
    }

    pub fn memory_color(&self) -> Option<u8> {
        self.memory_color
    }

    pub fn set_memory_color(&mut self, color: u8) {
        self.memory_color = Some(color);
    }

    /// Single "background" index: key, then background, memory, border, else 0.
    pub fn background(&self) -> u8 {
        self.key_color
            .or(self.background_color)
            .or(self.memory_color)
            .or(self.border_color)
            .unwrap_or(0)
    }

    /// Shift the whole raster by `(dx, dy)` so that the new pixel at `(x, y)`
    /// is the old pixel at `(x - dx, y - dy)`.
    ///
    /// Cells whose source falls outside the raster are filled per `fill`.
    pub fn shift(&mut self, dx: isize, dy: isize, fill: ScrollFill) {
        if let ScrollFill::Color(c) = fill {
            assert_color_index(c);
        }
        if dx == 0 && dy == 0 {
            return;
        }

        let (w, h) = (WIDTH as isize, HEIGHT as isize);
        for y in 0..h {
            for x in 0..w {
                let (sx, sy) = (x - dx, y - dy);
                let value = match fill {
                    ScrollFill::Wrap => {
                        let (sx, sy) = (sx.rem_euclid(w), sy.rem_euclid(h));
                        self.pixels[(sx + sy * w) as usize]
                    }
                    ScrollFill::Color(c) => {
                        if (0..w).contains(&sx) && (0..h).contains(&sy) {
                            self.pixels[(sx + sy * w) as usize]
                        } else {
                            c
                        }
                    }
                };
                self.scratch[(x + y * w) as usize] = value;
            }
        }

        std::mem::swap(&mut self.pixels, &mut self.scratch);
    }
}

fn assert_color_index(color_index: u8) {
    assert!(
        usize::from(color_index) < PALETTE_LEN,
        "color index {color_index} out of palette"
    );
}

#[cfg(test)]
#[path = "../../tests/unit/raster/context.rs"]
mod tests;
