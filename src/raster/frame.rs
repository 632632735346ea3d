use crate::{
    foundation::core::{HEIGHT, WIDTH},
    raster::context::RasterContext,
};

/// Straight-alpha RGBA8 frame, row-major, `width * height * 4` bytes.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FrameRGBA {
    pub width: u32,
    pub height: u32,
    pub data: Vec<u8>,
}

impl FrameRGBA {
    pub fn pixel(&self, x: u32, y: u32) -> [u8; 4] {
        let i = ((x + y * self.width) * 4) as usize;
        [
            self.data[i],
            self.data[i + 1],
            self.data[i + 2],
            self.data[i + 3],
        ]
    }
}

impl RasterContext {
    /// Compose the indexed raster into RGBA.
    ///
    /// Display pixel `(x, y)` samples `((x - h) mod W, (y - v) mod H)` for the
    /// current fine offsets; alpha is 0 where the sampled index equals the key
    /// color and 255 elsewhere.
    pub fn compose_frame(&self) -> FrameRGBA {
        let mut data = vec![0u8; WIDTH * HEIGHT * 4];
        self.compose_into(&mut data);
        FrameRGBA {
            width: WIDTH as u32,
            height: HEIGHT as u32,
            data,
        }
    }

    /// Like [`RasterContext::compose_frame`] but reuses a caller buffer.
    ///
    /// Panics if `out` is not exactly `WIDTH * HEIGHT * 4` bytes.
    pub fn compose_into(&self, out: &mut [u8]) {
        assert_eq!(out.len(), WIDTH * HEIGHT * 4, "frame buffer has wrong size");

        let h = usize::from(self.h_offset());
        let v = usize::from(self.v_offset());
        let key = self.key_color();
        let palette = self.palette();
        let pixels = self.pixels();

        for y in 0..HEIGHT {
            let py = (y + HEIGHT - v) % HEIGHT;
            for x in 0..WIDTH {
                let px = (x + WIDTH - h) % WIDTH;
                let index = pixels[px + py * WIDTH];
                let rgb = palette[usize::from(index)];
                let o = 4 * (x + y * WIDTH);
                out[o] = rgb.r;
                out[o + 1] = rgb.g;
                out[o + 2] = rgb.b;
                out[o + 3] = if key == Some(index) { 0x00 } else { 0xff };
            }
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/raster/frame.rs"]
mod tests;
