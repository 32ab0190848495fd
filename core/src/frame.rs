use crate::constants::{DISPLAY_HEIGHT, DISPLAY_WIDTH};

/// # Frame buffer
/// The 64x32 monochrome display, stored row-major as `[y * 64 + x]`.
///
/// Pixels are only ever flipped by XOR or reset all at once.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct FrameBuffer {
    pixels: [bool; DISPLAY_WIDTH * DISPLAY_HEIGHT],
}

impl FrameBuffer {
    pub fn new() -> Self {
        FrameBuffer {
            pixels: [false; DISPLAY_WIDTH * DISPLAY_HEIGHT],
        }
    }

    pub fn get(&self, x: usize, y: usize) -> bool {
        self.pixels[y * DISPLAY_WIDTH + x]
    }

    /// XORs `bit` into the pixel at (x, y).
    /// Returns true if a set pixel was erased.
    pub fn toggle(&mut self, x: usize, y: usize, bit: bool) -> bool {
        let pixel = &mut self.pixels[y * DISPLAY_WIDTH + x];
        let collided = bit && *pixel;
        *pixel ^= bit;
        collided
    }

    pub fn clear(&mut self) {
        self.pixels = [false; DISPLAY_WIDTH * DISPLAY_HEIGHT];
    }

    pub fn pixels(&self) -> &[bool] {
        &self.pixels
    }

    pub fn rows(&self) -> impl Iterator<Item = &[bool]> {
        self.pixels.chunks(DISPLAY_WIDTH)
    }

    /// Number of set pixels
    pub fn lit(&self) -> usize {
        self.pixels.iter().filter(|&&p| p).count()
    }
}

impl Default for FrameBuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for FrameBuffer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for row in self.rows() {
            let line: String = row.iter().map(|&p| if p { '#' } else { '.' }).collect();
            writeln!(f, "{}", line)?;
        }
        Ok(())
    }
}
