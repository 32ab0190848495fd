use sdl2::pixels::PixelFormatEnum;

use chipzz_core::constants::{DISPLAY_HEIGHT, DISPLAY_WIDTH};
use chipzz_core::FrameBuffer;

use crate::error::DisplayError;

const TITLE: &str = "chipzz";

/// Window pixels per CHIP-8 pixel unless told otherwise
pub const DEFAULT_SCALE: u32 = 10;

/// Bytes per pixel in an RGB24 texture
const BYTES_PER_PIXEL: usize = 3;

/// # Display
/// The CHIP-8 display is composed of 64x32 black/white pixels.
/// Each frame the machine's FrameBuffer is streamed into a texture that is
/// stretched over a window `scale` times that size.
pub struct Display {
    canvas: sdl2::render::WindowCanvas,
    width: usize,
    height: usize,
}

impl Display {
    /// Creates a new display object bound to an sdl2 context.
    ///
    /// # Arguments
    /// * `sdl` an sdl2 context with which to draw
    /// * `scale` the size multiplier for each pixel
    pub fn new(sdl: &sdl2::Sdl, scale: u32) -> Result<Self, DisplayError> {
        let video_subsystem = sdl.video().map_err(DisplayError::Sdl)?;
        let window = video_subsystem
            .window(
                TITLE,
                DISPLAY_WIDTH as u32 * scale,
                DISPLAY_HEIGHT as u32 * scale,
            )
            .position_centered()
            .build()?;
        let canvas = window.into_canvas().build()?;

        Ok(Display {
            canvas,
            width: DISPLAY_WIDTH,
            height: DISPLAY_HEIGHT,
        })
    }

    /// Formats a FrameBuffer for rendering as an SDL2 RGB24 texture.
    ///
    /// An RGB24 texture is a 1D array of bytes that represent concatenated rows of RGB pixels.
    /// Each set pixel becomes white (255, 255, 255) and each unset one black (0, 0, 0).
    fn frame_to_sdl_texture(frame: &FrameBuffer) -> Vec<u8> {
        frame
            .pixels()
            .iter()
            .map(|&lit| if lit { 255 } else { 0 })
            .flat_map(|intensity| std::iter::repeat(intensity).take(BYTES_PER_PIXEL))
            .collect()
    }

    /// Formats the FrameBuffer as an SDL2 RGB24 texture and presents it.
    pub fn render(&mut self, frame: &FrameBuffer) -> Result<(), DisplayError> {
        let texture_creator = self.canvas.texture_creator();
        let mut texture = texture_creator.create_texture_streaming(
            PixelFormatEnum::RGB24,
            self.width as u32,
            self.height as u32,
        )?;

        let rgb = Display::frame_to_sdl_texture(frame);
        let row_len = self.width * BYTES_PER_PIXEL;
        texture
            .with_lock(None, |buffer: &mut [u8], pitch: usize| {
                // rows may be padded out to `pitch` bytes
                for (row, pixels) in rgb.chunks(row_len).enumerate() {
                    let start = row * pitch;
                    buffer[start..start + row_len].copy_from_slice(pixels);
                }
            })
            .map_err(DisplayError::Sdl)?;

        self.canvas.copy(&texture, None, None).map_err(DisplayError::Sdl)?;
        self.canvas.present();
        Ok(())
    }

    /// Reflects whether emulation is paused in the window title
    pub fn set_paused(&mut self, paused: bool) -> Result<(), DisplayError> {
        let title = if paused {
            format!("{} [paused]", TITLE)
        } else {
            TITLE.to_string()
        };
        self.canvas.window_mut().set_title(&title)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frame_to_sdl_texture() {
        let mut frame = FrameBuffer::new();
        frame.toggle(1, 0, true);
        frame.toggle(0, 1, true);
        let texture = Display::frame_to_sdl_texture(&frame);

        let mut expected: Vec<u8> = vec![0; 6144];
        expected[0..6].copy_from_slice(&[0, 0, 0, 255, 255, 255]);
        expected[192..198].copy_from_slice(&[255, 255, 255, 0, 0, 0]);

        assert_eq!(texture, expected);
    }

    #[test]
    fn test_blank_frame_is_black() {
        let texture = Display::frame_to_sdl_texture(&FrameBuffer::new());
        assert_eq!(texture.len(), DISPLAY_WIDTH * DISPLAY_HEIGHT * BYTES_PER_PIXEL);
        assert!(texture.iter().all(|&b| b == 0));
    }
}
