use std::ffi::NulError;

use sdl2::render::TextureValueError;
use sdl2::video::WindowBuildError;
use sdl2::IntegerOrSdlError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DisplayError {
    /// SDL2 reports most failures as plain strings
    #[error("sdl error: {0}")]
    Sdl(String),
    #[error("unable to build window: {0}")]
    Window(#[from] WindowBuildError),
    #[error("unable to build canvas: {0}")]
    Canvas(#[from] IntegerOrSdlError),
    #[error("unable to create texture: {0}")]
    Texture(#[from] TextureValueError),
    #[error("invalid window title: {0}")]
    Title(#[from] NulError),
}
