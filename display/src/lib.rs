pub use display::{Display, DEFAULT_SCALE};
pub use error::DisplayError;

mod display;
mod error;
