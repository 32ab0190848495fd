pub use error::{Fault, RomError};
pub use frame::FrameBuffer;
pub use keypad::Keypad;
pub use machine::{Machine, Step};
pub use state::State;

pub mod constants;
mod error;
mod frame;
mod instruction;
mod keypad;
mod machine;
mod memory;
mod opcode;
mod operations;
mod stack;
pub mod state;
mod timers;

pub use memory::Memory;
pub use stack::Stack;
pub use timers::Timers;
