use crate::constants::PROGRAM_START;
use crate::frame::FrameBuffer;
use crate::keypad::Keypad;
use crate::memory::Memory;
use crate::stack::Stack;
use crate::timers::Timers;

/// A snapshot of the interpreter's internal state
///
/// ## CPU
/// Registers
/// - (v) 16 primary 8-bit registers (V0..VF)
///     - the first 15 (V0..VE) are general purpose registers
///     - the 16th (VF) is overwritten as a carry/borrow/collision flag
/// - (i) a 16-bit memory address register, free to run past 0xFFF
///
/// Counter
/// - (pc) a 16-bit program counter, starting at 0x200
///
/// Stack
/// - 16 return addresses with a stack pointer
///
/// Timers
/// - 2 8-bit timers (delay & sound) decremented at 60Hz by the host
///
/// ## Memory
/// - 4096 bytes of addressable memory with the sprite sheet at 0x000
/// - a 64x32 frame buffer
///
/// ## Input
/// - pressed status of keys 0..F
#[derive(Clone)]
pub struct State {
    pub v: [u8; 16],
    pub i: u16,
    pub pc: u16,
    pub stack: Stack,
    pub timers: Timers,
    pub memory: Memory,
    pub frame_buffer: FrameBuffer,
    pub keypad: Keypad,
}

impl State {
    pub fn new() -> Self {
        State {
            v: [0; 16],
            i: 0,
            pc: PROGRAM_START,
            stack: Stack::new(),
            timers: Timers::new(),
            memory: Memory::new(),
            frame_buffer: FrameBuffer::new(),
            keypad: Keypad::new(),
        }
    }

    /// The instruction word the program counter points at
    pub fn current_op(&self) -> u16 {
        self.memory.word(self.pc)
    }
}

impl Default for State {
    fn default() -> Self {
        Self::new()
    }
}
