use crate::constants::{ADDRESS_MASK, MAX_PROGRAM_SIZE, MEMORY_SIZE, PROGRAM_START, SPRITE_SHEET};

/// # Memory
/// 4096 bytes of addressable memory.
///
/// ```text
/// 0x000 - 0x04F  sprite sheet
/// 0x050 - 0x1FF  unused
/// 0x200 - 0xFFF  program
/// ```
///
/// Every access is masked to 12 bits, so an index register that has run past
/// 0xFFF wraps around to the start of memory instead of reading out of bounds.
#[derive(Clone)]
pub struct Memory {
    bytes: [u8; MEMORY_SIZE],
}

impl Memory {
    /// Zeroed memory with the sprite sheet in place
    pub fn new() -> Self {
        let mut bytes = [0; MEMORY_SIZE];
        bytes[..SPRITE_SHEET.len()].copy_from_slice(&SPRITE_SHEET);
        Memory { bytes }
    }

    pub fn read(&self, addr: u16) -> u8 {
        self.bytes[usize::from(addr & ADDRESS_MASK)]
    }

    pub fn write(&mut self, addr: u16, value: u8) {
        self.bytes[usize::from(addr & ADDRESS_MASK)] = value;
    }

    /// Reads the big-endian instruction word at `addr`.
    pub fn word(&self, addr: u16) -> u16 {
        let left = u16::from(self.read(addr));
        let right = u16::from(self.read(addr.wrapping_add(1)));
        left << 8 | right
    }

    /// Copies a program to 0x200, dropping anything past the end of memory.
    ///
    /// Returns the number of bytes copied.
    pub fn load_program(&mut self, program: &[u8]) -> usize {
        let len = program.len().min(MAX_PROGRAM_SIZE);
        let start = usize::from(PROGRAM_START);
        self.bytes[start..start + len].copy_from_slice(&program[..len]);
        len
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.bytes
    }
}

impl Default for Memory {
    fn default() -> Self {
        Self::new()
    }
}
