use crate::constants::STACK_SIZE;
use crate::error::Fault;

/// # Stack
/// Fixed capacity store of subroutine return addresses.
///
/// Calls past capacity are refused rather than overwriting memory or
/// existing return addresses.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Stack {
    slots: [u16; STACK_SIZE],
    len: usize,
}

impl Stack {
    pub fn new() -> Self {
        Self::default()
    }

    /// Push a return address, refusing it once all slots are taken
    pub fn push(&mut self, addr: u16, target: u16) -> Result<(), Fault> {
        if self.is_full() {
            return Err(Fault::StackOverflow { target });
        }
        self.slots[self.len] = addr;
        self.len += 1;
        Ok(())
    }

    pub fn pop(&mut self) -> Option<u16> {
        if self.len == 0 {
            return None;
        }
        self.len -= 1;
        Some(self.slots[self.len])
    }

    /// Stack pointer: index of the topmost return address.
    /// Sits at 0 until a second address is pushed and tops out at 15.
    pub fn sp(&self) -> u8 {
        self.len.saturating_sub(1) as u8
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn is_full(&self) -> bool {
        self.len == STACK_SIZE
    }

    pub fn slots(&self) -> &[u16; STACK_SIZE] {
        &self.slots
    }
}
