use crate::constants::KEY_COUNT;

/// # Keypad
/// Pressed status of the 16 hexadecimal keys, written by the host between
/// batches of steps and only read by the interpreter.
///
/// ```text
/// |1|2|3|C|
/// |4|5|6|D|
/// |7|8|9|E|
/// |A|0|B|F|
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Keypad {
    keys: [bool; KEY_COUNT],
}

impl Keypad {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the pressed status of `key`; only its low nibble is used
    pub fn set(&mut self, key: u8, down: bool) {
        self.keys[usize::from(key & 0xF)] = down;
    }

    pub fn set_all(&mut self, keys: &[bool; KEY_COUNT]) {
        self.keys = *keys;
    }

    /// Whether `key` is held; only its low nibble is used
    pub fn is_down(&self, key: u8) -> bool {
        self.keys[usize::from(key & 0xF)]
    }

    /// The lowest numbered key that is held, if any
    pub fn first_down(&self) -> Option<u8> {
        self.keys.iter().position(|&down| down).map(|key| key as u8)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_down_scans_ascending() {
        let mut keypad = Keypad::new();
        assert_eq!(keypad.first_down(), None);
        keypad.set(0xC, true);
        keypad.set(0x5, true);
        assert_eq!(keypad.first_down(), Some(0x5));
        keypad.set(0x5, false);
        assert_eq!(keypad.first_down(), Some(0xC));
    }

    #[test]
    fn test_keys_are_masked_to_a_nibble() {
        let mut keypad = Keypad::new();
        keypad.set(0x1A, true);
        assert!(keypad.is_down(0xA));
        assert!(keypad.is_down(0xFA));
    }
}
