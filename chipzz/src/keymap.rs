use sdl2::keyboard::Scancode;

use chipzz_core::constants::KEY_COUNT;

/// # Keymap
/// CHIP-8 input is generated with a hexadecimal keypad.
///
/// The hexadecimal layout is mapped to the left 4 alphanumeric columns.
/// Scancodes are used so the keys stay in place on non-QWERTY layouts.
/// ```text
/// |1|2|3|C|      |1|2|3|4|
/// |4|5|6|D|  ->  |Q|W|E|R|
/// |7|8|9|E|  ->  |A|S|D|F|
/// |A|0|B|F|      |Z|X|C|V|
/// ```
#[rustfmt::skip]
pub const KEYMAP: [(Scancode, u8); KEY_COUNT] = [
    (Scancode::Num1, 0x1), (Scancode::Num2, 0x2), (Scancode::Num3, 0x3), (Scancode::Num4, 0xC),
    (Scancode::Q,    0x4), (Scancode::W,    0x5), (Scancode::E,    0x6), (Scancode::R,    0xD),
    (Scancode::A,    0x7), (Scancode::S,    0x8), (Scancode::D,    0x9), (Scancode::F,    0xE),
    (Scancode::Z,    0xA), (Scancode::X,    0x0), (Scancode::C,    0xB), (Scancode::V,    0xF),
];

/// Reads the pressed status of every keypad key
///
/// # Arguments
/// * `is_pressed` whether a physical key is currently held
pub fn snapshot<F: Fn(Scancode) -> bool>(is_pressed: F) -> [bool; KEY_COUNT] {
    let mut keys = [false; KEY_COUNT];
    for &(scancode, key) in KEYMAP.iter() {
        keys[key as usize] = is_pressed(scancode);
    }
    keys
}
