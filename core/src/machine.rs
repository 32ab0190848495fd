use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use log::{debug, trace, warn};
use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};

use crate::constants::{KEY_COUNT, MAX_PROGRAM_SIZE};
use crate::error::{Fault, RomError};
use crate::frame::FrameBuffer;
use crate::instruction::from_op;
use crate::keypad::Keypad;
use crate::operations::Flow;
use crate::state::State;

/// Outcome of a single `Machine::step`
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Step {
    Executed,
    /// Fx0A found no key held; the same instruction runs again next step
    AwaitingKey,
    /// The instruction was dropped and the program counter moved past it
    Faulted(Fault),
}

/// # Machine
/// The CHIP-8 virtual machine.
///
/// Owns the interpreter `State` and the random source behind `Cxnn`, which
/// can be swapped for a seeded generator to make runs reproducible.
///
/// Is driven by a host that, once per frame:
/// - writes the keypad
/// - advances the timers at ~60Hz
/// - steps the CPU a fixed number of times
/// - renders the frame buffer and sounds the buzzer when told to
pub struct Machine<R: RngCore = StdRng> {
    state: State,
    rng: R,
}

impl Machine<StdRng> {
    /// A machine with an entropy seeded random source and no program
    pub fn new() -> Self {
        Machine::with_rng(StdRng::from_entropy())
    }

    /// Open a ROM file and load it into a fresh machine
    pub fn from_rom_file<P: AsRef<Path>>(path: P) -> Result<Self, RomError> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| RomError::Open {
            path: path.to_path_buf(),
            source,
        })?;
        let mut machine = Machine::new();
        let loaded = machine.load_rom(&mut BufReader::new(file))?;
        debug!("loaded {} bytes from {}", loaded, path.display());
        Ok(machine)
    }
}

impl Default for Machine<StdRng> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: RngCore> Machine<R> {
    pub fn with_rng(rng: R) -> Self {
        Machine {
            state: State::new(),
            rng,
        }
    }

    /// Load a ROM from a source file
    ///
    /// Anything that doesn't fit between 0x200 and the end of memory is
    /// dropped with a warning and never read. Returns the number of bytes
    /// loaded.
    ///
    /// # Arguments
    /// * `reader` a reader that contains a ROM
    pub fn load_rom(&mut self, reader: &mut dyn Read) -> Result<usize, RomError> {
        let mut program = Vec::with_capacity(MAX_PROGRAM_SIZE);
        (&mut *reader)
            .take(MAX_PROGRAM_SIZE as u64 + 1)
            .read_to_end(&mut program)?;
        if program.len() > MAX_PROGRAM_SIZE {
            warn!(
                "ROM exceeds {} bytes, dropping whatever doesn't fit in memory",
                MAX_PROGRAM_SIZE
            );
        }
        Ok(self.state.memory.load_program(&program))
    }

    /// Load a program from memory, truncating it like `load_rom`
    pub fn load_program(&mut self, program: &[u8]) -> usize {
        if program.len() > MAX_PROGRAM_SIZE {
            warn!(
                "program is {} bytes, dropping the {} that don't fit in memory",
                program.len(),
                program.len() - MAX_PROGRAM_SIZE
            );
        }
        self.state.memory.load_program(program)
    }

    /// Advances the CPU by a single instruction
    /// - fetches the opcode pointed at by the pc
    /// - selects and executes its operation
    /// - moves the pc on unless the operation redirected it
    pub fn step(&mut self) -> Step {
        let op = self.state.current_op();
        trace!(
            "{:04X} pc{:04X} i{:04X} v{:02X?}",
            op,
            self.state.pc,
            self.state.i,
            self.state.v
        );
        let operation = from_op(&op);
        match operation(&op, &mut self.state, &mut self.rng) {
            Flow::Next => {
                self.advance_pc(2);
                Step::Executed
            }
            Flow::Skip => {
                self.advance_pc(4);
                Step::Executed
            }
            Flow::Jump(addr) => {
                self.state.pc = addr;
                Step::Executed
            }
            Flow::Wait => Step::AwaitingKey,
            Flow::Fault(fault) => {
                match fault {
                    Fault::UnknownOpcode(_) => debug!("{} at {:04X}", fault, self.state.pc),
                    _ => warn!("{} at {:04X}", fault, self.state.pc),
                }
                self.advance_pc(2);
                Step::Faulted(fault)
            }
        }
    }

    fn advance_pc(&mut self, by: u16) {
        self.state.pc = self.state.pc.wrapping_add(by);
    }

    /// Decrements the delay and sound timers; call at ~60Hz.
    ///
    /// Returns true when the sound timer was running, meaning the buzzer
    /// should (re)play its tone.
    pub fn advance_timers(&mut self) -> bool {
        self.state.timers.tick()
    }

    /// Set the pressed status of key
    ///
    /// # Arguments
    /// * `key` the index of the key, 0x0..=0xF
    /// * `down` whether it is held
    pub fn set_key(&mut self, key: u8, down: bool) {
        self.state.keypad.set(key, down);
    }

    /// Overwrite the pressed status of every key
    pub fn set_keys(&mut self, keys: &[bool; KEY_COUNT]) {
        self.state.keypad.set_all(keys);
    }

    pub fn keypad(&self) -> &Keypad {
        &self.state.keypad
    }

    pub fn frame_buffer(&self) -> &FrameBuffer {
        &self.state.frame_buffer
    }

    /// Whether the buzzer should currently be sounding
    pub fn sound_active(&self) -> bool {
        self.state.timers.sound_active()
    }

    pub fn delay_timer(&self) -> u8 {
        self.state.timers.delay
    }

    pub fn sound_timer(&self) -> u8 {
        self.state.timers.sound
    }

    pub fn pc(&self) -> u16 {
        self.state.pc
    }

    pub fn i(&self) -> u16 {
        self.state.i
    }

    pub fn v(&self) -> &[u8; 16] {
        &self.state.v
    }

    pub fn sp(&self) -> u8 {
        self.state.stack.sp()
    }

    pub fn state(&self) -> &State {
        &self.state
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::PROGRAM_START;

    fn boot(program: &[u16]) -> Machine {
        let bytes: Vec<u8> = program.iter().flat_map(|op| op.to_be_bytes()).collect();
        let mut machine = Machine::with_rng(StdRng::seed_from_u64(0));
        machine.load_program(&bytes);
        machine
    }

    #[test]
    fn test_machine_gets_op() {
        let machine = boot(&[0xAABB]);
        assert_eq!(machine.state.current_op(), 0xAABB);
    }

    #[test]
    fn test_initial_machine() {
        let machine = Machine::new();
        assert_eq!(machine.pc(), PROGRAM_START);
        assert_eq!(machine.sp(), 0);
        assert_eq!((machine.delay_timer(), machine.sound_timer()), (0, 0));
        assert_eq!(machine.frame_buffer().lit(), 0);
    }

    #[test]
    fn test_6xnn_loads_every_register() {
        let program: Vec<u16> = (0..16).map(|x| 0x6000 | x << 8 | (0xF0 - x)).collect();
        let mut machine = boot(&program);
        for x in 0..16 {
            let pc = machine.pc();
            assert_eq!(machine.step(), Step::Executed);
            assert_eq!(machine.pc(), pc + 2);
            assert_eq!(machine.v()[x], 0xF0 - x as u8);
        }
    }

    #[test]
    fn test_skip_moves_past_next_instruction() {
        let mut machine = boot(&[0x3000, 0x3001]);
        machine.step();
        assert_eq!(machine.pc(), 0x204);

        let mut machine = boot(&[0x3001]);
        machine.step();
        assert_eq!(machine.pc(), 0x202);
    }

    #[test]
    fn test_call_and_return() {
        // 200: call 206
        // 202: jump 202
        // 206: return
        let mut machine = boot(&[0x2206, 0x1202, 0x0000, 0x00EE]);
        machine.step();
        assert_eq!(machine.pc(), 0x206);
        machine.step();
        assert_eq!(machine.pc(), 0x202);
        assert!(machine.state.stack.is_empty());
    }

    #[test]
    fn test_seventeenth_call_is_dropped() {
        let mut machine = boot(&[0x2200]);
        for _ in 0..16 {
            assert_eq!(machine.step(), Step::Executed);
            assert_eq!(machine.pc(), 0x200);
        }
        assert_eq!(machine.sp(), 15);
        let stack = *machine.state.stack.slots();

        assert_eq!(
            machine.step(),
            Step::Faulted(Fault::StackOverflow { target: 0x200 })
        );
        assert_eq!(machine.sp(), 15);
        assert_eq!(*machine.state.stack.slots(), stack);
        assert_eq!(machine.pc(), 0x202);
    }

    #[test]
    fn test_unknown_opcode_advances() {
        let mut machine = boot(&[0x0000, 0x5AB1]);
        assert_eq!(machine.step(), Step::Faulted(Fault::UnknownOpcode(0x0000)));
        assert_eq!(machine.step(), Step::Faulted(Fault::UnknownOpcode(0x5AB1)));
        assert_eq!(machine.pc(), 0x204);
    }

    #[test]
    fn test_return_on_empty_stack_advances() {
        let mut machine = boot(&[0x00EE]);
        assert_eq!(machine.step(), Step::Faulted(Fault::StackUnderflow));
        assert_eq!(machine.pc(), 0x202);
    }

    #[test]
    fn test_key_wait_makes_no_progress_until_key() {
        let mut machine = boot(&[0xF30A]);
        for _ in 0..5 {
            assert_eq!(machine.step(), Step::AwaitingKey);
            assert_eq!(machine.pc(), 0x200);
        }
        machine.set_key(0xB, true);
        machine.set_key(0x7, true);
        assert_eq!(machine.step(), Step::Executed);
        assert_eq!(machine.v()[0x3], 0x7);
        assert_eq!(machine.pc(), 0x202);
    }

    #[test]
    fn test_set_keys_overwrites_snapshot() {
        let mut machine = boot(&[]);
        machine.set_key(0x1, true);
        let mut keys = [false; KEY_COUNT];
        keys[0xF] = true;
        machine.set_keys(&keys);
        assert!(!machine.keypad().is_down(0x1));
        assert!(machine.keypad().is_down(0xF));
    }

    #[test]
    fn test_jump_past_memory_wraps_fetch() {
        // V0 = FF; jump to FFF + V0
        let mut machine = boot(&[0x60FF, 0xBFFF]);
        machine.step();
        machine.step();
        assert_eq!(machine.pc(), 0x10FE);
        // fetches from 0x0FE, which is zeroed
        assert_eq!(machine.step(), Step::Faulted(Fault::UnknownOpcode(0x0000)));
        assert_eq!(machine.pc(), 0x1100);
    }

    #[test]
    fn test_delay_timer_counts_down_to_zero() {
        // V0 = 60; DT = V0
        let mut machine = boot(&[0x603C, 0xF015]);
        machine.step();
        machine.step();
        assert_eq!(machine.delay_timer(), 60);
        for _ in 0..60 {
            machine.advance_timers();
        }
        assert_eq!(machine.delay_timer(), 0);
        machine.advance_timers();
        assert_eq!(machine.delay_timer(), 0);
    }

    #[test]
    fn test_sound_timer_signals_buzzer() {
        // V0 = 2; ST = V0
        let mut machine = boot(&[0x6002, 0xF018]);
        machine.step();
        machine.step();
        assert!(machine.sound_active());
        assert!(machine.advance_timers());
        assert!(machine.advance_timers());
        assert!(!machine.sound_active());
        assert!(!machine.advance_timers());
    }

    #[test]
    fn test_rand_is_reproducible_with_seeded_rng() {
        let mut first = boot(&[0xC0FF, 0xC1FF]);
        let mut second = boot(&[0xC0FF, 0xC1FF]);
        for _ in 0..2 {
            first.step();
            second.step();
        }
        assert_eq!(first.v()[..2], second.v()[..2]);
    }

    #[test]
    fn test_drawing_twice_erases_sprite() {
        // I = glyph 8; draw at (V0, V1) twice
        let mut machine = boot(&[0x6008, 0xF029, 0xD015, 0xD015]);
        machine.step();
        machine.step();
        machine.step();
        assert_eq!(machine.v()[0xF], 0);
        assert!(machine.frame_buffer().lit() > 0);
        machine.step();
        assert_eq!(machine.v()[0xF], 1);
        assert_eq!(machine.frame_buffer().lit(), 0);
    }

    #[test]
    fn test_load_rom_truncates() {
        let rom = vec![0x12; MAX_PROGRAM_SIZE + 5];
        let mut machine = Machine::new();
        let loaded = machine.load_rom(&mut rom.as_slice()).unwrap();
        assert_eq!(loaded, MAX_PROGRAM_SIZE);
        assert_eq!(machine.state.memory.read(0xFFF), 0x12);
    }

    /// Endless ROM source that fails if read beyond `cap` bytes
    struct Endless {
        pulled: usize,
        cap: usize,
    }

    impl Read for Endless {
        fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
            if self.pulled >= self.cap {
                return Err(std::io::Error::new(
                    std::io::ErrorKind::Other,
                    "read past the end of memory",
                ));
            }
            let len = buf.len().min(self.cap - self.pulled);
            buf[..len].fill(0x12);
            self.pulled += len;
            Ok(len)
        }
    }

    #[test]
    fn test_load_rom_stops_reading_at_memory_end() {
        let mut rom = Endless {
            pulled: 0,
            cap: MAX_PROGRAM_SIZE + 1,
        };
        let mut machine = Machine::new();
        assert_eq!(machine.load_rom(&mut rom).unwrap(), MAX_PROGRAM_SIZE);
        assert_eq!(rom.pulled, MAX_PROGRAM_SIZE + 1);
        assert_eq!(machine.state.memory.read(0xFFF), 0x12);
    }

    #[test]
    fn test_load_rom_short() {
        let rom: &[u8] = &[0x00, 0xE0];
        let mut machine = Machine::new();
        assert_eq!(machine.load_rom(&mut &rom[..]).unwrap(), 2);
        assert_eq!(machine.state.current_op(), 0x00E0);
        assert_eq!(machine.state.memory.read(0x202), 0x00);
    }

    #[test]
    fn test_missing_rom_file_is_an_error() {
        let path = std::env::temp_dir().join("chipzz-no-such-rom.ch8");
        match Machine::from_rom_file(&path) {
            Err(RomError::Open { path: reported, .. }) => assert_eq!(reported, path),
            Err(other) => panic!("unexpected error {:?}", other),
            Ok(_) => panic!("expected missing ROM to fail"),
        }
    }

    #[test]
    fn test_rom_file_is_loaded() {
        let path = std::env::temp_dir().join(format!("chipzz-{}.ch8", std::process::id()));
        std::fs::write(&path, [0x61u8, 0x2A]).unwrap();
        let mut machine = Machine::from_rom_file(&path).unwrap();
        std::fs::remove_file(&path).unwrap();
        machine.step();
        assert_eq!(machine.v()[0x1], 0x2A);
    }
}
