use rand::RngCore;

use crate::constants::{DISPLAY_HEIGHT, DISPLAY_WIDTH, GLYPH_SIZE};
use crate::error::Fault;
use crate::opcode::Opcode;
use crate::state::State;

/// What the program counter does once an operation has run
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Flow {
    /// pc += 2
    Next,
    /// pc += 4
    Skip,
    /// pc = addr
    Jump(u16),
    /// pc is left pointing at the same instruction so it runs again
    Wait,
    /// the instruction was dropped; pc += 2
    Fault(Fault),
}

impl Flow {
    fn skip_if(cond: bool) -> Self {
        if cond {
            Flow::Skip
        } else {
            Flow::Next
        }
    }
}

/// Placeholder for words that don't decode to an instruction
pub fn unknown(op: &dyn Opcode, _state: &mut State, _rng: &mut dyn RngCore) -> Flow {
    Flow::Fault(Fault::UnknownOpcode(op.word()))
}

/// clear
pub fn clr(_op: &dyn Opcode, state: &mut State, _rng: &mut dyn RngCore) -> Flow {
    state.frame_buffer.clear();
    Flow::Next
}

/// PC = STACK.pop()
pub fn rts(_op: &dyn Opcode, state: &mut State, _rng: &mut dyn RngCore) -> Flow {
    match state.stack.pop() {
        Some(addr) => Flow::Jump(addr),
        None => Flow::Fault(Fault::StackUnderflow),
    }
}

/// PC = nnn
pub fn jump(op: &dyn Opcode, _state: &mut State, _rng: &mut dyn RngCore) -> Flow {
    Flow::Jump(op.nnn())
}

/// STACK.push(PC + 2); PC = nnn
/// Dropped entirely when the stack is full
pub fn call(op: &dyn Opcode, state: &mut State, _rng: &mut dyn RngCore) -> Flow {
    let ret = state.pc.wrapping_add(2);
    match state.stack.push(ret, op.nnn()) {
        Ok(()) => Flow::Jump(op.nnn()),
        Err(fault) => Flow::Fault(fault),
    }
}

/// if Vx == nn then pc += 2
pub fn ske(op: &dyn Opcode, state: &mut State, _rng: &mut dyn RngCore) -> Flow {
    Flow::skip_if(state.v[op.x() as usize] == op.nn())
}

/// if Vx != nn then pc += 2
pub fn skne(op: &dyn Opcode, state: &mut State, _rng: &mut dyn RngCore) -> Flow {
    Flow::skip_if(state.v[op.x() as usize] != op.nn())
}

/// if Vx == Vy then pc += 2
pub fn skre(op: &dyn Opcode, state: &mut State, _rng: &mut dyn RngCore) -> Flow {
    Flow::skip_if(state.v[op.x() as usize] == state.v[op.y() as usize])
}

/// Vx = nn
pub fn load(op: &dyn Opcode, state: &mut State, _rng: &mut dyn RngCore) -> Flow {
    state.v[op.x() as usize] = op.nn();
    Flow::Next
}

/// Vx += nn
/// Add nn to Vx; allow for overflow but implicitly drop it, VF untouched
pub fn add(op: &dyn Opcode, state: &mut State, _rng: &mut dyn RngCore) -> Flow {
    let x = op.x() as usize;
    state.v[x] = state.v[x].wrapping_add(op.nn());
    Flow::Next
}

/// Vx = Vy
pub fn mv(op: &dyn Opcode, state: &mut State, _rng: &mut dyn RngCore) -> Flow {
    state.v[op.x() as usize] = state.v[op.y() as usize];
    Flow::Next
}

/// Vx |= Vy
pub fn or(op: &dyn Opcode, state: &mut State, _rng: &mut dyn RngCore) -> Flow {
    state.v[op.x() as usize] |= state.v[op.y() as usize];
    Flow::Next
}

/// Vx &= Vy
pub fn and(op: &dyn Opcode, state: &mut State, _rng: &mut dyn RngCore) -> Flow {
    state.v[op.x() as usize] &= state.v[op.y() as usize];
    Flow::Next
}

/// Vx ^= Vy
pub fn xor(op: &dyn Opcode, state: &mut State, _rng: &mut dyn RngCore) -> Flow {
    state.v[op.x() as usize] ^= state.v[op.y() as usize];
    Flow::Next
}

/// Vx += Vy; VF = overflow
pub fn addr(op: &dyn Opcode, state: &mut State, _rng: &mut dyn RngCore) -> Flow {
    let (res, over) = state.v[op.x() as usize].overflowing_add(state.v[op.y() as usize]);
    state.v[0xF] = u8::from(over);
    state.v[op.x() as usize] = res;
    Flow::Next
}

/// Vx -= Vy; VF = !underflow
pub fn sub(op: &dyn Opcode, state: &mut State, _rng: &mut dyn RngCore) -> Flow {
    let (res, under) = state.v[op.x() as usize].overflowing_sub(state.v[op.y() as usize]);
    state.v[0xF] = u8::from(!under);
    state.v[op.x() as usize] = res;
    Flow::Next
}

/// Vx >>= 1; VF = the bit shifted out
/// Vy is ignored
pub fn shr(op: &dyn Opcode, state: &mut State, _rng: &mut dyn RngCore) -> Flow {
    let x = op.x() as usize;
    let value = state.v[x];
    state.v[0xF] = value & 0x1;
    state.v[x] = value >> 1;
    Flow::Next
}

/// Vx = Vy - Vx; VF = !underflow
pub fn subn(op: &dyn Opcode, state: &mut State, _rng: &mut dyn RngCore) -> Flow {
    let (res, under) = state.v[op.y() as usize].overflowing_sub(state.v[op.x() as usize]);
    state.v[0xF] = u8::from(!under);
    state.v[op.x() as usize] = res;
    Flow::Next
}

/// Vx <<= 1; VF = the bit shifted out
/// Vy is ignored
pub fn shl(op: &dyn Opcode, state: &mut State, _rng: &mut dyn RngCore) -> Flow {
    let x = op.x() as usize;
    let value = state.v[x];
    state.v[0xF] = value >> 7;
    state.v[x] = value << 1;
    Flow::Next
}

/// if Vx != Vy then pc += 2
pub fn skrne(op: &dyn Opcode, state: &mut State, _rng: &mut dyn RngCore) -> Flow {
    Flow::skip_if(state.v[op.x() as usize] != state.v[op.y() as usize])
}

/// I = nnn
pub fn loadi(op: &dyn Opcode, state: &mut State, _rng: &mut dyn RngCore) -> Flow {
    state.i = op.nnn();
    Flow::Next
}

/// PC = V0 + nnn
pub fn jumpi(op: &dyn Opcode, state: &mut State, _rng: &mut dyn RngCore) -> Flow {
    Flow::Jump(op.nnn() + u16::from(state.v[0x0]))
}

/// Vx = rand_byte & nn
pub fn rand(op: &dyn Opcode, state: &mut State, rng: &mut dyn RngCore) -> Flow {
    let rand_byte = rng.next_u32() as u8;
    state.v[op.x() as usize] = rand_byte & op.nn();
    Flow::Next
}

/// draw_sprite(x=Vx y=Vy size=n)
/// XORs a sprite from memory I..I+n at position x, y on the FrameBuffer.
/// The start position wraps, the sprite itself is clipped at the edges.
/// Sets VF if any pixels were erased
pub fn draw(op: &dyn Opcode, state: &mut State, _rng: &mut dyn RngCore) -> Flow {
    let x0 = state.v[op.x() as usize] as usize % DISPLAY_WIDTH;
    let y0 = state.v[op.y() as usize] as usize % DISPLAY_HEIGHT;

    // Reset the flag register (used for collision detection)
    state.v[0xF] = 0x0;

    for row in 0..op.n() as usize {
        let y = y0 + row;
        if y >= DISPLAY_HEIGHT {
            break;
        }
        let sprite_byte = state.memory.read(state.i.wrapping_add(row as u16));
        for bit in 0..8 {
            let x = x0 + bit;
            if x >= DISPLAY_WIDTH {
                continue;
            }
            let pixel = (sprite_byte >> (7 - bit)) & 0x1 == 0x1;
            if state.frame_buffer.toggle(x, y, pixel) {
                state.v[0xF] = 0x1;
            }
        }
    }

    Flow::Next
}

/// if Vx.pressed then pc += 2
pub fn skpr(op: &dyn Opcode, state: &mut State, _rng: &mut dyn RngCore) -> Flow {
    Flow::skip_if(state.keypad.is_down(state.v[op.x() as usize]))
}

/// if !Vx.pressed then pc += 2
pub fn skup(op: &dyn Opcode, state: &mut State, _rng: &mut dyn RngCore) -> Flow {
    Flow::skip_if(!state.keypad.is_down(state.v[op.x() as usize]))
}

/// Vx = DT
pub fn moved(op: &dyn Opcode, state: &mut State, _rng: &mut dyn RngCore) -> Flow {
    state.v[op.x() as usize] = state.timers.delay;
    Flow::Next
}

/// await keypress for Vx
/// Runs again on the next step until some key is held
pub fn keyd(op: &dyn Opcode, state: &mut State, _rng: &mut dyn RngCore) -> Flow {
    match state.keypad.first_down() {
        Some(key) => {
            state.v[op.x() as usize] = key;
            Flow::Next
        }
        None => Flow::Wait,
    }
}

/// DT = Vx
pub fn loadd(op: &dyn Opcode, state: &mut State, _rng: &mut dyn RngCore) -> Flow {
    state.timers.delay = state.v[op.x() as usize];
    Flow::Next
}

/// ST = Vx
pub fn loads(op: &dyn Opcode, state: &mut State, _rng: &mut dyn RngCore) -> Flow {
    state.timers.sound = state.v[op.x() as usize];
    Flow::Next
}

/// I += Vx
/// Wraps at 16 bits, no flag
pub fn addi(op: &dyn Opcode, state: &mut State, _rng: &mut dyn RngCore) -> Flow {
    state.i = state.i.wrapping_add(u16::from(state.v[op.x() as usize]));
    Flow::Next
}

/// I = Vx * 5
/// Set I to the memory address of the glyph for Vx
/// See constants::SPRITE_SHEET for more details
pub fn ldspr(op: &dyn Opcode, state: &mut State, _rng: &mut dyn RngCore) -> Flow {
    state.i = u16::from(state.v[op.x() as usize]) * GLYPH_SIZE;
    Flow::Next
}

/// mem[I..I+3] = bcd(Vx)
/// Store the decimal digits of Vx in memory starting at address I
pub fn bcd(op: &dyn Opcode, state: &mut State, _rng: &mut dyn RngCore) -> Flow {
    let value = state.v[op.x() as usize];
    let digits = [value / 100, value / 10 % 10, value % 10];
    for (offset, &digit) in digits.iter().enumerate() {
        state.memory.write(state.i.wrapping_add(offset as u16), digit);
    }
    Flow::Next
}

/// mem[I..=I+x] = V0..=Vx
/// I is left unchanged
pub fn stor(op: &dyn Opcode, state: &mut State, _rng: &mut dyn RngCore) -> Flow {
    for reg in 0..=op.x() {
        let addr = state.i.wrapping_add(u16::from(reg));
        state.memory.write(addr, state.v[reg as usize]);
    }
    Flow::Next
}

/// V0..=Vx = mem[I..=I+x]
/// I is left unchanged
pub fn read(op: &dyn Opcode, state: &mut State, _rng: &mut dyn RngCore) -> Flow {
    for reg in 0..=op.x() {
        let addr = state.i.wrapping_add(u16::from(reg));
        state.v[reg as usize] = state.memory.read(addr);
    }
    Flow::Next
}
