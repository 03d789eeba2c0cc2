// Input module - joypad strobe/serial protocol and keyboard mapping
//
// The two controller ports live at $4016 (pad 1 data, strobe on write)
// and $4017 (pad 2 data). Reading sequence:
//
// 1. Write $01 to $4016 (begin strobe)
// 2. Write $00 to $4016 (latch: shift index resets)
// 3. Read $4016 / $4017 eight times: A, B, Select, Start, Up, Down,
//    Left, Right in bit 0; further reads return 1
//
// Button state is fed from the keyboard handler between frames; nothing
// on this machine ever feeds pad 2, so it reads idle.

pub mod keyboard;

pub use keyboard::{KeyboardHandler, KeyboardQueue, scancodes};

/// Snapshot of the 8 buttons of a standard controller
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Controller {
    pub button_a: bool,
    pub button_b: bool,
    pub select: bool,
    pub start: bool,
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
}

impl Controller {
    /// All buttons released
    pub fn new() -> Self {
        Controller::default()
    }

    /// Button state by shift order (0=A .. 7=Right)
    fn get_button(&self, index: u8) -> bool {
        match index {
            0 => self.button_a,
            1 => self.button_b,
            2 => self.select,
            3 => self.start,
            4 => self.up,
            5 => self.down,
            6 => self.left,
            7 => self.right,
            _ => false,
        }
    }
}

/// Joypad I/O latch: strobe plus one serial shift index per pad
pub struct ControllerIO {
    /// Pad 1 state as latched at the last refresh
    joypad1: Controller,

    /// Pad 2 state (never fed on this machine)
    joypad2: Controller,

    /// Bit 0 of the last $4016 write, for the 1->0 strobe edge
    strobe: bool,

    /// Next button index shifted out of pad 1
    shift1: u8,

    /// Next button index shifted out of pad 2
    shift2: u8,
}

impl ControllerIO {
    pub fn new() -> Self {
        ControllerIO {
            joypad1: Controller::new(),
            joypad2: Controller::new(),
            strobe: false,
            shift1: 0,
            shift2: 0,
        }
    }

    /// Reset latch state (machine reset)
    pub fn reset(&mut self) {
        self.strobe = false;
        self.shift1 = 0;
        self.shift2 = 0;
    }

    /// Replace the latched pad 1 state
    pub fn set_joypad1(&mut self, state: Controller) {
        self.joypad1 = state;
    }

    /// $4016 write: a 1->0 transition of bit 0 resets both shift indices
    pub fn write_strobe(&mut self, data: u8) {
        let bit = data & 0x01 != 0;
        if self.strobe && !bit {
            self.shift1 = 0;
            self.shift2 = 0;
        }
        self.strobe = bit;
    }

    /// $4016 read: shift out the next pad 1 button bit
    pub fn read_joypad1(&mut self) -> u8 {
        Self::shift_out(&self.joypad1, &mut self.shift1, self.strobe)
    }

    /// $4017 read: shift out the next pad 2 button bit
    pub fn read_joypad2(&mut self) -> u8 {
        Self::shift_out(&self.joypad2, &mut self.shift2, self.strobe)
    }

    fn shift_out(pad: &Controller, shift: &mut u8, strobe: bool) -> u8 {
        if strobe {
            // While the strobe is held the shifter keeps reloading: every
            // read reports button A
            return pad.get_button(0) as u8;
        }
        if *shift >= 8 {
            // Official pads report 1 once the register is exhausted
            return 1;
        }
        let bit = pad.get_button(*shift) as u8;
        *shift += 1;
        bit
    }
}

impl Default for ControllerIO {
    fn default() -> Self {
        Self::new()
    }
}
