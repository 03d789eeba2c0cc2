// Flag set/clear instructions

use crate::cpu::{flags, Cpu};

impl Cpu {
    /// CLC - Clear carry
    pub fn clc(&mut self) {
        self.clear_flag(flags::CARRY);
    }

    /// SEC - Set carry
    pub fn sec(&mut self) {
        self.set_flag(flags::CARRY);
    }

    /// CLD - Clear decimal (latched only; arithmetic stays binary)
    pub fn cld(&mut self) {
        self.clear_flag(flags::DECIMAL);
    }

    /// SED - Set decimal (latched only)
    pub fn sed(&mut self) {
        self.set_flag(flags::DECIMAL);
    }

    /// CLI - Clear interrupt disable
    pub fn cli(&mut self) {
        self.clear_flag(flags::INTERRUPT_DISABLE);
    }

    /// SEI - Set interrupt disable
    pub fn sei(&mut self) {
        self.set_flag(flags::INTERRUPT_DISABLE);
    }

    /// CLV - Clear overflow
    pub fn clv(&mut self) {
        self.clear_flag(flags::OVERFLOW);
    }
}
