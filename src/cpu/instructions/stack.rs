// Stack instructions

use crate::bus::Bus;
use crate::cpu::{flags, Cpu};

impl Cpu {
    /// PHA - Push accumulator
    pub fn pha(&mut self, bus: &mut Bus) {
        self.stack_push(bus, self.a);
    }

    /// PHP - Push P with both B and the unused bit set
    pub fn php(&mut self, bus: &mut Bus) {
        self.stack_push(bus, self.status | flags::BREAK | flags::UNUSED);
    }

    /// PLA - Pull accumulator. Flags: Z, N
    pub fn pla(&mut self, bus: &mut Bus) {
        self.a = self.stack_pop(bus);
        self.update_zero_and_negative_flags(self.a);
    }

    /// PLP - Pull P; the unused bit is forced on, B is masked out
    pub fn plp(&mut self, bus: &mut Bus) {
        let value = self.stack_pop(bus);
        self.status = (value | flags::UNUSED) & !flags::BREAK;
    }
}
