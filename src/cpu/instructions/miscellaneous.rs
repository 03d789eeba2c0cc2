// Control instructions: NOP, BRK, RTI

use crate::bus::Bus;
use crate::cpu::{flags, vectors, Cpu};

impl Cpu {
    /// NOP - No operation
    pub fn nop(&mut self) {}

    /// BRK - Software interrupt
    ///
    /// Pushes PC+1 (leaving a padding byte after the opcode), then P with
    /// B and the unused bit set, sets I, and vectors through $FFFE.
    pub fn brk(&mut self, bus: &mut Bus) {
        self.stack_push_u16(bus, self.pc.wrapping_add(1));
        self.stack_push(bus, self.status | flags::BREAK | flags::UNUSED);
        self.set_interrupt_disable(true);
        self.pc = bus.read_u16(vectors::IRQ);
    }

    /// RTI - Return from interrupt
    ///
    /// Pops P (unused forced on, B cleared), then PC. Unlike RTS no +1
    /// correction applies.
    pub fn rti(&mut self, bus: &mut Bus) {
        let status = self.stack_pop(bus);
        self.status = (status | flags::UNUSED) & !flags::BREAK;
        self.pc = self.stack_pop_u16(bus);
    }
}
