// Load and store instructions

use crate::bus::Bus;
use crate::cpu::addressing::AddressingResult;
use crate::cpu::Cpu;

impl Cpu {
    /// LDA - Load Accumulator. Flags: Z, N
    pub fn lda(&mut self, bus: &mut Bus, addr_result: &AddressingResult) {
        self.a = self.read_operand(bus, addr_result);
        self.update_zero_and_negative_flags(self.a);
    }

    /// LDX - Load X. Flags: Z, N
    pub fn ldx(&mut self, bus: &mut Bus, addr_result: &AddressingResult) {
        self.x = self.read_operand(bus, addr_result);
        self.update_zero_and_negative_flags(self.x);
    }

    /// LDY - Load Y. Flags: Z, N
    pub fn ldy(&mut self, bus: &mut Bus, addr_result: &AddressingResult) {
        self.y = self.read_operand(bus, addr_result);
        self.update_zero_and_negative_flags(self.y);
    }

    /// STA - Store Accumulator. No flags
    pub fn sta(&mut self, bus: &mut Bus, addr_result: &AddressingResult) {
        bus.write(addr_result.address, self.a);
    }

    /// STX - Store X. No flags
    pub fn stx(&mut self, bus: &mut Bus, addr_result: &AddressingResult) {
        bus.write(addr_result.address, self.x);
    }

    /// STY - Store Y. No flags
    pub fn sty(&mut self, bus: &mut Bus, addr_result: &AddressingResult) {
        bus.write(addr_result.address, self.y);
    }
}
