// Shift and rotate instructions
//
// Each operates either on the accumulator or on memory, selected by the
// decoded addressing mode. C receives the shifted-out bit; ROL/ROR feed
// the old carry into the vacated bit.

use crate::bus::Bus;
use crate::cpu::addressing::AddressingResult;
use crate::cpu::Cpu;

impl Cpu {
    /// ASL - Arithmetic shift left. Flags: C, Z, N
    pub fn asl(&mut self, bus: &mut Bus, addr_result: &AddressingResult, accumulator: bool) {
        let value = self.shift_input(bus, addr_result, accumulator);
        self.set_carry(value & 0x80 != 0);
        let result = value << 1;
        self.shift_output(bus, addr_result, accumulator, result);
    }

    /// LSR - Logical shift right. Flags: C, Z, N (N always clear)
    pub fn lsr(&mut self, bus: &mut Bus, addr_result: &AddressingResult, accumulator: bool) {
        let value = self.shift_input(bus, addr_result, accumulator);
        self.set_carry(value & 0x01 != 0);
        let result = value >> 1;
        self.shift_output(bus, addr_result, accumulator, result);
    }

    /// ROL - Rotate left through carry. Flags: C, Z, N
    pub fn rol(&mut self, bus: &mut Bus, addr_result: &AddressingResult, accumulator: bool) {
        let value = self.shift_input(bus, addr_result, accumulator);
        let carry_in = self.get_carry() as u8;
        self.set_carry(value & 0x80 != 0);
        let result = (value << 1) | carry_in;
        self.shift_output(bus, addr_result, accumulator, result);
    }

    /// ROR - Rotate right through carry. Flags: C, Z, N
    pub fn ror(&mut self, bus: &mut Bus, addr_result: &AddressingResult, accumulator: bool) {
        let value = self.shift_input(bus, addr_result, accumulator);
        let carry_in = (self.get_carry() as u8) << 7;
        self.set_carry(value & 0x01 != 0);
        let result = (value >> 1) | carry_in;
        self.shift_output(bus, addr_result, accumulator, result);
    }

    #[inline]
    fn shift_input(&self, bus: &mut Bus, addr_result: &AddressingResult, accumulator: bool) -> u8 {
        if accumulator {
            self.a
        } else {
            bus.read(addr_result.address)
        }
    }

    #[inline]
    fn shift_output(
        &mut self,
        bus: &mut Bus,
        addr_result: &AddressingResult,
        accumulator: bool,
        result: u8,
    ) {
        if accumulator {
            self.a = result;
        } else {
            bus.write(addr_result.address, result);
        }
        self.update_zero_and_negative_flags(result);
    }
}
