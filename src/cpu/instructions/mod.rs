// Instruction implementations for the 6502 CPU
//
// One file per instruction family. Every method takes the addressing
// result already produced by `Cpu::step`; branch and control-flow
// methods return the extra cycles they consumed.

mod arithmetic;
mod branch;
mod compare;
mod flags;
mod jump_subroutine;
mod load_store;
mod logic;
mod miscellaneous;
mod shift_rotate;
mod stack;
mod transfer;

use crate::bus::Bus;
use crate::cpu::addressing::AddressingResult;
use crate::cpu::Cpu;

impl Cpu {
    /// Fetch the operand byte: the immediate value when the mode carries
    /// one, otherwise a bus read from the effective address
    #[inline]
    pub(crate) fn read_operand(&self, bus: &mut Bus, addr_result: &AddressingResult) -> u8 {
        match addr_result.value {
            Some(value) => value,
            None => bus.read(addr_result.address),
        }
    }
}
