// Mapper 3 (CNROM) - Fixed PRG-ROM with switchable CHR-ROM
//
// Memory Layout:
// - CPU $8000-$BFFF: First 16KB of PRG-ROM
// - CPU $C000-$FFFF: Last 16KB of PRG-ROM (or mirror if only 16KB total)
// - PPU $0000-$1FFF: 8KB switchable CHR-ROM bank
//
// Bank Switching:
// - Any write to $8000-$FFFF selects the CHR-ROM bank for $0000-$1FFF
// - The value written is the bank number (folded onto the bank count)
// - Bank 0 is selected at power-on, so titles that never touch the latch
//   see exactly the first CHR block

use crate::cartridge::{Cartridge, Mapper, MapperError, Mirroring};

/// CHR-ROM bank size (8KB)
const CHR_BANK_SIZE: usize = 8 * 1024;

/// Mapper 3 implementation (CNROM)
///
/// CNROM pairs fixed PRG-ROM with switchable 8KB CHR-ROM banks.
pub struct Mapper3 {
    /// PRG-ROM data (16KB or 32KB, fixed)
    prg_rom: Vec<u8>,
    /// CHR data (one or more 8KB banks)
    chr_mem: Vec<u8>,
    /// Whether CHR memory is RAM (header declared zero CHR blocks)
    chr_is_ram: bool,
    /// Currently selected CHR bank (for $0000-$1FFF)
    chr_bank: u8,
    /// Total number of 8KB CHR banks
    chr_banks: usize,
    /// Mirroring type (fixed, cannot be changed by the mapper)
    mirroring: Mirroring,
}

impl Mapper3 {
    /// Create a new Mapper3 instance from a cartridge
    ///
    /// # Errors
    /// `InvalidConfiguration` if PRG-ROM is not 16KB or 32KB, or CHR is
    /// not a positive multiple of 8KB
    pub fn new(cartridge: Cartridge) -> Result<Self, MapperError> {
        let prg_size = cartridge.prg_rom.len();
        let chr_size = cartridge.chr_rom.len();

        if prg_size != 16 * 1024 && prg_size != 32 * 1024 {
            return Err(MapperError::InvalidConfiguration(format!(
                "CNROM requires 16KB or 32KB PRG-ROM, got {} bytes",
                prg_size
            )));
        }
        if chr_size == 0 || chr_size % CHR_BANK_SIZE != 0 {
            return Err(MapperError::InvalidConfiguration(format!(
                "CNROM requires CHR in 8KB banks, got {} bytes",
                chr_size
            )));
        }

        Ok(Mapper3 {
            prg_rom: cartridge.prg_rom,
            chr_mem: cartridge.chr_rom,
            chr_is_ram: cartridge.chr_is_ram,
            chr_bank: 0,
            chr_banks: chr_size / CHR_BANK_SIZE,
            mirroring: cartridge.mirroring,
        })
    }

    /// Map a PPU address to an offset into CHR-ROM through the bank latch
    fn map_chr_address(&self, address: u16) -> usize {
        let bank_offset = (address & 0x1FFF) as usize;
        let bank = (self.chr_bank as usize) % self.chr_banks;
        bank * CHR_BANK_SIZE + bank_offset
    }
}

impl Mapper for Mapper3 {
    fn cpu_read(&self, address: u16) -> u8 {
        match address {
            0x8000..=0xFFFF => {
                let index = (address - 0x8000) as usize;
                // Modulo folds $C000-$FFFF onto a single 16KB block
                self.prg_rom[index % self.prg_rom.len()]
            }
            _ => 0,
        }
    }

    fn cpu_write(&mut self, address: u16, value: u8) {
        if let 0x8000..=0xFFFF = address {
            self.chr_bank = value;
        }
    }

    fn ppu_read(&self, address: u16) -> u8 {
        match address {
            0x0000..=0x1FFF => self.chr_mem[self.map_chr_address(address)],
            _ => 0,
        }
    }

    fn ppu_write(&mut self, address: u16, value: u8) {
        if let 0x0000..=0x1FFF = address {
            if self.chr_is_ram {
                let index = self.map_chr_address(address);
                self.chr_mem[index] = value;
            }
            // CHR-ROM writes are silently ignored
        }
    }

    fn mirroring(&self) -> Mirroring {
        self.mirroring
    }
}
