// Mapper 0 (NROM) - The simplest NES mapper with no bank switching
//
// Memory Layout:
// - CPU $8000-$BFFF: First 16KB of PRG-ROM
// - CPU $C000-$FFFF: Last 16KB of PRG-ROM (or mirror of first 16KB if only 16KB total)
// - PPU $0000-$1FFF: 8KB CHR-ROM or CHR-RAM
//
// Variants:
// - NROM-128: 16KB PRG-ROM (mirrored to fill 32KB space)
// - NROM-256: 32KB PRG-ROM (no mirroring)

use crate::cartridge::{Cartridge, Mapper, MapperError, Mirroring};

/// Mapper 0 implementation (NROM)
///
/// Used by launch-era titles with fixed memory layout. It has no bank
/// switching capability.
pub struct Mapper0 {
    /// PRG-ROM data (16KB or 32KB)
    prg_rom: Vec<u8>,
    /// CHR-ROM or CHR-RAM data (8KB)
    chr_mem: Vec<u8>,
    /// Whether CHR memory is RAM (writable) or ROM (read-only)
    chr_is_ram: bool,
    /// Mirroring type (fixed, cannot be changed by the mapper)
    mirroring: Mirroring,
}

impl Mapper0 {
    /// Create a new Mapper0 instance from a cartridge
    ///
    /// # Errors
    /// `InvalidConfiguration` if PRG-ROM is not 16KB or 32KB, or CHR is not 8KB
    pub fn new(cartridge: Cartridge) -> Result<Self, MapperError> {
        let prg_size = cartridge.prg_rom.len();
        if prg_size != 16 * 1024 && prg_size != 32 * 1024 {
            return Err(MapperError::InvalidConfiguration(format!(
                "NROM requires 16KB or 32KB PRG-ROM, got {} bytes",
                prg_size
            )));
        }
        if cartridge.chr_rom.len() != 8 * 1024 {
            return Err(MapperError::InvalidConfiguration(format!(
                "NROM requires 8KB CHR, got {} bytes",
                cartridge.chr_rom.len()
            )));
        }

        Ok(Mapper0 {
            prg_rom: cartridge.prg_rom,
            chr_mem: cartridge.chr_rom,
            chr_is_ram: cartridge.chr_is_ram,
            mirroring: cartridge.mirroring,
        })
    }
}

impl Mapper for Mapper0 {
    /// $8000-$BFFF maps the first block; $C000-$FFFF mirrors it for 16KB ROMs
    fn cpu_read(&self, address: u16) -> u8 {
        match address {
            0x8000..=0xFFFF => {
                let index = (address - 0x8000) as usize;
                // Modulo folds $C000-$FFFF onto the single block of NROM-128
                self.prg_rom[index % self.prg_rom.len()]
            }
            _ => 0,
        }
    }

    fn cpu_write(&mut self, _address: u16, _value: u8) {
        // NROM has no board registers; PRG writes are ignored
    }

    fn ppu_read(&self, address: u16) -> u8 {
        match address {
            0x0000..=0x1FFF => self.chr_mem[address as usize],
            _ => 0,
        }
    }

    fn ppu_write(&mut self, address: u16, value: u8) {
        if let 0x0000..=0x1FFF = address {
            if self.chr_is_ram {
                self.chr_mem[address as usize] = value;
            }
            // CHR-ROM writes are silently ignored
        }
    }

    fn mirroring(&self) -> Mirroring {
        self.mirroring
    }
}
