// PPU memory access - VRAM address normalization and mirroring

use super::constants::NAMETABLE_SIZE;
use super::Ppu;
use crate::cartridge::Mirroring;

impl Ppu {
    /// Map a nametable address to physical VRAM
    ///
    /// The address space exposes four nametables at $2000-$2FFF but only
    /// 2KB exists; the cartridge's mirroring arrangement decides which
    /// logical tables share storage.
    ///
    /// # Arguments
    /// * `addr` - Nametable address ($2000-$2FFF)
    ///
    /// # Returns
    /// Physical VRAM offset (0-2047)
    pub(crate) fn mirror_nametable_addr(&self, addr: u16) -> usize {
        let addr = (addr & 0x0FFF) as usize;
        let table = addr / NAMETABLE_SIZE;
        let offset = addr % NAMETABLE_SIZE;

        let physical_table = match self.mirroring {
            // Horizontal: $2000=$2400, $2800=$2C00
            Mirroring::Horizontal => match table {
                0 | 1 => 0,
                _ => 1,
            },
            // Vertical: $2000=$2800, $2400=$2C00
            Mirroring::Vertical => match table {
                0 | 2 => 0,
                _ => 1,
            },
        };

        physical_table * NAMETABLE_SIZE + offset
    }

    /// Map a palette address to physical palette RAM
    ///
    /// $3F10/$3F14/$3F18/$3F1C alias $3F00/$3F04/$3F08/$3F0C: entry 0 of
    /// each sprite palette is the shared backdrop colour.
    ///
    /// # Arguments
    /// * `addr` - Palette address ($3F00-$3FFF)
    ///
    /// # Returns
    /// Physical palette RAM offset (0-31)
    pub(crate) fn mirror_palette_addr(&self, addr: u16) -> usize {
        let addr = (addr & 0x001F) as usize;
        if addr >= 16 && addr % 4 == 0 {
            addr - 16
        } else {
            addr
        }
    }

    /// Read a byte of PPU memory through the address normalizer
    ///
    /// - $0000-$1FFF: pattern tables, via the cartridge mapper
    /// - $2000-$2FFF: nametables, mirrored per cartridge
    /// - $3000-$3EFF: aliases $2000-$2EFF
    /// - $3F00-$3FFF: palette RAM with the sprite-entry-0 aliases
    pub(crate) fn read_vram(&self, addr: u16) -> u8 {
        let addr = addr & 0x3FFF;
        match addr {
            0x0000..=0x1FFF => match &self.mapper {
                Some(mapper) => mapper.borrow().ppu_read(addr),
                None => 0,
            },
            0x2000..=0x2FFF => self.nametables[self.mirror_nametable_addr(addr)],
            0x3000..=0x3EFF => self.nametables[self.mirror_nametable_addr(addr - 0x1000)],
            0x3F00..=0x3FFF => self.palette_ram[self.mirror_palette_addr(addr)],
            _ => unreachable!(),
        }
    }

    /// Write a byte of PPU memory through the address normalizer
    pub(crate) fn write_vram(&mut self, addr: u16, data: u8) {
        let addr = addr & 0x3FFF;
        match addr {
            0x0000..=0x1FFF => {
                if let Some(mapper) = &self.mapper {
                    mapper.borrow_mut().ppu_write(addr, data);
                }
            }
            0x2000..=0x2FFF => {
                let physical = self.mirror_nametable_addr(addr);
                self.nametables[physical] = data;
            }
            0x3000..=0x3EFF => {
                let physical = self.mirror_nametable_addr(addr - 0x1000);
                self.nametables[physical] = data;
            }
            0x3F00..=0x3FFF => {
                let physical = self.mirror_palette_addr(addr);
                self.palette_ram[physical] = data;
            }
            _ => unreachable!(),
        }
    }
}
