// Common test utilities for the integration suites
//
// Builds complete iNES images in memory so the suites can exercise the
// machine end-to-end without ROM files on disk.

#![allow(dead_code)]

use famicore::cartridge::{CHR_BLOCK_SIZE, INES_HEADER_SIZE, PRG_BLOCK_SIZE};
use famicore::{Cartridge, Emulator};

/// Builder for a single-PRG-block iNES image
pub struct TestRom {
    prg: Vec<u8>,
    chr: Vec<u8>,
    flags6: u8,
    flags7: u8,
}

impl TestRom {
    /// NROM image: NOP-filled PRG, zero CHR, horizontal mirroring
    pub fn new() -> Self {
        TestRom {
            prg: vec![0xEA; PRG_BLOCK_SIZE],
            chr: vec![0; CHR_BLOCK_SIZE],
            flags6: 0,
            flags7: 0,
        }
    }

    /// Place code at a CPU address within $8000-$BFFF and point the
    /// reset vector at it
    pub fn with_program(mut self, org: u16, code: &[u8]) -> Self {
        let offset = (org - 0x8000) as usize;
        self.prg[offset..offset + code.len()].copy_from_slice(code);
        self.set_vector(0xFFFC, org)
    }

    /// Write one of the $FFFA/$FFFC/$FFFE vectors
    pub fn set_vector(mut self, vector: u16, target: u16) -> Self {
        // NROM-128 mirrors the block at $C000, so vectors live at the top
        let offset = (vector as usize - 0xC000) % PRG_BLOCK_SIZE;
        self.prg[offset] = (target & 0xFF) as u8;
        self.prg[offset + 1] = (target >> 8) as u8;
        self
    }

    /// Replace the CHR block
    pub fn with_chr(mut self, chr: Vec<u8>) -> Self {
        assert_eq!(chr.len(), CHR_BLOCK_SIZE);
        self.chr = chr;
        self
    }

    /// Set vertical mirroring (default horizontal)
    pub fn vertical_mirroring(mut self) -> Self {
        self.flags6 |= 0x01;
        self
    }

    /// Serialize to iNES bytes
    pub fn build_bytes(&self) -> Vec<u8> {
        let mut image = vec![0u8; INES_HEADER_SIZE];
        image[0..4].copy_from_slice(b"NES\x1A");
        image[4] = 1;
        image[5] = 1;
        image[6] = self.flags6;
        image[7] = self.flags7;
        image.extend_from_slice(&self.prg);
        image.extend_from_slice(&self.chr);
        image
    }

    /// Parse into a cartridge
    pub fn build_cartridge(&self) -> Cartridge {
        Cartridge::from_ines_bytes(&self.build_bytes()).expect("test ROM must parse")
    }

    /// Boot an emulator with this image attached
    pub fn boot(&self) -> Emulator {
        let mut emulator = Emulator::new();
        emulator
            .attach_cartridge(self.build_cartridge())
            .expect("test ROM must attach");
        emulator
    }
}

impl Default for TestRom {
    fn default() -> Self {
        Self::new()
    }
}

/// A CHR block whose tile 1 is solid colour 1
pub fn chr_with_solid_tile1() -> Vec<u8> {
    let mut chr = vec![0u8; CHR_BLOCK_SIZE];
    for row in 0..8 {
        chr[16 + row] = 0xFF;
    }
    chr
}

/// Step whole frames until the PPU warm-up gate opens
pub fn warm_up(emulator: &mut Emulator) {
    while !emulator.bus().ppu().is_ready() {
        emulator.step_scanline();
    }
    // Finish the frame so the next one starts at the pre-render line
    while !emulator.step_scanline() {}
}
