// Emulator module - the machine coordinator and scheduler
//
// Owns the CPU, bus (with PPU, input latch, and cartridge behind it),
// frame compositor, and keyboard handler, and interleaves them:
//
// 1. Run CPU instructions until ~113 cycles (plus any OAM-DMA stall)
//    have elapsed.
// 2. Step the PPU one scanline; forward a raised NMI to the CPU.
// 3. On the frame wrap, refresh the joypad from the keyboard handler and
//    flush the pixel layers to the host's sink.
//
// Everything inside a frame is cycle-driven; only frame pacing (in the
// binary) consults the wall clock.

mod config;
mod recent_roms;
mod screenshot;

pub use config::EmulatorConfig;
pub use recent_roms::RecentRomsList;
pub use screenshot::{save_screenshot, ScreenshotError};

use crate::bus::Bus;
use crate::cartridge::Cartridge;
use crate::cpu::Cpu;
use crate::display::{Compositor, PixelSink};
use crate::input::{KeyboardHandler, KeyboardQueue};
use crate::ppu::ScanlineEvent;
use std::path::{Path, PathBuf};

/// CPU cycles per scanline (21.477 MHz master clock / 12 / 341 dots x 3)
pub const CPU_CYCLES_PER_SCANLINE: u64 = 113;

/// The emulated machine
pub struct Emulator {
    /// 6502 interpreter
    cpu: Cpu,

    /// Memory bus (work RAM, PPU, joypads, cartridge)
    bus: Bus,

    /// Pixel-layer compositor feeding the host sink
    compositor: Compositor,

    /// Scancode-to-joypad mapping with synthetic key holds
    keyboard: KeyboardHandler,

    /// Configuration (persisted as TOML)
    config: EmulatorConfig,

    /// Currently loaded ROM path
    rom_path: Option<PathBuf>,

    /// Cycle credit carried between scanline slices
    cycle_debt: u64,
}

impl Emulator {
    /// Create a machine with no cartridge loaded
    pub fn new() -> Self {
        Emulator {
            cpu: Cpu::new(),
            bus: Bus::new(),
            compositor: Compositor::new(),
            keyboard: KeyboardHandler::new(),
            config: EmulatorConfig::load_or_default(),
            rom_path: None,
            cycle_debt: 0,
        }
    }

    /// Load an iNES ROM from disk and reset the machine
    ///
    /// On success the ROM lands in the recent list and the CPU starts
    /// from the cartridge's reset vector.
    pub fn load_rom<P: AsRef<Path>>(&mut self, path: P) -> Result<(), Box<dyn std::error::Error>> {
        let path = path.as_ref();
        let cartridge = Cartridge::from_ines_file(path)?;
        self.attach_cartridge(cartridge)?;
        self.rom_path = Some(path.to_path_buf());

        let mut recent = RecentRomsList::load_or_default();
        recent.add(path);
        if let Err(e) = recent.save() {
            log::debug!("recent ROM list not saved: {}", e);
        }
        Ok(())
    }

    /// Attach an already-parsed cartridge and reset (in-memory loading)
    pub fn attach_cartridge(
        &mut self,
        cartridge: Cartridge,
    ) -> Result<(), Box<dyn std::error::Error>> {
        self.bus.attach_cartridge(cartridge)?;
        self.reset();
        Ok(())
    }

    /// Reset the machine: RAM/PPU/input cleared, PC from $FFFC/$FFFD
    pub fn reset(&mut self) {
        self.bus.reset();
        self.cpu.reset(&mut self.bus);
        self.cycle_debt = 0;
    }

    /// Run one scanline slice: CPU budget, then one PPU scanline
    ///
    /// Returns true when this step completed a frame.
    pub fn step_scanline(&mut self) -> bool {
        let budget = CPU_CYCLES_PER_SCANLINE;
        let mut spent = self.cycle_debt;
        while spent < budget {
            spent += self.cpu.step(&mut self.bus) as u64;
            // An OAM-DMA burst halts the CPU; bill its stall here
            let stall = self.bus.take_dma_stall();
            spent += stall;
            self.cpu.cycles = self.cpu.cycles.wrapping_add(stall);
        }
        self.cycle_debt = spent - budget;

        let event = self.bus.ppu_mut().step_scanline();
        let frame_done = matches!(event, ScanlineEvent::FrameComplete);
        if let ScanlineEvent::VblankStart { nmi: true } = event {
            self.cpu.nmi(&mut self.bus);
        }
        // A PPUCTRL write during VBlank can re-arm the interrupt
        if self.bus.ppu_mut().take_nmi() {
            self.cpu.nmi(&mut self.bus);
        }
        frame_done
    }

    /// Run a whole frame and flip it to the sink
    pub fn run_frame(&mut self, sink: &mut dyn PixelSink) {
        while !self.step_scanline() {}
        self.flip_display(sink);
    }

    /// Refresh the joypad from the keyboard and present the frame
    fn flip_display(&mut self, sink: &mut dyn PixelSink) {
        let pad = self.keyboard.refresh();
        self.bus.controllers_mut().set_joypad1(pad);

        let backdrop = self.bus.ppu().backdrop_color();
        self.compositor
            .flip_display(self.bus.ppu_mut().layers_mut(), backdrop, sink);
    }

    /// Save the last composed frame as a PNG screenshot
    pub fn screenshot(&self) -> Result<PathBuf, ScreenshotError> {
        save_screenshot(
            self.compositor.frame().as_slice(),
            self.rom_path.as_deref(),
            &self.config,
        )
    }

    /// Thread-safe scancode inlet for the host's input source
    pub fn keyboard_queue(&self) -> KeyboardQueue {
        self.keyboard.queue()
    }

    /// Currently loaded ROM path
    pub fn rom_path(&self) -> Option<&Path> {
        self.rom_path.as_deref()
    }

    pub fn cpu(&self) -> &Cpu {
        &self.cpu
    }

    pub fn cpu_mut(&mut self) -> &mut Cpu {
        &mut self.cpu
    }

    pub fn bus(&self) -> &Bus {
        &self.bus
    }

    pub fn bus_mut(&mut self) -> &mut Bus {
        &mut self.bus
    }

    pub fn config(&self) -> &EmulatorConfig {
        &self.config
    }

    pub fn compositor(&self) -> &Compositor {
        &self.compositor
    }
}

impl Default for Emulator {
    fn default() -> Self {
        Self::new()
    }
}
