// famicore - NES emulation core
//
// A 6502 interpreter, memory bus with NROM/CNROM mappers, scanline PPU,
// and joypad/OAM-DMA plumbing, coordinated by a cycle-driven scheduler.
// The host supplies the display surface (`display::PixelSink`) and feeds
// keyboard scancodes through `input::KeyboardQueue`.

// Public modules
pub mod bus;
pub mod cartridge;
pub mod cpu;
pub mod display;
pub mod emulator;
pub mod input;
pub mod ppu;
pub mod ram;

// Re-export main types for convenience
pub use bus::Bus;
pub use cartridge::{Cartridge, INesError, INesHeader, Mapper, MapperError, Mirroring};
pub use cpu::Cpu;
pub use display::{Compositor, FrameBuffer, NullSink, PixelSink, NES_PALETTE};
pub use emulator::{Emulator, EmulatorConfig, RecentRomsList, ScreenshotError};
pub use input::{Controller, ControllerIO, KeyboardHandler, KeyboardQueue};
pub use ppu::{Ppu, ScanlineEvent};
pub use ram::Ram;
