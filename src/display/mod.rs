// Display module - palette, frame storage, and the layer compositor
//
// The core renders into palette-indexed pixel layers; this module turns
// them into RGBA output for whatever surface the host provides through
// the `PixelSink` trait.

mod compositor;
mod framebuffer;
pub mod palette;

pub use compositor::{Compositor, NullSink, PixelSink};
pub use framebuffer::{FrameBuffer, SCREEN_HEIGHT, SCREEN_WIDTH};
pub use palette::{palette_to_rgb, palette_to_rgba, NES_PALETTE};

/// Output width after the 2x upscale
pub const OUTPUT_WIDTH: u32 = SCREEN_WIDTH as u32 * 2;

/// Output height after the 2x upscale
pub const OUTPUT_HEIGHT: u32 = SCREEN_HEIGHT as u32 * 2;
