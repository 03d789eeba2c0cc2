// Frame compositor - flushes the pixel layers to the host surface
//
// On frame flip the three layers paint into the 256x240 frame buffer in
// fixed order (backdrop, behind-background sprites, background, front
// sprites), then the frame is emitted 2x-upscaled as 512x480 RGBA pixels
// to the host's `PixelSink`. The layers are cleared afterwards.

use super::framebuffer::{FrameBuffer, SCREEN_HEIGHT, SCREEN_WIDTH};
use super::palette::palette_to_rgba;
use crate::ppu::{PixelBuf, RenderLayers};
use std::error::Error;

/// The host-provided framebuffer surface
///
/// `draw_pixel` receives output-space coordinates (512x480);
/// `present` commits the frame and may fail without stopping emulation.
pub trait PixelSink {
    fn draw_pixel(&mut self, x: u32, y: u32, rgba: [u8; 4]);
    fn present(&mut self) -> Result<(), Box<dyn Error>>;
}

/// A sink that discards everything (headless operation)
pub struct NullSink;

impl PixelSink for NullSink {
    fn draw_pixel(&mut self, _x: u32, _y: u32, _rgba: [u8; 4]) {}

    fn present(&mut self) -> Result<(), Box<dyn Error>> {
        Ok(())
    }
}

/// Composes pixel layers into frames and pushes them to the sink
pub struct Compositor {
    frame: FrameBuffer,
}

impl Compositor {
    pub fn new() -> Self {
        Compositor {
            frame: FrameBuffer::new(),
        }
    }

    /// The last composed frame, for screenshots and tests
    pub fn frame(&self) -> &FrameBuffer {
        &self.frame
    }

    /// Compose the layers over the backdrop and present the frame
    ///
    /// Layer order is bbg, bg, fg: later layers overwrite earlier ones.
    /// A sink `present` failure is logged (once, since this runs once per
    /// frame) and emulation continues; the layers are cleared either way.
    pub fn flip_display(
        &mut self,
        layers: &mut RenderLayers,
        backdrop: u8,
        sink: &mut dyn PixelSink,
    ) {
        self.frame.clear(backdrop);
        Self::paint_layer(&mut self.frame, &layers.bbg);
        Self::paint_layer(&mut self.frame, &layers.bg);
        Self::paint_layer(&mut self.frame, &layers.fg);
        layers.clear();

        for y in 0..SCREEN_HEIGHT {
            for x in 0..SCREEN_WIDTH {
                let rgba = palette_to_rgba(self.frame.get_pixel(x, y));
                let (ox, oy) = (x as u32 * 2, y as u32 * 2);
                sink.draw_pixel(ox, oy, rgba);
                sink.draw_pixel(ox + 1, oy, rgba);
                sink.draw_pixel(ox, oy + 1, rgba);
                sink.draw_pixel(ox + 1, oy + 1, rgba);
            }
        }

        if let Err(e) = sink.present() {
            log::warn!("frame present failed: {}", e);
        }
    }

    fn paint_layer(frame: &mut FrameBuffer, layer: &PixelBuf) {
        for pixel in layer.as_slice() {
            frame.set_pixel(pixel.x as usize, pixel.y as usize, pixel.color);
        }
    }
}

impl Default for Compositor {
    fn default() -> Self {
        Self::new()
    }
}
