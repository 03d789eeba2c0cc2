// Screenshot functionality
//
// Dumps the last composed frame (256x240 palette indices) as an RGB PNG.

use super::config::EmulatorConfig;
use crate::display::{palette_to_rgb, SCREEN_HEIGHT, SCREEN_WIDTH};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Errors that can occur during screenshot operations
#[derive(Debug)]
pub enum ScreenshotError {
    /// I/O error
    Io(io::Error),

    /// PNG encoding error
    PngEncoding(png::EncodingError),
}

impl std::fmt::Display for ScreenshotError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ScreenshotError::Io(e) => write!(f, "I/O error: {}", e),
            ScreenshotError::PngEncoding(e) => write!(f, "PNG encoding error: {}", e),
        }
    }
}

impl std::error::Error for ScreenshotError {}

impl From<io::Error> for ScreenshotError {
    fn from(e: io::Error) -> Self {
        ScreenshotError::Io(e)
    }
}

impl From<png::EncodingError> for ScreenshotError {
    fn from(e: png::EncodingError) -> Self {
        ScreenshotError::PngEncoding(e)
    }
}

/// Save a frame of palette indices as a PNG screenshot
///
/// Screenshots land in a per-ROM subdirectory of the configured base,
/// with an optional timestamp in the filename.
pub fn save_screenshot(
    frame: &[u8],
    rom_path: Option<&Path>,
    config: &EmulatorConfig,
) -> Result<PathBuf, ScreenshotError> {
    let directory = screenshot_directory(rom_path, config);
    fs::create_dir_all(&directory)?;

    let filename = if config.screenshot.include_timestamp {
        format!(
            "screenshot_{}.png",
            chrono::Local::now().format("%Y%m%d_%H%M%S")
        )
    } else {
        "screenshot.png".to_string()
    };
    let file_path = directory.join(filename);

    let rgb = frame_to_rgb(frame);
    write_png(&file_path, &rgb, SCREEN_WIDTH as u32, SCREEN_HEIGHT as u32)?;
    Ok(file_path)
}

/// Per-ROM screenshot directory under the configured base
fn screenshot_directory(rom_path: Option<&Path>, config: &EmulatorConfig) -> PathBuf {
    let base = config.screenshot.directory.clone();
    match rom_path.and_then(|p| p.file_stem()) {
        Some(stem) => base.join(stem),
        None => base.join("default"),
    }
}

/// Expand palette indices to packed RGB888
fn frame_to_rgb(frame: &[u8]) -> Vec<u8> {
    let mut rgb = Vec::with_capacity(frame.len() * 3);
    for &index in frame {
        let color = palette_to_rgb(index);
        rgb.push((color >> 16) as u8);
        rgb.push((color >> 8) as u8);
        rgb.push(color as u8);
    }
    rgb
}

fn write_png(path: &Path, data: &[u8], width: u32, height: u32) -> Result<(), ScreenshotError> {
    let file = fs::File::create(path)?;
    let writer = io::BufWriter::new(file);

    let mut encoder = png::Encoder::new(writer, width, height);
    encoder.set_color(png::ColorType::Rgb);
    encoder.set_depth(png::BitDepth::Eight);

    let mut png_writer = encoder.write_header()?;
    png_writer.write_image_data(data)?;
    Ok(())
}
