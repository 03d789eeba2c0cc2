// Configuration management
//
// Emulator settings persisted as TOML next to the binary, loaded with a
// load-or-default policy.

use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::PathBuf;

/// Default configuration file path
const CONFIG_FILE: &str = "famicore.toml";

/// Emulator configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmulatorConfig {
    /// Video settings
    pub video: VideoConfig,

    /// Screenshot settings
    pub screenshot: ScreenshotConfig,
}

/// Video configuration
///
/// The core renders at a fixed 512x480; scale and vsync are hints for
/// the host's display surface.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VideoConfig {
    /// Window scale factor the host should apply
    pub scale: u32,

    /// Target frame rate (60 for NTSC)
    pub fps: u32,

    /// Whether the host should enable VSync
    pub vsync: bool,
}

/// Screenshot configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScreenshotConfig {
    /// Base directory for screenshots
    pub directory: PathBuf,

    /// Include a timestamp in the filename
    pub include_timestamp: bool,
}

impl Default for EmulatorConfig {
    fn default() -> Self {
        EmulatorConfig {
            video: VideoConfig {
                scale: 2,
                fps: 60,
                vsync: true,
            },
            screenshot: ScreenshotConfig {
                directory: PathBuf::from("screenshots"),
                include_timestamp: true,
            },
        }
    }
}

impl EmulatorConfig {
    /// Load the configuration file, falling back to defaults
    pub fn load_or_default() -> Self {
        Self::load().unwrap_or_default()
    }

    /// Load the configuration from `famicore.toml`
    pub fn load() -> Result<Self, io::Error> {
        let contents = fs::read_to_string(CONFIG_FILE)?;
        toml::from_str(&contents).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
    }

    /// Save the configuration to `famicore.toml`
    pub fn save(&self) -> Result<(), io::Error> {
        let contents = toml::to_string_pretty(self)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
        fs::write(CONFIG_FILE, contents)
    }
}
