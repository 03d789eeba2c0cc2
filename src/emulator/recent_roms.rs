// Recent ROMs list management
//
// JSON-persisted most-recently-used list, refreshed on every successful
// ROM load.

use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Default recent ROMs file path
const RECENT_ROMS_FILE: &str = "recent_roms.json";

/// Maximum number of entries kept
const MAX_RECENT_ROMS: usize = 10;

/// Entry for a recently opened ROM
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecentRomEntry {
    /// Path to the ROM file
    pub path: PathBuf,

    /// Last accessed timestamp (RFC 3339)
    pub last_accessed: String,

    /// Display name (file stem)
    pub display_name: String,
}

/// Most-recently-used ROM list
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RecentRomsList {
    roms: Vec<RecentRomEntry>,
}

impl RecentRomsList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load the list, or start empty if the file is missing or invalid
    pub fn load_or_default() -> Self {
        Self::load().unwrap_or_default()
    }

    /// Load the list from `recent_roms.json`
    pub fn load() -> Result<Self, io::Error> {
        let contents = fs::read_to_string(RECENT_ROMS_FILE)?;
        serde_json::from_str(&contents).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
    }

    /// Save the list to `recent_roms.json`
    pub fn save(&self) -> Result<(), io::Error> {
        let contents = serde_json::to_string_pretty(self)?;
        fs::write(RECENT_ROMS_FILE, contents)
    }

    /// Add a ROM at the front, deduplicating and trimming to the cap
    pub fn add<P: AsRef<Path>>(&mut self, path: P) {
        let path = path.as_ref();
        self.roms.retain(|entry| entry.path != path);

        let display_name = path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("Unknown")
            .to_string();

        self.roms.insert(
            0,
            RecentRomEntry {
                path: path.to_path_buf(),
                last_accessed: chrono::Local::now().to_rfc3339(),
                display_name,
            },
        );
        self.roms.truncate(MAX_RECENT_ROMS);
    }

    /// The entries, most recent first
    pub fn entries(&self) -> &[RecentRomEntry] {
        &self.roms
    }

    pub fn is_empty(&self) -> bool {
        self.roms.is_empty()
    }
}
