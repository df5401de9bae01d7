//! Configuration module for BagPilot
//!
//! This module handles operator state that outlives a session:
//! - Recently opened bags and the last-used open/save directories
//! - Default playback settings applied to new sessions
//!
//! # App Data Location
//!
//! Application data is stored in the platform-appropriate location:
//! - **Linux**: `~/.local/share/dev.hxyulin.bagpilot/`
//! - **macOS**: `~/Library/Application Support/dev.hxyulin.bagpilot/`
//! - **Windows**: `%APPDATA%\dev.hxyulin.bagpilot\`
//!
//! # Example
//!
//! ```ignore
//! use bagpilot::config::AppState;
//!
//! let mut state = AppState::load_or_default();
//! state.add_recent_bag("/data/run42.bag", 14);
//! state.save()?;
//! ```

pub mod settings;

pub use settings::*;

use crate::error::{BagPilotError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Application identifier for data directories
pub const APP_ID: &str = "dev.hxyulin.bagpilot";

/// App state filename
pub const APP_STATE_FILE: &str = "app_state.json";

/// Maximum number of recent bags to remember
pub const MAX_RECENT_BAGS: usize = 10;

/// Default interval between topic-discovery polls in milliseconds
pub const DEFAULT_DISCOVERY_INTERVAL_MS: u64 = 10;

// ==================== App Data Directory ====================

/// Get the application data directory path
pub fn app_data_dir() -> Option<PathBuf> {
    dirs_next::data_dir().map(|p| p.join(APP_ID))
}

/// Ensure the app data directory exists
pub fn ensure_app_data_dir() -> Result<PathBuf> {
    let dir = app_data_dir().ok_or_else(|| {
        BagPilotError::Config("Could not determine app data directory".to_string())
    })?;

    if !dir.exists() {
        std::fs::create_dir_all(&dir).map_err(|e| {
            BagPilotError::Config(format!("Failed to create app data directory: {}", e))
        })?;
    }

    Ok(dir)
}

/// Get the path to the app state file
pub fn app_state_path() -> Option<PathBuf> {
    app_data_dir().map(|p| p.join(APP_STATE_FILE))
}

// ==================== Recent Bag Entry ====================

/// Information about a recently opened bag
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecentBag {
    /// Path to the bag file
    pub path: PathBuf,

    /// File name shown in menus
    pub name: String,

    /// Last opened timestamp (Unix seconds)
    pub last_opened: i64,

    /// Number of topics the bag held when last opened
    pub topic_count: usize,
}

impl RecentBag {
    /// Create a new recent bag entry for `path`
    pub fn new(path: impl Into<PathBuf>, topic_count: usize) -> Self {
        let path = path.into();
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());

        Self {
            path,
            name,
            last_opened: chrono::Utc::now().timestamp(),
            topic_count,
        }
    }

    /// Update the last opened timestamp
    pub fn touch(&mut self) {
        self.last_opened = chrono::Utc::now().timestamp();
    }

    /// Check if the bag file still exists
    pub fn exists(&self) -> bool {
        self.path.exists()
    }
}

// ==================== App State ====================

/// Persistent application state
///
/// Stores operator history and preferences that persist across sessions.
/// The last-used directories feed the front-end's file dialogs, replacing
/// the remembered-directory behavior a desktop shell would otherwise keep
/// in widget statics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppState {
    /// Version for future migration support
    #[serde(default = "default_app_state_version")]
    pub version: u32,

    /// Recently opened bags, most recent first
    #[serde(default)]
    pub recent_bags: Vec<RecentBag>,

    /// Path of the last opened bag
    #[serde(default)]
    pub last_bag_path: Option<PathBuf>,

    /// Directory the open dialog should start in
    #[serde(default)]
    pub last_open_dir: Option<PathBuf>,

    /// Directory the save dialog should start in
    #[serde(default)]
    pub last_save_dir: Option<PathBuf>,

    /// Playback settings applied to a freshly constructed session
    #[serde(default)]
    pub playback_defaults: PlaybackConfig,
}

fn default_app_state_version() -> u32 {
    1
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            version: 1,
            recent_bags: Vec::new(),
            last_bag_path: None,
            last_open_dir: None,
            last_save_dir: None,
            playback_defaults: PlaybackConfig::default(),
        }
    }
}

impl AppState {
    /// Load app state from the default location
    pub fn load() -> Result<Self> {
        let path = app_state_path().ok_or_else(|| {
            BagPilotError::Config("Could not determine app state path".to_string())
        })?;
        Self::load_from(&path)
    }

    /// Load app state from an explicit path
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)
            .map_err(|e| BagPilotError::Config(format!("Failed to read app state: {}", e)))?;

        serde_json::from_str(&content)
            .map_err(|e| BagPilotError::Config(format!("Failed to parse app state: {}", e)))
    }

    /// Load app state, returning defaults on any error
    pub fn load_or_default() -> Self {
        Self::load().unwrap_or_else(|e| {
            tracing::warn!("Failed to load app state, using defaults: {}", e);
            Self::default()
        })
    }

    /// Save app state to the default location
    pub fn save(&self) -> Result<()> {
        let dir = ensure_app_data_dir()?;
        self.save_to(&dir.join(APP_STATE_FILE))
    }

    /// Save app state to an explicit path
    pub fn save_to(&self, path: &Path) -> Result<()> {
        let content = serde_json::to_string_pretty(self)
            .map_err(|e| BagPilotError::Config(format!("Failed to serialize app state: {}", e)))?;

        std::fs::write(path, content)
            .map_err(|e| BagPilotError::Config(format!("Failed to write app state: {}", e)))
    }

    /// Add or refresh a recent bag entry
    pub fn add_recent_bag(&mut self, path: impl AsRef<Path>, topic_count: usize) {
        let path = path.as_ref().to_path_buf();

        // Remove existing entry for this path
        self.recent_bags.retain(|b| b.path != path);

        self.recent_bags
            .insert(0, RecentBag::new(path.clone(), topic_count));
        self.recent_bags.truncate(MAX_RECENT_BAGS);

        if let Some(parent) = path.parent() {
            self.last_open_dir = Some(parent.to_path_buf());
        }
        self.last_bag_path = Some(path);
    }

    /// Remember the directory a bag was saved into
    pub fn note_save_path(&mut self, path: impl AsRef<Path>) {
        if let Some(parent) = path.as_ref().parent() {
            self.last_save_dir = Some(parent.to_path_buf());
        }
    }

    /// Remove a bag from recents (e.g., if the file was deleted)
    pub fn remove_recent_bag(&mut self, path: impl AsRef<Path>) {
        let path = path.as_ref();
        self.recent_bags.retain(|b| b.path != path);

        if self.last_bag_path.as_deref() == Some(path) {
            self.last_bag_path = None;
        }
    }

    /// Clean up recent bags that no longer exist on disk
    pub fn cleanup_missing_bags(&mut self) {
        self.recent_bags.retain(|b| b.exists());

        if let Some(ref last) = self.last_bag_path {
            if !last.exists() {
                self.last_bag_path = None;
            }
        }
    }

    /// Most recent bag path, if the file still exists
    pub fn get_last_bag(&self) -> Option<&Path> {
        self.last_bag_path
            .as_ref()
            .filter(|p| p.exists())
            .map(|p| p.as_path())
    }
}

// ==================== Tests ====================
