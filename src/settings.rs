//! Player settings and preferences
//!
//! Persisted as a small JSON file next to the game, separate from balance
//! tuning. A missing or corrupt file is never fatal.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::input::KeyBindings;

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Physical key names for each logical key
    pub bindings: KeyBindings,

    // === HUD ===
    /// Show score and lives while playing
    pub show_hud: bool,

    // === Generated levels ===
    /// Seed for generated levels (None = pick one per run)
    pub seed: Option<u64>,
    /// Large asteroids in a generated level
    pub asteroid_count: usize,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            bindings: KeyBindings::default(),
            show_hud: true,
            seed: None,
            asteroid_count: 4,
        }
    }
}

impl Settings {
    /// Default settings file name
    pub const FILE_NAME: &'static str = "planetoids_settings.json";

    /// Load settings, falling back to defaults on any problem
    pub fn load(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        match std::fs::read_to_string(path) {
            Ok(json) => match serde_json::from_str(&json) {
                Ok(settings) => {
                    log::info!("Loaded settings from {}", path.display());
                    settings
                }
                Err(e) => {
                    log::warn!("Ignoring corrupt settings file {}: {}", path.display(), e);
                    Self::default()
                }
            },
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                log::info!("Using default settings");
                Self::default()
            }
            Err(e) => {
                log::warn!("Could not read settings file {}: {}", path.display(), e);
                Self::default()
            }
        }
    }

    /// Write settings as pretty JSON
    pub fn save(&self, path: impl AsRef<Path>) -> std::io::Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path.as_ref(), json)?;
        log::info!("Settings saved");
        Ok(())
    }
}
