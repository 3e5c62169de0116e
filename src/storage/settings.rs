//! Settings storage
//!
//! Persists the session configuration: which hardware profile is active, the
//! user's custom profile, and whether results are filtered to compatible
//! models.

use crate::hardware::registry::find_profile;
use crate::storage::{get_data_dir, StorageError};
use crate::types::hardware::{HardwareProfile, CUSTOM_PROFILE_NAME};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Saved session configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// Name of the active registry profile, or "Custom"
    #[serde(default = "default_active_profile")]
    pub active_profile: String,
    /// The edited profile, used when `active_profile` is "Custom"
    #[serde(default)]
    pub custom_profile: Option<HardwareProfile>,
    /// Only list models that pass the compatibility check
    #[serde(default)]
    pub filter_compatible: bool,
}

fn default_active_profile() -> String {
    CUSTOM_PROFILE_NAME.to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            active_profile: default_active_profile(),
            custom_profile: None,
            filter_compatible: false,
        }
    }
}

impl Settings {
    /// Repair values that no longer make sense
    ///
    /// Unknown profile names fall back to "Custom"; negative capacities on the
    /// custom profile are clamped to zero.
    pub fn validate(&mut self) {
        if find_profile(&self.active_profile).is_none() {
            tracing::warn!(
                "Unknown hardware profile '{}', falling back to {}",
                self.active_profile,
                CUSTOM_PROFILE_NAME
            );
            self.active_profile = default_active_profile();
        }

        if let Some(custom) = self.custom_profile.as_mut() {
            custom.total_ram_gb = custom.total_ram_gb.max(0.0);
            custom.gpu_memory_gb = custom.gpu_memory_gb.max(0.0);
            custom.name = CUSTOM_PROFILE_NAME.to_string();
            custom.is_custom = true;
        }
    }
}

/// Get the settings file path
fn get_settings_path() -> Result<PathBuf, StorageError> {
    Ok(get_data_dir()?.join("settings.json"))
}

/// Load settings from the data directory
///
/// Returns default settings if the file doesn't exist or is corrupted
pub fn load_settings() -> Settings {
    match get_settings_path().and_then(|path| load_settings_from(&path)) {
        Ok(settings) => settings,
        Err(e) => {
            tracing::warn!("Failed to load settings, using defaults: {}", e);
            Settings::default()
        }
    }
}

/// Load settings from a specific file
pub fn load_settings_from(path: &Path) -> Result<Settings, StorageError> {
    if !path.exists() {
        tracing::info!("Settings file not found, using defaults");
        return Ok(Settings::default());
    }

    let json = fs::read_to_string(path)?;
    let mut settings: Settings = serde_json::from_str(&json)?;
    settings.validate();

    tracing::debug!("Loaded settings from {:?}", path);
    Ok(settings)
}

/// Save settings to the data directory
pub fn save_settings(settings: &Settings) -> Result<(), StorageError> {
    save_settings_to(settings, &get_settings_path()?)
}

/// Save settings to a specific file
pub fn save_settings_to(settings: &Settings, path: &Path) -> Result<(), StorageError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    let json = serde_json::to_string_pretty(settings)?;
    fs::write(path, json)?;

    tracing::debug!("Saved settings to {:?}", path);
    Ok(())
}
