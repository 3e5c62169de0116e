//! Session state
//!
//! Owns the active hardware profile and the analyzed search results for one
//! user session. The estimation functions stay pure; the session only decides
//! which profile they are called with.

use crate::analysis::{analyze_files, assess, evaluate, CompatibilityReport};
use crate::error::Error;
use crate::hardware::registry::{custom_template, find_profile};
use crate::storage::settings::Settings;
use crate::types::hardware::{HardwareProfile, CUSTOM_PROFILE_NAME};
use crate::types::model::{AnalyzedModel, ModelInfo};

/// Active profile, filter flag and analyzed models for one session
#[derive(Debug, Clone)]
pub struct Session {
    profile: HardwareProfile,
    filter_compatible: bool,
    models: Vec<AnalyzedModel>,
}

impl Session {
    /// Start with the "Custom" template active
    pub fn new() -> Self {
        Self {
            profile: custom_template(),
            filter_compatible: false,
            models: Vec::new(),
        }
    }

    /// Restore the active profile and filter from saved settings
    pub fn from_settings(settings: &Settings) -> Self {
        let mut session = Self::new();
        session.filter_compatible = settings.filter_compatible;

        if settings.active_profile == CUSTOM_PROFILE_NAME {
            if let Some(custom) = &settings.custom_profile {
                session.profile = custom.clone();
                session.mark_custom();
            }
        } else if let Err(e) = session.select_profile(&settings.active_profile) {
            tracing::warn!("Ignoring saved profile: {}", e);
        }

        session
    }

    /// Snapshot of the active profile and filter for persistence
    pub fn to_settings(&self) -> Settings {
        Settings {
            active_profile: self.profile.name.clone(),
            custom_profile: self.profile.is_custom.then(|| self.profile.clone()),
            filter_compatible: self.filter_compatible,
        }
    }

    pub fn profile(&self) -> &HardwareProfile {
        &self.profile
    }

    /// Replace the active profile with a registry entry
    ///
    /// The swap is wholesale: nothing from the previous profile survives.
    pub fn select_profile(&mut self, name: &str) -> Result<&HardwareProfile, Error> {
        let selected = find_profile(name).ok_or_else(|| Error::UnknownProfile(name.to_string()))?;
        self.profile = selected.clone();
        tracing::info!("Active hardware profile: {}", self.profile.name);
        Ok(&self.profile)
    }

    pub fn set_total_ram_gb(&mut self, gb: f64) {
        self.profile.total_ram_gb = gb.max(0.0);
        self.mark_custom();
    }

    pub fn set_gpu_memory_gb(&mut self, gb: f64) {
        self.profile.gpu_memory_gb = gb.max(0.0);
        self.mark_custom();
    }

    pub fn set_gpu_count(&mut self, count: u32) {
        self.profile.gpu_count = count;
        self.mark_custom();
    }

    pub fn add_supported_format(&mut self, format: &str) {
        if self.profile.supported_formats.insert(format.to_string()) {
            self.mark_custom();
        }
    }

    pub fn remove_supported_format(&mut self, format: &str) {
        if self.profile.supported_formats.remove(format) {
            self.mark_custom();
        }
    }

    pub fn add_supported_quantization(&mut self, quantization: &str) {
        if self
            .profile
            .supported_quantizations
            .insert(quantization.to_string())
        {
            self.mark_custom();
        }
    }

    pub fn remove_supported_quantization(&mut self, quantization: &str) {
        if self.profile.supported_quantizations.remove(quantization) {
            self.mark_custom();
        }
    }

    fn mark_custom(&mut self) {
        self.profile.is_custom = true;
        self.profile.name = CUSTOM_PROFILE_NAME.to_string();
    }

    pub fn filter_compatible(&self) -> bool {
        self.filter_compatible
    }

    pub fn set_filter_compatible(&mut self, enabled: bool) {
        self.filter_compatible = enabled;
    }

    /// Analyze a fresh batch of search results, replacing the previous ones
    pub fn load_models(&mut self, models: Vec<ModelInfo>) {
        self.models = models
            .into_iter()
            .map(|info| AnalyzedModel {
                characteristics: analyze_files(&info.files),
                info,
            })
            .collect();
        tracing::info!("Analyzed {} model(s)", self.models.len());
    }

    pub fn models(&self) -> &[AnalyzedModel] {
        &self.models
    }

    pub fn is_compatible(&self, model: &AnalyzedModel) -> bool {
        evaluate(&model.characteristics, &self.profile)
    }

    pub fn report(&self, model: &AnalyzedModel) -> CompatibilityReport {
        assess(&model.characteristics, &self.profile)
    }

    /// Models to display with their reports
    ///
    /// Incompatible models are dropped while the filter is on.
    pub fn visible_models(&self) -> Vec<(&AnalyzedModel, CompatibilityReport)> {
        self.models
            .iter()
            .map(|model| (model, self.report(model)))
            .filter(|(_, report)| !self.filter_compatible || report.is_compatible())
            .collect()
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}
