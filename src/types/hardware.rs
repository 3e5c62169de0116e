//! Hardware profile types
//!
//! A profile describes available compute capacity and which formats and
//! quantizations the hardware can run.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Support-set entry that matches any format or quantization
pub const WILDCARD: &str = "All";

/// Name carried by a profile once it has been edited
pub const CUSTOM_PROFILE_NAME: &str = "Custom";

/// Hardware capacity and capabilities
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HardwareProfile {
    /// Display name, unique within the registry
    pub name: String,
    /// Total system RAM in GB
    pub total_ram_gb: f64,
    /// Memory per GPU in GB
    pub gpu_memory_gb: f64,
    /// Number of GPUs
    pub gpu_count: u32,
    /// Set once the profile has been edited by the user
    pub is_custom: bool,
    /// Formats this hardware can load; may contain `"All"`
    pub supported_formats: BTreeSet<String>,
    /// Quantizations this hardware can run; may contain `"All"`
    pub supported_quantizations: BTreeSet<String>,
}

impl HardwareProfile {
    pub fn new(
        name: impl Into<String>,
        total_ram_gb: f64,
        gpu_memory_gb: f64,
        gpu_count: u32,
        supported_formats: &[&str],
        supported_quantizations: &[&str],
    ) -> Self {
        Self {
            name: name.into(),
            total_ram_gb,
            gpu_memory_gb,
            gpu_count,
            is_custom: false,
            supported_formats: to_set(supported_formats),
            supported_quantizations: to_set(supported_quantizations),
        }
    }

    /// Whether any of `formats` can be loaded
    ///
    /// An empty `formats` never matches, wildcard or not.
    pub fn supports_any_format<'a, I>(&self, formats: I) -> bool
    where
        I: IntoIterator<Item = &'a str>,
    {
        supports_any(&self.supported_formats, formats)
    }

    /// Whether any of `quantizations` can be run
    pub fn supports_any_quantization<'a, I>(&self, quantizations: I) -> bool
    where
        I: IntoIterator<Item = &'a str>,
    {
        supports_any(&self.supported_quantizations, quantizations)
    }
}

fn to_set(values: &[&str]) -> BTreeSet<String> {
    values.iter().map(|v| v.to_string()).collect()
}

// Wildcard only applies per candidate, so an empty candidate list fails.
fn supports_any<'a, I>(supported: &BTreeSet<String>, candidates: I) -> bool
where
    I: IntoIterator<Item = &'a str>,
{
    let wildcard = supported.contains(WILDCARD);
    candidates
        .into_iter()
        .any(|c| wildcard || supported.contains(c))
}
