//! Hardware profile catalog
//!
//! Representative laptops, cloud instances, servers and clusters. Consumer
//! entries list what they can run; server-class entries accept everything.
//! The last entry, "Custom", is the starting point for user edits.

use crate::types::hardware::{HardwareProfile, CUSTOM_PROFILE_NAME, WILDCARD};
use once_cell::sync::Lazy;

static PROFILES: Lazy<Vec<HardwareProfile>> = Lazy::new(|| {
    vec![
        HardwareProfile::new(
            "MacBook Pro (13-inch, M1, 8GB RAM)",
            8.0,
            1.0, // shared with the CPU
            1,
            &["GGUF", "safetensors"],
            &["FP16", "Q4_K", "Q5_K", "Q6_K"],
        ),
        HardwareProfile::new(
            "MacBook Pro (16-inch, Intel, 16GB RAM)",
            16.0,
            4.0,
            1,
            &["GGUF", "safetensors"],
            &["FP16"],
        ),
        HardwareProfile::new("AWS EC2 g4dn.xlarge", 16.0, 16.0, 1, &[WILDCARD], &[WILDCARD]),
        HardwareProfile::new(
            "Single Server with NVIDIA A100 (40GB)",
            256.0,
            40.0,
            1,
            &[WILDCARD],
            &[WILDCARD],
        ),
        HardwareProfile::new(
            "Multi-node Cluster with NVIDIA V100 (16GB) GPUs",
            512.0,
            16.0,
            8,
            &[WILDCARD],
            &[WILDCARD],
        ),
        custom_template(),
    ]
});

/// All profiles, in display order
pub fn profiles() -> &'static [HardwareProfile] {
    &PROFILES
}

pub fn profile_names() -> Vec<&'static str> {
    PROFILES.iter().map(|p| p.name.as_str()).collect()
}

/// Look up a profile by its exact name
pub fn find_profile(name: &str) -> Option<&'static HardwareProfile> {
    PROFILES.iter().find(|p| p.name == name)
}

/// A fresh "Custom" profile: moderate capacity, accepts every format and quantization
pub fn custom_template() -> HardwareProfile {
    let mut custom =
        HardwareProfile::new(CUSTOM_PROFILE_NAME, 16.0, 4.0, 1, &[WILDCARD], &[WILDCARD]);
    custom.is_custom = true;
    custom
}
