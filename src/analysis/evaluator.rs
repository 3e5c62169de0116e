//! Compatibility evaluation
//!
//! A model is compatible with a profile when it passes three gates in order:
//! format, quantization, then memory. The first failing gate decides.

use crate::analysis::memory::{effective_quantizations, MemoryEstimate};
use crate::types::hardware::HardwareProfile;
use crate::types::model::ModelCharacteristics;
use serde::Serialize;

const BYTES_PER_GB: f64 = 1024.0 * 1024.0 * 1024.0;

/// Share of system RAM left for the model; the rest is kept for the OS
pub const USABLE_RAM_FRACTION: f64 = 0.8;

/// The checks a model must pass, in evaluation order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Gate {
    Format,
    Quantization,
    Memory,
}

impl Gate {
    pub fn label(&self) -> &'static str {
        match self {
            Gate::Format => "format not supported",
            Gate::Quantization => "quantization not supported",
            Gate::Memory => "not enough memory",
        }
    }
}

/// Outcome of evaluating one model against one profile
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CompatibilityReport {
    /// First gate that failed, `None` when compatible
    pub failed_gate: Option<Gate>,
    /// Only computed once the format and quantization gates pass
    pub memory: Option<MemoryEstimate>,
    /// Usable bytes on the profile
    pub available_memory: f64,
}

impl CompatibilityReport {
    pub fn is_compatible(&self) -> bool {
        self.failed_gate.is_none()
    }
}

/// Bytes usable for a model: all GPU memory plus 80% of system RAM
pub fn available_memory(profile: &HardwareProfile) -> f64 {
    let gpu_bytes = profile.gpu_memory_gb * profile.gpu_count as f64 * BYTES_PER_GB;
    let ram_bytes = profile.total_ram_gb * BYTES_PER_GB * USABLE_RAM_FRACTION;
    gpu_bytes + ram_bytes
}

/// Evaluate a model against a profile, reporting which gate failed
pub fn assess(characteristics: &ModelCharacteristics, profile: &HardwareProfile) -> CompatibilityReport {
    let available = available_memory(profile);
    let fail = |gate: Gate, memory: Option<MemoryEstimate>| {
        tracing::debug!(profile = %profile.name, gate = gate.label(), "Model rejected");
        CompatibilityReport {
            failed_gate: Some(gate),
            memory,
            available_memory: available,
        }
    };

    if !profile.supports_any_format(characteristics.formats.iter().map(String::as_str)) {
        return fail(Gate::Format, None);
    }

    let quantizations = effective_quantizations(characteristics);
    if !profile.supports_any_quantization(quantizations.iter().copied()) {
        return fail(Gate::Quantization, None);
    }

    let memory = MemoryEstimate::for_model(characteristics);
    if memory.required_memory > available {
        return fail(Gate::Memory, Some(memory));
    }

    CompatibilityReport {
        failed_gate: None,
        memory: Some(memory),
        available_memory: available,
    }
}

/// Whether the model can run on the profile
pub fn evaluate(characteristics: &ModelCharacteristics, profile: &HardwareProfile) -> bool {
    assess(characteristics, profile).is_compatible()
}
