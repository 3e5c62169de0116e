//! Memory estimation
//!
//! Approximates the memory needed to run inference on a model from its
//! quantization and either its parameter count or its total file size.

use crate::types::model::ModelCharacteristics;
use serde::Serialize;

/// Assumed quantization for models that declare none
pub const UNQUANTIZED: &str = "FP32";

/// Inference overhead on top of raw weights (activations, framework buffers)
pub const ACTIVATION_MULTIPLIER: f64 = 1.5;

const HALF_PRECISION: &[&str] = &["FP16"];
const EIGHT_BIT: &[&str] = &["INT8", "Q8"];
const LOW_BIT: &[&str] = &["Q4", "Q4_K", "Q5", "Q5_K", "Q6_K", "Q2_K", "Q3_K"];

/// Step-by-step memory estimate for one model
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MemoryEstimate {
    pub bytes_per_param: f64,
    pub num_params: f64,
    /// Raw weight memory in bytes
    pub model_memory: f64,
    /// Weight memory times the activation multiplier, in bytes
    pub required_memory: f64,
}

impl MemoryEstimate {
    pub fn for_model(characteristics: &ModelCharacteristics) -> Self {
        let quantizations = effective_quantizations(characteristics);
        let bytes_per_param = bytes_per_param(&quantizations);

        let num_params = if characteristics.has_parameter_count() {
            characteristics.parameter_count
        } else {
            characteristics.total_size_bytes as f64 / bytes_per_param
        };

        let model_memory = num_params * bytes_per_param;

        Self {
            bytes_per_param,
            num_params,
            model_memory,
            required_memory: model_memory * ACTIVATION_MULTIPLIER,
        }
    }
}

/// Estimated bytes needed to run the model
pub fn estimate_memory(characteristics: &ModelCharacteristics) -> f64 {
    MemoryEstimate::for_model(characteristics).required_memory
}

/// Quantizations used for matching: the declared ones, or FP32 if none
pub fn effective_quantizations(characteristics: &ModelCharacteristics) -> Vec<&str> {
    if characteristics.quantizations.is_empty() {
        vec![UNQUANTIZED]
    } else {
        characteristics
            .quantizations
            .iter()
            .map(String::as_str)
            .collect()
    }
}

/// Bytes per parameter for a set of quantization tags
///
/// Rules are checked in a fixed order and the first hit wins, so a model
/// tagged both FP16 and Q4_K counts as FP16.
pub fn bytes_per_param(quantizations: &[&str]) -> f64 {
    let has_any = |group: &[&str]| {
        quantizations
            .iter()
            .any(|q| group.iter().any(|tag| tag == q))
    };

    if has_any(HALF_PRECISION) {
        2.0
    } else if has_any(EIGHT_BIT) {
        1.0
    } else if has_any(LOW_BIT) {
        0.5
    } else {
        4.0
    }
}
