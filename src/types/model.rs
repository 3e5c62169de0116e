//! Model types
//!
//! Defines published model files, the characteristics inferred from them, and
//! the registry metadata passed through alongside.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// One published artifact of a model
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelFile {
    /// Path of the file inside the model repository
    pub filename: String,
    /// File size in bytes
    pub size_bytes: u64,
    /// Content hash (sha256 of the LFS blob), if published
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content_hash: Option<String>,
}

impl ModelFile {
    pub fn new(filename: impl Into<String>, size_bytes: u64) -> Self {
        Self {
            filename: filename.into(),
            size_bytes,
            content_hash: None,
        }
    }
}

/// Characteristics inferred from a model's file list
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ModelCharacteristics {
    /// Sum of all file sizes
    pub total_size_bytes: u64,
    /// Quantization tags, e.g. "Q4", "FP16"
    pub quantizations: BTreeSet<String>,
    /// Serialization formats, e.g. "GGUF", "safetensors"
    pub formats: BTreeSet<String>,
    /// Parameter count parsed from a `params_*.txt` file; 0 when unknown
    pub parameter_count: f64,
}

impl ModelCharacteristics {
    /// Whether a parameter count was found in the file list
    pub fn has_parameter_count(&self) -> bool {
        self.parameter_count > 0.0
    }
}

/// Registry metadata for one model
///
/// Everything except `files` is passed through to the presentation layer
/// untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ModelInfo {
    pub id: String,
    #[serde(default)]
    pub author: Option<String>,
    #[serde(default)]
    pub downloads: u64,
    #[serde(default)]
    pub likes: u64,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub pipeline_tag: Option<String>,
    #[serde(default)]
    pub last_modified: Option<String>,
    #[serde(default)]
    pub files: Vec<ModelFile>,
}

/// A model together with the characteristics derived from its files
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalyzedModel {
    pub info: ModelInfo,
    pub characteristics: ModelCharacteristics,
}
