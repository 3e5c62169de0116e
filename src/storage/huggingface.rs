//! HuggingFace model records
//!
//! Converts the JSON returned by `/api/models/{id}?blobs=true` into
//! [`ModelInfo`]. Fetching that JSON is up to the caller; this module only
//! reads it from a string or a local file.

use crate::storage::StorageError;
use crate::types::model::{ModelFile, ModelInfo};
use serde::Deserialize;
use std::fs;
use std::path::Path;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ModelRecord {
    id: String,
    #[serde(default)]
    author: Option<String>,
    #[serde(default)]
    downloads: Option<u64>,
    #[serde(default)]
    likes: Option<u64>,
    #[serde(default)]
    tags: Vec<String>,
    #[serde(default, rename = "pipeline_tag")]
    pipeline_tag: Option<String>,
    #[serde(default)]
    last_modified: Option<String>,
    #[serde(default)]
    siblings: Vec<SiblingFile>,
}

#[derive(Debug, Deserialize)]
struct SiblingFile {
    rfilename: String,
    #[serde(default)]
    size: Option<u64>,
    #[serde(default)]
    lfs: Option<LfsInfo>,
}

#[derive(Debug, Deserialize)]
struct LfsInfo {
    sha256: String,
    #[serde(default)]
    size: Option<u64>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum OneOrMany {
    Many(Vec<ModelRecord>),
    One(Box<ModelRecord>),
}

impl From<SiblingFile> for ModelFile {
    fn from(sibling: SiblingFile) -> Self {
        let lfs_size = sibling.lfs.as_ref().and_then(|lfs| lfs.size);
        ModelFile {
            filename: sibling.rfilename,
            size_bytes: sibling.size.or(lfs_size).unwrap_or(0),
            content_hash: sibling.lfs.map(|lfs| lfs.sha256),
        }
    }
}

impl From<ModelRecord> for ModelInfo {
    fn from(record: ModelRecord) -> Self {
        ModelInfo {
            id: record.id,
            author: record.author,
            downloads: record.downloads.unwrap_or(0),
            likes: record.likes.unwrap_or(0),
            tags: record.tags,
            pipeline_tag: record.pipeline_tag,
            last_modified: record.last_modified,
            files: record.siblings.into_iter().map(ModelFile::from).collect(),
        }
    }
}

/// Parse one model record or an array of records
pub fn parse_model_records(json: &str) -> Result<Vec<ModelInfo>, StorageError> {
    let records = match serde_json::from_str::<OneOrMany>(json)? {
        OneOrMany::Many(records) => records,
        OneOrMany::One(record) => vec![*record],
    };
    Ok(records.into_iter().map(ModelInfo::from).collect())
}

/// Read model records from a local JSON file
pub fn load_model_records(path: &Path) -> Result<Vec<ModelInfo>, StorageError> {
    let json = fs::read_to_string(path)?;
    let models = parse_model_records(&json)?;
    tracing::debug!("Loaded {} model record(s) from {:?}", models.len(), path);
    Ok(models)
}
