//! modelfit library
//!
//! Judges whether a model published on a model registry will run on a given
//! hardware profile. The `analysis` module holds the estimation engine; the
//! other modules are the collaborators around it (profiles, session state,
//! registry metadata, settings).

pub mod analysis;
pub mod error;
pub mod format;
pub mod hardware;
pub mod storage;
pub mod types;

pub use analysis::{
    analyze_files, assess, available_memory, estimate_memory, evaluate, CompatibilityReport,
    Gate, MemoryEstimate,
};
pub use error::Error;
pub use hardware::{find_profile, profiles, Session};
pub use types::hardware::HardwareProfile;
pub use types::model::{AnalyzedModel, ModelCharacteristics, ModelFile, ModelInfo};
