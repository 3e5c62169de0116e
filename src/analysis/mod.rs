//! Compatibility estimation engine
//!
//! Pure functions: file list -> characteristics -> memory estimate -> verdict.
//! Nothing in here performs I/O or holds state, so a batch of models can be
//! evaluated in any order.

pub mod analyzer;
pub mod evaluator;
pub mod memory;

pub use analyzer::analyze_files;
pub use evaluator::{assess, available_memory, evaluate, CompatibilityReport, Gate};
pub use memory::{estimate_memory, MemoryEstimate};
