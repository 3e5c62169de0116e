//! Hardware profiles
//!
//! The static profile catalog and the session state that tracks which profile
//! is active.

pub mod registry;
pub mod session;

pub use registry::{custom_template, find_profile, profile_names, profiles};
pub use session::Session;
