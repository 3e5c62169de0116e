//! Shared type definitions
//!
//! This module contains the data types passed between the estimation engine
//! and its collaborators.

pub mod hardware;
pub mod model;
