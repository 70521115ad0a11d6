//! Data models for the application
//!
//! This module contains the data structures used throughout the application,
//! organized by domain concept.

mod entry;
mod folder;
mod org;
mod outcome;

// Re-export all models for convenient imports
pub use entry::*;
pub use folder::*;
pub use org::*;
pub use outcome::*;
