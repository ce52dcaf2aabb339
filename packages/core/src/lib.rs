// ABOUTME: Core constants and utilities for Ideaflow
// ABOUTME: Foundational package shared by the ideas library, the API and the CLI

pub mod constants;
pub mod utils;

// Re-export constants
pub use constants::{database_file, ideaflow_dir, DATABASE_FILE_NAME, DEFAULT_PORT};

// Re-export utilities
pub use utils::truncate;
