// ABOUTME: Idea tracking library for Ideaflow
// ABOUTME: Provides idea types, workflow status rules and the SQLite storage layer

pub mod coerce;
pub mod storage;
pub mod types;
pub mod workflow;

// Re-export main types
pub use coerce::{loose_number, loose_text, number_from_value, text_from_value};
pub use storage::{FieldUpdate, IdeaStorage, StorageError, StorageResult};
pub use types::{CreatedIdea, Idea, IdeaCreateInput, IdeaStatus};
pub use workflow::{is_truthy, triage, Transition, Truthy, TRIAGE_THRESHOLD};
