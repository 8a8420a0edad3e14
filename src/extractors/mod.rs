// src/extractors/mod.rs
pub mod record;
pub mod section;

// Re-export key extraction types for convenience
#[allow(unused_imports)]
pub use record::{IssueRecord, RecordAssembler};
