//! Core types and shared functionality for vocabfill.
//!
//! This crate provides:
//! - Vocabulary record types returned by lookups
//! - Unified error types
//! - Configuration structures
//! - Domain mappings (part of speech, JLPT classification) and the note writer

pub mod classify;
pub mod config;
pub mod error;
pub mod note;
pub mod record;

pub use classify::{classify_level, level_tag, normalize_pos, pos_field};
pub use config::{AppConfig, ConfigError};
pub use error::Error;
pub use note::{FillOutcome, Note, fill_note};
pub use record::{ExamplePair, VocabularyRecord};
