//! Vocabulary records produced by a lookup.

use serde::{Deserialize, Serialize};

/// Rendered example sentence.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExamplePair {
    /// Sentence with readings removed and the blank filled in.
    pub plain_text: String,
    /// Same sentence with `<ruby>` pairs for every annotated base.
    pub annotated_text: String,
    /// English translation, tags stripped.
    pub translation: String,
}

/// Normalized vocabulary entry.
///
/// Built fresh for every lookup; a sparse page still produces a record with
/// empty strings rather than an error.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VocabularyRecord {
    /// Canonical written form, as titled by the source page.
    pub headword: String,
    /// Kana reading of the headword.
    pub reading: String,
    /// Raw part-of-speech codes, first occurrence order, no duplicates.
    pub parts_of_speech: Vec<String>,
    /// Meaning, or comma-joined English glosses when the page has no summary.
    pub english_gloss: String,
    /// Classified JLPT code (`N1`..`N5`), absent when unclassified.
    pub proficiency_level: Option<String>,
    /// At most two rendered examples.
    pub examples: Vec<ExamplePair>,
}

impl VocabularyRecord {
    /// Upper bound on `examples`.
    pub const MAX_EXAMPLES: usize = 2;

    /// Number of raw example candidates considered before giving up.
    pub const MAX_EXAMPLE_CANDIDATES: usize = 5;
}
