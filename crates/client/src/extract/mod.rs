//! Vocabulary extraction from Bunpro page HTML.
//!
//! ### Pipeline
//! - Locate the `__NEXT_DATA__` JSON island ([`payload::locate`]).
//! - Parse it into the optional-field schema ([`payload::parse`]).
//! - Render example sentences ([`sentence::render`]) and assemble the record
//!   ([`assemble::assemble`]).
//!
//! ### Failure Boundary
//! Only a missing island or malformed JSON is an error. Past a successful
//! parse everything is best-effort and absent fields come back empty.

pub mod assemble;
pub mod furigana;
pub mod markup;
pub mod payload;
pub mod sentence;

pub use assemble::assemble;
pub use furigana::{Segment, segment};
pub use payload::NextData;
pub use sentence::{RenderedSentence, render};

use vocabfill_core::{Error, VocabularyRecord};

/// Extract a vocabulary record from a full page.
pub fn extract_vocabulary(html: &str, lookup_key: &str) -> Result<VocabularyRecord, Error> {
    let json = payload::locate(html)?;
    let data = payload::parse(&json)?;
    let record = assemble(lookup_key, &data);

    tracing::debug!(
        headword = %record.headword,
        parts_of_speech = record.parts_of_speech.len(),
        examples = record.examples.len(),
        "extracted vocabulary record"
    );

    Ok(record)
}
