//! Writing vocabulary records into flashcard notes.
//!
//! A note is a bag of named string fields plus tags. Only fields that already
//! exist on the note are written, and empty values never overwrite anything.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::classify::{level_tag, pos_field};
use crate::record::VocabularyRecord;

pub const FIELD_KANJI: &str = "kanji";
pub const FIELD_KANJI_FURIGANA: &str = "kanji_furigana";
pub const FIELD_KANA: &str = "kana";
pub const FIELD_POS: &str = "pos";
pub const FIELD_ENGLISH: &str = "english";

/// `(japanese, japanese_furigana, english)` field names per example slot.
pub const EXAMPLE_FIELDS: [(&str, &str, &str); VocabularyRecord::MAX_EXAMPLES] =
    [("ex1_ja", "ex1_ja_furigana", "ex1_en"), ("ex2_ja", "ex2_ja_furigana", "ex2_en")];

/// A flashcard note.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Note {
    #[serde(default)]
    pub fields: BTreeMap<String, String>,
    #[serde(default)]
    pub tags: Vec<String>,
}

/// What [`fill_note`] changed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FillOutcome {
    /// Names of fields that received a value.
    pub fields_written: Vec<&'static str>,
    /// Tag appended to the note, if any.
    pub tag_added: Option<String>,
}

impl Note {
    /// Note carrying only the given fields, all empty.
    pub fn with_fields<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self { fields: names.into_iter().map(|n| (n.into(), String::new())).collect(), tags: Vec::new() }
    }

    /// Trimmed `kanji` field, if the note has one and it is not blank.
    pub fn lookup_key(&self) -> Option<&str> {
        self.fields
            .get(FIELD_KANJI)
            .map(|v| v.trim())
            .filter(|v| !v.is_empty())
    }

    /// Set `name` to `value` if the field exists and `value` is non-empty.
    fn set_if_present(&mut self, name: &'static str, value: &str, outcome: &mut FillOutcome) {
        if value.is_empty() {
            return;
        }
        if let Some(slot) = self.fields.get_mut(name) {
            *slot = value.to_string();
            outcome.fields_written.push(name);
        }
    }
}

/// Fill a note from a looked-up record.
///
/// `kanji` is the key the note was looked up with; it goes into
/// `kanji_furigana` untouched. Part-of-speech codes are normalized here, not
/// at extraction time.
pub fn fill_note(note: &mut Note, kanji: &str, record: &VocabularyRecord, tag_prefix: &str) -> FillOutcome {
    let mut outcome = FillOutcome::default();

    note.set_if_present(FIELD_KANJI_FURIGANA, kanji, &mut outcome);
    note.set_if_present(FIELD_KANA, &record.reading, &mut outcome);
    note.set_if_present(FIELD_POS, &pos_field(record.parts_of_speech.as_slice()), &mut outcome);
    note.set_if_present(FIELD_ENGLISH, &record.english_gloss, &mut outcome);

    for (example, (ja, ja_furigana, en)) in record.examples.iter().zip(EXAMPLE_FIELDS) {
        note.set_if_present(ja, &example.plain_text, &mut outcome);
        note.set_if_present(ja_furigana, &example.annotated_text, &mut outcome);
        note.set_if_present(en, &example.translation, &mut outcome);
    }

    if let Some(code) = &record.proficiency_level {
        let tag = level_tag(code, tag_prefix);
        if !note.tags.contains(&tag) {
            note.tags.push(tag.clone());
            outcome.tag_added = Some(tag);
        }
    }

    outcome
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::ExamplePair;

    fn vocab_note() -> Note {
        let mut names = vec![FIELD_KANJI, FIELD_KANJI_FURIGANA, FIELD_KANA, FIELD_POS, FIELD_ENGLISH];
        for (ja, ja_furigana, en) in EXAMPLE_FIELDS {
            names.extend([ja, ja_furigana, en]);
        }
        Note::with_fields(names)
    }

    fn record() -> VocabularyRecord {
        VocabularyRecord {
            headword: "綺麗".into(),
            reading: "きれい".into(),
            parts_of_speech: vec!["adj-na".into(), "adj-f".into()],
            english_gloss: "pretty, clean".into(),
            proficiency_level: Some("N5".into()),
            examples: vec![ExamplePair {
                plain_text: "部屋が綺麗です。".into(),
                annotated_text: "<ruby>部屋<rt>へや</rt></ruby>が綺麗です。".into(),
                translation: "The room is clean.".into(),
            }],
        }
    }

    #[test]
    fn test_lookup_key() {
        let mut note = vocab_note();
        assert_eq!(note.lookup_key(), None);
        note.fields.insert(FIELD_KANJI.into(), "  綺麗 ".into());
        assert_eq!(note.lookup_key(), Some("綺麗"));
        assert_eq!(Note::default().lookup_key(), None);
    }

    #[test]
    fn test_fill_note_writes_fields_and_tag() {
        let mut note = vocab_note();
        let outcome = fill_note(&mut note, "綺麗", &record(), "JLPT_");

        assert_eq!(note.fields[FIELD_KANJI_FURIGANA], "綺麗");
        assert_eq!(note.fields[FIELD_KANA], "きれい");
        assert_eq!(note.fields[FIELD_POS], "adj-na, adj");
        assert_eq!(note.fields[FIELD_ENGLISH], "pretty, clean");
        assert_eq!(note.fields["ex1_ja"], "部屋が綺麗です。");
        assert!(note.fields["ex1_ja_furigana"].contains("<ruby>部屋<rt>へや</rt></ruby>"));
        assert_eq!(note.fields["ex1_en"], "The room is clean.");
        assert_eq!(note.fields["ex2_ja"], "");
        assert_eq!(note.tags, vec!["JLPT_N5".to_string()]);
        assert_eq!(outcome.tag_added.as_deref(), Some("JLPT_N5"));
        assert!(!outcome.fields_written.contains(&"ex2_ja"));
    }

    #[test]
    fn test_fill_note_skips_missing_fields() {
        let mut note = Note::with_fields([FIELD_KANJI, FIELD_ENGLISH]);
        let outcome = fill_note(&mut note, "綺麗", &record(), "JLPT_");
        assert_eq!(note.fields.len(), 2);
        assert_eq!(outcome.fields_written, vec![FIELD_ENGLISH]);
    }

    #[test]
    fn test_fill_note_keeps_existing_on_empty_values() {
        let mut note = vocab_note();
        note.fields.insert(FIELD_KANA.into(), "existing".into());
        let sparse = VocabularyRecord { headword: "綺麗".into(), ..Default::default() };
        fill_note(&mut note, "綺麗", &sparse, "JLPT_");
        assert_eq!(note.fields[FIELD_KANA], "existing");
        assert!(note.tags.is_empty());
    }

    #[test]
    fn test_fill_note_does_not_duplicate_tag() {
        let mut note = vocab_note();
        note.tags.push("JLPT_N5".into());
        let outcome = fill_note(&mut note, "綺麗", &record(), "JLPT_");
        assert_eq!(note.tags, vec!["JLPT_N5".to_string()]);
        assert!(outcome.tag_added.is_none());
    }

    #[test]
    fn test_note_deserializes_without_tags() {
        let note: Note = serde_json::from_str(r#"{"fields": {"kanji": "猫"}}"#).unwrap();
        assert_eq!(note.lookup_key(), Some("猫"));
        assert!(note.tags.is_empty());
    }
}
