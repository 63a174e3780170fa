//! Turning a parsed payload into a [`VocabularyRecord`].

use vocabfill_core::{ExamplePair, VocabularyRecord, classify_level};

use super::payload::{NextData, Sense, StudyQuestion};
use super::{markup, sentence};

/// Build a record from the payload.
///
/// Never fails: anything the payload lacks comes back empty.
pub fn assemble(lookup_key: &str, data: &NextData) -> VocabularyRecord {
    let reviewable = data.reviewable();
    let text = |value: Option<&String>| value.map_or("", |v| v.trim()).to_string();

    let headword = reviewable
        .and_then(|r| r.title.as_deref())
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .unwrap_or_else(|| lookup_key.trim())
        .to_string();

    let mut english_gloss = text(reviewable.and_then(|r| r.meaning.as_ref()));
    if english_gloss.is_empty() {
        english_gloss = join_glosses(data.senses());
    }

    VocabularyRecord {
        headword,
        reading: text(reviewable.and_then(|r| r.kana.as_ref())),
        parts_of_speech: collect_parts_of_speech(data.senses()),
        english_gloss,
        proficiency_level: classify_level(reviewable.and_then(|r| r.jlpt_level.as_deref())),
        examples: collect_examples(data.study_questions()),
    }
}

/// English gloss texts of every sense, in order, joined with `", "`.
pub fn join_glosses(senses: &[Sense]) -> String {
    senses
        .iter()
        .flat_map(|s| s.gloss.iter())
        .filter_map(|g| g.english())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Part-of-speech codes across all senses, first occurrence wins.
pub fn collect_parts_of_speech(senses: &[Sense]) -> Vec<String> {
    let mut tags: Vec<String> = Vec::new();
    for tag in senses.iter().flat_map(|s| s.part_of_speech.iter()) {
        if !tag.is_empty() && !tags.contains(tag) {
            tags.push(tag.clone());
        }
    }
    tags
}

/// Render up to [`VocabularyRecord::MAX_EXAMPLES`] examples from the first
/// [`VocabularyRecord::MAX_EXAMPLE_CANDIDATES`] questions.
pub fn collect_examples(questions: &[StudyQuestion]) -> Vec<ExamplePair> {
    let mut examples = Vec::with_capacity(VocabularyRecord::MAX_EXAMPLES);

    for question in questions.iter().take(VocabularyRecord::MAX_EXAMPLE_CANDIDATES) {
        let content = question.content.as_deref().unwrap_or_default();
        let translation = question.translation.as_deref().unwrap_or_default();
        if content.is_empty() || translation.is_empty() {
            continue;
        }

        let rendered = sentence::render(
            content,
            question.kanji_answer.as_deref().unwrap_or_default(),
            question.answer.as_deref().unwrap_or_default(),
        );
        let translation = markup::strip(translation);
        if rendered.plain.is_empty() || translation.is_empty() {
            continue;
        }

        examples.push(ExamplePair { plain_text: rendered.plain, annotated_text: rendered.annotated, translation });
        if examples.len() >= VocabularyRecord::MAX_EXAMPLES {
            break;
        }
    }

    examples
}
