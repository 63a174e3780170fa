//! Example sentence rendering.
//!
//! Raw study-question content carries a `____` blank where the vocabulary
//! word goes, sometimes wrapped in a `<span>`. The blank is filled first, then
//! the content is rendered twice: once without readings and once with ruby
//! pairs.

use std::sync::LazyLock;

use regex::{NoExpand, Regex};

use super::{furigana, markup};

/// Blank token used by the page for the target word.
pub const PLACEHOLDER: &str = "____";

static WRAPPED_PLACEHOLDER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)<span[^>]*>____</span>").expect("invalid placeholder pattern"));

/// Both renderings of one sentence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedSentence {
    pub plain: String,
    pub annotated: String,
}

/// Replace the blank with `headword_form`, or `reading_form` when the
/// headword form is empty.
pub fn fill_placeholder(content: &str, headword_form: &str, reading_form: &str) -> String {
    let word = if headword_form.is_empty() { reading_form } else { headword_form };
    WRAPPED_PLACEHOLDER
        .replace_all(content, NoExpand(word))
        .replace(PLACEHOLDER, word)
}

/// Render raw sentence content into plain and ruby-annotated text.
pub fn render(content: &str, headword_form: &str, reading_form: &str) -> RenderedSentence {
    if content.is_empty() {
        return RenderedSentence { plain: String::new(), annotated: String::new() };
    }

    let filled = fill_placeholder(content, headword_form, reading_form);

    let plain = markup::strip(&furigana::to_plain(&filled));
    let annotated = furigana::to_annotated(&markup::unwrap_inline(&filled));

    RenderedSentence { plain, annotated }
}
