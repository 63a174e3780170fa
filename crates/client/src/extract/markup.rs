//! Markup normalization for sentence and translation text.

use std::sync::LazyLock;

use regex::{Captures, Regex};

static TAG: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<[^>]+>").expect("invalid tag pattern"));

static NAMED_TAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<\s*/?\s*([A-Za-z][A-Za-z0-9-]*)?[^>]*>").expect("invalid tag pattern"));

const NBSP_ENTITY: &str = "&nbsp;";

/// Tags that carry furigana pairing and survive [`unwrap_inline`].
const RUBY_TAGS: [&str; 3] = ["ruby", "rt", "rp"];

/// Remove every `<...>` run, decode `&nbsp;` and trim.
pub fn strip(text: &str) -> String {
    if text.is_empty() {
        return String::new();
    }
    TAG.replace_all(text, "").replace(NBSP_ENTITY, " ").trim().to_string()
}

/// Remove every tag except ruby pairing tags, keeping the wrapped text.
///
/// Not trimmed; callers trim once the sentence is fully rendered.
pub fn unwrap_inline(text: &str) -> String {
    NAMED_TAG
        .replace_all(text, |caps: &Captures| {
            let keep = caps
                .get(1)
                .is_some_and(|name| RUBY_TAGS.iter().any(|t| name.as_str().eq_ignore_ascii_case(t)));
            if keep { caps[0].to_string() } else { String::new() }
        })
        .replace(NBSP_ENTITY, " ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_empty() {
        assert_eq!(strip(""), "");
    }

    #[test]
    fn test_strip_tags_and_entities() {
        assert_eq!(strip("I <strong>love</strong>&nbsp;cats. "), "I love cats.");
        assert_eq!(strip("<br/>line<img src=\"x.png\" />"), "line");
    }

    #[test]
    fn test_strip_malformed_nesting() {
        assert_eq!(strip("<b><i>bold</b> italic</i>"), "bold italic");
    }

    #[test]
    fn test_strip_plain_text_unchanged() {
        assert_eq!(strip("猫がいます。"), "猫がいます。");
    }

    #[test]
    fn test_unwrap_inline_keeps_ruby() {
        let input = "<span class=\"x\">の</span><ruby>猫<rt>ねこ</rt></ruby>&nbsp;";
        assert_eq!(unwrap_inline(input), "の<ruby>猫<rt>ねこ</rt></ruby> ");
    }

    #[test]
    fn test_unwrap_inline_is_case_insensitive_for_ruby() {
        assert_eq!(unwrap_inline("<RUBY>猫<RT>ねこ</RT></RUBY>"), "<RUBY>猫<RT>ねこ</RT></RUBY>");
    }

    #[test]
    fn test_unwrap_inline_drops_lookalike_tags() {
        assert_eq!(unwrap_inline("<rtc>x</rtc><rubyish>y</rubyish>"), "xy");
    }
}
