//! Domain mappings applied when a record is written into a note.
//!
//! ### Part of speech
//! JMdict's `adj-f` (prenominal) collapses to the generic `adj`; `adj-i`,
//! `adj-na` and every other code pass through.
//!
//! ### JLPT classification
//! | level                         | result  |
//! |-------------------------------|---------|
//! | absent / blank                | none    |
//! | `unclassified` (any case)     | none    |
//! | `N1`..`N5` (any case of `N`, ASCII or full-width digit) | `N<d>` |
//! | anything else (`A1`, `E3`, `N9`) | `N1` |

/// JMdict code for prenominal adjectives.
const PRENOMINAL_ADJECTIVE: &str = "adj-f";

/// Generic adjective code used in place of [`PRENOMINAL_ADJECTIVE`].
const ADJECTIVE: &str = "adj";

/// Code non-standard levels are bucketed into.
const HIGHEST_LEVEL: &str = "N1";

/// Map a single part-of-speech code to the form written into notes.
pub fn normalize_pos(tag: &str) -> &str {
    if tag == PRENOMINAL_ADJECTIVE { ADJECTIVE } else { tag }
}

/// Join part-of-speech codes into a single field value.
///
/// Each code is normalized on its own; codes that collapse to the same value
/// are both kept.
pub fn pos_field<S: AsRef<str>>(tags: &[S]) -> String {
    tags.iter()
        .map(|tag| normalize_pos(tag.as_ref()))
        .filter(|tag| !tag.is_empty())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Classify a raw JLPT level string.
pub fn classify_level(level: Option<&str>) -> Option<String> {
    let level = level?.trim();
    if level.is_empty() || level.eq_ignore_ascii_case("unclassified") {
        return None;
    }

    if let Some(digits) = level.strip_prefix(['N', 'n'])
        && let Some(n) = decimal_value(digits)
        && (1..=5).contains(&n)
    {
        return Some(format!("N{n}"));
    }

    Some(HIGHEST_LEVEL.to_string())
}

/// Value of a non-empty run of ASCII or full-width decimal digits.
fn decimal_value(digits: &str) -> Option<u32> {
    if digits.is_empty() {
        return None;
    }
    digits.chars().try_fold(0u32, |acc, c| {
        let digit = match c {
            '0'..='9' => c as u32 - '0' as u32,
            '０'..='９' => c as u32 - '０' as u32,
            _ => return None,
        };
        acc.checked_mul(10)?.checked_add(digit)
    })
}

/// Tag attached to a note for a classified level, e.g. `JLPT_N3`.
pub fn level_tag(code: &str, prefix: &str) -> String {
    format!("{prefix}{code}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_blank() {
        assert_eq!(classify_level(None), None);
        assert_eq!(classify_level(Some("")), None);
        assert_eq!(classify_level(Some("   ")), None);
    }

    #[test]
    fn test_classify_unclassified() {
        assert_eq!(classify_level(Some("unclassified")), None);
        assert_eq!(classify_level(Some("Unclassified")), None);
        assert_eq!(classify_level(Some(" UNCLASSIFIED ")), None);
    }

    #[test]
    fn test_classify_standard_levels() {
        for n in 1..=5 {
            let code = format!("N{n}");
            assert_eq!(classify_level(Some(&code)), Some(code.clone()));
        }
        assert_eq!(classify_level(Some("n3")), Some("N3".to_string()));
        assert_eq!(classify_level(Some(" N4 ")), Some("N4".to_string()));
    }

    #[test]
    fn test_classify_out_of_range_buckets_to_n1() {
        assert_eq!(classify_level(Some("N9")), Some("N1".to_string()));
        assert_eq!(classify_level(Some("N0")), Some("N1".to_string()));
        assert_eq!(classify_level(Some("N")), Some("N1".to_string()));
        assert_eq!(classify_level(Some("N5a")), Some("N1".to_string()));
    }

    #[test]
    fn test_classify_full_width_digits() {
        assert_eq!(classify_level(Some("N３")), Some("N3".to_string()));
        assert_eq!(classify_level(Some("ｎ５")), Some("N1".to_string()));
        assert_eq!(classify_level(Some("N９")), Some("N1".to_string()));
        assert_eq!(classify_level(Some("N0３")), Some("N3".to_string()));
    }

    #[test]
    fn test_classify_other_codes_bucket_to_n1() {
        assert_eq!(classify_level(Some("A1")), Some("N1".to_string()));
        assert_eq!(classify_level(Some("E7")), Some("N1".to_string()));
        assert_eq!(classify_level(Some("A10")), Some("N1".to_string()));
    }

    #[test]
    fn test_normalize_pos() {
        assert_eq!(normalize_pos("adj-f"), "adj");
        assert_eq!(normalize_pos("adj-i"), "adj-i");
        assert_eq!(normalize_pos("adj-na"), "adj-na");
        assert_eq!(normalize_pos("n"), "n");
    }

    #[test]
    fn test_pos_field() {
        assert_eq!(pos_field(&["n", "vs", "vt"]), "n, vs, vt");
        assert_eq!(pos_field(&["adj-f", "n"]), "adj, n");
        assert_eq!(pos_field(&["adj-i", "adj-na"]), "adj-i, adj-na");
        assert_eq!(pos_field::<&str>(&[]), "");
    }

    #[test]
    fn test_pos_field_keeps_codes_that_normalize_alike() {
        assert_eq!(pos_field(&["adj-f", "adj"]), "adj, adj");
        assert_eq!(pos_field(&["adj-f", "", "n"]), "adj, n");
    }

    #[test]
    fn test_level_tag() {
        assert_eq!(level_tag("N3", "JLPT_"), "JLPT_N3");
        assert_eq!(level_tag("N1", ""), "N1");
    }
}
