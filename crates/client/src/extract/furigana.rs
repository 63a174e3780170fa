//! Furigana segmentation for `BASE（READING）` notation.
//!
//! Sentence content marks readings inline, e.g.
//! `日本（にほん）の学生（がくせい）は制服を着（き）ています。`
//!
//! A BASE is a maximal run of kanji or katakana (plus the iteration marks
//! `々` and `〆`); a READING is any non-empty text between full-width
//! parentheses. The scanner walks the text left to right:
//!
//! 1. At a BASE run immediately followed by a reading group, emit a ruby pair
//!    and continue after the closing parenthesis.
//! 2. At a BASE run with no reading group after it, emit the run as text. No
//!    later start inside the run can match either, since every suffix of the
//!    run ends at the same character.
//! 3. At a reading group with no BASE in front (e.g. after kana), emit it as a
//!    bare reading.
//! 4. Otherwise emit one character as text.
//!
//! Kana never forms a BASE, so particles like `の` are never pulled into a
//! pair and coincidental parentheses after kana are left alone.

const OPEN: char = '（';
const CLOSE: char = '）';

/// One piece of scanned sentence content.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Segment<'a> {
    /// Literal passthrough.
    Text(&'a str),
    /// A base run with its reading.
    Ruby { base: &'a str, reading: &'a str },
    /// A parenthesized group with no base to attach to.
    Reading(&'a str),
}

/// Whether `c` can be part of a BASE run.
pub fn is_base_char(c: char) -> bool {
    matches!(c, '\u{4E00}'..='\u{9FFF}' | '\u{30A0}'..='\u{30FF}' | '\u{3005}' | '\u{3006}')
}

/// Inner text of a `（...）` group at the start of `s`, if there is one.
fn reading_group(s: &str) -> Option<&str> {
    let inner = s.strip_prefix(OPEN)?;
    let end = inner.find(CLOSE)?;
    (end > 0).then(|| &inner[..end])
}

/// Byte length of a reading group whose inner text is `reading`.
fn group_len(reading: &str) -> usize {
    OPEN.len_utf8() + reading.len() + CLOSE.len_utf8()
}

/// Split `text` into literal, paired and bare-reading segments.
///
/// Adjacent literal characters are merged into one `Text` segment.
pub fn segment(text: &str) -> Vec<Segment<'_>> {
    let mut segments = Vec::new();
    let mut literal_start = 0;
    let mut i = 0;

    while i < text.len() {
        let rest = &text[i..];

        let base_len = rest
            .char_indices()
            .find(|(_, c)| !is_base_char(*c))
            .map_or(rest.len(), |(idx, _)| idx);

        if base_len > 0 {
            let base = &rest[..base_len];
            match reading_group(&rest[base_len..]) {
                Some(reading) => {
                    if literal_start < i {
                        segments.push(Segment::Text(&text[literal_start..i]));
                    }
                    segments.push(Segment::Ruby { base, reading });
                    i += base_len + group_len(reading);
                    literal_start = i;
                }
                None => i += base_len,
            }
            continue;
        }

        if let Some(reading) = reading_group(rest) {
            if literal_start < i {
                segments.push(Segment::Text(&text[literal_start..i]));
            }
            segments.push(Segment::Reading(reading));
            i += group_len(reading);
            literal_start = i;
            continue;
        }

        match rest.chars().next() {
            Some(c) => i += c.len_utf8(),
            None => break,
        }
    }

    if literal_start < text.len() {
        segments.push(Segment::Text(&text[literal_start..]));
    }

    segments
}

/// Drop every reading group, keeping the base text. Trimmed.
pub fn to_plain(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for seg in segment(text) {
        match seg {
            Segment::Text(s) => out.push_str(s),
            Segment::Ruby { base, .. } => out.push_str(base),
            Segment::Reading(_) => {}
        }
    }
    out.trim().to_string()
}

/// Convert every `BASE（READING）` into `<ruby>BASE<rt>READING</rt></ruby>`.
///
/// Bare reading groups stay as written. Trimmed.
pub fn to_annotated(text: &str) -> String {
    let mut out = String::with_capacity(text.len() * 2);
    for seg in segment(text) {
        match seg {
            Segment::Text(s) => out.push_str(s),
            Segment::Ruby { base, reading } => {
                out.push_str("<ruby>");
                out.push_str(base);
                out.push_str("<rt>");
                out.push_str(reading);
                out.push_str("</rt></ruby>");
            }
            Segment::Reading(reading) => {
                out.push(OPEN);
                out.push_str(reading);
                out.push(CLOSE);
            }
        }
    }
    out.trim().to_string()
}
