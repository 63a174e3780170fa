//! Location and schema of the embedded `__NEXT_DATA__` payload.
//!
//! The page is a Next.js render; vocabulary data and example sentences ship
//! in a single `<script id="__NEXT_DATA__" type="application/json">` block.
//!
//! Every schema field is optional. A field holding an unexpected JSON type is
//! read as absent, and list elements that do not fit are dropped one by one,
//! so format drift upstream degrades a record instead of failing the lookup.

use std::borrow::Cow;

use scraper::{Html, Selector};
use serde::Deserialize;
use serde::de::{DeserializeOwned, Deserializer};
use serde_json::Value;
use vocabfill_core::Error;

/// Text immediately preceding the JSON in the page template.
pub const MARKER: &str = r#"__NEXT_DATA__" type="application/json">"#;

const SCRIPT_END: &str = "</script>";

const SCRIPT_SELECTOR: &str = r#"script#__NEXT_DATA__[type="application/json"]"#;

/// Find the JSON text of the data island.
///
/// Tries the literal template marker first, then an HTML parse that does not
/// depend on attribute order.
pub fn locate(html: &str) -> Result<Cow<'_, str>, Error> {
    if let Some(pos) = html.find(MARKER) {
        let start = pos + MARKER.len();
        if let Some(len) = html[start..].find(SCRIPT_END) {
            tracing::debug!(start, len, "located payload by marker");
            return Ok(Cow::Borrowed(&html[start..start + len]));
        }
    }

    let selector = Selector::parse(SCRIPT_SELECTOR).map_err(|e| Error::InvalidInput(e.to_string()))?;
    let document = Html::parse_document(html);
    let script = document.select(&selector).next().ok_or(Error::MarkerMissing)?;

    tracing::debug!("located payload by script element");
    Ok(Cow::Owned(script.text().collect()))
}

/// Parse the data island.
pub fn parse(json: &str) -> Result<NextData, Error> {
    Ok(serde_json::from_str(json)?)
}

fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).ok())
}

fn lenient_list<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Array(items) => items
            .into_iter()
            .filter_map(|item| serde_json::from_value(item).ok())
            .collect(),
        _ => Vec::new(),
    })
}

/// Root of the data island.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NextData {
    #[serde(default, deserialize_with = "lenient")]
    pub props: Option<Props>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Props {
    #[serde(rename = "pageProps", default, deserialize_with = "lenient")]
    pub page_props: Option<PageProps>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PageProps {
    #[serde(default, deserialize_with = "lenient")]
    pub reviewable: Option<Reviewable>,
    #[serde(default, deserialize_with = "lenient")]
    pub included: Option<Included>,
}

/// The vocabulary entry itself.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Reviewable {
    #[serde(default, deserialize_with = "lenient")]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub kana: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub jlpt_level: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub meaning: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub jmdict_data: Option<JmdictData>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct JmdictData {
    #[serde(default, deserialize_with = "lenient_list")]
    pub sense: Vec<Sense>,
}

/// One JMdict sense.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Sense {
    #[serde(default, deserialize_with = "lenient_list")]
    pub gloss: Vec<Gloss>,
    #[serde(rename = "partOfSpeech", default, deserialize_with = "lenient_list")]
    pub part_of_speech: Vec<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Gloss {
    #[serde(default, deserialize_with = "lenient")]
    pub lang: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub text: Option<String>,
}

impl Gloss {
    /// Non-empty English gloss text.
    pub fn english(&self) -> Option<&str> {
        if self.lang.as_deref() != Some("eng") {
            return None;
        }
        self.text.as_deref().filter(|t| !t.is_empty())
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Included {
    #[serde(rename = "studyQuestions", default, deserialize_with = "lenient_list")]
    pub study_questions: Vec<StudyQuestion>,
}

/// An example sentence with a blank for the vocabulary word.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct StudyQuestion {
    #[serde(default, deserialize_with = "lenient")]
    pub content: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub translation: Option<String>,
    /// Kana form of the word.
    #[serde(default, deserialize_with = "lenient")]
    pub answer: Option<String>,
    /// Kanji form of the word, when it has one.
    #[serde(default, deserialize_with = "lenient")]
    pub kanji_answer: Option<String>,
}

impl NextData {
    pub fn page_props(&self) -> Option<&PageProps> {
        self.props.as_ref()?.page_props.as_ref()
    }

    pub fn reviewable(&self) -> Option<&Reviewable> {
        self.page_props()?.reviewable.as_ref()
    }

    pub fn senses(&self) -> &[Sense] {
        self.reviewable()
            .and_then(|r| r.jmdict_data.as_ref())
            .map(|j| j.sense.as_slice())
            .unwrap_or_default()
    }

    pub fn study_questions(&self) -> &[StudyQuestion] {
        self.page_props()
            .and_then(|p| p.included.as_ref())
            .map(|i| i.study_questions.as_slice())
            .unwrap_or_default()
    }
}
