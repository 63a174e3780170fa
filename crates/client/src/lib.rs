//! Client code for vocabfill.
//!
//! This crate provides the HTTP fetch pipeline, Bunpro page extraction and
//! furigana rendering shared by the CLI.

pub mod bunpro;
pub mod extract;
pub mod fetch;

pub use bunpro::BunproClient;
pub use extract::{RenderedSentence, Segment, extract_vocabulary, render, segment};
pub use fetch::{FetchClient, FetchConfig, FetchResponse, PageSource};
