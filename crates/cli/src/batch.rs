//! Bounded-concurrency lookups over many keys.
//!
//! Lookups run in parallel behind a semaphore; results come back in input
//! order. A failed lookup is recorded as not found and never stops the batch.

use std::fmt;
use std::sync::Arc;

use anyhow::Context;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use vocabfill_client::{BunproClient, PageSource};
use vocabfill_core::{Error, Note, VocabularyRecord, fill_note};

/// Upper bound on concurrent lookups.
pub const MAX_CONCURRENCY: usize = 16;

/// Counts reported after filling a batch of notes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FillSummary {
    pub filled: usize,
    pub skipped_no_kanji: usize,
    pub skipped_not_found: usize,
}

impl fmt::Display for FillSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "filled {} note(s). {} skipped (no kanji). {} not found.",
            self.filled, self.skipped_no_kanji, self.skipped_not_found
        )
    }
}

/// Look up every key, at most `concurrency` at a time.
///
/// The returned vector is parallel to `keys`.
pub async fn lookup_all<S>(
    client: Arc<BunproClient<S>>, keys: Vec<String>, concurrency: usize,
) -> anyhow::Result<Vec<Option<VocabularyRecord>>>
where
    S: PageSource + 'static,
{
    if concurrency == 0 || concurrency > MAX_CONCURRENCY {
        return Err(Error::InvalidInput(format!("concurrency must be between 1 and {MAX_CONCURRENCY}")).into());
    }

    let semaphore = Arc::new(Semaphore::new(concurrency));
    let mut join_set = JoinSet::new();
    let total = keys.len();

    for (index, key) in keys.into_iter().enumerate() {
        let permit = semaphore.clone().acquire_owned().await.context("lookup semaphore closed")?;
        let client = client.clone();

        join_set.spawn(async move {
            let _permit = permit;
            (index, client.fetch_vocabulary(&key).await)
        });
    }

    let mut results: Vec<Option<VocabularyRecord>> = vec![None; total];
    while let Some(joined) = join_set.join_next().await {
        let (index, record) = joined.context("lookup task failed")?;
        results[index] = record;
    }

    tracing::debug!(
        total,
        found = results.iter().filter(|r| r.is_some()).count(),
        "batch lookup finished"
    );

    Ok(results)
}

/// Look up and fill every note that has a `kanji` field.
pub async fn fill_notes<S>(
    client: Arc<BunproClient<S>>, notes: &mut [Note], concurrency: usize, tag_prefix: &str,
) -> anyhow::Result<FillSummary>
where
    S: PageSource + 'static,
{
    let mut summary = FillSummary::default();
    let mut pending: Vec<(usize, String)> = Vec::new();

    for (index, note) in notes.iter().enumerate() {
        match note.lookup_key() {
            Some(key) => pending.push((index, key.to_string())),
            None => summary.skipped_no_kanji += 1,
        }
    }

    let keys = pending.iter().map(|(_, key)| key.clone()).collect();
    let records = lookup_all(client, keys, concurrency).await?;

    for ((index, key), record) in pending.into_iter().zip(records) {
        let Some(record) = record else {
            summary.skipped_not_found += 1;
            continue;
        };

        let outcome = fill_note(&mut notes[index], &key, &record, tag_prefix);
        tracing::debug!(key = %key, fields = outcome.fields_written.len(), tag = ?outcome.tag_added, "filled note");
        summary.filled += 1;
    }

    Ok(summary)
}
