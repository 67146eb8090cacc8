//! Content retrieval for discovered files
//!
//! Every reference gets its own GET. Failures are recorded per reference and
//! filtered out afterwards, so one bad file never aborts the batch.

use crate::config::FetcherConfig;
use crate::crawler::fetcher::fetch_text;
use crate::url::FileReference;
use crate::FetchError;
use reqwest::Client;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;

/// Body text retrieved for a single file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetrievedContent {
    /// Where the body came from
    pub source: FileReference,

    /// Response body text
    pub body: String,
}

/// The result of fetching one reference
#[derive(Debug)]
pub struct FetchOutcome {
    pub reference: FileReference,
    pub result: Result<String, FetchError>,
}

impl FetchOutcome {
    /// Converts a successful outcome into retrieved content
    pub fn into_content(self) -> Option<RetrievedContent> {
        match self.result {
            Ok(body) => Some(RetrievedContent {
                source: self.reference,
                body,
            }),
            Err(_) => None,
        }
    }
}

/// Retry behaviour for transient per-file failures
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Attempts after the first one
    pub max_retries: u32,

    /// Pause before each retry
    pub delay: Duration,
}

impl RetryPolicy {
    /// A policy that never retries
    pub fn none() -> Self {
        Self {
            max_retries: 0,
            delay: Duration::ZERO,
        }
    }
}

impl From<&FetcherConfig> for RetryPolicy {
    fn from(config: &FetcherConfig) -> Self {
        Self {
            max_retries: config.max_retries,
            delay: Duration::from_millis(config.retry_delay_ms),
        }
    }
}

/// Downloads the bodies of discovered files
#[derive(Debug, Clone)]
pub struct ContentCollector {
    client: Client,
    max_concurrent: usize,
    retry: RetryPolicy,
}

impl ContentCollector {
    /// Creates a sequential collector with no retries
    pub fn new(client: Client) -> Self {
        Self {
            client,
            max_concurrent: 1,
            retry: RetryPolicy::none(),
        }
    }

    /// Creates a collector using the concurrency and retry settings in `config`
    pub fn from_config(client: Client, config: &FetcherConfig) -> Self {
        Self {
            client,
            max_concurrent: config.max_concurrent_fetches.max(1) as usize,
            retry: RetryPolicy::from(config),
        }
    }

    pub fn with_max_concurrent(mut self, max_concurrent: usize) -> Self {
        self.max_concurrent = max_concurrent.max(1);
        self
    }

    pub fn with_retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    /// Fetches every reference and returns the successful bodies
    ///
    /// The output keeps the input order and is never longer than the input.
    /// Failed references are logged and left out.
    pub async fn collect(&self, refs: Vec<FileReference>) -> Vec<RetrievedContent> {
        let requested = refs.len();

        let contents: Vec<RetrievedContent> = self
            .collect_outcomes(refs)
            .await
            .into_iter()
            .filter_map(|outcome| {
                if let Err(e) = &outcome.result {
                    tracing::warn!("Skipping {}: {}", outcome.reference, e);
                }
                outcome.into_content()
            })
            .collect();

        tracing::info!(
            "Retrieved {} of {} files ({} skipped)",
            contents.len(),
            requested,
            requested - contents.len()
        );

        contents
    }

    /// Fetches every reference and returns one outcome per reference, in order
    pub async fn collect_outcomes(&self, refs: Vec<FileReference>) -> Vec<FetchOutcome> {
        if self.max_concurrent <= 1 || refs.len() <= 1 {
            let mut outcomes = Vec::with_capacity(refs.len());
            for reference in refs {
                let result = fetch_with_retry(&self.client, &reference, self.retry).await;
                outcomes.push(FetchOutcome { reference, result });
            }
            return outcomes;
        }

        self.collect_concurrent(refs).await
    }

    /// Fans out under a semaphore, then restores input order by index
    async fn collect_concurrent(&self, refs: Vec<FileReference>) -> Vec<FetchOutcome> {
        let semaphore = Arc::new(Semaphore::new(self.max_concurrent));
        let mut tasks = JoinSet::new();

        for (index, reference) in refs.iter().cloned().enumerate() {
            let client = self.client.clone();
            let semaphore = Arc::clone(&semaphore);
            let retry = self.retry;

            tasks.spawn(async move {
                let _permit = semaphore.acquire_owned().await.ok();
                let result = fetch_with_retry(&client, &reference, retry).await;
                (index, result)
            });
        }

        let mut results = Vec::with_capacity(refs.len());
        let mut failure = None;
        while let Some(joined) = tasks.join_next().await {
            match joined {
                Ok(entry) => results.push(entry),
                Err(e) => {
                    tracing::error!("Fetch task failed: {}", e);
                    failure = Some(e.to_string());
                }
            }
        }

        merge_by_index(refs, results, failure.as_deref().unwrap_or("task lost"))
    }
}

/// Pairs each reference with its result by input index
///
/// A reference whose task never reported back gets a `FetchError::Aborted`
/// outcome, so the output always has one entry per reference.
fn merge_by_index(
    refs: Vec<FileReference>,
    results: Vec<(usize, Result<String, FetchError>)>,
    reason: &str,
) -> Vec<FetchOutcome> {
    let mut slots: Vec<Option<Result<String, FetchError>>> = refs.iter().map(|_| None).collect();
    for (index, result) in results {
        if let Some(slot) = slots.get_mut(index) {
            *slot = Some(result);
        }
    }

    refs.into_iter()
        .zip(slots)
        .map(|(reference, slot)| {
            let result = slot.unwrap_or_else(|| {
                Err(FetchError::Aborted {
                    url: reference.to_string(),
                    reason: reason.to_string(),
                })
            });
            FetchOutcome { reference, result }
        })
        .collect()
}

/// Fetches one reference, retrying transient failures per `retry`
async fn fetch_with_retry(
    client: &Client,
    reference: &FileReference,
    retry: RetryPolicy,
) -> Result<String, FetchError> {
    let mut attempt = 0;

    loop {
        match fetch_text(client, reference.as_url()).await {
            Ok(body) => return Ok(body),
            Err(e) if e.is_transient() && attempt < retry.max_retries => {
                attempt += 1;
                tracing::debug!(
                    "Retrying {} after error ({}/{}): {}",
                    reference,
                    attempt,
                    retry.max_retries,
                    e
                );
                tokio::time::sleep(retry.delay).await;
            }
            Err(e) => return Err(e),
        }
    }
}
