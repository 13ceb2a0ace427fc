// src/harvest.rs
//! The harvest loop: discover pages, fetch each in order, normalize, persist.
//!
//! Strictly sequential. One page is fetched, normalized and handed to the
//! sink before the next request is sent.

use crate::api::{FeedbackSource, PageDiscovery, PageFetch};
use crate::error::AppError;
use crate::model::{normalize, FeedbackRecord};
use crate::output::{RecordSink, SinkSummary, SkipLog};
use crate::types::{PageSize, PublicationId, ValidationError};
use chrono::{DateTime, Utc};
use rand::Rng;
use std::time::Duration;

/// Randomized courtesy pause taken every `batch_size` harvested records.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PausePolicy {
    batch_size: u32,
    min_ms: u64,
    max_ms: u64,
}

impl PausePolicy {
    pub fn new(batch_size: u32, min_ms: u64, max_ms: u64) -> Result<Self, ValidationError> {
        if batch_size == 0 {
            return Err(ValidationError::OutOfBounds {
                value: 0,
                min: 1,
                max: u32::MAX,
            });
        }
        if min_ms > max_ms {
            return Err(ValidationError::InvalidPauseRange { min_ms, max_ms });
        }
        Ok(Self {
            batch_size,
            min_ms,
            max_ms,
        })
    }

    pub fn batch_size(&self) -> u32 {
        self.batch_size
    }

    /// Multiples of the batch size passed when the total went from `before` to `after`.
    pub fn crossings(&self, before: usize, after: usize) -> usize {
        let batch = self.batch_size as usize;
        (after / batch).saturating_sub(before / batch)
    }

    /// A duration drawn uniformly from the configured range.
    pub fn pick_duration(&self) -> Duration {
        if self.min_ms == self.max_ms {
            return Duration::from_millis(self.min_ms);
        }
        Duration::from_millis(rand::rng().random_range(self.min_ms..=self.max_ms))
    }
}

/// Everything the loop needs to know about one run.
#[derive(Debug, Clone)]
pub struct HarvestPlan {
    pub publication: PublicationId,
    pub page_size: PageSize,
    pub download_base: String,
    pub pause: PausePolicy,
}

/// Outcome of a completed run.
#[derive(Debug, Clone)]
pub struct HarvestReport {
    pub publication: PublicationId,
    pub discovery: PageDiscovery,
    pub pages_requested: u32,
    pub pages_fetched: u32,
    pub skipped_pages: Vec<u32>,
    pub records_harvested: usize,
    pub pauses: usize,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    pub sink: SinkSummary,
}

impl HarvestReport {
    pub fn elapsed(&self) -> chrono::Duration {
        self.finished_at - self.started_at
    }

    pub fn is_complete(&self) -> bool {
        self.discovery.is_available() && self.skipped_pages.is_empty()
    }
}

/// Drives a `FeedbackSource` into a `RecordSink`.
pub struct Harvester<'a> {
    source: &'a dyn FeedbackSource,
    plan: &'a HarvestPlan,
}

impl<'a> Harvester<'a> {
    pub fn new(source: &'a dyn FeedbackSource, plan: &'a HarvestPlan) -> Self {
        Self { source, plan }
    }

    /// Runs the whole harvest.
    ///
    /// Pages answered with a non-success status go to `skip_log` and the
    /// loop moves on. Transport errors, malformed bodies and sink errors
    /// abort the run.
    pub async fn run(
        &self,
        sink: &mut dyn RecordSink,
        skip_log: &mut SkipLog,
    ) -> Result<HarvestReport, AppError> {
        let started_at = Utc::now();
        let plan = self.plan;

        // A destination that cannot be used fails before any request goes out.
        sink.begin()?;

        log::info!(
            "Discovering pages for publication {} (page size {})",
            plan.publication,
            plan.page_size
        );
        let discovery = self
            .source
            .discover_pages(plan.publication, plan.page_size)
            .await?;
        match discovery {
            PageDiscovery::Available(pages) => log::info!("{} pages to fetch", pages),
            PageDiscovery::Unavailable { status } => log::warn!(
                "Feedback API unavailable (HTTP {}); nothing to fetch",
                status
            ),
        }

        let total_pages = discovery.total_pages();
        let mut harvested = 0usize;
        let mut pages_fetched = 0u32;
        let mut pauses = 0usize;

        for page in 0..total_pages {
            let fetch = self
                .source
                .fetch_page(plan.publication, plan.page_size, page)
                .await?;

            match fetch {
                PageFetch::Records(raw) => {
                    let records: Vec<FeedbackRecord> = raw
                        .into_iter()
                        .map(|record| normalize(record, &plan.download_base))
                        .collect();
                    let on_page = records.len();
                    sink.write_page(page, records)?;

                    let before = harvested;
                    harvested += on_page;
                    pages_fetched += 1;
                    log::info!(
                        "{}",
                        progress_line(page, total_pages, plan.page_size, on_page, harvested)
                    );

                    if page + 1 < total_pages {
                        pauses += self.pause_if_due(before, harvested).await;
                    }
                }
                PageFetch::Unavailable { status } => {
                    log::warn!("Page index {} returned HTTP {}; skipping", page, status);
                    skip_log.record(page)?;
                }
            }
        }

        let sink_summary = sink.finish()?;

        Ok(HarvestReport {
            publication: plan.publication,
            discovery,
            pages_requested: total_pages,
            pages_fetched,
            skipped_pages: skip_log.skipped().to_vec(),
            records_harvested: harvested,
            pauses,
            started_at,
            finished_at: Utc::now(),
            sink: sink_summary,
        })
    }

    /// Sleeps once per batch boundary crossed. Returns the number of pauses.
    async fn pause_if_due(&self, before: usize, after: usize) -> usize {
        let crossings = self.plan.pause.crossings(before, after);
        for _ in 0..crossings {
            let pause = self.plan.pause.pick_duration();
            log::debug!(
                "{} records harvested; pausing for {} ms",
                after,
                pause.as_millis()
            );
            if !pause.is_zero() {
                tokio::time::sleep(pause).await;
            }
        }
        crossings
    }
}

/// Progress for one fetched page, keyed by the same index the skip log uses.
fn progress_line(
    page: u32,
    total_pages: u32,
    page_size: PageSize,
    on_page: usize,
    harvested: usize,
) -> String {
    format!(
        "Page index {} of {} (size {}): {} feedbacks, {} so far",
        page, total_pages, page_size, on_page, harvested
    )
}
