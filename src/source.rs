//! External collaborator interfaces and retry plumbing.
//!
//! Ownership model:
//! - The four traits are the only seams through which the engine reaches the
//!   outside world; transport mechanics live behind them.
//! - All calls are synchronous and may block. Failures surface as
//!   `AuditError::SourceUnavailable` and are tolerated per item by callers.
//! - `with_retries` owns the bounded exponential backoff schedule so sources
//!   stay free of retry logic.

use std::collections::HashMap;
use std::sync::Mutex;
use std::thread;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::config::RetryPolicy;
use crate::errors::AuditError;
use crate::observation::MetricBundle;
use crate::types::{ExternalId, SurfaceString, Title, VariantText};

/// One candidate returned by a store search.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CandidateHit {
    /// Store-assigned identifier.
    pub external_id: ExternalId,
    /// Listing title as displayed by the store.
    pub title: Title,
}

/// Signals returned by a per-candidate enrichment lookup.
///
/// Fields are populated independently; either may be unset when its
/// enrichment call failed or carried no signal.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct AppSignals {
    /// Estimated installs per day, the candidate ranking metric.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub daily_installs: Option<f64>,
    /// Whether the listing is banned/removed; `None` means unknown.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unavailable: Option<bool>,
}

impl crate::cache::CachePayload for AppSignals {
    fn has_signal(&self) -> bool {
        self.daily_installs.is_some() || self.unavailable.is_some()
    }
}

/// Batchable search-volume provider.
pub trait MetricSource {
    /// Stable source identifier used in errors and logs.
    fn id(&self) -> &str;
    /// Fetch metric bundles for up to one batch of variants.
    ///
    /// Returns a mapping from the surface string exactly as reported back by
    /// the source; surfaces absent from the map produced no metrics.
    fn fetch_volume(
        &self,
        variants: &[VariantText],
        geo_id: u32,
        language: &str,
    ) -> Result<HashMap<SurfaceString, MetricBundle>, AuditError>;
}

/// Best-effort store search for competitor candidates.
pub trait CandidateSource {
    /// Stable source identifier used in errors and logs.
    fn id(&self) -> &str;
    /// Search the store for `query`, returning up to `top_n` ranked hits.
    fn search(
        &self,
        query: &str,
        language: &str,
        region: &str,
        top_n: usize,
    ) -> Result<Vec<CandidateHit>, AuditError>;
}

/// Per-candidate enrichment provider (install estimates, availability).
pub trait EnrichmentSource {
    /// Stable source identifier used in errors and logs.
    fn id(&self) -> &str;
    /// Describe one candidate; partial success is allowed.
    fn describe(&self, external_id: &str) -> Result<AppSignals, AuditError>;
}

/// Inventory of already-operated listings, used as the mention corpus.
pub trait InventorySource {
    /// Stable source identifier used in errors and logs.
    fn id(&self) -> &str;
    /// Titles of all inventory listings.
    fn list_titles(&self) -> Result<Vec<Title>, AuditError>;
}

/// Run `op` under the bounded retry schedule of `policy`.
///
/// Each failed attempt is logged and backed off exponentially; the final
/// failure is returned unchanged.
pub fn with_retries<T>(
    policy: &RetryPolicy,
    source_id: &str,
    mut op: impl FnMut() -> Result<T, AuditError>,
) -> Result<T, AuditError> {
    let attempts = policy.attempts.max(1);
    let mut attempt = 1u32;
    loop {
        match op() {
            Ok(value) => return Ok(value),
            Err(error) if attempt < attempts => {
                let delay = policy.delay_for(attempt);
                warn!(
                    source_id,
                    attempt,
                    delay_ms = delay.as_millis() as u64,
                    %error,
                    "source call failed, retrying"
                );
                if !delay.is_zero() {
                    thread::sleep(delay);
                }
                attempt += 1;
            }
            Err(error) => return Err(error),
        }
    }
}

/// In-memory metric source for tests and dry runs.
pub struct InMemoryMetricSource {
    id: String,
    bundles: HashMap<SurfaceString, MetricBundle>,
    calls: Mutex<usize>,
}

impl InMemoryMetricSource {
    /// Source that answers from a fixed surface-to-bundle table.
    pub fn new(id: impl Into<String>, bundles: HashMap<SurfaceString, MetricBundle>) -> Self {
        Self {
            id: id.into(),
            bundles,
            calls: Mutex::new(0),
        }
    }

    /// Number of fetch calls served so far.
    pub fn calls(&self) -> usize {
        *self.calls.lock().expect("call counter poisoned")
    }
}

impl MetricSource for InMemoryMetricSource {
    fn id(&self) -> &str {
        &self.id
    }

    fn fetch_volume(
        &self,
        variants: &[VariantText],
        _geo_id: u32,
        _language: &str,
    ) -> Result<HashMap<SurfaceString, MetricBundle>, AuditError> {
        *self.calls.lock().expect("call counter poisoned") += 1;
        let mut out = HashMap::new();
        for variant in variants {
            if let Some(bundle) = self.bundles.get(variant) {
                out.insert(variant.clone(), bundle.clone());
            }
        }
        Ok(out)
    }
}

/// In-memory candidate source answering from a per-query table.
pub struct InMemoryCandidateSource {
    id: String,
    hits: HashMap<String, Vec<CandidateHit>>,
}

impl InMemoryCandidateSource {
    /// Source that answers from a fixed query-to-hits table.
    pub fn new(id: impl Into<String>, hits: HashMap<String, Vec<CandidateHit>>) -> Self {
        Self {
            id: id.into(),
            hits,
        }
    }
}

impl CandidateSource for InMemoryCandidateSource {
    fn id(&self) -> &str {
        &self.id
    }

    fn search(
        &self,
        query: &str,
        _language: &str,
        _region: &str,
        top_n: usize,
    ) -> Result<Vec<CandidateHit>, AuditError> {
        let mut hits = self.hits.get(query).cloned().unwrap_or_default();
        hits.truncate(top_n);
        Ok(hits)
    }
}

/// In-memory enrichment source answering from a per-id table.
///
/// Ids absent from the table report `SourceUnavailable`, which makes scripted
/// partial-failure scenarios straightforward.
pub struct InMemoryEnrichmentSource {
    id: String,
    signals: HashMap<ExternalId, AppSignals>,
}

impl InMemoryEnrichmentSource {
    /// Source that answers from a fixed id-to-signals table.
    pub fn new(id: impl Into<String>, signals: HashMap<ExternalId, AppSignals>) -> Self {
        Self {
            id: id.into(),
            signals,
        }
    }
}

impl EnrichmentSource for InMemoryEnrichmentSource {
    fn id(&self) -> &str {
        &self.id
    }

    fn describe(&self, external_id: &str) -> Result<AppSignals, AuditError> {
        self.signals
            .get(external_id)
            .copied()
            .ok_or_else(|| AuditError::SourceUnavailable {
                source_id: self.id.clone(),
                reason: format!("no signals for '{external_id}'"),
            })
    }
}

/// In-memory inventory source with a fixed title list.
pub struct InMemoryInventorySource {
    id: String,
    titles: Vec<Title>,
}

impl InMemoryInventorySource {
    /// Source that reports a fixed inventory.
    pub fn new(id: impl Into<String>, titles: Vec<Title>) -> Self {
        Self {
            id: id.into(),
            titles,
        }
    }
}

impl InventorySource for InMemoryInventorySource {
    fn id(&self) -> &str {
        &self.id
    }

    fn list_titles(&self) -> Result<Vec<Title>, AuditError> {
        Ok(self.titles.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn retries_stop_after_success() {
        let attempts = Cell::new(0);
        let result = with_retries(&RetryPolicy::none(), "test", || {
            attempts.set(attempts.get() + 1);
            Ok::<_, AuditError>(7)
        });
        assert_eq!(result.unwrap(), 7);
        assert_eq!(attempts.get(), 1);
    }

    #[test]
    fn retries_are_bounded_and_surface_last_error() {
        let policy = RetryPolicy {
            attempts: 3,
            base_delay: std::time::Duration::ZERO,
            multiplier: 1.0,
            max_delay: std::time::Duration::ZERO,
        };
        let attempts = Cell::new(0);
        let result: Result<(), AuditError> = with_retries(&policy, "test", || {
            attempts.set(attempts.get() + 1);
            Err(AuditError::SourceUnavailable {
                source_id: "test".into(),
                reason: format!("attempt {}", attempts.get()),
            })
        });
        assert_eq!(attempts.get(), 3);
        let error = result.unwrap_err();
        assert!(error.to_string().contains("attempt 3"));
    }

    #[test]
    fn retry_recovers_mid_schedule() {
        let policy = RetryPolicy {
            attempts: 5,
            base_delay: std::time::Duration::ZERO,
            multiplier: 1.0,
            max_delay: std::time::Duration::ZERO,
        };
        let attempts = Cell::new(0);
        let result = with_retries(&policy, "test", || {
            attempts.set(attempts.get() + 1);
            if attempts.get() < 3 {
                Err(AuditError::SourceUnavailable {
                    source_id: "test".into(),
                    reason: "flaky".into(),
                })
            } else {
                Ok("ok")
            }
        });
        assert_eq!(result.unwrap(), "ok");
        assert_eq!(attempts.get(), 3);
    }

    #[test]
    fn in_memory_candidate_source_truncates_to_top_n() {
        let mut hits = HashMap::new();
        hits.insert(
            "bet365".to_string(),
            vec![
                CandidateHit {
                    external_id: "a".into(),
                    title: "A".into(),
                },
                CandidateHit {
                    external_id: "b".into(),
                    title: "B".into(),
                },
            ],
        );
        let source = InMemoryCandidateSource::new("store", hits);
        let result = source.search("bet365", "en", "br", 1).unwrap();
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].external_id, "a");
        assert!(source.search("missing", "en", "br", 5).unwrap().is_empty());
    }
}
