//! Scope-level audit flows over the injected collaborators.
//!
//! Both flows are partial-failure tolerant: a failing batch or candidate is
//! counted and skipped, fields stay unset, and an output artifact is always
//! produced. Only an unknown scope aborts a run.

use std::thread;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::aggregate::reduce;
use crate::cache::{cache_key, Lookup, ResultCache};
use crate::catalog::CatalogStore;
use crate::config::AuditConfig;
use crate::constants::cache as namespaces;
use crate::errors::AuditError;
use crate::mention::is_mentioned;
use crate::observation::{CanonicalRecord, Observation};
use crate::reconcile::{reconcile, CandidateAudit, EnrichedCandidate};
use crate::source::{
    with_retries, AppSignals, CandidateHit, CandidateSource, EnrichmentSource, InventorySource,
    MetricSource,
};
use crate::types::{CanonicalName, ScopeId, Title};

/// Outcome of one scope's volume fetch and reduction.
#[derive(Clone, Debug)]
pub struct VolumeReport {
    /// One record per matched brand, in catalog order.
    pub records: Vec<CanonicalRecord>,
    /// Observations whose surface matched no variant.
    pub dropped: usize,
    /// Variant batches skipped after retry exhaustion.
    pub failed_batches: usize,
}

/// One audit row per canonical brand.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct BrandAudit {
    /// Canonical brand identity.
    pub canonical: CanonicalName,
    /// Scope this row belongs to.
    pub scope: ScopeId,
    /// Representative competitor, when any candidate was found.
    pub competitor: Option<EnrichedCandidate>,
    /// Whether the brand already appears in the operated inventory.
    pub in_inventory: bool,
    /// Audit bundle: every candidate in stable search order.
    pub candidates: Vec<CandidateAudit>,
}

/// Outcome of one scope's brand audit.
#[derive(Clone, Debug)]
pub struct AuditReport {
    /// One row per canonical brand, in catalog order.
    pub rows: Vec<BrandAudit>,
    /// Brand searches skipped after retry exhaustion.
    pub search_failures: usize,
    /// Enrichment calls that failed and left candidate fields unset.
    pub enrichment_failures: usize,
}

/// Fetch search volumes for every variant of a scope and reduce them to one
/// record per canonical brand.
///
/// Variants fan out in deterministic sorted order, chunked to the configured
/// batch size; each batch is served through the cache and the retry policy.
pub fn fetch_scope_volumes(
    catalog: &CatalogStore,
    scope_id: &str,
    metrics: &dyn MetricSource,
    cache: &ResultCache,
    config: &AuditConfig,
) -> Result<VolumeReport, AuditError> {
    let scope = catalog.scope(scope_id)?;
    let variants = scope.all_variants();
    let mut observations: Vec<Observation> = Vec::new();
    let mut failed_batches = 0usize;

    let geo = scope.geo_id().to_string();
    for chunk in variants.chunks(config.effective_batch_size()) {
        let mut materials: Vec<&str> = vec![
            metrics.id(),
            scope.id(),
            scope.language(),
            geo.as_str(),
        ];
        materials.extend(chunk.iter().map(String::as_str));
        let key = cache_key(&materials);

        let lookup = cache.get_or_compute(
            namespaces::VOLUME_NAMESPACE,
            &key,
            config.cache_ttl_days,
            || {
                with_retries(&config.retry, metrics.id(), || {
                    metrics.fetch_volume(chunk, scope.geo_id(), scope.language())
                })
            },
        );
        let batch = match lookup {
            Ok(lookup) => {
                pace(&lookup, config.metric_pacing);
                lookup.value
            }
            Err(error) => {
                warn!(
                    scope_id = %scope.id(),
                    batch_len = chunk.len(),
                    %error,
                    "volume batch failed, skipping"
                );
                failed_batches += 1;
                continue;
            }
        };

        observations.extend(batch.into_iter().map(|(surface, bundle)| Observation {
            surface,
            scope: scope.id().to_string(),
            metrics: bundle,
        }));
    }

    let reduction = reduce(observations, scope_id, catalog)?;
    debug!(
        scope_id = %scope.id(),
        records = reduction.records.len(),
        dropped = reduction.dropped,
        failed_batches,
        "scope volume fetch complete"
    );
    Ok(VolumeReport {
        records: reduction.records,
        dropped: reduction.dropped,
        failed_batches,
    })
}

/// Load the operated-inventory title corpus used for mention flags.
///
/// An unreachable inventory degrades to an empty corpus (every brand reports
/// `in_inventory: false`) rather than aborting the audit.
pub fn load_inventory_titles(
    inventory: &dyn InventorySource,
    config: &AuditConfig,
) -> Vec<Title> {
    match with_retries(&config.retry, inventory.id(), || inventory.list_titles()) {
        Ok(titles) => titles,
        Err(error) => {
            warn!(source_id = %inventory.id(), %error, "inventory unavailable, using empty corpus");
            Vec::new()
        }
    }
}

/// Audit every canonical brand of a scope: search candidates, enrich them,
/// reconcile a representative, and flag brands already in inventory.
pub fn audit_scope(
    catalog: &CatalogStore,
    scope_id: &str,
    candidates: &dyn CandidateSource,
    enrichment: Option<&dyn EnrichmentSource>,
    inventory: &[Title],
    cache: &ResultCache,
    config: &AuditConfig,
) -> Result<AuditReport, AuditError> {
    let scope = catalog.scope(scope_id)?;
    let mut rows = Vec::with_capacity(scope.canonical_brands().len());
    let mut search_failures = 0usize;
    let mut enrichment_failures = 0usize;

    for brand in scope.canonical_brands() {
        let hits = match search_cached(brand, scope, candidates, cache, config) {
            Ok(hits) => hits,
            Err(error) => {
                warn!(scope_id = %scope.id(), brand = %brand, %error, "candidate search failed");
                search_failures += 1;
                Vec::new()
            }
        };

        let mut enriched = Vec::with_capacity(hits.len());
        for hit in hits {
            let signals = match enrichment {
                Some(source) => match describe_cached(source, &hit, cache, config) {
                    Ok(signals) => signals,
                    Err(error) => {
                        warn!(
                            external_id = %hit.external_id,
                            %error,
                            "enrichment failed, leaving fields unset"
                        );
                        enrichment_failures += 1;
                        AppSignals::default()
                    }
                },
                None => AppSignals::default(),
            };
            enriched.push(EnrichedCandidate::new(hit, signals));
        }

        let reconciliation = reconcile(&enriched);
        let (competitor, bundle) = match reconciliation {
            Some(reconciliation) => (Some(reconciliation.selected), reconciliation.candidates),
            None => (None, Vec::new()),
        };
        rows.push(BrandAudit {
            canonical: brand.clone(),
            scope: scope.id().to_string(),
            competitor,
            in_inventory: is_mentioned(brand, inventory),
            candidates: bundle,
        });
    }

    debug!(
        scope_id = %scope.id(),
        rows = rows.len(),
        search_failures,
        enrichment_failures,
        "scope audit complete"
    );
    Ok(AuditReport {
        rows,
        search_failures,
        enrichment_failures,
    })
}

fn search_cached(
    brand: &str,
    scope: &crate::catalog::Scope,
    candidates: &dyn CandidateSource,
    cache: &ResultCache,
    config: &AuditConfig,
) -> Result<Vec<CandidateHit>, AuditError> {
    let top_n = config.top_n.to_string();
    let key = cache_key(&[
        candidates.id(),
        scope.id(),
        scope.language(),
        top_n.as_str(),
        brand,
    ]);
    let lookup = cache.get_or_compute(
        namespaces::SEARCH_NAMESPACE,
        &key,
        config.cache_ttl_days,
        || {
            with_retries(&config.retry, candidates.id(), || {
                candidates.search(brand, scope.language(), scope.id(), config.top_n)
            })
        },
    )?;
    pace(&lookup, config.search_pacing);
    Ok(lookup.value)
}

fn describe_cached(
    enrichment: &dyn EnrichmentSource,
    hit: &CandidateHit,
    cache: &ResultCache,
    config: &AuditConfig,
) -> Result<AppSignals, AuditError> {
    let key = cache_key(&[enrichment.id(), hit.external_id.as_str()]);
    let lookup = cache.get_or_compute(
        namespaces::ENRICHMENT_NAMESPACE,
        &key,
        config.cache_ttl_days,
        || {
            with_retries(&config.retry, enrichment.id(), || {
                enrichment.describe(&hit.external_id)
            })
        },
    )?;
    pace(&lookup, config.enrich_pacing);
    Ok(lookup.value)
}

// Courtesy pause for rate-limited sources; only uncached calls pay it.
fn pace<T>(lookup: &Lookup<T>, delay: Duration) {
    if lookup.refreshed && !delay.is_zero() {
        thread::sleep(delay);
    }
}
