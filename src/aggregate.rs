//! MAX-reduction of per-variant observations into canonical records.

use indexmap::map::Entry;
use indexmap::IndexMap;
use tracing::debug;

use crate::catalog::CatalogStore;
use crate::errors::AuditError;
use crate::observation::{CanonicalRecord, Observation};
use crate::types::{CanonicalName, SurfaceString};

/// Result of reducing one scope's observations.
#[derive(Clone, Debug)]
pub struct Reduction {
    /// One record per brand that matched at least one observation, in catalog
    /// order.
    pub records: Vec<CanonicalRecord>,
    /// Observations whose surface matched no variant (noise, not errors).
    pub dropped: usize,
}

/// Collapse observations into one record per canonical brand.
///
/// Each observation's surface is canonicalized; misses are dropped and
/// counted. Per brand, the observation with the strictly greatest primary
/// metric wins and contributes its entire metric bundle; metrics are never
/// mixed across observations. A missing primary metric compares as zero but is
/// never materialized into the bundle.
pub fn reduce(
    observations: impl IntoIterator<Item = Observation>,
    scope_id: &str,
    catalog: &CatalogStore,
) -> Result<Reduction, AuditError> {
    let scope = catalog.scope(scope_id)?;
    let mut best: IndexMap<CanonicalName, Observation> = IndexMap::new();
    let mut dropped = 0usize;

    for observation in observations {
        let Some(canonical) = scope.canonicalize(&observation.surface) else {
            dropped += 1;
            continue;
        };
        match best.entry(canonical.clone()) {
            Entry::Occupied(mut slot) => {
                if beats(&observation, slot.get()) {
                    slot.insert(observation);
                }
            }
            Entry::Vacant(slot) => {
                slot.insert(observation);
            }
        }
    }

    let mut records = Vec::with_capacity(best.len());
    for brand in scope.canonical_brands() {
        if let Some(winner) = best.swap_remove(brand) {
            records.push(CanonicalRecord {
                canonical: brand.clone(),
                scope: scope.id().to_string(),
                surface: winner.surface,
                metrics: winner.metrics,
            });
        }
    }
    debug!(
        scope_id = %scope.id(),
        records = records.len(),
        dropped,
        "reduced observations to canonical records"
    );
    Ok(Reduction { records, dropped })
}

/// Replace-on-strictly-greater merge, associative and commutative.
///
/// Exact ties break lexicographically on the surface string so partial
/// results from concurrent shards combine to the same winner regardless of
/// arrival order.
fn beats(challenger: &Observation, incumbent: &Observation) -> bool {
    let challenger_primary = challenger.metrics.primary();
    let incumbent_primary = incumbent.metrics.primary();
    if challenger_primary != incumbent_primary {
        return challenger_primary > incumbent_primary;
    }
    tie_break(&challenger.surface, &incumbent.surface)
}

fn tie_break(challenger: &SurfaceString, incumbent: &SurfaceString) -> bool {
    challenger < incumbent
}
