//! Ranked join of per-brand audits with their search-volume records.
//!
//! The volume fetch and the brand audit run independently; this module joins
//! their outputs on the canonical key, applies the review filters, and orders
//! the rows for downstream consumption. Rows missing a volume record keep the
//! field unset and compare as zero, matching the aggregator's convention.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::audit::BrandAudit;
use crate::observation::CanonicalRecord;
use crate::reconcile::EnrichedCandidate;
use crate::types::{CanonicalName, ScopeId};

/// Filters and ordering applied to the ranked join.
#[derive(Clone, Debug, Default)]
pub struct RankOptions {
    /// Drop rows above this volume unless they have a competitor.
    pub cap_upper: Option<f64>,
    /// Drop rows below this volume unless they have a competitor.
    pub cap_lower: Option<f64>,
    /// Keep only rows with a reconciled competitor.
    pub only_with_competitor: bool,
    /// Keep only brands absent from the operated inventory.
    pub only_not_in_inventory: bool,
    /// Sort volumes ascending instead of descending.
    pub ascending: bool,
    /// Group rows by scope before ordering by volume.
    pub group_by_scope: bool,
    /// Keep only the first N rows per scope after sorting.
    pub top_per_scope: Option<usize>,
}

/// One ranked row: a brand audit joined with its volume record.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RankedBrand {
    /// Canonical brand identity.
    pub canonical: CanonicalName,
    /// Scope the row belongs to.
    pub scope: ScopeId,
    /// Search volume of the winning observation; unset when no observation
    /// matched the brand.
    pub search_volume: Option<f64>,
    /// Representative competitor, when any candidate was found.
    pub competitor: Option<EnrichedCandidate>,
    /// Whether the brand already appears in the operated inventory.
    pub in_inventory: bool,
}

/// Join audit rows with volume records on the canonical key, filter, and sort.
///
/// Both inputs may span several scopes; rows join on (scope, brand). The
/// volume caps only drop rows without a competitor, so a capped keyword still
/// surfaces whenever someone competes on it. Sorting is stable; equal volumes
/// keep the audit's catalog order.
pub fn rank(
    volumes: &[CanonicalRecord],
    audits: &[BrandAudit],
    options: &RankOptions,
) -> Vec<RankedBrand> {
    let volume_of: HashMap<(&str, &str), Option<f64>> = volumes
        .iter()
        .map(|record| {
            (
                (record.scope.as_str(), record.canonical.as_str()),
                record.metrics.search_volume,
            )
        })
        .collect();

    let mut rows: Vec<RankedBrand> = audits
        .iter()
        .map(|row| RankedBrand {
            canonical: row.canonical.clone(),
            scope: row.scope.clone(),
            search_volume: volume_of
                .get(&(row.scope.as_str(), row.canonical.as_str()))
                .copied()
                .flatten(),
            competitor: row.competitor.clone(),
            in_inventory: row.in_inventory,
        })
        .collect();

    rows.retain(|row| {
        if options.only_not_in_inventory && row.in_inventory {
            return false;
        }
        let has_competitor = row.competitor.is_some();
        if options.only_with_competitor && !has_competitor {
            return false;
        }
        let volume = row.search_volume.unwrap_or(0.0);
        if let Some(cap) = options.cap_upper {
            if !has_competitor && volume > cap {
                return false;
            }
        }
        if let Some(cap) = options.cap_lower {
            if !has_competitor && volume < cap {
                return false;
            }
        }
        true
    });

    rows.sort_by(|a, b| {
        let volume = |row: &RankedBrand| row.search_volume.unwrap_or(0.0);
        let by_volume = if options.ascending {
            volume(a).total_cmp(&volume(b))
        } else {
            volume(b).total_cmp(&volume(a))
        };
        if options.group_by_scope {
            a.scope.cmp(&b.scope).then(by_volume)
        } else {
            by_volume
        }
    });

    if let Some(limit) = options.top_per_scope {
        let mut taken: HashMap<ScopeId, usize> = HashMap::new();
        rows.retain(|row| {
            let count = taken.entry(row.scope.clone()).or_insert(0);
            *count += 1;
            *count <= limit
        });
    }
    rows
}
