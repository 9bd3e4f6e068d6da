//! Reconciliation of competing enriched candidates into one representative.

use serde::{Deserialize, Serialize};

use crate::source::{AppSignals, CandidateHit};
use crate::types::{ExternalId, Title};

/// A search candidate with independently populated enrichment fields.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EnrichedCandidate {
    /// Store-assigned identifier.
    pub external_id: ExternalId,
    /// Listing title.
    pub title: Title,
    /// Estimated installs per day; unset when enrichment failed or was silent.
    pub daily_installs: Option<f64>,
    /// Ban/removal verdict; unset means unknown, never assumed live.
    pub unavailable: Option<bool>,
}

impl EnrichedCandidate {
    /// Combine a search hit with its enrichment signals.
    pub fn new(hit: CandidateHit, signals: AppSignals) -> Self {
        Self {
            external_id: hit.external_id,
            title: hit.title,
            daily_installs: signals.daily_installs,
            unavailable: signals.unavailable,
        }
    }
}

/// One audit row per candidate, kept in stable input order for downstream
/// review.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CandidateAudit {
    /// Listing title.
    pub title: Title,
    /// Install estimate as enriched, possibly unset.
    pub daily_installs: Option<f64>,
    /// Availability verdict as enriched, possibly unknown.
    pub unavailable: Option<bool>,
}

/// Outcome of reconciling one brand's candidate list.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Reconciliation {
    /// The representative candidate.
    pub selected: EnrichedCandidate,
    /// Audit bundle: every candidate in input order.
    pub candidates: Vec<CandidateAudit>,
}

/// Pick the representative among competing candidates.
///
/// The candidate with the maximum install estimate wins; ties keep the first
/// occurrence in input order (input order is the store's ranking). When no
/// candidate carries the metric, the first candidate is a deterministic
/// degraded fallback, so a non-empty input never yields "no result". Empty
/// input yields `None`.
pub fn reconcile(candidates: &[EnrichedCandidate]) -> Option<Reconciliation> {
    if candidates.is_empty() {
        return None;
    }

    let mut selected = 0usize;
    let mut best: Option<f64> = None;
    for (index, candidate) in candidates.iter().enumerate() {
        let Some(metric) = candidate.daily_installs else {
            continue;
        };
        if best.map_or(true, |current| metric > current) {
            best = Some(metric);
            selected = index;
        }
    }

    Some(Reconciliation {
        selected: candidates[selected].clone(),
        candidates: candidates
            .iter()
            .map(|candidate| CandidateAudit {
                title: candidate.title.clone(),
                daily_installs: candidate.daily_installs,
                unavailable: candidate.unavailable,
            })
            .collect(),
    })
}
