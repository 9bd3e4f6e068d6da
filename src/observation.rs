use serde::{Deserialize, Serialize};

use crate::types::{CanonicalName, ScopeId, SurfaceString};

/// Named metrics reported for one surface string by a metric source.
///
/// Every field tracks its own presence; an absent field means "not measured",
/// never zero. Fields from different observations are never mixed.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct MetricBundle {
    /// Monthly search volume, the primary ranking metric.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub search_volume: Option<f64>,
    /// Cost-per-click estimate.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cpc: Option<f64>,
    /// Advertiser competition estimate.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub competition: Option<f64>,
    /// Monthly trend series, most recent last.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trend: Option<Vec<f64>>,
}

impl MetricBundle {
    /// Primary metric as used for ranking comparisons.
    ///
    /// A missing volume compares as zero; the bundle itself keeps the field
    /// absent.
    pub fn primary(&self) -> f64 {
        self.search_volume.unwrap_or(0.0)
    }

    /// `true` when no field carries a measurement.
    pub fn is_empty(&self) -> bool {
        self.search_volume.is_none()
            && self.cpc.is_none()
            && self.competition.is_none()
            && self.trend.is_none()
    }
}

/// One per-variant measurement returned by a metric source.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Observation {
    /// Surface string exactly as the source reported it.
    pub surface: SurfaceString,
    /// Scope the query batch was issued for.
    pub scope: ScopeId,
    /// Metrics reported for this surface.
    pub metrics: MetricBundle,
}

/// Reduction of all observations that canonicalize to one brand in a scope.
///
/// Carries the full metric bundle of the single winning observation.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CanonicalRecord {
    /// Canonical brand identity.
    pub canonical: CanonicalName,
    /// Scope this record belongs to.
    pub scope: ScopeId,
    /// Surface string of the winning observation.
    pub surface: SurfaceString,
    /// Metrics of the winning observation, source-consistent.
    pub metrics: MetricBundle,
}
