//! Extraction rules for heterogeneous vendor enrichment payloads.
//!
//! Vendors report the same logical signal ("daily installs", "banned") under
//! many shapes. Rather than hard-coding one schema, extraction is an ordered
//! table of rules evaluated in priority order; supporting a new vendor shape
//! means adding a rule, not editing logic.

use serde_json::Value;

use crate::constants::extract as defaults;
use crate::source::AppSignals;

/// Ordered field tables driving signal extraction from raw payloads.
#[derive(Clone, Debug)]
pub struct ExtractionRules {
    /// Scalar install-estimate paths, highest priority first.
    pub install_paths: Vec<Vec<String>>,
    /// Series fields whose last point stands in for the scalar estimate.
    pub series_keys: Vec<String>,
    /// Boolean fields directly asserting a ban when `true`.
    pub direct_flag_keys: Vec<String>,
    /// Boolean fields whose `false` means the listing is gone.
    pub inverted_flag_keys: Vec<String>,
    /// Field holding a free-text listing status.
    pub status_key: String,
    /// Sub-objects searched one level deep with the same strategies.
    pub nested_keys: Vec<String>,
    /// Status vocabulary marking a listing unavailable.
    pub ban_vocabulary: Vec<String>,
}

impl Default for ExtractionRules {
    fn default() -> Self {
        Self {
            install_paths: defaults::INSTALL_PATHS
                .iter()
                .map(|path| path.iter().map(|segment| segment.to_string()).collect())
                .collect(),
            series_keys: to_strings(&defaults::SERIES_KEYS),
            direct_flag_keys: to_strings(&defaults::DIRECT_FLAG_KEYS),
            inverted_flag_keys: to_strings(&defaults::INVERTED_FLAG_KEYS),
            status_key: defaults::STATUS_KEY.to_string(),
            nested_keys: to_strings(&defaults::NESTED_KEYS),
            ban_vocabulary: to_strings(&defaults::BAN_VOCABULARY),
        }
    }
}

fn to_strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|item| item.to_string()).collect()
}

impl ExtractionRules {
    /// Extract both enrichment signals from one raw payload.
    pub fn signals(&self, payload: &Value) -> AppSignals {
        AppSignals {
            daily_installs: self.daily_installs(payload),
            unavailable: self.availability(payload),
        }
    }

    /// Daily install estimate: scalar paths in priority order, then series
    /// fields taking the most recent point.
    pub fn daily_installs(&self, payload: &Value) -> Option<f64> {
        for path in &self.install_paths {
            if let Some(node) = walk(payload, path) {
                if let Some(value) = scalar_number(node) {
                    return Some(value);
                }
            }
        }
        for key in &self.series_keys {
            if let Some(Value::Array(points)) = payload.get(key) {
                let series: Vec<f64> = points.iter().filter_map(series_point).collect();
                if let Some(last) = series.last() {
                    return Some(*last);
                }
            }
        }
        None
    }

    /// Availability flag: `Some(true)` means banned/removed, `Some(false)`
    /// means live, `None` means the payload carries no verdict.
    ///
    /// Strategies run in priority order: direct ban booleans, inverted
    /// published/available booleans, free-text status against the ban
    /// vocabulary, then one level of recursion into known nested objects.
    pub fn availability(&self, payload: &Value) -> Option<bool> {
        self.availability_at(payload, 0)
    }

    fn availability_at(&self, payload: &Value, depth: usize) -> Option<bool> {
        for key in &self.direct_flag_keys {
            if let Some(Value::Bool(true)) = payload.get(key) {
                return Some(true);
            }
        }
        for key in &self.inverted_flag_keys {
            if let Some(Value::Bool(published)) = payload.get(key) {
                return Some(!published);
            }
        }
        if let Some(status) = payload.get(&self.status_key).and_then(Value::as_str) {
            let status = status.to_lowercase();
            if self
                .ban_vocabulary
                .iter()
                .any(|term| status.contains(term.as_str()))
            {
                return Some(true);
            }
        }
        if depth == 0 {
            for key in &self.nested_keys {
                if let Some(nested @ Value::Object(_)) = payload.get(key) {
                    if let Some(verdict) = self.availability_at(nested, depth + 1) {
                        return Some(verdict);
                    }
                }
            }
        }
        None
    }
}

fn walk<'a>(payload: &'a Value, path: &[String]) -> Option<&'a Value> {
    let mut node = payload;
    for segment in path {
        node = node.get(segment)?;
    }
    Some(node)
}

fn scalar_number(node: &Value) -> Option<f64> {
    match node {
        Value::Number(value) => value.as_f64(),
        Value::String(text) => text.trim().parse().ok(),
        Value::Array(items) => items.last().and_then(series_point),
        _ => None,
    }
}

fn series_point(point: &Value) -> Option<f64> {
    match point {
        Value::Object(fields) => ["value", "v", "count"]
            .iter()
            .find_map(|key| fields.get(*key))
            .and_then(scalar_number),
        other => scalar_number(other),
    }
}
