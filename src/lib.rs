#![doc = include_str!("../README.md")]
#![warn(missing_docs)]

/// MAX-reduction of observations into canonical records.
pub mod aggregate;
/// Scope-level volume-fetch and brand-audit flows.
pub mod audit;
/// Durable TTL cache with negative-result eviction.
pub mod cache;
/// Per-scope brand catalog, variant expansion, and reverse lookup.
pub mod catalog;
/// Audit configuration and retry policies.
pub mod config;
/// Centralized constants used across catalog, cache, and extraction.
pub mod constants;
/// Extraction rules for heterogeneous vendor payloads.
pub mod extract;
mod hash;
/// Inventory mention matching.
pub mod mention;
/// Text folding helpers.
pub mod normalize;
/// Observation and canonical-record data types.
pub mod observation;
/// Ranked join of brand audits with search volumes.
pub mod rank;
/// Candidate reconciliation.
pub mod reconcile;
/// External collaborator interfaces and retry plumbing.
pub mod source;
/// Shared type aliases.
pub mod types;

mod errors;

pub use aggregate::{reduce, Reduction};
pub use audit::{
    audit_scope, fetch_scope_volumes, load_inventory_titles, AuditReport, BrandAudit, VolumeReport,
};
pub use cache::{cache_key, CachePayload, Lookup, ResultCache};
pub use catalog::{CatalogStore, Scope, ScopeDef};
pub use config::{AuditConfig, RetryPolicy};
pub use errors::AuditError;
pub use extract::ExtractionRules;
pub use mention::is_mentioned;
pub use observation::{CanonicalRecord, MetricBundle, Observation};
pub use rank::{rank, RankOptions, RankedBrand};
pub use reconcile::{reconcile, CandidateAudit, EnrichedCandidate, Reconciliation};
pub use source::{
    with_retries, AppSignals, CandidateHit, CandidateSource, EnrichmentSource, InventorySource,
    MetricSource,
};
pub use types::{CanonicalName, ScopeId, SurfaceString, Title, VariantText};
