/// Identifier for a catalog scope (a country partition).
/// Examples: `ar`, `br`, `pl`
pub type ScopeId = String;
/// Canonical brand identity emitted in output artifacts.
/// Examples: `Bet365`, `LV BET`, `Galera.bet`
pub type CanonicalName = String;
/// Arbitrary surface string observed in an external source response.
/// Examples: `bet365 app`, `lvbet`, `GO BET`
pub type SurfaceString = String;
/// Query variant generated from a canonical brand for external lookups.
/// Examples: `Bet365`, `bet365`, `LVBET`
pub type VariantText = String;
/// Identifier assigned to a candidate by an external store.
/// Example: `com.bet365.sportsbook`
pub type ExternalId = String;
/// Display title of a store listing or inventory entry.
/// Example: `Bet365 - Sports Betting`
pub type Title = String;
/// Identifier for the external collaborator that produced a result.
/// Examples: `keyword_metrics`, `play_search`, `appspy`
pub type SourceId = String;
/// Hex-encoded deterministic cache key derived from query materials.
/// Example: `9f8a3c2d1b4e5f60`
pub type CacheKey = String;
/// Name of a durable cache partition, one JSON document each.
/// Examples: `volume_batches`, `candidate_search`, `enrichment`
pub type Namespace = String;
