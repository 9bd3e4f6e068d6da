/// Constants used by cache namespaces and on-disk layout.
pub mod cache {
    /// Namespace holding metric-source volume batch responses.
    pub const VOLUME_NAMESPACE: &str = "volume_batches";
    /// Namespace holding candidate-source search responses.
    pub const SEARCH_NAMESPACE: &str = "candidate_search";
    /// Namespace holding per-candidate enrichment signals.
    pub const ENRICHMENT_NAMESPACE: &str = "enrichment";
    /// Default directory for persisted cache documents.
    pub const DEFAULT_CACHE_DIR: &str = ".audit_cache";
    /// Default entry lifetime in days.
    pub const DEFAULT_TTL_DAYS: i64 = 3;
}

/// Constants used by variant fan-out and external fetch configuration.
pub mod fetch {
    /// Default number of variants per metric-source batch request.
    pub const DEFAULT_BATCH_SIZE: usize = 700;
    /// Upper bound accepted by metric sources per batch request.
    pub const MAX_BATCH_SIZE: usize = 1000;
    /// Default number of candidates requested per brand search.
    pub const DEFAULT_TOP_N: usize = 10;
    /// Default bounded retry attempts for a failing external call.
    pub const DEFAULT_RETRY_ATTEMPTS: u32 = 5;
    /// Default exponential backoff multiplier between attempts.
    pub const DEFAULT_BACKOFF_MULTIPLIER: f64 = 1.5;
    /// Default pacing after an uncached metric-source call, in milliseconds.
    pub const DEFAULT_METRIC_PACING_MS: u64 = 700;
    /// Default pacing after an uncached candidate search, in milliseconds.
    pub const DEFAULT_SEARCH_PACING_MS: u64 = 200;
    /// Default pacing after an uncached enrichment call, in milliseconds.
    pub const DEFAULT_ENRICH_PACING_MS: u64 = 150;
}

/// Constants used by availability-flag and install-estimate extraction.
pub mod extract {
    /// Boolean fields that directly assert a ban/removal when `true`.
    pub const DIRECT_FLAG_KEYS: [&str; 6] = [
        "is_banned",
        "banned",
        "removed",
        "suspended",
        "unpublished",
        "deleted",
    ];
    /// Boolean fields whose `false` means the listing is gone.
    pub const INVERTED_FLAG_KEYS: [&str; 2] = ["is_published", "is_available"];
    /// Free-text status vocabulary indicating an unavailable listing.
    pub const BAN_VOCABULARY: [&str; 7] = [
        "banned",
        "removed",
        "suspended",
        "unpublished",
        "deleted",
        "not available",
        "terminated",
    ];
    /// Field holding a free-text listing status.
    pub const STATUS_KEY: &str = "status";
    /// Nested sub-objects searched one level deep.
    pub const NESTED_KEYS: [&str; 4] = ["summary", "metrics", "app", "details"];
    /// Scalar install-estimate paths, in priority order.
    pub const INSTALL_PATHS: [&[&str]; 7] = [
        &["installs_daily"],
        &["daily_installs"],
        &["est_installs_per_day"],
        &["installs_per_day"],
        &["metrics", "daily_installs"],
        &["summary", "daily_installs"],
        &["downloads", "daily"],
    ];
    /// Series fields whose last point serves as the install estimate.
    pub const SERIES_KEYS: [&str; 4] = [
        "daily_installs",
        "installs_daily",
        "downloads_daily",
        "installs_per_day",
    ];
}

/// Constants used by the inventory mention matcher.
pub mod mention {
    /// Minimum token length kept by the tokenizer. Two-letter runs stay so
    /// compound brands like `LV BET` keep both halves.
    pub const MIN_TOKEN_LEN: usize = 2;
    /// Minimum length for a single token to match on its own.
    pub const STRONG_TOKEN_LEN: usize = 4;
    /// Shared tokens required for a multi-token brand match.
    pub const MIN_SHARED_TOKENS: usize = 2;
}
