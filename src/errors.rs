use std::io;

use thiserror::Error;

use crate::types::SourceId;

/// Error type for catalog configuration, source, and cache persistence failures.
#[derive(Debug, Error)]
pub enum AuditError {
    #[error("unknown scope '{scope_id}', expected one of: {known}")]
    UnknownScope { scope_id: String, known: String },
    #[error("unknown brand '{brand}' in scope '{scope_id}', expected one of: {known}")]
    UnknownBrand {
        brand: String,
        scope_id: String,
        known: String,
    },
    #[error("source '{source_id}' is unavailable: {reason}")]
    SourceUnavailable { source_id: SourceId, reason: String },
    #[error("cache store failure: {0}")]
    CacheStore(String),
    #[error(transparent)]
    Io(#[from] io::Error),
}

impl AuditError {
    /// `true` for errors that abort the requesting operation rather than a
    /// single item within it.
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            AuditError::UnknownScope { .. } | AuditError::UnknownBrand { .. }
        )
    }
}
