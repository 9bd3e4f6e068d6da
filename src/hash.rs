use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

use crate::types::CacheKey;

pub fn stable_hash_with(f: impl FnOnce(&mut DefaultHasher)) -> u64 {
    let mut hasher = DefaultHasher::new();
    f(&mut hasher);
    hasher.finish()
}

/// Derive a deterministic cache key from an ordered tuple of materials.
///
/// The same materials in the same order always produce the same key, across
/// processes and runs.
pub fn key_for_materials<S: AsRef<str>>(materials: &[S]) -> CacheKey {
    let value = stable_hash_with(|hasher| {
        materials.len().hash(hasher);
        for material in materials {
            material.as_ref().hash(hasher);
        }
    });
    format!("{value:016x}")
}
