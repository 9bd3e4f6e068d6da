//! Per-scope brand catalog, variant expansion, and reverse lookup.
//!
//! Ownership model:
//! - `ScopeDef` is static configuration: the curated brand list plus extra
//!   aliases for one country partition. Edited only by changing the catalog
//!   definition, never at runtime.
//! - `CatalogStore` owns the scopes and builds each scope's variant map and
//!   reverse index lazily, memoized for the life of the store.

use std::collections::{HashMap, HashSet};
use std::sync::OnceLock;

use indexmap::IndexMap;
use tracing::warn;

use crate::errors::AuditError;
use crate::normalize::{normalize, uniq_case_insensitive};
use crate::types::{CanonicalName, ScopeId, VariantText};

mod builtin;

/// Static definition of one catalog scope.
#[derive(Clone, Debug)]
pub struct ScopeDef {
    /// Unique scope id (lowercase ISO2 country code by convention).
    pub id: ScopeId,
    /// Geo identifier passed to metric sources (Google Ads location id).
    pub geo_id: u32,
    /// Language tag passed to external sources.
    pub language: String,
    /// Human-readable title for tables and summaries.
    pub title: String,
    /// Curated canonical brand list; order defines output order.
    pub brands: Vec<CanonicalName>,
    /// Extra curated aliases per brand, beyond the generated base variants.
    pub aliases: IndexMap<CanonicalName, Vec<VariantText>>,
}

impl ScopeDef {
    /// Build a scope definition from borrowed configuration data.
    pub fn new(id: &str, geo_id: u32, language: &str, title: &str, brands: &[&str]) -> Self {
        Self {
            id: id.to_lowercase(),
            geo_id,
            language: language.to_string(),
            title: title.to_string(),
            brands: brands.iter().map(|brand| brand.to_string()).collect(),
            aliases: IndexMap::new(),
        }
    }

    /// Attach curated extra aliases to brands in this scope.
    pub fn with_aliases(mut self, aliases: &[(&str, &[&str])]) -> Self {
        for (brand, extras) in aliases {
            self.aliases.insert(
                brand.to_string(),
                extras.iter().map(|extra| extra.to_string()).collect(),
            );
        }
        self
    }
}

/// One catalog scope with lazily built lookup structures.
#[derive(Debug)]
pub struct Scope {
    def: ScopeDef,
    built: OnceLock<BuiltScope>,
}

#[derive(Debug)]
struct BuiltScope {
    brands: Vec<CanonicalName>,
    variants: IndexMap<CanonicalName, Vec<VariantText>>,
    reverse: HashMap<String, CanonicalName>,
    flat: Vec<VariantText>,
}

impl Scope {
    fn new(def: ScopeDef) -> Self {
        Self {
            def,
            built: OnceLock::new(),
        }
    }

    /// Scope id.
    pub fn id(&self) -> &str {
        &self.def.id
    }

    /// Geo identifier for metric-source requests.
    pub fn geo_id(&self) -> u32 {
        self.def.geo_id
    }

    /// Language tag for external-source requests.
    pub fn language(&self) -> &str {
        &self.def.language
    }

    /// Display title.
    pub fn title(&self) -> &str {
        &self.def.title
    }

    /// Canonical brand list in catalog order, deduplicated case-insensitively.
    pub fn canonical_brands(&self) -> &[CanonicalName] {
        &self.build().brands
    }

    /// Query variants for one brand: exact, lowercase, glued form, extras.
    pub fn variants(&self, brand: &str) -> Result<&[VariantText], AuditError> {
        let built = self.build();
        built
            .variants
            .get(brand)
            .map(Vec::as_slice)
            .ok_or_else(|| AuditError::UnknownBrand {
                brand: brand.to_string(),
                scope_id: self.def.id.clone(),
                known: built.brands.join(", "),
            })
    }

    /// Every variant across every brand, lexicographically sorted and
    /// deduplicated case-insensitively. Byte-identical across calls, so
    /// repeated runs produce reproducible query batches.
    pub fn all_variants(&self) -> &[VariantText] {
        &self.build().flat
    }

    /// Map an arbitrary surface string onto its canonical brand.
    ///
    /// A miss returns `None`, never an error; unmatched surfaces are noise to
    /// be discarded by callers.
    pub fn canonicalize(&self, surface: &str) -> Option<&CanonicalName> {
        let key = normalize(surface);
        if key.is_empty() {
            return None;
        }
        self.build().reverse.get(&key)
    }

    fn build(&self) -> &BuiltScope {
        self.built.get_or_init(|| {
            let brands = uniq_case_insensitive(&self.def.brands);
            let mut variants = IndexMap::with_capacity(brands.len());
            let mut reverse: HashMap<String, CanonicalName> = HashMap::new();
            for brand in &brands {
                let mut forms = vec![brand.clone(), brand.to_lowercase()];
                let glued = normalize(brand);
                if !glued.is_empty() && glued != brand.to_lowercase() {
                    forms.push(glued);
                }
                if let Some(extras) = self.def.aliases.get(brand) {
                    forms.extend(extras.iter().cloned());
                }
                let forms = uniq_case_insensitive(&forms);
                for variant in &forms {
                    let key = normalize(variant);
                    if key.is_empty() {
                        continue;
                    }
                    match reverse.get(&key) {
                        Some(owner) if owner != brand => {
                            // Configuration defect: the same folded form is
                            // claimed by two brands. First definition wins.
                            warn!(
                                scope_id = %self.def.id,
                                variant = %variant,
                                kept = %owner,
                                dropped = %brand,
                                "variant collision across brands"
                            );
                        }
                        Some(_) => {}
                        None => {
                            reverse.insert(key, brand.clone());
                        }
                    }
                }
                variants.insert(brand.clone(), forms);
            }

            let mut flat: Vec<VariantText> = variants.values().flatten().cloned().collect();
            flat.sort();
            let mut seen = HashSet::new();
            flat.retain(|variant| seen.insert(variant.to_lowercase()));

            BuiltScope {
                brands,
                variants,
                reverse,
                flat,
            }
        })
    }
}

/// Injected read-mostly store of catalog scopes.
pub struct CatalogStore {
    scopes: IndexMap<ScopeId, Scope>,
}

impl CatalogStore {
    /// Build a store from explicit scope definitions.
    pub fn new(defs: Vec<ScopeDef>) -> Self {
        let mut scopes = IndexMap::with_capacity(defs.len());
        for def in defs {
            scopes.insert(def.id.clone(), Scope::new(def));
        }
        Self { scopes }
    }

    /// Store loaded with the built-in country partitions.
    pub fn builtin() -> Self {
        Self::new(builtin::scope_defs())
    }

    /// Supported scope ids, sorted.
    pub fn scope_ids(&self) -> Vec<ScopeId> {
        let mut ids: Vec<ScopeId> = self.scopes.keys().cloned().collect();
        ids.sort();
        ids
    }

    /// Look up a scope by id.
    pub fn scope(&self, scope_id: &str) -> Result<&Scope, AuditError> {
        let key = scope_id.to_lowercase();
        self.scopes
            .get(&key)
            .ok_or_else(|| AuditError::UnknownScope {
                scope_id: scope_id.to_string(),
                known: self.scope_ids().join(", "),
            })
    }

    /// Canonical brand list for a scope, in catalog order.
    pub fn canonical_brands(&self, scope_id: &str) -> Result<&[CanonicalName], AuditError> {
        Ok(self.scope(scope_id)?.canonical_brands())
    }

    /// Query variants for one brand in a scope.
    pub fn variants(&self, scope_id: &str, brand: &str) -> Result<&[VariantText], AuditError> {
        self.scope(scope_id)?.variants(brand)
    }

    /// Sorted flat variant list for a scope.
    pub fn all_variants(&self, scope_id: &str) -> Result<&[VariantText], AuditError> {
        Ok(self.scope(scope_id)?.all_variants())
    }

    /// Map a surface string onto its canonical brand within a scope.
    pub fn canonicalize(
        &self,
        scope_id: &str,
        surface: &str,
    ) -> Result<Option<&CanonicalName>, AuditError> {
        Ok(self.scope(scope_id)?.canonicalize(surface))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn two_brand_scope() -> CatalogStore {
        CatalogStore::new(vec![ScopeDef::new(
            "xx",
            1,
            "en",
            "Testland",
            &["LV BET", "Bet365", "bet365", "Jugadón"],
        )
        .with_aliases(&[("LV BET", &["LVBET", "lvbet", "LVBet"])])])
    }

    #[test]
    fn canonical_brands_dedupe_case_insensitively() {
        let store = two_brand_scope();
        let brands = store.canonical_brands("xx").unwrap();
        assert_eq!(brands, &["LV BET", "Bet365", "Jugadón"]);
    }

    #[test]
    fn variants_cover_exact_glued_and_extras() {
        let store = two_brand_scope();
        // The lowercase form folds into the exact text case-insensitively, and
        // every extra alias folds into the glued form.
        let variants = store.variants("xx", "LV BET").unwrap();
        assert_eq!(variants, &["LV BET", "lvbet"]);

        let glued = store.variants("xx", "Jugadón").unwrap();
        assert_eq!(glued, &["Jugadón", "jugadon"]);
    }

    #[test]
    fn canonicalize_maps_every_variant_form() {
        let store = two_brand_scope();
        for surface in ["LV BET", "lvbet", "LVBet", "lv-bet", "L.V. B.E.T."] {
            assert_eq!(
                store.canonicalize("xx", surface).unwrap(),
                Some(&"LV BET".to_string()),
                "surface {surface:?}"
            );
        }
        assert_eq!(store.canonicalize("xx", "jugadon").unwrap(), Some(&"Jugadón".to_string()));
        assert_eq!(store.canonicalize("xx", "no such brand").unwrap(), None);
        assert_eq!(store.canonicalize("xx", "  ").unwrap(), None);
    }

    #[test]
    fn all_variants_sorted_and_free_of_case_duplicates() {
        let store = two_brand_scope();
        let flat = store.all_variants("xx").unwrap();
        let mut sorted = flat.to_vec();
        sorted.sort();
        assert_eq!(flat, sorted.as_slice());

        let mut seen = std::collections::HashSet::new();
        for variant in flat {
            assert!(seen.insert(variant.to_lowercase()), "duplicate {variant:?}");
        }

        // Memoized: repeated calls return the identical slice.
        assert_eq!(store.all_variants("xx").unwrap(), flat);
    }

    #[test]
    fn unknown_scope_names_valid_ids() {
        let store = two_brand_scope();
        let err = store.scope("zz").unwrap_err();
        match err {
            AuditError::UnknownScope { scope_id, known } => {
                assert_eq!(scope_id, "zz");
                assert!(known.contains("xx"));
            }
            other => panic!("unexpected error: {other}"),
        }
        assert!(store.scope("zz").unwrap_err().is_configuration());
    }

    #[test]
    fn unknown_brand_names_valid_set() {
        let store = two_brand_scope();
        let err = store.variants("xx", "Betway").unwrap_err();
        match err {
            AuditError::UnknownBrand { brand, known, .. } => {
                assert_eq!(brand, "Betway");
                assert!(known.contains("Bet365"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn colliding_variants_keep_first_brand() {
        let store = CatalogStore::new(vec![ScopeDef::new(
            "xx",
            1,
            "en",
            "Testland",
            &["GO+bet", "GO bet"],
        )]);
        // Both brands fold to "gobet"; the first definition owns the key.
        assert_eq!(
            store.canonicalize("xx", "gobet").unwrap(),
            Some(&"GO+bet".to_string())
        );
    }

    #[test]
    fn builtin_scopes_are_present_and_configured() {
        let store = CatalogStore::builtin();
        assert_eq!(store.scope_ids(), vec!["ar", "br", "pl"]);
        let br = store.scope("br").unwrap();
        assert_eq!(br.geo_id(), 2076);
        assert_eq!(br.language(), "pt");
        assert!(br.canonical_brands().iter().any(|brand| brand == "Betano"));
        assert_eq!(
            store.canonicalize("pl", "LVBET").unwrap(),
            Some(&"LV BET".to_string())
        );
        assert_eq!(
            store.canonicalize("br", "galerabet").unwrap(),
            Some(&"Galera.bet".to_string())
        );
    }
}
