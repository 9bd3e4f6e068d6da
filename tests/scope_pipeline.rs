use std::collections::HashMap;

use chrono::{Duration, Utc};
use serde_json::json;

use brandlens::source::{
    InMemoryCandidateSource, InMemoryInventorySource,
    InMemoryMetricSource,
};
use brandlens::{
    audit_scope, cache_key, fetch_scope_volumes, is_mentioned, rank, reconcile, reduce,
    AppSignals, AuditConfig, AuditError, CandidateHit, CatalogStore, EnrichedCandidate,
    EnrichmentSource, ExtractionRules, MetricBundle, Observation, RankOptions, ResultCache,
    ScopeDef,
};

fn test_catalog() -> CatalogStore {
    CatalogStore::new(vec![ScopeDef::new(
        "br",
        2076,
        "pt",
        "Brazil",
        &["Bet365", "Betano", "LV BET"],
    )
    .with_aliases(&[("LV BET", &["LVBET"])])])
}

fn observation(surface: &str, volume: Option<f64>) -> Observation {
    Observation {
        surface: surface.to_string(),
        scope: "br".to_string(),
        metrics: MetricBundle {
            search_volume: volume,
            ..MetricBundle::default()
        },
    }
}

#[test]
fn aggregator_keeps_max_volume_and_drops_noise() {
    let catalog = test_catalog();
    let observations = vec![
        observation("Bet365", Some(100.0)),
        observation("bet365", Some(250.0)),
        observation("unknownbrand", Some(999.0)),
    ];
    let reduction = reduce(observations, "br", &catalog).unwrap();
    assert_eq!(reduction.records.len(), 1);
    assert_eq!(reduction.records[0].canonical, "Bet365");
    assert_eq!(reduction.records[0].metrics.search_volume, Some(250.0));
    assert_eq!(reduction.dropped, 1);
}

#[test]
fn reconciler_selects_max_metric_or_first() {
    let candidate = |id: &str, metric: Option<f64>| EnrichedCandidate {
        external_id: id.to_string(),
        title: id.to_string(),
        daily_installs: metric,
        unavailable: None,
    };

    let ranked = vec![
        candidate("a", None),
        candidate("b", Some(50.0)),
        candidate("c", Some(200.0)),
    ];
    assert_eq!(reconcile(&ranked).unwrap().selected.external_id, "c");

    let unranked = vec![candidate("a", None), candidate("b", None)];
    assert_eq!(reconcile(&unranked).unwrap().selected.external_id, "a");
}

#[test]
fn mention_matcher_properties() {
    assert!(is_mentioned("LV BET", &["LV BET Casino"]));
    assert!(!is_mentioned("PIN", &["Pinnacle Sports"]));
    assert!(is_mentioned("bet365", &["Bet365 App"]));
}

#[test]
fn cache_recomputes_empty_and_expired_payloads() {
    let dir = tempfile::tempdir().unwrap();
    let cache = ResultCache::open(dir.path()).unwrap();
    let key = cache_key(&["betano", "pt", "br", "10"]);

    // Empty payloads are never served from cache within the TTL window.
    let mut calls = 0;
    for _ in 0..2 {
        let lookup = cache
            .get_or_compute("candidate_search", &key, 3, || {
                calls += 1;
                Ok(Vec::<CandidateHit>::new())
            })
            .unwrap();
        assert!(lookup.refreshed);
    }
    assert_eq!(calls, 2);

    // Non-empty payloads are served until the TTL elapses.
    let hit = vec![CandidateHit {
        external_id: "app".into(),
        title: "Betano".into(),
    }];
    cache
        .seed_entry("candidate_search", &key, Utc::now(), &hit)
        .unwrap();
    let lookup = cache
        .get_or_compute("candidate_search", &key, 3, || {
            Ok(Vec::<CandidateHit>::new())
        })
        .unwrap();
    assert!(!lookup.refreshed);
    assert_eq!(lookup.value, hit);

    cache
        .seed_entry("candidate_search", &key, Utc::now() - Duration::days(3), &hit)
        .unwrap();
    let lookup = cache
        .get_or_compute("candidate_search", &key, 3, || {
            Ok(vec![CandidateHit {
                external_id: "fresh".into(),
                title: "Fresh".into(),
            }])
        })
        .unwrap();
    assert!(lookup.refreshed);
    assert_eq!(lookup.value[0].external_id, "fresh");
}

/// Enrichment source that answers raw vendor payloads through the extraction
/// rule tables, the way a production adapter would.
struct RawPayloadEnrichment {
    rules: ExtractionRules,
    payloads: HashMap<String, serde_json::Value>,
}

impl EnrichmentSource for RawPayloadEnrichment {
    fn id(&self) -> &str {
        "appspy"
    }

    fn describe(&self, external_id: &str) -> Result<AppSignals, AuditError> {
        let payload =
            self.payloads
                .get(external_id)
                .ok_or_else(|| AuditError::SourceUnavailable {
                    source_id: "appspy".into(),
                    reason: format!("no payload for '{external_id}'"),
                })?;
        Ok(self.rules.signals(payload))
    }
}

#[test]
fn full_scope_flow_produces_artifacts_and_reuses_cache() {
    let dir = tempfile::tempdir().unwrap();
    let catalog = test_catalog();
    let config = AuditConfig::immediate();

    let mut bundles = HashMap::new();
    bundles.insert(
        "Bet365".to_string(),
        MetricBundle {
            search_volume: Some(900.0),
            cpc: Some(1.2),
            ..MetricBundle::default()
        },
    );
    bundles.insert(
        "Betano".to_string(),
        MetricBundle {
            search_volume: Some(1500.0),
            ..MetricBundle::default()
        },
    );
    bundles.insert(
        "lvbet".to_string(),
        MetricBundle {
            search_volume: Some(70.0),
            ..MetricBundle::default()
        },
    );
    let metrics = InMemoryMetricSource::new("keyword_metrics", bundles);

    let mut hits = HashMap::new();
    hits.insert(
        "Betano".to_string(),
        vec![
            CandidateHit {
                external_id: "com.betano.app".into(),
                title: "Betano: Apostas Online".into(),
            },
            CandidateHit {
                external_id: "com.clone.betano".into(),
                title: "Betano Clone".into(),
            },
        ],
    );
    let candidates = InMemoryCandidateSource::new("play_search", hits);

    let mut payloads = HashMap::new();
    payloads.insert(
        "com.betano.app".to_string(),
        json!({"summary": {"daily_installs": 4200.0}, "is_published": true}),
    );
    payloads.insert(
        "com.clone.betano".to_string(),
        json!({"installs_daily": 80.0, "status": "removed from store"}),
    );
    let enrichment = RawPayloadEnrichment {
        rules: ExtractionRules::default(),
        payloads,
    };

    let inventory_source =
        InMemoryInventorySource::new("keyapp", vec!["Bet365 Sports".to_string()]);
    let inventory = brandlens::load_inventory_titles(&inventory_source, &config);

    {
        let cache = ResultCache::open(dir.path()).unwrap();
        let volumes = fetch_scope_volumes(&catalog, "br", &metrics, &cache, &config).unwrap();
        assert_eq!(volumes.failed_batches, 0);
        let names: Vec<&str> = volumes
            .records
            .iter()
            .map(|record| record.canonical.as_str())
            .collect();
        assert_eq!(names, vec!["Bet365", "Betano", "LV BET"]);
        assert_eq!(volumes.records[0].metrics.cpc, Some(1.2));

        let audit = audit_scope(
            &catalog,
            "br",
            &candidates,
            Some(&enrichment),
            &inventory,
            &cache,
            &config,
        )
        .unwrap();
        assert_eq!(audit.rows.len(), 3);
        assert_eq!(audit.search_failures, 0);
        assert_eq!(audit.enrichment_failures, 0);

        let betano = audit
            .rows
            .iter()
            .find(|row| row.canonical == "Betano")
            .unwrap();
        let competitor = betano.competitor.as_ref().unwrap();
        assert_eq!(competitor.external_id, "com.betano.app");
        assert_eq!(competitor.daily_installs, Some(4200.0));
        assert_eq!(competitor.unavailable, Some(false));
        assert_eq!(betano.candidates.len(), 2);
        assert_eq!(betano.candidates[1].unavailable, Some(true));
        assert!(!betano.in_inventory);

        let bet365 = audit
            .rows
            .iter()
            .find(|row| row.canonical == "Bet365")
            .unwrap();
        assert!(bet365.in_inventory);
        assert!(bet365.competitor.is_none());

        let ranked = rank(&volumes.records, &audit.rows, &RankOptions::default());
        let names: Vec<&str> = ranked.iter().map(|row| row.canonical.as_str()).collect();
        assert_eq!(names, vec!["Betano", "Bet365", "LV BET"]);
        assert!(ranked[0].competitor.is_some());

        let open = rank(
            &volumes.records,
            &audit.rows,
            &RankOptions {
                only_not_in_inventory: true,
                only_with_competitor: true,
                ..RankOptions::default()
            },
        );
        assert_eq!(open.len(), 1);
        assert_eq!(open[0].canonical, "Betano");
    }

    // A fresh cache handle over the same directory serves everything from disk.
    let calls_before = metrics.calls();
    let cache = ResultCache::open(dir.path()).unwrap();
    let volumes = fetch_scope_volumes(&catalog, "br", &metrics, &cache, &config).unwrap();
    assert_eq!(metrics.calls(), calls_before);
    assert_eq!(volumes.records.len(), 3);
}
