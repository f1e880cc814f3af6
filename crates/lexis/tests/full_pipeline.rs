mod common;

use common::{doc, harbor_catalog, ids, manager_with, travel_catalog};
use lexis_core::{CatalogField, FieldBoosts, ManagerError, SearchIndexManager};
use std::sync::RwLock;

#[test]
fn test_ranked_search_over_title_and_tags() {
    let manager = manager_with("en", travel_catalog());

    let results = manager.search("en", "beach hiking", 10);
    assert_eq!(ids(&results), vec!["A"]);
    assert!(results[0].score > 0.0);
    assert_eq!(results[0].matches.get(CatalogField::Tags), ["beach", "hiking"]);
    assert!(!results[0].matches.contains(CatalogField::Summary));

    let results = manager.search("en", "walk beach", 10);
    assert_eq!(ids(&results), vec!["A", "B"]);
}

#[test]
fn test_results_serialize_with_named_matches() {
    let manager = manager_with("en", harbor_catalog());
    let results = manager.search("en", "harbor", 10);
    // h1 has the term in its title, h2 in its tags, h3 only in its summary
    assert_eq!(ids(&results), vec!["h1", "h2", "h3"]);

    let json = serde_json::to_value(&results).unwrap();
    assert_eq!(json[0]["matches"]["title"][0], "harbor");
    assert!(json[0]["matches"].get("tags").is_none());
    assert_eq!(json[2]["matches"]["summary"][0], "harbor");
}

#[test]
fn test_typo_suggestions() {
    let manager = manager_with(
        "en",
        vec![doc("1", "Beach", &["beaches"]), doc("2", "Beacon", &[])],
    );

    assert_eq!(manager.suggest("en", "bech", 2), vec!["beach"]);
    assert_eq!(manager.suggest("en", "bech", 3), vec!["beach", "beaches", "beacon"]);
    assert_eq!(manager.nearest_term("en", "bech").as_deref(), Some("beach"));
    assert_eq!(manager.suggest_default("en", "beaches"), vec!["beach"]);
}

#[test]
fn test_rebuild_does_not_leak_previous_documents() {
    let mut manager = manager_with("en", travel_catalog());
    assert_eq!(ids(&manager.search("en", "beach", 10)), vec!["A"]);

    manager.build_index("en", harbor_catalog()).unwrap();

    for query in ["beach", "hiking", "city walk", "harbor lighthouse"] {
        for result in manager.search("en", query, 10) {
            assert!(result.id.starts_with('h'), "stale document {}", result.id);
        }
    }
    assert!(manager.suggest("en", "beech", 2).is_empty());
    assert_eq!(manager.stats("en").unwrap().document_count, 3);
}

#[test]
fn test_languages_are_isolated() {
    let mut manager = manager_with("en", travel_catalog());
    manager
        .build_index("de", vec![doc("d1", "Strand wanderung", &["strand"])])
        .unwrap();

    assert!(manager.search("de", "beach", 10).is_empty());
    assert_eq!(ids(&manager.search("de", "strand", 10)), vec!["d1"]);

    manager.clear_index("de");
    assert_eq!(ids(&manager.search("en", "beach", 10)), vec!["A"]);
}

#[test]
fn test_failed_rebuild_keeps_published_index() {
    let mut manager = manager_with("en", travel_catalog());
    let before = manager.stats("en");

    let invalid = FieldBoosts {
        summary: f64::NAN,
        ..FieldBoosts::default()
    };
    assert!(matches!(
        manager.build_index_with("en", harbor_catalog(), &invalid),
        Err(ManagerError::Index(_))
    ));
    assert_eq!(manager.build_index("", harbor_catalog()), Err(ManagerError::EmptyLanguage));

    assert_eq!(manager.stats("en"), before);
    assert_eq!(ids(&manager.search("en", "beach", 10)), vec!["A"]);
    assert!(manager.search("en", "harbor", 10).is_empty());
}

#[test]
fn test_cleared_language_behaves_as_never_built() {
    let mut manager = manager_with("en", travel_catalog());
    manager.clear_all();

    let fresh = SearchIndexManager::default();
    assert_eq!(manager.search("en", "beach", 10), fresh.search("en", "beach", 10));
    assert_eq!(manager.suggest("en", "bech", 2), fresh.suggest("en", "bech", 2));
    assert_eq!(manager.stats("en"), None);
}

#[test]
fn test_search_is_deterministic() {
    let docs: Vec<_> = (0..50)
        .map(|i| doc(&format!("doc{i:02}"), "Harbor walk", &["sea"]))
        .collect();
    let first = manager_with("en", docs.clone());
    let second = manager_with("en", docs);

    let a = first.search("en", "harbor sea walk", 20);
    let b = second.search("en", "harbor sea walk", 20);
    assert_eq!(a, b);
    assert_eq!(a.len(), 20);
    // equal scores fall back to ascending id
    assert_eq!(a[0].id, "doc00");
    assert_eq!(a[19].id, "doc19");
}

#[test]
fn test_readers_see_whole_indexes_during_rebuild() {
    let lock = RwLock::new(manager_with("en", travel_catalog()));

    std::thread::scope(|scope| {
        scope.spawn(|| {
            for round in 0..20 {
                let docs = if round % 2 == 0 {
                    harbor_catalog()
                } else {
                    travel_catalog()
                };
                lock.write().unwrap().build_index("en", docs).unwrap();
            }
        });

        for _ in 0..4 {
            scope.spawn(|| {
                for _ in 0..50 {
                    // hold one snapshot so both queries see the same index
                    let snapshot = lock.read().unwrap().index("en").unwrap();
                    let travel = snapshot.search("beach", 10);
                    let harbor = snapshot.search("harbor", 10);
                    assert!(travel.is_empty() != harbor.is_empty());
                }
            });
        }
    });
}
