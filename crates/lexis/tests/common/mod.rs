#![allow(dead_code)]

use lexis_core::{CatalogDocument, SearchIndexManager};

pub fn doc(id: &str, title: &str, tags: &[&str]) -> CatalogDocument {
    CatalogDocument::new(id, title).with_tags(tags.iter().copied())
}

/// Two-document travel catalog
pub fn travel_catalog() -> Vec<CatalogDocument> {
    vec![
        doc("A", "Beach hike", &["beach", "hiking"]),
        doc("B", "City walk", &["city"]),
    ]
}

pub fn harbor_catalog() -> Vec<CatalogDocument> {
    vec![
        doc("h1", "Harbor cruise", &["boat", "sea"]),
        doc("h2", "Fish market", &["food", "harbor"]),
        CatalogDocument::new("h3", "Lighthouse")
            .with_tags(["coast"])
            .with_summary("A short walk from the harbor to the old lighthouse"),
    ]
}

pub fn manager_with(lang: &str, docs: Vec<CatalogDocument>) -> SearchIndexManager {
    let mut manager = SearchIndexManager::default();
    manager.build_index(lang, docs).unwrap();
    manager
}

pub fn ids<F: lexis_index::Field>(results: &[lexis_index::SearchResult<F>]) -> Vec<String> {
    results.iter().map(|r| r.id.clone()).collect()
}
