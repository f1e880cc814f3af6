//! Property tests: Bm25Index against a brute-force BM25 scorer.

use lexis_index::{Bm25Index, Document, Field};
use proptest::prelude::*;
use std::collections::{BTreeMap, HashSet};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum Part {
    Title,
    Body,
}

impl Field for Part {
    const ALL: &'static [Self] = &[Part::Title, Part::Body];

    fn name(self) -> &'static str {
        match self {
            Part::Title => "title",
            Part::Body => "body",
        }
    }

    fn ordinal(self) -> usize {
        self as usize
    }
}

const WORDS: &[&str] = &["beach", "city", "hike", "walk", "sea", "old", "town"];
const K1: f64 = 1.2;
const B: f64 = 0.75;

#[derive(Debug, Clone)]
struct Doc {
    id: String,
    title: Vec<String>,
    body: Option<Vec<String>>,
}

impl Doc {
    fn field(&self, part: Part) -> Option<&Vec<String>> {
        match part {
            Part::Title => Some(&self.title),
            Part::Body => self.body.as_ref(),
        }
    }

    fn to_document(&self) -> Document<Part> {
        let mut doc = Document::new(self.id.clone()).with_field(Part::Title, self.title.join(" "));
        if let Some(body) = &self.body {
            doc = doc.with_field(Part::Body, body.join(" "));
        }
        doc
    }
}

fn word() -> impl Strategy<Value = String> {
    prop::sample::select(WORDS).prop_map(str::to_string)
}

fn docs() -> impl Strategy<Value = Vec<Doc>> {
    prop::collection::vec(
        (
            prop::collection::vec(word(), 0..5),
            prop::option::of(prop::collection::vec(word(), 0..8)),
        ),
        1..12,
    )
    .prop_map(|fields| {
        fields
            .into_iter()
            .enumerate()
            .map(|(i, (title, body))| Doc {
                id: format!("d{i:02}"),
                title,
                body,
            })
            .collect()
    })
}

fn query() -> impl Strategy<Value = Vec<String>> {
    prop::collection::vec(
        prop_oneof![4 => word(), 1 => Just("volcano".to_string())],
        1..5,
    )
}

fn build(docs: &[Doc], title_boost: f64, body_boost: f64) -> Bm25Index<Part> {
    let mut index = Bm25Index::default();
    index.define_field(Part::Title, title_boost).unwrap();
    index.define_field(Part::Body, body_boost).unwrap();
    for doc in docs {
        index.add_document(doc.to_document());
    }
    index
}

fn reference_scores(
    docs: &[Doc],
    query: &[String],
    boosts: &[(Part, f64)],
) -> BTreeMap<String, f64> {
    let mut seen = HashSet::new();
    let terms: Vec<&String> = query.iter().filter(|t| seen.insert(t.as_str())).collect();
    let mut scores = BTreeMap::new();

    for &(part, boost) in boosts {
        let present: Vec<(&Doc, &Vec<String>)> = docs
            .iter()
            .filter_map(|doc| doc.field(part).map(|tokens| (doc, tokens)))
            .collect();
        if present.is_empty() {
            continue;
        }
        let n = present.len() as f64;
        let total: usize = present.iter().map(|(_, tokens)| tokens.len()).sum();
        let avg = total as f64 / n;

        for term in &terms {
            let df = present
                .iter()
                .filter(|(_, tokens)| tokens.contains(term))
                .count() as f64;
            if df == 0.0 {
                continue;
            }
            let idf = ((n - df + 0.5) / (df + 0.5) + 1.0).ln();
            for (doc, tokens) in &present {
                let tf = tokens.iter().filter(|t| t == term).count() as f64;
                if tf == 0.0 {
                    continue;
                }
                let len = tokens.len() as f64;
                let tf_norm = (tf * (K1 + 1.0)) / (tf + K1 * (1.0 - B + B * len / avg));
                *scores.entry(doc.id.clone()).or_insert(0.0) += boost * idf * tf_norm;
            }
        }
    }
    scores
}

proptest! {
    #[test]
    fn prop_matches_brute_force_scorer(docs in docs(), query in query()) {
        let index = build(&docs, 2.0, 1.0);
        let results = index.search(&query.join(" "), docs.len() + 1);
        let expected = reference_scores(&docs, &query, &[(Part::Title, 2.0), (Part::Body, 1.0)]);

        let ids: HashSet<&str> = results.iter().map(|r| r.id.as_str()).collect();
        let expected_ids: HashSet<&str> = expected.keys().map(String::as_str).collect();
        prop_assert_eq!(ids, expected_ids);

        for result in &results {
            let reference = expected[&result.id];
            prop_assert!((result.score - reference).abs() < 1e-9,
                "{}: {} vs {}", result.id, result.score, reference);
            prop_assert!(result.score >= 0.0);
        }

        for pair in results.windows(2) {
            prop_assert!(
                pair[0].score > pair[1].score
                    || (pair[0].score == pair[1].score && pair[0].id < pair[1].id),
                "out of order: {:?} then {:?}", pair[0].id, pair[1].id
            );
        }
    }

    #[test]
    fn prop_matches_list_query_terms_in_order(docs in docs(), query in query()) {
        let index = build(&docs, 1.0, 1.0);
        for result in index.search(&query.join(" "), docs.len()) {
            let doc = docs.iter().find(|d| d.id == result.id).unwrap();
            for (part, terms) in result.matches.iter() {
                let tokens = doc.field(part).unwrap();
                let mut seen = HashSet::new();
                let expected: Vec<&String> = query
                    .iter()
                    .filter(|t| seen.insert(t.as_str()) && tokens.contains(t))
                    .collect();
                prop_assert_eq!(terms.iter().collect::<Vec<_>>(), expected);
            }
        }
    }

    #[test]
    fn prop_boost_never_lowers_scores(docs in docs(), query in query(), boost in 1.0f64..10.0) {
        let q = query.join(" ");
        let baseline = build(&docs, 1.0, 1.0).search(&q, docs.len());
        let boosted = build(&docs, boost, 1.0).search(&q, docs.len());

        prop_assert_eq!(baseline.len(), boosted.len());
        for result in &baseline {
            let other = boosted.iter().find(|r| r.id == result.id).unwrap();
            prop_assert!(other.score + 1e-12 >= result.score);
        }
    }

    #[test]
    fn prop_redefining_same_boost_is_idempotent(docs in docs(), query in query()) {
        let once = build(&docs, 2.0, 1.0);

        let mut twice = Bm25Index::default();
        twice.define_field(Part::Title, 2.0).unwrap();
        twice.define_field(Part::Body, 1.0).unwrap();
        twice.define_field(Part::Title, 2.0).unwrap();
        for doc in &docs {
            twice.add_document(doc.to_document());
        }

        let q = query.join(" ");
        prop_assert_eq!(once.search(&q, docs.len()), twice.search(&q, docs.len()));
    }

    #[test]
    fn prop_overwrite_equals_fresh_index(docs in docs(), replacement in docs()) {
        // re-add the first document with another document's fields
        let mut overwritten = build(&docs, 2.0, 1.0);
        let mut swapped = replacement[0].clone();
        swapped.id = docs[0].id.clone();
        overwritten.add_document(swapped.to_document());

        let mut fresh_docs = docs.clone();
        fresh_docs[0] = swapped;
        let fresh = build(&fresh_docs, 2.0, 1.0);

        prop_assert_eq!(overwritten.document_count(), fresh.document_count());
        prop_assert_eq!(overwritten.term_count(), fresh.term_count());
        for word in WORDS {
            let a = overwritten.search(word, docs.len());
            let b = fresh.search(word, docs.len());
            prop_assert_eq!(a.len(), b.len());
            for (x, y) in a.iter().zip(&b) {
                prop_assert_eq!(&x.id, &y.id);
                prop_assert!((x.score - y.score).abs() < 1e-9);
            }
        }
    }
}
