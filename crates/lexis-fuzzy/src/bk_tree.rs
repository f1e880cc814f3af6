//! BK-tree (Burkhard-Keller tree) over edit distance.
//!
//! Nodes live in one contiguous arena and children are referenced by arena
//! index, so insertion and queries are plain loops over an explicit stack.
//! A node's arena index is also its insertion order.
//!
//! Queries rely on the triangle inequality: a child reached through edge
//! `d'` from a node at distance `d` from the query holds only words at
//! distance at least `|d - d'|`, so edges outside `d ± max_distance` are
//! never visited.

use crate::distance::levenshtein;
use serde::Serialize;

/// Distance function backing a tree. Must be a metric.
pub type Metric = fn(&str, &str) -> u32;

const ROOT: usize = 0;

/// A stored word and its distance from the query
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Suggestion {
    pub word: String,
    pub distance: u32,
}

#[derive(Debug, Clone)]
struct Node {
    word: String,
    /// (edge distance, arena index)
    children: Vec<(u32, usize)>,
}

impl Node {
    fn new(word: String) -> Self {
        Self {
            word,
            children: Vec::new(),
        }
    }

    fn child(&self, distance: u32) -> Option<usize> {
        self.children
            .iter()
            .find(|(edge, _)| *edge == distance)
            .map(|&(_, index)| index)
    }
}

#[derive(Debug, Clone)]
pub struct BkTree {
    nodes: Vec<Node>,
    metric: Metric,
}

impl BkTree {
    /// Empty tree under Levenshtein distance
    pub fn new() -> Self {
        Self::with_metric(levenshtein)
    }

    pub fn with_metric(metric: Metric) -> Self {
        Self {
            nodes: Vec::new(),
            metric,
        }
    }

    /// Insert a word. Returns false if it was already present.
    pub fn add(&mut self, word: impl Into<String>) -> bool {
        let word = word.into();
        if self.nodes.is_empty() {
            self.nodes.push(Node::new(word));
            return true;
        }

        let mut current = ROOT;
        loop {
            let distance = (self.metric)(word.as_str(), self.nodes[current].word.as_str());
            if distance == 0 {
                return false;
            }
            match self.nodes[current].child(distance) {
                Some(next) => current = next,
                None => {
                    let index = self.nodes.len();
                    self.nodes[current].children.push((distance, index));
                    self.nodes.push(Node::new(word));
                    return true;
                }
            }
        }
    }

    /// Insert every word in order. Returns how many were new.
    pub fn add_all<I, S>(&mut self, words: I) -> usize
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut added = 0;
        for word in words {
            if self.add(word) {
                added += 1;
            }
        }
        added
    }

    /// Every stored word within `max_distance` of `query`, ordered by
    /// distance then word.
    pub fn search(&self, query: &str, max_distance: u32) -> Vec<Suggestion> {
        let mut results = Vec::new();
        if self.nodes.is_empty() {
            return results;
        }

        let mut stack = vec![ROOT];
        while let Some(index) = stack.pop() {
            let node = &self.nodes[index];
            let distance = (self.metric)(query, node.word.as_str());
            if distance <= max_distance {
                results.push(Suggestion {
                    word: node.word.clone(),
                    distance,
                });
            }

            let low = distance.saturating_sub(max_distance);
            let high = distance.saturating_add(max_distance);
            stack.extend(
                node.children
                    .iter()
                    .filter(|(edge, _)| (low..=high).contains(edge))
                    .map(|&(_, child)| child),
            );
        }

        sort_suggestions(&mut results);
        results
    }

    /// Linear scan with the same result as [`BkTree::search`].
    ///
    /// Computes the distance to every word. Only worth it for tiny
    /// vocabularies; kept as the reference the pruned search is checked
    /// against.
    pub fn scan(&self, query: &str, max_distance: u32) -> Vec<Suggestion> {
        let mut results: Vec<Suggestion> = self
            .nodes
            .iter()
            .filter_map(|node| {
                let distance = (self.metric)(query, node.word.as_str());
                (distance <= max_distance).then(|| Suggestion {
                    word: node.word.clone(),
                    distance,
                })
            })
            .collect();
        sort_suggestions(&mut results);
        results
    }

    /// Closest stored word; ties go to the word inserted first.
    pub fn nearest(&self, query: &str) -> Option<Suggestion> {
        if self.nodes.is_empty() {
            return None;
        }

        // (distance, arena index)
        let mut best: Option<(u32, usize)> = None;
        let mut stack = vec![ROOT];
        while let Some(index) = stack.pop() {
            let node = &self.nodes[index];
            let distance = (self.metric)(query, node.word.as_str());

            let closer = match best {
                None => true,
                Some((best_distance, best_index)) => {
                    distance < best_distance || (distance == best_distance && index < best_index)
                }
            };
            if closer {
                best = Some((distance, index));
                if distance == 0 {
                    break;
                }
            }

            // A subtree can only tie or beat the current best inside this radius
            let radius = best.map_or(u32::MAX, |(d, _)| d);
            stack.extend(
                node.children
                    .iter()
                    .filter(|(edge, _)| edge.abs_diff(distance) <= radius)
                    .map(|&(_, child)| child),
            );
        }

        best.map(|(distance, index)| Suggestion {
            word: self.nodes[index].word.clone(),
            distance,
        })
    }

    /// Closest accepted word within `max_distance`; ties go to the word
    /// inserted first.
    ///
    /// Considers exactly the words [`BkTree::search`] returns for the same
    /// query and distance, minus those `accept` rejects.
    pub fn nearest_within<P>(&self, query: &str, max_distance: u32, mut accept: P) -> Option<Suggestion>
    where
        P: FnMut(&str) -> bool,
    {
        if self.nodes.is_empty() {
            return None;
        }

        // (distance, arena index)
        let mut best: Option<(u32, usize)> = None;
        let mut stack = vec![ROOT];
        while let Some(index) = stack.pop() {
            let node = &self.nodes[index];
            let distance = (self.metric)(query, node.word.as_str());

            if distance <= max_distance && accept(node.word.as_str()) {
                let closer = best.map_or(true, |(best_distance, best_index)| {
                    (distance, index) < (best_distance, best_index)
                });
                if closer {
                    best = Some((distance, index));
                }
            }

            let radius = best.map_or(max_distance, |(d, _)| d.min(max_distance));
            stack.extend(
                node.children
                    .iter()
                    .filter(|(edge, _)| edge.abs_diff(distance) <= radius)
                    .map(|&(_, child)| child),
            );
        }

        best.map(|(distance, index)| Suggestion {
            word: self.nodes[index].word.clone(),
            distance,
        })
    }

    pub fn contains(&self, word: &str) -> bool {
        let mut current = if self.nodes.is_empty() {
            None
        } else {
            Some(ROOT)
        };
        while let Some(index) = current {
            let node = &self.nodes[index];
            let distance = (self.metric)(word, node.word.as_str());
            if distance == 0 {
                return true;
            }
            current = node.child(distance);
        }
        false
    }

    /// Stored words in insertion order
    pub fn words(&self) -> impl Iterator<Item = &str> {
        self.nodes.iter().map(|node| node.word.as_str())
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

impl Default for BkTree {
    fn default() -> Self {
        Self::new()
    }
}

fn sort_suggestions(results: &mut [Suggestion]) {
    results.sort_by(|a, b| a.distance.cmp(&b.distance).then_with(|| a.word.cmp(&b.word)));
}
