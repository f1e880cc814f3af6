//! Field sets, documents and search results

use serde::ser::{SerializeMap, Serializer};
use serde::Serialize;
use std::fmt::Debug;
use std::hash::Hash;
use std::marker::PhantomData;

/// A closed set of searchable fields, fixed at compile time.
///
/// Implementors are usually fieldless enums. `ordinal` must return the
/// position of the variant inside [`Field::ALL`].
pub trait Field: Copy + Eq + Hash + Debug + Send + Sync + 'static {
    /// Every field, in a stable order.
    const ALL: &'static [Self];

    /// Name used in logs and serialized matches.
    fn name(self) -> &'static str;

    fn ordinal(self) -> usize;
}

/// Document to be indexed
#[derive(Debug, Clone, PartialEq)]
pub struct Document<F: Field> {
    pub id: String,
    /// Raw text per field. A field listed twice is tokenized in order and
    /// appended to the same field.
    pub fields: Vec<(F, String)>,
}

impl<F: Field> Document<F> {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            fields: Vec::new(),
        }
    }

    pub fn with_field(mut self, field: F, text: impl Into<String>) -> Self {
        self.fields.push((field, text.into()));
        self
    }
}

/// Matched query terms per field, one slot for every variant of `F`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldMatches<F: Field> {
    terms: Vec<Vec<String>>,
    _fields: PhantomData<F>,
}

impl<F: Field> FieldMatches<F> {
    pub(crate) fn new() -> Self {
        Self {
            terms: vec![Vec::new(); F::ALL.len()],
            _fields: PhantomData,
        }
    }

    pub(crate) fn push(&mut self, field: F, term: &str) {
        if let Some(slot) = self.terms.get_mut(field.ordinal()) {
            slot.push(term.to_string());
        }
    }

    /// Query terms found in `field`, in query order
    pub fn get(&self, field: F) -> &[String] {
        self.terms
            .get(field.ordinal())
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn contains(&self, field: F) -> bool {
        !self.get(field).is_empty()
    }

    /// Fields with at least one match, in `F::ALL` order
    pub fn iter(&self) -> impl Iterator<Item = (F, &[String])> + '_ {
        F::ALL.iter().copied().filter_map(move |field| {
            let terms = self.get(field);
            (!terms.is_empty()).then_some((field, terms))
        })
    }

    pub fn is_empty(&self) -> bool {
        self.terms.iter().all(Vec::is_empty)
    }
}

impl<F: Field> Serialize for FieldMatches<F> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(None)?;
        for (field, terms) in self.iter() {
            map.serialize_entry(field.name(), terms)?;
        }
        map.end()
    }
}

/// Search hit with its BM25 score
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(bound(serialize = ""))]
pub struct SearchResult<F: Field> {
    pub id: String,
    pub score: f64,
    pub matches: FieldMatches<F>,
}
