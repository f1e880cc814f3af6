//! Catalog documents and the fields they are searched by

use lexis_index::{Document, Field};
use serde::{Deserialize, Serialize};

/// Searchable catalog fields
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CatalogField {
    Title,
    Tags,
    Summary,
}

impl Field for CatalogField {
    const ALL: &'static [Self] = &[CatalogField::Title, CatalogField::Tags, CatalogField::Summary];

    fn name(self) -> &'static str {
        match self {
            CatalogField::Title => "title",
            CatalogField::Tags => "tags",
            CatalogField::Summary => "summary",
        }
    }

    fn ordinal(self) -> usize {
        self as usize
    }
}

/// Anything that can be indexed as a catalog document.
///
/// Implement this for your own records to feed them to
/// [`crate::SearchIndexManager::build_index`] without copying them into
/// [`CatalogDocument`]s first.
pub trait CatalogEntry {
    fn id(&self) -> &str;

    fn title(&self) -> &str;

    fn tags(&self) -> &[String];

    fn summary(&self) -> Option<&str> {
        None
    }
}

impl<T: CatalogEntry + ?Sized> CatalogEntry for &T {
    fn id(&self) -> &str {
        (**self).id()
    }

    fn title(&self) -> &str {
        (**self).title()
    }

    fn tags(&self) -> &[String] {
        (**self).tags()
    }

    fn summary(&self) -> Option<&str> {
        (**self).summary()
    }
}

/// Plain catalog record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogDocument {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
}

impl CatalogDocument {
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            tags: Vec::new(),
            summary: None,
        }
    }

    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = tags.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_summary(mut self, summary: impl Into<String>) -> Self {
        self.summary = Some(summary.into());
        self
    }
}

impl CatalogEntry for CatalogDocument {
    fn id(&self) -> &str {
        &self.id
    }

    fn title(&self) -> &str {
        &self.title
    }

    fn tags(&self) -> &[String] {
        &self.tags
    }

    fn summary(&self) -> Option<&str> {
        self.summary.as_deref()
    }
}

/// Index document for an entry. Tags become one space-joined field; an
/// absent summary adds no summary field.
pub(crate) fn to_document<E: CatalogEntry>(entry: &E) -> Document<CatalogField> {
    let mut document = Document::new(entry.id())
        .with_field(CatalogField::Title, entry.title())
        .with_field(CatalogField::Tags, entry.tags().join(" "));
    if let Some(summary) = entry.summary() {
        document = document.with_field(CatalogField::Summary, summary);
    }
    document
}
