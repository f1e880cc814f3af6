//! Catalog file loading and manager construction

use crate::cli::CatalogArgs;
use anyhow::Context;
use lexis_core::{CatalogDocument, SearchConfig, SearchIndexManager, StemmedTokenizer};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use std::sync::Arc;
use tracing::{debug, warn};

/// One catalog line: a document tagged with its language
#[derive(Debug, Clone, Deserialize)]
pub struct CatalogRecord {
    pub lang: String,
    #[serde(flatten)]
    pub document: CatalogDocument,
}

/// Read every well-formed record of a JSONL file. Blank lines are ignored,
/// malformed ones skipped with a warning.
pub fn read_jsonl<T: DeserializeOwned>(path: &Path) -> anyhow::Result<Vec<T>> {
    let file = File::open(path).with_context(|| format!("failed to open {}", path.display()))?;
    let reader = BufReader::new(file);
    let mut records = Vec::new();

    for (number, line) in reader.lines().enumerate() {
        let line = line.with_context(|| format!("failed to read {}", path.display()))?;
        if line.trim().is_empty() {
            continue;
        }
        match serde_json::from_str(&line) {
            Ok(record) => records.push(record),
            Err(e) => warn!(line = number + 1, error = %e, "skipping malformed catalog line"),
        }
    }

    Ok(records)
}

/// Catalog documents grouped by language, in file order within a language
pub fn load_catalog(path: &Path) -> anyhow::Result<BTreeMap<String, Vec<CatalogDocument>>> {
    let mut languages: BTreeMap<String, Vec<CatalogDocument>> = BTreeMap::new();
    for record in read_jsonl::<CatalogRecord>(path)? {
        if record.lang.is_empty() {
            warn!(id = %record.document.id, "skipping catalog record without language");
            continue;
        }
        languages.entry(record.lang).or_default().push(record.document);
    }
    Ok(languages)
}

pub fn load_config(path: Option<&Path>) -> anyhow::Result<SearchConfig> {
    let Some(path) = path else {
        return Ok(SearchConfig::default());
    };
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read config {}", path.display()))?;
    let config: SearchConfig = serde_json::from_str(&contents)
        .with_context(|| format!("invalid config {}", path.display()))?;
    Ok(config)
}

/// Load the catalog and index it. With `only`, just that language is built.
pub fn build_manager(args: &CatalogArgs, only: Option<&str>) -> anyhow::Result<SearchIndexManager> {
    let config = load_config(args.config.as_deref())?;
    let mut manager = SearchIndexManager::new(config).context("invalid search configuration")?;
    if args.stemmed {
        manager = manager.with_tokenizer(Arc::new(StemmedTokenizer));
    }

    for (lang, documents) in load_catalog(&args.catalog)? {
        if only.is_some_and(|wanted| wanted != lang) {
            debug!(lang = %lang, "skipping language");
            continue;
        }
        manager
            .build_index(&lang, &documents)
            .with_context(|| format!("failed to index language {lang}"))?;
    }

    Ok(manager)
}
