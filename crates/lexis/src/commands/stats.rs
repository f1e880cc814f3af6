use crate::catalog::build_manager;
use crate::cli::CatalogArgs;
use std::collections::BTreeMap;

pub fn run(args: &CatalogArgs, lang: Option<&str>) -> anyhow::Result<()> {
    let manager = build_manager(args, lang)?;

    let stats: BTreeMap<&str, _> = manager
        .languages()
        .into_iter()
        .filter_map(|lang| Some((lang, manager.stats(lang)?)))
        .collect();

    if let Some(lang) = lang {
        if stats.is_empty() {
            anyhow::bail!("no catalog entries for language {lang}");
        }
    }

    println!("{}", serde_json::to_string_pretty(&stats)?);
    Ok(())
}
