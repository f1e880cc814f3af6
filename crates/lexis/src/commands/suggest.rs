use crate::catalog::build_manager;
use crate::cli::CatalogArgs;

pub fn run(args: &CatalogArgs, lang: &str, query: &str, max_distance: Option<u32>) -> anyhow::Result<()> {
    let manager = build_manager(args, Some(lang))?;
    let max_distance = max_distance.unwrap_or(manager.config().default_max_distance);

    let suggestions = manager.suggestions(lang, query, max_distance);
    let output = serde_json::json!({
        "lang": lang,
        "query": query,
        "max_distance": max_distance,
        "suggestions": suggestions,
    });

    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

pub fn run_nearest(args: &CatalogArgs, lang: &str, query: &str, max_distance: Option<u32>) -> anyhow::Result<()> {
    let manager = build_manager(args, Some(lang))?;
    let max_distance = max_distance.unwrap_or(manager.config().default_max_distance);

    let output = serde_json::json!({
        "lang": lang,
        "query": query,
        "max_distance": max_distance,
        "nearest": manager.nearest_term_within(lang, query, max_distance),
    });

    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}
