use crate::catalog::build_manager;
use crate::cli::CatalogArgs;

pub fn run(args: &CatalogArgs, lang: &str, query: &str, limit: Option<usize>) -> anyhow::Result<()> {
    let manager = build_manager(args, Some(lang))?;
    let limit = limit.unwrap_or(manager.config().default_limit);

    let results = manager.search(lang, query, limit);
    let output = serde_json::json!({
        "lang": lang,
        "query": query,
        "results": results,
    });

    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}
