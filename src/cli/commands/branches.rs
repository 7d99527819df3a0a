use crate::cli::utils::output_collection;
use crate::cli::OutputFormat;
use crate::config::AppConfig;
use crate::services::CatalogueService;

pub async fn handle(config: AppConfig, output_format: OutputFormat) -> anyhow::Result<()> {
    let store = super::connect(&config).await?;
    let catalogue = CatalogueService::new(store.clone());

    // The in-memory store starts empty, so make sure there is something to list
    let result = async {
        catalogue.seed_if_empty().await?;
        catalogue.list_branches().await
    }
    .await;
    store.close().await;

    let rows = result?
        .iter()
        .map(|b| serde_json::json!({ "slug": b.slug, "name": b.name, "level": b.level }))
        .collect();

    output_collection(&output_format, "branches", rows, |row| {
        format!(
            "{:<15} {:<28} {}",
            row["slug"].as_str().unwrap_or_default(),
            row["name"].as_str().unwrap_or_default(),
            row["level"].as_str().unwrap_or_default()
        )
    })
}
