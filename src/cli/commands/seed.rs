use serde_json::json;

use crate::cli::utils::output_success;
use crate::cli::OutputFormat;
use crate::config::AppConfig;
use crate::services::CatalogueService;

pub async fn handle(config: AppConfig, output_format: OutputFormat) -> anyhow::Result<()> {
    let store = super::connect(&config).await?;
    let catalogue = CatalogueService::new(store.clone());

    let result = catalogue.seed_if_empty().await;
    store.close().await;
    let inserted = result?;

    let message = if inserted > 0 {
        format!("Seeded {} branches", inserted)
    } else {
        "Catalogue already populated, nothing seeded".to_string()
    };
    output_success(&output_format, &message, Some(json!({ "inserted": inserted })))
}
