//! `pagewright show` — Say where a page is defined.

use pagewright_config::AppConfig;
use pagewright_store::PageStore;

pub async fn run(name: &str) -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load().map_err(|e| format!("Failed to load config: {e}"))?;
    let store = PageStore::open(&config.pages.dir)?;

    println!("{}", store.describe(name)?);
    Ok(())
}
