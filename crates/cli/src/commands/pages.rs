//! `pagewright pages` — List the pages in the pages directory.

use pagewright_config::AppConfig;
use pagewright_store::PageStore;

pub async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load().map_err(|e| format!("Failed to load config: {e}"))?;
    let store = PageStore::open(&config.pages.dir)?;

    println!("📄 Pages in {}", store.dir().display());
    println!("==============");
    if store.is_empty() {
        println!("  (none yet — run `pagewright build --query ... --name ...`)");
        return Ok(());
    }
    for name in store.names() {
        println!("  {name:<30} {}", store.path_for(name).display());
    }

    Ok(())
}
