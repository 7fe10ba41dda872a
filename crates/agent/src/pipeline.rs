//! One page build from query to saved artifact.

use std::path::PathBuf;

use chrono::Utc;
use pagewright_core::content::Page;
use pagewright_core::error::Error;
use pagewright_core::event::DomainEvent;
use pagewright_store::PageStore;
use tracing::{info, warn};

use crate::assembler::PageAssembler;
use crate::loop_runner::{PageAgent, RunStatus};

/// Shown when a build is requested without a page name.
pub const MISSING_NAME: &str = "Please enter a name for the page.";

/// What a successful build produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildReport {
    pub page_name: String,
    /// Where the page script was written.
    pub path: PathBuf,
    pub status: RunStatus,
    pub iterations: usize,
    /// Elements in the saved page.
    pub element_count: usize,
}

/// Run the loop, assemble the elements and save the page.
///
/// The store is handed back with the new page registered. Nothing is
/// written when any step fails; the failure is published as
/// [`DomainEvent::ErrorOccurred`] before it is returned.
pub async fn build_page(
    store: PageStore,
    agent: &PageAgent,
    assembler: &PageAssembler,
    query: &str,
    name: &str,
) -> Result<(PageStore, BuildReport), Error> {
    let result = build(store, agent, assembler, query, name).await;
    if let Err(e) = &result {
        warn!(page = %name, error = %e, "Page build failed");
        agent.event_bus().publish(DomainEvent::ErrorOccurred {
            context: format!("build_page({})", name.trim()),
            error_message: e.to_string(),
            timestamp: Utc::now(),
        });
    }
    result
}

async fn build(
    mut store: PageStore,
    agent: &PageAgent,
    assembler: &PageAssembler,
    query: &str,
    name: &str,
) -> Result<(PageStore, BuildReport), Error> {
    let name = name.trim();
    if name.is_empty() {
        return Err(Error::InvalidInput(MISSING_NAME.into()));
    }

    let outcome = agent.run(query).await?;
    if outcome.status == RunStatus::Incomplete {
        warn!(
            page = %name,
            iterations = outcome.iterations,
            "Saving a page from an unfinished build"
        );
    }

    let elements = assembler.assemble(outcome.elements).await?;
    let page = Page::new(name, elements);
    let path = store.save(&page)?;

    agent.event_bus().publish(DomainEvent::PageSaved {
        page_name: page.name.clone(),
        path: path.display().to_string(),
        timestamp: Utc::now(),
    });
    info!(page = %page.name, elements = page.elements.len(), "Page built");

    let report = BuildReport {
        page_name: page.name,
        path,
        status: outcome.status,
        iterations: outcome.iterations,
        element_count: page.elements.len(),
    };
    Ok((store, report))
}
