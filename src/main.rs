// Main entry point - Dependency injection and page generation
mod application;
mod domain;
mod infrastructure;
mod presentation;

use std::sync::Arc;

use anyhow::Context;
use tracing_subscriber::EnvFilter;

use crate::application::loader::ChartLoader;
use crate::application::renderer::ChartRenderer;
use crate::infrastructure::config::load_app_config;
use crate::infrastructure::http_source::HttpChartSource;
use crate::presentation::markup::{page_html, PageOptions};
use crate::presentation::view::{DashboardView, RefreshOutcome};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    // Load configuration
    let config = load_app_config()?;

    // Create chart source (infrastructure layer)
    let source = Arc::new(
        HttpChartSource::new(config.source.timeout()).context("Failed to build HTTP client")?,
    );

    // Create loader, renderer and view
    let loader = ChartLoader::new(source);
    let renderer = ChartRenderer::new(config.render.layout(), config.render.palette.clone());
    let mut view = DashboardView::new(loader, config.source.url.clone());

    tracing::info!("Loading charts from {}", config.source.url);
    let outcome = view.refresh_until(tokio::signal::ctrl_c()).await;

    if outcome == RefreshOutcome::Cancelled {
        tracing::info!("Interrupted before the charts loaded; nothing written");
        return Ok(());
    }

    let options = PageOptions {
        title: config.output.title.clone(),
    };
    let html = page_html(view.state(), &options, &renderer);

    if let Some(parent) = config.output.path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
    }
    std::fs::write(&config.output.path, html)
        .with_context(|| format!("Failed to write {}", config.output.path.display()))?;

    tracing::info!("Wrote {}", config.output.path.display());
    Ok(())
}
