mod config;
mod http;
mod snapshot;
#[cfg(test)]
mod test_support;

use std::{path::PathBuf, sync::Arc};

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use directory::{Loader, render};
use platform_obs::{ObsConfig, init_tracing};
use tracing::info;

use crate::{
    config::AppConfig,
    http::{AppState, ServeConfig},
};

#[derive(Parser, Debug)]
#[command(name = "roster-server", version, about = "Paginated employee directory")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Load the employee collection and serve the table view.
    Serve(ServeCommand),
    /// Load the employee collection once and print one page as HTML.
    Render(RenderCommand),
}

#[derive(Args, Debug)]
struct ServeCommand {
    #[arg(long, default_value = "0.0.0.0")]
    host: std::net::IpAddr,
    #[arg(long, default_value_t = 8080)]
    port: u16,
}

impl From<ServeCommand> for ServeConfig {
    fn from(value: ServeCommand) -> Self {
        ServeConfig::new(value.host, value.port)
    }
}

#[derive(Args, Debug)]
struct RenderCommand {
    #[arg(long, default_value_t = 1, help = "Page to render, clamped to the last page")]
    page: usize,
    #[arg(long, value_name = "FILE", help = "Destination file path (stdout when omitted)")]
    output: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let app_config = Arc::new(AppConfig::load()?);
    init_tracing(ObsConfig::new(app_config.service_name.clone()))?;
    match cli.command {
        Command::Serve(cmd) => run_server(cmd, app_config).await,
        Command::Render(cmd) => render_snapshot(cmd, &app_config).await,
    }
}

async fn run_server(cmd: ServeCommand, config: Arc<AppConfig>) -> Result<()> {
    let loader = Loader::from_url(config.employees_url.clone())
        .context("failed to build HTTP client")?;
    let state = AppState::new(config);
    http::spawn_initial_load(&state, loader);
    http::serve(cmd.into(), state).await
}

async fn render_snapshot(cmd: RenderCommand, config: &AppConfig) -> Result<()> {
    let loader = Loader::from_url(config.employees_url.clone())
        .context("failed to build HTTP client")?;
    let table = snapshot::snapshot_table(&loader, cmd.page).await;
    let html = render::render_page(&table);
    match cmd.output {
        Some(path) => {
            std::fs::write(&path, html)
                .with_context(|| format!("failed to write {}", path.display()))?;
            info!(path = %path.display(), page = table.page(), "snapshot written");
        }
        None => print!("{html}"),
    }
    Ok(())
}
