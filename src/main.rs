use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use kiln::config::GeneratorConfig;
use kiln::install::{print_summary, run_install};
use kiln::materialize::materialize;
use kiln::prompt;
use kiln::registry::TemplateRegistry;
use kiln::selection::PartialSelection;

#[derive(Parser)]
#[command(name = "kiln")]
#[command(version, about = "Scaffold an Express backend from a prebuilt template")]
#[command(override_usage = "kiln [NAME|.] [--ts|--js] [--mongo|--pg]")]
pub struct Cli {
    /// Project name, or "." to scaffold into the current directory
    pub name: Option<String>,

    /// Use the TypeScript template (wins when --js is also passed)
    #[arg(long)]
    pub ts: bool,

    /// Use the JavaScript template
    #[arg(long)]
    pub js: bool,

    /// Use the MongoDB template (wins when --pg is also passed)
    #[arg(long)]
    pub mongo: bool,

    /// Use the PostgreSQL template
    #[arg(long)]
    pub pg: bool,

    #[arg(short, long)]
    pub verbose: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = GeneratorConfig::from_env(cli.verbose);
    let partial =
        PartialSelection::from_args(cli.name.as_deref(), cli.ts, cli.js, cli.mongo, cli.pg);

    // The whole registry must be intact before anything touches the disk.
    let registry = TemplateRegistry::new(&config.templates_root);
    registry.verify()?;

    let mut selection = prompt::complete(partial, &config)?;
    let cwd = std::env::current_dir().context("Failed to get current directory")?;

    let project = materialize(&mut selection, &cwd, &registry, &config)?;
    run_install(&project, &config).await?;
    print_summary(&project, &selection);

    Ok(())
}

fn init_tracing(verbose: bool) {
    let default_filter = if verbose { "kiln=debug" } else { "kiln=warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)),
        )
        .with_writer(std::io::stderr)
        .init();
}
