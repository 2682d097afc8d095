use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

use spellmaker::{Commands, Container, ContainerConfig, Router};

#[derive(Parser)]
#[command(name = "spellmaker")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Site-packages directory to search before the active environment (repeatable)
    #[arg(
        short = 's',
        long,
        global = true,
        env = "SPELLMAKER_SITE_PACKAGES",
        value_delimiter = ','
    )]
    site_packages: Vec<PathBuf>,

    /// Search only --site-packages, ignoring VIRTUAL_ENV, CONDA_PREFIX and PYTHONPATH
    #[arg(long, global = true)]
    isolated: bool,

    /// Maximum directory depth walked inside each package (1 = top-level files only)
    #[arg(
        long,
        global = true,
        value_parser = clap::builder::RangedU64ValueParser::<usize>::new().range(1..)
    )]
    max_depth: Option<usize>,

    #[command(subcommand)]
    command: Commands,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let container = Container::new(ContainerConfig {
        site_packages: cli.site_packages,
        isolated: cli.isolated,
        max_depth: cli.max_depth,
    })?;

    let router = Router::new(&container);
    let output = router.route(cli.command).await?;
    println!("{}", output);

    Ok(())
}
