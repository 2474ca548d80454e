use std::path::{Path, PathBuf};

use anyhow::Context;
use bookstore_app::store::SeedData;
use bookstore_kernel::settings::Settings;
use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "bookstore", version, about = "Bookstore return service operations")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run the HTTP service
    Serve {
        /// Seed fixture overriding `database.seed_path`
        #[arg(long)]
        seed: Option<PathBuf>,
        /// Port overriding `server.port`
        #[arg(long)]
        port: Option<u16>,
    },
    /// Load the layered configuration and print the effective values
    CheckConfig,
    /// Validate a seed fixture without starting the service
    CheckSeed {
        path: PathBuf,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Command::Serve { seed, port } => serve(seed, port),
        Command::CheckConfig => check_config(),
        Command::CheckSeed { path } => check_seed(&path),
    }
}

fn serve(seed: Option<PathBuf>, port: Option<u16>) -> anyhow::Result<()> {
    let mut settings = Settings::load().with_context(|| "failed to load bookstore settings")?;
    if let Some(seed) = seed {
        settings.database.seed_path = Some(seed);
    }
    if let Some(port) = port {
        settings.server.port = port;
    }

    bookstore_telemetry::init(&settings.telemetry)?;
    tracing::info!(
        env = ?settings.environment,
        address = %settings.server.bind_address(),
        "bookstore serve starting"
    );

    let runtime = tokio::runtime::Runtime::new().context("failed to start tokio runtime")?;
    runtime.block_on(bookstore_app::run(settings))
}

fn check_config() -> anyhow::Result<()> {
    let settings = Settings::load().with_context(|| "failed to load bookstore settings")?;

    println!("environment: {:?}", settings.environment);
    println!("listen: {}", settings.server.bind_address());
    println!("request timeout: {}ms", settings.server.request_timeout_ms);
    match &settings.database.seed_path {
        Some(path) => println!("seed: {}", path.display()),
        None => println!("seed: none"),
    }
    println!(
        "log: {:?} ({})",
        settings.telemetry.log_format, settings.telemetry.filter
    );
    println!(
        "returns maintenance: {}",
        if settings.returns.maintenance_enabled {
            "enabled"
        } else {
            "disabled"
        }
    );
    Ok(())
}

fn check_seed(path: &Path) -> anyhow::Result<()> {
    let seed: SeedData = bookstore_db::load_fixture(path)
        .with_context(|| format!("failed to load seed fixture {}", path.display()))?;

    let problems = seed.validate();
    if problems.is_empty() {
        println!(
            "{}: {} books, {} orders, ok",
            path.display(),
            seed.books.len(),
            seed.orders.len()
        );
        return Ok(());
    }

    for problem in &problems {
        eprintln!("{}", problem);
    }
    anyhow::bail!("{} problem(s) in {}", problems.len(), path.display())
}
