//! Bookstore application library
//!
//! Catalog and order-return modules plus the bootstrap that wires them to
//! the kernel registry and HTTP server.

pub mod modules;
pub mod store;
pub mod utils;

use anyhow::Context;
use bookstore_db::Database;
use bookstore_kernel::{settings::Settings, InitCtx, ModuleRegistry};

use store::{BookstoreDb, BookstoreTables, SeedData};

/// Re-export commonly used types
pub use modules::*;

/// Open the store, loading the configured seed fixture if there is one.
pub fn open_database(settings: &Settings) -> anyhow::Result<BookstoreDb> {
    let Some(path) = settings.database.seed_path.as_ref() else {
        tracing::info!("no seed fixture configured, starting with empty tables");
        return Ok(Database::default());
    };

    let seed: SeedData = bookstore_db::load_fixture(path)
        .with_context(|| format!("failed to load seed fixture {}", path.display()))?;

    let problems = seed.validate();
    if !problems.is_empty() {
        anyhow::bail!(
            "seed fixture {} is inconsistent: {}",
            path.display(),
            problems.join("; ")
        );
    }

    let tables = BookstoreTables::from_seed(seed)?;
    tracing::info!(
        books = tables.book_count(),
        orders = tables.order_count(),
        "seed fixture applied"
    );
    Ok(Database::new(tables))
}

/// Registry with every application module registered against `db`.
pub fn build_registry(db: &BookstoreDb, settings: &Settings) -> ModuleRegistry {
    let mut registry = ModuleRegistry::new();
    modules::register_all(&mut registry, db, settings);
    registry
}

/// Run the service until shutdown.
pub async fn run(settings: Settings) -> anyhow::Result<()> {
    let db = open_database(&settings)?;
    let registry = build_registry(&db, &settings);
    let ctx = InitCtx {
        settings: &settings,
    };

    registry.init_modules(&ctx).await?;
    registry.start_modules(&ctx).await?;

    let served = bookstore_http::start_server(&registry, &settings).await;

    registry.stop_modules().await?;
    served
}
