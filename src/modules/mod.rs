pub mod books;
pub mod returns;

use bookstore_kernel::{settings::Settings, ModuleRegistry};

use crate::store::BookstoreDb;

/// Register all project-specific modules with the registry
pub fn register_all(registry: &mut ModuleRegistry, db: &BookstoreDb, settings: &Settings) {
    registry.register(books::create_module(db.clone()));
    registry.register(returns::create_module(
        db.clone(),
        settings.returns.maintenance_enabled,
    ));
}
