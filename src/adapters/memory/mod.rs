//! In-memory adapters.
//!
//! Used by tests and by local runs without a database.

mod credit_ledger;
mod database_health;
mod plan_catalog;
mod user_directory;

pub use credit_ledger::InMemoryCreditLedger;
pub use database_health::InMemoryDatabaseHealth;
pub use plan_catalog::InMemoryPlanCatalog;
pub use user_directory::InMemoryUserDirectory;
