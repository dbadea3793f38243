//! PostgreSQL adapters - Database implementations for repository ports.
//!
//! - `PostgresUserDirectory` - users and their billing fields
//! - `PostgresPlanCatalog` - plan lookup by variant id
//! - `PostgresCreditLedger` - append-only credit grants
//! - `PostgresDatabaseHealth` - `SELECT 1` connectivity check

mod credit_ledger;
mod database_health;
mod plan_catalog;
mod user_directory;

pub use credit_ledger::PostgresCreditLedger;
pub use database_health::PostgresDatabaseHealth;
pub use plan_catalog::PostgresPlanCatalog;
pub use user_directory::PostgresUserDirectory;
