//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! - `UserDirectory` - account lookup, lazy creation, subscription updates
//! - `PlanCatalog` - plan lookup by payment-provider variant id
//! - `CreditLedger` - append-only credit grants
//! - `SessionValidator` - session token validation
//! - `DatabaseHealth` - database connectivity check

mod credit_ledger;
mod database_health;
mod plan_catalog;
mod session_validator;
mod user_directory;

pub use credit_ledger::CreditLedger;
pub use database_health::DatabaseHealth;
pub use plan_catalog::PlanCatalog;
pub use session_validator::SessionValidator;
pub use user_directory::{FindOrCreateResult, UserDirectory};
