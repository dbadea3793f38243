//! In-memory database health switch.

use async_trait::async_trait;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crate::domain::foundation::DomainError;
use crate::ports::DatabaseHealth;

/// Reachable until told otherwise.
#[derive(Debug, Clone)]
pub struct InMemoryDatabaseHealth {
    available: Arc<AtomicBool>,
}

impl InMemoryDatabaseHealth {
    pub fn new() -> Self {
        Self {
            available: Arc::new(AtomicBool::new(true)),
        }
    }

    pub fn set_available(&self, available: bool) {
        self.available.store(available, Ordering::SeqCst);
    }
}

impl Default for InMemoryDatabaseHealth {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl DatabaseHealth for InMemoryDatabaseHealth {
    async fn ping(&self) -> Result<(), DomainError> {
        if self.available.load(Ordering::SeqCst) {
            Ok(())
        } else {
            Err(DomainError::database("connection refused"))
        }
    }
}
