//! Storage health probe.

use async_trait::async_trait;

use crate::error::AppError;

/// Checks that the storage backend answers.
#[async_trait]
pub trait HealthProbe: Send + Sync {
    /// Short backend name shown in the health report.
    fn backend(&self) -> &'static str;

    /// # Errors
    ///
    /// Returns an error when the backend cannot be reached.
    async fn ping(&self) -> Result<(), AppError>;
}

/// Probe for the in-memory backend; always healthy.
pub struct MemoryHealthProbe;

#[async_trait]
impl HealthProbe for MemoryHealthProbe {
    fn backend(&self) -> &'static str {
        "memory"
    }

    async fn ping(&self) -> Result<(), AppError> {
        Ok(())
    }
}
