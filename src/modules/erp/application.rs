//! ERP synchronization with retries.

use std::sync::Arc;
use std::time::Duration;

use tokio_retry::RetryIf;
use tokio_retry::strategy::{ExponentialBackoff, jitter};

use super::domain::{ErpGateway, ErpRecord, ErpStatus, ErpSyncResult};
use super::errors::ErpError;
use crate::error::AppError;
use crate::registry::EntityRegistry;

const BACKOFF_BASE_MS: u64 = 2;
const BACKOFF_FACTOR_MS: u64 = 50;
const BACKOFF_MAX_DELAY: Duration = Duration::from_secs(5);

/// Pushes registered entities to the ERP gateway.
///
/// Transient failures ([`ErpError::is_transient`]) are retried with jittered
/// exponential backoff, at most `retry_attempts` times after the first try.
pub struct ErpService {
    gateway: Arc<dyn ErpGateway>,
    entities: Arc<EntityRegistry>,
    retry_attempts: usize,
}

impl ErpService {
    pub fn new(
        gateway: Arc<dyn ErpGateway>,
        entities: Arc<EntityRegistry>,
        retry_attempts: usize,
    ) -> Self {
        Self {
            gateway,
            entities,
            retry_attempts,
        }
    }

    /// Loads `entity_name`/`entity_id` through the registry and pushes it.
    ///
    /// # Errors
    ///
    /// - `unknown_entity_name` if the name is not registered
    /// - [`ErpError::RecordNotFound`] if the row does not exist
    /// - the gateway's error once retries are exhausted
    pub async fn sync(
        &self,
        entity_name: &str,
        entity_id: i64,
    ) -> Result<ErpSyncResult, AppError> {
        let payload = self
            .entities
            .load(entity_name, entity_id)
            .await?
            .ok_or_else(|| ErpError::RecordNotFound {
                entity_name: entity_name.to_string(),
                entity_id,
            })?;

        let record = ErpRecord {
            entity_name: entity_name.to_string(),
            entity_id,
            payload,
        };

        let strategy = ExponentialBackoff::from_millis(BACKOFF_BASE_MS)
            .factor(BACKOFF_FACTOR_MS)
            .max_delay(BACKOFF_MAX_DELAY)
            .map(jitter)
            .take(self.retry_attempts);

        let gateway = self.gateway.as_ref();
        let pushed = &record;
        let receipt = RetryIf::start(
            strategy,
            move || async move {
                gateway.push(pushed).await.inspect_err(|e| {
                    if e.is_transient() {
                        tracing::warn!(entity_name, entity_id, error = %e, "ERP push failed");
                    }
                })
            },
            |e: &ErpError| e.is_transient(),
        )
        .await?;

        tracing::info!(
            entity_name,
            entity_id,
            external_id = %receipt.external_id,
            "record synchronized to ERP"
        );

        Ok(ErpSyncResult {
            entity_name: record.entity_name,
            entity_id,
            receipt,
        })
    }

    /// Gateway configuration and reachability. Never fails.
    pub async fn status(&self) -> ErpStatus {
        let gateway = self.gateway.name();

        if !self.gateway.is_configured() {
            return ErpStatus {
                gateway,
                configured: false,
                reachable: false,
                message: Some(ErpError::NotConfigured.to_string()),
            };
        }

        match self.gateway.ping().await {
            Ok(()) => ErpStatus {
                gateway,
                configured: true,
                reachable: true,
                message: None,
            },
            Err(e) => ErpStatus {
                gateway,
                configured: true,
                reachable: false,
                message: Some(e.to_string()),
            },
        }
    }
}
