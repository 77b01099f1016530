//! ERP records and the gateway port.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::Value;

use super::errors::ErpError;

/// A registered entity serialized for the ERP.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ErpRecord {
    pub entity_name: String,
    pub entity_id: i64,
    pub payload: Value,
}

/// Acknowledgement returned by the ERP for an accepted record.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ErpReceipt {
    pub external_id: String,
    pub accepted_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ErpSyncResult {
    pub entity_name: String,
    pub entity_id: i64,
    pub receipt: ErpReceipt,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ErpStatus {
    pub gateway: &'static str,
    pub configured: bool,
    pub reachable: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// Outbound connection to an ERP system.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ErpGateway: Send + Sync {
    fn name(&self) -> &'static str;

    fn is_configured(&self) -> bool;

    async fn push(&self, record: &ErpRecord) -> Result<ErpReceipt, ErpError>;

    async fn ping(&self) -> Result<(), ErpError>;
}
