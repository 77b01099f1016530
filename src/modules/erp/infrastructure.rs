//! ERP gateway adapters.

use async_trait::async_trait;

use super::domain::{ErpGateway, ErpReceipt, ErpRecord};
use super::errors::ErpError;

/// Gateway used when no ERP is configured. Every call fails with
/// [`ErpError::NotConfigured`].
#[derive(Debug, Default)]
pub struct DisabledErpGateway;

#[async_trait]
impl ErpGateway for DisabledErpGateway {
    fn name(&self) -> &'static str {
        "disabled"
    }

    fn is_configured(&self) -> bool {
        false
    }

    async fn push(&self, _record: &ErpRecord) -> Result<ErpReceipt, ErpError> {
        Err(ErpError::NotConfigured)
    }

    async fn ping(&self) -> Result<(), ErpError> {
        Err(ErpError::NotConfigured)
    }
}
