//! Notifications module: per-user inbox messages.

pub mod adapter;
pub mod application;
pub mod domain;
pub mod errors;
pub mod infrastructure;

use axum::Router;
use std::sync::Arc;

use crate::infrastructure::Backends;
use crate::modules::Module;
use crate::registry::{EntityRegistry, RegistryError};
use crate::state::AppState;

pub use application::{NotificationLoader, NotificationService};
pub use domain::{CreateNotificationCommand, Notification, NotificationRepository};
pub use errors::NotificationsError;

pub struct NotificationsModule;

impl Module for NotificationsModule {
    fn name(&self) -> &'static str {
        "notifications"
    }

    fn prefix(&self) -> &'static str {
        "/notifications"
    }

    fn tags(&self) -> &'static [&'static str] {
        &["Notifications"]
    }

    fn routes(&self) -> Router<AppState> {
        adapter::routes()
    }

    fn register_entities(
        &self,
        entities: &mut EntityRegistry,
        backends: &Backends,
    ) -> Result<(), RegistryError> {
        entities.register_entity::<Notification>(Arc::new(NotificationLoader::new(
            backends.notifications.clone(),
        )))
    }
}
