//! User relationships module: links between a user and any registered entity.
//!
//! A link is the triple `(user_id, entity_name, entity_id)`. The entity name
//! is resolved through the [`EntityRegistry`](crate::registry::EntityRegistry)
//! both when a link is created and when it is read back with its record.

pub mod adapter;
pub mod application;
pub mod domain;
pub mod errors;
pub mod infrastructure;

use axum::Router;

use crate::modules::Module;
use crate::state::AppState;

pub use application::RelationshipService;
pub use domain::{
    CreateRelationshipCommand, Relationship, RelationshipRepository, ResolvedRelationship,
};
pub use errors::RelationshipsError;

pub struct RelationshipsModule;

impl Module for RelationshipsModule {
    fn name(&self) -> &'static str {
        "relationships"
    }

    fn prefix(&self) -> &'static str {
        "/relationships"
    }

    fn tags(&self) -> &'static [&'static str] {
        &["Relationships"]
    }

    fn routes(&self) -> Router<AppState> {
        adapter::routes()
    }
}
