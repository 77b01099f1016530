//! File storage module: uploaded files owned by users.
//!
//! Metadata lives in a [`FileRepository`]; the bytes live in a [`BlobStore`]
//! under an opaque storage key.

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

pub use application::{FileLoader, FileService};
pub use domain::{BlobStore, FileRepository, NewStoredFile, StoredFile};
pub use errors::StorageError;

pub struct StorageModule {
    max_upload_bytes: usize,
}

impl StorageModule {
    pub fn new(max_upload_bytes: usize) -> Self {
        Self { max_upload_bytes }
    }
}

impl Module for StorageModule {
    fn name(&self) -> &'static str {
        "storage"
    }

    fn prefix(&self) -> &'static str {
        "/files"
    }

    fn tags(&self) -> &'static [&'static str] {
        &["Storage", "Files"]
    }

    fn routes(&self) -> Router<AppState> {
        adapter::routes(self.max_upload_bytes)
    }

    fn register_entities(
        &self,
        entities: &mut EntityRegistry,
        backends: &Backends,
    ) -> Result<(), RegistryError> {
        entities.register_entity::<StoredFile>(Arc::new(FileLoader::new(backends.files.clone())))
    }
}
