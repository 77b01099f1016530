//! Symbolic entity names bound to concrete persisted types.
//!
//! Generic `(entity_name, entity_id)` references, such as user relationship
//! links or ERP sync requests, are resolved through this registry instead of a
//! hard-coded `match` over every module's types.

use std::any::{TypeId, type_name};
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;
use serde::Serialize;
use serde_json::{Value, json};

use super::error::RegistryError;
use crate::error::AppError;

/// Fetches one persisted record of a registered type by id.
#[async_trait]
pub trait EntityLoader: Send + Sync {
    /// Returns the record serialized as JSON, or `None` when no row has that id.
    async fn load(&self, id: i64) -> Result<Option<Value>, AppError>;
}

/// Serializes an optional row for an [`EntityLoader`].
///
/// # Errors
///
/// Returns [`AppError::Internal`] if the row cannot be represented as JSON.
pub fn to_record<T: Serialize>(row: Option<T>) -> Result<Option<Value>, AppError> {
    row.map(serde_json::to_value)
        .transpose()
        .map_err(|e| {
            AppError::internal(
                "Failed to serialize entity",
                json!({ "reason": e.to_string() }),
            )
        })
}

/// A persisted type that can be the target of a generic entity reference.
pub trait Relatable: 'static {
    /// Stable external name used in relationship links and URLs.
    const ENTITY_NAME: &'static str;
}

/// Type handle stored in the registry.
#[derive(Clone)]
pub struct EntityType {
    type_id: TypeId,
    type_name: &'static str,
    loader: Arc<dyn EntityLoader>,
}

impl EntityType {
    pub fn of<T: 'static>(loader: Arc<dyn EntityLoader>) -> Self {
        Self {
            type_id: TypeId::of::<T>(),
            type_name: type_name::<T>(),
            loader,
        }
    }

    pub fn is<T: 'static>(&self) -> bool {
        self.type_id == TypeId::of::<T>()
    }

    pub fn type_id(&self) -> TypeId {
        self.type_id
    }

    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    pub fn loader(&self) -> &Arc<dyn EntityLoader> {
        &self.loader
    }
}

impl PartialEq for EntityType {
    fn eq(&self, other: &Self) -> bool {
        self.type_id == other.type_id
    }
}

impl Eq for EntityType {}

impl fmt::Debug for EntityType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EntityType")
            .field("type_name", &self.type_name)
            .finish()
    }
}

/// Maps entity names to their [`EntityType`].
#[derive(Debug, Default, Clone)]
pub struct EntityRegistry {
    entries: HashMap<String, EntityType>,
}

impl EntityRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Binds `name` to type `T`, loaded through `loader`.
    ///
    /// Binding a name again to the same type is a no-op and keeps the first loader.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::DuplicateEntityName`] if `name` is bound to a different type.
    pub fn register<T: 'static>(
        &mut self,
        name: &str,
        loader: Arc<dyn EntityLoader>,
    ) -> Result<(), RegistryError> {
        let candidate = EntityType::of::<T>(loader);

        if let Some(existing) = self.entries.get(name) {
            if *existing == candidate {
                return Ok(());
            }
            return Err(RegistryError::DuplicateEntityName {
                name: name.to_string(),
                existing: existing.type_name(),
                attempted: candidate.type_name(),
            });
        }

        tracing::debug!(entity = name, type_name = candidate.type_name(), "entity registered");
        self.entries.insert(name.to_string(), candidate);
        Ok(())
    }

    /// Registers `T` under its own [`Relatable::ENTITY_NAME`].
    pub fn register_entity<T: Relatable>(
        &mut self,
        loader: Arc<dyn EntityLoader>,
    ) -> Result<(), RegistryError> {
        self.register::<T>(T::ENTITY_NAME, loader)
    }

    /// Looks up the type bound to `name`.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::UnknownEntityName`] if `name` was never registered.
    pub fn resolve(&self, name: &str) -> Result<&EntityType, RegistryError> {
        self.entries
            .get(name)
            .ok_or_else(|| RegistryError::UnknownEntityName {
                name: name.to_string(),
            })
    }

    /// Resolves `name` and fetches the record with `id`.
    ///
    /// # Errors
    ///
    /// Returns the [`RegistryError::UnknownEntityName`] kind for unregistered names,
    /// and whatever the loader reports on storage failures.
    pub async fn load(&self, name: &str, id: i64) -> Result<Option<Value>, AppError> {
        let entity = self.resolve(name)?;
        entity.loader().load(id).await
    }

    /// Returns true if a record named `name` with `id` exists.
    pub async fn exists(&self, name: &str, id: i64) -> Result<bool, AppError> {
        Ok(self.load(name, id).await?.is_some())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    /// Registered names, sorted.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.entries.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
