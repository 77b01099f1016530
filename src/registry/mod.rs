//! Process-wide registries that let modules plug into the application without
//! importing each other.
//!
//! Both registries are filled during [`crate::bootstrap::init`] through `&mut`
//! access, then frozen (moved behind an `Arc`) before the server starts. After
//! that point they are only read, so request tasks share them without locking.
//!
//! - [`modules`] - ordered route groups contributed by each module
//! - [`entities`] - symbolic entity names bound to concrete types and their loaders

pub mod entities;
pub mod error;
pub mod modules;

pub use entities::{EntityLoader, EntityRegistry, EntityType, Relatable, to_record};
pub use error::RegistryError;
pub use modules::{ModuleRegistry, RouteGroup};
