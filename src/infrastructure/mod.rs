//! Infrastructure shared across modules.
//!
//! Each module keeps its own repository implementations under
//! `modules/<name>/infrastructure`. This layer owns what they share: the
//! PostgreSQL pool, the in-memory table used by the memory backend, the
//! storage health probe, and [`Backends`], which assembles every port for one
//! storage backend.
//!
//! # Modules
//!
//! - [`database`] - Pool construction, migrations and the PostgreSQL probe
//! - [`health`] - Storage health probe trait
//! - [`memory`] - In-memory table shared by memory repositories

pub mod backends;
pub mod database;
pub mod health;
pub mod memory;

pub use backends::Backends;
pub use health::HealthProbe;
