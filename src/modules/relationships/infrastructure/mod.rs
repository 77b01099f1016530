//! Relationship repositories.

pub mod memory;
pub mod postgres;

pub use memory::InMemoryRelationshipRepository;
pub use postgres::PgRelationshipRepository;
