//! Provider repositories.

pub mod memory;
pub mod postgres;

pub use memory::InMemoryProviderRepository;
pub use postgres::PgProviderRepository;
