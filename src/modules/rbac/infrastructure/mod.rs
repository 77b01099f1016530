//! Role repositories.

pub mod memory;
pub mod postgres;

pub use memory::InMemoryRoleRepository;
pub use postgres::PgRoleRepository;
