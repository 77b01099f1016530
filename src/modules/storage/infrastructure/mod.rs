//! File metadata repositories and blob stores.

pub mod blobs;
pub mod memory;
pub mod postgres;

pub use blobs::{LocalBlobStore, MemoryBlobStore};
pub use memory::InMemoryFileRepository;
pub use postgres::PgFileRepository;
