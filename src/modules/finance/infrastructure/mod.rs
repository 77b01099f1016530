//! Currency repositories.

pub mod memory;
pub mod postgres;

pub use memory::InMemoryCurrencyRepository;
pub use postgres::PgCurrencyRepository;
