//! System endpoints that belong to no business module.

pub mod health;
pub mod modules;

pub use health::health_handler;
pub use modules::modules_handler;
