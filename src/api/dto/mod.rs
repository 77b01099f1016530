//! Shared Data Transfer Objects.
//!
//! Module commands live in each module's `domain`; these are the shapes every
//! module reuses.

pub mod health;
pub mod modules;
pub mod pagination;
