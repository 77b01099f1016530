//! HTTP pieces shared by every module's adapter layer.
//!
//! Module-specific routes live next to their module under
//! [`crate::modules`]; this layer holds what they have in common.
//!
//! # Modules
//!
//! - [`dto`] - Shared request/response shapes (pagination, health, introspection)
//! - [`extract`] - Extractors that reject with the uniform error body
//! - [`handlers`] - System endpoints (health, module introspection)
//! - [`middleware`] - Tracing and rate limiting layers
//! - [`validation`] - Field validators shared by commands

pub mod dto;
pub mod extract;
pub mod handlers;
pub mod middleware;
pub mod validation;
