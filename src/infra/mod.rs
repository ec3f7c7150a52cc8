//! Infrastructure layer for cross-cutting concerns.
//!
//! Provides foundational infrastructure including:
//! - Error handling and result types
//! - Signing options and their TOML representation

pub mod config;
pub mod error;
