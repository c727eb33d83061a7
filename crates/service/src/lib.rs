//! Shared service infrastructure for the KeyTree namespace explorer.
//!
//! This crate provides the components the gateway binary assembles:
//! - Config (listen address, storage endpoint/credentials, static assets)
//! - State management (storage client + explorer behind one handle)
//! - HTTP handlers (node listing, health checks, static file serving)

pub mod config;
pub mod http;
pub mod state;

// Re-export key types for convenience
pub use config::{Config, ConfigError};
pub use state::{State as ServiceState, StateSetupError};
