//! Application layer - Commands, Queries, and Handlers.
//!
//! This layer orchestrates domain operations and coordinates between ports.
//! Command handlers change state at the provider or ledger; query handlers
//! only read.

pub mod handlers;

pub use handlers::*;
