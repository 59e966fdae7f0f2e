//! Infrastructure implementations.
//!
//! Contains port trait implementations and process configuration.

pub mod clock;
pub mod config;
pub mod in_memory;
pub mod ports;
