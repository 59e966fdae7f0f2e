//! Starsheet Engine library.
//!
//! Everything around the pure derivation rules in `starsheet-domain`.
//!
//! ## Structure
//!
//! - `use_cases/` - Character management and sheet derivation
//! - `infrastructure/` - Ports, the in-memory store, clock and configuration
//! - `app` - Application composition

pub mod app;
pub mod infrastructure;
pub mod use_cases;

pub use app::App;
