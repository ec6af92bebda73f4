//! Espalier version information.
//!
//! This module exposes the engine version as a single constant so all
//! subsystems (CLI, renderers) agree on the same value.
//!
//! ## Notes
//!
//! - The value is taken from Cargo metadata (`CARGO_PKG_VERSION`) at compile time.
//! - Prefer this constant over repeating `env!("CARGO_PKG_VERSION")` in multiple places.

/// The espalier version string (for example, `0.1.0-alpha.2`).
pub const ESPALIER_VERSION: &str = env!("CARGO_PKG_VERSION");
