#![forbid(unsafe_code)]
//! Espalier Test Model Construction Engine
//!
//! Espalier turns a static description of compiled test code (a code graph)
//! into an executable test tree. Composable pattern objects decide what each
//! code element contributes: constructive patterns grow the tree, decoration
//! patterns queue metadata edits, and a per-run builder context keeps the
//! bookkeeping honest. The engine has no test execution of its own; it stops
//! at a finished, annotated model.
//!
//! ## Panic Policy
//!
//! This codebase follows explicit error handling:
//!
//! - **Production code**: Use `Result` or `Option` with `?` / `ok_or` / `map_err`. The `cli` module
//!   enforces `#![deny(clippy::unwrap_used)]`.
//!
//! - **Test code**: `.unwrap()` and `.expect()` are acceptable in tests.
//!
//! - **True invariants**: Arena ids are creation-scoped; passing an id into a foreign model or
//!   graph is a logic error and panics by contract (see `espalier_model`).

pub mod builder;
pub mod cli;
pub mod explore;
pub mod pattern;
pub mod render;
pub mod version;

pub use builder::{TestBuilder, TestModelBuilder, TestParameterBuilder};
pub use explore::explore;
pub use pattern::registry::PatternRegistry;
pub use pattern::{Pattern, PatternError};
