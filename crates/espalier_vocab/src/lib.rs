//! Provide the canonical vocabulary for the espalier test model.
//!
//! This crate is intentionally small and dependency-free. It is the single
//! source of truth for the strings that cross module boundaries: test kinds,
//! metadata keys, and the annotation names the built-in patterns bind to.
//!
//! ## Notes
//!
//! - This is a "vocabulary core" crate: **no IO**, no global state, and no
//!   engine-specific types.
//! - Consumers match on the enum ids, never on the spellings; guardrail tests
//!   in the workspace scan for stringly-typed checks that bypass these
//!   registries.
//!
//! ## Examples
//! ```rust
//! use espalier_vocab::kinds::{self, TestKind};
//! use espalier_vocab::metadata_keys::{self, MetadataKey};
//!
//! assert_eq!(kinds::as_str(TestKind::Fixture), "Fixture");
//! assert_eq!(metadata_keys::as_str(MetadataKey::Category), "Category");
//! ```

#![forbid(unsafe_code)]

pub mod attrs;
pub mod kinds;
pub mod metadata_keys;
pub mod registry;
