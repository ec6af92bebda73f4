//! Shared data model for the espalier engine: code graph, archive loading,
//! and the test tree.
//!
//! This crate holds everything that is *data* about a run. The walk itself
//! (patterns, registries, builder context) lives in the `espalier` crate.
//!
//! ## Notes
//! - This crate is intentionally "model-only": it enforces structural
//!   contracts (a node attaches once, a test never depends on itself) but
//!   knows nothing about patterns or annotation semantics.
//! - Kind and metadata-key identity comes from the `espalier_vocab`
//!   registries.
//!
//! ## Examples
//! ```rust
//! use espalier_model::tree::TestModel;
//! use espalier_vocab::kinds::TestKind;
//!
//! let mut model = TestModel::new();
//! let fixture = model.new_test("CalcFixture", None);
//! model.test_mut(fixture).set_kind(TestKind::Fixture);
//! model.attach(model.root(), fixture).unwrap();
//! assert_eq!(model.full_name(fixture), "CalcFixture");
//! ```
//!
//! ## See also
//! - `espalier_vocab` for registry-backed vocabulary (kinds/keys/attrs).

#![forbid(unsafe_code)]

pub mod annotation;
pub mod archive;
pub mod element;
pub mod errors;
pub mod metadata;
pub mod tree;
