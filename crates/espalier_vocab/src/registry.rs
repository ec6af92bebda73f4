//! Shared metadata shapes for the vocabulary registries.
//!
//! Every registry in this crate (test kinds, metadata keys, annotation names)
//! publishes a const table of entries built from these types. Keeping the
//! shapes here means the docgen binary and the guardrail tests can treat all
//! registries uniformly.
//!
//! ## Notes
//! - Everything is `Copy` so tables can be `const` and entries can be passed
//!   around freely.
//! - Registries are intentionally **pure**: no IO, no allocation, no state.

/// Stability of a vocabulary entry.
///
/// ## Notes
/// - `Deprecated` entries still resolve via `from_str`; consumers decide how
///   loudly to complain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stability {
    Stable,
    Deprecated,
}

/// Metadata for one vocabulary entry.
///
/// ## Notes
/// - `canonical` is the preferred spelling for rendering and storage.
/// - `aliases` are accepted on input only; nothing ever emits an alias.
#[derive(Debug, Clone, Copy)]
pub struct VocabInfo<Id: 'static> {
    pub id: Id,
    pub canonical: &'static str,
    pub aliases: &'static [&'static str],
    pub description: &'static str,
    pub stability: Stability,
}
