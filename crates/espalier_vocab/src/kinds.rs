//! Define the test kind vocabulary.
//!
//! This module is the single source of truth for the kinds a test tree node
//! can take: a stable identifier ([`TestKind`]) plus a const metadata table
//! ([`KINDS`]) recording canonical spellings and descriptions.
//!
//! ## Notes
//! - Lookup via [`from_str`] is **case-sensitive**.
//! - Freshly created nodes default to [`TestKind::Group`] until a pattern
//!   claims something more specific.
//!
//! ## Examples
//! ```rust
//! use espalier_vocab::kinds::{self, TestKind};
//!
//! assert_eq!(kinds::from_str("Fixture"), Some(TestKind::Fixture));
//! assert_eq!(kinds::as_str(TestKind::Fixture), "Fixture");
//! assert_eq!(TestKind::default(), TestKind::Group);
//! ```

use super::registry::{Stability, VocabInfo};

/// Stable identifier for every test kind.
///
/// ## Notes
/// - The canonical spelling is accessible via [`as_str`].
/// - `Error` marks synthetic placeholder nodes standing in for code the
///   explorer could not process.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum TestKind {
    /// Singleton tree root. Exactly one per model.
    Root,
    /// One node per distinct framework version encountered.
    Framework,
    /// One node per explored assembly.
    Assembly,
    /// A type-level container of test cases.
    Fixture,
    /// A runnable test case.
    Test,
    /// Unclassified container. The default for fresh nodes.
    #[default]
    Group,
    /// Placeholder for code that failed to explore.
    Error,
}

/// Metadata for a test kind.
pub type KindInfo = VocabInfo<TestKind>;

/// The kind registry.
pub const KINDS: &[KindInfo] = &[
    info(TestKind::Root, "Root", "Singleton root of the test tree."),
    info(
        TestKind::Framework,
        "Framework",
        "Groups every assembly built against one framework version.",
    ),
    info(TestKind::Assembly, "Assembly", "All tests found in one assembly."),
    info(TestKind::Fixture, "Fixture", "Type-level container of test cases."),
    info(TestKind::Test, "Test", "A runnable test case."),
    info(TestKind::Group, "Group", "Unclassified container node."),
    info(
        TestKind::Error,
        "Error",
        "Synthetic placeholder for code that failed to explore.",
    ),
];

/// Canonical spelling.
///
/// ## Parameters
/// - `id`: Kind identifier.
///
/// ## Returns
/// - The canonical spelling for `id`.
pub fn as_str(id: TestKind) -> &'static str {
    info_for(id).canonical
}

/// Full metadata.
///
/// ## Panics
/// - If the registry is missing an entry for `id` (this indicates a programming error).
pub fn info_for(id: TestKind) -> &'static KindInfo {
    KINDS.iter().find(|k| k.id == id).expect("kind info missing")
}

/// Lookup by spelling.
///
/// ## Returns
/// - `Some(TestKind)` if the spelling matches this registry.
/// - `None` otherwise.
pub fn from_str(s: &str) -> Option<TestKind> {
    KINDS.iter().find(|k| k.canonical == s).map(|k| k.id)
}

// --- helpers -----------------------------------------------------------------

const fn info(id: TestKind, canonical: &'static str, description: &'static str) -> KindInfo {
    KindInfo {
        id,
        canonical,
        aliases: &[],
        description,
        stability: Stability::Stable,
    }
}
