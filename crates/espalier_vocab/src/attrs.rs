//! Define the annotation name vocabulary.
//!
//! Code elements carry annotations (name plus positional string arguments).
//! The names the built-in patterns bind to come from this registry: a stable
//! identifier ([`AttrName`]) plus a const table ([`ATTRS`]) of canonical
//! spellings and accepted aliases.
//!
//! ## Notes
//! - Canonical spellings are lowercase; aliases cover common synonyms from
//!   other test platforms.
//! - Registries bind patterns by *string*, so user-defined annotation names
//!   outside this table are perfectly legal; this table only covers the
//!   built-ins.
//!
//! ## Examples
//! ```rust
//! use espalier_vocab::attrs::{self, AttrName};
//!
//! assert_eq!(attrs::from_str("fixture"), Some(AttrName::Fixture));
//! assert_eq!(attrs::from_str("test-fixture"), Some(AttrName::Fixture)); // alias
//! assert_eq!(attrs::as_str(AttrName::DependsOn), "depends-on");
//! ```

use super::registry::{Stability, VocabInfo};

/// Stable identifier for every built-in annotation name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AttrName {
    // Constructive
    Fixture,
    Test,
    Parameter,

    // Decorative
    Ignore,
    Pending,
    Description,
    Category,
    Author,
    Importance,
    Order,
    Metadata,
    DependsOn,
}

/// Metadata for an annotation name.
pub type AttrInfo = VocabInfo<AttrName>;

/// The annotation name registry.
pub const ATTRS: &[AttrInfo] = &[
    info_with_aliases(
        AttrName::Fixture,
        "fixture",
        &["test-fixture"],
        "Marks a type as a container of test cases.",
    ),
    info_with_aliases(AttrName::Test, "test", &["test-case"], "Marks a method as a test case."),
    info_with_aliases(
        AttrName::Parameter,
        "parameter",
        &["param"],
        "Marks a field or slot as a test parameter.",
    ),
    info_with_aliases(
        AttrName::Ignore,
        "ignore",
        &["skip"],
        "Excludes the test from runs; the optional argument is the reason.",
    ),
    info(
        AttrName::Pending,
        "pending",
        "Marks the test as awaiting further work; the optional argument is the reason.",
    ),
    info(AttrName::Description, "description", "Attaches a human-readable description."),
    info(AttrName::Category, "category", "Assigns one grouping label per argument."),
    info(
        AttrName::Author,
        "author",
        "Records the author: name, then optional email and homepage.",
    ),
    info(AttrName::Importance, "importance", "Records the test's relative importance."),
    info(
        AttrName::Order,
        "order",
        "Sets the node's execution ordering weight (a signed integer).",
    ),
    info(
        AttrName::Metadata,
        "metadata",
        "Adds one verbatim key/value metadata pair.",
    ),
    info_with_aliases(
        AttrName::DependsOn,
        "depends-on",
        &["depends"],
        "Declares a dependency on the tests built from the named element.",
    ),
];

/// Canonical spelling.
pub fn as_str(id: AttrName) -> &'static str {
    info_for(id).canonical
}

/// Aliases.
pub fn aliases(id: AttrName) -> &'static [&'static str] {
    info_for(id).aliases
}

/// Full metadata.
///
/// ## Panics
/// - If the registry is missing an entry for `id` (this indicates a programming error).
pub fn info_for(id: AttrName) -> &'static AttrInfo {
    ATTRS.iter().find(|a| a.id == id).expect("attr info missing")
}

/// Lookup by spelling (canonical or alias).
///
/// ## Notes
/// - Matching is **case-sensitive**.
pub fn from_str(s: &str) -> Option<AttrName> {
    if let Some(a) = ATTRS.iter().find(|a| a.canonical == s) {
        return Some(a.id);
    }
    ATTRS
        .iter()
        .find(|a| {
            let aliases: &[&str] = a.aliases;
            aliases.contains(&s)
        })
        .map(|a| a.id)
}

// --- helpers -----------------------------------------------------------------

const fn info(id: AttrName, canonical: &'static str, description: &'static str) -> AttrInfo {
    AttrInfo {
        id,
        canonical,
        aliases: &[],
        description,
        stability: Stability::Stable,
    }
}

const fn info_with_aliases(
    id: AttrName,
    canonical: &'static str,
    aliases: &'static [&'static str],
    description: &'static str,
) -> AttrInfo {
    AttrInfo {
        id,
        canonical,
        aliases,
        description,
        stability: Stability::Stable,
    }
}
