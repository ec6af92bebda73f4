//! Define the metadata key vocabulary.
//!
//! Test tree nodes carry an ordered key/value multimap. The keys in that map
//! come from this registry: a stable identifier ([`MetadataKey`]) plus a
//! const table ([`KEYS`]) of canonical spellings. The spellings follow the
//! published key set of the upstream test platform so archives, reports, and
//! runners agree on names.
//!
//! ## Notes
//! - Lookup via [`from_str`] is **case-sensitive**.
//! - Nothing outside this crate should spell a key as a string literal; the
//!   guardrail tests scan for violations.
//!
//! ## Examples
//! ```rust
//! use espalier_vocab::metadata_keys::{self, MetadataKey};
//!
//! assert_eq!(metadata_keys::as_str(MetadataKey::IgnoreReason), "IgnoreReason");
//! assert_eq!(metadata_keys::from_str("Category"), Some(MetadataKey::Category));
//! ```

use super::registry::{Stability, VocabInfo};

/// Stable identifier for every well-known metadata key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MetadataKey {
    // Attribution
    AuthorEmail,
    AuthorHomepage,
    AuthorName,
    Company,
    Copyright,
    Trademark,

    // Classification
    Category,
    Importance,
    TestKind,
    TestsOn,

    // Descriptive text
    Description,
    Title,
    XmlDocumentation,

    // Assembly provenance
    CodeBase,
    Configuration,
    File,
    FileVersion,
    Framework,
    InformationalVersion,
    Product,
    Version,

    // Run disposition
    ExplicitReason,
    IgnoreReason,
    PendingReason,

    // Data sources
    DataLocation,

    // Legacy exception expectations
    ExpectedException,
    ExpectedExceptionMessage,
}

/// Metadata for a metadata key.
pub type MetadataKeyInfo = VocabInfo<MetadataKey>;

/// The key registry.
pub const KEYS: &[MetadataKeyInfo] = &[
    info(MetadataKey::AuthorEmail, "AuthorEmail", "Email address of the test's author."),
    info(
        MetadataKey::AuthorHomepage,
        "AuthorHomepage",
        "Homepage of the test's author.",
    ),
    info(MetadataKey::AuthorName, "AuthorName", "Name of the test's author."),
    info(MetadataKey::Company, "Company", "Company recorded on the assembly."),
    info(MetadataKey::Copyright, "Copyright", "Copyright recorded on the assembly."),
    info(MetadataKey::Trademark, "Trademark", "Trademark recorded on the assembly."),
    info(MetadataKey::Category, "Category", "User-assigned grouping label."),
    info(
        MetadataKey::Importance,
        "Importance",
        "Relative importance assigned to the test.",
    ),
    info(MetadataKey::TestKind, "TestKind", "Kind override recorded as metadata."),
    info(
        MetadataKey::TestsOn,
        "TestsOn",
        "Name of the code element the test exercises.",
    ),
    info(MetadataKey::Description, "Description", "Human-readable description."),
    info(MetadataKey::Title, "Title", "Title recorded on the assembly."),
    info(
        MetadataKey::XmlDocumentation,
        "XmlDocumentation",
        "Documentation text extracted from the source element.",
    ),
    info(MetadataKey::CodeBase, "CodeBase", "Path the assembly was loaded from."),
    info(
        MetadataKey::Configuration,
        "Configuration",
        "Build configuration recorded on the assembly.",
    ),
    info(MetadataKey::File, "File", "Source file associated with the element."),
    info(MetadataKey::FileVersion, "FileVersion", "File version recorded on the assembly."),
    info(
        MetadataKey::Framework,
        "Framework",
        "Display name of the framework the assembly targets.",
    ),
    info(
        MetadataKey::InformationalVersion,
        "InformationalVersion",
        "Informational version recorded on the assembly.",
    ),
    info(MetadataKey::Product, "Product", "Product recorded on the assembly."),
    info(MetadataKey::Version, "Version", "Version of the assembly itself."),
    info(
        MetadataKey::ExplicitReason,
        "ExplicitReason",
        "Why the test only runs when selected explicitly.",
    ),
    info(MetadataKey::IgnoreReason, "IgnoreReason", "Why the test is ignored."),
    info(
        MetadataKey::PendingReason,
        "PendingReason",
        "Why the test is pending further work.",
    ),
    info(
        MetadataKey::DataLocation,
        "DataLocation",
        "Location of external data consumed by the test.",
    ),
    deprecated(
        MetadataKey::ExpectedException,
        "ExpectedException",
        "Exception type the test body is expected to raise.",
    ),
    deprecated(
        MetadataKey::ExpectedExceptionMessage,
        "ExpectedExceptionMessage",
        "Message the expected exception must carry.",
    ),
];

/// Canonical spelling.
pub fn as_str(id: MetadataKey) -> &'static str {
    info_for(id).canonical
}

/// Full metadata.
///
/// ## Panics
/// - If the registry is missing an entry for `id` (this indicates a programming error).
pub fn info_for(id: MetadataKey) -> &'static MetadataKeyInfo {
    KEYS.iter().find(|k| k.id == id).expect("metadata key info missing")
}

/// Lookup by spelling.
pub fn from_str(s: &str) -> Option<MetadataKey> {
    KEYS.iter().find(|k| k.canonical == s).map(|k| k.id)
}

// --- helpers -----------------------------------------------------------------

const fn info(id: MetadataKey, canonical: &'static str, description: &'static str) -> MetadataKeyInfo {
    MetadataKeyInfo {
        id,
        canonical,
        aliases: &[],
        description,
        stability: Stability::Stable,
    }
}

const fn deprecated(id: MetadataKey, canonical: &'static str, description: &'static str) -> MetadataKeyInfo {
    MetadataKeyInfo {
        id,
        canonical,
        aliases: &[],
        description,
        stability: Stability::Deprecated,
    }
}
