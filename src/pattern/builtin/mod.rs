//! The stock patterns.
//!
//! Constructive patterns build the canonical assembly/fixture/test/parameter
//! shape of the tree. Decoration patterns translate well-known annotations
//! into metadata edits, queued as decorators so contributions from separate
//! annotations land in a predictable order.
//!
//! [`register_defaults`] wires every stock pattern to its annotation name,
//! canonical spelling plus aliases, as defined in `espalier_vocab::attrs`.

mod assembly;
mod decorators;
mod fixture;
mod parameter;
mod recursive_type;
mod test_method;

pub use assembly::AssemblyPattern;
pub use decorators::{
    AuthorPattern, CategoryPattern, DependsOnPattern, DescriptionPattern, IgnorePattern,
    ImportancePattern, MetadataPattern, OrderPattern, PendingPattern,
};
pub use fixture::FixturePattern;
pub use parameter::ParameterPattern;
pub use recursive_type::RecursiveTypePattern;
pub use test_method::TestMethodPattern;

use std::sync::Arc;

use espalier_model::element::{Attr, CodeGraph, ElementId};
use espalier_vocab::attrs::{self, AttrName};

use super::Pattern;
use super::registry::PatternRegistry;

/// Bind the stock patterns to their annotation names.
pub fn register_defaults(registry: &mut PatternRegistry) {
    bind(registry, AttrName::Fixture, Arc::new(FixturePattern));
    bind(registry, AttrName::Test, Arc::new(TestMethodPattern));
    bind(registry, AttrName::Parameter, Arc::new(ParameterPattern));
    bind(registry, AttrName::Ignore, Arc::new(IgnorePattern::default()));
    bind(registry, AttrName::Pending, Arc::new(PendingPattern::default()));
    bind(registry, AttrName::Description, Arc::new(DescriptionPattern::default()));
    bind(registry, AttrName::Category, Arc::new(CategoryPattern::default()));
    bind(registry, AttrName::Author, Arc::new(AuthorPattern::default()));
    bind(registry, AttrName::Importance, Arc::new(ImportancePattern::default()));
    bind(registry, AttrName::Order, Arc::new(OrderPattern::default()));
    bind(registry, AttrName::Metadata, Arc::new(MetadataPattern::default()));
    bind(registry, AttrName::DependsOn, Arc::new(DependsOnPattern));
}

/// Bind one pattern object under an annotation's canonical spelling and all
/// of its aliases. The registry deduplicates by object identity, so an
/// element spelling the same annotation both ways invokes the pattern once.
fn bind(registry: &mut PatternRegistry, name: AttrName, pattern: Arc<dyn Pattern>) {
    registry.bind_attr(attrs::as_str(name), Arc::clone(&pattern));
    for alias in attrs::aliases(name) {
        registry.bind_attr(*alias, Arc::clone(&pattern));
    }
}

/// Attr instances on `element` that resolve to `name`, canonical spelling or
/// alias, in declaration order.
pub(crate) fn attrs_for<'g>(
    graph: &'g CodeGraph,
    element: ElementId,
    name: AttrName,
) -> impl Iterator<Item = &'g Attr> {
    graph
        .element(element)
        .attrs
        .iter()
        .filter(move |attr| attrs::from_str(&attr.name) == Some(name))
}
