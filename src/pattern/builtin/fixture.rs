//! Consumes annotated types into fixture tests.

use espalier_model::element::{ElementId, ElementKind};
use espalier_vocab::kinds::TestKind;

use crate::builder::TestBuilder;
use crate::pattern::{Pattern, PatternError};

use super::recursive_type::RecursiveTypePattern;

/// Builds a fixture test from a type and walks its members.
///
/// Fields and methods are consumed without a fallback: members carrying no
/// recognized annotation are skipped. Nested types fall back to recursive
/// discovery so fixtures declared inside plain types are still found.
#[derive(Debug)]
pub struct FixturePattern;

impl Pattern for FixturePattern {
    fn name(&self) -> &'static str {
        "fixture"
    }

    fn consume(
        &self,
        containing: &mut TestBuilder<'_, '_>,
        element: ElementId,
    ) -> Result<bool, PatternError> {
        let info = containing.graph().element(element);
        if info.kind != ElementKind::Type {
            return Err(PatternError::usage(format!(
                "the fixture pattern cannot consume {} {:?}",
                info.kind.label(),
                info.name
            )));
        }

        let mut fixture = containing.add_child(info.name.clone(), Some(element))?;
        fixture.set_kind(TestKind::Fixture);
        fixture.process(element)?;
        for field in fixture.graph().children_of_kind(element, ElementKind::Field) {
            fixture.consume(field)?;
        }
        for method in fixture.graph().children_of_kind(element, ElementKind::Method) {
            fixture.consume(method)?;
        }
        for nested in fixture.graph().children_of_kind(element, ElementKind::Type) {
            fixture.consume_with_fallback(nested, &RecursiveTypePattern)?;
        }
        fixture.apply_decorators()?;
        Ok(true)
    }
}
