//! Fallback discovery for types without annotations.

use espalier_model::element::{ElementId, ElementKind};

use crate::builder::TestBuilder;
use crate::pattern::{Pattern, PatternError};

/// Walks the nested types of an otherwise uninteresting type.
///
/// Creates no node of its own and reports consumption only when a nested
/// type produced something, so containers of plain code stay invisible.
#[derive(Debug)]
pub struct RecursiveTypePattern;

impl Pattern for RecursiveTypePattern {
    fn name(&self) -> &'static str {
        "recursive-type"
    }

    fn consume(
        &self,
        containing: &mut TestBuilder<'_, '_>,
        element: ElementId,
    ) -> Result<bool, PatternError> {
        if containing.graph().element(element).kind != ElementKind::Type {
            return Ok(false);
        }
        let mut any = false;
        for nested in containing.graph().children_of_kind(element, ElementKind::Type) {
            if containing.consume_with_fallback(nested, &RecursiveTypePattern)? {
                any = true;
            }
        }
        Ok(any)
    }
}
