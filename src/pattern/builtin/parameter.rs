//! Consumes parameter and field elements into test parameters.

use espalier_model::element::{ElementDetail, ElementId};

use crate::builder::TestBuilder;
use crate::pattern::{Pattern, PatternError};

/// Builds a parameter slot on the containing test.
///
/// Serves two roles: the fallback for method parameters, and the bound
/// pattern for fields annotated as parameters. Field-backed slots take the
/// containing test's current parameter count as their ordinal.
#[derive(Debug)]
pub struct ParameterPattern;

impl Pattern for ParameterPattern {
    fn name(&self) -> &'static str {
        "parameter"
    }

    fn consume(
        &self,
        containing: &mut TestBuilder<'_, '_>,
        element: ElementId,
    ) -> Result<bool, PatternError> {
        let info = containing.graph().element(element);
        let (value_type, ordinal) = match &info.detail {
            ElementDetail::Parameter { value_type, ordinal } => (value_type.as_str(), *ordinal),
            ElementDetail::Field { value_type } => {
                (value_type.as_str(), containing.test().parameters().len())
            }
            _ => {
                return Err(PatternError::usage(format!(
                    "the parameter pattern cannot consume {} {:?}",
                    info.kind.label(),
                    info.name
                )));
            }
        };

        let mut parameter =
            containing.add_parameter(info.name.clone(), Some(element), value_type, ordinal)?;
        parameter.process(element)?;
        parameter.apply_decorators()?;
        Ok(true)
    }
}
