//! Consumes annotated methods into test cases.

use espalier_model::element::{ElementId, ElementKind};
use espalier_vocab::kinds::TestKind;

use crate::builder::TestBuilder;
use crate::pattern::{Pattern, PatternError};

use super::parameter::ParameterPattern;

/// Builds a test case from a method and walks its parameters.
///
/// Method parameters fall back to [`ParameterPattern`], so a data-driven
/// method gets its slots without annotating each one.
#[derive(Debug)]
pub struct TestMethodPattern;

impl Pattern for TestMethodPattern {
    fn name(&self) -> &'static str {
        "test"
    }

    fn consume(
        &self,
        containing: &mut TestBuilder<'_, '_>,
        element: ElementId,
    ) -> Result<bool, PatternError> {
        let info = containing.graph().element(element);
        if info.kind != ElementKind::Method {
            return Err(PatternError::usage(format!(
                "the test pattern cannot consume {} {:?}",
                info.kind.label(),
                info.name
            )));
        }

        let mut test = containing.add_child(info.name.clone(), Some(element))?;
        test.set_kind(TestKind::Test);
        test.set_is_test_case(true);
        test.process(element)?;
        for parameter in test.graph().children_of_kind(element, ElementKind::Parameter) {
            test.consume_with_fallback(parameter, &ParameterPattern)?;
        }
        test.apply_decorators()?;
        Ok(true)
    }
}
