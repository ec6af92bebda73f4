//! Consumes assembly elements into assembly-level tests.

use espalier_model::element::{AssemblyDetail, ElementDetail, ElementId, ElementKind};
use espalier_vocab::kinds::TestKind;
use espalier_vocab::metadata_keys::MetadataKey;

use crate::builder::TestBuilder;
use crate::pattern::{Pattern, PatternError};

use super::recursive_type::RecursiveTypePattern;

/// Builds one test per assembly and walks the assembly's top-level types.
///
/// The explorer applies this pattern as the fallback for assembly elements,
/// so assemblies need no annotation of their own.
#[derive(Debug)]
pub struct AssemblyPattern;

impl Pattern for AssemblyPattern {
    fn name(&self) -> &'static str {
        "assembly"
    }

    fn consume(
        &self,
        containing: &mut TestBuilder<'_, '_>,
        element: ElementId,
    ) -> Result<bool, PatternError> {
        let info = containing.graph().element(element);
        let ElementDetail::Assembly(detail) = &info.detail else {
            return Err(PatternError::usage(format!(
                "the assembly pattern cannot consume {} {:?}",
                info.kind.label(),
                info.name
            )));
        };

        let mut assembly = containing.add_child(info.name.clone(), Some(element))?;
        assembly.set_kind(TestKind::Assembly);
        populate_metadata(&mut assembly, detail);
        assembly.process(element)?;
        for ty in assembly.graph().children_of_kind(element, ElementKind::Type) {
            assembly.consume_with_fallback(ty, &RecursiveTypePattern)?;
        }
        assembly.apply_decorators()?;
        Ok(true)
    }
}

/// Copy the assembly's descriptive fields into node metadata. Unset fields
/// leave no key behind.
fn populate_metadata(test: &mut TestBuilder<'_, '_>, detail: &AssemblyDetail) {
    if let Some(version) = detail.version {
        test.add_metadata(MetadataKey::Version, version.to_string());
    }
    let texts = [
        (MetadataKey::CodeBase, &detail.code_base),
        (MetadataKey::Company, &detail.company),
        (MetadataKey::Configuration, &detail.configuration),
        (MetadataKey::Copyright, &detail.copyright),
        (MetadataKey::Description, &detail.description),
        (MetadataKey::FileVersion, &detail.file_version),
        (MetadataKey::InformationalVersion, &detail.informational_version),
        (MetadataKey::Product, &detail.product),
        (MetadataKey::Title, &detail.title),
        (MetadataKey::Trademark, &detail.trademark),
    ];
    for (key, value) in texts {
        if let Some(value) = value {
            test.add_metadata(key, value.as_str());
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::builder::TestModelBuilder;
    use crate::pattern::registry::PatternRegistry;
    use espalier_model::element::CodeGraph;

    #[test]
    fn descriptive_fields_become_metadata_and_unset_ones_vanish() {
        let mut graph = CodeGraph::new();
        let detail = AssemblyDetail {
            framework_name: "Espalier".to_string(),
            version: Some("2.1.0".parse().unwrap()),
            company: Some("Initech".to_string()),
            ..AssemblyDetail::default()
        };
        let asm = graph.add_assembly("calc.tests", detail);
        let registry = PatternRegistry::new();
        let mut ctx = TestModelBuilder::new(&graph, &registry);

        let mut root = ctx.root_scope();
        let consumed = AssemblyPattern.consume(&mut root, asm).unwrap();
        assert!(consumed);

        let model = ctx.into_model();
        let assembly = model.test(model.test(model.root()).children()[0]);
        assert_eq!(assembly.kind(), TestKind::Assembly);
        assert_eq!(assembly.metadata().first("Version"), Some("2.1.0"));
        assert_eq!(assembly.metadata().first("Company"), Some("Initech"));
        assert!(!assembly.metadata().contains_key("Copyright"));
    }

    #[test]
    fn refuses_elements_that_are_not_assemblies() {
        let mut graph = CodeGraph::new();
        let asm = graph.add_assembly("a", AssemblyDetail::default());
        let ty = graph.add_type(asm, "T");
        let registry = PatternRegistry::new();
        let mut ctx = TestModelBuilder::new(&graph, &registry);

        let mut root = ctx.root_scope();
        let err = AssemblyPattern.consume(&mut root, ty).unwrap_err();
        assert!(matches!(err, PatternError::Usage(_)));
    }
}
