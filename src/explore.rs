//! Top-level walk: code graph in, test model out.
//!
//! The explorer is the error boundary of a run. Pattern errors propagate
//! synchronously through the builder layer; here they are caught per
//! assembly so one broken assembly cannot take the others down. A failed
//! assembly leaves an error annotation on the model plus a placeholder node
//! under its framework test.

use espalier_model::annotation::Annotation;
use espalier_model::element::{CodeGraph, ElementDetail, ElementId, Version};
use espalier_model::errors::ModelError;
use espalier_model::tree::{TestId, TestModel};
use espalier_vocab::kinds::TestKind;
use espalier_vocab::metadata_keys::{self, MetadataKey};

use crate::builder::TestModelBuilder;
use crate::pattern::PatternError;
use crate::pattern::builtin::AssemblyPattern;
use crate::pattern::registry::PatternRegistry;

/// Walk every assembly in `graph` and build the test model.
///
/// Assemblies are visited in declaration order. After the walk, deferred
/// finish actions run (dependency resolution lives there) and the model is
/// sealed.
#[tracing::instrument(skip_all, fields(elements = graph.len()))]
pub fn explore(graph: &CodeGraph, registry: &PatternRegistry) -> TestModel {
    let mut ctx = TestModelBuilder::new(graph, registry);
    for assembly in graph.assemblies() {
        explore_assembly(&mut ctx, assembly);
    }
    ctx.finish_model();
    ctx.into_model()
}

fn explore_assembly(ctx: &mut TestModelBuilder<'_>, assembly: ElementId) {
    let info = ctx.graph().element(assembly);
    let ElementDetail::Assembly(detail) = &info.detail else {
        return;
    };
    let version = detail.framework_version.unwrap_or(Version::new(0, 0, 0));
    let framework = match ctx.framework_test(&detail.framework_name, version) {
        Ok(test) => test,
        Err(err) => {
            ctx.model_mut().add_annotation(
                Annotation::error(Some(assembly), "could not create the framework test")
                    .with_details(err.to_string()),
            );
            return;
        }
    };
    if let Err(err) = ctx.consume(framework, assembly, Some(&AssemblyPattern)) {
        tracing::warn!(assembly = %info.name, error = %err, "assembly exploration failed");
        ctx.model_mut().add_annotation(
            Annotation::error(Some(assembly), "an error occurred while exploring an assembly")
                .with_details(err.to_string()),
        );
        if let Err(attach_err) = attach_error_placeholder(ctx, framework, assembly, &err) {
            tracing::warn!(error = %attach_err, "could not attach the error placeholder");
        }
    }
}

/// Stand-in node recording that an assembly failed to explore. Runners show
/// it in place of whatever the assembly would have produced.
fn attach_error_placeholder(
    ctx: &mut TestModelBuilder<'_>,
    framework: TestId,
    assembly: ElementId,
    err: &PatternError,
) -> Result<(), ModelError> {
    let name = ctx.graph().element(assembly).name.as_str();
    let placeholder = ctx.model_mut().new_test(name, Some(assembly));
    ctx.model_mut().test_mut(placeholder).set_kind(TestKind::Error);
    ctx.model_mut()
        .test_mut(placeholder)
        .metadata_mut()
        .add(metadata_keys::as_str(MetadataKey::Description), err.to_string());
    ctx.model_mut().attach(framework, placeholder)
}
