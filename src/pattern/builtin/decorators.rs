//! Decoration patterns: well-known annotations that edit nodes created by
//! the constructive patterns.
//!
//! Each pattern here runs during the process step and queues its edits as
//! decorators at its configured order instead of writing directly, so
//! independent annotations on the same element land in a predictable
//! sequence. `register_defaults` binds them all at order `0`; hosts that
//! need a different interleaving construct them with `with_order` and wire
//! their own registry.
//!
//! Malformed annotation arguments are usage errors raised from the process
//! step itself, before anything is queued.

use espalier_model::annotation::Annotation;
use espalier_model::element::{Attr, ElementId};
use espalier_model::tree::TestId;
use espalier_vocab::attrs::AttrName;
use espalier_vocab::metadata_keys::MetadataKey;

use crate::builder::{TestBuilder, TestModelBuilder, TestParameterBuilder};
use crate::pattern::{Pattern, PatternError};

use super::attrs_for;

/// Marks tests excluded from runs via `IgnoreReason` metadata.
#[derive(Debug, Default)]
pub struct IgnorePattern {
    order: i32,
}

impl IgnorePattern {
    pub fn with_order(order: i32) -> Self {
        Self { order }
    }
}

impl Pattern for IgnorePattern {
    fn name(&self) -> &'static str {
        "ignore"
    }

    fn process_test(
        &self,
        test: &mut TestBuilder<'_, '_>,
        element: ElementId,
    ) -> Result<(), PatternError> {
        for attr in attrs_for(test.graph(), element, AttrName::Ignore) {
            // An argless ignore still has to mark the node.
            let reason = attr.args.first().cloned().unwrap_or_else(|| "ignored".to_string());
            test.add_decorator(self.order, move |test: &mut TestBuilder<'_, '_>| {
                test.add_metadata(MetadataKey::IgnoreReason, reason);
                Ok(())
            });
        }
        Ok(())
    }
}

/// Marks tests awaiting further work via `PendingReason` metadata.
#[derive(Debug, Default)]
pub struct PendingPattern {
    order: i32,
}

impl PendingPattern {
    pub fn with_order(order: i32) -> Self {
        Self { order }
    }
}

impl Pattern for PendingPattern {
    fn name(&self) -> &'static str {
        "pending"
    }

    fn process_test(
        &self,
        test: &mut TestBuilder<'_, '_>,
        element: ElementId,
    ) -> Result<(), PatternError> {
        for attr in attrs_for(test.graph(), element, AttrName::Pending) {
            let reason = attr.args.first().cloned().unwrap_or_else(|| "pending".to_string());
            test.add_decorator(self.order, move |test: &mut TestBuilder<'_, '_>| {
                test.add_metadata(MetadataKey::PendingReason, reason);
                Ok(())
            });
        }
        Ok(())
    }
}

/// Attaches human-readable descriptions to tests and parameters.
#[derive(Debug, Default)]
pub struct DescriptionPattern {
    order: i32,
}

impl DescriptionPattern {
    pub fn with_order(order: i32) -> Self {
        Self { order }
    }
}

impl Pattern for DescriptionPattern {
    fn name(&self) -> &'static str {
        "description"
    }

    fn process_test(
        &self,
        test: &mut TestBuilder<'_, '_>,
        element: ElementId,
    ) -> Result<(), PatternError> {
        for attr in attrs_for(test.graph(), element, AttrName::Description) {
            let text = description_arg(attr)?;
            test.add_decorator(self.order, move |test: &mut TestBuilder<'_, '_>| {
                test.add_metadata(MetadataKey::Description, text);
                Ok(())
            });
        }
        Ok(())
    }

    fn process_parameter(
        &self,
        parameter: &mut TestParameterBuilder<'_, '_>,
        element: ElementId,
    ) -> Result<(), PatternError> {
        for attr in attrs_for(parameter.graph(), element, AttrName::Description) {
            let text = description_arg(attr)?;
            parameter.add_decorator(
                self.order,
                move |parameter: &mut TestParameterBuilder<'_, '_>| {
                    parameter.add_metadata(MetadataKey::Description, text);
                    Ok(())
                },
            );
        }
        Ok(())
    }
}

/// Assigns one `Category` value per annotation argument.
#[derive(Debug, Default)]
pub struct CategoryPattern {
    order: i32,
}

impl CategoryPattern {
    pub fn with_order(order: i32) -> Self {
        Self { order }
    }
}

impl Pattern for CategoryPattern {
    fn name(&self) -> &'static str {
        "category"
    }

    fn process_test(
        &self,
        test: &mut TestBuilder<'_, '_>,
        element: ElementId,
    ) -> Result<(), PatternError> {
        for attr in attrs_for(test.graph(), element, AttrName::Category) {
            if attr.args.is_empty() {
                return Err(PatternError::usage(
                    "a category annotation requires at least one label",
                ));
            }
            for label in attr.args.clone() {
                test.add_decorator(self.order, move |test: &mut TestBuilder<'_, '_>| {
                    test.add_metadata(MetadataKey::Category, label);
                    Ok(())
                });
            }
        }
        Ok(())
    }
}

/// Records authorship: name, then optional email and homepage.
#[derive(Debug, Default)]
pub struct AuthorPattern {
    order: i32,
}

impl AuthorPattern {
    pub fn with_order(order: i32) -> Self {
        Self { order }
    }
}

impl Pattern for AuthorPattern {
    fn name(&self) -> &'static str {
        "author"
    }

    fn process_test(
        &self,
        test: &mut TestBuilder<'_, '_>,
        element: ElementId,
    ) -> Result<(), PatternError> {
        for attr in attrs_for(test.graph(), element, AttrName::Author) {
            let Some(name) = attr.args.first().cloned() else {
                return Err(PatternError::usage(
                    "an author annotation requires at least a name",
                ));
            };
            let email = attr.args.get(1).cloned();
            let homepage = attr.args.get(2).cloned();
            test.add_decorator(self.order, move |test: &mut TestBuilder<'_, '_>| {
                test.add_metadata(MetadataKey::AuthorName, name);
                if let Some(email) = email {
                    test.add_metadata(MetadataKey::AuthorEmail, email);
                }
                if let Some(homepage) = homepage {
                    test.add_metadata(MetadataKey::AuthorHomepage, homepage);
                }
                Ok(())
            });
        }
        Ok(())
    }
}

/// Records the test's relative importance.
#[derive(Debug, Default)]
pub struct ImportancePattern {
    order: i32,
}

impl ImportancePattern {
    pub fn with_order(order: i32) -> Self {
        Self { order }
    }
}

impl Pattern for ImportancePattern {
    fn name(&self) -> &'static str {
        "importance"
    }

    fn process_test(
        &self,
        test: &mut TestBuilder<'_, '_>,
        element: ElementId,
    ) -> Result<(), PatternError> {
        for attr in attrs_for(test.graph(), element, AttrName::Importance) {
            let Some(level) = attr.args.first().cloned() else {
                return Err(PatternError::usage(
                    "an importance annotation requires a level",
                ));
            };
            test.add_decorator(self.order, move |test: &mut TestBuilder<'_, '_>| {
                test.add_metadata(MetadataKey::Importance, level);
                Ok(())
            });
        }
        Ok(())
    }
}

/// Sets the node's execution ordering weight.
#[derive(Debug, Default)]
pub struct OrderPattern {
    order: i32,
}

impl OrderPattern {
    pub fn with_order(order: i32) -> Self {
        Self { order }
    }
}

impl Pattern for OrderPattern {
    fn name(&self) -> &'static str {
        "order"
    }

    fn process_test(
        &self,
        test: &mut TestBuilder<'_, '_>,
        element: ElementId,
    ) -> Result<(), PatternError> {
        for attr in attrs_for(test.graph(), element, AttrName::Order) {
            let weight = order_arg(attr)?;
            test.add_decorator(self.order, move |test: &mut TestBuilder<'_, '_>| {
                test.set_order(weight);
                Ok(())
            });
        }
        Ok(())
    }
}

/// Adds verbatim key/value pairs to tests and parameters.
#[derive(Debug, Default)]
pub struct MetadataPattern {
    order: i32,
}

impl MetadataPattern {
    pub fn with_order(order: i32) -> Self {
        Self { order }
    }
}

impl Pattern for MetadataPattern {
    fn name(&self) -> &'static str {
        "metadata"
    }

    fn process_test(
        &self,
        test: &mut TestBuilder<'_, '_>,
        element: ElementId,
    ) -> Result<(), PatternError> {
        for attr in attrs_for(test.graph(), element, AttrName::Metadata) {
            let (key, values) = metadata_args(attr)?;
            test.add_decorator(self.order, move |test: &mut TestBuilder<'_, '_>| {
                for value in values {
                    test.add_metadata_pair(key.clone(), value);
                }
                Ok(())
            });
        }
        Ok(())
    }

    fn process_parameter(
        &self,
        parameter: &mut TestParameterBuilder<'_, '_>,
        element: ElementId,
    ) -> Result<(), PatternError> {
        for attr in attrs_for(parameter.graph(), element, AttrName::Metadata) {
            let (key, values) = metadata_args(attr)?;
            parameter.add_decorator(
                self.order,
                move |parameter: &mut TestParameterBuilder<'_, '_>| {
                    for value in values {
                        parameter.add_metadata_pair(key.clone(), value);
                    }
                    Ok(())
                },
            );
        }
        Ok(())
    }
}

/// Declares dependencies on the tests built from named elements.
///
/// Targets are resolved through the element registrations after every
/// assembly has been walked, so forward and cross-assembly references work.
/// An unresolvable target degrades to a warning annotation rather than
/// failing the run.
#[derive(Debug, Default)]
pub struct DependsOnPattern;

impl Pattern for DependsOnPattern {
    fn name(&self) -> &'static str {
        "depends-on"
    }

    fn process_test(
        &self,
        test: &mut TestBuilder<'_, '_>,
        element: ElementId,
    ) -> Result<(), PatternError> {
        let dependent = test.id();
        for attr in attrs_for(test.graph(), element, AttrName::DependsOn) {
            if attr.args.is_empty() {
                return Err(PatternError::usage(
                    "a depends-on annotation requires at least one target name",
                ));
            }
            for target in attr.args.clone() {
                test.ctx().add_finish_action(
                    Some(element),
                    move |ctx: &mut TestModelBuilder<'_>| {
                        resolve_dependency(ctx, dependent, element, &target)
                    },
                );
            }
        }
        Ok(())
    }
}

/// Resolve `target` against the finished registrations and record edges on
/// every test built from a matching element.
fn resolve_dependency(
    ctx: &mut TestModelBuilder<'_>,
    dependent: TestId,
    element: ElementId,
    target: &str,
) -> Result<(), PatternError> {
    let mut upstream: Vec<TestId> = Vec::new();
    for matched in ctx.graph().find_by_name(target) {
        upstream.extend_from_slice(ctx.tests_for_element(matched));
    }
    if upstream.is_empty() {
        ctx.model_mut().add_annotation(Annotation::warning(
            Some(element),
            format!("no test was built for dependency target {target:?}"),
        ));
        return Ok(());
    }
    for target_test in upstream {
        ctx.model_mut().add_dependency(dependent, target_test)?;
    }
    Ok(())
}

// --- argument parsing ---------------------------------------------------------

fn description_arg(attr: &Attr) -> Result<String, PatternError> {
    attr.args
        .first()
        .cloned()
        .ok_or_else(|| PatternError::usage("a description annotation requires a text argument"))
}

fn order_arg(attr: &Attr) -> Result<i32, PatternError> {
    let raw = attr
        .args
        .first()
        .ok_or_else(|| PatternError::usage("an order annotation requires an integer argument"))?;
    raw.parse()
        .map_err(|_| PatternError::usage(format!("order argument {raw:?} is not an integer")))
}

/// A metadata annotation carries a key and one or more values.
fn metadata_args(attr: &Attr) -> Result<(String, Vec<String>), PatternError> {
    if attr.args.len() < 2 {
        return Err(PatternError::usage(
            "a metadata annotation requires a key and at least one value",
        ));
    }
    Ok((attr.args[0].clone(), attr.args[1..].to_vec()))
}
