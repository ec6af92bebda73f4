//! Construction context shared by every pattern during one model run.
//!
//! [`TestModelBuilder`] owns the growing [`TestModel`] plus the bookkeeping
//! that only matters while construction is in flight: element registrations,
//! pending decorator queues, memoized framework nodes, and deferred finish
//! actions. Patterns never hold it directly; they work through the
//! [`TestBuilder`] and [`TestParameterBuilder`] handles, which the builder
//! hands out fresh for every callback.
//!
//! ## Notes
//!
//! - The builder is single-threaded. One element is consumed at a time and
//!   each callback sees every mutation made by the callbacks before it.
//! - Construction is not transactional. When a callback fails, edits made up
//!   to that point stay in the model; the explorer decides what the failure
//!   means for the surrounding walk.

mod scopes;

pub use scopes::{TestBuilder, TestParameterBuilder};

use std::collections::HashMap;
use std::mem;

use espalier_model::annotation::Annotation;
use espalier_model::element::{CodeGraph, ElementId, Version};
use espalier_model::tree::{ParamId, TestId, TestModel};
use espalier_vocab::kinds::TestKind;
use espalier_vocab::metadata_keys::{self, MetadataKey};

use crate::pattern::registry::PatternRegistry;
use crate::pattern::{Pattern, PatternError};

/// Callback queued against a test by a decoration pattern.
pub type TestDecoratorFn =
    Box<dyn FnOnce(&mut TestBuilder<'_, '_>) -> Result<(), PatternError>>;

/// Callback queued against a parameter by a decoration pattern.
pub type ParamDecoratorFn =
    Box<dyn FnOnce(&mut TestParameterBuilder<'_, '_>) -> Result<(), PatternError>>;

/// Callback deferred until every assembly has been walked.
pub type FinishActionFn =
    Box<dyn FnOnce(&mut TestModelBuilder<'_>) -> Result<(), PatternError>>;

struct Decorator<F> {
    order: i32,
    action: F,
}

struct FinishAction {
    element: Option<ElementId>,
    action: FinishActionFn,
}

/// Shared state for one construction run.
pub struct TestModelBuilder<'g> {
    graph: &'g CodeGraph,
    registry: &'g PatternRegistry,
    model: TestModel,
    test_builders: HashMap<ElementId, Vec<TestId>>,
    param_builders: HashMap<ElementId, Vec<ParamId>>,
    framework_tests: HashMap<Version, TestId>,
    test_decorators: HashMap<TestId, Vec<Decorator<TestDecoratorFn>>>,
    param_decorators: HashMap<ParamId, Vec<Decorator<ParamDecoratorFn>>>,
    finish_actions: Vec<FinishAction>,
}

impl<'g> TestModelBuilder<'g> {
    pub fn new(graph: &'g CodeGraph, registry: &'g PatternRegistry) -> Self {
        Self {
            graph,
            registry,
            model: TestModel::new(),
            test_builders: HashMap::new(),
            param_builders: HashMap::new(),
            framework_tests: HashMap::new(),
            test_decorators: HashMap::new(),
            param_decorators: HashMap::new(),
            finish_actions: Vec::new(),
        }
    }

    /// The graph this run explores.
    pub fn graph(&self) -> &'g CodeGraph {
        self.graph
    }

    /// The pattern bindings in force for this run.
    pub fn registry(&self) -> &'g PatternRegistry {
        self.registry
    }

    pub fn model(&self) -> &TestModel {
        &self.model
    }

    pub fn model_mut(&mut self) -> &mut TestModel {
        &mut self.model
    }

    /// Handle over an existing test.
    pub fn scope(&mut self, test: TestId) -> TestBuilder<'_, 'g> {
        TestBuilder::new(self, test)
    }

    /// Handle over the root of the growing model.
    pub fn root_scope(&mut self) -> TestBuilder<'_, 'g> {
        let root = self.model.root();
        TestBuilder::new(self, root)
    }

    // --- framework nodes ---------------------------------------------------

    /// Memoized framework-level test for `version`, created under the root on
    /// first use. One node exists per distinct version no matter how many
    /// assemblies share it.
    pub fn framework_test(&mut self, name: &str, version: Version) -> Result<TestId, PatternError> {
        if let Some(&existing) = self.framework_tests.get(&version) {
            return Ok(existing);
        }
        let root = self.model.root();
        let test = self.model.new_test(format!("{name} v{version}"), None);
        self.model.test_mut(test).set_kind(TestKind::Framework);
        self.model
            .test_mut(test)
            .metadata_mut()
            .add(metadata_keys::as_str(MetadataKey::Framework), name);
        self.model.attach(root, test)?;
        self.framework_tests.insert(version, test);
        Ok(test)
    }

    // --- element registrations ----------------------------------------------

    /// Record `test` in the element-to-tests multimap. Tests without a code
    /// element are not registered.
    pub fn register_test(&mut self, test: TestId) {
        if let Some(element) = self.model.test(test).element() {
            self.test_builders.entry(element).or_default().push(test);
        }
    }

    /// Record `parameter` in the element-to-parameters multimap.
    pub fn register_parameter(&mut self, parameter: ParamId) {
        if let Some(element) = self.model.parameter(parameter).element() {
            self.param_builders.entry(element).or_default().push(parameter);
        }
    }

    /// Tests registered against `element`, in registration order.
    pub fn tests_for_element(&self, element: ElementId) -> &[TestId] {
        self.test_builders.get(&element).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Parameters registered against `element`, in registration order.
    pub fn parameters_for_element(&self, element: ElementId) -> &[ParamId] {
        self.param_builders.get(&element).map(Vec::as_slice).unwrap_or(&[])
    }

    // --- consumption walk ---------------------------------------------------

    /// Offer `element` to every pattern bound to it, each consuming into a
    /// fresh scope over `containing`.
    ///
    /// The fallback runs only when no bound pattern consumed. An element
    /// nothing applies to is skipped without error, so graphs may freely mix
    /// test code with plain code.
    pub fn consume(
        &mut self,
        containing: TestId,
        element: ElementId,
        fallback: Option<&dyn Pattern>,
    ) -> Result<bool, PatternError> {
        let patterns = self.registry.patterns_for(self.graph, element);
        let mut consumed = false;
        for pattern in &patterns {
            let mut scope = TestBuilder::new(self, containing);
            if pattern.consume(&mut scope, element)? {
                consumed = true;
            }
        }
        if !consumed {
            if let Some(fallback) = fallback {
                let mut scope = TestBuilder::new(self, containing);
                consumed = fallback.consume(&mut scope, element)?;
            }
        }
        Ok(consumed)
    }

    /// Run `process_test` on every pattern bound to `element` against `test`.
    pub fn process_test(&mut self, test: TestId, element: ElementId) -> Result<(), PatternError> {
        let patterns = self.registry.patterns_for(self.graph, element);
        for pattern in &patterns {
            let mut scope = TestBuilder::new(self, test);
            pattern.process_test(&mut scope, element)?;
        }
        Ok(())
    }

    /// Run `process_parameter` on every pattern bound to `element` against
    /// `parameter`.
    pub fn process_parameter(
        &mut self,
        parameter: ParamId,
        element: ElementId,
    ) -> Result<(), PatternError> {
        let patterns = self.registry.patterns_for(self.graph, element);
        for pattern in &patterns {
            let mut scope = TestParameterBuilder::new(self, parameter);
            pattern.process_parameter(&mut scope, element)?;
        }
        Ok(())
    }

    // --- decorators ----------------------------------------------------------

    /// Queue a deferred edit against `test`. Lower orders run first; equal
    /// orders keep registration order.
    pub fn add_test_decorator(&mut self, test: TestId, order: i32, action: TestDecoratorFn) {
        self.test_decorators
            .entry(test)
            .or_default()
            .push(Decorator { order, action });
    }

    /// Queue a deferred edit against `parameter`.
    pub fn add_param_decorator(&mut self, parameter: ParamId, order: i32, action: ParamDecoratorFn) {
        self.param_decorators
            .entry(parameter)
            .or_default()
            .push(Decorator { order, action });
    }

    /// Drain and run the decorators queued against `test`.
    ///
    /// The queue is snapshotted up front. Decorators queued while the pass
    /// runs are discarded, as is the remainder of the snapshot when an entry
    /// fails. A second call finds an empty queue and is a no-op.
    pub fn apply_test_decorators(&mut self, test: TestId) -> Result<(), PatternError> {
        let mut pending = self.test_decorators.remove(&test).unwrap_or_default();
        pending.sort_by_key(|decorator| decorator.order);
        let mut outcome = Ok(());
        for decorator in pending {
            let mut scope = TestBuilder::new(self, test);
            if let Err(err) = (decorator.action)(&mut scope) {
                outcome = Err(err);
                break;
            }
        }
        self.test_decorators.remove(&test);
        outcome
    }

    /// Parameter counterpart of [`TestModelBuilder::apply_test_decorators`].
    pub fn apply_param_decorators(&mut self, parameter: ParamId) -> Result<(), PatternError> {
        let mut pending = self.param_decorators.remove(&parameter).unwrap_or_default();
        pending.sort_by_key(|decorator| decorator.order);
        let mut outcome = Ok(());
        for decorator in pending {
            let mut scope = TestParameterBuilder::new(self, parameter);
            if let Err(err) = (decorator.action)(&mut scope) {
                outcome = Err(err);
                break;
            }
        }
        self.param_decorators.remove(&parameter);
        outcome
    }

    // --- finish actions --------------------------------------------------------

    /// Defer `action` until after every assembly has been walked. `element`
    /// is attached to the annotation should the action later fail.
    pub fn add_finish_action<F>(&mut self, element: Option<ElementId>, action: F)
    where
        F: FnOnce(&mut TestModelBuilder<'_>) -> Result<(), PatternError> + 'static,
    {
        self.finish_actions.push(FinishAction {
            element,
            action: Box::new(action),
        });
    }

    /// Run the deferred finish actions in registration order.
    ///
    /// A failing action becomes an error annotation on the model; the
    /// remaining actions still run.
    pub fn finish_model(&mut self) {
        let actions = mem::take(&mut self.finish_actions);
        for finish in actions {
            if let Err(err) = (finish.action)(self) {
                self.model.add_annotation(
                    Annotation::error(finish.element, "a deferred finish action failed")
                        .with_details(err.to_string()),
                );
            }
        }
    }

    /// Surrender the finished model. Whatever is still queued (decorators,
    /// finish actions) is dropped.
    pub fn into_model(self) -> TestModel {
        self.model
    }
}
