//! Borrowing handles that patterns work through.
//!
//! A handle pairs the shared [`TestModelBuilder`] with one node id and
//! exposes the edits the construction template allows at that point.
//! Handles are cheap reborrows; the builder hands out a fresh one for every
//! pattern callback, so no callback can hold state across invocations.

use espalier_model::element::{CodeGraph, ElementId};
use espalier_model::tree::{ParamId, Test, TestId, TestParameter};
use espalier_vocab::kinds::TestKind;
use espalier_vocab::metadata_keys::{self, MetadataKey};

use crate::pattern::{Pattern, PatternError};

use super::TestModelBuilder;

/// Mutable view over one test inside a running construction.
pub struct TestBuilder<'a, 'g> {
    ctx: &'a mut TestModelBuilder<'g>,
    id: TestId,
}

impl<'a, 'g> TestBuilder<'a, 'g> {
    pub(crate) fn new(ctx: &'a mut TestModelBuilder<'g>, id: TestId) -> Self {
        Self { ctx, id }
    }

    /// Identifier of the test this handle edits.
    pub fn id(&self) -> TestId {
        self.id
    }

    /// The graph the run explores. The reference outlives the handle, so
    /// element lookups stay usable across later edits.
    pub fn graph(&self) -> &'g CodeGraph {
        self.ctx.graph()
    }

    /// The shared construction context, for operations the handle does not
    /// wrap.
    pub fn ctx(&mut self) -> &mut TestModelBuilder<'g> {
        self.ctx
    }

    /// Read view of the test.
    pub fn test(&self) -> &Test {
        self.ctx.model().test(self.id)
    }

    // --- node edits ---

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.ctx.model_mut().test_mut(self.id).set_name(name);
    }

    pub fn set_kind(&mut self, kind: TestKind) {
        self.ctx.model_mut().test_mut(self.id).set_kind(kind);
    }

    pub fn set_order(&mut self, order: i32) {
        self.ctx.model_mut().test_mut(self.id).set_order(order);
    }

    pub fn set_is_test_case(&mut self, is_test_case: bool) {
        self.ctx.model_mut().test_mut(self.id).set_is_test_case(is_test_case);
    }

    pub fn set_local_id_hint(&mut self, hint: impl Into<String>) {
        self.ctx.model_mut().test_mut(self.id).set_local_id_hint(hint);
    }

    /// Append a value under a well-known metadata key.
    pub fn add_metadata(&mut self, key: MetadataKey, value: impl Into<String>) {
        self.ctx
            .model_mut()
            .test_mut(self.id)
            .metadata_mut()
            .add(metadata_keys::as_str(key), value);
    }

    /// Append a value under a free-form key, as carried by user annotations.
    pub fn add_metadata_pair(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.ctx.model_mut().test_mut(self.id).metadata_mut().add(key, value);
    }

    // --- structure ---

    /// Create a test, attach it under this one, and register it against its
    /// element. Returns a handle scoped to the child.
    pub fn add_child(
        &mut self,
        name: impl Into<String>,
        element: Option<ElementId>,
    ) -> Result<TestBuilder<'_, 'g>, PatternError> {
        let child = self.ctx.model_mut().new_test(name, element);
        self.ctx.model_mut().attach(self.id, child)?;
        self.ctx.register_test(child);
        Ok(TestBuilder::new(&mut *self.ctx, child))
    }

    /// Create a parameter owned by this test and register it against its
    /// element. Returns a handle scoped to the parameter.
    pub fn add_parameter(
        &mut self,
        name: impl Into<String>,
        element: Option<ElementId>,
        value_type: impl Into<String>,
        ordinal: usize,
    ) -> Result<TestParameterBuilder<'_, 'g>, PatternError> {
        let parameter = self
            .ctx
            .model_mut()
            .new_parameter(name, element, value_type, ordinal);
        self.ctx.model_mut().attach_parameter(self.id, parameter)?;
        self.ctx.register_parameter(parameter);
        Ok(TestParameterBuilder::new(&mut *self.ctx, parameter))
    }

    // --- walk delegation ---

    /// Offer `element` to the patterns bound to it, consuming into this
    /// scope.
    pub fn consume(&mut self, element: ElementId) -> Result<bool, PatternError> {
        self.ctx.consume(self.id, element, None)
    }

    /// Like [`TestBuilder::consume`], with `fallback` applied when no bound
    /// pattern claims the element.
    pub fn consume_with_fallback(
        &mut self,
        element: ElementId,
        fallback: &dyn Pattern,
    ) -> Result<bool, PatternError> {
        self.ctx.consume(self.id, element, Some(fallback))
    }

    /// Run every bound pattern's `process_test` against this test.
    pub fn process(&mut self, element: ElementId) -> Result<(), PatternError> {
        self.ctx.process_test(self.id, element)
    }

    // --- decorators ---

    /// Queue a deferred edit at `order`. Lower orders run first; equal
    /// orders keep registration order.
    pub fn add_decorator<F>(&mut self, order: i32, action: F)
    where
        F: FnOnce(&mut TestBuilder<'_, '_>) -> Result<(), PatternError> + 'static,
    {
        self.ctx.add_test_decorator(self.id, order, Box::new(action));
    }

    /// Drain and run this test's decorator queue.
    pub fn apply_decorators(&mut self) -> Result<(), PatternError> {
        self.ctx.apply_test_decorators(self.id)
    }
}

/// Mutable view over one test parameter inside a running construction.
pub struct TestParameterBuilder<'a, 'g> {
    ctx: &'a mut TestModelBuilder<'g>,
    id: ParamId,
}

impl<'a, 'g> TestParameterBuilder<'a, 'g> {
    pub(crate) fn new(ctx: &'a mut TestModelBuilder<'g>, id: ParamId) -> Self {
        Self { ctx, id }
    }

    pub fn id(&self) -> ParamId {
        self.id
    }

    pub fn graph(&self) -> &'g CodeGraph {
        self.ctx.graph()
    }

    pub fn ctx(&mut self) -> &mut TestModelBuilder<'g> {
        self.ctx
    }

    /// Read view of the parameter.
    pub fn parameter(&self) -> &TestParameter {
        self.ctx.model().parameter(self.id)
    }

    pub fn add_metadata(&mut self, key: MetadataKey, value: impl Into<String>) {
        self.ctx
            .model_mut()
            .parameter_mut(self.id)
            .metadata_mut()
            .add(metadata_keys::as_str(key), value);
    }

    pub fn add_metadata_pair(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.ctx
            .model_mut()
            .parameter_mut(self.id)
            .metadata_mut()
            .add(key, value);
    }

    /// Run every bound pattern's `process_parameter` against this parameter.
    pub fn process(&mut self, element: ElementId) -> Result<(), PatternError> {
        self.ctx.process_parameter(self.id, element)
    }

    pub fn add_decorator<F>(&mut self, order: i32, action: F)
    where
        F: FnOnce(&mut TestParameterBuilder<'_, '_>) -> Result<(), PatternError> + 'static,
    {
        self.ctx.add_param_decorator(self.id, order, Box::new(action));
    }

    pub fn apply_decorators(&mut self) -> Result<(), PatternError> {
        self.ctx.apply_param_decorators(self.id)
    }
}
