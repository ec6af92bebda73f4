//! Pattern protocol for test tree construction.
//!
//! A [`Pattern`] is a strategy object bound to code elements through a
//! [`registry::PatternRegistry`]. During the consumption walk every pattern
//! bound to an element gets a chance to act on it: constructive patterns add
//! tests or parameters to the tree, decoration patterns queue metadata edits
//! against nodes created by others.
//!
//! ## Modules
//!
//! - `registry` - binding table from element shapes to patterns
//! - `builtin` - the stock patterns behind `PatternRegistry::with_builtins`
//!
//! ## Design
//!
//! All trait methods have no-op defaults so implementors override only the
//! callbacks they care about. Errors propagate synchronously to whoever
//! started the walk; the builder layer never swallows them. The explorer
//! catches them at the assembly boundary and records an annotation instead
//! of aborting the whole run.

pub mod builtin;
pub mod registry;

use std::fmt;

use miette::Diagnostic;
use thiserror::Error;

use espalier_model::element::ElementId;
use espalier_model::errors::ModelError;

use crate::builder::{TestBuilder, TestParameterBuilder};

/// Error raised by a pattern callback during construction.
#[derive(Debug, Error, Diagnostic)]
pub enum PatternError {
    /// A pattern was applied to an element shape it cannot handle, or an
    /// annotation carried malformed arguments.
    #[error("{0}")]
    #[diagnostic(code(espalier::pattern::usage))]
    Usage(String),

    /// A structural edit on the test tree was rejected.
    #[error(transparent)]
    #[diagnostic(transparent)]
    Model(#[from] ModelError),
}

impl PatternError {
    /// Build a usage error from a preformatted message.
    pub fn usage(message: impl Into<String>) -> Self {
        PatternError::Usage(message.into())
    }
}

/// A composable rule that turns code elements into test tree nodes.
///
/// Constructive patterns override [`Pattern::consume`] and claim elements by
/// returning `Ok(true)`; several patterns may consume the same element.
/// Decoration patterns override [`Pattern::process_test`] or
/// [`Pattern::process_parameter`] and queue their edits as decorators so
/// ordering between independent contributors stays predictable.
pub trait Pattern: fmt::Debug + Send + Sync {
    /// Short name used in diagnostics.
    fn name(&self) -> &'static str;

    /// Build tests for `element` inside the containing scope.
    ///
    /// Returns whether the pattern claimed the element. Declining is not an
    /// error; elements nobody claims are skipped by the walk.
    fn consume(
        &self,
        _containing: &mut TestBuilder<'_, '_>,
        _element: ElementId,
    ) -> Result<bool, PatternError> {
        Ok(false)
    }

    /// Contribute to a test another pattern created for `element`.
    fn process_test(
        &self,
        _test: &mut TestBuilder<'_, '_>,
        _element: ElementId,
    ) -> Result<(), PatternError> {
        Ok(())
    }

    /// Contribute to a parameter another pattern created for `element`.
    fn process_parameter(
        &self,
        _parameter: &mut TestParameterBuilder<'_, '_>,
        _element: ElementId,
    ) -> Result<(), PatternError> {
        Ok(())
    }
}
