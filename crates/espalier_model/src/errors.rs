//! Model-level error types.
//!
//! These cover structural contract violations in the tree and malformed
//! archive data. Pattern-level failures live in the engine crate and wrap
//! these via `#[from]`.

use miette::Diagnostic;
use thiserror::Error;

/// Errors raised by the code graph and test tree.
#[derive(Debug, Error, Diagnostic)]
pub enum ModelError {
    /// A version string in an archive did not parse.
    #[error("invalid version {input:?}: expected MAJOR.MINOR[.PATCH] with numeric parts")]
    #[diagnostic(code(espalier::model::invalid_version))]
    InvalidVersion { input: String },

    /// A test node was attached a second time.
    #[error("test {child:?} already has a parent and cannot be attached under {parent:?}")]
    #[diagnostic(code(espalier::model::already_attached))]
    AlreadyAttached { child: String, parent: String },

    /// A parameter was attached a second time.
    #[error("parameter {param:?} is already owned by test {owner:?}")]
    #[diagnostic(code(espalier::model::parameter_already_owned))]
    ParameterAlreadyOwned { param: String, owner: String },

    /// A test declared a dependency on itself.
    #[error("test {test:?} cannot depend on itself")]
    #[diagnostic(code(espalier::model::self_dependency))]
    SelfDependency { test: String },
}
