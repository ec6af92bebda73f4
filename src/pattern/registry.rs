//! Binding table from code element shapes to patterns.
//!
//! A registry is assembled once per run and passed explicitly to the
//! builder; there is no process-wide registry. Bindings come in three
//! flavors, resolved in a fixed order for any given element:
//!
//! 1. by annotation name, following the element's attrs in declaration order
//! 2. by element kind
//! 3. by predicate, in registration order
//!
//! A pattern matched through several routes is invoked once, at its first
//! matching position.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use espalier_model::element::{CodeGraph, ElementId, ElementKind};

use super::{Pattern, builtin};

type PatternPredicate = Box<dyn Fn(&CodeGraph, ElementId) -> bool + Send + Sync>;

/// Immutable (once built) table of pattern bindings for one run.
#[derive(Default)]
pub struct PatternRegistry {
    by_attr: HashMap<String, Vec<Arc<dyn Pattern>>>,
    by_kind: HashMap<ElementKind, Vec<Arc<dyn Pattern>>>,
    by_predicate: Vec<(PatternPredicate, Arc<dyn Pattern>)>,
}

impl PatternRegistry {
    /// An empty registry. Walking any graph with it builds nothing.
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry preloaded with the stock patterns and their annotation
    /// bindings (canonical names and aliases).
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        builtin::register_defaults(&mut registry);
        registry
    }

    /// Bind `pattern` to elements annotated with `name`.
    pub fn bind_attr(&mut self, name: impl Into<String>, pattern: Arc<dyn Pattern>) {
        self.by_attr.entry(name.into()).or_default().push(pattern);
    }

    /// Bind `pattern` to every element of `kind`.
    pub fn bind_kind(&mut self, kind: ElementKind, pattern: Arc<dyn Pattern>) {
        self.by_kind.entry(kind).or_default().push(pattern);
    }

    /// Bind `pattern` to every element `predicate` accepts.
    pub fn bind_predicate<F>(&mut self, predicate: F, pattern: Arc<dyn Pattern>)
    where
        F: Fn(&CodeGraph, ElementId) -> bool + Send + Sync + 'static,
    {
        self.by_predicate.push((Box::new(predicate), pattern));
    }

    /// Every pattern bound to `element`, deduplicated to its first matching
    /// position.
    pub fn patterns_for(&self, graph: &CodeGraph, element: ElementId) -> Vec<Arc<dyn Pattern>> {
        let mut matched: Vec<Arc<dyn Pattern>> = Vec::new();
        let info = graph.element(element);
        for attr in &info.attrs {
            if let Some(bound) = self.by_attr.get(&attr.name) {
                for pattern in bound {
                    push_unique(&mut matched, pattern);
                }
            }
        }
        if let Some(bound) = self.by_kind.get(&info.kind) {
            for pattern in bound {
                push_unique(&mut matched, pattern);
            }
        }
        for (predicate, pattern) in &self.by_predicate {
            if predicate(graph, element) {
                push_unique(&mut matched, pattern);
            }
        }
        matched
    }

    /// Number of distinct annotation names with at least one binding.
    pub fn attr_binding_count(&self) -> usize {
        self.by_attr.len()
    }
}

impl fmt::Debug for PatternRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut attr_names: Vec<&str> = self.by_attr.keys().map(String::as_str).collect();
        attr_names.sort_unstable();
        f.debug_struct("PatternRegistry")
            .field("by_attr", &attr_names)
            .field("by_kind", &self.by_kind.len())
            .field("by_predicate", &self.by_predicate.len())
            .finish()
    }
}

/// Identity-based dedupe: the same pattern object is kept at its first
/// position only.
fn push_unique(matched: &mut Vec<Arc<dyn Pattern>>, pattern: &Arc<dyn Pattern>) {
    if !matched.iter().any(|p| Arc::ptr_eq(p, pattern)) {
        matched.push(Arc::clone(pattern));
    }
}
