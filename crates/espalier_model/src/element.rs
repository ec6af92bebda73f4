//! Code graph: the static description of compiled test code.
//!
//! Everything the engine walks is data in this graph. There is no reflection
//! and no lazy loading: an archive is lowered into a `CodeGraph` up front and
//! the graph is read-only for the rest of the run.

use std::fmt;
use std::str::FromStr;

use crate::errors::ModelError;

/// Unique identifier for code elements.
pub type ElementId = usize;

/// What sort of code element an entry describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ElementKind {
    Assembly,
    Type,
    Method,
    Field,
    Parameter,
}

impl ElementKind {
    /// Lowercase label for messages and logs.
    pub fn label(self) -> &'static str {
        match self {
            ElementKind::Assembly => "assembly",
            ElementKind::Type => "type",
            ElementKind::Method => "method",
            ElementKind::Field => "field",
            ElementKind::Parameter => "parameter",
        }
    }
}

/// One annotation instance on a code element.
///
/// An element may carry several attrs with the same name; each instance
/// contributes independently when patterns process the element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attr {
    pub name: String,
    pub args: Vec<String>,
}

impl Attr {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            args: Vec::new(),
        }
    }

    /// Append one positional argument (builder-style, for tests and loaders).
    pub fn arg(mut self, value: impl Into<String>) -> Self {
        self.args.push(value.into());
        self
    }
}

/// A parsed `MAJOR.MINOR[.PATCH]` version.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Version {
    pub major: u32,
    pub minor: u32,
    pub patch: u32,
}

impl Version {
    pub const fn new(major: u32, minor: u32, patch: u32) -> Self {
        Self { major, minor, patch }
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)
    }
}

impl FromStr for Version {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || ModelError::InvalidVersion { input: s.to_string() };
        let mut parts = s.split('.');
        let major = parts.next().and_then(|p| p.parse().ok()).ok_or_else(invalid)?;
        let minor = parts.next().and_then(|p| p.parse().ok()).ok_or_else(invalid)?;
        let patch = match parts.next() {
            Some(p) => p.parse().map_err(|_| invalid())?,
            None => 0,
        };
        if parts.next().is_some() {
            return Err(invalid());
        }
        Ok(Self { major, minor, patch })
    }
}

/// Descriptive information recorded on an assembly.
///
/// The fields mirror what build tooling typically stamps into an assembly.
/// Set fields flow into node metadata; unset ones leave no trace.
#[derive(Debug, Clone, Default)]
pub struct AssemblyDetail {
    pub framework_name: String,
    pub framework_version: Option<Version>,
    pub version: Option<Version>,
    pub code_base: Option<String>,
    pub company: Option<String>,
    pub configuration: Option<String>,
    pub copyright: Option<String>,
    pub description: Option<String>,
    pub file_version: Option<String>,
    pub informational_version: Option<String>,
    pub product: Option<String>,
    pub title: Option<String>,
    pub trademark: Option<String>,
}

/// Kind-specific payload of a code element.
#[derive(Debug, Clone)]
pub enum ElementDetail {
    Assembly(AssemblyDetail),
    Type,
    Method,
    Field { value_type: String },
    Parameter { value_type: String, ordinal: usize },
}

/// One element of the code graph.
#[derive(Debug, Clone)]
pub struct CodeElement {
    pub kind: ElementKind,
    pub name: String,
    pub attrs: Vec<Attr>,
    pub parent: Option<ElementId>,
    pub children: Vec<ElementId>,
    pub detail: ElementDetail,
}

impl CodeElement {
    /// All attrs with the given name, in declaration order.
    pub fn attrs_named<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a Attr> {
        self.attrs.iter().filter(move |a| a.name == name)
    }
}

/// Arena of code elements for one run.
///
/// Construction is append-only; ids are stable for the life of the graph and
/// children keep declaration order.
#[derive(Debug, Default)]
pub struct CodeGraph {
    elements: Vec<CodeElement>,
}

impl CodeGraph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_assembly(&mut self, name: impl Into<String>, detail: AssemblyDetail) -> ElementId {
        self.push(ElementKind::Assembly, name.into(), None, ElementDetail::Assembly(detail))
    }

    pub fn add_type(&mut self, parent: ElementId, name: impl Into<String>) -> ElementId {
        self.push(ElementKind::Type, name.into(), Some(parent), ElementDetail::Type)
    }

    pub fn add_method(&mut self, parent: ElementId, name: impl Into<String>) -> ElementId {
        self.push(ElementKind::Method, name.into(), Some(parent), ElementDetail::Method)
    }

    pub fn add_field(&mut self, parent: ElementId, name: impl Into<String>, value_type: impl Into<String>) -> ElementId {
        self.push(
            ElementKind::Field,
            name.into(),
            Some(parent),
            ElementDetail::Field {
                value_type: value_type.into(),
            },
        )
    }

    /// Add a method parameter. The ordinal is its position among the
    /// parent's existing parameter children.
    pub fn add_parameter(
        &mut self,
        parent: ElementId,
        name: impl Into<String>,
        value_type: impl Into<String>,
    ) -> ElementId {
        let ordinal = self.elements[parent]
            .children
            .iter()
            .filter(|&&c| self.elements[c].kind == ElementKind::Parameter)
            .count();
        self.push(
            ElementKind::Parameter,
            name.into(),
            Some(parent),
            ElementDetail::Parameter {
                value_type: value_type.into(),
                ordinal,
            },
        )
    }

    pub fn add_attr(&mut self, element: ElementId, attr: Attr) {
        self.elements[element].attrs.push(attr);
    }

    /// Borrow an element.
    ///
    /// ## Panics
    /// - If `id` did not come from this graph.
    pub fn element(&self, id: ElementId) -> &CodeElement {
        &self.elements[id]
    }

    pub fn children(&self, id: ElementId) -> &[ElementId] {
        &self.elements[id].children
    }

    /// Child elements of `id` with the given kind, in declaration order.
    pub fn children_of_kind(&self, id: ElementId, kind: ElementKind) -> impl Iterator<Item = ElementId> + '_ {
        self.elements[id]
            .children
            .iter()
            .copied()
            .filter(move |&c| self.elements[c].kind == kind)
    }

    /// Every assembly element, in declaration order.
    pub fn assemblies(&self) -> impl Iterator<Item = ElementId> + '_ {
        self.elements
            .iter()
            .enumerate()
            .filter(|(_, e)| e.kind == ElementKind::Assembly)
            .map(|(id, _)| id)
    }

    pub fn elements(&self) -> impl Iterator<Item = (ElementId, &CodeElement)> {
        self.elements.iter().enumerate()
    }

    /// All elements with the given simple name, in declaration order.
    ///
    /// Names are not unique across a graph; dependency resolution takes
    /// every match.
    pub fn find_by_name(&self, name: &str) -> Vec<ElementId> {
        self.elements
            .iter()
            .enumerate()
            .filter(|(_, e)| e.name == name)
            .map(|(id, _)| id)
            .collect()
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    fn push(
        &mut self,
        kind: ElementKind,
        name: String,
        parent: Option<ElementId>,
        detail: ElementDetail,
    ) -> ElementId {
        let id = self.elements.len();
        self.elements.push(CodeElement {
            kind,
            name,
            attrs: Vec::new(),
            parent,
            children: Vec::new(),
            detail,
        });
        if let Some(parent) = parent {
            self.elements[parent].children.push(id);
        }
        id
    }
}
