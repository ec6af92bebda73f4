//! Archive format: the serialized description of assemblies the CLI loads.
//!
//! An archive is plain data. Lowering it into a [`CodeGraph`] parses version
//! strings and assigns element ids in declaration order; nothing else is
//! validated here. Shape rules (what may carry a `fixture` annotation, where
//! tests may appear) are enforced by patterns during the walk.
//!
//! Within a type, lowering declares fields first, then methods, then nested
//! types. Patterns iterate children by kind, so archive authors are free to
//! order the JSON arrays however they like.

use serde::Deserialize;

use crate::element::{AssemblyDetail, Attr, CodeGraph, ElementId, Version};
use crate::errors::ModelError;

/// Root of an archive document.
#[derive(Debug, Deserialize)]
pub struct Archive {
    pub assemblies: Vec<AssemblyDecl>,
}

/// One assembly and everything in it.
#[derive(Debug, Deserialize)]
pub struct AssemblyDecl {
    pub name: String,
    pub framework: FrameworkDecl,
    /// The assembly's own version, when recorded.
    #[serde(default)]
    pub version: Option<String>,
    #[serde(default)]
    pub code_base: Option<String>,
    #[serde(default)]
    pub company: Option<String>,
    #[serde(default)]
    pub configuration: Option<String>,
    #[serde(default)]
    pub copyright: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub file_version: Option<String>,
    #[serde(default)]
    pub informational_version: Option<String>,
    #[serde(default)]
    pub product: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub trademark: Option<String>,
    #[serde(default)]
    pub attrs: Vec<AttrDecl>,
    #[serde(default)]
    pub types: Vec<TypeDecl>,
}

/// The framework an assembly was built against.
#[derive(Debug, Deserialize)]
pub struct FrameworkDecl {
    pub name: String,
    pub version: String,
}

/// A type declaration, possibly nesting further types.
#[derive(Debug, Deserialize)]
pub struct TypeDecl {
    pub name: String,
    #[serde(default)]
    pub attrs: Vec<AttrDecl>,
    #[serde(default)]
    pub fields: Vec<FieldDecl>,
    #[serde(default)]
    pub methods: Vec<MethodDecl>,
    #[serde(default)]
    pub types: Vec<TypeDecl>,
}

#[derive(Debug, Deserialize)]
pub struct MethodDecl {
    pub name: String,
    #[serde(default)]
    pub attrs: Vec<AttrDecl>,
    #[serde(default)]
    pub params: Vec<ParamDecl>,
}

#[derive(Debug, Deserialize)]
pub struct FieldDecl {
    pub name: String,
    #[serde(rename = "type")]
    pub value_type: String,
    #[serde(default)]
    pub attrs: Vec<AttrDecl>,
}

#[derive(Debug, Deserialize)]
pub struct ParamDecl {
    pub name: String,
    #[serde(rename = "type")]
    pub value_type: String,
    #[serde(default)]
    pub attrs: Vec<AttrDecl>,
}

#[derive(Debug, Deserialize)]
pub struct AttrDecl {
    pub name: String,
    #[serde(default)]
    pub args: Vec<String>,
}

impl Archive {
    /// Lower the archive into a code graph.
    ///
    /// ## Errors
    /// - [`ModelError::InvalidVersion`] when a framework or assembly version
    ///   string does not parse.
    #[tracing::instrument(skip_all, fields(assemblies = self.assemblies.len()))]
    pub fn into_graph(self) -> Result<CodeGraph, ModelError> {
        let mut graph = CodeGraph::new();
        for assembly in self.assemblies {
            lower_assembly(&mut graph, assembly)?;
        }
        Ok(graph)
    }
}

fn lower_assembly(graph: &mut CodeGraph, decl: AssemblyDecl) -> Result<ElementId, ModelError> {
    let detail = AssemblyDetail {
        framework_name: decl.framework.name,
        framework_version: Some(decl.framework.version.parse::<Version>()?),
        version: decl.version.as_deref().map(str::parse).transpose()?,
        code_base: decl.code_base,
        company: decl.company,
        configuration: decl.configuration,
        copyright: decl.copyright,
        description: decl.description,
        file_version: decl.file_version,
        informational_version: decl.informational_version,
        product: decl.product,
        title: decl.title,
        trademark: decl.trademark,
    };
    let id = graph.add_assembly(decl.name, detail);
    lower_attrs(graph, id, decl.attrs);
    for ty in decl.types {
        lower_type(graph, id, ty);
    }
    Ok(id)
}

fn lower_type(graph: &mut CodeGraph, parent: ElementId, decl: TypeDecl) {
    let id = graph.add_type(parent, decl.name);
    lower_attrs(graph, id, decl.attrs);
    for field in decl.fields {
        let field_id = graph.add_field(id, field.name, field.value_type);
        lower_attrs(graph, field_id, field.attrs);
    }
    for method in decl.methods {
        let method_id = graph.add_method(id, method.name);
        lower_attrs(graph, method_id, method.attrs);
        for param in method.params {
            let param_id = graph.add_parameter(method_id, param.name, param.value_type);
            lower_attrs(graph, param_id, param.attrs);
        }
    }
    for nested in decl.types {
        lower_type(graph, id, nested);
    }
}

fn lower_attrs(graph: &mut CodeGraph, element: ElementId, attrs: Vec<AttrDecl>) {
    for attr in attrs {
        graph.add_attr(
            element,
            Attr {
                name: attr.name,
                args: attr.args,
            },
        );
    }
}
