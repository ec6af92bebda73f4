//! Model renderers for the CLI.
//!
//! Two views of a finished model: an indented text tree for humans and a
//! JSON document for downstream tooling. Both are fully deterministic for a
//! given model, so they double as snapshot surfaces in tests.

use espalier_model::annotation::Annotation;
use espalier_model::element::CodeGraph;
use espalier_model::metadata::MetadataMap;
use espalier_model::tree::{ParamId, TestId, TestModel};
use espalier_vocab::kinds;

/// Indented tree, one node per line, metadata and parameters nested under
/// their owner. Annotations trail the tree when present.
pub fn render_text(graph: &CodeGraph, model: &TestModel) -> String {
    let mut out = render_tree_text(model);
    if !model.annotations().is_empty() {
        out.push_str("annotations:\n");
        for annotation in model.annotations() {
            render_annotation_text(graph, annotation, &mut out);
        }
    }
    out
}

/// The tree alone, without the trailing annotation block.
pub fn render_tree_text(model: &TestModel) -> String {
    let mut out = String::new();
    render_test_text(model, model.root(), 0, &mut out);
    out
}

fn render_test_text(model: &TestModel, id: TestId, depth: usize, out: &mut String) {
    let test = model.test(id);
    let indent = "  ".repeat(depth);
    out.push_str(&format!("{indent}{test}\n"));
    render_metadata_text(test.metadata(), &format!("{indent}  "), out);
    for &parameter in test.parameters() {
        render_parameter_text(model, parameter, &format!("{indent}  "), out);
    }
    for &dependency in test.dependencies() {
        out.push_str(&format!("{indent}  -> depends on {}\n", model.full_name(dependency)));
    }
    for &child in test.children() {
        render_test_text(model, child, depth + 1, out);
    }
}

fn render_parameter_text(model: &TestModel, id: ParamId, indent: &str, out: &mut String) {
    let parameter = model.parameter(id);
    out.push_str(&format!(
        "{indent}param {}: {}\n",
        parameter.name(),
        parameter.value_type()
    ));
    render_metadata_text(parameter.metadata(), &format!("{indent}  "), out);
}

fn render_metadata_text(metadata: &MetadataMap, indent: &str, out: &mut String) {
    for (key, values) in metadata.iter() {
        out.push_str(&format!("{indent}- {key}: {}\n", values.join(", ")));
    }
}

fn render_annotation_text(graph: &CodeGraph, annotation: &Annotation, out: &mut String) {
    out.push_str(&format!("  {}: {}", annotation.severity.as_str(), annotation.message));
    if let Some(element) = annotation.element {
        out.push_str(&format!(" [{}]", graph.element(element).name));
    }
    out.push('\n');
    if let Some(details) = &annotation.details {
        out.push_str(&format!("    {details}\n"));
    }
}

/// JSON document: the full tree from the root plus the annotation list.
///
/// Metadata keys come out sorted (the map is ordered); children, parameters
/// and dependencies keep model order.
pub fn render_json(graph: &CodeGraph, model: &TestModel) -> serde_json::Value {
    let annotations: Vec<serde_json::Value> = model
        .annotations()
        .iter()
        .map(|annotation| annotation_json(graph, annotation))
        .collect();
    serde_json::json!({
        "tests": test_json(model, model.root()),
        "annotations": annotations,
    })
}

fn test_json(model: &TestModel, id: TestId) -> serde_json::Value {
    let test = model.test(id);
    let parameters: Vec<serde_json::Value> = test
        .parameters()
        .iter()
        .map(|&parameter| parameter_json(model, parameter))
        .collect();
    let dependencies: Vec<String> = test
        .dependencies()
        .iter()
        .map(|&dependency| model.full_name(dependency))
        .collect();
    let children: Vec<serde_json::Value> = test
        .children()
        .iter()
        .map(|&child| test_json(model, child))
        .collect();
    serde_json::json!({
        "id": model.stable_id(id),
        "name": test.name(),
        "kind": kinds::as_str(test.kind()),
        "full_name": model.full_name(id),
        "order": test.order(),
        "is_test_case": test.is_test_case(),
        "metadata": metadata_json(test.metadata()),
        "parameters": parameters,
        "dependencies": dependencies,
        "children": children,
    })
}

fn parameter_json(model: &TestModel, id: ParamId) -> serde_json::Value {
    let parameter = model.parameter(id);
    serde_json::json!({
        "name": parameter.name(),
        "type": parameter.value_type(),
        "ordinal": parameter.ordinal(),
        "metadata": metadata_json(parameter.metadata()),
    })
}

fn metadata_json(metadata: &MetadataMap) -> serde_json::Value {
    let mut map = serde_json::Map::new();
    for (key, values) in metadata.iter() {
        map.insert(key.to_string(), serde_json::Value::from(values.to_vec()));
    }
    serde_json::Value::Object(map)
}

fn annotation_json(graph: &CodeGraph, annotation: &Annotation) -> serde_json::Value {
    let element = annotation
        .element
        .map(|element| graph.element(element).name.clone());
    serde_json::json!({
        "severity": annotation.severity.as_str(),
        "element": element,
        "message": annotation.message,
        "details": annotation.details,
    })
}
