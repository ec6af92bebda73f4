//! The test tree: arena-allocated nodes plus the contracts that keep the
//! tree a tree.
//!
//! Nodes are created detached and wired in with [`TestModel::attach`] /
//! [`TestModel::attach_parameter`]. Attachment is permanent: there is no
//! reparenting and no removal short of dropping the whole model.

use std::fmt;

use espalier_vocab::kinds::{self, TestKind};

use crate::annotation::Annotation;
use crate::element::ElementId;
use crate::errors::ModelError;
use crate::metadata::MetadataMap;

/// Unique identifier for test nodes.
pub type TestId = usize;

/// Unique identifier for test parameters.
pub type ParamId = usize;

const FNV_OFFSET: u64 = 0xcbf2_9ce4_8422_2325;
const FNV_PRIME: u64 = 0x0000_0100_0000_01b3;

/// One node of the test tree.
#[derive(Debug, Clone)]
pub struct Test {
    name: String,
    kind: TestKind,
    element: Option<ElementId>,
    metadata: MetadataMap,
    order: i32,
    is_test_case: bool,
    parent: Option<TestId>,
    children: Vec<TestId>,
    parameters: Vec<ParamId>,
    dependencies: Vec<TestId>,
    local_id_hint: Option<String>,
    local_id: Option<String>,
}

impl Test {
    fn new(name: String, element: Option<ElementId>) -> Self {
        Self {
            name,
            kind: TestKind::default(),
            element,
            metadata: MetadataMap::new(),
            order: 0,
            is_test_case: false,
            parent: None,
            children: Vec::new(),
            parameters: Vec::new(),
            dependencies: Vec::new(),
            local_id_hint: None,
            local_id: None,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    pub fn kind(&self) -> TestKind {
        self.kind
    }

    pub fn set_kind(&mut self, kind: TestKind) {
        self.kind = kind;
    }

    pub fn element(&self) -> Option<ElementId> {
        self.element
    }

    pub fn metadata(&self) -> &MetadataMap {
        &self.metadata
    }

    pub fn metadata_mut(&mut self) -> &mut MetadataMap {
        &mut self.metadata
    }

    /// Execution ordering weight relative to siblings. Lower runs first.
    pub fn order(&self) -> i32 {
        self.order
    }

    pub fn set_order(&mut self, order: i32) {
        self.order = order;
    }

    pub fn is_test_case(&self) -> bool {
        self.is_test_case
    }

    pub fn set_is_test_case(&mut self, is_test_case: bool) {
        self.is_test_case = is_test_case;
    }

    pub fn parent(&self) -> Option<TestId> {
        self.parent
    }

    pub fn children(&self) -> &[TestId] {
        &self.children
    }

    pub fn parameters(&self) -> &[ParamId] {
        &self.parameters
    }

    pub fn dependencies(&self) -> &[TestId] {
        &self.dependencies
    }

    /// Sibling-unique identifier component, assigned when the node is
    /// attached.
    pub fn local_id(&self) -> Option<&str> {
        self.local_id.as_deref()
    }

    /// Override the candidate used for local id assignment.
    ///
    /// Has no effect once the node is attached.
    pub fn set_local_id_hint(&mut self, hint: impl Into<String>) {
        self.local_id_hint = Some(hint.into());
    }
}

impl fmt::Display for Test {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", kinds::as_str(self.kind), self.name)
    }
}

/// One parameter slot of a test.
#[derive(Debug, Clone)]
pub struct TestParameter {
    name: String,
    element: Option<ElementId>,
    metadata: MetadataMap,
    value_type: String,
    ordinal: usize,
    owner: Option<TestId>,
}

impl TestParameter {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn element(&self) -> Option<ElementId> {
        self.element
    }

    pub fn metadata(&self) -> &MetadataMap {
        &self.metadata
    }

    pub fn metadata_mut(&mut self) -> &mut MetadataMap {
        &mut self.metadata
    }

    pub fn value_type(&self) -> &str {
        &self.value_type
    }

    pub fn ordinal(&self) -> usize {
        self.ordinal
    }

    pub fn owner(&self) -> Option<TestId> {
        self.owner
    }
}

/// The growing test tree for one run.
#[derive(Debug)]
pub struct TestModel {
    tests: Vec<Test>,
    parameters: Vec<TestParameter>,
    root: TestId,
    annotations: Vec<Annotation>,
}

impl TestModel {
    /// Create a model containing only the root node.
    pub fn new() -> Self {
        let mut root = Test::new("Root".to_string(), None);
        root.kind = TestKind::Root;
        root.local_id = Some("Root".to_string());
        Self {
            tests: vec![root],
            parameters: Vec::new(),
            root: 0,
            annotations: Vec::new(),
        }
    }

    pub fn root(&self) -> TestId {
        self.root
    }

    /// Create a detached test node. Kind defaults to [`TestKind::Group`].
    pub fn new_test(&mut self, name: impl Into<String>, element: Option<ElementId>) -> TestId {
        let id = self.tests.len();
        self.tests.push(Test::new(name.into(), element));
        id
    }

    /// Create a detached parameter.
    pub fn new_parameter(
        &mut self,
        name: impl Into<String>,
        element: Option<ElementId>,
        value_type: impl Into<String>,
        ordinal: usize,
    ) -> ParamId {
        let id = self.parameters.len();
        self.parameters.push(TestParameter {
            name: name.into(),
            element,
            metadata: MetadataMap::new(),
            value_type: value_type.into(),
            ordinal,
            owner: None,
        });
        id
    }

    /// Borrow a test node.
    ///
    /// ## Panics
    /// - If `id` did not come from this model.
    pub fn test(&self, id: TestId) -> &Test {
        &self.tests[id]
    }

    pub fn test_mut(&mut self, id: TestId) -> &mut Test {
        &mut self.tests[id]
    }

    pub fn parameter(&self, id: ParamId) -> &TestParameter {
        &self.parameters[id]
    }

    pub fn parameter_mut(&mut self, id: ParamId) -> &mut TestParameter {
        &mut self.parameters[id]
    }

    /// Attach `child` under `parent` and assign its local id.
    ///
    /// Children keep attachment order. A node can only ever be attached
    /// once.
    pub fn attach(&mut self, parent: TestId, child: TestId) -> Result<(), ModelError> {
        if self.tests[child].parent.is_some() {
            return Err(ModelError::AlreadyAttached {
                child: self.tests[child].name.clone(),
                parent: self.tests[parent].name.clone(),
            });
        }
        let hint = self.tests[child]
            .local_id_hint
            .clone()
            .unwrap_or_else(|| self.tests[child].name.clone());
        let local_id = self.unique_local_id_for_child(parent, &hint);
        self.tests[child].parent = Some(parent);
        self.tests[child].local_id = Some(local_id);
        self.tests[parent].children.push(child);
        Ok(())
    }

    /// Give `test` ownership of `param`.
    pub fn attach_parameter(&mut self, test: TestId, param: ParamId) -> Result<(), ModelError> {
        if let Some(owner) = self.parameters[param].owner {
            return Err(ModelError::ParameterAlreadyOwned {
                param: self.parameters[param].name.clone(),
                owner: self.tests[owner].name.clone(),
            });
        }
        self.parameters[param].owner = Some(test);
        self.tests[test].parameters.push(param);
        Ok(())
    }

    /// Record that `test` depends on `target`.
    ///
    /// Self-dependencies are rejected; duplicate edges collapse. General
    /// cycles are representable and deliberately not detected here.
    pub fn add_dependency(&mut self, test: TestId, target: TestId) -> Result<(), ModelError> {
        if test == target {
            return Err(ModelError::SelfDependency {
                test: self.tests[test].name.clone(),
            });
        }
        let deps = &mut self.tests[test].dependencies;
        if !deps.contains(&target) {
            deps.push(target);
        }
        Ok(())
    }

    pub fn add_annotation(&mut self, annotation: Annotation) {
        self.annotations.push(annotation);
    }

    pub fn annotations(&self) -> &[Annotation] {
        &self.annotations
    }

    /// Slash-separated path. Empty for the root; children of the root use
    /// their bare name.
    pub fn full_name(&self, id: TestId) -> String {
        match self.tests[id].parent {
            None => String::new(),
            Some(parent) if parent == self.root => self.tests[id].name.clone(),
            Some(parent) => format!("{}/{}", self.full_name(parent), self.tests[id].name),
        }
    }

    /// Hash of the local id chain from the node up to the root, rendered as
    /// hex. Stable across runs for equal trees.
    pub fn stable_id(&self, id: TestId) -> String {
        let mut hash = FNV_OFFSET;
        let mut cursor = Some(id);
        while let Some(node) = cursor {
            let test = &self.tests[node];
            let segment = test.local_id.as_deref().unwrap_or(&test.name);
            for byte in segment.bytes() {
                hash ^= u64::from(byte);
                hash = hash.wrapping_mul(FNV_PRIME);
            }
            // 0xff never occurs in UTF-8, so segment boundaries stay unambiguous.
            hash ^= 0xff;
            hash = hash.wrapping_mul(FNV_PRIME);
            cursor = test.parent;
        }
        format!("{hash:016x}")
    }

    pub fn test_count(&self) -> usize {
        self.tests.len()
    }

    pub fn parameter_count(&self) -> usize {
        self.parameters.len()
    }

    pub fn tests(&self) -> impl Iterator<Item = (TestId, &Test)> {
        self.tests.iter().enumerate()
    }

    fn unique_local_id_for_child(&self, parent: TestId, hint: &str) -> String {
        let children = &self.tests[parent].children;
        let mut candidate = hint.to_string();
        let mut index = 1usize;
        loop {
            let conflict = children
                .iter()
                .any(|&c| self.tests[c].local_id.as_deref() == Some(candidate.as_str()));
            if !conflict {
                return candidate;
            }
            index += 1;
            candidate = format!("{hint}{index}");
        }
    }
}

impl Default for TestModel {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn model_with_child(name: &str) -> (TestModel, TestId) {
        let mut model = TestModel::new();
        let root = model.root();
        let child = model.new_test(name, None);
        model.attach(root, child).unwrap();
        (model, child)
    }

    #[test]
    fn root_has_empty_full_name() {
        let model = TestModel::new();
        assert_eq!(model.full_name(model.root()), "");
        assert_eq!(model.test(model.root()).kind(), TestKind::Root);
    }

    #[test]
    fn full_names_nest_with_slashes() {
        let mut model = TestModel::new();
        let root = model.root();
        let framework = model.new_test("Espalier v1.0.0", None);
        model.attach(root, framework).unwrap();
        let assembly = model.new_test("calc.tests", None);
        model.attach(framework, assembly).unwrap();

        assert_eq!(model.full_name(framework), "Espalier v1.0.0");
        assert_eq!(model.full_name(assembly), "Espalier v1.0.0/calc.tests");
    }

    #[test]
    fn duplicate_sibling_names_uniquify_local_ids() {
        let mut model = TestModel::new();
        let root = model.root();
        let ids: Vec<TestId> = (0..3)
            .map(|_| {
                let t = model.new_test("case", None);
                model.attach(root, t).unwrap();
                t
            })
            .collect();

        assert_eq!(model.test(ids[0]).local_id(), Some("case"));
        assert_eq!(model.test(ids[1]).local_id(), Some("case2"));
        assert_eq!(model.test(ids[2]).local_id(), Some("case3"));
    }

    #[test]
    fn local_id_hint_wins_over_name() {
        let mut model = TestModel::new();
        let root = model.root();
        let t = model.new_test("case", None);
        model.test_mut(t).set_local_id_hint("row-1");
        model.attach(root, t).unwrap();
        assert_eq!(model.test(t).local_id(), Some("row-1"));
    }

    #[test]
    fn second_attach_is_rejected() {
        let (mut model, child) = model_with_child("fixture");
        let other = model.new_test("other", None);
        model.attach(model.root(), other).unwrap();
        let err = model.attach(other, child).unwrap_err();
        assert!(matches!(err, ModelError::AlreadyAttached { .. }));
        // The failed attach must not have touched the tree.
        assert_eq!(model.test(child).parent(), Some(model.root()));
        assert!(model.test(other).children().is_empty());
    }

    #[test]
    fn parameters_attach_once() {
        let (mut model, test) = model_with_child("case");
        let p = model.new_parameter("x", None, "int", 0);
        model.attach_parameter(test, p).unwrap();
        assert_eq!(model.test(test).parameters(), &[p]);
        assert_eq!(model.parameter(p).owner(), Some(test));

        let err = model.attach_parameter(test, p).unwrap_err();
        assert!(matches!(err, ModelError::ParameterAlreadyOwned { .. }));
    }

    #[test]
    fn self_dependency_is_rejected_and_duplicates_collapse() {
        let (mut model, a) = model_with_child("a");
        let b = model.new_test("b", None);
        model.attach(model.root(), b).unwrap();

        let err = model.add_dependency(a, a).unwrap_err();
        assert!(matches!(err, ModelError::SelfDependency { .. }));

        model.add_dependency(a, b).unwrap();
        model.add_dependency(a, b).unwrap();
        assert_eq!(model.test(a).dependencies(), &[b]);

        // A two-node cycle is representable; construction does not detect it.
        model.add_dependency(b, a).unwrap();
        assert_eq!(model.test(b).dependencies(), &[a]);
    }

    #[test]
    fn stable_ids_are_deterministic_and_position_sensitive() {
        let build = || {
            let mut model = TestModel::new();
            let root = model.root();
            let fixture = model.new_test("CalcFixture", None);
            model.attach(root, fixture).unwrap();
            let case = model.new_test("adds", None);
            model.attach(fixture, case).unwrap();
            (model, case)
        };

        let (m1, c1) = build();
        let (m2, c2) = build();
        assert_eq!(m1.stable_id(c1), m2.stable_id(c2));

        // Same leaf name under a different ancestor chain hashes differently.
        let mut m3 = TestModel::new();
        let root = m3.root();
        let fixture = m3.new_test("OtherFixture", None);
        m3.attach(root, fixture).unwrap();
        let case = m3.new_test("adds", None);
        m3.attach(fixture, case).unwrap();
        assert_ne!(m1.stable_id(c1), m3.stable_id(case));

        // Sixteen hex digits, always.
        assert_eq!(m1.stable_id(c1).len(), 16);
    }

    #[test]
    fn display_shows_kind_and_name() {
        let (mut model, t) = model_with_child("adds");
        model.test_mut(t).set_kind(TestKind::Test);
        assert_eq!(model.test(t).to_string(), "[Test] adds");
    }
}
