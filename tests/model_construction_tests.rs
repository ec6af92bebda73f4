//! End-to-end tests for test model construction
//!
//! These tests drive `espalier::explore` over hand-built code graphs and
//! assert on the finished tree: node shapes, metadata, ordering, identity,
//! dependency edges, and the explorer's failure handling.

use std::sync::Arc;

use espalier::{Pattern, PatternError, PatternRegistry, TestBuilder, explore};
use espalier_model::annotation::AnnotationSeverity;
use espalier_model::element::{AssemblyDetail, Attr, CodeGraph, ElementId, ElementKind, Version};
use espalier_model::tree::{TestId, TestModel};
use espalier_vocab::kinds::TestKind;

/// Add an assembly targeting Espalier 1.0.0, the version most tests share.
fn espalier_assembly(graph: &mut CodeGraph, name: &str) -> ElementId {
    let detail = AssemblyDetail {
        framework_name: "Espalier".to_string(),
        framework_version: Some(Version::new(1, 0, 0)),
        ..AssemblyDetail::default()
    };
    graph.add_assembly(name, detail)
}

fn child_named(model: &TestModel, parent: TestId, name: &str) -> TestId {
    *model
        .test(parent)
        .children()
        .iter()
        .find(|&&child| model.test(child).name() == name)
        .unwrap_or_else(|| {
            panic!("no child named {name:?} under {:?}", model.test(parent).name())
        })
}

fn child_names(model: &TestModel, parent: TestId) -> Vec<&str> {
    model
        .test(parent)
        .children()
        .iter()
        .map(|&child| model.test(child).name())
        .collect()
}

/// The root's single framework node, asserting there is exactly one.
fn framework_node(model: &TestModel) -> TestId {
    let children = model.test(model.root()).children();
    assert_eq!(children.len(), 1, "expected a single framework node");
    children[0]
}

// =============================================================================
// Canonical construction
// =============================================================================

#[test]
fn a_full_suite_builds_the_canonical_tree() {
    let mut graph = CodeGraph::new();
    let detail = AssemblyDetail {
        framework_name: "Espalier".to_string(),
        framework_version: Some(Version::new(1, 0, 0)),
        version: Some(Version::new(2, 1, 0)),
        company: Some("Initech".to_string()),
        ..AssemblyDetail::default()
    };
    let asm = graph.add_assembly("calc.tests", detail);

    let fixture = graph.add_type(asm, "CalcFixture");
    graph.add_attr(fixture, Attr::new("fixture"));
    graph.add_attr(fixture, Attr::new("category").arg("math"));
    graph.add_attr(fixture, Attr::new("description").arg("covers the calculator"));
    let rows = graph.add_field(fixture, "rows", "csv");
    graph.add_attr(rows, Attr::new("parameter"));

    let adds = graph.add_method(fixture, "adds");
    graph.add_attr(adds, Attr::new("test"));
    graph.add_attr(adds, Attr::new("author").arg("Dana Winters").arg("dana@initech.test"));
    graph.add_attr(adds, Attr::new("order").arg("-3"));
    graph.add_attr(adds, Attr::new("metadata").arg("Tier").arg("gold"));
    let x = graph.add_parameter(adds, "x", "int");
    graph.add_attr(x, Attr::new("description").arg("left operand"));
    graph.add_parameter(adds, "y", "int");

    let subtracts = graph.add_method(fixture, "subtracts");
    graph.add_attr(subtracts, Attr::new("test"));
    graph.add_attr(subtracts, Attr::new("ignore").arg("flaky on arm"));
    graph.add_attr(subtracts, Attr::new("depends-on").arg("adds"));

    let divides = graph.add_method(fixture, "divides");
    graph.add_attr(divides, Attr::new("test"));
    graph.add_attr(divides, Attr::new("category").arg("slow").arg("math"));

    let registry = PatternRegistry::with_builtins();
    let model = explore(&graph, &registry);

    assert!(
        model.annotations().is_empty(),
        "unexpected annotations: {:?}",
        model.annotations()
    );

    let framework = framework_node(&model);
    assert_eq!(model.test(framework).name(), "Espalier v1.0.0");
    assert_eq!(model.test(framework).kind(), TestKind::Framework);
    assert_eq!(model.test(framework).metadata().get("Framework"), &["Espalier"]);

    let assembly = child_named(&model, framework, "calc.tests");
    assert_eq!(model.test(assembly).kind(), TestKind::Assembly);
    assert_eq!(model.test(assembly).metadata().first("Version"), Some("2.1.0"));
    assert_eq!(model.test(assembly).metadata().first("Company"), Some("Initech"));

    let fixture_node = child_named(&model, assembly, "CalcFixture");
    let fixture_test = model.test(fixture_node);
    assert_eq!(fixture_test.kind(), TestKind::Fixture);
    assert!(!fixture_test.is_test_case());
    assert_eq!(fixture_test.metadata().get("Category"), &["math"]);
    assert_eq!(fixture_test.metadata().first("Description"), Some("covers the calculator"));

    // The field annotated as a parameter becomes a slot on the fixture itself.
    assert_eq!(fixture_test.parameters().len(), 1);
    let rows_param = model.parameter(fixture_test.parameters()[0]);
    assert_eq!(rows_param.name(), "rows");
    assert_eq!(rows_param.value_type(), "csv");
    assert_eq!(rows_param.ordinal(), 0);

    // Children appear in graph declaration order.
    assert_eq!(child_names(&model, fixture_node), vec!["adds", "subtracts", "divides"]);

    let adds_node = child_named(&model, fixture_node, "adds");
    let adds_test = model.test(adds_node);
    assert_eq!(adds_test.kind(), TestKind::Test);
    assert!(adds_test.is_test_case());
    assert_eq!(adds_test.order(), -3);
    assert_eq!(adds_test.metadata().first("AuthorName"), Some("Dana Winters"));
    assert_eq!(adds_test.metadata().first("AuthorEmail"), Some("dana@initech.test"));
    assert_eq!(adds_test.metadata().get("Tier"), &["gold"]);

    assert_eq!(adds_test.parameters().len(), 2);
    let x_param = model.parameter(adds_test.parameters()[0]);
    assert_eq!(x_param.name(), "x");
    assert_eq!(x_param.value_type(), "int");
    assert_eq!(x_param.ordinal(), 0);
    assert_eq!(x_param.metadata().first("Description"), Some("left operand"));
    let y_param = model.parameter(adds_test.parameters()[1]);
    assert_eq!(y_param.name(), "y");
    assert_eq!(y_param.ordinal(), 1);

    let subtracts_node = child_named(&model, fixture_node, "subtracts");
    assert_eq!(
        model.test(subtracts_node).metadata().get("IgnoreReason"),
        &["flaky on arm"]
    );
    assert_eq!(model.test(subtracts_node).dependencies(), &[adds_node]);

    let divides_node = child_named(&model, fixture_node, "divides");
    assert_eq!(model.test(divides_node).metadata().get("Category"), &["slow", "math"]);

    assert_eq!(model.full_name(adds_node), "Espalier v1.0.0/calc.tests/CalcFixture/adds");
}

#[test]
fn sibling_fixtures_keep_declaration_order() {
    let mut graph = CodeGraph::new();
    let asm = espalier_assembly(&mut graph, "suite.tests");
    for (fixture_name, case_name) in [("AlphaFixture", "alpha_works"), ("BetaFixture", "beta_works")] {
        let fixture = graph.add_type(asm, fixture_name);
        graph.add_attr(fixture, Attr::new("fixture"));
        let case = graph.add_method(fixture, case_name);
        graph.add_attr(case, Attr::new("test"));
    }

    let registry = PatternRegistry::with_builtins();
    let model = explore(&graph, &registry);

    let assembly = child_named(&model, framework_node(&model), "suite.tests");
    assert_eq!(child_names(&model, assembly), vec!["AlphaFixture", "BetaFixture"]);
    let alpha = child_named(&model, assembly, "AlphaFixture");
    assert_eq!(model.test(alpha).kind(), TestKind::Fixture);
    assert_eq!(child_names(&model, alpha), vec!["alpha_works"]);
    let beta = child_named(&model, assembly, "BetaFixture");
    assert_eq!(child_names(&model, beta), vec!["beta_works"]);
    let case = child_named(&model, beta, "beta_works");
    assert!(model.test(case).is_test_case());
    assert_eq!(model.test(case).kind(), TestKind::Test);
}

#[test]
fn elements_nothing_applies_to_are_skipped_silently() {
    let mut graph = CodeGraph::new();
    let asm = espalier_assembly(&mut graph, "mixed.tests");
    // Plain code mixed in with the test code.
    let helpers = graph.add_type(asm, "StringHelpers");
    graph.add_method(helpers, "join");
    let fixture = graph.add_type(asm, "RealFixture");
    graph.add_attr(fixture, Attr::new("fixture"));
    graph.add_method(fixture, "unannotated_helper");
    let case = graph.add_method(fixture, "works");
    graph.add_attr(case, Attr::new("test"));

    let registry = PatternRegistry::with_builtins();
    let model = explore(&graph, &registry);

    assert!(model.annotations().is_empty());
    let framework = framework_node(&model);
    let assembly = child_named(&model, framework, "mixed.tests");
    assert_eq!(child_names(&model, assembly), vec!["RealFixture"]);
    let fixture_node = child_named(&model, assembly, "RealFixture");
    assert_eq!(child_names(&model, fixture_node), vec!["works"]);
}

#[test]
fn an_empty_registry_builds_only_the_assembly_skeleton() {
    let mut graph = CodeGraph::new();
    let asm = espalier_assembly(&mut graph, "calc.tests");
    let fixture = graph.add_type(asm, "CalcFixture");
    graph.add_attr(fixture, Attr::new("fixture"));
    let method = graph.add_method(fixture, "adds");
    graph.add_attr(method, Attr::new("test"));

    // Nothing bound: only the explorer's assembly fallback applies.
    let registry = PatternRegistry::new();
    let model = explore(&graph, &registry);

    let framework = framework_node(&model);
    let assembly = child_named(&model, framework, "calc.tests");
    assert!(model.test(assembly).children().is_empty());
    assert!(model.annotations().is_empty());
}

#[test]
fn framework_nodes_group_assemblies_by_version() {
    let mut graph = CodeGraph::new();
    let old = AssemblyDetail {
        framework_name: "Espalier".to_string(),
        framework_version: Some(Version::new(1, 0, 0)),
        ..AssemblyDetail::default()
    };
    let new = AssemblyDetail {
        framework_name: "Espalier".to_string(),
        framework_version: Some(Version::new(2, 3, 0)),
        ..AssemblyDetail::default()
    };
    graph.add_assembly("first.tests", old.clone());
    graph.add_assembly("second.tests", new);
    graph.add_assembly("third.tests", old);

    let registry = PatternRegistry::with_builtins();
    let model = explore(&graph, &registry);

    let frameworks = model.test(model.root()).children();
    assert_eq!(frameworks.len(), 2);
    assert_eq!(model.test(frameworks[0]).name(), "Espalier v1.0.0");
    assert_eq!(child_names(&model, frameworks[0]), vec!["first.tests", "third.tests"]);
    assert_eq!(model.test(frameworks[1]).name(), "Espalier v2.3.0");
    assert_eq!(child_names(&model, frameworks[1]), vec!["second.tests"]);
}

#[test]
fn overloaded_methods_get_distinct_local_ids_and_stable_ids() {
    let mut graph = CodeGraph::new();
    let asm = espalier_assembly(&mut graph, "calc.tests");
    let fixture = graph.add_type(asm, "CalcFixture");
    graph.add_attr(fixture, Attr::new("fixture"));
    for _ in 0..2 {
        let overload = graph.add_method(fixture, "parses");
        graph.add_attr(overload, Attr::new("test"));
    }

    let registry = PatternRegistry::with_builtins();
    let model = explore(&graph, &registry);

    let framework = framework_node(&model);
    let assembly = child_named(&model, framework, "calc.tests");
    let fixture_node = child_named(&model, assembly, "CalcFixture");
    let cases = model.test(fixture_node).children();
    assert_eq!(cases.len(), 2);
    // Display names stay verbatim; only the identity component is uniquified.
    assert_eq!(model.test(cases[0]).name(), "parses");
    assert_eq!(model.test(cases[1]).name(), "parses");
    assert_eq!(model.test(cases[0]).local_id(), Some("parses"));
    assert_eq!(model.test(cases[1]).local_id(), Some("parses2"));
    assert_ne!(model.stable_id(cases[0]), model.stable_id(cases[1]));
}

// =============================================================================
// Annotation spellings
// =============================================================================

#[test]
fn alias_spellings_reach_the_same_patterns() {
    let mut graph = CodeGraph::new();
    let asm = espalier_assembly(&mut graph, "alias.tests");
    let fixture = graph.add_type(asm, "AliasFixture");
    graph.add_attr(fixture, Attr::new("test-fixture"));
    let case = graph.add_method(fixture, "quarantined");
    graph.add_attr(case, Attr::new("test-case"));
    graph.add_attr(case, Attr::new("skip").arg("quarantine"));

    let registry = PatternRegistry::with_builtins();
    let model = explore(&graph, &registry);

    let framework = framework_node(&model);
    let fixture_node = child_named(&model, child_named(&model, framework, "alias.tests"), "AliasFixture");
    assert_eq!(model.test(fixture_node).kind(), TestKind::Fixture);
    let case_node = child_named(&model, fixture_node, "quarantined");
    assert_eq!(model.test(case_node).kind(), TestKind::Test);
    assert_eq!(model.test(case_node).metadata().get("IgnoreReason"), &["quarantine"]);
}

#[test]
fn an_element_spelling_an_annotation_both_ways_is_consumed_once() {
    let mut graph = CodeGraph::new();
    let asm = espalier_assembly(&mut graph, "alias.tests");
    let fixture = graph.add_type(asm, "AliasFixture");
    graph.add_attr(fixture, Attr::new("fixture"));
    let case = graph.add_method(fixture, "doubled");
    graph.add_attr(case, Attr::new("test"));
    graph.add_attr(case, Attr::new("test-case"));

    let registry = PatternRegistry::with_builtins();
    let model = explore(&graph, &registry);

    let framework = framework_node(&model);
    let fixture_node = child_named(&model, child_named(&model, framework, "alias.tests"), "AliasFixture");
    assert_eq!(child_names(&model, fixture_node), vec!["doubled"]);
}

// =============================================================================
// Custom registries
// =============================================================================

/// Queues one metadata edit at a configurable order, for interleaving tests.
#[derive(Debug)]
struct BannerPattern {
    order: i32,
    tag: &'static str,
}

impl Pattern for BannerPattern {
    fn name(&self) -> &'static str {
        "banner"
    }

    fn process_test(
        &self,
        test: &mut TestBuilder<'_, '_>,
        _element: ElementId,
    ) -> Result<(), PatternError> {
        let tag = self.tag;
        test.add_decorator(self.order, move |test: &mut TestBuilder<'_, '_>| {
            test.add_metadata_pair("Banner", tag);
            Ok(())
        });
        Ok(())
    }
}

/// Consumes any element into a single leaf case, tagged by suffix.
#[derive(Debug)]
struct StubCasePattern {
    suffix: &'static str,
}

impl Pattern for StubCasePattern {
    fn name(&self) -> &'static str {
        "stub"
    }

    fn consume(
        &self,
        containing: &mut TestBuilder<'_, '_>,
        element: ElementId,
    ) -> Result<bool, PatternError> {
        let name = format!("{}-{}", containing.graph().element(element).name, self.suffix);
        let mut case = containing.add_child(name, Some(element))?;
        case.set_kind(TestKind::Test);
        case.set_is_test_case(true);
        case.apply_decorators()?;
        Ok(true)
    }
}

#[test]
fn decorators_from_separate_patterns_interleave_by_order() {
    let mut graph = CodeGraph::new();
    let asm = espalier_assembly(&mut graph, "calc.tests");
    let fixture = graph.add_type(asm, "CalcFixture");
    graph.add_attr(fixture, Attr::new("fixture"));
    let method = graph.add_method(fixture, "adds");
    graph.add_attr(method, Attr::new("test"));
    graph.add_attr(method, Attr::new("banner"));

    let mut registry = PatternRegistry::with_builtins();
    registry.bind_attr("banner", Arc::new(BannerPattern { order: 5, tag: "late" }));
    registry.bind_attr("banner", Arc::new(BannerPattern { order: -5, tag: "early" }));
    registry.bind_attr("banner", Arc::new(BannerPattern { order: 0, tag: "mid-a" }));
    registry.bind_attr("banner", Arc::new(BannerPattern { order: 0, tag: "mid-b" }));

    let model = explore(&graph, &registry);
    let framework = framework_node(&model);
    let assembly = child_named(&model, framework, "calc.tests");
    let fixture_node = child_named(&model, assembly, "CalcFixture");
    let case = child_named(&model, fixture_node, "adds");

    // Low orders first; equal orders keep binding order.
    assert_eq!(
        model.test(case).metadata().get("Banner"),
        &["early", "mid-a", "mid-b", "late"]
    );
}

#[test]
fn every_pattern_bound_to_an_element_consumes_it() {
    let mut graph = CodeGraph::new();
    let asm = espalier_assembly(&mut graph, "calc.tests");
    let fixture = graph.add_type(asm, "CalcFixture");
    graph.add_attr(fixture, Attr::new("fixture"));
    let method = graph.add_method(fixture, "roundtrips");
    graph.add_attr(method, Attr::new("stub"));

    let mut registry = PatternRegistry::with_builtins();
    registry.bind_attr("stub", Arc::new(StubCasePattern { suffix: "json" }));
    registry.bind_attr("stub", Arc::new(StubCasePattern { suffix: "binary" }));

    let model = explore(&graph, &registry);
    let framework = framework_node(&model);
    let assembly = child_named(&model, framework, "calc.tests");
    let fixture_node = child_named(&model, assembly, "CalcFixture");

    // Both bound patterns consumed the one method.
    assert_eq!(
        child_names(&model, fixture_node),
        vec!["roundtrips-json", "roundtrips-binary"]
    );
}

#[test]
fn kind_bindings_sweep_unannotated_elements() {
    let mut graph = CodeGraph::new();
    let asm = espalier_assembly(&mut graph, "sweep.tests");
    let fixture = graph.add_type(asm, "SweepFixture");
    graph.add_attr(fixture, Attr::new("fixture"));
    graph.add_method(fixture, "first");
    graph.add_method(fixture, "second");

    let mut registry = PatternRegistry::with_builtins();
    registry.bind_kind(ElementKind::Method, Arc::new(StubCasePattern { suffix: "swept" }));

    let model = explore(&graph, &registry);
    let framework = framework_node(&model);
    let assembly = child_named(&model, framework, "sweep.tests");
    let fixture_node = child_named(&model, assembly, "SweepFixture");
    assert_eq!(child_names(&model, fixture_node), vec!["first-swept", "second-swept"]);
}

#[test]
fn the_fallback_stays_idle_once_a_bound_pattern_consumes() {
    // A fixture nested inside another fixture is reachable two ways: through
    // the outer fixture's member walk and through recursive type discovery.
    // Only the former may build it.
    let mut graph = CodeGraph::new();
    let asm = espalier_assembly(&mut graph, "calc.tests");
    let outer = graph.add_type(asm, "OuterFixture");
    graph.add_attr(outer, Attr::new("fixture"));
    let inner = graph.add_type(outer, "InnerFixture");
    graph.add_attr(inner, Attr::new("fixture"));

    let registry = PatternRegistry::with_builtins();
    let model = explore(&graph, &registry);

    let framework = framework_node(&model);
    let assembly = child_named(&model, framework, "calc.tests");
    assert_eq!(child_names(&model, assembly), vec!["OuterFixture"]);
    let outer_node = child_named(&model, assembly, "OuterFixture");
    let inner_node = child_named(&model, outer_node, "InnerFixture");
    assert_eq!(model.test(inner_node).kind(), TestKind::Fixture);

    let all_inner: Vec<TestId> = model
        .tests()
        .filter(|(_, test)| test.name() == "InnerFixture")
        .map(|(id, _)| id)
        .collect();
    assert_eq!(all_inner, vec![inner_node]);
}

// =============================================================================
// Explorer failure handling
// =============================================================================

mod error_boundary {
    use super::*;

    #[derive(Debug)]
    struct FailingPattern;

    impl Pattern for FailingPattern {
        fn name(&self) -> &'static str {
            "failing"
        }

        fn consume(
            &self,
            _containing: &mut TestBuilder<'_, '_>,
            _element: ElementId,
        ) -> Result<bool, PatternError> {
            Err(PatternError::usage("kaboom"))
        }
    }

    #[test]
    fn a_broken_assembly_grows_a_placeholder_and_the_rest_survive() {
        let mut graph = CodeGraph::new();
        let broken = espalier_assembly(&mut graph, "broken.tests");
        let glitch = graph.add_type(broken, "GlitchFixture");
        graph.add_attr(glitch, Attr::new("fixture"));
        let bad = graph.add_method(glitch, "explodes");
        graph.add_attr(bad, Attr::new("detonate"));

        let healthy = espalier_assembly(&mut graph, "healthy.tests");
        let fine = graph.add_type(healthy, "FineFixture");
        graph.add_attr(fine, Attr::new("fixture"));
        let ok = graph.add_method(fine, "works");
        graph.add_attr(ok, Attr::new("test"));

        let mut registry = PatternRegistry::with_builtins();
        registry.bind_attr("detonate", Arc::new(FailingPattern));

        let model = explore(&graph, &registry);

        // Both assemblies share one framework version, so one framework node:
        // the partial assembly, its error placeholder, then the healthy one.
        let framework = framework_node(&model);
        let children = model.test(framework).children();
        assert_eq!(children.len(), 3);

        let partial = model.test(children[0]);
        assert_eq!(partial.name(), "broken.tests");
        assert_eq!(partial.kind(), TestKind::Assembly);
        // Edits made before the failure stay in the model.
        assert_eq!(partial.children().len(), 1);
        assert_eq!(model.test(partial.children()[0]).name(), "GlitchFixture");

        let placeholder = model.test(children[1]);
        assert_eq!(placeholder.name(), "broken.tests");
        assert_eq!(placeholder.kind(), TestKind::Error);
        assert_eq!(placeholder.metadata().first("Description"), Some("kaboom"));

        assert_eq!(model.test(children[2]).name(), "healthy.tests");
        assert_eq!(model.test(children[2]).kind(), TestKind::Assembly);
        let fine_node = child_named(&model, children[2], "FineFixture");
        assert_eq!(child_names(&model, fine_node), vec!["works"]);

        assert_eq!(model.annotations().len(), 1);
        let annotation = &model.annotations()[0];
        assert_eq!(annotation.severity, AnnotationSeverity::Error);
        assert_eq!(annotation.element, Some(broken));
        assert_eq!(annotation.details.as_deref(), Some("kaboom"));
    }

    #[test]
    fn a_malformed_annotation_is_reported_against_its_assembly() {
        let mut graph = CodeGraph::new();
        let asm = espalier_assembly(&mut graph, "typo.tests");
        let fixture = graph.add_type(asm, "TypoFixture");
        graph.add_attr(fixture, Attr::new("fixture"));
        let case = graph.add_method(fixture, "misordered");
        graph.add_attr(case, Attr::new("test"));
        graph.add_attr(case, Attr::new("order").arg("soon"));

        let registry = PatternRegistry::with_builtins();
        let model = explore(&graph, &registry);

        assert_eq!(model.annotations().len(), 1);
        let annotation = &model.annotations()[0];
        assert_eq!(annotation.severity, AnnotationSeverity::Error);
        assert_eq!(annotation.element, Some(asm));
        assert!(
            annotation.details.as_deref().unwrap_or_default().contains("soon"),
            "details should carry the bad argument: {:?}",
            annotation.details
        );
    }
}

// =============================================================================
// Dependency resolution
// =============================================================================

mod dependency_resolution {
    use super::*;

    #[test]
    fn forward_and_cross_assembly_targets_resolve_after_the_walk() {
        let mut graph = CodeGraph::new();
        // The dependent assembly is declared first, so its target does not
        // exist yet when the annotation is processed.
        let consumers = espalier_assembly(&mut graph, "consumers.tests");
        let consumer_fixture = graph.add_type(consumers, "ConsumerFixture");
        graph.add_attr(consumer_fixture, Attr::new("fixture"));
        let dependent = graph.add_method(consumer_fixture, "consumes");
        graph.add_attr(dependent, Attr::new("test"));
        graph.add_attr(dependent, Attr::new("depends-on").arg("produces"));

        let producers = espalier_assembly(&mut graph, "producers.tests");
        let producer_fixture = graph.add_type(producers, "ProducerFixture");
        graph.add_attr(producer_fixture, Attr::new("fixture"));
        let target = graph.add_method(producer_fixture, "produces");
        graph.add_attr(target, Attr::new("test"));

        let registry = PatternRegistry::with_builtins();
        let model = explore(&graph, &registry);

        assert!(model.annotations().is_empty());
        let framework = framework_node(&model);
        let consumer_node = child_named(
            &model,
            child_named(&model, child_named(&model, framework, "consumers.tests"), "ConsumerFixture"),
            "consumes",
        );
        let producer_node = child_named(
            &model,
            child_named(&model, child_named(&model, framework, "producers.tests"), "ProducerFixture"),
            "produces",
        );
        assert_eq!(model.test(consumer_node).dependencies(), &[producer_node]);
    }

    #[test]
    fn unresolved_targets_degrade_to_a_warning() {
        let mut graph = CodeGraph::new();
        let asm = espalier_assembly(&mut graph, "calc.tests");
        let fixture = graph.add_type(asm, "CalcFixture");
        graph.add_attr(fixture, Attr::new("fixture"));
        let case = graph.add_method(fixture, "adds");
        graph.add_attr(case, Attr::new("test"));
        graph.add_attr(case, Attr::new("depends-on").arg("Nowhere"));

        let registry = PatternRegistry::with_builtins();
        let model = explore(&graph, &registry);

        assert_eq!(model.annotations().len(), 1);
        let annotation = &model.annotations()[0];
        assert_eq!(annotation.severity, AnnotationSeverity::Warning);
        assert_eq!(annotation.element, Some(case));
        assert!(annotation.message.contains("Nowhere"), "message: {}", annotation.message);

        let framework = framework_node(&model);
        let fixture_node = child_named(&model, child_named(&model, framework, "calc.tests"), "CalcFixture");
        let case_node = child_named(&model, fixture_node, "adds");
        assert!(model.test(case_node).dependencies().is_empty());
    }

    #[test]
    fn a_test_naming_itself_surfaces_as_an_error_annotation() {
        let mut graph = CodeGraph::new();
        let asm = espalier_assembly(&mut graph, "calc.tests");
        let fixture = graph.add_type(asm, "CalcFixture");
        graph.add_attr(fixture, Attr::new("fixture"));
        let case = graph.add_method(fixture, "selfish");
        graph.add_attr(case, Attr::new("test"));
        graph.add_attr(case, Attr::new("depends-on").arg("selfish"));

        let registry = PatternRegistry::with_builtins();
        let model = explore(&graph, &registry);

        // The tree itself still builds; the bad edge becomes an annotation.
        assert_eq!(model.annotations().len(), 1);
        let annotation = &model.annotations()[0];
        assert_eq!(annotation.severity, AnnotationSeverity::Error);
        assert!(
            annotation.details.as_deref().unwrap_or_default().contains("selfish"),
            "details: {:?}",
            annotation.details
        );

        let framework = framework_node(&model);
        let fixture_node = child_named(&model, child_named(&model, framework, "calc.tests"), "CalcFixture");
        let case_node = child_named(&model, fixture_node, "selfish");
        assert!(model.test(case_node).dependencies().is_empty());
    }

    #[test]
    fn a_target_naming_a_fixture_depends_on_the_fixture_node() {
        let mut graph = CodeGraph::new();
        let asm = espalier_assembly(&mut graph, "calc.tests");
        let shared = graph.add_type(asm, "SharedFixture");
        graph.add_attr(shared, Attr::new("fixture"));
        let setup = graph.add_method(shared, "prepares");
        graph.add_attr(setup, Attr::new("test"));

        let dependent_fixture = graph.add_type(asm, "DependentFixture");
        graph.add_attr(dependent_fixture, Attr::new("fixture"));
        let case = graph.add_method(dependent_fixture, "consumes");
        graph.add_attr(case, Attr::new("test"));
        graph.add_attr(case, Attr::new("depends-on").arg("SharedFixture"));

        let registry = PatternRegistry::with_builtins();
        let model = explore(&graph, &registry);

        assert!(model.annotations().is_empty());
        let framework = framework_node(&model);
        let assembly = child_named(&model, framework, "calc.tests");
        let shared_node = child_named(&model, assembly, "SharedFixture");
        let case_node = child_named(
            &model,
            child_named(&model, assembly, "DependentFixture"),
            "consumes",
        );
        assert_eq!(model.test(case_node).dependencies(), &[shared_node]);
    }
}
