use kata::prelude::*;

mod common;
use common::*;

#[test]
fn test_math_add_end_to_end() {
    let registry = create_registry();
    let mut graph = GraphInstance::new();
    let literal = graph.add_node(&registry, "literal-number").unwrap();
    let text = graph.add_node(&registry, "literal-string").unwrap();
    let add = graph.add_node(&registry, "math-add").unwrap();

    let outcome = graph.propose_edge(&literal, "value", &add, "a").unwrap();
    match &outcome {
        EdgeOutcome::Committed { edge, resolved } => {
            assert_eq!(edge, &Edge::new(literal.clone(), "value", add.clone(), "a"));
            assert_eq!(resolved, &vec![add.clone()]);
        }
        other => panic!("Expected a committed edge, got {:?}", other),
    }

    let placed = graph.node(&add).unwrap().definition();
    for slot in ["a", "b", "result"] {
        assert_eq!(
            placed.slot(slot).unwrap().schema,
            &SchemaNode::number(),
            "slot '{}' should now be a number",
            slot
        );
    }
    assert!(placed.generic_types().is_empty());

    // `b` is concrete now, so a string can no longer flow into it.
    let outcome = graph.propose_edge(&text, "value", &add, "b").unwrap();
    assert_eq!(
        outcome,
        EdgeOutcome::Rejected(RejectionReason::Incompatible {
            output: "string".to_string(),
            input: "number".to_string(),
        })
    );
    assert_eq!(graph.edges().len(), 1);

    // The registry template is untouched.
    let template = registry.lookup("math-add").unwrap();
    assert!(template.generic_types().contains("T"));

    // A second placement starts out generic and resolves independently.
    let second = graph.add_node(&registry, "math-add").unwrap();
    assert!(graph
        .propose_edge(&text, "value", &second, "b")
        .unwrap()
        .is_committed());
    let second = graph.node(&second).unwrap().definition();
    assert_eq!(second.slot("result").unwrap().type_label(), "string");
    assert_eq!(
        graph.node(&add).unwrap().definition().slot("result").unwrap().type_label(),
        "number"
    );
}

#[test]
fn test_resolution_propagates_downstream_only_through_new_edges() {
    let registry = create_registry();
    let mut graph = GraphInstance::new();
    graph.insert_node("num", &registry, "literal-number").unwrap();
    graph.insert_node("add", &registry, "math-add").unwrap();
    graph.insert_node("if", &registry, "conditional-if").unwrap();

    assert!(graph.propose_edge("num", "value", "add", "a").unwrap().is_committed());
    assert!(graph
        .propose_edge("add", "result", "if", "then")
        .unwrap()
        .is_committed());

    let branch = graph.node("if").unwrap().definition();
    assert_eq!(branch.slot("otherwise").unwrap().type_label(), "number");
    assert_eq!(branch.slot("value").unwrap().type_label(), "number");
    assert_eq!(branch.slot("condition").unwrap().type_label(), "boolean");
}

#[test]
fn test_catalog_loading() {
    let catalog = Catalog::from_json(SAMPLE_CATALOG_JSON).expect("catalog should parse");
    assert_eq!(catalog.nodes.len(), 4);

    let mut registry = NodeRegistry::new();
    let count = catalog.register_into(&mut registry).expect("catalog should register");
    assert_eq!(count, 4);

    let warning = registry.lookup("notifications-warning").unwrap();
    assert_eq!(warning.slot("details").unwrap().type_label(), "string | null");
    assert!(warning.generic_types().is_empty());

    let entries = registry.lookup("group-entries").unwrap();
    let generics: Vec<&str> = entries.generic_types().iter().map(String::as_str).collect();
    assert_eq!(generics, vec!["V"]);

    let documents = registry.documents();
    let ids: Vec<&str> = documents.iter().map(|doc| doc.id.as_str()).collect();
    assert_eq!(ids, vec!["math-add", "notifications-warning", "group-entries"]);

    let add = &documents[0];
    assert_eq!(add.category, "Math");
    assert_eq!(add.aliases, vec!["sum", "plus"]);

    let entries = &documents[2];
    assert_eq!(entries.category, "group");
    assert_eq!(entries.tags, vec!["accepts:Entry", "outputs:record"]);
}

#[test]
fn test_catalog_nodes_are_connectable() {
    let mut registry = NodeRegistry::new();
    Catalog::from_json(SAMPLE_CATALOG_JSON)
        .unwrap()
        .register_into(&mut registry)
        .unwrap();

    let mut graph = GraphInstance::new();
    graph.insert_node("num", &registry, "literal-number").unwrap();
    graph.insert_node("add", &registry, "math-add").unwrap();
    graph.insert_node("warn", &registry, "notifications-warning").unwrap();

    assert!(graph.connect_to_node("num", "value", "add").unwrap().is_committed());
    assert_eq!(
        graph.connect_to_node("add", "result", "warn").unwrap(),
        EdgeOutcome::Rejected(RejectionReason::NoCompatibleSlot)
    );
}

#[test]
fn test_catalog_errors() {
    match Catalog::from_json("{ \"nodes\": [ { \"category\": \"math\" } ] }") {
        Err(CatalogError::Parse(_)) => {}
        other => panic!("Expected a parse error, got {:?}", other),
    }

    match Catalog::from_file("/definitely/not/here.json") {
        Err(CatalogError::Io { path, .. }) => assert_eq!(path, "/definitely/not/here.json"),
        other => panic!("Expected an io error, got {:?}", other),
    }

    let duplicated = r#"{
        "nodes": [
            { "category": "math", "name": "add" },
            { "category": "math", "name": "add" }
        ]
    }"#;
    let mut registry = NodeRegistry::new();
    let result = Catalog::from_json(duplicated).unwrap().register_into(&mut registry);
    assert_eq!(
        result,
        Err(CatalogError::Registry(RegistryError::DuplicateType(
            "math-add".to_string()
        )))
    );

    let bad_slots = r#"{
        "nodes": [{
            "category": "math",
            "name": "neg",
            "inputs": { "value": { "type": "primitive", "kind": "number" } },
            "outputs": { "value": { "type": "primitive", "kind": "number" } }
        }]
    }"#;
    let result = Catalog::from_json(bad_slots).unwrap().into_definitions();
    assert!(matches!(
        result,
        Err(CatalogError::Node(NodeError::DuplicateSlot { .. }))
    ));
}
