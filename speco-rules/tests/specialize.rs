//! End-to-end specialization with the built-in stages.
//!
//! Run `cargo insta review` to update snapshots when making intentional changes.

use speco_ir::Node;
use speco_pipeline::{Runner, StageSpec, Train, specialize};
use speco_rules::builtin_registry;

fn decl(name: &str, value: Node) -> Node {
    Node::new("decl").with_attr("name", name).with_child(value)
}

fn reference(name: &str) -> Node {
    Node::new("ref").with_attr("name", name)
}

fn literal(value: &str) -> Node {
    Node::new("literal").with_attr("value", value)
}

fn default_train() -> Train {
    builtin_registry()
        .build_train(&[
            StageSpec::once("drop-unused-decls"),
            StageSpec::repeat("inline-single-use-refs", 50),
        ])
        .expect("built-in stages resolve")
}

#[test]
fn drops_unused_and_inlines_single_use() {
    let input = Node::new("program")
        .with_child(decl("unused", literal("0")))
        .with_child(decl("answer", literal("42")))
        .with_child(Node::new("print").with_child(reference("answer")));

    let train = default_train();
    let output = specialize(&input, &train).unwrap();

    let expected = Node::new("program").with_child(Node::new("print").with_child(literal("42")));
    assert!(Node::equals(&output, &expected), "got:\n{output}");

    // the result is stable under the whole train
    let again = specialize(&output, &train).unwrap();
    assert!(Node::equals(&again, &output));
}

#[test]
fn greeting_program() {
    let input = Node::new("program")
        .with_child(decl("hello", literal("Hello, ")))
        .with_child(decl("world", literal("world")))
        .with_child(decl(
            "greeting",
            Node::new("concat")
                .with_child(reference("hello"))
                .with_child(reference("world")),
        ))
        .with_child(decl("twice", literal("2")))
        .with_child(decl("debug", literal("off")))
        .with_child(
            Node::new("repeat")
                .with_child(reference("greeting"))
                .with_child(reference("twice")),
        )
        .with_child(Node::new("log").with_child(reference("twice")));

    let report = Runner::new().run(&input, &default_train()).unwrap();

    assert!(report.stages[0].changed);
    assert_eq!(report.stages[1].iterations, 3);
    insta::assert_snapshot!("greeting_program", report.tree.to_string());
}

#[test]
fn round_trip_preserves_specialized_tree() {
    let input = Node::new("program")
        .with_child(decl("x", literal("quote \" and \\ slash")))
        .with_child(reference("x"));

    let output = specialize(&input, &default_train()).unwrap();
    let json = output.to_json().unwrap();
    let back = Node::from_json(&json).unwrap();

    assert!(Node::equals(&output, &back));
    assert_eq!(back, Node::new("program").with_child(literal("quote \" and \\ slash")));
}

#[test]
fn malformed_declaration_stops_the_first_stage() {
    let input = Node::new("program")
        .with_child(Node::new("decl").with_attr("name", "empty"))
        .with_child(reference("empty"));

    let err = specialize(&input, &default_train()).unwrap_err();
    assert_eq!(err.index, 0);
    assert_eq!(err.stage, "drop-unused-decls");
    assert!(err.to_string().contains("'empty' must have exactly one child, found 0"));
}
