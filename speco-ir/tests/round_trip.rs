//! Persistence round-trip tests: `equals(T, parse(serialize(T)))`.

use speco_ir::{Error, MAX_DEPTH, Node};

fn sample_trees() -> Vec<Node> {
    vec![
        Node::new("leaf"),
        Node::new("obj").with_attr("b", "2").with_attr("a", "1"),
        Node::new("program")
            .with_child(
                Node::new("decl")
                    .with_attr("name", "greeting")
                    .with_child(Node::new("literal").with_attr("value", "héllo \"world\"\n")),
            )
            .with_child(
                Node::new("call")
                    .with_attr("method", "print")
                    .with_child(Node::new("ref").with_attr("name", "greeting")),
            ),
        Node::new("weird \\ tag").with_attr("", "").with_child(Node::new("")),
    ]
}

#[test]
fn compact_json_round_trips() {
    for tree in sample_trees() {
        let json = tree.to_json().expect("encode");
        let back = Node::from_json(&json).expect("decode");
        assert!(Node::equals(&tree, &back), "round trip changed {tree}");
        assert_eq!(tree.canonical(), back.canonical());
    }
}

/// A chain of `wrap` nodes `depth` deep, with an attribute on the leaf.
fn chain(depth: usize) -> Node {
    (1..depth).fold(Node::new("leaf").with_attr("k", "v"), |inner, _| {
        Node::new("wrap").with_child(inner)
    })
}

#[test]
fn deep_trees_round_trip() {
    for depth in [65, 100, MAX_DEPTH] {
        let tree = chain(depth);
        assert_eq!(tree.depth(), depth);

        let back = Node::from_json(&tree.to_json().expect("encode")).expect("decode");
        assert!(Node::equals(&tree, &back), "depth {depth}");

        let back = Node::from_json(&tree.to_json_pretty().expect("encode")).expect("decode");
        assert!(Node::equals(&tree, &back), "depth {depth}, pretty");
    }
}

#[test]
fn too_deep_fails_in_both_directions() {
    let tree = chain(MAX_DEPTH + 1);

    let err = tree.to_json().unwrap_err();
    assert!(matches!(
        *err,
        Error::TooDeep { depth, max } if depth == MAX_DEPTH + 1 && max == MAX_DEPTH
    ));
    assert!(tree.to_json_pretty().is_err());

    let dir = tempfile::tempdir().expect("tempdir");
    assert!(tree.write_file(dir.path().join("deep.json")).is_err());

    // hand-built JSON one level past the cap
    let json = format!(
        "{}{{\"tag\":\"leaf\"}}{}",
        r#"{"tag":"wrap","children":["#.repeat(MAX_DEPTH),
        "]}".repeat(MAX_DEPTH)
    );
    let err = Node::from_json(&json).unwrap_err();
    match *err {
        Error::Syntax { message, span, .. } => {
            assert!(message.contains("nested deeper than"), "{message}");
            assert!(span.is_some());
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn file_round_trips() {
    let dir = tempfile::tempdir().expect("tempdir");
    for (i, tree) in sample_trees().into_iter().enumerate() {
        let path = dir.path().join(format!("tree-{i}.json"));
        tree.write_file(&path).expect("write");
        let back = Node::read_file(&path).expect("read");
        assert_eq!(tree, back);
    }
}

#[test]
fn attribute_order_survives_persistence() {
    let tree = Node::new("obj").with_attr("z", "1").with_attr("a", "2");
    let back = Node::from_json(&tree.to_json().expect("encode")).expect("decode");
    let keys: Vec<_> = back.attrs().map(|(k, _)| k).collect();
    assert_eq!(keys, ["z", "a"]);
}

#[test]
fn missing_file_reports_path() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("absent.json");
    let err = Node::read_file(&path).unwrap_err();
    assert!(matches!(*err, Error::Io { .. }));
    assert!(err.to_string().contains("absent.json"));
}

#[test]
fn syntax_error_names_file() {
    let err = Node::from_json_with_filename("{\"tag\": ", "broken.json").unwrap_err();
    match *err {
        Error::Syntax { src, .. } => assert_eq!(src.name(), "broken.json"),
        other => panic!("unexpected error: {other}"),
    }
}
