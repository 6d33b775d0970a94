//! Loading manifests from disk and building trains from them.

use speco_ir::Node;
use speco_manifest::{Error, Manifest};
use speco_pipeline::{BuildError, Stage, StageError, StageRegistry, StageSpec};

struct Identity;

impl Stage for Identity {
    fn id(&self) -> &str {
        "identity"
    }

    fn apply(&self, tree: &Node) -> Result<Node, StageError> {
        Ok(tree.clone())
    }
}

#[test]
fn manifest_file_builds_a_train() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("speco.toml");
    std::fs::write(
        &path,
        "[train]\nname = \"noop\"\n\n[[stage]]\nid = \"identity\"\nrepeat = 3\n",
    )
    .unwrap();

    let manifest = Manifest::from_file(&path).unwrap();
    assert_eq!(manifest.stage_specs(), vec![StageSpec::repeat("identity", 3)]);

    let registry = StageRegistry::new().with(Identity);
    let train = registry.build_train(&manifest.stage_specs()).unwrap();
    assert_eq!(train.len(), 1);
}

#[test]
fn unknown_stage_surfaces_at_build_time() {
    let manifest: Manifest = "[[stage]]\nid = \"identity\"\n\n[[stage]]\nid = \"missing\"\n"
        .parse()
        .unwrap();

    let err = StageRegistry::new()
        .with(Identity)
        .build_train(&manifest.stage_specs())
        .unwrap_err();
    assert_eq!(
        err,
        BuildError::UnknownStage {
            id: "missing".into(),
            index: 1
        }
    );
}

#[test]
fn missing_file_is_an_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = Manifest::from_file(dir.path().join("nope.toml")).unwrap_err();
    assert!(matches!(*err, Error::Io { .. }));
}

#[test]
fn parse_error_keeps_filename() {
    let err = Manifest::from_str_with_filename("[[stage]\n", "trains/broken.toml").unwrap_err();
    match *err {
        Error::Parse { src, span, .. } => {
            assert_eq!(src.name(), "trains/broken.toml");
            assert!(span.is_some());
        }
        other => panic!("unexpected error: {other}"),
    }
}
