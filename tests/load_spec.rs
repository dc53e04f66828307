use projectspec::{DependencyKind, JsonEncodable, SpecDocument};
use std::fs;
use std::path::Path;

fn init_logging() {
    let _ = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .with_test_writer()
        .try_init();
}

fn write_spec(dir: &Path, name: &str, content: &str) -> std::path::PathBuf {
    let path = dir.join(name);
    fs::write(&path, content).unwrap();
    path
}

#[test]
fn loads_json_and_expands_framework_paths() {
    init_logging();
    let dir = tempfile::tempdir().unwrap();
    let path = write_spec(
        dir.path(),
        "project.json",
        r#"{
            "name": "App",
            "dependencies": [
                {"framework": "Vendor/Foo.framework", "embed": true},
                {"framework": "$(SRCROOT)/Bar.framework"},
                {"framework": "/opt/Baz.framework"},
                {"target": "Core"}
            ]
        }"#,
    );

    let spec = SpecDocument::load(&path).unwrap();
    let expected = dir.path().join("Vendor/Foo.framework");
    assert_eq!(
        spec.dependencies[0].kind(),
        &DependencyKind::Framework(expected.to_string_lossy().into_owned())
    );
    assert_eq!(spec.dependencies[0].reference(), expected.to_string_lossy());
    assert_eq!(spec.dependencies[0].embed, Some(true));
    assert_eq!(spec.dependencies[1].reference(), "$(SRCROOT)/Bar.framework");
    assert_eq!(spec.dependencies[2].reference(), "/opt/Baz.framework");
    assert_eq!(spec.dependencies[3].reference(), "Core");
    assert!(spec.extras.is_empty());
}

#[test]
fn loads_toml_spec() {
    init_logging();
    let dir = tempfile::tempdir().unwrap();
    let path = write_spec(
        dir.path(),
        "project.toml",
        r#"
        name = "App"

        [[dependencies]]
        carthage = "Alamofire"
        findFrameworks = false

        [[dependencies]]
        sdk = "libsqlite3.tbd"
        link = true
        "#,
    );

    let spec = SpecDocument::load(&path).unwrap();
    assert_eq!(spec.name.as_deref(), Some("App"));
    assert_eq!(
        spec.dependencies[0].kind(),
        &DependencyKind::Carthage {
            name: "Alamofire".into(),
            find_frameworks: Some(false)
        }
    );
    assert_eq!(spec.dependencies[1].link, Some(true));
}

#[test]
fn reencoded_spec_loads_back_identically() {
    init_logging();
    let dir = tempfile::tempdir().unwrap();
    let path = write_spec(
        dir.path(),
        "project.json",
        r#"{"dependencies": [
            {"target": "Core", "implicit": true, "removeHeaders": false},
            {"carthage": "Lib", "findFrameworks": true, "codeSign": false},
            {"sdk": "Metal.framework", "weak": true}
        ]}"#,
    );
    let spec = SpecDocument::load(&path).unwrap();

    let reencoded = serde_json::to_string(&spec.to_json_value()).unwrap();
    let again = SpecDocument::from_json_str(&reencoded).unwrap();
    assert_eq!(again.dependencies.len(), spec.dependencies.len());
    for (left, right) in spec.dependencies.iter().zip(&again.dependencies) {
        assert!(left.is_identical_to(right), "{left:?} != {right:?}");
    }
}

#[test]
fn invalid_dependency_is_reported_with_file_context() {
    init_logging();
    let dir = tempfile::tempdir().unwrap();
    let path = write_spec(
        dir.path(),
        "project.json",
        r#"{"dependencies": [{"embed": true, "link": false}]}"#,
    );

    let err = SpecDocument::load(&path).unwrap_err();
    assert!(err.to_string().starts_with("Invalid spec: "));
    let cause = err.root_cause().to_string();
    assert!(
        cause.contains(r#"invalid dependency, expected one of `target`, `framework`, `carthage` or `sdk`: {"embed":true,"link":false}"#),
        "{cause}"
    );
}

#[test]
fn unsupported_extension_and_missing_file_fail() {
    init_logging();
    let dir = tempfile::tempdir().unwrap();
    let path = write_spec(dir.path(), "project.yml", "name: App\n");
    let err = SpecDocument::load(&path).unwrap_err();
    assert!(err.to_string().starts_with("Unsupported spec format"));

    let err = SpecDocument::load(&dir.path().join("missing.json")).unwrap_err();
    assert!(err.to_string().starts_with("Failed to read spec"));
}
