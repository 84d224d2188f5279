use modpub_core::settings::{Provenance, DEFAULT_REPOSITORY_URL};
use modpub_ops::ops_context::{locate_root, ContextOptions, PublishContext};
use modpub_ops::ops_plan::plan;
use modpub_ops::ops_settings::resolve_target;
use modpub_ops::ops_stage::stage;
use modpub_util::errors::ModpubError;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn no_env(_: &str) -> Option<String> {
    None
}

fn write_build(root: &Path, manifest: &str) {
    fs::write(root.join("publish.json"), manifest).unwrap();
    fs::write(
        root.join("settings.gradle.kts"),
        "rootProject.name = \"demo\"\ninclude(\":api\", \":core\")\n",
    )
    .unwrap();
}

const MANIFEST: &str = r#"{"modules":[{"name":":api","artifactId":"api-client","version":"1.2.0"}]}"#;

#[test]
fn test_locate_root_walks_up() {
    let tmp = TempDir::new().unwrap();
    write_build(tmp.path(), MANIFEST);
    let nested = tmp.path().join("api").join("src");
    fs::create_dir_all(&nested).unwrap();

    let root = locate_root(&nested, &ContextOptions::default()).unwrap();
    assert_eq!(root, tmp.path());
}

#[test]
fn test_locate_root_without_manifest_fails() {
    let tmp = TempDir::new().unwrap();
    let err = locate_root(tmp.path(), &ContextOptions::default()).unwrap_err();
    assert!(
        err.to_string().contains("Could not find publish.json"),
        "got: {err}"
    );
}

#[test]
fn test_locate_root_from_explicit_manifest() {
    let tmp = TempDir::new().unwrap();
    let options = ContextOptions {
        manifest: Some(tmp.path().join("conf").join("publish.json")),
        ..Default::default()
    };
    let root = locate_root(Path::new("/elsewhere"), &options).unwrap();
    assert_eq!(root, tmp.path().join("conf"));
}

#[test]
fn test_plan_uses_defaults() {
    let tmp = TempDir::new().unwrap();
    write_build(tmp.path(), MANIFEST);

    let ctx = PublishContext::load_with_env(tmp.path(), &ContextOptions::default(), no_env)
        .unwrap();
    let registrations = plan(&ctx).unwrap();

    assert_eq!(registrations.len(), 1);
    assert_eq!(registrations[0].subproject.path(), ":api");
    assert_eq!(registrations[0].repository.url, DEFAULT_REPOSITORY_URL);
    assert_eq!(registrations[0].repository.password(), None);
}

#[test]
fn test_cli_properties_override_gradle_properties() {
    let tmp = TempDir::new().unwrap();
    write_build(tmp.path(), MANIFEST);
    fs::write(
        tmp.path().join("gradle.properties"),
        "mavenURL=https://file.example/maven\nmavenAccessToken=file-token\n",
    )
    .unwrap();
    let options = ContextOptions {
        properties: vec![("mavenURL".to_string(), "https://cli.example/maven".to_string())],
        ..Default::default()
    };

    let ctx = PublishContext::load_with_env(tmp.path(), &options, no_env).unwrap();

    assert_eq!(ctx.target.url(), "https://cli.example/maven");
    assert_eq!(ctx.target.token(), Some("file-token"));
}

#[test]
fn test_plan_unresolved_subproject() {
    let tmp = TempDir::new().unwrap();
    write_build(
        tmp.path(),
        r#"{"modules":[{"name":":web","artifactId":"web","version":"1"}]}"#,
    );

    let ctx = PublishContext::load_with_env(tmp.path(), &ContextOptions::default(), no_env)
        .unwrap();
    let err = plan(&ctx).unwrap_err();

    assert!(matches!(
        err.downcast_ref::<ModpubError>(),
        Some(ModpubError::UnresolvedSubproject { .. })
    ));
}

#[test]
fn test_malformed_manifest_fails_load() {
    let tmp = TempDir::new().unwrap();
    write_build(tmp.path(), r#"{"modules":[{"name":":api"}]}"#);

    let err = PublishContext::load_with_env(tmp.path(), &ContextOptions::default(), no_env)
        .unwrap_err();

    assert!(matches!(
        err.downcast_ref::<ModpubError>(),
        Some(ModpubError::MalformedManifest { index: Some(0), .. })
    ));
}

#[test]
fn test_stage_writes_poms_and_plan() {
    let tmp = TempDir::new().unwrap();
    write_build(
        tmp.path(),
        r#"{"modules":[
            {"name":":api","artifactId":"api-client","version":"1.2.0"},
            {"name":":core","artifactId":"core","version":"2.0.0"}
        ]}"#,
    );

    let ctx = PublishContext::load_with_env(tmp.path(), &ContextOptions::default(), no_env)
        .unwrap();
    let result = stage(&ctx).unwrap();

    assert_eq!(result.registrations.len(), 2);
    assert_eq!(result.poms.len(), 2);
    assert!(result.poms.iter().all(|p| p.is_file()));
    assert!(result.plan_path.is_file());
}

#[test]
fn test_stage_failure_removes_earlier_poms() {
    let tmp = TempDir::new().unwrap();
    write_build(
        tmp.path(),
        r#"{"modules":[
            {"name":":api","artifactId":"api-client","version":"1.2.0"},
            {"name":":core","artifactId":"core","version":"2.0.0"}
        ]}"#,
    );
    // A plain file where `:core` needs its build directory.
    fs::create_dir_all(tmp.path().join("core")).unwrap();
    fs::write(tmp.path().join("core").join("build"), "not a directory").unwrap();

    let ctx = PublishContext::load_with_env(tmp.path(), &ContextOptions::default(), no_env)
        .unwrap();
    let err = stage(&ctx).unwrap_err();

    assert!(matches!(err.downcast_ref::<ModpubError>(), Some(ModpubError::Io(_))));
    assert!(!tmp
        .path()
        .join("api/build/publications/apiInterface")
        .exists());
    assert!(!tmp.path().join("build/publish-plan.json").exists());
}

#[test]
fn test_resolve_target_reports_provenance() {
    let tmp = TempDir::new().unwrap();
    write_build(tmp.path(), MANIFEST);

    let target = resolve_target(tmp.path(), &ContextOptions::default(), |key| {
        (key == "MAVEN_ACCESS_TOKEN").then(|| "tok123".to_string())
    })
    .unwrap();

    assert_eq!(target.url.provenance, Provenance::Default);
    assert_eq!(
        target.token.map(|t| (t.value, t.provenance)),
        Some(("tok123".to_string(), Provenance::Environment))
    );
}
