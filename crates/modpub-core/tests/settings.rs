use modpub_core::properties::BuildProperties;
use modpub_core::settings::{
    resolve, Provenance, PublicationTarget, DEFAULT_REPOSITORY_URL, TOKEN_ENV_VAR,
};

fn env_with(token: Option<&'static str>) -> impl Fn(&str) -> Option<String> {
    move |key: &str| {
        if key == TOKEN_ENV_VAR {
            token.map(str::to_string)
        } else {
            None
        }
    }
}

#[test]
fn test_resolve_property_wins_over_environment() {
    let resolved = resolve(Some("prop"), Some("env"), Some("default")).unwrap();
    assert_eq!(resolved.value, "prop");
    assert_eq!(resolved.provenance, Provenance::Property);
}

#[test]
fn test_resolve_environment_wins_over_default() {
    let resolved = resolve(None, Some("env"), Some("default")).unwrap();
    assert_eq!(resolved.value, "env");
    assert_eq!(resolved.provenance, Provenance::Environment);
}

#[test]
fn test_resolve_falls_back_to_default() {
    let resolved = resolve(None, None, Some("default")).unwrap();
    assert_eq!(resolved.provenance, Provenance::Default);
}

#[test]
fn test_resolve_nothing_is_none() {
    assert!(resolve(None, None, None).is_none());
}

#[test]
fn test_resolve_empty_property_wins_over_environment() {
    let resolved = resolve(Some(""), Some("env"), None).unwrap();
    assert_eq!(resolved.value, "");
    assert_eq!(resolved.provenance, Provenance::Property);
}

#[test]
fn test_target_defaults_without_settings() {
    let target = PublicationTarget::resolve(&BuildProperties::default(), env_with(None)).unwrap();
    assert_eq!(target.url(), DEFAULT_REPOSITORY_URL);
    assert_eq!(target.url.provenance, Provenance::Default);
    assert!(target.token().is_none());
}

#[test]
fn test_target_url_property_overrides_default() {
    let mut props = BuildProperties::default();
    props.set("mavenURL", "https://example.org/maven");
    let target = PublicationTarget::resolve(&props, env_with(Some("tok123"))).unwrap();
    assert_eq!(target.url(), "https://example.org/maven");
    assert_eq!(target.url.provenance, Provenance::Property);
    assert_eq!(target.token(), Some("tok123"));
    assert_eq!(
        target.token.as_ref().map(|t| t.provenance),
        Some(Provenance::Environment)
    );
}

#[test]
fn test_target_token_property_overrides_environment() {
    let mut props = BuildProperties::default();
    props.set("mavenAccessToken", "from-prop");
    let target = PublicationTarget::resolve(&props, env_with(Some("from-env"))).unwrap();
    assert_eq!(target.token(), Some("from-prop"));
    assert_eq!(
        target.token.as_ref().map(|t| t.provenance),
        Some(Provenance::Property)
    );
}

#[test]
fn test_provenance_display() {
    assert_eq!(Provenance::Property.to_string(), "build property");
    assert_eq!(Provenance::Environment.to_string(), "environment");
    assert_eq!(Provenance::Default.to_string(), "default");
}

#[test]
fn test_target_empty_token_property_wins_over_environment() {
    let mut props = BuildProperties::default();
    props.set("mavenAccessToken", "");
    let target = PublicationTarget::resolve(&props, env_with(Some("tok123"))).unwrap();
    assert_eq!(target.token(), Some(""));
    assert_eq!(
        target.token.as_ref().map(|t| t.provenance),
        Some(Provenance::Property)
    );
}

#[test]
fn test_target_blank_url_property_is_rejected() {
    let mut props = BuildProperties::default();
    props.set("mavenURL", " ");
    let err = PublicationTarget::resolve(&props, env_with(None)).unwrap_err();
    assert!(
        err.to_string().contains("'mavenURL' is set but empty"),
        "got: {err}"
    );
}
