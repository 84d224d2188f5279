use modpub_maven::pom::render_pom;
use modpub_maven::publication::{MavenPublication, SoftwareComponent};

fn publication(artifact: &str, version: &str) -> MavenPublication {
    MavenPublication {
        name: "apiInterface".to_string(),
        group_id: "xyz.yihuier".to_string(),
        artifact_id: artifact.to_string(),
        version: version.to_string(),
        component: SoftwareComponent::Java,
    }
}

#[test]
fn test_render_pom_contains_coordinates() {
    let pom = render_pom(&publication("api-client", "1.2.0")).unwrap();
    assert!(pom.starts_with("<?xml version=\"1.0\" encoding=\"UTF-8\"?>"));
    assert!(pom.contains("<modelVersion>4.0.0</modelVersion>"));
    assert!(pom.contains("<groupId>xyz.yihuier</groupId>"));
    assert!(pom.contains("<artifactId>api-client</artifactId>"));
    assert!(pom.contains("<version>1.2.0</version>"));
    assert!(pom.contains("<packaging>jar</packaging>"));
    assert!(pom.contains("xmlns=\"http://maven.apache.org/POM/4.0.0\""));
    assert!(pom.trim_end().ends_with("</project>"));
}

#[test]
fn test_render_pom_escapes_text() {
    let pom = render_pom(&publication("a<b", "1&2")).unwrap();
    assert!(pom.contains("<artifactId>a&lt;b</artifactId>"));
    assert!(pom.contains("<version>1&amp;2</version>"));
}

#[test]
fn test_render_pom_is_deterministic() {
    let p = publication("api-client", "1.2.0");
    assert_eq!(render_pom(&p).unwrap(), render_pom(&p).unwrap());
}
