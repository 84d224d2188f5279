//! POM generation for registered publications.

use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;

use modpub_util::errors::ModpubError;

use crate::publication::MavenPublication;

const POM_NAMESPACE: &str = "http://maven.apache.org/POM/4.0.0";
const XSI_NAMESPACE: &str = "http://www.w3.org/2001/XMLSchema-instance";
const POM_SCHEMA_LOCATION: &str =
    "http://maven.apache.org/POM/4.0.0 https://maven.apache.org/xsd/maven-4.0.0.xsd";

/// File name of a generated POM inside a publication's staging directory.
pub const POM_FILE_NAME: &str = "pom-default.xml";

/// Render the POM describing `publication`.
pub fn render_pom(publication: &MavenPublication) -> miette::Result<String> {
    let mut writer = Writer::new_with_indent(Vec::new(), b' ', 2);

    writer
        .write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))
        .map_err(xml_error)?;

    let project = BytesStart::new("project").with_attributes([
        ("xmlns", POM_NAMESPACE),
        ("xmlns:xsi", XSI_NAMESPACE),
        ("xsi:schemaLocation", POM_SCHEMA_LOCATION),
    ]);
    writer.write_event(Event::Start(project)).map_err(xml_error)?;

    text_element(&mut writer, "modelVersion", "4.0.0")?;
    text_element(&mut writer, "groupId", &publication.group_id)?;
    text_element(&mut writer, "artifactId", &publication.artifact_id)?;
    text_element(&mut writer, "version", &publication.version)?;
    text_element(&mut writer, "packaging", publication.component.packaging())?;

    writer
        .write_event(Event::End(BytesEnd::new("project")))
        .map_err(xml_error)?;

    let mut xml = String::from_utf8(writer.into_inner()).map_err(xml_error)?;
    xml.push('\n');
    Ok(xml)
}

fn text_element(writer: &mut Writer<Vec<u8>>, name: &str, value: &str) -> miette::Result<()> {
    writer
        .create_element(name)
        .write_text_content(BytesText::new(value))
        .map_err(xml_error)?;
    Ok(())
}

fn xml_error(e: impl std::fmt::Display) -> ModpubError {
    ModpubError::Publication {
        message: format!("Failed to write POM: {e}"),
    }
}
