//! Multistatus XML serialization.

use quick_xml::Writer;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};

use crate::error::RfcResult;
use crate::rfc::dav::core::{
    DavProperty, Multistatus, PropstatResponse, QName, ResponseBody, property::PropertyValue,
};

/// Serializes a multistatus response to XML.
///
/// ## Summary
/// Converts a `Multistatus` response structure into properly formatted
/// `WebDAV` XML for the response body. `DAV:` elements use the `D` prefix;
/// elements in other namespaces declare their namespace inline.
///
/// ## Errors
/// Returns `RfcError::XmlWriteError` if writing an event fails and
/// `RfcError::InvalidUtf8` if the buffer is not UTF-8.
pub fn serialize_multistatus(multistatus: &Multistatus) -> RfcResult<String> {
    let mut writer = Writer::new(Vec::new());

    writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("utf-8"), None)))?;

    let mut elem = BytesStart::new("D:multistatus");
    elem.push_attribute(("xmlns:D", "DAV:"));
    writer.write_event(Event::Start(elem))?;

    for response in &multistatus.responses {
        write_response(&mut writer, response, &multistatus.http_version)?;
    }

    if let Some(ref desc) = multistatus.description {
        write_text_element(&mut writer, "D:responsedescription", desc)?;
    }

    writer.write_event(Event::End(BytesEnd::new("D:multistatus")))?;

    Ok(String::from_utf8(writer.into_inner())?)
}

/// Writes a single response element.
fn write_response<W: std::io::Write>(
    writer: &mut Writer<W>,
    response: &PropstatResponse,
    http_version: &str,
) -> RfcResult<()> {
    writer.write_event(Event::Start(BytesStart::new("D:response")))?;

    write_text_element(writer, "D:href", response.href.as_str())?;

    match &response.body {
        ResponseBody::Status(status) => {
            write_text_element(writer, "D:status", &status.status_line(http_version))?;
        }
        ResponseBody::Propstats(propstats) => {
            for propstat in propstats {
                writer.write_event(Event::Start(BytesStart::new("D:propstat")))?;
                writer.write_event(Event::Start(BytesStart::new("D:prop")))?;

                for prop in &propstat.properties {
                    write_property(writer, prop)?;
                }

                writer.write_event(Event::End(BytesEnd::new("D:prop")))?;
                write_text_element(writer, "D:status", &propstat.status.status_line(http_version))?;

                if let Some(ref desc) = propstat.description {
                    write_text_element(writer, "D:responsedescription", desc)?;
                }

                writer.write_event(Event::End(BytesEnd::new("D:propstat")))?;
            }
        }
    }

    if let Some(ref desc) = response.description {
        write_text_element(writer, "D:responsedescription", desc)?;
    }

    writer.write_event(Event::End(BytesEnd::new("D:response")))?;

    Ok(())
}

/// Writes a property element.
fn write_property<W: std::io::Write>(
    writer: &mut Writer<W>,
    prop: &DavProperty,
) -> RfcResult<()> {
    let qname = prop.name.qname();
    let elem_name = element_name(qname);

    match &prop.value {
        Some(PropertyValue::Href(href)) => {
            writer.write_event(Event::Start(start_element(qname)))?;
            write_text_element(writer, "D:href", href)?;
            writer.write_event(Event::End(BytesEnd::new(&elem_name)))?;
        }
        Some(PropertyValue::ResourceType(types)) if !types.is_empty() => {
            writer.write_event(Event::Start(start_element(qname)))?;
            for rt in types {
                writer.write_event(Event::Empty(start_element(rt)))?;
            }
            writer.write_event(Event::End(BytesEnd::new(&elem_name)))?;
        }
        Some(value) => match value.as_text() {
            Some(text) => {
                writer.write_event(Event::Start(start_element(qname)))?;
                writer.write_event(Event::Text(BytesText::new(&text)))?;
                writer.write_event(Event::End(BytesEnd::new(&elem_name)))?;
            }
            None => {
                writer.write_event(Event::Empty(start_element(qname)))?;
            }
        },
        None => {
            writer.write_event(Event::Empty(start_element(qname)))?;
        }
    }

    Ok(())
}

/// Writes a simple text element.
fn write_text_element<W: std::io::Write>(
    writer: &mut Writer<W>,
    name: &str,
    text: &str,
) -> RfcResult<()> {
    writer.write_event(Event::Start(BytesStart::new(name)))?;
    writer.write_event(Event::Text(BytesText::new(text)))?;
    writer.write_event(Event::End(BytesEnd::new(name)))?;
    Ok(())
}

/// Returns the serialized tag name for a qualified name.
fn element_name(qname: &QName) -> String {
    match qname.namespace.default_prefix() {
        Some(prefix) => format!("{prefix}:{}", qname.local_name()),
        None => qname.local_name().to_string(),
    }
}

/// Builds a start tag, declaring the namespace inline when it has no prefix.
fn start_element(qname: &QName) -> BytesStart<'static> {
    let mut elem = BytesStart::new(element_name(qname));
    if qname.namespace.default_prefix().is_none() {
        elem.push_attribute(("xmlns", qname.namespace_uri()));
    }
    elem
}
