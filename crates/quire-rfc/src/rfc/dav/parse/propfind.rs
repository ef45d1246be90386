//! PROPFIND request XML parsing.

use quick_xml::NsReader;
use quick_xml::events::{BytesStart, Event};
use quick_xml::name::ResolveResult;

use super::error::{ParseError, ParseResult};
use crate::rfc::dav::core::{DAV_NS, Namespace, PropertyName, PropertySelection, QName};

/// Negotiates the property set requested by a PROPFIND body.
///
/// ## Summary
/// An empty body, a body without a `DAV:propfind` element, or a `propfind`
/// with an `allprop` child selects every property. Otherwise the `prop`
/// child lists the requested properties in document order. Children whose
/// namespace cannot be used are skipped.
///
/// ## Errors
/// Returns an error if the XML is malformed, if `propfind` has neither
/// `allprop` nor `prop`, or if a `prop` child has no namespace while the
/// root declares `DAV:` (prefixed or as the default) and the child does not declare
/// `xmlns=""` itself.
#[tracing::instrument(skip(body), fields(body_len = body.len()))]
pub fn negotiate_properties(body: &[u8]) -> ParseResult<PropertySelection> {
    let raw = std::str::from_utf8(body)?;
    if raw.trim().is_empty() {
        tracing::debug!("Empty PROPFIND body, selecting all properties");
        return Ok(PropertySelection::All);
    }

    let mut reader = NsReader::from_reader(body);
    reader.config_mut().trim_text(true);

    let mut buf = Vec::new();
    let mut level: usize = 0;
    let mut dav_prefixed: Option<bool> = None;
    let mut propfind_level: Option<usize> = None;
    let mut prop_level: Option<usize> = None;
    let mut propfind_closed = false;
    let mut allprop = false;
    let mut saw_prop = false;
    let mut properties: Vec<PropertyName> = Vec::new();

    loop {
        buf.clear();
        let event = reader
            .read_event_into(&mut buf)
            .map_err(|e| ParseError::xml(e.to_string()))?;

        match event {
            Event::Start(ref e) | Event::Empty(ref e) => {
                let is_empty = matches!(event, Event::Empty(_));
                level += 1;

                if dav_prefixed.is_none() {
                    dav_prefixed = Some(binds_dav_prefix(e));
                }

                let (resolved, local) = reader.resolve_element(e.name());
                let local_name = std::str::from_utf8(local.into_inner())?.to_owned();
                let in_dav = matches!(&resolved, ResolveResult::Bound(ns) if ns.as_ref() == DAV_NS.as_bytes());

                match (propfind_level, prop_level) {
                    (None, _) if !propfind_closed && in_dav && local_name == "propfind" => {
                        propfind_level = Some(level);
                    }
                    (Some(pf), None) if level == pf + 1 && in_dav && local_name == "allprop" => {
                        allprop = true;
                    }
                    (Some(pf), None) if level == pf + 1 && in_dav && local_name == "prop" => {
                        saw_prop = true;
                        prop_level = Some(level);
                    }
                    (Some(_), Some(p)) if level == p + 1 => {
                        let unbound = matches!(resolved, ResolveResult::Unbound);
                        let namespace = match resolved {
                            ResolveResult::Bound(ns) => {
                                Some(Namespace::from(std::str::from_utf8(ns.into_inner())?.to_owned()))
                            }
                            ResolveResult::Unbound => None,
                            ResolveResult::Unknown(_) => {
                                tracing::debug!(element = %local_name, "Undeclared namespace prefix");
                                None
                            }
                        };

                        if let Some(name) =
                            property_name(raw, e, namespace, unbound, dav_prefixed.unwrap_or(false), local_name)?
                        {
                            properties.push(name);
                        }
                    }
                    _ => {}
                }

                if is_empty {
                    close_element(&mut level, &mut propfind_level, &mut prop_level, &mut propfind_closed);
                }
            }
            Event::End(_) => {
                close_element(&mut level, &mut propfind_level, &mut prop_level, &mut propfind_closed);
            }
            Event::Eof => {
                if level != 0 {
                    tracing::debug!(open_elements = level, "PROPFIND body ended inside an element");
                    return Err(ParseError::xml(format!(
                        "unexpected end of document with {level} unclosed element(s)"
                    )));
                }
                break;
            }
            _ => {}
        }
    }

    if !propfind_closed {
        tracing::debug!("No DAV:propfind element, selecting all properties");
        return Ok(PropertySelection::All);
    }

    if allprop {
        return Ok(PropertySelection::All);
    }

    if !saw_prop {
        return Err(ParseError::missing_element("prop"));
    }

    tracing::debug!(count = properties.len(), "Negotiated named properties");
    Ok(PropertySelection::Named(properties))
}

/// Builds the descriptor for one `prop` child, or `None` to skip it.
fn property_name(
    raw: &str,
    element: &BytesStart<'_>,
    namespace: Option<Namespace>,
    unbound: bool,
    dav_prefixed: bool,
    local_name: String,
) -> ParseResult<Option<PropertyName>> {
    if local_name.is_empty() {
        return Ok(None);
    }

    if let Some(namespace) = namespace {
        return Ok(Some(PropertyName::new(QName::new(namespace, local_name))));
    }

    if dav_prefixed {
        let qualified = element.name();
        let qualified = std::str::from_utf8(qualified.as_ref())?;
        return match resolve_declared_namespace(raw, qualified) {
            Some(namespace) => Ok(Some(PropertyName::new(QName::new(namespace, local_name)))),
            None => {
                tracing::debug!(element = %qualified, "Rejecting element without namespace");
                Err(ParseError::malformed_namespace(qualified))
            }
        };
    }

    if unbound {
        return Ok(Some(PropertyName::new(QName::new(Namespace::NONE, local_name))));
    }

    Ok(None)
}

fn close_element(
    level: &mut usize,
    propfind_level: &mut Option<usize>,
    prop_level: &mut Option<usize>,
    propfind_closed: &mut bool,
) {
    if *prop_level == Some(*level) {
        *prop_level = None;
    }
    if *propfind_level == Some(*level) {
        *propfind_level = None;
        *propfind_closed = true;
    }
    *level = level.saturating_sub(1);
}

/// Returns whether the root element declares `DAV:`, either bound to a prefix or
/// as the default namespace.
///
/// Both forms give the document a non-empty `DAV:` prefix, so a property child
/// without a resolvable namespace cannot be told apart from a folded-in one.
fn binds_dav_prefix(root: &BytesStart<'_>) -> bool {
    root.attributes().flatten().any(|attr| {
        let key = attr.key.as_ref();
        (key == b"xmlns" || key.starts_with(b"xmlns:")) && attr.value.as_ref() == DAV_NS.as_bytes()
    })
}

/// Checks the raw request text for an explicit empty namespace on `element`.
///
/// ## Summary
/// Returns the empty namespace when some start tag `<element ...>` in `raw`
/// carries `xmlns=""`. The name must be followed by whitespace so that
/// `<foo` does not match `<foobar`. XML parsers may fold an unscoped element
/// into the default namespace; this looks at the text independently.
#[must_use]
pub fn resolve_declared_namespace(raw: &str, element: &str) -> Option<Namespace> {
    if element.is_empty() {
        return None;
    }

    let needle = format!("<{element}");
    let mut rest = raw;
    while let Some(pos) = rest.find(&needle) {
        let after = &rest[pos + needle.len()..];
        if after.starts_with(char::is_whitespace) {
            let tag_end = after.find('>').unwrap_or(after.len());
            if after[..tag_end].contains("xmlns=\"\"") {
                return Some(Namespace::NONE);
            }
        }
        rest = after;
    }
    None
}
