//! Per-resource property resolution and href formatting.

use quire_rfc::rfc::dav::core::{DavProperty, PropertySelection, PropstatResponse};
use quire_rfc::rfc::uri::{Origin, url_format};

use super::resource::DavResource;

/// Returns the href reported for `resource`.
///
/// Hrefs are absolute (`scheme://host:port/path`) unless the resource asks for
/// bare paths. Collections always end in `/`.
pub async fn resource_href(resource: &dyn DavResource, origin: &Origin) -> String {
    let formatted = url_format(&resource.public_path(), resource.is_collection().await);
    if resource.propstat_relative_path() {
        formatted
    } else {
        origin.absolute_href(&formatted)
    }
}

/// Splits the selected properties of `resource` into found and not found.
///
/// For an all-properties selection only defined properties are reported, in
/// the resource's own order. Named selections keep request order.
pub async fn resolve_properties(
    resource: &dyn DavResource,
    selection: &PropertySelection,
) -> (Vec<DavProperty>, Vec<DavProperty>) {
    let mut found = Vec::new();
    let mut not_found = Vec::new();

    match selection {
        PropertySelection::Named(names) if !names.is_empty() => {
            for name in names {
                match resource.property(name).await {
                    Some(value) => found.push(DavProperty::new(name.clone(), value)),
                    None => not_found.push(DavProperty::not_found(name.clone())),
                }
            }
        }
        PropertySelection::All | PropertySelection::Named(_) => {
            for name in resource.properties().await {
                if let Some(value) = resource.property(&name).await {
                    found.push(DavProperty::new(name, value));
                }
            }
        }
    }

    (found, not_found)
}

/// Builds the multistatus entry for one resource.
pub async fn propstat_response(
    resource: &dyn DavResource,
    selection: &PropertySelection,
    origin: &Origin,
) -> PropstatResponse {
    let href = resource_href(resource, origin).await;
    let (found, not_found) = resolve_properties(resource, selection).await;
    PropstatResponse::with_found_and_not_found(href, found, not_found)
}
