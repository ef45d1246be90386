//! Depth-limited resource enumeration.

use quire_rfc::rfc::dav::core::Depth;

use super::resource::DavResource;

/// Returns the visible descendants of `root` reachable within `depth`, in
/// pre-order (each collection before its children, children in listing order).
///
/// The root itself is not included.
pub async fn descendants(root: &dyn DavResource, depth: Depth) -> Vec<Box<dyn DavResource>> {
    let mut found = Vec::new();
    if !depth.allows(1) || !root.is_collection().await {
        return found;
    }

    let mut stack: Vec<(Box<dyn DavResource>, u32)> = root
        .children()
        .await
        .into_iter()
        .rev()
        .map(|child| (child, 1))
        .collect();

    while let Some((resource, level)) = stack.pop() {
        if depth.allows(level + 1) && resource.is_collection().await {
            stack.extend(
                resource
                    .children()
                    .await
                    .into_iter()
                    .rev()
                    .map(|child| (child, level + 1)),
            );
        }
        found.push(resource);
    }

    tracing::trace!(count = found.len(), %depth, "Enumerated descendants");
    found
}
