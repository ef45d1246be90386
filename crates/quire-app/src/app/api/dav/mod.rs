// WebDAV dispatch: header extraction, method handlers, and response writing.

use salvo::{Router, http::Method, routing::MethodFilter};

pub mod extract;
pub mod method;
pub mod response;
pub mod util;

/// ## Summary
/// Routes OPTIONS, HEAD, PROPFIND, COPY and MOVE on any path to their handlers.
///
/// ## Errors
/// Returns an error if an extension method name is rejected.
pub fn routes() -> anyhow::Result<Router> {
    Ok(Router::with_path("{**rest}")
        .options(method::options::options)
        .head(method::head::head)
        .push(
            // PROPFIND method
            Router::new()
                .filter(MethodFilter(Method::from_bytes(b"PROPFIND")?))
                .goal(method::propfind::propfind),
        )
        .push(
            // COPY method
            Router::new()
                .filter_fn(|req, _| req.method().as_str() == "COPY")
                .goal(method::copy::copy),
        )
        .push(
            // MOVE method
            Router::new()
                .filter_fn(|req, _| req.method().as_str() == "MOVE")
                .goal(method::r#move::r#move),
        ))
}
