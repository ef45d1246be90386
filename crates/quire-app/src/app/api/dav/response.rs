//! Writes service-layer responses onto Salvo responses.

use salvo::Response;

use crate::error::AppError;
use quire_rfc::rfc::dav::core::DavResult;
use quire_service::dav::DavResponse;

/// ## Summary
/// Copies status, headers and body of `dav` onto `res`.
///
/// ## Side Effects
/// Sets the status code, headers, and body on the response.
pub fn write_dav_response(res: &mut Response, dav: DavResponse) {
    res.status_code(dav.status);
    for (name, value) in dav.headers {
        if let Err(e) = res.add_header(name, value, true) {
            tracing::warn!(header = name, error = %e, "Failed to set response header");
        }
    }
    if let Some(body) = dav.body {
        res.write_body(body).ok();
    }
}

/// Writes a service outcome, mapping errors to bodiless status responses.
pub fn write_outcome(res: &mut Response, outcome: DavResult<DavResponse>) {
    match outcome {
        Ok(dav) => write_dav_response(res, dav),
        Err(e) => {
            tracing::debug!(error = %e, status = e.status_code(), "Request rejected");
            write_dav_response(res, DavResponse::from(e));
        }
    }
}

/// Reports an application error that occurred before the service layer ran.
pub fn write_app_error(res: &mut Response, err: &AppError) {
    let status = err.status_code();
    if status.is_server_error() {
        tracing::error!(error = %err, "Failed to prepare WebDAV request");
    } else {
        tracing::debug!(error = %err, "Rejected WebDAV request");
    }
    res.status_code(status);
}
