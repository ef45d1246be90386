use thiserror::Error;

/// Errors raised while producing `WebDAV` response bodies.
#[derive(Error, Debug)]
pub enum RfcError {
    #[error("XML write error: {0}")]
    XmlWriteError(#[from] std::io::Error),

    #[error("Generated XML is not UTF-8: {0}")]
    InvalidUtf8(#[from] std::string::FromUtf8Error),
}

pub type RfcResult<T> = std::result::Result<T, RfcError>;

impl From<RfcError> for crate::rfc::dav::core::DavError {
    fn from(err: RfcError) -> Self {
        Self::Internal(err.to_string())
    }
}
