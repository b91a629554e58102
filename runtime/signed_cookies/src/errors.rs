//! Errors that can occur when reading or writing cookies.
use crate::transport::MAX_COOKIE_SIZE;
use http::StatusCode;
use tracing_log_error::log_error;

#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
/// The error type returned by the cookie codec, for both plain and signed cookies.
///
/// The variants are deliberately coarse: every failure to decode or authenticate
/// a cookie value is reported as [`CookieError::InvalidValue`], no matter if the value
/// was truncated, forged or corrupted in transit.
pub enum CookieError {
    /// The serialized cookie, attributes included, is larger than
    /// [`MAX_COOKIE_SIZE`]. Nothing was written to the response.
    #[error(
        "The serialized cookie is {length} bytes long, exceeding the limit of {max} bytes.",
        max = MAX_COOKIE_SIZE
    )]
    ValueTooLong {
        /// The length of the rejected `Set-Cookie` header value.
        length: usize,
    },
    /// The cookie value couldn't be decoded or failed signature verification.
    #[error("Invalid cookie value.")]
    InvalidValue,
    /// The incoming request doesn't carry a cookie with the requested name.
    #[error("There is no cookie named `{name}` on the incoming request.")]
    NotFound {
        /// The name of the missing cookie.
        name: String,
    },
    /// The cookie name is empty or is not a valid token.
    /// Nothing was written to the response.
    #[error("`{name}` is not a valid cookie name: it must be a non-empty token.")]
    InvalidName {
        /// The rejected name.
        name: String,
    },
    /// A `Path` or `Domain` attribute contains `;` or control characters.
    /// Nothing was written to the response.
    #[error("The `{attribute}` attribute contains `;` or control characters.")]
    InvalidAttribute {
        /// The name of the rejected attribute.
        attribute: &'static str,
    },
    /// The rendered `Set-Cookie` header contains characters that are not
    /// allowed in an HTTP header value.
    #[error("Some characters in the `Set-Cookie` header value are not printable ASCII characters.")]
    InvalidHeaderValue(#[source] http::header::InvalidHeaderValue),
}

impl CookieError {
    /// Convert a [`CookieError`] into an HTTP response.
    ///
    /// Problems with the cookie sent by the client result in a `400 Bad Request`,
    /// while failures to emit a cookie result in a `500 Internal Server Error`
    /// and are logged.
    ///
    /// The body is a short fixed message: it never echoes the cookie value.
    pub fn into_response(&self) -> http::Response<String> {
        let (status, body) = match self {
            CookieError::NotFound { .. } => (StatusCode::BAD_REQUEST, "cookie not found"),
            CookieError::InvalidValue => (StatusCode::BAD_REQUEST, "invalid cookie"),
            CookieError::ValueTooLong { .. }
            | CookieError::InvalidName { .. }
            | CookieError::InvalidAttribute { .. }
            | CookieError::InvalidHeaderValue(_) => {
                log_error!(self, "Failed to attach a cookie to the outgoing response");
                (StatusCode::INTERNAL_SERVER_ERROR, "internal server error")
            }
        };
        let mut response = http::Response::new(body.to_owned());
        *response.status_mut() = status;
        response
    }
}
