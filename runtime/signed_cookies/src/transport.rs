//! Make arbitrary bytes safe for the cookie wire grammar.
//!
//! Values are encoded using the URL-safe base64 alphabet, with padding.
//! This is an encoding, not encryption: anybody can decode the value.
//! Check out [`signed`](crate::signed) if you need to detect tampering.
use crate::Cookie;
use crate::errors::CookieError;
use base64::{Engine as _, engine::general_purpose::URL_SAFE};
use biscotti::{Processor, ProcessorConfig, RequestCookies, ResponseCookies};
use http::header::{COOKIE, SET_COOKIE};
use http::{HeaderMap, HeaderValue};

/// The maximum length, in bytes, of a serialized cookie:
/// name, value and attributes, as they appear in the `Set-Cookie` header.
pub const MAX_COOKIE_SIZE: usize = 4096;

/// Encode the cookie value and render the cookie as a `Set-Cookie` header value.
///
/// It fails with:
///
/// - [`CookieError::InvalidName`] if the name is empty or not a token;
/// - [`CookieError::InvalidAttribute`] if `Path` or `Domain` contain `;` or
///   control characters;
/// - [`CookieError::ValueTooLong`] if the rendered header value is
///   longer than [`MAX_COOKIE_SIZE`].
pub fn encode(cookie: Cookie) -> Result<String, CookieError> {
    cookie.validate()?;
    let encoded_value = URL_SAFE.encode(cookie.value());
    let processor = processor();
    let mut cookies = ResponseCookies::new();
    cookies.insert(cookie.into_response_cookie(encoded_value));
    let header_value = cookies
        .header_values(&processor)
        .next()
        .expect("A set with a single cookie renders a single header value");
    if header_value.len() > MAX_COOKIE_SIZE {
        return Err(CookieError::ValueTooLong {
            length: header_value.len(),
        });
    }
    Ok(header_value)
}

/// Attach a cookie to the outgoing response via the `Set-Cookie` header.
///
/// The value is base64-encoded before being written.
/// If the serialized cookie is too long, the error is returned and `headers`
/// is left untouched.
pub fn write(headers: &mut HeaderMap, cookie: Cookie) -> Result<(), CookieError> {
    let name = cookie.name().to_owned();
    let header_value = encode(cookie)?;
    let header_value =
        HeaderValue::try_from(header_value).map_err(CookieError::InvalidHeaderValue)?;
    tracing::trace!(
        cookie.name = %name,
        cookie.length = header_value.len(),
        "Attached cookie to the outgoing response"
    );
    headers.append(SET_COOKIE, header_value);
    Ok(())
}

/// Find the cookie named `name` on the incoming request and decode its value.
///
/// Every `Cookie` header is split into `name=value` pairs, parsed one at a time.
/// Pairs that can't be parsed, or that contain non-ASCII bytes, are skipped:
/// they don't prevent the lookup of other cookies.
/// If the same name shows up more than once, the first occurrence wins.
///
/// It fails with:
///
/// - [`CookieError::NotFound`] if there is no such cookie;
/// - [`CookieError::InvalidValue`] if the value is not valid URL-safe base64.
pub fn read(headers: &HeaderMap, name: &str) -> Result<Vec<u8>, CookieError> {
    let encoded_value = find(headers, name).ok_or_else(|| CookieError::NotFound {
        name: name.to_owned(),
    })?;
    let value = URL_SAFE
        .decode(encoded_value)
        .map_err(|_| CookieError::InvalidValue)?;
    tracing::trace!(cookie.name = %name, "Decoded request cookie");
    Ok(value)
}

fn find(headers: &HeaderMap, name: &str) -> Option<String> {
    let processor = processor();
    let pairs = headers
        .get_all(COOKIE)
        .iter()
        .flat_map(|header| header.as_bytes().split(|b| *b == b';'));
    for pair in pairs {
        let Ok(pair) = std::str::from_utf8(pair) else {
            continue;
        };
        let pair = pair.trim();
        if pair.is_empty() || !pair.is_ascii() {
            continue;
        }
        let mut cookies = RequestCookies::new();
        if let Err(e) = cookies.extend_from_header(pair, &processor) {
            tracing::trace!(error.message = %e, "Skipped a malformed request cookie");
            continue;
        }
        if let Some(cookie) = cookies.get(name) {
            return Some(cookie.value().to_owned());
        }
    }
    None
}

/// Values are already base64-encoded: `biscotti` must emit them verbatim.
fn processor() -> Processor {
    let mut config = ProcessorConfig::default();
    config.percent_encode = false;
    config.into()
}
