//! Detect client-side tampering with HMAC-SHA256 signatures.
//!
//! A signed cookie value is laid out as `base64url(tag ‖ value)`, where `tag`
//! is the HMAC-SHA256 of the cookie name followed by the raw value, computed
//! with a server-held [`SecretKey`].
//! Binding the name into the tag prevents a client from moving a signed value
//! from one cookie to another.
use crate::errors::CookieError;
use crate::{Cookie, SecretKey, transport};
use hmac::{Hmac, Mac};
use http::HeaderMap;
use sha2::Sha256;
use subtle::ConstantTimeEq;

type HmacSha256 = Hmac<Sha256>;

/// The length, in bytes, of the tag prepended to the value of a signed cookie.
///
/// It matches the digest size of SHA-256.
pub const TAG_LENGTH: usize = 32;

/// Sign the cookie and render it as a `Set-Cookie` header value.
///
/// Same contract as [`transport::encode`].
pub fn encode_signed(cookie: Cookie, key: &SecretKey) -> Result<String, CookieError> {
    transport::encode(sign(cookie, key))
}

/// Sign the cookie and attach it to the outgoing response via the `Set-Cookie` header.
///
/// Same contract as [`transport::write`].
pub fn write_signed(
    headers: &mut HeaderMap,
    cookie: Cookie,
    key: &SecretKey,
) -> Result<(), CookieError> {
    transport::write(headers, sign(cookie, key))
}

/// Find the cookie named `name` on the incoming request, verify its signature and
/// return the original value.
///
/// Errors from [`transport::read`] are returned unchanged.
/// A value that is too short to hold a tag, or whose tag doesn't match,
/// is rejected with [`CookieError::InvalidValue`].
pub fn read_signed(
    headers: &HeaderMap,
    name: &str,
    key: &SecretKey,
) -> Result<Vec<u8>, CookieError> {
    let mut payload = transport::read(headers, name)?;
    if payload.len() < TAG_LENGTH {
        return Err(CookieError::InvalidValue);
    }
    let expected = tag(key, name, &payload[TAG_LENGTH..]);
    // The comparison must run in constant time.
    if !bool::from(payload[..TAG_LENGTH].ct_eq(&expected[..])) {
        return Err(CookieError::InvalidValue);
    }
    Ok(payload.split_off(TAG_LENGTH))
}

fn sign(cookie: Cookie, key: &SecretKey) -> Cookie {
    let tag = tag(key, cookie.name(), cookie.value());
    let mut payload = Vec::with_capacity(TAG_LENGTH + cookie.value().len());
    payload.extend_from_slice(&tag);
    payload.extend_from_slice(cookie.value());
    cookie.replace_value(payload)
}

fn tag(key: &SecretKey, name: &str, value: &[u8]) -> [u8; TAG_LENGTH] {
    let mut mac = <HmacSha256 as Mac>::new_from_slice(key.expose())
        .expect("HMAC accepts keys of any length");
    mac.update(name.as_bytes());
    mac.update(value);
    let mut tag = [0u8; TAG_LENGTH];
    tag.copy_from_slice(&mac.finalize().into_bytes());
    tag
}
