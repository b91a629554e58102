//! Tamper-evident HTTP cookies.
//!
//! The crate exposes two layers:
//!
//! - [`transport`] makes arbitrary bytes safe for the cookie wire grammar
//!   (URL-safe base64) and refuses to emit cookies larger than [`MAX_COOKIE_SIZE`];
//! - [`signed`] prepends an HMAC-SHA256 tag over the cookie name and value, so that
//!   any client-side modification is detected when the cookie comes back.
//!
//! Values are signed, not encrypted: clients can read them.
//!
//! # Example
//!
//! ```rust
//! use http::{HeaderMap, HeaderValue, header::{COOKIE, SET_COOKIE}};
//! use signed_cookies::{Cookie, SecretKey, read_signed, write_signed};
//!
//! let key = SecretKey::from_hex(
//!     "13d6b4dff8f84a10851021ec8608f814570d562c92fe6b5ec4c9f595bcb3234b",
//! )?;
//!
//! // Outgoing response
//! let mut response_headers = HeaderMap::new();
//! write_signed(&mut response_headers, Cookie::new("DemoCookie", "12345686790"), &key)?;
//!
//! // The client sends the cookie back on the next request
//! let set_cookie = response_headers[SET_COOKIE].to_str()?;
//! let mut request_headers = HeaderMap::new();
//! request_headers.insert(COOKIE, HeaderValue::from_str(set_cookie)?);
//!
//! let value = read_signed(&request_headers, "DemoCookie", &key)?;
//! assert_eq!(value, b"12345686790");
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
pub mod config;
mod cookie;
pub mod errors;
mod key;
pub mod signed;
pub mod transport;

pub use biscotti::SameSite;
pub use cookie::Cookie;
pub use errors::CookieError;
pub use key::{InvalidSecretKey, SecretKey};
pub use signed::{encode_signed, read_signed, write_signed};
pub use transport::{MAX_COOKIE_SIZE, encode, read, write};
