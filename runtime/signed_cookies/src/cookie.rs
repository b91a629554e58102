use crate::errors::CookieError;
use biscotti::{ResponseCookie, SameSite};
use jiff::SignedDuration;

/// A cookie to be attached to an outgoing response.
///
/// The value is an arbitrary byte sequence: the codec takes care of making it
/// safe for the cookie wire grammar.
///
/// # Example
///
/// ```rust
/// use signed_cookies::{Cookie, SameSite};
/// use jiff::SignedDuration;
///
/// let cookie = Cookie::new("DemoCookie", "12345686790")
///     .set_max_age(SignedDuration::from_secs(3600))
///     .set_http_only(true)
///     .set_secure(true)
///     .set_same_site(SameSite::Lax);
/// assert_eq!(cookie.value(), b"12345686790");
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Cookie {
    name: String,
    value: Vec<u8>,
    max_age: Option<SignedDuration>,
    http_only: bool,
    secure: bool,
    same_site: Option<SameSite>,
    path: Option<String>,
    domain: Option<String>,
}

impl Cookie {
    /// Create a new cookie with the given name and value, and no attributes.
    pub fn new(name: impl Into<String>, value: impl Into<Vec<u8>>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
            max_age: None,
            http_only: false,
            secure: false,
            same_site: None,
            path: None,
            domain: None,
        }
    }

    /// The name of the cookie.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The raw, unencoded value of the cookie.
    pub fn value(&self) -> &[u8] {
        &self.value
    }

    /// Set the `Max-Age` attribute.
    pub fn set_max_age(mut self, max_age: SignedDuration) -> Self {
        self.max_age = Some(max_age);
        self
    }

    /// Set the `HttpOnly` attribute.
    pub fn set_http_only(mut self, http_only: bool) -> Self {
        self.http_only = http_only;
        self
    }

    /// Set the `Secure` attribute.
    pub fn set_secure(mut self, secure: bool) -> Self {
        self.secure = secure;
        self
    }

    /// Set the `SameSite` attribute.
    pub fn set_same_site(mut self, same_site: SameSite) -> Self {
        self.same_site = Some(same_site);
        self
    }

    /// Set the `Path` attribute.
    pub fn set_path(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }

    /// Set the `Domain` attribute.
    pub fn set_domain(mut self, domain: impl Into<String>) -> Self {
        self.domain = Some(domain.into());
        self
    }

    pub(crate) fn replace_value(mut self, value: Vec<u8>) -> Self {
        self.value = value;
        self
    }

    /// Check the name and the free-form attributes against the `Set-Cookie` grammar.
    ///
    /// The name must be a non-empty token (RFC 6265, section 4.1.1).
    /// `Path` and `Domain` can't contain `;` or control characters: they would
    /// otherwise smuggle extra attributes, or extra headers, into the response.
    pub(crate) fn validate(&self) -> Result<(), CookieError> {
        if self.name.is_empty() || !self.name.bytes().all(is_token_byte) {
            return Err(CookieError::InvalidName {
                name: self.name.clone(),
            });
        }
        if let Some(path) = self.path.as_deref() {
            if !is_valid_attribute_value(path) {
                return Err(CookieError::InvalidAttribute { attribute: "Path" });
            }
        }
        if let Some(domain) = self.domain.as_deref() {
            if !is_valid_attribute_value(domain) {
                return Err(CookieError::InvalidAttribute { attribute: "Domain" });
            }
        }
        Ok(())
    }

    /// Build the transport representation, using `encoded_value` in place of the raw value.
    pub(crate) fn into_response_cookie(self, encoded_value: String) -> ResponseCookie<'static> {
        let mut cookie = ResponseCookie::new(self.name, encoded_value);
        if let Some(domain) = self.domain {
            cookie = cookie.set_domain(domain);
        }
        if let Some(path) = self.path {
            cookie = cookie.set_path(path);
        }
        if let Some(same_site) = self.same_site {
            cookie = cookie.set_same_site(same_site);
        }
        if self.secure {
            cookie = cookie.set_secure(true);
        }
        if self.http_only {
            cookie = cookie.set_http_only(true);
        }
        if let Some(max_age) = self.max_age {
            cookie = cookie.set_max_age(max_age);
        }
        cookie
    }
}

fn is_token_byte(b: u8) -> bool {
    matches!(b, 0x21..=0x7e)
        && !matches!(
            b,
            b'(' | b')'
                | b'<'
                | b'>'
                | b'@'
                | b','
                | b';'
                | b':'
                | b'\\'
                | b'"'
                | b'/'
                | b'['
                | b']'
                | b'?'
                | b'='
                | b'{'
                | b'}'
        )
}

fn is_valid_attribute_value(value: &str) -> bool {
    value.bytes().all(|b| b != b';' && !b.is_ascii_control())
}
