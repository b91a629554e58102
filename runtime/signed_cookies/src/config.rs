//! Configuration for the cookies emitted by an application.
//!
//! [`CookieConfig`] holds the attributes attached to every cookie,
//! while [`SignedCookiesConfig`] adds the secret key used for signing.
use crate::{Cookie, SameSite, SecretKey};
use jiff::SignedDuration;
use std::time::Duration;

#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
#[non_exhaustive]
/// Configure the attributes of the cookies written by the application.
pub struct CookieConfig {
    /// The name of the cookie.
    ///
    /// By default, the name is set to `id`.
    #[serde(default = "default_cookie_name")]
    pub name: String,
    /// Set the `Domain` attribute on the cookie.
    ///
    /// By default, the attribute is not set.
    #[serde(default)]
    pub domain: Option<String>,
    /// Set the `Path` attribute on the cookie.
    ///
    /// By default, the attribute is set to `/`.
    #[serde(default = "default_cookie_path")]
    pub path: Option<String>,
    /// Set the `Secure` attribute on the cookie.
    ///
    /// If the cookie is marked as `Secure`, it will only be transmitted when the connection is secure (e.g. over HTTPS).
    ///
    /// Default is `true`.
    #[serde(default = "default_cookie_secure")]
    pub secure: bool,
    /// Set the `HttpOnly` attribute on the cookie.
    ///
    /// If the cookie is marked as `HttpOnly`, it will not be visible to JavaScript
    /// snippets running in the browser.
    ///
    /// Default is `true`.
    #[serde(default = "default_cookie_http_only")]
    pub http_only: bool,
    /// Set the [`SameSite`] attribute on the cookie.
    ///
    /// By default, the attribute is set to [`SameSite::Lax`].
    #[serde(default = "default_cookie_same_site")]
    #[serde(with = "same_site")]
    pub same_site: Option<SameSite>,
    /// Set the `Max-Age` attribute on the cookie, e.g. `1h` or `30m`.
    ///
    /// By default, the attribute is not set: the cookie expires when the
    /// browser session ends.
    #[serde(default)]
    #[serde(with = "humantime_serde")]
    pub max_age: Option<Duration>,
}

impl Default for CookieConfig {
    fn default() -> Self {
        Self {
            name: default_cookie_name(),
            domain: None,
            path: default_cookie_path(),
            secure: default_cookie_secure(),
            http_only: default_cookie_http_only(),
            same_site: default_cookie_same_site(),
            max_age: None,
        }
    }
}

impl CookieConfig {
    /// Build a [`Cookie`] with the configured name and attributes.
    pub fn cookie(&self, value: impl Into<Vec<u8>>) -> Cookie {
        let mut cookie = Cookie::new(self.name.clone(), value)
            .set_secure(self.secure)
            .set_http_only(self.http_only);
        if let Some(domain) = self.domain.as_deref() {
            cookie = cookie.set_domain(domain);
        }
        if let Some(path) = self.path.as_deref() {
            cookie = cookie.set_path(path);
        }
        if let Some(same_site) = self.same_site {
            cookie = cookie.set_same_site(same_site);
        }
        if let Some(max_age) = self.max_age {
            let max_age = SignedDuration::try_from(max_age).unwrap_or(SignedDuration::MAX);
            cookie = cookie.set_max_age(max_age);
        }
        cookie
    }
}

fn default_cookie_name() -> String {
    "id".to_string()
}

fn default_cookie_secure() -> bool {
    true
}

fn default_cookie_http_only() -> bool {
    true
}

fn default_cookie_path() -> Option<String> {
    Some("/".to_string())
}

fn default_cookie_same_site() -> Option<SameSite> {
    Some(SameSite::Lax)
}

#[derive(Debug, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
#[non_exhaustive]
/// Everything required to read and write signed cookies.
pub struct SignedCookiesConfig {
    /// The key used to sign cookies, as a hex string.
    ///
    /// Generate a 64-character (32 bytes) key with a cryptographically
    /// secure random number generator, e.g. `openssl rand -hex 32`.
    pub secret_key: SecretKey,
    /// The attributes of the signed cookie.
    #[serde(default)]
    pub cookie: CookieConfig,
}

#[cfg(feature = "config")]
impl SignedCookiesConfig {
    /// Load the configuration by merging together two sources:
    ///
    /// 1. Environment variables (`SC_*`)
    /// 2. The YAML file at `path`
    ///
    /// Environment variables take precedence over the file.
    /// Use `__` to separate nesting levels, e.g. `SC_COOKIE__NAME=session`.
    /// A missing file is not an error, as long as all required fields are
    /// provided via environment variables.
    pub fn load<P>(path: P) -> Result<Self, errors::ConfigLoadError>
    where
        P: AsRef<std::path::Path>,
    {
        use anyhow::Context;
        use figment::{
            Figment,
            providers::{Env, Format, Yaml},
        };

        let path = path.as_ref();
        let span = tracing::info_span!(
            "Loading configuration",
            configuration.file = %path.display(),
        );
        let _guard = span.enter();
        let figment = Figment::new()
            .merge(Yaml::file(path))
            .merge(Env::prefixed("SC_").split("__"));
        let configuration: Self = figment
            .extract()
            .context("Failed to load signed cookies configuration")
            .map_err(errors::ConfigLoadError)?;
        Ok(configuration)
    }
}

#[cfg(feature = "config")]
/// Errors that can occur when loading configuration.
pub mod errors {
    #[derive(Debug, thiserror::Error)]
    #[error("Failed to load configuration")]
    /// The error returned by [`SignedCookiesConfig::load`](super::SignedCookiesConfig::load).
    pub struct ConfigLoadError(#[source] pub(super) anyhow::Error);
}

// `biscotti::SameSite` has no serde support: go through a local mirror.
mod same_site {
    use crate::SameSite;
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    #[derive(Clone, Copy, Serialize, Deserialize)]
    enum Repr {
        #[serde(alias = "strict")]
        Strict,
        #[serde(alias = "lax")]
        Lax,
        #[serde(alias = "none")]
        None,
    }

    impl From<SameSite> for Repr {
        fn from(value: SameSite) -> Self {
            match value {
                SameSite::Strict => Repr::Strict,
                SameSite::Lax => Repr::Lax,
                SameSite::None => Repr::None,
            }
        }
    }

    impl From<Repr> for SameSite {
        fn from(value: Repr) -> Self {
            match value {
                Repr::Strict => SameSite::Strict,
                Repr::Lax => SameSite::Lax,
                Repr::None => SameSite::None,
            }
        }
    }

    pub fn serialize<S>(value: &Option<SameSite>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        value.map(Repr::from).serialize(serializer)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<SameSite>, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(Option::<Repr>::deserialize(deserializer)?.map(SameSite::from))
    }
}
