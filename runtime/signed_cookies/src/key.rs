use secrecy::{ExposeSecret, SecretSlice};
use serde::{Deserialize, Deserializer};
use std::fmt;

/// The server-held secret used to sign cookies and to verify their signatures.
///
/// It is created once, when the process starts, and then shared by reference
/// (or behind an `Arc`) with every request handler.\
/// The key bytes are zeroized on drop and never show up in `Debug` output.
///
/// # Example
///
/// ```rust
/// use signed_cookies::SecretKey;
///
/// let key = SecretKey::from_hex(
///     "13d6b4dff8f84a10851021ec8608f814570d562c92fe6b5ec4c9f595bcb3234b",
/// )?;
/// assert_eq!(format!("{key:?}"), "SecretKey([REDACTED])");
/// # Ok::<(), signed_cookies::InvalidSecretKey>(())
/// ```
pub struct SecretKey(SecretSlice<u8>);

impl SecretKey {
    /// Wrap raw key bytes.
    pub fn new(bytes: impl Into<Vec<u8>>) -> Self {
        let bytes: Vec<u8> = bytes.into();
        Self(SecretSlice::from(bytes))
    }

    /// Decode a key from its hexadecimal representation.
    ///
    /// A 64-character string yields a 32-byte key.
    /// Leading and trailing whitespace is ignored.
    pub fn from_hex(encoded: &str) -> Result<Self, InvalidSecretKey> {
        let bytes = hex::decode(encoded.trim())?;
        if bytes.is_empty() {
            return Err(InvalidSecretKey::Empty);
        }
        Ok(Self::new(bytes))
    }

    pub(crate) fn expose(&self) -> &[u8] {
        self.0.expose_secret()
    }
}

impl fmt::Debug for SecretKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SecretKey([REDACTED])")
    }
}

impl<'de> Deserialize<'de> for SecretKey {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let encoded = String::deserialize(deserializer)?;
        SecretKey::from_hex(&encoded).map_err(serde::de::Error::custom)
    }
}

#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
/// The error returned by [`SecretKey::from_hex`].
pub enum InvalidSecretKey {
    #[error("The secret key is not a valid hex string.")]
    Hex(#[from] hex::FromHexError),
    #[error("The secret key can't be empty.")]
    Empty,
}
