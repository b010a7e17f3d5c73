//! Digest algorithms and hex checksum values.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::errors::CoreError;

// ---------------------------------------------------------------------------
// HashAlgorithm
// ---------------------------------------------------------------------------

/// Digest algorithm a checksum was computed with.
///
/// Blob stores capture `sha1` at write time, so that is the default used for
/// integrity comparisons.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    JsonSchema,
)]
#[serde(rename_all = "snake_case")]
pub enum HashAlgorithm {
    #[default]
    Sha1,
    Sha256,
    Md5,
}

impl HashAlgorithm {
    pub const ALL: [Self; 3] = [Self::Sha1, Self::Sha256, Self::Md5];

    /// Return the string representation used in storage and config.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Sha1 => "sha1",
            Self::Sha256 => "sha256",
            Self::Md5 => "md5",
        }
    }
}

impl fmt::Display for HashAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for HashAlgorithm {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "sha1" => Ok(Self::Sha1),
            "sha256" => Ok(Self::Sha256),
            "md5" => Ok(Self::Md5),
            other => Err(CoreError::Validation(format!(
                "unknown hash algorithm '{other}'"
            ))),
        }
    }
}

// ---------------------------------------------------------------------------
// Checksum
// ---------------------------------------------------------------------------

/// A hex-encoded digest, normalised to lowercase.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Checksum(String);

impl Checksum {
    /// Parse a hex digest.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::Validation`] if the value is empty, has odd length,
    /// or contains non-hex characters.
    pub fn from_hex(value: &str) -> Result<Self, CoreError> {
        if value.is_empty() {
            return Err(CoreError::Validation("checksum is empty".to_string()));
        }
        if value.len() % 2 != 0 {
            return Err(CoreError::Validation(format!(
                "checksum '{value}' has odd length"
            )));
        }
        if !value.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(CoreError::Validation(format!(
                "checksum '{value}' is not hex"
            )));
        }
        Ok(Self(value.to_ascii_lowercase()))
    }

    /// The lowercase hex form.
    #[must_use]
    pub fn as_hex(&self) -> &str {
        &self.0
    }

    /// Whether a digest recorded elsewhere (e.g., by a blob store) is the same value.
    ///
    /// Hex case is not significant.
    #[must_use]
    pub fn matches(&self, recorded: &str) -> bool {
        self.0.eq_ignore_ascii_case(recorded.trim())
    }
}

impl fmt::Display for Checksum {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for Checksum {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_hex(s)
    }
}

impl TryFrom<String> for Checksum {
    type Error = CoreError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::from_hex(&value)
    }
}

impl From<Checksum> for String {
    fn from(value: Checksum) -> Self {
        value.0
    }
}
