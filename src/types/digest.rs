// ABOUTME: Content digest type in `algorithm:hex` form.
// ABOUTME: Used for image IDs and configuration blob digests.

use std::fmt;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseDigestError {
    #[error("digest cannot be empty")]
    Empty,

    #[error("digest is missing the algorithm prefix: {0}")]
    MissingAlgorithm(String),

    #[error("digest has an empty hex part: {0}")]
    EmptyHex(String),

    #[error("invalid hex character in digest: '{0}'")]
    InvalidHex(char),
}

/// A content-addressed digest such as `sha256:0123...`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Digest {
    algorithm: String,
    hex: String,
}

impl Digest {
    pub fn parse(value: &str) -> Result<Self, ParseDigestError> {
        let value = value.trim();
        if value.is_empty() {
            return Err(ParseDigestError::Empty);
        }

        let (algorithm, hex) = value
            .split_once(':')
            .ok_or_else(|| ParseDigestError::MissingAlgorithm(value.to_string()))?;

        if algorithm.is_empty() {
            return Err(ParseDigestError::MissingAlgorithm(value.to_string()));
        }
        if hex.is_empty() {
            return Err(ParseDigestError::EmptyHex(value.to_string()));
        }
        if let Some(c) = hex.chars().find(|c| !c.is_ascii_hexdigit()) {
            return Err(ParseDigestError::InvalidHex(c));
        }

        Ok(Self {
            algorithm: algorithm.to_string(),
            hex: hex.to_ascii_lowercase(),
        })
    }

    pub fn algorithm(&self) -> &str {
        &self.algorithm
    }

    pub fn hex(&self) -> &str {
        &self.hex
    }
}

impl fmt::Display for Digest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.algorithm, self.hex)
    }
}

impl std::str::FromStr for Digest {
    type Err = ParseDigestError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}
