//! Generation options.
//!
//! `RawOptions` is what the caller sent; `GenerationOptions` is what the
//! engine runs on after normalization.

use std::str::FromStr;

use serde_json::{Map, Value};

use crate::error::{AppError, GenerateError};

/// Which generation algorithm to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GenerationKind {
    /// Latin letters, upper and lower case.
    Text,
    /// Decimal digits from a secure source.
    Numeric,
    /// Uppercase version-4 UUID.
    Guid,
    /// Latin letters and digits.
    Alphanumeric,
    /// Caller-supplied alphabet.
    CustomCharset,
}

impl GenerationKind {
    /// Canonical wire name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Numeric => "numeric",
            Self::Guid => "guid",
            Self::Alphanumeric => "alphanumeric",
            Self::CustomCharset => "custom-charset",
        }
    }
}

impl std::fmt::Display for GenerationKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for GenerationKind {
    type Err = GenerateError;

    /// Accepts canonical names and the legacy `string`/`number`/`specified` aliases.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "text" | "string" => Ok(Self::Text),
            "numeric" | "number" => Ok(Self::Numeric),
            "guid" => Ok(Self::Guid),
            "alphanumeric" => Ok(Self::Alphanumeric),
            "custom-charset" | "specified" => Ok(Self::CustomCharset),
            _ => Err(GenerateError::InvalidType),
        }
    }
}

/// Unvalidated generation request fields.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawOptions {
    /// Requested kind, as sent.
    pub kind: Option<String>,
    /// Optional explicit charset.
    pub charset: Option<String>,
    /// Optional explicit length.
    pub length: Option<i64>,
}

impl RawOptions {
    /// Create raw options for the given kind name.
    #[must_use]
    pub fn new(kind: impl Into<String>) -> Self {
        Self {
            kind: Some(kind.into()),
            ..Self::default()
        }
    }

    /// Set the charset.
    #[must_use]
    pub fn with_charset(mut self, charset: impl Into<String>) -> Self {
        self.charset = Some(charset.into());
        self
    }

    /// Set the length.
    #[must_use]
    pub const fn with_length(mut self, length: i64) -> Self {
        self.length = Some(length);
        self
    }

    /// Decode a JSON request body.
    ///
    /// A field of the wrong JSON type fails with the typed error for that
    /// field; `null` counts as absent.
    ///
    /// # Errors
    ///
    /// Returns `BadRequest` if the body is not a JSON object, otherwise the
    /// typed error of the first malformed field.
    pub fn from_json(body: &[u8]) -> Result<Self, AppError> {
        let fields: Map<String, Value> = serde_json::from_slice(body)
            .map_err(|_| AppError::BadRequest("bad request body".to_string()))?;

        let kind = match fields.get("type") {
            None | Some(Value::Null) => None,
            Some(Value::String(s)) => Some(s.clone()),
            Some(_) => return Err(AppError::InvalidType),
        };

        let charset = match fields.get("charset") {
            None | Some(Value::Null) => None,
            Some(Value::String(s)) => Some(s.clone()),
            Some(_) => return Err(AppError::InvalidCharset),
        };

        let length = match fields.get("length") {
            None | Some(Value::Null) => None,
            Some(v) => Some(v.as_i64().ok_or(AppError::InvalidLength)?),
        };

        Ok(Self {
            kind,
            charset,
            length,
        })
    }
}

/// Validated generation parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationOptions {
    /// Generation algorithm.
    pub kind: GenerationKind,
    /// Charset; only read by `CustomCharset`.
    pub charset: Option<String>,
    /// Number of symbols to produce; ignored by `Guid`.
    pub length: usize,
}

impl GenerationOptions {
    /// Create options for a kind and length with no charset.
    #[must_use]
    pub const fn new(kind: GenerationKind, length: usize) -> Self {
        Self {
            kind,
            charset: None,
            length,
        }
    }

    /// Set the charset.
    #[must_use]
    pub fn with_charset(mut self, charset: impl Into<String>) -> Self {
        self.charset = Some(charset.into());
        self
    }
}
