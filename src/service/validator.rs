//! Option normalization.
//!
//! Turns caller-supplied fields into `GenerationOptions`. Checks run in a
//! fixed order: length, then kind, then charset.

use rand::Rng;

use crate::domain::{GenerationKind, GenerationOptions, RawOptions};
use crate::error::GenerateError;
use crate::service::engine::{self, MAX_LENGTH, MIN_LENGTH};

/// Validate raw options and fill in defaults.
///
/// A missing length is drawn uniformly from `[MIN_LENGTH, MAX_LENGTH]` on
/// every call.
///
/// # Errors
///
/// Returns `InvalidLength`, `InvalidType` or `InvalidCharset`, in that order
/// of precedence.
pub fn normalize(raw: &RawOptions) -> Result<GenerationOptions, GenerateError> {
    let length = match raw.length {
        Some(length) => usize::try_from(length)
            .ok()
            .filter(|l| (MIN_LENGTH..=MAX_LENGTH).contains(l))
            .ok_or(GenerateError::InvalidLength)?,
        None => rand::rng().random_range(MIN_LENGTH..=MAX_LENGTH),
    };

    let kind: GenerationKind = raw.kind.as_deref().unwrap_or_default().parse()?;

    if kind == GenerationKind::CustomCharset {
        let charset = raw.charset.as_deref().unwrap_or_default();
        if engine::reduce_to_unique(charset).is_empty() {
            return Err(GenerateError::InvalidCharset);
        }
    }

    Ok(GenerationOptions {
        kind,
        charset: raw.charset.clone(),
        length,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_explicit_length_kept() {
        let options = normalize(&RawOptions::new("text").with_length(17)).unwrap();
        assert_eq!(options.kind, GenerationKind::Text);
        assert_eq!(options.length, 17);
    }

    #[test]
    fn test_missing_length_in_range() {
        for _ in 0..200 {
            let options = normalize(&RawOptions::new("alphanumeric")).unwrap();
            assert!((MIN_LENGTH..=MAX_LENGTH).contains(&options.length));
        }
    }

    #[test]
    fn test_length_bounds() {
        assert!(normalize(&RawOptions::new("text").with_length(1)).is_ok());
        assert!(normalize(&RawOptions::new("text").with_length(256)).is_ok());
        for length in [0, -1, 257, i64::MAX, i64::MIN] {
            assert_eq!(
                normalize(&RawOptions::new("text").with_length(length)),
                Err(GenerateError::InvalidLength)
            );
        }
    }

    #[test]
    fn test_length_checked_before_kind() {
        assert_eq!(
            normalize(&RawOptions::new("bogus").with_length(0)),
            Err(GenerateError::InvalidLength)
        );
        assert_eq!(
            normalize(&RawOptions::new("guid").with_length(300)),
            Err(GenerateError::InvalidLength)
        );
        assert_eq!(
            normalize(&RawOptions::new("specified").with_length(999)),
            Err(GenerateError::InvalidLength)
        );
    }

    #[test]
    fn test_invalid_type() {
        assert_eq!(
            normalize(&RawOptions::new("0")),
            Err(GenerateError::InvalidType)
        );
        assert_eq!(
            normalize(&RawOptions::default()),
            Err(GenerateError::InvalidType)
        );
    }

    #[test]
    fn test_custom_charset_required() {
        assert_eq!(
            normalize(&RawOptions::new("custom-charset")),
            Err(GenerateError::InvalidCharset)
        );
        assert_eq!(
            normalize(&RawOptions::new("custom-charset").with_charset("")),
            Err(GenerateError::InvalidCharset)
        );
        assert!(normalize(&RawOptions::new("custom-charset").with_charset(" ")).is_ok());
    }

    #[test]
    fn test_charset_passed_through_for_other_kinds() {
        let options = normalize(&RawOptions::new("number").with_charset("")).unwrap();
        assert_eq!(options.kind, GenerationKind::Numeric);
        assert_eq!(options.charset.as_deref(), Some(""));
    }
}
