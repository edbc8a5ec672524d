//! Random value generation engine.
//!
//! Stateless: every call builds its own random source. Numeric and GUID
//! values come from an OS-seeded CSPRNG; alphabet sampling uses a fast
//! non-cryptographic generator.

use std::collections::HashSet;
use std::sync::LazyLock;

use rand::rngs::{SmallRng, StdRng};
use rand::{Rng, SeedableRng};
use uuid::{Builder, Uuid};

use crate::domain::{GenerationKind, GenerationOptions};
use crate::error::GenerateError;

/// Shortest value that can be requested.
pub const MIN_LENGTH: usize = 1;

/// Longest value that can be requested.
pub const MAX_LENGTH: usize = 256;

const LETTERS: &str = "qwertyuiopasdfghjklzxcvbnmQWERTYUIOPASDFGHJKLZXCVBNM";
const DIGITS: &str = "0123456789";

static TEXT_ALPHABET: LazyLock<Vec<char>> = LazyLock::new(|| LETTERS.chars().collect());

static ALPHANUMERIC_ALPHABET: LazyLock<Vec<char>> =
    LazyLock::new(|| LETTERS.chars().chain(DIGITS.chars()).collect());

/// Generate a value for validated options.
///
/// # Errors
///
/// Returns `InvalidLength` or `InvalidCharset` for options that bypassed
/// normalization, and `Entropy` if the secure source cannot be seeded.
pub fn generate(options: &GenerationOptions) -> Result<String, GenerateError> {
    if options.kind == GenerationKind::Guid {
        return generate_guid();
    }

    if !(MIN_LENGTH..=MAX_LENGTH).contains(&options.length) {
        return Err(GenerateError::InvalidLength);
    }

    match options.kind {
        GenerationKind::Text => Ok(sample_alphabet(&TEXT_ALPHABET, options.length)),
        GenerationKind::Alphanumeric => {
            Ok(sample_alphabet(&ALPHANUMERIC_ALPHABET, options.length))
        }
        GenerationKind::Numeric => generate_numeric(options.length),
        GenerationKind::CustomCharset => {
            let alphabet = reduce_to_unique(options.charset.as_deref().unwrap_or_default());
            if alphabet.is_empty() {
                return Err(GenerateError::InvalidCharset);
            }
            Ok(sample_alphabet(&alphabet, options.length))
        }
        GenerationKind::Guid => generate_guid(),
    }
}

/// Reduce a charset to its distinct code points.
///
/// The order of the result is unspecified.
#[must_use]
pub fn reduce_to_unique(charset: &str) -> Vec<char> {
    charset
        .chars()
        .collect::<HashSet<_>>()
        .into_iter()
        .collect()
}

/// Draw `length` symbols uniformly, with replacement.
fn sample_alphabet(alphabet: &[char], length: usize) -> String {
    let mut rng = SmallRng::from_rng(&mut rand::rng());

    (0..length)
        .map(|_| alphabet[rng.random_range(0..alphabet.len())])
        .collect()
}

/// Uniform over `[0, 10^length)`, zero-padded to `length` digits.
///
/// `length` independent uniform digits is exactly that distribution;
/// `random_range` rejection-samples so no digit is biased.
fn generate_numeric(length: usize) -> Result<String, GenerateError> {
    let mut rng = secure_rng()?;

    Ok((0..length)
        .map(|_| char::from(b'0' + rng.random_range(0..10u8)))
        .collect())
}

fn generate_guid() -> Result<String, GenerateError> {
    let bytes: [u8; 16] = secure_rng()?.random();
    let guid = Builder::from_random_bytes(bytes).into_uuid();

    Ok(guid
        .hyphenated()
        .encode_upper(&mut Uuid::encode_buffer())
        .to_string())
}

fn secure_rng() -> Result<StdRng, GenerateError> {
    StdRng::try_from_os_rng().map_err(|e| GenerateError::Entropy(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_in_alphabet(value: &str, alphabet: &str) {
        for c in value.chars() {
            assert!(alphabet.contains(c), "{c:?} not in {alphabet:?}");
        }
    }

    #[test]
    fn test_text() {
        for length in [1, 15, 50, 256] {
            let value = generate(&GenerationOptions::new(GenerationKind::Text, length)).unwrap();
            assert_eq!(value.chars().count(), length);
            assert_in_alphabet(&value, LETTERS);
        }
    }

    #[test]
    fn test_alphanumeric() {
        let alphabet = format!("{LETTERS}{DIGITS}");
        for length in [1, 50, 256] {
            let value =
                generate(&GenerationOptions::new(GenerationKind::Alphanumeric, length)).unwrap();
            assert_eq!(value.chars().count(), length);
            assert_in_alphabet(&value, &alphabet);
        }
    }

    #[test]
    fn test_numeric_length_and_digits() {
        for length in [1, 2, 3, 4, 5, 15, 45, 50, 100, 150, 256] {
            let value = generate(&GenerationOptions::new(GenerationKind::Numeric, length)).unwrap();
            assert_eq!(value.len(), length);
            assert!(value.bytes().all(|b| b.is_ascii_digit()));
        }
    }

    #[test]
    fn test_numeric_not_deterministic() {
        let options = GenerationOptions::new(GenerationKind::Numeric, 32);
        let first = generate(&options).unwrap();
        let differs = (0..10).any(|_| generate(&options).unwrap() != first);
        assert!(differs);
    }

    #[test]
    fn test_numeric_allows_leading_zero() {
        // P(no leading zero in 2000 draws) = 0.9^2000
        let options = GenerationOptions::new(GenerationKind::Numeric, 3);
        let seen_zero = (0..2000).any(|_| generate(&options).unwrap().starts_with('0'));
        assert!(seen_zero);
    }

    #[test]
    fn test_numeric_single_digit_covers_all() {
        let options = GenerationOptions::new(GenerationKind::Numeric, 1);
        let seen: HashSet<String> = (0..2000).map(|_| generate(&options).unwrap()).collect();
        assert_eq!(seen.len(), 10);
    }

    #[test]
    fn test_guid_shape_ignores_length_and_charset() {
        let options = GenerationOptions {
            kind: GenerationKind::Guid,
            charset: Some("xyz".to_string()),
            length: 45,
        };
        let value = generate(&options).unwrap();
        assert_eq!(value.len(), 36);
        assert_eq!(value, value.to_uppercase());

        let parsed = Uuid::parse_str(&value).unwrap();
        assert_eq!(parsed.get_version_num(), 4);

        let groups: Vec<usize> = value.split('-').map(str::len).collect();
        assert_eq!(groups, vec![8, 4, 4, 4, 12]);
    }

    #[test]
    fn test_custom_charset() {
        for charset in ["kavabanga", "банальность", "поле )))))", "ХЪ{}1029403o5i"] {
            let options = GenerationOptions::new(GenerationKind::CustomCharset, 50)
                .with_charset(charset);
            let value = generate(&options).unwrap();
            assert_eq!(value.chars().count(), 50);
            assert_in_alphabet(&value, charset);
        }
    }

    #[test]
    fn test_custom_charset_single_symbol() {
        let options =
            GenerationOptions::new(GenerationKind::CustomCharset, 20).with_charset("aaaaaaaa");
        assert_eq!(generate(&options).unwrap(), "a".repeat(20));
    }

    #[test]
    fn test_custom_charset_missing() {
        let options = GenerationOptions::new(GenerationKind::CustomCharset, 5);
        assert_eq!(generate(&options), Err(GenerateError::InvalidCharset));

        let options = GenerationOptions::new(GenerationKind::CustomCharset, 5).with_charset("");
        assert_eq!(generate(&options), Err(GenerateError::InvalidCharset));
    }

    #[test]
    fn test_length_rechecked() {
        let options = GenerationOptions::new(GenerationKind::Text, 0);
        assert_eq!(generate(&options), Err(GenerateError::InvalidLength));

        let options = GenerationOptions::new(GenerationKind::Numeric, MAX_LENGTH + 1);
        assert_eq!(generate(&options), Err(GenerateError::InvalidLength));
    }

    #[test]
    fn test_reduce_to_unique() {
        for input in [
            "test",
            "pohgfd",
            "aaaaaaaaaaaaaaa",
            "pyfxtybt",
            "банальность",
            "поле )))))",
            "ХЪ{}1029403o5i",
        ] {
            let once = reduce_to_unique(input);

            let distinct: HashSet<char> = once.iter().copied().collect();
            assert_eq!(distinct.len(), once.len(), "duplicates in {once:?}");
            assert!(input.chars().all(|c| distinct.contains(&c)));
            assert!(once.iter().all(|c| input.contains(*c)));

            let twice: HashSet<char> = reduce_to_unique(&once.iter().collect::<String>())
                .into_iter()
                .collect();
            assert_eq!(twice, distinct);
        }
    }

    #[test]
    fn test_reduce_preserves_whitespace() {
        let reduced: HashSet<char> = reduce_to_unique(" \t a ").into_iter().collect();
        assert_eq!(reduced, HashSet::from([' ', '\t', 'a']));
    }
}
