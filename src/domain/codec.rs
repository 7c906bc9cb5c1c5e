//! Salted, reversible short-code codec.
//!
//! Maps a link identifier to a short alphanumeric code and back using
//! [`harsh`], a hashids implementation: given the same salt, minimum length
//! and alphabet, the same identifier always produces the same code.
//!
//! # Properties
//!
//! - `decode(encode(x)) == x` for every `u64`
//! - `encode` is injective, so code uniqueness reduces to identifier uniqueness
//! - any string that is not exactly the encoding of one number under this
//!   configuration fails to decode (other salts, other minimum lengths,
//!   foreign characters, padding tampering, multi-number codes)
//! - output is never shorter than the configured minimum length
//!
//! # Example
//!
//! ```
//! use link_shortener::domain::codec::Codec;
//!
//! let codec = Codec::new("abc", 5).unwrap();
//! let code = codec.encode(1);
//! assert_eq!(code, "n4lm9");
//! assert_eq!(codec.decode(&code).unwrap(), 1);
//! assert!(codec.decode("zzzzz").is_err());
//! ```

use std::fmt;

use harsh::Harsh;
use thiserror::Error;

/// Default code alphabet.
pub const DEFAULT_ALPHABET: &str = "abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ1234567890";

const MIN_ALPHABET_LENGTH: usize = 16;

/// Errors produced while building or using a [`Codec`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CodecError {
    #[error("alphabet must contain at least {MIN_ALPHABET_LENGTH} unique characters, got {0}")]
    AlphabetTooShort(usize),

    #[error("alphabet contains duplicate character '{0}'")]
    DuplicateCharacter(char),

    #[error("alphabet must not contain whitespace")]
    WhitespaceInAlphabet,

    #[error("alphabet must be ASCII, found '{0}'")]
    NonAsciiCharacter(char),

    #[error("invalid codec configuration: {0}")]
    Build(String),

    #[error("code is malformed")]
    Malformed,

    #[error("code was not produced by this codec")]
    Mismatch,
}

/// Immutable codec configuration.
///
/// Holds no mutable state, so a single instance can be shared across threads.
pub struct Codec {
    harsh: Harsh,
    min_length: usize,
}

impl fmt::Debug for Codec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Codec")
            .field("min_length", &self.min_length)
            .finish_non_exhaustive()
    }
}

impl Codec {
    /// Creates a codec over [`DEFAULT_ALPHABET`].
    ///
    /// # Errors
    ///
    /// Never fails for the default alphabet; the `Result` mirrors
    /// [`Self::with_alphabet`].
    pub fn new(salt: &str, min_length: usize) -> Result<Self, CodecError> {
        Self::with_alphabet(salt, min_length, DEFAULT_ALPHABET)
    }

    /// Creates a codec over a custom alphabet.
    ///
    /// # Errors
    ///
    /// - [`CodecError::NonAsciiCharacter`] for characters outside ASCII
    /// - [`CodecError::DuplicateCharacter`] if a character repeats
    /// - [`CodecError::WhitespaceInAlphabet`] if the alphabet contains whitespace
    /// - [`CodecError::AlphabetTooShort`] if fewer than 16 characters are given
    pub fn with_alphabet(
        salt: &str,
        min_length: usize,
        alphabet: &str,
    ) -> Result<Self, CodecError> {
        validate_alphabet(alphabet)?;

        let harsh = Harsh::builder()
            .salt(salt)
            .length(min_length)
            .alphabet(alphabet)
            .build()
            .map_err(|e| CodecError::Build(format!("{e:?}")))?;

        Ok(Self { harsh, min_length })
    }

    /// Returns the configured minimum code length.
    pub fn min_length(&self) -> usize {
        self.min_length
    }

    /// Encodes an identifier into its short code.
    pub fn encode(&self, id: u64) -> String {
        self.harsh.encode(&[id])
    }

    /// Decodes a short code back into its identifier.
    ///
    /// # Errors
    ///
    /// - [`CodecError::Malformed`] for empty input, foreign characters,
    ///   values beyond `u64` or codes carrying other than exactly one number
    /// - [`CodecError::Mismatch`] if the code is not the canonical encoding of
    ///   its number under this configuration
    pub fn decode(&self, code: &str) -> Result<u64, CodecError> {
        if code.is_empty() {
            return Err(CodecError::Malformed);
        }

        let numbers = self
            .harsh
            .decode(code)
            .map_err(|_| CodecError::Malformed)?;
        let [id] = numbers.as_slice() else {
            return Err(CodecError::Malformed);
        };

        if self.encode(*id) != code {
            return Err(CodecError::Mismatch);
        }

        Ok(*id)
    }
}

fn validate_alphabet(alphabet: &str) -> Result<(), CodecError> {
    let mut seen: Vec<char> = Vec::with_capacity(alphabet.len());
    for c in alphabet.chars() {
        if !c.is_ascii() {
            return Err(CodecError::NonAsciiCharacter(c));
        }
        if c.is_whitespace() {
            return Err(CodecError::WhitespaceInAlphabet);
        }
        if seen.contains(&c) {
            return Err(CodecError::DuplicateCharacter(c));
        }
        seen.push(c);
    }

    if seen.len() < MIN_ALPHABET_LENGTH {
        return Err(CodecError::AlphabetTooShort(seen.len()));
    }

    Ok(())
}
