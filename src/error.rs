//! Error types for both halves of the codec contract
//!
//! This module defines the leaf error enums shared across the crate
//! ([`RangeError`], [`WidthError`], [`HexError`]) and the two top-level
//! types every codec reports through: [`EncodeError`] for the value-to-bits
//! direction and [`DecodeError`] for the bits-to-value direction.
//!
//! All failures are values; nothing in this crate lets an error escape as
//! unwinding visible to the caller. A decode failure always echoes the bits
//! at the point of failure in [`DecodeError::remaining`], to aid debugging.

use std::error::Error;
use std::fmt::{Debug, Display, Formatter, Result};

use crate::bits::Bits;

/// Enumerated error type for integer values that do not fit the bit-width
/// declared by their codec.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum RangeError {
    /// Unsigned value at or above `2^width`
    UnsignedOverflow { value: u64, width: usize },
    /// Signed value above `2^(width-1) - 1`
    SignedOverflow { value: i64, width: usize },
    /// Signed value below `-2^(width-1)`
    SignedUnderflow { value: i64, width: usize },
}

impl Display for RangeError {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        match *self {
            RangeError::UnsignedOverflow { value, width } => {
                write!(f, "value {value} does not fit in {width} unsigned bits")
            }
            RangeError::SignedOverflow { value, width } => {
                write!(
                    f,
                    "value {value} exceeds the maximum of the signed {width}-bit range"
                )
            }
            RangeError::SignedUnderflow { value, width } => {
                write!(
                    f,
                    "value {value} falls below the minimum of the signed {width}-bit range"
                )
            }
        }
    }
}

impl Error for RangeError {}

/// Enumerated error type for bit-sequences whose length violates a
/// requirement imposed by a codec.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum WidthError {
    /// Requirement of a precise bit-length not satisfied
    WrongWidth { exact: usize, actual: usize },
    /// Requirement of divisibility into fixed-size groups not satisfied
    Indivisible { group: usize, actual: usize },
}

impl Display for WidthError {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        match *self {
            WidthError::WrongWidth { exact, actual } => {
                write!(f, "{actual}-bit value violated requirement of {exact} bits")
            }
            WidthError::Indivisible { group, actual } => {
                write!(
                    f,
                    "bit-length {actual} is not a multiple of the {group}-bit group size"
                )
            }
        }
    }
}

impl Error for WidthError {}

/// Error type representing all possible conditions for invalidity
/// encountered when attempting to parse a string as a series of hex-encoded
/// bytes.
#[derive(Clone, PartialEq, Eq)]
pub enum HexError {
    /// Error case for odd-length strings
    OddParity(String),
    /// Error case for strings containing non-hex characters,
    /// i.e. anything not in `[0-9a-fA-F]`.
    NonHex(String),
}

impl Debug for HexError {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        match self {
            Self::OddParity(invalid) => {
                write!(f, "non-even length-parity for string `{invalid}`")
            }
            Self::NonHex(invalid) => {
                write!(f, "non-hex character found in string `{invalid}`")
            }
        }
    }
}

impl Display for HexError {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        match self {
            Self::OddParity(_) => write!(f, "hex-conversion failed on odd-length string"),
            Self::NonHex(_) => write!(f, "hex-conversion failed on non-hex character"),
        }
    }
}

impl Error for HexError {}

/// Enumeration type over all errors that may be produced by the encoding
/// half of a codec.
#[derive(Clone, PartialEq, Debug)]
pub enum EncodeError {
    /// Integer value outside the declared bit-width
    Range(RangeError),
    /// Bit-sequence payload of the wrong length or grouping
    Width(WidthError),
    /// Value rejected by an exact-match codec, a predicate, or a mapping;
    /// the message includes a rendering of the offending value
    Rejected(String),
    /// Failure raised on purpose, carrying a caller-supplied message
    Custom(String),
    /// A user-supplied function terminated abnormally while encoding
    Fault,
}

impl From<RangeError> for EncodeError {
    fn from(err: RangeError) -> Self {
        Self::Range(err)
    }
}

impl From<WidthError> for EncodeError {
    fn from(err: WidthError) -> Self {
        Self::Width(err)
    }
}

impl Display for EncodeError {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        match self {
            EncodeError::Range(err) => Display::fmt(err, f),
            EncodeError::Width(err) => Display::fmt(err, f),
            EncodeError::Rejected(message) | EncodeError::Custom(message) => f.write_str(message),
            EncodeError::Fault => f.write_str("Failed to encode"),
        }
    }
}

impl Error for EncodeError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            EncodeError::Range(err) => Some(err),
            EncodeError::Width(err) => Some(err),
            _ => None,
        }
    }
}

/// Type alias for the result of the encoding half of a codec
pub type EncodeResult = std::result::Result<Bits, EncodeError>;

/// Classes of failure that may be produced by the decoding half of a codec.
#[derive(Clone, PartialEq, Debug)]
pub enum DecodeErrorKind {
    /// A fixed-width read requested more bits than the input holds
    Incomplete { needed: usize, available: usize },
    /// The input does not begin with an expected constant bit-pattern
    Mismatch { expected: Bits },
    /// Bit-sequence of the wrong length or grouping
    Width(WidthError),
    /// Decoded value rejected by a predicate or a mapping
    Rejected(String),
    /// Failure raised on purpose, carrying a caller-supplied message
    Custom(String),
    /// A user-supplied function terminated abnormally while decoding
    Fault,
}

impl Display for DecodeErrorKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        match self {
            DecodeErrorKind::Incomplete { needed, available } => {
                write!(
                    f,
                    "cannot consume {needed} bits ({available} bits available)"
                )
            }
            DecodeErrorKind::Mismatch { expected } => {
                write!(
                    f,
                    "input does not begin with the expected bit-pattern {expected:?}"
                )
            }
            DecodeErrorKind::Width(err) => Display::fmt(err, f),
            DecodeErrorKind::Rejected(message) | DecodeErrorKind::Custom(message) => {
                f.write_str(message)
            }
            DecodeErrorKind::Fault => f.write_str("Failed to decode"),
        }
    }
}

/// Failure of the decoding half of a codec
///
/// Pairs the [`kind`](DecodeErrorKind) of failure with the bits that were
/// left at the point of failure, so that a caller can report or inspect the
/// offending input.
#[derive(Clone, PartialEq, Debug)]
pub struct DecodeError {
    pub kind: DecodeErrorKind,
    pub remaining: Bits,
}

impl DecodeError {
    /// Constructs a `DecodeError` from its parts
    #[must_use]
    pub fn new(kind: DecodeErrorKind, remaining: Bits) -> Self {
        Self { kind, remaining }
    }

    /// Shorthand for the insufficient-input case, taking `available` from
    /// the echoed remainder
    #[must_use]
    pub(crate) fn incomplete(needed: usize, remaining: Bits) -> Self {
        let available = remaining.len();
        Self::new(DecodeErrorKind::Incomplete { needed, available }, remaining)
    }

    /// Replaces the echoed remainder, keeping the kind
    #[must_use]
    pub(crate) fn with_remaining(self, remaining: Bits) -> Self {
        Self::new(self.kind, remaining)
    }
}

impl Display for DecodeError {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        Display::fmt(&self.kind, f)
    }
}

impl Error for DecodeError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match &self.kind {
            DecodeErrorKind::Width(err) => Some(err),
            _ => None,
        }
    }
}

/// Type alias for the result of the decoding half of a codec: the decoded
/// value together with the unconsumed suffix of the input, or a
/// [`DecodeError`].
pub type DecodeResult<V> = std::result::Result<(V, Bits), DecodeError>;
