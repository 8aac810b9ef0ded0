//! Core of the bidirectional codec contract
//!
//! This module defines [`Codec<V>`], the pairing of an encoding function and
//! a decoding function over a single payload type, which every constructor
//! and combinator in this crate produces and consumes.
//!
//! A codec is a plain value: it carries no state between invocations, two
//! separate decodes of the same bits with the same codec produce identical
//! results, and cloning is a reference-count bump. Codecs are `Send + Sync`
//! and may be stored in statics (see the re-exported
//! [`lazy_static!`](crate::lazy_static) macro) and shared freely across
//! threads.
//!
//! # The round-trip contract
//!
//! For every codec `c` and every value `v` accepted by `c.encode`, decoding
//! the produced bits with `c` yields `v` and an empty remainder; and for
//! every input from which `c.decode` yields `(v, r)`, re-encoding `v`
//! reproduces exactly the consumed prefix. Every combinator in this crate
//! preserves that law when its arguments satisfy it; codecs built from user
//! functions via [`Codec::create`] must preserve it themselves.
//!
//! # The safety net
//!
//! Functions supplied by users, that is, the two halves given to
//! [`Codec::create`] and the converters and predicates accepted by
//! `convert`, `then`, `ensure`, `refute`, and `mapping`, are wrapped so
//! that an abnormal termination surfaces as an [`EncodeError::Fault`] or a
//! [`DecodeErrorKind::Fault`] result rather than unwinding through the
//! caller. Library-provided codecs report their failures as explicit `Err`
//! values and bypass the catch.

use std::fmt::{self, Debug, Formatter};
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::Arc;

use crate::bits::Bits;
use crate::error::{DecodeError, DecodeErrorKind, DecodeResult, EncodeError, EncodeResult};

type EncodeFn<V> = dyn Fn(&V) -> EncodeResult + Send + Sync;
type DecodeFn<V> = dyn Fn(Bits) -> DecodeResult<V> + Send + Sync;

/// A bidirectional codec over values of type `V`
///
/// See the [module documentation](self) for the contract both halves obey.
pub struct Codec<V> {
    enc: Arc<EncodeFn<V>>,
    dec: Arc<DecodeFn<V>>,
}

impl<V> Clone for Codec<V> {
    fn clone(&self) -> Self {
        Self {
            enc: Arc::clone(&self.enc),
            dec: Arc::clone(&self.dec),
        }
    }
}

impl<V> Debug for Codec<V> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "Codec<{}>", std::any::type_name::<V>())
    }
}

impl<V> Codec<V> {
    /// Constructs a codec from trusted halves that already report every
    /// failure as an `Err` value.
    ///
    /// This is the constructor used by the combinators in this crate; it
    /// installs no safety net.
    pub(crate) fn from_parts(
        enc: impl Fn(&V) -> EncodeResult + Send + Sync + 'static,
        dec: impl Fn(Bits) -> DecodeResult<V> + Send + Sync + 'static,
    ) -> Self {
        Self {
            enc: Arc::new(enc),
            dec: Arc::new(dec),
        }
    }

    /// Constructs a codec from a user-supplied encoding and decoding
    /// function.
    ///
    /// Both halves run inside a safety net: if either terminates abnormally,
    /// the fault is reflected as an `Err` ("Failed to encode" or "Failed to
    /// decode") instead of unwinding. The caller remains responsible for the
    /// round-trip law; this crate cannot check that arbitrary halves are
    /// mutual inverses.
    pub fn create(
        encode: impl Fn(&V) -> EncodeResult + Send + Sync + 'static,
        decode: impl Fn(Bits) -> DecodeResult<V> + Send + Sync + 'static,
    ) -> Self {
        Self::from_parts(
            move |value| match catch_unwind(AssertUnwindSafe(|| encode(value))) {
                Ok(result) => result,
                Err(_) => Err(EncodeError::Fault),
            },
            move |input| {
                let checkpoint = input.clone();
                match catch_unwind(AssertUnwindSafe(|| decode(input))) {
                    Ok(result) => result,
                    Err(_) => Err(DecodeError::new(DecodeErrorKind::Fault, checkpoint)),
                }
            },
        )
    }

    /// Encodes `value` into its serialized bit-sequence.
    #[inline]
    pub fn encode(&self, value: &V) -> EncodeResult {
        (self.enc)(value)
    }

    /// Decodes a value from the front of `input`, returning it together
    /// with the unconsumed suffix.
    #[inline]
    pub fn decode(&self, input: Bits) -> DecodeResult<V> {
        (self.dec)(input)
    }
}

/// Runs a user-supplied function on the encode path, converting an abnormal
/// termination into [`EncodeError::Fault`].
pub(crate) fn guard_encode<T>(f: impl FnOnce() -> T) -> Result<T, EncodeError> {
    catch_unwind(AssertUnwindSafe(f)).map_err(|_| EncodeError::Fault)
}

/// Runs a user-supplied function on the decode path, converting an abnormal
/// termination into a [`DecodeErrorKind::Fault`] that echoes `remaining`.
pub(crate) fn guard_decode<T>(
    f: impl FnOnce() -> T,
    remaining: &Bits,
) -> Result<T, DecodeError> {
    catch_unwind(AssertUnwindSafe(f))
        .map_err(|_| DecodeError::new(DecodeErrorKind::Fault, remaining.clone()))
}
