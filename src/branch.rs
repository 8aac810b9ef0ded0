//! Alternation and look-ahead
//!
//! The combinators in this module are the only points of local error
//! recovery in the algebra: [`fallback`] and its derivatives [`choice`] and
//! [`optional`] retry a second codec after the first fails, and [`peek`]
//! decodes without consuming. Everywhere else the first `Err` wins.

use std::fmt::Debug;

use crate::bits::Bits;
use crate::codec::Codec;
use crate::error::EncodeError;
use crate::prim::fail;

/// Codec that tries `preferred` and falls back to `alternative` on failure,
/// independently in each direction.
///
/// The remainder surfaced on success is the winner's; when both sides fail,
/// the second side's error is returned with the whole original input as the
/// echoed remainder.
pub fn fallback<V: 'static>(preferred: Codec<V>, alternative: Codec<V>) -> Codec<V> {
    let enc_preferred = preferred.clone();
    let enc_alternative = alternative.clone();
    Codec::from_parts(
        move |value: &V| {
            enc_preferred
                .encode(value)
                .or_else(|_| enc_alternative.encode(value))
        },
        move |input: Bits| match preferred.decode(input.clone()) {
            Ok(success) => Ok(success),
            Err(_) => match alternative.decode(input.clone()) {
                Ok(success) => Ok(success),
                Err(error) => Err(error.with_remaining(input)),
            },
        },
    )
}

/// Codec that tries each alternative in order.
///
/// Folds [`fallback`] right-to-left over the list, terminated by a codec
/// that always fails with `"None of the choices worked"`; an empty list is
/// therefore exactly that failure.
pub fn choice<V: 'static>(alternatives: Vec<Codec<V>>) -> Codec<V> {
    alternatives.into_iter().rev().fold(
        fail("None of the choices worked"),
        |accumulated, candidate| fallback(candidate, accumulated),
    )
}

/// Codec for an optional value: `fallback(inner, nothing())` with the
/// payload lifted into `Option`.
///
/// Decoding yields `None` (consuming nothing) whenever `inner` fails;
/// encoding `None` emits no bits. Encoding a `Some` that `inner` rejects
/// reports the second branch's rejection, per the fallback rule.
pub fn optional<V>(inner: Codec<V>) -> Codec<Option<V>>
where
    V: Debug + Send + Sync + 'static,
{
    let enc_inner = inner.clone();
    Codec::from_parts(
        move |value: &Option<V>| match value {
            Some(payload) => enc_inner.encode(payload).map_err(|_| {
                EncodeError::Rejected(format!(
                    "value {value:?} does not match the expected constant None"
                ))
            }),
            None => Ok(Bits::new()),
        },
        move |input: Bits| match inner.decode(input.clone()) {
            Ok((value, rest)) => Ok((Some(value), rest)),
            Err(_) => Ok((None, input)),
        },
    )
}

/// Codec that looks ahead without consuming.
///
/// Decoding runs `inner` but surfaces the whole original input as the
/// remainder; encoding emits no bits for any payload. Useful for dispatch
/// on upcoming content.
pub fn peek<V: 'static>(inner: Codec<V>) -> Codec<V> {
    Codec::from_parts(
        |_: &V| Ok(Bits::new()),
        move |input: Bits| match inner.decode(input.clone()) {
            Ok((value, _)) => Ok((value, input)),
            Err(error) => Err(error.with_remaining(input)),
        },
    )
}
