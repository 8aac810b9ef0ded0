//! Sequential dependency between codecs
//!
//! [`then`] is the monadic bind of the algebra: the codec for the body of a
//! message is chosen at runtime from an already-decoded prefix value. It is
//! what makes length-prefixed and tag-dispatched formats expressible, and
//! the post-condition guards [`ensure`], [`refute`], and the input-exhaustion
//! check [`done`] are all small instances of it.

use std::sync::Arc;

use crate::bits::Bits;
use crate::codec::{guard_decode, guard_encode, Codec};
use crate::error::{DecodeError, DecodeErrorKind, EncodeError};

/// Codec whose body depends on a decoded prefix.
///
/// Decoding first decodes a prefix value `a` with `prefix`, then decodes
/// the remainder with the codec `next(a)`. Encoding a final value `v`
/// recovers the prefix value as `back(v)`, encodes it, then encodes `v`
/// itself with `next(back(v))` and concatenates the two images.
///
/// `next` and `back` are treated as user code and run inside the fault
/// guard. The round-trip law holds only when
/// `next(back(v)).encode(v)` succeeds for every `v` the composite accepts;
/// that contract is the caller's to uphold.
pub fn then<A, V>(
    prefix: Codec<A>,
    next: impl Fn(&A) -> Codec<V> + Send + Sync + 'static,
    back: impl Fn(&V) -> A + Send + Sync + 'static,
) -> Codec<V>
where
    A: 'static,
    V: 'static,
{
    let next = Arc::new(next);
    let dec_next = Arc::clone(&next);
    let dec_prefix = prefix.clone();
    Codec::from_parts(
        move |value: &V| {
            let head_value = guard_encode(|| back(value))?;
            let head = prefix.encode(&head_value)?;
            let body_codec = guard_encode(|| next(&head_value))?;
            let body = body_codec.encode(value)?;
            Ok(head.concat(&body))
        },
        move |input: Bits| {
            let (head_value, rest) = dec_prefix.decode(input)?;
            let body_codec = guard_decode(|| dec_next(&head_value), &rest)?;
            body_codec.decode(rest)
        },
    )
}

/// Restricts a codec with a post-condition that must hold in both
/// directions.
///
/// Values failing `predicate` are rejected with `message`: on encode before
/// any bits are produced, on decode after `inner` has run, echoing the
/// whole original input. Behaves as
/// `then(inner, |a| if predicate(a) { value(a) } else { fail(message) }, id)`.
pub fn ensure<V: 'static>(
    inner: Codec<V>,
    predicate: impl Fn(&V) -> bool + Send + Sync + 'static,
    message: &str,
) -> Codec<V> {
    let predicate = Arc::new(predicate);
    let dec_predicate = Arc::clone(&predicate);
    let enc_message = message.to_owned();
    let dec_message = message.to_owned();
    let enc_inner = inner.clone();
    Codec::from_parts(
        move |value: &V| {
            if guard_encode(|| predicate(value))? {
                enc_inner.encode(value)
            } else {
                Err(EncodeError::Custom(enc_message.clone()))
            }
        },
        move |input: Bits| {
            let checkpoint = input.clone();
            let (value, rest) = inner.decode(input)?;
            if guard_decode(|| dec_predicate(&value), &checkpoint)? {
                Ok((value, rest))
            } else {
                Err(DecodeError::new(
                    DecodeErrorKind::Custom(dec_message.clone()),
                    checkpoint,
                ))
            }
        },
    )
}

/// Complement of [`ensure`]: rejects values for which `predicate` holds.
pub fn refute<V: 'static>(
    inner: Codec<V>,
    predicate: impl Fn(&V) -> bool + Send + Sync + 'static,
    message: &str,
) -> Codec<V> {
    ensure(inner, move |value| !predicate(value), message)
}

/// Requires `inner` to consume the input completely.
///
/// Decoding succeeds only when no bits remain after `inner`; otherwise it
/// fails with `"There was more to parse"`, echoing the unconsumed suffix.
/// Encoding is unchanged.
pub fn done<V: 'static>(inner: Codec<V>) -> Codec<V> {
    let enc_inner = inner.clone();
    Codec::from_parts(
        move |value: &V| enc_inner.encode(value),
        move |input: Bits| {
            let (value, rest) = inner.decode(input)?;
            if rest.is_empty() {
                Ok((value, rest))
            } else {
                Err(DecodeError::new(
                    DecodeErrorKind::Custom("There was more to parse".to_owned()),
                    rest,
                ))
            }
        },
    )
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::hex;
    use crate::prim::{bytes, uint};

    #[test]
    fn then_threads_the_prefix() {
        // A byte-length prefix followed by that many raw bytes.
        let framed = then(
            uint(8),
            |count: &u64| bytes(*count as usize),
            |payload: &Bits| (payload.len() / 8) as u64,
        );
        let payload = hex!("aabbcc");
        assert_eq!(framed.encode(&payload).unwrap(), hex!("03aabbcc"));
        let (value, rest) = framed.decode(hex!("03aabbccdd")).unwrap();
        assert_eq!(value, payload);
        assert_eq!(rest, hex!("dd"));
    }

    #[test]
    fn then_guards_user_functions() {
        let explosive = then(
            uint(8),
            |_: &u64| -> Codec<u64> { panic!("next blew up") },
            |value: &u64| *value,
        );
        let failure = explosive.decode(hex!("01")).unwrap_err();
        assert_eq!(failure.kind, DecodeErrorKind::Fault);
        assert!(failure.remaining.is_empty());
        assert_eq!(explosive.encode(&1), Err(EncodeError::Fault));
    }

    #[test]
    fn ensure_applies_in_both_directions() {
        let small = ensure(uint(8), |value| *value < 16, "value too large");
        assert_eq!(small.encode(&15).unwrap(), hex!("0f"));
        assert_eq!(
            small.encode(&16),
            Err(EncodeError::Custom("value too large".into()))
        );
        let input = hex!("ff");
        let failure = small.decode(input.clone()).unwrap_err();
        assert_eq!(failure.kind, DecodeErrorKind::Custom("value too large".into()));
        assert_eq!(failure.remaining, input);
        let (value, _) = small.decode(hex!("0a")).unwrap();
        assert_eq!(value, 10);
    }

    #[test]
    fn refute_is_the_complement() {
        let nonzero = refute(uint(8), |value| *value == 0, "zero is reserved");
        assert!(nonzero.encode(&0).is_err());
        assert_eq!(nonzero.encode(&1).unwrap(), hex!("01"));
        assert!(nonzero.decode(hex!("00")).is_err());
    }

    #[test]
    fn done_rejects_leftover_input() {
        let exactly_one = done(uint(8));
        let failure = exactly_one.decode(hex!("0a0b")).unwrap_err();
        assert_eq!(
            failure.kind,
            DecodeErrorKind::Custom("There was more to parse".into())
        );
        assert_eq!(failure.remaining, hex!("0b"));

        let (value, rest) = exactly_one.decode(hex!("0a")).unwrap();
        assert_eq!(value, 10);
        assert!(rest.is_empty());
        assert_eq!(exactly_one.encode(&10).unwrap(), hex!("0a"));
    }
}
