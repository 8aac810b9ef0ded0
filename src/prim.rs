//! Terminal codecs that touch the bit substrate directly

use std::fmt::Debug;

use crate::bits::Bits;
use crate::codec::Codec;
use crate::error::{DecodeError, DecodeErrorKind, EncodeError, WidthError};

/// Codec for a raw bit-sequence of exactly `width` bits.
///
/// Encoding accepts only a [`Bits`] payload of length `width`; decoding
/// consumes the leading `width` bits verbatim. `width == 0` is valid and
/// acts as the identity on the empty sequence.
pub fn bits(width: usize) -> Codec<Bits> {
    Codec::from_parts(
        move |payload: &Bits| {
            if payload.len() == width {
                Ok(payload.clone())
            } else {
                Err(WidthError::WrongWidth {
                    exact: width,
                    actual: payload.len(),
                }
                .into())
            }
        },
        move |input: Bits| match input.try_split_at(width) {
            Some((prefix, rest)) => Ok((prefix, rest)),
            None => Err(DecodeError::incomplete(width, input)),
        },
    )
}

/// Codec for a single raw bit; equivalent to `bits(1)`.
pub fn bit() -> Codec<Bits> {
    bits(1)
}

/// Codec for a raw run of `count` whole bytes; equivalent to
/// `bits(8 * count)`.
pub fn bytes(count: usize) -> Codec<Bits> {
    bits(count * 8)
}

/// Codec for a single raw byte; equivalent to `bytes(1)`.
pub fn byte() -> Codec<Bits> {
    bytes(1)
}

/// Codec for a `width`-bit unsigned big-endian integer.
///
/// Encoding rejects values at or above `2^width`; decoding consumes `width`
/// bits and never rejects a pattern.
///
/// # Panics
///
/// Panics at construction time if `width > 64`.
pub fn uint(width: usize) -> Codec<u64> {
    assert!(width <= 64, "uint width {width} exceeds the 64-bit limit");
    Codec::from_parts(
        move |value: &u64| Bits::from_uint(*value, width).map_err(EncodeError::from),
        move |input: Bits| match input.try_split_at(width) {
            Some((prefix, rest)) => Ok((prefix.to_u64(), rest)),
            None => Err(DecodeError::incomplete(width, input)),
        },
    )
}

/// Codec for a `width`-bit two's-complement signed big-endian integer.
///
/// Encoding rejects values outside `[-2^(width-1), 2^(width-1) - 1]`;
/// decoding consumes `width` bits and sign-extends from the leading bit.
///
/// # Panics
///
/// Panics at construction time unless `1 <= width <= 64`.
pub fn int(width: usize) -> Codec<i64> {
    assert!(
        (1..=64).contains(&width),
        "int width {width} outside the supported range 1..=64"
    );
    Codec::from_parts(
        move |value: &i64| Bits::from_int(*value, width).map_err(EncodeError::from),
        move |input: Bits| match input.try_split_at(width) {
            Some((prefix, rest)) => Ok((prefix.to_i64(), rest)),
            None => Err(DecodeError::incomplete(width, input)),
        },
    )
}

/// One-bit boolean codec: `true` is the bit `1`, `false` the bit `0`.
pub fn boolean() -> Codec<bool> {
    Codec::from_parts(
        |value: &bool| Ok(Bits::from_bit(*value)),
        |input: Bits| match input.try_split_at(1) {
            Some((prefix, rest)) => Ok((prefix.to_u64() == 1, rest)),
            None => Err(DecodeError::incomplete(1, input)),
        },
    )
}

/// Codec accepting exactly one value, serialized as a fixed bit-image.
///
/// Encoding accepts only `witness` and emits `image`; decoding requires the
/// input to begin with `image` and yields `witness`. On a failed match the
/// echoed remainder is the whole original input.
pub fn constant<V>(witness: V, image: Bits) -> Codec<V>
where
    V: PartialEq + Clone + Debug + Send + Sync + 'static,
{
    let dec_witness = witness.clone();
    let dec_image = image.clone();
    Codec::from_parts(
        move |value: &V| {
            if *value == witness {
                Ok(image.clone())
            } else {
                Err(EncodeError::Rejected(format!(
                    "value {value:?} does not match the expected constant {witness:?}"
                )))
            }
        },
        move |input: Bits| match input.try_split_at(dec_image.len()) {
            Some((prefix, rest)) if prefix == dec_image => Ok((dec_witness.clone(), rest)),
            _ => Err(DecodeError::new(
                DecodeErrorKind::Mismatch {
                    expected: dec_image.clone(),
                },
                input,
            )),
        },
    )
}

/// Zero-width codec for exactly one value.
///
/// Encoding accepts only `witness` and emits no bits; decoding always
/// succeeds, yields `witness`, and consumes nothing.
pub fn value<V>(witness: V) -> Codec<V>
where
    V: PartialEq + Clone + Debug + Send + Sync + 'static,
{
    constant(witness, Bits::new())
}

/// Zero-width codec for the empty list.
pub fn empty<T>() -> Codec<Vec<T>>
where
    T: PartialEq + Clone + Debug + Send + Sync + 'static,
{
    value(Vec::new())
}

/// Zero-width codec for the absent value `None`.
pub fn nothing<V>() -> Codec<Option<V>>
where
    V: PartialEq + Clone + Debug + Send + Sync + 'static,
{
    value(None)
}

/// Codec that fails in both directions with the same message.
pub fn fail<V: 'static>(message: &str) -> Codec<V> {
    fail_with(message, message)
}

/// Codec that fails in both directions, with separate messages per
/// direction.
pub fn fail_with<V: 'static>(encode_message: &str, decode_message: &str) -> Codec<V> {
    let enc_message = encode_message.to_owned();
    let dec_message = decode_message.to_owned();
    Codec::from_parts(
        move |_: &V| Err(EncodeError::Custom(enc_message.clone())),
        move |input: Bits| {
            Err(DecodeError::new(
                DecodeErrorKind::Custom(dec_message.clone()),
                input,
            ))
        },
    )
}

/// Zero-width codec reporting whether any input is left.
///
/// Encoding emits no bits for either payload; decoding yields `true` when
/// the input is non-empty and `false` otherwise, consuming nothing. This is
/// the gate that drives [`list`](crate::seq::list) and
/// [`done`](crate::bind::done).
pub fn bits_remaining() -> Codec<bool> {
    Codec::from_parts(
        |_: &bool| Ok(Bits::new()),
        |input: Bits| {
            let non_empty = !input.is_empty();
            Ok((non_empty, input))
        },
    )
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::hex;

    #[test]
    fn raw_bits_roundtrip() {
        let three = bits(3);
        let payload = Bits::from_uint(0b101, 3).unwrap();
        let image = three.encode(&payload).unwrap();
        assert_eq!(image, payload);
        let (back, rest) = three.decode(Bits::from_bytes(&[0b1010_0000])).unwrap();
        assert_eq!(back, payload);
        assert_eq!(rest.len(), 5);
    }

    #[test]
    fn raw_bits_width_checks() {
        let three = bits(3);
        assert_eq!(
            three.encode(&Bits::zeros(4)),
            Err(EncodeError::Width(WidthError::WrongWidth {
                exact: 3,
                actual: 4
            }))
        );
        let short = Bits::zeros(2);
        let failure = three.decode(short.clone()).unwrap_err();
        assert_eq!(
            failure.kind,
            DecodeErrorKind::Incomplete {
                needed: 3,
                available: 2
            }
        );
        assert_eq!(failure.remaining, short);
    }

    #[test]
    fn zero_width_bits_is_identity() {
        let nothing_wide = bits(0);
        let input = hex!("ff");
        let (prefix, rest) = nothing_wide.decode(input.clone()).unwrap();
        assert!(prefix.is_empty());
        assert_eq!(rest, input);
        assert_eq!(nothing_wide.encode(&Bits::new()).unwrap(), Bits::new());
    }

    #[test]
    fn uint_edges() {
        let eight = uint(8);
        assert_eq!(eight.encode(&255).unwrap(), hex!("ff"));
        assert_eq!(
            eight.encode(&256),
            Err(EncodeError::Range(
                crate::error::RangeError::UnsignedOverflow {
                    value: 256,
                    width: 8
                }
            ))
        );
        let (value, rest) = eight.decode(hex!("c602")).unwrap();
        assert_eq!(value, 198);
        assert_eq!(rest, hex!("02"));
    }

    #[test]
    fn int_edges() {
        let eight = int(8);
        assert_eq!(eight.encode(&-128).unwrap(), hex!("80"));
        assert_eq!(eight.encode(&127).unwrap(), hex!("7f"));
        assert!(eight.encode(&128).is_err());
        assert!(eight.encode(&-129).is_err());
        let (value, rest) = eight.decode(hex!("ff")).unwrap();
        assert_eq!(value, -1);
        assert!(rest.is_empty());
    }

    #[test]
    fn boolean_images() {
        let flag = boolean();
        assert_eq!(flag.encode(&true).unwrap(), Bits::from_bit(true));
        assert_eq!(flag.encode(&false).unwrap(), Bits::from_bit(false));
        let (value, rest) = flag.decode(Bits::from_bit(true)).unwrap();
        assert!(value && rest.is_empty());
    }

    #[test]
    fn constant_matches_exactly() {
        let magic = constant("magic", hex!("cafe"));
        assert_eq!(magic.encode(&"magic").unwrap(), hex!("cafe"));
        assert!(matches!(
            magic.encode(&"other"),
            Err(EncodeError::Rejected(_))
        ));
        let (value, rest) = magic.decode(hex!("cafe01")).unwrap();
        assert_eq!(value, "magic");
        assert_eq!(rest, hex!("01"));
        let wrong = hex!("beef");
        let failure = magic.decode(wrong.clone()).unwrap_err();
        assert_eq!(failure.remaining, wrong);
        assert!(matches!(failure.kind, DecodeErrorKind::Mismatch { .. }));
    }

    #[test]
    fn zero_width_sentinels() {
        let unit = value(42u64);
        assert_eq!(unit.encode(&42).unwrap(), Bits::new());
        let (v, rest) = unit.decode(hex!("aa")).unwrap();
        assert_eq!(v, 42);
        assert_eq!(rest, hex!("aa"));

        let none: Codec<Option<u64>> = nothing();
        assert_eq!(none.encode(&None).unwrap(), Bits::new());
        assert!(none.encode(&Some(1)).is_err());

        let no_items: Codec<Vec<u64>> = empty();
        assert_eq!(no_items.encode(&vec![]).unwrap(), Bits::new());
        assert!(no_items.encode(&vec![1]).is_err());
    }

    #[test]
    fn fail_fails_both_ways() {
        let never: Codec<u64> = fail_with("enc", "dec");
        assert_eq!(never.encode(&0), Err(EncodeError::Custom("enc".into())));
        let failure = never.decode(hex!("00")).unwrap_err();
        assert_eq!(failure.kind, DecodeErrorKind::Custom("dec".into()));
        assert_eq!(failure.remaining, hex!("00"));
    }

    #[test]
    fn remaining_flag_consumes_nothing() {
        let gate = bits_remaining();
        assert_eq!(gate.encode(&true).unwrap(), Bits::new());
        assert_eq!(gate.encode(&false).unwrap(), Bits::new());
        let (flag, rest) = gate.decode(hex!("01")).unwrap();
        assert!(flag);
        assert_eq!(rest, hex!("01"));
        let (flag, rest) = gate.decode(Bits::new()).unwrap();
        assert!(!flag && rest.is_empty());
    }
}
