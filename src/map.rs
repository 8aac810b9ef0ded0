//! Functorial payload transformations
//!
//! [`convert`] relabels a codec's payload type through a pair of mutually
//! inverse functions; [`mapping`] is its dictionary-driven cousin with a
//! precomputed inverse; [`map_list`] and [`reverse`] lift both patterns
//! over list payloads. None of these touch the serialized form.

use std::collections::HashMap;
use std::fmt::Debug;
use std::hash::Hash;
use std::sync::Arc;

use crate::bits::Bits;
use crate::codec::{guard_decode, guard_encode, Codec};
use crate::error::{DecodeError, DecodeErrorKind, EncodeError};

/// Relabels a codec's payload through `to` (after decode) and `from`
/// (before encode).
///
/// `to` and `from` must be mutual inverses on the domain actually used;
/// this is the caller's contract and cannot be checked here. Both run
/// inside the fault guard, so an abnormal termination surfaces as an `Err`.
pub fn convert<A, V>(
    inner: Codec<A>,
    to: impl Fn(A) -> V + Send + Sync + 'static,
    from: impl Fn(&V) -> A + Send + Sync + 'static,
) -> Codec<V>
where
    A: 'static,
    V: 'static,
{
    let enc_inner = inner.clone();
    Codec::from_parts(
        move |value: &V| {
            let backing = guard_encode(|| from(value))?;
            enc_inner.encode(&backing)
        },
        move |input: Bits| {
            let checkpoint = input.clone();
            let (raw, rest) = inner.decode(input)?;
            let value = guard_decode(|| to(raw), &checkpoint)?;
            Ok((value, rest))
        },
    )
}

/// Dictionary-driven [`convert`] between a codec's payload and a mapped
/// value.
///
/// Decoding looks the decoded payload up as a key of `table`; encoding uses
/// the inverse table, which is computed once at construction. A decoded
/// payload outside the key set, or a value outside the image, is rejected.
///
/// # Panics
///
/// Panics at construction time if `table` is not injective: a non-invertible
/// mapping can never satisfy the round-trip law.
pub fn mapping<A, V>(inner: Codec<A>, table: HashMap<A, V>) -> Codec<V>
where
    A: Eq + Hash + Clone + Debug + Send + Sync + 'static,
    V: Eq + Hash + Clone + Debug + Send + Sync + 'static,
{
    let mut inverse: HashMap<V, A> = HashMap::with_capacity(table.len());
    for (key, image) in &table {
        if inverse.insert(image.clone(), key.clone()).is_some() {
            panic!("mapping table is not injective: duplicate image {image:?}");
        }
    }
    let forward = Arc::new(table);
    let inverse = Arc::new(inverse);
    let enc_inner = inner.clone();
    Codec::from_parts(
        move |value: &V| match inverse.get(value) {
            Some(key) => enc_inner.encode(key),
            None => Err(EncodeError::Rejected(format!(
                "value {value:?} is not in the image of the mapping"
            ))),
        },
        move |input: Bits| {
            let checkpoint = input.clone();
            let (key, rest) = inner.decode(input)?;
            match forward.get(&key) {
                Some(image) => Ok((image.clone(), rest)),
                None => Err(DecodeError::new(
                    DecodeErrorKind::Rejected(format!(
                        "decoded value {key:?} is not a key of the mapping"
                    )),
                    checkpoint,
                )),
            }
        },
    )
}

/// Applies [`convert`] element-wise over a list payload.
pub fn map_list<A, V>(
    inner: Codec<Vec<A>>,
    to: impl Fn(A) -> V + Send + Sync + 'static,
    from: impl Fn(&V) -> A + Send + Sync + 'static,
) -> Codec<Vec<V>>
where
    A: 'static,
    V: 'static,
{
    convert(
        inner,
        move |items: Vec<A>| items.into_iter().map(|item| to(item)).collect(),
        move |items: &Vec<V>| items.iter().map(|item| from(item)).collect(),
    )
}

/// Reverses a list payload in both directions.
pub fn reverse<T>(inner: Codec<Vec<T>>) -> Codec<Vec<T>>
where
    T: Clone + 'static,
{
    convert(
        inner,
        |mut items: Vec<T>| {
            items.reverse();
            items
        },
        |items: &Vec<T>| items.iter().rev().cloned().collect(),
    )
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::hex;
    use crate::prim::uint;
    use crate::seq::list;

    #[test]
    fn convert_relabels_the_payload() {
        // Excess-1 representation of a counter.
        let counter = convert(uint(8), |raw: u64| raw + 1, |value: &u64| value - 1);
        assert_eq!(counter.encode(&1).unwrap(), hex!("00"));
        let (value, rest) = counter.decode(hex!("09")).unwrap();
        assert_eq!(value, 10);
        assert!(rest.is_empty());
    }

    #[test]
    fn convert_with_identity_is_inert() {
        let plain = uint(8);
        let relabeled = convert(plain.clone(), |raw| raw, |value: &u64| *value);
        for value in [0u64, 1, 127, 255] {
            assert_eq!(relabeled.encode(&value), plain.encode(&value));
        }
        assert_eq!(
            relabeled.decode(hex!("2a")).unwrap(),
            plain.decode(hex!("2a")).unwrap()
        );
    }

    #[test]
    fn convert_guards_faulting_converters() {
        let brittle = convert(
            uint(8),
            |raw: u64| raw.checked_sub(10).expect("underflow"),
            |value: &u64| value + 10,
        );
        let input = hex!("01");
        let failure = brittle.decode(input.clone()).unwrap_err();
        assert_eq!(failure.kind, DecodeErrorKind::Fault);
        assert_eq!(failure.remaining, input);
    }

    #[test]
    fn mapping_uses_the_precomputed_inverse() {
        let table: HashMap<u64, char> = [(0, 'n'), (1, 'e'), (2, 's'), (3, 'w')].into();
        let compass = mapping(uint(2), table);
        assert_eq!(compass.encode(&'s').unwrap(), crate::bits![1, 0]);
        let (value, rest) = compass.decode(crate::bits![0, 1]).unwrap();
        assert_eq!(value, 'e');
        assert!(rest.is_empty());
        assert!(matches!(
            compass.encode(&'x'),
            Err(EncodeError::Rejected(_))
        ));
    }

    #[test]
    fn mapping_rejects_unknown_keys() {
        let table: HashMap<u64, char> = [(0, 'a'), (1, 'b')].into();
        let narrow = mapping(uint(8), table);
        let input = hex!("05");
        let failure = narrow.decode(input.clone()).unwrap_err();
        assert!(matches!(failure.kind, DecodeErrorKind::Rejected(_)));
        assert_eq!(failure.remaining, input);
    }

    #[test]
    #[should_panic(expected = "not injective")]
    fn mapping_requires_injectivity() {
        let table: HashMap<u64, char> = [(0, 'a'), (1, 'a')].into();
        let _ = mapping(uint(8), table);
    }

    #[test]
    fn map_list_applies_elementwise() {
        let shifted = map_list(list(uint(8)), |raw: u64| raw + 1, |value: &u64| value - 1);
        assert_eq!(shifted.encode(&vec![1, 2, 3]).unwrap(), hex!("000102"));
        let (values, _) = shifted.decode(hex!("0a0b")).unwrap();
        assert_eq!(values, vec![11, 12]);
    }

    #[test]
    fn reverse_is_an_involution() {
        let backwards = reverse(list(uint(8)));
        assert_eq!(backwards.encode(&vec![1, 2, 3]).unwrap(), hex!("030201"));
        let (values, _) = backwards.decode(hex!("030201")).unwrap();
        assert_eq!(values, vec![1, 2, 3]);
    }
}
