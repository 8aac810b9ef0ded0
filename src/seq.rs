//! List-shaped composition
//!
//! Codecs in this module serialize `Vec` payloads. The termination
//! strategies mirror the classic encodings: structural
//! ([`cons`]/[`append`]/[`sequence`]/[`list_of`]), flag-driven
//! ([`take_while`]/[`take_until`]), input-exhaustion ([`list`],
//! [`non_empty_list`]), and prefix-driven ([`length_prefixed`]).
//!
//! The repetition combinators iterate with an explicit accumulator in both
//! directions instead of recursing, so list length is bounded by memory
//! rather than by stack depth.

use crate::bits::{BitWriter, Bits};
use crate::bind::then;
use crate::codec::Codec;
use crate::error::EncodeError;
use crate::map::convert;
use crate::prim::bits_remaining;

/// Codec for a non-empty list, split as head element plus tail list.
///
/// The composite is `combine(head, tail)` reshaped into a single list.
/// Decoding fails when the tail destructure fails; encoding an empty list,
/// which has no head to destructure, fails as well.
pub fn cons<T>(head: Codec<T>, tail: Codec<Vec<T>>) -> Codec<Vec<T>>
where
    T: Clone + Send + Sync + 'static,
{
    let enc_head = head.clone();
    let enc_tail = tail.clone();
    Codec::from_parts(
        move |items: &Vec<T>| match items.split_first() {
            None => Err(EncodeError::Rejected(
                "cannot encode an empty list as a non-empty sequence".to_owned(),
            )),
            Some((first, rest)) => {
                let head_image = enc_head.encode(first)?;
                let tail_image = enc_tail.encode(&rest.to_vec())?;
                Ok(head_image.concat(&tail_image))
            }
        },
        move |input: Bits| {
            let (first, rest) = head.decode(input)?;
            let (mut items, rest) = tail.decode(rest)?;
            items.insert(0, first);
            Ok((items, rest))
        },
    )
}

/// Dual of [`cons`] on the right end: initial list plus final element.
pub fn append<T>(init: Codec<Vec<T>>, last: Codec<T>) -> Codec<Vec<T>>
where
    T: Clone + Send + Sync + 'static,
{
    let enc_init = init.clone();
    let enc_last = last.clone();
    Codec::from_parts(
        move |items: &Vec<T>| match items.split_last() {
            None => Err(EncodeError::Rejected(
                "cannot encode an empty list as a non-empty sequence".to_owned(),
            )),
            Some((final_item, rest)) => {
                let init_image = enc_init.encode(&rest.to_vec())?;
                let last_image = enc_last.encode(final_item)?;
                Ok(init_image.concat(&last_image))
            }
        },
        move |input: Bits| {
            let (mut items, rest) = init.decode(input)?;
            let (final_item, rest) = last.decode(rest)?;
            items.push(final_item);
            Ok((items, rest))
        },
    )
}

/// Codec running a fixed roster of element codecs in order, one list slot
/// each.
///
/// Equivalent to the right fold of [`cons`] over `elements` terminated by
/// [`empty`](crate::prim::empty): encoding a list whose length differs from
/// the roster fails, and decoding yields exactly `elements.len()` items.
pub fn sequence<T>(elements: Vec<Codec<T>>) -> Codec<Vec<T>>
where
    T: Send + Sync + 'static,
{
    let dec_elements = elements.clone();
    Codec::from_parts(
        move |items: &Vec<T>| {
            if items.len() != elements.len() {
                return Err(EncodeError::Rejected(format!(
                    "list of {} elements where the sequence expects exactly {}",
                    items.len(),
                    elements.len()
                )));
            }
            let mut writer = BitWriter::new();
            for (element, item) in elements.iter().zip(items) {
                writer.push_all(&element.encode(item)?);
            }
            Ok(writer.finish())
        },
        move |input: Bits| {
            let mut items = Vec::with_capacity(dec_elements.len());
            let mut rest = input;
            for element in &dec_elements {
                let (item, next) = element.decode(rest)?;
                items.push(item);
                rest = next;
            }
            Ok((items, rest))
        },
    )
}

/// Codec for exactly `count` repetitions of one element codec.
///
/// Agrees with `sequence(vec![element; count])`; `count == 0` is the empty
/// list codec.
pub fn list_of<T>(count: usize, element: Codec<T>) -> Codec<Vec<T>>
where
    T: Send + Sync + 'static,
{
    let enc_element = element.clone();
    Codec::from_parts(
        move |items: &Vec<T>| {
            if items.len() != count {
                return Err(EncodeError::Rejected(format!(
                    "list of {} elements where exactly {count} were expected",
                    items.len()
                )));
            }
            let mut writer = BitWriter::new();
            for item in items {
                writer.push_all(&enc_element.encode(item)?);
            }
            Ok(writer.finish())
        },
        move |input: Bits| {
            let mut items = Vec::new();
            let mut rest = input;
            for _ in 0..count {
                let (item, next) = element.decode(rest)?;
                items.push(item);
                rest = next;
            }
            Ok((items, rest))
        },
    )
}

/// Codec for a list whose continuation is driven by a boolean gate.
///
/// Decoding repeatedly decodes `gate`; a `true` admits one more element, a
/// `false` stops. Encoding emits `gate(true)` before every element and a
/// single `gate(false)` after the last.
pub fn take_while<T>(gate: Codec<bool>, element: Codec<T>) -> Codec<Vec<T>>
where
    T: Send + Sync + 'static,
{
    let enc_gate = gate.clone();
    let enc_element = element.clone();
    Codec::from_parts(
        move |items: &Vec<T>| {
            let mut writer = BitWriter::new();
            for item in items {
                writer.push_all(&enc_gate.encode(&true)?);
                writer.push_all(&enc_element.encode(item)?);
            }
            writer.push_all(&enc_gate.encode(&false)?);
            Ok(writer.finish())
        },
        move |input: Bits| {
            let mut items = Vec::new();
            let mut rest = input;
            loop {
                let (more, after_gate) = gate.decode(rest)?;
                if !more {
                    return Ok((items, after_gate));
                }
                let (item, next) = element.decode(after_gate)?;
                items.push(item);
                rest = next;
            }
        },
    )
}

/// [`take_while`] with the gate's polarity negated.
pub fn take_until<T>(gate: Codec<bool>, element: Codec<T>) -> Codec<Vec<T>>
where
    T: Send + Sync + 'static,
{
    take_while(
        convert(gate, |stop: bool| !stop, |more: &bool| !more),
        element,
    )
}

/// Codec that decodes elements greedily until the input is exhausted.
///
/// This is [`take_while`] gated on
/// [`bits_remaining`](crate::prim::bits_remaining), so the gate consumes no
/// bits and contributes none on encode.
pub fn list<T>(element: Codec<T>) -> Codec<Vec<T>>
where
    T: Send + Sync + 'static,
{
    take_while(bits_remaining(), element)
}

/// Greedy list requiring at least one element.
pub fn non_empty_list<T>(element: Codec<T>) -> Codec<Vec<T>>
where
    T: Clone + Send + Sync + 'static,
{
    cons(element.clone(), list(element))
}

/// Codec for a list preceded by its element count.
///
/// Implemented as `then(length, n -> list_of(n, element), |list| list.len())`;
/// the prefix codec fixes how the count itself is serialized.
pub fn length_prefixed<T>(length: Codec<u64>, element: Codec<T>) -> Codec<Vec<T>>
where
    T: Send + Sync + 'static,
{
    then(
        length,
        move |count: &u64| list_of(*count as usize, element.clone()),
        |items: &Vec<T>| items.len() as u64,
    )
}
