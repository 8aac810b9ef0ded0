//! Regrouping and alignment
//!
//! [`join`] reshapes between one contiguous bit-sequence and a list of
//! fixed-size groups, the workhorse behind radix transcoders that read
//! input in 4-, 5-, or 6-bit digits. [`pad`] appends and checks trailing
//! zero bits.

use crate::bits::{BitWriter, Bits};
use crate::codec::Codec;
use crate::error::{DecodeError, DecodeErrorKind, WidthError};

/// Reshapes a list-of-`Bits` codec into a codec for one contiguous
/// bit-sequence.
///
/// Encoding splits the payload into consecutive groups of exactly
/// `group_size` bits and hands the list to `groups`; a payload whose length
/// is not a multiple of `group_size` is rejected. Decoding concatenates
/// whatever list `groups` yields.
///
/// # Panics
///
/// Panics at construction time if `group_size == 0`.
pub fn join(groups: Codec<Vec<Bits>>, group_size: usize) -> Codec<Bits> {
    assert!(group_size > 0, "group size must be positive");
    let enc_groups = groups.clone();
    Codec::from_parts(
        move |whole: &Bits| {
            if whole.len() % group_size != 0 {
                return Err(WidthError::Indivisible {
                    group: group_size,
                    actual: whole.len(),
                }
                .into());
            }
            let mut pieces = Vec::with_capacity(whole.len() / group_size);
            let mut rest = whole.clone();
            while !rest.is_empty() {
                let (piece, next) = rest.split_at(group_size);
                pieces.push(piece);
                rest = next;
            }
            enc_groups.encode(&pieces)
        },
        move |input: Bits| {
            let (pieces, rest) = groups.decode(input)?;
            let mut writer = BitWriter::new();
            for piece in &pieces {
                writer.push_all(piece);
            }
            Ok((writer.finish(), rest))
        },
    )
}

/// Follows `inner` with `padding` zero bits.
///
/// Encoding appends the zeros after `inner`'s image. Decoding consumes
/// `inner`, then requires the next `padding` bits to be present and
/// zero-valued; a non-zero bit in the padding is a decode error echoing the
/// bits where the padding began.
pub fn pad<V: 'static>(inner: Codec<V>, padding: usize) -> Codec<V> {
    let enc_inner = inner.clone();
    Codec::from_parts(
        move |value: &V| {
            let body = enc_inner.encode(value)?;
            let mut writer = BitWriter::with_capacity(body.len() + padding);
            writer.push_all(&body);
            writer.push_zeros(padding);
            Ok(writer.finish())
        },
        move |input: Bits| {
            let (value, rest) = inner.decode(input)?;
            match rest.try_split_at(padding) {
                None => Err(DecodeError::incomplete(padding, rest)),
                Some((pad_bits, next)) => {
                    if pad_bits.iter().any(|bit| bit) {
                        Err(DecodeError::new(
                            DecodeErrorKind::Rejected(format!(
                                "non-zero bits found in padding: {pad_bits:?}"
                            )),
                            rest,
                        ))
                    } else {
                        Ok((value, next))
                    }
                }
            }
        },
    )
}
