//! Product composition of two codecs

use crate::bits::Bits;
use crate::codec::Codec;

/// Codec for a pair, produced by running two codecs in sequence.
///
/// Encoding serializes both halves of the tuple and concatenates their
/// images; decoding runs `first` and then `second` over the remainder.
/// Either half failing fails the whole, first error wins: a decode failure
/// in `first` is reported as-is, and a failure in `second` echoes the
/// remainder left after `first` consumed its share.
pub fn combine<A, B>(first: Codec<A>, second: Codec<B>) -> Codec<(A, B)>
where
    A: 'static,
    B: 'static,
{
    let enc_first = first.clone();
    let enc_second = second.clone();
    Codec::from_parts(
        move |pair: &(A, B)| {
            let head = enc_first.encode(&pair.0)?;
            let tail = enc_second.encode(&pair.1)?;
            Ok(head.concat(&tail))
        },
        move |input: Bits| {
            let (head, rest) = first.decode(input)?;
            let (tail, rest) = second.decode(rest)?;
            Ok(((head, tail), rest))
        },
    )
}
