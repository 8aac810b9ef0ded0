//! DEFLATE adapter for codecs with byte-aligned images
//!
//! Available behind the `deflate` feature flag.

use std::io::{Read, Write};

use flate2::read::DeflateDecoder;
use flate2::write::DeflateEncoder;
use flate2::Compression;

use crate::bits::Bits;
use crate::codec::Codec;
use crate::error::{DecodeError, DecodeErrorKind, EncodeError, WidthError};

/// Wraps a codec so that its serialized image travels DEFLATE-compressed.
///
/// Encoding runs `inner` and deflates the resulting bits; decoding inflates
/// the input and hands the inflated stream to `inner`, whose remainder (a
/// suffix of the inflated stream) is surfaced unchanged. Both directions
/// require byte-aligned sequences, since DEFLATE is a byte-stream format;
/// any inflate failure maps to a decode error.
pub fn compressed<V: 'static>(inner: Codec<V>) -> Codec<V> {
    let enc_inner = inner.clone();
    Codec::from_parts(
        move |value: &V| {
            let body = enc_inner.encode(value)?;
            if body.len() % 8 != 0 {
                return Err(WidthError::Indivisible {
                    group: 8,
                    actual: body.len(),
                }
                .into());
            }
            let mut encoder = DeflateEncoder::new(Vec::new(), Compression::default());
            if encoder.write_all(&body.to_bytes()).is_err() {
                return Err(EncodeError::Custom(
                    "failed to deflate encoded output".to_owned(),
                ));
            }
            match encoder.finish() {
                Ok(deflated) => Ok(Bits::from(deflated)),
                Err(_) => Err(EncodeError::Custom(
                    "failed to deflate encoded output".to_owned(),
                )),
            }
        },
        move |input: Bits| {
            if input.len() % 8 != 0 {
                return Err(DecodeError::new(
                    DecodeErrorKind::Width(WidthError::Indivisible {
                        group: 8,
                        actual: input.len(),
                    }),
                    input,
                ));
            }
            let deflated = input.to_bytes();
            let mut inflated = Vec::new();
            match DeflateDecoder::new(deflated.as_slice()).read_to_end(&mut inflated) {
                Ok(_) => inner.decode(Bits::from(inflated)),
                Err(error) => Err(DecodeError::new(
                    DecodeErrorKind::Custom(format!(
                        "failed to inflate compressed input: {error}"
                    )),
                    input,
                )),
            }
        },
    )
}
