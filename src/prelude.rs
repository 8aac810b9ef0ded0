//! One-stop import surface for building codecs
//!
//! Pulls in the buffer substrate, the codec contract, every constructor in
//! the algebra, and the error types their results carry.

pub use crate::bind::{done, ensure, refute, then};
pub use crate::bits::{BitWriter, Bits};
pub use crate::branch::{choice, fallback, optional, peek};
pub use crate::codec::Codec;
pub use crate::error::{
    DecodeError, DecodeErrorKind, DecodeResult, EncodeError, EncodeResult, HexError, RangeError,
    WidthError,
};
pub use crate::group::{join, pad};
pub use crate::map::{convert, map_list, mapping, reverse};
pub use crate::pair::combine;
pub use crate::prim::{
    bit, bits, bits_remaining, boolean, byte, bytes, constant, empty, fail, fail_with, int,
    nothing, uint, value,
};
pub use crate::seq::{
    append, cons, length_prefixed, list, list_of, non_empty_list, sequence, take_until, take_while,
};

#[cfg(feature = "deflate")]
pub use crate::flate::compressed;
