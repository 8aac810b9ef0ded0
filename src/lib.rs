//! Bidirectional bit-level codec combinators
//!
//! # Overview
//!
//! This library provides a small algebra of composable *codecs*: values
//! that simultaneously describe how to encode a structured payload into a
//! bit sequence and how to decode a bit sequence back into that payload.
//! A single codec expression is the sole source of truth for both
//! directions, which eliminates the classic bug of a hand-written encoder
//! and decoder drifting apart.
//!
//! The algebra operates at sub-byte granularity: the serialized form of
//! every codec is a [`Bits`] value, an immutable sequence whose length need
//! not be a multiple of eight, read and written MSB-first in big-endian
//! order at every primitive boundary.
//!
//! # Building codecs
//!
//! Codecs compose bottom-up from the terminal primitives in [`prim`]
//! (fixed-width bit runs, big-endian integers, booleans, constants,
//! sentinels) through the structural combinators ([`combine`],
//! [`fallback`] and [`choice`], [`convert`], [`then`], the list family in
//! [`seq`], and the regrouping pair [`join`]/[`pad`]). A composed codec is
//! an ordinary value: clone it, store it in a constant, share it across
//! threads.
//!
//! ```
//! use tandem::prelude::*;
//! use tandem::hex;
//!
//! // A count byte followed by that many bytes of payload.
//! let framed = length_prefixed(uint(8), uint(8));
//!
//! let image = framed.encode(&vec![1, 2, 3, 4]).unwrap();
//! assert_eq!(image, hex!("0401020304"));
//!
//! let (payload, rest) = framed.decode(image).unwrap();
//! assert_eq!(payload, vec![1, 2, 3, 4]);
//! assert!(rest.is_empty());
//! ```
//!
//! # The round-trip law
//!
//! Every combinator preserves the invariant that decoding an encoded value
//! yields the value back with an empty remainder, and that re-encoding a
//! decoded value reproduces exactly the consumed prefix, provided its
//! argument codecs do. Codecs assembled from user functions via
//! [`Codec::create`], [`convert`], or [`then`] must uphold the inverse
//! contracts documented there.
//!
//! # Failure model
//!
//! Both halves of every codec return tagged results; see [`error`] for the
//! taxonomy. User-supplied functions run inside a safety net that converts
//! an abnormal termination into an error value, so no fault escapes a
//! codec as unwinding.
//!
//! # Scope
//!
//! The library owns no wire protocol, file format, or I/O surface; it
//! operates on in-memory buffers only. Concrete transcoders (radix
//! encodings, varints, and friends) are clients of the algebra, not part
//! of it.

pub mod bind;
pub mod bits;
pub mod branch;
pub mod codec;
pub mod error;
pub mod group;
pub mod map;
pub mod pair;
pub mod prelude;
pub mod prim;
pub mod seq;

cfg_if::cfg_if! {
    if #[cfg(feature = "deflate")] {
        pub mod flate;
        pub use crate::flate::compressed;
    }
}

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

pub use ::lazy_static::lazy_static;
