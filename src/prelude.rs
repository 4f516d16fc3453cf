//! Convenient re-exports for common usage.
//!
//! ```
//! use suuid::prelude::*;
//!
//! let codec = Codec::shared();
//! let text = codec.encode_bytes([0xff; 16]);
//! assert_eq!(codec.decode_bytes(&text), Ok([0xff; 16]));
//! ```

pub use crate::{
    Alphabet,
    AlphabetError,
    AlphabetRegistry,
    Codec,
    DEFAULT_ALPHABET,
    DecodeError,
    // Trait needed for encode/decode calls
    Encoder,
    Uint128,
};
