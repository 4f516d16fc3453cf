use std::sync::LazyLock;

use crate::core::alphabet::Alphabet;
use crate::core::uint128::Uint128;
use crate::encoders::algorithms::base57::Base57;
use crate::encoders::algorithms::errors::{AlphabetError, DecodeError};
use crate::encoders::algorithms::radix::Radix;

/// Converts 128-bit values to short text and back.
///
/// Implementations must satisfy `decode(&encode(v)) == Ok(v)` for every `v`.
pub trait Encoder {
    /// The alphabet this encoder renders with.
    fn alphabet(&self) -> &Alphabet;

    /// Encodes `value` as exactly `alphabet().encoded_length()` symbols.
    fn encode(&self, value: Uint128) -> String;

    /// Parses text produced by [`Encoder::encode`].
    fn decode(&self, text: &str) -> Result<Uint128, DecodeError>;

    /// Encodes 16 big-endian bytes, e.g. the raw bytes of a UUID.
    fn encode_bytes(&self, bytes: [u8; 16]) -> String {
        self.encode(Uint128::from_be_bytes(bytes))
    }

    /// Decodes into 16 big-endian bytes.
    fn decode_bytes(&self, text: &str) -> Result<[u8; 16], DecodeError> {
        self.decode(text).map(Uint128::to_be_bytes)
    }
}

impl Encoder for Radix {
    fn alphabet(&self) -> &Alphabet {
        Radix::alphabet(self)
    }

    fn encode(&self, value: Uint128) -> String {
        Radix::encode(self, value)
    }

    fn decode(&self, text: &str) -> Result<Uint128, DecodeError> {
        Radix::decode(self, text)
    }
}

impl Encoder for Base57 {
    fn alphabet(&self) -> &Alphabet {
        Base57::alphabet(self)
    }

    fn encode(&self, value: Uint128) -> String {
        Base57::encode(self, value)
    }

    fn decode(&self, text: &str) -> Result<Uint128, DecodeError> {
        Base57::decode(self, text)
    }
}

static SHARED: LazyLock<Codec> = LazyLock::new(Codec::default);

/// An encoder whose strategy is fixed when it is built.
///
/// [`Codec::new`] picks the [`Base57`] fast path when handed the default
/// alphabet and the generic [`Radix`] path otherwise. Both produce identical
/// text for the same alphabet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Codec {
    Base57(Base57),
    Radix(Radix),
}

impl Codec {
    pub fn new(alphabet: Alphabet) -> Self {
        let codec = if alphabet == Alphabet::default() {
            Codec::Base57(Base57::new())
        } else {
            Codec::Radix(Radix::new(alphabet))
        };
        tracing::debug!(
            base = codec.alphabet().base(),
            fast_path = codec.is_fast_path(),
            "selected codec"
        );
        codec
    }

    /// Builds the alphabet from `symbols` and wraps it in a codec.
    ///
    /// # Errors
    ///
    /// Returns [`AlphabetError::TooSmall`] if fewer than two distinct symbols
    /// are given.
    pub fn from_symbols(symbols: &str) -> Result<Self, AlphabetError> {
        Alphabet::new(symbols).map(Self::new)
    }

    /// Process-wide default codec, built on first use and never mutated.
    pub fn shared() -> &'static Codec {
        &SHARED
    }

    pub fn is_fast_path(&self) -> bool {
        matches!(self, Codec::Base57(_))
    }
}

impl Default for Codec {
    fn default() -> Self {
        Codec::Base57(Base57::new())
    }
}

impl From<Alphabet> for Codec {
    fn from(alphabet: Alphabet) -> Self {
        Self::new(alphabet)
    }
}

impl Encoder for Codec {
    fn alphabet(&self) -> &Alphabet {
        match self {
            Codec::Base57(c) => c.alphabet(),
            Codec::Radix(c) => c.alphabet(),
        }
    }

    fn encode(&self, value: Uint128) -> String {
        match self {
            Codec::Base57(c) => c.encode(value),
            Codec::Radix(c) => c.encode(value),
        }
    }

    fn decode(&self, text: &str) -> Result<Uint128, DecodeError> {
        match self {
            Codec::Base57(c) => c.decode(text),
            Codec::Radix(c) => c.decode(text),
        }
    }
}
