//! Short, reversible text identifiers for 128-bit values.
//!
//! A 128-bit value (typically the raw bytes of a UUID) is rendered as a
//! fixed-length string over a caller-chosen symbol alphabet and parsed back
//! exactly. The default alphabet has 57 URL-safe symbols with the look-alike
//! characters `0 1 I O l` removed, giving 22-character identifiers.
//!
//! ```
//! use suuid::{Codec, Encoder, Uint128};
//!
//! let value: Uint128 = "00000000-0000-0001-0000-000000000000".parse().unwrap();
//! let codec = Codec::shared();
//!
//! let text = codec.encode(value);
//! assert_eq!(text, "22222222222txLqViLENDy");
//! assert_eq!(codec.decode(&text), Ok(value));
//! ```
//!
//! Custom alphabets are deduplicated and sorted by code point, so the same
//! set of symbols always yields the same encoding:
//!
//! ```
//! use suuid::{Alphabet, Codec, Encoder, Uint128};
//!
//! let codec = Codec::new(Alphabet::new("fedcba9876543210")?);
//! assert_eq!(codec.encode(Uint128::from(255u128)), format!("{:032x}", 255));
//! # Ok::<(), suuid::AlphabetError>(())
//! ```

pub mod core;
pub mod encoders;
pub mod prelude;

pub use crate::core::alphabet::{Alphabet, DEFAULT_ALPHABET, MAX_ENCODED_LENGTH};
pub use crate::core::config::{AlphabetConfig, AlphabetRegistry};
pub use crate::core::sort;
pub use crate::core::uint128::{Overflow, ParseUint128Error, Uint128};
pub use encoders::algorithms::base57::Base57;
pub use encoders::algorithms::errors::{AlphabetError, ConfigError, DecodeError};
pub use encoders::algorithms::radix::Radix;
pub use encoders::codec::{Codec, Encoder};
