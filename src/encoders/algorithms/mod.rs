pub mod base57;
pub mod errors;
pub mod radix;

// Re-export error types for public API
pub use errors::{AlphabetError, ConfigError, DecodeError, find_closest_alphabet};
