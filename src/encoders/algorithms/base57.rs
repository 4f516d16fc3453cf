//! Fixed-length fast path for the default 57-symbol alphabet.
//!
//! Produces exactly the same text as [`Radix`](super::radix::Radix) over
//! [`DEFAULT_ALPHABET`], but with the base, divisor and output length baked in
//! as constants and an ASCII lookup table instead of a binary search.

use crate::core::alphabet::{Alphabet, DEFAULT_ALPHABET, DEFAULT_ENCODED_LENGTH};
use crate::core::uint128::Uint128;
use crate::encoders::algorithms::errors::DecodeError;

const BASE: u64 = 57;
const ENCODED_LEN: usize = DEFAULT_ENCODED_LENGTH;
const DIGITS_PER_CHUNK: usize = 10;
/// 57^10, the largest power of 57 that fits in a `u64`.
const DIVISOR: u64 = 362_033_331_456_891_249;

const SYMBOLS: &[u8] = DEFAULT_ALPHABET.as_bytes();
const INVALID: u8 = u8::MAX;
const DECODE_TABLE: [u8; 128] = build_decode_table();

const fn build_decode_table() -> [u8; 128] {
    let mut table = [INVALID; 128];
    let mut i = 0;
    while i < SYMBOLS.len() {
        table[SYMBOLS[i] as usize] = i as u8;
        i += 1;
    }
    table
}

/// Base-57 codec over [`DEFAULT_ALPHABET`].
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Base57 {
    alphabet: Alphabet,
}

impl Base57 {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn alphabet(&self) -> &Alphabet {
        &self.alphabet
    }

    /// Encodes `value` as 22 symbols, most significant first.
    pub fn encode(&self, value: Uint128) -> String {
        let mut buf = [SYMBOLS[0]; ENCODED_LEN];

        // 57^22 > 2^128, so after two chunk divisions less than 57^2
        // remains and the high word is zero.
        let (rest, low) = value.divmod(DIVISOR);
        let (rest, mid) = rest.divmod(DIVISOR);
        put_digits(&mut buf[ENCODED_LEN - DIGITS_PER_CHUNK..], low);
        put_digits(&mut buf[2..ENCODED_LEN - DIGITS_PER_CHUNK], mid);
        put_digits(&mut buf[..2], rest.lo());

        buf.iter().copied().map(char::from).collect()
    }

    /// Parses base-57 text back into a value.
    ///
    /// # Errors
    ///
    /// [`DecodeError::SymbolNotInAlphabet`] for an unknown symbol,
    /// [`DecodeError::ValueOverflow`] when the value needs more than 128 bits.
    pub fn decode(&self, text: &str) -> Result<Uint128, DecodeError> {
        let mut value = Uint128::ZERO;
        for (position, symbol) in text.chars().enumerate() {
            let digit =
                lookup(symbol).ok_or(DecodeError::SymbolNotInAlphabet { symbol, position })?;
            value = value
                .multiply_add(BASE, u64::from(digit))
                .map_err(|_| DecodeError::ValueOverflow { position })?;
        }
        Ok(value)
    }
}

/// Writes `r` into `out` as base-57 digits, least significant last.
#[inline(always)]
fn put_digits(out: &mut [u8], mut r: u64) {
    for slot in out.iter_mut().rev() {
        *slot = SYMBOLS[(r % BASE) as usize];
        r /= BASE;
    }
}

#[inline]
fn lookup(symbol: char) -> Option<u8> {
    match DECODE_TABLE.get(symbol as usize) {
        Some(&digit) if digit != INVALID => Some(digit),
        _ => None,
    }
}
