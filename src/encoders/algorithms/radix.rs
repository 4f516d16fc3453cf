//! Generic base-N conversion of 128-bit values over any [`Alphabet`].
//!
//! Encoding peels off chunks of `n` digits at a time: one 128-by-64 division
//! by `base^n` (the largest power of the base that fits in a word), then `n`
//! cheap word-sized divisions on the remainder.

use crate::core::alphabet::{Alphabet, MAX_ENCODED_LENGTH};
use crate::core::uint128::Uint128;
use crate::encoders::algorithms::errors::DecodeError;

/// Returns `(base^n, n)` for the largest `n` with `base^n <= u64::MAX`.
pub(crate) fn max_pow(base: u64) -> (u64, usize) {
    let (mut d, mut n) = (base, 1);
    let limit = u64::MAX / base;
    while d <= limit {
        d *= base;
        n += 1;
    }
    (d, n)
}

/// Base-N codec for an arbitrary alphabet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Radix {
    alphabet: Alphabet,
    divisor: u64,
    digits_per_chunk: usize,
}

impl Radix {
    pub fn new(alphabet: Alphabet) -> Self {
        let (divisor, digits_per_chunk) = max_pow(alphabet.base() as u64);
        Self {
            alphabet,
            divisor,
            digits_per_chunk,
        }
    }

    pub fn alphabet(&self) -> &Alphabet {
        &self.alphabet
    }

    /// Encodes `value` as exactly `encoded_length` symbols, most significant first.
    pub fn encode(&self, value: Uint128) -> String {
        let len = self.alphabet.encoded_length();
        let mut digits = [0u32; MAX_ENCODED_LENGTH];
        self.fill_digits(value, &mut digits[..len]);

        // Sized for the widest symbol so multi-byte alphabets never reallocate;
        // for ASCII alphabets this is exactly `len` bytes.
        let symbols = self.alphabet.symbols();
        let mut out = String::with_capacity(len * self.alphabet.max_symbol_width());
        out.extend(digits[..len].iter().map(|&d| symbols[d as usize]));
        out
    }

    /// Writes the digits of `value` into `out` from the end backward. Positions
    /// left over once the value is exhausted stay zero.
    fn fill_digits(&self, mut value: Uint128, out: &mut [u32]) {
        let base = self.alphabet.base() as u64;
        let mut i = out.len();
        while !value.is_zero() && i > 0 {
            let (quotient, mut r) = value.divmod(self.divisor);
            value = quotient;
            for _ in 0..self.digits_per_chunk {
                if i == 0 {
                    break;
                }
                i -= 1;
                out[i] = (r % base) as u32;
                r /= base;
            }
        }
    }

    /// Parses `text` back into a value.
    ///
    /// Short inputs behave as if left-padded with the zero symbol; extra
    /// leading zero symbols are accepted as long as the value fits.
    ///
    /// # Errors
    ///
    /// [`DecodeError::SymbolNotInAlphabet`] for an unknown symbol,
    /// [`DecodeError::ValueOverflow`] when the value needs more than 128 bits.
    pub fn decode(&self, text: &str) -> Result<Uint128, DecodeError> {
        let base = self.alphabet.base() as u64;
        let mut value = Uint128::ZERO;
        for (position, symbol) in text.chars().enumerate() {
            let digit = self
                .alphabet
                .decode_char(symbol)
                .ok_or(DecodeError::SymbolNotInAlphabet { symbol, position })?;
            value = value
                .multiply_add(base, digit as u64)
                .map_err(|_| DecodeError::ValueOverflow { position })?;
        }
        Ok(value)
    }
}
