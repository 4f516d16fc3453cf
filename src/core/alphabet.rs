use std::fmt;
use std::str::FromStr;

use crate::core::sort;
use crate::core::uint128::Uint128;
use crate::encoders::algorithms::errors::AlphabetError;

/// The default alphabet: digits and letters without the look-alikes `0 1 I O l`.
///
/// Already in code-point order, so it is its own canonical form.
pub const DEFAULT_ALPHABET: &str = "23456789ABCDEFGHJKLMNPQRSTUVWXYZabcdefghijkmnopqrstuvwxyz";

/// Symbols needed for any 128-bit value under [`DEFAULT_ALPHABET`].
pub(crate) const DEFAULT_ENCODED_LENGTH: usize = 22;

/// Upper bound on [`Alphabet::encoded_length`], reached by binary alphabets.
pub const MAX_ENCODED_LENGTH: usize = 128;

/// An immutable, canonical symbol table for base-N encoding.
///
/// Symbols are unique and sorted by code point, so any two inputs with the
/// same distinct symbols build identical alphabets. A symbol's digit value is
/// its position in that order; the smallest symbol acts as zero.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Alphabet {
    symbols: Box<[char]>,
    encoded_length: usize,
    max_symbol_width: usize,
}

impl Alphabet {
    /// Creates an alphabet from the characters of a string.
    ///
    /// Order and repetition in `s` do not matter.
    ///
    /// # Errors
    ///
    /// Returns [`AlphabetError::TooSmall`] if fewer than two distinct
    /// characters remain after removing duplicates.
    pub fn new(s: &str) -> Result<Self, AlphabetError> {
        Self::from_symbols(s.chars())
    }

    /// Creates an alphabet from any sequence of symbols.
    ///
    /// # Errors
    ///
    /// Returns [`AlphabetError::TooSmall`] if fewer than two distinct
    /// symbols remain after removing duplicates.
    pub fn from_symbols<I>(symbols: I) -> Result<Self, AlphabetError>
    where
        I: IntoIterator<Item = char>,
    {
        let mut symbols: Vec<char> = symbols.into_iter().collect();
        let supplied = symbols.len();

        sort::sort(&mut symbols);
        symbols.dedup();

        if symbols.len() < 2 {
            return Err(AlphabetError::TooSmall {
                distinct: symbols.len(),
            });
        }

        let alphabet = Self::from_canonical(symbols);
        tracing::debug!(
            base = alphabet.base(),
            encoded_length = alphabet.encoded_length,
            max_symbol_width = alphabet.max_symbol_width,
            duplicates = supplied - alphabet.base(),
            "built alphabet"
        );
        Ok(alphabet)
    }

    /// Wraps symbols that are already sorted, unique and at least two long.
    fn from_canonical(symbols: Vec<char>) -> Self {
        debug_assert!(symbols.len() >= 2);
        debug_assert!(symbols.windows(2).all(|w| w[0] < w[1]));

        let encoded_length = encoded_length_for(symbols.len() as u64);
        let max_symbol_width = symbols.iter().map(|c| c.len_utf8()).max().unwrap_or(1);
        Self {
            symbols: symbols.into_boxed_slice(),
            encoded_length,
            max_symbol_width,
        }
    }

    /// The symbols in digit order.
    pub fn symbols(&self) -> &[char] {
        &self.symbols
    }

    /// Returns the base (radix) of the alphabet, i.e. its symbol count.
    pub fn base(&self) -> usize {
        self.symbols.len()
    }

    /// Number of symbols every encoded 128-bit value uses: ⌈128 / log2(base)⌉.
    pub fn encoded_length(&self) -> usize {
        self.encoded_length
    }

    /// Widest symbol in UTF-8 bytes.
    pub fn max_symbol_width(&self) -> usize {
        self.max_symbol_width
    }

    /// True when every symbol is a single UTF-8 byte (ASCII).
    pub fn is_single_byte(&self) -> bool {
        self.max_symbol_width == 1
    }

    /// The smallest symbol, used for left padding.
    pub fn zero(&self) -> char {
        self.symbols[0]
    }

    /// Encodes a digit (0 to base-1) as a symbol.
    ///
    /// Returns `None` if the digit is out of range.
    pub fn encode_digit(&self, digit: usize) -> Option<char> {
        self.symbols.get(digit).copied()
    }

    /// Decodes a symbol back to its digit value by binary search.
    ///
    /// Returns `None` if the symbol is not in the alphabet.
    pub fn decode_char(&self, symbol: char) -> Option<usize> {
        self.symbols.binary_search(&symbol).ok()
    }
}

/// Smallest `n` with `base^n >= 2^128`, i.e. the first power that no longer
/// fits in 128 bits.
fn encoded_length_for(base: u64) -> usize {
    let mut power = Uint128::new(0, 1);
    let mut n = 0;
    while let Ok(next) = power.multiply_add(base, 0) {
        power = next;
        n += 1;
    }
    n + 1
}

impl Default for Alphabet {
    /// The canonical 57-symbol [`DEFAULT_ALPHABET`].
    fn default() -> Self {
        Self::from_canonical(DEFAULT_ALPHABET.chars().collect())
    }
}

impl FromStr for Alphabet {
    type Err = AlphabetError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl fmt::Display for Alphabet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.symbols.iter().try_for_each(|c| write!(f, "{c}"))
    }
}
