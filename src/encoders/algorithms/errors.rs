use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while building an [`Alphabet`](crate::Alphabet).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AlphabetError {
    /// Fewer than two distinct symbols remained after deduplication.
    #[error(
        "encoding alphabet must be at least two characters, got {distinct} distinct\n\nhint: a base-N alphabet needs N >= 2 unique symbols"
    )]
    TooSmall { distinct: usize },
}

/// Errors that can occur during decoding.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    /// The input contains a symbol that is not in the alphabet.
    #[error("symbol '{symbol}' at position {position} is not part of the alphabet")]
    SymbolNotInAlphabet { symbol: char, position: usize },
    /// Accumulating the symbol at `position` would exceed 128 bits.
    #[error(
        "value overflows 128 bits at position {position}\n\nhint: the input is too long or encodes a number >= 2^128"
    )]
    ValueOverflow { position: usize },
}

/// Errors from loading or resolving named alphabets.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("alphabet '{name}' not found{}", suggestion_hint(.suggestion))]
    NotFound {
        name: String,
        suggestion: Option<String>,
    },
    #[error("failed to parse alphabet config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("failed to read {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid symbol range: {0}")]
    InvalidRange(String),
    #[error("alphabet defines neither `chars` nor `start` + `length`")]
    EmptyDefinition,
    #[error(transparent)]
    Alphabet(#[from] AlphabetError),
}

fn suggestion_hint(suggestion: &Option<String>) -> String {
    match suggestion {
        Some(s) => format!("\n\nhint: did you mean '{s}'?"),
        None => String::new(),
    }
}

/// Calculate Levenshtein distance between two strings
fn levenshtein_distance(s1: &str, s2: &str) -> usize {
    let len2 = s2.chars().count();
    if s1.is_empty() {
        return len2;
    }
    if len2 == 0 {
        return s1.chars().count();
    }

    let mut prev_row: Vec<usize> = (0..=len2).collect();
    let mut curr_row = vec![0; len2 + 1];

    for (i, c1) in s1.chars().enumerate() {
        curr_row[0] = i + 1;

        for (j, c2) in s2.chars().enumerate() {
            let cost = usize::from(c1 != c2);
            curr_row[j + 1] = (curr_row[j] + 1)
                .min(prev_row[j + 1] + 1)
                .min(prev_row[j] + cost);
        }

        std::mem::swap(&mut prev_row, &mut curr_row);
    }

    prev_row[len2]
}

/// Find the closest registered alphabet name, if any is within a few edits.
pub fn find_closest_alphabet<'a, I>(name: &str, available: I) -> Option<String>
where
    I: IntoIterator<Item = &'a str>,
{
    // 1-2 edits for short names, up to 3 for longer ones
    let threshold = if name.len() < 5 { 2 } else { 3 };

    let mut best_match = None;
    let mut best_distance = usize::MAX;
    for candidate in available {
        let distance = levenshtein_distance(name, candidate);
        if distance < best_distance && distance <= threshold {
            best_distance = distance;
            best_match = Some(candidate.to_string());
        }
    }
    best_match
}
