//! Alphabet: bidirectional symbol/index mapping.
//!
//! An [`Alphabet`] is a fixed, ordered, duplicate-free set of symbols that
//! defines the domain of every permutation and conversion in the machine.
//! Symbol number `k` has index `k`, numbering from 0. Immutable once
//! constructed.

use crate::error::{EnigmaError, Result};

/// Characters that cannot appear in an alphabet because the cycle and
/// settings notation reserves them as delimiters.
const RESERVED: [char; 3] = ['(', ')', '*'];

/// An alphabet of encodable symbols.
///
/// Provides the symbol↔index mapping used by [`Permutation`](crate::Permutation)
/// and every rotor. Lookups are pure; the alphabet never changes after
/// construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alphabet {
    chars: Vec<char>,
}

impl Alphabet {
    /// Creates an alphabet from the ordered symbol string `chars`.
    ///
    /// # Errors
    /// Returns [`EnigmaError::Alphabet`] if `chars` is empty, contains a
    /// duplicate symbol, whitespace, or one of the reserved delimiter
    /// characters `(`, `)`, `*`.
    pub fn new(chars: &str) -> Result<Self> {
        let symbols: Vec<char> = chars.chars().collect();
        if symbols.is_empty() {
            return Err(EnigmaError::Alphabet("alphabet is empty".to_string()));
        }
        for (i, &c) in symbols.iter().enumerate() {
            if c.is_whitespace() || RESERVED.contains(&c) {
                return Err(EnigmaError::Alphabet(format!(
                    "alphabet may not contain {:?}",
                    c
                )));
            }
            if symbols[..i].contains(&c) {
                return Err(EnigmaError::Alphabet(format!(
                    "duplicate symbol {:?} in alphabet",
                    c
                )));
            }
        }
        Ok(Alphabet { chars: symbols })
    }

    /// Returns the number of symbols in the alphabet.
    pub fn size(&self) -> usize {
        self.chars.len()
    }

    /// Returns true if `ch` is in this alphabet.
    pub fn contains(&self, ch: char) -> bool {
        self.chars.contains(&ch)
    }

    /// Returns symbol number `index`, where `0 <= index < size()`.
    ///
    /// # Errors
    /// Returns [`EnigmaError::Alphabet`] if `index` is out of range.
    pub fn to_char(&self, index: usize) -> Result<char> {
        self.chars.get(index).copied().ok_or_else(|| {
            EnigmaError::Alphabet(format!(
                "index {} out of range for alphabet of size {}",
                index,
                self.size()
            ))
        })
    }

    /// Returns the index of symbol `ch`. Inverse of [`to_char`](Self::to_char).
    ///
    /// # Errors
    /// Returns [`EnigmaError::Alphabet`] if `ch` is not in the alphabet.
    pub fn to_index(&self, ch: char) -> Result<usize> {
        self.chars
            .iter()
            .position(|&c| c == ch)
            .ok_or_else(|| EnigmaError::Alphabet(format!("symbol {:?} not in alphabet", ch)))
    }
}

impl Default for Alphabet {
    /// The default alphabet of all upper-case letters.
    fn default() -> Self {
        Alphabet {
            chars: ('A'..='Z').collect(),
        }
    }
}
