//! Permutation: a bijection on alphabet indices defined by cycle notation.
//!
//! A [`Permutation`] is built over an [`Alphabet`] from a string of the form
//! `"(cccc) (cc) ..."`. Within a cycle each symbol maps to its successor,
//! wrapping to the cycle's first symbol; symbols not mentioned in any cycle
//! map to themselves. Forward and inverse lookups are exposed both at index
//! and at symbol granularity, and a derangement check supports reflector
//! validation.

use crate::alphabet::Alphabet;
use crate::error::{EnigmaError, Result};

/// A permutation of the index range `[0, N)` of an alphabet.
///
/// Both the forward and the inverse mapping are total: `permute` and
/// `invert` are mutual inverses for every valid index and every symbol of
/// the alphabet. Immutable once constructed.
#[derive(Debug, Clone)]
pub struct Permutation {
    alphabet: Alphabet,
    forward: Vec<usize>,
    inverse: Vec<usize>,
    in_cycle: Vec<bool>,
}

impl Permutation {
    /// Builds the permutation described by `cycles` over `alphabet`.
    ///
    /// Whitespace between cycles is ignored.
    ///
    /// # Errors
    /// - [`EnigmaError::Syntax`] if a cycle is unclosed or empty, a symbol
    ///   appears outside parentheses, or a symbol appears more than once
    ///   across all cycles (which would break the bijection).
    /// - [`EnigmaError::UnknownSymbol`] if a cycle references a symbol that
    ///   is not in the alphabet.
    pub fn new(cycles: &str, alphabet: &Alphabet) -> Result<Self> {
        let n = alphabet.size();
        let mut forward: Vec<usize> = (0..n).collect();
        let mut in_cycle = vec![false; n];

        // Indices of the current open cycle, None between cycles.
        let mut current: Option<Vec<usize>> = None;
        for ch in cycles.chars() {
            match ch {
                c if c.is_whitespace() => continue,
                '(' => {
                    if current.is_some() {
                        return Err(EnigmaError::Syntax(
                            "nested '(' in cycle notation".to_string(),
                        ));
                    }
                    current = Some(Vec::new());
                }
                ')' => {
                    let cycle = current.take().ok_or_else(|| {
                        EnigmaError::Syntax("')' without matching '('".to_string())
                    })?;
                    if cycle.is_empty() {
                        return Err(EnigmaError::Syntax("empty cycle".to_string()));
                    }
                    for (k, &idx) in cycle.iter().enumerate() {
                        forward[idx] = cycle[(k + 1) % cycle.len()];
                    }
                }
                c => {
                    let cycle = current.as_mut().ok_or_else(|| {
                        EnigmaError::Syntax(format!("symbol {:?} outside a cycle", c))
                    })?;
                    if !alphabet.contains(c) {
                        return Err(EnigmaError::UnknownSymbol(c));
                    }
                    let idx = alphabet.to_index(c)?;
                    if in_cycle[idx] {
                        return Err(EnigmaError::Syntax(format!(
                            "symbol {:?} appears in more than one cycle position",
                            c
                        )));
                    }
                    in_cycle[idx] = true;
                    cycle.push(idx);
                }
            }
        }
        if current.is_some() {
            return Err(EnigmaError::Syntax("unclosed cycle".to_string()));
        }

        let mut inverse = vec![0usize; n];
        for (i, &f) in forward.iter().enumerate() {
            inverse[f] = i;
        }

        Ok(Permutation {
            alphabet: alphabet.clone(),
            forward,
            inverse,
            in_cycle,
        })
    }

    /// The identity permutation over `alphabet`. Every symbol maps to
    /// itself; this is the machine's default plugboard.
    pub fn identity(alphabet: &Alphabet) -> Self {
        // Empty cycle notation cannot fail.
        let n = alphabet.size();
        Permutation {
            alphabet: alphabet.clone(),
            forward: (0..n).collect(),
            inverse: (0..n).collect(),
            in_cycle: vec![false; n],
        }
    }

    /// Returns the size of the alphabet this permutation acts on.
    pub fn size(&self) -> usize {
        self.alphabet.size()
    }

    /// Returns the alphabet this permutation was built over.
    pub fn alphabet(&self) -> &Alphabet {
        &self.alphabet
    }

    /// Wraps `p` into the index range `[0, N)`.
    ///
    /// Negative inputs are supported: the result is the mathematical value
    /// of `p` modulo N. This wrap is part of the permutation's contract —
    /// rotor offset arithmetic relies on it.
    pub fn wrap(&self, p: isize) -> usize {
        p.rem_euclid(self.size() as isize) as usize
    }

    /// Applies the permutation to `p` modulo the alphabet size.
    pub fn permute(&self, p: isize) -> usize {
        self.forward[self.wrap(p)]
    }

    /// Applies the inverse permutation to `c` modulo the alphabet size.
    pub fn invert(&self, c: isize) -> usize {
        self.inverse[self.wrap(c)]
    }

    /// Applies the permutation to the symbol `p`.
    ///
    /// # Errors
    /// Returns [`EnigmaError::Alphabet`] if `p` is not in the alphabet.
    pub fn permute_char(&self, p: char) -> Result<char> {
        let idx = self.alphabet.to_index(p)?;
        self.alphabet.to_char(self.forward[idx])
    }

    /// Applies the inverse permutation to the symbol `c`.
    ///
    /// # Errors
    /// Returns [`EnigmaError::Alphabet`] if `c` is not in the alphabet.
    pub fn invert_char(&self, c: char) -> Result<char> {
        let idx = self.alphabet.to_index(c)?;
        self.alphabet.to_char(self.inverse[idx])
    }

    /// Returns true iff this permutation is a derangement: every index is
    /// covered by some cycle and no index maps to itself. Symbols absent
    /// from every cycle count as self-maps. Reflectors require this.
    pub fn is_derangement(&self) -> bool {
        self.in_cycle.iter().enumerate().all(|(i, &covered)| covered && self.forward[i] != i)
    }
}
