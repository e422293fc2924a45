//! Machine: the complete rotor cipher signal path.
//!
//! A [`Machine`] owns a [`RotorPool`] and an ordered slot array of
//! `num_rotors` rotors (slot 0 is always the reflector), plus a plugboard
//! permutation. Per character it steps the rotors under pawl control and
//! then routes the signal
//!
//! ```text
//! plugboard → rotors right-to-left → reflector → rotors left-to-right → plugboard⁻¹
//! ```
//!
//! Stepping reproduces the historical double-stepping anomaly: the advance
//! set for a keystroke is computed from pre-advance notch positions and only
//! then applied, so a rotor's own advance never influences whether another
//! rotor advances in the same keystroke.

use crate::alphabet::Alphabet;
use crate::error::{EnigmaError, Result};
use crate::permutation::Permutation;
use crate::rotor::{Rotor, RotorId, RotorPool};

/// A complete rotor cipher machine.
///
/// Configuration happens in three steps: [`insert_rotors`](Self::insert_rotors)
/// assigns pool rotors to slots, [`set_rotors`](Self::set_rotors) positions
/// them, and [`set_plugboard`](Self::set_plugboard) optionally replaces the
/// identity plugboard. Conversion then accumulates rotor state across calls;
/// decoding requires an equivalently re-configured machine.
#[derive(Debug, Clone)]
pub struct Machine {
    alphabet: Alphabet,
    num_rotors: usize,
    pawls: usize,
    pool: RotorPool,
    slots: Vec<RotorId>,
    plugboard: Permutation,
}

impl Machine {
    /// Creates a machine with `num_rotors` slots, of which the rightmost
    /// `pawls` may step, drawing rotors from `pool`.
    ///
    /// # Errors
    /// Returns [`EnigmaError::Configuration`] unless `num_rotors > 1` and
    /// `pawls < num_rotors`. The upper bound keeps the reflector slot
    /// permanently ineligible to move: its position is pinned to 0.
    pub fn new(
        alphabet: Alphabet,
        num_rotors: usize,
        pawls: usize,
        pool: RotorPool,
    ) -> Result<Self> {
        if num_rotors < 2 {
            return Err(EnigmaError::Configuration(format!(
                "machine needs at least 2 rotor slots, got {}",
                num_rotors
            )));
        }
        if pawls >= num_rotors {
            return Err(EnigmaError::Configuration(format!(
                "pawl count {} must be less than the rotor count {}",
                pawls, num_rotors
            )));
        }
        let plugboard = Permutation::identity(&alphabet);
        Ok(Machine {
            alphabet,
            num_rotors,
            pawls,
            pool,
            slots: Vec::new(),
            plugboard,
        })
    }

    /// Returns the number of rotor slots.
    pub fn num_rotors(&self) -> usize {
        self.num_rotors
    }

    /// Returns the number of pawls, and thus of rotors that can step.
    pub fn num_pawls(&self) -> usize {
        self.pawls
    }

    /// Returns the alphabet shared by all rotors of this machine.
    pub fn alphabet(&self) -> &Alphabet {
        &self.alphabet
    }

    /// Returns the current rotational setting of the rotor in `slot`, or
    /// `None` if the slot is not filled. Slot 0 is the reflector.
    pub fn rotor_setting(&self, slot: usize) -> Option<usize> {
        self.slots.get(slot).map(|&id| self.pool.get(id).setting())
    }

    /// Fills the slot array with the pool rotors named by `names`, in
    /// order; `names[0]` names the reflector. Replaces any previous
    /// assignment wholesale and resets every inserted rotor to setting 0,
    /// ring 0.
    ///
    /// # Errors
    /// - [`EnigmaError::Configuration`] if the name count differs from the
    ///   slot count, or if slot 0's rotor does not reflect.
    /// - [`EnigmaError::DuplicateRotor`] if a name repeats.
    /// - [`EnigmaError::UnknownRotor`] if a name is not in the pool.
    ///
    /// No rotor state is mutated unless every check passes.
    pub fn insert_rotors(&mut self, names: &[&str]) -> Result<()> {
        if names.len() != self.num_rotors {
            return Err(EnigmaError::Configuration(format!(
                "expected {} rotor names, got {}",
                self.num_rotors,
                names.len()
            )));
        }
        for (i, name) in names.iter().enumerate() {
            if names[..i].contains(name) {
                return Err(EnigmaError::DuplicateRotor(name.to_string()));
            }
        }
        let ids = names
            .iter()
            .map(|name| {
                self.pool
                    .find(name)
                    .ok_or_else(|| EnigmaError::UnknownRotor(name.to_string()))
            })
            .collect::<Result<Vec<RotorId>>>()?;
        if !self.pool.get(ids[0]).reflecting() {
            return Err(EnigmaError::Configuration(
                "slot 0 must hold a reflector".to_string(),
            ));
        }
        for &id in &ids {
            self.pool.get_mut(id).reset();
        }
        self.slots = ids;
        Ok(())
    }

    /// Positions the rotors in slots `1..num_rotors` according to
    /// `setting`, and their rings according to `ring`. The first character
    /// of each string refers to the leftmost rotor after the reflector;
    /// slot 0 is never touched. An empty `ring` defaults every ring offset
    /// to the alphabet's first symbol.
    ///
    /// # Errors
    /// - [`EnigmaError::Configuration`] if no rotors are inserted.
    /// - [`EnigmaError::Length`] if `setting` (or a non-empty `ring`) is
    ///   not exactly `num_rotors - 1` characters.
    /// - [`EnigmaError::Alphabet`] if any character is outside the
    ///   alphabet.
    ///
    /// Both strings are validated in full before any rotor is positioned.
    pub fn set_rotors(&mut self, setting: &str, ring: &str) -> Result<()> {
        self.require_slots()?;
        let expected = self.num_rotors - 1;
        let setting_chars = self.checked_settings(setting, expected)?;
        let ring_chars = if ring.is_empty() {
            vec![self.alphabet.to_char(0)?; expected]
        } else {
            self.checked_settings(ring, expected)?
        };
        for (i, (&posn, &ring_posn)) in setting_chars.iter().zip(ring_chars.iter()).enumerate() {
            let rotor = self.slot_mut(i + 1);
            rotor.set_char(posn)?;
            rotor.set_ring_char(ring_posn)?;
        }
        Ok(())
    }

    /// Replaces the plugboard. An unset plugboard is the identity.
    pub fn set_plugboard(&mut self, plugboard: Permutation) {
        self.plugboard = plugboard;
    }

    /// Converts the input character `c`, given as an index in
    /// `0..alphabet.size()`, after first advancing the machine.
    ///
    /// The signal path: plugboard, then the stepping phase, then a forward
    /// pass right-to-left through every slot ending at the reflector, then
    /// a backward pass left-to-right through slots `1..` (the reflector
    /// never participates backward), then the plugboard inverse.
    ///
    /// # Errors
    /// - [`EnigmaError::Configuration`] if rotors have not been inserted,
    ///   or if the reflector's permutation is not a derangement.
    pub fn convert(&mut self, c: usize) -> Result<usize> {
        self.require_slots()?;
        let mut signal = self.plugboard.permute(c as isize);
        self.advance_rotors();
        for i in (0..self.num_rotors).rev() {
            signal = self.slot(i).convert_forward(signal)?;
        }
        for i in 1..self.num_rotors {
            signal = self.slot(i).convert_backward(signal)?;
        }
        Ok(self.plugboard.invert(signal as isize))
    }

    /// Converts `msg`, updating rotor state across the whole text. Spaces
    /// pass through verbatim without stepping the machine.
    ///
    /// # Errors
    /// Returns [`EnigmaError::Alphabet`] at the first non-space character
    /// outside the alphabet, plus any error of [`convert`](Self::convert).
    pub fn convert_text(&mut self, msg: &str) -> Result<String> {
        let mut output = String::with_capacity(msg.len());
        for ch in msg.chars() {
            if ch == ' ' {
                output.push(ch);
            } else {
                let converted = self.convert(self.alphabet.to_index(ch)?)?;
                output.push(self.alphabet.to_char(converted)?);
            }
        }
        Ok(output)
    }

    /// The stepping phase. Eligible slots are the rightmost `pawls`. The
    /// advance set is computed entirely from pre-advance notch state, then
    /// applied: slot `i` advances iff it is the rightmost slot, or the slot
    /// to its right is at its notch, or it is itself at its notch and the
    /// slot to its left is also eligible (the pawl stepping the left
    /// neighbor carries the notched rotor with it — the double-stepping
    /// anomaly).
    fn advance_rotors(&mut self) {
        let n = self.num_rotors;
        let first_eligible = n - self.pawls;
        let mut advance = vec![false; n];
        for i in first_eligible..n {
            if i == n - 1
                || self.slot(i + 1).at_notch()
                || (i > first_eligible && self.slot(i).at_notch())
            {
                advance[i] = true;
            }
        }
        for (i, &step) in advance.iter().enumerate() {
            if step {
                self.slot_mut(i).advance();
            }
        }
    }

    fn slot(&self, i: usize) -> &Rotor {
        self.pool.get(self.slots[i])
    }

    fn slot_mut(&mut self, i: usize) -> &mut Rotor {
        let id = self.slots[i];
        self.pool.get_mut(id)
    }

    fn require_slots(&self) -> Result<()> {
        if self.slots.len() != self.num_rotors {
            return Err(EnigmaError::Configuration(
                "rotors have not been inserted".to_string(),
            ));
        }
        Ok(())
    }

    /// Validates one settings string: exact length and alphabet membership.
    fn checked_settings(&self, s: &str, expected: usize) -> Result<Vec<char>> {
        let chars: Vec<char> = s.chars().collect();
        if chars.len() != expected {
            return Err(EnigmaError::Length {
                expected,
                actual: chars.len(),
            });
        }
        for &c in &chars {
            if !self.alphabet.contains(c) {
                return Err(EnigmaError::Alphabet(format!(
                    "setting symbol {:?} not in alphabet",
                    c
                )));
            }
        }
        Ok(chars)
    }
}
