//! Rotor family: moving, fixed and reflecting rotors, plus the rotor pool.
//!
//! Every rotor wraps an immutable [`Permutation`] and carries two mutable
//! indices: the rotational `setting` and the `ring` offset. The behavioral
//! differences between the three variants (whether the rotor steps, carries
//! notches, or reflects) live in a closed [`RotorKind`] enum rather than a
//! trait hierarchy — only one level of specialization exists.
//!
//! Rotors are owned by a [`RotorPool`] and addressed by [`RotorId`], so the
//! machine can hold slot assignments without cyclic references.

use crate::error::{EnigmaError, Result};
use crate::permutation::Permutation;

/// Unique identifier for a rotor within a [`RotorPool`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RotorId(usize);

/// Capability variant of a rotor.
#[derive(Debug, Clone, PartialEq, Eq)]
enum RotorKind {
    /// Steps under pawl control; `notches` are alphabet indices at which
    /// this rotor allows its left neighbor to advance.
    Moving { notches: Vec<usize> },
    /// Never steps.
    Fixed,
    /// Never steps, position pinned to 0, forward-only.
    Reflector,
}

/// One rotor: a named permutation layer plus a rotational offset.
#[derive(Debug, Clone)]
pub struct Rotor {
    name: String,
    permutation: Permutation,
    kind: RotorKind,
    setting: usize,
    ring: usize,
}

impl Rotor {
    /// Creates a moving rotor with notches at the positions named by the
    /// symbols of `notches`.
    ///
    /// # Errors
    /// Returns [`EnigmaError::Alphabet`] if a notch symbol is not in the
    /// permutation's alphabet.
    pub fn moving(name: &str, permutation: Permutation, notches: &str) -> Result<Self> {
        let notch_indices = notches
            .chars()
            .map(|c| permutation.alphabet().to_index(c))
            .collect::<Result<Vec<usize>>>()?;
        Ok(Rotor {
            name: name.to_string(),
            permutation,
            kind: RotorKind::Moving {
                notches: notch_indices,
            },
            setting: 0,
            ring: 0,
        })
    }

    /// Creates a fixed (non-stepping) rotor.
    pub fn fixed(name: &str, permutation: Permutation) -> Self {
        Rotor {
            name: name.to_string(),
            permutation,
            kind: RotorKind::Fixed,
            setting: 0,
            ring: 0,
        }
    }

    /// Creates a reflector. Its permutation must be a derangement; this is
    /// checked lazily on the first forward conversion, not here.
    pub fn reflector(name: &str, permutation: Permutation) -> Self {
        Rotor {
            name: name.to_string(),
            permutation,
            kind: RotorKind::Reflector,
            setting: 0,
            ring: 0,
        }
    }

    /// Returns this rotor's name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the permutation wired into this rotor.
    pub fn permutation(&self) -> &Permutation {
        &self.permutation
    }

    /// Returns the size of the alphabet this rotor acts on.
    pub fn size(&self) -> usize {
        self.permutation.size()
    }

    /// Returns true iff this rotor has a ratchet and can move.
    pub fn rotates(&self) -> bool {
        matches!(self.kind, RotorKind::Moving { .. })
    }

    /// Returns true iff this rotor reflects.
    pub fn reflecting(&self) -> bool {
        matches!(self.kind, RotorKind::Reflector)
    }

    /// Returns the current rotational setting.
    pub fn setting(&self) -> usize {
        self.setting
    }

    /// Returns the current ring offset.
    pub fn ring(&self) -> usize {
        self.ring
    }

    /// Sets the rotational position to `posn`, wrapped into range.
    ///
    /// # Errors
    /// Returns [`EnigmaError::Configuration`] for a reflector and any
    /// `posn` that does not wrap to 0: a reflector has only one position.
    pub fn set(&mut self, posn: usize) -> Result<()> {
        let wrapped = self.permutation.wrap(posn as isize);
        if self.reflecting() && wrapped != 0 {
            return Err(EnigmaError::Configuration(format!(
                "reflector {:?} has only one position",
                self.name
            )));
        }
        self.setting = wrapped;
        Ok(())
    }

    /// Sets the rotational position to the position of symbol `cposn`.
    ///
    /// # Errors
    /// [`EnigmaError::Alphabet`] for an unknown symbol, or
    /// [`EnigmaError::Configuration`] when a reflector is moved off 0.
    pub fn set_char(&mut self, cposn: char) -> Result<()> {
        let posn = self.permutation.alphabet().to_index(cposn)?;
        self.set(posn)
    }

    /// Sets the ring offset to `posn`, wrapped into range.
    pub fn set_ring(&mut self, posn: usize) {
        self.ring = self.permutation.wrap(posn as isize);
    }

    /// Sets the ring offset to the position of symbol `cposn`.
    ///
    /// # Errors
    /// Returns [`EnigmaError::Alphabet`] for an unknown symbol.
    pub fn set_ring_char(&mut self, cposn: char) -> Result<()> {
        self.ring = self.permutation.alphabet().to_index(cposn)?;
        Ok(())
    }

    /// Returns true iff this rotor is positioned to allow the rotor to its
    /// left to advance. Only a moving rotor can be at a notch.
    pub fn at_notch(&self) -> bool {
        match &self.kind {
            RotorKind::Moving { notches } => notches.contains(&self.setting),
            _ => false,
        }
    }

    /// Advances this rotor one position, wrapping at the alphabet size.
    /// No-op for fixed rotors and reflectors.
    pub fn advance(&mut self) {
        if self.rotates() {
            self.setting = self.permutation.wrap(self.setting as isize + 1);
        }
    }

    /// The offset by which this rotor's wiring is shifted: the rotational
    /// setting minus the ring offset.
    fn effective_offset(&self) -> isize {
        self.setting as isize - self.ring as isize
    }

    /// Converts contact `p` through this rotor, right to left.
    ///
    /// The signal enters at contact `wrap(p + effective_offset)`, passes
    /// the wiring forward, and exits at `wrap(result - effective_offset)`.
    ///
    /// # Errors
    /// For a reflector, returns [`EnigmaError::Configuration`] if its
    /// permutation is not a derangement.
    pub fn convert_forward(&self, p: usize) -> Result<usize> {
        if self.reflecting() && !self.permutation.is_derangement() {
            return Err(EnigmaError::Configuration(format!(
                "reflector {:?} permutation is not a derangement",
                self.name
            )));
        }
        let offset = self.effective_offset();
        let entered = self.permutation.permute(p as isize + offset);
        Ok(self.permutation.wrap(entered as isize - offset))
    }

    /// Converts contact `e` through this rotor, left to right, using the
    /// inverse wiring.
    ///
    /// # Errors
    /// Returns [`EnigmaError::Usage`] for a reflector: a signal passes
    /// through a reflector once, forward only.
    pub fn convert_backward(&self, e: usize) -> Result<usize> {
        if self.reflecting() {
            return Err(EnigmaError::Usage(format!(
                "reflector {:?} cannot convert backward",
                self.name
            )));
        }
        let offset = self.effective_offset();
        let entered = self.permutation.invert(e as isize + offset);
        Ok(self.permutation.wrap(entered as isize - offset))
    }

    /// Resets the rotational state to setting 0, ring 0.
    pub fn reset(&mut self) {
        self.setting = 0;
        self.ring = 0;
    }
}

/// Pool of all available rotors, indexed by [`RotorId`].
///
/// Built once during configuration; the machine addresses its slots through
/// ids into this pool. Names are unique within a pool.
#[derive(Debug, Clone, Default)]
pub struct RotorPool {
    rotors: Vec<Rotor>,
}

impl RotorPool {
    /// Creates an empty pool.
    pub fn new() -> Self {
        RotorPool { rotors: Vec::new() }
    }

    /// Adds `rotor` to the pool.
    ///
    /// # Errors
    /// Returns [`EnigmaError::DuplicateRotor`] if a rotor of the same name
    /// is already present.
    pub fn insert(&mut self, rotor: Rotor) -> Result<RotorId> {
        if self.find(rotor.name()).is_some() {
            return Err(EnigmaError::DuplicateRotor(rotor.name().to_string()));
        }
        let id = RotorId(self.rotors.len());
        self.rotors.push(rotor);
        Ok(id)
    }

    /// Returns the number of rotors in the pool.
    pub fn len(&self) -> usize {
        self.rotors.len()
    }

    /// Returns true if the pool holds no rotors.
    pub fn is_empty(&self) -> bool {
        self.rotors.is_empty()
    }

    /// Looks up a rotor by name.
    pub fn find(&self, name: &str) -> Option<RotorId> {
        self.rotors
            .iter()
            .position(|r| r.name() == name)
            .map(RotorId)
    }

    /// Returns the rotor with id `id`.
    pub fn get(&self, id: RotorId) -> &Rotor {
        &self.rotors[id.0]
    }

    /// Returns the rotor with id `id`, mutably.
    pub fn get_mut(&mut self, id: RotorId) -> &mut Rotor {
        &mut self.rotors[id.0]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::alphabet::Alphabet;

    fn upper() -> Alphabet {
        Alphabet::default()
    }

    fn rotor_i() -> Permutation {
        Permutation::new(
            "(AELTPHQXRU) (BKNW) (CMOY) (DFG) (IV) (JZ) (S)",
            &upper(),
        )
        .unwrap()
    }

    fn reflector_b() -> Permutation {
        Permutation::new(
            "(AE) (BN) (CK) (DQ) (FU) (GY) (HW) (IJ) (LO) (MP) (RX) (SZ) (TV)",
            &upper(),
        )
        .unwrap()
    }

    #[test]
    fn test_capabilities() {
        let moving = Rotor::moving("I", rotor_i(), "Q").unwrap();
        let fixed = Rotor::fixed("Beta", rotor_i());
        let refl = Rotor::reflector("B", reflector_b());
        assert!(moving.rotates() && !moving.reflecting());
        assert!(!fixed.rotates() && !fixed.reflecting());
        assert!(!refl.rotates() && refl.reflecting());
    }

    #[test]
    fn test_convert_forward_at_zero_setting() {
        let rotor = Rotor::moving("I", rotor_i(), "Q").unwrap();
        // At setting 0 the rotor applies its wiring directly: A -> E.
        assert_eq!(rotor.convert_forward(0).unwrap(), 4);
        assert_eq!(rotor.convert_backward(4).unwrap(), 0);
    }

    #[test]
    fn test_convert_forward_with_setting_offset() {
        let mut rotor = Rotor::moving("I", rotor_i(), "Q").unwrap();
        rotor.set_char('B').unwrap();
        // Enter at contact 0+1 = B, wiring maps B -> K (10), exit at 10-1 = 9.
        assert_eq!(rotor.convert_forward(0).unwrap(), 9);
        assert_eq!(rotor.convert_backward(9).unwrap(), 0);
    }

    #[test]
    fn test_ring_cancels_equal_setting() {
        let mut rotor = Rotor::moving("I", rotor_i(), "Q").unwrap();
        rotor.set_char('B').unwrap();
        rotor.set_ring_char('B').unwrap();
        // effective offset 0: behaves as at setting A.
        assert_eq!(rotor.convert_forward(0).unwrap(), 4);
    }

    #[test]
    fn test_advance_wraps() {
        let mut rotor = Rotor::moving("I", rotor_i(), "Q").unwrap();
        rotor.set(25).unwrap();
        rotor.advance();
        assert_eq!(rotor.setting(), 0);
    }

    #[test]
    fn test_fixed_rotor_never_advances() {
        let mut rotor = Rotor::fixed("Beta", rotor_i());
        rotor.advance();
        assert_eq!(rotor.setting(), 0);
        assert!(!rotor.at_notch());
    }

    #[test]
    fn test_at_notch() {
        let mut rotor = Rotor::moving("I", rotor_i(), "Q").unwrap();
        assert!(!rotor.at_notch());
        rotor.set_char('Q').unwrap();
        assert!(rotor.at_notch());
    }

    #[test]
    fn test_multiple_notches() {
        let mut rotor = Rotor::moving("VI", rotor_i(), "ZM").unwrap();
        rotor.set_char('Z').unwrap();
        assert!(rotor.at_notch());
        rotor.set_char('M').unwrap();
        assert!(rotor.at_notch());
        rotor.set_char('A').unwrap();
        assert!(!rotor.at_notch());
    }

    #[test]
    fn test_notch_symbol_must_be_in_alphabet() {
        assert!(matches!(
            Rotor::moving("I", rotor_i(), "Q?"),
            Err(EnigmaError::Alphabet(_))
        ));
    }

    #[test]
    fn test_reflector_rejects_nonzero_position() {
        let mut refl = Rotor::reflector("B", reflector_b());
        assert!(refl.set(0).is_ok());
        assert!(matches!(
            refl.set(3),
            Err(EnigmaError::Configuration(_))
        ));
        assert!(matches!(
            refl.set_char('C'),
            Err(EnigmaError::Configuration(_))
        ));
    }

    #[test]
    fn test_reflector_backward_is_usage_error() {
        let refl = Rotor::reflector("B", reflector_b());
        assert!(matches!(
            refl.convert_backward(0),
            Err(EnigmaError::Usage(_))
        ));
    }

    #[test]
    fn test_reflector_requires_derangement() {
        let alpha = upper();
        let refl = Rotor::reflector("Bad", Permutation::new("(AB)", &alpha).unwrap());
        assert!(matches!(
            refl.convert_forward(0),
            Err(EnigmaError::Configuration(_))
        ));

        let good = Rotor::reflector("B", reflector_b());
        assert_eq!(good.convert_forward(0).unwrap(), 4); // A -> E
    }

    #[test]
    fn test_reset_clears_state() {
        let mut rotor = Rotor::moving("I", rotor_i(), "Q").unwrap();
        rotor.set(5).unwrap();
        rotor.set_ring(3);
        rotor.reset();
        assert_eq!(rotor.setting(), 0);
        assert_eq!(rotor.ring(), 0);
    }

    #[test]
    fn test_pool_insert_and_find() {
        let mut pool = RotorPool::new();
        let id = pool.insert(Rotor::moving("I", rotor_i(), "Q").unwrap()).unwrap();
        assert_eq!(pool.len(), 1);
        assert_eq!(pool.find("I"), Some(id));
        assert_eq!(pool.find("II"), None);
        assert_eq!(pool.get(id).name(), "I");
    }

    #[test]
    fn test_pool_rejects_duplicate_name() {
        let mut pool = RotorPool::new();
        pool.insert(Rotor::moving("I", rotor_i(), "Q").unwrap()).unwrap();
        assert!(matches!(
            pool.insert(Rotor::fixed("I", rotor_i())),
            Err(EnigmaError::DuplicateRotor(_))
        ));
    }
}
