//! Enigma rotor cipher machine engine.
//!
//! Reproduces the letter-substitution behavior of the historical rotor
//! cipher machine: interchangeable rotors over a configurable alphabet,
//! each wired as a fixed permutation, combined with a reflector and an
//! optional plugboard. The whole machine state advances after every encoded
//! symbol, including the well-known double-stepping anomaly of the middle
//! rotor.
//!
//! The cipher is self-inverse: encoding and decoding from the same initial
//! configuration are the same operation.
//!
//! # Architecture
//!
//! ```text
//! Alphabet     (symbol ↔ index mapping over a fixed symbol set)
//!     ↑ used by
//! Permutation  (cycle-notation bijection with forward/inverse lookup)
//!     ↑ wired into
//! Rotor        (moving / fixed / reflecting — setting, ring, notches)
//!     ↑ pooled and slotted into
//! Machine      (plugboard → stepping → rotors → reflector → back → plugboard⁻¹)
//! ```
//!
//! # Examples
//!
//! Encrypt and decrypt with identically configured machines:
//!
//! ```
//! use enigma::{Alphabet, Machine, Permutation, Rotor, RotorPool};
//!
//! let alpha = Alphabet::default();
//! let mut pool = RotorPool::new();
//! pool.insert(Rotor::reflector(
//!     "B",
//!     Permutation::new(
//!         "(AE) (BN) (CK) (DQ) (FU) (GY) (HW) (IJ) (LO) (MP) (RX) (SZ) (TV)",
//!         &alpha,
//!     )
//!     .unwrap(),
//! ))
//! .unwrap();
//! pool.insert(Rotor::moving(
//!     "I",
//!     Permutation::new("(AELTPHQXRU) (BKNW) (CMOY) (DFG) (IV) (JZ) (S)", &alpha).unwrap(),
//!     "Q",
//! )
//! .unwrap())
//! .unwrap();
//! pool.insert(Rotor::moving(
//!     "II",
//!     Permutation::new("(FIXVYOMW) (CDKLHUP) (ESZ) (BGR) (AJQT) (N)", &alpha).unwrap(),
//!     "E",
//! )
//! .unwrap())
//! .unwrap();
//!
//! let mut encoder = Machine::new(alpha.clone(), 3, 2, pool.clone()).unwrap();
//! encoder.insert_rotors(&["B", "I", "II"]).unwrap();
//! encoder.set_rotors("AA", "").unwrap();
//! let ciphertext = encoder.convert_text("HELLO WORLD").unwrap();
//! assert_ne!(ciphertext, "HELLO WORLD");
//!
//! let mut decoder = Machine::new(alpha, 3, 2, pool).unwrap();
//! decoder.insert_rotors(&["B", "I", "II"]).unwrap();
//! decoder.set_rotors("AA", "").unwrap();
//! assert_eq!(decoder.convert_text(&ciphertext).unwrap(), "HELLO WORLD");
//! ```

#![deny(clippy::all)]

pub mod error;

mod alphabet;
mod machine;
mod permutation;
mod rotor;

pub use alphabet::Alphabet;
pub use error::{EnigmaError, Result};
pub use machine::Machine;
pub use permutation::Permutation;
pub use rotor::{Rotor, RotorId, RotorPool};
