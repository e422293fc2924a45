//! Error types for the enigma library.

use thiserror::Error;

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, EnigmaError>;

/// Errors produced by the enigma library.
///
/// All variants are fatal to the operation that raised them: configuration
/// errors abort before any rotor state is mutated, and the only
/// conversion-time error is the reflector derangement check.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EnigmaError {
    /// A symbol or index falls outside the alphabet's domain.
    #[error("alphabet error: {0}")]
    Alphabet(String),

    /// Malformed cycle notation.
    #[error("cycle syntax error: {0}")]
    Syntax(String),

    /// A cycle references a symbol that is not in the alphabet.
    #[error("unknown symbol {0:?} in cycle notation")]
    UnknownSymbol(char),

    /// A slot assignment names a rotor that is not in the pool.
    #[error("unknown rotor {0:?}")]
    UnknownRotor(String),

    /// A rotor name appears more than once.
    #[error("duplicate rotor {0:?}")]
    DuplicateRotor(String),

    /// Invalid machine or rotor configuration: reflector misplaced,
    /// nonzero reflector position, reflector not a derangement,
    /// missing slot, or bad rotor/pawl counts.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// A setting or ring string has the wrong length.
    #[error("expected a string of length {expected}, got {actual}")]
    Length { expected: usize, actual: usize },

    /// An operation the component does not support, such as backward
    /// conversion through a reflector.
    #[error("usage error: {0}")]
    Usage(String),
}
