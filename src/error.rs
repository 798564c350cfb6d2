//! Errors raised by element construction and typed set operations.

use thiserror::Error;

/// Everything that can go wrong when building or combining sets.
///
/// Every failure is raised synchronously by the call that triggered it. Operations that reject
/// their input never leave a partially built or partially mutated set behind.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum SetError {
    /// A typed element was offered to a typed set of a different type.
    #[error("element `{id}` has type `{found}`, but the set only holds `{expected}`")]
    InvalidElementType {
        /// Identifier of the offending element.
        id: String,
        /// The type of the set.
        expected: String,
        /// The type of the element.
        found: String,
    },

    /// A typed set operand had a different type than the set it was combined with.
    #[error("cannot combine a set of type `{expected}` with a set of type `{found}`")]
    TypeMismatch {
        /// The type of the receiving set.
        expected: String,
        /// The type of the first offending operand.
        found: String,
    },

    /// An unknown clone behavior was requested.
    #[error("unknown clone behavior `{0}`")]
    InvalidConfiguration(String),
}
