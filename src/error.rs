//! Errors
//!
//! Every failure is detected before any matrix cell or history entry is touched, so a caller
//! receiving one of these can keep using the matrix as if the call never happened.
//!

use crate::util::*;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MatrixError {
    /// degenerate operation parameters: equal row indices, a zero scalar or the non-existing row 0
    #[error("invalid operation: {0}")]
    InvalidOperation(String),
    #[error("index {index} out of range [1, {bound}]")]
    IndexOutOfRange { index: usize, bound: usize },
    #[error("matrix row not equally sized: first row has {expected} elements while row {row} has {found} elements")]
    RaggedInput { expected: usize, row: RowIndex, found: usize },
    #[error("matrix must have at least one row and one column")]
    EmptyInput,
    #[error("the original block does not reduce to the identity, the matrix is singular")]
    Singular,
    #[error("the matrix is not augmented with an identity block")]
    NotAugmented,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("cannot parse `{0}` as a rational number")]
    Rational(String),
    #[error("cannot parse `{0}` as a row index")]
    Index(String),
    #[error("unknown operation `{0}`, expected `P i j`, `D i r` or `T i j [s]`")]
    UnknownOperation(String),
    #[error(transparent)]
    Matrix(#[from] MatrixError),
}

#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Parse(#[from] ParseError),
    #[error(transparent)]
    Matrix(#[from] MatrixError),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}
