//! Elementary Row Operations
//!
//! The three generators of row equivalence. Each one is a value object that is validated on
//! construction and knows its own inverse:
//! - `P_{i,j}`: swap row i and row j, its own inverse
//! - `D_{i}(r)`: multiply row i by a nonzero r, inverted by `D_{i}(1/r)`
//! - `T_{i,j}(s)`: add s times row j to row i, inverted by `T_{i,j}(-s)`
//!
//! Row indices are 1-based, the same as in the classical notation above.
//!

use crate::error::{MatrixError, ParseError};
use crate::util::*;
use num_traits::{One, Zero};
use serde::Serialize;
use std::str::FromStr;

#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize)]
pub struct RowSwap {
    i: RowIndex,
    j: RowIndex,
}

#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize)]
pub struct ScalarMultiplication {
    i: RowIndex,
    #[serde(serialize_with = "serialize_rational")]
    r: Rational,
}

#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize)]
pub struct RowSum {
    i: RowIndex,
    j: RowIndex,
    #[serde(serialize_with = "serialize_rational")]
    s: Rational,
}

#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum ElementaryRowOperation {
    Swap(RowSwap),
    ScalarMultiply(ScalarMultiplication),
    AddScaledRow(RowSum),
}

fn check_row_index(name: &str, index: RowIndex) -> Result<(), MatrixError> {
    if index == 0 {
        return Err(MatrixError::InvalidOperation(format!("{name}: row indices start from 1")));
    }
    Ok(())
}

fn check_distinct(name: &str, i: RowIndex, j: RowIndex) -> Result<(), MatrixError> {
    check_row_index(name, i)?;
    check_row_index(name, j)?;
    if i == j {
        return Err(MatrixError::InvalidOperation(format!("{name}: i == j == {i}")));
    }
    Ok(())
}

impl RowSwap {
    pub fn new(i: RowIndex, j: RowIndex) -> Result<Self, MatrixError> {
        check_distinct("RowSwap", i, j)?;
        Ok(Self { i, j })
    }

    pub(crate) fn new_unchecked(i: RowIndex, j: RowIndex) -> Self {
        debug_assert!(i != j && i > 0 && j > 0);
        Self { i, j }
    }

    pub fn i(&self) -> RowIndex {
        self.i
    }

    pub fn j(&self) -> RowIndex {
        self.j
    }

    pub fn inverse(&self) -> Self {
        self.clone()
    }
}

impl ScalarMultiplication {
    pub fn new(i: RowIndex, r: Rational) -> Result<Self, MatrixError> {
        check_row_index("ScalarMultiplication", i)?;
        if r.is_zero() {
            return Err(MatrixError::InvalidOperation("ScalarMultiplication: r = 0".to_string()));
        }
        Ok(Self { i, r })
    }

    pub(crate) fn new_unchecked(i: RowIndex, r: Rational) -> Self {
        debug_assert!(i > 0 && !r.is_zero());
        Self { i, r }
    }

    pub fn i(&self) -> RowIndex {
        self.i
    }

    pub fn r(&self) -> &Rational {
        &self.r
    }

    pub fn inverse(&self) -> Self {
        // r is never zero
        Self {
            i: self.i,
            r: self.r.recip(),
        }
    }
}

impl RowSum {
    pub fn new(i: RowIndex, j: RowIndex, s: Rational) -> Result<Self, MatrixError> {
        check_distinct("RowSum", i, j)?;
        Ok(Self { i, j, s })
    }

    pub(crate) fn new_unchecked(i: RowIndex, j: RowIndex, s: Rational) -> Self {
        debug_assert!(i != j && i > 0 && j > 0);
        Self { i, j, s }
    }

    pub fn i(&self) -> RowIndex {
        self.i
    }

    pub fn j(&self) -> RowIndex {
        self.j
    }

    pub fn s(&self) -> &Rational {
        &self.s
    }

    pub fn inverse(&self) -> Self {
        Self {
            i: self.i,
            j: self.j,
            s: -self.s.clone(),
        }
    }
}

impl ElementaryRowOperation {
    pub fn swap(i: RowIndex, j: RowIndex) -> Result<Self, MatrixError> {
        Ok(RowSwap::new(i, j)?.into())
    }

    pub fn scalar_multiply(i: RowIndex, r: Rational) -> Result<Self, MatrixError> {
        Ok(ScalarMultiplication::new(i, r)?.into())
    }

    pub fn add_scaled_row(i: RowIndex, j: RowIndex, s: Rational) -> Result<Self, MatrixError> {
        Ok(RowSum::new(i, j, s)?.into())
    }

    /// `T_{i,j}(1)`, the row sum without an explicit scalar
    pub fn add_row(i: RowIndex, j: RowIndex) -> Result<Self, MatrixError> {
        Self::add_scaled_row(i, j, Rational::one())
    }

    /// the operation that undoes this one
    pub fn inverse(&self) -> Self {
        match self {
            Self::Swap(swap) => Self::Swap(swap.inverse()),
            Self::ScalarMultiply(multiplication) => Self::ScalarMultiply(multiplication.inverse()),
            Self::AddScaledRow(sum) => Self::AddScaledRow(sum.inverse()),
        }
    }

    /// every row touched by this operation, used to validate it against a matrix before applying
    pub fn rows(&self) -> Vec<RowIndex> {
        match self {
            Self::Swap(swap) => vec![swap.i, swap.j],
            Self::ScalarMultiply(multiplication) => vec![multiplication.i],
            Self::AddScaledRow(sum) => vec![sum.i, sum.j],
        }
    }
}

impl From<RowSwap> for ElementaryRowOperation {
    fn from(swap: RowSwap) -> Self {
        Self::Swap(swap)
    }
}

impl From<ScalarMultiplication> for ElementaryRowOperation {
    fn from(multiplication: ScalarMultiplication) -> Self {
        Self::ScalarMultiply(multiplication)
    }
}

impl From<RowSum> for ElementaryRowOperation {
    fn from(sum: RowSum) -> Self {
        Self::AddScaledRow(sum)
    }
}

impl std::fmt::Display for ElementaryRowOperation {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Self::Swap(RowSwap { i, j }) => write!(f, "P_{{{i},{j}}}"),
            Self::ScalarMultiply(ScalarMultiplication { i, r }) => write!(f, "D_{{{i}}}({r})"),
            Self::AddScaledRow(RowSum { i, j, s }) => write!(f, "T_{{{i},{j}}}({s})"),
        }
    }
}

/// parse the textual form `P i j`, `D i r`, `T i j` or `T i j s`
impl FromStr for ElementaryRowOperation {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let tokens: Vec<&str> = s.split_whitespace().collect();
        let operation = match tokens.as_slice() {
            ["P", i, j] => Self::swap(parse_index(i)?, parse_index(j)?)?,
            ["D", i, r] => Self::scalar_multiply(parse_index(i)?, parse_rational(r)?)?,
            ["T", i, j] => Self::add_row(parse_index(i)?, parse_index(j)?)?,
            ["T", i, j, s] => Self::add_scaled_row(parse_index(i)?, parse_index(j)?, parse_rational(s)?)?,
            _ => return Err(ParseError::UnknownOperation(s.trim().to_string())),
        };
        Ok(operation)
    }
}
