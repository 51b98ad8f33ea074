//! Rational Matrix
//!
//! A fixed-size grid of exact rationals that only changes through elementary row operations.
//! Every applied operation is recorded, so the matrix can be rolled back one step at a time.
//!
//! When constructed in augmented mode, an identity block is appended to the right of the
//! original columns; reducing the whole grid then leaves the inverse in that block.
//!

use super::operation::*;
use crate::error::MatrixError;
use crate::util::*;
use num_traits::{One, Zero};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RationalMatrix {
    /// `grid[i][k]` stores the entry at 1-based position `(i + 1, k + 1)`
    grid: Vec<Vec<Rational>>,
    /// currently applied operations, oldest first
    history: Vec<ElementaryRowOperation>,
    /// whether an identity block was appended at construction
    augmented: bool,
}

impl RationalMatrix {
    pub fn new(rows: Vec<Vec<Rational>>, augment: bool) -> Result<Self, MatrixError> {
        let height = rows.len();
        let width = rows.first().map(|row| row.len()).unwrap_or(0);
        if width == 0 {
            return Err(MatrixError::EmptyInput);
        }
        for (index, row) in rows.iter().enumerate().skip(1) {
            if row.len() != width {
                return Err(MatrixError::RaggedInput {
                    expected: width,
                    row: index + 1,
                    found: row.len(),
                });
            }
        }
        let mut grid = rows;
        if augment {
            for (index, row) in grid.iter_mut().enumerate() {
                row.extend((0..height).map(|k| if k == index { Rational::one() } else { Rational::zero() }));
            }
        }
        Ok(Self {
            grid,
            history: vec![],
            augmented: augment,
        })
    }

    pub fn new_plain(rows: Vec<Vec<Rational>>) -> Result<Self, MatrixError> {
        Self::new(rows, false)
    }

    /// append an identity block, used to compute the inverse alongside the reduction
    pub fn new_augmented(rows: Vec<Vec<Rational>>) -> Result<Self, MatrixError> {
        Self::new(rows, true)
    }

    pub fn from_integers(rows: &[Vec<i64>], augment: bool) -> Result<Self, MatrixError> {
        let rows = rows
            .iter()
            .map(|row| row.iter().map(|&value| rational_integer(value)).collect())
            .collect();
        Self::new(rows, augment)
    }

    pub fn rows(&self) -> usize {
        self.grid.len()
    }

    pub fn columns(&self) -> usize {
        self.grid[0].len()
    }

    pub fn is_augmented(&self) -> bool {
        self.augmented
    }

    /// the number of columns given at construction, excluding the identity block
    pub fn original_columns(&self) -> usize {
        if self.augmented {
            self.columns() - self.rows()
        } else {
            self.columns()
        }
    }

    pub fn get(&self, row: RowIndex, column: ColumnIndex) -> Result<&Rational, MatrixError> {
        self.check_row(row)?;
        if column == 0 || column > self.columns() {
            return Err(MatrixError::IndexOutOfRange {
                index: column,
                bound: self.columns(),
            });
        }
        Ok(&self.grid[row - 1][column - 1])
    }

    pub fn row(&self, row: RowIndex) -> Result<&[Rational], MatrixError> {
        self.check_row(row)?;
        Ok(&self.grid[row - 1])
    }

    pub fn to_rows(&self) -> Vec<Vec<Rational>> {
        self.grid.clone()
    }

    pub fn history(&self) -> &[ElementaryRowOperation] {
        &self.history
    }

    /// apply an operation and record it; nothing changes if any referenced row is out of range
    pub fn apply(&mut self, operation: ElementaryRowOperation) -> Result<(), MatrixError> {
        for row in operation.rows() {
            self.check_row(row)?;
        }
        self.perform(&operation);
        self.history.push(operation);
        Ok(())
    }

    /// roll back the latest operation, which is dropped for good; returns `None` on an empty history
    pub fn undo(&mut self) -> Option<ElementaryRowOperation> {
        let operation = self.history.pop()?;
        self.perform(&operation.inverse());
        Some(operation)
    }

    /// the original columns; for a plain matrix this is the whole grid
    pub fn left_block(&self) -> Vec<Vec<Rational>> {
        let width = self.original_columns();
        self.grid.iter().map(|row| row[..width].to_vec()).collect()
    }

    pub fn right_block(&self) -> Result<Vec<Vec<Rational>>, MatrixError> {
        if !self.augmented {
            return Err(MatrixError::NotAugmented);
        }
        let width = self.original_columns();
        Ok(self.grid.iter().map(|row| row[width..].to_vec()).collect())
    }

    /// read off the inverse once the original block has been reduced to the identity
    pub fn inverse(&self) -> Result<Vec<Vec<Rational>>, MatrixError> {
        let right_block = self.right_block()?;
        if self.original_columns() != self.rows() {
            return Err(MatrixError::Singular);
        }
        for (i, row) in self.left_block().iter().enumerate() {
            for (k, value) in row.iter().enumerate() {
                let expected_one = i == k;
                if (expected_one && !value.is_one()) || (!expected_one && !value.is_zero()) {
                    return Err(MatrixError::Singular);
                }
            }
        }
        Ok(right_block)
    }

    /// used by the eliminator whose operations are valid by construction
    pub(crate) fn apply_trusted(&mut self, operation: ElementaryRowOperation) {
        debug_assert!(operation.rows().iter().all(|&row| row >= 1 && row <= self.rows()));
        self.perform(&operation);
        self.history.push(operation);
    }

    pub(crate) fn entry(&self, row: RowIndex, column: ColumnIndex) -> &Rational {
        &self.grid[row - 1][column - 1]
    }

    fn check_row(&self, row: RowIndex) -> Result<(), MatrixError> {
        if row == 0 || row > self.rows() {
            return Err(MatrixError::IndexOutOfRange {
                index: row,
                bound: self.rows(),
            });
        }
        Ok(())
    }

    /// mutate the grid without touching the history; indices are already validated
    fn perform(&mut self, operation: &ElementaryRowOperation) {
        match operation {
            ElementaryRowOperation::Swap(swap) => {
                self.grid.swap(swap.i() - 1, swap.j() - 1);
            }
            ElementaryRowOperation::ScalarMultiply(multiplication) => {
                let r = multiplication.r();
                for value in self.grid[multiplication.i() - 1].iter_mut() {
                    *value = &*value * r;
                }
            }
            ElementaryRowOperation::AddScaledRow(sum) => {
                let (target, source) = Self::split_two_rows(&mut self.grid, sum.i() - 1, sum.j() - 1);
                let s = sum.s();
                for (value, source_value) in target.iter_mut().zip(source.iter()) {
                    *value = &*value + s * source_value;
                }
            }
        }
    }

    fn split_two_rows(
        grid: &mut [Vec<Rational>],
        target: usize,
        source: usize,
    ) -> (&mut Vec<Rational>, &Vec<Rational>) {
        debug_assert_ne!(target, source);
        if target < source {
            let (slice_1, slice_2) = grid.split_at_mut(source);
            (&mut slice_1[target], &slice_2[0])
        } else {
            let (slice_1, slice_2) = grid.split_at_mut(target);
            (&mut slice_2[0], &slice_1[source])
        }
    }
}
