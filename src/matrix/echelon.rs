//! Automatic Elimination
//!
//! Gauss-Jordan reduction driven column by column: in each column the first nonzero entry at or
//! below the current pivot row is moved up, normalized to 1 and used to clear every other entry
//! of that column. Every step goes through [`RationalMatrix::apply`] semantics, so the whole
//! reduction lands in the history and can be undone in reverse.
//!

use super::basic::*;
use super::operation::*;
use crate::error::MatrixError;
use crate::util::*;
use derivative::Derivative;
use more_asserts::debug_assert_le;
use num_traits::{One, Zero};

/// single-use driver of one reduction; it borrows the matrix and is consumed by [`Self::eliminate`]
#[derive(Debug)]
pub struct AutoEliminator<'a> {
    matrix: &'a mut RationalMatrix,
    /// the row that receives the next pivot, `1..=rows+1`
    current_pivot_row: RowIndex,
    info: EchelonInfo,
}

impl<'a> AutoEliminator<'a> {
    pub fn new(matrix: &'a mut RationalMatrix) -> Self {
        let info = EchelonInfo {
            columns: vec![ColumnInfo::no_pivot(); matrix.columns()],
            rows: vec![],
            operations: 0,
        };
        Self {
            matrix,
            current_pivot_row: 1,
            info,
        }
    }

    pub fn current_pivot_row(&self) -> RowIndex {
        self.current_pivot_row
    }

    /// the first row in the eligible band `current_pivot_row..=rows` with a nonzero entry in `column`
    pub fn find_pivot_row(&self, column: ColumnIndex) -> Option<RowIndex> {
        (self.current_pivot_row..=self.matrix.rows()).find(|&row| !self.matrix.entry(row, column).is_zero())
    }

    fn emit(&mut self, operation: ElementaryRowOperation) {
        self.matrix.apply_trusted(operation);
        self.info.operations += 1;
    }

    pub fn process_column(&mut self, column: ColumnIndex) {
        let Some(found) = self.find_pivot_row(column) else {
            // only zeros at and below the current row
            return;
        };
        let pivot_row = self.current_pivot_row;
        if found != pivot_row {
            self.emit(RowSwap::new_unchecked(pivot_row, found).into());
        }
        let pivot = self.matrix.entry(pivot_row, column);
        if !pivot.is_one() {
            let recip = pivot.recip();
            self.emit(ScalarMultiplication::new_unchecked(pivot_row, recip).into());
        }
        for row in 1..=self.matrix.rows() {
            if row == pivot_row {
                continue;
            }
            let value = self.matrix.entry(row, column);
            if value.is_zero() {
                continue;
            }
            let scale = -value.clone();
            self.emit(RowSum::new_unchecked(row, pivot_row, scale).into());
        }
        self.info.columns[column - 1].set(pivot_row);
        self.info.rows.push(RowInfo { column });
        self.current_pivot_row += 1;
    }

    /// reduce the matrix into reduced row-echelon form, across the identity block too if augmented
    pub fn eliminate(mut self) -> EchelonInfo {
        for column in 1..=self.matrix.columns() {
            self.process_column(column);
        }
        debug_assert_le!(self.current_pivot_row, self.matrix.rows() + 1);
        self.info
    }
}

impl RationalMatrix {
    pub fn eliminate(&mut self) -> EchelonInfo {
        AutoEliminator::new(self).eliminate()
    }

    /// reduce an augmented matrix and read off the inverse of its original block
    pub fn eliminate_inverse(&mut self) -> Result<Vec<Vec<Rational>>, MatrixError> {
        if !self.is_augmented() {
            return Err(MatrixError::NotAugmented);
        }
        self.eliminate();
        self.inverse()
    }
}

/// each pivot is 1, is the only nonzero entry of its column, and pivots move strictly right going down;
/// zero rows only appear below every pivot row
pub fn is_reduced_row_echelon(matrix: &RationalMatrix) -> bool {
    let mut last_pivot_column = 0;
    let mut seen_zero_row = false;
    for row in 1..=matrix.rows() {
        let Some(column) = (1..=matrix.columns()).find(|&column| !matrix.entry(row, column).is_zero()) else {
            seen_zero_row = true;
            continue;
        };
        if seen_zero_row || column <= last_pivot_column || !matrix.entry(row, column).is_one() {
            return false;
        }
        if (1..=matrix.rows()).any(|other| other != row && !matrix.entry(other, column).is_zero()) {
            return false;
        }
        last_pivot_column = column;
    }
    true
}

/// summary of one elimination run
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EchelonInfo {
    /// for every column, the row holding its pivot if any
    pub columns: Vec<ColumnInfo>,
    /// for every pivot row in order, the column of its pivot
    pub rows: Vec<RowInfo>,
    /// the number of operations appended to the history
    pub operations: usize,
}

impl EchelonInfo {
    pub fn rank(&self) -> usize {
        self.rows.len()
    }

    /// the pivot columns in order of their rows
    pub fn pivot_columns(&self) -> Vec<ColumnIndex> {
        self.rows.iter().map(|row_info| row_info.column).collect()
    }
}

#[derive(Clone, Copy, Derivative, PartialEq, Eq)]
#[derivative(Default(new = "true"))]
pub struct ColumnInfo {
    pub row: RowIndex,
}

impl ColumnInfo {
    pub fn no_pivot() -> Self {
        Self { row: RowIndex::MAX }
    }
    pub fn set(&mut self, row: RowIndex) {
        debug_assert!(row != RowIndex::MAX);
        self.row = row;
    }
    pub fn has_pivot(&self) -> bool {
        self.row != RowIndex::MAX
    }
}

impl std::fmt::Debug for ColumnInfo {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        if !self.has_pivot() {
            write!(f, "Row(*)")
        } else {
            write!(f, "Row({})", self.row)
        }
    }
}

#[derive(Clone, Copy, Derivative, PartialEq, Eq)]
#[derivative(Default(new = "true"))]
pub struct RowInfo {
    pub column: ColumnIndex,
}

impl std::fmt::Debug for RowInfo {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "Col({})", self.column)
    }
}
