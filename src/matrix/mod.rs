pub mod basic;
pub mod echelon;
pub mod operation;
pub mod visualize;

pub use basic::RationalMatrix;
pub use echelon::{is_reduced_row_echelon, AutoEliminator, ColumnInfo, EchelonInfo, RowInfo};
pub use operation::*;
pub use visualize::{MatrixSnapshot, VizTable, VizTrait};
