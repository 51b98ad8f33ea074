//! Exact rational Gauss-Jordan elimination.
//!
//! A [`matrix::RationalMatrix`] changes only through [`matrix::ElementaryRowOperation`]s, each of
//! which is recorded so it can be undone. [`matrix::AutoEliminator`] drives a matrix into reduced
//! row-echelon form; with an appended identity block the same reduction yields the inverse.
//!

extern crate serde;
#[macro_use]
extern crate serde_json;
extern crate cfg_if;
extern crate clap;
extern crate derivative;
extern crate itertools;
#[macro_use]
extern crate lazy_static;
extern crate num_bigint;
extern crate num_rational;
extern crate num_traits;
extern crate parking_lot;
extern crate prettytable;
extern crate thiserror;

#[cfg(feature = "cli")]
pub mod cli;
pub mod error;
pub mod matrix;
pub mod pointers;
pub mod util;
