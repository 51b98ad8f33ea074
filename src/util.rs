//! Utilities
//!
//! The exact rational entry type shared by every matrix, together with the parsers that turn
//! textual literals such as `3`, `-2/4` or `1.25` into it.
//!

use crate::error::ParseError;
use num_traits::{pow, Zero};
use serde::Serializer;
use std::str::FromStr;

cfg_if::cfg_if! {
    if #[cfg(feature="r64_rational")] {
        pub type Integer = i64;
        pub type Rational = num_rational::Rational64;
    } else {
        pub type Integer = num_bigint::BigInt;
        pub type Rational = num_rational::BigRational;
    }
}

/// 1-based row index, matching the conventional matrix notation `a_{ij}`
pub type RowIndex = usize;
/// 1-based column index
pub type ColumnIndex = usize;

pub fn rational(numer: i64, denom: i64) -> Rational {
    Rational::new(Integer::from(numer), Integer::from(denom))
}

pub fn rational_integer(value: i64) -> Rational {
    Rational::from_integer(Integer::from(value))
}

/// parse a rational literal: an integer `-3`, a fraction `6/4` or a decimal `0.25`;
/// the result is always in lowest terms with a positive denominator
pub fn parse_rational(literal: &str) -> Result<Rational, ParseError> {
    let literal = literal.trim();
    let error = || ParseError::Rational(literal.to_string());
    if literal.is_empty() {
        return Err(error());
    }
    if let Some((whole, fraction)) = literal.split_once('.') {
        if fraction.is_empty() || !fraction.chars().all(|c| c.is_ascii_digit()) || literal.contains('/') {
            return Err(error());
        }
        let negative = whole.starts_with('-');
        let whole = whole.strip_prefix(&['-', '+'][..]).unwrap_or(whole);
        if !whole.chars().all(|c| c.is_ascii_digit()) {
            return Err(error());
        }
        let digits = format!("{whole}{fraction}");
        let numer = Integer::from_str(&digits).map_err(|_| error())?;
        let denom: Integer = pow(Integer::from(10u8), fraction.len());
        let value = Rational::new(numer, denom);
        return Ok(if negative { -value } else { value });
    }
    if let Some((_, denom)) = literal.split_once('/') {
        // `Ratio::from_str` panics on a zero denominator
        if Integer::from_str(denom.trim()).map_err(|_| error())?.is_zero() {
            return Err(error());
        }
    }
    Rational::from_str(literal).map_err(|_| error())
}

/// parse a whitespace separated row of rational literals
pub fn parse_row(line: &str) -> Result<Vec<Rational>, ParseError> {
    line.split_whitespace().map(parse_rational).collect()
}

pub fn parse_rows<S: AsRef<str>>(lines: &[S]) -> Result<Vec<Vec<Rational>>, ParseError> {
    lines.iter().map(|line| parse_row(line.as_ref())).collect()
}

pub fn parse_index(literal: &str) -> Result<RowIndex, ParseError> {
    RowIndex::from_str(literal.trim()).map_err(|_| ParseError::Index(literal.to_string()))
}

/// rationals are serialized as their display string (`n` or `n/d`) so that big integers survive JSON
pub fn serialize_rational<S: Serializer>(value: &Rational, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&value.to_string())
}

pub fn rationals_to_strings(rows: &[Vec<Rational>]) -> Vec<Vec<String>> {
    rows.iter()
        .map(|row| row.iter().map(|value| value.to_string()).collect())
        .collect()
}
