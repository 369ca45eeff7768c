//! Purpose: Square and cube numeric values, singly or element-wise.
//! Exports: `square`, `cube`, `square_all`, `cube_all`, `Scalar`.
//! Role: Pure arithmetic; the generic forms inherit `Mul` overflow behavior of `T`.
//! Invariants: `cube(x) == square(x) * x` for every `T`.
//! Invariants: `Scalar` arithmetic never wraps or panics; overflow is an error.
use std::fmt;
use std::ops::Mul;

use serde::Serialize;

use crate::core::error::{Error, ErrorKind};

/// Returns `x * x`.
pub fn square<T>(x: T) -> T
where
    T: Mul<Output = T> + Copy,
{
    x * x
}

/// Returns `x * x * x`.
pub fn cube<T>(x: T) -> T
where
    T: Mul<Output = T> + Copy,
{
    square(x) * x
}

pub fn square_all<T>(xs: &[T]) -> Vec<T>
where
    T: Mul<Output = T> + Copy,
{
    xs.iter().copied().map(square).collect()
}

pub fn cube_all<T>(xs: &[T]) -> Vec<T>
where
    T: Mul<Output = T> + Copy,
{
    xs.iter().copied().map(cube).collect()
}

/// A number parsed from text: integers stay exact, everything else is `f64`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Scalar {
    Int(i64),
    Float(f64),
}

impl Scalar {
    pub fn parse(text: &str) -> Result<Self, Error> {
        let trimmed = text.trim();
        if let Ok(value) = trimmed.parse::<i64>() {
            return Ok(Scalar::Int(value));
        }
        match trimmed.parse::<f64>() {
            Ok(value) if value.is_finite() => {
                if is_integer_literal(trimmed) {
                    tracing::debug!(input = trimmed, "integer exceeds i64; using f64");
                }
                Ok(Scalar::Float(value))
            }
            _ => Err(Error::new(ErrorKind::Usage)
                .with_message(format!("not a finite number: {text:?}"))
                .with_hint("Pass an integer like 3 or a decimal like 1.5.")),
        }
    }

    pub fn square(self) -> Result<Self, Error> {
        match self {
            Scalar::Int(x) => x.checked_mul(x).map(Scalar::Int).ok_or_else(|| overflow(self)),
            Scalar::Float(x) => finite(square(x)).ok_or_else(|| overflow(self)),
        }
    }

    pub fn cube(self) -> Result<Self, Error> {
        match self {
            Scalar::Int(x) => x
                .checked_mul(x)
                .and_then(|sq| sq.checked_mul(x))
                .map(Scalar::Int)
                .ok_or_else(|| overflow(self)),
            Scalar::Float(x) => finite(cube(x)).ok_or_else(|| overflow(self)),
        }
    }
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scalar::Int(x) => write!(f, "{x}"),
            Scalar::Float(x) if uses_exponent(*x) => write!(f, "{x:e}"),
            Scalar::Float(x) => write!(f, "{x}"),
        }
    }
}

fn uses_exponent(x: f64) -> bool {
    let magnitude = x.abs();
    magnitude >= 1e16 || (magnitude != 0.0 && magnitude < 1e-6)
}

fn is_integer_literal(text: &str) -> bool {
    let digits = text.strip_prefix(['+', '-']).unwrap_or(text);
    !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit())
}

fn finite(value: f64) -> Option<Scalar> {
    value.is_finite().then_some(Scalar::Float(value))
}

fn overflow(input: Scalar) -> Error {
    Error::new(ErrorKind::Overflow).with_message(format!("result out of range for input {input}"))
}
