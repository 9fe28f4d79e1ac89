use std::fmt::{self, Display};

use crate::{ExcelError, ExcelErrorKind, Handle};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A worksheet value as seen by an add-in function.
///
/// Arrays are row-major `Vec<Vec<_>>`; a 1 x 1 array and a scalar are
/// interchangeable for argument purposes.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq, Default)]
pub enum LiteralValue {
    Int(i64),
    Number(f64),
    Text(String),
    Boolean(bool),
    Array(Vec<Vec<LiteralValue>>),
    /// Missing optional argument or blank cell.
    #[default]
    Empty,
    Error(ExcelError),
}

impl Display for LiteralValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LiteralValue::Int(i) => write!(f, "{i}"),
            LiteralValue::Number(n) => write!(f, "{n}"),
            LiteralValue::Text(s) => write!(f, "{s}"),
            LiteralValue::Boolean(b) => write!(f, "{b}"),
            LiteralValue::Error(e) => write!(f, "{e}"),
            LiteralValue::Array(a) => write!(f, "{a:?}"),
            LiteralValue::Empty => write!(f, ""),
        }
    }
}

impl From<f64> for LiteralValue {
    fn from(n: f64) -> Self {
        LiteralValue::Number(n)
    }
}

impl From<bool> for LiteralValue {
    fn from(b: bool) -> Self {
        LiteralValue::Boolean(b)
    }
}

impl From<Handle> for LiteralValue {
    fn from(h: Handle) -> Self {
        LiteralValue::Number(h.to_f64())
    }
}

impl LiteralValue {
    pub fn is_empty(&self) -> bool {
        matches!(self, LiteralValue::Empty)
    }

    /// Collapse a 1 x 1 array to its single element.
    pub fn as_scalar(&self) -> &LiteralValue {
        match self {
            LiteralValue::Array(a) if a.len() == 1 && a[0].len() == 1 => &a[0][0],
            other => other,
        }
    }

    /// Numeric coercion with Excel semantics for scalar arguments.
    /// - Number/Int map to f64
    /// - Boolean maps to 1.0/0.0
    /// - Empty maps to 0.0
    /// - Errors propagate, anything else is `#VALUE!`
    pub fn as_number(&self) -> Result<f64, ExcelError> {
        match self.as_scalar() {
            LiteralValue::Int(i) => Ok(*i as f64),
            LiteralValue::Number(n) => Ok(*n),
            LiteralValue::Boolean(b) => Ok(if *b { 1.0 } else { 0.0 }),
            LiteralValue::Empty => Ok(0.0),
            LiteralValue::Error(e) => Err(e.clone()),
            other => Err(ExcelError::new(ExcelErrorKind::Value)
                .with_message(format!("expected a number, got {other}"))),
        }
    }

    /// Like [`as_number`](Self::as_number) but an empty argument, or a 1 x 1
    /// array holding an empty cell, yields `default`.
    pub fn as_number_or(&self, default: f64) -> Result<f64, ExcelError> {
        if self.as_scalar().is_empty() {
            Ok(default)
        } else {
            self.as_number()
        }
    }

    /// Scalar value interpreted as a handle, if it looks like one.
    pub fn as_handle(&self) -> Option<Handle> {
        match self.as_scalar() {
            LiteralValue::Number(n) => Handle::from_f64(*n),
            LiteralValue::Int(i) if *i > 0 => Some(Handle::new(*i as u64)),
            _ => None,
        }
    }

    /// Row/column shape; scalars are 1 x 1 and `Empty` is 0 x 0.
    pub fn shape(&self) -> (usize, usize) {
        match self {
            LiteralValue::Array(a) => (a.len(), a.first().map_or(0, Vec::len)),
            LiteralValue::Empty => (0, 0),
            _ => (1, 1),
        }
    }
}
