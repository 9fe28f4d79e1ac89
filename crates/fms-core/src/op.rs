//! Nullary, unary and binary operations over a scalar type.
//!
//! Each arity is an object-safe trait so that "some binary operation" can be
//! picked at run time and stored behind `&dyn BinOp<X>` or `Arc<dyn BinOp<X>>`.
//! The named operations are the [`Unary`] and [`Binary`] enums; closures plug
//! in through [`Func`].

use std::fmt::Debug;
use std::sync::Arc;

use num_traits::{Bounded, Num, NumCast};

/// Numeric element type the named operations are defined for.
///
/// Logical operations treat any non-zero value as true and encode results
/// as `1`/`0`. Bitwise operations on floats act on the value truncated to
/// `i64`. The `checked_*` methods return `None` on integer overflow and
/// never fail for floats.
pub trait Scalar: Copy + PartialOrd + Num + Bounded + NumCast + Debug {
    fn checked_add(self, other: Self) -> Option<Self>;
    fn checked_sub(self, other: Self) -> Option<Self>;
    fn checked_mul(self, other: Self) -> Option<Self>;
    fn negate(self) -> Self;
    fn bit_and(self, other: Self) -> Self;
    fn bit_or(self, other: Self) -> Self;
    fn bit_xor(self, other: Self) -> Self;
    fn bit_not(self) -> Self;

    fn truth(self) -> bool {
        self != Self::zero()
    }

    fn from_bool(b: bool) -> Self {
        if b { Self::one() } else { Self::zero() }
    }
}

macro_rules! int_scalar {
    ($($t:ty),+ $(,)?) => {
        $(
            impl Scalar for $t {
                fn checked_add(self, other: Self) -> Option<Self> {
                    <$t>::checked_add(self, other)
                }
                fn checked_sub(self, other: Self) -> Option<Self> {
                    <$t>::checked_sub(self, other)
                }
                fn checked_mul(self, other: Self) -> Option<Self> {
                    <$t>::checked_mul(self, other)
                }
                fn negate(self) -> Self {
                    self.wrapping_neg()
                }
                fn bit_and(self, other: Self) -> Self {
                    self & other
                }
                fn bit_or(self, other: Self) -> Self {
                    self | other
                }
                fn bit_xor(self, other: Self) -> Self {
                    self ^ other
                }
                fn bit_not(self) -> Self {
                    !self
                }
            }
        )+
    };
}

macro_rules! float_scalar {
    ($($t:ty),+ $(,)?) => {
        $(
            impl Scalar for $t {
                fn checked_add(self, other: Self) -> Option<Self> {
                    Some(self + other)
                }
                fn checked_sub(self, other: Self) -> Option<Self> {
                    Some(self - other)
                }
                fn checked_mul(self, other: Self) -> Option<Self> {
                    Some(self * other)
                }
                fn negate(self) -> Self {
                    -self
                }
                fn bit_and(self, other: Self) -> Self {
                    ((self as i64) & (other as i64)) as $t
                }
                fn bit_or(self, other: Self) -> Self {
                    ((self as i64) | (other as i64)) as $t
                }
                fn bit_xor(self, other: Self) -> Self {
                    ((self as i64) ^ (other as i64)) as $t
                }
                fn bit_not(self) -> Self {
                    (!(self as i64)) as $t
                }
            }
        )+
    };
}

int_scalar!(i8, i16, i32, i64, isize, u8, u16, u32, u64, usize);
float_scalar!(f32, f64);

/* ───────────────────────── traits ───────────────────────── */

/// Constant function.
pub trait NullOp<X> {
    fn apply(&self) -> X;
}

pub trait UnOp<X> {
    fn apply(&self, x: X) -> X;
}

pub trait BinOp<X> {
    fn apply(&self, x: X, y: X) -> X;
}

macro_rules! forward_op {
    ($tr:ident $(, $arg:ident)*) => {
        impl<X, T: $tr<X> + ?Sized> $tr<X> for &T {
            fn apply(&self $(, $arg: X)*) -> X {
                (**self).apply($($arg),*)
            }
        }
        impl<X, T: $tr<X> + ?Sized> $tr<X> for Box<T> {
            fn apply(&self $(, $arg: X)*) -> X {
                (**self).apply($($arg),*)
            }
        }
        impl<X, T: $tr<X> + ?Sized> $tr<X> for Arc<T> {
            fn apply(&self $(, $arg: X)*) -> X {
                (**self).apply($($arg),*)
            }
        }
    };
}

forward_op!(NullOp);
forward_op!(UnOp, x);
forward_op!(BinOp, x, y);

/* ───────────────────────── nullary ───────────────────────── */

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Constant<X>(pub X);

impl<X: Scalar> Constant<X> {
    pub fn zero() -> Self {
        Self(X::zero())
    }

    pub fn one() -> Self {
        Self(X::one())
    }

    /// Most negative representable value; identity for `max`.
    pub fn lowest() -> Self {
        Self(X::min_value())
    }

    /// Most positive representable value; identity for `min`.
    pub fn highest() -> Self {
        Self(X::max_value())
    }
}

impl<X: Copy> NullOp<X> for Constant<X> {
    fn apply(&self) -> X {
        self.0
    }
}

/* ───────────────────────── unary ───────────────────────── */

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Unary {
    Identity,
    Negate,
    Not,
    BitNot,
}

impl Unary {
    pub const ALL: [Unary; 4] = [Unary::Identity, Unary::Negate, Unary::Not, Unary::BitNot];

    pub fn name(self) -> &'static str {
        match self {
            Unary::Identity => "id",
            Unary::Negate => "neg",
            Unary::Not => "not",
            Unary::BitNot => "bit_not",
        }
    }

    pub fn from_name(s: &str) -> Option<Self> {
        let s = s.trim();
        Self::ALL.into_iter().find(|u| u.name().eq_ignore_ascii_case(s))
    }
}

impl<X: Scalar> UnOp<X> for Unary {
    fn apply(&self, x: X) -> X {
        match self {
            Unary::Identity => x,
            Unary::Negate => x.negate(),
            Unary::Not => X::from_bool(!x.truth()),
            Unary::BitNot => x.bit_not(),
        }
    }
}

/// A binary operation with its right operand fixed: `x -> op(x, y)`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BoundRight<X> {
    pub op: Binary,
    pub y: X,
}

impl<X: Scalar> UnOp<X> for BoundRight<X> {
    fn apply(&self, x: X) -> X {
        self.op.apply(x, self.y)
    }
}

/* ───────────────────────── binary ───────────────────────── */

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Binary {
    Add,
    Sub,
    Mul,
    Div,
    Mod,
    Max,
    Min,
    And,
    Or,
    BitAnd,
    BitOr,
    BitXor,
    Lt,
    Le,
    Gt,
    Ge,
    Eq,
    Ne,
}

impl Binary {
    pub const ALL: [Binary; 18] = [
        Binary::Add,
        Binary::Sub,
        Binary::Mul,
        Binary::Div,
        Binary::Mod,
        Binary::Max,
        Binary::Min,
        Binary::And,
        Binary::Or,
        Binary::BitAnd,
        Binary::BitOr,
        Binary::BitXor,
        Binary::Lt,
        Binary::Le,
        Binary::Gt,
        Binary::Ge,
        Binary::Eq,
        Binary::Ne,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Binary::Add => "add",
            Binary::Sub => "sub",
            Binary::Mul => "mul",
            Binary::Div => "div",
            Binary::Mod => "mod",
            Binary::Max => "max",
            Binary::Min => "min",
            Binary::And => "and",
            Binary::Or => "or",
            Binary::BitAnd => "bit_and",
            Binary::BitOr => "bit_or",
            Binary::BitXor => "bit_xor",
            Binary::Lt => "lt",
            Binary::Le => "le",
            Binary::Gt => "gt",
            Binary::Ge => "ge",
            Binary::Eq => "eq",
            Binary::Ne => "ne",
        }
    }

    pub fn from_name(s: &str) -> Option<Self> {
        let s = s.trim();
        Self::ALL.into_iter().find(|b| b.name().eq_ignore_ascii_case(s))
    }

    /// Fix the right operand, e.g. `Binary::Ge.bind_right(y)` is `x >= y`.
    pub fn bind_right<X>(self, y: X) -> BoundRight<X> {
        BoundRight { op: self, y }
    }
}

impl<X: Scalar> BinOp<X> for Binary {
    fn apply(&self, x: X, y: X) -> X {
        match self {
            Binary::Add => x + y,
            Binary::Sub => x - y,
            Binary::Mul => x * y,
            Binary::Div => x / y,
            Binary::Mod => x % y,
            // first argument wins ties, as with std::max
            Binary::Max => {
                if x < y {
                    y
                } else {
                    x
                }
            }
            Binary::Min => {
                if y < x {
                    y
                } else {
                    x
                }
            }
            Binary::And => X::from_bool(x.truth() && y.truth()),
            Binary::Or => X::from_bool(x.truth() || y.truth()),
            Binary::BitAnd => x.bit_and(y),
            Binary::BitOr => x.bit_or(y),
            Binary::BitXor => x.bit_xor(y),
            Binary::Lt => X::from_bool(x < y),
            Binary::Le => X::from_bool(x <= y),
            Binary::Gt => X::from_bool(x > y),
            Binary::Ge => X::from_bool(x >= y),
            Binary::Eq => X::from_bool(x == y),
            Binary::Ne => X::from_bool(x != y),
        }
    }
}

/* ───────────────────────── closures ───────────────────────── */

/// Adapter that lets a plain closure stand in for an operation.
#[derive(Clone, Copy)]
pub struct Func<F>(pub F);

impl<X, F: Fn() -> X> NullOp<X> for Func<F> {
    fn apply(&self) -> X {
        (self.0)()
    }
}

impl<X, F: Fn(X) -> X> UnOp<X> for Func<F> {
    fn apply(&self, x: X) -> X {
        (self.0)(x)
    }
}

impl<X, F: Fn(X, X) -> X> BinOp<X> for Func<F> {
    fn apply(&self, x: X, y: X) -> X {
        (self.0)(x, y)
    }
}
