//! Monoids: an identity element paired with an associative operation.
//!
//! The [`Monoid`] trait is object safe, so the add-in layer can keep
//! `Arc<dyn Monoid<f64>>` values in a handle table and pick one at run time.
//! Associativity and the identity laws are the implementor's promise; nothing
//! here checks them.

use std::sync::Arc;

use crate::iterable::Iterable;
use crate::op::{BinOp, Binary, NullOp, Scalar};

pub trait Monoid<X> {
    fn identity(&self) -> X;
    fn op(&self, x: X, y: X) -> X;
}

impl<X, M: Monoid<X> + ?Sized> Monoid<X> for &M {
    fn identity(&self) -> X {
        (**self).identity()
    }
    fn op(&self, x: X, y: X) -> X {
        (**self).op(x, y)
    }
}

impl<X, M: Monoid<X> + ?Sized> Monoid<X> for Box<M> {
    fn identity(&self) -> X {
        (**self).identity()
    }
    fn op(&self, x: X, y: X) -> X {
        (**self).op(x, y)
    }
}

impl<X, M: Monoid<X> + ?Sized> Monoid<X> for Arc<M> {
    fn identity(&self) -> X {
        (**self).identity()
    }
    fn op(&self, x: X, y: X) -> X {
        (**self).op(x, y)
    }
}

/// A monoid assembled from any nullary and binary operation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Composed<N, B> {
    pub id: N,
    pub op: B,
}

impl<N, B> Composed<N, B> {
    pub fn new(id: N, op: B) -> Self {
        Self { id, op }
    }
}

impl<X, N: NullOp<X>, B: BinOp<X>> Monoid<X> for Composed<N, B> {
    fn identity(&self) -> X {
        self.id.apply()
    }
    fn op(&self, x: X, y: X) -> X {
        self.op.apply(x, y)
    }
}

/// The four monoids every numeric type has.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Standard {
    /// `+`, identity 0
    Add,
    /// `*`, identity 1
    Mul,
    /// `max`, identity is the most negative value
    Max,
    /// `min`, identity is the most positive value
    Min,
}

impl Standard {
    pub const ALL: [Standard; 4] = [Standard::Add, Standard::Mul, Standard::Max, Standard::Min];

    pub fn name(self) -> &'static str {
        self.binop().name()
    }

    pub fn from_name(s: &str) -> Option<Self> {
        let s = s.trim();
        Self::ALL.into_iter().find(|m| m.name().eq_ignore_ascii_case(s))
    }

    pub fn binop(self) -> Binary {
        match self {
            Standard::Add => Binary::Add,
            Standard::Mul => Binary::Mul,
            Standard::Max => Binary::Max,
            Standard::Min => Binary::Min,
        }
    }
}

impl<X: Scalar> Monoid<X> for Standard {
    fn identity(&self) -> X {
        match self {
            Standard::Add => X::zero(),
            Standard::Mul => X::one(),
            Standard::Max => X::min_value(),
            Standard::Min => X::max_value(),
        }
    }

    fn op(&self, x: X, y: X) -> X {
        self.binop().apply(x, y)
    }
}

/// `op(x1, op(x2, ... op(xn-1, xn)))`; the identity for an empty slice.
pub fn fold<X: Copy, M: Monoid<X> + ?Sized>(m: &M, xs: &[X]) -> X {
    match xs.split_last() {
        None => m.identity(),
        Some((&last, init)) => init.iter().rev().fold(last, |acc, &x| m.op(x, acc)),
    }
}

/// Variadic [`fold`](crate::monoid::fold): `fold!(m, a, b, c)` is
/// `m.op(a, m.op(b, c))` and `fold!(m)` is `m.identity()`.
#[macro_export]
macro_rules! fold {
    ($m:expr $(,)?) => {
        $crate::Monoid::identity(&$m)
    };
    ($m:expr, $x:expr $(,)?) => {{
        let _ = &$m;
        $x
    }};
    ($m:expr, $x:expr, $($rest:expr),+ $(,)?) => {{
        let m = &$m;
        $crate::Monoid::op(m, $x, $crate::fold!(*m, $($rest),+))
    }};
}

/// Left fold of a finite iterable, seeded with the identity.
pub fn reduce<X, M, I>(m: &M, mut i: I) -> X
where
    M: Monoid<X> + ?Sized,
    I: Iterable<Item = X>,
{
    let mut acc = m.identity();
    while i.is_live() {
        acc = m.op(acc, i.current());
        i.advance();
    }
    acc
}

/// Running fold over an iterable.
///
/// The first element is the identity and the `k`-th is the left fold of the
/// first `k` inputs, so `n` inputs produce `n + 1` values.
#[derive(Debug)]
pub struct Foldable<'m, M: ?Sized, I: Iterable> {
    m: &'m M,
    i: I,
    t: I::Item,
    done: bool,
}

impl<'m, M, I> Foldable<'m, M, I>
where
    M: Monoid<I::Item> + ?Sized,
    I: Iterable,
{
    pub fn new(m: &'m M, i: I) -> Self {
        Self {
            m,
            t: m.identity(),
            i,
            done: false,
        }
    }

    pub fn monoid(&self) -> &'m M {
        self.m
    }
}

impl<M: ?Sized, I> Clone for Foldable<'_, M, I>
where
    I: Iterable,
    I::Item: Clone,
{
    fn clone(&self) -> Self {
        Self {
            m: self.m,
            i: self.i.clone(),
            t: self.t.clone(),
            done: self.done,
        }
    }
}

/// Positions compare by monoid identity and inner position; all exhausted
/// scans over the same monoid are equal.
impl<M: ?Sized, I: Iterable> PartialEq for Foldable<'_, M, I> {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::addr_eq(self.m, other.m)
            && self.done == other.done
            && (self.done || self.i == other.i)
    }
}

impl<M, I> Iterable for Foldable<'_, M, I>
where
    M: Monoid<I::Item> + ?Sized,
    I: Iterable,
    I::Item: Clone,
{
    type Item = I::Item;

    fn is_live(&self) -> bool {
        !self.done
    }

    fn current(&self) -> I::Item {
        self.t.clone()
    }

    fn advance(&mut self) {
        if self.done {
            return;
        }
        if self.i.is_live() {
            let x = self.i.current();
            self.t = self.m.op(self.t.clone(), x);
            self.i.advance();
        } else {
            self.done = true;
        }
    }

    fn end(&self) -> Self {
        Self {
            m: self.m,
            i: self.i.end(),
            t: self.t.clone(),
            done: true,
        }
    }
}
