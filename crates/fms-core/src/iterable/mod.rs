//! Forward-only, copyable sequence positions.
//!
//! An [`Iterable`] is a position in a sequence: it can say whether it is
//! exhausted, read the element under it and step forward. Positions are
//! plain values, so a clone is an independent snapshot. Every iterable can
//! also manufacture its own `end()` landmark, which compares equal to any
//! position reached by advancing far enough.
//!
//! Combinators: [`Iota`] (arithmetic progression), [`ArrayView`] (borrowed
//! slice window), [`Take`] (length bound) and [`Cap`] (sorted
//! intersection). The free functions [`equal`], [`size`], [`size_from`],
//! [`drop`] and [`ge`] work on any iterable.

mod array;
mod cap;
mod iota;
mod take;

pub use array::ArrayView;
pub use cap::Cap;
pub use iota::Iota;
pub use take::Take;

pub trait Iterable: Clone + PartialEq {
    type Item;

    /// `false` once the sequence is exhausted.
    fn is_live(&self) -> bool;

    /// Element under the position. Only meaningful while `is_live()`.
    fn current(&self) -> Self::Item;

    /// Step forward. A no-op on an exhausted position.
    fn advance(&mut self);

    /// The landmark an exhausted copy of `self` compares equal to.
    fn end(&self) -> Self;

    fn begin(&self) -> Self {
        self.clone()
    }

    /// Advance, returning the position from before the step.
    fn post_advance(&mut self) -> Self {
        let prev = self.clone();
        self.advance();
        prev
    }

    fn iter(self) -> Iter<Self>
    where
        Self: Sized,
    {
        Iter(self)
    }
}

/// [`Iterator`] adapter over an [`Iterable`].
#[derive(Clone, Debug)]
pub struct Iter<I>(I);

impl<I> Iter<I> {
    pub fn into_inner(self) -> I {
        self.0
    }
}

impl<I: Iterable> Iterator for Iter<I> {
    type Item = I::Item;

    fn next(&mut self) -> Option<I::Item> {
        if self.0.is_live() {
            let x = self.0.current();
            self.0.advance();
            Some(x)
        } else {
            None
        }
    }
}

/// Lock-step comparison. True only if every pair matches and both sides run
/// out at the same time.
pub fn equal<I, J>(mut i: I, mut j: J) -> bool
where
    I: Iterable,
    J: Iterable,
    I::Item: PartialEq<J::Item>,
{
    loop {
        match (i.is_live(), j.is_live()) {
            (true, true) => {
                if i.current() != j.current() {
                    return false;
                }
                i.advance();
                j.advance();
            }
            (false, false) => return true,
            _ => return false,
        }
    }
}

/// Number of elements left in `i`. Does not terminate on unbounded input.
pub fn size<I: Iterable>(i: I) -> usize {
    size_from(i, 0)
}

/// `n` plus the number of elements left in `i`.
pub fn size_from<I: Iterable>(mut i: I, mut n: usize) -> usize {
    while i.is_live() {
        i.advance();
        n += 1;
    }
    n
}

/// Advance `i` by `n` steps, stopping early if it runs out.
pub fn drop<I: Iterable>(mut n: usize, mut i: I) -> I {
    while n > 0 && i.is_live() {
        i.advance();
        n -= 1;
    }
    i
}

/// First position at or after `i` whose element is `>= t`, or an exhausted
/// position if there is none.
pub fn ge<I>(mut i: I, t: I::Item) -> I
where
    I: Iterable,
    I::Item: PartialOrd,
{
    skip_below(&mut i, &t);
    i
}

pub(crate) fn skip_below<I>(i: &mut I, t: &I::Item)
where
    I: Iterable,
    I::Item: PartialOrd,
{
    while i.is_live() && i.current() < *t {
        i.advance();
    }
}
