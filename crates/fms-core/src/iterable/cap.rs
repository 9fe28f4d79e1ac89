use crate::iterable::{Iterable, skip_below};

/// Intersection of two strictly increasing sequences.
///
/// After construction and after every advance, either one side is
/// exhausted or both sides sit on the same value. Unsorted input gives an
/// unspecified (but terminating, for finite input) result.
///
/// Test for termination with `is_live()`. A `Cap` stops as soon as one side
/// runs out, so it need not compare equal to `end()`, which exhausts both.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Cap<I, J = I> {
    i: I,
    j: J,
}

impl<I, J> Cap<I, J>
where
    I: Iterable,
    J: Iterable<Item = I::Item>,
    I::Item: PartialOrd,
{
    pub fn new(i: I, j: J) -> Self {
        let mut cap = Self { i, j };
        cap.align();
        cap
    }

    fn align(&mut self) {
        while self.i.is_live() && self.j.is_live() {
            let (x, y) = (self.i.current(), self.j.current());
            if x < y {
                skip_below(&mut self.i, &y);
            } else if y < x {
                skip_below(&mut self.j, &x);
            } else {
                break;
            }
        }
    }
}

impl<I, J> Iterable for Cap<I, J>
where
    I: Iterable,
    J: Iterable<Item = I::Item>,
    I::Item: PartialOrd,
{
    type Item = I::Item;

    fn is_live(&self) -> bool {
        self.i.is_live() && self.j.is_live()
    }

    fn current(&self) -> I::Item {
        self.i.current()
    }

    fn advance(&mut self) {
        if self.is_live() {
            self.i.advance();
            self.j.advance();
            self.align();
        }
    }

    fn end(&self) -> Self {
        Self {
            i: self.i.end(),
            j: self.j.end(),
        }
    }
}
