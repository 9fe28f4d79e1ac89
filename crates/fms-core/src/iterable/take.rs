use crate::iterable::{Iterable, drop};

/// At most `n` elements of `i`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Take<I> {
    n: usize,
    i: I,
}

impl<I> Take<I> {
    pub fn new(n: usize, i: I) -> Self {
        Self { n, i }
    }

    /// Steps left before the bound is reached.
    pub fn remaining(&self) -> usize {
        self.n
    }

    pub fn into_inner(self) -> I {
        self.i
    }
}

impl<I: Iterable> Iterable for Take<I> {
    type Item = I::Item;

    fn is_live(&self) -> bool {
        self.n != 0 && self.i.is_live()
    }

    fn current(&self) -> I::Item {
        self.i.current()
    }

    fn advance(&mut self) {
        if self.n > 0 {
            self.n -= 1;
            self.i.advance();
        }
    }

    fn end(&self) -> Self {
        Self {
            n: 0,
            i: drop(self.n, self.i.clone()),
        }
    }
}
