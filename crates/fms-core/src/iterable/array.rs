use std::fmt;
use std::ops::{Add, Index, Sub};

use crate::iterable::Iterable;

/// Window over borrowed contiguous storage.
///
/// The window always ends at the end of the buffer; advancing shrinks it
/// from the front and [`retreat`](Self::retreat) grows it back. Offsets are
/// clamped to the buffer, so a view can never point outside it.
pub struct ArrayView<'a, T> {
    buf: &'a [T],
    pos: usize,
}

impl<'a, T> ArrayView<'a, T> {
    pub fn new(buf: &'a [T]) -> Self {
        Self { buf, pos: 0 }
    }

    /// Elements left in the window.
    pub fn len(&self) -> usize {
        self.buf.len() - self.pos
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn as_slice(&self) -> &'a [T] {
        let buf: &'a [T] = self.buf;
        &buf[self.pos..]
    }

    pub fn get(&self, k: usize) -> Option<&'a T> {
        self.as_slice().get(k)
    }

    /// Grow the window by one element at the front, if there is room.
    pub fn retreat(&mut self) {
        self.pos = self.pos.saturating_sub(1);
    }
}

impl<T> Clone for ArrayView<'_, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for ArrayView<'_, T> {}

/// Two views are equal when they look at the same buffer from the same offset.
impl<T> PartialEq for ArrayView<'_, T> {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.buf, other.buf) && self.pos == other.pos
    }
}

impl<T: fmt::Debug> fmt::Debug for ArrayView<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ArrayView")
            .field("pos", &self.pos)
            .field("rest", &self.as_slice())
            .finish()
    }
}

impl<'a, T> From<&'a [T]> for ArrayView<'a, T> {
    fn from(buf: &'a [T]) -> Self {
        Self::new(buf)
    }
}

impl<'a, T> From<&'a Vec<T>> for ArrayView<'a, T> {
    fn from(buf: &'a Vec<T>) -> Self {
        Self::new(buf.as_slice())
    }
}

impl<T: Copy> Iterable for ArrayView<'_, T> {
    type Item = T;

    fn is_live(&self) -> bool {
        self.pos < self.buf.len()
    }

    fn current(&self) -> T {
        self.buf[self.pos]
    }

    fn advance(&mut self) {
        if self.pos < self.buf.len() {
            self.pos += 1;
        }
    }

    fn end(&self) -> Self {
        Self {
            buf: self.buf,
            pos: self.buf.len(),
        }
    }
}

impl<T> Add<usize> for ArrayView<'_, T> {
    type Output = Self;

    fn add(self, m: usize) -> Self {
        Self {
            buf: self.buf,
            pos: self.pos.saturating_add(m).min(self.buf.len()),
        }
    }
}

impl<T> Sub<usize> for ArrayView<'_, T> {
    type Output = Self;

    fn sub(self, m: usize) -> Self {
        Self {
            buf: self.buf,
            pos: self.pos.saturating_sub(m),
        }
    }
}

/// Element distance between two views of the same buffer.
impl<T> Sub for ArrayView<'_, T> {
    type Output = isize;

    fn sub(self, other: Self) -> isize {
        self.pos as isize - other.pos as isize
    }
}

impl<T> Index<usize> for ArrayView<'_, T> {
    type Output = T;

    fn index(&self, k: usize) -> &T {
        &self.as_slice()[k]
    }
}
