use std::ops::{Add, Sub};

use crate::iterable::Iterable;
use crate::op::Scalar;

/// Arithmetic progression `t, t + dt, t + 2dt, ...`.
///
/// The progression never runs out on its own. The largest value of `T`
/// serves as the `end()` landmark and is the only position that reports
/// itself exhausted.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Iota<T> {
    t: T,
    dt: T,
}

impl<T: Scalar> Iota<T> {
    /// Unit step.
    pub fn new(t: T) -> Self {
        Self { t, dt: T::one() }
    }

    pub fn with_step(t: T, dt: T) -> Self {
        Self { t, dt }
    }

    /// A progression that repeats `t`.
    pub fn constant(t: T) -> Self {
        Self { t, dt: T::zero() }
    }

    pub fn step(&self) -> T {
        self.dt
    }

    /// Write access to the current value.
    pub fn get_mut(&mut self) -> &mut T {
        &mut self.t
    }

    /// Value `k` steps away, without moving.
    pub fn at(&self, k: isize) -> T {
        (*self + k).t
    }

    /// Positions that overflow `T` land on the `end()` landmark.
    fn offset(self, k: isize) -> Self {
        let t = if k >= 0 {
            T::from(k)
                .and_then(|k| self.dt.checked_mul(k))
                .and_then(|d| self.t.checked_add(d))
        } else {
            k.checked_neg()
                .and_then(T::from)
                .and_then(|k| self.dt.checked_mul(k))
                .and_then(|d| self.t.checked_sub(d))
        };
        Self {
            t: t.unwrap_or_else(T::max_value),
            dt: self.dt,
        }
    }
}

impl<T: Scalar> Iterable for Iota<T> {
    type Item = T;

    fn is_live(&self) -> bool {
        self.t != T::max_value()
    }

    fn current(&self) -> T {
        self.t
    }

    fn advance(&mut self) {
        if self.is_live() {
            self.t = self.t.checked_add(self.dt).unwrap_or_else(T::max_value);
        }
    }

    fn end(&self) -> Self {
        Self {
            t: T::max_value(),
            dt: self.dt,
        }
    }
}

impl<T: Scalar> Add<isize> for Iota<T> {
    type Output = Self;

    fn add(self, k: isize) -> Self {
        self.offset(k)
    }
}

impl<T: Scalar> Sub<isize> for Iota<T> {
    type Output = Self;

    fn sub(self, k: isize) -> Self {
        match k.checked_neg() {
            Some(k) => self.offset(k),
            None => Self {
                t: T::max_value(),
                dt: self.dt,
            },
        }
    }
}

/// Signed number of steps from `other` to `self`. Both must share a non-zero step.
impl<T: Scalar> Sub for Iota<T> {
    type Output = isize;

    fn sub(self, other: Self) -> isize {
        let a = self.t.to_f64().unwrap_or(0.0);
        let b = other.t.to_f64().unwrap_or(0.0);
        let d = self.dt.to_f64().unwrap_or(1.0);
        ((a - b) / d) as isize
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_up() {
        let mut i = Iota::new(0);
        assert_eq!(i.current(), 0);
        i.advance();
        assert_eq!(i.current(), 1);
        assert!(i.is_live());
        assert!(!i.end().is_live());
        assert_eq!(i.begin(), i);
    }

    #[test]
    fn random_access() {
        let i = Iota::with_step(1.0, 0.5);
        assert_eq!((i + 4).current(), 3.0);
        assert_eq!(((i + 4) - 1isize).current(), 2.5);
        assert_eq!((i + 4) - i, 4);
        assert_eq!(i - (i + 4), -4);
        assert_eq!(i.at(2), 2.0);
        assert_eq!(i.at(-2), 0.0);
    }

    #[test]
    fn unsigned_negative_offsets() {
        let i = Iota::new(5u32);
        assert_eq!((i - 2isize).current(), 3);
        assert_eq!((i + 3) - i, 3);
    }

    #[test]
    fn overflow_lands_on_end() {
        let mut i = Iota::new(i32::MAX - 1);
        i.advance();
        assert_eq!(i, i.end());
        i.advance();
        assert_eq!(i, i.end());

        let mut j = Iota::with_step(250u8, 10);
        j.advance();
        assert!(!j.is_live());
        j.advance();
        assert_eq!(j.current(), u8::MAX);
    }

    #[test]
    fn offsets_outside_the_type_saturate() {
        let i = Iota::new(0u32);
        assert_eq!(i - 1isize, i.end());
        assert_eq!(i.at(-3), u32::MAX);
        let big = Iota::with_step(0i16, 1000);
        assert_eq!((big + 100).current(), i16::MAX);
        assert_eq!((big - 100isize).current(), i16::MAX);
        assert_eq!((big + 30).current(), 30000);
    }

    #[test]
    fn write_through() {
        let mut i = Iota::with_step(0, 2);
        *i.get_mut() = 7;
        i.advance();
        assert_eq!(i.current(), 9);
    }

    #[test]
    fn constant_repeats() {
        let mut i = Iota::constant(1.5);
        i.advance();
        i.advance();
        assert_eq!(i.current(), 1.5);
        assert_eq!(i.step(), 0.0);
    }
}
