//! Iterable combinators and algebraic operators.
//!
//! Two halves that meet in [`monoid::Foldable`]:
//!
//! - [`iterable`]: the [`Iterable`] contract (exhaustion test, dereference,
//!   advance, copy, end sentinel) and the combinators built on it:
//!   [`Iota`], [`ArrayView`], [`Take`], [`Cap`], plus the free functions
//!   [`equal`], [`size`], [`size_from`], [`drop`] and [`ge`].
//! - [`op`] and [`monoid`]: nullary/unary/binary operations usable as trait
//!   objects, monoids built from them, `fold` and the running scan.
//!
//! ```
//! use fms_core::{Iota, Iterable, Standard, Take, monoid::Foldable};
//!
//! let xs = Take::new(3, Iota::new(1.0));
//! let sums: Vec<f64> = Foldable::new(&Standard::Add, xs).iter().collect();
//! assert_eq!(sums, [0.0, 1.0, 3.0, 6.0]);
//! ```

pub mod iterable;
pub mod moments;
pub mod monoid;
pub mod op;

pub use iterable::{ArrayView, Cap, Iota, Iterable, Take, drop, equal, ge, size, size_from};
pub use moments::Average;
pub use monoid::{Composed, Foldable, Monoid, Standard, fold, reduce};
pub use op::{BinOp, Binary, BoundRight, Constant, Func, NullOp, Scalar, UnOp, Unary};
