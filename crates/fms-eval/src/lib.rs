//! Worksheet functions over in-memory arrays, monoids and operators.
//!
//! Objects live in an [`AddinContext`] and are referred to from cells by
//! numeric handles. Functions are looked up by name in a global registry:
//!
//! ```
//! use fms_common::LiteralValue;
//! use fms_eval::{AddinContext, call, load_builtins};
//!
//! load_builtins();
//! let mut ctx = AddinContext::new();
//! let add = call("MONOID.ADD", &[], &mut ctx).unwrap();
//! let seq = call("ARRAY.SEQUENCE", &[LiteralValue::Int(1), LiteralValue::Int(4)], &mut ctx).unwrap();
//! let sum = call("ARRAY.FOLD", &[add, seq], &mut ctx).unwrap();
//! assert_eq!(sum, LiteralValue::Number(10.0));
//! ```

pub mod builtins;
pub mod context;
pub mod fpx;
pub mod function;
pub mod function_registry;
pub mod handle;

mod macros;

pub use builtins::load_builtins;
pub use context::AddinContext;
pub use fpx::Fpx;
pub use function::{FnCaps, Function};
pub use function_registry::call;
pub use handle::{HandleError, HandleTable};
