//! Monoid handles and the functions that apply them to cell values.

use crate::builtins::utils::number;
use crate::context::AddinContext;
use crate::function::Function;
use fms_common::{ArgKind, ArgSpec, ExcelError, LiteralValue};
use fms_core::{Monoid, Standard};

/* ───────────────────────── MONOID.ADD() etc ───────────────────────── */

macro_rules! standard_monoid {
    ($ty:ident, $name:literal, $m:expr, $help:literal) => {
        #[derive(Debug)]
        pub struct $ty;
        impl Function for $ty {
            crate::func_caps!(PURE, RETURNS_HANDLE);
            fn name(&self) -> &'static str {
                $name
            }
            fn help(&self) -> &'static str {
                $help
            }
            fn eval(
                &self,
                _args: &[LiteralValue],
                ctx: &mut AddinContext,
            ) -> Result<LiteralValue, ExcelError> {
                Ok(ctx.monoid_handle($m).into())
            }
        }
    };
}

standard_monoid!(MonoidAddFn, "MONOID.ADD", Standard::Add, "Return a handle to the addition monoid.");
standard_monoid!(MonoidMulFn, "MONOID.MUL", Standard::Mul, "Return a handle to the multiplication monoid.");
standard_monoid!(MonoidMaxFn, "MONOID.MAX", Standard::Max, "Return a handle to the max monoid.");
standard_monoid!(MonoidMinFn, "MONOID.MIN", Standard::Min, "Return a handle to the min monoid.");

const MONOID: ArgSpec = ArgSpec::new(ArgKind::Handle, "monoid", "is a handle to a monoid.");

/* ───────────────────────── MONOID() ───────────────────────── */

#[derive(Debug)]
pub struct MonoidFn;
impl Function for MonoidFn {
    crate::func_caps!(PURE);
    fn name(&self) -> &'static str {
        "MONOID"
    }
    fn min_args(&self) -> usize {
        3
    }
    fn arg_schema(&self) -> &'static [ArgSpec] {
        const SCHEMA: &[ArgSpec] = &[
            MONOID,
            ArgSpec::new(ArgKind::Number, "x", "is the first number."),
            ArgSpec::new(ArgKind::Number, "y", "is the second number."),
        ];
        SCHEMA
    }
    fn help(&self) -> &'static str {
        "Combine two numbers with a monoid."
    }
    fn eval(
        &self,
        args: &[LiteralValue],
        ctx: &mut AddinContext,
    ) -> Result<LiteralValue, ExcelError> {
        let x = number(&args[1])?;
        let y = number(&args[2])?;
        let Ok(m) = ctx.monoid(&args[0]) else {
            return Ok(LiteralValue::Number(f64::NAN));
        };
        Ok(LiteralValue::Number(m.op(x, y)))
    }
}

/* ───────────────────────── MONOID.SCAN() ───────────────────────── */

/// Running fold down a column: each cell combines the value it held before
/// recalculation with `x`. A fresh cell (no value, or zero) starts at `x`.
#[derive(Debug)]
pub struct MonoidScanFn;
impl Function for MonoidScanFn {
    crate::func_caps!(UNCALCED);
    fn name(&self) -> &'static str {
        "MONOID.SCAN"
    }
    fn min_args(&self) -> usize {
        2
    }
    fn arg_schema(&self) -> &'static [ArgSpec] {
        const SCHEMA: &[ArgSpec] = &[
            MONOID,
            ArgSpec::new(ArgKind::Number, "x", "is the next number."),
        ];
        SCHEMA
    }
    fn help(&self) -> &'static str {
        "Combine the previous value of the calling cell with x."
    }
    fn eval(
        &self,
        args: &[LiteralValue],
        ctx: &mut AddinContext,
    ) -> Result<LiteralValue, ExcelError> {
        let x = number(&args[1])?;
        let Ok(m) = ctx.monoid(&args[0]) else {
            return Ok(LiteralValue::Number(f64::NAN));
        };
        let out = match ctx.caller() {
            Some(prev) if prev != 0.0 => m.op(prev, x),
            _ => x,
        };
        Ok(LiteralValue::Number(out))
    }
}

pub fn register_builtins() {
    crate::register_functions!(
        MonoidAddFn,
        MonoidMulFn,
        MonoidMaxFn,
        MonoidMinFn,
        MonoidFn,
        MonoidScanFn,
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_monoid_is_nan() {
        let mut ctx = AddinContext::new();
        let args = [LiteralValue::Number(0.0), LiteralValue::Int(1), LiteralValue::Int(2)];
        match MonoidFn.dispatch(&args, &mut ctx) {
            Ok(LiteralValue::Number(x)) => assert!(x.is_nan()),
            other => panic!("expected NaN, got {other:?}"),
        }
    }

    #[test]
    fn scan_uses_previous_cell() {
        let mut ctx = AddinContext::new();
        let mul: LiteralValue = MonoidMulFn.dispatch(&[], &mut ctx).unwrap();
        let x = LiteralValue::Int(3);
        let args = [mul, x];
        assert_eq!(MonoidScanFn.dispatch(&args, &mut ctx), Ok(LiteralValue::Number(3.0)));
        ctx.set_caller(Some(0.0));
        assert_eq!(MonoidScanFn.dispatch(&args, &mut ctx), Ok(LiteralValue::Number(3.0)));
        ctx.set_caller(Some(4.0));
        assert_eq!(MonoidScanFn.dispatch(&args, &mut ctx), Ok(LiteralValue::Number(12.0)));
    }
}
