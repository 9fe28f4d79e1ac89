use super::ARRAY;
use crate::builtins::utils::flag;
use crate::context::AddinContext;
use crate::function::Function;
use fms_common::{ArgKind, ArgSpec, ExcelError, LiteralValue};

/* ───────────────────────── ARRAY.ACF() ───────────────────────── */

#[derive(Debug)]
pub struct AcfFn;
impl Function for AcfFn {
    crate::func_caps!(PURE);
    fn name(&self) -> &'static str {
        "ARRAY.ACF"
    }
    fn min_args(&self) -> usize {
        1
    }
    fn arg_schema(&self) -> &'static [ArgSpec] {
        const SCHEMA: &[ArgSpec] = &[
            ARRAY,
            ArgSpec::new(
                ArgKind::Logical,
                "_correlation",
                "is an optional flag to return autocorrelations. Default is FALSE.",
            ),
        ];
        SCHEMA
    }
    fn help(&self) -> &'static str {
        "Return the autocovariance or autocorrelation of array at every lag."
    }
    fn eval(
        &self,
        args: &[LiteralValue],
        ctx: &mut AddinContext,
    ) -> Result<LiteralValue, ExcelError> {
        let correlation = flag(&args[1])?;
        ctx.read_array(&args[0], |a| a.acf(correlation).into())
    }
}

/* ───────────────────────── ARRAY.APPLY() ───────────────────────── */

#[derive(Debug)]
pub struct ApplyFn;
impl Function for ApplyFn {
    crate::func_caps!(COMMAND);
    fn name(&self) -> &'static str {
        "ARRAY.APPLY"
    }
    fn min_args(&self) -> usize {
        2
    }
    fn arg_schema(&self) -> &'static [ArgSpec] {
        const SCHEMA: &[ArgSpec] = &[
            ArgSpec::new(ArgKind::Handle, "unop", "is a handle to a unary operator."),
            ARRAY,
        ];
        SCHEMA
    }
    fn help(&self) -> &'static str {
        "Apply a unary operator to every element of array."
    }
    fn eval(
        &self,
        args: &[LiteralValue],
        ctx: &mut AddinContext,
    ) -> Result<LiteralValue, ExcelError> {
        let op = ctx.unop(&args[0])?;
        ctx.with_array(&args[1], |a| a.apply(&*op))
    }
}

/* ───────────────────────── ARRAY.FOLD() ───────────────────────── */

#[derive(Debug)]
pub struct FoldFn;
impl Function for FoldFn {
    crate::func_caps!(PURE);
    fn name(&self) -> &'static str {
        "ARRAY.FOLD"
    }
    fn min_args(&self) -> usize {
        2
    }
    fn arg_schema(&self) -> &'static [ArgSpec] {
        const SCHEMA: &[ArgSpec] = &[
            ArgSpec::new(ArgKind::Handle, "monoid", "is a handle to a monoid."),
            ARRAY,
        ];
        SCHEMA
    }
    fn help(&self) -> &'static str {
        "Combine all elements of array with a monoid."
    }
    fn eval(
        &self,
        args: &[LiteralValue],
        ctx: &mut AddinContext,
    ) -> Result<LiteralValue, ExcelError> {
        let m = ctx.monoid(&args[0])?;
        ctx.read_array(&args[1], |a| LiteralValue::Number(a.fold(&*m)))
    }
}

/* ───────────────────────── ARRAY.SCAN() ───────────────────────── */

#[derive(Debug)]
pub struct ScanFn;
impl Function for ScanFn {
    crate::func_caps!(COMMAND);
    fn name(&self) -> &'static str {
        "ARRAY.SCAN"
    }
    fn min_args(&self) -> usize {
        2
    }
    fn arg_schema(&self) -> &'static [ArgSpec] {
        const SCHEMA: &[ArgSpec] = &[
            ArgSpec::new(ArgKind::Handle, "monoid", "is a handle to a monoid."),
            ARRAY,
        ];
        SCHEMA
    }
    fn help(&self) -> &'static str {
        "Return the running folds of array with a monoid."
    }
    fn eval(
        &self,
        args: &[LiteralValue],
        ctx: &mut AddinContext,
    ) -> Result<LiteralValue, ExcelError> {
        let m = ctx.monoid(&args[0])?;
        ctx.with_array(&args[1], |a| a.scan(&*m))
    }
}
