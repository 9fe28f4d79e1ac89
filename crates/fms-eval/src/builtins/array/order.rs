use super::ARRAY;
use crate::builtins::utils::int_or;
use crate::context::AddinContext;
use crate::fpx::Fpx;
use crate::function::Function;
use fms_common::{ArgKind, ArgSpec, ExcelError, LiteralValue};

const COUNT: ArgSpec = ArgSpec::new(
    ArgKind::Number,
    "_n",
    "is 0 for ascending, -1 for descending, n > 0 for the n smallest or n < -1 for the -n largest. Default is 0.",
);

/* ───────────────────────── ARRAY.SORT() ───────────────────────── */

#[derive(Debug)]
pub struct SortFn;
impl Function for SortFn {
    crate::func_caps!(COMMAND);
    fn name(&self) -> &'static str {
        "ARRAY.SORT"
    }
    fn min_args(&self) -> usize {
        1
    }
    fn arg_schema(&self) -> &'static [ArgSpec] {
        const SCHEMA: &[ArgSpec] = &[ARRAY, COUNT];
        SCHEMA
    }
    fn help(&self) -> &'static str {
        "Sort an array in increasing (n >= 0) or decreasing (n < 0) order."
    }
    fn eval(
        &self,
        args: &[LiteralValue],
        ctx: &mut AddinContext,
    ) -> Result<LiteralValue, ExcelError> {
        let n = int_or(&args[1], 0)?;
        ctx.with_array(&args[0], |a| a.sort(n))
    }
}

/* ───────────────────────── ARRAY.GRADE() ───────────────────────── */

#[derive(Debug)]
pub struct GradeFn;
impl Function for GradeFn {
    crate::func_caps!(PURE);
    fn name(&self) -> &'static str {
        "ARRAY.GRADE"
    }
    fn min_args(&self) -> usize {
        1
    }
    fn arg_schema(&self) -> &'static [ArgSpec] {
        const SCHEMA: &[ArgSpec] = &[ARRAY, COUNT];
        SCHEMA
    }
    fn help(&self) -> &'static str {
        "Return the zero-based indices that would sort array."
    }
    fn eval(
        &self,
        args: &[LiteralValue],
        ctx: &mut AddinContext,
    ) -> Result<LiteralValue, ExcelError> {
        let n = int_or(&args[1], 0)?;
        ctx.read_array(&args[0], |a| a.grade(n).into())
    }
}

/* ───────────────────────── ARRAY.UNIQUE() ───────────────────────── */

#[derive(Debug)]
pub struct UniqueFn;
impl Function for UniqueFn {
    crate::func_caps!(COMMAND);
    fn name(&self) -> &'static str {
        "ARRAY.UNIQUE"
    }
    fn min_args(&self) -> usize {
        1
    }
    fn arg_schema(&self) -> &'static [ArgSpec] {
        const SCHEMA: &[ArgSpec] = &[ARRAY];
        SCHEMA
    }
    fn help(&self) -> &'static str {
        "Remove consecutive duplicates from array."
    }
    fn eval(
        &self,
        args: &[LiteralValue],
        ctx: &mut AddinContext,
    ) -> Result<LiteralValue, ExcelError> {
        ctx.with_array(&args[0], Fpx::unique)
    }
}

/* ───────────────────────── ARRAY.DIFF() ───────────────────────── */

#[derive(Debug)]
pub struct DiffFn;
impl Function for DiffFn {
    crate::func_caps!(COMMAND);
    fn name(&self) -> &'static str {
        "ARRAY.DIFF"
    }
    fn min_args(&self) -> usize {
        1
    }
    fn arg_schema(&self) -> &'static [ArgSpec] {
        const SCHEMA: &[ArgSpec] = &[ARRAY];
        SCHEMA
    }
    fn help(&self) -> &'static str {
        "Return first element followed by successive differences."
    }
    fn eval(
        &self,
        args: &[LiteralValue],
        ctx: &mut AddinContext,
    ) -> Result<LiteralValue, ExcelError> {
        ctx.with_array(&args[0], Fpx::diff)
    }
}
