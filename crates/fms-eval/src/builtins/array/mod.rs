//! In-memory array functions: `\ARRAY`, `ARRAY` and the `ARRAY.*` family.
//!
//! Functions that reshape or rewrite an array run in one of two modes. Given
//! an array they work on a copy and return the result. Given the handle of
//! an in-memory array (a single cell holding a live handle) they modify that
//! array and return the handle.

mod numeric;
mod order;
mod slice;

pub use numeric::{AcfFn, ApplyFn, FoldFn, ScanFn};
pub use order::{DiffFn, GradeFn, SortFn, UniqueFn};
pub use slice::{DropFn, IndexFn, JoinFn, MaskFn, ShiftFn, TakeFn};

use crate::builtins::utils::{count_or, flag, number, number_or};
use crate::context::AddinContext;
use crate::fpx::Fpx;
use crate::function::Function;
use crate::handle::decode;
use fms_common::{ArgKind, ArgSpec, ExcelError, LiteralValue};

pub(crate) const ARRAY: ArgSpec = ArgSpec::new(
    ArgKind::Array,
    "array",
    "is an array or handle to an array.",
);

/* ───────────────────────── \ARRAY() ───────────────────────── */

#[derive(Debug)]
pub struct ArrayNewFn;
impl Function for ArrayNewFn {
    crate::func_caps!(UNCALCED, RETURNS_HANDLE);
    fn name(&self) -> &'static str {
        "\\ARRAY"
    }
    fn min_args(&self) -> usize {
        1
    }
    fn arg_schema(&self) -> &'static [ArgSpec] {
        const SCHEMA: &[ArgSpec] = &[
            ArgSpec::new(
                ArgKind::Array,
                "array",
                "is an array or handle to an array of numbers.",
            ),
            ArgSpec::new(
                ArgKind::Number,
                "_columns",
                "is an optional number of columns. Default is 0.",
            ),
        ];
        SCHEMA
    }
    fn help(&self) -> &'static str {
        "Return a handle to the in-memory array."
    }
    fn eval(
        &self,
        args: &[LiteralValue],
        ctx: &mut AddinContext,
    ) -> Result<LiteralValue, ExcelError> {
        let columns = count_or(&args[1], 0)?;
        let a = if columns != 0 {
            if args[0].shape() != (1, 1) {
                return Err(ExcelError::value(
                    "first argument must be scalar if second argument is not zero",
                ));
            }
            Fpx::new(count_or(&args[0], 0)?, columns)
        } else {
            Fpx::try_from(&args[0])?
        };
        Ok(ctx.arrays.insert(a).into())
    }
}

/* ───────────────────────── ARRAY() ───────────────────────── */

#[derive(Debug)]
pub struct ArrayGetFn;
impl Function for ArrayGetFn {
    crate::func_caps!(PURE);
    fn name(&self) -> &'static str {
        "ARRAY"
    }
    fn min_args(&self) -> usize {
        1
    }
    fn arg_schema(&self) -> &'static [ArgSpec] {
        const SCHEMA: &[ArgSpec] = &[
            ArgSpec::new(ArgKind::Handle, "handle", "is a handle to an array of numbers."),
            ArgSpec::new(
                ArgKind::Logical,
                "_fast",
                "is accepted for compatibility; handles are always checked.",
            ),
        ];
        SCHEMA
    }
    fn help(&self) -> &'static str {
        "Return an array associated with handle."
    }
    fn eval(
        &self,
        args: &[LiteralValue],
        ctx: &mut AddinContext,
    ) -> Result<LiteralValue, ExcelError> {
        flag(&args[1])?;
        let h = decode(&args[0])?;
        Ok(ctx.arrays.get(h)?.to_literal())
    }
}

/* ───────────────────────── ARRAY.RESIZE() ───────────────────────── */

#[derive(Debug)]
pub struct ResizeFn;
impl Function for ResizeFn {
    crate::func_caps!(COMMAND);
    fn name(&self) -> &'static str {
        "ARRAY.RESIZE"
    }
    fn min_args(&self) -> usize {
        3
    }
    fn arg_schema(&self) -> &'static [ArgSpec] {
        const SCHEMA: &[ArgSpec] = &[
            ARRAY,
            ArgSpec::new(ArgKind::Number, "rows", "is the number of rows."),
            ArgSpec::new(ArgKind::Number, "columns", "is the number of columns."),
        ];
        SCHEMA
    }
    fn help(&self) -> &'static str {
        "Resize an array."
    }
    fn eval(
        &self,
        args: &[LiteralValue],
        ctx: &mut AddinContext,
    ) -> Result<LiteralValue, ExcelError> {
        let r = count_or(&args[1], 0)?;
        let c = count_or(&args[2], 0)?;
        ctx.with_array(&args[0], |a| a.resize(r, c))
    }
}

/* ───────────────────────── ARRAY.ROWS() / COLUMNS() / SIZE() ───────────────────────── */

fn shape_of(
    args: &[LiteralValue],
    ctx: &AddinContext,
    pick: fn(usize, usize) -> usize,
) -> Result<LiteralValue, ExcelError> {
    let (r, c) = match ctx.array_handle(&args[0]) {
        Some(_) => ctx.read_array(&args[0], |a| (a.rows(), a.columns()))?,
        None => args[0].shape(),
    };
    Ok(LiteralValue::Number(pick(r, c) as f64))
}

#[derive(Debug)]
pub struct RowsFn;
impl Function for RowsFn {
    crate::func_caps!(PURE);
    fn name(&self) -> &'static str {
        "ARRAY.ROWS"
    }
    fn min_args(&self) -> usize {
        1
    }
    fn arg_schema(&self) -> &'static [ArgSpec] {
        const SCHEMA: &[ArgSpec] = &[ARRAY];
        SCHEMA
    }
    fn help(&self) -> &'static str {
        "Return the number of rows of an array."
    }
    fn eval(
        &self,
        args: &[LiteralValue],
        ctx: &mut AddinContext,
    ) -> Result<LiteralValue, ExcelError> {
        shape_of(args, ctx, |r, _| r)
    }
}

#[derive(Debug)]
pub struct ColumnsFn;
impl Function for ColumnsFn {
    crate::func_caps!(PURE);
    fn name(&self) -> &'static str {
        "ARRAY.COLUMNS"
    }
    fn min_args(&self) -> usize {
        1
    }
    fn arg_schema(&self) -> &'static [ArgSpec] {
        const SCHEMA: &[ArgSpec] = &[ARRAY];
        SCHEMA
    }
    fn help(&self) -> &'static str {
        "Return the number of columns of an array."
    }
    fn eval(
        &self,
        args: &[LiteralValue],
        ctx: &mut AddinContext,
    ) -> Result<LiteralValue, ExcelError> {
        shape_of(args, ctx, |_, c| c)
    }
}

#[derive(Debug)]
pub struct SizeFn;
impl Function for SizeFn {
    crate::func_caps!(PURE);
    fn name(&self) -> &'static str {
        "ARRAY.SIZE"
    }
    fn min_args(&self) -> usize {
        1
    }
    fn arg_schema(&self) -> &'static [ArgSpec] {
        const SCHEMA: &[ArgSpec] = &[ARRAY];
        SCHEMA
    }
    fn help(&self) -> &'static str {
        "Return the size of an array."
    }
    fn eval(
        &self,
        args: &[LiteralValue],
        ctx: &mut AddinContext,
    ) -> Result<LiteralValue, ExcelError> {
        shape_of(args, ctx, |r, c| r * c)
    }
}

/* ───────────────────────── ARRAY.SEQUENCE() ───────────────────────── */

#[derive(Debug)]
pub struct SequenceFn;
impl Function for SequenceFn {
    crate::func_caps!(PURE);
    fn name(&self) -> &'static str {
        "ARRAY.SEQUENCE"
    }
    fn min_args(&self) -> usize {
        2
    }
    fn arg_schema(&self) -> &'static [ArgSpec] {
        const SCHEMA: &[ArgSpec] = &[
            ArgSpec::new(ArgKind::Number, "start", "is the first value."),
            ArgSpec::new(ArgKind::Number, "stop", "is the last value."),
            ArgSpec::new(ArgKind::Number, "_incr", "is the optional increment. Default is 1."),
        ];
        SCHEMA
    }
    fn help(&self) -> &'static str {
        "Return a column from start to stop in steps of incr."
    }
    fn eval(
        &self,
        args: &[LiteralValue],
        _ctx: &mut AddinContext,
    ) -> Result<LiteralValue, ExcelError> {
        let start = number(&args[0])?;
        let stop = number(&args[1])?;
        let incr = number_or(&args[2], 1.0)?;
        Ok(Fpx::sequence(start, stop, incr)?.into())
    }
}

pub fn register_builtins() {
    crate::register_functions!(
        ArrayNewFn, ArrayGetFn, ResizeFn, RowsFn, ColumnsFn, SizeFn, SequenceFn, TakeFn, DropFn,
        JoinFn, MaskFn, ShiftFn, IndexFn, SortFn, GradeFn, UniqueFn, DiffFn, AcfFn, ApplyFn,
        FoldFn, ScanFn,
    );
}
