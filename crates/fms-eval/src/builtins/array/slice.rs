use super::ARRAY;
use crate::builtins::utils::{index_list, int_or};
use crate::context::AddinContext;
use crate::fpx::Fpx;
use crate::function::Function;
use fms_common::{ArgKind, ArgSpec, ExcelError, LiteralValue};

/* ───────────────────────── ARRAY.TAKE() ───────────────────────── */

#[derive(Debug)]
pub struct TakeFn;
impl Function for TakeFn {
    crate::func_caps!(COMMAND);
    fn name(&self) -> &'static str {
        "ARRAY.TAKE"
    }
    fn min_args(&self) -> usize {
        2
    }
    fn arg_schema(&self) -> &'static [ArgSpec] {
        const SCHEMA: &[ArgSpec] = &[
            ARRAY,
            ArgSpec::new(
                ArgKind::Number,
                "n",
                "is the number of items to take. Negative values take from the end.",
            ),
        ];
        SCHEMA
    }
    fn help(&self) -> &'static str {
        "Take elements from front (n > 0) or back (n < 0) of array."
    }
    fn eval(
        &self,
        args: &[LiteralValue],
        ctx: &mut AddinContext,
    ) -> Result<LiteralValue, ExcelError> {
        let n = int_or(&args[1], 0)?;
        ctx.with_array(&args[0], |a| a.take(n))
    }
}

/* ───────────────────────── ARRAY.DROP() ───────────────────────── */

#[derive(Debug)]
pub struct DropFn;
impl Function for DropFn {
    crate::func_caps!(COMMAND);
    fn name(&self) -> &'static str {
        "ARRAY.DROP"
    }
    fn min_args(&self) -> usize {
        2
    }
    fn arg_schema(&self) -> &'static [ArgSpec] {
        const SCHEMA: &[ArgSpec] = &[
            ARRAY,
            ArgSpec::new(
                ArgKind::Number,
                "n",
                "is the number of items to drop. Negative values drop from the end.",
            ),
        ];
        SCHEMA
    }
    fn help(&self) -> &'static str {
        "Drop elements from front (n > 0) or back (n < 0) of array."
    }
    fn eval(
        &self,
        args: &[LiteralValue],
        ctx: &mut AddinContext,
    ) -> Result<LiteralValue, ExcelError> {
        let n = int_or(&args[1], 0)?;
        ctx.with_array(&args[0], |a| a.drop(n))
    }
}

/* ───────────────────────── ARRAY.JOIN() ───────────────────────── */

#[derive(Debug)]
pub struct JoinFn;
impl Function for JoinFn {
    crate::func_caps!(PURE);
    fn name(&self) -> &'static str {
        "ARRAY.JOIN"
    }
    fn min_args(&self) -> usize {
        2
    }
    fn arg_schema(&self) -> &'static [ArgSpec] {
        const SCHEMA: &[ArgSpec] = &[
            ArgSpec::new(ArgKind::Array, "array1", "is an array or handle to an array."),
            ArgSpec::new(ArgKind::Array, "array2", "is an array or handle to an array."),
        ];
        SCHEMA
    }
    fn help(&self) -> &'static str {
        "Join two arrays. The shape of array1 determines the result."
    }
    fn eval(
        &self,
        args: &[LiteralValue],
        ctx: &mut AddinContext,
    ) -> Result<LiteralValue, ExcelError> {
        // Handles are read, never modified.
        let mut a = ctx.array_arg(&args[0])?;
        ctx.read_array(&args[1], |b| a.join(b))?;
        Ok(a.into())
    }
}

/* ───────────────────────── ARRAY.MASK() ───────────────────────── */

#[derive(Debug)]
pub struct MaskFn;
impl Function for MaskFn {
    crate::func_caps!(COMMAND);
    fn name(&self) -> &'static str {
        "ARRAY.MASK"
    }
    fn min_args(&self) -> usize {
        2
    }
    fn arg_schema(&self) -> &'static [ArgSpec] {
        const SCHEMA: &[ArgSpec] = &[
            ARRAY,
            ArgSpec::new(ArgKind::Array, "mask", "is a mask, applied cyclically."),
        ];
        SCHEMA
    }
    fn help(&self) -> &'static str {
        "Return elements (or rows) of array where mask is non-zero."
    }
    fn eval(
        &self,
        args: &[LiteralValue],
        ctx: &mut AddinContext,
    ) -> Result<LiteralValue, ExcelError> {
        let m = ctx.array_arg(&args[1])?;
        ctx.with_array(&args[0], |a| a.mask(m.as_slice()))
    }
}

/* ───────────────────────── ARRAY.SHIFT() ───────────────────────── */

#[derive(Debug)]
pub struct ShiftFn;
impl Function for ShiftFn {
    crate::func_caps!(COMMAND);
    fn name(&self) -> &'static str {
        "ARRAY.SHIFT"
    }
    fn min_args(&self) -> usize {
        2
    }
    fn arg_schema(&self) -> &'static [ArgSpec] {
        const SCHEMA: &[ArgSpec] = &[
            ARRAY,
            ArgSpec::new(ArgKind::Number, "n", "is the number of places to shift."),
        ];
        SCHEMA
    }
    fn help(&self) -> &'static str {
        "Shift elements toward the end (n > 0) or front (n < 0), filling with NaN."
    }
    fn eval(
        &self,
        args: &[LiteralValue],
        ctx: &mut AddinContext,
    ) -> Result<LiteralValue, ExcelError> {
        let n = int_or(&args[1], 0)?;
        ctx.with_array(&args[0], |a| a.shift(n))
    }
}

/* ───────────────────────── ARRAY.INDEX() ───────────────────────── */

#[derive(Debug)]
pub struct IndexFn;
impl Function for IndexFn {
    crate::func_caps!(PURE);
    fn name(&self) -> &'static str {
        "ARRAY.INDEX"
    }
    fn min_args(&self) -> usize {
        1
    }
    fn arg_schema(&self) -> &'static [ArgSpec] {
        const SCHEMA: &[ArgSpec] = &[
            ARRAY,
            ArgSpec::new(
                ArgKind::Array,
                "_rows",
                "are zero-based row indices, taken modulo the row count. Default is all rows.",
            ),
            ArgSpec::new(
                ArgKind::Array,
                "_columns",
                "are zero-based column indices, taken modulo the column count. Default is all columns.",
            ),
        ];
        SCHEMA
    }
    fn help(&self) -> &'static str {
        "Return rows and columns of array."
    }
    fn eval(
        &self,
        args: &[LiteralValue],
        ctx: &mut AddinContext,
    ) -> Result<LiteralValue, ExcelError> {
        let rows = index_list(&args[1])?;
        let columns = index_list(&args[2])?;
        ctx.read_array(&args[0], |a| select(a, rows, columns).into())
    }
}

/// Submatrix at the given (cyclic) row and column indices.
fn select(a: &Fpx, rows: Option<Vec<i64>>, columns: Option<Vec<i64>>) -> Fpx {
    if a.is_empty() {
        return Fpx::default();
    }
    let rows = rows.unwrap_or_else(|| (0..a.rows() as i64).collect());
    let columns = columns.unwrap_or_else(|| (0..a.columns() as i64).collect());
    if rows.is_empty() || columns.is_empty() {
        return Fpx::default();
    }
    let mut out = Fpx::new(rows.len(), columns.len());
    let width = columns.len();
    for (k, &i) in rows.iter().enumerate() {
        for (l, &j) in columns.iter().enumerate() {
            out.as_mut_slice()[k * width + l] = a.index(i, j).unwrap_or(f64::NAN);
        }
    }
    out
}
