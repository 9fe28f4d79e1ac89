//! Operator handles: binary and unary operators looked up by name.

use crate::builtins::utils::{number, text};
use crate::context::AddinContext;
use crate::function::Function;
use fms_common::{ArgKind, ArgSpec, ExcelError, ExcelErrorKind, LiteralValue};
use fms_core::{BinOp, Binary, UnOp, Unary};

/* ───────────────────────── ADD() SUB() ... ───────────────────────── */

macro_rules! binop_handle {
    ($ty:ident, $name:literal, $op:expr) => {
        #[derive(Debug)]
        pub struct $ty;
        impl Function for $ty {
            crate::func_caps!(PURE, RETURNS_HANDLE);
            fn name(&self) -> &'static str {
                $name
            }
            fn help(&self) -> &'static str {
                concat!("Return a handle to the ", $name, " operator.")
            }
            fn eval(
                &self,
                _args: &[LiteralValue],
                ctx: &mut AddinContext,
            ) -> Result<LiteralValue, ExcelError> {
                Ok(ctx.binop_handle($op).into())
            }
        }
    };
}

binop_handle!(AddFn, "ADD", Binary::Add);
binop_handle!(SubFn, "SUB", Binary::Sub);
binop_handle!(MulFn, "MUL", Binary::Mul);
binop_handle!(DivFn, "DIV", Binary::Div);
binop_handle!(ModFn, "MOD", Binary::Mod);
binop_handle!(MaxFn, "MAX", Binary::Max);
binop_handle!(MinFn, "MIN", Binary::Min);

fn unknown_op(name: &str) -> ExcelError {
    ExcelError::new(ExcelErrorKind::Name).with_message(format!("unknown operator {name}"))
}

const NAME: ArgSpec = ArgSpec::new(ArgKind::Text, "name", "is the name of the operator.");

/* ───────────────────────── BINOP() ───────────────────────── */

#[derive(Debug)]
pub struct BinopFn;
impl Function for BinopFn {
    crate::func_caps!(PURE, RETURNS_HANDLE);
    fn name(&self) -> &'static str {
        "BINOP"
    }
    fn min_args(&self) -> usize {
        1
    }
    fn arg_schema(&self) -> &'static [ArgSpec] {
        const SCHEMA: &[ArgSpec] = &[NAME];
        SCHEMA
    }
    fn help(&self) -> &'static str {
        "Return a handle to the binary operator called name."
    }
    fn eval(
        &self,
        args: &[LiteralValue],
        ctx: &mut AddinContext,
    ) -> Result<LiteralValue, ExcelError> {
        let name = text(&args[0])?;
        let op = Binary::from_name(name).ok_or_else(|| unknown_op(name))?;
        Ok(ctx.binop_handle(op).into())
    }
}

/* ───────────────────────── BINOP.CALL() ───────────────────────── */

#[derive(Debug)]
pub struct BinopCallFn;
impl Function for BinopCallFn {
    crate::func_caps!(PURE);
    fn name(&self) -> &'static str {
        "BINOP.CALL"
    }
    fn min_args(&self) -> usize {
        3
    }
    fn arg_schema(&self) -> &'static [ArgSpec] {
        const SCHEMA: &[ArgSpec] = &[
            ArgSpec::new(ArgKind::Handle, "binop", "is a handle to a binary operator."),
            ArgSpec::new(ArgKind::Number, "x", "is the left operand."),
            ArgSpec::new(ArgKind::Number, "y", "is the right operand."),
        ];
        SCHEMA
    }
    fn help(&self) -> &'static str {
        "Apply a binary operator to x and y."
    }
    fn eval(
        &self,
        args: &[LiteralValue],
        ctx: &mut AddinContext,
    ) -> Result<LiteralValue, ExcelError> {
        let op = ctx.binop(&args[0])?;
        let x = number(&args[1])?;
        let y = number(&args[2])?;
        Ok(LiteralValue::Number(op.apply(x, y)))
    }
}

/* ───────────────────────── UNOP() ───────────────────────── */

#[derive(Debug)]
pub struct UnopFn;
impl Function for UnopFn {
    crate::func_caps!(PURE, RETURNS_HANDLE);
    fn name(&self) -> &'static str {
        "UNOP"
    }
    fn min_args(&self) -> usize {
        1
    }
    fn arg_schema(&self) -> &'static [ArgSpec] {
        const SCHEMA: &[ArgSpec] = &[NAME];
        SCHEMA
    }
    fn help(&self) -> &'static str {
        "Return a handle to the unary operator called name."
    }
    fn eval(
        &self,
        args: &[LiteralValue],
        ctx: &mut AddinContext,
    ) -> Result<LiteralValue, ExcelError> {
        let name = text(&args[0])?;
        let op = Unary::from_name(name).ok_or_else(|| unknown_op(name))?;
        Ok(ctx.unop_handle(op).into())
    }
}

/* ───────────────────────── UNOP.CALL() ───────────────────────── */

#[derive(Debug)]
pub struct UnopCallFn;
impl Function for UnopCallFn {
    crate::func_caps!(PURE);
    fn name(&self) -> &'static str {
        "UNOP.CALL"
    }
    fn min_args(&self) -> usize {
        2
    }
    fn arg_schema(&self) -> &'static [ArgSpec] {
        const SCHEMA: &[ArgSpec] = &[
            ArgSpec::new(ArgKind::Handle, "unop", "is a handle to a unary operator."),
            ArgSpec::new(ArgKind::Number, "x", "is the operand."),
        ];
        SCHEMA
    }
    fn help(&self) -> &'static str {
        "Apply a unary operator to x."
    }
    fn eval(
        &self,
        args: &[LiteralValue],
        ctx: &mut AddinContext,
    ) -> Result<LiteralValue, ExcelError> {
        let op = ctx.unop(&args[0])?;
        let x = number(&args[1])?;
        Ok(LiteralValue::Number(op.apply(x)))
    }
}

pub fn register_builtins() {
    crate::register_functions!(
        AddFn,
        SubFn,
        MulFn,
        DivFn,
        ModFn,
        MaxFn,
        MinFn,
        BinopFn,
        BinopCallFn,
        UnopFn,
        UnopCallFn,
    );
}
