use fms_common::{ExcelErrorKind, Handle, LiteralValue};
use fms_eval::function_registry;
use fms_eval::{AddinContext, FnCaps, Fpx, call, load_builtins};

fn ctx() -> AddinContext {
    load_builtins();
    AddinContext::new()
}

fn n(x: f64) -> LiteralValue {
    LiteralValue::Number(x)
}

fn col(xs: &[f64]) -> LiteralValue {
    Fpx::column(xs.to_vec()).to_literal()
}

fn new_array(ctx: &mut AddinContext, xs: &[f64]) -> LiteralValue {
    call("\\ARRAY", &[col(xs)], ctx).unwrap()
}

#[test]
fn array_round_trip() {
    let mut ctx = ctx();
    let h = new_array(&mut ctx, &[1.0, 2.0, 3.0]);
    assert!(h.as_handle().is_some());
    assert_eq!(call("ARRAY", &[h.clone()], &mut ctx), Ok(col(&[1.0, 2.0, 3.0])));
    assert_eq!(call("ARRAY", &[h.clone(), LiteralValue::Boolean(true)], &mut ctx), Ok(col(&[1.0, 2.0, 3.0])));
    assert_eq!(call("ARRAY.SIZE", &[h], &mut ctx), Ok(n(3.0)));

    // every call makes a new handle
    let h1 = new_array(&mut ctx, &[1.0]);
    let h2 = new_array(&mut ctx, &[1.0]);
    assert_ne!(h1, h2);
}

#[test]
fn zero_filled_array_by_shape() {
    let mut ctx = ctx();
    let h = call("\\ARRAY", &[n(2.0), n(3.0)], &mut ctx).unwrap();
    assert_eq!(call("ARRAY.ROWS", &[h.clone()], &mut ctx), Ok(n(2.0)));
    assert_eq!(call("ARRAY.COLUMNS", &[h.clone()], &mut ctx), Ok(n(3.0)));
    assert_eq!(call("ARRAY", &[h], &mut ctx), Ok(Fpx::new(2, 3).to_literal()));

    let e = call("\\ARRAY", &[col(&[1.0, 2.0]), n(3.0)], &mut ctx).unwrap_err();
    assert_eq!(e.kind, ExcelErrorKind::Value);
}

#[test]
fn command_mode_mutates_the_stored_array() {
    let mut ctx = ctx();
    let h = new_array(&mut ctx, &[4.0, 1.0, 3.0, 2.0]);
    assert_eq!(call("ARRAY.SORT", &[h.clone()], &mut ctx), Ok(h.clone()));
    assert_eq!(call("ARRAY.TAKE", &[h.clone(), n(3.0)], &mut ctx), Ok(h.clone()));
    assert_eq!(call("ARRAY", &[h.clone()], &mut ctx), Ok(col(&[1.0, 2.0, 3.0])));

    let add = call("MONOID.ADD", &[], &mut ctx).unwrap();
    assert_eq!(call("ARRAY.SCAN", &[add.clone(), h.clone()], &mut ctx), Ok(h.clone()));
    assert_eq!(call("ARRAY", &[h.clone()], &mut ctx), Ok(col(&[1.0, 3.0, 6.0])));

    // queries leave the array alone
    assert_eq!(call("ARRAY.FOLD", &[add, h.clone()], &mut ctx), Ok(n(10.0)));
    assert_eq!(call("ARRAY.GRADE", &[h.clone(), n(-1.0)], &mut ctx), Ok(col(&[2.0, 1.0, 0.0])));
    assert_eq!(call("ARRAY", &[h], &mut ctx), Ok(col(&[1.0, 3.0, 6.0])));
}

#[test]
fn join_reads_handles_without_changing_them() {
    let mut ctx = ctx();
    let h = new_array(&mut ctx, &[1.0, 2.0]);

    let out = call("ARRAY.JOIN", &[h.clone(), col(&[3.0])], &mut ctx);
    assert_eq!(out, Ok(col(&[1.0, 2.0, 3.0])));
    assert_eq!(call("ARRAY", &[h.clone()], &mut ctx), Ok(col(&[1.0, 2.0])));

    let out = call("ARRAY.JOIN", &[col(&[0.0, 0.5]), h.clone()], &mut ctx);
    assert_eq!(out, Ok(col(&[0.0, 0.5, 1.0, 2.0])));
    assert_eq!(call("ARRAY", &[h.clone()], &mut ctx), Ok(col(&[1.0, 2.0])));

    let g = new_array(&mut ctx, &[9.0]);
    let out = call("ARRAY.JOIN", &[g.clone(), h.clone()], &mut ctx);
    assert_eq!(out, Ok(col(&[9.0, 1.0, 2.0])));
    assert_eq!(call("ARRAY.SIZE", &[g], &mut ctx), Ok(n(1.0)));
    assert_eq!(call("ARRAY.SIZE", &[h], &mut ctx), Ok(n(2.0)));
}

#[test]
fn stale_handles_are_ref_errors() {
    let mut ctx = ctx();
    let h = new_array(&mut ctx, &[1.0]);
    let key = h.as_handle().unwrap();
    ctx.release(key).unwrap();
    let e = call("ARRAY", &[h], &mut ctx).unwrap_err();
    assert_eq!(e.kind, ExcelErrorKind::Ref);

    let e = call("ARRAY", &[LiteralValue::Text("nope".into())], &mut ctx).unwrap_err();
    assert_eq!(e.kind, ExcelErrorKind::Ref);

    // a monoid handle is not an array handle
    let add = call("MONOID.ADD", &[], &mut ctx).unwrap();
    let e = call("ARRAY", &[add.clone()], &mut ctx).unwrap_err();
    assert_eq!(e.kind, ExcelErrorKind::Ref);
    assert!(ctx.release(add.as_handle().unwrap()).is_err());
    assert!(ctx.release(Handle::INVALID).is_err());
}

#[test]
fn monoid_and_operator_calls() {
    let mut ctx = ctx();
    let max = call("MONOID.MAX", &[], &mut ctx).unwrap();
    assert_eq!(call("MONOID", &[max.clone(), n(2.0), n(-3.0)], &mut ctx), Ok(n(2.0)));

    // MONOID.SCAN down a column, feeding each result back as the caller value
    let mut prev = None;
    let mut out = Vec::new();
    for x in [1.0, 5.0, 2.0] {
        ctx.set_caller(prev);
        let LiteralValue::Number(y) = call("MONOID.SCAN", &[max.clone(), n(x)], &mut ctx).unwrap()
        else {
            panic!("expected a number")
        };
        out.push(y);
        prev = Some(y);
    }
    assert_eq!(out, vec![1.0, 5.0, 5.0]);

    let div = call("DIV", &[], &mut ctx).unwrap();
    assert_eq!(call("BINOP", &[LiteralValue::Text("div".into())], &mut ctx), Ok(div.clone()));
    assert_eq!(call("BINOP.CALL", &[div, n(1.0), n(4.0)], &mut ctx), Ok(n(0.25)));
    let modulo = call("MOD", &[], &mut ctx).unwrap();
    assert_eq!(call("BINOP.CALL", &[modulo, n(7.0), n(3.0)], &mut ctx), Ok(n(1.0)));
    let e = call("UNOP", &[LiteralValue::Text("sqrt".into())], &mut ctx).unwrap_err();
    assert_eq!(e.kind, ExcelErrorKind::Name);
}

#[test]
fn registry_metadata() {
    load_builtins();
    load_builtins();
    let names = function_registry::names();
    for name in ["\\ARRAY", "ARRAY.SEQUENCE", "MONOID.SCAN", "BINOP.CALL", "UNOP"] {
        assert!(names.iter().any(|n| n == name), "{name} is not registered");
    }
    // required arguments are exactly the ones without a leading underscore
    for name in &names {
        let f = function_registry::get(name).unwrap();
        let required = f.arg_schema().iter().filter(|a| !a.optional()).count();
        assert_eq!(f.min_args(), required, "{name}");
    }
    let f = function_registry::get("\\array").unwrap();
    assert!(f.caps().contains(FnCaps::UNCALCED | FnCaps::RETURNS_HANDLE));
    assert_eq!(f.max_args(), 2);
    let f = function_registry::get("array.take").unwrap();
    assert!(f.caps().contains(FnCaps::COMMAND));
    assert!(!f.help().is_empty());
}
