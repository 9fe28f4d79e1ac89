use crate::context::AddinContext;
use crate::function::Function;
use dashmap::DashMap;
use fms_common::{ExcelError, ExcelErrorKind, LiteralValue};
use once_cell::sync::Lazy;
use std::sync::Arc;

/// Worksheet names are case-insensitive; keys are stored upper-cased.
static REG: Lazy<DashMap<String, Arc<dyn Function>>> = Lazy::new(DashMap::new);

pub fn register(f: Arc<dyn Function>) {
    REG.insert(f.name().to_ascii_uppercase(), f);
}

pub fn get(name: &str) -> Option<Arc<dyn Function>> {
    REG.get(&name.trim().to_ascii_uppercase())
        .map(|v| Arc::clone(v.value()))
}

/// Registered names in sorted order.
pub fn names() -> Vec<String> {
    let mut v: Vec<String> = REG.iter().map(|e| e.key().clone()).collect();
    v.sort();
    v
}

/// Look up `name` and dispatch. Unknown names are `#NAME?`.
pub fn call(
    name: &str,
    args: &[LiteralValue],
    ctx: &mut AddinContext,
) -> Result<LiteralValue, ExcelError> {
    let f = get(name).ok_or_else(|| {
        ExcelError::new(ExcelErrorKind::Name).with_message(format!("unknown function {name}"))
    })?;
    f.dispatch(args, ctx)
}
