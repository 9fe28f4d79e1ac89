//! Per-session state shared by all worksheet functions.

use std::sync::Arc;

use fms_common::{ExcelError, Handle, LiteralValue};
use fms_core::{BinOp, Binary, Monoid, Standard, UnOp, Unary};
use rustc_hash::FxHashMap;

use crate::fpx::Fpx;
use crate::handle::{HandleError, HandleTable};

const LANES: u64 = 4;

/// Handle tables for every kind of add-in object, plus the value of the
/// calling cell for functions that scan over their own previous result.
///
/// Each table draws keys from its own lane, so a handle identifies exactly
/// one table. The standard monoids and every named operator are created
/// up front and cannot be released.
pub struct AddinContext {
    pub arrays: HandleTable<Fpx>,
    pub monoids: HandleTable<Arc<dyn Monoid<f64>>>,
    pub binops: HandleTable<Arc<dyn BinOp<f64>>>,
    pub unops: HandleTable<Arc<dyn UnOp<f64>>>,
    builtin_monoids: FxHashMap<Standard, Handle>,
    builtin_binops: FxHashMap<Binary, Handle>,
    builtin_unops: FxHashMap<Unary, Handle>,
    caller: Option<f64>,
}

impl Default for AddinContext {
    fn default() -> Self {
        Self::new()
    }
}

impl AddinContext {
    pub fn new() -> Self {
        let mut ctx = Self {
            arrays: HandleTable::strided(1, LANES),
            monoids: HandleTable::strided(2, LANES),
            binops: HandleTable::strided(3, LANES),
            unops: HandleTable::strided(4, LANES),
            builtin_monoids: FxHashMap::default(),
            builtin_binops: FxHashMap::default(),
            builtin_unops: FxHashMap::default(),
            caller: None,
        };
        for m in Standard::ALL {
            let h = ctx.monoids.insert(Arc::new(m));
            ctx.builtin_monoids.insert(m, h);
        }
        for b in Binary::ALL {
            let h = ctx.binops.insert(Arc::new(b));
            ctx.builtin_binops.insert(b, h);
        }
        for u in Unary::ALL {
            let h = ctx.unops.insert(Arc::new(u));
            ctx.builtin_unops.insert(u, h);
        }
        #[cfg(feature = "tracing")]
        tracing::debug!(
            monoids = ctx.monoids.len(),
            binops = ctx.binops.len(),
            unops = ctx.unops.len(),
            "add-in context ready"
        );
        ctx
    }

    pub fn monoid_handle(&self, m: Standard) -> Handle {
        self.builtin_monoids.get(&m).copied().unwrap_or(Handle::INVALID)
    }

    pub fn binop_handle(&self, b: Binary) -> Handle {
        self.builtin_binops.get(&b).copied().unwrap_or(Handle::INVALID)
    }

    pub fn unop_handle(&self, u: Unary) -> Handle {
        self.builtin_unops.get(&u).copied().unwrap_or(Handle::INVALID)
    }

    fn is_builtin(&self, h: Handle) -> bool {
        self.builtin_monoids.values().any(|&b| b == h)
            || self.builtin_binops.values().any(|&b| b == h)
            || self.builtin_unops.values().any(|&b| b == h)
    }

    /// Drop the object behind `h`, whatever table it lives in.
    pub fn release(&mut self, h: Handle) -> Result<(), HandleError> {
        if self.is_builtin(h) {
            return Err(HandleError::BuiltIn(h));
        }
        let lane = h.key().checked_sub(1).map(|k| k % LANES);
        match lane {
            Some(0) => self.arrays.remove(h).map(|_| ()),
            Some(1) => self.monoids.remove(h).map(|_| ()),
            Some(2) => self.binops.remove(h).map(|_| ()),
            Some(3) => self.unops.remove(h).map(|_| ()),
            _ => Err(HandleError::Unknown(h)),
        }
    }

    /// Value the calling cell held before this evaluation, if any.
    pub fn caller(&self) -> Option<f64> {
        self.caller
    }

    pub fn set_caller(&mut self, value: Option<f64>) {
        self.caller = value;
    }

    /* ───────────────────────── argument helpers ───────────────────────── */

    /// A `1 x 1` argument naming a live array selects command mode.
    pub fn array_handle(&self, v: &LiteralValue) -> Option<Handle> {
        if v.shape() != (1, 1) {
            return None;
        }
        v.as_handle().filter(|h| self.arrays.contains(*h))
    }

    /// The array an argument refers to: the in-memory one for a handle,
    /// otherwise the argument's own values.
    pub fn array_arg(&self, v: &LiteralValue) -> Result<Fpx, ExcelError> {
        match self.array_handle(v) {
            Some(h) => Ok(self.arrays.get(h)?.clone()),
            None => Fpx::try_from(v),
        }
    }

    /// Run `f` on the in-memory array and return its handle, or on a copy of
    /// the argument and return the result.
    pub fn with_array<F>(&mut self, v: &LiteralValue, f: F) -> Result<LiteralValue, ExcelError>
    where
        F: FnOnce(&mut Fpx),
    {
        if let Some(h) = self.array_handle(v) {
            f(self.arrays.get_mut(h)?);
            return Ok(h.into());
        }
        let mut a = Fpx::try_from(v)?;
        f(&mut a);
        Ok(a.into())
    }

    /// Read an array argument without copying an in-memory array.
    pub fn read_array<R, F>(&self, v: &LiteralValue, f: F) -> Result<R, ExcelError>
    where
        F: FnOnce(&Fpx) -> R,
    {
        match self.array_handle(v) {
            Some(h) => Ok(f(self.arrays.get(h)?)),
            None => Ok(f(&Fpx::try_from(v)?)),
        }
    }

    pub fn monoid(&self, v: &LiteralValue) -> Result<Arc<dyn Monoid<f64>>, HandleError> {
        let h = crate::handle::decode(v)?;
        self.monoids.get(h).cloned()
    }

    pub fn binop(&self, v: &LiteralValue) -> Result<Arc<dyn BinOp<f64>>, HandleError> {
        let h = crate::handle::decode(v)?;
        self.binops.get(h).cloned()
    }

    pub fn unop(&self, v: &LiteralValue) -> Result<Arc<dyn UnOp<f64>>, HandleError> {
        let h = crate::handle::decode(v)?;
        self.unops.get(h).cloned()
    }
}
