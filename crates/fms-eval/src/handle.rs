//! Tables that own add-in objects and hand out [`Handle`]s to them.

use fms_common::{ExcelError, ExcelErrorKind, Handle, LiteralValue};
use rustc_hash::FxHashMap;

#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum HandleError {
    /// The value cannot encode a handle at all.
    #[error("not a handle: {0}")]
    Malformed(String),

    /// Well-formed, but nothing (or nothing of the right kind) lives there.
    #[error("unknown handle {0}")]
    Unknown(Handle),

    /// Built-in objects live as long as the context.
    #[error("handle {0} is built in and cannot be released")]
    BuiltIn(Handle),
}

impl From<HandleError> for ExcelError {
    fn from(e: HandleError) -> Self {
        ExcelError::new(ExcelErrorKind::Ref).with_message(e.to_string())
    }
}

/// Decode a worksheet value into a handle.
pub fn decode(v: &LiteralValue) -> Result<Handle, HandleError> {
    v.as_handle()
        .ok_or_else(|| HandleError::Malformed(v.as_scalar().to_string()))
}

/// Owner of every object created through a handle.
///
/// Keys are handed out in increasing order, `first, first + stride, ...`,
/// and never reused. Giving several tables the same stride and different
/// starting points keeps their handles disjoint.
#[derive(Debug)]
pub struct HandleTable<T> {
    next: u64,
    stride: u64,
    items: FxHashMap<u64, T>,
}

impl<T> Default for HandleTable<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> HandleTable<T> {
    pub fn new() -> Self {
        Self::strided(1, 1)
    }

    pub fn strided(first: u64, stride: u64) -> Self {
        Self {
            next: first.max(1),
            stride: stride.max(1),
            items: FxHashMap::default(),
        }
    }

    pub fn insert(&mut self, item: T) -> Handle {
        let h = Handle::new(self.next);
        self.next += self.stride;
        self.items.insert(h.key(), item);
        #[cfg(feature = "tracing")]
        tracing::trace!(handle = h.key(), live = self.items.len(), "handle created");
        h
    }

    pub fn get(&self, h: Handle) -> Result<&T, HandleError> {
        self.items.get(&h.key()).ok_or(HandleError::Unknown(h))
    }

    pub fn get_mut(&mut self, h: Handle) -> Result<&mut T, HandleError> {
        self.items.get_mut(&h.key()).ok_or(HandleError::Unknown(h))
    }

    pub fn remove(&mut self, h: Handle) -> Result<T, HandleError> {
        let item = self.items.remove(&h.key()).ok_or(HandleError::Unknown(h))?;
        #[cfg(feature = "tracing")]
        tracing::trace!(handle = h.key(), live = self.items.len(), "handle released");
        Ok(item)
    }

    pub fn contains(&self, h: Handle) -> bool {
        self.items.contains_key(&h.key())
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_get_remove() {
        let mut t = HandleTable::new();
        let a = t.insert("a".to_string());
        let b = t.insert("b".to_string());
        assert_ne!(a, b);
        assert_eq!(t.get(a).map(String::as_str), Ok("a"));
        t.get_mut(b).unwrap().push('!');
        assert_eq!(t.get(b).map(String::as_str), Ok("b!"));
        assert_eq!(t.remove(a), Ok("a".to_string()));
        assert!(!t.contains(a));
        assert_eq!(t.get(a), Err(HandleError::Unknown(a)));
        assert_eq!(t.len(), 1);
    }

    #[test]
    fn handles_are_never_reused() {
        let mut t = HandleTable::new();
        let a = t.insert(1);
        t.remove(a).unwrap();
        let b = t.insert(2);
        assert_ne!(a, b);
        assert!(!t.contains(a));
    }

    #[test]
    fn strided_tables_are_disjoint() {
        let mut x = HandleTable::strided(1, 2);
        let mut y = HandleTable::strided(2, 2);
        let hx: Vec<Handle> = (0..3).map(|i| x.insert(i)).collect();
        let hy: Vec<Handle> = (0..3).map(|i| y.insert(i)).collect();
        assert!(hx.iter().all(|h| !y.contains(*h)));
        assert!(hy.iter().all(|h| !x.contains(*h)));
    }

    #[test]
    fn errors_become_ref() {
        let e: ExcelError = HandleError::Unknown(Handle::new(9)).into();
        assert_eq!(e.kind, ExcelErrorKind::Ref);
        assert_eq!(e.message.as_deref(), Some("unknown handle #9"));
        let d = decode(&LiteralValue::Number(2.5)).unwrap_err();
        assert_eq!(d, HandleError::Malformed("2.5".into()));
        assert_eq!(decode(&LiteralValue::Number(4.0)), Ok(Handle::new(4)));
    }
}
