/// Broad kind of a worksheet argument, used for documentation and arity checks.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum ArgKind {
    Number,
    Array,
    Handle,
    Logical,
    Text,
    Any,
}

/// One documented argument of a worksheet function.
///
/// Names starting with `_` are optional, following the add-in convention.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct ArgSpec {
    pub kind: ArgKind,
    pub name: &'static str,
    pub help: &'static str,
}

impl ArgSpec {
    pub const fn new(kind: ArgKind, name: &'static str, help: &'static str) -> Self {
        Self { kind, name, help }
    }

    pub fn optional(&self) -> bool {
        self.name.starts_with('_')
    }
}
