pub mod array;
pub mod monoid;
pub mod op;
mod utils;

use once_cell::sync::Lazy;

static LOADED: Lazy<()> = Lazy::new(|| {
    array::register_builtins();
    monoid::register_builtins();
    op::register_builtins();
});

/// Register every worksheet function. Safe to call more than once.
pub fn load_builtins() {
    Lazy::force(&LOADED);
}
