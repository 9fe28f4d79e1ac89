pub mod error;
pub mod function;
pub mod handle;
pub mod value;

pub use error::*;
pub use function::*;
pub use handle::*;
pub use value::*;
