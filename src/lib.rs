pub use crudkit_core::*;
pub use crudkit_macros::*;
