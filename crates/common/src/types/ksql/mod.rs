pub mod field;
pub mod format;
pub mod kind;
pub mod reference;

pub use field::*;
pub use format::*;
pub use kind::*;
pub use reference::*;
