//! Domain models for intake processing.

mod catalog;
mod intake;
mod result;

pub use catalog::*;
pub use intake::*;
pub use result::*;
