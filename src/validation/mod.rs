//! Configuration validation and result assessment.

mod validate;

pub use validate::*;
