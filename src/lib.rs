//! designkit: convenience re-export of the core design-kit primitives.

pub use designkit_core::*;
