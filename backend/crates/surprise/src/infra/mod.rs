//! Infrastructure Layer
//!
//! Implementations of the application-layer storage traits.

pub mod memory;
