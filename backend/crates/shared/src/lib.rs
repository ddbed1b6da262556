//! Shared Kernel - Domain-crossing minimal core
//!
//! This crate holds the vocabulary every feature crate agrees on:
//! - The unified error type and its HTTP classification
//! - Typed ID wrappers
//!
//! Nothing here knows about surprises, screens or countdowns.

pub mod error {
    pub mod app_error;
    pub mod conversions;
    pub mod kind;
}
pub mod id;
