//! Domain Layer - The recipient flow and the link generator
//!
//! This layer contains:
//! - Value objects (RecipientName, SecretCode, TargetInstant)
//! - Entities (SurpriseParameters, LinkRequest)
//! - Per-screen state (PasswordGate, Countdown, reveal steps)
//! - The Experience state machine tying them together
//!
//! Nothing here reads a clock or runs a timer.

pub mod countdown;
pub mod decoration;
pub mod entity;
pub mod experience;
pub mod gate;
pub mod reveal;
pub mod screen;
pub mod value_object;
