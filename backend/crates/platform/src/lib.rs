//! Platform Crate - Technical Infrastructure
//!
//! This crate provides shared technical foundations:
//! - Scheduled tasks with cancel-on-drop handles
//! - A clock seam so time-dependent logic can be driven in tests
//! - URL component encoding and HTML escaping
//! - Environment-based configuration helpers

pub mod clock;
pub mod config;
pub mod encoding;
pub mod html;
pub mod schedule;
