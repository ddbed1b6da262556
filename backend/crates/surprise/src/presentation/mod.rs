//! Presentation Layer
//!
//! HTTP handlers, DTOs, views and pages.

pub mod dto;
pub mod handlers;
pub mod page;
pub mod router;
pub mod view;
