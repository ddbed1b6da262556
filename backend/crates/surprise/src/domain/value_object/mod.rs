//! Value Object Module

pub mod recipient_name;
pub mod secret_code;
pub mod target_instant;
