//! Entity Module

pub mod link_request;
pub mod surprise_parameters;
