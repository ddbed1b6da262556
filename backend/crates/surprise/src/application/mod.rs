//! Application Layer - Use Cases
//!
//! Orchestrates the domain and the session runtime. Contains use case
//! implementations and the session store interface.

pub mod config;
pub mod drive_experience;
pub mod generate_link;
pub mod session;
pub mod session_store;
pub mod start_experience;
pub mod sweep_sessions;
pub mod watch_experience;
