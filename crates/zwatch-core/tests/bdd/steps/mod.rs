//! BDD step definitions for the ZWatch client core

pub mod controller_steps;
pub mod latency_steps;
pub mod session_steps;
pub mod timeline_steps;
