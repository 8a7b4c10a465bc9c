//! Shared automation runtime services.

pub mod artifacts;
pub mod config;
pub mod context;
pub mod env;
pub mod error;
pub mod process;
pub mod workflow;
