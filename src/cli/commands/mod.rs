//! CLI command implementations

pub mod completions;
pub mod config;
pub mod locations;
pub mod register;
pub mod schema;
pub mod strength;
pub mod template;
pub mod validate;
