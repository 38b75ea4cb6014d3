//! regform: registration form with cascading location selection
//!
//! The form logic (location table, cascading selectors, password strength,
//! validation rules and the form reducer) lives in [`core`] and has no
//! terminal dependencies. [`cli`] drives it from the command line and
//! [`schema`] checks submission files before they reach the rules.

pub mod cli;
pub mod core;
pub mod schema;
