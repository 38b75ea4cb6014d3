//! Core module - form model, lookup data and rules

pub mod config;
pub mod field;
pub mod form;
pub mod location;
pub mod rules;
pub mod selector;
pub mod strength;

pub use config::Config;
pub use field::{Field, FormValues, Gender};
pub use form::{Acknowledgment, FieldState, FormContext, FormEvent, FormState, Outcome};
pub use location::{LocationError, LocationTable};
pub use rules::{Rules, ValidationReport};
pub use selector::{LocationSelector, SelectControl};
pub use strength::{Strength, Tier};
