//! Typed references to the registration form's controls

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// A control on the registration form, in form order
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Field {
    FirstName,
    LastName,
    Email,
    Phone,
    Age,
    Gender,
    Address,
    Country,
    State,
    City,
    Password,
    ConfirmPassword,
    Terms,
}

impl Field {
    /// Get the form identifier of the field
    pub fn as_str(&self) -> &'static str {
        match self {
            Field::FirstName => "firstName",
            Field::LastName => "lastName",
            Field::Email => "email",
            Field::Phone => "phone",
            Field::Age => "age",
            Field::Gender => "gender",
            Field::Address => "address",
            Field::Country => "country",
            Field::State => "state",
            Field::City => "city",
            Field::Password => "password",
            Field::ConfirmPassword => "confirmPassword",
            Field::Terms => "terms",
        }
    }

    /// Human-readable label shown next to the control
    pub fn label(&self) -> &'static str {
        match self {
            Field::FirstName => "First Name",
            Field::LastName => "Last Name",
            Field::Email => "Email",
            Field::Phone => "Phone",
            Field::Age => "Age",
            Field::Gender => "Gender",
            Field::Address => "Address",
            Field::Country => "Country",
            Field::State => "State",
            Field::City => "City",
            Field::Password => "Password",
            Field::ConfirmPassword => "Confirm Password",
            Field::Terms => "Terms & Conditions",
        }
    }

    /// All fields in form order
    pub fn all() -> &'static [Field] {
        &[
            Field::FirstName,
            Field::LastName,
            Field::Email,
            Field::Phone,
            Field::Age,
            Field::Gender,
            Field::Address,
            Field::Country,
            Field::State,
            Field::City,
            Field::Password,
            Field::ConfirmPassword,
            Field::Terms,
        ]
    }

    /// Whether the field holds free text typed by the user
    pub fn is_text(&self) -> bool {
        matches!(
            self,
            Field::FirstName
                | Field::LastName
                | Field::Email
                | Field::Phone
                | Field::Age
                | Field::Address
                | Field::Password
                | Field::ConfirmPassword
        )
    }

    /// Whether the value must be masked when displayed
    pub fn is_secret(&self) -> bool {
        matches!(self, Field::Password | Field::ConfirmPassword)
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown form field: {0}")]
pub struct UnknownField(pub String);

impl FromStr for Field {
    type Err = UnknownField;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Field::all()
            .iter()
            .copied()
            .find(|f| f.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| UnknownField(s.to_string()))
    }
}

/// Gender radio group values
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Gender {
    Male,
    Female,
    Other,
}

impl Gender {
    pub fn all() -> &'static [Gender] {
        &[Gender::Male, Gender::Female, Gender::Other]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Gender::Male => "Male",
            Gender::Female => "Female",
            Gender::Other => "Other",
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Gender {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "male" => Ok(Gender::Male),
            "female" => Ok(Gender::Female),
            "other" => Ok(Gender::Other),
            _ => Err(format!("Invalid gender: {}. Use male, female or other", s)),
        }
    }
}

/// Snapshot of every value on the form
///
/// This is also the on-disk submission format read by `regform validate`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FormValues {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub age: Option<u8>,
    pub gender: Option<Gender>,
    pub address: String,
    pub country: String,
    pub state: String,
    pub city: String,
    pub password: String,
    pub confirm_password: String,
    pub terms: bool,
}

impl FormValues {
    /// Text value of a field, `None` for the non-text controls
    pub fn text(&self, field: Field) -> Option<&str> {
        match field {
            Field::FirstName => Some(&self.first_name),
            Field::LastName => Some(&self.last_name),
            Field::Email => Some(&self.email),
            Field::Phone => Some(&self.phone),
            Field::Address => Some(&self.address),
            Field::Country => Some(&self.country),
            Field::State => Some(&self.state),
            Field::City => Some(&self.city),
            Field::Password => Some(&self.password),
            Field::ConfirmPassword => Some(&self.confirm_password),
            Field::Age | Field::Gender | Field::Terms => None,
        }
    }
}
