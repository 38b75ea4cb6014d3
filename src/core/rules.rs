//! Submission rules for the registration form
//!
//! Every rule is evaluated on each submission, independently of the others,
//! and contributes at most one message for its field.

use serde::Serialize;
use std::collections::BTreeMap;

use crate::core::field::{Field, FormValues};
use crate::core::location::LocationTable;

/// Email domains rejected at submission time
pub const DISPOSABLE_DOMAINS: &[&str] = &["tempmail.com", "10minutemail.com", "mailinator.com"];

/// Shortest accepted phone number, in characters
pub const MIN_PHONE_LENGTH: usize = 10;

pub const MSG_FIRST_NAME_REQUIRED: &str = "First Name is required";
pub const MSG_LAST_NAME_REQUIRED: &str = "Last Name is required";
pub const MSG_EMAIL_REQUIRED: &str = "Email is required";
pub const MSG_EMAIL_INVALID: &str = "Enter a valid email";
pub const MSG_EMAIL_DISPOSABLE: &str = "Disposable emails not allowed";
pub const MSG_PHONE_REQUIRED: &str = "Phone is required";
pub const MSG_PHONE_INVALID: &str = "Invalid phone number";
pub const MSG_GENDER_REQUIRED: &str = "Please select a gender";
pub const MSG_PASSWORD_REQUIRED: &str = "Password is required";
pub const MSG_CONFIRM_REQUIRED: &str = "Confirm Password is required";
pub const MSG_PASSWORD_MISMATCH: &str = "Passwords do not match";
pub const MSG_TERMS_REQUIRED: &str = "You must accept T&Cs";
pub const MSG_COUNTRY_INVALID: &str = "Select a valid country";
pub const MSG_STATE_INVALID: &str = "Select a valid state";
pub const MSG_CITY_INVALID: &str = "Select a valid city";

/// Outcome of validating one submission
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ValidationReport {
    pub valid: bool,
    #[serde(rename = "fieldErrors")]
    pub field_errors: BTreeMap<Field, String>,
}

impl ValidationReport {
    fn from_errors(field_errors: BTreeMap<Field, String>) -> Self {
        Self {
            valid: field_errors.is_empty(),
            field_errors,
        }
    }

    /// Message reported for a field, if any
    pub fn error(&self, field: Field) -> Option<&str> {
        self.field_errors.get(&field).map(String::as_str)
    }

    pub fn error_count(&self) -> usize {
        self.field_errors.len()
    }
}

/// Rule configuration: the disposable-domain denylist
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rules {
    disposable_domains: Vec<String>,
}

impl Default for Rules {
    fn default() -> Self {
        Self {
            disposable_domains: DISPOSABLE_DOMAINS.iter().map(|d| d.to_string()).collect(),
        }
    }
}

impl Rules {
    /// Built-in denylist extended with extra domains
    pub fn with_extra_domains<I, S>(extra: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut rules = Self::default();
        for domain in extra {
            let domain = domain.into().trim().to_string();
            if !domain.is_empty() && !rules.disposable_domains.contains(&domain) {
                rules.disposable_domains.push(domain);
            }
        }
        rules
    }

    pub fn disposable_domains(&self) -> &[String] {
        &self.disposable_domains
    }

    fn is_disposable(&self, domain: &str) -> bool {
        self.disposable_domains.iter().any(|d| d == domain)
    }

    /// Validate a full set of form values
    pub fn validate(&self, values: &FormValues, table: &LocationTable) -> ValidationReport {
        let mut errors = BTreeMap::new();
        let mut report = |field: Field, message: Option<&str>| {
            if let Some(message) = message {
                errors.insert(field, message.to_string());
            }
        };

        report(Field::FirstName, required(&values.first_name, MSG_FIRST_NAME_REQUIRED));
        report(Field::LastName, required(&values.last_name, MSG_LAST_NAME_REQUIRED));
        report(Field::Email, self.check_email(&values.email));
        report(Field::Phone, check_phone(&values.phone));

        if values.gender.is_none() {
            report(Field::Gender, Some(MSG_GENDER_REQUIRED));
        }

        if values.password.is_empty() {
            report(Field::Password, Some(MSG_PASSWORD_REQUIRED));
        }
        if values.confirm_password.is_empty() {
            report(Field::ConfirmPassword, Some(MSG_CONFIRM_REQUIRED));
        } else if values.password != values.confirm_password {
            report(Field::ConfirmPassword, Some(MSG_PASSWORD_MISMATCH));
        }

        if !values.terms {
            report(Field::Terms, Some(MSG_TERMS_REQUIRED));
        }

        for (field, message) in check_location(values, table) {
            report(field, Some(message));
        }

        let result = ValidationReport::from_errors(errors);
        log::debug!("validated submission: {} error(s)", result.error_count());
        result
    }

    fn check_email(&self, email: &str) -> Option<&'static str> {
        if email.trim().is_empty() {
            return Some(MSG_EMAIL_REQUIRED);
        }
        if !email.contains('@') || !email.contains('.') {
            return Some(MSG_EMAIL_INVALID);
        }
        match email_domain(email) {
            Some(domain) if self.is_disposable(domain) => Some(MSG_EMAIL_DISPOSABLE),
            _ => None,
        }
    }
}

/// Domain part of an address: text after the first `@`, up to any further `@`
pub fn email_domain(email: &str) -> Option<&str> {
    email.split('@').nth(1)
}

fn required(value: &str, message: &'static str) -> Option<&'static str> {
    value.trim().is_empty().then_some(message)
}

fn check_phone(phone: &str) -> Option<&'static str> {
    if phone.trim().is_empty() {
        Some(MSG_PHONE_REQUIRED)
    } else if phone.chars().count() < MIN_PHONE_LENGTH {
        Some(MSG_PHONE_INVALID)
    } else {
        None
    }
}

/// Location fields are optional, but a chosen value must exist under its parent
fn check_location(values: &FormValues, table: &LocationTable) -> Vec<(Field, &'static str)> {
    let mut errors = Vec::new();
    let (country, state, city) = (&values.country, &values.state, &values.city);

    if !country.is_empty() && !table.has_country(country) {
        errors.push((Field::Country, MSG_COUNTRY_INVALID));
    }
    if !state.is_empty() && !table.has_state(country, state) {
        errors.push((Field::State, MSG_STATE_INVALID));
    }
    if !city.is_empty() && !table.has_city(country, state, city) {
        errors.push((Field::City, MSG_CITY_INVALID));
    }
    errors
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::field::Gender;

    fn table() -> LocationTable {
        LocationTable::embedded().unwrap()
    }

    fn valid_values() -> FormValues {
        FormValues {
            first_name: "Roopendra".to_string(),
            last_name: "Ganesh".to_string(),
            email: "roopendra@example.com".to_string(),
            phone: "7075623324".to_string(),
            age: Some(21),
            gender: Some(Gender::Male),
            address: "Vadodara, Gujarat".to_string(),
            country: "India".to_string(),
            state: "Maharashtra".to_string(),
            city: "Pune".to_string(),
            password: "Test@1234".to_string(),
            confirm_password: "Test@1234".to_string(),
            terms: true,
        }
    }

    #[test]
    fn test_valid_submission() {
        let report = Rules::default().validate(&valid_values(), &table());
        assert!(report.valid, "unexpected errors: {:?}", report.field_errors);
        assert_eq!(report.error_count(), 0);
    }

    #[test]
    fn test_all_empty_reports_every_required_field() {
        let report = Rules::default().validate(&FormValues::default(), &table());
        assert!(!report.valid);
        assert_eq!(report.error(Field::FirstName), Some(MSG_FIRST_NAME_REQUIRED));
        assert_eq!(report.error(Field::LastName), Some(MSG_LAST_NAME_REQUIRED));
        assert_eq!(report.error(Field::Email), Some(MSG_EMAIL_REQUIRED));
        assert_eq!(report.error(Field::Phone), Some(MSG_PHONE_REQUIRED));
        assert_eq!(report.error(Field::Gender), Some(MSG_GENDER_REQUIRED));
        assert_eq!(report.error(Field::Password), Some(MSG_PASSWORD_REQUIRED));
        assert_eq!(report.error(Field::ConfirmPassword), Some(MSG_CONFIRM_REQUIRED));
        assert_eq!(report.error(Field::Terms), Some(MSG_TERMS_REQUIRED));
        assert_eq!(report.error_count(), 8);
    }

    #[test]
    fn test_whitespace_names_are_empty() {
        let values = FormValues {
            first_name: "   ".to_string(),
            last_name: "\t".to_string(),
            ..valid_values()
        };
        let report = Rules::default().validate(&values, &table());
        assert_eq!(report.error(Field::FirstName), Some(MSG_FIRST_NAME_REQUIRED));
        assert_eq!(report.error(Field::LastName), Some(MSG_LAST_NAME_REQUIRED));
    }

    #[test]
    fn test_disposable_email_regardless_of_other_fields() {
        let values = FormValues {
            email: "someone@mailinator.com".to_string(),
            ..FormValues::default()
        };
        let report = Rules::default().validate(&values, &table());
        assert_eq!(report.error(Field::Email), Some(MSG_EMAIL_DISPOSABLE));

        let values = FormValues {
            email: "someone@mailinator.com".to_string(),
            ..valid_values()
        };
        let report = Rules::default().validate(&values, &table());
        assert!(!report.valid);
        assert_eq!(report.error(Field::Email), Some(MSG_EMAIL_DISPOSABLE));
        assert_eq!(report.error_count(), 1);
    }

    #[test]
    fn test_email_shape() {
        let rules = Rules::default();
        assert_eq!(rules.check_email("no-at-sign.com"), Some(MSG_EMAIL_INVALID));
        assert_eq!(rules.check_email("user@localhost"), Some(MSG_EMAIL_INVALID));
        assert_eq!(rules.check_email("  "), Some(MSG_EMAIL_REQUIRED));
        assert_eq!(rules.check_email("a.b@example"), None);
        assert_eq!(rules.check_email("user@tempmail.com"), Some(MSG_EMAIL_DISPOSABLE));
        assert_eq!(rules.check_email("user@10minutemail.com"), Some(MSG_EMAIL_DISPOSABLE));
        // subdomains are not on the list
        assert_eq!(rules.check_email("user@mx.mailinator.com"), None);
    }

    #[test]
    fn test_email_domain() {
        assert_eq!(email_domain("a@b.com"), Some("b.com"));
        assert_eq!(email_domain("a@b.com@c.org"), Some("b.com"));
        assert_eq!(email_domain("nobody"), None);
    }

    #[test]
    fn test_extra_disposable_domains() {
        let rules = Rules::with_extra_domains(["throwaway.io", " ", "mailinator.com"]);
        assert_eq!(rules.disposable_domains().len(), 4);
        assert_eq!(rules.check_email("x@throwaway.io"), Some(MSG_EMAIL_DISPOSABLE));
    }

    #[test]
    fn test_phone_length() {
        assert_eq!(check_phone("12345"), Some(MSG_PHONE_INVALID));
        assert_eq!(check_phone("123456789"), Some(MSG_PHONE_INVALID));
        assert_eq!(check_phone("1234567890"), None);
        // no digit-only check
        assert_eq!(check_phone("call me now"), None);
        assert_eq!(check_phone("   "), Some(MSG_PHONE_REQUIRED));
    }

    #[test]
    fn test_password_mismatch_is_inline() {
        let values = FormValues {
            confirm_password: "Test@12345".to_string(),
            ..valid_values()
        };
        let report = Rules::default().validate(&values, &table());
        assert!(!report.valid);
        assert_eq!(report.error(Field::ConfirmPassword), Some(MSG_PASSWORD_MISMATCH));
        assert_eq!(report.error(Field::Password), None);
    }

    #[test]
    fn test_terms_and_gender() {
        let values = FormValues {
            gender: None,
            terms: false,
            ..valid_values()
        };
        let report = Rules::default().validate(&values, &table());
        assert_eq!(report.error(Field::Gender), Some(MSG_GENDER_REQUIRED));
        assert_eq!(report.error(Field::Terms), Some(MSG_TERMS_REQUIRED));
    }

    #[test]
    fn test_location_optional_but_consistent() {
        let table = table();
        let values = FormValues {
            country: String::new(),
            state: String::new(),
            city: String::new(),
            ..valid_values()
        };
        assert!(Rules::default().validate(&values, &table).valid);

        let values = FormValues {
            country: "India".to_string(),
            state: "Texas".to_string(),
            city: "Austin".to_string(),
            ..valid_values()
        };
        let report = Rules::default().validate(&values, &table);
        assert_eq!(report.error(Field::Country), None);
        assert_eq!(report.error(Field::State), Some(MSG_STATE_INVALID));
        assert_eq!(report.error(Field::City), Some(MSG_CITY_INVALID));

        let values = FormValues {
            country: "Atlantis".to_string(),
            ..valid_values()
        };
        let report = Rules::default().validate(&values, &table);
        assert_eq!(report.error(Field::Country), Some(MSG_COUNTRY_INVALID));
    }

    #[test]
    fn test_report_serializes_field_identifiers() {
        let report = Rules::default().validate(&FormValues::default(), &table());
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["valid"], false);
        assert_eq!(json["fieldErrors"]["firstName"], MSG_FIRST_NAME_REQUIRED);
        assert_eq!(json["fieldErrors"]["confirmPassword"], MSG_CONFIRM_REQUIRED);
    }
}
