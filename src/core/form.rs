//! Form state and the reducer that applies user interactions to it
//!
//! All mutable form state lives in [`FormState`]. Each interaction is a
//! [`FormEvent`] applied through [`FormState::apply`], which takes the
//! location table and rules explicitly instead of looking anything up
//! globally. Rendering is left to the caller.

use serde::Serialize;
use std::collections::BTreeMap;

use crate::core::field::{Field, FormValues, Gender};
use crate::core::location::LocationTable;
use crate::core::rules::{Rules, ValidationReport};
use crate::core::selector::LocationSelector;
use crate::core::strength::Strength;

/// A field's current value and its inline error annotation
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FieldState {
    pub value: String,
    /// Visible error message; `None` means the error element is hidden
    pub error: Option<String>,
}

impl FieldState {
    pub fn error_visible(&self) -> bool {
        self.error.is_some()
    }
}

/// Everything the reducer needs besides the state itself
#[derive(Debug, Clone, Copy)]
pub struct FormContext<'a> {
    pub table: &'a LocationTable,
    pub rules: &'a Rules,
}

/// A single user interaction
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormEvent {
    /// Keystroke in a text field
    SetText(Field, String),
    SelectGender(Option<Gender>),
    SetTerms(bool),
    SelectCountry(Option<String>),
    SelectState(Option<String>),
    SelectCity(Option<String>),
    Submit,
    Reset,
}

/// Shown after a successful submission
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Acknowledgment {
    pub first_name: String,
}

impl Acknowledgment {
    pub fn message(&self) -> String {
        format!("Registration Successful! Welcome, {}", self.first_name)
    }
}

/// Result of applying an event
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Updated,
    /// Submission blocked; the invalid fields are now marked
    Rejected(ValidationReport),
    /// Submission accepted; the form has been reset
    Submitted(Acknowledgment),
}

/// The complete state of the registration form
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FormState {
    text: BTreeMap<Field, FieldState>,
    pub gender: Option<Gender>,
    pub terms: bool,
    pub location: LocationSelector,
    pub strength: Strength,
    /// Errors of the non-text controls (gender, terms, location)
    control_errors: BTreeMap<Field, String>,
}

impl FormState {
    /// A freshly rendered form
    pub fn new(table: &LocationTable) -> Self {
        let text = Field::all()
            .iter()
            .filter(|f| f.is_text())
            .map(|f| (*f, FieldState::default()))
            .collect();

        Self {
            text,
            gender: None,
            terms: false,
            location: LocationSelector::new(table),
            strength: Strength::default(),
            control_errors: BTreeMap::new(),
        }
    }

    /// Apply one interaction
    pub fn apply(&mut self, event: FormEvent, ctx: FormContext<'_>) -> Outcome {
        log::trace!("applying {:?}", redact(&event));

        match event {
            FormEvent::SetText(field, value) => {
                if field == Field::Password {
                    self.strength = Strength::of(&value);
                }
                if let Some(state) = self.text.get_mut(&field) {
                    state.value = value;
                } else {
                    log::warn!("ignoring text for non-text field {}", field);
                }
                Outcome::Updated
            }
            FormEvent::SelectGender(gender) => {
                self.gender = gender;
                Outcome::Updated
            }
            FormEvent::SetTerms(checked) => {
                self.terms = checked;
                Outcome::Updated
            }
            FormEvent::SelectCountry(country) => {
                self.location.select_country(ctx.table, country.as_deref());
                Outcome::Updated
            }
            FormEvent::SelectState(state) => {
                self.location.select_state(ctx.table, state.as_deref());
                Outcome::Updated
            }
            FormEvent::SelectCity(city) => {
                self.location.select_city(city.as_deref());
                Outcome::Updated
            }
            FormEvent::Submit => self.submit(ctx),
            FormEvent::Reset => {
                *self = Self::new(ctx.table);
                Outcome::Updated
            }
        }
    }

    fn submit(&mut self, ctx: FormContext<'_>) -> Outcome {
        let values = self.values();
        let report = ctx.rules.validate(&values, ctx.table);

        if report.valid {
            *self = Self::new(ctx.table);
            log::debug!("submission accepted");
            return Outcome::Submitted(Acknowledgment {
                first_name: values.first_name,
            });
        }

        self.mark_errors(&report);
        Outcome::Rejected(report)
    }

    /// Show the report's errors and hide every other one
    pub fn mark_errors(&mut self, report: &ValidationReport) {
        for (field, state) in self.text.iter_mut() {
            state.error = report.error(*field).map(String::from);
        }
        self.control_errors = report
            .field_errors
            .iter()
            .filter(|(field, _)| !field.is_text())
            .map(|(field, message)| (*field, message.clone()))
            .collect();
    }

    /// Snapshot of every value, as the validator sees it
    pub fn values(&self) -> FormValues {
        let text = |field: Field| self.text(field).to_string();
        FormValues {
            first_name: text(Field::FirstName),
            last_name: text(Field::LastName),
            email: text(Field::Email),
            phone: text(Field::Phone),
            age: self.text(Field::Age).trim().parse().ok(),
            gender: self.gender,
            address: text(Field::Address),
            country: self.location.country.value().to_string(),
            state: self.location.state.value().to_string(),
            city: self.location.city.value().to_string(),
            password: text(Field::Password),
            confirm_password: text(Field::ConfirmPassword),
            terms: self.terms,
        }
    }

    /// Current text of a text field; empty for other fields
    pub fn text(&self, field: Field) -> &str {
        self.text.get(&field).map(|s| s.value.as_str()).unwrap_or("")
    }

    /// Visible error of any field
    pub fn error(&self, field: Field) -> Option<&str> {
        self.text
            .get(&field)
            .and_then(|s| s.error.as_deref())
            .or_else(|| self.control_errors.get(&field).map(String::as_str))
    }

    pub fn field(&self, field: Field) -> Option<&FieldState> {
        self.text.get(&field)
    }

    pub fn has_errors(&self) -> bool {
        Field::all().iter().any(|f| self.error(*f).is_some())
    }
}

/// Keep passwords out of trace output
fn redact(event: &FormEvent) -> FormEvent {
    match event {
        FormEvent::SetText(field, _) if field.is_secret() => {
            FormEvent::SetText(*field, "***".to_string())
        }
        other => other.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::rules::{MSG_LAST_NAME_REQUIRED, MSG_PASSWORD_MISMATCH};
    use crate::core::strength::Tier;

    struct Fixture {
        table: LocationTable,
        rules: Rules,
    }

    impl Fixture {
        fn new() -> Self {
            Self {
                table: LocationTable::embedded().unwrap(),
                rules: Rules::default(),
            }
        }

        fn ctx(&self) -> FormContext<'_> {
            FormContext {
                table: &self.table,
                rules: &self.rules,
            }
        }
    }

    fn type_text(form: &mut FormState, fx: &Fixture, field: Field, value: &str) {
        form.apply(FormEvent::SetText(field, value.to_string()), fx.ctx());
    }

    fn fill_valid(form: &mut FormState, fx: &Fixture) {
        type_text(form, fx, Field::FirstName, "Roopendra");
        type_text(form, fx, Field::LastName, "Ganesh");
        type_text(form, fx, Field::Email, "roopendra@example.com");
        type_text(form, fx, Field::Phone, "7075623324");
        type_text(form, fx, Field::Age, "21");
        type_text(form, fx, Field::Address, "Vadodara, Gujarat");
        form.apply(FormEvent::SelectGender(Some(Gender::Male)), fx.ctx());
        form.apply(FormEvent::SelectCountry(Some("India".into())), fx.ctx());
        form.apply(FormEvent::SelectState(Some("Maharashtra".into())), fx.ctx());
        form.apply(FormEvent::SelectCity(Some("Pune".into())), fx.ctx());
        type_text(form, fx, Field::Password, "Test@1234");
        type_text(form, fx, Field::ConfirmPassword, "Test@1234");
        form.apply(FormEvent::SetTerms(true), fx.ctx());
    }

    #[test]
    fn test_new_form_is_blank() {
        let fx = Fixture::new();
        let form = FormState::new(&fx.table);
        assert_eq!(form.values(), FormValues::default());
        assert!(!form.has_errors());
        assert_eq!(form.strength.tier, Tier::None);
        assert!(!form.location.state.enabled);
    }

    #[test]
    fn test_password_keystrokes_update_strength() {
        let fx = Fixture::new();
        let mut form = FormState::new(&fx.table);
        type_text(&mut form, &fx, Field::Password, "abcdef");
        assert_eq!(form.strength.tier, Tier::Weak);
        type_text(&mut form, &fx, Field::Password, "Test@1234");
        assert_eq!(form.strength.tier, Tier::Strong);
        type_text(&mut form, &fx, Field::ConfirmPassword, "x");
        assert_eq!(form.strength.tier, Tier::Strong);
    }

    #[test]
    fn test_valid_submit_resets_form() {
        let fx = Fixture::new();
        let mut form = FormState::new(&fx.table);
        fill_valid(&mut form, &fx);
        assert_eq!(form.values().age, Some(21));
        assert_eq!(form.values().city, "Pune");

        let outcome = form.apply(FormEvent::Submit, fx.ctx());
        match outcome {
            Outcome::Submitted(ack) => {
                assert_eq!(ack.message(), "Registration Successful! Welcome, Roopendra");
            }
            other => panic!("expected submission, got {:?}", other),
        }
        assert_eq!(form, FormState::new(&fx.table));
        assert_eq!(form.strength.text(), "Strength: ");
    }

    #[test]
    fn test_invalid_submit_marks_fields() {
        let fx = Fixture::new();
        let mut form = FormState::new(&fx.table);
        fill_valid(&mut form, &fx);
        type_text(&mut form, &fx, Field::LastName, "");

        let outcome = form.apply(FormEvent::Submit, fx.ctx());
        assert!(matches!(outcome, Outcome::Rejected(ref r) if r.error_count() == 1));
        assert_eq!(form.error(Field::LastName), Some(MSG_LAST_NAME_REQUIRED));
        assert!(form.field(Field::LastName).unwrap().error_visible());
        assert_eq!(form.error(Field::FirstName), None);
        // values are kept for correction
        assert_eq!(form.text(Field::FirstName), "Roopendra");
    }

    #[test]
    fn test_resubmit_hides_fixed_errors() {
        let fx = Fixture::new();
        let mut form = FormState::new(&fx.table);
        form.apply(FormEvent::Submit, fx.ctx());
        assert!(form.error(Field::Gender).is_some());
        assert!(form.error(Field::Terms).is_some());

        fill_valid(&mut form, &fx);
        type_text(&mut form, &fx, Field::ConfirmPassword, "Test@9999");
        form.apply(FormEvent::Submit, fx.ctx());
        assert_eq!(form.error(Field::Gender), None);
        assert_eq!(form.error(Field::Terms), None);
        assert_eq!(form.error(Field::ConfirmPassword), Some(MSG_PASSWORD_MISMATCH));
    }

    #[test]
    fn test_country_change_clears_city_value() {
        let fx = Fixture::new();
        let mut form = FormState::new(&fx.table);
        fill_valid(&mut form, &fx);
        form.apply(FormEvent::SelectCountry(Some("UK".into())), fx.ctx());
        let values = form.values();
        assert_eq!(values.country, "UK");
        assert_eq!(values.state, "");
        assert_eq!(values.city, "");
    }

    #[test]
    fn test_reset() {
        let fx = Fixture::new();
        let mut form = FormState::new(&fx.table);
        fill_valid(&mut form, &fx);
        form.apply(FormEvent::Reset, fx.ctx());
        assert_eq!(form, FormState::new(&fx.table));
    }

    #[test]
    fn test_redact_masks_passwords() {
        let event = FormEvent::SetText(Field::Password, "secret".to_string());
        assert_eq!(
            redact(&event),
            FormEvent::SetText(Field::Password, "***".to_string())
        );
        let event = FormEvent::SetText(Field::Email, "a@b.c".to_string());
        assert_eq!(redact(&event), event);
    }
}
