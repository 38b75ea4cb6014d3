//! Interactive wizard that fills the registration form field by field
//!
//! Every answer is fed to the form as a [`FormEvent`], so the terminal
//! prompts go through the same reducer as any other front end would.

use console::style;
use dialoguer::{theme::ColorfulTheme, Confirm, Input, Password, Select};
use miette::{IntoDiagnostic, Result};

use crate::cli::view::strength_meter;
use crate::core::{Field, FormContext, FormEvent, FormState, Gender};

const NO_SELECTION: &str = "(none)";

/// Prompts for form fields using dialoguer
pub struct RegistrationWizard {
    theme: ColorfulTheme,
    /// Skip the country/state/city prompts
    pub skip_location: bool,
}

impl RegistrationWizard {
    pub fn new(skip_location: bool) -> Self {
        Self {
            theme: ColorfulTheme::default(),
            skip_location,
        }
    }

    /// Prompt for each of `fields`, in form order
    pub fn fill(&self, form: &mut FormState, fields: &[Field], ctx: FormContext<'_>) -> Result<()> {
        let mut location_done = self.skip_location;

        for field in Field::all().iter().filter(|f| fields.contains(f)) {
            match field {
                Field::Gender => self.prompt_gender(form, ctx)?,
                Field::Terms => self.prompt_terms(form, ctx)?,
                // one cascading pass covers all three dropdowns
                Field::Country | Field::State | Field::City => {
                    if !location_done {
                        self.prompt_location(form, ctx)?;
                        location_done = true;
                    }
                }
                Field::Password | Field::ConfirmPassword => {
                    self.prompt_secret(form, *field, ctx)?
                }
                text => self.prompt_text(form, *text, ctx)?,
            }
        }
        Ok(())
    }

    fn prompt_text(&self, form: &mut FormState, field: Field, ctx: FormContext<'_>) -> Result<()> {
        let prompt = match field {
            Field::Age | Field::Address => format!("{} {}", field.label(), style("(optional)").dim()),
            _ => field.label().to_string(),
        };

        let value: String = Input::with_theme(&self.theme)
            .with_prompt(prompt)
            .with_initial_text(form.text(field))
            .allow_empty(true)
            .interact_text()
            .into_diagnostic()?;

        form.apply(FormEvent::SetText(field, value), ctx);
        Ok(())
    }

    fn prompt_secret(&self, form: &mut FormState, field: Field, ctx: FormContext<'_>) -> Result<()> {
        let value = Password::with_theme(&self.theme)
            .with_prompt(field.label())
            .allow_empty_password(true)
            .interact()
            .into_diagnostic()?;

        form.apply(FormEvent::SetText(field, value), ctx);
        if field == Field::Password {
            println!("  {}", strength_meter(&form.strength));
        }
        Ok(())
    }

    fn prompt_gender(&self, form: &mut FormState, ctx: FormContext<'_>) -> Result<()> {
        let items: Vec<&str> = Gender::all().iter().map(|g| g.as_str()).collect();
        let default_idx = form
            .gender
            .and_then(|g| Gender::all().iter().position(|x| *x == g))
            .unwrap_or(0);

        let selection = Select::with_theme(&self.theme)
            .with_prompt(Field::Gender.label())
            .items(&items)
            .default(default_idx)
            .interact_opt()
            .into_diagnostic()?;

        let gender = selection.map(|idx| Gender::all()[idx]);
        form.apply(FormEvent::SelectGender(gender), ctx);
        Ok(())
    }

    fn prompt_terms(&self, form: &mut FormState, ctx: FormContext<'_>) -> Result<()> {
        let accepted = Confirm::with_theme(&self.theme)
            .with_prompt("I accept the Terms & Conditions")
            .default(form.terms)
            .interact()
            .into_diagnostic()?;

        form.apply(FormEvent::SetTerms(accepted), ctx);
        Ok(())
    }

    /// Country, then state, then city; each list comes from the selector
    fn prompt_location(&self, form: &mut FormState, ctx: FormContext<'_>) -> Result<()> {
        let country = self.select_option(Field::Country, &form.location.country.options)?;
        form.apply(FormEvent::SelectCountry(country), ctx);
        if !form.location.state.enabled {
            return Ok(());
        }

        let state = self.select_option(Field::State, &form.location.state.options)?;
        form.apply(FormEvent::SelectState(state), ctx);
        if !form.location.city.enabled {
            return Ok(());
        }

        let city = self.select_option(Field::City, &form.location.city.options)?;
        form.apply(FormEvent::SelectCity(city), ctx);
        Ok(())
    }

    /// Select among `options`, with a leading "(none)" entry
    fn select_option(&self, field: Field, options: &[String]) -> Result<Option<String>> {
        if options.is_empty() {
            return Ok(None);
        }

        let mut items = vec![NO_SELECTION.to_string()];
        items.extend(options.iter().cloned());

        let selection = Select::with_theme(&self.theme)
            .with_prompt(field.label())
            .items(&items)
            .default(0)
            .interact()
            .into_diagnostic()?;

        Ok(selection.checked_sub(1).and_then(|i| options.get(i)).cloned())
    }
}
