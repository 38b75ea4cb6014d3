//! `regform register` command - Fill in the registration form interactively

use console::style;
use dialoguer::{theme::ColorfulTheme, Confirm};
use miette::{IntoDiagnostic, Result};
use std::fs;
use std::path::PathBuf;

use crate::cli::helpers::Session;
use crate::cli::view::{render_form, render_report};
use crate::cli::wizard::RegistrationWizard;
use crate::cli::GlobalOpts;
use crate::core::{Field, FormEvent, FormState, Outcome};

#[derive(clap::Args, Debug)]
pub struct RegisterArgs {
    /// Skip the country/state/city prompts
    #[arg(long)]
    pub no_location: bool,

    /// Number of submission attempts before giving up
    #[arg(long, default_value_t = 3, value_parser = clap::value_parser!(u32).range(1..))]
    pub attempts: u32,

    /// Show the filled form and ask before submitting
    #[arg(long)]
    pub review: bool,

    /// Save the accepted submission as YAML
    #[arg(long, short = 'o')]
    pub save: Option<PathBuf>,
}

pub fn run(args: RegisterArgs, global: &GlobalOpts) -> Result<()> {
    let session = Session::load(global)?;
    let ctx = session.ctx();
    let wizard = RegistrationWizard::new(args.no_location);
    let mut form = FormState::new(&session.table);

    if !global.quiet {
        println!("{}", style("Registration").bold().underlined());
        println!();
    }

    let mut pending: Vec<Field> = Field::all().to_vec();
    for attempt in 1..=args.attempts {
        log::debug!("attempt {} of {}: prompting {} fields", attempt, args.attempts, pending.len());
        wizard.fill(&mut form, &pending, ctx)?;

        if args.review && !confirm_review(&form)? {
            pending = Field::all().to_vec();
            continue;
        }

        let values = form.values();
        match form.apply(FormEvent::Submit, ctx) {
            Outcome::Submitted(ack) => {
                if let Some(path) = &args.save {
                    let yaml = serde_yml::to_string(&values).into_diagnostic()?;
                    fs::write(path, yaml).into_diagnostic()?;
                    log::info!("saved submission to {}", path.display());
                }
                println!();
                println!("{} {}", style("✓").green(), style(ack.message()).green().bold());
                return Ok(());
            }
            Outcome::Rejected(report) => {
                eprintln!();
                eprintln!("{}", render_report(&report));
                pending = failing_fields(report.field_errors.keys().copied());
            }
            Outcome::Updated => {}
        }
    }

    Err(miette::miette!(
        help = "Run 'regform register' again, or fill a file from 'regform template'",
        "Registration not completed after {} attempt(s)",
        args.attempts
    ))
}

fn confirm_review(form: &FormState) -> Result<bool> {
    println!();
    println!("{}", render_form(form));
    Confirm::with_theme(&ColorfulTheme::default())
        .with_prompt("Submit?")
        .default(true)
        .interact()
        .into_diagnostic()
}

/// Fields to prompt again; a location error re-runs the whole cascade
fn failing_fields(errors: impl Iterator<Item = Field>) -> Vec<Field> {
    let mut fields: Vec<Field> = Vec::new();
    for field in errors {
        match field {
            Field::Country | Field::State | Field::City => {
                fields.extend([Field::Country, Field::State, Field::City])
            }
            // mismatches are fixed by retyping both
            Field::ConfirmPassword => fields.extend([Field::Password, Field::ConfirmPassword]),
            other => fields.push(other),
        }
    }
    fields.sort();
    fields.dedup();
    fields
}
