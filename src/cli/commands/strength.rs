//! `regform strength` command - Estimate password strength

use miette::{IntoDiagnostic, Result};
use std::io::{BufRead, IsTerminal};

use crate::cli::view::strength_meter;
use crate::cli::{GlobalOpts, OutputFormat};
use crate::core::Strength;

#[derive(clap::Args, Debug)]
pub struct StrengthArgs {
    /// Password to score (read from stdin when omitted)
    pub password: Option<String>,
}

pub fn run(args: StrengthArgs, global: &GlobalOpts) -> Result<()> {
    let password = match args.password {
        Some(p) => p,
        None => read_password()?,
    };
    let strength = Strength::of(&password);

    match global.format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&strength).into_diagnostic()?);
        }
        OutputFormat::Yaml => {
            print!("{}", serde_yml::to_string(&strength).into_diagnostic()?);
        }
        OutputFormat::Tsv | OutputFormat::Csv => {
            let sep = if global.format == OutputFormat::Csv { ',' } else { '\t' };
            println!("{}{}{}", strength.score, sep, strength.tier.label());
        }
        OutputFormat::Auto | OutputFormat::Md => {
            println!("{}", strength_meter(&strength));
        }
    }
    Ok(())
}

/// First line of stdin, prompting without echo on a terminal
fn read_password() -> Result<String> {
    if std::io::stdin().is_terminal() {
        return dialoguer::Password::new()
            .with_prompt("Password")
            .allow_empty_password(true)
            .interact()
            .into_diagnostic();
    }

    let mut line = String::new();
    std::io::stdin()
        .lock()
        .read_line(&mut line)
        .into_diagnostic()?;
    Ok(line.trim_end_matches(['\r', '\n']).to_string())
}
