//! `regform template` command - Write a blank submission file

use console::style;
use miette::{IntoDiagnostic, Result};
use std::fs;
use std::path::PathBuf;

use crate::cli::helpers::Session;
use crate::cli::GlobalOpts;
use crate::schema::{TemplateContext, TemplateGenerator};

#[derive(clap::Args, Debug)]
pub struct TemplateArgs {
    /// Prefill the country
    #[arg(long)]
    pub country: Option<String>,

    /// Prefill the state (requires --country)
    #[arg(long, requires = "country")]
    pub state: Option<String>,

    /// Prefill the city (requires --state)
    #[arg(long, requires = "state")]
    pub city: Option<String>,

    /// Write to this file instead of stdout
    #[arg(long, short = 'o')]
    pub output: Option<PathBuf>,

    /// Overwrite an existing output file
    #[arg(long)]
    pub force: bool,
}

pub fn run(args: TemplateArgs, global: &GlobalOpts) -> Result<()> {
    let session = Session::load(global)?;

    let ctx = TemplateContext {
        filename: args
            .output
            .as_ref()
            .map(|p| p.display().to_string())
            .unwrap_or_default(),
        country: args.country,
        state: args.state,
        city: args.city,
    };
    ctx.check_location(&session.table).into_diagnostic()?;

    let generator = TemplateGenerator::new().into_diagnostic()?;
    let content = generator.generate_submission(&ctx).into_diagnostic()?;

    match args.output {
        Some(path) => {
            if path.exists() && !args.force {
                return Err(miette::miette!(
                    help = "Use --force to overwrite",
                    "{} already exists",
                    path.display()
                ));
            }
            fs::write(&path, content).into_diagnostic()?;
            if !global.quiet {
                println!(
                    "{} Created {}",
                    style("✓").green(),
                    style(path.display()).cyan()
                );
            }
        }
        None => print!("{}", content),
    }
    Ok(())
}
