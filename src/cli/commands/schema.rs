//! `regform schema` command - Print embedded JSON schemas

use miette::Result;

use crate::schema::{SchemaKind, SchemaRegistry};

#[derive(clap::Args, Debug)]
pub struct SchemaArgs {
    /// Which schema to print
    #[arg(value_enum, default_value = "submission")]
    pub kind: SchemaKind,
}

pub fn run(args: SchemaArgs) -> Result<()> {
    let registry = SchemaRegistry::default();
    let schema = registry
        .get(args.kind)
        .ok_or_else(|| miette::miette!("No schema embedded for {}", args.kind))?;
    println!("{}", schema.trim_end());
    Ok(())
}
