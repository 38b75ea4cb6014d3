use clap::Parser;
use miette::Result;
use regform::cli::commands::{
    completions, config, locations, register, schema, strength, template, validate,
};
use regform::cli::{Cli, Commands, GlobalOpts};
use regform::core::Config;

const LOG_ENV: &str = "REGFORM_LOG";

fn main() -> Result<()> {
    // Reset SIGPIPE to default behavior so piping into `head` exits quietly
    #[cfg(unix)]
    {
        unsafe {
            libc::signal(libc::SIGPIPE, libc::SIG_DFL);
        }
    }
    miette::set_hook(Box::new(|_| {
        Box::new(
            miette::MietteHandlerOpts::new()
                .terminal_links(true)
                .unicode(true)
                .context_lines(2)
                .tab_width(4)
                .build(),
        )
    }))?;

    let cli = Cli::parse();
    let global = cli.global;
    init_logging(&global);

    match cli.command {
        Commands::Register(args) => register::run(args, &global),
        Commands::Validate(args) => validate::run(args, &global),
        Commands::Locations(args) => locations::run(args, &global),
        Commands::Strength(args) => strength::run(args, &global),
        Commands::Template(args) => template::run(args, &global),
        Commands::Schema(args) => schema::run(args),
        Commands::Config(cmd) => config::run(cmd),
        Commands::Completions(args) => completions::run(args),
    }
}

/// `REGFORM_LOG` wins, then `-v`, then the `log_level` config key
fn init_logging(global: &GlobalOpts) {
    let filter = std::env::var(LOG_ENV)
        .ok()
        .or_else(|| global.verbose.then(|| "debug".to_string()))
        .or_else(|| Config::load().log_level)
        .unwrap_or_else(|| "warn".to_string());

    pretty_env_logger::formatted_builder()
        .parse_filters(&filter)
        .init();
}
