mod check;
mod completions;
mod explain;
mod run;
mod stages;

use check::CheckCommand;
use clap::{ArgAction, Parser, Subcommand};
use completions::CompletionsCommand;
use eyre::Result;
use explain::ExplainCommand;
use run::RunCommand;
use stages::StagesCommand;

use crate::logging::{LogFormat, setup_logging};

/// Extension trait for exiting on manifest or tree errors with pretty formatting
pub(crate) trait UnwrapOrExit<T> {
    fn unwrap_or_exit(self) -> T;
}

impl<T, E> UnwrapOrExit<T> for std::result::Result<T, Box<E>>
where
    E: miette::Diagnostic + Send + Sync + 'static,
{
    fn unwrap_or_exit(self) -> T {
        match self {
            Ok(v) => v,
            Err(e) => {
                eprintln!("{:?}", miette::Report::new(*e));
                std::process::exit(1);
            }
        }
    }
}

#[derive(Parser)]
#[command(name = "speco")]
#[command(version)]
#[command(about = "Specialize programs by rewriting their IR through a train of stages")]
pub(crate) struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    /// Only log errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    quiet: bool,

    /// Log output format
    #[arg(long, value_enum, default_value_t = LogFormat::Pretty, global = true)]
    log_format: LogFormat,
}

impl Cli {
    pub fn init_logging(&self) -> Result<()> {
        setup_logging(self.verbose, self.quiet, self.log_format)
    }

    pub fn run(&self) -> Result<()> {
        match &self.command {
            Commands::Run(cmd) => cmd.run(),
            Commands::Check(cmd) => cmd.run(),
            Commands::Explain(cmd) => cmd.run(),
            Commands::Stages(cmd) => cmd.run(),
            Commands::Completions(cmd) => cmd.run(),
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Specialize an IR tree (or a directory of trees) with a train
    Run(RunCommand),

    /// Validate a train manifest without running it
    Check(CheckCommand),

    /// Show the stages of a train
    Explain(ExplainCommand),

    /// List the built-in stages
    Stages(StagesCommand),

    /// Generate shell completions
    Completions(CompletionsCommand),
}
