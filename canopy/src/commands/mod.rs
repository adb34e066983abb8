mod check;
mod compile;
mod completions;
mod explain;
mod input;

use check::CheckCommand;
use clap::{Parser, Subcommand};
use compile::CompileCommand;
use completions::CompletionsCommand;
use eyre::Result;
use explain::ExplainCommand;
pub use input::{CompileFlags, InputArgs};

/// Extension trait for exiting on schema load errors with pretty formatting
pub(crate) trait UnwrapOrExit<T> {
    fn unwrap_or_exit(self) -> T;
}

impl<T> UnwrapOrExit<T> for canopy_schema::Result<T> {
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
#[command(name = "canopy")]
#[command(version)]
#[command(about = "Compile schema trees into a compressed IR for code generation")]
pub(crate) struct Cli {
    /// Log debug output to stderr (overrides CANOPY_LOG)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

impl Cli {
    pub fn run(&self) -> Result<()> {
        match &self.command {
            Commands::Compile(cmd) => cmd.run(),
            Commands::Check(cmd) => cmd.run(),
            Commands::Explain(cmd) => cmd.run(),
            Commands::Completions(cmd) => cmd.run(),
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Compile schema files into JSON IR
    Compile(CompileCommand),

    /// Report diagnostics and IR statistics without writing any output
    Check(CheckCommand),

    /// Show the pipeline phases, lints and compression policies
    Explain(ExplainCommand),

    /// Generate shell completions
    Completions(CompletionsCommand),
}
