use std::path::PathBuf;

use clap::Args;
use eyre::Result;

use super::{InputArgs, UnwrapOrExit};
use crate::{
    ops::{self, CompileTarget},
    reports::{Report, TerminalOutput},
};

#[derive(Args)]
pub struct CompileCommand {
    #[command(flatten)]
    pub input: InputArgs,

    /// Write the IR to this file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Write a JSON snapshot of every pipeline phase into this directory
    #[arg(long, value_name = "DIR")]
    pub snapshot_dir: Option<PathBuf>,
}

impl CompileCommand {
    /// Run the compile command
    pub fn run(&self) -> Result<()> {
        let (files, options) = self.input.resolve()?;
        let modules = canopy_schema::load_files(&files).unwrap_or_exit();

        let report = ops::compile(
            modules,
            options,
            CompileTarget {
                output: self.output.as_deref(),
                snapshot_dir: self.snapshot_dir.as_deref(),
            },
        )?;
        report.render(&mut TerminalOutput::new());

        if !report.is_ok() {
            std::process::exit(1);
        }
        Ok(())
    }
}
