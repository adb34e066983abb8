use clap::Args;
use eyre::Result;

use super::CompileFlags;
use crate::{
    ops,
    reports::{Report, TerminalOutput},
};

#[derive(Args)]
pub struct ExplainCommand {
    #[command(flatten)]
    pub flags: CompileFlags,
}

impl ExplainCommand {
    pub fn run(&self) -> Result<()> {
        let options = self.flags.options()?;

        let report = ops::explain(&options);
        report.render(&mut TerminalOutput::new());

        Ok(())
    }
}
