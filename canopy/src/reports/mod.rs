//! Report data structures for commands.
//!
//! Commands build reports, then render them to an Output target.

mod check;
mod compile;
mod diagnostics;
mod explain;
mod output;

pub use check::CheckReport;
pub use compile::{CompileReport, Destination};
pub use diagnostics::DiagnosticList;
pub use explain::ExplainReport;
pub use output::{Report, TerminalOutput};
