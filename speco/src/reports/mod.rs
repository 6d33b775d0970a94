//! Report data structures for commands.
//!
//! Ops build reports, then commands render them to an Output target.

mod check;
mod explain;
mod output;
mod run;
mod stages;

pub use check::CheckReport;
pub use explain::ExplainReport;
pub use output::{Report, TerminalOutput};
pub use run::RunSummary;
pub use stages::StagesReport;
