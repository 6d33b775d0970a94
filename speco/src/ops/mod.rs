//! Operations behind the commands.
//!
//! Ops load, build and run; they return report data and never print.

mod check;
mod explain;
mod run;

pub use check::check;
pub use explain::explain;
pub use run::{Inputs, SpecializeOptions, collect_inputs, specialize_file};
