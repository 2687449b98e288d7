//! Command-line interface for the framewise binary.

mod args;
mod output;
mod run;

pub use args::Cli;
pub use output::{render_json, render_text};
pub use run::run_analysis;
