//! Output module for generated scripts and run summaries
//!
//! This module handles:
//! - Rendering ranked features into a script and writing it to disk
//! - Summarising a harvest run for the terminal and the log

mod report;
mod script;

pub use report::{format_report, print_report, HarvestReport};
pub use script::{render_script, write_script};
