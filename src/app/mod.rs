mod runner;
mod summary;

pub use runner::{RunReport, run_local};
pub use summary::{print_summary, summary_lines};
