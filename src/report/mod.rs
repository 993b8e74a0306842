//! Report sinks: per-resource delimited files and the cumulative run log

mod run_log;
mod writer;

pub use run_log::RunLog;
pub use writer::{list_repr, pair_list_repr, ReportWriter};
