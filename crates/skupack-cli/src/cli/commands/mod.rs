//! CLI command handlers, one file per command.

mod compose;
mod parse;
mod resolve;
mod run;

pub use compose::run_compose;
pub use parse::run_parse;
pub use resolve::run_resolve;
pub use run::{run_pipeline, RunArgs};
