pub mod args;
pub mod report;
pub mod runner;

pub use args::{get_log_level_from_verbose, parse_cli, CheckArgs, Cli, Commands, RunArgs, SelectArgs};
pub use runner::run;
