pub mod cli_args;
pub mod demo;
pub mod formatter;
pub mod script;

pub use cli_args::{CliArgs, CliCommand};
pub use formatter::OutputFormatter;
pub use script::{Reply, ScriptCommand, ScriptRunner};
