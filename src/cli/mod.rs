/// CLI layer: argument parsing and output formatting.
pub mod args;
pub mod output;
pub mod toon;

pub use args::{Cli, OutputFormat};
pub use output::{OutputCtx, write_error};
