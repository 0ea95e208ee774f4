#![deny(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions, clippy::struct_excessive_bools)]
//! exa: search the web and extract page contents with the Exa API.

mod api;
mod build_info;
mod cli;
mod commands;
mod config;
mod errors;
mod request;
mod types;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use cli::{Cli, OutputCtx, write_error};
use commands::ApiSettings;
use types::ErrorOutput;

fn init_tracing(debug: bool) {
    let default_level = if debug { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.debug);

    let ctx = OutputCtx::new(cli.output, cli.json, cli.quiet, cli.no_header);
    let api = ApiSettings::new(cli.api_key.clone());

    let command = cli.into_command();

    let mut stdout = std::io::stdout().lock();
    if let Err(err) = commands::dispatch(&command, &ctx, &api, &mut stdout) {
        tracing::debug!(code = err.code(), "command failed");
        write_error(&ErrorOutput::from_cli_error(&err), ctx.mode);
        std::process::exit(1);
    }
}
