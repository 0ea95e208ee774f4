/// `contents` command: fetch page contents for a list of URLs.
use std::io::Write;

use super::ApiSettings;
use crate::cli::OutputCtx;
use crate::cli::args::ContentsArgs;
use crate::cli::output::{Response, write_response};
use crate::errors::CliError;
use crate::request::build_contents_request;

/// Run `exa contents`.
///
/// # Errors
///
/// Returns `CliError` on invalid input, missing key, API failure, or output failure.
pub fn run<W: Write>(
    args: &ContentsArgs,
    ctx: &OutputCtx,
    api: &ApiSettings,
    out: &mut W,
) -> Result<(), CliError> {
    let request = build_contents_request(&args.params())?;
    tracing::debug!(urls = request.ids.len(), "contents request built");

    let client = api.client()?;
    let response = client.contents(&request)?;
    for status in response.statuses.iter().filter(|s| s.status != "success") {
        tracing::warn!(id = %status.id, status = %status.status, "content fetch did not succeed");
    }

    write_response(out, Response::Contents(&response), ctx)?;
    Ok(())
}
