/// `version` command: print version, commit, and build date.
use std::io::Write;

use crate::build_info::BuildInfo;
use crate::errors::CliError;

/// Run `exa version`.
///
/// # Errors
///
/// Returns `CliError::Render` if stdout cannot be written.
pub fn run<W: Write>(info: &BuildInfo, out: &mut W) -> Result<(), CliError> {
    write!(out, "{info}")?;
    Ok(())
}
