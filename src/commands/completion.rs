/// `completion` command: print a shell completion script.
use std::io::Write;

use clap::CommandFactory;
use clap_complete::Shell;

use crate::cli::Cli;
use crate::cli::args::{CompletionArgs, CompletionShell};
use crate::errors::CliError;

const BIN_NAME: &str = "exa";

impl From<CompletionShell> for Shell {
    fn from(shell: CompletionShell) -> Self {
        match shell {
            CompletionShell::Bash => Self::Bash,
            CompletionShell::Zsh => Self::Zsh,
            CompletionShell::Fish => Self::Fish,
        }
    }
}

/// Run `exa completion <shell>`.
///
/// # Errors
///
/// Returns `CliError::Render` if the script cannot be written.
pub fn run<W: Write>(args: &CompletionArgs, out: &mut W) -> Result<(), CliError> {
    let mut cmd = Cli::command();
    clap_complete::generate(Shell::from(args.shell), &mut cmd, BIN_NAME, &mut *out);
    out.flush()?;
    Ok(())
}
