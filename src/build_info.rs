//! Version and build metadata, fixed at compile time.

use std::fmt;

/// Build information for `exa version`.
#[derive(Debug, Clone, Copy)]
pub struct BuildInfo {
    pub version: &'static str,
    pub commit: &'static str,
    pub build_date: &'static str,
}

/// Metadata of the running binary. `EXA_GIT_COMMIT` and `EXA_BUILD_DATE` are
/// supplied by the build environment (or `build.rs`).
pub const BUILD_INFO: BuildInfo = BuildInfo {
    version: env!("CARGO_PKG_VERSION"),
    commit: match option_env!("EXA_GIT_COMMIT") {
        Some(commit) => commit,
        None => "none",
    },
    build_date: match option_env!("EXA_BUILD_DATE") {
        Some(date) => date,
        None => "unknown",
    },
};

impl fmt::Display for BuildInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "exa {}", self.version)?;
        writeln!(f, "  commit: {}", self.commit)?;
        writeln!(f, "  built:  {}", self.build_date)
    }
}
