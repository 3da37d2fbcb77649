//! Package manager selection and sanity checks.
//!
//! npm is the default manager; yarn (`yarnpkg`) is preferred when it is
//! installed and the user did not pass `--use-npm`.

use std::fmt;
use std::path::Path;
use std::process::{Command, Stdio};

use colored::*;

use crate::config::Config;

/// Line of `npm config list` output that reports the child's directory.
pub const CWD_PREFIX: &str = "; cwd = ";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PackageManager {
    Npm,
    Yarn,
}

impl fmt::Display for PackageManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Npm => write!(f, "npm"),
            Self::Yarn => write!(f, "yarn"),
        }
    }
}

/// Manager picked for this run, plus the forwarded Plug'n'Play flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PackageManagerChoice {
    pub manager: PackageManager,
    pub pnp: bool,
}

impl PackageManagerChoice {
    pub fn uses_yarn(&self) -> bool {
        self.manager == PackageManager::Yarn
    }
}

/// Build a command for `program`, resolved through PATH when possible.
///
/// Resolution goes through `which` so Windows `.cmd` shims are found. When
/// the lookup fails the bare name is used and the spawn reports the error.
pub fn command_for(program: &str) -> Command {
    match which::which(program) {
        Ok(path) => Command::new(path),
        Err(_) => Command::new(program),
    }
}

/// Pick the package manager for this run.
///
/// With `force_default` the alternate manager is never probed. Otherwise it
/// is chosen when `<alternate> --version` exits successfully; any failure to
/// run it counts as "not installed".
pub fn select_package_manager(force_default: bool, use_pnp: bool, config: &Config) -> PackageManagerChoice {
    let manager = if !force_default && alternate_available(config) {
        PackageManager::Yarn
    } else {
        PackageManager::Npm
    };

    tracing::debug!(%manager, force_default, "selected package manager");
    PackageManagerChoice {
        manager,
        pnp: use_pnp,
    }
}

fn alternate_available(config: &Config) -> bool {
    let status = command_for(&config.alternate_manager)
        .arg("--version")
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status();

    match status {
        Ok(status) => status.success(),
        Err(e) => {
            tracing::debug!(program = %config.alternate_manager, error = %e, "alternate manager probe failed");
            false
        }
    }
}

/// What a child npm process reported about its working directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CwdProbe {
    /// Reported directory equals the expected one
    Matches,
    /// No usable report; the check cannot be made
    Unreported,
    /// Child started somewhere else
    Mismatch(String),
}

/// Find the `; cwd = ` line in `npm config list` output and compare it.
pub fn inspect_config_listing(output: &str, expected: &str) -> CwdProbe {
    let Some(line) = output.lines().find(|l| l.starts_with(CWD_PREFIX)) else {
        return CwdProbe::Unreported;
    };

    // `lines()` already drops the `\r` of CRLF output
    let reported = &line[CWD_PREFIX.len()..];
    if reported == expected {
        CwdProbe::Matches
    } else {
        CwdProbe::Mismatch(reported.to_string())
    }
}

/// Run `<default> config list` in `dir` and classify its report.
pub fn probe_working_directory(config: &Config, dir: &Path) -> CwdProbe {
    let expected = crate::paths::reported_dir(dir);

    let output = match command_for(&config.default_manager)
        .args(["config", "list"])
        .current_dir(dir)
        .stdin(Stdio::null())
        .output()
    {
        Ok(output) => output,
        Err(e) => {
            // Can't verify; a later step will fail loudly if something is wrong
            tracing::debug!(program = %config.default_manager, error = %e, "could not run config listing");
            return CwdProbe::Unreported;
        }
    };

    let mut bytes = output.stdout;
    bytes.extend_from_slice(&output.stderr);
    match String::from_utf8(bytes) {
        Ok(text) => inspect_config_listing(&text, &expected),
        Err(_) => CwdProbe::Unreported,
    }
}

/// Check that a freshly started npm process runs in `dir`.
///
/// Returns `false` only when npm reports a different directory, after
/// printing a diagnostic. Every other outcome passes.
pub fn verify_working_directory_consistency(config: &Config, dir: &Path) -> bool {
    match probe_working_directory(config, dir) {
        CwdProbe::Matches | CwdProbe::Unreported => true,
        CwdProbe::Mismatch(child_cwd) => {
            eprintln!(
                "{}",
                mismatch_diagnostic(&crate::paths::reported_dir(dir), &child_cwd, cfg!(windows))
            );
            false
        }
    }
}

/// Explanation printed when npm starts in the wrong directory.
pub fn mismatch_diagnostic(cwd: &str, child_cwd: &str, windows: bool) -> String {
    let mut msg = format!(
        "{}\n\n{} {}\n{} {}\n\n{}",
        "Could not start an npm process in the right directory.".red(),
        "The current directory is:".red(),
        cwd.bold(),
        "However, a newly started npm process runs in:".red(),
        child_cwd.bold(),
        "This is probably caused by a misconfigured system terminal shell.".red()
    );

    if windows {
        msg.push_str(&format!(
            "\n{}\n\n  {} delete \"HKCU\\Software\\Microsoft\\Command Processor\" /v AutoRun /f\n  {} delete \"HKLM\\Software\\Microsoft\\Command Processor\" /v AutoRun /f\n\n{}\n{}",
            "On Windows, this can usually be fixed by running:".red(),
            "reg".cyan(),
            "reg".cyan(),
            "Try to run the above two lines in the terminal.".red(),
            "To learn more about this problem, read: https://blogs.msdn.microsoft.com/oldnewthing/20071121-00/?p=24433/".red()
        ));
    }

    msg
}
