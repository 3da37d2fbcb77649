//! Delegate generator invocation.
//!
//! The bootstrapper never writes theme files itself: it runs
//! `npx create-react-app react-src ... --scripts-version <scripts>` inside the
//! project root and forwards the outcome.

use std::fmt;
use std::process::{Command, Stdio};

use anyhow::Context;

use crate::config::Config;
use crate::error::BootstrapError;
use crate::package_manager::{command_for, PackageManagerChoice};
use crate::request::InvocationRequest;
use crate::scripts::ScriptsSource;

/// Program and ordered arguments for one generator run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DelegateCommand {
    program: String,
    args: Vec<String>,
}

impl DelegateCommand {
    pub fn new(
        request: &InvocationRequest,
        choice: &PackageManagerChoice,
        scripts_location: &str,
        config: &Config,
    ) -> Self {
        let options = request.options();
        let mut args = vec![
            config.generator_subcommand.clone(),
            config.react_root.clone(),
        ];

        if options.verbose {
            args.push("--verbose".to_string());
        }

        if !choice.uses_yarn() {
            args.push("--use-npm".to_string());
        }

        if choice.pnp {
            args.push("--use-pnp".to_string());
        }

        if options.typescript {
            args.push("--typescript".to_string());
        }

        args.push("--scripts-version".to_string());
        args.push(scripts_location.to_string());

        Self {
            program: config.generator_program.clone(),
            args,
        }
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    pub fn args(&self) -> &[String] {
        &self.args
    }

    fn into_command(self) -> Command {
        let mut command = command_for(&self.program);
        command.args(self.args);
        command
    }
}

impl fmt::Display for DelegateCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.program, self.args.join(" "))
    }
}

/// Run the generator for `request` and wait for it.
///
/// Output streams straight to the terminal. On exit status 0 the scripts
/// source is cleaned up; on any other status it is left in place and
/// [`BootstrapError::DelegateExit`] carries the command line.
pub fn invoke(
    request: &InvocationRequest,
    choice: &PackageManagerChoice,
    scripts: ScriptsSource,
    config: &Config,
) -> Result<(), BootstrapError> {
    let delegate = DelegateCommand::new(request, choice, scripts.location(), config);
    let command_line = delegate.to_string();
    tracing::debug!(command = %command_line, root = %request.root().display(), "starting generator");

    let status = delegate
        .into_command()
        .current_dir(request.root())
        .stdin(Stdio::inherit())
        .stdout(Stdio::inherit())
        .stderr(Stdio::inherit())
        .status()
        .map_err(|source| BootstrapError::Spawn {
            command: command_line.clone(),
            source,
        })?;

    if !status.success() {
        return Err(BootstrapError::DelegateExit {
            command: command_line,
            code: status.code(),
        });
    }

    scripts
        .cleanup()
        .context("Failed to clean up the scripts source")?;
    Ok(())
}
