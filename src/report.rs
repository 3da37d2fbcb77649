//! User-facing presentation of a failed run.
//!
//! This is the only place that decides how a [`BootstrapError`] looks and
//! which exit status it maps to.

use colored::*;

use crate::config::Config;
use crate::error::BootstrapError;

/// Print `err` and return the process exit status.
pub fn report(err: &BootstrapError, config: &Config) -> i32 {
    tracing::debug!(error = ?err, "bootstrap failed");

    match err {
        BootstrapError::InvalidName { .. }
        | BootstrapError::ReservedName { .. }
        | BootstrapError::DirectoryMismatch { .. } => {
            let text = render(err, config);
            if !text.is_empty() {
                eprintln!("{text}");
            }
        }
        _ => println!("{}", render(err, config)),
    }

    err.exit_code()
}

/// Text printed for `err`; empty when the probe already explained it.
pub fn render(err: &BootstrapError, config: &Config) -> String {
    match err {
        BootstrapError::InvalidName {
            name,
            errors,
            warnings,
        } => {
            let mut out = format!(
                "Could not create a project called {} because of npm naming restrictions:",
                format!("\"{name}\"").red()
            );
            for line in errors.iter().chain(warnings) {
                out.push('\n');
                out.push_str(&format!("  *  {line}").red().to_string());
            }
            out
        }
        BootstrapError::ReservedName { name, reserved } => {
            let list = reserved
                .iter()
                .map(|dep| format!("  {dep}"))
                .collect::<Vec<_>>()
                .join("\n");
            format!(
                "{}{}{}{}\n{}\n\n{}",
                "We cannot create a project called ".red(),
                name.green(),
                " because a dependency with the same name exists.\n".red(),
                "Due to the way npm works, the following names are not allowed:\n".red(),
                list.cyan(),
                "Please choose a different project name.".red()
            )
        }
        // Printed by the working directory probe
        BootstrapError::DirectoryMismatch { .. } => String::new(),
        _ => aborting(err, config),
    }
}

fn aborting(err: &BootstrapError, config: &Config) -> String {
    let mut out = String::from("\nAborting installation.\n");

    match err {
        BootstrapError::Offline => {
            out.push_str(&format!("  {}\n", "You appear to be offline.".yellow()));
        }
        BootstrapError::DelegateExit { command, .. } => {
            out.push_str(&format!("  {} has failed.\n", command.cyan()));
        }
        BootstrapError::Spawn { command, source } => {
            out.push_str(&format!(
                "create-react-wptheme ERROR for command: {command}\n{source}\n"
            ));
            out.push_str(&unexpected(config));
        }
        other => {
            out.push_str(&format!("{} {:#}\n", "Unexpected error.".red(), other));
            out.push_str(&unexpected(config));
        }
    }

    out.push_str("\nDone.");
    out
}

fn unexpected(config: &Config) -> String {
    format!("Please report it as a bug here:\n{}\n", config.issues_url)
}
