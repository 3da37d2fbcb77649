//! Terminal failures of a bootstrap run.
//!
//! Every variant ends the process with status 1; see [`crate::report`] for
//! how each one is presented.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum BootstrapError {
    /// Name rejected by the npm naming rules.
    #[error("could not create a project called \"{name}\" because of npm naming restrictions")]
    InvalidName {
        name: String,
        errors: Vec<String>,
        warnings: Vec<String>,
    },

    /// Name collides with a dependency of the generated project.
    #[error("cannot create a project called \"{name}\" because a dependency with the same name exists")]
    ReservedName { name: String, reserved: Vec<String> },

    /// A freshly spawned npm process did not start in the project directory.
    /// The diagnostic is printed by the probe itself.
    #[error("could not start an npm process in {cwd}")]
    DirectoryMismatch { cwd: String },

    #[error("you appear to be offline")]
    Offline,

    /// The delegate generator exited with a non-zero status.
    #[error("{command} has failed")]
    DelegateExit { command: String, code: Option<i32> },

    /// The delegate generator could not be started at all.
    #[error("failed to start {command}")]
    Spawn {
        command: String,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Unexpected(#[from] anyhow::Error),
}

impl BootstrapError {
    pub fn exit_code(&self) -> i32 {
        1
    }
}
