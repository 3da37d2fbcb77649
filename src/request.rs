use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::paths;

/// Flags forwarded from the command line.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InvocationOptions {
    pub verbose: bool,
    /// Never use the alternate package manager
    pub use_npm: bool,
    /// Plug'n'Play resolution, forwarded to the generator
    pub use_pnp: bool,
    pub typescript: bool,
}

/// One bootstrap run, fixed at startup and passed down by reference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvocationRequest {
    root: PathBuf,
    app_name: String,
    options: InvocationOptions,
}

impl InvocationRequest {
    /// Build a request relative to the process working directory.
    pub fn new(target: impl Into<PathBuf>, options: InvocationOptions) -> Result<Self> {
        let cwd = std::env::current_dir().context("Failed to get current directory")?;
        Ok(Self::resolve_from(&cwd, target, options))
    }

    /// Build a request relative to an explicit base directory.
    pub fn resolve_from(base: &Path, target: impl Into<PathBuf>, options: InvocationOptions) -> Self {
        let root = paths::resolve(base, &target.into());
        let app_name = paths::app_name(&root);
        Self {
            root,
            app_name,
            options,
        }
    }

    /// Absolute project root.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Package name derived from the root's final segment.
    pub fn app_name(&self) -> &str {
        &self.app_name
    }

    pub fn options(&self) -> InvocationOptions {
        self.options
    }
}
