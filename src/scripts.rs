//! Where the customised `react-scripts` package comes from.
//!
//! The registry package is the supported default. Builds with the
//! `scripts-from-git` or `scripts-from-file` feature use a fresh clone or a
//! local checkout instead; all three expose the same two operations.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::process::Command;

use anyhow::{bail, Context, Result};
use colored::*;
use walkdir::WalkDir;

use crate::config::{Config, SCRIPTS_PATH_ENV};
use crate::paths;

/// Build-time choice of scripts source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScriptsStrategy {
    Registry,
    Git,
    File,
}

impl ScriptsStrategy {
    /// Strategy selected by Cargo features.
    pub const fn configured() -> Self {
        if cfg!(feature = "scripts-from-git") {
            Self::Git
        } else if cfg!(feature = "scripts-from-file") {
            Self::File
        } else {
            Self::Registry
        }
    }
}

/// A prepared scripts package location.
#[derive(Debug)]
pub enum ScriptsSource {
    /// Package name resolved by the package manager
    Registry { package: String },
    /// Clone living under `checkout`, removed after a successful run
    Git { checkout: PathBuf, location: String },
    /// Local checkout, left untouched
    File { location: String },
}

impl ScriptsSource {
    /// Prepare the source for `strategy` inside project `root`.
    pub fn prepare(strategy: ScriptsStrategy, root: &Path, config: &Config) -> Result<Self> {
        match strategy {
            ScriptsStrategy::Registry => Ok(Self::Registry {
                package: config.scripts_package.clone(),
            }),
            ScriptsStrategy::Git => clone_scripts(root, config),
            ScriptsStrategy::File => {
                let Some(path) = &config.scripts_local_path else {
                    bail!("{SCRIPTS_PATH_ENV} was not set when this build was compiled");
                };
                Ok(Self::File {
                    location: paths::file_specifier(path),
                })
            }
        }
    }

    /// Value passed to `--scripts-version`.
    pub fn location(&self) -> &str {
        match self {
            Self::Registry { package } => package,
            Self::Git { location, .. } | Self::File { location } => location,
        }
    }

    /// Release whatever the source holds. Consumes the source, so it runs once.
    pub fn cleanup(self) -> io::Result<()> {
        match self {
            Self::Git { checkout, .. } => remove_dir_recursive(&checkout),
            Self::Registry { .. } | Self::File { .. } => Ok(()),
        }
    }
}

fn clone_scripts(root: &Path, config: &Config) -> Result<ScriptsSource> {
    let checkout = root.join(paths::SCRIPTS_TEMP_DIR);
    fs::create_dir_all(&checkout)
        .with_context(|| format!("Failed to create {}", checkout.display()))?;

    println!(
        "{}",
        format!("Cloning {} from GitHub...", config.scripts_repository).magenta()
    );

    let status = Command::new("git")
        .args(["clone", &config.scripts_repository])
        .current_dir(&checkout)
        .status()
        .context("Failed to run git clone")?;
    if !status.success() {
        bail!("git clone {} failed", config.scripts_repository);
    }

    let package_dir = checkout
        .join(paths::repository_dir_name(&config.scripts_repository))
        .join(&config.scripts_repository_subdir);

    Ok(ScriptsSource::Git {
        location: paths::file_specifier(&package_dir),
        checkout,
    })
}

/// Delete `path` and everything below it, files before their directory.
///
/// A missing path is not an error.
pub fn remove_dir_recursive(path: &Path) -> io::Result<()> {
    if !path.exists() {
        return Ok(());
    }

    for entry in WalkDir::new(path).contents_first(true) {
        let entry = entry.map_err(io::Error::from)?;
        if entry.file_type().is_dir() {
            fs::remove_dir(entry.path())?;
        } else {
            fs::remove_file(entry.path())?;
        }
    }
    Ok(())
}
