//! The bootstrap sequence.
//!
//! name check → project directory → package manager → working directory
//! check (npm only) → cached lockfile (yarn only) → connectivity → scripts
//! source → generator. Each step either passes or ends the run with a
//! [`BootstrapError`]; nothing here exits the process.

use std::fs;

use anyhow::Context;
use colored::*;

use crate::config::Config;
use crate::delegate;
use crate::error::BootstrapError;
use crate::network;
use crate::package_manager;
use crate::paths;
use crate::project;
use crate::request::InvocationRequest;
use crate::scripts::{ScriptsSource, ScriptsStrategy};

/// Run one bootstrap with the build's configured scripts strategy.
pub fn run(request: &InvocationRequest, config: &Config) -> Result<(), BootstrapError> {
    run_with(request, config, ScriptsStrategy::configured())
}

pub fn run_with(
    request: &InvocationRequest,
    config: &Config,
    strategy: ScriptsStrategy,
) -> Result<(), BootstrapError> {
    project::check_app_name(request.app_name(), &config.reserved_names)?;

    let root = request.root();
    fs::create_dir_all(root).with_context(|| format!("Failed to create {}", root.display()))?;

    println!("Creating a new React WP theme in {}.", root.display().to_string().green());
    println!();

    let options = request.options();
    let choice = package_manager::select_package_manager(options.use_npm, options.use_pnp, config);

    if !choice.uses_yarn() && !package_manager::verify_working_directory_consistency(config, root) {
        return Err(BootstrapError::DirectoryMismatch {
            cwd: paths::reported_dir(root),
        });
    }

    if choice.uses_yarn() {
        copy_cached_lockfile(request, config)?;
    }

    if !network::is_online(choice.uses_yarn(), config) {
        return Err(BootstrapError::Offline);
    }

    let scripts = ScriptsSource::prepare(strategy, root, config)?;
    delegate::invoke(request, &choice, scripts, config)
}

/// Seed `<root>/yarn.lock` from the configured cached lockfile, if any.
fn copy_cached_lockfile(request: &InvocationRequest, config: &Config) -> anyhow::Result<()> {
    let Some(cached) = &config.cached_lockfile else {
        tracing::debug!("no cached lockfile configured");
        return Ok(());
    };

    let dest = request.root().join(paths::LOCKFILE_NAME);
    fs::copy(cached, &dest).with_context(|| {
        format!(
            "Failed to copy {} to {}",
            cached.display(),
            dest.display()
        )
    })?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::request::InvocationOptions;
    use tempfile::TempDir;

    fn config_without_tools() -> Config {
        Config {
            default_manager: "wptheme-test-missing-npm".to_string(),
            alternate_manager: "wptheme-test-missing-yarn".to_string(),
            generator_program: "wptheme-test-missing-npx".to_string(),
            ..Config::default()
        }
    }

    #[test]
    fn test_reserved_name_stops_before_creating_directory() {
        let temp = TempDir::new().unwrap();
        let request =
            InvocationRequest::resolve_from(temp.path(), "react", InvocationOptions::default());

        let err = run_with(&request, &config_without_tools(), ScriptsStrategy::Registry).unwrap_err();
        assert!(matches!(err, BootstrapError::ReservedName { .. }));
        assert!(!request.root().exists());
    }

    #[test]
    fn test_missing_generator_is_spawn_error() {
        let temp = TempDir::new().unwrap();
        let request =
            InvocationRequest::resolve_from(temp.path(), "my-theme", InvocationOptions::default());

        let err = run_with(&request, &config_without_tools(), ScriptsStrategy::Registry).unwrap_err();
        match err {
            BootstrapError::Spawn { command, .. } => {
                assert!(command.starts_with("wptheme-test-missing-npx create-react-app react-src"));
                assert!(command.contains("--use-npm"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
        assert!(request.root().is_dir());
    }

    #[cfg(unix)]
    #[test]
    fn test_yarn_offline_aborts_before_generator() {
        let temp = TempDir::new().unwrap();
        let lockfile = temp.path().join("yarn.lock.cached");
        fs::write(&lockfile, "# cached\n").unwrap();

        let config = Config {
            alternate_manager: "true".to_string(),
            registry_host: "registry.wptheme-test.invalid".to_string(),
            proxy_env_var: "WPTHEME_TEST_PROXY_THAT_IS_NEVER_SET".to_string(),
            cached_lockfile: Some(lockfile),
            ..config_without_tools()
        };
        let request =
            InvocationRequest::resolve_from(temp.path(), "my-theme", InvocationOptions::default());

        let err = run_with(&request, &config, ScriptsStrategy::Registry).unwrap_err();
        assert!(matches!(err, BootstrapError::Offline));
        assert_eq!(
            fs::read_to_string(request.root().join("yarn.lock")).unwrap(),
            "# cached\n"
        );
    }
}
