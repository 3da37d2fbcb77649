//! Project name checks
//!
//! This module follows the dependable-rust pattern:
//! - Public interface (this file): naming validation and the reserved-name gate
//! - Internal implementation: all rules live in internal.rs
//!
//! A project name is the final segment of the resolved project directory. It
//! must be usable as a new npm package name and must not shadow a dependency
//! the generated theme installs.
//!
//! # Example
//!
//! ```
//! use wptheme::project;
//!
//! let result = project::validate_package_name("my-theme");
//! assert!(result.valid_for_new_packages);
//!
//! let reserved = vec!["react".to_string()];
//! assert!(project::check_app_name("react", &reserved).is_err());
//! ```

mod internal;

use crate::error::BootstrapError;

/// Outcome of the npm naming rules for one name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NameValidation {
    /// Valid for packages already published under the old, looser rules
    pub valid_for_old_packages: bool,
    /// Valid for a package created today
    pub valid_for_new_packages: bool,
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
}

/// Apply the npm package naming rules to `name`.
pub fn validate_package_name(name: &str) -> NameValidation {
    internal::validate(name)
}

/// Gate a project name before anything touches the filesystem.
///
/// Fails with [`BootstrapError::InvalidName`] when npm would reject the
/// name for a new package, and with [`BootstrapError::ReservedName`] when it
/// equals one of `reserved`.
pub fn check_app_name(name: &str, reserved: &[String]) -> Result<(), BootstrapError> {
    internal::check_app_name(name, reserved)
}
