//! Internal implementation for project name checks

use super::NameValidation;
use crate::error::BootstrapError;

const MAX_NAME_LENGTH: usize = 214;

const BLACKLIST: &[&str] = &["node_modules", "favicon.ico"];

/// Node core modules; a package may not take one of these names.
const CORE_MODULES: &[&str] = &[
    "assert",
    "async_hooks",
    "buffer",
    "child_process",
    "cluster",
    "console",
    "constants",
    "crypto",
    "dgram",
    "dns",
    "domain",
    "events",
    "fs",
    "http",
    "http2",
    "https",
    "inspector",
    "module",
    "net",
    "os",
    "path",
    "perf_hooks",
    "process",
    "punycode",
    "querystring",
    "readline",
    "repl",
    "stream",
    "string_decoder",
    "sys",
    "timers",
    "tls",
    "trace_events",
    "tty",
    "url",
    "util",
    "v8",
    "vm",
    "worker_threads",
    "zlib",
];

pub fn validate(name: &str) -> NameValidation {
    let mut errors = Vec::new();
    let mut warnings = Vec::new();

    if name.is_empty() {
        errors.push("name length must be greater than zero".to_string());
    }

    if name.starts_with('.') {
        errors.push("name cannot start with a period".to_string());
    }

    if name.starts_with('_') {
        errors.push("name cannot start with an underscore".to_string());
    }

    if name.trim() != name {
        errors.push("name cannot contain leading or trailing spaces".to_string());
    }

    for blacklisted in BLACKLIST {
        if name.to_lowercase() == *blacklisted {
            errors.push(format!("{blacklisted} is a blacklisted name"));
        }
    }

    // Old packages could still use these names; new ones only get a warning
    // so that valid_for_old_packages stays meaningful.
    if CORE_MODULES.contains(&name.to_lowercase().as_str()) {
        warnings.push(format!("{name} is a core module name"));
    }

    if name.chars().count() > MAX_NAME_LENGTH {
        warnings.push(format!(
            "name can no longer contain more than {MAX_NAME_LENGTH} characters"
        ));
    }

    if name.to_lowercase() != name {
        warnings.push("name can no longer contain capital letters".to_string());
    }

    let last_segment = name.rsplit('/').next().unwrap_or(name);
    if last_segment.chars().any(|c| "~'!()*".contains(c)) {
        warnings.push(r#"name can no longer contain special characters ("~'!()*")"#.to_string());
    }

    if !is_url_friendly(name) && !is_url_friendly_scoped(name) {
        errors.push("name can only contain URL-friendly characters".to_string());
    }

    NameValidation {
        valid_for_old_packages: errors.is_empty(),
        valid_for_new_packages: errors.is_empty() && warnings.is_empty(),
        errors,
        warnings,
    }
}

/// Characters that survive URI component encoding unchanged.
fn is_url_friendly(s: &str) -> bool {
    s.chars()
        .all(|c| c.is_ascii_alphanumeric() || "-_.!~*'()".contains(c))
}

/// `@scope/name` where both parts are URL friendly on their own.
fn is_url_friendly_scoped(name: &str) -> bool {
    let Some(rest) = name.strip_prefix('@') else {
        return false;
    };
    let Some((scope, package)) = rest.split_once('/') else {
        return false;
    };
    !scope.is_empty()
        && !package.is_empty()
        && !package.contains('/')
        && is_url_friendly(scope)
        && is_url_friendly(package)
}

pub fn check_app_name(name: &str, reserved: &[String]) -> Result<(), BootstrapError> {
    let validation = validate(name);
    if !validation.valid_for_new_packages {
        return Err(BootstrapError::InvalidName {
            name: name.to_string(),
            errors: validation.errors,
            warnings: validation.warnings,
        });
    }

    if reserved.iter().any(|dep| dep == name) {
        let mut reserved = reserved.to_vec();
        reserved.sort();
        return Err(BootstrapError::ReservedName {
            name: name.to_string(),
            reserved,
        });
    }

    tracing::debug!(name, "project name accepted");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reserved() -> Vec<String> {
        crate::config::Config::default().reserved_names
    }

    #[test]
    fn test_simple_names_are_valid() {
        for name in ["my-theme", "theme2", "some.theme", "@devloco/theme", "a_b"] {
            let result = validate(name);
            assert!(result.valid_for_new_packages, "{name}: {result:?}");
            assert!(result.errors.is_empty());
            assert!(result.warnings.is_empty());
        }
    }

    #[test]
    fn test_empty_name() {
        let result = validate("");
        assert!(!result.valid_for_new_packages);
        assert_eq!(result.errors, vec!["name length must be greater than zero"]);
    }

    #[test]
    fn test_leading_period_and_underscore() {
        assert!(validate(".hidden")
            .errors
            .contains(&"name cannot start with a period".to_string()));
        assert!(validate("_private")
            .errors
            .contains(&"name cannot start with an underscore".to_string()));
    }

    #[test]
    fn test_surrounding_spaces() {
        let result = validate(" theme ");
        assert!(result
            .errors
            .contains(&"name cannot contain leading or trailing spaces".to_string()));
        assert!(result
            .errors
            .contains(&"name can only contain URL-friendly characters".to_string()));
    }

    #[test]
    fn test_blacklisted_names() {
        let result = validate("node_modules");
        assert_eq!(result.errors, vec!["node_modules is a blacklisted name"]);
    }

    #[test]
    fn test_warnings_only_are_still_invalid_for_new_packages() {
        let result = validate("MyTheme");
        assert!(result.errors.is_empty());
        assert!(result.valid_for_old_packages);
        assert!(!result.valid_for_new_packages);
        assert_eq!(result.warnings, vec!["name can no longer contain capital letters"]);

        let result = validate("http");
        assert_eq!(result.warnings, vec!["http is a core module name"]);

        let result = validate("wow!");
        assert_eq!(result.warnings.len(), 1);
        assert!(result.warnings[0].contains("special characters"));
    }

    #[test]
    fn test_long_names_warn() {
        let name = "a".repeat(MAX_NAME_LENGTH + 1);
        let result = validate(&name);
        assert!(!result.valid_for_new_packages);
        assert!(result.warnings[0].contains("214"));
    }

    #[test]
    fn test_url_unfriendly_characters() {
        for name in ["my theme", "a/b", "caf\u{e9}", "@/x", "@scope/"] {
            let result = validate(name);
            assert!(
                result
                    .errors
                    .contains(&"name can only contain URL-friendly characters".to_string()),
                "{name}: {result:?}"
            );
        }
    }

    #[test]
    fn test_check_app_name_reports_every_violation() {
        let err = check_app_name("_Bad Name", &reserved()).unwrap_err();
        match err {
            BootstrapError::InvalidName {
                name,
                errors,
                warnings,
            } => {
                assert_eq!(name, "_Bad Name");
                assert_eq!(errors.len(), 2);
                assert_eq!(warnings.len(), 1);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_check_app_name_rejects_reserved() {
        for name in reserved() {
            let err = check_app_name(&name, &reserved()).unwrap_err();
            assert!(
                matches!(err, BootstrapError::ReservedName { .. }),
                "{name}: {err:?}"
            );
        }
    }

    #[test]
    fn test_check_app_name_accepts_regular_name() {
        assert!(check_app_name("my-wp-theme", &reserved()).is_ok());
    }
}
