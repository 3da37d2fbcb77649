//! Registry connectivity check.
//!
//! Only yarn is checked up front; npm reports its own network errors once
//! the generator runs.

use std::net::ToSocketAddrs;
use std::process::Stdio;

use url::Url;

use crate::config::Config;
use crate::package_manager::command_for;

/// Whether the registry of the selected manager looks reachable.
///
/// Never fails: every error is folded into `false`, except that without
/// yarn no lookup happens and the answer is `true`.
pub fn is_online(using_yarn: bool, config: &Config) -> bool {
    if !using_yarn {
        return true;
    }

    if resolves(&config.registry_host) {
        return true;
    }

    // Behind a proxy external names often don't resolve; being able to
    // resolve the proxy itself is the best signal left.
    match get_proxy(config) {
        Some(proxy) => match proxy_host(&proxy) {
            Some(host) => {
                tracing::debug!(%host, "registry lookup failed, checking proxy host");
                resolves(&host)
            }
            None => {
                tracing::warn!(%proxy, "proxy setting has no host");
                false
            }
        },
        None => false,
    }
}

/// Configured HTTPS proxy: the environment first, then npm's config.
pub fn get_proxy(config: &Config) -> Option<String> {
    if let Some(proxy) = std::env::var(&config.proxy_env_var)
        .ok()
        .filter(|v| !v.is_empty())
    {
        return Some(proxy);
    }

    let output = command_for(&config.default_manager)
        .args(["config", "get", "https-proxy"])
        .stdin(Stdio::null())
        .stderr(Stdio::null())
        .output()
        .ok()?;
    if !output.status.success() {
        return None;
    }

    parse_config_value(&String::from_utf8_lossy(&output.stdout))
}

/// npm prints `null` (older) or `undefined`/nothing (newer) for unset keys.
fn parse_config_value(raw: &str) -> Option<String> {
    let value = raw.trim();
    match value {
        "" | "null" | "undefined" => None,
        v => Some(v.to_string()),
    }
}

/// Host part of a proxy setting; bare `host:port` values are accepted.
pub fn proxy_host(proxy: &str) -> Option<String> {
    let parsed = Url::parse(proxy)
        .ok()
        .filter(|u| u.has_host())
        .or_else(|| Url::parse(&format!("http://{proxy}")).ok())?;

    parsed
        .host_str()
        .filter(|h| !h.is_empty())
        .map(|h| h.trim_start_matches('[').trim_end_matches(']').to_string())
}

fn resolves(host: &str) -> bool {
    match (host, 0).to_socket_addrs() {
        Ok(mut addrs) => addrs.next().is_some(),
        Err(e) => {
            tracing::debug!(%host, error = %e, "lookup failed");
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn offline_config() -> Config {
        Config {
            registry_host: "registry.wptheme-test.invalid".to_string(),
            proxy_env_var: "WPTHEME_TEST_PROXY_THAT_IS_NEVER_SET".to_string(),
            default_manager: "wptheme-test-missing-npm".to_string(),
            ..Config::default()
        }
    }

    #[test]
    fn test_npm_is_always_online() {
        assert!(is_online(false, &offline_config()));
    }

    #[test]
    fn test_yarn_offline_without_proxy() {
        let config = offline_config();
        assert_eq!(get_proxy(&config), None);
        assert!(!is_online(true, &config));
    }

    #[test]
    fn test_yarn_online_when_registry_resolves() {
        let config = Config {
            registry_host: "localhost".to_string(),
            ..offline_config()
        };
        assert!(is_online(true, &config));
    }

    #[test]
    fn test_proxy_from_environment() {
        let var = "WPTHEME_TEST_PROXY_FROM_ENV";
        std::env::set_var(var, "http://localhost:3128");
        let config = Config {
            proxy_env_var: var.to_string(),
            ..offline_config()
        };

        assert_eq!(get_proxy(&config).as_deref(), Some("http://localhost:3128"));
        // Registry fails, proxy host resolves
        assert!(is_online(true, &config));
        std::env::remove_var(var);
    }

    #[test]
    fn test_unresolvable_proxy_is_offline() {
        let var = "WPTHEME_TEST_PROXY_UNRESOLVABLE";
        std::env::set_var(var, "http://proxy.wptheme-test.invalid:3128");
        let config = Config {
            proxy_env_var: var.to_string(),
            ..offline_config()
        };

        assert_eq!(
            get_proxy(&config).as_deref(),
            Some("http://proxy.wptheme-test.invalid:3128")
        );
        assert!(!is_online(true, &config));
        std::env::remove_var(var);
    }

    /// Executable script standing in for npm that prints `value`.
    #[cfg(unix)]
    fn fake_npm(dir: &tempfile::TempDir, name: &str, value: &str) -> String {
        use std::os::unix::fs::PermissionsExt;

        let path = dir.path().join(name);
        std::fs::write(&path, format!("#!/bin/sh\necho '{value}'\n")).unwrap();
        std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755)).unwrap();
        path.display().to_string()
    }

    #[cfg(unix)]
    #[test]
    fn test_proxy_from_npm_config() {
        let dir = tempfile::TempDir::new().unwrap();

        let config = Config {
            default_manager: fake_npm(&dir, "npm-with-proxy", "http://localhost:8080"),
            ..offline_config()
        };
        assert_eq!(get_proxy(&config).as_deref(), Some("http://localhost:8080"));
        assert!(is_online(true, &config));

        for (name, unset) in [("npm-null", "null"), ("npm-undefined", "undefined")] {
            let config = Config {
                default_manager: fake_npm(&dir, name, unset),
                ..offline_config()
            };
            assert_eq!(get_proxy(&config), None);
            assert!(!is_online(true, &config));
        }
    }

    #[test]
    fn test_proxy_host_parsing() {
        assert_eq!(
            proxy_host("http://proxy.corp.example:8080").as_deref(),
            Some("proxy.corp.example")
        );
        assert_eq!(
            proxy_host("https://user:pw@10.0.0.1:3128/").as_deref(),
            Some("10.0.0.1")
        );
        assert_eq!(proxy_host("proxy.corp.example:8080").as_deref(), Some("proxy.corp.example"));
        assert_eq!(proxy_host("http://[::1]:3128").as_deref(), Some("::1"));
    }

    #[test]
    fn test_parse_config_value() {
        assert_eq!(parse_config_value("null\n"), None);
        assert_eq!(parse_config_value("undefined\n"), None);
        assert_eq!(parse_config_value("  \n"), None);
        assert_eq!(
            parse_config_value("http://proxy:8080\n").as_deref(),
            Some("http://proxy:8080")
        );
    }
}
