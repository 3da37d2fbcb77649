use anyhow::Result;
use serde::Serialize;
use std::collections::BTreeMap;
use std::env;
use std::process::{Command, Stdio};

use crate::config::Config;

/// Snapshot printed by `--info` for bug reports.
#[derive(Debug, Serialize)]
pub struct Environment {
    pub os: String,
    pub arch: String,
    pub cpus: usize,
    pub home_dir: String,
    pub current_dir: String,
    pub binaries: BTreeMap<String, ToolInfo>,
    pub browsers: BTreeMap<String, ToolInfo>,
    pub global_packages: BTreeMap<String, Option<String>>,
}

#[derive(Debug, Serialize)]
pub struct ToolInfo {
    pub available: bool,
    pub version: Option<String>,
    pub path: Option<String>,
}

const BINARIES: &[(&str, &str)] = &[("Node", "node"), ("npm", "npm"), ("Yarn", "yarnpkg")];

const BROWSERS: &[(&str, &[&str])] = &[
    ("Chrome", &["google-chrome", "google-chrome-stable", "chrome"]),
    ("Chromium", &["chromium", "chromium-browser"]),
    ("Edge", &["microsoft-edge", "msedge"]),
    ("Firefox", &["firefox"]),
    ("Safari", &["safari"]),
];

const GLOBAL_PACKAGES: &[&str] = &["create-react-app", "create-react-wptheme"];

impl Environment {
    pub fn detect(config: &Config) -> Result<Self> {
        let mut env = Environment {
            os: env::consts::OS.to_string(),
            arch: env::consts::ARCH.to_string(),
            cpus: std::thread::available_parallelism()
                .map(|n| n.get())
                .unwrap_or(1),
            home_dir: dirs::home_dir()
                .map(|p| p.display().to_string())
                .unwrap_or_default(),
            current_dir: env::current_dir()?.display().to_string(),
            binaries: BTreeMap::new(),
            browsers: BTreeMap::new(),
            global_packages: BTreeMap::new(),
        };

        env.detect_binaries();
        env.detect_browsers();
        env.detect_global_packages(config);

        Ok(env)
    }

    fn detect_binaries(&mut self) {
        for (label, program) in BINARIES {
            let mut info = ToolInfo {
                available: false,
                version: None,
                path: None,
            };

            if let Ok(path) = which::which(program) {
                info.available = true;
                info.path = Some(path.display().to_string());

                if let Ok(output) = Command::new(&path)
                    .arg("--version")
                    .stdin(Stdio::null())
                    .output()
                {
                    let version_str = String::from_utf8_lossy(&output.stdout);
                    if let Some(first) = version_str.lines().next().filter(|l| !l.is_empty()) {
                        info.version = Some(first.trim().trim_start_matches('v').to_string());
                    }
                }
            }

            self.binaries.insert(label.to_string(), info);
        }
    }

    fn detect_browsers(&mut self) {
        for (label, candidates) in BROWSERS {
            let path = candidates.iter().find_map(|c| which::which(c).ok());
            self.browsers.insert(
                label.to_string(),
                ToolInfo {
                    available: path.is_some(),
                    version: None,
                    path: path.map(|p| p.display().to_string()),
                },
            );
        }
    }

    fn detect_global_packages(&mut self, config: &Config) {
        let listing = crate::package_manager::command_for(&config.default_manager)
            .args(["ls", "-g", "--depth=0"])
            .stdin(Stdio::null())
            .stderr(Stdio::null())
            .output()
            .map(|o| String::from_utf8_lossy(&o.stdout).into_owned())
            .unwrap_or_default();

        for package in GLOBAL_PACKAGES {
            self.global_packages
                .insert(package.to_string(), global_package_version(&listing, package));
        }
    }

    pub fn to_text(&self) -> String {
        let mut out = String::new();

        out.push_str("  System:\n");
        out.push_str(&format!("    OS: {} {}\n", self.os, self.arch));
        out.push_str(&format!("    CPU: {} logical cores\n", self.cpus));
        out.push_str(&format!("    Home: {}\n", self.home_dir));
        out.push_str(&format!("    Working Directory: {}\n", self.current_dir));

        out.push_str("  Binaries:\n");
        for (name, info) in &self.binaries {
            out.push_str(&format!("    {}: {}\n", name, describe(info)));
        }

        out.push_str("  Browsers:\n");
        for (name, info) in &self.browsers {
            out.push_str(&format!("    {}: {}\n", name, describe(info)));
        }

        out.push_str("  npmGlobalPackages:\n");
        for (name, version) in &self.global_packages {
            out.push_str(&format!(
                "    {}: {}\n",
                name,
                version.as_deref().unwrap_or("Not Found")
            ));
        }

        out
    }
}

fn describe(info: &ToolInfo) -> String {
    match (&info.version, &info.path) {
        (Some(version), Some(path)) => format!("{version} - {path}"),
        (None, Some(path)) => path.clone(),
        _ => "Not Found".to_string(),
    }
}

/// Version of `package` in `npm ls -g --depth=0` output (`├── name@1.2.3`).
fn global_package_version(listing: &str, package: &str) -> Option<String> {
    let needle = format!("{package}@");
    listing.lines().find_map(|line| {
        let start = line.find(&needle)?;
        // Don't match `foo-create-react-app@`
        let before = line[..start].chars().last();
        if before.is_some_and(|c| c.is_alphanumeric() || c == '-' || c == '/' || c == '@') {
            return None;
        }
        let version = line[start + needle.len()..].split_whitespace().next()?;
        Some(version.to_string())
    })
}
