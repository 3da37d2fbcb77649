use std::env;
use std::path::PathBuf;

/// Overrides the cached lockfile copied into yarn projects.
pub const CACHED_LOCKFILE_ENV: &str = "CREATE_WPTHEME_CACHED_LOCKFILE";

/// Scripts checkout used by `scripts-from-file` builds, captured at compile time.
pub const SCRIPTS_PATH_ENV: &str = "CREATE_WPTHEME_SCRIPTS_PATH";

const CACHED_LOCKFILE_NAME: &str = "yarn.lock.cached";

/// Everything the bootstrap flow needs to know about the outside world.
///
/// The defaults describe the published tool. Tests build values directly to
/// point probes at missing executables or unresolvable hosts.
#[derive(Debug, Clone)]
pub struct Config {
    /// Package manager used unless the alternate one is available
    pub default_manager: String,
    /// Alternate package manager executable
    pub alternate_manager: String,
    /// Registry host the alternate manager downloads from
    pub registry_host: String,
    /// Environment variable holding an HTTPS proxy URL
    pub proxy_env_var: String,
    /// Executable that runs the delegate generator
    pub generator_program: String,
    /// Generator package invoked through `generator_program`
    pub generator_subcommand: String,
    /// Directory inside the project root where the React app is generated
    pub react_root: String,
    /// Scripts package resolved from the registry
    pub scripts_package: String,
    /// Repository cloned by `scripts-from-git` builds
    pub scripts_repository: String,
    /// Scripts package location inside the cloned repository
    pub scripts_repository_subdir: String,
    /// Local scripts checkout for `scripts-from-file` builds
    pub scripts_local_path: Option<PathBuf>,
    /// Names a new project may not take
    pub reserved_names: Vec<String>,
    /// Lockfile copied into the project when yarn is used
    pub cached_lockfile: Option<PathBuf>,
    pub issues_url: String,
}

impl Default for Config {
    fn default() -> Self {
        let mut reserved_names: Vec<String> = [
            "react",
            "react-dom",
            "react-scripts",
            "@devloco/react-scripts-wptheme",
            "react-scripts-wptheme",
        ]
        .iter()
        .map(|s| s.to_string())
        .collect();
        reserved_names.sort();

        Self {
            default_manager: "npm".to_string(),
            alternate_manager: "yarnpkg".to_string(),
            registry_host: "registry.yarnpkg.com".to_string(),
            proxy_env_var: "https_proxy".to_string(),
            generator_program: "npx".to_string(),
            generator_subcommand: "create-react-app".to_string(),
            react_root: "react-src".to_string(),
            scripts_package: "@devloco/react-scripts-wptheme".to_string(),
            scripts_repository: "https://github.com/devloco/create-react-app.git".to_string(),
            scripts_repository_subdir: "packages/react-scripts".to_string(),
            scripts_local_path: option_env!("CREATE_WPTHEME_SCRIPTS_PATH").map(PathBuf::from),
            reserved_names,
            cached_lockfile: None,
            issues_url: "https://github.com/devloco/create-react-wptheme/issues".to_string(),
        }
    }
}

impl Config {
    /// Load configuration: defaults plus environment overrides.
    pub fn load() -> Self {
        let mut config = Self::default();

        config.cached_lockfile = env::var_os(CACHED_LOCKFILE_ENV)
            .filter(|v| !v.is_empty())
            .map(PathBuf::from)
            .or_else(bundled_lockfile);

        config
    }

    /// Link shown under `--help` for new issues.
    pub fn new_issue_url(&self) -> String {
        format!("{}/new", self.issues_url)
    }
}

/// `yarn.lock.cached` shipped next to the executable, if present.
fn bundled_lockfile() -> Option<PathBuf> {
    let exe = env::current_exe().ok()?;
    let candidate = exe.parent()?.join(CACHED_LOCKFILE_NAME);
    candidate.is_file().then_some(candidate)
}
