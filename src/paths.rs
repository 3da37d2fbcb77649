//! Path computations for a bootstrap run.
//!
//! Pure functions only: the process working directory is read but never
//! changed. Children get an explicit working directory instead.

use std::path::{Component, Path, PathBuf};

/// Name of the scratch directory used by git-sourced scripts: `<root>/temp`
pub const SCRIPTS_TEMP_DIR: &str = "temp";

/// Lockfile written into yarn projects: `<root>/yarn.lock`
pub const LOCKFILE_NAME: &str = "yarn.lock";

/// Resolve `target` against `base` and normalise `.` and `..` lexically.
///
/// Mirrors how a shell user reads the argument: `../foo` from `/a/b` is
/// `/a/foo`, whether or not it exists yet.
pub fn resolve(base: &Path, target: &Path) -> PathBuf {
    let joined = if target.is_absolute() {
        target.to_path_buf()
    } else {
        base.join(target)
    };

    let mut out = PathBuf::new();
    for component in joined.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                // Popping past the root leaves the root in place
                out.pop();
            }
            other => out.push(other.as_os_str()),
        }
    }
    out
}

/// Final segment of a resolved project root, used as the package name.
pub fn app_name(root: &Path) -> String {
    root.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// Canonical form of `dir` as a child process would report it.
///
/// Falls back to `dir` itself when it cannot be canonicalised. On Windows the
/// verbatim `\\?\` prefix is removed so values compare with what tools print.
pub fn reported_dir(dir: &Path) -> String {
    let canonical = std::fs::canonicalize(dir).unwrap_or_else(|_| dir.to_path_buf());
    strip_verbatim(&canonical.display().to_string()).to_string()
}

fn strip_verbatim(s: &str) -> &str {
    if cfg!(windows) {
        s.strip_prefix(r"\\?\").unwrap_or(s)
    } else {
        s
    }
}

/// `file:` specifier understood by npm for a local package directory.
pub fn file_specifier(path: &Path) -> String {
    format!("file:{}", path.display())
}

/// Checkout directory name for a repository URL: `.../create-react-app.git` -> `create-react-app`
pub fn repository_dir_name(url: &str) -> String {
    let last = url.trim_end_matches('/').rsplit('/').next().unwrap_or(url);
    last.strip_suffix(".git").unwrap_or(last).to_string()
}
