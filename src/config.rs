//! Configuration for locating session logs and the transition store
//!
//! The parser never reads the environment itself. Everything it needs is in
//! [`ParserConfig`]; this module is where flags, a settings file and
//! environment variables are turned into one.

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Overrides the base directory of session logs (e.g., a mounted volume)
pub const SESSIONS_ENV: &str = "CLAUDE_SESSIONS";

/// Store connection string
pub const REDIS_URL_ENV: &str = "REDIS_URL";

/// Directory under the sessions base holding one folder per project
const PROJECTS_DIR: &str = "projects";

/// Explicit inputs of the session log parser
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParserConfig {
    /// Absolute project path; reads under it are made relative when normalizing
    pub project_root: String,

    /// Directory containing the project's `agent-*.jsonl` files
    pub sessions_base_path: PathBuf,
}

impl ParserConfig {
    pub fn new(project_root: impl Into<String>, sessions_base_path: impl Into<PathBuf>) -> Self {
        Self {
            project_root: project_root.into(),
            sessions_base_path: sessions_base_path.into(),
        }
    }

    /// Work out where a project's sessions live
    ///
    /// Precedence: explicit directory, then `<sessions_env>/projects/<slug>`,
    /// then `<home>/.claude/projects/<slug>`.
    ///
    /// # Example
    /// ```
    /// use filehop::config::ParserConfig;
    /// use std::path::{Path, PathBuf};
    ///
    /// let config = ParserConfig::resolve("/home/dev/app", None, None, Some(Path::new("/home/dev"))).unwrap();
    /// assert_eq!(
    ///     config.sessions_base_path,
    ///     PathBuf::from("/home/dev/.claude/projects/-home-dev-app")
    /// );
    /// ```
    pub fn resolve(
        project_root: &str,
        sessions_dir: Option<&Path>,
        sessions_env: Option<&Path>,
        home: Option<&Path>,
    ) -> Result<Self> {
        let slug = project_slug(project_root);

        let base = if let Some(dir) = sessions_dir {
            dir.to_path_buf()
        } else if let Some(root) = sessions_env {
            root.join(PROJECTS_DIR).join(&slug)
        } else if let Some(home) = home {
            home.join(".claude").join(PROJECTS_DIR).join(&slug)
        } else {
            bail!(
                "Cannot locate session logs: set {} or HOME, or pass --sessions-dir",
                SESSIONS_ENV
            );
        };

        Ok(Self::new(project_root, base))
    }

    /// [`ParserConfig::resolve`] using `CLAUDE_SESSIONS` and `HOME` from the environment
    pub fn from_env(project_root: &str, sessions_dir: Option<&Path>) -> Result<Self> {
        let sessions_env = non_empty_env(SESSIONS_ENV).map(PathBuf::from);
        let home = non_empty_env("HOME").map(PathBuf::from);
        Self::resolve(project_root, sessions_dir, sessions_env.as_deref(), home.as_deref())
    }
}

fn non_empty_env(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.is_empty())
}

/// Folder name of a project's logs: every `/` becomes `-`
///
/// `/home/corey/aOa` → `-home-corey-aOa`
pub fn project_slug(project_root: &str) -> String {
    project_root.replace('/', "-")
}

/// Optional settings file (TOML)
///
/// ```toml
/// project_root = "/home/dev/app"
/// sessions_dir = "/mnt/sessions/projects/-home-dev-app"
/// redis_url = "redis://cache:6379/0"
/// namespace = "aoa"
/// top = 10
/// ```
///
/// Every key is optional; command-line flags win over the file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    pub project_root: Option<String>,
    pub sessions_dir: Option<PathBuf>,
    pub redis_url: Option<String>,
    pub namespace: Option<String>,
    pub top: Option<usize>,
}

impl Settings {
    /// Load settings from a TOML file
    ///
    /// # Errors
    /// Returns error if the file can't be read or isn't valid settings TOML.
    pub fn from_toml<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref()).with_context(|| {
            format!("Failed to read settings file: {}", path.as_ref().display())
        })?;
        Self::from_toml_str(&content)
            .with_context(|| format!("Invalid settings file: {}", path.as_ref().display()))
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str(content).context("Failed to parse TOML settings")
    }
}
