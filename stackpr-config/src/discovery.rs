//! Configuration file discovery
//!
//! Two places are searched: the user's home directory and the repository's
//! working tree root. Repository files take precedence over user files.

use std::path::{Path, PathBuf};
use tracing::{debug, trace};

/// Base file name, without extension, searched in each location
pub const CONFIG_FILE_STEM: &str = ".stackpr";

/// Configuration file format detected from file extension
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    /// YAML format (.yml or .yaml extensions)
    Yaml,
    /// TOML format (.toml extension)
    Toml,
    /// JSON format (.json extension)
    Json,
}

impl ConfigFormat {
    /// Detect format from file extension
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_lowercase().as_str() {
            "yml" | "yaml" => Some(Self::Yaml),
            "toml" => Some(Self::Toml),
            "json" => Some(Self::Json),
            _ => None,
        }
    }
}

/// Where a configuration file was found
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ConfigScope {
    /// `~/.stackpr.*`
    User,
    /// `<working tree root>/.stackpr.*`
    Repository,
}

/// A discovered configuration file
#[derive(Debug, Clone, PartialEq)]
pub struct ConfigFile {
    pub path: PathBuf,
    pub format: ConfigFormat,
    pub scope: ConfigScope,
}

/// File discovery service for finding configuration files
#[derive(Debug, Clone, Default)]
pub struct FileDiscovery {
    user_dir: Option<PathBuf>,
    repo_root: Option<PathBuf>,
}

impl FileDiscovery {
    /// Discovery over the home directory only
    pub fn new() -> Self {
        Self {
            user_dir: dirs::home_dir(),
            repo_root: None,
        }
    }

    /// Also search the given working tree root
    pub fn with_repo_root<P: Into<PathBuf>>(mut self, root: P) -> Self {
        self.repo_root = Some(root.into());
        self
    }

    /// Search `dir` instead of the home directory for user configuration
    pub fn with_user_dir<P: Into<PathBuf>>(mut self, dir: P) -> Self {
        self.user_dir = Some(dir.into());
        self
    }

    /// Skip user configuration entirely
    pub fn without_user_dir(mut self) -> Self {
        self.user_dir = None;
        self
    }

    /// Discover all configuration files, lowest precedence first
    pub fn discover_all(&self) -> Vec<ConfigFile> {
        let mut files = Vec::new();

        if let Some(dir) = &self.user_dir {
            files.extend(search_directory(dir, ConfigScope::User));
        }
        if let Some(dir) = &self.repo_root {
            files.extend(search_directory(dir, ConfigScope::Repository));
        }

        debug!("Discovered {} configuration files", files.len());
        files
    }
}

/// Candidate files in `dir`, in the order they are merged
fn search_directory(dir: &Path, scope: ConfigScope) -> Vec<ConfigFile> {
    trace!("Searching {} for configuration", dir.display());

    ["toml", "json", "yaml", "yml"]
        .iter()
        .filter_map(|ext| {
            let path = dir.join(format!("{}.{}", CONFIG_FILE_STEM, ext));
            if !path.is_file() {
                return None;
            }
            let format = ConfigFormat::from_extension(ext)?;
            trace!("Found config: {} ({:?})", path.display(), format);
            Some(ConfigFile {
                path,
                format,
                scope,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_format_from_extension() {
        assert_eq!(ConfigFormat::from_extension("yml"), Some(ConfigFormat::Yaml));
        assert_eq!(ConfigFormat::from_extension("YAML"), Some(ConfigFormat::Yaml));
        assert_eq!(ConfigFormat::from_extension("toml"), Some(ConfigFormat::Toml));
        assert_eq!(ConfigFormat::from_extension("json"), Some(ConfigFormat::Json));
        assert_eq!(ConfigFormat::from_extension("ini"), None);
    }

    #[test]
    fn test_discovery_orders_user_before_repository() {
        let home = TempDir::new().unwrap();
        let repo = TempDir::new().unwrap();
        std::fs::write(home.path().join(".stackpr.yml"), "user: {}\n").unwrap();
        std::fs::write(repo.path().join(".stackpr.yml"), "repo: {}\n").unwrap();

        let files = FileDiscovery::new()
            .with_user_dir(home.path())
            .with_repo_root(repo.path())
            .discover_all();

        assert_eq!(files.len(), 2);
        assert_eq!(files[0].scope, ConfigScope::User);
        assert_eq!(files[1].scope, ConfigScope::Repository);
    }

    #[test]
    fn test_discovery_ignores_missing_and_unrelated_files() {
        let repo = TempDir::new().unwrap();
        std::fs::write(repo.path().join("stackpr.yml"), "").unwrap();
        std::fs::create_dir(repo.path().join(".stackpr.yaml")).unwrap();

        let files = FileDiscovery::new()
            .without_user_dir()
            .with_repo_root(repo.path())
            .discover_all();

        assert!(files.is_empty());
    }
}
