//! Configuration provider using Figment

use crate::{
    discovery::{ConfigFile, ConfigFormat, FileDiscovery},
    types::Config,
    ConfigResult,
};
use figment::{
    providers::{Env, Format, Json, Serialized, Toml, Yaml},
    Figment,
};
use stackpr_common::Pretty;
use std::path::Path;
use tracing::{debug, trace};

/// Prefix for environment overrides, e.g. `STACKPR_USER__NO_REBASE=true`
pub const ENV_PREFIX: &str = "STACKPR_";

/// Separator between nested keys in environment variable names
pub const ENV_NESTING_SEPARATOR: &str = "__";

/// Loads [`Config`] from defaults, files and the environment.
///
/// Sources are merged in precedence order (later sources win):
/// 1. Built-in defaults
/// 2. `~/.stackpr.{toml,json,yaml,yml}`
/// 3. `<working tree root>/.stackpr.{toml,json,yaml,yml}`
/// 4. `STACKPR_*` environment variables
///
/// Nothing is cached; every call reads the sources again.
#[derive(Debug, Clone, Default)]
pub struct ConfigProvider {
    discovery: FileDiscovery,
}

impl ConfigProvider {
    /// Provider that searches the home directory only
    pub fn new() -> Self {
        Self {
            discovery: FileDiscovery::new(),
        }
    }

    /// Provider that also searches `root`
    pub fn for_repository<P: AsRef<Path>>(root: P) -> Self {
        Self {
            discovery: FileDiscovery::new().with_repo_root(root.as_ref()),
        }
    }

    /// Provider over an explicit discovery setup
    pub fn with_discovery(discovery: FileDiscovery) -> Self {
        Self { discovery }
    }

    /// Merge all sources, extract and validate
    pub fn load(&self) -> ConfigResult<Config> {
        let config: Config = self.build_figment().extract()?;
        config.validate()?;

        debug!("Loaded configuration:{}", Pretty(&config));
        Ok(config)
    }

    fn build_figment(&self) -> Figment {
        let mut figment = Figment::new().merge(Serialized::defaults(Config::default()));

        for config_file in self.discovery.discover_all() {
            trace!(
                "Loading config file: {} ({:?})",
                config_file.path.display(),
                config_file.format
            );
            figment = figment.merge(load_config_file(&config_file));
        }

        figment.merge(Env::prefixed(ENV_PREFIX).split(ENV_NESTING_SEPARATOR))
    }
}

fn load_config_file(config_file: &ConfigFile) -> Figment {
    let path = &config_file.path;
    match config_file.format {
        ConfigFormat::Toml => Figment::from(Toml::file(path)),
        ConfigFormat::Yaml => Figment::from(Yaml::file(path)),
        ConfigFormat::Json => Figment::from(Json::file(path)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ConfigError;
    use serial_test::serial;
    use tempfile::TempDir;

    fn isolated(repo: &TempDir) -> ConfigProvider {
        ConfigProvider::with_discovery(
            FileDiscovery::new()
                .without_user_dir()
                .with_repo_root(repo.path()),
        )
    }

    #[test]
    #[serial]
    fn test_defaults_without_files() {
        let repo = TempDir::new().unwrap();
        let config = isolated(&repo).load().unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    #[serial]
    fn test_repository_yaml_overrides_defaults() {
        let repo = TempDir::new().unwrap();
        std::fs::write(
            repo.path().join(".stackpr.yml"),
            "repo:\n  github_remote: upstream\nuser:\n  no_rebase: true\n",
        )
        .unwrap();

        let config = isolated(&repo).load().unwrap();
        assert_eq!(config.repo.github_remote, "upstream");
        assert_eq!(config.repo.github_branch, "main");
        assert!(config.user.no_rebase);
    }

    #[test]
    #[serial]
    fn test_malformed_file_is_parse_error() {
        let repo = TempDir::new().unwrap();
        std::fs::write(repo.path().join(".stackpr.toml"), "[repo\n").unwrap();

        let error = isolated(&repo).load().unwrap_err();
        assert!(matches!(error, ConfigError::Parse { .. }));
    }

    #[test]
    #[serial]
    fn test_empty_remote_is_validation_error() {
        let repo = TempDir::new().unwrap();
        std::fs::write(
            repo.path().join(".stackpr.json"),
            r#"{"repo": {"github_remote": ""}}"#,
        )
        .unwrap();

        let error = isolated(&repo).load().unwrap_err();
        assert!(matches!(error, ConfigError::Validation { .. }));
    }
}
