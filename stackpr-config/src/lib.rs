//! # stackpr configuration
//!
//! Layered configuration for stackpr, built on [figment].
//!
//! ```no_run
//! use stackpr_config::load_configuration;
//!
//! let config = load_configuration(Some(std::path::Path::new("."))).unwrap();
//! let settings = config.git_settings();
//! println!("pushing to {}", settings.remote_name);
//! ```

use std::path::Path;

pub mod discovery;
pub mod error;
pub mod provider;
pub mod types;

pub use discovery::{ConfigFile, ConfigFormat, ConfigScope, FileDiscovery, CONFIG_FILE_STEM};
pub use error::{ConfigError, ConfigResult};
pub use provider::{ConfigProvider, ENV_NESTING_SEPARATOR, ENV_PREFIX};
pub use types::{Config, RepoConfig, UserConfig, DEFAULT_BRANCH};

/// Load configuration, including the repository file when `repo_root` is known
pub fn load_configuration(repo_root: Option<&Path>) -> ConfigResult<Config> {
    match repo_root {
        Some(root) => ConfigProvider::for_repository(root).load(),
        None => ConfigProvider::new().load(),
    }
}
