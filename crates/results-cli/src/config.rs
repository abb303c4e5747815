//! CLI configuration: a TOML file merged with flag/environment overrides.

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result, bail};
use serde::Deserialize;

/// Default config file looked up in the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "results.toml";

const DEFAULT_TIMEOUT_SECS: u64 = 30;
const DEFAULT_STAGING_FILE: &str = "staging.json";

/// On-disk configuration, all optional.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ConfigFile {
    pub api_url: Option<String>,
    pub course_id: Option<String>,
    pub timeout_secs: Option<u64>,
    pub staging_file: Option<PathBuf>,
}

/// Values a command can override from flags or environment.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub api_url: Option<String>,
    pub course_id: Option<String>,
    pub staging_file: Option<PathBuf>,
}

/// Fully resolved settings for one command invocation.
#[derive(Debug, Clone)]
pub struct Settings {
    pub api_url: String,
    pub course_id: String,
    pub timeout: Duration,
    pub staging_file: PathBuf,
}

/// Load the config file and apply overrides. Flags beat the file.
///
/// An explicitly given config path must exist; the default path is
/// optional.
pub fn resolve_settings(config_path: Option<&Path>, overrides: &Overrides) -> Result<Settings> {
    let file = match config_path {
        Some(path) => load_config_file(path)
            .with_context(|| format!("load config {}", path.display()))?,
        None => {
            let default = Path::new(DEFAULT_CONFIG_FILE);
            if default.exists() {
                load_config_file(default)
                    .with_context(|| format!("load config {DEFAULT_CONFIG_FILE}"))?
            } else {
                ConfigFile::default()
            }
        }
    };

    let Some(api_url) = overrides.api_url.clone().or(file.api_url) else {
        bail!("no API url configured; pass --api-url or set api_url in results.toml");
    };
    let Some(course_id) = overrides.course_id.clone().or(file.course_id) else {
        bail!("no course id configured; pass --course-id or set course_id in results.toml");
    };

    Ok(Settings {
        api_url,
        course_id,
        timeout: Duration::from_secs(file.timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS)),
        staging_file: overrides
            .staging_file
            .clone()
            .or(file.staging_file)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_STAGING_FILE)),
    })
}

fn load_config_file(path: &Path) -> Result<ConfigFile> {
    let content = std::fs::read_to_string(path)?;
    Ok(toml::from_str(&content)?)
}
