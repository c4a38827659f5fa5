use std::path::PathBuf;
use std::time::Duration;

use serde::Deserialize;
use thiserror::Error;

pub const DEFAULT_EXECUTABLE: &str = "docker";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Explicit path or bare name of the docker executable.
    pub docker: String,
    /// Upper bound on a single scout invocation; `None` waits indefinitely.
    pub command_timeout: Option<Duration>,
    /// Skip the `docker scout version` probe at startup.
    pub skip_probe: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self { docker: DEFAULT_EXECUTABLE.into(), command_timeout: None, skip_probe: false }
    }
}

/// Optional TOML file named by `SCOUT_MCP_CONFIG`.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct FileConfig {
    docker_path: Option<String>,
    command_timeout_secs: Option<u64>,
    skip_probe: Option<bool>,
}

impl Config {
    /// File values first, then environment overrides.
    pub fn from_env_and_toml() -> Result<Self, ConfigError> {
        let mut cfg = Self::default();
        if let Some(path) = std::env::var_os("SCOUT_MCP_CONFIG").map(PathBuf::from) {
            let raw = std::fs::read_to_string(&path)
                .map_err(|source| ConfigError::Read { path: path.clone(), source })?;
            let file: FileConfig =
                toml::from_str(&raw).map_err(|source| ConfigError::Parse { path, source })?;
            cfg.apply_file(file);
        }
        cfg.apply_env();
        Ok(cfg)
    }

    fn apply_file(&mut self, file: FileConfig) {
        if let Some(docker) = file.docker_path.filter(|s| !s.trim().is_empty()) {
            self.docker = docker;
        }
        if let Some(secs) = file.command_timeout_secs {
            self.command_timeout = timeout_from_secs(secs);
        }
        if let Some(skip) = file.skip_probe {
            self.skip_probe = skip;
        }
    }

    fn apply_env(&mut self) {
        if let Ok(docker) = std::env::var("SCOUT_DOCKER_PATH") {
            if !docker.trim().is_empty() {
                self.docker = docker;
            }
        }
        if let Some(secs) = std::env::var("SCOUT_COMMAND_TIMEOUT_SECS")
            .ok()
            .and_then(|s| s.trim().parse::<u64>().ok())
        {
            self.command_timeout = timeout_from_secs(secs);
        }
        if let Ok(v) = std::env::var("SCOUT_SKIP_PROBE") {
            self.skip_probe = matches!(v.trim(), "1" | "true" | "yes");
        }
    }

    /// Command-line flags win over file and environment.
    pub fn with_overrides(mut self, docker: Option<String>, timeout_secs: Option<u64>) -> Self {
        if let Some(docker) = docker {
            self.docker = docker;
        }
        if let Some(secs) = timeout_secs {
            self.command_timeout = timeout_from_secs(secs);
        }
        self
    }
}

/// Zero disables the bound.
fn timeout_from_secs(secs: u64) -> Option<Duration> {
    (secs > 0).then(|| Duration::from_secs(secs))
}
