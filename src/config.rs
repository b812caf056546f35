use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use url::Url;

const DEFAULT_CONFIG: &str = include_str!("../.config/config.yaml");

#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct Config {
    pub users_api: Url,
    pub log_file: Option<String>,
    pub log_level: Option<String>,
}

impl Config {
    /// Load from `path`, or from the platform config dir when unset. A
    /// missing default file is created from the bundled template first.
    pub fn new(path: Option<PathBuf>) -> Result<Self> {
        let config_path = match path {
            Some(p) => p,
            None => default_config_path()?,
        };
        if !config_path.is_file() {
            fs::write(&config_path, DEFAULT_CONFIG)
                .with_context(|| format!("Fail to write file `{}`", config_path.display()))?;
            let cfg: Config =
                serde_yaml_ng::from_str(DEFAULT_CONFIG).context("Fail to parse default config")?;
            return Ok(cfg);
        }

        let file = fs::File::open(&config_path)
            .with_context(|| format!("Fail to open file `{}`", config_path.display()))?;
        let cfg: Config = serde_yaml_ng::from_reader(file)
            .with_context(|| format!("Fail to deserialize file `{}`", config_path.display()))?;

        Ok(cfg)
    }
}

pub fn default_config_path() -> Result<PathBuf> {
    let dir = project_dirs()?.config_dir().to_owned();
    if !dir.is_dir() {
        fs::create_dir_all(&dir)
            .with_context(|| format!("Fail to create directory `{}`", dir.display()))?;
    }

    Ok(dir.join("config.yaml"))
}

pub fn data_dir() -> Result<PathBuf> {
    let dir = project_dirs()?.data_dir().to_owned();
    if !dir.is_dir() {
        fs::create_dir_all(&dir)
            .with_context(|| format!("Fail to create directory `{}`", dir.display()))?;
    }

    Ok(dir)
}

fn project_dirs() -> Result<ProjectDirs> {
    ProjectDirs::from("io.github", "", env!("CARGO_PKG_NAME"))
        .context("Fail to get project directory")
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    use super::*;

    #[test]
    fn test_config_default_written() {
        let temp = TempDir::new().unwrap();
        let cfg_path = temp.path().join("config.yaml");

        let config = Config::new(Some(cfg_path.clone())).unwrap();
        assert!(cfg_path.is_file());
        assert_eq!(
            config.users_api.as_str(),
            "https://66ff94734da5bd2375511acd.mockapi.io/api/v1"
        );
        assert_eq!(config.log_level, Some("info".to_owned()));
        assert_eq!(config.log_file, None);
    }

    #[test]
    fn test_config_existing_file() {
        let temp = TempDir::new().unwrap();
        let cfg_path = temp.path().join("config.yaml");
        let custom_config = r#"
users-api: "http://localhost:8080/api"
log-file: /tmp/log.log
log-level: "debug"
"#;
        fs::write(&cfg_path, custom_config).unwrap();

        let config = Config::new(Some(cfg_path)).unwrap();
        assert_eq!(config.users_api.as_str(), "http://localhost:8080/api");
        assert_eq!(config.log_file, Some("/tmp/log.log".to_owned()));
        assert_eq!(config.log_level, Some("debug".to_owned()));
    }

    #[test]
    fn test_config_deser_error() {
        let temp = TempDir::new().unwrap();
        let cfg_path = temp.path().join("config.yaml");
        let partial_config = r#"
users-api: "http://localhost"
log-file: ["/tmp/log.log"]
"#;
        fs::write(&cfg_path, partial_config).unwrap();

        let result = Config::new(Some(cfg_path));
        assert!(result.is_err(), "expected error, got {:?}", result);

        let err_msg = result.unwrap_err().to_string();
        assert!(
            err_msg.contains("Fail to deserialize file"),
            "expected contains `Fail to deserialize file`, but got {}",
            err_msg
        );
    }
}
