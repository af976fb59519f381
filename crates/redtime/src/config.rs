use anyhow::{anyhow, Result};
use directories::{BaseDirs, ProjectDirs};
use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use redmine_backend::{Pagination, RedmineConfig};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

const LOCAL_CONFIG_FILE: &str = ".redtime.toml";

/// Resolved settings for talking to a Redmine instance
#[derive(Debug, Deserialize, Serialize, Default, PartialEq)]
pub struct Config {
    /// Redmine base URL, e.g. https://redmine.example.com
    pub url: Option<String>,
    /// API key sent as the `key` query parameter
    pub key: Option<String>,
    /// Default page size for list calls
    pub limit: Option<u32>,
    /// Default offset for list calls
    pub offset: Option<u32>,
    /// Request timeout in seconds
    pub timeout_secs: Option<u64>,
}

impl Config {
    pub fn load(config_path: Option<PathBuf>) -> Result<Self> {
        let mut figment = Figment::new().merge(Serialized::defaults(Config::default()));

        let explicit_path = config_path.as_deref();
        if let Some(path) = explicit_path {
            if !path.exists() {
                return Err(anyhow!("Config file not found: {}", path.display()));
            }
        }

        for path in config_paths(explicit_path) {
            if path.exists() {
                figment = figment.merge(Toml::file(path));
            }
        }

        // REDMINE_URL -> url, REDMINE_KEY -> key, ...
        figment = figment.merge(Env::prefixed("REDMINE_"));

        figment
            .extract()
            .map_err(|e| anyhow!("Failed to load config: {}", e))
    }

    pub fn merge_with_cli(&mut self, cli_url: Option<String>, cli_key: Option<String>) {
        if let Some(url) = cli_url {
            self.url = Some(url);
        }
        if let Some(key) = cli_key {
            self.key = Some(key);
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.url.as_deref().unwrap_or("").is_empty() {
            return Err(anyhow!(
                "Redmine URL not configured. Set via --url, REDMINE_URL env var, or config file"
            ));
        }
        if self.key.as_deref().unwrap_or("").is_empty() {
            return Err(anyhow!(
                "Redmine API key not configured. Set via --key, REDMINE_KEY env var, or config file"
            ));
        }
        Ok(())
    }

    /// Build the client configuration. Call [`Config::validate`] first.
    pub fn client_config(&self) -> Result<RedmineConfig> {
        let url = self
            .url
            .as_deref()
            .ok_or_else(|| anyhow!("Redmine URL not configured"))?;
        let key = self
            .key
            .as_deref()
            .ok_or_else(|| anyhow!("Redmine API key not configured"))?;

        let mut config = RedmineConfig::new(url, key)
            .with_pagination(Pagination::new(self.limit, self.offset));
        if let Some(secs) = self.timeout_secs {
            config = config.with_timeout(Duration::from_secs(secs));
        }
        Ok(config)
    }

    /// Copy suitable for printing: the API key is reduced to its last 4 characters.
    pub fn masked(&self) -> Config {
        Config {
            url: self.url.clone(),
            key: self.key.as_deref().map(mask_key),
            limit: self.limit,
            offset: self.offset,
            timeout_secs: self.timeout_secs,
        }
    }
}

fn mask_key(key: &str) -> String {
    let count = key.chars().count();
    if count <= 4 {
        return "****".to_string();
    }
    let tail: String = key.chars().skip(count - 4).collect();
    format!("****{}", tail)
}

/// Files consulted by [`Config::load`], lowest precedence first.
pub fn config_paths(explicit: Option<&Path>) -> Vec<PathBuf> {
    let mut paths = Vec::new();

    if let Some(path) = explicit {
        paths.push(path.to_path_buf());
        return paths;
    }

    if let Some(path) = get_project_config_path() {
        push_unique(&mut paths, path);
    }
    if let Some(path) = get_xdg_config_path() {
        push_unique(&mut paths, path);
    }
    if let Some(path) = get_local_config_path() {
        push_unique(&mut paths, path);
    }

    paths
}

fn push_unique(paths: &mut Vec<PathBuf>, path: PathBuf) {
    if !paths.contains(&path) {
        paths.push(path);
    }
}

fn get_project_config_path() -> Option<PathBuf> {
    ProjectDirs::from("", "", "redtime").map(|d| d.config_dir().join("config.toml"))
}

fn get_xdg_config_path() -> Option<PathBuf> {
    if let Some(dir) = std::env::var_os("XDG_CONFIG_HOME") {
        return Some(PathBuf::from(dir).join("redtime").join("config.toml"));
    }

    BaseDirs::new().map(|dirs| {
        dirs.home_dir()
            .join(".config")
            .join("redtime")
            .join("config.toml")
    })
}

fn get_local_config_path() -> Option<PathBuf> {
    std::env::current_dir()
        .ok()
        .map(|dir| dir.join(LOCAL_CONFIG_FILE))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mask_key_keeps_last_four_characters() {
        assert_eq!(mask_key("0123456789abcdef"), "****cdef");
        assert_eq!(mask_key("abc"), "****");
    }

    #[test]
    fn cli_values_override_loaded_values() {
        let mut config = Config {
            url: Some("https://old.example.com".to_string()),
            key: Some("old".to_string()),
            ..Default::default()
        };
        config.merge_with_cli(Some("https://new.example.com".to_string()), None);

        assert_eq!(config.url.as_deref(), Some("https://new.example.com"));
        assert_eq!(config.key.as_deref(), Some("old"));
    }

    #[test]
    fn validate_requires_url_and_key() {
        let config = Config::default();
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("URL not configured"));

        let config = Config {
            url: Some("https://redmine.example.com".to_string()),
            key: Some(String::new()),
            ..Default::default()
        };
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("API key not configured"));
    }

    #[test]
    fn client_config_carries_pagination_and_timeout() {
        let config = Config {
            url: Some("https://redmine.example.com/".to_string()),
            key: Some("secret".to_string()),
            limit: Some(50),
            offset: Some(100),
            timeout_secs: Some(5),
        };
        let client_config = config.client_config().unwrap();

        assert_eq!(client_config.endpoint, "https://redmine.example.com");
        assert_eq!(client_config.api_key, "secret");
        assert_eq!(client_config.pagination.clause(), "&limit=50&offset=100");
        assert_eq!(client_config.timeout, Duration::from_secs(5));
    }

    #[test]
    fn explicit_config_path_is_exclusive() {
        let explicit = PathBuf::from("/tmp/redtime-explicit.toml");
        let paths = config_paths(Some(&explicit));
        assert_eq!(paths, vec![explicit]);
    }

    #[test]
    fn load_reads_explicit_toml_file() {
        figment::Jail::expect_with(|jail| {
            jail.create_file(
                "custom.toml",
                "url = \"https://redmine.example.com\"\nkey = \"abc\"\nlimit = 10\n",
            )?;
            jail.set_env("REDMINE_OFFSET", "20");

            let config = Config::load(Some(PathBuf::from("custom.toml")))
                .map_err(|e| e.to_string())?;
            assert_eq!(config.url.as_deref(), Some("https://redmine.example.com"));
            assert_eq!(config.key.as_deref(), Some("abc"));
            assert_eq!(config.limit, Some(10));
            assert_eq!(config.offset, Some(20));
            Ok(())
        });
    }
}
