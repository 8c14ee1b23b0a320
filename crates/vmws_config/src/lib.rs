#[macro_use]
mod path;
pub mod definitions;

use serde::{Deserialize, Serialize};
use std::fs::{create_dir_all, read_to_string, write};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::debug;
use vmws_utils::errors::VmwsError;

/// Connection settings for the vmrest server, persisted as plain YAML.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VmwsConfig {
    pub base_url: String,
    pub username: String,
    pub password: String,
    pub vmrest_path: String,
}

/// Values collected by the configure action. `None` or blank entries for
/// `base_url` and `vmrest_path` fall back to their defaults.
#[derive(Debug, Default, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ConfigInput {
    pub base_url: Option<String>,
    pub username: Option<String>,
    pub password: Option<String>,
    pub vmrest_path: Option<String>,
}

impl ConfigInput {
    /// Best-effort read of whatever fields an existing, possibly incomplete, file holds.
    pub fn read(path: &Path) -> Self {
        read_to_string(path)
            .ok()
            .and_then(|content| serde_yaml_ng::from_str::<Self>(&content).ok())
            .map(|input| Self {
                base_url: non_blank(input.base_url),
                username: non_blank(input.username),
                password: input.password.filter(|p| !p.is_empty()),
                vmrest_path: non_blank(input.vmrest_path),
            })
            .unwrap_or_default()
    }

    /// Field-wise merge, preferring the values of `self`.
    pub fn or(self, other: Self) -> Self {
        Self {
            base_url: non_blank(self.base_url).or(other.base_url),
            username: non_blank(self.username).or(other.username),
            password: self.password.filter(|p| !p.is_empty()).or(other.password),
            vmrest_path: non_blank(self.vmrest_path).or(other.vmrest_path),
        }
    }

    /// True when the credentials are present, the only fields without a default.
    pub fn is_complete(&self) -> bool {
        non_blank(self.username.clone()).is_some()
            && self.password.as_deref().is_some_and(|p| !p.is_empty())
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

impl VmwsConfig {
    pub fn default_path() -> PathBuf {
        path![definitions::TOOL_DIR, definitions::TOOL_DEFAULT_CONFIG_FILE]
    }

    pub fn load() -> Result<Self, VmwsError> {
        Self::load_from(&Self::default_path())
    }

    pub fn load_from(path: &Path) -> Result<Self, VmwsError> {
        debug!("loading config file from: {}", path.display());
        let content = match read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                return Err(VmwsError::ConfigMissing(path.to_path_buf()));
            }
            Err(e) => {
                return Err(VmwsError::ConfigInvalid(format!(
                    "unable to read {}: {e}",
                    path.display()
                )));
            }
        };
        let config: Self = serde_yaml_ng::from_str(&content)
            .map_err(|e| VmwsError::ConfigInvalid(e.to_string()))?;
        config.validate()?;
        config.debug_info();
        Ok(config)
    }

    /// Builds a config from the given answers, applying defaults, and
    /// overwrites the file at `path` with it.
    pub fn configure(path: &Path, input: ConfigInput) -> Result<Self, VmwsError> {
        let config = Self::from_input(input);
        config.validate()?;
        config.save(path)?;
        Ok(config)
    }

    pub fn from_input(input: ConfigInput) -> Self {
        let base_url = non_blank(input.base_url)
            .unwrap_or_else(|| definitions::DEFAULT_BASE_URL.to_string())
            .trim_end_matches('/')
            .to_string();
        let vmrest_path = non_blank(input.vmrest_path)
            .unwrap_or_else(|| definitions::DEFAULT_VMREST_PATH.to_string());
        Self {
            base_url,
            username: input.username.map(|v| v.trim().to_string()).unwrap_or_default(),
            password: input.password.unwrap_or_default(),
            vmrest_path,
        }
    }

    pub fn save(&self, path: &Path) -> Result<(), VmwsError> {
        let content =
            serde_yaml_ng::to_string(self).map_err(|e| VmwsError::ConfigInvalid(e.to_string()))?;
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            create_dir_all(parent).map_err(|e| {
                VmwsError::ConfigInvalid(format!("unable to create {}: {e}", parent.display()))
            })?;
        }
        write(path, content).map_err(|e| {
            VmwsError::ConfigInvalid(format!("unable to write {}: {e}", path.display()))
        })?;
        debug!("config file written to: {}", path.display());
        Ok(())
    }

    pub fn validate(&self) -> Result<(), VmwsError> {
        let fields = [
            ("base_url", &self.base_url),
            ("username", &self.username),
            ("password", &self.password),
            ("vmrest_path", &self.vmrest_path),
        ];
        if let Some((name, _)) = fields.iter().find(|(_, value)| value.trim().is_empty()) {
            return Err(VmwsError::ConfigInvalid(format!("{name} is not set")));
        }
        if !self.base_url.starts_with("http://") && !self.base_url.starts_with("https://") {
            return Err(VmwsError::ConfigInvalid(format!(
                "base_url must be an http or https url, found {}",
                self.base_url
            )));
        }
        Ok(())
    }

    pub fn debug_info(&self) {
        debug!("base_url: {}", self.base_url);
        debug!("username: {}", self.username);
        debug!("password: ********");
        debug!("vmrest_path: {}", self.vmrest_path);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn input() -> ConfigInput {
        ConfigInput {
            base_url: Some("http://127.0.0.1:8697/api".to_string()),
            username: Some("u".to_string()),
            password: Some("p".to_string()),
            vmrest_path: Some("/usr/bin/vmrest".to_string()),
        }
    }

    #[test]
    fn load_reports_missing_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.yaml");
        let result = VmwsConfig::load_from(&path);
        assert!(matches!(result, Err(VmwsError::ConfigMissing(p)) if p == path));
    }

    #[test]
    fn configure_then_load_returns_written_values() {
        let dir = tempdir().unwrap();
        let path = dir.path().join(".vmws").join("config.yaml");

        let written = VmwsConfig::configure(&path, input()).unwrap();
        let loaded = VmwsConfig::load_from(&path).unwrap();
        assert_eq!(written, loaded);
        assert_eq!(loaded.username, "u");

        let mut changed = input();
        changed.username = Some("admin".to_string());
        changed.password = Some("secret".to_string());
        VmwsConfig::configure(&path, changed).unwrap();

        let reloaded = VmwsConfig::load_from(&path).unwrap();
        assert_eq!(reloaded.username, "admin");
        assert_eq!(reloaded.password, "secret");
    }

    #[test]
    fn configure_applies_defaults_for_blank_values() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.yaml");
        let config = VmwsConfig::configure(
            &path,
            ConfigInput {
                base_url: Some("   ".to_string()),
                username: Some("u".to_string()),
                password: Some("p".to_string()),
                vmrest_path: None,
            },
        )
        .unwrap();

        assert_eq!(config.base_url, definitions::DEFAULT_BASE_URL);
        assert_eq!(config.vmrest_path, definitions::DEFAULT_VMREST_PATH);
    }

    #[test]
    fn configure_trims_trailing_slash_from_base_url() {
        let mut values = input();
        values.base_url = Some("http://localhost:8697/api/".to_string());
        let config = VmwsConfig::from_input(values);
        assert_eq!(config.base_url, "http://localhost:8697/api");
    }

    #[test]
    fn configure_rejects_empty_credentials() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.yaml");
        let mut values = input();
        values.username = None;

        let result = VmwsConfig::configure(&path, values);
        assert!(matches!(result, Err(VmwsError::ConfigInvalid(_))));
        assert!(!path.exists());
    }

    #[test]
    fn load_rejects_missing_field() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.yaml");
        write(
            &path,
            "base_url: http://127.0.0.1:8697/api\nusername: u\nvmrest_path: /usr/bin/vmrest\n",
        )
        .unwrap();

        let result = VmwsConfig::load_from(&path);
        assert!(matches!(result, Err(VmwsError::ConfigInvalid(_))));
    }

    #[test]
    fn load_rejects_blank_field() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.yaml");
        write(
            &path,
            "base_url: http://127.0.0.1:8697/api\nusername: u\npassword: ''\nvmrest_path: /usr/bin/vmrest\n",
        )
        .unwrap();

        let result = VmwsConfig::load_from(&path);
        assert!(matches!(result, Err(VmwsError::ConfigInvalid(m)) if m.contains("password")));
    }

    #[test]
    fn load_rejects_unparsable_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.yaml");
        write(&path, "[this is: not, a mapping").unwrap();

        let result = VmwsConfig::load_from(&path);
        assert!(matches!(result, Err(VmwsError::ConfigInvalid(_))));
    }

    #[test]
    fn validate_rejects_non_http_base_url() {
        let mut values = input();
        values.base_url = Some("ftp://127.0.0.1".to_string());
        let config = VmwsConfig::from_input(values);
        assert!(matches!(config.validate(), Err(VmwsError::ConfigInvalid(_))));
    }

    #[test]
    fn config_input_reads_partial_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.yaml");
        write(&path, "base_url: http://10.0.0.2:8697/api\nusername: ''\n").unwrap();

        let partial = ConfigInput::read(&path);
        assert_eq!(partial.base_url.as_deref(), Some("http://10.0.0.2:8697/api"));
        assert_eq!(partial.username, None);
        assert!(!partial.is_complete());

        assert_eq!(ConfigInput::read(&dir.path().join("missing.yaml")), ConfigInput::default());
    }

    #[test]
    fn config_input_merge_prefers_explicit_values() {
        let explicit = ConfigInput {
            username: Some("admin".to_string()),
            password: Some(String::new()),
            ..Default::default()
        };
        let merged = explicit.or(input());

        assert_eq!(merged.username.as_deref(), Some("admin"));
        assert_eq!(merged.password.as_deref(), Some("p"));
        assert_eq!(merged.base_url.as_deref(), Some("http://127.0.0.1:8697/api"));
        assert!(merged.is_complete());
    }

    #[test]
    fn path_macro_joins_components() {
        let path = path!["a", "b", "c.yaml"];
        assert_eq!(path, PathBuf::from("a").join("b").join("c.yaml"));
    }
}
