use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use schoolid_core::rules::{is_valid_student_number, normalize, normalize_student_number};
use serde::Deserialize;
use thiserror::Error;

const APP_DIR: &str = "schoolid";
const CONFIG_FILENAME: &str = "config.toml";

pub const DEFAULT_LOCAL_DELAY_MS: u64 = 400;
pub const MAX_LOCAL_DELAY_MS: u64 = 10_000;

/// Which resolution backend a deployment uses. The two are mutually
/// exclusive; remote is canonical, local exists for demo and test setups.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Strategy {
    Remote,
    Local,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub strategy: Strategy,
    pub remote: RemoteConfig,
    pub local: LocalConfig,
}

#[derive(Debug, Clone, Default)]
pub struct RemoteConfig {
    /// Lookup endpoint URL. Validated lazily by the remote strategy so a
    /// misconfigured deployment fails on first submit, not at startup.
    pub endpoint: Option<String>,
}

#[derive(Debug, Clone)]
pub struct LocalConfig {
    /// Artificial latency applied by the local table, simulating a network
    /// round trip.
    pub delay_ms: u64,
    pub entries: Vec<LocalEntry>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocalEntry {
    pub student_no: String,
    pub name: String,
    pub id: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            strategy: Strategy::Remote,
            remote: RemoteConfig::default(),
            local: LocalConfig {
                delay_ms: DEFAULT_LOCAL_DELAY_MS,
                entries: Vec::new(),
            },
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing home directory")]
    MissingHomeDir,
    #[error("invalid config path: {0}")]
    InvalidConfigPath(PathBuf),
    #[error("config file not found: {0}")]
    MissingConfigFile(PathBuf),
    #[error("config file permissions too permissive: {0}")]
    InsecurePermissions(PathBuf),
    #[error("invalid local delay_ms value: {0}")]
    InvalidLocalDelay(u64),
    #[error("invalid local entry {index}: {detail}")]
    InvalidLocalEntry { index: usize, detail: String },
    #[error("failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

pub type Result<T> = std::result::Result<T, ConfigError>;

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct ConfigFile {
    strategy: Option<Strategy>,
    remote: Option<RemoteFile>,
    local: Option<LocalFile>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RemoteFile {
    endpoint: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct LocalFile {
    delay_ms: Option<u64>,
    #[serde(default)]
    entries: Vec<LocalEntryFile>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct LocalEntryFile {
    student_no: String,
    name: String,
    id: String,
}

pub fn load(config_path: Option<PathBuf>) -> Result<AppConfig> {
    let required = config_path.is_some();
    let path = match resolve_config_path(config_path) {
        Ok(path) => path,
        Err(ConfigError::MissingHomeDir) if !required => return Ok(AppConfig::default()),
        Err(ConfigError::InvalidConfigPath(_)) if !required => return Ok(AppConfig::default()),
        Err(err) => return Err(err),
    };
    match load_at_path(&path, required)? {
        Some(config) => Ok(config),
        None => Ok(AppConfig::default()),
    }
}

pub fn resolve_config_path(custom: Option<PathBuf>) -> Result<PathBuf> {
    match custom {
        Some(path) => {
            if path.as_os_str().is_empty() {
                return Err(ConfigError::InvalidConfigPath(path));
            }
            Ok(path)
        }
        None => {
            let base = if let Some(dir) = env::var_os("XDG_CONFIG_HOME") {
                let path = PathBuf::from(dir);
                if path.as_os_str().is_empty() {
                    return Err(ConfigError::InvalidConfigPath(path));
                }
                path
            } else {
                let home = dirs::home_dir().ok_or(ConfigError::MissingHomeDir)?;
                home.join(".config")
            };
            Ok(base.join(APP_DIR).join(CONFIG_FILENAME))
        }
    }
}

fn load_at_path(path: &Path, required: bool) -> Result<Option<AppConfig>> {
    if !path.exists() {
        if required {
            return Err(ConfigError::MissingConfigFile(path.to_path_buf()));
        }
        return Ok(None);
    }

    ensure_permissions(path)?;
    let contents = fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let parsed: ConfigFile = toml::from_str(&contents).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(Some(merge_config(parsed)?))
}

fn merge_config(parsed: ConfigFile) -> Result<AppConfig> {
    let mut config = AppConfig::default();

    if let Some(strategy) = parsed.strategy {
        config.strategy = strategy;
    }

    if let Some(remote) = parsed.remote {
        if let Some(endpoint) = remote.endpoint {
            let endpoint = endpoint.trim().to_string();
            if !endpoint.is_empty() {
                config.remote.endpoint = Some(endpoint);
            }
        }
    }

    if let Some(local) = parsed.local {
        if let Some(delay_ms) = local.delay_ms {
            if delay_ms > MAX_LOCAL_DELAY_MS {
                return Err(ConfigError::InvalidLocalDelay(delay_ms));
            }
            config.local.delay_ms = delay_ms;
        }
        for (index, entry) in local.entries.into_iter().enumerate() {
            config.local.entries.push(validate_entry(index, entry)?);
        }
    }

    Ok(config)
}

fn validate_entry(index: usize, entry: LocalEntryFile) -> Result<LocalEntry> {
    let student_no = normalize_student_number(&entry.student_no);
    if !is_valid_student_number(&student_no) {
        return Err(ConfigError::InvalidLocalEntry {
            index,
            detail: "student_no must be 3 to 10 digits".to_string(),
        });
    }
    let name = normalize(&entry.name);
    if name.is_empty() {
        return Err(ConfigError::InvalidLocalEntry {
            index,
            detail: "name must not be empty".to_string(),
        });
    }
    let id = entry.id.trim().to_string();
    if id.is_empty() {
        return Err(ConfigError::InvalidLocalEntry {
            index,
            detail: "id must not be empty".to_string(),
        });
    }
    Ok(LocalEntry {
        student_no,
        name,
        id,
    })
}

#[cfg(unix)]
fn ensure_permissions(path: &Path) -> Result<()> {
    use std::os::unix::fs::PermissionsExt;

    let metadata = fs::metadata(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let mode = metadata.permissions().mode();
    if mode & 0o077 != 0 {
        return Err(ConfigError::InsecurePermissions(path.to_path_buf()));
    }
    Ok(())
}

#[cfg(not(unix))]
fn ensure_permissions(_path: &Path) -> Result<()> {
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{load_at_path, merge_config, ConfigFile, LocalFile, RemoteFile, Strategy};
    use std::fs;
    use std::path::Path;
    use tempfile::TempDir;

    fn restrict_permissions(path: &Path) {
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let mut perms = fs::metadata(path).expect("metadata").permissions();
            perms.set_mode(0o600);
            fs::set_permissions(path, perms).expect("chmod");
        }
    }

    #[test]
    fn merge_config_applies_values() {
        let parsed = ConfigFile {
            strategy: Some(Strategy::Local),
            remote: Some(RemoteFile {
                endpoint: Some("https://script.example.com/macros/s/abc/exec".to_string()),
            }),
            local: Some(LocalFile {
                delay_ms: Some(0),
                entries: Vec::new(),
            }),
        };
        let merged = merge_config(parsed).expect("merge");
        assert_eq!(merged.strategy, Strategy::Local);
        assert_eq!(
            merged.remote.endpoint.as_deref(),
            Some("https://script.example.com/macros/s/abc/exec")
        );
        assert_eq!(merged.local.delay_ms, 0);
    }

    #[test]
    fn merge_config_rejects_excessive_delay() {
        let parsed = ConfigFile {
            strategy: None,
            remote: None,
            local: Some(LocalFile {
                delay_ms: Some(60_000),
                entries: Vec::new(),
            }),
        };
        assert!(merge_config(parsed).is_err());
    }

    #[test]
    fn load_at_path_requires_file_when_requested() {
        let temp = TempDir::new().expect("tempdir");
        let missing = temp.path().join("config.toml");
        let err = load_at_path(&missing, true).unwrap_err();
        assert!(err.to_string().contains("config file not found"));
    }

    #[test]
    fn load_at_path_parses_toml() {
        let temp = TempDir::new().expect("tempdir");
        let path = temp.path().join("config.toml");
        fs::write(
            &path,
            concat!(
                "strategy = \"local\"\n",
                "[local]\n",
                "delay_ms = 0\n",
                "[[local.entries]]\n",
                "student_no = \"20301\"\n",
                "name = \"홍길동\"\n",
                "id = \"s20301@school.edu\"\n",
            ),
        )
        .expect("write config");
        restrict_permissions(&path);

        let config = load_at_path(&path, true).expect("load").expect("config");
        assert_eq!(config.strategy, Strategy::Local);
        assert_eq!(config.local.entries.len(), 1);
        assert_eq!(config.local.entries[0].id, "s20301@school.edu");
    }

    #[test]
    fn load_at_path_rejects_malformed_entry() {
        let temp = TempDir::new().expect("tempdir");
        let path = temp.path().join("config.toml");
        fs::write(
            &path,
            concat!(
                "strategy = \"local\"\n",
                "[[local.entries]]\n",
                "student_no = \"ab\"\n",
                "name = \"홍길동\"\n",
                "id = \"s1@school.edu\"\n",
            ),
        )
        .expect("write config");
        restrict_permissions(&path);

        let err = load_at_path(&path, true).unwrap_err();
        assert!(err.to_string().contains("invalid local entry"));
    }
}
