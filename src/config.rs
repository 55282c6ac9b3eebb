//! Configuration for artifact storage paths.
//!
//! Configuration sources (highest priority first):
//! 1. Environment variables (ARTIFACTS_HOME, ARTIFACTS_STORE)
//! 2. Config file (.artifacts/config.yaml)
//! 3. Defaults (~/.artifacts, payloads in ~/.artifacts/store)
//!
//! Config file discovery:
//! - Searches current directory and parents for .artifacts/config.yaml
//! - `home` is relative to the .artifacts/ directory, `store` to the project root

use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use anyhow::{Context, Result};
use serde::Deserialize;

/// Global cached configuration (stores Result to handle init errors)
static CONFIG: OnceLock<Result<ResolvedConfig, String>> = OnceLock::new();

const CONFIG_DIR: &str = ".artifacts";
const CONFIG_FILE: &str = "config.yaml";

/// Raw config file schema (matches YAML structure)
#[derive(Debug, Clone, Deserialize)]
pub struct ConfigFile {
    pub version: String,
    #[serde(default)]
    pub paths: PathsConfig,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PathsConfig {
    /// State directory (relative to .artifacts/)
    pub home: Option<String>,
    /// Payload store root (relative to the project root)
    pub store: Option<String>,
}

/// Resolved configuration with absolute paths
#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    /// State directory
    pub home: PathBuf,
    /// Root that relative artifact uris resolve against
    pub store: PathBuf,
    /// Path to config file (if found)
    pub config_file: Option<PathBuf>,
}

/// Find config file by searching current directory and parents
fn find_config_file() -> Option<PathBuf> {
    let mut current = std::env::current_dir().ok()?;

    loop {
        let config_path = current.join(CONFIG_DIR).join(CONFIG_FILE);
        if config_path.exists() {
            return Some(config_path);
        }

        if !current.pop() {
            break;
        }
    }

    None
}

/// Load and parse config file
fn load_config_file(path: &Path) -> Result<ConfigFile> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;

    serde_yaml::from_str(&content)
        .with_context(|| format!("Failed to parse config file: {}", path.display()))
}

/// Resolve a path that may be relative to the config file's parent
fn resolve_path(base: &Path, path_str: &str) -> PathBuf {
    let path = PathBuf::from(path_str);
    if path.is_absolute() {
        path
    } else {
        base.join(path)
            .canonicalize()
            .unwrap_or_else(|_| base.join(path_str))
    }
}

/// Combine a parsed config file (if any) with environment overrides
fn resolve(
    config: Option<(&Path, ConfigFile)>,
    env_home: Option<String>,
    env_store: Option<String>,
    default_home: PathBuf,
) -> ResolvedConfig {
    let Some((config_path, config)) = config else {
        let home = env_home.map(PathBuf::from).unwrap_or(default_home);
        let store = env_store
            .map(PathBuf::from)
            .unwrap_or_else(|| home.join("store"));
        return ResolvedConfig {
            home,
            store,
            config_file: None,
        };
    };

    // .artifacts/ and the project root above it
    let config_dir = config_path.parent().unwrap_or(Path::new("."));
    let base_dir = config_dir.parent().unwrap_or(Path::new("."));

    let home = if let Some(env_home) = env_home {
        PathBuf::from(env_home)
    } else if let Some(ref home_path) = config.paths.home {
        resolve_path(config_dir, home_path)
    } else {
        default_home
    };

    let store = if let Some(env_store) = env_store {
        PathBuf::from(env_store)
    } else if let Some(ref store_path) = config.paths.store {
        resolve_path(base_dir, store_path)
    } else {
        home.join("store")
    };

    ResolvedConfig {
        home,
        store,
        config_file: Some(config_path.to_path_buf()),
    }
}

/// Load configuration from all sources
fn load_config() -> Result<ResolvedConfig> {
    let default_home = dirs::home_dir()
        .context("Failed to determine home directory")?
        .join(CONFIG_DIR);

    let config_file = find_config_file();
    let parsed = match config_file {
        Some(ref path) => Some((path.as_path(), load_config_file(path)?)),
        None => None,
    };

    Ok(resolve(
        parsed,
        std::env::var("ARTIFACTS_HOME").ok(),
        std::env::var("ARTIFACTS_STORE").ok(),
        default_home,
    ))
}

/// Get the global configuration (loads once, then cached)
pub fn config() -> Result<&'static ResolvedConfig> {
    let result = CONFIG.get_or_init(|| load_config().map_err(|e| e.to_string()));

    match result {
        Ok(config) => Ok(config),
        Err(e) => anyhow::bail!("{}", e),
    }
}

/// Force reload configuration (useful for testing)
pub fn reload_config() -> Result<ResolvedConfig> {
    load_config()
}

/// Get the payload store root.
pub fn store_dir() -> Result<PathBuf> {
    Ok(config()?.store.clone())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::TempDir;

    fn write_config(temp: &TempDir, body: &str) -> PathBuf {
        let config_dir = temp.path().join(CONFIG_DIR);
        std::fs::create_dir_all(&config_dir).unwrap();
        let config_path = config_dir.join(CONFIG_FILE);
        let mut file = std::fs::File::create(&config_path).unwrap();
        writeln!(file, "{}", body).unwrap();
        config_path
    }

    #[test]
    fn test_defaults_without_file() {
        let config = resolve(None, None, None, PathBuf::from("/u/.artifacts"));

        assert_eq!(config.home, PathBuf::from("/u/.artifacts"));
        assert_eq!(config.store, PathBuf::from("/u/.artifacts/store"));
        assert!(config.config_file.is_none());
    }

    #[test]
    fn test_env_overrides_without_file() {
        let config = resolve(
            None,
            Some("/env/home".to_string()),
            Some("/env/store".to_string()),
            PathBuf::from("/u/.artifacts"),
        );

        assert_eq!(config.home, PathBuf::from("/env/home"));
        assert_eq!(config.store, PathBuf::from("/env/store"));
    }

    #[test]
    fn test_config_file_parsing() {
        let temp = TempDir::new().unwrap();
        let config_path = write_config(
            &temp,
            r#"
version: "1.0"
paths:
  home: ./
  store: ./payloads
"#,
        );

        let config = load_config_file(&config_path).unwrap();
        assert_eq!(config.version, "1.0");
        assert_eq!(config.paths.home, Some("./".to_string()));
        assert_eq!(config.paths.store, Some("./payloads".to_string()));
    }

    #[test]
    fn test_config_file_absolute_store() {
        let temp = TempDir::new().unwrap();
        let config_path = write_config(
            &temp,
            r#"
version: "1.0"
paths:
  store: /abs/payloads
"#,
        );
        let parsed = load_config_file(&config_path).unwrap();

        let config = resolve(
            Some((config_path.as_path(), parsed)),
            None,
            None,
            PathBuf::from("/u/.artifacts"),
        );
        assert_eq!(config.home, PathBuf::from("/u/.artifacts"));
        assert_eq!(config.store, PathBuf::from("/abs/payloads"));
        assert_eq!(config.config_file, Some(config_path));
    }

    #[test]
    fn test_env_beats_config_file() {
        let temp = TempDir::new().unwrap();
        let config_path = write_config(
            &temp,
            r#"
version: "1.0"
paths:
  store: ./payloads
"#,
        );
        let parsed = load_config_file(&config_path).unwrap();

        let config = resolve(
            Some((config_path.as_path(), parsed)),
            None,
            Some("/env/store".to_string()),
            PathBuf::from("/u/.artifacts"),
        );
        assert_eq!(config.store, PathBuf::from("/env/store"));
    }

    #[test]
    fn test_resolve_relative_path() {
        let base = PathBuf::from("/home/user/project");

        assert_eq!(
            resolve_path(&base, "./subdir"),
            PathBuf::from("/home/user/project/subdir")
        );
        assert_eq!(
            resolve_path(&base, "/absolute/path"),
            PathBuf::from("/absolute/path")
        );
    }
}
