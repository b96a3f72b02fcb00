//! Config file discovery and layered merging.
//!
//! Resolution order (later overrides earlier):
//! 1. `~/.config/kgraph/config.toml` (user config)
//! 2. `./kgraph.toml` (project-local)
//! 3. CLI arguments (handled externally)

use std::path::{Path, PathBuf};

use crate::{ConfigError, KgraphConfig, Result};

/// Config filename for project-local config.
const PROJECT_CONFIG_FILE: &str = "kgraph.toml";

/// Config filename within the user config directory.
const USER_CONFIG_FILE: &str = "config.toml";

const APP_NAME: &str = "kgraph";

/// Environment variable that overrides the user config directory.
const CONFIG_DIR_ENV: &str = "KGRAPH_CONFIG_DIR";

/// Tracks where each config layer was loaded from.
#[derive(Debug, Clone)]
pub struct ConfigSource {
    pub path: PathBuf,
    /// Whether the file was found and loaded.
    pub loaded: bool,
}

/// Result of config discovery and loading.
#[derive(Debug, Clone)]
pub struct LoadedConfig {
    /// The merged configuration.
    pub config: KgraphConfig,
    /// Sources that were checked, lowest precedence first.
    pub sources: Vec<ConfigSource>,
    /// Problems with individual layers; a broken layer is skipped.
    pub warnings: Vec<String>,
}

impl LoadedConfig {
    /// Paths of sources that were actually loaded.
    pub fn loaded_from(&self) -> Vec<&Path> {
        self.sources
            .iter()
            .filter(|s| s.loaded)
            .map(|s| s.path.as_path())
            .collect()
    }
}

/// Discover and merge all config layers.
pub fn load_config(project_dir: Option<&Path>) -> Result<LoadedConfig> {
    load_config_with_options(project_dir, None)
}

/// Load configuration with explicit control over the user config directory.
///
/// `config_dir` overrides both `KGRAPH_CONFIG_DIR` and the platform default.
pub fn load_config_with_options(
    project_dir: Option<&Path>,
    config_dir: Option<&Path>,
) -> Result<LoadedConfig> {
    let mut config = KgraphConfig::new();
    let mut sources = Vec::new();
    let mut warnings = Vec::new();

    let user_config_path = match config_dir {
        Some(dir) => Some(dir.join(USER_CONFIG_FILE)),
        None => xdg_config_path(),
    };
    if let Some(path) = user_config_path {
        sources.push(load_layer(&mut config, &path, &mut warnings));
    }

    let project_path = project_dir
        .map(|d| d.join(PROJECT_CONFIG_FILE))
        .unwrap_or_else(|| PathBuf::from(PROJECT_CONFIG_FILE));
    sources.push(load_layer(&mut config, &project_path, &mut warnings));

    Ok(LoadedConfig {
        config,
        sources,
        warnings,
    })
}

/// Load config from a specific file path (no discovery).
pub fn load_config_file(path: &Path) -> Result<KgraphConfig> {
    let contents = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadFile {
        path: path.display().to_string(),
        source: e,
    })?;
    KgraphConfig::from_toml(&contents)
}

/// Path of the user config file.
pub fn xdg_config_path() -> Option<PathBuf> {
    xdg_config_dir().map(|d| d.join(USER_CONFIG_FILE))
}

/// The user config directory.
///
/// Checks `KGRAPH_CONFIG_DIR` first, then falls back to the platform default
/// (`~/.config/kgraph` on Linux).
pub fn xdg_config_dir() -> Option<PathBuf> {
    if let Ok(dir) = std::env::var(CONFIG_DIR_ENV)
        && !dir.is_empty()
    {
        return Some(PathBuf::from(dir));
    }
    dirs::config_dir().map(|d| d.join(APP_NAME))
}

/// Merge one file into `config` if it exists. Parse failures become warnings.
fn load_layer(config: &mut KgraphConfig, path: &Path, warnings: &mut Vec<String>) -> ConfigSource {
    let loaded = path.is_file()
        && match load_config_file(path) {
            Ok(layer) => {
                config.merge(layer);
                true
            }
            Err(e) => {
                warnings.push(format!("Failed to load {}: {}", path.display(), e));
                false
            }
        };
    ConfigSource {
        path: path.to_path_buf(),
        loaded,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    use crate::TaggerBackend;

    #[test]
    fn test_load_config_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(
            &path,
            r#"
[tagger]
backend = "jieba"
"#,
        )
        .unwrap();

        let config = load_config_file(&path).unwrap();
        assert_eq!(config.tagger().backend, TaggerBackend::Jieba);
    }

    #[test]
    fn test_load_config_file_not_found() {
        let err = load_config_file(Path::new("/nonexistent/config.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::ReadFile { .. }));
    }

    #[test]
    fn test_load_config_invalid_toml() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "this is not valid toml {{{{").unwrap();

        let err = load_config_file(&path).unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_load_config_no_files() {
        let project = TempDir::new().unwrap();
        let user = TempDir::new().unwrap();

        let loaded = load_config_with_options(Some(project.path()), Some(user.path())).unwrap();
        assert_eq!(loaded.config, KgraphConfig::new());
        assert!(loaded.loaded_from().is_empty());
        assert_eq!(loaded.sources.len(), 2);
    }

    #[test]
    fn test_project_overrides_user() {
        let user = TempDir::new().unwrap();
        let project = TempDir::new().unwrap();

        fs::write(
            user.path().join("config.toml"),
            r#"
[session]
max_sessions = 100

[extraction]
max_relations = 4
"#,
        )
        .unwrap();
        fs::write(
            project.path().join("kgraph.toml"),
            r#"
[session]
max_sessions = 7
"#,
        )
        .unwrap();

        let loaded = load_config_with_options(Some(project.path()), Some(user.path())).unwrap();
        assert_eq!(loaded.config.session().max_sessions, 7);
        assert_eq!(loaded.config.extraction_limits().max_relations, 4);
        assert_eq!(loaded.loaded_from().len(), 2);
    }

    #[test]
    fn test_malformed_layer_warns_but_continues() {
        let user = TempDir::new().unwrap();
        let project = TempDir::new().unwrap();
        fs::write(project.path().join("kgraph.toml"), "not valid toml {{{{").unwrap();

        let loaded = load_config_with_options(Some(project.path()), Some(user.path())).unwrap();
        assert_eq!(loaded.warnings.len(), 1);
        assert!(loaded.warnings[0].contains("Failed to load"));
        assert!(loaded.loaded_from().is_empty());
    }

    #[test]
    fn test_xdg_config_path_shape() {
        if let Some(p) = xdg_config_path() {
            assert!(p.ends_with("config.toml"));
        }
    }
}
