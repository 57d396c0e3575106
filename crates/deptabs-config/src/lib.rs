//! Configuration management for deptabs.
//!
//! Parses `deptabs.toml` configuration files with serde and provides
//! auto-discovery of config files in parent directories.
//!
//! CLI settings can be applied during load via [`CliSettings`].
//!
//! ## Environment Variable Expansion
//!
//! String configuration values support environment variable expansion:
//!
//! - `${VAR}` - expands to the value of VAR, errors if unset
//! - `${VAR:-default}` - expands to VAR if set, otherwise uses default
//!
//! Expanded fields:
//! - `site.source_dir`
//! - `site.output_dir`
//! - `tabs.id_prefix`

mod expand;

use serde::Deserialize;
use std::path::{Path, PathBuf};

/// CLI settings that override configuration file values.
///
/// All fields are optional. Only non-None values override the loaded config.
#[derive(Debug, Default)]
pub struct CliSettings {
    /// Override rendered site directory.
    pub source_dir: Option<PathBuf>,
    /// Override output directory.
    pub output_dir: Option<PathBuf>,
}

/// Configuration filename to search for.
const CONFIG_FILENAME: &str = "deptabs.toml";

pub use deptabs_renderer::{DEFAULT_ID_PREFIX, DEFAULT_SCOPE};

/// Application configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Site configuration (paths are relative strings from TOML).
    site: SiteConfigRaw,
    /// Tab widget configuration.
    pub tabs: TabsConfig,

    /// Resolved site configuration (set after loading).
    #[serde(skip)]
    pub site_resolved: SiteConfig,
    /// Path to the config file (set after loading).
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self::default_with_base(Path::new("."))
    }
}

/// Raw site configuration as parsed from TOML (paths as strings).
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct SiteConfigRaw {
    source_dir: Option<String>,
    output_dir: Option<String>,
    include: Option<Vec<String>>,
}

/// Resolved site configuration with absolute paths.
#[derive(Debug, Default)]
pub struct SiteConfig {
    /// Directory holding the rendered HTML pages.
    pub source_dir: PathBuf,
    /// Directory to write transformed pages to. `None` rewrites in place.
    pub output_dir: Option<PathBuf>,
    /// Glob patterns, relative to `source_dir`, selecting pages to process.
    pub include: Vec<String>,
}

impl SiteConfig {
    /// Destination path for a page located at `page`.
    ///
    /// Mirrors the page's path relative to `source_dir` under `output_dir`.
    /// Pages outside `source_dir` keep their file name only.
    #[must_use]
    pub fn destination(&self, page: &Path) -> PathBuf {
        let Some(output_dir) = &self.output_dir else {
            return page.to_path_buf();
        };
        let page = absolute(page);
        match page.strip_prefix(absolute(&self.source_dir)) {
            Ok(relative) => output_dir.join(relative),
            Err(_) => output_dir.join(page.file_name().unwrap_or(page.as_os_str())),
        }
    }
}

/// Make `path` absolute against the working directory, without touching the
/// filesystem. Falls back to `path` itself if the working directory is gone.
fn absolute(path: &Path) -> PathBuf {
    std::path::absolute(path).unwrap_or_else(|_| path.to_path_buf())
}

fn default_include() -> Vec<String> {
    vec!["**/*.html".to_owned()]
}

/// Tab widget configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct TabsConfig {
    /// Prefix of generated panel ids (`<prefix><kind>_<n>`).
    pub id_prefix: String,
    /// Scope used when the dependency declares none.
    pub default_scope: String,
}

impl Default for TabsConfig {
    fn default() -> Self {
        Self {
            id_prefix: DEFAULT_ID_PREFIX.to_owned(),
            default_scope: DEFAULT_SCOPE.to_owned(),
        }
    }
}

/// Configuration error.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// File not found.
    #[error("Configuration file not found: {}", .0.display())]
    NotFound(PathBuf),
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parsing error.
    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),
    /// Validation error.
    #[error("Configuration error: {0}")]
    Validation(String),
    /// Environment variable error during expansion.
    #[error("Environment variable error in {field}: {message}")]
    EnvVar {
        /// Config field path (e.g., "`site.source_dir`").
        field: String,
        /// Error message (e.g., "${`SITE_DIR`} not set").
        message: String,
    },
}

/// Require a string field to be non-empty.
fn require_non_empty(value: &str, field: &str) -> Result<(), ConfigError> {
    if value.is_empty() {
        return Err(ConfigError::Validation(format!("{field} cannot be empty")));
    }
    Ok(())
}

impl Config {
    /// Load configuration from file with optional CLI settings.
    ///
    /// If `config_path` is provided, loads from that file.
    /// Otherwise, searches for `deptabs.toml` in current directory and parents.
    ///
    /// CLI settings are applied after loading and path resolution, allowing CLI
    /// arguments to take precedence over config file values.
    ///
    /// # Errors
    ///
    /// Returns error if explicit `config_path` doesn't exist or parsing fails.
    pub fn load(
        config_path: Option<&Path>,
        cli_settings: Option<&CliSettings>,
    ) -> Result<Self, ConfigError> {
        let mut config = if let Some(path) = config_path {
            if !path.exists() {
                return Err(ConfigError::NotFound(path.to_path_buf()));
            }
            Self::load_from_file(path)?
        } else if let Some(discovered) = Self::discover_config() {
            Self::load_from_file(&discovered)?
        } else {
            Self::default_with_cwd()
        };

        if let Some(settings) = cli_settings {
            config.apply_cli_settings(settings);
        }

        Ok(config)
    }

    /// Apply CLI settings to the configuration.
    fn apply_cli_settings(&mut self, settings: &CliSettings) {
        if let Some(source_dir) = &settings.source_dir {
            self.site_resolved.source_dir = absolute(source_dir);
        }
        if let Some(output_dir) = &settings.output_dir {
            self.site_resolved.output_dir = Some(absolute(output_dir));
        }
    }

    /// Search for config file in current directory and parents.
    fn discover_config() -> Option<PathBuf> {
        let mut current = std::env::current_dir().ok()?;
        loop {
            let candidate = current.join(CONFIG_FILENAME);
            if candidate.exists() {
                return Some(candidate);
            }
            if !current.pop() {
                return None;
            }
        }
    }

    /// Create default config with paths relative to current working directory.
    fn default_with_cwd() -> Self {
        let cwd = std::env::current_dir().unwrap_or_default();
        Self::default_with_base(&cwd)
    }

    /// Create default config with paths relative to given base directory.
    fn default_with_base(base: &Path) -> Self {
        Self {
            site: SiteConfigRaw::default(),
            tabs: TabsConfig::default(),
            site_resolved: SiteConfig {
                source_dir: base.to_path_buf(),
                output_dir: None,
                include: default_include(),
            },
            config_path: None,
        }
    }

    /// Load configuration from a specific file.
    fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let mut config: Self = toml::from_str(&content)?;

        // Expand environment variables before path resolution
        config.expand_env_vars()?;

        let config_dir = path.parent().unwrap_or(Path::new("."));
        config.resolve_paths(config_dir);
        config.config_path = Some(path.to_path_buf());

        config.validate()?;

        Ok(config)
    }

    /// Validate configuration values.
    ///
    /// Called automatically after loading from file.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if any validation fails.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.validate_site()?;
        self.validate_tabs()?;
        Ok(())
    }

    fn validate_site(&self) -> Result<(), ConfigError> {
        if self.site_resolved.include.is_empty() {
            return Err(ConfigError::Validation(
                "site.include must list at least one pattern".to_owned(),
            ));
        }
        for pattern in &self.site_resolved.include {
            require_non_empty(pattern, "site.include")?;
        }
        Ok(())
    }

    fn validate_tabs(&self) -> Result<(), ConfigError> {
        require_non_empty(&self.tabs.id_prefix, "tabs.id_prefix")?;
        require_non_empty(&self.tabs.default_scope, "tabs.default_scope")?;

        // The prefix ends up inside id and href attributes.
        if self
            .tabs
            .id_prefix
            .chars()
            .any(|c| c.is_whitespace() || matches!(c, '"' | '\'' | '#'))
        {
            return Err(ConfigError::Validation(
                "tabs.id_prefix cannot contain whitespace, quotes or '#'".to_owned(),
            ));
        }

        Ok(())
    }

    /// Expand environment variable references in configuration strings.
    fn expand_env_vars(&mut self) -> Result<(), ConfigError> {
        if let Some(ref dir) = self.site.source_dir {
            self.site.source_dir = Some(expand::expand_env(dir, "site.source_dir")?);
        }
        if let Some(ref dir) = self.site.output_dir {
            self.site.output_dir = Some(expand::expand_env(dir, "site.output_dir")?);
        }
        self.tabs.id_prefix = expand::expand_env(&self.tabs.id_prefix, "tabs.id_prefix")?;
        Ok(())
    }

    /// Resolve relative paths to absolute paths based on config directory.
    ///
    /// A bare `deptabs.toml` has an empty parent, so the result is made
    /// absolute against the working directory as well.
    fn resolve_paths(&mut self, config_dir: &Path) {
        self.site_resolved = SiteConfig {
            source_dir: absolute(
                &config_dir.join(self.site.source_dir.as_deref().unwrap_or(".")),
            ),
            output_dir: self
                .site
                .output_dir
                .as_deref()
                .map(|d| absolute(&config_dir.join(d))),
            include: self.site.include.clone().unwrap_or_else(default_include),
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_default_config() {
        let config = Config::default_with_base(Path::new("/test"));
        assert_eq!(config.site_resolved.source_dir, PathBuf::from("/test"));
        assert_eq!(config.site_resolved.output_dir, None);
        assert_eq!(config.site_resolved.include, vec!["**/*.html".to_owned()]);
        assert_eq!(config.tabs.id_prefix, "__generated_code_tab_");
        assert_eq!(config.tabs.default_scope, "compile");
    }

    #[test]
    fn test_parse_minimal_config() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.tabs.id_prefix, DEFAULT_ID_PREFIX);
        assert_eq!(config.tabs.default_scope, DEFAULT_SCOPE);
    }

    #[test]
    fn test_parse_tabs_config() {
        let toml = r#"
[tabs]
id_prefix = "deps_"
default_scope = "runtime"
"#;
        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.tabs.id_prefix, "deps_");
        assert_eq!(config.tabs.default_scope, "runtime");
    }

    #[test]
    fn test_resolve_paths() {
        let toml = r#"
[site]
source_dir = "build/site"
output_dir = "build/out"
include = ["docs/**/*.html"]
"#;
        let mut config: Config = toml::from_str(toml).unwrap();
        config.resolve_paths(Path::new("/project"));

        assert_eq!(
            config.site_resolved.source_dir,
            PathBuf::from("/project/build/site")
        );
        assert_eq!(
            config.site_resolved.output_dir,
            Some(PathBuf::from("/project/build/out"))
        );
        assert_eq!(config.site_resolved.include, vec!["docs/**/*.html".to_owned()]);
    }

    #[test]
    fn test_resolve_paths_defaults() {
        let mut config: Config = toml::from_str("").unwrap();
        config.resolve_paths(Path::new("/project"));

        assert_eq!(config.site_resolved.source_dir, PathBuf::from("/project"));
        assert_eq!(config.site_resolved.output_dir, None);
        assert_eq!(config.site_resolved.include, default_include());
    }

    #[test]
    fn test_cli_settings_override() {
        let mut config = Config::default_with_base(Path::new("/test"));
        config.apply_cli_settings(&CliSettings {
            source_dir: Some(PathBuf::from("/other/site")),
            output_dir: Some(PathBuf::from("/other/out")),
        });

        assert_eq!(config.site_resolved.source_dir, PathBuf::from("/other/site"));
        assert_eq!(
            config.site_resolved.output_dir,
            Some(PathBuf::from("/other/out"))
        );
    }

    #[test]
    fn test_tabs_defaults_match_transformer_defaults() {
        let tabs = TabsConfig::default();
        assert_eq!(tabs.id_prefix, deptabs_renderer::DEFAULT_ID_PREFIX);
        assert_eq!(tabs.default_scope, deptabs_renderer::DEFAULT_SCOPE);
    }

    #[test]
    fn test_cli_settings_relative_dirs_become_absolute() {
        let cwd = std::env::current_dir().unwrap();
        let mut config = Config::default_with_base(Path::new("/test"));
        config.apply_cli_settings(&CliSettings {
            source_dir: Some(PathBuf::from("build/site")),
            output_dir: Some(PathBuf::from("build/out")),
        });

        assert_eq!(config.site_resolved.source_dir, cwd.join("build/site"));
        assert_eq!(
            config.site_resolved.output_dir,
            Some(cwd.join("build/out"))
        );
    }

    #[test]
    fn test_resolve_paths_bare_config_filename() {
        let cwd = std::env::current_dir().unwrap();
        let mut config: Config = toml::from_str("[site]\nsource_dir = \"site\"\n").unwrap();
        // Parent of `deptabs.toml` is the empty path.
        config.resolve_paths(Path::new("deptabs.toml").parent().unwrap());

        assert_eq!(config.site_resolved.source_dir, cwd.join("site"));
    }

    #[test]
    fn test_validate_empty_prefix() {
        let mut config = Config::default_with_base(Path::new("/test"));
        config.tabs.id_prefix = String::new();

        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("tabs.id_prefix cannot be empty"));
    }

    #[test]
    fn test_validate_prefix_with_quote() {
        let mut config = Config::default_with_base(Path::new("/test"));
        config.tabs.id_prefix = "tab\"x".to_owned();

        assert!(matches!(config.validate(), Err(ConfigError::Validation(_))));
    }

    #[test]
    fn test_validate_empty_scope() {
        let mut config = Config::default_with_base(Path::new("/test"));
        config.tabs.default_scope = String::new();

        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("tabs.default_scope"));
    }

    #[test]
    fn test_validate_empty_include() {
        let mut config = Config::default_with_base(Path::new("/test"));
        config.site_resolved.include.clear();

        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("site.include"));
    }

    #[test]
    fn test_destination_in_place() {
        let site = SiteConfig {
            source_dir: PathBuf::from("/site"),
            output_dir: None,
            include: default_include(),
        };
        assert_eq!(
            site.destination(Path::new("/site/docs/index.html")),
            PathBuf::from("/site/docs/index.html")
        );
    }

    #[test]
    fn test_destination_mirrors_relative_path() {
        let site = SiteConfig {
            source_dir: PathBuf::from("/site"),
            output_dir: Some(PathBuf::from("/out")),
            include: default_include(),
        };
        assert_eq!(
            site.destination(Path::new("/site/docs/index.html")),
            PathBuf::from("/out/docs/index.html")
        );
        assert_eq!(
            site.destination(Path::new("/elsewhere/page.html")),
            PathBuf::from("/out/page.html")
        );
    }

    #[test]
    fn test_destination_relative_source_dir_with_absolute_page() {
        let cwd = std::env::current_dir().unwrap();
        let site = SiteConfig {
            source_dir: PathBuf::from("site"),
            output_dir: Some(PathBuf::from("out")),
            include: default_include(),
        };

        assert_eq!(
            site.destination(&cwd.join("site/guide/a.html")),
            PathBuf::from("out/guide/a.html")
        );
        assert_eq!(
            site.destination(Path::new("site/api/a.html")),
            PathBuf::from("out/api/a.html")
        );
    }

    #[test]
    fn test_load_explicit_missing_file() {
        let err = Config::load(Some(Path::new("/nonexistent/deptabs.toml")), None).unwrap_err();
        assert!(matches!(err, ConfigError::NotFound(_)));
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("deptabs.toml");
        std::fs::write(
            &path,
            r#"
[site]
source_dir = "${DEPTABS_TEST_SURELY_UNSET:-site}"

[tabs]
default_scope = "test"
"#,
        )
        .unwrap();

        let config = Config::load(Some(&path), None).unwrap();
        assert_eq!(config.site_resolved.source_dir, dir.path().join("site"));
        assert_eq!(config.tabs.default_scope, "test");
        assert_eq!(config.config_path, Some(path));
    }

    #[test]
    fn test_load_invalid_toml() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("deptabs.toml");
        std::fs::write(&path, "[tabs\nid_prefix = 1").unwrap();

        let err = Config::load(Some(&path), None).unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }
}
