//! Configuration file discovery and parsing
//!
//! Searches for `.config/sass-bridge.yaml` walking up from the current
//! directory. The project root is the parent of `.config/`.

use std::collections::HashMap;
use std::env;

use camino::{Utf8Path, Utf8PathBuf};
use eyre::{Result, eyre};
use facet::Facet;
use sass_bridge::{DirHost, OutputStyle, PrefixRouter, SassRenderer};

const CONFIG_DIR: &str = ".config";
const CONFIG_FILE: &str = "sass-bridge.yaml";

/// Configuration from `.config/sass-bridge.yaml`
#[derive(Debug, Clone, Facet)]
#[facet(rename_all = "snake_case")]
pub struct BridgeConfig {
    /// Directory imports are served from (relative to project root)
    pub root: String,

    /// Output style: `expanded` (default) or `compressed`
    #[facet(default)]
    pub style: Option<String>,

    /// Import prefixes grass falls back to when an import is not found next
    /// to the importing stylesheet (e.g. `vendor`)
    #[facet(default)]
    pub load_paths: Option<Vec<String>>,

    /// Import prefix -> directory (relative to project root).
    /// `theme/: themes/default/` serves `theme/colors` from
    /// `themes/default/colors.scss`.
    #[facet(default)]
    pub mounts: Option<HashMap<String, String>>,
}

/// Discovered configuration with resolved paths
#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    /// Project root (parent of .config/)
    pub project_root: Utf8PathBuf,
    /// Absolute path of the import root
    pub root: Utf8PathBuf,
    pub style: OutputStyle,
    pub load_paths: Vec<String>,
    /// Mount prefix -> absolute directory, in no particular order
    pub mounts: Vec<(String, Utf8PathBuf)>,
}

impl ResolvedConfig {
    /// Discover and load configuration from current directory
    pub fn discover() -> Result<Option<Self>> {
        match find_config_file()? {
            Some(path) => Ok(Some(load_config(&path)?)),
            None => Ok(None),
        }
    }

    /// Load configuration from a specific project path
    pub fn discover_from(project_path: &Utf8Path) -> Result<Option<Self>> {
        let config_file = project_path.join(CONFIG_DIR).join(CONFIG_FILE);
        if config_file.exists() {
            Ok(Some(load_config(&config_file)?))
        } else {
            Ok(None)
        }
    }

    /// Resolve a parsed configuration against a project root
    pub fn resolve(config: BridgeConfig, project_root: Utf8PathBuf) -> Result<Self> {
        let style = match config.style.as_deref() {
            Some(style) => style.parse::<OutputStyle>().map_err(|e| eyre!("Invalid style: {e}"))?,
            None => OutputStyle::default(),
        };

        let root = project_root.join(&config.root);

        let mounts = config
            .mounts
            .unwrap_or_default()
            .into_iter()
            .map(|(prefix, dir)| (prefix, project_root.join(dir)))
            .collect();

        Ok(ResolvedConfig {
            root,
            style,
            load_paths: config.load_paths.unwrap_or_default(),
            mounts,
            project_root,
        })
    }

    /// The host serving imports: one directory per mount, the import root
    /// for everything else
    pub fn host(&self) -> PrefixRouter {
        self.mounts
            .iter()
            .fold(PrefixRouter::new(), |router, (prefix, dir)| {
                router.route(prefix.clone(), DirHost::new(dir.clone()))
            })
            .fallback(DirHost::new(self.root.clone()))
    }

    pub fn renderer(&self) -> SassRenderer {
        self.load_paths
            .iter()
            .fold(SassRenderer::new().style(self.style), |renderer, path| {
                renderer.load_path(path.as_str())
            })
    }
}

/// Search for `.config/sass-bridge.yaml` walking up from current directory
fn find_config_file() -> Result<Option<Utf8PathBuf>> {
    let cwd = env::current_dir()?;
    let cwd = Utf8PathBuf::try_from(cwd).map_err(|e| {
        eyre!(
            "Current directory is not valid UTF-8: {}",
            e.as_path().display()
        )
    })?;

    let mut current = cwd.as_path();

    loop {
        let config_file = current.join(CONFIG_DIR).join(CONFIG_FILE);
        if config_file.exists() {
            return Ok(Some(config_file));
        }

        match current.parent() {
            Some(parent) => current = parent,
            None => return Ok(None),
        }
    }
}

/// Load and resolve configuration from a config file path
fn load_config(config_path: &Utf8Path) -> Result<ResolvedConfig> {
    let content = fs_err::read_to_string(config_path)?;

    let config: BridgeConfig = facet_yaml::from_str(&content)
        .map_err(|e| eyre!("Failed to parse {}: {}", config_path, e))?;

    // Project root is the parent of .config/
    let config_dir = config_path
        .parent()
        .ok_or_else(|| eyre!("Config file has no parent directory"))?;
    let root = config_dir
        .parent()
        .ok_or_else(|| eyre!(".config directory has no parent"))?
        .to_owned();

    tracing::debug!(config = %config_path, "loaded configuration");
    ResolvedConfig::resolve(config, root)
}

#[cfg(test)]
mod tests {
    use super::*;
    use sass_bridge::{Retrieval, Retrieve};

    #[test]
    fn test_parse_config() {
        let yaml = r#"
root: styles/
"#;

        let config: BridgeConfig = facet_yaml::from_str(yaml).unwrap();
        assert_eq!(config.root, "styles/");
        assert!(config.style.is_none());
        assert!(config.mounts.is_none());
    }

    #[test]
    fn test_parse_full_config() {
        let yaml = r#"
root: styles/
style: compressed
load_paths:
  - vendor
mounts:
  "theme/": themes/default/
"#;

        let config: BridgeConfig = facet_yaml::from_str(yaml).unwrap();
        let resolved = ResolvedConfig::resolve(config, Utf8PathBuf::from("/project")).unwrap();
        assert_eq!(resolved.root, Utf8PathBuf::from("/project/styles/"));
        assert_eq!(resolved.style, OutputStyle::Compressed);
        assert_eq!(resolved.load_paths, vec!["vendor".to_string()]);
        assert_eq!(
            resolved.mounts,
            vec![(
                "theme/".to_string(),
                Utf8PathBuf::from("/project/themes/default/")
            )]
        );
    }

    #[test]
    fn test_invalid_style() {
        let config = BridgeConfig {
            root: ".".to_string(),
            style: Some("nested".to_string()),
            load_paths: None,
            mounts: None,
        };
        let err = ResolvedConfig::resolve(config, Utf8PathBuf::from("/p")).unwrap_err();
        assert!(err.to_string().contains("unknown output style `nested`"));
    }

    #[test]
    fn test_discover_from_project() {
        let dir = tempfile::tempdir().unwrap();
        let project = Utf8PathBuf::try_from(dir.path().to_path_buf()).unwrap();
        fs_err::create_dir_all(project.join(".config")).unwrap();
        fs_err::create_dir_all(project.join("styles")).unwrap();
        fs_err::create_dir_all(project.join("themes/dark")).unwrap();
        fs_err::write(
            project.join(".config/sass-bridge.yaml"),
            "root: styles\nmounts:\n  \"theme/\": themes/dark\n",
        )
        .unwrap();
        fs_err::write(project.join("styles/_base.scss"), "a{}").unwrap();
        fs_err::write(project.join("themes/dark/_colors.scss"), "$bg: black;").unwrap();

        let resolved = ResolvedConfig::discover_from(&project).unwrap().unwrap();
        assert_eq!(resolved.project_root, project);

        let host = resolved.host();
        assert_eq!(host.retrieve("_base.scss"), Retrieval::found("a{}"));
        assert_eq!(
            host.retrieve("theme/_colors.scss"),
            Retrieval::found("$bg: black;")
        );
    }

    #[test]
    fn test_discover_from_without_config() {
        let dir = tempfile::tempdir().unwrap();
        let project = Utf8PathBuf::try_from(dir.path().to_path_buf()).unwrap();
        assert!(ResolvedConfig::discover_from(&project).unwrap().is_none());
    }
}
