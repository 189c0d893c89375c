use std::fs;
use std::io::{BufReader, Read};
use std::path::{Path, PathBuf};

use super::core::{CohesionWeights, ContextConfig, FragmentationConfig};
use crate::errors::{Error, Result};

/// Configuration file searched for in the working directory and its ancestors
pub const CONFIG_FILE_NAME: &str = ".contextmap.toml";

const MAX_TRAVERSAL_DEPTH: usize = 10;

/// Pure function to read config file contents
pub(crate) fn read_config_file(path: &Path) -> std::result::Result<String, std::io::Error> {
    let file = fs::File::open(path)?;
    let mut reader = BufReader::new(file);
    let mut contents = String::new();
    reader.read_to_string(&mut contents)?;
    Ok(contents)
}

/// Pure function to parse and validate config from TOML string
///
/// Invalid weight sections are replaced by their defaults with a warning
/// rather than rejecting the whole file.
pub fn parse_and_validate_config(contents: &str) -> Result<ContextConfig> {
    let mut config = toml::from_str::<ContextConfig>(contents)
        .map_err(|e| Error::configuration(format!("Failed to parse {}: {}", CONFIG_FILE_NAME, e)))?;

    if let Err(e) = config.cohesion.validate() {
        log::warn!("Invalid cohesion weights: {}. Using defaults.", e);
        config.cohesion = CohesionWeights::default();
    }

    if let Err(e) = config.fragmentation.validate() {
        log::warn!("Invalid fragmentation options: {}. Using defaults.", e);
        config.fragmentation = FragmentationConfig::default();
    }

    Ok(config)
}

/// Load and validate a specific config file
pub fn load_config_from_path(config_path: &Path) -> Result<ContextConfig> {
    let contents = read_config_file(config_path)
        .map_err(|e| Error::file_system("Failed to read config file", config_path, e))?;
    parse_and_validate_config(&contents)
}

/// Try loading config from a specific path, logging anything but a missing file
pub(crate) fn try_load_config_from_path(config_path: &Path) -> Option<ContextConfig> {
    match load_config_from_path(config_path) {
        Ok(config) => {
            log::debug!("Loaded config from {}", config_path.display());
            Some(config)
        }
        Err(e) if e.is_not_found() => None,
        Err(e) => {
            log::warn!("{}. Using defaults.", e);
            None
        }
    }
}

/// Pure function to generate directory ancestors up to a depth limit
pub fn directory_ancestors(start: PathBuf, max_depth: usize) -> impl Iterator<Item = PathBuf> {
    std::iter::successors(Some(start), |dir| {
        let mut parent = dir.clone();
        if parent.pop() {
            Some(parent)
        } else {
            None
        }
    })
    .take(max_depth)
}

/// Find the nearest config file starting at `start`
pub fn load_config_from(start: &Path) -> ContextConfig {
    directory_ancestors(start.to_path_buf(), MAX_TRAVERSAL_DEPTH)
        .map(|dir| dir.join(CONFIG_FILE_NAME))
        .find_map(|path| try_load_config_from_path(&path))
        .unwrap_or_else(|| {
            log::debug!(
                "No config found after checking {} directories. Using default config.",
                MAX_TRAVERSAL_DEPTH
            );
            ContextConfig::default()
        })
}

pub fn load_config() -> ContextConfig {
    match std::env::current_dir() {
        Ok(dir) => load_config_from(&dir),
        Err(e) => {
            log::warn!(
                "Failed to get current directory: {}. Using default config.",
                e
            );
            ContextConfig::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use indoc::indoc;
    use tempfile::TempDir;

    #[test]
    fn test_parse_full_config() {
        let config = parse_and_validate_config(indoc! {r#"
            [cohesion]
            import_based = 0.6
            structural = 0.2
            domain_based = 0.2

            [fragmentation]
            use_log_scale = true
            log_base = 10.0

            [thresholds]
            max_depth = 7

            [extraction]
            builtin_prefix = "bun:"
            extra_domain_keywords = ["billing"]

            [ignore]
            patterns = ["**/generated/**"]
        "#})
        .unwrap();

        assert_eq!(config.cohesion.import_based, 0.6);
        assert!(config.fragmentation.use_log_scale);
        assert_eq!(config.fragmentation.log_base, 10.0);
        assert_eq!(config.thresholds.max_depth, 7);
        assert_eq!(config.thresholds.max_context_budget, 25_000);
        assert_eq!(config.extraction.builtin_prefix, "bun:");
        assert_eq!(config.extraction.extra_domain_keywords, vec!["billing"]);
        assert!(config.extraction.auto_detect_keywords);
        assert_eq!(config.get_ignore_patterns(), vec!["**/generated/**"]);
    }

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = parse_and_validate_config("").unwrap();
        assert_eq!(config, ContextConfig::default());
    }

    #[test]
    fn test_invalid_weights_fall_back_to_defaults() {
        let config = parse_and_validate_config(indoc! {r#"
            [cohesion]
            import_based = 0.0
            structural = 0.0
            domain_based = 0.0
        "#})
        .unwrap();
        assert_eq!(config.cohesion, CohesionWeights::default());
    }

    #[test]
    fn test_malformed_toml_is_an_error() {
        let result = parse_and_validate_config("[cohesion\nimport_based = ");
        assert!(matches!(result, Err(Error::Configuration(_))));
    }

    #[test]
    fn test_load_config_from_ancestor_directory() {
        let temp = TempDir::new().unwrap();
        fs::write(
            temp.path().join(CONFIG_FILE_NAME),
            "[thresholds]\nmax_depth = 9\n",
        )
        .unwrap();
        let nested = temp.path().join("packages").join("web");
        fs::create_dir_all(&nested).unwrap();

        let config = load_config_from(&nested);
        assert_eq!(config.thresholds.max_depth, 9);
    }

    #[test]
    fn test_load_config_from_path_missing_file() {
        let temp = TempDir::new().unwrap();
        let err = load_config_from_path(&temp.path().join("absent.toml")).unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn test_directory_ancestors_respects_depth() {
        let ancestors: Vec<PathBuf> =
            directory_ancestors(PathBuf::from("/a/b/c/d"), 2).collect();
        assert_eq!(
            ancestors,
            vec![PathBuf::from("/a/b/c/d"), PathBuf::from("/a/b/c")]
        );
    }
}
