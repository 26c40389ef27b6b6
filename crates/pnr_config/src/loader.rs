//! Project manifest loading.

use crate::error::ConfigError;
use crate::types::ProjectConfig;
use std::path::Path;

/// Loads and parses a `pnr.toml` manifest from a project directory.
///
/// Reads `<project_dir>/pnr.toml`. The manifest is entirely optional: every
/// field may be overridden or supplied separately via CLI flags.
pub fn load_config(project_dir: &Path) -> Result<ProjectConfig, ConfigError> {
    let config_path = project_dir.join("pnr.toml");
    let content = std::fs::read_to_string(&config_path)?;
    load_config_from_str(&content)
}

/// Parses a `pnr.toml` manifest from a string.
///
/// Useful for testing without filesystem dependencies.
pub fn load_config_from_str(content: &str) -> Result<ProjectConfig, ConfigError> {
    let config: ProjectConfig =
        toml::from_str(content).map_err(|e| ConfigError::ParseError(e.to_string()))?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_empty_manifest() {
        let config = load_config_from_str("").unwrap();
        assert!(config.paths.netlist.is_none());
    }

    #[test]
    fn parse_full_manifest() {
        let toml = r#"
seed = 7

[paths]
netlist = "counter.blif"
library = "lib/quan.json"
output_dir = "build"
world = "world/"

[placement]
t0 = 500.0
iterations = 2000
generations = 20
grid_spacing = 2

[router]
max_iterations = 5000
"#;
        let config = load_config_from_str(toml).unwrap();
        assert_eq!(config.seed, Some(7));
        assert_eq!(config.paths.netlist.as_deref(), Some("counter.blif"));
        assert_eq!(config.placement.grid_spacing, 2);
        assert_eq!(config.router.max_iterations, 5000);
    }

    #[test]
    fn invalid_toml_errors() {
        let toml = "this is not valid toml {{{}}}";
        let err = load_config_from_str(toml).unwrap_err();
        assert!(matches!(err, ConfigError::ParseError(_)));
    }

    #[test]
    fn io_error_from_nonexistent_dir() {
        let err = load_config(Path::new("/nonexistent/dir")).unwrap_err();
        assert!(matches!(err, ConfigError::IoError(_)));
    }
}
