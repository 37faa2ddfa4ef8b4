use crate::config::Config;
use color_eyre::eyre::WrapErr;
use color_eyre::Result;
use log::info;
use std::fs::File;
use std::path::{Path, PathBuf};

/// Load and parse configuration from a YAML file
pub fn load_config(config_path: &Path) -> Result<Config> {
    info!("Loading configuration from: {:?}", config_path);

    let file = File::open(config_path)
        .wrap_err_with(|| format!("Failed to open configuration file '{}'", config_path.display()))?;

    let config: Config = serde_yaml::from_reader(file)
        .wrap_err_with(|| format!("Failed to parse configuration file '{}'", config_path.display()))?;

    config.validate()?;

    Ok(config)
}

/// CLI arguments that override configuration file settings
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub marker: Option<String>,
    pub output_dir: Option<PathBuf>,
    pub threads: Option<usize>,
    pub sequential: bool,
}

/// Apply CLI overrides to a configuration
pub fn apply_overrides(config: &mut Config, overrides: &CliOverrides) -> Result<()> {
    if let Some(marker) = &overrides.marker {
        info!("Marker overridden from command line: {:?}", marker);
        config.marker = marker.clone();
    }

    if let Some(dir) = &overrides.output_dir {
        config.output.dir = dir.clone();
    }

    if let Some(threads) = overrides.threads {
        config.threads = threads;
    }

    if overrides.sequential {
        config.parallel = false;
    }

    // Re-validate after applying overrides
    config.validate()?;

    Ok(())
}

/// Load the configuration file if one was given, otherwise start from defaults,
/// then apply CLI overrides
pub fn resolve_config(config_path: Option<&Path>, overrides: &CliOverrides) -> Result<Config> {
    let mut config = match config_path {
        Some(path) => load_config(path)?,
        None => Config::default(),
    };
    apply_overrides(&mut config, overrides)?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_load_config() {
        let yaml = r#"
marker: "GOSSIP,"
parallel: false
threads: 4
output:
  dir: "reports"
  json: true
  text: false
"#;

        let mut temp_file = NamedTempFile::new().unwrap();
        write!(temp_file, "{}", yaml).unwrap();

        let config = load_config(temp_file.path()).unwrap();
        assert_eq!(config.marker, "GOSSIP,");
        assert!(!config.parallel);
        assert_eq!(config.threads, 4);
        assert_eq!(config.output.dir, PathBuf::from("reports"));
        assert!(!config.output.text);
    }

    #[test]
    fn test_load_invalid_config() {
        let mut temp_file = NamedTempFile::new().unwrap();
        write!(temp_file, "marker: \"\"\n").unwrap();
        assert!(load_config(temp_file.path()).is_err());
    }

    #[test]
    fn test_load_missing_config() {
        assert!(load_config(Path::new("/nonexistent/gossip-metrics.yaml")).is_err());
    }

    #[test]
    fn test_apply_overrides() {
        let mut config = Config::default();
        let overrides = CliOverrides {
            marker: Some("MARKER,".to_string()),
            output_dir: Some(PathBuf::from("out")),
            threads: Some(2),
            sequential: true,
        };

        apply_overrides(&mut config, &overrides).unwrap();
        assert_eq!(config.marker, "MARKER,");
        assert_eq!(config.output.dir, PathBuf::from("out"));
        assert_eq!(config.threads, 2);
        assert!(!config.parallel);
    }

    #[test]
    fn test_overrides_are_validated() {
        let overrides = CliOverrides {
            marker: Some(String::new()),
            ..CliOverrides::default()
        };
        assert!(resolve_config(None, &overrides).is_err());
    }
}
