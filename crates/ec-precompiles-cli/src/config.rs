//! Configuration handling for the ecprecompile CLI
//!
//! Priority: CLI flags > environment variables > config file > defaults

use anyhow::{Context, Result};
use ec_precompiles::GasSchedule;
use serde::Deserialize;
use std::{
    fs,
    path::{Path, PathBuf},
};

/// Resolved configuration for CLI commands
pub struct Config {
    pub gas: GasSchedule,
    pub source: Option<PathBuf>,
    pub quiet: bool,
    pub json_output: bool,
}

impl Config {
    /// Load configuration from the config file and CLI args
    pub fn load(common: &super::CommonArgs) -> Result<Self> {
        // An explicit path (flag or env) must exist; the default one is optional
        let (file_config, source) = match &common.config {
            Some(path) => {
                let path = expand_tilde(&path.to_string_lossy());
                (Some(ConfigFile::load(&path)?), Some(path))
            }
            None => match default_config_path() {
                Some(path) if path.exists() => (Some(ConfigFile::load(&path)?), Some(path)),
                _ => (None, None),
            },
        };

        let gas = file_config.and_then(|c| c.gas).unwrap_or_default();
        if let Some(path) = &source {
            log::debug!("Loaded gas schedule from {}", path.display());
        }

        Ok(Self {
            gas,
            source,
            quiet: common.quiet,
            json_output: common.output == super::OutputFormat::Json,
        })
    }
}

/// Configuration file structure
#[derive(Debug, Default, Deserialize)]
struct ConfigFile {
    gas: Option<GasSchedule>,
}

impl ConfigFile {
    fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {:?}", path))?;
        Self::parse(&content).with_context(|| format!("Invalid config file: {:?}", path))
    }

    fn parse(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }
}

/// Get default config file path
fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("ec-precompiles").join("config.toml"))
}

/// Expand ~ to home directory
fn expand_tilde(path: &str) -> PathBuf {
    if let Some(rest) = path.strip_prefix("~/") {
        if let Some(home) = dirs::home_dir() {
            return home.join(rest);
        }
    }
    PathBuf::from(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{CommonArgs, OutputFormat};
    use std::io::Write;

    fn common(config: Option<PathBuf>) -> CommonArgs {
        CommonArgs {
            config,
            output: OutputFormat::Json,
            quiet: true,
        }
    }

    #[test]
    fn test_partial_gas_table_keeps_defaults() {
        let file = ConfigFile::parse("[gas]\npairing_check = 120000\n").unwrap();
        let gas = file.gas.unwrap();
        assert_eq!(gas.pairing_check, 120_000);
        assert_eq!(gas.g1_add, GasSchedule::default().g1_add);
        assert_eq!(gas.plonk_verify, GasSchedule::default().plonk_verify);
    }

    #[test]
    fn test_missing_gas_table() {
        let file = ConfigFile::parse("").unwrap();
        assert!(file.gas.is_none());
    }

    #[test]
    fn test_unknown_types_rejected() {
        assert!(ConfigFile::parse("[gas]\ng1_add = \"cheap\"\n").is_err());
    }

    #[test]
    fn test_load_from_explicit_path() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[gas]\ng2_add = 1\nplonk_verify = 2").unwrap();

        let config = Config::load(&common(Some(file.path().to_path_buf()))).unwrap();
        assert_eq!(config.gas.g2_add, 1);
        assert_eq!(config.gas.plonk_verify, 2);
        assert_eq!(config.gas.g1_add, GasSchedule::default().g1_add);
        assert!(config.json_output);
        assert!(config.quiet);
    }

    #[test]
    fn test_explicit_path_must_exist() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope.toml");
        assert!(Config::load(&common(Some(missing))).is_err());
    }

    #[test]
    fn test_expand_tilde() {
        assert_eq!(expand_tilde("/etc/x.toml"), PathBuf::from("/etc/x.toml"));
        if let Some(home) = dirs::home_dir() {
            assert_eq!(expand_tilde("~/x.toml"), home.join("x.toml"));
        }
    }
}
