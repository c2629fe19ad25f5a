//! Configuration management and validation.
//!
//! Holds the input and output locations, the fixture provenance tags and
//! report settings. Defaults reproduce the fixed file names of the registry
//! release; the CLI layers its overrides on top.

use crate::constants::{
    DEFAULT_INPUT_FILE, DEFAULT_SAMPLE_COUNT, FIXTURE_FORMAT_VERSION, FIXTURE_SOURCE,
    FIXTURES_OUTPUT_FILE, REGISTRY_OUTPUT_FILE,
};
use crate::error::{IbanRegistryError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Component, Path, PathBuf};
use tracing::debug;

/// Provenance tags written into the fixture metadata block
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FixtureMetadataConfig {
    /// Where the registry data came from
    pub source: String,

    /// Registry release the fixtures were generated from
    pub format_version: String,
}

impl Default for FixtureMetadataConfig {
    fn default() -> Self {
        Self {
            source: FIXTURE_SOURCE.to_string(),
            format_version: FIXTURE_FORMAT_VERSION.to_string(),
        }
    }
}

/// Converter configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistryConfig {
    /// Registry text release to read
    pub input_path: PathBuf,

    /// Directory both JSON outputs are written to
    pub output_dir: PathBuf,

    /// File name of the full registry output
    pub registry_file: String,

    /// File name of the fixture output
    pub fixtures_file: String,

    /// Rows shown in the console sample table
    pub sample_count: usize,

    /// Print the summary report after conversion
    pub show_report: bool,

    pub fixture_metadata: FixtureMetadataConfig,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            input_path: PathBuf::from(DEFAULT_INPUT_FILE),
            output_dir: PathBuf::from("."),
            registry_file: REGISTRY_OUTPUT_FILE.to_string(),
            fixtures_file: FIXTURES_OUTPUT_FILE.to_string(),
            sample_count: DEFAULT_SAMPLE_COUNT,
            show_report: true,
            fixture_metadata: FixtureMetadataConfig::default(),
        }
    }
}

impl RegistryConfig {
    /// Create configuration with a custom input file
    pub fn with_input_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.input_path = path.into();
        self
    }

    /// Create configuration with a custom output directory
    pub fn with_output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.output_dir = dir.into();
        self
    }

    /// Set the number of sample rows in the report
    pub fn with_sample_count(mut self, count: usize) -> Self {
        self.sample_count = count;
        self
    }

    /// Disable the console summary report
    pub fn without_report(mut self) -> Self {
        self.show_report = false;
        self
    }

    /// Full path of the registry output
    pub fn registry_output_path(&self) -> PathBuf {
        self.output_dir.join(&self.registry_file)
    }

    /// Full path of the fixture output
    pub fn fixtures_output_path(&self) -> PathBuf {
        self.output_dir.join(&self.fixtures_file)
    }

    /// Validate configuration for consistency
    pub fn validate(&self) -> Result<()> {
        if self.input_path.as_os_str().is_empty() {
            return Err(IbanRegistryError::configuration("Input path must not be empty"));
        }

        for (name, file) in [
            ("registry", &self.registry_file),
            ("fixtures", &self.fixtures_file),
        ] {
            if file.trim().is_empty() {
                return Err(IbanRegistryError::configuration(format!(
                    "Output file name for {} must not be empty",
                    name
                )));
            }
            // Exactly one normal component: no directories, no "." or ".."
            let mut components = Path::new(file).components();
            let plain = matches!(
                (components.next(), components.next()),
                (Some(Component::Normal(_)), None)
            );
            if !plain {
                return Err(IbanRegistryError::configuration(format!(
                    "Output file name for {} must be a plain file name, got '{}'",
                    name, file
                )));
            }
        }

        if self.registry_file == self.fixtures_file {
            return Err(IbanRegistryError::configuration(
                "Registry and fixture outputs must use different file names",
            ));
        }

        if self.sample_count == 0 {
            return Err(IbanRegistryError::configuration(
                "Sample count must be at least 1",
            ));
        }

        debug!("Configuration validated: {:?}", self);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = RegistryConfig::default();
        assert_eq!(config.input_path, PathBuf::from("iban-registry-100.txt"));
        assert_eq!(
            config.registry_output_path(),
            PathBuf::from("./iban_registry_full.json")
        );
        assert_eq!(
            config.fixtures_output_path(),
            PathBuf::from("./iban_test_fixtures.json")
        );
        assert_eq!(config.sample_count, 15);
        assert!(config.show_report);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_builder_methods() {
        let config = RegistryConfig::default()
            .with_input_path("/data/registry.txt")
            .with_output_dir("/tmp/out")
            .with_sample_count(5)
            .without_report();

        assert_eq!(config.input_path, PathBuf::from("/data/registry.txt"));
        assert_eq!(
            config.registry_output_path(),
            PathBuf::from("/tmp/out/iban_registry_full.json")
        );
        assert_eq!(config.sample_count, 5);
        assert!(!config.show_report);
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let config = RegistryConfig::default().with_sample_count(0);
        assert!(matches!(
            config.validate(),
            Err(IbanRegistryError::Configuration { .. })
        ));

        let config = RegistryConfig {
            fixtures_file: "iban_registry_full.json".to_string(),
            ..Default::default()
        };
        assert!(config.validate().is_err());

        let config = RegistryConfig {
            registry_file: "nested/registry.json".to_string(),
            ..Default::default()
        };
        assert!(config.validate().is_err());

        let config = RegistryConfig {
            registry_file: " ".to_string(),
            ..Default::default()
        };
        assert!(config.validate().is_err());

        let config = RegistryConfig::default().with_input_path("");
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_relative_dir_names() {
        for file in [".", "..", "/", "./"] {
            let config = RegistryConfig {
                registry_file: file.to_string(),
                ..Default::default()
            };
            assert!(
                matches!(
                    config.validate(),
                    Err(IbanRegistryError::Configuration { .. })
                ),
                "registry file name {:?} should be rejected",
                file
            );

            let config = RegistryConfig {
                fixtures_file: file.to_string(),
                ..Default::default()
            };
            assert!(config.validate().is_err());
        }

        let config = RegistryConfig {
            registry_file: "registry.json".to_string(),
            ..Default::default()
        };
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_serialization() {
        let config = RegistryConfig::default();
        let json = serde_json::to_string(&config).unwrap();
        let parsed: RegistryConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, config);
    }
}
