use std::path::Path;

use crate::ai::{MutationConfig, FEATURE_COUNT};
use crate::error::ConfigError;
use crate::evolution::{PopulationConfig, TournamentConfig};

/// Driver settings: how long to run and how much to print.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct RunConfig {
    pub generations: usize,
    /// Fixed RNG seed; absent means seed from the OS.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
    /// Log a progress line every N generations.
    pub log_interval: usize,
    /// Number of leaderboard rows rendered per generation.
    pub leaderboard_size: usize,
}

impl Default for RunConfig {
    fn default() -> Self {
        RunConfig {
            generations: 1000,
            seed: None,
            log_interval: 1,
            leaderboard_size: 50,
        }
    }
}

/// Top-level application configuration, loadable from TOML.
#[derive(Debug, Clone, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub population: PopulationConfig,
    pub tournament: TournamentConfig,
    pub mutation: MutationConfig,
    pub run: RunConfig,
}

impl AppConfig {
    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::FileRead {
            path: path.to_path_buf(),
            source: e,
        })?;
        let config: AppConfig = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file, falling back to defaults if the file
    /// does not exist.
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            Self::load(path)
        } else {
            log::warn!("config file '{}' not found, using defaults", path.display());
            Ok(Self::default())
        }
    }

    /// Validate configuration values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let population = &self.population;
        if population.size == 0 {
            return Err(ConfigError::Validation("population.size must be > 0".into()));
        }
        if population.survivors == 0 || population.survivors > population.size {
            return Err(ConfigError::Validation(
                "population.survivors must be in [1, population.size]".into(),
            ));
        }
        if population.size % population.survivors != 0 {
            return Err(ConfigError::Validation(
                "population.size must be a multiple of population.survivors".into(),
            ));
        }
        if population.layer_sizes.len() < 2 {
            return Err(ConfigError::Validation(
                "population.layer_sizes needs at least 2 entries".into(),
            ));
        }
        if population.layer_sizes.contains(&0) {
            return Err(ConfigError::Validation(
                "population.layer_sizes entries must be > 0".into(),
            ));
        }
        if population.layer_sizes[0] != FEATURE_COUNT {
            return Err(ConfigError::Validation(format!(
                "population.layer_sizes must start with {FEATURE_COUNT} (feature count)"
            )));
        }

        if self.tournament.rounds == 0 {
            return Err(ConfigError::Validation("tournament.rounds must be > 0".into()));
        }
        if self.tournament.threads == 0 {
            return Err(ConfigError::Validation(
                "tournament.threads must be >= 1".into(),
            ));
        }

        if !(0.0..=1.0).contains(&self.mutation.probability) {
            return Err(ConfigError::Validation(
                "mutation.probability must be in [0, 1]".into(),
            ));
        }
        if !(self.mutation.magnitude > 0.0 && self.mutation.magnitude.is_finite()) {
            return Err(ConfigError::Validation(
                "mutation.magnitude must be a finite value > 0".into(),
            ));
        }

        if self.run.generations == 0 {
            return Err(ConfigError::Validation("run.generations must be > 0".into()));
        }
        if self.run.log_interval == 0 {
            return Err(ConfigError::Validation("run.log_interval must be > 0".into()));
        }
        if self.run.leaderboard_size > population.survivors {
            return Err(ConfigError::Validation(
                "run.leaderboard_size must be <= population.survivors".into(),
            ));
        }

        Ok(())
    }

    /// Generate a TOML string with all default values (useful for creating
    /// example config files).
    pub fn default_toml() -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(&AppConfig::default())
    }
}
