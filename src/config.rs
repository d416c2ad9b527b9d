//! Runtime configuration read from `BLOCKFALL_*` environment variables.

use std::env;

use log::LevelFilter;

use crate::core::{Board, RandomSource, SimpleRng, ThreadRandom};
use crate::types::{ConfigError, BOARD_HEIGHT, BOARD_WIDTH};

pub const ENV_SEED: &str = "BLOCKFALL_SEED";
pub const ENV_BOARD_WIDTH: &str = "BLOCKFALL_BOARD_WIDTH";
pub const ENV_BOARD_HEIGHT: &str = "BLOCKFALL_BOARD_HEIGHT";
pub const ENV_LOG_PATH: &str = "BLOCKFALL_LOG_PATH";
pub const ENV_LOG_LEVEL: &str = "BLOCKFALL_LOG_LEVEL";

/// Application configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// Seed for the deterministic LCG; `None` draws from the thread RNG.
    pub seed: Option<u32>,
    pub board_width: u8,
    pub board_height: u8,
    /// File that receives log records; logging is off when unset.
    pub log_path: Option<String>,
    pub log_level: LevelFilter,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            seed: None,
            board_width: BOARD_WIDTH,
            board_height: BOARD_HEIGHT,
            log_path: None,
            log_level: LevelFilter::Info,
        }
    }
}

impl AppConfig {
    /// Read the configuration from the process environment
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Read the configuration through an arbitrary key lookup
    ///
    /// Blank values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| {
            lookup(key)
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
        };
        let defaults = Self::default();

        let seed = get(ENV_SEED).map(|v| parse(ENV_SEED, v)).transpose()?;
        let board_width = get(ENV_BOARD_WIDTH)
            .map(|v| parse(ENV_BOARD_WIDTH, v))
            .transpose()?
            .unwrap_or(defaults.board_width);
        let board_height = get(ENV_BOARD_HEIGHT)
            .map(|v| parse(ENV_BOARD_HEIGHT, v))
            .transpose()?
            .unwrap_or(defaults.board_height);
        let log_level = get(ENV_LOG_LEVEL)
            .map(|v| parse(ENV_LOG_LEVEL, v))
            .transpose()?
            .unwrap_or(defaults.log_level);

        Ok(Self {
            seed,
            board_width,
            board_height,
            log_path: get(ENV_LOG_PATH),
            log_level,
        })
    }

    /// Build the empty playfield; fails on a zero dimension
    pub fn board(&self) -> Result<Board, ConfigError> {
        Board::new(self.board_width, self.board_height)
    }

    /// Piece source: seeded LCG when a seed is configured, thread RNG otherwise
    pub fn random_source(&self) -> Box<dyn RandomSource> {
        match self.seed {
            Some(seed) => Box::new(SimpleRng::new(seed)),
            None => Box::new(ThreadRandom::new()),
        }
    }
}

fn parse<T: std::str::FromStr>(key: &str, value: String) -> Result<T, ConfigError> {
    value.parse().map_err(|_| ConfigError::InvalidValue {
        key: key.to_string(),
        value,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn empty_environment_gives_defaults() {
        let cfg = AppConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(cfg, AppConfig::default());
        assert_eq!(cfg.board().unwrap().width(), 10);
    }

    #[test]
    fn values_are_parsed_and_trimmed() {
        let cfg = AppConfig::from_lookup(lookup(&[
            (ENV_SEED, " 42 "),
            (ENV_BOARD_WIDTH, "12"),
            (ENV_BOARD_HEIGHT, "24"),
            (ENV_LOG_PATH, "/tmp/blockfall.log"),
            (ENV_LOG_LEVEL, "debug"),
        ]))
        .unwrap();

        assert_eq!(cfg.seed, Some(42));
        assert_eq!((cfg.board_width, cfg.board_height), (12, 24));
        assert_eq!(cfg.log_path.as_deref(), Some("/tmp/blockfall.log"));
        assert_eq!(cfg.log_level, LevelFilter::Debug);
    }

    #[test]
    fn blank_values_count_as_unset() {
        let cfg = AppConfig::from_lookup(lookup(&[(ENV_SEED, "  "), (ENV_LOG_PATH, "")])).unwrap();
        assert_eq!(cfg.seed, None);
        assert_eq!(cfg.log_path, None);
    }

    #[test]
    fn unparsable_value_is_rejected() {
        let err = AppConfig::from_lookup(lookup(&[(ENV_BOARD_WIDTH, "wide")])).unwrap_err();
        assert_eq!(
            err,
            ConfigError::InvalidValue {
                key: ENV_BOARD_WIDTH.to_string(),
                value: "wide".to_string(),
            }
        );

        // Out of range for u8.
        assert!(AppConfig::from_lookup(lookup(&[(ENV_BOARD_HEIGHT, "300")])).is_err());
    }

    #[test]
    fn zero_dimension_fails_when_building_the_board() {
        let cfg = AppConfig::from_lookup(lookup(&[(ENV_BOARD_WIDTH, "0")])).unwrap();
        assert_eq!(cfg.board().unwrap_err().code(), "invalid_dimensions");
    }

    #[test]
    fn seeded_source_is_deterministic() {
        let cfg = AppConfig {
            seed: Some(7),
            ..AppConfig::default()
        };
        let mut a = cfg.random_source();
        let mut b = cfg.random_source();
        for _ in 0..20 {
            assert_eq!(a.next_index(7), b.next_index(7));
        }
    }
}
