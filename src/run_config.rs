//! Run settings read from the environment.
//!
//! | Variable              | Meaning                                   |
//! |-----------------------|-------------------------------------------|
//! | `TUI_BLOCKS_CONFIG`   | path to a JSON [`GameConfig`] file        |
//! | `TUI_BLOCKS_LOG_PATH` | append JSON-lines events to this file     |
//! | `TUI_BLOCKS_SEED`     | fixed seed for the first session          |
//!
//! Empty values count as unset. An unparsable seed is ignored.

use std::env;
use std::path::PathBuf;

use anyhow::{Context, Result};

use crate::types::GameConfig;

pub const CONFIG_ENV: &str = "TUI_BLOCKS_CONFIG";
pub const LOG_PATH_ENV: &str = "TUI_BLOCKS_LOG_PATH";
pub const SEED_ENV: &str = "TUI_BLOCKS_SEED";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunConfig {
    pub config_path: Option<PathBuf>,
    pub log_path: Option<PathBuf>,
    pub seed: Option<u64>,
}

impl RunConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build from any key lookup; `from_env` uses the process environment.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let non_empty = |key: &str| {
            lookup(key)
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
        };
        Self {
            config_path: non_empty(CONFIG_ENV).map(PathBuf::from),
            log_path: non_empty(LOG_PATH_ENV).map(PathBuf::from),
            seed: non_empty(SEED_ENV).and_then(|s| s.parse().ok()),
        }
    }

    /// Load and validate the game configuration, or the defaults when no file is set.
    pub fn game_config(&self) -> Result<GameConfig> {
        match &self.config_path {
            Some(path) => GameConfig::load(path)
                .with_context(|| format!("loading config from {}", path.display())),
            None => Ok(GameConfig::default()),
        }
    }

    /// Seed for the `index`-th session of this run.
    ///
    /// A fixed seed makes the whole run reproducible: restarts offset it by the
    /// session index. Without one every session gets a fresh random seed.
    pub fn seed_for(&self, index: u32) -> u64 {
        match self.seed {
            Some(seed) => seed.wrapping_add(u64::from(index)),
            None => rand::random(),
        }
    }
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
        move |key| map.get(key).cloned()
    }

    #[test]
    fn unset_environment_gives_defaults() {
        let run = RunConfig::from_lookup(lookup(&[]));
        assert_eq!(run, RunConfig::default());
        assert_eq!(run.game_config().unwrap(), GameConfig::default());
    }

    #[test]
    fn reads_paths_and_seed() {
        let run = RunConfig::from_lookup(lookup(&[
            (CONFIG_ENV, "/tmp/blocks.json"),
            (LOG_PATH_ENV, " /tmp/events.jsonl "),
            (SEED_ENV, "1234"),
        ]));
        assert_eq!(run.config_path, Some(PathBuf::from("/tmp/blocks.json")));
        assert_eq!(run.log_path, Some(PathBuf::from("/tmp/events.jsonl")));
        assert_eq!(run.seed, Some(1234));
    }

    #[test]
    fn empty_and_invalid_values_are_ignored() {
        let run = RunConfig::from_lookup(lookup(&[
            (LOG_PATH_ENV, "   "),
            (SEED_ENV, "not-a-number"),
        ]));
        assert_eq!(run.log_path, None);
        assert_eq!(run.seed, None);
    }

    #[test]
    fn fixed_seed_offsets_per_session() {
        let run = RunConfig {
            seed: Some(10),
            ..RunConfig::default()
        };
        assert_eq!(run.seed_for(0), 10);
        assert_eq!(run.seed_for(3), 13);
    }

    #[test]
    fn missing_config_file_reports_path() {
        let run = RunConfig {
            config_path: Some(PathBuf::from("/definitely/not/here.json")),
            ..RunConfig::default()
        };
        let err = run.game_config().unwrap_err();
        assert!(format!("{err:#}").contains("/definitely/not/here.json"));
    }
}
