//! Command-line options and config loading for the terminal game.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};

use crate::types::BoardConfig;

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RunOptions {
    /// JSON board config; defaults apply to missing fields.
    pub config: Option<PathBuf>,
    /// RNG seed; taken from the clock when absent.
    pub seed: Option<u32>,
    /// Send log records here instead of stderr.
    pub log: Option<PathBuf>,
}

/// Parse arguments (without the program name).
pub fn parse_args(args: &[String]) -> Result<RunOptions> {
    let mut opts = RunOptions::default();
    let mut i = 0usize;
    while i < args.len() {
        let flag = args[i].as_str();
        let value = || {
            args.get(i + 1)
                .ok_or_else(|| anyhow!("missing value for {}", flag))
        };
        match flag {
            "--config" => opts.config = Some(PathBuf::from(value()?)),
            "--log" => opts.log = Some(PathBuf::from(value()?)),
            "--seed" => {
                let v = value()?;
                opts.seed = Some(
                    v.parse::<u32>()
                        .map_err(|_| anyhow!("invalid --seed value: {}", v))?,
                );
            }
            other => return Err(anyhow!("unknown argument: {}", other)),
        }
        i += 2;
    }
    Ok(opts)
}

/// Parse and validate a JSON board config.
pub fn parse_config(json: &str) -> Result<BoardConfig> {
    let config: BoardConfig = serde_json::from_str(json).context("parse board config")?;
    config.validate()?;
    Ok(config)
}

pub fn load_config(path: &Path) -> Result<BoardConfig> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("read config {}", path.display()))?;
    parse_config(&text).with_context(|| format!("invalid config {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{ConfigError, RefillPolicy};

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn parse_args_defaults() {
        assert_eq!(parse_args(&[]).unwrap(), RunOptions::default());
    }

    #[test]
    fn parse_args_reads_all_flags() {
        let opts = parse_args(&args(&[
            "--seed", "42", "--config", "board.json", "--log", "game.log",
        ]))
        .unwrap();
        assert_eq!(opts.seed, Some(42));
        assert_eq!(opts.config, Some(PathBuf::from("board.json")));
        assert_eq!(opts.log, Some(PathBuf::from("game.log")));
    }

    #[test]
    fn parse_args_rejects_bad_input() {
        assert!(parse_args(&args(&["--seed"])).is_err());
        assert!(parse_args(&args(&["--seed", "-1"])).is_err());
        assert!(parse_args(&args(&["--fast"])).is_err());
    }

    #[test]
    fn partial_config_takes_defaults() {
        let config = parse_config(r#"{ "width": 6, "refill": "avoid_matches" }"#).unwrap();
        assert_eq!(config.width, 6);
        assert_eq!(config.height, BoardConfig::default().height);
        assert_eq!(config.refill, RefillPolicy::AvoidMatches);
    }

    #[test]
    fn invalid_config_is_an_error() {
        let err = parse_config(r#"{ "tile_types": 0 }"#).unwrap_err();
        assert_eq!(
            err.downcast_ref::<ConfigError>(),
            Some(&ConfigError::NoTileTypes)
        );
    }
}
