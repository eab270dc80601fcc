use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use clap::Parser;
use paging::{PageId, Policy};

pub const DEFAULT_FRAMES: usize = 4;
pub const DEFAULT_SEQUENCE: &str = "1,2,3,4,1,2,5,1,2,3,4,5";

pub const FRAMES_ENV: &str = "PAGESIM_FRAMES";
pub const POLICY_ENV: &str = "PAGESIM_POLICY";

#[derive(Parser, Debug, Clone)]
#[command(name = "pagesim", about = "Step through FIFO and LRU page replacement")]
#[command(version)]
pub struct Args {
    /// Number of physical frames
    #[arg(short, long, default_value_t = DEFAULT_FRAMES)]
    pub frames: usize,

    /// Reference sequence, e.g. "1,2,3" or "P1 P2 P3"
    #[arg(short, long, default_value = DEFAULT_SEQUENCE, conflicts_with = "trace")]
    pub sequence: String,

    /// Read the reference sequence from a file instead
    #[arg(long, value_name = "PATH")]
    pub trace: Option<PathBuf>,

    /// Replacement policy: fifo or lru
    #[arg(short, long, default_value = "fifo")]
    pub policy: Policy,

    /// Step to replay to on startup (clamped to the sequence)
    #[arg(long, default_value_t = 0)]
    pub step: usize,

    /// Print the view at the chosen step as JSON and exit
    #[arg(long)]
    pub json: bool,
}

/// Fully resolved simulator settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SimConfig {
    pub total_frames: usize,
    pub sequence: Vec<PageId>,
    pub policy: Policy,
    pub step: usize,
    pub json: bool,
}

impl SimConfig {
    /// Resolves CLI args, letting environment variables override them.
    pub fn resolve(args: Args) -> Result<Self> {
        Self::resolve_with(args, |key| env::var(key).ok())
    }

    pub fn resolve_with<F>(args: Args, lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let total_frames = match lookup(FRAMES_ENV) {
            Some(value) => value
                .trim()
                .parse()
                .with_context(|| format!("invalid {} value '{}'", FRAMES_ENV, value))?,
            None => args.frames,
        };
        let policy = match lookup(POLICY_ENV) {
            Some(value) => value
                .parse()
                .with_context(|| format!("invalid {} value", POLICY_ENV))?,
            None => args.policy,
        };
        let sequence = match &args.trace {
            Some(path) => load_trace(path)?,
            None => parse_sequence(&args.sequence)?,
        };
        if total_frames == 0 {
            bail!("frame count must be positive");
        }

        let step = args.step.min(sequence.len().saturating_sub(1));
        Ok(Self {
            total_frames,
            sequence,
            policy,
            step,
            json: args.json,
        })
    }
}

/// Parses page numbers separated by commas or whitespace.
pub fn parse_sequence(input: &str) -> Result<Vec<PageId>> {
    let sequence = input
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter(|token| !token.is_empty())
        .map(|token| {
            token
                .parse::<PageId>()
                .with_context(|| format!("invalid page '{}'", token))
        })
        .collect::<Result<Vec<_>>>()?;
    if sequence.is_empty() {
        bail!("reference sequence is empty");
    }
    Ok(sequence)
}

/// Reads a reference sequence from a file; `#` starts a comment.
pub fn load_trace(path: &Path) -> Result<Vec<PageId>> {
    let contents = fs::read_to_string(path)
        .with_context(|| format!("read trace file {}", path.display()))?;
    let body = contents
        .lines()
        .map(|line| line.split('#').next().unwrap_or(""))
        .collect::<Vec<_>>()
        .join("\n");
    parse_sequence(&body).with_context(|| format!("parse trace file {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use common::pages;

    fn args(extra: &[&str]) -> Args {
        let mut argv = vec!["pagesim"];
        argv.extend_from_slice(extra);
        Args::try_parse_from(argv).unwrap()
    }

    fn no_env(_: &str) -> Option<String> {
        None
    }

    #[test]
    fn defaults_match_classic_example() {
        let config = SimConfig::resolve_with(args(&[]), no_env).unwrap();
        assert_eq!(config.total_frames, 4);
        assert_eq!(config.policy, Policy::FirstInFirstOutSlot);
        assert_eq!(
            config.sequence,
            pages(&[1, 2, 3, 4, 1, 2, 5, 1, 2, 3, 4, 5])
        );
        assert_eq!(config.step, 0);
        assert!(!config.json);
    }

    #[test]
    fn parses_mixed_separators_and_prefixes() {
        assert_eq!(
            parse_sequence("P1, 2  p3,4").unwrap(),
            pages(&[1, 2, 3, 4])
        );
        assert!(parse_sequence(" , ").is_err());
        assert!(parse_sequence("1,x").is_err());
    }

    #[test]
    fn clamps_initial_step() {
        let config =
            SimConfig::resolve_with(args(&["--sequence", "1 2 3", "--step", "99"]), no_env)
                .unwrap();
        assert_eq!(config.step, 2);
    }

    #[test]
    fn env_overrides_cli() {
        let config = SimConfig::resolve_with(args(&["--frames", "2"]), |key| match key {
            FRAMES_ENV => Some("3".to_string()),
            POLICY_ENV => Some("LRU".to_string()),
            _ => None,
        })
        .unwrap();
        assert_eq!(config.total_frames, 3);
        assert_eq!(config.policy, Policy::LeastRecentlyUsed);
    }

    #[test]
    fn rejects_bad_values() {
        assert!(SimConfig::resolve_with(args(&["--frames", "0"]), no_env).is_err());
        assert!(Args::try_parse_from(["pagesim", "--policy", "clock"]).is_err());
        assert!(Args::try_parse_from(["pagesim", "--frames", "-1"]).is_err());
        let err = SimConfig::resolve_with(args(&[]), |key| {
            (key == FRAMES_ENV).then(|| "many".to_string())
        })
        .unwrap_err();
        assert!(err.to_string().contains(FRAMES_ENV));
    }
}
