use serde::{Deserialize, Serialize};
use std::fs;

/// Upper bound for an explicit rayon pool size.
pub const MAX_THREADS: usize = 256;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Config {
    /// Exclude bomb pots from tagging and statistics
    pub skip_bomb_pots: bool,
    /// Players with fewer hands are omitted from `stats`
    pub min_hands: u32,
    /// Worker threads for batch evaluation; 0 lets rayon decide
    pub threads: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueSource {
    Default,
    File,
    Env,
}

#[derive(Debug, Clone, Copy)]
pub struct ConfigSources {
    pub skip_bomb_pots: ValueSource,
    pub min_hands: ValueSource,
    pub threads: ValueSource,
}

impl Default for ConfigSources {
    fn default() -> Self {
        Self {
            skip_bomb_pots: ValueSource::Default,
            min_hands: ValueSource::Default,
            threads: ValueSource::Default,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ConfigResolved {
    pub config: Config,
    pub sources: ConfigSources,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            skip_bomb_pots: true,
            min_hands: 1,
            threads: 0,
        }
    }
}

#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(toml::de::Error),
    Invalid(String),
}

impl From<std::io::Error> for ConfigError {
    fn from(e: std::io::Error) -> Self {
        ConfigError::Io(e)
    }
}
impl From<toml::de::Error> for ConfigError {
    fn from(e: toml::de::Error) -> Self {
        ConfigError::Parse(e)
    }
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "cannot read config file: {}", e),
            ConfigError::Parse(e) => write!(f, "cannot parse config file: {}", e),
            ConfigError::Invalid(msg) => f.write_str(msg),
        }
    }
}

impl From<ConfigError> for crate::error::CliError {
    fn from(e: ConfigError) -> Self {
        crate::error::CliError::Config(e.to_string())
    }
}

/// Resolve configuration: defaults, then the TOML file named by
/// `HOMEGAME_CONFIG`, then `HOMEGAME_*` environment overrides.
pub fn load_with_sources() -> Result<ConfigResolved, ConfigError> {
    let mut cfg = Config::default();
    let mut sources = ConfigSources::default();

    if let Ok(path) = std::env::var("HOMEGAME_CONFIG")
        && !path.is_empty()
    {
        let s = fs::read_to_string(path)?;
        let f: FileConfig = toml::from_str(&s)?;
        if let Some(v) = f.skip_bomb_pots {
            cfg.skip_bomb_pots = v;
            sources.skip_bomb_pots = ValueSource::File;
        }
        if let Some(v) = f.min_hands {
            cfg.min_hands = v;
            sources.min_hands = ValueSource::File;
        }
        if let Some(v) = f.threads {
            cfg.threads = v;
            sources.threads = ValueSource::File;
        }
    }

    if let Ok(skip) = std::env::var("HOMEGAME_SKIP_BOMB_POTS")
        && !skip.is_empty()
    {
        cfg.skip_bomb_pots = parse_bool(&skip)
            .ok_or_else(|| ConfigError::Invalid("Invalid skip_bomb_pots".into()))?;
        sources.skip_bomb_pots = ValueSource::Env;
    }
    if let Ok(min) = std::env::var("HOMEGAME_MIN_HANDS")
        && !min.is_empty()
    {
        cfg.min_hands = min
            .parse()
            .map_err(|_| ConfigError::Invalid("Invalid min_hands".into()))?;
        sources.min_hands = ValueSource::Env;
    }
    if let Ok(threads) = std::env::var("HOMEGAME_THREADS")
        && !threads.is_empty()
    {
        cfg.threads = threads
            .parse()
            .map_err(|_| ConfigError::Invalid("Invalid threads".into()))?;
        sources.threads = ValueSource::Env;
    }

    validate(&cfg)?;
    Ok(ConfigResolved {
        config: cfg,
        sources,
    })
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct FileConfig {
    #[serde(default)]
    skip_bomb_pots: Option<bool>,
    #[serde(default)]
    min_hands: Option<u32>,
    #[serde(default)]
    threads: Option<usize>,
}

fn validate(cfg: &Config) -> Result<(), ConfigError> {
    if cfg.threads > MAX_THREADS {
        return Err(ConfigError::Invalid(format!(
            "Invalid configuration: threads must be <= {}",
            MAX_THREADS
        )));
    }
    Ok(())
}

fn parse_bool(s: &str) -> Option<bool> {
    match s.to_ascii_lowercase().as_str() {
        "1" | "true" | "on" | "yes" => Some(true),
        "0" | "false" | "off" | "no" => Some(false),
        _ => None,
    }
}
