use serde::{Deserialize, Serialize};
use std::fs;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Config {
    pub seed: Option<u64>,
    pub decks: u8,
    pub starting_balance: i64,
    pub wager: i64,
    pub dealer_delay_ms: u64,
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
    pub seed: ValueSource,
    pub decks: ValueSource,
    pub starting_balance: ValueSource,
    pub wager: ValueSource,
    pub dealer_delay_ms: ValueSource,
}

impl Default for ConfigSources {
    fn default() -> Self {
        Self {
            seed: ValueSource::Default,
            decks: ValueSource::Default,
            starting_balance: ValueSource::Default,
            wager: ValueSource::Default,
            dealer_delay_ms: ValueSource::Default,
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
            seed: None,
            decks: 1,
            starting_balance: 1_000,
            wager: 10,
            dealer_delay_ms: 0,
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

pub fn load_with_sources() -> Result<ConfigResolved, ConfigError> {
    let mut cfg = Config::default();
    let mut sources = ConfigSources::default();

    if let Ok(path) = std::env::var("CROUPIER_CONFIG") {
        let s = fs::read_to_string(path)?;
        let f: FileConfig = toml::from_str(&s)?;
        if let Some(v) = f.seed {
            cfg.seed = Some(v);
            sources.seed = ValueSource::File;
        }
        if let Some(v) = f.decks {
            cfg.decks = v;
            sources.decks = ValueSource::File;
        }
        if let Some(v) = f.starting_balance {
            cfg.starting_balance = v;
            sources.starting_balance = ValueSource::File;
        }
        if let Some(v) = f.wager {
            cfg.wager = v;
            sources.wager = ValueSource::File;
        }
        if let Some(v) = f.dealer_delay_ms {
            cfg.dealer_delay_ms = v;
            sources.dealer_delay_ms = ValueSource::File;
        }
    }

    if let Some(seed) = env_value("CROUPIER_SEED") {
        cfg.seed = Some(
            seed.parse()
                .map_err(|_| ConfigError::Invalid("Invalid seed".into()))?,
        );
        sources.seed = ValueSource::Env;
    }
    if let Some(decks) = env_value("CROUPIER_DECKS") {
        cfg.decks = decks
            .parse()
            .map_err(|_| ConfigError::Invalid("Invalid decks".into()))?;
        sources.decks = ValueSource::Env;
    }
    if let Some(balance) = env_value("CROUPIER_BALANCE") {
        cfg.starting_balance = balance
            .parse()
            .map_err(|_| ConfigError::Invalid("Invalid starting balance".into()))?;
        sources.starting_balance = ValueSource::Env;
    }
    if let Some(wager) = env_value("CROUPIER_WAGER") {
        cfg.wager = wager
            .parse()
            .map_err(|_| ConfigError::Invalid("Invalid wager".into()))?;
        sources.wager = ValueSource::Env;
    }
    if let Some(delay) = env_value("CROUPIER_DEALER_DELAY_MS") {
        cfg.dealer_delay_ms = delay
            .parse()
            .map_err(|_| ConfigError::Invalid("Invalid dealer delay".into()))?;
        sources.dealer_delay_ms = ValueSource::Env;
    }

    validate(&cfg)?;
    Ok(ConfigResolved {
        config: cfg,
        sources,
    })
}

// unset and empty variables both mean "not overridden"
fn env_value(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.is_empty())
}

#[derive(Debug, Deserialize)]
struct FileConfig {
    #[serde(default)]
    seed: Option<u64>,
    #[serde(default)]
    decks: Option<u8>,
    #[serde(default)]
    starting_balance: Option<i64>,
    #[serde(default)]
    wager: Option<i64>,
    #[serde(default)]
    dealer_delay_ms: Option<u64>,
}

fn validate(cfg: &Config) -> Result<(), ConfigError> {
    if cfg.decks == 0 {
        return Err(ConfigError::Invalid(
            "Invalid configuration: decks must be >=1".into(),
        ));
    }
    if cfg.starting_balance <= 0 {
        return Err(ConfigError::Invalid(
            "Invalid configuration: starting_balance must be >0".into(),
        ));
    }
    if cfg.wager < 0 {
        return Err(ConfigError::Invalid(
            "Invalid configuration: wager must be >=0".into(),
        ));
    }
    Ok(())
}
