use ofc_ai::AI_TYPES;
use ofc_engine::rules::DiscardPolicy;
use serde::{Deserialize, Serialize};
use std::fs;

pub const CONFIG_ENV: &str = "OFC_CONFIG";
pub const SEED_ENV: &str = "OFC_SEED";
pub const DISCARD_ENV: &str = "OFC_DISCARD_POLICY";
pub const AI_ENV: &str = "OFC_AI";
pub const FANTASYLAND_ENV: &str = "OFC_FANTASYLAND";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Config {
    pub seed: Option<u64>,
    pub discard_policy: DiscardPolicy,
    pub ai: String,
    pub fantasyland: bool,
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
    pub discard_policy: ValueSource,
    pub ai: ValueSource,
    pub fantasyland: ValueSource,
}

impl Default for ConfigSources {
    fn default() -> Self {
        Self {
            seed: ValueSource::Default,
            discard_policy: ValueSource::Default,
            ai: ValueSource::Default,
            fantasyland: ValueSource::Default,
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
            discard_policy: DiscardPolicy::Leftover,
            ai: "greedy".into(),
            fantasyland: true,
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
            ConfigError::Io(e) => write!(f, "cannot read {}: {}", CONFIG_ENV, e),
            ConfigError::Parse(e) => write!(f, "malformed config file: {}", e),
            ConfigError::Invalid(msg) => f.write_str(msg),
        }
    }
}

pub fn load() -> Result<Config, ConfigError> {
    load_with_sources().map(|resolved| resolved.config)
}

/// Defaults, then the TOML file named by `OFC_CONFIG`, then `OFC_*` variables.
pub fn load_with_sources() -> Result<ConfigResolved, ConfigError> {
    let mut cfg = Config::default();
    let mut sources = ConfigSources::default();

    if let Ok(path) = std::env::var(CONFIG_ENV)
        && !path.is_empty()
    {
        let s = fs::read_to_string(path)?;
        let f: FileConfig = toml::from_str(&s)?;
        if let Some(v) = f.seed {
            cfg.seed = Some(v);
            sources.seed = ValueSource::File;
        }
        if let Some(v) = f.discard_policy {
            cfg.discard_policy = v.parse().map_err(ConfigError::Invalid)?;
            sources.discard_policy = ValueSource::File;
        }
        if let Some(v) = f.ai {
            cfg.ai = v;
            sources.ai = ValueSource::File;
        }
        if let Some(v) = f.fantasyland {
            cfg.fantasyland = v;
            sources.fantasyland = ValueSource::File;
        }
    }

    if let Some(seed) = env_value(SEED_ENV) {
        cfg.seed = Some(
            seed.parse()
                .map_err(|_| ConfigError::Invalid(format!("Invalid seed '{}'", seed)))?,
        );
        sources.seed = ValueSource::Env;
    }
    if let Some(policy) = env_value(DISCARD_ENV) {
        cfg.discard_policy = policy.parse().map_err(ConfigError::Invalid)?;
        sources.discard_policy = ValueSource::Env;
    }
    if let Some(ai) = env_value(AI_ENV) {
        cfg.ai = ai;
        sources.ai = ValueSource::Env;
    }
    if let Some(fl) = env_value(FANTASYLAND_ENV) {
        cfg.fantasyland = parse_bool(&fl)
            .ok_or_else(|| ConfigError::Invalid(format!("Invalid fantasyland '{}'", fl)))?;
        sources.fantasyland = ValueSource::Env;
    }

    validate(&cfg)?;
    Ok(ConfigResolved {
        config: cfg,
        sources,
    })
}

fn env_value(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.is_empty())
}

#[derive(Debug, Deserialize)]
struct FileConfig {
    #[serde(default)]
    seed: Option<u64>,
    #[serde(default)]
    discard_policy: Option<String>,
    #[serde(default)]
    ai: Option<String>,
    #[serde(default)]
    fantasyland: Option<bool>,
}

fn validate(cfg: &Config) -> Result<(), ConfigError> {
    let ai = cfg.ai.trim().to_ascii_lowercase();
    if !AI_TYPES.contains(&ai.as_str()) {
        return Err(ConfigError::Invalid(format!(
            "Invalid configuration: ai must be one of {}",
            AI_TYPES.join(", ")
        )));
    }
    Ok(())
}

pub fn parse_bool(s: &str) -> Option<bool> {
    match s.to_ascii_lowercase().as_str() {
        "1" | "true" | "on" | "yes" => Some(true),
        "0" | "false" | "off" | "no" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use std::io::Write as _;

    fn clear_env() {
        for key in [CONFIG_ENV, SEED_ENV, DISCARD_ENV, AI_ENV, FANTASYLAND_ENV] {
            unsafe {
                std::env::remove_var(key);
            }
        }
    }

    #[test]
    #[serial]
    fn defaults_without_env() {
        clear_env();
        let resolved = load_with_sources().unwrap();
        assert_eq!(resolved.config, Config::default());
        assert_eq!(resolved.sources.ai, ValueSource::Default);
        assert_eq!(resolved.sources.discard_policy, ValueSource::Default);
    }

    #[test]
    #[serial]
    fn env_overrides_file() {
        clear_env();
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            "seed = 7\ndiscard_policy = \"explicit\"\nai = \"random\"\nfantasyland = false"
        )
        .unwrap();
        unsafe {
            std::env::set_var(CONFIG_ENV, file.path());
            std::env::set_var(SEED_ENV, "99");
        }
        let resolved = load_with_sources().unwrap();
        clear_env();

        assert_eq!(resolved.config.seed, Some(99));
        assert_eq!(resolved.sources.seed, ValueSource::Env);
        assert_eq!(resolved.config.discard_policy, DiscardPolicy::Explicit);
        assert_eq!(resolved.sources.discard_policy, ValueSource::File);
        assert_eq!(resolved.config.ai, "random");
        assert!(!resolved.config.fantasyland);
        assert_eq!(resolved.sources.fantasyland, ValueSource::File);
    }

    #[test]
    #[serial]
    fn rejects_bad_values() {
        clear_env();
        unsafe {
            std::env::set_var(FANTASYLAND_ENV, "maybe");
        }
        assert!(matches!(load(), Err(ConfigError::Invalid(_))));
        clear_env();

        unsafe {
            std::env::set_var(AI_ENV, "solver");
        }
        assert!(matches!(load(), Err(ConfigError::Invalid(_))));
        clear_env();

        unsafe {
            std::env::set_var(DISCARD_ENV, "sometimes");
        }
        assert!(matches!(load(), Err(ConfigError::Invalid(_))));
        clear_env();
    }

    #[test]
    fn parse_bool_spellings() {
        assert_eq!(parse_bool("YES"), Some(true));
        assert_eq!(parse_bool("off"), Some(false));
        assert_eq!(parse_bool("2"), None);
    }
}
