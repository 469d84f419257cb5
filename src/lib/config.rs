use crate::domain::importer::LocalityScope;
use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct Config {
    pub options_path: PathBuf,
    pub output_dir: PathBuf,
    pub log_level: tracing::Level,
    pub locality_scope: LocalityScope,
}

const OPTIONS_PATH_KEY: &str = "OPTIONS_PATH";
const OUTPUT_DIR_KEY: &str = "OUTPUT_DIR";
const LOG_LEVEL_KEY: &str = "LOG_LEVEL";
const LOCALITY_SCOPE_KEY: &str = "LOCALITY_SCOPE";

const DEFAULT_OPTIONS_PATH: &str = "options.json";
const DEFAULT_OUTPUT_DIR: &str = "output";

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let options_path = lookup(OPTIONS_PATH_KEY)
            .unwrap_or_else(|| DEFAULT_OPTIONS_PATH.to_string())
            .into();
        let output_dir = lookup(OUTPUT_DIR_KEY)
            .unwrap_or_else(|| DEFAULT_OUTPUT_DIR.to_string())
            .into();
        let log_level = match lookup(LOG_LEVEL_KEY) {
            Some(level) => level
                .parse()
                .map_err(|_| anyhow::anyhow!("invalid {}: '{}'", LOG_LEVEL_KEY, level))?,
            None => tracing::Level::INFO,
        };
        let locality_scope = match lookup(LOCALITY_SCOPE_KEY) {
            Some(scope) => scope.parse()?,
            None => LocalityScope::default(),
        };

        Ok(Self {
            options_path,
            output_dir,
            log_level,
            locality_scope,
        })
    }
}
