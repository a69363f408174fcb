use serde::Deserialize;
use std::env;
use std::path::{Path, PathBuf};

const DEFAULT_OPENVOICE_HOME: &str = "~/.cache/openvoice";
const DEFAULT_WORKER_URL: &str = "http://127.0.0.1:9000";
const DEFAULT_WATERMARK: &str = "@Reflexion";

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub environment: Environment,
    pub log_format: LogFormat,
    // OpenVoice backend
    pub openvoice_home: PathBuf,
    pub worker_url: String,
    pub device: Option<String>,
    pub strategy: StrategyPreference,
    // Two-stage pipeline
    pub scratch_dir: PathBuf,
    pub watermark: Option<String>,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    Development,
    Production,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Pretty,
    Json,
}

/// Which inference strategy to build at startup
#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum StrategyPreference {
    /// Probe the worker and prefer the one-step wrapper
    Auto,
    Direct,
    TwoStage,
}

impl Config {
    pub fn from_env() -> Result<Self, Box<dyn std::error::Error>> {
        dotenvy::dotenv().ok();

        let config = Config {
            host: env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: env::var("PORT")
                .unwrap_or_else(|_| "8000".to_string())
                .parse()?,
            environment: env::var("ENVIRONMENT")
                .unwrap_or_else(|_| "development".to_string())
                .parse::<String>()
                .map(|s| match s.as_str() {
                    "production" => Environment::Production,
                    _ => Environment::Development,
                })?,
            log_format: env::var("LOG_FORMAT")
                .unwrap_or_else(|_| "pretty".to_string())
                .parse::<String>()
                .map(|s| match s.as_str() {
                    "json" => LogFormat::Json,
                    _ => LogFormat::Pretty,
                })?,
            openvoice_home: expand_home(
                &env::var("OPENVOICE_HOME").unwrap_or_else(|_| DEFAULT_OPENVOICE_HOME.to_string()),
            ),
            worker_url: env::var("OPENVOICE_WORKER_URL")
                .unwrap_or_else(|_| DEFAULT_WORKER_URL.to_string())
                .trim_end_matches('/')
                .to_string(),
            device: env::var("OPENVOICE_DEVICE")
                .ok()
                .filter(|d| !d.trim().is_empty()),
            strategy: parse_strategy(
                &env::var("TTS_STRATEGY").unwrap_or_else(|_| "auto".to_string()),
            )?,
            scratch_dir: env::var("TTS_SCRATCH_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| env::temp_dir()),
            watermark: match env::var("TTS_WATERMARK") {
                Ok(marker) if marker.is_empty() => None,
                Ok(marker) => Some(marker),
                Err(_) => Some(DEFAULT_WATERMARK.to_string()),
            },
        };

        Ok(config)
    }

    pub fn is_development(&self) -> bool {
        self.environment == Environment::Development
    }
}

fn parse_strategy(value: &str) -> Result<StrategyPreference, String> {
    match value.trim().to_lowercase().as_str() {
        "" | "auto" => Ok(StrategyPreference::Auto),
        "direct" => Ok(StrategyPreference::Direct),
        "two_stage" | "two-stage" => Ok(StrategyPreference::TwoStage),
        other => Err(format!(
            "invalid TTS_STRATEGY '{}': expected auto, direct or two_stage",
            other
        )),
    }
}

/// Expand a leading `~` to the user's home directory
fn expand_home(path: &str) -> PathBuf {
    let home = env::var("HOME").ok();
    match (path.strip_prefix('~'), home) {
        (Some(rest), Some(home)) if rest.is_empty() || rest.starts_with('/') => {
            Path::new(&home).join(rest.trim_start_matches('/'))
        }
        _ => PathBuf::from(path),
    }
}
