use std::env;
use std::path::PathBuf;
use std::time::Duration;

use tracing_subscriber::EnvFilter;
use url::Url;
use warden_application::DEFAULT_ADMIN_ROLE;
use warden_core::{AppError, AppResult};

const DEFAULT_API_BASE_URL: &str = "http://127.0.0.1:3000/api";
const DEFAULT_SESSION_FILE: &str = ".warden/session.json";
const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 15;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConsoleConfig {
    pub api_base_url: Url,
    pub session_file: PathBuf,
    pub http_timeout: Duration,
    pub admin_role: String,
}

/// Values given on the command line; they win over the environment.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub api_base_url: Option<String>,
    pub session_file: Option<PathBuf>,
}

impl ConsoleConfig {
    pub fn load(overrides: ConfigOverrides) -> AppResult<Self> {
        Self::from_lookup(|name| env::var(name).ok(), overrides)
    }

    fn from_lookup(
        lookup: impl Fn(&str) -> Option<String>,
        overrides: ConfigOverrides,
    ) -> AppResult<Self> {
        let api_base_url = overrides
            .api_base_url
            .or_else(|| non_blank(lookup("WARDEN_API_BASE_URL")))
            .unwrap_or_else(|| DEFAULT_API_BASE_URL.to_owned());
        let api_base_url = Url::parse(api_base_url.trim()).map_err(|error| {
            AppError::Validation(format!(
                "invalid WARDEN_API_BASE_URL value '{api_base_url}': {error}"
            ))
        })?;
        if !matches!(api_base_url.scheme(), "http" | "https") {
            return Err(AppError::Validation(
                "WARDEN_API_BASE_URL must use http or https".to_owned(),
            ));
        }

        let session_file = overrides
            .session_file
            .or_else(|| non_blank(lookup("WARDEN_SESSION_FILE")).map(PathBuf::from))
            .unwrap_or_else(|| PathBuf::from(DEFAULT_SESSION_FILE));

        let http_timeout_secs = parse_env_u64(
            &lookup,
            "WARDEN_HTTP_TIMEOUT_SECS",
            DEFAULT_HTTP_TIMEOUT_SECS,
        )?;
        if http_timeout_secs == 0 {
            return Err(AppError::Validation(
                "WARDEN_HTTP_TIMEOUT_SECS must be greater than zero".to_owned(),
            ));
        }

        let admin_role = non_blank(lookup("WARDEN_ADMIN_ROLE"))
            .unwrap_or_else(|| DEFAULT_ADMIN_ROLE.to_owned());

        Ok(Self {
            api_base_url,
            session_file,
            http_timeout: Duration::from_secs(http_timeout_secs),
            admin_role,
        })
    }
}

pub fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .compact()
        .init();
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|value| value.trim().to_owned())
        .filter(|value| !value.is_empty())
}

fn parse_env_u64(
    lookup: &impl Fn(&str) -> Option<String>,
    name: &str,
    default: u64,
) -> AppResult<u64> {
    match non_blank(lookup(name)) {
        Some(value) => value.parse::<u64>().map_err(|error| {
            AppError::Validation(format!("invalid {name} value '{value}': {error}"))
        }),
        None => Ok(default),
    }
}
