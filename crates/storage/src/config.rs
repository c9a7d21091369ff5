use std::time::Duration;

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Base URL of the admin API, without trailing slash.
    pub api_url: String,
    pub timeout: Duration,
}

impl Config {
    pub fn new(api_url: &str, timeout: Duration) -> Result<Self, ConfigError> {
        let api_url = api_url.trim().trim_end_matches('/');
        if api_url.is_empty() {
            return Err(ConfigError::MissingApiUrl);
        }
        if !(api_url.starts_with("http://") || api_url.starts_with("https://")) {
            return Err(ConfigError::InvalidApiUrl(api_url.to_string()));
        }
        if timeout.is_zero() {
            return Err(ConfigError::InvalidTimeout(String::from("0")));
        }
        Ok(Self {
            api_url: api_url.to_string(),
            timeout,
        })
    }

    /// Reads `LAZYFIT_API_URL` and `LAZYFIT_TIMEOUT_SECS` from the environment or a `.env` file.
    /// A given `api_url` replaces `LAZYFIT_API_URL`.
    pub fn from_env(api_url: Option<&str>) -> Result<Self, ConfigError> {
        Self::from_source(api_url, |key| dotenvy::var(key).ok())
    }

    fn from_source(
        api_url: Option<&str>,
        var: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, ConfigError> {
        Self::from_vars(
            api_url.map(String::from).or_else(|| var("LAZYFIT_API_URL")),
            var("LAZYFIT_TIMEOUT_SECS"),
        )
    }

    fn from_vars(api_url: Option<String>, timeout: Option<String>) -> Result<Self, ConfigError> {
        let api_url = api_url.ok_or(ConfigError::MissingApiUrl)?;
        let timeout = match timeout {
            Some(value) => Duration::from_secs(
                value
                    .trim()
                    .parse::<u64>()
                    .map_err(|_| ConfigError::InvalidTimeout(value.clone()))?,
            ),
            None => DEFAULT_TIMEOUT,
        };
        Self::new(&api_url, timeout)
    }

    pub fn with_timeout(self, timeout: Duration) -> Result<Self, ConfigError> {
        Self::new(&self.api_url, timeout)
    }
}

#[derive(thiserror::Error, Debug, PartialEq, Eq)]
pub enum ConfigError {
    #[error("LAZYFIT_API_URL is not set")]
    MissingApiUrl,
    #[error("invalid API URL: {0}")]
    InvalidApiUrl(String),
    #[error("invalid timeout: {0}")]
    InvalidTimeout(String),
}
