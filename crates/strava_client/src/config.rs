use crate::StravaError;
use crate::http_client::DEFAULT_BASE_URL;
use crate::pages::DEFAULT_PER_PAGE;
use secrecy::SecretString;

#[derive(Clone, Debug)]
pub struct ClientConfig {
    pub access_token: SecretString,
    pub base_url: String,
    pub per_page: u32,
}

impl ClientConfig {
    pub fn new(access_token: SecretString) -> Self {
        Self {
            access_token,
            base_url: DEFAULT_BASE_URL.into(),
            per_page: DEFAULT_PER_PAGE,
        }
    }

    pub fn from_env() -> Result<Self, StravaError> {
        Self::from_env_with(|k| std::env::var(k).ok())
    }

    /// Testable helper that reads configuration values using the provided
    /// function instead of the process environment.
    pub fn from_env_with<F>(mut get: F) -> Result<Self, StravaError>
    where
        F: FnMut(&str) -> Option<String>,
    {
        let token = get("STRAVA_ACCESS_TOKEN")
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty())
            .ok_or_else(|| StravaError::Config("STRAVA_ACCESS_TOKEN missing".into()))?;
        let base_url = get("STRAVA_BASE_URL").unwrap_or_else(|| DEFAULT_BASE_URL.into());
        let per_page = match get("STRAVA_PER_PAGE") {
            Some(raw) => parse_per_page(&raw)?,
            None => DEFAULT_PER_PAGE,
        };
        Ok(Self {
            access_token: SecretString::new(token.into()),
            base_url,
            per_page,
        })
    }
}

/// Page sizes must be positive integers.
pub fn parse_per_page(raw: &str) -> Result<u32, StravaError> {
    match raw.trim().parse::<u32>() {
        Ok(n) if n > 0 => Ok(n),
        _ => Err(StravaError::Config(format!("invalid page size: {raw}"))),
    }
}
