use anyhow::{Context, Result, bail};
use axum::http::HeaderValue;
use directory::DEFAULT_EMPLOYEES_URL;
use reqwest::Url;

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub employees_url: Url,
    pub service_name: String,
    /// Empty means any origin.
    pub cors_allowed_origins: Vec<HeaderValue>,
}

impl AppConfig {
    pub fn load() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let raw_url = lookup("EMPLOYEES_URL").unwrap_or_else(|| DEFAULT_EMPLOYEES_URL.into());
        let employees_url = Url::parse(raw_url.trim())
            .with_context(|| format!("invalid EMPLOYEES_URL {raw_url:?}"))?;
        if !matches!(employees_url.scheme(), "http" | "https") {
            bail!(
                "EMPLOYEES_URL must use http or https, got {}",
                employees_url.scheme()
            );
        }

        let service_name = lookup("SERVICE_NAME")
            .map(|name| name.trim().to_string())
            .filter(|name| !name.is_empty())
            .unwrap_or_else(|| "roster-server".into());

        let cors_allowed_origins = lookup("CORS_ALLOWED_ORIGINS")
            .unwrap_or_default()
            .split(',')
            .map(str::trim)
            .filter(|origin| !origin.is_empty())
            .map(parse_origin)
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            employees_url,
            service_name,
            cors_allowed_origins,
        })
    }
}

fn parse_origin(origin: &str) -> Result<HeaderValue> {
    let url = Url::parse(origin)
        .with_context(|| format!("invalid origin {origin:?} in CORS_ALLOWED_ORIGINS"))?;
    if !matches!(url.scheme(), "http" | "https") || url.host_str().is_none() {
        bail!("CORS_ALLOWED_ORIGINS entry {origin:?} is not an http(s) origin");
    }
    HeaderValue::from_str(origin)
        .with_context(|| format!("invalid origin {origin:?} in CORS_ALLOWED_ORIGINS"))
}
