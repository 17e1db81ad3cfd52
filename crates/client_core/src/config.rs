use thiserror::Error;
use url::Url;

pub const DEFAULT_ORDER_ENDPOINT: &str = "http://localhost:3001/api/orders";

const ENDPOINT_ENV_VARS: [&str; 2] = ["ORDER_ENDPOINT", "APP__ORDER_ENDPOINT"];

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid order endpoint '{value}': {source}")]
    InvalidEndpoint {
        value: String,
        source: url::ParseError,
    },
    #[error("order endpoint '{0}' must use http or https")]
    UnsupportedScheme(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub order_endpoint: Url,
}

/// Resolves settings from the default, then the environment, then an explicit flag value.
pub fn load_settings(flag_endpoint: Option<&str>) -> Result<Settings, ConfigError> {
    let env_endpoint = ENDPOINT_ENV_VARS
        .iter()
        .rev()
        .find_map(|name| std::env::var(name).ok().filter(|v| !v.trim().is_empty()));
    let raw = resolve_endpoint(flag_endpoint, env_endpoint.as_deref());
    Ok(Settings {
        order_endpoint: parse_endpoint(raw)?,
    })
}

fn resolve_endpoint<'a>(flag: Option<&'a str>, env: Option<&'a str>) -> &'a str {
    [flag, env]
        .into_iter()
        .flatten()
        .map(str::trim)
        .find(|v| !v.is_empty())
        .unwrap_or(DEFAULT_ORDER_ENDPOINT)
}

pub fn parse_endpoint(raw: &str) -> Result<Url, ConfigError> {
    let url = Url::parse(raw.trim()).map_err(|source| ConfigError::InvalidEndpoint {
        value: raw.to_string(),
        source,
    })?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        _ => Err(ConfigError::UnsupportedScheme(raw.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flag_wins_over_environment_and_default() {
        assert_eq!(
            resolve_endpoint(Some("http://flag:1/orders"), Some("http://env:2/orders")),
            "http://flag:1/orders"
        );
        assert_eq!(
            resolve_endpoint(None, Some("http://env:2/orders")),
            "http://env:2/orders"
        );
        assert_eq!(resolve_endpoint(None, None), DEFAULT_ORDER_ENDPOINT);
    }

    #[test]
    fn blank_values_are_skipped() {
        assert_eq!(
            resolve_endpoint(Some("   "), Some("http://env:2/orders")),
            "http://env:2/orders"
        );
        assert_eq!(resolve_endpoint(Some(""), Some(" ")), DEFAULT_ORDER_ENDPOINT);
    }

    #[test]
    fn default_endpoint_parses() {
        let url = parse_endpoint(DEFAULT_ORDER_ENDPOINT).expect("default endpoint");
        assert_eq!(url.path(), "/api/orders");
        assert_eq!(url.port(), Some(3001));
    }

    #[test]
    fn rejects_relative_and_non_http_endpoints() {
        assert!(matches!(
            parse_endpoint("/api/orders"),
            Err(ConfigError::InvalidEndpoint { .. })
        ));
        assert!(matches!(
            parse_endpoint("ftp://localhost/orders"),
            Err(ConfigError::UnsupportedScheme(_))
        ));
    }
}
