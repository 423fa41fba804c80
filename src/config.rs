use std::fmt;

#[derive(Debug, Clone)]
pub struct Config {
    /// Server bind address
    pub bind_addr: String,
    /// Upstream search API configuration
    pub github: GithubConfig,
    /// Origins allowed to call the API from a browser
    pub allowed_origins: Vec<String>,
}

#[derive(Debug, Clone)]
pub struct GithubConfig {
    /// Base URL for the GitHub REST API (no trailing slash needed)
    pub base_url: String,
    /// Personal access token; raises the search rate limit when present
    pub token: Option<ApiToken>,
    /// Request timeout in seconds (capped at 30)
    pub timeout_secs: u64,
}

/// Upstream credential. `Debug` never prints the value.
#[derive(Clone, PartialEq, Eq)]
pub struct ApiToken(String);

impl ApiToken {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for ApiToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ApiToken(***)")
    }
}

impl Default for GithubConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.github.com".to_string(),
            token: None,
            timeout_secs: 10,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bind_addr: "127.0.0.1:5001".to_string(),
            github: GithubConfig::default(),
            allowed_origins: vec![
                "http://localhost:3000".to_string(),
                "https://ssyejis.github.io".to_string(),
            ],
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(addr) = std::env::var("REPO_RANK_BIND_ADDR") {
            config.bind_addr = addr;
        }
        if let Ok(url) = std::env::var("GITHUB_API_URL") {
            config.github.base_url = url;
        }
        if let Ok(token) = std::env::var("GITHUB_TOKEN") {
            if !token.trim().is_empty() {
                config.github.token = Some(ApiToken::new(token.trim()));
            }
        }
        if let Ok(val) = std::env::var("GITHUB_TIMEOUT_SECS") {
            if let Ok(v) = val.parse::<u64>() {
                config.github.timeout_secs = v.clamp(1, 30);
            }
        }
        if let Ok(origins) = std::env::var("ALLOWED_ORIGINS") {
            config.allowed_origins = parse_origins(&origins);
        }

        config
    }
}

fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|o| o.trim().trim_end_matches('/').to_string())
        .filter(|o| !o.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_debug_is_redacted() {
        let config = GithubConfig {
            token: Some(ApiToken::new("ghp_supersecret")),
            ..GithubConfig::default()
        };
        let printed = format!("{config:?}");
        assert!(!printed.contains("ghp_supersecret"));
        assert!(printed.contains("***"));
    }

    #[test]
    fn test_parse_origins_trims_and_drops_empty() {
        let origins = parse_origins(" http://localhost:3000/ ,, https://example.github.io");
        assert_eq!(
            origins,
            vec!["http://localhost:3000", "https://example.github.io"]
        );
    }

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.bind_addr, "127.0.0.1:5001");
        assert_eq!(config.github.base_url, "https://api.github.com");
        assert!(config.github.token.is_none());
        assert_eq!(
            config.allowed_origins,
            vec!["http://localhost:3000", "https://ssyejis.github.io"]
        );
    }
}
