//! HTTP client used to issue timed search requests

#[cfg(test)]
mod integration_tests;

use crate::error::{describe_chain, AppError, Result};
use std::time::Duration;
use reqwest::{Client, Url};
use async_trait::async_trait;

/// Path appended to an instance base URL to run a search
pub const SEARCH_PATH: &str = "search";

/// Query parameter carrying the search terms
pub const QUERY_PARAM: &str = "q";

/// User agent sent with every request
pub const USER_AGENT: &str = concat!("searx-ping/", env!("CARGO_PKG_VERSION"));

/// HTTP client trait for abstraction and testing
#[async_trait]
pub trait HttpClient: Send + Sync {
    /// GET `url` and read the whole response body.
    ///
    /// Returns an error for transport failures and for error status codes.
    async fn fetch(&self, url: &Url) -> Result<FetchedPage>;
}

/// Response data kept after the body has been fully received
#[derive(Debug, Clone, PartialEq)]
pub struct FetchedPage {
    pub status_code: u16,
    pub body_size: usize,
}

impl FetchedPage {
    /// Check if the response indicates success
    pub fn is_success(&self) -> bool {
        self.status_code >= 200 && self.status_code < 300
    }
}

/// Builder for instance search URLs
pub struct SearchRequest;

impl SearchRequest {
    /// Build `{endpoint}/search?q={query}`.
    ///
    /// Any path prefix on the endpoint is kept, a trailing slash is dropped.
    pub fn build_url(endpoint: &str, query: &str) -> Result<Url> {
        let base = endpoint.trim_end_matches('/');
        let mut url = Url::parse(&format!("{}/{}", base, SEARCH_PATH))
            .map_err(|e| AppError::parse(format!("Invalid instance URL '{}': {}", endpoint, e)))?;

        url.query_pairs_mut().append_pair(QUERY_PARAM, query);
        Ok(url)
    }
}

/// reqwest-backed client for search requests.
///
/// Certificate validation is disabled: the instance list includes
/// self-signed and inconsistently trusted hosts. Proxy variables such as
/// `ALL_PROXY=socks5h://127.0.0.1:9050` are honoured, which is how the onion
/// instance becomes reachable.
pub struct SearchClient {
    client: Client,
    timeout: Duration,
}

impl SearchClient {
    /// Create a new search client with the given per-request timeout
    pub fn new(timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .danger_accept_invalid_certs(true)
            .build()
            .map_err(|e| AppError::network(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self { client, timeout })
    }

    /// Configured per-request timeout
    pub fn timeout(&self) -> Duration {
        self.timeout
    }
}

#[async_trait]
impl HttpClient for SearchClient {
    async fn fetch(&self, url: &Url) -> Result<FetchedPage> {
        let response = self.client.get(url.clone()).send().await?;

        let status = response.status();
        if status.is_client_error() || status.is_server_error() {
            return Err(AppError::http_request(format!("HTTP {}", status)));
        }

        // Timing covers body transfer, not just headers
        let body = response.bytes().await
            .map_err(|e| AppError::http_request(format!("Failed to read response body: {}", describe_chain(&e))))?;

        Ok(FetchedPage {
            status_code: status.as_u16(),
            body_size: body.len(),
        })
    }
}

/// Utility functions for HTTP operations
pub struct HttpUtils;

impl HttpUtils {
    /// Validate URL format
    pub fn validate_url(url: &str) -> Result<()> {
        let parsed = Url::parse(url)
            .map_err(|e| AppError::validation(format!("Invalid URL format: {}", e)))?;

        match parsed.scheme() {
            "http" | "https" => {},
            scheme => return Err(AppError::validation(format!("Unsupported URL scheme: {}", scheme))),
        }

        if parsed.host().is_none() {
            return Err(AppError::validation("URL must have a host"));
        }

        Ok(())
    }

    /// Extract host from URL
    pub fn extract_host(url: &str) -> Result<String> {
        let parsed = Url::parse(url)
            .map_err(|e| AppError::parse(format!("Invalid URL: {}", e)))?;

        parsed.host_str()
            .ok_or_else(|| AppError::validation("URL must have a host"))
            .map(|s| s.to_string())
    }

    /// Check if the host is a Tor hidden service
    pub fn is_onion(url: &str) -> bool {
        Self::extract_host(url)
            .map(|host| host.ends_with(".onion"))
            .unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_url_basic() {
        let url = SearchRequest::build_url("https://searx.be", "machine learning").unwrap();
        assert_eq!(url.as_str(), "https://searx.be/search?q=machine+learning");
    }

    #[test]
    fn test_build_url_keeps_path_prefix() {
        let url = SearchRequest::build_url("https://darmarit.org/searx", "deep learning").unwrap();
        assert_eq!(url.path(), "/searx/search");
        assert_eq!(url.query(), Some("q=deep+learning"));
    }

    #[test]
    fn test_build_url_trailing_slash() {
        let url = SearchRequest::build_url("https://priv.au/", "neural networks").unwrap();
        assert_eq!(url.as_str(), "https://priv.au/search?q=neural+networks");
    }

    #[test]
    fn test_build_url_query_roundtrips() {
        let url = SearchRequest::build_url("https://etsi.me", "c++ & rust?").unwrap();
        let pairs: Vec<(String, String)> = url.query_pairs().into_owned().collect();
        assert_eq!(pairs, vec![("q".to_string(), "c++ & rust?".to_string())]);
    }

    #[test]
    fn test_build_url_invalid_endpoint() {
        let result = SearchRequest::build_url("not-a-url", "query");
        assert!(matches!(result.unwrap_err(), AppError::Parse(_)));
    }

    #[test]
    fn test_search_client_creation() {
        let client = SearchClient::new(Duration::from_secs(7)).unwrap();
        assert_eq!(client.timeout(), Duration::from_secs(7));
    }

    #[test]
    fn test_fetched_page_success() {
        assert!(FetchedPage { status_code: 200, body_size: 10 }.is_success());
        assert!(!FetchedPage { status_code: 304, body_size: 0 }.is_success());
    }

    #[test]
    fn test_http_utils_validate_url() {
        assert!(HttpUtils::validate_url("https://searx.be").is_ok());
        assert!(HttpUtils::validate_url("http://example.com").is_ok());
        assert!(HttpUtils::validate_url("https://www.jabber-germany.de/searx").is_ok());
        assert!(HttpUtils::validate_url("http://lbmegc3rjnekmdxuisynqdc7y3m2tgyq7gj257ooddaobxqjw36bdayd.onion").is_ok());

        assert!(HttpUtils::validate_url("ftp://example.com").is_err());
        assert!(HttpUtils::validate_url("not-a-url").is_err());
        assert!(HttpUtils::validate_url("").is_err());
    }

    #[test]
    fn test_http_utils_extract_host() {
        assert_eq!(HttpUtils::extract_host("https://search.sapti.me").unwrap(), "search.sapti.me");
        assert_eq!(HttpUtils::extract_host("https://darmarit.org/searx").unwrap(), "darmarit.org");
        assert!(HttpUtils::extract_host("not-a-url").is_err());
    }

    #[test]
    fn test_http_utils_is_onion() {
        assert!(HttpUtils::is_onion("http://lbmegc3rjnekmdxuisynqdc7y3m2tgyq7gj257ooddaobxqjw36bdayd.onion"));
        assert!(!HttpUtils::is_onion("https://searx.be"));
        assert!(!HttpUtils::is_onion("garbage"));
    }
}
