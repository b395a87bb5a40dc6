use std::time::Duration;

/// Jobs shown per page when nothing else is configured.
pub const DEFAULT_PAGE_SIZE: usize = 12;

pub const DEFAULT_API_URL: &str = "http://127.0.0.1:8080";

/// Configuration for outbound calls to the job board API.
#[derive(Debug, Clone)]
pub struct GatewayConfig {
    /// Base URL of the API, without a trailing slash (e.g. "https://jobs.example.com")
    pub base_url: String,
    /// Per-request timeout. A hung request fails with `JobBoardError::Timeout`
    /// instead of leaving the store loading forever.
    pub timeout: Duration,
    pub user_agent: String,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_URL.to_string(),
            timeout: Duration::from_secs(30),
            user_agent: format!("jobboard-lite/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

impl GatewayConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url: String = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            ..Default::default()
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

/// How the gateway degrades when the API cannot be reached.
#[derive(Debug, Clone)]
pub struct FallbackConfig {
    /// Wrap the HTTP gateway in the fixture fallback strategy.
    pub enabled: bool,
    /// Log and swallow failed save/unsave/apply calls instead of reporting them.
    pub swallow_write_failures: bool,
}

impl Default for FallbackConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            swallow_write_failures: true,
        }
    }
}

#[derive(Debug, Clone)]
pub struct StoreConfig {
    pub page_size: usize,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl StoreConfig {
    /// A page size of zero is raised to one.
    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size.max(1);
        self
    }
}

/// Everything needed to assemble a gateway and a store.
#[derive(Debug, Clone, Default)]
pub struct ClientConfig {
    pub gateway: GatewayConfig,
    pub fallback: FallbackConfig,
    pub store: StoreConfig,
}

impl ClientConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            gateway: GatewayConfig::new(base_url),
            ..Default::default()
        }
    }
}
