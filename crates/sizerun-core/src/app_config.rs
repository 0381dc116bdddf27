/// Catalog endpoint returning one product's detail for a URL or SKU query.
pub const DEFAULT_PRODUCT_URL: &str = "https://app.retailed.io/api/v1/scraper/goat/product";

/// Catalog endpoint returning the price-by-size list for a product id.
pub const DEFAULT_PRICES_URL: &str = "https://app.retailed.io/api/v1/scraper/goat/prices";

pub const DEFAULT_USER_AGENT: &str = "sizerun/0.1 (catalog-enrichment)";

#[derive(Clone)]
pub struct AppConfig {
    /// Static credential sent as the `x-api-key` header on every request.
    pub api_key: String,
    pub product_url: String,
    pub prices_url: String,
    pub log_level: String,
    pub request_timeout_secs: u64,
    /// Total attempts per request, including the first one.
    pub max_attempts: u32,
    /// Fixed wait between attempts after a timeout.
    pub retry_delay_ms: u64,
    pub max_concurrent_jobs: usize,
    pub user_agent: String,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("api_key", &"[redacted]")
            .field("product_url", &self.product_url)
            .field("prices_url", &self.prices_url)
            .field("log_level", &self.log_level)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .field("max_attempts", &self.max_attempts)
            .field("retry_delay_ms", &self.retry_delay_ms)
            .field("max_concurrent_jobs", &self.max_concurrent_jobs)
            .field("user_agent", &self.user_agent)
            .finish()
    }
}
