use async_trait::async_trait;
use folio_core::HistoryPeriod;
use thiserror::Error;

#[cfg(target_arch = "wasm32")]
use folio_core::{
    AvailableStocks, FinancialMetrics, PerformanceSummary, Portfolio, RiskMetrics,
    ScreenerResponse, StockHistory, TechnicalIndicators,
};
#[cfg(target_arch = "wasm32")]
use screen_engine::FactorWeights;

const DEFAULT_BASE_URL: &str = "http://localhost:8000";

#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub base_url: String,
}

impl ApiConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }
}

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("you must be logged in")]
    MissingAuth,
    #[error("request error: {0}")]
    Request(String),
    #[error("server returned status {0}")]
    Status(u16),
    #[error("decode error: {0}")]
    Decode(String),
}

/// Credential seam for authenticated endpoints. Implementations query the
/// external auth collaborator; the client asks for a fresh token before
/// every authenticated request and never caches one.
#[async_trait(?Send)]
pub trait TokenProvider {
    async fn id_token(&self) -> Option<String>;
}

/// Fixed-token provider for tests and headless tooling.
#[derive(Debug, Clone, Default)]
pub struct StaticTokens(pub Option<String>);

#[async_trait(?Send)]
impl TokenProvider for StaticTokens {
    async fn id_token(&self) -> Option<String> {
        self.0.clone()
    }
}

/// Typed consumer of the dashboard API.
#[derive(Debug, Clone)]
pub struct FolioClient {
    config: ApiConfig,
}

impl FolioClient {
    pub fn new(config: ApiConfig) -> Self {
        Self { config }
    }

    pub fn from_base(base_url: impl Into<String>) -> Self {
        Self::new(ApiConfig::new(base_url))
    }

    pub fn base_url(&self) -> &str {
        &self.config.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.config.base_url.trim_end_matches('/'), path)
    }

    pub fn history_path(symbol: &str, period: HistoryPeriod) -> String {
        format!("/stocks/{symbol}/history?period={}", period.as_str())
    }

    async fn bearer(&self, auth: &dyn TokenProvider) -> Result<String, ApiError> {
        auth.id_token().await.ok_or(ApiError::MissingAuth)
    }
}

#[cfg(target_arch = "wasm32")]
impl FolioClient {
    async fn get_json<T: serde::de::DeserializeOwned>(
        &self,
        path: &str,
        token: Option<&str>,
    ) -> Result<T, ApiError> {
        use gloo_net::http::Request;

        let mut req = Request::get(&self.url(path));
        if let Some(token) = token {
            req = req.header("Authorization", &format!("Bearer {token}"));
        }
        let resp = req
            .send()
            .await
            .map_err(|e| ApiError::Request(e.to_string()))?;
        if !resp.ok() {
            return Err(ApiError::Status(resp.status()));
        }
        resp.json::<T>()
            .await
            .map_err(|e| ApiError::Decode(e.to_string()))
    }

    async fn post_json<B: serde::Serialize, T: serde::de::DeserializeOwned>(
        &self,
        path: &str,
        token: Option<&str>,
        body: &B,
    ) -> Result<T, ApiError> {
        use gloo_net::http::Request;

        let mut req = Request::post(&self.url(path));
        if let Some(token) = token {
            req = req.header("Authorization", &format!("Bearer {token}"));
        }
        let resp = req
            .json(body)
            .map_err(|e| ApiError::Request(e.to_string()))?
            .send()
            .await
            .map_err(|e| ApiError::Request(e.to_string()))?;
        if !resp.ok() {
            return Err(ApiError::Status(resp.status()));
        }
        resp.json::<T>()
            .await
            .map_err(|e| ApiError::Decode(e.to_string()))
    }

    /// `GET /stocks/available`
    pub async fn available_stocks(&self) -> Result<AvailableStocks, ApiError> {
        self.get_json("/stocks/available", None).await
    }

    /// `GET /stocks/{symbol}/history?period=`
    pub async fn history(
        &self,
        symbol: &str,
        period: HistoryPeriod,
    ) -> Result<StockHistory, ApiError> {
        self.get_json(&Self::history_path(symbol, period), None)
            .await
    }

    /// `GET /user-portfolio/` (bearer)
    pub async fn portfolio(&self, auth: &dyn TokenProvider) -> Result<Portfolio, ApiError> {
        let token = self.bearer(auth).await?;
        self.get_json("/user-portfolio/", Some(&token)).await
    }

    /// `POST /user-portfolio/` (bearer). Replaces the whole stock list.
    pub async fn save_portfolio(
        &self,
        auth: &dyn TokenProvider,
        portfolio: &Portfolio,
    ) -> Result<Portfolio, ApiError> {
        let token = self.bearer(auth).await?;
        self.post_json("/user-portfolio/", Some(&token), portfolio)
            .await
    }

    /// `DELETE /user-portfolio/{symbol}` (bearer)
    pub async fn delete_position(
        &self,
        auth: &dyn TokenProvider,
        symbol: &str,
    ) -> Result<(), ApiError> {
        use gloo_net::http::Request;

        let token = self.bearer(auth).await?;
        let resp = Request::delete(&self.url(&format!("/user-portfolio/{symbol}")))
            .header("Authorization", &format!("Bearer {token}"))
            .send()
            .await
            .map_err(|e| ApiError::Request(e.to_string()))?;
        if !resp.ok() {
            return Err(ApiError::Status(resp.status()));
        }
        Ok(())
    }

    /// `GET /user-portfolio/performance` (bearer)
    pub async fn performance(
        &self,
        auth: &dyn TokenProvider,
    ) -> Result<PerformanceSummary, ApiError> {
        let token = self.bearer(auth).await?;
        self.get_json("/user-portfolio/performance", Some(&token))
            .await
    }

    /// `POST /screener/` with the current weight set as payload.
    pub async fn screen(&self, weights: &FactorWeights) -> Result<ScreenerResponse, ApiError> {
        self.post_json("/screener/", None, weights).await
    }

    /// `GET /financial/metrics/{symbol}`
    pub async fn financial_metrics(&self, symbol: &str) -> Result<FinancialMetrics, ApiError> {
        self.get_json(&format!("/financial/metrics/{symbol}"), None)
            .await
    }

    /// `GET /technical/indicators/{symbol}`
    pub async fn technical_indicators(
        &self,
        symbol: &str,
    ) -> Result<TechnicalIndicators, ApiError> {
        self.get_json(&format!("/technical/indicators/{symbol}"), None)
            .await
    }

    /// `GET /risk/metrics/{symbol}`
    pub async fn risk_metrics(&self, symbol: &str) -> Result<RiskMetrics, ApiError> {
        self.get_json(&format!("/risk/metrics/{symbol}"), None).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::executor::block_on;

    #[test]
    fn url_join_tolerates_trailing_slash() {
        let plain = FolioClient::from_base("http://localhost:8000");
        let slashed = FolioClient::from_base("http://localhost:8000/");
        assert_eq!(
            plain.url("/stocks/available"),
            "http://localhost:8000/stocks/available"
        );
        assert_eq!(plain.url("/stocks/available"), slashed.url("/stocks/available"));
    }

    #[test]
    fn history_path_carries_period() {
        assert_eq!(
            FolioClient::history_path("AAPL", HistoryPeriod::OneYear),
            "/stocks/AAPL/history?period=1Y"
        );
    }

    #[test]
    fn default_config_points_at_localhost() {
        let client = FolioClient::new(ApiConfig::default());
        assert_eq!(client.base_url(), "http://localhost:8000");
        let overridden = ApiConfig::default().with_base_url("https://api.example.com");
        assert_eq!(overridden.base_url, "https://api.example.com");
    }

    #[test]
    fn bearer_requires_a_token() {
        let client = FolioClient::new(ApiConfig::default());
        let err = block_on(client.bearer(&StaticTokens(None))).unwrap_err();
        assert!(matches!(err, ApiError::MissingAuth));

        let token =
            block_on(client.bearer(&StaticTokens(Some("abc123".into())))).unwrap();
        assert_eq!(token, "abc123");
    }
}
