//! Async client that fetches pages and hands them to the stats-core parsers

use crate::endpoint::{ApiPath, FileType, UrlBuilder, DEFAULT_BASE_URL};
use crate::error::{Error, Result};
use crate::listing::{parse_formats_page, parse_timeframes_page};
use serde::de::DeserializeOwned;
use stats_core::{
    map_chaos_data, parse_leads_page, parse_metagame_page, parse_usage_page, Chaos, Format,
    Leads, Metagame, RawChaos, Timeframe, Usages,
};
use std::time::Duration;
use tracing::{debug, info};
use url::Url;

/// Default transport timeout
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Client configuration
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Root of the statistics tree; point this at a mirror or CORS proxy if needed
    pub base_url: String,
    /// Per-request timeout
    pub timeout: Duration,
    pub user_agent: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
            user_agent: concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

/// Client for the published usage statistics
#[derive(Debug, Clone)]
pub struct StatsClient {
    config: ClientConfig,
    http: reqwest::Client,
}

impl StatsClient {
    /// Create a client with its own HTTP connection pool
    pub fn new(config: ClientConfig) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .user_agent(config.user_agent.as_str())
            .build()?;
        Ok(Self { config, http })
    }

    /// Create a client around an existing `reqwest::Client`.
    ///
    /// The timeout and user agent of `config` are not applied in this case.
    pub fn with_client(config: ClientConfig, http: reqwest::Client) -> Self {
        Self { config, http }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// List all available timeframes
    pub async fn fetch_timeframes(&self) -> Result<Vec<Timeframe>> {
        let url = self.url_builder()?.build()?;
        let html = self.request_text(url).await?;
        parse_timeframes_page(&html)
    }

    /// Most recent timeframe, see [`latest_timeframe`]
    pub async fn fetch_latest_timeframe(&self) -> Result<Option<Timeframe>> {
        let timeframes = self.fetch_timeframes().await?;
        Ok(latest_timeframe(&timeframes).cloned())
    }

    /// List the formats of a timeframe, or its monotype formats
    pub async fn fetch_formats(&self, timeframe: &Timeframe, monotype: bool) -> Result<Vec<Format>> {
        let url = self
            .url_builder()?
            .set_timeframe(timeframe)
            .set_monotype(monotype)
            .build()?;
        let html = self.request_text(url).await?;
        parse_formats_page(&html)
    }

    pub async fn fetch_usages(&self, timeframe: &Timeframe, format: &Format) -> Result<Usages> {
        let url = self
            .url_builder()?
            .set_file_type(FileType::Text)
            .set_timeframe(timeframe)
            .set_format(format)
            .build()?;
        let page = self.request_text(url).await?;
        Ok(parse_usage_page(&page)?)
    }

    pub async fn fetch_leads(&self, timeframe: &Timeframe, format: &Format) -> Result<Leads> {
        let url = self
            .url_builder()?
            .set_sub_path(ApiPath::Leads)
            .set_file_type(FileType::Text)
            .set_timeframe(timeframe)
            .set_format(format)
            .build()?;
        let page = self.request_text(url).await?;
        Ok(parse_leads_page(&page)?)
    }

    pub async fn fetch_metagame(&self, timeframe: &Timeframe, format: &Format) -> Result<Metagame> {
        let url = self
            .url_builder()?
            .set_sub_path(ApiPath::Metagame)
            .set_file_type(FileType::Text)
            .set_timeframe(timeframe)
            .set_format(format)
            .build()?;
        let page = self.request_text(url).await?;
        Ok(parse_metagame_page(&page)?)
    }

    /// Load moveset data from the chaos JSON.
    ///
    /// The `/chaos/` and `/moveset/` trees hold the same data; only the JSON
    /// one is parsed.
    pub async fn fetch_movesets(&self, timeframe: &Timeframe, format: &Format) -> Result<Chaos> {
        let url = self
            .url_builder()?
            .set_sub_path(ApiPath::Chaos)
            .set_file_type(FileType::Json)
            .set_timeframe(timeframe)
            .set_format(format)
            .build()?;
        let raw: RawChaos = self.request_json(url).await?;
        Ok(map_chaos_data(raw))
    }

    fn url_builder(&self) -> Result<UrlBuilder> {
        UrlBuilder::new(&self.config.base_url)
    }

    async fn send(&self, url: Url) -> Result<reqwest::Response> {
        debug!(%url, "requesting");
        let response = self.http.get(url.clone()).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        info!(%url, status = status.as_u16(), "fetched");
        Ok(response)
    }

    async fn request_text(&self, url: Url) -> Result<String> {
        let body = self.send(url).await?.text().await?;
        debug!(bytes = body.len(), "received text body");
        Ok(body)
    }

    async fn request_json<T: DeserializeOwned>(&self, url: Url) -> Result<T> {
        Ok(self.send(url).await?.json().await?)
    }
}

/// Latest timeframe by month; a plain month wins over its modified variants.
///
/// Timeframes whose year or month is not numeric sort first.
pub fn latest_timeframe(timeframes: &[Timeframe]) -> Option<&Timeframe> {
    timeframes
        .iter()
        .max_by_key(|t| (t.first_day(), t.modifier.is_none()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    const LEADS_PAGE: &str = "\
Total leads: 4
+ ---- + -------- + ------- + ---- + ------ +
| Rank | Pokemon  | Usage % | Raw  | %      |
+ ---- + -------- + ------- + ---- + ------ +
| 1    | Skarmory | 50.000% | 2    | 50.000%|
| 2    | Gengar   | 50.000% | 2    | 50.000%|
+ ---- + -------- + ------- + ---- + ------ +
";

    /// Serve one canned response on a local port and return the base URL
    async fn serve_once(status_line: &'static str, body: &'static str) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut buf = [0u8; 4096];
            let _ = socket.read(&mut buf).await;
            let response = format!(
                "{status_line}\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
                body.len()
            );
            socket.write_all(response.as_bytes()).await.unwrap();
            let _ = socket.shutdown().await;
        });

        format!("http://{}/stats/", addr)
    }

    fn local_client(base_url: String) -> StatsClient {
        let config = ClientConfig {
            base_url,
            ..ClientConfig::default()
        };
        let http = reqwest::Client::builder().no_proxy().build().unwrap();
        StatsClient::with_client(config, http)
    }

    #[test]
    fn test_default_config() {
        let config = ClientConfig::default();
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.timeout, Duration::from_secs(10));
        assert!(config.user_agent.starts_with("stats-client/"));
    }

    #[test]
    fn test_latest_timeframe() {
        let timeframes = vec![
            Timeframe::new("2014", "11"),
            Timeframe::new("2019", "01").with_modifier("DLC1"),
            Timeframe::new("2019", "01"),
            Timeframe::new("2018", "12"),
            Timeframe::new("misc", "x"),
        ];
        assert_eq!(
            latest_timeframe(&timeframes),
            Some(&Timeframe::new("2019", "01"))
        );
        assert_eq!(latest_timeframe(&[]), None);
    }

    #[tokio::test]
    async fn test_fetch_leads() {
        let base = serve_once("HTTP/1.1 200 OK", LEADS_PAGE).await;
        let client = local_client(base);

        let leads = client
            .fetch_leads(&Timeframe::new("2019", "01"), &Format::new("gen7ou"))
            .await
            .unwrap();

        assert_eq!(leads.total, 4);
        assert_eq!(leads.entries()[1].pokemon, "Gengar");
    }

    #[tokio::test]
    async fn test_fetch_status_error() {
        let base = serve_once("HTTP/1.1 404 Not Found", "missing").await;
        let client = local_client(base);

        let err = client
            .fetch_usages(&Timeframe::new("2019", "01"), &Format::new("gen7ou"))
            .await
            .unwrap_err();

        match err {
            Error::Status { url, status } => {
                assert_eq!(status, 404);
                assert!(url.ends_with("/stats/2019-01/gen7ou-0.txt"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[tokio::test]
    async fn test_fetch_parse_error() {
        let base = serve_once("HTTP/1.1 200 OK", "not a metagame page").await;
        let client = local_client(base);

        let err = client
            .fetch_metagame(&Timeframe::new("2019", "01"), &Format::new("gen7ou"))
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            Error::Parse(stats_core::Error::MalformedPage(_))
        ));
    }
}
