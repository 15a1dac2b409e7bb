//! Outbound search client for the job-listings API.

use common::SearchQuery;
use reqwest::header::{HOST, HeaderMap, HeaderName, HeaderValue, USER_AGENT};
use tokio::time::{Duration, timeout};
use tracing::{debug, warn};
use url::Url;

use crate::config::Config;
use crate::error::ClientError;

const AUTHORIZATION_KEY: HeaderName = HeaderName::from_static("authorization-key");

/// What a single outbound call produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UpstreamOutcome {
    Success { body: Vec<u8>, status: u16 },
    NetworkError,
    Timeout,
}

/// Issues one search request per call. Holds no per-request state, so a
/// single instance is shared by all inbound requests.
#[derive(Debug, Clone)]
pub struct UpstreamClient {
    client: reqwest::Client,
    base_url: Url,
    headers: HeaderMap,
    timeout: Duration,
}

impl UpstreamClient {
    pub fn new(config: &Config) -> Result<Self, ClientError> {
        let client = reqwest::Client::builder().build()?;

        let mut headers = HeaderMap::new();
        insert_header(&mut headers, HOST, &config.upstream_host());
        insert_header(&mut headers, USER_AGENT, &config.user_agent);
        insert_header(&mut headers, AUTHORIZATION_KEY, &config.authorization_key);

        Ok(Self {
            client,
            base_url: config.upstream_base_url.clone(),
            headers,
            timeout: config.timeout,
        })
    }

    /// Full outbound URL for `query`. Empty terms are left out.
    pub fn search_url(&self, query: &SearchQuery) -> Url {
        let mut url = self.base_url.clone();
        let params = query.upstream_params();
        if !params.is_empty() {
            url.query_pairs_mut().extend_pairs(params);
        }
        url
    }

    /// Sends the search and collects the full body. The timer covers both the
    /// request and the body; on expiry the in-flight call is dropped.
    pub async fn fetch(&self, query: &SearchQuery) -> UpstreamOutcome {
        let url = self.search_url(query);
        debug!("Requesting {}", url);

        let call = async {
            let response = self
                .client
                .get(url)
                .headers(self.headers.clone())
                .send()
                .await?;
            let status = response.status().as_u16();
            let body = response.bytes().await?;
            Ok::<_, reqwest::Error>((status, body))
        };

        match timeout(self.timeout, call).await {
            Ok(Ok((status, body))) => UpstreamOutcome::Success {
                body: body.to_vec(),
                status,
            },
            Ok(Err(e)) if e.is_timeout() => {
                warn!("Request timed out: {}", e);
                UpstreamOutcome::Timeout
            }
            Ok(Err(e)) => {
                warn!("Upstream request failed: {}", e);
                UpstreamOutcome::NetworkError
            }
            Err(_) => {
                warn!("Request timed out after {:?}", self.timeout);
                UpstreamOutcome::Timeout
            }
        }
    }
}

fn insert_header(headers: &mut HeaderMap, name: HeaderName, value: &str) {
    match HeaderValue::from_str(value) {
        Ok(value) => {
            headers.insert(name, value);
        }
        Err(_) => warn!("Skipping {} header: value is not a valid header", name),
    }
}
