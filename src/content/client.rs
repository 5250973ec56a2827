use std::sync::Arc;
use std::time::Duration;

use reqwest::{Client, Url};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;
use spdlog::debug;
use thiserror::Error;

use crate::config::{Sanity, DEFAULT_API_VERSION};
use crate::content::query::Query;

const DEFAULT_TIMEOUT_SECS: u64 = 10;

#[derive(Error, Debug)]
pub enum ContentError {
    #[error("Network: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Query rejected ({kind}): {description}")]
    Query { kind: String, description: String },

    #[error("Malformed response: {0}")]
    Malformed(#[from] serde_json::Error),

    #[error("No document matched the query")]
    NotFound,

    #[error("Invalid url: {0}")]
    InvalidUrl(#[from] url::ParseError),
}

pub type Result<T> = std::result::Result<T, ContentError>;

/// Read-only access to a structured content store.
#[allow(async_fn_in_trait)]
pub trait ContentSource {
    /// Runs `query` and returns the raw `result` document, `Value::Null` when nothing matched.
    async fn fetch(&self, query: &Query) -> Result<Value>;
}

/// Runs `query` and decodes its result. A null result is [`ContentError::NotFound`].
pub async fn fetch_as<S, T>(source: &S, query: &Query) -> Result<T>
    where
        S: ContentSource,
        T: DeserializeOwned,
{
    let value = source.fetch(query).await?;
    if value.is_null() {
        return Err(ContentError::NotFound);
    }
    Ok(serde_json::from_value(value)?)
}

#[derive(Deserialize)]
struct QueryResponse {
    #[serde(default)]
    result: Option<Value>,
    error: Option<QueryErrorBody>,
}

#[derive(Deserialize)]
struct QueryErrorBody {
    #[serde(rename = "type", default)]
    kind: String,
    #[serde(default)]
    description: String,
}

/// HTTP client for the Sanity query API.
#[derive(Clone)]
pub struct SanityClient {
    client: Client,
    base_url: Arc<Url>,
    token: Option<String>,
}

impl SanityClient {
    pub fn new(config: &Sanity) -> Result<Self> {
        let base_url = Arc::new(Self::base_url(config)?);
        let timeout = Duration::from_secs(config.timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS));
        let client = Client::builder().timeout(timeout).build()?;

        Ok(Self {
            client,
            base_url,
            token: config.token.clone(),
        })
    }

    fn base_url(config: &Sanity) -> Result<Url> {
        // The CDN never serves authenticated requests
        let host = if config.use_cdn && config.token.is_none() { "apicdn" } else { "api" };
        let api_version = config.api_version.as_deref().unwrap_or(DEFAULT_API_VERSION);
        let api_version = api_version.trim_start_matches('v');

        let url = format!("https://{}.{}.sanity.io/v{}/data/query/{}",
                          config.project_id, host, api_version, config.dataset);
        Ok(Url::parse(&url)?)
    }

    pub fn query_url(&self, query: &Query) -> Url {
        let mut url = self.base_url.as_ref().clone();
        url.query_pairs_mut().extend_pairs(query.to_pairs());
        url
    }
}

impl ContentSource for SanityClient {
    async fn fetch(&self, query: &Query) -> Result<Value> {
        let url = self.query_url(query);
        debug!("Querying content store: {}", url.path());

        let mut request = self.client.get(url);
        if let Some(ref token) = self.token {
            request = request.bearer_auth(token);
        }

        let response = request.send().await?;
        let status = response.status().as_u16();
        let bytes = response.bytes().await?;

        parse_response(status, &bytes)
    }
}

/// Unwraps the `{"result": ...}` envelope of a query response.
pub fn parse_response(status: u16, bytes: &[u8]) -> Result<Value> {
    let response: QueryResponse = serde_json::from_slice(bytes)?;

    if let Some(error) = response.error {
        return Err(ContentError::Query {
            kind: error.kind,
            description: error.description,
        });
    }

    if !(200..300).contains(&status) {
        return Err(ContentError::Query {
            kind: "http".to_string(),
            description: format!("Unexpected status {}", status),
        });
    }

    Ok(response.result.unwrap_or(Value::Null))
}
