use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use shared::{
    error::ServiceError,
    protocol::{
        AutocompleteQuery, AutocompleteResponse, ReactRequest, ReactResponse, ReactionChainRequest,
        ReactionChainResponse, ReactionResult, WebSearchQuery, WebSearchResponse,
    },
};
use tracing::{debug, warn};
use url::Url;

pub mod catalog;
pub mod error;

pub use catalog::{Catalog, SourceCard};
pub use error::ClientError;

pub type ServiceResult<T> = std::result::Result<T, ServiceError>;

const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(20);

/// Request/response contract of the chemistry services.
#[async_trait]
pub trait ChemBackend: Send + Sync {
    /// Resolves a reaction. Error-shaped bodies come back as
    /// [`ServiceError::Rejected`] carrying the service message verbatim.
    async fn react(&self, formulas: &[String]) -> ServiceResult<ReactionResult>;
    async fn autocomplete_compounds(&self, prefix: &str) -> ServiceResult<Vec<String>>;
    async fn autocomplete_elements(&self, prefix: &str) -> ServiceResult<Vec<String>>;
    /// Free-text lookup; `Ok(None)` when the service has nothing to say.
    async fn web_search(&self, query: &str) -> ServiceResult<Option<String>>;
    async fn reaction_chain(&self, start: &str, end: &str) -> ServiceResult<Vec<String>>;
}

/// Runs both prefix lookups concurrently and waits for both to settle.
pub async fn autocomplete_both(
    backend: &dyn ChemBackend,
    prefix: &str,
) -> (ServiceResult<Vec<String>>, ServiceResult<Vec<String>>) {
    futures::join!(
        backend.autocomplete_compounds(prefix),
        backend.autocomplete_elements(prefix)
    )
}

pub struct MissingBackend;

#[async_trait]
impl ChemBackend for MissingBackend {
    async fn react(&self, _formulas: &[String]) -> ServiceResult<ReactionResult> {
        Err(ServiceError::Unavailable(
            "no reaction service configured".to_string(),
        ))
    }

    async fn autocomplete_compounds(&self, _prefix: &str) -> ServiceResult<Vec<String>> {
        Err(ServiceError::Unavailable(
            "no autocomplete service configured".to_string(),
        ))
    }

    async fn autocomplete_elements(&self, _prefix: &str) -> ServiceResult<Vec<String>> {
        Err(ServiceError::Unavailable(
            "no autocomplete service configured".to_string(),
        ))
    }

    async fn web_search(&self, _query: &str) -> ServiceResult<Option<String>> {
        Err(ServiceError::Unavailable(
            "no search service configured".to_string(),
        ))
    }

    async fn reaction_chain(&self, _start: &str, _end: &str) -> ServiceResult<Vec<String>> {
        Err(ServiceError::Unavailable(
            "no reaction service configured".to_string(),
        ))
    }
}

/// Speech-to-text engine feeding the assistant input.
#[async_trait]
pub trait SpeechRecognizer: Send + Sync {
    fn is_supported(&self) -> bool;
    /// Captures one utterance and returns its transcript.
    async fn transcribe(&self) -> anyhow::Result<String>;
}

pub struct UnsupportedSpeech;

#[async_trait]
impl SpeechRecognizer for UnsupportedSpeech {
    fn is_supported(&self) -> bool {
        false
    }

    async fn transcribe(&self) -> anyhow::Result<String> {
        Err(anyhow::anyhow!("speech recognition unavailable"))
    }
}

pub struct HttpBackend {
    http: Client,
    base_url: Url,
}

impl HttpBackend {
    pub fn new(base_url: &str) -> Result<Self, ClientError> {
        Self::with_timeout(base_url, DEFAULT_REQUEST_TIMEOUT)
    }

    pub fn with_timeout(base_url: &str, timeout: Duration) -> Result<Self, ClientError> {
        let normalized = if base_url.ends_with('/') {
            base_url.to_string()
        } else {
            format!("{base_url}/")
        };
        let base_url = Url::parse(&normalized).map_err(|source| ClientError::InvalidBaseUrl {
            url: base_url.to_string(),
            source,
        })?;
        let http = Client::builder().timeout(timeout).build()?;
        Ok(Self { http, base_url })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> ServiceResult<Url> {
        self.base_url
            .join(path)
            .map_err(|err| ServiceError::Transport(format!("invalid endpoint {path}: {err}")))
    }

    async fn autocomplete(&self, path: &str, prefix: &str) -> ServiceResult<Vec<String>> {
        let res = self
            .http
            .get(self.endpoint(path)?)
            .query(&AutocompleteQuery {
                prefix: prefix.to_string(),
            })
            .send()
            .await
            .map_err(transport_error)?
            .error_for_status()
            .map_err(transport_error)?;
        let body: AutocompleteResponse = decode_json(res).await?;
        debug!(endpoint = path, %prefix, results = body.results.len(), "autocomplete settled");
        Ok(body.results)
    }
}

#[async_trait]
impl ChemBackend for HttpBackend {
    async fn react(&self, formulas: &[String]) -> ServiceResult<ReactionResult> {
        // The service reports missing reactions with 4xx and an error body,
        // so the status is not checked before decoding.
        let res = self
            .http
            .post(self.endpoint("react")?)
            .json(&ReactRequest {
                compounds: formulas.to_vec(),
            })
            .send()
            .await
            .map_err(transport_error)?;
        let status = res.status();
        match decode_json::<ReactResponse>(res).await {
            Ok(ReactResponse::Success(result)) => Ok(result),
            Ok(ReactResponse::Failure(error)) => Err(error.into()),
            Err(err) if !status.is_success() => {
                warn!(%status, %err, "reaction service failed without an error body");
                Err(ServiceError::Transport(format!(
                    "reaction service returned {status}"
                )))
            }
            Err(err) => Err(err),
        }
    }

    async fn autocomplete_compounds(&self, prefix: &str) -> ServiceResult<Vec<String>> {
        self.autocomplete("autocomplete_compounds", prefix).await
    }

    async fn autocomplete_elements(&self, prefix: &str) -> ServiceResult<Vec<String>> {
        self.autocomplete("autocomplete_elements", prefix).await
    }

    async fn web_search(&self, query: &str) -> ServiceResult<Option<String>> {
        let res = self
            .http
            .get(self.endpoint("web_search")?)
            .query(&WebSearchQuery {
                query: query.to_string(),
            })
            .send()
            .await
            .map_err(transport_error)?
            .error_for_status()
            .map_err(transport_error)?;
        let body: WebSearchResponse = decode_json(res).await?;
        Ok(body.into_text())
    }

    async fn reaction_chain(&self, start: &str, end: &str) -> ServiceResult<Vec<String>> {
        let res = self
            .http
            .post(self.endpoint("reaction_chain")?)
            .json(&ReactionChainRequest {
                start: start.to_string(),
                end: end.to_string(),
            })
            .send()
            .await
            .map_err(transport_error)?;
        match decode_json::<ReactionChainResponse>(res).await? {
            ReactionChainResponse::Chain { chain } => Ok(chain),
            ReactionChainResponse::Failure(error) => Err(error.into()),
        }
    }
}

fn transport_error(err: reqwest::Error) -> ServiceError {
    if err.is_decode() {
        ServiceError::Malformed(err.to_string())
    } else {
        ServiceError::Transport(err.to_string())
    }
}

async fn decode_json<T: DeserializeOwned>(res: Response) -> ServiceResult<T> {
    let bytes = res.bytes().await.map_err(transport_error)?;
    serde_json::from_slice(&bytes).map_err(|err| ServiceError::Malformed(err.to_string()))
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
