//! # DexQA Question-Answering Client (`common::network::http`)
//!
//! File: cli/src/common/network/http.rs
//!
//! ## Overview
//!
//! Thin wrapper around one `reqwest::Client` that talks to the Pokédex
//! question-answering service:
//! - `POST <base_url><ask_path>` with `{"question": ...}`
//! - `GET <base_url>/` for the service's health information
//!
//! Each call sends exactly one request. There is no retry: the user resubmits.
//!
//! ## Status Mapping
//!
//! Error responses are classified only by status code:
//!
//! | Status        | Outcome                         |
//! |---------------|---------------------------------|
//! | 400           | `DexError::Unintelligible`      |
//! | 404           | `DexError::PokemonNotFound`     |
//! | 500           | `DexError::ServerUnavailable`   |
//! | anything else | `DexError::Network`             |
//!
//! Transport failures and undecodable success bodies are `DexError::Network` too.
//! Error bodies are decoded best-effort for the debug log and otherwise ignored.
//!
//! ## Examples
//!
//! ```rust
//! let client = QaClient::new(&cfg.api)?;
//! let question = Question::parse("喷火龙的属性是什么？")?;
//! let response = client.ask(&question).await?;
//! println!("{}", response.answer);
//! ```
//!
use crate::core::config::ApiConfig;
use crate::core::error::{DexError, Result};
use crate::dex::Question;
use anyhow::Context;
use reqwest::{Client, StatusCode, Url};
use serde::{Deserialize, Serialize};
use std::fmt::Display;
use std::time::Duration;
use tracing::{debug, error, info};

#[derive(Serialize, Debug)]
struct AskRequest<'a> {
    question: &'a str,
}

/// How the service interpreted the question. Passed through to `--json` output.
#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(default)]
pub struct Intent {
    pub pokemon_name: Option<String>,
    pub original_name: Option<String>,
    pub intent_type: Option<String>,
    pub detail_level: Option<String>,
}

/// A successful reply, normalized.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AskResponse {
    /// Free-text answer. Empty when the service sent none.
    pub answer: String,
    pub pokemon_name: Option<String>,
    pub pokemon_id: Option<i64>,
    pub intent: Option<Intent>,
}

/// Wire form of the reply. Every field may be missing or null.
#[derive(Deserialize, Debug, Default)]
#[serde(default)]
struct RawAskResponse {
    answer: Option<String>,
    pokemon_name: Option<String>,
    pokemon_id: Option<i64>,
    intent: Option<Intent>,
}

impl From<RawAskResponse> for AskResponse {
    // Empty names and a zero id mean "not identified".
    fn from(raw: RawAskResponse) -> Self {
        Self {
            answer: raw.answer.unwrap_or_default(),
            pokemon_name: raw.pokemon_name.filter(|name| !name.is_empty()),
            pokemon_id: raw.pokemon_id.filter(|id| *id != 0),
            intent: raw.intent,
        }
    }
}

/// Body of the service's root route.
#[derive(Deserialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(default)]
pub struct ServiceInfo {
    pub message: Option<String>,
    pub version: Option<String>,
    pub docs: Option<String>,
}

#[derive(Deserialize, Debug, Default)]
#[serde(default)]
struct ErrorEnvelope {
    error: Option<ErrorDetail>,
}

#[derive(Deserialize, Debug, Default)]
#[serde(default)]
struct ErrorDetail {
    #[serde(rename = "type")]
    kind: Option<String>,
    message: Option<String>,
}

/// # Question-Answering Client (`QaClient`)
///
/// Holds the resolved endpoint URLs and a configured `reqwest::Client`.
/// Cheap to clone.
#[derive(Debug, Clone)]
pub struct QaClient {
    http: Client,
    ask_url: Url,
    health_url: Url,
}

impl QaClient {
    /// # Create Client (`new`)
    ///
    /// Resolves `base_url` + `ask_path` and builds the HTTP client. A configured
    /// `timeout_secs` is applied to every request; without it the transport
    /// default is used.
    ///
    /// ## Errors
    ///
    /// Returns an error if the URLs cannot be parsed or the TLS backend fails
    /// to initialise.
    pub fn new(api: &ApiConfig) -> Result<Self> {
        let base = api.base_url.trim_end_matches('/');
        let ask_url = Url::parse(&format!("{}{}", base, api.ask_path))
            .with_context(|| format!("Invalid ask endpoint: {}{}", base, api.ask_path))?;
        let health_url = Url::parse(&format!("{}/", base))
            .with_context(|| format!("Invalid base_url: {}", api.base_url))?;

        let mut builder = Client::builder();
        if let Some(secs) = api.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        let http = builder.build().context("Failed to build HTTP client")?;

        debug!("Question endpoint resolved to {}", ask_url);
        Ok(Self {
            http,
            ask_url,
            health_url,
        })
    }

    pub fn ask_url(&self) -> &Url {
        &self.ask_url
    }

    /// # Ask Question (`ask`)
    ///
    /// Sends one question and waits for the reply.
    ///
    /// ## Returns
    ///
    /// * `Ok(AskResponse)` for any 2xx reply with a JSON body.
    /// * `Err(DexError)` classified as described in the module docs.
    pub async fn ask(&self, question: &Question) -> std::result::Result<AskResponse, DexError> {
        info!("Sending question to {}", self.ask_url);
        let response = self
            .http
            .post(self.ask_url.clone())
            .json(&AskRequest {
                question: question.as_str(),
            })
            .send()
            .await
            .map_err(|e| network_error("request failed", e))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            log_error_body(status, &body);
            return Err(classify_status(status));
        }

        let raw: RawAskResponse = response
            .json()
            .await
            .map_err(|e| network_error("could not decode answer body", e))?;
        debug!("Received answer ({} bytes)", raw.answer.as_deref().map_or(0, str::len));
        Ok(raw.into())
    }

    /// # Service Health (`health`)
    ///
    /// Fetches the service's root route. Any non-2xx status is an error.
    pub async fn health(&self) -> Result<ServiceInfo> {
        info!("Checking service at {}", self.health_url);
        let response = self
            .http
            .get(self.health_url.clone())
            .send()
            .await
            .with_context(|| format!("Failed to reach {}", self.health_url))?
            .error_for_status()
            .context("Service reported an error")?;
        response
            .json()
            .await
            .context("Failed to decode service information")
    }
}

/// Maps a non-success status to the matching request outcome.
pub fn classify_status(status: StatusCode) -> DexError {
    match status {
        StatusCode::BAD_REQUEST => DexError::Unintelligible,
        StatusCode::NOT_FOUND => DexError::PokemonNotFound,
        StatusCode::INTERNAL_SERVER_ERROR => DexError::ServerUnavailable,
        other => DexError::Network {
            detail: format!("unexpected HTTP status {}", other),
        },
    }
}

fn network_error(what: &str, err: impl Display) -> DexError {
    error!("Question request {}: {}", what, err);
    DexError::Network {
        detail: format!("{}: {}", what, err),
    }
}

fn log_error_body(status: StatusCode, body: &str) {
    match serde_json::from_str::<ErrorEnvelope>(body) {
        Ok(ErrorEnvelope {
            error: Some(detail),
        }) => debug!(
            "Service returned {} ({}): {}",
            status,
            detail.kind.as_deref().unwrap_or("unknown"),
            detail.message.as_deref().unwrap_or("")
        ),
        _ => debug!("Service returned {} with body: {}", status, body),
    }
}
