use std::sync::Arc;
use std::time::Duration;

use reqwest::blocking::Client;
use thiserror::Error;
use tracing::{debug, warn};

use crate::config::{ClientConfig, GENERIC_ERROR_MESSAGE};
use crate::types::{CalculationPayload, CalculationResponse, ErrorState, InputParameters, ParamKey};

#[derive(Debug, Error)]
pub enum SubmissionError {
    #[error("transport failure: {0}")]
    Transport(String),
    #[error("server responded with status {status}")]
    Server { status: u16, message: Option<String> },
    #[error("malformed response body: {0}")]
    MalformedBody(#[from] serde_json::Error),
}

impl SubmissionError {
    /// Text for the error panel: the server's own `error` string when it sent
    /// one, the generic fallback otherwise.
    pub fn user_message(&self) -> String {
        match self {
            SubmissionError::Server {
                message: Some(message),
                ..
            } => message.clone(),
            _ => GENERIC_ERROR_MESSAGE.to_owned(),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum Outcome {
    Success(CalculationResponse),
    Failure(ErrorState),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RawResponse {
    pub status: u16,
    pub body: String,
}

pub trait Transport: Send + Sync {
    fn post_json(
        &self,
        url: &str,
        payload: &CalculationPayload,
    ) -> Result<RawResponse, SubmissionError>;
}

pub struct HttpTransport {
    client: Client,
}

impl HttpTransport {
    pub fn new(config: &ClientConfig) -> Result<Self, SubmissionError> {
        let client = Client::builder()
            .user_agent(config.user_agent.clone())
            .timeout(None::<Duration>)
            .no_proxy()
            .build()
            .map_err(|err| SubmissionError::Transport(err.to_string()))?;
        Ok(Self { client })
    }
}

impl Transport for HttpTransport {
    fn post_json(
        &self,
        url: &str,
        payload: &CalculationPayload,
    ) -> Result<RawResponse, SubmissionError> {
        let response = self
            .client
            .post(url)
            .json(payload)
            .send()
            .map_err(|err| SubmissionError::Transport(err.to_string()))?;
        let status = response.status().as_u16();
        let body = response
            .text()
            .map_err(|err| SubmissionError::Transport(err.to_string()))?;
        Ok(RawResponse { status, body })
    }
}

/// Parses one field. Anything that is not a finite number becomes 0.
pub fn coerce_field(raw: &str) -> f64 {
    match raw.trim().parse::<f64>() {
        Ok(value) if value.is_finite() => value,
        _ => 0.0,
    }
}

pub fn build_payload(params: &InputParameters) -> CalculationPayload {
    let field = |key: ParamKey| coerce_field(params.get(key));
    CalculationPayload {
        k: field(ParamKey::K),
        i: field(ParamKey::I),
        f: field(ParamKey::F),
        s: field(ParamKey::S),
        cr0: field(ParamKey::Cr0),
        cd0: field(ParamKey::Cd0),
    }
}

pub fn interpret(raw: &RawResponse) -> Result<CalculationResponse, SubmissionError> {
    if (200..300).contains(&raw.status) {
        return Ok(serde_json::from_str(&raw.body)?);
    }
    Err(SubmissionError::Server {
        status: raw.status,
        message: extract_error_message(&raw.body),
    })
}

fn extract_error_message(body: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(body).ok()?;
    let message = value.get("error")?.as_str()?;
    if message.is_empty() {
        None
    } else {
        Some(message.to_owned())
    }
}

#[derive(Clone)]
pub struct Submitter {
    endpoint: String,
    transport: Arc<dyn Transport>,
}

impl Submitter {
    pub fn new(endpoint: impl Into<String>, transport: Arc<dyn Transport>) -> Self {
        Self {
            endpoint: endpoint.into(),
            transport,
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Performs exactly one POST. No retry on any failure.
    pub fn submit(&self, payload: &CalculationPayload) -> Outcome {
        let result = self
            .transport
            .post_json(&self.endpoint, payload)
            .and_then(|raw| {
                debug!(status = raw.status, bytes = raw.body.len(), "calculation response");
                interpret(&raw)
            });

        match result {
            Ok(response) => Outcome::Success(response),
            Err(err) => {
                warn!(error = %err, endpoint = %self.endpoint, "calculation failed");
                Outcome::Failure(ErrorState {
                    message: err.user_message(),
                })
            }
        }
    }
}
