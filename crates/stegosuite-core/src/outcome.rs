use log::error;
use serde::Deserialize;

use crate::error::{ErrorKind, StegoSuiteError};
use crate::metrics::{MetricsReport, QualityMetrics};
use crate::selection::Direction;
use crate::transport::{ServiceReply, TransportError};

/// The stego image produced by a successful encode
#[derive(Debug, Clone, PartialEq)]
pub struct EncodedArtifact {
    bytes: Vec<u8>,
    metrics: MetricsReport,
}

impl EncodedArtifact {
    pub fn new(bytes: Vec<u8>, metrics: MetricsReport) -> Self {
        Self { bytes, metrics }
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn metrics_report(&self) -> &MetricsReport {
        &self.metrics
    }

    pub fn metrics(&self) -> Option<&QualityMetrics> {
        self.metrics.metrics()
    }
}

/// The message recovered by a successful decode
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedMessage {
    text: String,
}

impl DecodedMessage {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }

    pub fn text(&self) -> &str {
        &self.text
    }
}

/// A request that ended without a usable result
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Failure {
    kind: ErrorKind,
    message: String,
}

impl Failure {
    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl From<&StegoSuiteError> for Failure {
    fn from(e: &StegoSuiteError) -> Self {
        Self {
            kind: e.kind(),
            message: e.to_string(),
        }
    }
}

impl From<StegoSuiteError> for Failure {
    fn from(e: StegoSuiteError) -> Self {
        Self::from(&e)
    }
}

/// Terminal result of exactly one request
#[derive(Debug, Clone, PartialEq)]
pub enum TransformationOutcome {
    Encoded(EncodedArtifact),
    Decoded(DecodedMessage),
    Failed(Failure),
}

impl TransformationOutcome {
    /// Interprets whatever the transport produced for a request of the given direction.
    pub fn from_reply(
        direction: Direction,
        reply: Result<ServiceReply, TransportError>,
    ) -> Self {
        match interpret(direction, reply) {
            Ok(outcome) => outcome,
            Err(e) => TransformationOutcome::Failed(Failure::from(e)),
        }
    }

    pub fn is_success(&self) -> bool {
        !matches!(self, TransformationOutcome::Failed(_))
    }

    pub fn failure(&self) -> Option<&Failure> {
        match self {
            TransformationOutcome::Failed(failure) => Some(failure),
            _ => None,
        }
    }

    pub fn artifact(&self) -> Option<&EncodedArtifact> {
        match self {
            TransformationOutcome::Encoded(artifact) => Some(artifact),
            _ => None,
        }
    }

    pub fn decoded(&self) -> Option<&DecodedMessage> {
        match self {
            TransformationOutcome::Decoded(message) => Some(message),
            _ => None,
        }
    }
}

#[derive(Deserialize)]
struct ErrorBody {
    error: Option<String>,
}

#[derive(Deserialize)]
struct DecodeBody {
    #[serde(alias = "decoded_message", alias = "text")]
    message: String,
}

fn interpret(
    direction: Direction,
    reply: Result<ServiceReply, TransportError>,
) -> Result<TransformationOutcome, StegoSuiteError> {
    let reply = reply.map_err(|e| {
        error!("{direction} request did not complete: {}", e.reason());
        StegoSuiteError::Transport(direction)
    })?;

    match reply {
        ServiceReply::Rejected {
            status,
            status_text,
            body,
        } => {
            let message = serde_json::from_slice::<ErrorBody>(&body)
                .ok()
                .and_then(|b| b.error)
                .filter(|m| !m.is_empty());
            error!("{direction} rejected with {status} {status_text}: {message:?}");
            Err(StegoSuiteError::service(status, &status_text, message))
        }
        ServiceReply::Success { body, .. } if body.is_empty() => {
            Err(StegoSuiteError::EmptyResponse)
        }
        ServiceReply::Success { body, metrics } => match direction {
            Direction::Encode => Ok(TransformationOutcome::Encoded(EncodedArtifact::new(
                body,
                MetricsReport::parse(metrics.as_deref()),
            ))),
            Direction::Decode => {
                let decoded = serde_json::from_slice::<DecodeBody>(&body).map_err(|e| {
                    error!("Decode response does not carry a message: {e}");
                    StegoSuiteError::MalformedResponse
                })?;
                Ok(TransformationOutcome::Decoded(DecodedMessage::new(
                    decoded.message,
                )))
            }
        },
    }
}
