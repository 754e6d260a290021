//! The seam towards the transformation service.
//!
//! A [`WireRequest`] is the finished multipart submission, a [`ServiceReply`]
//! is what came back. Everything in between belongs to a [`Transport`].

pub mod http;

use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::selection::Direction;

pub use http::HttpTransport;

/// Response header that carries the quality metrics of an encode
pub const METRICS_HEADER: &str = "x-metrics";

/// One field of the multipart body
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormPart {
    File {
        field: &'static str,
        file_name: String,
        path: PathBuf,
    },
    Text {
        field: &'static str,
        value: String,
    },
}

impl FormPart {
    pub fn field(&self) -> &'static str {
        match self {
            FormPart::File { field, .. } | FormPart::Text { field, .. } => *field,
        }
    }
}

/// A complete submission, parts are kept in the order they go on the wire.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WireRequest {
    direction: Direction,
    parts: Vec<FormPart>,
}

impl WireRequest {
    pub(crate) fn new(direction: Direction, parts: Vec<FormPart>) -> Self {
        Self { direction, parts }
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn parts(&self) -> &[FormPart] {
        &self.parts
    }

    /// Value of a text field, if the request has one with that name
    pub fn text(&self, field: &str) -> Option<&str> {
        self.parts.iter().find_map(|p| match p {
            FormPart::Text { field: f, value } if *f == field => Some(value.as_str()),
            _ => None,
        })
    }

    /// Path of a file field, if the request has one with that name
    pub fn file(&self, field: &str) -> Option<&Path> {
        self.parts.iter().find_map(|p| match p {
            FormPart::File { field: f, path, .. } if *f == field => Some(path.as_path()),
            _ => None,
        })
    }
}

/// What the service answered, decided once at the transport boundary
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ServiceReply {
    /// 2xx status
    Success {
        body: Vec<u8>,
        metrics: Option<String>,
    },
    /// any other status.
    ///
    /// `status_text` is the standard reason phrase of `status`, a custom phrase
    /// sent by the server is not preserved.
    Rejected {
        status: u16,
        status_text: String,
        body: Vec<u8>,
    },
}

/// The request did not produce any reply
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("transport failure: {reason}")]
pub struct TransportError {
    reason: String,
}

impl TransportError {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }

    pub fn reason(&self) -> &str {
        &self.reason
    }
}

impl From<reqwest::Error> for TransportError {
    fn from(e: reqwest::Error) -> Self {
        let mut reason = e.to_string();
        let mut source = std::error::Error::source(&e);
        while let Some(cause) = source {
            reason.push_str(": ");
            reason.push_str(&cause.to_string());
            source = cause.source();
        }
        Self { reason }
    }
}

/// Sends a submission and waits for its completion.
///
/// This is the only place where the lifecycle suspends. Implementations own
/// whatever they open for a request and release it before returning.
pub trait Transport {
    fn send(&self, request: &WireRequest) -> Result<ServiceReply, TransportError>;
}

impl<T: Transport + ?Sized> Transport for &T {
    fn send(&self, request: &WireRequest) -> Result<ServiceReply, TransportError> {
        (**self).send(request)
    }
}

impl<T: Transport + ?Sized> Transport for Box<T> {
    fn send(&self, request: &WireRequest) -> Result<ServiceReply, TransportError> {
        (**self).send(request)
    }
}
