use std::fs;

use log::{debug, error};
use reqwest::blocking::{multipart, Client};
use reqwest::header::HeaderMap;
use reqwest::Url;

use super::{FormPart, ServiceReply, Transport, TransportError, WireRequest, METRICS_HEADER};
use crate::config::ServiceConfig;
use crate::result::Result;
use crate::selection::Direction;

const FALLBACK_MIME: &str = "application/octet-stream";

/// Talks to the transformation service over HTTP with multipart bodies.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
    encode_url: Url,
    decode_url: Url,
}

impl HttpTransport {
    /// Builds a client from the configuration.
    /// Without a configured timeout the client waits for the service as long as it takes.
    pub fn new(config: &ServiceConfig) -> Result<Self> {
        let client = Client::builder()
            .user_agent(concat!("stegosuite/", env!("CARGO_PKG_VERSION")))
            .timeout(config.timeout())
            .build()?;

        Self::with_client(client, config)
    }

    /// Uses an already configured client, for example one without proxy support
    pub fn with_client(client: Client, config: &ServiceConfig) -> Result<Self> {
        Ok(Self {
            client,
            encode_url: config.endpoint(Direction::Encode)?,
            decode_url: config.endpoint(Direction::Decode)?,
        })
    }

    pub fn url(&self, direction: Direction) -> &Url {
        match direction {
            Direction::Encode => &self.encode_url,
            Direction::Decode => &self.decode_url,
        }
    }

    fn form(request: &WireRequest) -> std::result::Result<multipart::Form, TransportError> {
        let mut form = multipart::Form::new();
        for part in request.parts() {
            form = match part {
                FormPart::Text { field, value } => form.text(*field, value.clone()),
                FormPart::File {
                    field,
                    file_name,
                    path,
                } => {
                    let bytes = fs::read(path).map_err(|e| {
                        TransportError::new(format!("cannot read {}: {e}", path.display()))
                    })?;
                    let mime = image::guess_format(&bytes)
                        .map(|format| format.to_mime_type())
                        .unwrap_or(FALLBACK_MIME);
                    let part = multipart::Part::bytes(bytes)
                        .file_name(file_name.clone())
                        .mime_str(mime)?;
                    form.part(*field, part)
                }
            };
        }

        Ok(form)
    }
}

impl Transport for HttpTransport {
    fn send(&self, request: &WireRequest) -> std::result::Result<ServiceReply, TransportError> {
        let url = self.url(request.direction());
        let form = Self::form(request)?;

        debug!("POST {url}");
        let response = self
            .client
            .post(url.clone())
            .multipart(form)
            .send()
            .map_err(|e| {
                error!("Request to {url} failed: {e}");
                TransportError::from(e)
            })?;

        let status = response.status();
        let metrics = metrics_header(response.headers());
        let body = response.bytes()?.to_vec();
        debug!("{url} answered {status} with {} bytes", body.len());

        if status.is_success() {
            Ok(ServiceReply::Success { body, metrics })
        } else {
            Ok(ServiceReply::Rejected {
                status: status.as_u16(),
                status_text: status.canonical_reason().unwrap_or_default().to_string(),
                body,
            })
        }
    }
}

/// A header that is present but not valid text still counts as present,
/// so that it ends up as a metrics notice rather than silently vanishing.
fn metrics_header(headers: &HeaderMap) -> Option<String> {
    headers
        .get(METRICS_HEADER)
        .map(|value| String::from_utf8_lossy(value.as_bytes()).into_owned())
}
