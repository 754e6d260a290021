//! # StegoSuite Core API
//!
//! Client side of the StegoSuite transformation service. The service does the
//! actual hiding and unveiling, this crate owns everything around it:
//! - [`RequestOrchestrator`] drives one encode or decode request at a time
//!   through its lifecycle and publishes exactly one [`TransformationOutcome`]
//! - [`Transport`] is the seam to the service, [`HttpTransport`] speaks multipart HTTP
//! - [`ArtifactDelivery`] saves a returned stego image
//!
//! # Usage Examples
//!
//! ## Hide a message inside an image
//!
//! ```rust,no_run
//! use stegosuite_core::{Direction, HttpTransport, RequestOrchestrator, Scheme, SelectedFile, ServiceConfig};
//!
//! let config = ServiceConfig::load(None)
//!     .and_then(ServiceConfig::validated)
//!     .expect("Failed to load configuration");
//! let transport = HttpTransport::new(&config).expect("Failed to set up HTTP client");
//!
//! let mut orchestrator = RequestOrchestrator::with_retention(config.retention());
//! orchestrator.select_file(
//!     Direction::Encode,
//!     SelectedFile::from_path("cover.png").expect("Failed to select cover image"),
//! );
//!
//! let outcome = orchestrator
//!     .submit_encode(&transport, "Hello, World!", Scheme::Dct)
//!     .expect("Another request is still in flight");
//!
//! if let Some(artifact) = outcome.artifact() {
//!     stegosuite_core::ArtifactDelivery::to_file("stego.png")
//!         .deliver(artifact)
//!         .expect("Failed to save stego image");
//! }
//! ```
//!
//! ## Unveil a message from an image
//!
//! ```rust,no_run
//! use std::path::Path;
//! use stegosuite_core::{Scheme, ServiceConfig};
//!
//! let config = ServiceConfig::default();
//! let report = stegosuite_core::commands::decode(&config, Path::new("stego.png"), Scheme::Dct, None)
//!     .expect("Failed to decode");
//!
//! if let Some(message) = report.outcome.decoded() {
//!     println!("{}", message.text());
//! }
//! ```

#![warn(clippy::redundant_else)]

pub mod api;
pub mod commands;
pub mod config;
pub mod delivery;
pub mod error;
pub mod metrics;
pub mod orchestrator;
pub mod outcome;
pub mod result;
pub mod scheme;
pub mod selection;
pub mod transport;

pub use crate::config::ServiceConfig;
pub use crate::delivery::ArtifactDelivery;
pub use crate::error::{ErrorKind, StegoSuiteError, ValidationError};
pub use crate::metrics::{MetricsReport, QualityMetrics};
pub use crate::orchestrator::{Phase, RequestOrchestrator, Submission, Ticket};
pub use crate::outcome::{DecodedMessage, EncodedArtifact, Failure, TransformationOutcome};
pub use crate::result::Result;
pub use crate::scheme::Scheme;
pub use crate::selection::{Direction, FileSelection, SelectedFile, SelectionRetention};
pub use crate::transport::{
    FormPart, HttpTransport, ServiceReply, Transport, TransportError, WireRequest,
};
