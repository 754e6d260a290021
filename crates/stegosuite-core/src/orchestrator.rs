//! Owner of the request lifecycle.
//!
//! The [`RequestOrchestrator`] is the single writer of the file selection,
//! the in-flight slot and the last outcome. A request moves through
//!
//! ```text
//! Idle → Validating → Submitting → AwaitingResponse → Succeeded | Failed
//! ```
//!
//! and a new submission from a terminal phase passes through `Idle` again.
//! At most one request is in flight; every issued request carries a
//! [`Ticket`] and only the response for the current ticket may change state.

use std::fmt::{self, Debug, Formatter};

use log::{debug, info, warn};

use crate::api;
use crate::error::{StegoSuiteError, ValidationError};
use crate::outcome::{Failure, TransformationOutcome};
use crate::result::Result;
use crate::scheme::Scheme;
use crate::selection::{Direction, FileSelection, SelectedFile, SelectionRetention};
use crate::transport::{ServiceReply, Transport, TransportError, WireRequest};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Phase {
    Idle,
    Validating,
    Submitting,
    AwaitingResponse,
    Succeeded,
    Failed,
}

impl Phase {
    pub fn is_terminal(&self) -> bool {
        matches!(self, Phase::Succeeded | Phase::Failed)
    }
}

/// Identifies one issued request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Ticket {
    sequence: u64,
    direction: Direction,
}

impl Ticket {
    pub fn sequence(&self) -> u64 {
        self.sequence
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }
}

/// A request that was admitted and now has to be sent
#[derive(Debug)]
pub struct Submission {
    ticket: Ticket,
    request: WireRequest,
}

impl Submission {
    pub fn ticket(&self) -> Ticket {
        self.ticket
    }

    pub fn request(&self) -> &WireRequest {
        &self.request
    }
}

type TransitionObserver = Box<dyn FnMut(Phase, Phase) + Send>;

pub struct RequestOrchestrator {
    selection: FileSelection,
    retention: SelectionRetention,
    phase: Phase,
    sequence: u64,
    in_flight: Option<Ticket>,
    outcome: Option<TransformationOutcome>,
    last_direction: Option<Direction>,
    observer: Option<TransitionObserver>,
}

impl Default for RequestOrchestrator {
    fn default() -> Self {
        Self {
            selection: FileSelection::default(),
            retention: SelectionRetention::default(),
            phase: Phase::Idle,
            sequence: 0,
            in_flight: None,
            outcome: None,
            last_direction: None,
            observer: None,
        }
    }
}

impl Debug for RequestOrchestrator {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("RequestOrchestrator")
            .field("selection", &self.selection)
            .field("retention", &self.retention)
            .field("phase", &self.phase)
            .field("sequence", &self.sequence)
            .field("in_flight", &self.in_flight)
            .field("outcome", &self.outcome)
            .finish_non_exhaustive()
    }
}

impl RequestOrchestrator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_retention(retention: SelectionRetention) -> Self {
        Self {
            retention,
            ..Self::default()
        }
    }

    /// Gets called with `(from, to)` on every phase change
    pub fn on_transition<F>(&mut self, observer: F) -> &mut Self
    where
        F: FnMut(Phase, Phase) + Send + 'static,
    {
        self.observer = Some(Box::new(observer));
        self
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// The published outcome of the last completed request
    pub fn outcome(&self) -> Option<&TransformationOutcome> {
        self.outcome.as_ref()
    }

    /// True while a request is outstanding, submit triggers should be disabled then
    pub fn is_busy(&self) -> bool {
        self.in_flight.is_some()
    }

    pub fn selection(&self) -> &FileSelection {
        &self.selection
    }

    /// Replaces the file selected for a direction
    pub fn select_file(&mut self, direction: Direction, file: SelectedFile) -> &mut Self {
        info!("Selected {} for {direction}", file.name());
        self.selection.select(direction, file);
        self
    }

    pub fn clear_file(&mut self, direction: Direction) -> Option<SelectedFile> {
        self.selection.clear(direction)
    }

    /// Admits an encode of the selected cover image.
    ///
    /// A rejected precondition publishes a failed outcome and is returned as error,
    /// nothing is handed to any transport then.
    pub fn begin_encode(&mut self, message: &str, scheme: Scheme) -> Result<Submission> {
        self.ensure_idle()?;
        self.enter_validating();

        let built = api::encode::prepare()
            .use_image(self.selection.cover().filter(|f| f.is_available()))
            .use_message(Some(message))
            .with_scheme(scheme)
            .build();

        self.admit(Direction::Encode, built)
    }

    /// Admits a decode of the selected stego image
    pub fn begin_decode(&mut self, scheme: Scheme) -> Result<Submission> {
        self.ensure_idle()?;
        self.enter_validating();

        let built = api::decode::prepare()
            .use_secret_image(self.selection.stego().filter(|f| f.is_available()))
            .with_scheme(scheme)
            .build();

        self.admit(Direction::Decode, built)
    }

    /// Applies the transport result of a submission.
    ///
    /// Returns `false` and changes nothing if the ticket is not the one in flight,
    /// which is the case for responses of cancelled or superseded requests.
    pub fn complete(
        &mut self,
        ticket: Ticket,
        reply: std::result::Result<ServiceReply, TransportError>,
    ) -> bool {
        if self.in_flight != Some(ticket) {
            debug!("Ignoring stale response of request #{}", ticket.sequence);
            return false;
        }

        self.in_flight = None;
        self.publish(
            ticket.direction,
            TransformationOutcome::from_reply(ticket.direction, reply),
        );
        true
    }

    /// Validates, sends and completes an encode in one go.
    ///
    /// Every terminal outcome, failures included, is returned as `Ok`.
    /// Only a rejected concurrent submission is an `Err`.
    pub fn submit_encode<T: Transport + ?Sized>(
        &mut self,
        transport: &T,
        message: &str,
        scheme: Scheme,
    ) -> Result<&TransformationOutcome> {
        let admitted = self.begin_encode(message, scheme);
        self.drive(transport, admitted)
    }

    /// Validates, sends and completes a decode in one go
    pub fn submit_decode<T: Transport + ?Sized>(
        &mut self,
        transport: &T,
        scheme: Scheme,
    ) -> Result<&TransformationOutcome> {
        let admitted = self.begin_decode(scheme);
        self.drive(transport, admitted)
    }

    /// Abandons the request in flight, its response will be ignored
    pub fn cancel(&mut self) -> bool {
        let Some(ticket) = self.in_flight.take() else {
            return false;
        };

        info!("Cancelled request #{}", ticket.sequence);
        self.transition(Phase::Idle);
        true
    }

    /// Acknowledges a terminal outcome and returns to `Idle`
    pub fn dismiss(&mut self) -> Option<TransformationOutcome> {
        if !self.phase.is_terminal() {
            return None;
        }

        if self.retention == SelectionRetention::Clear {
            if let Some(direction) = self.last_direction {
                self.selection.clear(direction);
            }
        }
        self.transition(Phase::Idle);
        self.outcome.take()
    }

    fn drive<T: Transport + ?Sized>(
        &mut self,
        transport: &T,
        admitted: Result<Submission>,
    ) -> Result<&TransformationOutcome> {
        match admitted {
            Ok(submission) => {
                let reply = transport.send(submission.request());
                self.complete(submission.ticket(), reply);
            }
            Err(StegoSuiteError::ConcurrentRequest) => {
                return Err(StegoSuiteError::ConcurrentRequest)
            }
            // already published as failed outcome
            Err(_) => {}
        }

        self.outcome.as_ref().ok_or(StegoSuiteError::NoOutcome)
    }

    fn ensure_idle(&self) -> Result<()> {
        if let Some(ticket) = self.in_flight {
            warn!(
                "Rejecting submission, request #{} is still in flight",
                ticket.sequence
            );
            return Err(StegoSuiteError::ConcurrentRequest);
        }

        Ok(())
    }

    fn enter_validating(&mut self) {
        if self.phase.is_terminal() {
            self.transition(Phase::Idle);
        }
        self.outcome = None;
        self.transition(Phase::Validating);
    }

    fn admit(
        &mut self,
        direction: Direction,
        built: std::result::Result<WireRequest, ValidationError>,
    ) -> Result<Submission> {
        let request = match built {
            Ok(request) => request,
            Err(e) => {
                warn!("{direction} request is invalid: {e}");
                let failure = Failure::from(StegoSuiteError::from(e.clone()));
                self.publish(direction, TransformationOutcome::Failed(failure));
                return Err(e.into());
            }
        };

        self.transition(Phase::Submitting);
        self.sequence += 1;
        let ticket = Ticket {
            sequence: self.sequence,
            direction,
        };
        self.in_flight = Some(ticket);
        info!("Submitting {direction} request #{}", ticket.sequence);
        self.transition(Phase::AwaitingResponse);

        Ok(Submission { ticket, request })
    }

    fn publish(&mut self, direction: Direction, outcome: TransformationOutcome) {
        let next = if outcome.is_success() {
            Phase::Succeeded
        } else {
            Phase::Failed
        };
        self.outcome = Some(outcome);
        self.last_direction = Some(direction);
        self.transition(next);
    }

    fn transition(&mut self, next: Phase) {
        let previous = self.phase;
        if previous == next {
            return;
        }

        self.phase = next;
        debug!("{previous:?} -> {next:?}");
        if let Some(observer) = self.observer.as_mut() {
            observer(previous, next);
        }
    }
}
