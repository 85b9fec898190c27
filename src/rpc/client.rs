//! Client wrapper: issues calls to the car service and classifies what
//! happened, so callers never deal with `tonic::Status` themselves.

use std::time::Duration;

use tokio::time::Instant;
use tonic::transport::{Channel, Endpoint};
use tonic::{Code, Request, Status};
use tracing::{info, warn};

use super::error::ClientError;
use super::messages::{BulkRequest, Car, LookupRequest};
use super::timeout::MAX_GRPC_TIMEOUT;
use super::CarServiceClient;
use crate::catalog::CarRecord;

/// The classified result of one RPC attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CallOutcome<T> {
    Success(T),
    /// The call's deadline passed, locally or as reported by the backend.
    /// Nothing the backend produced is kept.
    DeadlineExceeded,
    OtherFailure(CallFailure),
}

impl<T> CallOutcome<T> {
    pub fn is_success(&self) -> bool {
        matches!(self, CallOutcome::Success(_))
    }

    pub fn is_deadline_exceeded(&self) -> bool {
        matches!(self, CallOutcome::DeadlineExceeded)
    }

    pub fn success(self) -> Option<T> {
        match self {
            CallOutcome::Success(value) => Some(value),
            _ => None,
        }
    }

}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    /// The backend could not be reached.
    Unavailable,
    /// The backend answered with an error status.
    Rejected,
}

/// Transport-neutral description of a failed call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallFailure {
    pub kind: FailureKind,
    pub message: String,
}

impl std::fmt::Display for CallFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.kind {
            FailureKind::Unavailable => write!(f, "backend unavailable: {}", self.message),
            FailureKind::Rejected => write!(f, "backend rejected call: {}", self.message),
        }
    }
}

impl CallFailure {
    fn from_status(status: &Status) -> Self {
        let kind = match status.code() {
            Code::Unavailable => FailureKind::Unavailable,
            _ => FailureKind::Rejected,
        };
        Self {
            kind,
            message: format!("{:?}: {}", status.code(), status.message()),
        }
    }
}

/// Deadline-aware client for `cars.inventory.CarService`.
///
/// Cloning is cheap; clones share the underlying channel.
#[derive(Debug, Clone)]
pub struct CarClient {
    inner: CarServiceClient<Channel>,
}

impl CarClient {
    pub fn new(channel: Channel) -> Self {
        Self {
            inner: CarServiceClient::new(channel),
        }
    }

    /// Build a client whose channel connects on first use. Fails only when
    /// `endpoint` is not a valid URI.
    pub fn connect_lazy(endpoint: impl Into<String>) -> Result<Self, ClientError> {
        let endpoint = endpoint.into();
        let channel = Endpoint::from_shared(endpoint.clone())
            .map_err(|source| ClientError::InvalidEndpoint { endpoint, source })?
            .connect_lazy();
        Ok(Self::new(channel))
    }

    /// Look up one record by id. Waits for as long as the call takes.
    pub async fn call_lookup(&self, id: i64) -> CallOutcome<Option<CarRecord>> {
        info!(id, "calling Lookup");
        self.lookup(LookupRequest { id, candidate: None }).await
    }

    /// Ask whether a make/model pair is stocked. Waits for as long as the
    /// call takes.
    pub async fn call_lookup_candidate(
        &self,
        make: impl Into<String>,
        model: impl Into<String>,
    ) -> CallOutcome<Option<CarRecord>> {
        let candidate = Car {
            id: 0,
            make: make.into(),
            model: model.into(),
        };
        info!(make = %candidate.make, model = %candidate.model, "calling Lookup with candidate");
        self.lookup(LookupRequest {
            id: 0,
            candidate: Some(candidate),
        })
        .await
    }

    async fn lookup(&self, request: LookupRequest) -> CallOutcome<Option<CarRecord>> {
        let mut client = self.inner.clone();
        let outcome = match client.lookup(Request::new(request)).await {
            Ok(response) => CallOutcome::Success(response.into_inner().result.map(CarRecord::from)),
            Err(status) => CallOutcome::OtherFailure(CallFailure::from_status(&status)),
        };
        log_outcome("Lookup", &outcome);
        outcome
    }

    /// Fetch the whole catalog, giving up `timeout` after the call starts.
    ///
    /// The deadline is sent to the backend as well, so it can stop early.
    /// Timeouts beyond what `grpc-timeout` can carry are clamped to
    /// [`MAX_GRPC_TIMEOUT`].
    pub async fn call_bulk_fetch(&self, timeout: Duration) -> CallOutcome<Vec<CarRecord>> {
        let timeout = timeout.min(MAX_GRPC_TIMEOUT);
        info!(?timeout, "calling BulkFetch");
        let deadline = Instant::now().checked_add(timeout);

        let mut request = Request::new(BulkRequest { id: 0 });
        if deadline.is_some() {
            request.set_timeout(timeout);
        }

        let mut client = self.inner.clone();
        let call = client.bulk_fetch(request);
        let result = match deadline {
            Some(deadline) => match tokio::time::timeout_at(deadline, call).await {
                Ok(result) => result,
                Err(_elapsed) => {
                    let outcome = CallOutcome::DeadlineExceeded;
                    log_outcome("BulkFetch", &outcome);
                    return outcome;
                }
            },
            None => call.await,
        };

        let outcome = match result {
            Ok(response) => CallOutcome::Success(
                response
                    .into_inner()
                    .result
                    .into_iter()
                    .map(CarRecord::from)
                    .collect(),
            ),
            Err(status) => classify_deadline_status(&status, deadline),
        };
        log_outcome("BulkFetch", &outcome);
        outcome
    }
}

/// Tonic's server-side timeout reports expiry as `CANCELLED`; once our own
/// deadline has passed that is the same thing as `DEADLINE_EXCEEDED`.
fn classify_deadline_status<T>(status: &Status, deadline: Option<Instant>) -> CallOutcome<T> {
    let expired = deadline.is_some_and(|deadline| Instant::now() >= deadline);
    match status.code() {
        Code::DeadlineExceeded => CallOutcome::DeadlineExceeded,
        Code::Cancelled if expired => CallOutcome::DeadlineExceeded,
        _ => CallOutcome::OtherFailure(CallFailure::from_status(status)),
    }
}

fn log_outcome<T>(method: &str, outcome: &CallOutcome<T>) {
    match outcome {
        CallOutcome::Success(_) => info!(method, "call succeeded"),
        CallOutcome::DeadlineExceeded => warn!(method, "deadline exceeded"),
        CallOutcome::OtherFailure(failure) => warn!(method, %failure, "call failed"),
    }
}
