//! Route handlers. Each one makes at most one RPC call and never retries.

use axum::extract::{OriginalUri, Path, State};
use axum::http::{Method, StatusCode};
use axum::Json;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use super::error::ApiError;
use super::GatewayState;
use crate::catalog::CarRecord;
use crate::rpc::CallOutcome;

/// Body of `GET /car/{id}`. `result` is `null` when nothing matched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LookupBody {
    pub result: Option<CarRecord>,
}

/// Body of `GET /cars`, in catalog order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BulkBody {
    pub result: Vec<CarRecord>,
}

/// `GET /car/{id}`
pub(super) async fn car_by_id(
    State(state): State<GatewayState>,
    Path(raw_id): Path<String>,
) -> Result<Json<LookupBody>, ApiError> {
    let id: i64 = raw_id.parse().map_err(|_| {
        warn!(raw_id = %raw_id, "rejecting non-integer id");
        ApiError::InvalidId
    })?;

    match state.client().call_lookup(id).await {
        CallOutcome::Success(result) => {
            info!(id, matched = result.is_some(), "car lookup served");
            Ok(Json(LookupBody { result }))
        }
        CallOutcome::DeadlineExceeded => {
            warn!(id, "car lookup timed out");
            Err(ApiError::LookupFailed)
        }
        CallOutcome::OtherFailure(failure) => {
            warn!(id, %failure, "error while calling Lookup");
            Err(ApiError::LookupFailed)
        }
    }
}

/// `GET /car` and `GET /car/`
pub(super) async fn car_missing_id() -> ApiError {
    warn!("car lookup without id");
    ApiError::MissingId
}

/// `GET /cars`
pub(super) async fn all_cars(State(state): State<GatewayState>) -> Result<Json<BulkBody>, ApiError> {
    match state.client().call_bulk_fetch(state.bulk_timeout()).await {
        CallOutcome::Success(result) => {
            info!(count = result.len(), "car listing served");
            Ok(Json(BulkBody { result }))
        }
        CallOutcome::DeadlineExceeded => {
            warn!(timeout = ?state.bulk_timeout(), "timeout was hit, deadline exceeded");
            Err(ApiError::Timeout)
        }
        CallOutcome::OtherFailure(failure) => {
            warn!(%failure, "error while calling BulkFetch");
            Err(ApiError::from_bulk_failure(&failure))
        }
    }
}

/// Anything without a real handler.
pub(super) async fn placeholder(method: Method, OriginalUri(uri): OriginalUri) -> StatusCode {
    info!(%method, %uri, "handler placeholder");
    StatusCode::NOT_FOUND
}
