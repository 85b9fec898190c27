//! Per-call cancellation context.
//!
//! A `CallContext` carries an optional absolute deadline and a
//! cancellation token. Long-running handlers consult it at checkpoints;
//! it never affects any other in-flight call.

use std::time::Duration;

use tokio::time::Instant;
use tokio_util::sync::CancellationToken;
use tonic::metadata::MetadataMap;
use tracing::warn;

use super::timeout::{parse_grpc_timeout, GRPC_TIMEOUT_HEADER};

/// Why a call stopped before finishing its work.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Interruption {
    /// The caller's deadline passed.
    DeadlineExceeded,
    /// The call's token was cancelled (server shutdown or explicit cancel).
    Cancelled,
}

#[derive(Debug, Clone)]
pub struct CallContext {
    deadline: Option<Instant>,
    token: CancellationToken,
}

impl Default for CallContext {
    fn default() -> Self {
        Self::new(CancellationToken::new())
    }
}

impl CallContext {
    /// A context with no deadline, cancelled only through `token`.
    pub fn new(token: CancellationToken) -> Self {
        Self {
            deadline: None,
            token,
        }
    }

    pub fn with_deadline(mut self, deadline: Instant) -> Self {
        self.deadline = Some(deadline);
        self
    }

    /// Set the deadline `timeout` from now. A timeout too large to
    /// represent leaves the context without a deadline.
    pub fn with_timeout(self, timeout: Duration) -> Self {
        match Instant::now().checked_add(timeout) {
            Some(deadline) => self.with_deadline(deadline),
            None => self,
        }
    }

    /// Build the context for an inbound RPC.
    ///
    /// The deadline comes from the `grpc-timeout` header, if present and
    /// well formed. The token is a child of `parent`, so cancelling the
    /// parent interrupts this call too.
    pub fn from_metadata(metadata: &MetadataMap, parent: &CancellationToken) -> Self {
        let ctx = Self::new(parent.child_token());
        let Some(raw) = metadata.get(GRPC_TIMEOUT_HEADER) else {
            return ctx;
        };
        match raw.to_str().ok().and_then(parse_grpc_timeout) {
            Some(timeout) => ctx.with_timeout(timeout),
            None => {
                warn!(value = ?raw, "ignoring malformed grpc-timeout header");
                ctx
            }
        }
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    pub fn cancel(&self) {
        self.token.cancel();
    }

    /// Non-blocking check. Cancellation takes precedence over the deadline.
    pub fn interruption(&self) -> Option<Interruption> {
        if self.token.is_cancelled() {
            return Some(Interruption::Cancelled);
        }
        match self.deadline {
            Some(deadline) if Instant::now() >= deadline => Some(Interruption::DeadlineExceeded),
            _ => None,
        }
    }

    /// Resolves once the call is interrupted. Pending forever for a context
    /// with no deadline that is never cancelled.
    pub async fn done(&self) -> Interruption {
        match self.deadline {
            Some(deadline) => tokio::select! {
                biased;
                _ = self.token.cancelled() => Interruption::Cancelled,
                _ = tokio::time::sleep_until(deadline) => Interruption::DeadlineExceeded,
            },
            None => {
                self.token.cancelled().await;
                Interruption::Cancelled
            }
        }
    }
}
