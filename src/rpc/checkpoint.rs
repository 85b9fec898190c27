//! Cooperative checkpointing for long-running handlers.
//!
//! Work is split into a fixed number of waits. The call context is
//! consulted at every boundary between them, and each wait ends early
//! when the context is interrupted, so an expired or cancelled call
//! never runs past the boundary that follows.

use std::time::Duration;

use tracing::debug;

use super::context::{CallContext, Interruption};

const DEFAULT_COUNT: u32 = 3;
const DEFAULT_INTERVAL: Duration = Duration::from_secs(1);

/// A bounded sequence of interruptible waits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Checkpoints {
    count: u32,
    interval: Duration,
}

impl Default for Checkpoints {
    fn default() -> Self {
        Self::new(DEFAULT_COUNT, DEFAULT_INTERVAL)
    }
}

impl Checkpoints {
    pub const fn new(count: u32, interval: Duration) -> Self {
        Self { count, interval }
    }

    /// Time taken by an uninterrupted run.
    pub fn total(&self) -> Duration {
        self.interval.saturating_mul(self.count)
    }

    /// Run every wait in order, stopping at the first boundary where `ctx`
    /// reports an interruption.
    pub async fn run(&self, ctx: &CallContext) -> Result<(), Interruption> {
        for iteration in 1..=self.count {
            if let Some(reason) = ctx.interruption() {
                debug!(iteration, ?reason, "interrupted before checkpoint");
                return Err(reason);
            }
            debug!(iteration, total = self.count, "waiting at checkpoint");
            tokio::select! {
                _ = tokio::time::sleep(self.interval) => {}
                _ = ctx.done() => {}
            }
        }

        match ctx.interruption() {
            Some(reason) => {
                debug!(?reason, "interrupted after final checkpoint");
                Err(reason)
            }
            None => Ok(()),
        }
    }
}
