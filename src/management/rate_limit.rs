use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};

use crate::{
    config::RateLimitSettings, store::ExecutionLog, types::RateLimitDecision, warning,
};

/// Sliding-window counter over the `musix_rate_limit` table.
///
/// At most `max_executions` sync runs are admitted per `window`. There is no
/// smoothing: a full burst is allowed at the start of a window. Store errors
/// fail open.
#[derive(Clone)]
pub struct RateLimiter {
    log: Arc<dyn ExecutionLog>,
    max_executions: u32,
    window: Duration,
}

impl RateLimiter {
    pub fn new(log: Arc<dyn ExecutionLog>, settings: RateLimitSettings) -> Self {
        Self {
            log,
            max_executions: settings.max_executions,
            window: Duration::hours(i64::from(settings.window_hours)),
        }
    }

    pub fn max_executions(&self) -> u32 {
        self.max_executions
    }

    pub fn window_hours(&self) -> i64 {
        self.window.num_hours()
    }

    pub async fn check(&self) -> RateLimitDecision {
        self.check_at(Utc::now()).await
    }

    /// Purges expired executions, then counts the ones still inside the
    /// window ending at `now`.
    pub async fn check_at(&self, now: DateTime<Utc>) -> RateLimitDecision {
        let cutoff = now - self.window;

        if let Err(e) = self.log.purge_executions_before(cutoff).await {
            warning!("Failed to clean old rate limit executions: {}", e);
        }

        let executions = match self.log.executions_since(cutoff).await {
            Ok(executions) => executions,
            Err(e) => {
                warning!("Failed to read rate limit executions, allowing run: {}", e);
                return RateLimitDecision {
                    allowed: true,
                    remaining: self.max_executions,
                };
            }
        };

        let in_window = executions
            .iter()
            .filter(|at| now.signed_duration_since(**at) < self.window)
            .count();
        let in_window = u32::try_from(in_window).unwrap_or(u32::MAX);

        if in_window >= self.max_executions {
            return RateLimitDecision {
                allowed: false,
                remaining: 0,
            };
        }

        RateLimitDecision {
            allowed: true,
            remaining: self.max_executions - in_window,
        }
    }

    pub async fn record(&self) {
        self.record_at(Utc::now()).await
    }

    /// Stores one execution. Failures are logged; the run goes ahead.
    pub async fn record_at(&self, at: DateTime<Utc>) {
        if let Err(e) = self.log.record_execution(at).await {
            warning!("Failed to record rate limit execution: {}", e);
        }
    }
}
