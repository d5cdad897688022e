//! Global analysis cooldown.
//!
//! One shared slot for the whole process: a request is admitted only when
//! the previously accepted request lies at least the cooldown in the past.
//! The slot is updated on every accepted request regardless of that
//! request's eventual outcome, and resets on process restart. This is a
//! naive shedding mechanism, not a per-client limit; across multiple
//! instances it guarantees nothing.

use std::sync::Arc;
use std::time::{Duration, Instant};

use tokio::sync::Mutex;
use tracing::debug;

/// Process-wide single-slot cooldown limiter.
#[derive(Clone)]
pub struct CooldownLimiter {
    last_accepted: Arc<Mutex<Option<Instant>>>,
    cooldown: Duration,
}

impl CooldownLimiter {
    pub fn new(cooldown: Duration) -> Self {
        Self {
            last_accepted: Arc::new(Mutex::new(None)),
            cooldown,
        }
    }

    /// Try to admit a request.
    ///
    /// On rejection returns the milliseconds until the window reopens.
    pub async fn try_acquire(&self) -> Result<(), u64> {
        let mut last = self.last_accepted.lock().await;
        let now = Instant::now();

        if let Some(previous) = *last {
            let elapsed = now.duration_since(previous);
            if elapsed < self.cooldown {
                let retry_after_ms = (self.cooldown - elapsed).as_millis().max(1) as u64;
                debug!(retry_after_ms, "Cooldown rejection");
                return Err(retry_after_ms);
            }
        }

        *last = Some(now);
        Ok(())
    }
}
