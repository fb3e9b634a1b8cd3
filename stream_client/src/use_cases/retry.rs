use std::future::Future;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;
use tokio_util::sync::CancellationToken;

// Fixed-interval, bounded polling schedule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollPolicy {
    pub interval: Duration,
    pub max_attempts: u32,
}

impl Default for PollPolicy {
    // 30 attempts, 2 seconds apart: one minute for the session to activate.
    fn default() -> Self {
        Self {
            interval: Duration::from_secs(2),
            max_attempts: 30,
        }
    }
}

#[derive(Debug, PartialEq, Eq)]
pub enum PollError<E> {
    Exhausted { attempts: u32 },
    Cancelled,
    Failed(E),
}

// Wait one interval, run the attempt, repeat. `Ok(Some)` ends the loop,
// `Ok(None)` retries and `Err` aborts immediately.
pub async fn poll_until<T, E, F, Fut>(
    policy: PollPolicy,
    cancel: &CancellationToken,
    mut attempt: F,
) -> Result<T, PollError<E>>
where
    F: FnMut(u32) -> Fut,
    Fut: Future<Output = Result<Option<T>, E>>,
{
    for attempt_number in 1..=policy.max_attempts {
        tokio::select! {
            biased;
            _ = cancel.cancelled() => return Err(PollError::Cancelled),
            _ = tokio::time::sleep(policy.interval) => {}
        }

        let outcome = tokio::select! {
            biased;
            _ = cancel.cancelled() => return Err(PollError::Cancelled),
            outcome = attempt(attempt_number) => outcome,
        };

        if let Some(value) = outcome.map_err(PollError::Failed)? {
            return Ok(value);
        }
    }

    Err(PollError::Exhausted {
        attempts: policy.max_attempts,
    })
}

/// Shared handle that always cancels the poll currently in flight.
///
/// A fired `CancellationToken` stays fired, so the session swaps in a fresh
/// token before each connection attempt. Clones of this handle see the swap.
#[derive(Clone, Debug, Default)]
pub struct PollCanceller {
    current: Arc<Mutex<CancellationToken>>,
}

impl PollCanceller {
    pub fn cancel(&self) {
        self.lock().cancel();
    }

    pub fn is_cancelled(&self) -> bool {
        self.lock().is_cancelled()
    }

    // Token for the next poll; replaced in place once it has fired.
    pub(crate) fn arm(&self) -> CancellationToken {
        let mut current = self.lock();
        if current.is_cancelled() {
            *current = CancellationToken::new();
        }
        current.clone()
    }

    fn lock(&self) -> MutexGuard<'_, CancellationToken> {
        self.current
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}
