use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant};

/// Shared stop signal checked by the solver between cycles
///
/// Clones observe the same flag, so one handle can be given to another thread
/// while the solver polls its own copy. An optional deadline makes the token
/// report cancellation once wall-clock time runs out.
#[derive(Clone, Debug, Default)]
pub struct CancellationToken {
    flag: Arc<AtomicBool>,
    deadline: Option<Instant>,
}

impl CancellationToken {
    /// Create a token that is never cancelled unless asked
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a token that also cancels after `timeout` has elapsed
    pub fn with_timeout(timeout: Duration) -> Self {
        Self {
            flag: Arc::new(AtomicBool::new(false)),
            deadline: Instant::now().checked_add(timeout),
        }
    }

    /// Ask every holder of this token to stop
    pub fn cancel(&self) {
        self.flag.store(true, Ordering::Relaxed);
    }

    /// Test whether cancellation was requested or the deadline has passed
    pub fn is_cancelled(&self) -> bool {
        self.flag.load(Ordering::Relaxed)
            || self
                .deadline
                .is_some_and(|deadline| Instant::now() >= deadline)
    }
}
