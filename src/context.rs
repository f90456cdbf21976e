//! # Lookup Context
//!
//! Cancellation and deadline plumbing shared by the engine, providers and
//! caches.
//!
//! A [`LookupContext`] pairs a [`CancellationToken`] with an optional
//! deadline. The aggregation engine derives a bounded child context for every
//! lookup with [`LookupContext::bounded`]; cancelling the parent cancels the
//! child, while cancelling the child leaves the caller's context untouched.
//!
//! # Examples
//!
//! ```
//! use getproduct::context::LookupContext;
//! use std::time::Duration;
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() {
//! let ctx = LookupContext::with_timeout(Duration::from_secs(30));
//! let bounded = ctx.bounded(Duration::from_secs(10));
//!
//! assert!(bounded.deadline() <= ctx.deadline());
//! ctx.cancel();
//! assert!(bounded.is_cancelled());
//! # }
//! ```

use std::fmt;
use std::future::Future;
use std::time::Duration;
use tokio::time::Instant;
use tokio_util::sync::{CancellationToken, DropGuard};

/// Why a future run under [`LookupContext::run`] did not complete.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Interrupted {
    /// The context was cancelled.
    Cancelled,
    /// The context deadline elapsed.
    DeadlineElapsed,
}

impl fmt::Display for Interrupted {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Cancelled => write!(f, "cancelled"),
            Self::DeadlineElapsed => write!(f, "deadline elapsed"),
        }
    }
}

impl std::error::Error for Interrupted {}

/// Cancellation token plus optional deadline for a single lookup.
#[derive(Debug, Clone, Default)]
pub struct LookupContext {
    cancellation: CancellationToken,
    deadline: Option<Instant>,
}

impl LookupContext {
    /// Creates a context with no deadline and a fresh cancellation token.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a context that expires `timeout` from now.
    #[must_use]
    pub fn with_timeout(timeout: Duration) -> Self {
        Self::new().with_deadline(Instant::now() + timeout)
    }

    /// Builder: tighten the deadline. A later deadline than the current one
    /// is ignored.
    #[must_use]
    pub fn with_deadline(mut self, deadline: Instant) -> Self {
        self.deadline = Some(earliest(self.deadline, deadline));
        self
    }

    /// Builder: attach an existing cancellation token.
    #[must_use]
    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancellation = token;
        self
    }

    /// Derives a child context bounded by `ceiling` from now.
    ///
    /// The child deadline is the earlier of this context's deadline and
    /// `now + ceiling`. The child token is cancelled whenever this context
    /// is cancelled.
    #[must_use]
    pub fn bounded(&self, ceiling: Duration) -> Self {
        Self {
            cancellation: self.cancellation.child_token(),
            deadline: Some(earliest(self.deadline, Instant::now() + ceiling)),
        }
    }

    /// Returns the deadline, if any.
    #[inline]
    #[must_use]
    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    /// Returns the time left before the deadline, `None` when unbounded.
    #[must_use]
    pub fn remaining(&self) -> Option<Duration> {
        self.deadline
            .map(|deadline| deadline.saturating_duration_since(Instant::now()))
    }

    /// Returns true if the deadline has passed.
    #[must_use]
    pub fn is_expired(&self) -> bool {
        self.deadline
            .is_some_and(|deadline| deadline <= Instant::now())
    }

    /// Returns the cancellation token.
    #[inline]
    #[must_use]
    pub fn cancellation(&self) -> &CancellationToken {
        &self.cancellation
    }

    /// Returns true if the context has been cancelled.
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.cancellation.is_cancelled()
    }

    /// Cancels this context and every context derived from it.
    pub fn cancel(&self) {
        self.cancellation.cancel();
    }

    /// Completes when the context is cancelled.
    pub async fn cancelled(&self) {
        self.cancellation.cancelled().await;
    }

    /// Completes when the deadline elapses; never completes without one.
    pub async fn expired(&self) {
        match self.deadline {
            Some(deadline) => tokio::time::sleep_until(deadline).await,
            None => std::future::pending::<()>().await,
        }
    }

    /// Drives `future` until it completes, the context is cancelled or the
    /// deadline elapses, whichever comes first.
    ///
    /// A context that is already cancelled or expired never polls `future`.
    ///
    /// # Errors
    ///
    /// Returns [`Interrupted`] when the context ends before `future` does.
    pub async fn run<F: Future>(&self, future: F) -> Result<F::Output, Interrupted> {
        tokio::select! {
            biased;
            () = self.cancelled() => Err(Interrupted::Cancelled),
            () = self.expired() => Err(Interrupted::DeadlineElapsed),
            output = future => Ok(output),
        }
    }

    /// Returns a guard that cancels this context when dropped.
    #[must_use]
    pub fn cancel_on_drop(&self) -> DropGuard {
        self.cancellation.clone().drop_guard()
    }
}

fn earliest(current: Option<Instant>, candidate: Instant) -> Instant {
    match current {
        Some(current) if current < candidate => current,
        _ => candidate,
    }
}
