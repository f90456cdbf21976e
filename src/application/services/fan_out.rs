//! # Fan-out / Fan-in
//!
//! Concurrent product collection from every registered provider.
//!
//! [`FanOut::start`] spawns one task per provider plus a supervisor task.
//! Each provider task sends at most one product to a result channel sized to
//! the number of providers, so a send never waits on the consumer. The
//! supervisor joins every provider task and then drops the last sender,
//! which closes the channel: channel closure is the "fan-out complete"
//! signal seen by the consumer as [`FanOutEvent::Exhausted`].
//!
//! Dropping the [`FanOut`] cancels the bounded lookup context, which aborts
//! every provider fetch still in flight.

use crate::application::services::provider_registry::ProviderSnapshot;
use crate::context::LookupContext;
use crate::domain::entities::Product;
use crate::domain::value_objects::Barcode;
use crate::infrastructure::providers::ProductProvider;
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio::task::JoinSet;
use tokio_util::sync::DropGuard;
use tracing::{debug, warn};

/// What the consumer observed while waiting on a fan-out.
#[derive(Debug)]
pub enum FanOutEvent {
    /// A provider answered with a product.
    Product(Product),
    /// Every provider finished and all products have been received.
    Exhausted,
    /// The bounded deadline elapsed.
    DeadlineElapsed,
    /// The caller cancelled its context.
    Cancelled,
}

/// How a single provider task ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ProviderOutcome {
    Hit,
    Miss,
    Failed,
    Cancelled,
}

#[derive(Debug, Default)]
struct FanOutSummary {
    hits: usize,
    misses: usize,
    failed: usize,
    cancelled: usize,
}

impl FanOutSummary {
    fn record(&mut self, outcome: ProviderOutcome) {
        match outcome {
            ProviderOutcome::Hit => self.hits += 1,
            ProviderOutcome::Miss => self.misses += 1,
            ProviderOutcome::Failed => self.failed += 1,
            ProviderOutcome::Cancelled => self.cancelled += 1,
        }
    }
}

/// Handle to a running fan-out, consumed by the lookup operations.
#[derive(Debug)]
pub struct FanOut {
    results: mpsc::Receiver<Product>,
    ctx: LookupContext,
    queried: usize,
    _cancel_on_drop: DropGuard,
}

impl FanOut {
    /// Starts fetching `barcode` from every provider in `providers`.
    ///
    /// `ctx` should be the bounded child context of the lookup; it is
    /// cancelled when the returned handle is dropped.
    #[must_use]
    pub fn start(providers: &ProviderSnapshot, ctx: LookupContext, barcode: &Barcode) -> Self {
        let queried = providers.len();
        let (tx, results) = mpsc::channel(queried.max(1));
        let mut tasks = JoinSet::new();

        for provider in providers.iter() {
            let provider = Arc::clone(provider);
            let ctx = ctx.clone();
            let barcode = barcode.clone();
            let tx = tx.clone();
            tasks.spawn(async move { fetch_one(provider, ctx, barcode, tx).await });
        }

        tokio::spawn(supervise(tasks, tx, barcode.clone(), queried));

        Self {
            results,
            _cancel_on_drop: ctx.cancel_on_drop(),
            ctx,
            queried,
        }
    }

    /// Returns the number of providers queried.
    #[must_use]
    pub fn queried(&self) -> usize {
        self.queried
    }

    /// Waits for the next event.
    ///
    /// Products already queued are returned before a deadline or
    /// cancellation is reported.
    pub async fn next(&mut self) -> FanOutEvent {
        tokio::select! {
            biased;
            received = self.results.recv() => match received {
                Some(product) => FanOutEvent::Product(product),
                None => FanOutEvent::Exhausted,
            },
            () = self.ctx.cancelled() => FanOutEvent::Cancelled,
            () = self.ctx.expired() => FanOutEvent::DeadlineElapsed,
        }
    }
}

async fn fetch_one(
    provider: Arc<dyn ProductProvider>,
    ctx: LookupContext,
    barcode: Barcode,
    tx: mpsc::Sender<Product>,
) -> ProviderOutcome {
    let result = tokio::select! {
        () = ctx.cancelled() => {
            debug!(provider = provider.name(), %barcode, "provider fetch cancelled");
            return ProviderOutcome::Cancelled;
        }
        result = provider.fetch(&ctx, &barcode) => result,
    };

    match result {
        Ok(Some(product)) => {
            debug!(provider = provider.name(), %barcode, rating = product.rating(), "provider returned product");
            if tx.try_send(product).is_err() {
                debug!(provider = provider.name(), %barcode, "lookup finished before product was delivered");
            }
            ProviderOutcome::Hit
        }
        Ok(None) => {
            debug!(provider = provider.name(), %barcode, "provider has no product");
            ProviderOutcome::Miss
        }
        Err(error) => {
            warn!(provider = provider.name(), %barcode, %error, "provider fetch failed");
            ProviderOutcome::Failed
        }
    }
}

async fn supervise(
    mut tasks: JoinSet<ProviderOutcome>,
    tx: mpsc::Sender<Product>,
    barcode: Barcode,
    queried: usize,
) {
    let mut summary = FanOutSummary::default();

    while let Some(joined) = tasks.join_next().await {
        match joined {
            Ok(outcome) => summary.record(outcome),
            Err(error) if error.is_panic() => {
                warn!(%barcode, "provider task panicked");
                summary.record(ProviderOutcome::Failed);
            }
            Err(_) => summary.record(ProviderOutcome::Cancelled),
        }
    }

    debug!(
        %barcode,
        queried,
        hits = summary.hits,
        misses = summary.misses,
        failed = summary.failed,
        cancelled = summary.cancelled,
        "fan-out complete"
    );

    drop(tx);
}
