// Copyright (c) 2025 - Cowboy AI, Inc.
//! Concurrent fan-out executor
//!
//! Runs one operation per item, each in its own task, and reports the first
//! failure it observes.
//!
//! ```text
//! items ──spawn──> unit 1 ─┐
//!       ──spawn──> unit 2 ─┼──> completion channel (capacity N) ──> coordinator
//!       ──spawn──> unit N ─┘                                          │
//!                    ▲                                                │ first error
//!                    └──────────────── cancellation token <───────────┘
//! ```
//!
//! Cancellation only stops units that have not issued their call yet: the
//! token is checked immediately before the call. Calls already in flight run
//! to completion and their outcome is discarded. No retries, no timeouts, no
//! concurrency cap.

use std::sync::Arc;

use futures::future::BoxFuture;
use thiserror::Error;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

/// Failure of a fan-out run
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum FanOutError<T, E> {
    /// First failure observed by the coordinator
    #[error("operation failed: {error}")]
    Failed { item: T, error: E },

    /// A unit ended without reporting (panicked or was aborted)
    #[error("worker exited without reporting an outcome")]
    WorkerLost,
}

enum Outcome<T, E> {
    Done,
    Skipped,
    Failed { item: T, error: E },
}

/// Apply `op` to every item concurrently
///
/// Returns the number of items the operation completed for, which is
/// `items.len()` on success. An empty input succeeds immediately without
/// spawning anything. Must be called from within a Tokio runtime.
pub async fn fan_out<T, R, E, F>(items: Vec<T>, op: F) -> Result<usize, FanOutError<T, E>>
where
    T: Clone + Send + 'static,
    R: Send + 'static,
    E: Send + 'static,
    F: Fn(T) -> BoxFuture<'static, Result<R, E>> + Send + Sync + 'static,
{
    let total = items.len();
    if total == 0 {
        return Ok(0);
    }

    debug!(units = total, "Fanning out");

    let op = Arc::new(op);
    let cancel = CancellationToken::new();
    let (tx, mut rx) = mpsc::channel(total);

    for item in items {
        let op = Arc::clone(&op);
        let cancel = cancel.clone();
        let tx = tx.clone();
        tokio::spawn(async move {
            let outcome = if cancel.is_cancelled() {
                Outcome::Skipped
            } else {
                match op(item.clone()).await {
                    Ok(_) => Outcome::Done,
                    Err(error) => Outcome::Failed { item, error },
                }
            };
            // Capacity is N, so this never waits; the coordinator may be gone.
            let _ = tx.send(outcome).await;
        });
    }
    drop(tx);

    let mut observed = 0;
    let mut completed = 0;
    while let Some(outcome) = rx.recv().await {
        observed += 1;
        match outcome {
            Outcome::Done => completed += 1,
            Outcome::Skipped => {}
            Outcome::Failed { item, error } => {
                cancel.cancel();
                warn!(observed, units = total, "Fan-out unit failed, cancelling remaining units");
                return Err(FanOutError::Failed { item, error });
            }
        }
        if observed == total {
            return Ok(completed);
        }
    }

    cancel.cancel();
    Err(FanOutError::WorkerLost)
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::FutureExt;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    #[tokio::test]
    async fn test_empty_input_spawns_nothing() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);
        let result = fan_out(Vec::<u32>::new(), move |_| {
            counter.fetch_add(1, Ordering::SeqCst);
            async { Ok::<_, String>(()) }.boxed()
        })
        .await;

        assert_eq!(result, Ok(0));
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_every_item_runs_once() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);
        let result = fan_out((0..16).collect(), move |_: u32| {
            let counter = Arc::clone(&counter);
            async move {
                counter.fetch_add(1, Ordering::SeqCst);
                Ok::<_, String>(())
            }
            .boxed()
        })
        .await;

        assert_eq!(result, Ok(16));
        assert_eq!(calls.load(Ordering::SeqCst), 16);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_first_error_is_returned() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);
        let result = fan_out((0..8).collect(), move |n: u32| {
            let counter = Arc::clone(&counter);
            async move {
                counter.fetch_add(1, Ordering::SeqCst);
                if n == 3 {
                    Err(format!("item {} failed", n))
                } else {
                    tokio::time::sleep(Duration::from_millis(20)).await;
                    Ok(())
                }
            }
            .boxed()
        })
        .await;

        assert_eq!(
            result,
            Err(FanOutError::Failed {
                item: 3,
                error: "item 3 failed".to_string()
            })
        );
        let launched = calls.load(Ordering::SeqCst);
        assert!((1..=8).contains(&launched), "launched {launched}");
    }

    // On the current-thread runtime the coordinator is polled between
    // batches of queued units, so it observes item 0 failing while most
    // units have not started. Those units must then skip their call.
    #[tokio::test]
    async fn test_failure_stops_unlaunched_units() {
        const UNITS: u32 = 2000;
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);
        let result = fan_out((0..UNITS).collect(), move |n: u32| {
            counter.fetch_add(1, Ordering::SeqCst);
            async move {
                if n == 0 {
                    return Err("item 0 failed".to_string());
                }
                tokio::task::yield_now().await;
                Ok(())
            }
            .boxed()
        })
        .await;

        assert!(matches!(result, Err(FanOutError::Failed { item: 0, .. })));

        // Let every queued unit run to its cancellation check.
        tokio::time::sleep(Duration::from_millis(50)).await;
        let launched = calls.load(Ordering::SeqCst);
        assert!(
            launched < UNITS as usize,
            "all {launched} units called the operation after the first failure"
        );
    }

    #[tokio::test]
    async fn test_panicking_unit_is_reported() {
        let result = fan_out(vec![1u32, 2], |n| {
            async move {
                if n == 2 {
                    panic!("unit {} exploded", n);
                }
                Ok::<_, String>(())
            }
            .boxed()
        })
        .await;

        assert_eq!(result, Err(FanOutError::WorkerLost));
    }
}
