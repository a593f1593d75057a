//! Animations: cold, cancelable units of work that signal completion
//!
//! An [`Animation`] is a description, not a running thing. [`Animation::run`]
//! creates one independent run as a future; every call gets its own
//! timeline, so the same animation can be reused for many targets. Dropping
//! a run cancels it along with everything nested inside it (clock
//! subscriptions, sub-animations, pending value applications).
//!
//! [`Animation::start`] spawns a run onto the tokio runtime and hands back an
//! [`AnimationHandle`] for disposal.

use crate::context::TimingContext;
use crate::easing::Ease;
use crate::error::AnimationError;
use crate::interpolate::{animate, Lerp};
use futures::channel::oneshot;
use futures::future::{self, BoxFuture, FutureExt};
use futures::stream::{Stream, StreamExt};
use std::fmt;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;

/// Result of a single animation run
pub type AnimationResult = Result<(), AnimationError>;

/// Writes an animated value to its target
///
/// Called on the presentation domain for every value a stream produces.
/// Targets that cannot be shared across threads get a setter from
/// [`PresentQueue::bind`](crate::present::PresentQueue::bind).
pub type Setter<T> = Arc<dyn Fn(T) -> AnimationResult + Send + Sync>;

type RunFactory = Arc<dyn Fn() -> BoxFuture<'static, AnimationResult> + Send + Sync>;

/// A reusable description of a cancelable timed operation
#[derive(Clone)]
pub struct Animation {
    factory: RunFactory,
}

impl Animation {
    /// Wrap a function that creates one run per call
    pub fn new<F, Fut>(factory: F) -> Self
    where
        F: Fn() -> Fut + Send + Sync + 'static,
        Fut: Future<Output = AnimationResult> + Send + 'static,
    {
        Self {
            factory: Arc::new(move || factory().boxed()),
        }
    }

    /// Animation that completes immediately
    pub fn noop() -> Self {
        Self::new(|| future::ready(Ok(())))
    }

    /// Animation that completes after `duration` on the context's clock
    pub fn delay(ctx: &TimingContext, duration: Duration) -> Self {
        let clock = ctx.clock().clone();
        Self::new(move || {
            let sleep = clock.sleep(duration);
            async move {
                sleep.await;
                Ok(())
            }
        })
    }

    /// Drain a value stream, applying each value through `setter` on the
    /// context's presentation domain
    ///
    /// `values` is called once per run. Values are applied one at a time in
    /// emission order; the run completes after the last value has been
    /// applied. A setter failure ends the run with that error, leaving the
    /// target at the last successfully applied value.
    pub fn from_values<T, S, F>(ctx: &TimingContext, values: F, setter: Setter<T>) -> Self
    where
        T: Send + 'static,
        S: Stream<Item = T> + Send + 'static,
        F: Fn() -> S + Send + Sync + 'static,
    {
        let presenter = ctx.presenter().clone();
        Self::new(move || {
            let values = values();
            let presenter = presenter.clone();
            let setter = setter.clone();
            async move {
                futures::pin_mut!(values);
                while let Some(value) = values.next().await {
                    let (tx, rx) = oneshot::channel();
                    let setter = setter.clone();
                    presenter.present(Box::new(move || {
                        // The run was dropped while this job was queued.
                        if tx.is_canceled() {
                            return;
                        }
                        let _ = tx.send(setter(value));
                    }));

                    match rx.await {
                        Ok(Ok(())) => {}
                        Ok(Err(err)) => {
                            tracing::debug!(%err, "setter failed, aborting animation");
                            return Err(err);
                        }
                        Err(oneshot::Canceled) => return Err(AnimationError::PresenterClosed),
                    }
                }
                Ok(())
            }
        })
    }

    /// Interpolate from `from` to `to` over `total_ms` and write each value
    /// through `setter`
    pub fn tween<T>(
        ctx: &TimingContext,
        total_ms: f64,
        from: T,
        to: T,
        ease: Ease,
        setter: Setter<T>,
    ) -> Self
    where
        T: Lerp + Send + Sync + 'static,
    {
        let stream_ctx = ctx.clone();
        Self::from_values(
            ctx,
            move || animate(&stream_ctx, total_ms, from.clone(), to.clone(), ease),
            setter,
        )
    }

    /// Create one independent run
    pub fn run(&self) -> BoxFuture<'static, AnimationResult> {
        (self.factory)()
    }

    /// Spawn a run on the current tokio runtime
    ///
    /// Must be called from within a runtime. Dropping the handle detaches
    /// the run; use [`AnimationHandle::dispose`] to cancel it.
    pub fn start(&self) -> AnimationHandle {
        AnimationHandle {
            task: tokio::spawn(self.run()),
        }
    }
}

impl fmt::Debug for Animation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Animation").finish_non_exhaustive()
    }
}

/// How a started animation ended
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Outcome {
    /// Every step ran to completion
    Completed,
    /// The handle was disposed before completion
    Cancelled,
}

/// Disposable handle to a started animation
#[derive(Debug)]
pub struct AnimationHandle {
    task: JoinHandle<AnimationResult>,
}

impl AnimationHandle {
    /// Cancel the run and everything nested inside it
    ///
    /// No further values are applied once this returns. Disposing a finished
    /// animation has no effect.
    pub fn dispose(&self) {
        if !self.task.is_finished() {
            tracing::debug!("disposing animation");
        }
        self.task.abort();
    }

    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }

    /// Wait for the run to end
    pub async fn join(self) -> Result<Outcome, AnimationError> {
        match self.task.await {
            Ok(Ok(())) => Ok(Outcome::Completed),
            Ok(Err(err)) => Err(err),
            Err(err) if err.is_cancelled() => Ok(Outcome::Cancelled),
            Err(err) => Err(AnimationError::Panicked(err.to_string())),
        }
    }
}
