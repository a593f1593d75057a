//! Clock source
//!
//! A [`Clock`] is the time base every duration computation is built on. It
//! reports a monotonic "now" and schedules delayed wake-ups; nothing else.
//! [`milliseconds_elapsed`] turns a clock into the elapsed-time signal that
//! feeds the duration driver.

use crate::context::TimingContext;
use futures::future::BoxFuture;
use futures::stream::{self, Stream};
use std::fmt;
use std::sync::Arc;
use std::time::Duration;

/// Time base used for ticks and delays
pub trait Clock: Send + Sync + fmt::Debug {
    /// Monotonic time since the clock's epoch
    fn now(&self) -> Duration;

    /// Resolve after `duration` has passed on this clock
    fn sleep(&self, duration: Duration) -> BoxFuture<'static, ()>;
}

/// Shared handle to a clock
pub type SharedClock = Arc<dyn Clock>;

/// Clock backed by `tokio::time`
///
/// Honors `tokio::time::pause`, so paused runtimes drive animations in
/// virtual time.
#[derive(Clone, Copy, Debug)]
pub struct TokioClock {
    origin: tokio::time::Instant,
}

impl TokioClock {
    pub fn new() -> Self {
        Self {
            origin: tokio::time::Instant::now(),
        }
    }
}

impl Default for TokioClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for TokioClock {
    fn now(&self) -> Duration {
        tokio::time::Instant::now().saturating_duration_since(self.origin)
    }

    fn sleep(&self, duration: Duration) -> BoxFuture<'static, ()> {
        Box::pin(tokio::time::sleep(duration))
    }
}

/// Elapsed milliseconds since subscription, sampled every
/// `ctx.sample_interval()`
///
/// The first value (0) is produced as soon as the stream is first polled,
/// which is also when the start timestamp is captured. Later ticks land on
/// multiples of the interval measured from that start, however long the
/// consumer takes between polls; ticks that have already passed are skipped
/// rather than delivered late. Each stream owns its own start, so two
/// streams never share a timeline. The stream never ends; consumers stop it
/// by dropping it.
pub fn milliseconds_elapsed(ctx: &TimingContext) -> impl Stream<Item = f64> + Send + 'static {
    let clock = ctx.clock().clone();
    let interval = ctx.sample_interval();

    stream::unfold(None, move |schedule: Option<(Duration, u64)>| {
        let clock = clock.clone();
        async move {
            let Some((start, tick)) = schedule else {
                tracing::trace!(?interval, "clock subscribed");
                return Some((0.0, Some((clock.now(), 0))));
            };

            let polled_at = clock.now().saturating_sub(start);
            let next = next_tick(polled_at, interval, tick);
            let skipped = next - tick.saturating_add(1);
            if skipped > 0 {
                tracing::trace!(skipped, "consumer fell behind, skipping ticks");
            }
            if let Some(wait) = tick_offset(interval, next).checked_sub(polled_at) {
                if !wait.is_zero() {
                    clock.sleep(wait).await;
                }
            }

            let elapsed = clock.now().saturating_sub(start);
            Some((as_millis_f64(elapsed), Some((start, next))))
        }
    })
}

/// Index of the first tick at or after `elapsed`, never earlier than the
/// tick following `tick`
fn next_tick(elapsed: Duration, interval: Duration, tick: u64) -> u64 {
    let interval = interval.as_nanos().max(1);
    let due = elapsed.as_nanos().div_ceil(interval);
    u64::try_from(due).unwrap_or(u64::MAX).max(tick.saturating_add(1))
}

fn tick_offset(interval: Duration, tick: u64) -> Duration {
    let nanos = interval.as_nanos().saturating_mul(u128::from(tick));
    Duration::from_nanos(u64::try_from(nanos).unwrap_or(u64::MAX))
}

fn as_millis_f64(elapsed: Duration) -> f64 {
    elapsed.as_nanos() as f64 / 1_000_000.0
}
