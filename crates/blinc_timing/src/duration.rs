//! Duration driver
//!
//! Converts elapsed clock time into a bounded [`Progress`] sequence. Every
//! driver stream ends with exactly one `Progress::COMPLETE`, whatever the
//! sampling granularity, and then finishes.

use crate::clock::milliseconds_elapsed;
use crate::context::TimingContext;
use crate::progress::Progress;
use crate::stream_ops::combine_latest;
use futures::future;
use futures::stream::{self, Stream, StreamExt};

/// Progress over a fixed total duration in milliseconds
///
/// A non-positive (or NaN) `total_ms` completes instantly: the stream emits a
/// single `1.0` without consuming the clock.
pub fn duration_percentage(
    ctx: &TimingContext,
    total_ms: f64,
) -> impl Stream<Item = Progress> + Send + 'static {
    if total_ms.is_nan() || total_ms <= 0.0 {
        tracing::trace!(total_ms, "non-positive duration completes instantly");
        return stream::once(future::ready(Progress::COMPLETE)).left_stream();
    }

    let percents =
        milliseconds_elapsed(ctx).map(move |elapsed| percent_complete(elapsed, total_ms));
    until_complete(percents).right_stream()
}

/// Progress over a duration that may change while the animation runs
///
/// Each clock tick is combined with the most recent duration value. A
/// changed duration takes effect on the next tick, so progress can jump
/// backwards or forwards. Nothing is emitted until `totals` produces its
/// first value.
pub fn duration_percentage_dynamic<S>(
    ctx: &TimingContext,
    totals: S,
) -> impl Stream<Item = Progress> + Send + 'static
where
    S: Stream<Item = f64> + Send + 'static,
{
    let percents = combine_latest(milliseconds_elapsed(ctx), totals)
        .map(|(elapsed, total_ms)| percent_complete(elapsed, total_ms));
    until_complete(percents)
}

/// Lift raw fractions into progress values without validation
pub fn to_progress<S>(fractions: S) -> impl Stream<Item = Progress>
where
    S: Stream<Item = f64>,
{
    fractions.map(Progress::new)
}

fn percent_complete(elapsed_ms: f64, total_ms: f64) -> f64 {
    if total_ms <= 0.0 {
        1.0
    } else {
        elapsed_ms / total_ms
    }
}

/// Forward fractions below one, then emit the terminal value and finish
fn until_complete<S>(percents: S) -> impl Stream<Item = Progress>
where
    S: Stream<Item = f64>,
{
    percents
        .take_while(|percent| future::ready(*percent < 1.0))
        .map(Progress::new)
        .chain(stream::once(future::ready(Progress::COMPLETE)))
        .inspect(|progress| {
            if progress.is_complete() {
                tracing::trace!("duration driver complete");
            }
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::channel::mpsc;
    use std::time::Duration;

    #[tokio::test(start_paused = true)]
    async fn test_fixed_duration_ends_exactly_at_one() {
        let ctx = TimingContext::default();
        let values: Vec<f64> = duration_percentage(&ctx, 200.0)
            .map(Progress::percent)
            .collect()
            .await;

        assert_eq!(values.first(), Some(&0.0));
        assert_eq!(values.last(), Some(&1.0));
        assert_eq!(values.iter().filter(|v| **v == 1.0).count(), 1);
        for pair in values.windows(2) {
            assert!(pair[0] <= pair[1], "not monotonic: {:?}", values);
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_fixed_duration_takes_total_time() {
        let ctx = TimingContext::default();
        let start = tokio::time::Instant::now();
        duration_percentage(&ctx, 300.0).for_each(|_| async {}).await;
        assert!(start.elapsed() >= Duration::from_millis(300));
    }

    #[tokio::test(start_paused = true)]
    async fn test_non_positive_duration_emits_single_value() {
        let ctx = TimingContext::default();
        for total in [0.0, -25.0, f64::NAN] {
            let values: Vec<Progress> = duration_percentage(&ctx, total).collect().await;
            assert_eq!(values, vec![Progress::COMPLETE]);
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_dynamic_duration_waits_for_first_total() {
        let ctx = TimingContext::default();
        let (tx, rx) = mpsc::unbounded::<f64>();
        let mut progress = Box::pin(duration_percentage_dynamic(&ctx, rx));

        let early = tokio::time::timeout(Duration::from_millis(100), progress.next()).await;
        assert!(early.is_err(), "driver emitted before any duration arrived");

        tx.unbounded_send(100.0).unwrap();
        let values: Vec<f64> = progress.map(Progress::percent).collect().await;
        assert_eq!(values.last(), Some(&1.0));
    }

    #[tokio::test(start_paused = true)]
    async fn test_dynamic_duration_change_applies_mid_flight() {
        let ctx = TimingContext::default();
        let (tx, rx) = mpsc::unbounded::<f64>();
        tx.unbounded_send(1000.0).unwrap();
        let mut progress = Box::pin(duration_percentage_dynamic(&ctx, rx));

        let mut last = 0.0;
        while let Some(p) = progress.next().await {
            last = p.percent();
            if last >= 0.2 {
                break;
            }
        }
        assert!(last < 1.0);

        // Shrinking the total makes progress jump straight to completion.
        tx.unbounded_send(50.0).unwrap();
        let rest: Vec<f64> = progress.map(Progress::percent).collect().await;
        assert_eq!(rest.last(), Some(&1.0));
        assert!(rest.len() <= 2, "expected an immediate jump, got {:?}", rest);
    }

    #[tokio::test]
    async fn test_to_progress_passes_values_through() {
        let values: Vec<Progress> = to_progress(stream::iter(vec![-0.5, 0.5, 1.5]))
            .collect()
            .await;
        assert_eq!(
            values,
            vec![Progress::new(-0.5), Progress::new(0.5), Progress::new(1.5)]
        );
    }
}
