//! Emission pacing
//!
//! [`take_one_every`] spaces a stream's items at least `interval` apart. It
//! delays, it never drops: every source item is eventually emitted, in
//! order.
//!
//! The source is only polled when the previous item has been emitted and
//! its spacing has elapsed. A pull-based source is therefore never buffered;
//! a push-based source (a channel fed faster than `interval`) accumulates
//! undelivered items in its own buffer without bound, so high-rate producers
//! should be throttled before pacing.

use crate::context::TimingContext;
use futures::stream::{self, Stream, StreamExt};
use std::time::Duration;

/// Re-emit every item of `source`, one at a time, at least `interval` after
/// the previous emission
///
/// The first item is emitted as soon as it is available.
pub fn take_one_every<S>(
    ctx: &TimingContext,
    source: S,
    interval: Duration,
) -> impl Stream<Item = S::Item>
where
    S: Stream,
{
    let clock = ctx.clock().clone();

    stream::unfold(
        (Box::pin(source), None::<Duration>),
        move |(mut source, last_emit)| {
            let clock = clock.clone();
            async move {
                let item = source.next().await?;

                if let Some(last_emit) = last_emit {
                    let due = last_emit + interval;
                    let now = clock.now();
                    if due > now {
                        clock.sleep(due - now).await;
                    }
                }

                Some((item, (source, Some(clock.now()))))
            }
        },
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::channel::mpsc;

    #[tokio::test(start_paused = true)]
    async fn test_keeps_every_item_in_order() {
        let ctx = TimingContext::default();
        let input: Vec<u32> = (0..20).collect();
        let output: Vec<u32> =
            take_one_every(&ctx, stream::iter(input.clone()), Duration::from_millis(5))
                .collect()
                .await;
        assert_eq!(output, input);
    }

    #[tokio::test(start_paused = true)]
    async fn test_spaces_burst_by_interval() {
        let ctx = TimingContext::default();
        let (tx, rx) = mpsc::unbounded();
        for i in 0..4 {
            tx.unbounded_send(i).unwrap();
        }
        drop(tx);

        let start = tokio::time::Instant::now();
        let stamps: Vec<(i32, Duration)> = take_one_every(&ctx, rx, Duration::from_millis(100))
            .map(|item| (item, start.elapsed()))
            .collect()
            .await;

        assert_eq!(stamps.iter().map(|(i, _)| *i).collect::<Vec<_>>(), vec![0, 1, 2, 3]);
        assert!(stamps[0].1 < Duration::from_millis(1));
        for pair in stamps.windows(2) {
            assert!(
                pair[1].1 - pair[0].1 >= Duration::from_millis(100),
                "spacing too small: {:?}",
                stamps
            );
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_slow_source_is_not_delayed_further() {
        let ctx = TimingContext::default();
        let source = stream::iter(0..3).then(|i| async move {
            tokio::time::sleep(Duration::from_millis(200)).await;
            i
        });

        let start = tokio::time::Instant::now();
        let stamps: Vec<Duration> = take_one_every(&ctx, source, Duration::from_millis(50))
            .map(|_| start.elapsed())
            .collect()
            .await;

        assert_eq!(stamps.len(), 3);
        assert!(stamps[2] < Duration::from_millis(620), "stamps {:?}", stamps);
    }
}
