//! Animation combinators
//!
//! Structural composition of [`Animation`]s. Every combinator returns a new
//! cold animation; nothing runs until the result is run or started.
//!
//! Failure is fail-fast: the first member error ends the composite with that
//! error, and members still in flight are dropped (cancelled). Cancelling
//! the composite cancels every member in flight.

use crate::animation::Animation;
use crate::context::TimingContext;
use futures::future;
use std::sync::Arc;
use std::time::Duration;

/// Run animations one after another
///
/// Member `n + 1` starts only after member `n` has completed. An empty list
/// completes immediately.
pub fn sequence(animations: impl IntoIterator<Item = Animation>) -> Animation {
    let members: Arc<[Animation]> = animations.into_iter().collect();
    if members.is_empty() {
        return Animation::noop();
    }

    Animation::new(move || {
        let members = members.clone();
        async move {
            tracing::trace!(count = members.len(), "sequence started");
            for (index, member) in members.iter().enumerate() {
                if let Err(err) = member.run().await {
                    tracing::debug!(index, %err, "sequence member failed");
                    return Err(err);
                }
            }
            tracing::trace!("sequence complete");
            Ok(())
        }
    })
}

/// Run animations concurrently, completing once all of them have
///
/// No ordering is guaranteed between members. An empty list completes
/// immediately.
pub fn parallel(animations: impl IntoIterator<Item = Animation>) -> Animation {
    let members: Arc<[Animation]> = animations.into_iter().collect();
    if members.is_empty() {
        return Animation::noop();
    }

    Animation::new(move || {
        let runs = members.iter().map(Animation::run).collect::<Vec<_>>();
        async move {
            tracing::trace!(count = runs.len(), "parallel started");
            match future::try_join_all(runs).await {
                Ok(_) => {
                    tracing::trace!("parallel complete");
                    Ok(())
                }
                Err(err) => {
                    tracing::debug!(%err, "parallel member failed, cancelling siblings");
                    Err(err)
                }
            }
        }
    })
}

/// Re-run `animation` `count` times in sequence
///
/// `None` repeats forever; the result then only ends through cancellation
/// or failure. A count of zero or less still runs the animation once.
pub fn repeat(animation: Animation, count: Option<i32>) -> Animation {
    let count = count.map(|count| {
        if count <= 0 {
            tracing::debug!(count, "non-positive repeat count, running once");
            1
        } else {
            count as u32
        }
    });

    Animation::new(move || {
        let animation = animation.clone();
        async move {
            let mut iteration: u32 = 0;
            loop {
                if let Some(count) = count {
                    if iteration >= count {
                        return Ok(());
                    }
                }
                tracing::trace!(iteration, "repeat iteration");
                animation.run().await?;
                iteration = iteration.wrapping_add(1);
                if count.is_none() {
                    // An instantly completing member must not starve the runtime.
                    tokio::task::yield_now().await;
                }
            }
        }
    })
}

/// Sequence `animations`, waiting `delay` before each one (including the
/// first)
pub fn delay_between(
    ctx: &TimingContext,
    animations: impl IntoIterator<Item = Animation>,
    delay: Duration,
) -> Animation {
    let pause = Animation::delay(ctx, delay);
    sequence(
        animations
            .into_iter()
            .flat_map(|animation| [pause.clone(), animation]),
    )
}

/// Prefix each animation with a delay proportional to its position
///
/// The animation at index `i` waits `i * stagger_by` before starting.
/// Nothing is run; pass the result to [`parallel`] for overlapping,
/// staggered starts.
pub fn stagger(
    ctx: &TimingContext,
    animations: impl IntoIterator<Item = Animation>,
    stagger_by: Duration,
) -> Vec<Animation> {
    animations
        .into_iter()
        .enumerate()
        .map(|(index, animation)| {
            if index == 0 {
                animation
            } else {
                let offset = stagger_by.saturating_mul(index.min(u32::MAX as usize) as u32);
                sequence([Animation::delay(ctx, offset), animation])
            }
        })
        .collect()
}
