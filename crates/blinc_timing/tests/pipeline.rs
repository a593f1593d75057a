//! Integration tests for the progress pipeline
//!
//! Clock source -> duration driver -> easing -> interpolation -> presenter,
//! exercised end to end in virtual time.

use blinc_timing::{
    animate_value, duration_percentage, queued_presenter, take_one_every, Animation, Ease,
    Outcome, Progress, ProgressStreamExt, Setter, TimingContext,
};
use futures::stream::{self, StreamExt};
use std::cell::Cell;
use std::rc::Rc;
use std::sync::{Arc, Mutex};
use std::time::Duration;

#[tokio::test(start_paused = true)]
async fn test_driver_properties_hold_for_many_durations() {
    let ctx = TimingContext::default();
    for total in [1.0, 15.0, 16.0, 17.0, 250.0, 999.0] {
        let values: Vec<f64> = duration_percentage(&ctx, total)
            .map(Progress::percent)
            .collect()
            .await;

        assert_eq!(values.last(), Some(&1.0), "total {total}");
        assert_eq!(values.iter().filter(|v| **v >= 1.0).count(), 1, "total {total}");
        assert!(values.windows(2).all(|w| w[0] <= w[1]), "total {total}: {values:?}");
    }
}

#[tokio::test(start_paused = true)]
async fn test_every_ease_drives_to_exact_completion() {
    let ctx = TimingContext::default();
    for ease in Ease::ALL {
        let values: Vec<f64> = duration_percentage(&ctx, 120.0)
            .ease(ease)
            .map(Progress::percent)
            .collect()
            .await;
        assert_eq!(values.first(), Some(&0.0), "{ease}");
        assert_eq!(values.last(), Some(&1.0), "{ease}");
    }
}

#[tokio::test(start_paused = true)]
async fn test_animate_value_respects_sample_interval() {
    let coarse = TimingContext::default()
        .with_sample_interval(Duration::from_millis(100))
        .unwrap();
    let fine = coarse.with_sample_interval(Duration::from_millis(5)).unwrap();

    let coarse_count = animate_value(&coarse, 1000.0, 0.0, 100.0, Ease::None).count().await;
    let fine_count = animate_value(&fine, 1000.0, 0.0, 100.0, Ease::None).count().await;
    assert!(coarse_count < fine_count);
    assert_eq!(coarse_count, 11);
}

#[tokio::test(start_paused = true)]
async fn test_take_one_every_never_drops() {
    let ctx = TimingContext::default();
    let inputs: Vec<Vec<i32>> = vec![vec![], vec![7], (0..50).collect(), vec![3, 3, 1, 3]];
    for input in inputs {
        let output: Vec<i32> =
            take_one_every(&ctx, stream::iter(input.clone()), Duration::from_millis(20))
                .collect()
                .await;
        assert_eq!(output, input);
    }
}

#[tokio::test(start_paused = true)]
async fn test_frame_loop_applies_values_on_presentation_queue() {
    let (presenter, mut queue) = queued_presenter();
    let ctx = TimingContext::default().with_presenter(presenter);

    let applied = Arc::new(Mutex::new(Vec::new()));
    let sink = applied.clone();
    let setter: Setter<f64> = Arc::new(move |v| {
        sink.lock().unwrap().push(v);
        Ok(())
    });

    let handle = Animation::tween(&ctx, 300.0, 0.0, 50.0, Ease::QuadInOut, setter).start();

    // Simulated UI thread: drain the queue once per frame until done.
    let mut frames = 0;
    while !handle.is_finished() {
        tokio::time::sleep(Duration::from_millis(16)).await;
        queue.run_pending();
        frames += 1;
        assert!(frames < 1000, "animation never finished");
    }
    assert_eq!(handle.join().await, Ok(Outcome::Completed));

    let inline = TimingContext::default();
    let free_running = animate_value(&inline, 300.0, 0.0, 50.0, Ease::QuadInOut)
        .count()
        .await;
    let applied = applied.lock().unwrap();
    assert_eq!(applied.first(), Some(&0.0));
    assert_eq!(applied.last(), Some(&50.0));
    assert!(applied.windows(2).all(|w| w[0] <= w[1]));

    // Waiting on the frame drain must not stretch the sampling period.
    assert!(
        applied.len() + 1 >= free_running,
        "{} values applied, driver emits {}",
        applied.len(),
        free_running
    );
}

#[tokio::test(start_paused = true)]
async fn test_thread_local_target_animates_through_queue() {
    let (presenter, mut queue) = queued_presenter();
    let ctx = TimingContext::default().with_presenter(presenter);

    let opacity = Rc::new(Cell::new(0.0));
    let node = opacity.clone();
    let writes = Rc::new(Cell::new(0));
    let counter = writes.clone();
    let setter = queue.bind(move |value: f64| {
        node.set(value);
        counter.set(counter.get() + 1);
        Ok(())
    });

    let handle = Animation::tween(&ctx, 160.0, 0.0, 1.0, Ease::SineOut, setter).start();
    let mut frames = 0;
    while !handle.is_finished() {
        tokio::time::sleep(Duration::from_millis(16)).await;
        queue.run_pending();
        frames += 1;
        assert!(frames < 1000, "animation never finished");
    }

    assert_eq!(handle.join().await, Ok(Outcome::Completed));
    assert_eq!(opacity.get(), 1.0);
    assert!(writes.get() > 2, "only {} writes", writes.get());
}
