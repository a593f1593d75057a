//! Blinc Timing Engine
//!
//! Clock-driven progress streams, easing curves, and composable, cancelable
//! animations. The engine never touches a UI type: it produces progress and
//! values, and hands them to setters on a presentation domain of your
//! choosing.
//!
//! # Features
//!
//! - **Clock Source**: Per-subscription elapsed-time streams on an injectable time base
//! - **Duration Driver**: Bounded progress that always ends exactly at 1.0
//! - **Easing**: The Penner curve set plus CSS cubic beziers
//! - **Interpolation**: Scalars, arrays and points, with per-axis easing
//! - **Pacing**: `take_one_every` spaces emissions without dropping any
//! - **Combinators**: Sequence, parallel, repeat, delay-between and stagger
//!
//! # Example
//!
//! ```no_run
//! use blinc_timing::{combinators, Animation, Ease, Setter, TimingContext};
//! use std::sync::Arc;
//! use std::time::Duration;
//!
//! # async fn demo() {
//! let ctx = TimingContext::default();
//! let opacity: Setter<f64> = Arc::new(|value| {
//!     println!("opacity = {value}");
//!     Ok(())
//! });
//!
//! let items =
//!     (0..3).map(|_| Animation::tween(&ctx, 300.0, 0.0, 1.0, Ease::CubicOut, opacity.clone()));
//! let staggered = combinators::stagger(&ctx, items, Duration::from_millis(100));
//!
//! let handle = combinators::parallel(staggered).start();
//! handle.join().await.unwrap();
//! # }
//! ```

pub mod animation;
pub mod clock;
pub mod combinators;
pub mod context;
pub mod duration;
pub mod easing;
pub mod error;
pub mod interpolate;
pub mod pacing;
pub mod present;
pub mod presets;
pub mod progress;
pub mod scheduler;

mod stream_ops;

pub use animation::{Animation, AnimationHandle, AnimationResult, Outcome, Setter};
pub use clock::{milliseconds_elapsed, Clock, SharedClock, TokioClock};
pub use combinators::{delay_between, parallel, repeat, sequence, stagger};
pub use context::{TimingContext, TimingContextBuilder, DEFAULT_SAMPLE_INTERVAL};
pub use duration::{duration_percentage, duration_percentage_dynamic, to_progress};
pub use easing::{ease_animation, CubicBezier, Ease, ProgressStreamExt};
pub use error::{AnimationError, ConfigError};
pub use interpolate::{
    animate, animate_point, animate_value, distance, distance_dynamic, pixels_per_second, Lerp,
    Point,
};
pub use pacing::take_one_every;
pub use present::{
    queued_presenter, InlinePresenter, PresentQueue, Presenter, QueuedPresenter, TargetId,
};
pub use presets::AnimationPreset;
pub use progress::Progress;
pub use scheduler::{AnimationId, AnimationScheduler};
