//! Value interpolation
//!
//! Lifts progress streams into streams of concrete values: scalar deltas via
//! [`distance`], absolute values between two bounds via [`animate`], and
//! independently eased X/Y pairs via [`animate_point`].

use crate::context::TimingContext;
use crate::duration::duration_percentage;
use crate::easing::{ease_animation, Ease};
use crate::progress::Progress;
use crate::stream_ops::combine_latest;
use futures::stream::{Stream, StreamExt};

/// Values that can be interpolated componentwise
pub trait Lerp: Clone {
    /// Value at fraction `t` of the way from `self` to `to`
    ///
    /// `t` may leave `[0, 1]` for overshooting curves.
    fn lerp(&self, to: &Self, t: f64) -> Self;
}

impl Lerp for f64 {
    fn lerp(&self, to: &Self, t: f64) -> Self {
        self + (to - self) * t
    }
}

impl Lerp for f32 {
    fn lerp(&self, to: &Self, t: f64) -> Self {
        self + (to - self) * t as f32
    }
}

impl<T: Lerp + Copy, const N: usize> Lerp for [T; N] {
    fn lerp(&self, to: &Self, t: f64) -> Self {
        let mut out = *self;
        for (i, value) in out.iter_mut().enumerate() {
            *value = self[i].lerp(&to[i], t);
        }
        out
    }
}

/// Two-dimensional value such as a translation or a scale pair
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

impl Lerp for Point {
    fn lerp(&self, to: &Self, t: f64) -> Self {
        Point::new(self.x.lerp(&to.x, t), self.y.lerp(&to.y, t))
    }
}

/// Scale each progress value by a fixed extent
pub fn distance<S>(progress: S, extent: f64) -> impl Stream<Item = f64>
where
    S: Stream<Item = Progress>,
{
    progress.map(move |p| p.percent() * extent)
}

/// Scale each progress value by the latest value of an extent stream
pub fn distance_dynamic<S, E>(progress: S, extents: E) -> impl Stream<Item = f64>
where
    S: Stream<Item = Progress>,
    E: Stream<Item = f64>,
{
    combine_latest(progress, extents).map(|(p, extent)| p.percent() * extent)
}

/// Convert a stream of elapsed milliseconds into distance travelled at
/// `velocity` units per second
pub fn pixels_per_second<S>(elapsed_ms: S, velocity: f64) -> impl Stream<Item = f64>
where
    S: Stream<Item = f64>,
{
    elapsed_ms.map(move |ms| velocity * ms / 1000.0)
}

/// Interpolate from `from` to `to` over `total_ms` with the selected ease
///
/// The final emission is exactly `to`.
pub fn animate<T>(
    ctx: &TimingContext,
    total_ms: f64,
    from: T,
    to: T,
    ease: Ease,
) -> impl Stream<Item = T> + Send + 'static
where
    T: Lerp + Send + 'static,
{
    ease_animation(duration_percentage(ctx, total_ms), ease).map(move |p| {
        if p == Progress::COMPLETE {
            to.clone()
        } else {
            from.lerp(&to, p.percent())
        }
    })
}

/// Scalar case of [`animate`]
pub fn animate_value(
    ctx: &TimingContext,
    total_ms: f64,
    from: f64,
    to: f64,
    ease: Ease,
) -> impl Stream<Item = f64> + Send + 'static {
    let extent = to - from;
    let eased = ease_animation(duration_percentage(ctx, total_ms), ease);
    distance(eased, extent).map(move |delta| {
        // Full extent means full progress; land on `to` without rounding
        // through `from + (to - from)`.
        if delta == extent {
            to
        } else {
            from + delta
        }
    })
}

/// Interpolate a point with independent eases per axis
///
/// Each axis runs its own driver; the output pairs the latest X with the
/// latest Y and ends once both axes have reached their targets.
pub fn animate_point(
    ctx: &TimingContext,
    total_ms: f64,
    from: Point,
    to: Point,
    ease_x: Ease,
    ease_y: Ease,
) -> impl Stream<Item = Point> + Send + 'static {
    let xs = animate(ctx, total_ms, from.x, to.x, ease_x);
    let ys = animate(ctx, total_ms, from.y, to.y, ease_y);
    combine_latest(xs, ys).map(|(x, y)| Point::new(x, y))
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::stream;

    fn progress(values: Vec<f64>) -> impl Stream<Item = Progress> {
        stream::iter(values).map(Progress::new)
    }

    #[tokio::test]
    async fn test_distance_scales_progress() {
        let values: Vec<f64> = distance(progress(vec![0.0, 0.5, 1.0]), 200.0)
            .collect()
            .await;
        assert_eq!(values, vec![0.0, 100.0, 200.0]);
    }

    #[tokio::test]
    async fn test_distance_dynamic_uses_latest_extent() {
        let values: Vec<f64> =
            distance_dynamic(progress(vec![0.5, 1.0]), stream::iter(vec![10.0]))
                .collect()
                .await;
        assert_eq!(values.last(), Some(&10.0));
        assert!(values.iter().all(|v| *v == 5.0 || *v == 10.0));
    }

    #[tokio::test]
    async fn test_pixels_per_second() {
        let values: Vec<f64> = pixels_per_second(stream::iter(vec![0.0, 500.0, 2000.0]), 300.0)
            .collect()
            .await;
        assert_eq!(values, vec![0.0, 150.0, 600.0]);
    }

    #[test]
    fn test_lerp_componentwise() {
        assert_eq!(0.0f64.lerp(&10.0, 0.25), 2.5);
        assert_eq!(2.0f32.lerp(&4.0, 0.5), 3.0);
        assert_eq!([0.0f64, 10.0].lerp(&[10.0, 20.0], 0.5), [5.0, 15.0]);
        assert_eq!(
            Point::new(0.0, 0.0).lerp(&Point::new(4.0, -4.0), 0.5),
            Point::new(2.0, -2.0)
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_animate_value_lands_on_target() {
        let ctx = TimingContext::default();
        let values: Vec<f64> = animate_value(&ctx, 1000.0, 0.0, 100.0, Ease::None)
            .collect()
            .await;

        assert_eq!(values.first(), Some(&0.0));
        assert_eq!(values.last(), Some(&100.0));
        let before_last = values[values.len() - 2];
        assert!(before_last > 95.0, "penultimate value {}", before_last);
    }

    #[tokio::test(start_paused = true)]
    async fn test_animate_value_exact_target_for_awkward_bounds() {
        let ctx = TimingContext::default();
        let values: Vec<f64> = animate_value(&ctx, 100.0, 0.1, 0.3, Ease::SineInOut)
            .collect()
            .await;
        assert_eq!(values.last(), Some(&0.3));
    }

    #[tokio::test(start_paused = true)]
    async fn test_animate_generic_overshoots_then_lands() {
        let ctx = TimingContext::default();
        let values: Vec<f64> = animate(&ctx, 500.0, 0.0, 1.0, Ease::BackOut)
            .collect()
            .await;
        assert!(values.iter().any(|v| *v > 1.0));
        assert_eq!(values.last(), Some(&1.0));
    }

    #[tokio::test(start_paused = true)]
    async fn test_animate_point_axes_ease_independently() {
        let ctx = TimingContext::default();
        let points: Vec<Point> = animate_point(
            &ctx,
            400.0,
            Point::new(0.0, 0.0),
            Point::new(100.0, 100.0),
            Ease::QuadIn,
            Ease::QuadOut,
        )
        .collect()
        .await;

        assert_eq!(points.last(), Some(&Point::new(100.0, 100.0)));
        let midway = points[points.len() / 2];
        assert!(midway.x < midway.y, "quad-in X should trail quad-out Y: {:?}", midway);
    }
}
