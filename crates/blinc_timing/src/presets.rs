//! Animation presets for common effects
//!
//! Pre-built animations over an abstract [`Setter`]. Each preset only
//! produces values; the setter decides what they mean (opacity, an offset,
//! a scale factor).

use crate::animation::{Animation, Setter};
use crate::combinators::{repeat, sequence};
use crate::context::TimingContext;
use crate::easing::Ease;
use crate::interpolate::Point;

/// Pre-built animation presets for common patterns
pub struct AnimationPreset;

impl AnimationPreset {
    // ========================================================================
    // Fade animations
    // ========================================================================

    /// Fade from transparent to opaque
    pub fn fade_in(ctx: &TimingContext, duration_ms: f64, setter: Setter<f64>) -> Animation {
        Animation::tween(ctx, duration_ms, 0.0, 1.0, Ease::QuadOut, setter)
    }

    /// Fade from opaque to transparent
    pub fn fade_out(ctx: &TimingContext, duration_ms: f64, setter: Setter<f64>) -> Animation {
        Animation::tween(ctx, duration_ms, 1.0, 0.0, Ease::QuadIn, setter)
    }

    // ========================================================================
    // Slide animations
    // ========================================================================

    /// Slide an offset from `from` back to the origin
    pub fn slide_in(
        ctx: &TimingContext,
        duration_ms: f64,
        from: Point,
        setter: Setter<Point>,
    ) -> Animation {
        Animation::tween(ctx, duration_ms, from, Point::default(), Ease::CubicOut, setter)
    }

    /// Slide an offset from the origin out to `to`
    pub fn slide_out(
        ctx: &TimingContext,
        duration_ms: f64,
        to: Point,
        setter: Setter<Point>,
    ) -> Animation {
        Animation::tween(ctx, duration_ms, Point::default(), to, Ease::CubicIn, setter)
    }

    // ========================================================================
    // Attention seekers
    // ========================================================================

    /// Horizontal shake: `0 → +amplitude → -amplitude → 0`, `count` times
    ///
    /// Each shake takes `duration_ms`. A count of zero or less shakes once.
    pub fn shake(
        ctx: &TimingContext,
        duration_ms: f64,
        amplitude: f64,
        count: i32,
        setter: Setter<f64>,
    ) -> Animation {
        let leg = duration_ms / 4.0;
        let once = sequence([
            Animation::tween(ctx, leg, 0.0, amplitude, Ease::SineOut, setter.clone()),
            Animation::tween(
                ctx,
                leg * 2.0,
                amplitude,
                -amplitude,
                Ease::SineInOut,
                setter.clone(),
            ),
            Animation::tween(ctx, leg, -amplitude, 0.0, Ease::SineIn, setter),
        ]);
        repeat(once, Some(count))
    }

    /// Grow from `base` to `peak` and back, `count` times
    ///
    /// Each pulse takes `duration_ms`. A count of zero or less pulses once.
    pub fn pulse(
        ctx: &TimingContext,
        duration_ms: f64,
        base: f64,
        peak: f64,
        count: i32,
        setter: Setter<f64>,
    ) -> Animation {
        let half = duration_ms / 2.0;
        let once = sequence([
            Animation::tween(ctx, half, base, peak, Ease::QuadOut, setter.clone()),
            Animation::tween(ctx, half, peak, base, Ease::QuadIn, setter),
        ]);
        repeat(once, Some(count))
    }
}
