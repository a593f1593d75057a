//! Easing functions for progress streams
//!
//! The Penner curve set (ten families, each with In, Out and InOut
//! directions) as pure `f64 -> f64` functions, an [`Ease`] selector for
//! choosing one at runtime, and [`CubicBezier`] for CSS-style custom curves.
//!
//! Input is nominally in `[0, 1]`. Back and Elastic curves overshoot that
//! range in the interior; that is intentional.

use crate::error::ConfigError;
use crate::progress::Progress;
use futures::stream::{Stream, StreamExt};
use std::f64::consts::{FRAC_PI_2, PI};
use std::fmt;
use std::str::FromStr;

/// Overshoot amount used by the Back family
const BACK_OVERSHOOT: f64 = 1.70158;

/// Oscillation period used by the Elastic In/Out curves
const ELASTIC_PERIOD: f64 = 0.3;

const BEZIER_TOLERANCE: f64 = 1e-9;
const BEZIER_MAX_STEPS: usize = 32;

// ============================================================================
// Back
// ============================================================================

pub fn back_in(p: f64) -> f64 {
    p * p * ((BACK_OVERSHOOT + 1.0) * p - BACK_OVERSHOOT)
}

pub fn back_out(p: f64) -> f64 {
    let q = p - 1.0;
    q * q * ((BACK_OVERSHOOT + 1.0) * q + BACK_OVERSHOOT) + 1.0
}

pub fn back_in_out(p: f64) -> f64 {
    let s = BACK_OVERSHOOT * 1.525;
    let t = p * 2.0;
    if t < 1.0 {
        0.5 * (t * t * ((s + 1.0) * t - s))
    } else {
        let t = t - 2.0;
        0.5 * (t * t * ((s + 1.0) * t + s) + 2.0)
    }
}

// ============================================================================
// Bounce
// ============================================================================

pub fn bounce_out(p: f64) -> f64 {
    if p < 4.0 / 11.0 {
        (121.0 * p * p) / 16.0
    } else if p < 8.0 / 11.0 {
        (363.0 / 40.0 * p * p) - (99.0 / 10.0 * p) + 17.0 / 5.0
    } else if p < 9.0 / 10.0 {
        (4356.0 / 361.0 * p * p) - (35442.0 / 1805.0 * p) + 16061.0 / 1805.0
    } else {
        (54.0 / 5.0 * p * p) - (513.0 / 25.0 * p) + 268.0 / 25.0
    }
}

pub fn bounce_in(p: f64) -> f64 {
    1.0 - bounce_out(1.0 - p)
}

/// Bounce in for the first half, bounce out for the second
///
/// Exactly `1.0` maps to `1.0`.
pub fn bounce_in_out(p: f64) -> f64 {
    if p >= 1.0 {
        1.0
    } else if p < 0.5 {
        0.5 * bounce_in(p * 2.0)
    } else {
        0.5 * bounce_out(p * 2.0 - 1.0) + 0.5
    }
}

// ============================================================================
// Circ
// ============================================================================

pub fn circ_in(p: f64) -> f64 {
    1.0 - (1.0 - p * p).sqrt()
}

pub fn circ_out(p: f64) -> f64 {
    ((2.0 - p) * p).sqrt()
}

pub fn circ_in_out(p: f64) -> f64 {
    if p < 0.5 {
        0.5 * (1.0 - (1.0 - 4.0 * p * p).sqrt())
    } else {
        0.5 * ((-(2.0 * p - 3.0) * (2.0 * p - 1.0)).sqrt() + 1.0)
    }
}

// ============================================================================
// Cubic
// ============================================================================

pub fn cubic_in(p: f64) -> f64 {
    p * p * p
}

pub fn cubic_out(p: f64) -> f64 {
    let f = p - 1.0;
    f * f * f + 1.0
}

pub fn cubic_in_out(p: f64) -> f64 {
    if p < 0.5 {
        4.0 * p * p * p
    } else {
        let f = 2.0 * p - 2.0;
        0.5 * f * f * f + 1.0
    }
}

// ============================================================================
// Elastic
// ============================================================================

pub fn elastic_in(p: f64) -> f64 {
    if p == 0.0 || p == 1.0 {
        return p;
    }
    let s = ELASTIC_PERIOD / 4.0;
    let t = p - 1.0;
    -(2f64.powf(10.0 * t) * ((t - s) * (2.0 * PI) / ELASTIC_PERIOD).sin())
}

pub fn elastic_out(p: f64) -> f64 {
    if p == 0.0 || p == 1.0 {
        return p;
    }
    let s = ELASTIC_PERIOD / 4.0;
    2f64.powf(-10.0 * p) * ((p - s) * (2.0 * PI) / ELASTIC_PERIOD).sin() + 1.0
}

pub fn elastic_in_out(p: f64) -> f64 {
    if p == 0.0 || p == 1.0 {
        return p;
    }
    let period = ELASTIC_PERIOD * 1.5;
    let s = period / 4.0;
    let t = p * 2.0 - 1.0;
    let wave = ((t - s) * (2.0 * PI) / period).sin();
    if t < 0.0 {
        -0.5 * 2f64.powf(10.0 * t) * wave
    } else {
        0.5 * 2f64.powf(-10.0 * t) * wave + 1.0
    }
}

// ============================================================================
// Expo
// ============================================================================

pub fn expo_in(p: f64) -> f64 {
    if p == 0.0 || p == 1.0 {
        return p;
    }
    2f64.powf(10.0 * (p - 1.0))
}

pub fn expo_out(p: f64) -> f64 {
    if p == 0.0 || p == 1.0 {
        return p;
    }
    1.0 - 2f64.powf(-10.0 * p)
}

pub fn expo_in_out(p: f64) -> f64 {
    if p == 0.0 || p == 1.0 {
        return p;
    }
    if p < 0.5 {
        0.5 * 2f64.powf(20.0 * p - 10.0)
    } else {
        -0.5 * 2f64.powf(-20.0 * p + 10.0) + 1.0
    }
}

// ============================================================================
// Quad
// ============================================================================

pub fn quad_in(p: f64) -> f64 {
    p * p
}

pub fn quad_out(p: f64) -> f64 {
    -(p * (p - 2.0))
}

pub fn quad_in_out(p: f64) -> f64 {
    if p < 0.5 {
        2.0 * p * p
    } else {
        -2.0 * p * p + 4.0 * p - 1.0
    }
}

// ============================================================================
// Quartic
// ============================================================================

pub fn quartic_in(p: f64) -> f64 {
    p * p * p * p
}

pub fn quartic_out(p: f64) -> f64 {
    let f = p - 1.0;
    f * f * f * (1.0 - p) + 1.0
}

pub fn quartic_in_out(p: f64) -> f64 {
    if p < 0.5 {
        8.0 * p * p * p * p
    } else {
        let f = p - 1.0;
        -8.0 * f * f * f * f + 1.0
    }
}

// ============================================================================
// Quintic
// ============================================================================

pub fn quintic_in(p: f64) -> f64 {
    p * p * p * p * p
}

pub fn quintic_out(p: f64) -> f64 {
    let f = p - 1.0;
    f * f * f * f * f + 1.0
}

pub fn quintic_in_out(p: f64) -> f64 {
    if p < 0.5 {
        16.0 * p * p * p * p * p
    } else {
        let f = 2.0 * p - 2.0;
        0.5 * f * f * f * f * f + 1.0
    }
}

// ============================================================================
// Sine
// ============================================================================

pub fn sine_in(p: f64) -> f64 {
    let cos = (p * FRAC_PI_2).cos();
    // cos(π/2) is ~6e-17, not zero
    if cos.abs() < 1e-14 {
        return 1.0;
    }
    1.0 - cos
}

pub fn sine_out(p: f64) -> f64 {
    (p * FRAC_PI_2).sin()
}

pub fn sine_in_out(p: f64) -> f64 {
    0.5 * (1.0 - (p * PI).cos())
}

// ============================================================================
// Selector
// ============================================================================

/// Named easing curve, selectable at runtime
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Ease {
    /// Linear progress, no reshaping
    #[default]
    None,
    BackIn,
    BackOut,
    BackInOut,
    BounceIn,
    BounceOut,
    BounceInOut,
    CircIn,
    CircOut,
    CircInOut,
    CubicIn,
    CubicOut,
    CubicInOut,
    ElasticIn,
    ElasticOut,
    ElasticInOut,
    ExpoIn,
    ExpoOut,
    ExpoInOut,
    QuadIn,
    QuadOut,
    QuadInOut,
    QuarticIn,
    QuarticOut,
    QuarticInOut,
    QuinticIn,
    QuinticOut,
    QuinticInOut,
    SineIn,
    SineOut,
    SineInOut,
}

impl Ease {
    /// Every reshaping curve (excludes [`Ease::None`])
    pub const ALL: [Ease; 30] = [
        Ease::BackIn,
        Ease::BackOut,
        Ease::BackInOut,
        Ease::BounceIn,
        Ease::BounceOut,
        Ease::BounceInOut,
        Ease::CircIn,
        Ease::CircOut,
        Ease::CircInOut,
        Ease::CubicIn,
        Ease::CubicOut,
        Ease::CubicInOut,
        Ease::ElasticIn,
        Ease::ElasticOut,
        Ease::ElasticInOut,
        Ease::ExpoIn,
        Ease::ExpoOut,
        Ease::ExpoInOut,
        Ease::QuadIn,
        Ease::QuadOut,
        Ease::QuadInOut,
        Ease::QuarticIn,
        Ease::QuarticOut,
        Ease::QuarticInOut,
        Ease::QuinticIn,
        Ease::QuinticOut,
        Ease::QuinticInOut,
        Ease::SineIn,
        Ease::SineOut,
        Ease::SineInOut,
    ];

    /// The curve as a plain function
    pub fn function(self) -> fn(f64) -> f64 {
        match self {
            Ease::None => linear,
            Ease::BackIn => back_in,
            Ease::BackOut => back_out,
            Ease::BackInOut => back_in_out,
            Ease::BounceIn => bounce_in,
            Ease::BounceOut => bounce_out,
            Ease::BounceInOut => bounce_in_out,
            Ease::CircIn => circ_in,
            Ease::CircOut => circ_out,
            Ease::CircInOut => circ_in_out,
            Ease::CubicIn => cubic_in,
            Ease::CubicOut => cubic_out,
            Ease::CubicInOut => cubic_in_out,
            Ease::ElasticIn => elastic_in,
            Ease::ElasticOut => elastic_out,
            Ease::ElasticInOut => elastic_in_out,
            Ease::ExpoIn => expo_in,
            Ease::ExpoOut => expo_out,
            Ease::ExpoInOut => expo_in_out,
            Ease::QuadIn => quad_in,
            Ease::QuadOut => quad_out,
            Ease::QuadInOut => quad_in_out,
            Ease::QuarticIn => quartic_in,
            Ease::QuarticOut => quartic_out,
            Ease::QuarticInOut => quartic_in_out,
            Ease::QuinticIn => quintic_in,
            Ease::QuinticOut => quintic_out,
            Ease::QuinticInOut => quintic_in_out,
            Ease::SineIn => sine_in,
            Ease::SineOut => sine_out,
            Ease::SineInOut => sine_in_out,
        }
    }

    /// Reshape a progress value
    ///
    /// Endpoints are always exact, so an eased animation lands precisely on
    /// its start and end values.
    pub fn apply(self, progress: Progress) -> Progress {
        let p = progress.percent();
        if p == 0.0 || p == 1.0 {
            return progress;
        }
        Progress::new((self.function())(p))
    }

    pub fn name(self) -> &'static str {
        match self {
            Ease::None => "None",
            Ease::BackIn => "BackIn",
            Ease::BackOut => "BackOut",
            Ease::BackInOut => "BackInOut",
            Ease::BounceIn => "BounceIn",
            Ease::BounceOut => "BounceOut",
            Ease::BounceInOut => "BounceInOut",
            Ease::CircIn => "CircIn",
            Ease::CircOut => "CircOut",
            Ease::CircInOut => "CircInOut",
            Ease::CubicIn => "CubicIn",
            Ease::CubicOut => "CubicOut",
            Ease::CubicInOut => "CubicInOut",
            Ease::ElasticIn => "ElasticIn",
            Ease::ElasticOut => "ElasticOut",
            Ease::ElasticInOut => "ElasticInOut",
            Ease::ExpoIn => "ExpoIn",
            Ease::ExpoOut => "ExpoOut",
            Ease::ExpoInOut => "ExpoInOut",
            Ease::QuadIn => "QuadIn",
            Ease::QuadOut => "QuadOut",
            Ease::QuadInOut => "QuadInOut",
            Ease::QuarticIn => "QuarticIn",
            Ease::QuarticOut => "QuarticOut",
            Ease::QuarticInOut => "QuarticInOut",
            Ease::QuinticIn => "QuinticIn",
            Ease::QuinticOut => "QuinticOut",
            Ease::QuinticInOut => "QuinticInOut",
            Ease::SineIn => "SineIn",
            Ease::SineOut => "SineOut",
            Ease::SineInOut => "SineInOut",
        }
    }
}

fn linear(p: f64) -> f64 {
    p
}

impl fmt::Display for Ease {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Ease {
    type Err = ConfigError;

    /// Parse a curve name, ignoring case, `-` and `_`
    /// (`"cubic-in"`, `"CubicIn"` and `"cubic_in"` are the same curve)
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .chars()
            .filter(|c| *c != '-' && *c != '_')
            .map(|c| c.to_ascii_lowercase())
            .collect();

        if normalized == "none" || normalized == "linear" {
            return Ok(Ease::None);
        }

        Ease::ALL
            .iter()
            .copied()
            .find(|ease| ease.name().eq_ignore_ascii_case(&normalized))
            .ok_or_else(|| ConfigError::UnknownEase(s.to_string()))
    }
}

// ============================================================================
// Stream operators
// ============================================================================

/// Reshape every value of a progress stream with the selected curve
pub fn ease_animation<S>(progress: S, ease: Ease) -> impl Stream<Item = Progress>
where
    S: Stream<Item = Progress>,
{
    progress.map(move |p| ease.apply(p))
}

/// Boxed progress reshaping step
pub type EaseFn = Box<dyn FnMut(Progress) -> Progress + Send>;

/// Progress stream reshaped by a [`ProgressStreamExt`] operator
pub type Eased<S> = futures::stream::Map<S, EaseFn>;

/// Easing operators on progress streams
pub trait ProgressStreamExt: Stream<Item = Progress> + Sized {
    /// Reshape with a named curve
    fn ease(self, ease: Ease) -> Eased<Self> {
        let step: EaseFn = Box::new(move |p| ease.apply(p));
        self.map(step)
    }

    /// Reshape with an arbitrary curve such as [`cubic_in`] or a
    /// [`CubicBezier`]
    fn ease_with<F>(self, curve: F) -> Eased<Self>
    where
        F: Fn(f64) -> f64 + Send + 'static,
    {
        let step: EaseFn = Box::new(move |p| Progress::new(curve(p.percent())));
        self.map(step)
    }
}

impl<S> ProgressStreamExt for S where S: Stream<Item = Progress> + Sized {}

// ============================================================================
// Cubic bezier
// ============================================================================

/// CSS-style cubic bezier curve through `(0, 0)`, `(x1, y1)`, `(x2, y2)`,
/// `(1, 1)`
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CubicBezier {
    pub x1: f64,
    pub y1: f64,
    pub x2: f64,
    pub y2: f64,
}

impl CubicBezier {
    pub const fn new(x1: f64, y1: f64, x2: f64, y2: f64) -> Self {
        Self { x1, y1, x2, y2 }
    }

    /// CSS `ease`
    pub const fn ease() -> Self {
        Self::new(0.25, 0.1, 0.25, 1.0)
    }

    /// CSS `ease-in-out`
    pub const fn ease_in_out() -> Self {
        Self::new(0.42, 0.0, 0.58, 1.0)
    }

    /// Eased value for input progress `t`
    ///
    /// Inputs at or beyond the ends return exactly 0 or 1.
    pub fn apply(&self, t: f64) -> f64 {
        if t <= 0.0 {
            0.0
        } else if t >= 1.0 {
            1.0
        } else {
            Self::coordinate(self.y1, self.y2, self.parameter_at(t))
        }
    }

    /// Curve parameter whose X coordinate is `x`
    ///
    /// Newton steps inside a shrinking bracket. A step that leaves the
    /// bracket, including one off a flat slope, becomes a bisection. Assumes
    /// `x1` and `x2` lie in `[0, 1]`, which keeps X monotonic.
    fn parameter_at(&self, x: f64) -> f64 {
        let (mut lo, mut hi) = (0.0, 1.0);
        let mut s = x;
        for _ in 0..BEZIER_MAX_STEPS {
            let error = Self::coordinate(self.x1, self.x2, s) - x;
            if error.abs() < BEZIER_TOLERANCE {
                break;
            }
            if error < 0.0 {
                lo = s;
            } else {
                hi = s;
            }

            let next = s - error / Self::derivative(self.x1, self.x2, s);
            s = if next > lo && next < hi {
                next
            } else {
                0.5 * (lo + hi)
            };
        }
        s
    }

    /// One axis of the curve at parameter `s`, anchored at 0 and 1
    fn coordinate(c1: f64, c2: f64, s: f64) -> f64 {
        let r = 1.0 - s;
        3.0 * r * r * s * c1 + 3.0 * r * s * s * c2 + s * s * s
    }

    fn derivative(c1: f64, c2: f64, s: f64) -> f64 {
        let r = 1.0 - s;
        3.0 * r * r * c1 + 6.0 * r * s * (c2 - c1) + 3.0 * s * s * (1.0 - c2)
    }
}
