//! Timing context
//!
//! The composition root hands a [`TimingContext`] to every operation that
//! needs a time source or a presentation domain. There are no process-wide
//! scheduler singletons: defaults come from [`TimingContext::default`] and
//! each piece can be swapped per call.

use crate::clock::{Clock, SharedClock, TokioClock};
use crate::error::{ConfigError, Result};
use crate::present::{InlinePresenter, Presenter, SharedPresenter};
use std::sync::Arc;
use std::time::Duration;

/// Default clock sampling interval (one 60 Hz frame)
pub const DEFAULT_SAMPLE_INTERVAL: Duration = Duration::from_millis(16);

/// Time source and presentation domain for a group of animations
#[derive(Clone, Debug)]
pub struct TimingContext {
    clock: SharedClock,
    presenter: SharedPresenter,
    sample_interval: Duration,
}

impl TimingContext {
    pub fn builder() -> TimingContextBuilder {
        TimingContextBuilder::default()
    }

    pub fn clock(&self) -> &SharedClock {
        &self.clock
    }

    pub fn presenter(&self) -> &SharedPresenter {
        &self.presenter
    }

    pub fn sample_interval(&self) -> Duration {
        self.sample_interval
    }

    /// Copy of this context using a different time source
    pub fn with_clock(&self, clock: impl Clock + 'static) -> Self {
        Self {
            clock: Arc::new(clock),
            ..self.clone()
        }
    }

    /// Copy of this context using a different presentation domain
    pub fn with_presenter(&self, presenter: impl Presenter + 'static) -> Self {
        Self {
            presenter: Arc::new(presenter),
            ..self.clone()
        }
    }

    /// Copy of this context sampling the clock at `interval`
    pub fn with_sample_interval(&self, interval: Duration) -> Result<Self> {
        if interval.is_zero() {
            return Err(ConfigError::ZeroSampleInterval);
        }
        Ok(Self {
            sample_interval: interval,
            ..self.clone()
        })
    }
}

impl Default for TimingContext {
    fn default() -> Self {
        Self {
            clock: Arc::new(TokioClock::new()),
            presenter: Arc::new(InlinePresenter),
            sample_interval: DEFAULT_SAMPLE_INTERVAL,
        }
    }
}

/// Builder for [`TimingContext`]
#[derive(Default)]
pub struct TimingContextBuilder {
    clock: Option<SharedClock>,
    presenter: Option<SharedPresenter>,
    sample_interval: Option<Duration>,
}

impl TimingContextBuilder {
    pub fn clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Some(Arc::new(clock));
        self
    }

    pub fn shared_clock(mut self, clock: SharedClock) -> Self {
        self.clock = Some(clock);
        self
    }

    pub fn presenter(mut self, presenter: impl Presenter + 'static) -> Self {
        self.presenter = Some(Arc::new(presenter));
        self
    }

    pub fn shared_presenter(mut self, presenter: SharedPresenter) -> Self {
        self.presenter = Some(presenter);
        self
    }

    pub fn sample_interval(mut self, interval: Duration) -> Self {
        self.sample_interval = Some(interval);
        self
    }

    pub fn build(self) -> Result<TimingContext> {
        let sample_interval = self.sample_interval.unwrap_or(DEFAULT_SAMPLE_INTERVAL);
        if sample_interval.is_zero() {
            return Err(ConfigError::ZeroSampleInterval);
        }

        Ok(TimingContext {
            clock: self.clock.unwrap_or_else(|| Arc::new(TokioClock::new())),
            presenter: self.presenter.unwrap_or_else(|| Arc::new(InlinePresenter)),
            sample_interval,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::present::queued_presenter;

    #[test]
    fn test_builder_defaults() {
        let ctx = TimingContext::builder().build().unwrap();
        assert_eq!(ctx.sample_interval(), DEFAULT_SAMPLE_INTERVAL);
    }

    #[test]
    fn test_zero_interval_rejected() {
        let err = TimingContext::builder()
            .sample_interval(Duration::ZERO)
            .build()
            .unwrap_err();
        assert_eq!(err, ConfigError::ZeroSampleInterval);

        let ctx = TimingContext::default();
        assert!(ctx.with_sample_interval(Duration::ZERO).is_err());
    }

    #[test]
    fn test_overrides_leave_original_untouched() {
        let ctx = TimingContext::default();
        let (presenter, _queue) = queued_presenter();
        let ui = ctx
            .with_presenter(presenter)
            .with_sample_interval(Duration::from_millis(4))
            .unwrap();

        assert_eq!(ui.sample_interval(), Duration::from_millis(4));
        assert_eq!(ctx.sample_interval(), DEFAULT_SAMPLE_INTERVAL);
        assert!(format!("{:?}", ui.presenter()).contains("QueuedPresenter"));
        assert!(format!("{:?}", ctx.presenter()).contains("InlinePresenter"));
    }
}
