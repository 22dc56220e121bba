use crate::config::CarouselConfig;
use crate::layout;
use crate::swipe::{Swipe, SwipeTracker};
use std::time::Duration;
use tracing::debug;

/// The page surface a carousel draws on.
pub trait Stage {
    /// Current viewport width in CSS pixels.
    fn viewport_width(&self) -> u32;
    /// Rendered width of the first slide.
    fn slide_width(&self) -> f64;
    fn translate_track(&mut self, offset_px: f64);
    /// Mark indicator `active` and clear every other one.
    fn highlight_indicator(&mut self, active: usize);
}

/// Timers owned by a carousel.
///
/// Autoplay handles are returned to the carousel and handed back on stop, so
/// the carousel alone decides how many are live (never more than one).
pub trait Scheduler {
    type Autoplay;

    /// Call `Carousel::tick` every `period` until stopped.
    fn start_autoplay(&mut self, period: Duration) -> Self::Autoplay;
    fn stop_autoplay(&mut self, handle: Self::Autoplay);
    /// Call `Carousel::release` once, after `delay`.
    fn release_after(&mut self, delay: Duration);
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Transitioning,
}

pub struct Carousel<S, T: Scheduler> {
    config: CarouselConfig,
    slide_count: usize,
    current: usize,
    phase: Phase,
    autoplay: Option<T::Autoplay>,
    swipe: SwipeTracker,
    stage: S,
    scheduler: T,
}

impl<S, T> Carousel<S, T>
where
    S: Stage,
    T: Scheduler,
{
    /// A carousel with no slides is inert: every operation is a no-op.
    pub fn new(config: CarouselConfig, slide_count: usize, stage: S, scheduler: T) -> Self {
        Self {
            config,
            slide_count,
            current: 0,
            phase: Phase::Idle,
            autoplay: None,
            swipe: SwipeTracker::default(),
            stage,
            scheduler,
        }
    }

    /// Initial wiring: highlight the first indicator and start autoplay.
    pub fn activate(&mut self) {
        if self.is_inert() {
            return;
        }
        self.stage.highlight_indicator(self.current);
        self.start_autoplay();
    }

    pub fn is_inert(&self) -> bool {
        self.slide_count == 0
    }

    pub fn current(&self) -> usize {
        self.current
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_autoplaying(&self) -> bool {
        self.autoplay.is_some()
    }

    pub fn stage(&self) -> &S {
        &self.stage
    }

    pub fn scheduler(&self) -> &T {
        &self.scheduler
    }

    pub fn visible_count(&self) -> usize {
        layout::visible_count(self.stage.viewport_width(), self.slide_count, &self.config)
    }

    pub fn max_slide(&self) -> usize {
        layout::max_slide(self.slide_count, self.visible_count())
    }

    fn accepts_navigation(&self) -> bool {
        if self.is_inert() {
            return false;
        }
        if self.phase == Phase::Transitioning {
            debug!("carousel navigation dropped mid-transition");
            return false;
        }
        true
    }

    /// Advance one position, wrapping to 0 at (or past) the last position.
    /// Returns whether the request was accepted.
    pub fn next(&mut self) -> bool {
        if !self.accepts_navigation() {
            return false;
        }
        let max = self.max_slide();
        self.current = if self.current >= max { 0 } else { self.current + 1 };
        self.render();
        true
    }

    /// Step back one position, wrapping to the last position from 0.
    pub fn prev(&mut self) -> bool {
        if !self.accepts_navigation() {
            return false;
        }
        let max = self.max_slide();
        self.current = if self.current == 0 {
            max
        } else {
            // A resize may have shrunk `max` below the current position.
            (self.current - 1).min(max)
        };
        self.render();
        true
    }

    /// Jump to `index` (clamped to the last position) and restart the
    /// autoplay countdown.
    pub fn go_to(&mut self, index: usize) -> bool {
        if !self.accepts_navigation() {
            return false;
        }
        self.current = index.min(self.max_slide());
        self.render();
        self.stop_autoplay();
        self.start_autoplay();
        true
    }

    /// Draw the current position and lock out navigation for one transition.
    pub fn render(&mut self) {
        if self.is_inert() {
            return;
        }
        self.phase = Phase::Transitioning;
        let offset = layout::track_offset(self.current, self.stage.slide_width(), self.config.gap_px);
        self.stage.translate_track(offset);
        self.stage.highlight_indicator(self.current);
        self.scheduler.release_after(self.config.transition());
    }

    /// Transition timer fired.
    pub fn release(&mut self) {
        self.phase = Phase::Idle;
    }

    /// Autoplay timer fired.
    pub fn tick(&mut self) {
        self.next();
    }

    pub fn start_autoplay(&mut self) {
        self.stop_autoplay();
        if self.is_inert() {
            return;
        }
        let handle = self.scheduler.start_autoplay(self.config.autoplay_delay());
        self.autoplay = Some(handle);
        debug!("carousel autoplay started");
    }

    pub fn stop_autoplay(&mut self) {
        if let Some(handle) = self.autoplay.take() {
            self.scheduler.stop_autoplay(handle);
            debug!("carousel autoplay stopped");
        }
    }

    pub fn pointer_entered(&mut self) {
        self.stop_autoplay();
    }

    pub fn pointer_left(&mut self) {
        self.start_autoplay();
    }

    pub fn touch_started(&mut self, x: f64) {
        if self.is_inert() {
            return;
        }
        self.swipe.begin(x);
        self.stop_autoplay();
    }

    pub fn touch_ended(&mut self, x: f64) {
        if self.is_inert() {
            return;
        }
        match self.swipe.finish(x, self.config.swipe_threshold_px) {
            Some(Swipe::Next) => {
                self.next();
            }
            Some(Swipe::Prev) => {
                self.prev();
            }
            None => {}
        }
        self.start_autoplay();
    }

    /// Viewport changed: the old offset no longer lines up, start over.
    pub fn reset(&mut self) {
        if self.is_inert() {
            return;
        }
        self.current = 0;
        self.render();
    }

    pub fn shutdown(&mut self) {
        self.stop_autoplay();
    }
}
