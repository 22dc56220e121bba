//! Touch swipe detection.
//!
//! `diff = start_x - end_x`. A positive diff means the finger travelled
//! right-to-left, dragging the content left and revealing the next slide.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Swipe {
    Next,
    Prev,
}

/// Classify a completed gesture. Movements at or below `threshold` are taps.
pub fn classify(start_x: f64, end_x: f64, threshold: f64) -> Option<Swipe> {
    let diff = start_x - end_x;
    if diff.abs() <= threshold {
        return None;
    }
    if diff > 0.0 {
        Some(Swipe::Next)
    } else {
        Some(Swipe::Prev)
    }
}

/// Remembers where the current touch began.
#[derive(Debug, Default, Clone)]
pub struct SwipeTracker {
    start_x: Option<f64>,
}

impl SwipeTracker {
    pub fn begin(&mut self, x: f64) {
        self.start_x = Some(x);
    }

    /// Finish the gesture. A touch-end with no matching start is ignored.
    pub fn finish(&mut self, x: f64, threshold: f64) -> Option<Swipe> {
        let start = self.start_x.take()?;
        classify(start, x, threshold)
    }
}
