use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;

/// Upper bound on the number of slides shown at the widest breakpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VisibleCap {
    /// Always this many, even when fewer slides exist.
    Fixed(usize),
    /// This many, or the slide count when there are fewer slides.
    UpTo(usize),
}

impl VisibleCap {
    pub fn resolve(self, slide_count: usize) -> usize {
        match self {
            VisibleCap::Fixed(n) => n,
            VisibleCap::UpTo(n) => n.min(slide_count),
        }
    }

    fn raw(self) -> usize {
        match self {
            VisibleCap::Fixed(n) | VisibleCap::UpTo(n) => n,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Breakpoints {
    /// Widths strictly below this show a single slide.
    pub narrow_below: u32,
    /// Widths strictly below this (and not narrow) show two slides.
    pub medium_below: u32,
}

impl Default for Breakpoints {
    fn default() -> Self {
        Self {
            narrow_below: 768,
            medium_below: 1024,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CarouselConfig {
    pub autoplay_delay_ms: u64,
    pub transition_ms: u64,
    pub gap_px: f64,
    pub cap: VisibleCap,
    pub breakpoints: Breakpoints,
    pub swipe_threshold_px: f64,
}

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("autoplay delay must be greater than zero")]
    ZeroAutoplayDelay,
    #[error("transition duration must be greater than zero")]
    ZeroTransition,
    #[error("visible cap must be at least one slide")]
    ZeroCap,
    #[error("gap must be a finite, non-negative pixel value (got {0})")]
    InvalidGap(f64),
    #[error("swipe threshold must be a finite, non-negative pixel value (got {0})")]
    InvalidSwipeThreshold(f64),
    #[error("breakpoints out of order: narrow ({narrow}) must be below medium ({medium})")]
    BreakpointOrder { narrow: u32, medium: u32 },
    #[error("malformed carousel overrides: {0}")]
    Malformed(String),
}

impl CarouselConfig {
    /// Offers strip: wider gutter, three slides at most.
    pub fn offers() -> Self {
        Self {
            gap_px: 30.0,
            cap: VisibleCap::Fixed(3),
            ..Self::base()
        }
    }

    /// Best-sellers strip: tighter gutter, up to four slides.
    pub fn best_sellers() -> Self {
        Self {
            gap_px: 20.0,
            cap: VisibleCap::UpTo(4),
            ..Self::base()
        }
    }

    fn base() -> Self {
        Self {
            autoplay_delay_ms: 4_000,
            transition_ms: 600,
            gap_px: 0.0,
            cap: VisibleCap::Fixed(3),
            breakpoints: Breakpoints::default(),
            swipe_threshold_px: 50.0,
        }
    }

    pub fn autoplay_delay(&self) -> Duration {
        Duration::from_millis(self.autoplay_delay_ms)
    }

    pub fn transition(&self) -> Duration {
        Duration::from_millis(self.transition_ms)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.autoplay_delay_ms == 0 {
            return Err(ConfigError::ZeroAutoplayDelay);
        }
        if self.transition_ms == 0 {
            return Err(ConfigError::ZeroTransition);
        }
        if self.cap.raw() == 0 {
            return Err(ConfigError::ZeroCap);
        }
        if !self.gap_px.is_finite() || self.gap_px < 0.0 {
            return Err(ConfigError::InvalidGap(self.gap_px));
        }
        if !self.swipe_threshold_px.is_finite() || self.swipe_threshold_px < 0.0 {
            return Err(ConfigError::InvalidSwipeThreshold(self.swipe_threshold_px));
        }
        let Breakpoints {
            narrow_below,
            medium_below,
        } = self.breakpoints;
        if narrow_below >= medium_below {
            return Err(ConfigError::BreakpointOrder {
                narrow: narrow_below,
                medium: medium_below,
            });
        }
        Ok(())
    }
}

/// Per-page adjustments layered on top of a preset, usually read from a
/// `data-carousel-config` attribute.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ConfigOverrides {
    pub autoplay_delay_ms: Option<u64>,
    pub transition_ms: Option<u64>,
    pub gap_px: Option<f64>,
    pub cap: Option<VisibleCap>,
    pub breakpoints: Option<Breakpoints>,
    pub swipe_threshold_px: Option<f64>,
}

impl ConfigOverrides {
    pub fn from_json(raw: &str) -> Result<Self, ConfigError> {
        serde_json::from_str(raw).map_err(|e| ConfigError::Malformed(e.to_string()))
    }

    /// Apply on top of `base`. The merged config is validated as a whole.
    pub fn apply(self, base: &CarouselConfig) -> Result<CarouselConfig, ConfigError> {
        let merged = CarouselConfig {
            autoplay_delay_ms: self.autoplay_delay_ms.unwrap_or(base.autoplay_delay_ms),
            transition_ms: self.transition_ms.unwrap_or(base.transition_ms),
            gap_px: self.gap_px.unwrap_or(base.gap_px),
            cap: self.cap.unwrap_or(base.cap),
            breakpoints: self.breakpoints.unwrap_or(base.breakpoints),
            swipe_threshold_px: self.swipe_threshold_px.unwrap_or(base.swipe_threshold_px),
        };
        merged.validate()?;
        Ok(merged)
    }
}

/// `raw` overrides (if any) on top of `preset`. Blank or missing overrides
/// yield the preset itself.
pub fn apply_overrides(
    preset: &CarouselConfig,
    raw: Option<&str>,
) -> Result<CarouselConfig, ConfigError> {
    match raw.map(str::trim).filter(|r| !r.is_empty()) {
        Some(raw) => ConfigOverrides::from_json(raw)?.apply(preset),
        None => Ok(preset.clone()),
    }
}

/// Resolve the effective config for a carousel. Anything unusable falls back
/// to the preset.
pub fn resolve(preset: CarouselConfig, raw: Option<&str>) -> CarouselConfig {
    apply_overrides(&preset, raw).unwrap_or_else(|err| {
        tracing::warn!("ignoring carousel overrides: {}", err);
        preset
    })
}
