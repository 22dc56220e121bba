//! Platform-independent carousel controller.
//!
//! The carousel is a two-phase state machine (`Idle` / `Transitioning`) over a
//! fixed slide set. Drawing and timers are reached through the [`Stage`] and
//! [`Scheduler`] traits so the same controller runs in the browser shell and in
//! host-side tests.

mod carousel;
pub mod config;
pub mod layout;
pub mod swipe;

pub use carousel::{Carousel, Phase, Scheduler, Stage};
pub use config::{Breakpoints, CarouselConfig, ConfigError, ConfigOverrides, VisibleCap};
pub use swipe::Swipe;
