//! Browser binding for `sf_carousel::Carousel`.
//!
//! The controller lives in an `Rc<RefCell<_>>` owned by the widget. Timers and
//! DOM listeners only hold a `Weak` to it, so a dropped widget is never called
//! back; its listeners are detached on drop.

use crate::dom::{self, CarouselElements};
use crate::events::Listener;
use gloo_timers::callback::{Interval, Timeout};
use sf_carousel::{Carousel, CarouselConfig, Scheduler, Stage};
use std::cell::RefCell;
use std::rc::{Rc, Weak};
use std::time::Duration;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{Element, HtmlElement, TouchEvent};

type DomCarousel = Carousel<DomStage, DomScheduler>;

// ── Stage ──

pub struct DomStage {
    track: HtmlElement,
    first_slide: HtmlElement,
    indicators: Vec<Element>,
}

impl Stage for DomStage {
    fn viewport_width(&self) -> u32 {
        dom::viewport_width()
    }

    fn slide_width(&self) -> f64 {
        f64::from(self.first_slide.offset_width())
    }

    fn translate_track(&mut self, offset_px: f64) {
        dom::set_style(&self.track, "transform", &format!("translateX({}px)", offset_px));
    }

    fn highlight_indicator(&mut self, active: usize) {
        for (i, indicator) in self.indicators.iter().enumerate() {
            dom::toggle_class(indicator, "active", i == active);
        }
    }
}

// ── Scheduler ──

pub struct DomScheduler {
    target: Weak<RefCell<DomCarousel>>,
    release: Option<Timeout>,
}

fn millis(d: Duration) -> u32 {
    u32::try_from(d.as_millis()).unwrap_or(u32::MAX)
}

fn with_carousel(target: &Weak<RefCell<DomCarousel>>, f: impl FnOnce(&mut DomCarousel)) {
    if let Some(rc) = target.upgrade() {
        if let Ok(mut carousel) = rc.try_borrow_mut() {
            f(&mut carousel);
        }
    }
}

impl Scheduler for DomScheduler {
    type Autoplay = Interval;

    fn start_autoplay(&mut self, period: Duration) -> Interval {
        let target = self.target.clone();
        Interval::new(millis(period), move || with_carousel(&target, |c| c.tick()))
    }

    fn stop_autoplay(&mut self, handle: Interval) {
        // Dropping an `Interval` clears it.
        drop(handle);
    }

    fn release_after(&mut self, delay: Duration) {
        let target = self.target.clone();
        // Replacing a pending release cancels it; the new one still fires.
        self.release = Some(Timeout::new(millis(delay), move || {
            with_carousel(&target, |c| c.release())
        }));
    }
}

// ── Widget ──

/// A mounted carousel. Dropping it stops autoplay and detaches its listeners.
pub struct CarouselWidget {
    inner: Rc<RefCell<DomCarousel>>,
    _listeners: Vec<Listener>,
}

/// Cheap handle the page uses to reset a carousel after a resize.
#[derive(Clone)]
pub struct ResetHandle(Weak<RefCell<DomCarousel>>);

impl ResetHandle {
    pub fn reset(&self) {
        with_carousel(&self.0, |c| c.reset());
    }
}

impl CarouselWidget {
    /// Mount on `els` using `preset`, layered with any `data-carousel-config`
    /// overrides. Returns `None` when there are no slides to show.
    pub fn mount(
        name: &'static str,
        els: CarouselElements,
        preset: CarouselConfig,
    ) -> Result<Option<Self>, JsValue> {
        let Some(first_slide) = els.slides.first().cloned() else {
            gloo_console::log!(format!("carousel {}: no slides, skipping", name));
            return Ok(None);
        };

        let config = effective_config(name, preset, els.config_source().as_deref());
        let slide_count = els.slides.len();
        let stage = DomStage {
            track: els.track.clone(),
            first_slide,
            indicators: els.indicators.clone(),
        };

        let inner = Rc::new_cyclic(|weak| {
            RefCell::new(Carousel::new(
                config,
                slide_count,
                stage,
                DomScheduler {
                    target: weak.clone(),
                    release: None,
                },
            ))
        });

        let listeners = bind(&els, &inner)?;
        inner.borrow_mut().activate();
        gloo_console::log!(format!("carousel {}: {} slides", name, slide_count));

        Ok(Some(Self {
            inner,
            _listeners: listeners,
        }))
    }

    pub fn current(&self) -> usize {
        self.inner.borrow().current()
    }

    pub fn reset_handle(&self) -> ResetHandle {
        ResetHandle(Rc::downgrade(&self.inner))
    }

    pub fn go_to(&self, index: usize) {
        self.inner.borrow_mut().go_to(index);
    }
}

/// Layer page overrides onto `preset`, reporting rejected ones in the browser
/// console.
pub fn effective_config(name: &str, preset: CarouselConfig, raw: Option<&str>) -> CarouselConfig {
    match sf_carousel::config::apply_overrides(&preset, raw) {
        Ok(config) => config,
        Err(err) => {
            gloo_console::warn!(format!("carousel {}: ignoring overrides: {}", name, err));
            preset
        }
    }
}

impl Drop for CarouselWidget {
    fn drop(&mut self) {
        if let Ok(mut carousel) = self.inner.try_borrow_mut() {
            carousel.shutdown();
        }
    }
}

/// Run `f` against the carousel from a DOM handler.
fn handler<F>(target: Weak<RefCell<DomCarousel>>, f: F) -> impl FnMut(web_sys::Event) + 'static
where
    F: Fn(&mut DomCarousel, &web_sys::Event) + 'static,
{
    move |e| with_carousel(&target, |c| f(c, &e))
}

fn touch_x(e: &web_sys::Event) -> Option<f64> {
    let touch = e.dyn_ref::<TouchEvent>()?.changed_touches().get(0)?;
    Some(f64::from(touch.screen_x()))
}

fn bind(els: &CarouselElements, inner: &Rc<RefCell<DomCarousel>>) -> Result<Vec<Listener>, JsValue> {
    let weak = Rc::downgrade(inner);
    let mut listeners = Vec::new();

    if let Some(prev) = &els.prev_btn {
        listeners.push(Listener::new(prev, "click", handler(weak.clone(), |c, _| {
            c.prev();
        }))?);
    }
    if let Some(next) = &els.next_btn {
        listeners.push(Listener::new(next, "click", handler(weak.clone(), |c, _| {
            c.next();
        }))?);
    }

    for (index, indicator) in els.indicators.iter().enumerate() {
        listeners.push(Listener::new(indicator, "click", handler(weak.clone(), move |c, _| {
            c.go_to(index);
        }))?);
    }

    if let Some(container) = &els.container {
        listeners.push(Listener::new(
            container,
            "mouseenter",
            handler(weak.clone(), |c, _| c.pointer_entered()),
        )?);
        listeners.push(Listener::new(
            container,
            "mouseleave",
            handler(weak.clone(), |c, _| c.pointer_left()),
        )?);
    }

    listeners.push(Listener::passive(
        &els.track,
        "touchstart",
        handler(weak.clone(), |c, e| {
            if let Some(x) = touch_x(e) {
                c.touch_started(x);
            }
        }),
    )?);
    listeners.push(Listener::passive(
        &els.track,
        "touchend",
        handler(weak.clone(), |c, e| match touch_x(e) {
            Some(x) => c.touch_ended(x),
            None => c.start_autoplay(),
        }),
    )?);

    Ok(listeners)
}
