//! Event binding.
//!
//! Every listener is held by the component that registered it and removed
//! from its target when dropped, so tearing a component down leaves nothing
//! attached to the page.

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{AddEventListenerOptions, Element, Event, EventTarget};

pub struct Listener {
    target: EventTarget,
    kind: &'static str,
    callback: Closure<dyn FnMut(Event)>,
}

impl Listener {
    pub fn new<F>(target: &EventTarget, kind: &'static str, handler: F) -> Result<Self, JsValue>
    where
        F: FnMut(Event) + 'static,
    {
        let callback = Closure::wrap(Box::new(handler) as Box<dyn FnMut(Event)>);
        target.add_event_listener_with_callback(kind, callback.as_ref().unchecked_ref())?;
        Ok(Self {
            target: target.clone(),
            kind,
            callback,
        })
    }

    /// Same as [`Listener::new`] but registered `{ passive: true }` (touch
    /// handlers that never call `preventDefault`).
    pub fn passive<F>(target: &EventTarget, kind: &'static str, handler: F) -> Result<Self, JsValue>
    where
        F: FnMut(Event) + 'static,
    {
        let callback = Closure::wrap(Box::new(handler) as Box<dyn FnMut(Event)>);
        let opts = AddEventListenerOptions::new();
        opts.set_passive(true);
        target.add_event_listener_with_callback_and_add_event_listener_options(
            kind,
            callback.as_ref().unchecked_ref(),
            &opts,
        )?;
        Ok(Self {
            target: target.clone(),
            kind,
            callback,
        })
    }
}

impl Drop for Listener {
    fn drop(&mut self) {
        let _ = self
            .target
            .remove_event_listener_with_callback(self.kind, self.callback.as_ref().unchecked_ref());
    }
}

/// Element the event was dispatched to.
pub fn target_element(e: &Event) -> Option<Element> {
    e.target()?.dyn_into::<Element>().ok()
}

/// Nearest ancestor of the event target (inclusive) matching `selector`.
pub fn closest(e: &Event, selector: &str) -> Option<Element> {
    target_element(e)?.closest(selector).ok()?
}

/// Whether the event was dispatched directly on `el` rather than a child.
pub fn is_direct_target(e: &Event, el: &EventTarget) -> bool {
    e.target().is_some_and(|t| {
        let t: &JsValue = t.as_ref();
        let el: &JsValue = el.as_ref();
        t == el
    })
}
