//! Product-detail modal.
//!
//! Any `.ver-detalles-btn` link opens its `href` inside `#productoModal`
//! instead of navigating. Closed by `Escape`, a backdrop click, or a
//! `.cerrar` button inside the fetched fragment.

use crate::api;
use crate::dom::{self, ModalElements, escape_html};
use crate::events::{self, Listener};
use std::cell::Cell;
use std::rc::Rc;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::KeyboardEvent;

const LOADING_HTML: &str =
    r#"<div class="modal-cargando"><i class="fas fa-spinner fa-spin"></i><p>Cargando...</p></div>"#;

/// The fragment URL for a product page: the same URL with `modal=true`.
pub fn fragment_url(url: &str) -> String {
    let sep = if url.contains('?') { '&' } else { '?' };
    format!("{}{}modal=true", url, sep)
}

pub fn error_html(message: &str) -> String {
    format!(
        r#"<button type="button" class="cerrar">&times;</button><div class="modal-error"><i class="fas fa-exclamation-triangle"></i><p>Error al cargar</p><p class="modal-error-detalle">{}</p></div>"#,
        escape_html(message)
    )
}

/// Counts modal loads so a response that arrives after a newer `open` or a
/// `close` is discarded.
#[derive(Clone, Default)]
pub struct Loads(Rc<Cell<u64>>);

impl Loads {
    /// Start a new load, invalidating every earlier one.
    pub fn begin(&self) -> u64 {
        let next = self.0.get().wrapping_add(1);
        self.0.set(next);
        next
    }

    pub fn is_current(&self, load: u64) -> bool {
        self.0.get() == load
    }
}

pub async fn open(els: &ModalElements, loads: &Loads, url: &str) {
    let load = loads.begin();
    els.show();
    dom::set_inner_html(&els.content, LOADING_HTML);

    let result = api::get_html(&fragment_url(url)).await;
    if !loads.is_current(load) {
        return;
    }
    match result {
        Ok(html) => dom::set_inner_html(&els.content, &html),
        Err(e) => {
            gloo_console::error!(format!("product modal: {}", e));
            dom::set_inner_html(&els.content, &error_html(&e.to_string()));
        }
    }
}

pub fn close(els: &ModalElements, loads: &Loads) {
    loads.begin();
    els.hide();
    dom::set_inner_html(&els.content, "");
}

pub struct ProductModal {
    els: ModalElements,
    loads: Loads,
    _listeners: Vec<Listener>,
}

impl ProductModal {
    /// Mount on `#productoModal` / `#productoContenido`. `None` when the page
    /// has no product modal.
    pub fn mount() -> Result<Option<Self>, JsValue> {
        let Some(els) = ModalElements::bind("productoModal", "productoContenido") else {
            return Ok(None);
        };
        let Some(body) = dom::document().and_then(|d| d.body()) else {
            return Ok(None);
        };
        let Some(window) = dom::window() else {
            return Ok(None);
        };

        let loads = Loads::default();
        let mut listeners = Vec::new();

        // Delegated "Ver detalles" links
        {
            let els2 = els.clone();
            let loads2 = loads.clone();
            listeners.push(Listener::new(&body, "click", move |e| {
                let Some(link) = events::closest(&e, ".ver-detalles-btn") else {
                    return;
                };
                e.prevent_default();
                e.stop_propagation();
                let Some(href) = link.get_attribute("href").filter(|h| !h.is_empty()) else {
                    return;
                };
                let els3 = els2.clone();
                let loads3 = loads2.clone();
                wasm_bindgen_futures::spawn_local(async move { open(&els3, &loads3, &href).await });
            })?);
        }

        // Escape
        {
            let els2 = els.clone();
            let loads2 = loads.clone();
            listeners.push(Listener::new(&window, "keydown", move |e| {
                let is_escape = e
                    .dyn_ref::<KeyboardEvent>()
                    .is_some_and(|k| k.key() == "Escape");
                if is_escape && els2.is_open() {
                    close(&els2, &loads2);
                }
            })?);
        }

        // Backdrop and close buttons
        {
            let els2 = els.clone();
            let loads2 = loads.clone();
            let backdrop = els.modal.clone();
            listeners.push(Listener::new(&els.modal, "click", move |e| {
                if events::is_direct_target(&e, &backdrop) || events::closest(&e, ".cerrar").is_some() {
                    close(&els2, &loads2);
                }
            })?);
        }

        Ok(Some(Self {
            els,
            loads,
            _listeners: listeners,
        }))
    }

    pub fn open(&self, url: &str) {
        let els = self.els.clone();
        let loads = self.loads.clone();
        let url = url.to_string();
        wasm_bindgen_futures::spawn_local(async move { open(&els, &loads, &url).await });
    }

    pub fn close(&self) {
        close(&self.els, &self.loads);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fragment_url_appends_flag() {
        assert_eq!(fragment_url("/producto/4/"), "/producto/4/?modal=true");
        assert_eq!(
            fragment_url("/producto/4/?color=negro"),
            "/producto/4/?color=negro&modal=true"
        );
    }

    #[test]
    fn newer_load_or_close_makes_earlier_load_stale() {
        let loads = Loads::default();
        let first = loads.begin();
        assert!(loads.is_current(first));

        let second = loads.begin();
        assert!(!loads.is_current(first));
        assert!(loads.is_current(second));

        // closing bumps the counter too
        loads.begin();
        assert!(!loads.is_current(second));
    }

    #[test]
    fn error_panel_escapes_message() {
        let html = error_html("HTTP 500 <Internal>");
        assert!(html.contains("HTTP 500 &lt;Internal&gt;"));
        assert!(html.contains(r#"class="cerrar""#));
    }
}
