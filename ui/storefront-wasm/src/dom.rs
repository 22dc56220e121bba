//! DOM element bindings.
//!
//! Each component resolves its elements once at mount time. A component whose
//! required elements are missing is simply not mounted.

use wasm_bindgen::JsCast;
use web_sys::{Document, Element, HtmlDocument, HtmlElement, NodeList, Window};

// ── Helpers ──

pub fn window() -> Option<Window> {
    web_sys::window()
}

pub fn document() -> Option<Document> {
    window()?.document()
}

pub fn by_id(id: &str) -> Option<Element> {
    document()?.get_element_by_id(id)
}

pub fn by_id_typed<T: JsCast>(id: &str) -> Option<T> {
    by_id(id).and_then(|e| e.dyn_into::<T>().ok())
}

pub fn query_all(selector: &str) -> Vec<Element> {
    document()
        .and_then(|d| d.query_selector_all(selector).ok())
        .map(collect)
        .unwrap_or_default()
}

/// Query all matching elements within a parent element.
pub fn query_all_within(parent: &Element, selector: &str) -> Vec<Element> {
    parent
        .query_selector_all(selector)
        .map(collect)
        .unwrap_or_default()
}

fn collect(nl: NodeList) -> Vec<Element> {
    (0..nl.length())
        .filter_map(|i| nl.item(i))
        .filter_map(|n| n.dyn_into::<Element>().ok())
        .collect()
}

pub fn toggle_class(el: &Element, cls: &str, force: bool) {
    let _ = el.class_list().toggle_with_force(cls, force);
}

pub fn has_class(el: &Element, cls: &str) -> bool {
    el.class_list().contains(cls)
}

pub fn set_style(el: &HtmlElement, property: &str, value: &str) {
    let _ = el.style().set_property(property, value);
}

pub fn style_value(el: &HtmlElement, property: &str) -> String {
    el.style().get_property_value(property).unwrap_or_default()
}

pub fn set_inner_html(el: &Element, html: &str) {
    el.set_inner_html(html);
}

/// `window.innerWidth`, or 0 outside a browser window.
pub fn viewport_width() -> u32 {
    window()
        .and_then(|w| w.inner_width().ok())
        .and_then(|v| v.as_f64())
        .map(|w| w.max(0.0) as u32)
        .unwrap_or(0)
}

/// Read a cookie by name, URI-decoded.
pub fn cookie(name: &str) -> Option<String> {
    let raw = document()?.dyn_into::<HtmlDocument>().ok()?.cookie().ok()?;
    let value = find_cookie(&raw, name)?;
    js_sys::decode_uri_component(value).ok().map(String::from)
}

/// Locate `name` in a `document.cookie` string and return its raw value.
pub fn find_cookie<'a>(raw: &'a str, name: &str) -> Option<&'a str> {
    raw.split(';')
        .map(str::trim)
        .find_map(|pair| pair.strip_prefix(name)?.strip_prefix('='))
}

/// Escape text for interpolation into HTML markup.
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            c => out.push(c),
        }
    }
    out
}

// ── Element sets ──

/// References for one carousel. Clone-friendly (all inner types are
/// reference-counted via JS GC).
#[derive(Clone)]
pub struct CarouselElements {
    pub container: Option<Element>,
    pub track: HtmlElement,
    pub slides: Vec<HtmlElement>,
    pub indicators: Vec<Element>,
    pub prev_btn: Option<Element>,
    pub next_btn: Option<Element>,
}

impl CarouselElements {
    /// The offers strip, addressed by class. Elements inside `exclude` (the
    /// other carousels on the page) are never picked up, and slides are only
    /// taken from inside the track.
    pub fn bind_offers(exclude: &str) -> Option<Self> {
        let first = |selector: &str| outside(query_all(selector), exclude).into_iter().next();
        let container = first(".carousel-container");
        let track: HtmlElement = container
            .as_ref()
            .and_then(|c| c.query_selector(".carousel-track").ok().flatten())
            .or_else(|| first(".carousel-track"))?
            .dyn_into()
            .ok()?;
        Some(Self {
            slides: typed(query_all_within(&track, ".carousel-slide")),
            indicators: outside(query_all(".indicator"), exclude),
            prev_btn: first(".carousel-nav.prev"),
            next_btn: first(".carousel-nav.next"),
            container,
            track,
        })
    }

    /// A carousel addressed by element ids; slides are looked up inside the
    /// track and indicators inside `indicators_id`.
    pub fn bind_ids(container_id: &str, track_id: &str, indicators_id: &str) -> Option<Self> {
        let track: HtmlElement = by_id_typed(track_id)?;
        let indicators = by_id(indicators_id)
            .map(|group| query_all_within(&group, ".indicator"))
            .unwrap_or_default();
        Some(Self {
            container: by_id(container_id),
            slides: typed(query_all_within(&track, ".carousel-slide")),
            indicators,
            prev_btn: None,
            next_btn: None,
            track,
        })
    }

    /// Where per-page config overrides are read from.
    pub fn config_source(&self) -> Option<String> {
        self.container
            .as_ref()
            .and_then(|c| c.get_attribute("data-carousel-config"))
            .or_else(|| self.track.get_attribute("data-carousel-config"))
    }
}

/// Drop every element that sits inside (or is) a match of `exclude`.
pub fn outside(elements: Vec<Element>, exclude: &str) -> Vec<Element> {
    if exclude.is_empty() {
        return elements;
    }
    elements
        .into_iter()
        .filter(|e| matches!(e.closest(exclude), Ok(None)))
        .collect()
}

fn typed<T: JsCast>(elements: Vec<Element>) -> Vec<T> {
    elements
        .into_iter()
        .filter_map(|e| e.dyn_into::<T>().ok())
        .collect()
}

/// A modal overlay and the element its content is written into.
#[derive(Clone)]
pub struct ModalElements {
    pub modal: HtmlElement,
    pub content: Element,
}

impl ModalElements {
    pub fn bind(modal_id: &str, content_id: &str) -> Option<Self> {
        Some(Self {
            modal: by_id_typed(modal_id)?,
            content: by_id(content_id)?,
        })
    }

    pub fn show(&self) {
        set_style(&self.modal, "display", "flex");
    }

    pub fn hide(&self) {
        set_style(&self.modal, "display", "none");
    }

    pub fn is_open(&self) -> bool {
        style_value(&self.modal, "display") == "flex"
    }
}
