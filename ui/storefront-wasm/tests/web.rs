//! Browser tests: `wasm-pack test --headless --firefox ui/storefront-wasm`.

#![cfg(target_arch = "wasm32")]

use gloo_timers::future::TimeoutFuture;
use sf_carousel::CarouselConfig;
use std::cell::RefCell;
use std::rc::Rc;
use storefront_wasm::carousel::CarouselWidget;
use storefront_wasm::cart::QUANTITY_DEBOUNCE_MS;
use storefront_wasm::debounce::Debouncer;
use storefront_wasm::dom::{self, CarouselElements};
use storefront_wasm::page::{self, BEST_SELLERS_SCOPE, RESIZE_DEBOUNCE_MS};
use wasm_bindgen::JsCast;
use wasm_bindgen_test::*;
use web_sys::{Event, HtmlElement};

wasm_bindgen_test_configure!(run_in_browser);

fn fixture(id: &str, slides: usize) -> HtmlElement {
    let doc = dom::document().unwrap();
    let root: HtmlElement = doc.create_element("div").unwrap().dyn_into().unwrap();
    let mut html = format!(
        r#"<div id="{id}-carousel"><div id="{id}-track" style="display:flex">"#
    );
    for _ in 0..slides {
        html.push_str(r#"<div class="carousel-slide" style="flex:0 0 200px;width:200px"></div>"#);
    }
    html.push_str(&format!(r#"</div></div><div id="{id}-indicators">"#));
    for _ in 0..slides {
        html.push_str(r#"<button class="indicator"></button>"#);
    }
    html.push_str("</div>");
    root.set_inner_html(&html);
    doc.body().unwrap().append_child(&root).unwrap();
    root
}

fn bind(id: &str) -> CarouselElements {
    CarouselElements::bind_ids(
        &format!("{id}-carousel"),
        &format!("{id}-track"),
        &format!("{id}-indicators"),
    )
    .unwrap()
}

#[wasm_bindgen_test]
fn mount_highlights_first_indicator() {
    let root = fixture("first", 6);
    let widget = CarouselWidget::mount("test", bind("first"), CarouselConfig::best_sellers())
        .unwrap()
        .unwrap();
    let indicators = dom::query_all("#first-indicators .indicator");
    assert!(dom::has_class(&indicators[0], "active"));
    assert!(!dom::has_class(&indicators[1], "active"));
    assert_eq!(widget.current(), 0);
    drop(widget);
    root.remove();
}

#[wasm_bindgen_test]
fn go_to_translates_track() {
    let root = fixture("goto", 6);
    let widget = CarouselWidget::mount("test", bind("goto"), CarouselConfig::best_sellers())
        .unwrap()
        .unwrap();
    widget.go_to(1);
    assert_eq!(widget.current(), 1);
    let track: HtmlElement = dom::by_id_typed("goto-track").unwrap();
    assert_eq!(dom::style_value(&track, "transform"), "translateX(-220px)");
    drop(widget);
    root.remove();
}

#[wasm_bindgen_test]
fn track_without_slides_is_not_mounted() {
    let root = fixture("empty", 0);
    let widget =
        CarouselWidget::mount("test", bind("empty"), CarouselConfig::offers()).unwrap();
    assert!(widget.is_none());
    root.remove();
}

fn offers_fixture(slides: usize) -> HtmlElement {
    let doc = dom::document().unwrap();
    let root: HtmlElement = doc.create_element("section").unwrap().dyn_into().unwrap();
    let mut html = String::from(
        r#"<div class="carousel-container"><button class="carousel-nav prev"></button><div class="carousel-track" style="display:flex">"#,
    );
    for _ in 0..slides {
        html.push_str(r#"<div class="carousel-slide" style="flex:0 0 200px;width:200px"></div>"#);
    }
    html.push_str(r#"</div><button class="carousel-nav next"></button></div><div class="carousel-indicators">"#);
    for _ in 0..slides {
        html.push_str(r#"<button class="indicator"></button>"#);
    }
    html.push_str("</div>");
    root.set_inner_html(&html);
    doc.body().unwrap().append_child(&root).unwrap();
    root
}

#[wasm_bindgen_test]
fn offers_binding_ignores_best_sellers_elements() {
    // best sellers first, so document order alone would pick its elements
    let best = fixture("mas-vendido", 6);
    let offers = offers_fixture(4);

    let best_indicators = dom::query_all("#mas-vendido-indicators .indicator");
    dom::toggle_class(&best_indicators[2], "active", true);

    let els = CarouselElements::bind_offers(BEST_SELLERS_SCOPE).unwrap();
    assert_eq!(els.slides.len(), 4);
    assert_eq!(els.indicators.len(), 4);
    assert_ne!(els.track.id(), "mas-vendido-track");
    assert!(els.prev_btn.is_some());

    let widget = CarouselWidget::mount("offers", els, CarouselConfig::offers())
        .unwrap()
        .unwrap();
    let offers_indicators = dom::query_all(".carousel-indicators .indicator");
    assert!(dom::has_class(&offers_indicators[0], "active"));
    assert!(dom::has_class(&best_indicators[2], "active"));
    assert!(!dom::has_class(&best_indicators[0], "active"));

    drop(widget);
    offers.remove();
    best.remove();
}

#[wasm_bindgen_test]
async fn debouncer_runs_only_the_last_call() {
    let runs = Rc::new(RefCell::new(Vec::new()));
    let mut debounce = Debouncer::new(50);
    for n in 1..=3 {
        let runs = runs.clone();
        debounce.call(move || runs.borrow_mut().push(n));
    }
    assert!(runs.borrow().is_empty());

    TimeoutFuture::new(120).await;
    assert_eq!(*runs.borrow(), vec![3]);

    TimeoutFuture::new(120).await;
    assert_eq!(*runs.borrow(), vec![3]);
}

#[wasm_bindgen_test]
async fn cancelled_debounce_never_runs() {
    let runs = Rc::new(RefCell::new(0));
    let mut debounce = Debouncer::new(50);
    let counter = runs.clone();
    debounce.call(move || *counter.borrow_mut() += 1);
    debounce.cancel();

    TimeoutFuture::new(120).await;
    assert_eq!(*runs.borrow(), 0);
}

#[wasm_bindgen_test]
async fn quantity_clicks_wait_for_a_quiet_window() {
    let runs = Rc::new(RefCell::new(Vec::new()));
    let mut debounce = Debouncer::new(QUANTITY_DEBOUNCE_MS);
    let half = QUANTITY_DEBOUNCE_MS * 3 / 5;

    let first = runs.clone();
    debounce.call(move || first.borrow_mut().push("mas"));
    TimeoutFuture::new(half).await;
    let second = runs.clone();
    debounce.call(move || second.borrow_mut().push("menos"));

    // past the first call's window, still inside the second's
    TimeoutFuture::new(half).await;
    assert!(runs.borrow().is_empty());

    TimeoutFuture::new(QUANTITY_DEBOUNCE_MS).await;
    assert_eq!(*runs.borrow(), vec!["menos"]);
}

#[wasm_bindgen_test]
async fn resize_resets_carousel_after_debounce() {
    let root = fixture("resize", 6);
    let widget = CarouselWidget::mount("test", bind("resize"), CarouselConfig::best_sellers())
        .unwrap()
        .unwrap();
    let _resize = page::bind_resize(vec![widget.reset_handle()]).unwrap().unwrap();

    widget.go_to(2);
    assert_eq!(widget.current(), 2);

    let window = dom::window().unwrap();
    window.dispatch_event(&Event::new("resize").unwrap()).unwrap();
    window.dispatch_event(&Event::new("resize").unwrap()).unwrap();
    assert_eq!(widget.current(), 2);

    TimeoutFuture::new(RESIZE_DEBOUNCE_MS + 100).await;
    assert_eq!(widget.current(), 0);

    drop(widget);
    root.remove();
}

#[wasm_bindgen_test]
fn template_globals_tolerate_missing_modals() {
    storefront_wasm::mostrar_carrito();
    storefront_wasm::cerrar_modal();
    storefront_wasm::abrir_producto_modal("/producto/1/");
    storefront_wasm::cerrar_producto_modal();
}
