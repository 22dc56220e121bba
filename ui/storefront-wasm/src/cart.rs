//! Shopping-cart modal.
//!
//! Loads the cart summary, renders it into `#carritoContenido` and shows
//! `#carritoModal`. Row buttons are handled by one delegated listener on the
//! content element, so re-rendering never leaks listeners.

use crate::api::{self, ApiError};
use crate::debounce::Debouncer;
use crate::dom::{self, ModalElements, escape_html};
use crate::events::{self, Listener};
use sf_api_types::{CartItemId, CartSummary, OkResponse, QuantityAction};
use wasm_bindgen::prelude::*;

const SUMMARY_URL: &str = "/carrito/modal/";
const CHECKOUT_URL: &str = "/pagos/checkout-carrito/";
pub const QUANTITY_DEBOUNCE_MS: u32 = 500;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CartAction {
    Change(CartItemId, QuantityAction),
    Remove(CartItemId),
}

impl CartAction {
    /// Decode a row button's `data-cart-action` / `data-item-id` pair.
    pub fn parse(action: &str, item_id: &str) -> Option<Self> {
        let id = CartItemId(item_id.trim().parse().ok()?);
        match action {
            "mas" => Some(CartAction::Change(id, QuantityAction::Increase)),
            "menos" => Some(CartAction::Change(id, QuantityAction::Decrease)),
            "eliminar" => Some(CartAction::Remove(id)),
            _ => None,
        }
    }

    pub fn url(self) -> String {
        match self {
            CartAction::Change(id, action) => {
                format!("/carrito/cambiar/{}/{}/", id, action.as_path_segment())
            }
            CartAction::Remove(id) => format!("/carrito/eliminar/{}/", id),
        }
    }

    /// Whether the server applied the action, judged from its response body.
    /// Quantity changes answer `{"ok": ..}`; removal redirects to the cart
    /// page, so any successful body counts.
    pub fn outcome(self, body: &str) -> Result<bool, ApiError> {
        match self {
            CartAction::Change(..) => Ok(serde_json::from_str::<OkResponse>(body)?.ok),
            CartAction::Remove(_) => Ok(true),
        }
    }
}

/// Format an amount the way `Number.toLocaleString('es-CO')` does for prices:
/// `.` thousands separator, `,` decimals, at most three fraction digits with
/// trailing zeros dropped.
pub fn format_price(amount: f64) -> String {
    if !amount.is_finite() {
        return "0".to_string();
    }
    let thousandths = (amount.abs() * 1000.0).round() as u64;
    let whole = (thousandths / 1000).to_string();
    let frac = thousandths % 1000;

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, ch) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(ch);
    }

    let sign = if amount < 0.0 && thousandths > 0 { "-" } else { "" };
    if frac == 0 {
        return format!("{}{}", sign, grouped);
    }
    let digits = format!("{:03}", frac);
    format!("{}{},{}", sign, grouped, digits.trim_end_matches('0'))
}

/// Markup for the modal body.
pub fn render_summary(summary: &CartSummary) -> String {
    if summary.is_empty() {
        return r#"<div class="carrito-vacio"><p class="carrito-vacio-icono">🛒</p><p>Tu carrito está vacío</p></div>"#
            .to_string();
    }

    let mut html = String::new();
    for item in &summary.items {
        let name = escape_html(&item.producto);
        let image = item
            .imagen
            .as_deref()
            .filter(|src| !src.is_empty())
            .map(|src| {
                format!(
                    r#"<img src="{}" alt="{}" class="img-carrito">"#,
                    escape_html(src),
                    name
                )
            })
            .unwrap_or_default();
        html.push_str(&format!(
            r#"<div class="item-carrito">{image}<div class="info-carrito"><p><strong>{name}</strong></p><p>${price} x {qty} = <strong>${subtotal}</strong></p><div class="acciones"><button type="button" data-cart-action="menos" data-item-id="{id}">➖</button><button type="button" data-cart-action="mas" data-item-id="{id}">➕</button><button type="button" data-cart-action="eliminar" data-item-id="{id}">❌</button></div></div></div><hr>"#,
            image = image,
            name = name,
            price = format_price(item.precio),
            qty = item.cantidad,
            subtotal = format_price(item.subtotal),
            id = item.id,
        ));
    }
    html.push_str(&format!(
        r#"<div class="carrito-footer"><div class="carrito-total"><strong>Total:</strong> <span class="carrito-total-valor">${}</span></div><a href="{}" class="btn-proceder-pago">Proceder al Pago</a></div>"#,
        format_price(summary.total),
        CHECKOUT_URL
    ));
    html
}

/// Fetch the summary and show the modal. Failures are logged and leave the
/// modal as it was.
pub async fn show(els: &ModalElements) {
    match api::get_json::<CartSummary>(SUMMARY_URL).await {
        Ok(summary) => {
            dom::set_inner_html(&els.content, &render_summary(&summary));
            els.show();
        }
        Err(e) => gloo_console::error!(format!("cart: {}", e)),
    }
}

pub fn close(els: &ModalElements) {
    els.hide();
}

async fn apply(els: &ModalElements, action: CartAction) {
    let applied = api::send(&action.url(), "GET", &[])
        .await
        .and_then(|body| action.outcome(&body));
    match applied {
        Ok(false) => gloo_console::warn!(format!("cart: {:?} not applied", action)),
        Ok(_) => {}
        Err(e) => gloo_console::error!(format!("cart: {:?} failed: {}", action, e)),
    }
    show(els).await;
}

pub struct CartModal {
    els: ModalElements,
    _listeners: Vec<Listener>,
}

impl CartModal {
    /// Mount on `#carritoModal` / `#carritoContenido`. `None` when the page
    /// has no cart modal.
    pub fn mount() -> Result<Option<Self>, JsValue> {
        let Some(els) = ModalElements::bind("carritoModal", "carritoContenido") else {
            return Ok(None);
        };

        let mut listeners = Vec::new();

        // Row buttons
        {
            let els2 = els.clone();
            let mut debounce = Debouncer::new(QUANTITY_DEBOUNCE_MS);
            listeners.push(Listener::new(&els.content, "click", move |e| {
                let Some(btn) = events::closest(&e, "[data-cart-action]") else {
                    return;
                };
                let action = btn.get_attribute("data-cart-action").unwrap_or_default();
                let id = btn.get_attribute("data-item-id").unwrap_or_default();
                let Some(action) = CartAction::parse(&action, &id) else {
                    return;
                };
                let els3 = els2.clone();
                let run = move || wasm_bindgen_futures::spawn_local(async move { apply(&els3, action).await });
                match action {
                    CartAction::Change(..) => debounce.call(run),
                    CartAction::Remove(_) => run(),
                }
            })?);
        }

        // Close buttons and backdrop
        {
            let els2 = els.clone();
            let backdrop = els.modal.clone();
            listeners.push(Listener::new(&els.modal, "click", move |e| {
                if events::is_direct_target(&e, &backdrop)
                    || events::closest(&e, "[data-cart-close], .cerrar").is_some()
                {
                    close(&els2);
                }
            })?);
        }

        // Open triggers
        for trigger in dom::query_all("[data-cart-open]") {
            let els2 = els.clone();
            listeners.push(Listener::new(&trigger, "click", move |e| {
                e.prevent_default();
                let els3 = els2.clone();
                wasm_bindgen_futures::spawn_local(async move { show(&els3).await });
            })?);
        }

        Ok(Some(Self {
            els,
            _listeners: listeners,
        }))
    }

    pub fn show(&self) {
        let els = self.els.clone();
        wasm_bindgen_futures::spawn_local(async move { show(&els).await });
    }

    pub fn close(&self) {
        close(&self.els);
    }
}
