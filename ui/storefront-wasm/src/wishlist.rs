//! Wishlist ("favoritos") toggle buttons.

use crate::api::{self, AJAX_HEADER};
use crate::dom;
use crate::events::{self, Listener};
use sf_api_types::{ProductId, WishlistToggleResponse};
use wasm_bindgen::prelude::*;
use web_sys::Element;

const CSRF_COOKIE: &str = "csrftoken";

pub fn toggle_url(id: ProductId) -> String {
    format!("/favorito/toggle/{}/", id)
}

pub fn product_id(button: &Element) -> Option<ProductId> {
    parse_product_id(&button.get_attribute("data-product-id")?)
}

pub fn parse_product_id(raw: &str) -> Option<ProductId> {
    raw.trim().parse().ok().map(ProductId)
}

/// Reflect the server's answer on the button.
pub fn mark(button: &Element, added: bool) {
    dom::toggle_class(button, "active", added);
    let _ = button.set_attribute("aria-pressed", if added { "true" } else { "false" });
}

pub async fn toggle(button: Element, id: ProductId) {
    let token = dom::cookie(CSRF_COOKIE).unwrap_or_default();
    let headers = [AJAX_HEADER, ("X-CSRFToken", token.as_str())];
    match api::post_json::<WishlistToggleResponse>(&toggle_url(id), &headers).await {
        Ok(resp) if resp.ok => mark(&button, resp.added),
        Ok(_) => gloo_console::warn!(format!("wishlist: product {} not toggled", id)),
        Err(e) => gloo_console::error!(format!("wishlist: {}", e)),
    }
}

/// Delegated click listener for every `.wishlist-toggle[data-product-id]`.
pub fn bind() -> Result<Option<Listener>, JsValue> {
    let Some(body) = dom::document().and_then(|d| d.body()) else {
        return Ok(None);
    };
    let listener = Listener::new(&body, "click", |e| {
        let Some(button) = events::closest(&e, ".wishlist-toggle") else {
            return;
        };
        let Some(id) = product_id(&button) else {
            return;
        };
        e.prevent_default();
        wasm_bindgen_futures::spawn_local(toggle(button, id));
    })?;
    Ok(Some(listener))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builds_toggle_route() {
        assert_eq!(toggle_url(ProductId(42)), "/favorito/toggle/42/");
    }

    #[test]
    fn product_ids_must_be_numeric() {
        assert_eq!(parse_product_id(" 17 "), Some(ProductId(17)));
        assert_eq!(parse_product_id(""), None);
        assert_eq!(parse_product_id("vestido"), None);
    }
}
