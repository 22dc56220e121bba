//! Glamoure storefront WASM frontend
//!
//! Carousels, cart and product modals, and wishlist toggles for the
//! storefront pages. Each concern lives in its own module; `page` wires them
//! together.

pub mod api;
pub mod carousel;
pub mod cart;
pub mod debounce;
pub mod dom;
pub mod events;
pub mod page;
pub mod product_modal;
pub mod state;
pub mod wishlist;

use wasm_bindgen::prelude::*;

/// WASM entry point – called automatically when the module is instantiated.
#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    // Improve panic messages in the browser console
    console_error_panic_hook::set_once();

    let page = page::Storefront::mount()?;
    state::install(page);
    Ok(())
}

/// Open the cart modal (for template buttons that call it directly).
#[wasm_bindgen(js_name = showCart)]
pub fn show_cart() {
    state::with(|p| {
        if let Some(cart) = &p.cart {
            cart.show();
        }
    });
}

#[wasm_bindgen(js_name = closeCart)]
pub fn close_cart() {
    state::with(|p| {
        if let Some(cart) = &p.cart {
            cart.close();
        }
    });
}

#[wasm_bindgen(js_name = openProductModal)]
pub fn open_product_modal(url: &str) {
    state::with(|p| {
        if let Some(modal) = &p.product_modal {
            modal.open(url);
        }
    });
}

#[wasm_bindgen(js_name = closeProductModal)]
pub fn close_product_modal() {
    state::with(|p| {
        if let Some(modal) = &p.product_modal {
            modal.close();
        }
    });
}

// Global names the storefront templates call from inline handlers.

#[wasm_bindgen(js_name = mostrarCarrito)]
pub fn mostrar_carrito() {
    show_cart();
}

#[wasm_bindgen(js_name = cerrarModal)]
pub fn cerrar_modal() {
    close_cart();
}

#[wasm_bindgen(js_name = abrirProductoModal)]
pub fn abrir_producto_modal(url: &str) {
    open_product_modal(url);
}

#[wasm_bindgen(js_name = cerrarProductoModal)]
pub fn cerrar_producto_modal() {
    close_product_modal();
}

/// Stop every timer and detach every listener installed by `start()`.
#[wasm_bindgen]
pub fn teardown() {
    state::uninstall();
}
