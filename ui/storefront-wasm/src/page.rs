//! Page composition root.
//!
//! Owns every mounted component. Optional components whose elements are not
//! on the page are skipped.

use crate::carousel::{CarouselWidget, ResetHandle};
use crate::cart::CartModal;
use crate::debounce::Debouncer;
use crate::dom::{self, CarouselElements};
use crate::events::Listener;
use crate::product_modal::ProductModal;
use crate::wishlist;
use sf_carousel::CarouselConfig;
use wasm_bindgen::prelude::*;

pub const RESIZE_DEBOUNCE_MS: u32 = 250;

const BEST_SELLERS_CAROUSEL: &str = "mas-vendido-carousel";
const BEST_SELLERS_TRACK: &str = "mas-vendido-track";
const BEST_SELLERS_INDICATORS: &str = "mas-vendido-indicators";
/// Everything belonging to the best-sellers carousel, kept out of the offers
/// binding.
pub const BEST_SELLERS_SCOPE: &str = "#mas-vendido-carousel, #mas-vendido-track, #mas-vendido-indicators";

pub struct Storefront {
    pub offers: Option<CarouselWidget>,
    pub best_sellers: Option<CarouselWidget>,
    pub product_modal: Option<ProductModal>,
    pub cart: Option<CartModal>,
    _wishlist: Option<Listener>,
    _resize: Option<Listener>,
}

impl Storefront {
    pub fn mount() -> Result<Self, JsValue> {
        let offers = match CarouselElements::bind_offers(BEST_SELLERS_SCOPE) {
            Some(els) => CarouselWidget::mount("offers", els, CarouselConfig::offers())?,
            None => None,
        };
        let best_sellers = match CarouselElements::bind_ids(
            BEST_SELLERS_CAROUSEL,
            BEST_SELLERS_TRACK,
            BEST_SELLERS_INDICATORS,
        ) {
            Some(els) => CarouselWidget::mount("best-sellers", els, CarouselConfig::best_sellers())?,
            None => None,
        };

        let handles: Vec<ResetHandle> = [&offers, &best_sellers]
            .into_iter()
            .flatten()
            .map(CarouselWidget::reset_handle)
            .collect();
        let resize = bind_resize(handles)?;

        Ok(Self {
            offers,
            best_sellers,
            product_modal: ProductModal::mount()?,
            cart: CartModal::mount()?,
            _wishlist: wishlist::bind()?,
            _resize: resize,
        })
    }
}

/// Debounced window resize: every carousel snaps back to its first position.
pub fn bind_resize(handles: Vec<ResetHandle>) -> Result<Option<Listener>, JsValue> {
    if handles.is_empty() {
        return Ok(None);
    }
    let Some(window) = dom::window() else {
        return Ok(None);
    };
    let mut debounce = Debouncer::new(RESIZE_DEBOUNCE_MS);
    let listener = Listener::new(&window, "resize", move |_| {
        let handles = handles.clone();
        debounce.call(move || {
            for handle in &handles {
                handle.reset();
            }
        });
    })?;
    Ok(Some(listener))
}
