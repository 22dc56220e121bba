//! Global page state.
//!
//! The mounted `Storefront` lives in `thread_local!` storage (WASM is
//! single-threaded) so it outlives `start()` and can be reached from the
//! exported JS entry points.

use crate::page::Storefront;
use std::cell::RefCell;

thread_local! {
    static PAGE: RefCell<Option<Storefront>> = const { RefCell::new(None) };
}

/// Install the mounted page, dropping (and tearing down) any previous one.
pub fn install(page: Storefront) {
    let previous = PAGE.with(|p| p.borrow_mut().replace(page));
    drop(previous);
}

/// Tear down the current page: stops autoplay and detaches every listener.
pub fn uninstall() {
    let previous = PAGE.with(|p| p.borrow_mut().take());
    drop(previous);
}

/// Run a closure with shared access to the page, if mounted.
pub fn with<F, R>(f: F) -> Option<R>
where
    F: FnOnce(&Storefront) -> R,
{
    PAGE.with(|p| p.borrow().as_ref().map(f))
}
