//! Trailing-edge debounce over `setTimeout`.

use gloo_timers::callback::Timeout;

pub struct Debouncer {
    wait_ms: u32,
    pending: Option<Timeout>,
}

impl Debouncer {
    pub fn new(wait_ms: u32) -> Self {
        Self {
            wait_ms,
            pending: None,
        }
    }

    /// Run `f` once `wait_ms` have passed without another call. A call that
    /// arrives first replaces it.
    pub fn call<F>(&mut self, f: F)
    where
        F: FnOnce() + 'static,
    {
        self.cancel();
        self.pending = Some(Timeout::new(self.wait_ms, f));
    }

    pub fn cancel(&mut self) {
        // Dropping a `Timeout` clears it.
        drop(self.pending.take());
    }
}
