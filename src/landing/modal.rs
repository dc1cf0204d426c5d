use std::cell::Cell;

use log::debug;

use crate::ports::{Handle, UiElement};

pub const ACTIVE_CLASS: &str = "active";
pub const BACKDROP_CLASS: &str = "modal-backdrop";

/// `overflow: hidden` on the body while at least one modal is open.
///
/// Counted rather than toggled, so closing one of two stacked modals keeps
/// the page locked until the last one goes away.
pub struct ScrollLock {
    body: Option<Handle>,
    open_modals: Cell<usize>,
}

impl ScrollLock {
    pub fn new(body: Option<Handle>) -> Self {
        Self {
            body,
            open_modals: Cell::new(0),
        }
    }

    pub fn acquire(&self) {
        self.open_modals.set(self.open_modals.get() + 1);
        if let Some(body) = &self.body {
            body.set_style("overflow", "hidden");
        }
    }

    pub fn release(&self) {
        let remaining = self.open_modals.get().saturating_sub(1);
        self.open_modals.set(remaining);
        if remaining == 0 {
            if let Some(body) = &self.body {
                body.set_style("overflow", "");
            }
        }
    }

    pub fn open_modals(&self) -> usize {
        self.open_modals.get()
    }

    pub fn is_locked(&self) -> bool {
        self.open_modals.get() > 0
    }
}

pub struct ModalController {
    scroll_lock: ScrollLock,
}

impl ModalController {
    pub fn new(body: Option<Handle>) -> Self {
        Self {
            scroll_lock: ScrollLock::new(body),
        }
    }

    pub fn is_open(modal: &dyn UiElement) -> bool {
        modal.has_class(ACTIVE_CLASS)
    }

    pub fn open(&self, modal: &dyn UiElement) {
        if Self::is_open(modal) {
            debug!("Modal already open");
            return;
        }
        modal.add_class(ACTIVE_CLASS);
        self.scroll_lock.acquire();
        debug!("Modal opened, {} open", self.scroll_lock.open_modals());
    }

    pub fn close(&self, modal: &dyn UiElement) {
        if !Self::is_open(modal) {
            // Still make sure the page scrolls if nothing else holds the lock.
            if !self.scroll_lock.is_locked() {
                self.scroll_lock.release();
            }
            return;
        }
        modal.remove_class(ACTIVE_CLASS);
        self.scroll_lock.release();
    }

    #[cfg(test)]
    pub fn scroll_lock(&self) -> &ScrollLock {
        &self.scroll_lock
    }
}

/// A click inside a modal dismisses it when it lands on the modal container
/// itself or on anything marked as backdrop.
pub fn is_backdrop_click(target_is_modal: bool, target: &dyn UiElement) -> bool {
    target_is_modal || target.has_class(BACKDROP_CLASS)
}
