//! Narrow capabilities the landing behaviour is written against.
//!
//! The browser implementations live in `dom.rs`; everything in `landing/`
//! only ever sees these traits, so the state machines run unchanged under
//! the in-memory doubles in [`fakes`].

use std::any::Any;
use std::cell::Cell;
use std::rc::Rc;

use chrono::{DateTime, Local};
use futures::future::LocalBoxFuture;

use crate::error::LandingError;
use crate::landing::lead::Lead;

/// A single page element as far as the landing behaviour cares.
pub trait UiElement {
    fn add_class(&self, class: &str);
    fn remove_class(&self, class: &str);
    fn has_class(&self, class: &str) -> bool;
    fn set_text(&self, text: &str);
    /// Current value for inputs, empty for anything else.
    fn value(&self) -> String;
    fn set_value(&self, value: &str);
    fn focus(&self);
    /// An empty `value` removes the inline property.
    fn set_style(&self, property: &str, value: &str);
    fn set_href(&self, href: &str);
}

pub type Handle = Rc<dyn UiElement>;

impl<T: UiElement + ?Sized> UiElement for Rc<T> {
    fn add_class(&self, class: &str) {
        (**self).add_class(class)
    }

    fn remove_class(&self, class: &str) {
        (**self).remove_class(class)
    }

    fn has_class(&self, class: &str) -> bool {
        (**self).has_class(class)
    }

    fn set_text(&self, text: &str) {
        (**self).set_text(text)
    }

    fn value(&self) -> String {
        (**self).value()
    }

    fn set_value(&self, value: &str) {
        (**self).set_value(value)
    }

    fn focus(&self) {
        (**self).focus()
    }

    fn set_style(&self, property: &str, value: &str) {
        (**self).set_style(property, value)
    }

    fn set_href(&self, href: &str) {
        (**self).set_href(href)
    }
}

/// Finds page elements by id. The element type is left to the
/// implementation so the browser side can keep the real node around for
/// attaching listeners.
pub trait ElementLookup {
    type Element: UiElement + Clone + 'static;

    fn element(&self, id: &str) -> Option<Self::Element>;
    fn body(&self) -> Option<Self::Element>;
}

pub fn handle<E: UiElement + 'static>(element: E) -> Handle {
    Rc::new(element)
}

/// Keeps a listener, timer or observer attached. Dropping it detaches.
pub struct Subscription {
    _guard: Box<dyn Any>,
}

impl Subscription {
    pub fn new(guard: impl Any) -> Self {
        Self {
            _guard: Box::new(guard),
        }
    }
}

/// What a listener sees of the event that fired.
pub struct UiEvent<E> {
    pub target: Option<E>,
    default_prevented: Cell<bool>,
}

impl<E> UiEvent<E> {
    pub fn new(target: Option<E>) -> Self {
        Self {
            target,
            default_prevented: Cell::new(false),
        }
    }

    pub fn prevent_default(&self) {
        self.default_prevented.set(true);
    }

    pub fn default_prevented(&self) -> bool {
        self.default_prevented.get()
    }
}

/// Elements that can have listeners attached.
pub trait EventSource: Sized {
    fn listen(&self, event: &str, handler: impl FnMut(&UiEvent<Self>) + 'static) -> Subscription;
    fn same_element(&self, other: &Self) -> bool;
}

pub trait KeyValueStore {
    fn get_item(&self, key: &str) -> Result<Option<String>, LandingError>;
    fn set_item(&self, key: &str, value: &str) -> Result<(), LandingError>;
}

pub trait Clock {
    /// Wall-clock time, used for lead timestamps.
    fn local_now(&self) -> DateTime<Local>;
    /// Milliseconds from an arbitrary origin that never jumps backwards.
    fn monotonic_millis(&self) -> i64;
}

/// Where a validated lead goes before it is stored.
pub trait LeadTransport {
    fn deliver(&self, lead: &Lead) -> LocalBoxFuture<'static, Result<(), LandingError>>;
}

pub trait Scheduler {
    /// One-shot, not cancellable.
    fn schedule(&self, delay_ms: u32, task: Box<dyn FnOnce()>);
    fn every(&self, interval_ms: u32, task: Box<dyn FnMut()>) -> Subscription;
    fn spawn(&self, task: LocalBoxFuture<'static, ()>);
}

pub trait Notifier {
    fn alert(&self, message: &str);
}

/// The non-element capabilities, shared by every landing component.
#[derive(Clone)]
pub struct Ports {
    pub storage: Rc<dyn KeyValueStore>,
    pub clock: Rc<dyn Clock>,
    pub transport: Rc<dyn LeadTransport>,
    pub scheduler: Rc<dyn Scheduler>,
    pub notifier: Rc<dyn Notifier>,
}
