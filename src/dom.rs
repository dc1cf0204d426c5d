use chrono::{DateTime, Local};
use futures::future::LocalBoxFuture;
use gloo_timers::callback::{Interval, Timeout};
use gloo_timers::future::TimeoutFuture;
use log::{debug, warn};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys::{window, Document, Event, HtmlElement, HtmlInputElement, Storage};

use crate::error::LandingError;
use crate::landing::lead::Lead;
use crate::ports::{
    Clock, ElementLookup, EventSource, KeyValueStore, LeadTransport, Notifier, Scheduler, Subscription, UiElement,
    UiEvent,
};

#[derive(Clone, PartialEq)]
pub struct DomElement {
    element: HtmlElement,
}

impl DomElement {
    pub fn new(element: HtmlElement) -> Self {
        Self { element }
    }

    pub fn element(&self) -> &HtmlElement {
        &self.element
    }
}

/// Removes the listener when dropped; the closure lives exactly as long.
struct DomListener {
    element: HtmlElement,
    event: String,
    callback: Closure<dyn FnMut(Event)>,
}

impl Drop for DomListener {
    fn drop(&mut self) {
        let _ = self
            .element
            .remove_event_listener_with_callback(&self.event, self.callback.as_ref().unchecked_ref());
    }
}

impl EventSource for DomElement {
    fn listen(&self, event: &str, mut handler: impl FnMut(&UiEvent<Self>) + 'static) -> Subscription {
        let callback = Closure::wrap(Box::new(move |e: Event| {
            let target = e
                .target()
                .and_then(|t| t.dyn_into::<HtmlElement>().ok())
                .map(DomElement::new);
            let ui_event = UiEvent::new(target);
            handler(&ui_event);
            if ui_event.default_prevented() {
                e.prevent_default();
            }
        }) as Box<dyn FnMut(Event)>);

        if let Err(e) = self
            .element
            .add_event_listener_with_callback(event, callback.as_ref().unchecked_ref())
        {
            warn!("Could not listen for {}: {:?}", event, e);
        }
        Subscription::new(DomListener {
            element: self.element.clone(),
            event: event.to_string(),
            callback,
        })
    }

    fn same_element(&self, other: &Self) -> bool {
        self.element == other.element
    }
}

impl UiElement for DomElement {
    fn add_class(&self, class: &str) {
        let _ = self.element.class_list().add_1(class);
    }

    fn remove_class(&self, class: &str) {
        let _ = self.element.class_list().remove_1(class);
    }

    fn has_class(&self, class: &str) -> bool {
        self.element.class_list().contains(class)
    }

    fn set_text(&self, text: &str) {
        self.element.set_text_content(Some(text));
    }

    fn value(&self) -> String {
        self.element
            .dyn_ref::<HtmlInputElement>()
            .map(|input| input.value())
            .unwrap_or_default()
    }

    fn set_value(&self, value: &str) {
        if let Some(input) = self.element.dyn_ref::<HtmlInputElement>() {
            input.set_value(value);
        }
    }

    fn focus(&self) {
        let _ = self.element.focus();
    }

    fn set_style(&self, property: &str, value: &str) {
        let style = self.element.style();
        let _ = if value.is_empty() {
            style.remove_property(property).map(|_| ())
        } else {
            style.set_property(property, value)
        };
    }

    fn set_href(&self, href: &str) {
        let _ = self.element.set_attribute("href", href);
    }
}

pub struct DocumentLookup {
    document: Document,
}

impl DocumentLookup {
    pub fn new(document: Document) -> Self {
        Self { document }
    }

    pub fn query_all(&self, selector: &str) -> Vec<DomElement> {
        let Ok(nodes) = self.document.query_selector_all(selector) else {
            warn!("Bad selector {}", selector);
            return Vec::new();
        };
        (0..nodes.length())
            .filter_map(|i| nodes.get(i))
            .filter_map(|node| node.dyn_into::<HtmlElement>().ok())
            .map(DomElement::new)
            .collect()
    }
}

impl ElementLookup for DocumentLookup {
    type Element = DomElement;

    fn element(&self, id: &str) -> Option<DomElement> {
        self.document
            .get_element_by_id(id)
            .and_then(|el| el.dyn_into::<HtmlElement>().ok())
            .map(DomElement::new)
    }

    fn body(&self) -> Option<DomElement> {
        self.document.body().map(DomElement::new)
    }
}

pub struct BrowserStorage;

impl BrowserStorage {
    fn storage() -> Result<Storage, LandingError> {
        window()
            .and_then(|w| w.local_storage().ok())
            .flatten()
            .ok_or(LandingError::StorageUnavailable)
    }
}

impl KeyValueStore for BrowserStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, LandingError> {
        Self::storage()?
            .get_item(key)
            .map_err(|e| LandingError::StorageError(format!("{:?}", e)))
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), LandingError> {
        Self::storage()?
            .set_item(key, value)
            .map_err(|e| LandingError::StorageError(format!("{:?}", e)))
    }
}

pub struct BrowserClock;

impl Clock for BrowserClock {
    fn local_now(&self) -> DateTime<Local> {
        Local::now()
    }

    fn monotonic_millis(&self) -> i64 {
        window()
            .and_then(|w| w.performance())
            .map(|p| p.now())
            .unwrap_or_else(web_sys::js_sys::Date::now) as i64
    }
}

/// Stands in for a backend: waits, then reports success.
pub struct SimulatedTransport {
    pub latency_ms: u32,
}

impl LeadTransport for SimulatedTransport {
    fn deliver(&self, lead: &Lead) -> LocalBoxFuture<'static, Result<(), LandingError>> {
        let latency_ms = self.latency_ms;
        let has_window = window().is_some();
        debug!("Sending lead from {} ({}ms simulated)", lead.source, latency_ms);
        Box::pin(async move {
            // TimeoutFuture needs the window's setTimeout.
            if !has_window {
                return Err(LandingError::TransportError("no window to time the request".to_string()));
            }
            TimeoutFuture::new(latency_ms).await;
            Ok(())
        })
    }
}

pub struct TimerScheduler;

impl Scheduler for TimerScheduler {
    fn schedule(&self, delay_ms: u32, task: Box<dyn FnOnce()>) {
        Timeout::new(delay_ms, task).forget();
    }

    fn every(&self, interval_ms: u32, task: Box<dyn FnMut()>) -> Subscription {
        // Cancelled when the Interval drops.
        Subscription::new(Interval::new(interval_ms, task))
    }

    fn spawn(&self, task: LocalBoxFuture<'static, ()>) {
        spawn_local(task);
    }
}

pub struct WindowAlert;

impl Notifier for WindowAlert {
    fn alert(&self, message: &str) {
        if let Some(window) = window() {
            let _ = window.alert_with_message(message);
        }
    }
}
