//! Attaches the landing behaviour to the rendered page.
//!
//! Everything attached here is held by the returned [`Mounted`]; the page
//! drops it on unmount, which removes the listeners and stops the timers.

use std::rc::Rc;

use log::{debug, info, warn};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::js_sys::Array;
use web_sys::{Element, IntersectionObserver, IntersectionObserverEntry, IntersectionObserverInit};

use crate::config::LandingConfig;
use crate::dom::{BrowserClock, BrowserStorage, DocumentLookup, SimulatedTransport, TimerScheduler, WindowAlert};
use crate::landing::animation::RevealSet;
use crate::landing::countdown::{Countdown, CountdownDisplay};
use crate::landing::modal::{is_backdrop_click, ModalController};
use crate::landing::phone_mask::PhoneMask;
use crate::landing::registry::ElementRegistry;
use crate::landing::submission::{LeadForm, SubmissionFlow};
use crate::ports::{handle, ElementLookup, EventSource, Ports, Subscription, UiElement};

/// Listeners, the countdown interval and the animation observer of one
/// mounted page.
#[derive(Default)]
pub struct Mounted {
    subscriptions: Vec<Subscription>,
}

impl Mounted {
    fn push(&mut self, subscription: Subscription) {
        self.subscriptions.push(subscription);
    }

    pub fn attachments(&self) -> usize {
        self.subscriptions.len()
    }
}

impl Extend<Subscription> for Mounted {
    fn extend<I: IntoIterator<Item = Subscription>>(&mut self, iter: I) {
        self.subscriptions.extend(iter);
    }
}

pub fn browser_ports(config: &LandingConfig) -> Ports {
    Ports {
        storage: Rc::new(BrowserStorage),
        clock: Rc::new(BrowserClock),
        transport: Rc::new(SimulatedTransport {
            latency_ms: config.simulated_latency_ms,
        }),
        scheduler: Rc::new(TimerScheduler),
        notifier: Rc::new(WindowAlert),
    }
}

/// Mounts on the live document. `None` when there is no document to mount on.
pub fn init(config: LandingConfig) -> Option<Mounted> {
    let Some(document) = web_sys::window().and_then(|w| w.document()) else {
        warn!("No document, landing behaviour not started");
        return None;
    };
    let config = Rc::new(config);
    let lookup = DocumentLookup::new(document);
    let ports = browser_ports(&config);

    let mut mounted = mount(&lookup, config.clone(), ports);
    if let Some(observer) = observe_animations(&lookup, &config) {
        mounted.push(observer);
    }
    info!("Landing behaviour ready, {} attachments", mounted.attachments());
    Some(mounted)
}

/// Wires countdown, modals, lead form, phone mask and telegram link, in that
/// order, on whatever `lookup` resolves.
pub fn mount<L>(lookup: &L, config: Rc<LandingConfig>, ports: Ports) -> Mounted
where
    L: ElementLookup,
    L::Element: EventSource,
{
    let registry = ElementRegistry::resolve(lookup);
    let modals = Rc::new(ModalController::new(registry.body.clone().map(handle)));
    let mut mounted = Mounted::default();

    mounted.push(start_countdown(&registry, &config, &ports));
    mounted.extend(wire_form_modal(&registry, &modals));
    mounted.extend(wire_form(&registry, &config, &modals, ports));
    mounted.extend(wire_phone_mask(&registry, &config));

    if let Some(telegram_btn) = &registry.telegram_btn {
        telegram_btn.set_href(&config.telegram_channel);
    }
    mounted
}

fn start_countdown<E>(registry: &ElementRegistry<E>, config: &LandingConfig, ports: &Ports) -> Subscription
where
    E: UiElement + Clone + 'static,
{
    let display = CountdownDisplay {
        hours: registry.hours.clone(),
        minutes: registry.minutes.clone(),
        seconds: registry.seconds.clone(),
    };
    let clock = ports.clock.clone();
    let mut countdown = Countdown::start(clock.monotonic_millis(), config.countdown.duration_millis());
    let mut tick = move || display.show(countdown.tick(clock.monotonic_millis()));

    // Draw before the first period elapses.
    tick();
    let interval = ports.scheduler.every(config.tick_interval_ms, Box::new(tick));
    info!(
        "Countdown started at {:02}:{:02}:{:02}",
        config.countdown.hours, config.countdown.minutes, config.countdown.seconds
    );
    interval
}

fn wire_form_modal<E>(registry: &ElementRegistry<E>, modals: &Rc<ModalController>) -> Vec<Subscription>
where
    E: EventSource + UiElement + Clone + 'static,
{
    let (Some(open_btn), Some(form_modal)) = (&registry.open_form_btn, &registry.form_modal) else {
        debug!("No form modal trigger, modal wiring skipped");
        return Vec::new();
    };
    let mut subscriptions = Vec::new();

    {
        let modals = modals.clone();
        let form_modal = form_modal.clone();
        subscriptions.push(open_btn.listen("click", move |e| {
            e.prevent_default();
            modals.open(&form_modal);
        }));
    }

    if let Some(close_btn) = &registry.close_form_modal {
        let modals = modals.clone();
        let form_modal = form_modal.clone();
        subscriptions.push(close_btn.listen("click", move |_| modals.close(&form_modal)));
    }

    subscriptions.push(dismiss_on_backdrop(form_modal, modals));
    if let Some(success_modal) = &registry.success_modal {
        subscriptions.push(dismiss_on_backdrop(success_modal, modals));
    }
    info!("Form modal wired");
    subscriptions
}

fn dismiss_on_backdrop<E>(modal: &E, modals: &Rc<ModalController>) -> Subscription
where
    E: EventSource + UiElement + Clone + 'static,
{
    let modals = modals.clone();
    let target_modal = modal.clone();
    modal.listen("click", move |e| {
        let Some(target) = &e.target else {
            return;
        };
        if is_backdrop_click(target.same_element(&target_modal), target) {
            modals.close(&target_modal);
        }
    })
}

fn wire_form<E>(
    registry: &ElementRegistry<E>,
    config: &Rc<LandingConfig>,
    modals: &Rc<ModalController>,
    ports: Ports,
) -> Option<Subscription>
where
    E: EventSource + UiElement + Clone + 'static,
{
    let Some((form, name, phone, submit_btn)) = registry.form_parts() else {
        warn!("Lead form incomplete, submissions disabled");
        return None;
    };

    let lead_form = LeadForm {
        name: handle(name.clone()),
        phone: handle(phone.clone()),
        submit_btn: handle(submit_btn.clone()),
        form_modal: registry.form_modal.clone().map(handle),
        success_modal: registry.success_modal.clone().map(handle),
    };
    let scheduler = ports.scheduler.clone();
    let flow = Rc::new(SubmissionFlow::new(config.clone(), lead_form, modals.clone(), ports));

    let subscription = form.listen("submit", move |e| {
        e.prevent_default();
        let flow = flow.clone();
        scheduler.spawn(Box::pin(async move {
            let outcome = flow.submit().await;
            debug!("Submission finished: {:?}, back to {:?}", outcome, flow.state());
        }));
    });
    info!("Lead form wired");
    Some(subscription)
}

fn wire_phone_mask<E>(registry: &ElementRegistry<E>, config: &LandingConfig) -> Vec<Subscription>
where
    E: EventSource + UiElement + Clone + 'static,
{
    let Some(phone) = registry.user_phone.clone() else {
        return Vec::new();
    };
    let mask = Rc::new(PhoneMask::new(config.phone.clone()));
    let mut subscriptions = Vec::new();

    {
        let mask = mask.clone();
        let input = phone.clone();
        subscriptions.push(phone.listen("focus", move |_| {
            if let Some(prefilled) = mask.on_focus(&input.value()) {
                input.set_value(&prefilled);
            }
        }));
    }

    let input = phone.clone();
    subscriptions.push(phone.listen("input", move |_| {
        let formatted = mask.on_input(&input.value());
        input.set_value(&formatted);
    }));
    info!("Phone mask on, prefix {:?}", config.phone.prefix);
    subscriptions
}

/// Disconnects the observer when dropped.
struct RevealObserver {
    observer: IntersectionObserver,
    _callback: Closure<dyn FnMut(Array, IntersectionObserver)>,
}

impl Drop for RevealObserver {
    fn drop(&mut self) {
        self.observer.disconnect();
    }
}

fn observe_animations(lookup: &DocumentLookup, config: &LandingConfig) -> Option<Subscription> {
    let elements = lookup.query_all(&config.animation_selector);
    if elements.is_empty() {
        return None;
    }
    let mut reveals = RevealSet::arm(elements.clone());
    let watched = reveals.len();

    let callback = Closure::wrap(Box::new(move |entries: Array, observer: IntersectionObserver| {
        for entry in entries.iter() {
            let Ok(entry) = entry.dyn_into::<IntersectionObserverEntry>() else {
                continue;
            };
            let target = entry.target();
            let started = reveals.on_visibility(entry.is_intersecting(), |e| {
                let el: &Element = e.element();
                el == &target
            });
            if started {
                observer.unobserve(&target);
            }
        }
    }) as Box<dyn FnMut(Array, IntersectionObserver)>);

    let options = IntersectionObserverInit::new();
    options.set_threshold(&JsValue::from_f64(config.animation_threshold));
    options.set_root_margin("0px");

    match IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), &options) {
        Ok(observer) => {
            for el in &elements {
                observer.observe(el.element());
            }
            info!("Watching {} animated elements", watched);
            Some(Subscription::new(RevealObserver {
                observer,
                _callback: callback,
            }))
        }
        Err(e) => {
            warn!("IntersectionObserver unavailable, playing animations now: {:?}", e);
            for el in &elements {
                el.set_style("animation-play-state", "running");
            }
            None
        }
    }
}
