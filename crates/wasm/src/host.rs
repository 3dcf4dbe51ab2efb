//! Browser event wiring.
//!
//! Turns window scroll/resize, element clicks and `IntersectionObserver`
//! callbacks into `PageEvent`s for the enhancer, then applies the returned
//! `EventOutcome`. Event listener closures live for the lifetime of the
//! page, so they are leaked with `Closure::forget` once registered. Observer
//! callbacks are owned by `HostState` next to their observer and dropped when
//! a re-issued observation replaces it.

use crate::dom::WebDom;
use crate::error::{PagewrightError, js_message};
use log::{debug, warn};
use pagewright_core::{Enhancer, EventOutcome, Intersection, Observation, ObservationSource, PageEvent};
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use web_sys::{
    Document, Element, Event, EventTarget, IntersectionObserver,
    IntersectionObserverEntry, IntersectionObserverInit,
};

type ObserverCallback = Closure<dyn FnMut(js_sys::Array, IntersectionObserver)>;

struct ActiveObserver {
    observer: IntersectionObserver,
    _callback: ObserverCallback,
}

pub(crate) struct HostState {
    pub(crate) dom: WebDom,
    pub(crate) enhancer: Enhancer<WebDom>,
    observers: HashMap<ObservationSource, ActiveObserver>,
    /// Set when `IntersectionObserver` is unavailable; observations are then
    /// evaluated on every scroll instead.
    polling: bool,
}

pub(crate) type SharedHost = Rc<RefCell<HostState>>;

/// Registers every listener and observer the installed behaviors need.
pub(crate) fn attach(dom: WebDom, enhancer: Enhancer<WebDom>) -> Result<SharedHost, PagewrightError> {
    let window = dom.window().clone();
    let host = Rc::new(RefCell::new(HostState {
        dom,
        enhancer,
        observers: HashMap::new(),
        polling: false,
    }));

    let shared = Rc::clone(&host);
    listen(&window, "scroll", move |_| handle(&shared, PageEvent::Scroll, None))?;
    let shared = Rc::clone(&host);
    listen(&window, "resize", move |_| handle(&shared, PageEvent::Resize, None))?;

    let targets = host.borrow().enhancer.click_targets();
    debug!("Attaching click listeners to {} elements", targets.len());
    for current in targets {
        let shared = Rc::clone(&host);
        let node = current.clone();
        listen(&current, "click", move |event: Event| {
            let target = event
                .target()
                .and_then(|t| t.dyn_into::<Element>().ok())
                .unwrap_or_else(|| node.clone());
            let click = PageEvent::Click {
                current: node.clone(),
                target,
            };
            handle(&shared, click, Some(&event));
        })?;
    }

    let observations = {
        let state = host.borrow();
        state.enhancer.observations(&state.dom)
    };
    for observation in observations {
        observe(&host, observation);
    }

    if host.borrow().polling {
        handle(&host, PageEvent::Scroll, None);
    }
    Ok(host)
}

fn listen<T, F>(target: &T, event: &str, handler: F) -> Result<(), PagewrightError>
where
    T: AsRef<EventTarget>,
    F: FnMut(Event) + 'static,
{
    let closure = Closure::<dyn FnMut(Event)>::new(handler);
    target
        .as_ref()
        .add_event_listener_with_callback(event, closure.as_ref().unchecked_ref())
        .map_err(|e| {
            PagewrightError::host(format!("addEventListener('{}'): {}", event, js_message(&e)))
        })?;
    closure.forget();
    Ok(())
}

/// Dispatches one event and applies its outcome.
///
/// Events that arrive while the enhancer is already handling one (a
/// synchronous re-entry from the browser) are dropped.
pub(crate) fn handle(host: &SharedHost, event: PageEvent<Element>, raw: Option<&Event>) {
    let outcome = {
        let Ok(mut guard) = host.try_borrow_mut() else {
            warn!("Dropping {} event: enhancer is busy", event.name());
            return;
        };
        let state = &mut *guard;
        let mut outcome = state.enhancer.dispatch(&mut state.dom, &event);
        if state.polling && matches!(event, PageEvent::Scroll) {
            outcome.merge(state.enhancer.poll_observations(&mut state.dom));
        }
        outcome
    };

    if outcome.prevent_default {
        if let Some(raw) = raw {
            raw.prevent_default();
        }
    }
    apply(host, outcome);
}

fn apply(host: &SharedHost, outcome: EventOutcome<Element>) {
    {
        let state = host.borrow();
        for (source, target) in &outcome.unobserve {
            if let Some(active) = state.observers.get(source) {
                active.observer.unobserve(target);
            }
        }
    }
    for observation in outcome.reobserve {
        observe(host, observation);
    }
}

/// Starts (or restarts) the observer for `observation.source`.
fn observe(host: &SharedHost, observation: Observation<Element>) {
    let source = observation.source;
    let shared = Rc::clone(host);
    let callback = ObserverCallback::new(
        move |entries: js_sys::Array, _observer: IntersectionObserver| {
            let entries = entries
                .iter()
                .filter_map(|entry| entry.dyn_into::<IntersectionObserverEntry>().ok())
                .map(|entry| Intersection::new(entry.target(), entry.is_intersecting()))
                .collect();
            handle(&shared, PageEvent::Intersections { source, entries }, None);
        },
    );

    let options = IntersectionObserverInit::new();
    options.set_root_margin(&observation.root_margin.to_string());
    options.set_threshold(&JsValue::from_f64(observation.threshold));

    match IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), &options) {
        Ok(observer) => {
            for target in &observation.targets {
                observer.observe(target);
            }
            debug!(
                "Observing {} targets for {} with margin '{}'",
                observation.targets.len(),
                source.name(),
                observation.root_margin
            );
            let active = ActiveObserver {
                observer,
                _callback: callback,
            };
            let previous = host.borrow_mut().observers.insert(source, active);
            if let Some(previous) = previous {
                previous.observer.disconnect();
            }
        }
        Err(e) => {
            warn!(
                "IntersectionObserver unavailable ({}), evaluating {} on scroll",
                js_message(&e),
                source.name()
            );
            host.borrow_mut().polling = true;
        }
    }
}

/// Runs `install` once the document has been parsed.
pub(crate) fn when_ready<F>(document: &Document, install: F) -> Result<(), PagewrightError>
where
    F: FnOnce() + 'static,
{
    if document.ready_state() != "loading" {
        install();
        return Ok(());
    }
    let mut pending = Some(install);
    listen(document, "DOMContentLoaded", move |_| {
        if let Some(install) = pending.take() {
            install();
        }
    })
}
