use std::cell::RefCell;
use std::rc::Rc;

use js_sys::Array;
use wasm_bindgen::{closure::Closure, JsCast, JsValue};
use web_sys::{
    Document, HtmlElement, IntersectionObserver, IntersectionObserverEntry,
    IntersectionObserverInit, Window,
};

use super::events::Listener;
use super::timeline::DomTimeline;
use crate::choreography::{Choreographer, HeroTargets};
use crate::config::RevealConfig;
use crate::error::Result;

const REVEAL_SELECTOR: &str = ".reveal";
const MASK_SELECTOR: &str = ".mask-text";
const REVEALED_CLASS: &str = "revealed";

type IntersectionCallback = Closure<dyn FnMut(Array, IntersectionObserver)>;

/// Binds the choreography engine to the document: hero entrance, scroll
/// reveals driven by scroll and resize events and mask latches driven by an
/// intersection observer.
pub struct Motion {
    choreographer: Rc<RefCell<Choreographer<HtmlElement>>>,
    timeline: Rc<RefCell<DomTimeline>>,
    hero: HeroTargets<HtmlElement>,
    observer: IntersectionObserver,
    _on_intersect: IntersectionCallback,
    _triggers: Vec<Listener>,
}

impl Motion {
    pub fn start(window: &Window, document: &Document, config: &RevealConfig) -> Result<Self> {
        let timeline = Rc::new(RefCell::new(DomTimeline::start(window.clone())?));
        let choreographer = Rc::new(RefCell::new(Choreographer::new(config)));

        let hero = HeroTargets {
            badge: query_all(document, ".hero-badge"),
            title: query_all(document, ".hero-title"),
            title_lines: query_all(document, ".hero-title .line span"),
            subtitle: query_all(document, ".hero-subtitle"),
            cta: query_all(document, ".hero-cta"),
            scroll_hint: query_all(document, ".scroll-indicator"),
        };

        {
            let mut choreo = choreographer.borrow_mut();
            for element in query_all(document, REVEAL_SELECTOR) {
                choreo.scroll.register(element);
            }
        }

        // A resize moves the trigger line, so it re-checks like a scroll.
        let mut triggers = Vec::with_capacity(2);
        for kind in ["scroll", "resize"] {
            let choreographer = Rc::clone(&choreographer);
            let timeline = Rc::clone(&timeline);
            let win = window.clone();
            triggers.push(Listener::new(window, kind, move |_: web_sys::Event| {
                reveal_due(&choreographer, &timeline, &win);
            })?);
        }
        // Elements already past the line on load reveal right away.
        reveal_due(&choreographer, &timeline, window);

        let on_intersect: IntersectionCallback = {
            let choreographer = Rc::clone(&choreographer);
            Closure::wrap(Box::new(move |entries: Array, observer: IntersectionObserver| {
                for entry in entries.iter() {
                    let entry: IntersectionObserverEntry = entry.unchecked_into();
                    let Ok(element) = entry.target().dyn_into::<HtmlElement>() else {
                        continue;
                    };
                    let latched = choreographer
                        .borrow_mut()
                        .mask
                        .on_intersection(&element, entry.is_intersecting());
                    if latched {
                        let _ = element.class_list().add_1(REVEALED_CLASS);
                        observer.unobserve(&element);
                    }
                }
            }) as Box<dyn FnMut(Array, IntersectionObserver)>)
        };

        let init = IntersectionObserverInit::new();
        init.set_threshold(&JsValue::from_f64(config.mask_threshold));
        let observer =
            IntersectionObserver::new_with_options(on_intersect.as_ref().unchecked_ref(), &init)?;
        {
            let mut choreo = choreographer.borrow_mut();
            for element in query_all(document, MASK_SELECTOR) {
                observer.observe(&element);
                choreo.mask.register(element);
            }
        }

        Ok(Self {
            choreographer,
            timeline,
            hero,
            observer,
            _on_intersect: on_intersect,
            _triggers: triggers,
        })
    }

    /// Plays the hero entrance; later calls do nothing.
    pub fn play_intro(&self) -> bool {
        let mut timeline = self.timeline.borrow_mut();
        self.choreographer
            .borrow_mut()
            .load
            .play(&mut *timeline, &self.hero)
    }
}

impl Drop for Motion {
    fn drop(&mut self) {
        self.observer.disconnect();
    }
}

fn reveal_due(
    choreographer: &RefCell<Choreographer<HtmlElement>>,
    timeline: &RefCell<DomTimeline>,
    window: &Window,
) {
    let height = window
        .inner_height()
        .ok()
        .and_then(|v| v.as_f64())
        .unwrap_or(0.0);
    let fired = choreographer.borrow_mut().scroll.update(
        &mut *timeline.borrow_mut(),
        height,
        |element| element.get_bounding_client_rect().top(),
    );
    if fired > 0 {
        log::debug!("revealed {fired} element(s)");
    }
}

pub fn query_all(document: &Document, selector: &str) -> Vec<HtmlElement> {
    let Ok(nodes) = document.query_selector_all(selector) else {
        return Vec::new();
    };
    (0..nodes.length())
        .filter_map(|i| nodes.get(i))
        .filter_map(|node| node.dyn_into::<HtmlElement>().ok())
        .collect()
}
