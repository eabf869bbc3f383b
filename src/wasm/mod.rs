//! Browser entry point. Binds the pure page model to the DOM, WebGL2 and
//! `requestAnimationFrame`.

use std::cell::RefCell;
use std::rc::Rc;

use rand::rngs::SmallRng;
use rand::SeedableRng;
use wasm_bindgen::prelude::*;
use log::Level;
use web_sys::{Document, Event, MouseEvent, PageTransitionEvent};

pub mod events;
pub mod frame;
pub mod host;
pub mod motion;
pub mod render;
pub mod timeline;
pub mod view;

use crate::config::PageConfig;
use crate::content::ContentModel;
use crate::error::{Error, Result};
use crate::pointer::{normalized_pointer, UiState};
use crate::scene::Composer;
use crate::tilt::CardTilt;
use events::Listener;
use host::{viewport_of, DomHost};
use motion::Motion;
use view::CursorView;

const CONFIG_ID: &str = "page-config";

/// Everything with a browser registration. Dropping it stops every frame
/// loop and removes every listener.
struct Page {
    _composer: Rc<Composer<DomHost>>,
    motion: Option<Motion>,
    _listeners: Vec<Listener>,
}

thread_local! {
    static PAGE: RefCell<Option<Page>> = const { RefCell::new(None) };
}

#[wasm_bindgen(start)]
pub fn main() -> std::result::Result<(), JsValue> {
    let window = web_sys::window().ok_or("no window")?;
    let document = window.document().ok_or("no document")?;

    console_error_panic_hook::set_once();
    // Default level until the config is read.
    console_log::init_with_level(Level::Info)
        .map_err(|e| JsValue::from_str(&format!("logger: {e}")))?;
    let config = load_config(&document);
    log::set_max_level(config.log_level);

    view::render_content(&document, &ContentModel::builtin())?;

    let delay = config.settle_delay_ms;
    let start = Closure::once_into_js(move || {
        if let Err(e) = start_page(config) {
            log::warn!("page start failed: {e}");
        }
    });
    window.set_timeout_with_callback_and_timeout_and_arguments_0(start.unchecked_ref(), delay)?;

    let on_pagehide = Closure::<dyn FnMut(Event)>::new(|event: Event| {
        if ends_session(&event) {
            teardown();
        }
    });
    window.add_event_listener_with_callback("pagehide", on_pagehide.as_ref().unchecked_ref())?;
    on_pagehide.forget();

    Ok(())
}

/// Drops the running page. Safe to call more than once.
#[wasm_bindgen]
pub fn teardown() {
    let page = PAGE.with(|slot| slot.borrow_mut().take());
    if page.is_some() {
        drop(page);
        log::info!("page torn down");
    }
}

/// `false` for a `pagehide` that parks the page in the back-forward cache;
/// the page comes back with its loops and listeners intact.
pub fn ends_session(event: &Event) -> bool {
    event
        .dyn_ref::<PageTransitionEvent>()
        .map_or(true, |transition| !transition.persisted())
}

/// Reads `#page-config`. Absent or malformed config yields the defaults.
pub fn load_config(document: &Document) -> PageConfig {
    let Some(raw) = document
        .get_element_by_id(CONFIG_ID)
        .and_then(|el| el.text_content())
    else {
        return PageConfig::default();
    };
    PageConfig::from_json(&raw).unwrap_or_else(|e| {
        log::warn!("{e}; using defaults");
        PageConfig::default()
    })
}

fn start_page(config: PageConfig) -> Result<()> {
    // A second start only replays the (already played) intro.
    let running = PAGE.with(|slot| {
        slot.borrow().as_ref().map(|page| {
            if let Some(motion) = &page.motion {
                motion.play_intro();
            }
        })
    });
    if running.is_some() {
        return Ok(());
    }

    let window = web_sys::window().ok_or_else(|| Error::Js("no window".into()))?;
    let document = window
        .document()
        .ok_or_else(|| Error::Js("no document".into()))?;

    let host = DomHost::new(window.clone(), config.background.max_pixel_ratio)?;
    let mut rng = match config.seed {
        Some(seed) => SmallRng::seed_from_u64(seed),
        None => SmallRng::seed_from_u64((js_sys::Math::random() * u64::MAX as f64) as u64),
    };
    let composer = Rc::new(Composer::start(&host, &config, &mut rng));

    let ui = Rc::new(RefCell::new(UiState::new(config.cursor.clone())));
    let cursor = Rc::new(CursorView::find(&document));
    let mut listeners = Vec::new();

    listeners.push({
        let (ui, cursor, composer, win) = (
            Rc::clone(&ui),
            Rc::clone(&cursor),
            Rc::clone(&composer),
            window.clone(),
        );
        Listener::new(&document, "mousemove", move |event: Event| {
            let Some(event) = event.dyn_ref::<MouseEvent>() else {
                return;
            };
            let (x, y) = (event.client_x() as f64, event.client_y() as f64);
            ui.borrow_mut().on_pointer_move(x, y);
            cursor.apply(&ui.borrow());
            let viewport = viewport_of(&win);
            composer.pointer_moved(normalized_pointer(x, y, viewport.width, viewport.height));
        })?
    });

    listeners.push({
        let (ui, cursor, win) = (Rc::clone(&ui), Rc::clone(&cursor), window.clone());
        Listener::new(&window, "scroll", move |_: Event| {
            ui.borrow_mut().on_scroll(win.scroll_y().unwrap_or(0.0));
            cursor.apply(&ui.borrow());
        })?
    });

    listeners.push({
        let (composer, win) = (Rc::clone(&composer), window.clone());
        Listener::new(&window, "resize", move |_: Event| {
            composer.resized(viewport_of(&win));
        })?
    });

    listeners.extend(view::bind_hover(&document, &ui, &cursor)?);
    listeners.extend(view::bind_cards(&document, CardTilt::new(config.card_tilt.clone()))?);
    listeners.extend(view::bind_scroll_links(&document)?);

    let motion = match Motion::start(&window, &document, &config.reveal) {
        Ok(motion) => {
            if motion.play_intro() {
                log::debug!("intro played");
            }
            Some(motion)
        }
        Err(e) => {
            log::warn!("animations disabled: {e}");
            None
        }
    };

    log::info!(
        "page started with {} scene loop(s)",
        composer.running_loops()
    );
    PAGE.with(|slot| {
        *slot.borrow_mut() = Some(Page {
            _composer: composer,
            motion,
            _listeners: listeners,
        });
    });
    Ok(())
}
