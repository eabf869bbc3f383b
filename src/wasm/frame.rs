use std::cell::{Cell, RefCell};
use std::rc::Rc;

use wasm_bindgen::{closure::Closure, JsCast};
use web_sys::window;

use crate::error::{Error, Result};

type FrameSlot = Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>>;

/// A `requestAnimationFrame` loop that re-arms itself after every tick and
/// stops when dropped.
pub struct FrameLoop {
    // The slot is the only strong reference to the closure; the closure
    // reaches itself through a weak one, so dropping the loop frees it.
    slot: FrameSlot,
    request_id: Rc<Cell<i32>>,
}

impl FrameLoop {
    pub fn start(mut tick: Box<dyn FnMut(f64)>) -> Result<Self> {
        let window = window().ok_or_else(|| Error::Js("no window".into()))?;
        let slot: FrameSlot = Rc::new(RefCell::new(None));
        let request_id = Rc::new(Cell::new(0));

        let next = Rc::downgrade(&slot);
        let id = Rc::clone(&request_id);
        let win = window.clone();
        *slot.borrow_mut() = Some(Closure::wrap(Box::new(move |now: f64| {
            tick(now);

            // schedule next
            let Some(slot) = next.upgrade() else { return };
            let slot = slot.borrow();
            if let Some(closure) = slot.as_ref() {
                match win.request_animation_frame(closure.as_ref().unchecked_ref()) {
                    Ok(handle) => id.set(handle),
                    Err(e) => log::warn!("frame loop stopped: {e:?}"),
                }
            }
        }) as Box<dyn FnMut(f64)>));

        let handle = {
            let armed = slot.borrow();
            let closure = armed
                .as_ref()
                .ok_or_else(|| Error::Js("frame callback missing".into()))?;
            window.request_animation_frame(closure.as_ref().unchecked_ref())?
        };
        request_id.set(handle);

        Ok(Self { slot, request_id })
    }
}

impl Drop for FrameLoop {
    fn drop(&mut self) {
        if let Some(window) = window() {
            let _ = window.cancel_animation_frame(self.request_id.get());
        }
        self.slot.borrow_mut().take();
    }
}
