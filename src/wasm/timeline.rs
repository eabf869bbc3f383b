use std::cell::RefCell;
use std::rc::Rc;

use web_sys::{HtmlElement, Window};

use super::frame::FrameLoop;
use crate::choreography::{translate_y, Props, Timeline, Tween, Tweener};
use crate::error::Result;

/// Tweens inline `opacity` and `transform: translateY(..)` on elements,
/// starting from their computed values.
pub struct DomTimeline {
    window: Window,
    tweens: Rc<RefCell<Tweener<HtmlElement>>>,
    _frames: FrameLoop,
}

impl DomTimeline {
    pub fn start(window: Window) -> Result<Self> {
        let tweens = Rc::new(RefCell::new(Tweener::default()));
        let ticking = Rc::clone(&tweens);
        let frames = FrameLoop::start(Box::new(move |now_ms| {
            if ticking.borrow().is_empty() {
                return;
            }
            let updates = ticking.borrow_mut().tick(now_ms / 1000.0);
            for (element, props) in updates {
                apply(&element, props);
            }
        }))?;
        Ok(Self {
            window,
            tweens,
            _frames: frames,
        })
    }

    fn now(&self) -> f64 {
        self.window
            .performance()
            .map(|p| p.now() / 1000.0)
            .unwrap_or(0.0)
    }

    fn current(&self, element: &HtmlElement) -> Props {
        let Ok(Some(style)) = self.window.get_computed_style(element) else {
            return Props::default();
        };
        Props {
            opacity: style
                .get_property_value("opacity")
                .ok()
                .and_then(|v| v.trim().parse().ok()),
            y: style
                .get_property_value("transform")
                .ok()
                .map(|t| translate_y(&t)),
        }
    }
}

impl Timeline for DomTimeline {
    type Target = HtmlElement;

    fn to(&mut self, target: &HtmlElement, tween: Tween) {
        let from = self.current(target);
        let now = self.now();
        self.tweens.borrow_mut().add(target.clone(), from, tween, now);
    }
}

fn apply(element: &HtmlElement, props: Props) {
    let style = element.style();
    if let Some(opacity) = props.opacity {
        let _ = style.set_property("opacity", &opacity.to_string());
    }
    if let Some(y) = props.y {
        let _ = style.set_property("transform", &format!("translateY({y}px)"));
    }
}
