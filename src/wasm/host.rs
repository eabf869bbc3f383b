use wasm_bindgen::JsCast;
use web_sys::{Document, HtmlCanvasElement, Window};

use super::frame::FrameLoop;
use super::render::WebGlRenderer;
use crate::error::{Error, Result};
use crate::scene::{SceneHost, Viewport};

/// Window inner size in CSS pixels.
pub fn viewport_of(window: &Window) -> Viewport {
    let dim = |v: std::result::Result<wasm_bindgen::JsValue, wasm_bindgen::JsValue>| {
        v.ok().and_then(|v| v.as_f64()).unwrap_or(0.0)
    };
    Viewport::new(dim(window.inner_width()), dim(window.inner_height()))
}

/// Scene surfaces looked up by element id. A canvas is drawn on directly;
/// any other element gets a canvas appended to it.
pub struct DomHost {
    window: Window,
    document: Document,
    pixel_ratio: f64,
}

impl DomHost {
    pub fn new(window: Window, max_pixel_ratio: f64) -> Result<Self> {
        let document = window
            .document()
            .ok_or_else(|| Error::Js("no document".into()))?;
        let pixel_ratio = window.device_pixel_ratio().min(max_pixel_ratio).max(1.0);
        Ok(Self {
            window,
            document,
            pixel_ratio,
        })
    }
}

impl SceneHost for DomHost {
    type Renderer = WebGlRenderer;
    type Frames = FrameLoop;

    fn viewport(&self) -> Viewport {
        viewport_of(&self.window)
    }

    fn mount(&self, surface_id: &str, size: Viewport) -> Result<Option<WebGlRenderer>> {
        let Some(surface) = self.document.get_element_by_id(surface_id) else {
            return Ok(None);
        };
        let canvas = match surface.dyn_into::<HtmlCanvasElement>() {
            Ok(canvas) => canvas,
            Err(container) => {
                let canvas = self
                    .document
                    .create_element("canvas")?
                    .dyn_into::<HtmlCanvasElement>()
                    .map_err(|_| Error::Js("created element is not a canvas".into()))?;
                container.append_child(&canvas)?;
                canvas
            }
        };
        WebGlRenderer::new(canvas, surface_id, self.pixel_ratio, size).map(Some)
    }

    fn run_frames(&self, tick: Box<dyn FnMut(f64)>) -> Result<FrameLoop> {
        FrameLoop::start(tick)
    }
}
