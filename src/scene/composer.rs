use std::cell::RefCell;
use std::rc::Rc;

use glam::Vec2;
use rand::Rng;

use super::background::BackgroundScene;
use super::globe::GlobeScene;
use super::graph::{PerspectiveCamera, SceneGraph, Viewport};
use crate::config::PageConfig;
use crate::error::Result;

/// A scene that advances once per frame.
pub trait Animated {
    fn step(&mut self, now_secs: f64);
    fn graph(&self) -> &SceneGraph;
    fn camera(&self) -> &PerspectiveCamera;
}

/// Draws a scene graph onto one surface.
pub trait Renderer {
    /// `viewport` is in CSS pixels.
    fn set_size(&mut self, viewport: Viewport);
    fn render(&mut self, graph: &SceneGraph, camera: &PerspectiveCamera) -> Result<()>;
}

/// What the composer needs from the page: surfaces to draw on and a
/// per-frame scheduler.
pub trait SceneHost {
    type Renderer: Renderer + 'static;
    /// Handle of a running frame loop. Dropping it stops the loop.
    type Frames;

    fn viewport(&self) -> Viewport;
    /// `Ok(None)` when no surface with that id exists.
    fn mount(&self, surface_id: &str, size: Viewport) -> Result<Option<Self::Renderer>>;
    fn run_frames(&self, tick: Box<dyn FnMut(f64)>) -> Result<Self::Frames>;
}

/// A scene bound to the renderer that draws it.
pub struct Stage<S, R> {
    pub scene: S,
    pub renderer: R,
    failed: bool,
}

impl<S: Animated, R: Renderer> Stage<S, R> {
    pub fn new(scene: S, renderer: R) -> Self {
        Self {
            scene,
            renderer,
            failed: false,
        }
    }

    /// Steps the scene, then draws it.
    pub fn frame(&mut self, now_ms: f64) {
        self.scene.step(now_ms / 1000.0);
        if let Err(e) = self.renderer.render(self.scene.graph(), self.scene.camera()) {
            if !self.failed {
                log::warn!("frame dropped: {e}");
            }
            self.failed = true;
        }
    }
}

pub type SharedStage<S, R> = Rc<RefCell<Stage<S, R>>>;

/// Owns both decorative scenes and their frame loops. Scenes whose surface
/// is missing or unusable are skipped; the rest of the page is unaffected.
pub struct Composer<H: SceneHost> {
    background: Option<SharedStage<BackgroundScene, H::Renderer>>,
    globe: Option<SharedStage<GlobeScene, H::Renderer>>,
    frames: Vec<H::Frames>,
}

impl<H: SceneHost> Composer<H> {
    pub fn start<G: Rng>(host: &H, config: &PageConfig, rng: &mut G) -> Self {
        let mut frames = Vec::new();

        let viewport = host.viewport();
        let background = launch(host, &config.background.surface_id, viewport, || {
            BackgroundScene::new(&config.background, viewport, rng)
        })
        .map(|(stage, loop_)| {
            frames.push(loop_);
            stage
        });

        let globe_scene = GlobeScene::new(&config.globe);
        let globe = launch(host, &config.globe.surface_id, globe_scene.viewport(), || globe_scene)
        .map(|(stage, loop_)| {
            frames.push(loop_);
            stage
        });

        Self {
            background,
            globe,
            frames,
        }
    }

    pub fn pointer_moved(&self, ndc: Vec2) {
        if let Some(stage) = &self.background {
            stage.borrow_mut().scene.set_pointer(ndc);
        }
    }

    /// Only the background follows the viewport; the globe is fixed-size.
    pub fn resized(&self, viewport: Viewport) {
        if let Some(stage) = &self.background {
            let mut stage = stage.borrow_mut();
            stage.scene.resize(viewport);
            stage.renderer.set_size(viewport);
        }
    }

    pub fn background(&self) -> Option<&SharedStage<BackgroundScene, H::Renderer>> {
        self.background.as_ref()
    }

    pub fn globe(&self) -> Option<&SharedStage<GlobeScene, H::Renderer>> {
        self.globe.as_ref()
    }

    pub fn running_loops(&self) -> usize {
        self.frames.len()
    }
}

fn launch<H, S>(
    host: &H,
    surface_id: &str,
    size: Viewport,
    build: impl FnOnce() -> S,
) -> Option<(SharedStage<S, H::Renderer>, H::Frames)>
where
    H: SceneHost,
    S: Animated + 'static,
{
    let renderer = match host.mount(surface_id, size) {
        Ok(Some(renderer)) => renderer,
        Ok(None) => {
            log::debug!("no #{surface_id} surface, scene skipped");
            return None;
        }
        Err(e) => {
            log::warn!("scene on #{surface_id} disabled: {e}");
            return None;
        }
    };

    let stage = Rc::new(RefCell::new(Stage::new(build(), renderer)));
    let ticking = Rc::clone(&stage);
    match host.run_frames(Box::new(move |now| ticking.borrow_mut().frame(now))) {
        Ok(frames) => {
            log::info!("scene mounted on #{surface_id}");
            Some((stage, frames))
        }
        Err(e) => {
            log::warn!("scene on #{surface_id} has no frame loop: {e}");
            None
        }
    }
}
