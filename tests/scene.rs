use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::rc::Rc;

use glam::Vec2;
use portfolio_wasm::config::PageConfig;
use portfolio_wasm::scene::{
    Animated, Composer, PerspectiveCamera, Renderer, SceneGraph, SceneHost, Viewport,
};
use portfolio_wasm::{Error, Result};
use rand::rngs::SmallRng;
use rand::SeedableRng;

#[derive(Debug, Clone, PartialEq)]
enum Call {
    Mounted(String, Viewport),
    Resized(String, Viewport),
    Rendered { surface: String, nodes: usize, eye_x: f32 },
}

type CallLog = Rc<RefCell<Vec<Call>>>;

struct FakeRenderer {
    surface: String,
    calls: CallLog,
}

impl Renderer for FakeRenderer {
    fn set_size(&mut self, viewport: Viewport) {
        self.calls
            .borrow_mut()
            .push(Call::Resized(self.surface.clone(), viewport));
    }

    fn render(&mut self, graph: &SceneGraph, camera: &PerspectiveCamera) -> Result<()> {
        self.calls.borrow_mut().push(Call::Rendered {
            surface: self.surface.clone(),
            nodes: graph.len(),
            eye_x: camera.position.x,
        });
        Ok(())
    }
}

#[derive(Clone, Copy)]
enum Surface {
    Usable,
    NoWebGl,
}

/// Counts itself in `released` when dropped.
struct FrameHandle {
    released: Rc<Cell<usize>>,
}

impl Drop for FrameHandle {
    fn drop(&mut self) {
        self.released.set(self.released.get() + 1);
    }
}

/// Surfaces by id plus a manual frame clock.
struct FakeHost {
    surfaces: HashMap<&'static str, Surface>,
    ticks: RefCell<Vec<Box<dyn FnMut(f64)>>>,
    calls: CallLog,
    released: Rc<Cell<usize>>,
}

impl FakeHost {
    fn new(surfaces: &[(&'static str, Surface)]) -> Self {
        Self {
            surfaces: surfaces.iter().copied().collect(),
            ticks: RefCell::new(Vec::new()),
            calls: Rc::default(),
            released: Rc::default(),
        }
    }

    fn advance(&self, now_ms: f64) {
        for tick in self.ticks.borrow_mut().iter_mut() {
            tick(now_ms);
        }
    }

    fn rendered_on(&self, surface: &str) -> usize {
        self.calls
            .borrow()
            .iter()
            .filter(|c| matches!(c, Call::Rendered { surface: s, .. } if s == surface))
            .count()
    }
}

impl SceneHost for FakeHost {
    type Renderer = FakeRenderer;
    type Frames = FrameHandle;

    fn viewport(&self) -> Viewport {
        Viewport::new(1600.0, 900.0)
    }

    fn mount(&self, surface_id: &str, size: Viewport) -> Result<Option<FakeRenderer>> {
        match self.surfaces.get(surface_id) {
            None => Ok(None),
            Some(Surface::NoWebGl) => Err(Error::WebGlUnavailable(surface_id.to_string())),
            Some(Surface::Usable) => {
                self.calls
                    .borrow_mut()
                    .push(Call::Mounted(surface_id.to_string(), size));
                Ok(Some(FakeRenderer {
                    surface: surface_id.to_string(),
                    calls: Rc::clone(&self.calls),
                }))
            }
        }
    }

    fn run_frames(&self, tick: Box<dyn FnMut(f64)>) -> Result<FrameHandle> {
        self.ticks.borrow_mut().push(tick);
        Ok(FrameHandle {
            released: Rc::clone(&self.released),
        })
    }
}

fn start(host: &FakeHost) -> Composer<FakeHost> {
    let config = PageConfig::default();
    let mut rng = SmallRng::seed_from_u64(7);
    Composer::start(host, &config, &mut rng)
}

#[test]
fn both_surfaces_get_a_loop() {
    let host = FakeHost::new(&[
        ("three-container", Surface::Usable),
        ("globe-canvas", Surface::Usable),
    ]);
    let composer = start(&host);

    assert_eq!(composer.running_loops(), 2);
    assert!(composer.background().is_some());
    assert!(composer.globe().is_some());

    let calls = host.calls.borrow();
    assert!(calls.contains(&Call::Mounted(
        "three-container".into(),
        Viewport::new(1600.0, 900.0)
    )));
    // The globe surface is a fixed 500px square regardless of the window.
    assert!(calls.contains(&Call::Mounted("globe-canvas".into(), Viewport::square(500))));
}

#[test]
fn missing_surface_skips_only_that_scene() {
    let host = FakeHost::new(&[("globe-canvas", Surface::Usable)]);
    let composer = start(&host);

    assert_eq!(composer.running_loops(), 1);
    assert!(composer.background().is_none());
    assert!(composer.globe().is_some());

    // Pointer and resize events with no background are ignored.
    composer.pointer_moved(Vec2::new(0.5, 0.5));
    composer.resized(Viewport::new(800.0, 600.0));
    host.advance(16.0);
    assert_eq!(host.rendered_on("globe-canvas"), 1);
    assert_eq!(host.rendered_on("three-container"), 0);
}

#[test]
fn no_surfaces_means_no_loops() {
    let host = FakeHost::new(&[]);
    let composer = start(&host);
    assert_eq!(composer.running_loops(), 0);
    host.advance(16.0);
    assert!(host.calls.borrow().is_empty());
}

#[test]
fn unusable_surface_is_isolated() {
    let host = FakeHost::new(&[
        ("three-container", Surface::NoWebGl),
        ("globe-canvas", Surface::Usable),
    ]);
    let composer = start(&host);
    assert_eq!(composer.running_loops(), 1);
    assert!(composer.background().is_none());
}

#[test]
fn each_frame_steps_then_renders() {
    let host = FakeHost::new(&[
        ("three-container", Surface::Usable),
        ("globe-canvas", Surface::Usable),
    ]);
    let composer = start(&host);

    for frame in 0..3 {
        host.advance(frame as f64 * 16.0);
    }
    assert_eq!(host.rendered_on("three-container"), 3);
    assert_eq!(host.rendered_on("globe-canvas"), 3);

    let globe = composer.globe().unwrap();
    let rotation = globe.borrow().scene.globe_rotation();
    assert!((rotation - 0.015).abs() < 1e-6, "rotation={rotation}");

    // 2000 particles, 5 solids and a ring.
    let background = composer.background().unwrap();
    assert_eq!(background.borrow().scene.graph().len(), 7);
}

#[test]
fn camera_eases_towards_pointer() {
    let host = FakeHost::new(&[("three-container", Surface::Usable)]);
    let composer = start(&host);

    // Right edge of the window.
    composer.pointer_moved(Vec2::new(1.0, 0.0));
    host.advance(0.0);

    let eye_x = host
        .calls
        .borrow()
        .iter()
        .rev()
        .find_map(|c| match c {
            Call::Rendered { eye_x, .. } => Some(*eye_x),
            _ => None,
        })
        .unwrap();
    // goal 0.5, damping 0.05
    assert!((eye_x - 0.025).abs() < 1e-6, "eye_x={eye_x}");

    for i in 1..400 {
        host.advance(i as f64 * 16.0);
    }
    let background = composer.background().unwrap();
    let eye = background.borrow().scene.camera().position;
    assert!((eye.x - 0.5).abs() < 1e-3);
    assert!(eye.y.abs() < 1e-6);
}

#[test]
fn resize_reaches_background_renderer_and_camera() {
    let host = FakeHost::new(&[
        ("three-container", Surface::Usable),
        ("globe-canvas", Surface::Usable),
    ]);
    let composer = start(&host);

    let size = Viewport::new(1000.0, 500.0);
    composer.resized(size);

    let calls = host.calls.borrow();
    let resized: Vec<_> = calls
        .iter()
        .filter(|c| matches!(c, Call::Resized(..)))
        .collect();
    assert_eq!(resized, vec![&Call::Resized("three-container".into(), size)]);

    let background = composer.background().unwrap();
    assert_eq!(background.borrow().scene.camera().aspect, 2.0);
}

#[test]
fn dropping_the_composer_releases_every_loop() {
    let host = FakeHost::new(&[
        ("three-container", Surface::Usable),
        ("globe-canvas", Surface::Usable),
    ]);
    let composer = start(&host);
    assert_eq!(host.released.get(), 0);

    drop(composer);
    assert_eq!(host.released.get(), 2);
}

#[test]
fn globe_mounts_at_its_own_size() {
    let mut config = PageConfig::default();
    config.globe.size = 320;
    let host = FakeHost::new(&[("globe-canvas", Surface::Usable)]);
    let composer = Composer::start(&host, &config, &mut SmallRng::seed_from_u64(1));

    let globe = composer.globe().unwrap();
    let size = globe.borrow().scene.viewport();
    assert_eq!(size, Viewport::square(320));
    assert!(host
        .calls
        .borrow()
        .contains(&Call::Mounted("globe-canvas".into(), size)));
}
