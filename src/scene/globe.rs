//! Small fixed-size globe with a location marker that turns with it.

use glam::{Quat, Vec3};

use super::composer::Animated;
use super::geometry::Geometry;
use super::graph::{Material, Node, NodeId, PerspectiveCamera, SceneGraph, Transform, Viewport};
use crate::config::GlobeConfig;

const GLOBE_COLOR: u32 = 0x00f0ff;
const GLOBE_OPACITY: f32 = 0.3;
const MARKER_COLOR: u32 = 0xff00aa;
const MARKER_RADIUS: f32 = 0.05;
const FOV_DEG: f32 = 75.0;

#[derive(Debug, Clone)]
pub struct GlobeScene {
    graph: SceneGraph,
    camera: PerspectiveCamera,
    globe: NodeId,
    marker: NodeId,
    rate: f32,
    viewport: Viewport,
}

impl GlobeScene {
    pub fn new(config: &GlobeConfig) -> Self {
        let mut graph = SceneGraph::default();
        let globe = graph.add(Node::new(
            Geometry::sphere(config.radius, 32, 32).wireframe(),
            Material::basic(GLOBE_COLOR, GLOBE_OPACITY),
            Transform::default(),
        ));
        let marker = graph.add(Node::new(
            Geometry::sphere(MARKER_RADIUS, 8, 8),
            Material::basic(MARKER_COLOR, 1.0),
            Transform::at(Vec3::from_array(config.marker)),
        ));

        let mut camera = PerspectiveCamera::new(FOV_DEG, 1.0);
        camera.position.z = config.camera_distance;

        Self {
            graph,
            camera,
            globe,
            marker,
            rate: config.rotation_rate,
            viewport: Viewport::square(config.size),
        }
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    /// Accumulated rotation of the globe around Y, in radians.
    pub fn globe_rotation(&self) -> f32 {
        self.graph.node(self.globe).transform.rotation.y
    }

    pub fn marker_position(&self) -> Vec3 {
        self.graph.node(self.marker).transform.position
    }
}

impl Animated for GlobeScene {
    fn step(&mut self, _now_secs: f64) {
        self.graph.node_mut(self.globe).transform.rotation.y += self.rate;
        // The marker turns about the same axis by the same angle so it stays
        // pinned to the globe surface.
        let marker = &mut self.graph.node_mut(self.marker).transform.position;
        *marker = Quat::from_rotation_y(self.rate) * *marker;
    }

    fn graph(&self) -> &SceneGraph {
        &self.graph
    }

    fn camera(&self) -> &PerspectiveCamera {
        &self.camera
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn marker_stays_locked_to_globe() {
        let config = GlobeConfig::default();
        let start = Vec3::from_array(config.marker);
        let mut scene = GlobeScene::new(&config);
        for n in 1..=1000 {
            scene.step(n as f64);
            if n % 100 == 0 {
                let expected = Quat::from_rotation_y(scene.globe_rotation()) * start;
                assert!(
                    scene.marker_position().abs_diff_eq(expected, 1e-3),
                    "step {n}: {:?} vs {:?}",
                    scene.marker_position(),
                    expected
                );
            }
        }
        assert!((scene.globe_rotation() - 5.0).abs() < 1e-3);
        // Height and distance from the axis never change.
        let radial = |v: Vec3| (v.x * v.x + v.z * v.z).sqrt();
        let p = scene.marker_position();
        assert!((p.y - 0.2).abs() < 1e-4);
        assert!((radial(p) - radial(start)).abs() < 1e-3);
    }

    #[test]
    fn globe_is_a_square_surface() {
        let scene = GlobeScene::new(&GlobeConfig::default());
        assert_eq!(scene.viewport(), Viewport::square(500));
        assert_eq!(scene.camera().aspect, 1.0);
        assert_eq!(scene.camera().position, Vec3::new(0.0, 0.0, 4.0));
    }
}
