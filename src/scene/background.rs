//! Full-viewport ambient scene: a particle cloud, a handful of wireframe
//! icosahedra bobbing in front of the camera, and a thin ring behind them.
//! The camera eases towards the pointer.

use std::f32::consts::{FRAC_PI_2, PI};

use glam::{Vec2, Vec3};
use rand::Rng;

use super::composer::Animated;
use super::geometry::Geometry;
use super::graph::{Material, Node, NodeId, PerspectiveCamera, SceneGraph, Transform, Viewport};
use crate::config::BackgroundConfig;

const PARTICLE_COLOR: u32 = 0x00f0ff;
const PARTICLE_OPACITY: f32 = 0.8;
const SOLID_COLORS: [u32; 3] = [0x00f0ff, 0x8b5cf6, 0xff00aa];
const SOLID_OPACITY: f32 = 0.3;
const SOLID_DETAIL: u32 = 1;
/// Half extents of the box solids are scattered in, and its z offset.
const SOLID_BOX: Vec3 = Vec3::new(4.0, 2.0, 2.0);
const SOLID_BOX_Z: f32 = -2.0;
const RING_RADIUS: f32 = 2.0;
const RING_TUBE: f32 = 0.02;
const RING_OPACITY: f32 = 0.2;
const RING_Z: f32 = -3.0;

// Per-frame increments.
const PARTICLE_SPIN: Vec2 = Vec2::new(0.0002, 0.0005);
const SOLID_SPIN: Vec2 = Vec2::new(0.002, 0.003);
const SOLID_BOB: f64 = 0.001;
const RING_SPIN: f32 = 0.002;

#[derive(Debug, Clone, Copy)]
pub struct FloatingSolid {
    pub node: NodeId,
    pub radius: f32,
    /// Bobbing phase offset; the solid's index.
    pub phase: f64,
}

#[derive(Debug, Clone)]
pub struct BackgroundScene {
    graph: SceneGraph,
    camera: PerspectiveCamera,
    particles: NodeId,
    solids: Vec<FloatingSolid>,
    ring: NodeId,
    pointer: Vec2,
    damping: f32,
    pointer_scale: f32,
}

impl BackgroundScene {
    pub fn new<R: Rng>(config: &BackgroundConfig, viewport: Viewport, rng: &mut R) -> Self {
        let mut graph = SceneGraph::default();

        let spread = config.particle_spread;
        let positions: Vec<f32> = (0..config.particle_count * 3)
            .map(|_| (rng.gen::<f32>() - 0.5) * spread)
            .collect();
        let particles = graph.add(Node::new(
            Geometry::points(positions),
            Material::points(PARTICLE_COLOR, PARTICLE_OPACITY, config.particle_size),
            Transform::default(),
        ));

        let solids = (0..config.solid_count)
            .map(|i| {
                let radius = config.solid_radius_min
                    + rng.gen::<f32>() * (config.solid_radius_max - config.solid_radius_min);
                let position = Vec3::new(
                    (rng.gen::<f32>() - 0.5) * SOLID_BOX.x * 2.0,
                    (rng.gen::<f32>() - 0.5) * SOLID_BOX.y * 2.0,
                    (rng.gen::<f32>() - 0.5) * SOLID_BOX.z * 2.0 + SOLID_BOX_Z,
                );
                let rotation = Vec3::new(rng.gen::<f32>() * PI, rng.gen::<f32>() * PI, 0.0);
                let node = graph.add(Node::new(
                    Geometry::icosahedron(radius, SOLID_DETAIL).wireframe(),
                    Material::basic(SOLID_COLORS[i % SOLID_COLORS.len()], SOLID_OPACITY),
                    Transform { position, rotation },
                ));
                FloatingSolid {
                    node,
                    radius,
                    phase: i as f64,
                }
            })
            .collect();

        let ring = graph.add(Node::new(
            Geometry::torus(RING_RADIUS, RING_TUBE, 16, 100),
            Material::basic(PARTICLE_COLOR, RING_OPACITY),
            Transform {
                position: Vec3::new(0.0, 0.0, RING_Z),
                rotation: Vec3::new(FRAC_PI_2, 0.0, 0.0),
            },
        ));

        let mut camera = PerspectiveCamera::new(config.fov_deg, viewport.aspect());
        camera.position.z = config.camera_distance;

        Self {
            graph,
            camera,
            particles,
            solids,
            ring,
            pointer: Vec2::ZERO,
            damping: config.camera_damping,
            pointer_scale: config.pointer_scale,
        }
    }

    /// `ndc` is the pointer in `[-1, 1]`, y growing downwards.
    pub fn set_pointer(&mut self, ndc: Vec2) {
        self.pointer = ndc;
    }

    /// Where the camera is heading in the XY plane.
    pub fn camera_goal(&self) -> Vec2 {
        Vec2::new(self.pointer.x, -self.pointer.y) * self.pointer_scale
    }

    pub fn resize(&mut self, viewport: Viewport) {
        self.camera.aspect = viewport.aspect();
    }

    pub fn particles(&self) -> NodeId {
        self.particles
    }

    pub fn solids(&self) -> &[FloatingSolid] {
        &self.solids
    }

    pub fn ring(&self) -> NodeId {
        self.ring
    }
}

impl Animated for BackgroundScene {
    fn step(&mut self, now_secs: f64) {
        let particles = &mut self.graph.node_mut(self.particles).transform;
        particles.rotation.x += PARTICLE_SPIN.x;
        particles.rotation.y += PARTICLE_SPIN.y;

        for solid in &self.solids {
            let t = &mut self.graph.node_mut(solid.node).transform;
            t.rotation.x += SOLID_SPIN.x;
            t.rotation.y += SOLID_SPIN.y;
            t.position.y += ((now_secs + solid.phase).sin() * SOLID_BOB) as f32;
        }

        self.graph.node_mut(self.ring).transform.rotation.z += RING_SPIN;

        let goal = self.camera_goal();
        let eye = &mut self.camera.position;
        eye.x += (goal.x - eye.x) * self.damping;
        eye.y += (goal.y - eye.y) * self.damping;
        self.camera.target = Vec3::ZERO;
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
    use crate::scene::geometry::Primitive;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    fn scene(seed: u64) -> BackgroundScene {
        let mut rng = SmallRng::seed_from_u64(seed);
        BackgroundScene::new(&BackgroundConfig::default(), Viewport::new(1600.0, 900.0), &mut rng)
    }

    #[test]
    fn layout_respects_bounds() {
        let scene = scene(7);
        let particles = &scene.graph().node(scene.particles()).geometry;
        assert_eq!(particles.primitive, Primitive::Points);
        assert_eq!(particles.vertex_count(), 2000);
        assert!(particles.positions.iter().all(|c| (-5.0..=5.0).contains(c)));

        assert_eq!(scene.solids().len(), 5);
        for solid in scene.solids() {
            assert!((0.3..=0.8).contains(&solid.radius));
            let p = scene.graph().node(solid.node).transform.position;
            assert!(p.x.abs() <= 4.0 && p.y.abs() <= 2.0 && (-4.0..=0.0).contains(&p.z));
        }
        assert_eq!(scene.graph().len(), 7);
    }

    #[test]
    fn solids_cycle_through_palette() {
        let scene = scene(1);
        let colors: Vec<_> = scene
            .solids()
            .iter()
            .map(|s| scene.graph().node(s.node).material.color)
            .collect();
        assert_eq!(colors[0], colors[3]);
        assert_eq!(colors[1], colors[4]);
        assert_ne!(colors[0], colors[1]);
    }

    #[test]
    fn same_seed_same_layout() {
        let (a, b) = (scene(42), scene(42));
        for (x, y) in a.solids().iter().zip(b.solids()) {
            assert_eq!(x.radius, y.radius);
            assert_eq!(
                a.graph().node(x.node).transform,
                b.graph().node(y.node).transform
            );
        }
    }

    #[test]
    fn camera_closes_five_percent_per_frame() {
        let mut scene = scene(3);
        scene.set_pointer(Vec2::new(1.0, 1.0));
        assert_eq!(scene.camera_goal(), Vec2::new(0.5, -0.5));

        scene.step(0.0);
        let eye = scene.camera().position;
        assert!((eye.x - 0.025).abs() < 1e-6);
        assert!((eye.y + 0.025).abs() < 1e-6);
        assert_eq!(eye.z, 3.0);
        assert_eq!(scene.camera().target, Vec3::ZERO);

        for _ in 0..500 {
            scene.step(0.0);
        }
        let eye = scene.camera().position;
        assert!((eye.x - 0.5).abs() < 1e-4 && (eye.y + 0.5).abs() < 1e-4);
    }

    #[test]
    fn step_spins_everything() {
        let mut scene = scene(5);
        let before = scene.clone();
        scene.step(1.0);
        let rot = |s: &BackgroundScene, id: NodeId| s.graph().node(id).transform.rotation;
        assert!((rot(&scene, scene.particles()).y - rot(&before, before.particles()).y - 0.0005).abs() < 1e-7);
        assert!((rot(&scene, scene.ring()).z - rot(&before, before.ring()).z - 0.002).abs() < 1e-7);
        let solid = scene.solids()[2];
        let dy = scene.graph().node(solid.node).transform.position.y
            - before.graph().node(solid.node).transform.position.y;
        assert!((dy as f64 - (1.0f64 + 2.0).sin() * 0.001).abs() < 1e-6);
    }

    #[test]
    fn resize_tracks_aspect() {
        let mut scene = scene(9);
        scene.resize(Viewport::new(500.0, 1000.0));
        assert_eq!(scene.camera().aspect, 0.5);
    }
}
