use std::rc::Rc;

use glam::{EulerRot, Mat4, Quat, Vec3};

use super::geometry::Geometry;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
}

impl Viewport {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    pub fn square(size: u32) -> Self {
        Self::new(size as f64, size as f64)
    }

    pub fn aspect(&self) -> f32 {
        if self.height <= 0.0 {
            1.0
        } else {
            (self.width / self.height) as f32
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Blending {
    Normal,
    Additive,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Material {
    pub color: [f32; 3],
    pub opacity: f32,
    pub blending: Blending,
    /// World-space size; only meaningful for point geometry.
    pub point_size: f32,
}

impl Material {
    pub fn basic(hex: u32, opacity: f32) -> Self {
        Self {
            color: rgb(hex),
            opacity,
            blending: Blending::Normal,
            point_size: 1.0,
        }
    }

    pub fn points(hex: u32, opacity: f32, size: f32) -> Self {
        Self {
            color: rgb(hex),
            opacity,
            blending: Blending::Additive,
            point_size: size,
        }
    }

    pub fn is_transparent(&self) -> bool {
        self.opacity < 1.0 || self.blending == Blending::Additive
    }
}

/// `0xRRGGBB` to linear-ish float triplet.
pub fn rgb(hex: u32) -> [f32; 3] {
    [
        ((hex >> 16) & 0xff) as f32 / 255.0,
        ((hex >> 8) & 0xff) as f32 / 255.0,
        (hex & 0xff) as f32 / 255.0,
    ]
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Transform {
    pub position: Vec3,
    /// Euler angles in radians, applied in XYZ order.
    pub rotation: Vec3,
}

impl Transform {
    pub fn at(position: Vec3) -> Self {
        Self {
            position,
            rotation: Vec3::ZERO,
        }
    }

    pub fn matrix(&self) -> Mat4 {
        let r = self.rotation;
        Mat4::from_rotation_translation(Quat::from_euler(EulerRot::XYZ, r.x, r.y, r.z), self.position)
    }
}

#[derive(Debug, Clone)]
pub struct Node {
    pub geometry: Rc<Geometry>,
    pub material: Material,
    pub transform: Transform,
}

impl Node {
    pub fn new(geometry: Geometry, material: Material, transform: Transform) -> Self {
        Self {
            geometry: Rc::new(geometry),
            material,
            transform,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(usize);

/// Flat list of renderable nodes, drawn in insertion order.
#[derive(Debug, Clone, Default)]
pub struct SceneGraph {
    nodes: Vec<Node>,
}

impl SceneGraph {
    pub fn add(&mut self, node: Node) -> NodeId {
        self.nodes.push(node);
        NodeId(self.nodes.len() - 1)
    }

    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.0]
    }

    pub fn node_mut(&mut self, id: NodeId) -> &mut Node {
        &mut self.nodes[id.0]
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PerspectiveCamera {
    pub fov_y_deg: f32,
    pub aspect: f32,
    pub near: f32,
    pub far: f32,
    pub position: Vec3,
    pub target: Vec3,
}

impl PerspectiveCamera {
    pub fn new(fov_y_deg: f32, aspect: f32) -> Self {
        Self {
            fov_y_deg,
            aspect,
            near: 0.1,
            far: 1000.0,
            position: Vec3::ZERO,
            target: Vec3::ZERO,
        }
    }

    pub fn projection(&self) -> Mat4 {
        Mat4::perspective_rh_gl(self.fov_y_deg.to_radians(), self.aspect, self.near, self.far)
    }

    pub fn view(&self) -> Mat4 {
        Mat4::look_at_rh(self.position, self.target, Vec3::Y)
    }
}
