//! The two decorative 3D scenes and the seams they are drawn through.

pub mod background;
pub mod composer;
pub mod geometry;
pub mod globe;
pub mod graph;

pub use background::{BackgroundScene, FloatingSolid};
pub use composer::{Animated, Composer, Renderer, SceneHost, SharedStage, Stage};
pub use geometry::{Geometry, Primitive};
pub use globe::GlobeScene;
pub use graph::{
    rgb, Blending, Material, Node, NodeId, PerspectiveCamera, SceneGraph, Transform, Viewport,
};
