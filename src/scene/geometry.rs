//! Procedural meshes. Positions are packed `xyz` triplets; indices are
//! 16-bit so every generator stays below 65536 vertices.

use std::collections::{BTreeSet, HashMap};
use std::f32::consts::PI;

use glam::Vec3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Primitive {
    Points,
    Lines,
    Triangles,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Geometry {
    pub positions: Vec<f32>,
    /// Empty for non-indexed draws.
    pub indices: Vec<u16>,
    pub primitive: Primitive,
}

impl Geometry {
    pub fn points(positions: Vec<f32>) -> Self {
        Self {
            positions,
            indices: Vec::new(),
            primitive: Primitive::Points,
        }
    }

    pub fn vertex_count(&self) -> usize {
        self.positions.len() / 3
    }

    pub fn vertex(&self, i: usize) -> Vec3 {
        Vec3::from_slice(&self.positions[i * 3..i * 3 + 3])
    }

    /// Unique edges of a triangle mesh as a line list.
    pub fn wireframe(&self) -> Self {
        if self.primitive != Primitive::Triangles {
            return self.clone();
        }
        let mut edges = BTreeSet::new();
        for tri in self.indices.chunks_exact(3) {
            for (a, b) in [(tri[0], tri[1]), (tri[1], tri[2]), (tri[2], tri[0])] {
                edges.insert((a.min(b), a.max(b)));
            }
        }
        Self {
            positions: self.positions.clone(),
            indices: edges.into_iter().flat_map(|(a, b)| [a, b]).collect(),
            primitive: Primitive::Lines,
        }
    }

    /// Geodesic sphere: an icosahedron whose faces are split in four
    /// `detail` times, every vertex pushed out to `radius`.
    pub fn icosahedron(radius: f32, detail: u32) -> Self {
        let t = (1.0 + 5f32.sqrt()) / 2.0;
        let base = [
            [-1.0, t, 0.0],
            [1.0, t, 0.0],
            [-1.0, -t, 0.0],
            [1.0, -t, 0.0],
            [0.0, -1.0, t],
            [0.0, 1.0, t],
            [0.0, -1.0, -t],
            [0.0, 1.0, -t],
            [t, 0.0, -1.0],
            [t, 0.0, 1.0],
            [-t, 0.0, -1.0],
            [-t, 0.0, 1.0],
        ];
        let mut vertices: Vec<Vec3> = base.iter().map(|v| Vec3::from_array(*v).normalize()).collect();
        let mut faces: Vec<[u16; 3]> = vec![
            [0, 11, 5], [0, 5, 1], [0, 1, 7], [0, 7, 10], [0, 10, 11],
            [1, 5, 9], [5, 11, 4], [11, 10, 2], [10, 7, 6], [7, 1, 8],
            [3, 9, 4], [3, 4, 2], [3, 2, 6], [3, 6, 8], [3, 8, 9],
            [4, 9, 5], [2, 4, 11], [6, 2, 10], [8, 6, 7], [9, 8, 1],
        ];

        for _ in 0..detail {
            let mut midpoints: HashMap<(u16, u16), u16> = HashMap::new();
            let mut midpoint = |a: u16, b: u16, vertices: &mut Vec<Vec3>| -> u16 {
                let key = (a.min(b), a.max(b));
                *midpoints.entry(key).or_insert_with(|| {
                    let m = (vertices[a as usize] + vertices[b as usize]).normalize();
                    vertices.push(m);
                    (vertices.len() - 1) as u16
                })
            };
            let mut next = Vec::with_capacity(faces.len() * 4);
            for [a, b, c] in faces {
                let ab = midpoint(a, b, &mut vertices);
                let bc = midpoint(b, c, &mut vertices);
                let ca = midpoint(c, a, &mut vertices);
                next.extend([[a, ab, ca], [b, bc, ab], [c, ca, bc], [ab, bc, ca]]);
            }
            faces = next;
        }

        Self {
            positions: vertices.iter().flat_map(|v| (*v * radius).to_array()).collect(),
            indices: faces.into_iter().flatten().collect(),
            primitive: Primitive::Triangles,
        }
    }

    /// Latitude/longitude sphere with poles on the Y axis.
    pub fn sphere(radius: f32, width_segments: u16, height_segments: u16) -> Self {
        let (w, h) = (width_segments.max(3), height_segments.max(2));
        let mut positions = Vec::with_capacity((w as usize + 1) * (h as usize + 1) * 3);
        for iy in 0..=h {
            let v = iy as f32 / h as f32;
            for ix in 0..=w {
                let u = ix as f32 / w as f32;
                positions.extend([
                    -radius * (u * 2.0 * PI).cos() * (v * PI).sin(),
                    radius * (v * PI).cos(),
                    radius * (u * 2.0 * PI).sin() * (v * PI).sin(),
                ]);
            }
        }

        let row = w + 1;
        let mut indices = Vec::new();
        for iy in 0..h {
            for ix in 0..w {
                let a = iy * row + ix + 1;
                let b = iy * row + ix;
                let c = (iy + 1) * row + ix;
                let d = (iy + 1) * row + ix + 1;
                if iy != 0 {
                    indices.extend([a, b, d]);
                }
                if iy != h - 1 {
                    indices.extend([b, c, d]);
                }
            }
        }

        Self {
            positions,
            indices,
            primitive: Primitive::Triangles,
        }
    }

    /// Ring of radius `radius` in the XY plane with a tube of radius `tube`.
    pub fn torus(radius: f32, tube: f32, radial_segments: u16, tubular_segments: u16) -> Self {
        let (radial, tubular) = (radial_segments.max(3), tubular_segments.max(3));
        let mut positions = Vec::with_capacity((radial as usize + 1) * (tubular as usize + 1) * 3);
        for j in 0..=radial {
            let v = j as f32 / radial as f32 * 2.0 * PI;
            for i in 0..=tubular {
                let u = i as f32 / tubular as f32 * 2.0 * PI;
                positions.extend([
                    (radius + tube * v.cos()) * u.cos(),
                    (radius + tube * v.cos()) * u.sin(),
                    tube * v.sin(),
                ]);
            }
        }

        let row = tubular + 1;
        let mut indices = Vec::new();
        for j in 1..=radial {
            for i in 1..=tubular {
                let a = row * j + i - 1;
                let b = row * (j - 1) + i - 1;
                let c = row * (j - 1) + i;
                let d = row * j + i;
                indices.extend([a, b, d, b, c, d]);
            }
        }

        Self {
            positions,
            indices,
            primitive: Primitive::Triangles,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn icosahedron_detail_one_is_a_geodesic_sphere() {
        let ico = Geometry::icosahedron(0.5, 1);
        assert_eq!(ico.vertex_count(), 42);
        assert_eq!(ico.indices.len() / 3, 80);
        for i in 0..ico.vertex_count() {
            assert!((ico.vertex(i).length() - 0.5).abs() < 1e-5);
        }
        assert_eq!(ico.wireframe().indices.len() / 2, 120);
    }

    #[test]
    fn sphere_vertices_sit_on_radius() {
        let sphere = Geometry::sphere(1.5, 32, 32);
        assert_eq!(sphere.vertex_count(), 33 * 33);
        assert!(sphere.indices.iter().all(|i| (*i as usize) < sphere.vertex_count()));
        for i in 0..sphere.vertex_count() {
            assert!((sphere.vertex(i).length() - 1.5).abs() < 1e-4);
        }
    }

    #[test]
    fn torus_stays_within_tube() {
        let torus = Geometry::torus(2.0, 0.02, 16, 100);
        assert_eq!(torus.vertex_count(), 17 * 101);
        assert_eq!(torus.indices.len(), 16 * 100 * 6);
        for i in 0..torus.vertex_count() {
            let v = torus.vertex(i);
            let ring = (v.x * v.x + v.y * v.y).sqrt();
            assert!((ring - 2.0).abs() <= 0.02 + 1e-5);
        }
    }

    #[test]
    fn wireframe_leaves_points_alone() {
        let points = Geometry::points(vec![0.0; 9]);
        assert_eq!(points.wireframe(), points);
    }
}
