//! Meshes: vertex/index arrays handed to the renderer each frame.
//!
//! A [`Mesh`] owns its vertices and indices. Its transforms are applied
//! directly to the vertex array, so they accumulate: calling
//! [`Mesh::rotate`] every frame with a small angle spins the mesh.

use std::fmt;
use std::path::Path;

use crate::math::vec3::Vec3;

/// A mesh vertex: position plus a normal that is unit length by convention.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Vertex {
    pub position: Vec3,
    pub normal: Vec3,
}

impl Vertex {
    pub const fn new(position: Vec3, normal: Vec3) -> Self {
        Self { position, normal }
    }
}

const fn v(p: [f32; 3], n: [f32; 3]) -> Vertex {
    Vertex::new(Vec3::new(p[0], p[1], p[2]), Vec3::new(n[0], n[1], n[2]))
}

// Each face has its own four vertices so normals stay flat per face.
pub const CUBE_VERTICES: [Vertex; 24] = [
    // Front
    v([-1.0, -1.0, 1.0], [0.0, 0.0, 1.0]),
    v([1.0, -1.0, 1.0], [0.0, 0.0, 1.0]),
    v([1.0, 1.0, 1.0], [0.0, 0.0, 1.0]),
    v([-1.0, 1.0, 1.0], [0.0, 0.0, 1.0]),
    // Back
    v([-1.0, -1.0, -1.0], [0.0, 0.0, -1.0]),
    v([-1.0, 1.0, -1.0], [0.0, 0.0, -1.0]),
    v([1.0, 1.0, -1.0], [0.0, 0.0, -1.0]),
    v([1.0, -1.0, -1.0], [0.0, 0.0, -1.0]),
    // Left
    v([-1.0, -1.0, -1.0], [-1.0, 0.0, 0.0]),
    v([-1.0, -1.0, 1.0], [-1.0, 0.0, 0.0]),
    v([-1.0, 1.0, 1.0], [-1.0, 0.0, 0.0]),
    v([-1.0, 1.0, -1.0], [-1.0, 0.0, 0.0]),
    // Right
    v([1.0, -1.0, -1.0], [1.0, 0.0, 0.0]),
    v([1.0, 1.0, -1.0], [1.0, 0.0, 0.0]),
    v([1.0, 1.0, 1.0], [1.0, 0.0, 0.0]),
    v([1.0, -1.0, 1.0], [1.0, 0.0, 0.0]),
    // Top
    v([-1.0, 1.0, -1.0], [0.0, 1.0, 0.0]),
    v([1.0, 1.0, -1.0], [0.0, 1.0, 0.0]),
    v([1.0, 1.0, 1.0], [0.0, 1.0, 0.0]),
    v([-1.0, 1.0, 1.0], [0.0, 1.0, 0.0]),
    // Bottom
    v([-1.0, -1.0, -1.0], [0.0, -1.0, 0.0]),
    v([-1.0, -1.0, 1.0], [0.0, -1.0, 0.0]),
    v([1.0, -1.0, 1.0], [0.0, -1.0, 0.0]),
    v([1.0, -1.0, -1.0], [0.0, -1.0, 0.0]),
];

pub const CUBE_INDICES: [u32; 36] = [
    0, 2, 1, 0, 3, 2, // Front
    4, 6, 5, 4, 7, 6, // Back
    8, 10, 9, 8, 11, 10, // Left
    12, 14, 13, 12, 15, 14, // Right
    16, 17, 18, 16, 18, 19, // Top
    20, 21, 22, 20, 22, 23, // Bottom
];

pub const QUAD_VERTICES: [Vertex; 4] = [
    v([-1.0, 1.0, 0.0], [0.0, 0.0, 1.0]),
    v([1.0, 1.0, 0.0], [0.0, 0.0, 1.0]),
    v([1.0, -1.0, 0.0], [0.0, 0.0, 1.0]),
    v([-1.0, -1.0, 0.0], [0.0, 0.0, 1.0]),
];

pub const QUAD_INDICES: [u32; 6] = [0, 1, 2, 0, 2, 3];

#[derive(Debug)]
pub enum LoadError {
    Obj(tobj::LoadError),
    /// The file parsed but contained no triangles.
    Empty,
}

impl fmt::Display for LoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LoadError::Obj(e) => write!(f, "OBJ error: {}", e),
            LoadError::Empty => write!(f, "OBJ file contains no triangles"),
        }
    }
}

impl std::error::Error for LoadError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            LoadError::Obj(e) => Some(e),
            LoadError::Empty => None,
        }
    }
}

impl From<tobj::LoadError> for LoadError {
    fn from(err: tobj::LoadError) -> Self {
        LoadError::Obj(err)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Mesh {
    vertices: Vec<Vertex>,
    indices: Vec<u32>,
    position: Vec3,
    rotation: Vec3,
    scale: Vec3,
}

impl Mesh {
    pub fn new(vertices: Vec<Vertex>, indices: Vec<u32>) -> Self {
        Self {
            vertices,
            indices,
            position: Vec3::ZERO,
            rotation: Vec3::ZERO,
            scale: Vec3::ONE,
        }
    }

    /// A 2x2x2 cube centred on the origin with flat per-face normals.
    pub fn cube() -> Self {
        Self::new(CUBE_VERTICES.to_vec(), CUBE_INDICES.to_vec())
    }

    /// A 2x2 quad in the XY plane facing +Z.
    pub fn quad() -> Self {
        Self::new(QUAD_VERTICES.to_vec(), QUAD_INDICES.to_vec())
    }

    /// Loads every model in an OBJ file into a single mesh.
    ///
    /// Faces are triangulated. When the file has no normals, each vertex gets
    /// the normalized sum of its adjacent face normals. OBJ faces wind
    /// counter-clockwise when seen from outside; they are flipped here to match
    /// the renderer's front-face convention (see [`CUBE_INDICES`]).
    pub fn from_obj<P: AsRef<Path>>(path: P) -> Result<Self, LoadError> {
        let options = tobj::LoadOptions {
            triangulate: true,
            single_index: true,
            ..Default::default()
        };
        let (models, _materials) = tobj::load_obj(path.as_ref(), &options)?;

        let mut vertices = Vec::new();
        let mut indices = Vec::new();
        for model in &models {
            let m = &model.mesh;
            let base = vertices.len() as u32;
            let has_normals = m.normals.len() == m.positions.len();
            for (i, p) in m.positions.chunks_exact(3).enumerate() {
                let normal = if has_normals {
                    Vec3::new(m.normals[3 * i], m.normals[3 * i + 1], m.normals[3 * i + 2])
                } else {
                    Vec3::ZERO
                };
                vertices.push(Vertex::new(Vec3::new(p[0], p[1], p[2]), normal));
            }

            let start = indices.len();
            for face in m.indices.chunks_exact(3) {
                indices.extend_from_slice(&[base + face[0], base + face[2], base + face[1]]);
            }
            if !has_normals {
                accumulate_face_normals(&mut vertices, &indices[start..]);
            }
        }

        if indices.is_empty() {
            return Err(LoadError::Empty);
        }
        log::debug!(
            "loaded OBJ {}: {} vertices, {} triangles",
            path.as_ref().display(),
            vertices.len(),
            indices.len() / 3
        );
        Ok(Self::new(vertices, indices))
    }

    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    pub fn indices(&self) -> &[u32] {
        &self.indices
    }

    pub fn indices_count(&self) -> usize {
        self.indices.len()
    }

    /// Total translation applied so far.
    pub fn position(&self) -> Vec3 {
        self.position
    }

    /// Total Euler rotation (degrees) applied so far, summed per axis.
    pub fn rotation(&self) -> Vec3 {
        self.rotation
    }

    /// Product of all scale factors applied so far.
    pub fn scale(&self) -> Vec3 {
        self.scale
    }

    /// Adds `offset` to every vertex position.
    pub fn translate(&mut self, offset: Vec3) -> &mut Self {
        self.position += offset;
        for vertex in &mut self.vertices {
            vertex.position += offset;
        }
        self
    }

    /// Rotates positions and normals about the world origin by Euler angles in
    /// degrees, X then Y then Z.
    pub fn rotate(&mut self, degrees: Vec3) -> &mut Self {
        self.rotation += degrees;
        for vertex in &mut self.vertices {
            vertex.position = vertex.position.rotate_about(Vec3::ZERO, degrees);
            vertex.normal = vertex.normal.rotate_about(Vec3::ZERO, degrees);
        }
        self
    }

    /// Multiplies every vertex position component-wise by `factor`.
    ///
    /// Normals are left alone, so non-uniform factors skew lighting slightly.
    pub fn scale_by(&mut self, factor: Vec3) -> &mut Self {
        self.scale = self.scale.mul_elem(factor);
        for vertex in &mut self.vertices {
            vertex.position = vertex.position.mul_elem(factor);
        }
        self
    }
}

/// Sums face normals into each vertex of `indices`, then normalizes.
fn accumulate_face_normals(vertices: &mut [Vertex], indices: &[u32]) {
    for face in indices.chunks_exact(3) {
        let [a, b, c] = [face[0], face[1], face[2]].map(|i| vertices[i as usize].position);
        // Indices are already in renderer winding, which is clockwise seen
        // from outside, so the outward normal is (c - a) x (b - a).
        let normal = (c - a).cross(b - a);
        for &i in face {
            vertices[i as usize].normal += normal;
        }
    }
    for &i in indices {
        let vertex = &mut vertices[i as usize];
        if vertex.normal.magnitude() > 0.0 {
            vertex.normal = vertex.normal.normalize();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::io::Write;

    #[test]
    fn primitives_have_whole_triangles() {
        let cube = Mesh::cube();
        assert_eq!(cube.vertices().len(), 24);
        assert_eq!(cube.indices_count(), 36);
        assert!(cube
            .indices()
            .iter()
            .all(|&i| (i as usize) < cube.vertices().len()));
        assert_eq!(Mesh::quad().indices_count() % 3, 0);
    }

    #[test]
    fn translate_accumulates() {
        let mut quad = Mesh::quad();
        quad.translate(Vec3::new(1.0, 0.0, 0.0))
            .translate(Vec3::new(1.0, 0.0, 0.0));
        assert_eq!(quad.position(), Vec3::new(2.0, 0.0, 0.0));
        assert_eq!(quad.vertices()[0].position, Vec3::new(1.0, 1.0, 0.0));
    }

    #[test]
    fn rotate_turns_normals_too() {
        let mut quad = Mesh::quad();
        quad.rotate(Vec3::new(0.0, 90.0, 0.0));
        let n = quad.vertices()[0].normal;
        assert_relative_eq!(n.x, 1.0, epsilon = 1e-6);
        assert_relative_eq!(n.z, 0.0, epsilon = 1e-6);
        assert_eq!(quad.rotation(), Vec3::new(0.0, 90.0, 0.0));
    }

    #[test]
    fn scale_is_component_wise_on_positions_only() {
        let mut cube = Mesh::cube();
        cube.scale_by(Vec3::new(1.0, 0.8, 0.6));
        let first = cube.vertices()[0];
        assert_relative_eq!(first.position.y, -0.8);
        assert_relative_eq!(first.position.z, 0.6);
        assert_eq!(first.normal, Vec3::new(0.0, 0.0, 1.0));
        assert_eq!(cube.scale(), Vec3::new(1.0, 0.8, 0.6));
    }

    #[test]
    fn obj_without_normals_gets_outward_normals() {
        let path = std::env::temp_dir().join(format!("glyphraster-tri-{}.obj", std::process::id()));
        let mut file = std::fs::File::create(&path).unwrap();
        // Counter-clockwise seen from +Z.
        writeln!(file, "v 0 0 0\nv 1 0 0\nv 0 1 0\nf 1 2 3").unwrap();
        drop(file);

        let mesh = Mesh::from_obj(&path).unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(mesh.indices(), &[0, 2, 1]);
        for vertex in mesh.vertices() {
            assert_relative_eq!(vertex.normal.z, 1.0, epsilon = 1e-6);
        }
    }

    #[test]
    fn missing_obj_is_an_error() {
        let err = Mesh::from_obj("/definitely/not/here.obj").unwrap_err();
        assert!(matches!(err, LoadError::Obj(_)));
    }
}
