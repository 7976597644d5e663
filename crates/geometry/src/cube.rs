use glam::{Vec3, Vec4};

use crate::mesh::{MeshBuffers, MeshSink};

/// One face of an axis-aligned cube: the axis it is perpendicular to and
/// which side of the center it sits on.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Face {
    pub axis: usize,
    pub dir: f32,
}

impl Face {
    /// Emission order. Index and winding correctness depend on it.
    pub const ALL: [Face; 6] = [
        Face { axis: 0, dir: -1.0 },
        Face { axis: 0, dir: 1.0 },
        Face { axis: 1, dir: -1.0 },
        Face { axis: 1, dir: 1.0 },
        Face { axis: 2, dir: -1.0 },
        Face { axis: 2, dir: 1.0 },
    ];

    pub fn normal(&self) -> Vec4 {
        let mut n = Vec4::ZERO;
        n[self.axis] = self.dir;
        n
    }
}

/// Axis-aligned cube of side 2 with flat per-face normals.
///
/// Each face gets its own four vertices so that every face carries a constant
/// normal; corners are not shared between faces.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Cube {
    center: Vec3,
}

impl Cube {
    pub const VERTEX_COUNT: usize = 24;
    pub const INDEX_COUNT: usize = 36;

    pub fn new(center: Vec3) -> Self {
        Self { center }
    }

    pub fn center(&self) -> Vec3 {
        self.center
    }

    /// Enumerate positions, normals and indices for all six faces.
    pub fn build(&self) -> MeshBuffers {
        let mut mesh = MeshBuffers::with_capacity(Self::VERTEX_COUNT, Self::INDEX_COUNT);

        for face in Face::ALL {
            let Face { axis, dir } = face;

            // Corners are ordered (-,-), (-,+), (+,-), (+,+), so 0-3 is the diagonal.
            let idx = mesh.vertex_count() as u32;
            mesh.indices
                .extend_from_slice(&[idx, idx + 1, idx + 3, idx, idx + 2, idx + 3]);

            let normal = face.normal();
            for a in [-1.0, 1.0] {
                for b in [-1.0, 1.0] {
                    let mut pos = self.center.extend(1.0);
                    pos[axis] += dir;
                    pos[(axis + 1) % 3] += a;
                    pos[(axis + 2) % 3] += b;
                    mesh.push_vertex(pos, normal);
                }
            }
        }

        mesh
    }

    /// Build the mesh and hand it to `sink`.
    pub fn create<S: MeshSink>(&self, sink: &mut S) -> S::Drawable {
        let mesh = self.build();
        let drawable = sink.upload(&mesh);
        tracing::debug!(center = ?self.center, count = mesh.count(), "created cube");
        drawable
    }
}
