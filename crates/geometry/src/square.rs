use glam::{Vec3, Vec4};

use crate::mesh::{MeshBuffers, MeshSink};

/// 2x2 quad in the XY plane facing +Z.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Square {
    center: Vec3,
}

impl Square {
    pub fn new(center: Vec3) -> Self {
        Self { center }
    }

    pub fn center(&self) -> Vec3 {
        self.center
    }

    pub fn build(&self) -> MeshBuffers {
        let mut mesh = MeshBuffers::with_capacity(4, 6);
        for (x, y) in [(-1.0, -1.0), (1.0, -1.0), (1.0, 1.0), (-1.0, 1.0)] {
            mesh.push_vertex(
                (self.center + Vec3::new(x, y, 0.0)).extend(1.0),
                Vec4::Z,
            );
        }
        mesh.indices.extend_from_slice(&[0, 1, 2, 0, 2, 3]);
        mesh
    }

    pub fn create<S: MeshSink>(&self, sink: &mut S) -> S::Drawable {
        let mesh = self.build();
        let drawable = sink.upload(&mesh);
        tracing::debug!(center = ?self.center, "created square");
        drawable
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quad_layout() {
        let mesh = Square::new(Vec3::new(0.0, 0.0, -2.0)).build();
        assert_eq!(mesh.vertex_count(), 4);
        assert_eq!(mesh.indices(), &[0, 1, 2, 0, 2, 3]);
        assert_eq!(mesh.positions()[2], Vec4::new(1.0, 1.0, -2.0, 1.0));
        assert!(mesh.normals().iter().all(|n| *n == Vec4::Z));
    }

    #[test]
    fn faces_plus_z() {
        let mesh = Square::new(Vec3::ZERO).build();
        let p = mesh.positions();
        for [a, b, c] in mesh.triangles() {
            let (a, b, c) = (
                p[a as usize].truncate(),
                p[b as usize].truncate(),
                p[c as usize].truncate(),
            );
            assert!((b - a).cross(c - a).z > 0.0);
        }
    }
}
