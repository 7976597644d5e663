use std::collections::HashMap;

use glam::{Vec3, Vec4};

use crate::mesh::{MeshBuffers, MeshSink};

/// Sphere approximated by a repeatedly subdivided icosahedron.
///
/// Vertices are shared between adjacent triangles, so normals are smooth.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Icosphere {
    center: Vec3,
    radius: f32,
    subdivisions: u32,
}

impl Icosphere {
    /// Level 8 already yields 655k vertices; higher levels are clamped.
    pub const MAX_SUBDIVISIONS: u32 = 8;

    pub fn new(center: Vec3, radius: f32, subdivisions: u32) -> Self {
        Self {
            center,
            radius,
            subdivisions: subdivisions.min(Self::MAX_SUBDIVISIONS),
        }
    }

    pub fn center(&self) -> Vec3 {
        self.center
    }

    pub fn radius(&self) -> f32 {
        self.radius
    }

    pub fn subdivisions(&self) -> u32 {
        self.subdivisions
    }

    pub fn vertex_count(subdivisions: u32) -> usize {
        10 * 4usize.pow(subdivisions) + 2
    }

    pub fn triangle_count(subdivisions: u32) -> usize {
        20 * 4usize.pow(subdivisions)
    }

    pub fn build(&self) -> MeshBuffers {
        let (units, triangles) = unit_icosphere(self.subdivisions);

        let mut mesh = MeshBuffers::with_capacity(units.len(), triangles.len() * 3);
        for unit in &units {
            mesh.push_vertex(
                (self.center + *unit * self.radius).extend(1.0),
                unit.extend(0.0),
            );
        }
        mesh.indices = triangles.into_iter().flatten().collect();
        mesh
    }

    pub fn create<S: MeshSink>(&self, sink: &mut S) -> S::Drawable {
        let mesh = self.build();
        let drawable = sink.upload(&mesh);
        tracing::debug!(
            subdivisions = self.subdivisions,
            vertices = mesh.vertex_count(),
            count = mesh.count(),
            "created icosphere"
        );
        drawable
    }
}

/// Unit-sphere vertices and counter-clockwise triangles.
fn unit_icosphere(subdivisions: u32) -> (Vec<Vec3>, Vec<[u32; 3]>) {
    let t = (1.0 + 5.0_f32.sqrt()) / 2.0;

    #[rustfmt::skip]
    let mut vertices: Vec<Vec3> = [
        [-1.0,  t,  0.0], [ 1.0,  t,  0.0], [-1.0, -t,  0.0], [ 1.0, -t,  0.0],
        [ 0.0, -1.0,  t], [ 0.0,  1.0,  t], [ 0.0, -1.0, -t], [ 0.0,  1.0, -t],
        [ t,  0.0, -1.0], [ t,  0.0,  1.0], [-t,  0.0, -1.0], [-t,  0.0,  1.0],
    ]
    .into_iter()
    .map(|v| Vec3::from_array(v).normalize())
    .collect();

    #[rustfmt::skip]
    let mut triangles: Vec<[u32; 3]> = vec![
        [0, 11, 5], [0, 5, 1], [0, 1, 7], [0, 7, 10], [0, 10, 11],
        [1, 5, 9], [5, 11, 4], [11, 10, 2], [10, 7, 6], [7, 1, 8],
        [3, 9, 4], [3, 4, 2], [3, 2, 6], [3, 6, 8], [3, 8, 9],
        [4, 9, 5], [2, 4, 11], [6, 2, 10], [8, 6, 7], [9, 8, 1],
    ];

    for _ in 0..subdivisions {
        let mut midpoints: HashMap<(u32, u32), u32> = HashMap::new();
        let mut next = Vec::with_capacity(triangles.len() * 4);

        for [a, b, c] in triangles {
            let ab = midpoint(&mut vertices, &mut midpoints, a, b);
            let bc = midpoint(&mut vertices, &mut midpoints, b, c);
            let ca = midpoint(&mut vertices, &mut midpoints, c, a);
            next.push([a, ab, ca]);
            next.push([b, bc, ab]);
            next.push([c, ca, bc]);
            next.push([ab, bc, ca]);
        }
        triangles = next;
    }

    (vertices, triangles)
}

/// Index of the projected midpoint of edge `a`-`b`, created once per edge.
fn midpoint(
    vertices: &mut Vec<Vec3>,
    cache: &mut HashMap<(u32, u32), u32>,
    a: u32,
    b: u32,
) -> u32 {
    let key = (a.min(b), a.max(b));
    *cache.entry(key).or_insert_with(|| {
        let mid = (vertices[a as usize] + vertices[b as usize]).normalize();
        vertices.push(mid);
        (vertices.len() - 1) as u32
    })
}
