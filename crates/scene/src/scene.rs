use glam::Vec3;
use plume_geometry::{Cube, Icosphere, MeshSink, Square};

use crate::controls::Controls;

/// Where "Load Scene" puts the icosphere.
const LOAD_CENTER: Vec3 = Vec3::new(0.0, 1.5, 0.0);
const LOAD_RADIUS: f32 = 0.5;

/// Where a tessellation change puts the regenerated icosphere.
const REGEN_CENTER: Vec3 = Vec3::ZERO;
const REGEN_RADIUS: f32 = 1.0;

/// The demo's meshes, already uploaded through a [`MeshSink`].
///
/// Meshes are replaced wholesale when their inputs change; nothing is patched
/// in place.
pub struct Scene<D> {
    icosphere: D,
    cube: D,
    square: D,
    tesselations: u32,
}

impl<D> Scene<D> {
    /// Generate and upload every mesh.
    pub fn load<S>(sink: &mut S, controls: &Controls) -> Self
    where
        S: MeshSink<Drawable = D>,
    {
        let tesselations = controls.tesselations;
        let icosphere = Icosphere::new(LOAD_CENTER, LOAD_RADIUS, tesselations).create(sink);
        let cube = Cube::new(Vec3::ZERO).create(sink);
        let square = Square::new(Vec3::ZERO).create(sink);
        tracing::info!(tesselations, "scene loaded");

        Self {
            icosphere,
            cube,
            square,
            tesselations,
        }
    }

    /// Regenerate the icosphere if the tessellation level changed.
    /// Returns whether anything was rebuilt.
    pub fn sync<S>(&mut self, sink: &mut S, controls: &Controls) -> bool
    where
        S: MeshSink<Drawable = D>,
    {
        if controls.tesselations == self.tesselations {
            return false;
        }
        self.tesselations = controls.tesselations;
        self.icosphere =
            Icosphere::new(REGEN_CENTER, REGEN_RADIUS, self.tesselations).create(sink);
        tracing::info!(tesselations = self.tesselations, "icosphere regenerated");
        true
    }

    /// Tessellation level the current icosphere was built with.
    pub fn tesselations(&self) -> u32 {
        self.tesselations
    }

    /// Meshes to draw this frame, in draw order.
    pub fn drawables(&self, controls: &Controls) -> Vec<&D> {
        let mut out = vec![&self.icosphere];
        if controls.show_cube {
            out.push(&self.cube);
        }
        if controls.show_square {
            out.push(&self.square);
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use plume_geometry::{CpuSink, MeshBuffers};

    /// Counts uploads and remembers what was sent.
    #[derive(Default)]
    struct CountingSink {
        uploads: usize,
    }

    impl MeshSink for CountingSink {
        type Drawable = MeshBuffers;

        fn upload(&mut self, mesh: &MeshBuffers) -> MeshBuffers {
            self.uploads += 1;
            mesh.clone()
        }
    }

    #[test]
    fn load_uploads_every_mesh() {
        let mut sink = CountingSink::default();
        let scene = Scene::load(&mut sink, &Controls::default());
        assert_eq!(sink.uploads, 3);
        assert_eq!(scene.tesselations(), 5);
    }

    #[test]
    fn load_places_small_icosphere_above_origin() {
        let controls = Controls {
            tesselations: 1,
            ..Controls::default()
        };
        let scene = Scene::load(&mut CpuSink, &controls);
        let sphere = scene.drawables(&controls)[0];
        assert_eq!(sphere, &Icosphere::new(LOAD_CENTER, LOAD_RADIUS, 1).build());
    }

    #[test]
    fn sync_without_change_is_noop() {
        let mut sink = CountingSink::default();
        let controls = Controls::default();
        let mut scene = Scene::load(&mut sink, &controls);
        assert!(!scene.sync(&mut sink, &controls));
        assert_eq!(sink.uploads, 3);
    }

    #[test]
    fn sync_regenerates_on_tesselation_change() {
        let mut sink = CountingSink::default();
        let mut controls = Controls::default();
        let mut scene = Scene::load(&mut sink, &controls);

        controls.tesselations = 2;
        assert!(scene.sync(&mut sink, &controls));
        assert_eq!(sink.uploads, 4);
        assert_eq!(scene.tesselations(), 2);

        let sphere = scene.drawables(&controls)[0];
        assert_eq!(sphere, &Icosphere::new(REGEN_CENTER, REGEN_RADIUS, 2).build());

        // Second sync with the same level does nothing.
        assert!(!scene.sync(&mut sink, &controls));
        assert_eq!(sink.uploads, 4);
    }

    #[test]
    fn drawables_follow_visibility() {
        let mut controls = Controls::default();
        let scene = Scene::load(&mut CpuSink, &controls);
        assert_eq!(scene.drawables(&controls).len(), 1);

        controls.show_cube = true;
        let drawn = scene.drawables(&controls);
        assert_eq!(drawn.len(), 2);
        assert_eq!(drawn[1], &Cube::new(Vec3::ZERO).build());

        controls.show_square = true;
        assert_eq!(scene.drawables(&controls).len(), 3);
    }
}
