//! Scene driver: tunable controls, mesh regeneration, frame statistics.
//!
//! # Invariants
//! - Meshes are rebuilt, never edited; a parameter change yields new meshes.
//! - The scene is generic over the upload target so it runs without a GPU.

mod controls;
mod scene;
mod stats;

pub use controls::{Controls, ControlsError};
pub use scene::Scene;
pub use stats::FrameStats;

pub fn crate_info() -> &'static str {
    "plume-scene v0.1.0"
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn crate_loads() {
        assert!(crate_info().contains("scene"));
    }
}
