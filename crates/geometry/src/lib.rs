//! Procedural meshes: cube, icosphere, square.
//!
//! Generators are plain values built from their inputs. `build` produces
//! [`MeshBuffers`] on the CPU; `create` builds and hands the result to a
//! [`MeshSink`], which turns it into whatever the renderer draws.
//!
//! # Invariants
//! - Generators never mutate after construction; new inputs mean a new value.
//! - Building is deterministic: same inputs, bit-identical buffers.
//! - Index lists reference vertices by vertex position, never by float offset.

mod cube;
mod icosphere;
mod mesh;
mod square;

pub use cube::{Cube, Face};
pub use icosphere::Icosphere;
pub use mesh::{CpuSink, MeshBuffers, MeshSink};
pub use square::Square;

pub fn crate_info() -> &'static str {
    "plume-geometry v0.1.0"
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn crate_loads() {
        assert!(crate_info().contains("geometry"));
    }
}
