//! wgpu render backend for the plume demo.
//!
//! Owns the graphics context, uploads generated meshes as GPU buffers and
//! draws them with the plume shader. Camera uses an orbit model.
//!
//! # Invariants
//! - The device is always passed explicitly; nothing holds a global context.
//! - Uploaded meshes are immutable; regeneration uploads a new [`GpuMesh`].
//! - Camera motion never touches mesh data.

mod camera;
mod context;
mod gpu;
mod shaders;

pub use camera::OrbitCamera;
pub use context::{GpuContext, GpuError};
pub use gpu::{GpuMesh, MeshUploader, PlumeRenderer, ShaderParams};
