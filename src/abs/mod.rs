//! This module contains the thin wrappers over SDL2 and OpenGL used by the demo:
//! application and window setup, shader programs, meshes and textures.

pub mod app;
pub mod mesh;
pub mod shader;
pub mod texture;

pub use app::*;
pub use mesh::*;
pub use shader::*;
pub use texture::*;
