//! The GL-free half of the spinning cube demo. This crate contains the
//! static mesh data, the lighting descriptors, the per-frame matrix math,
//! CPU-side texture preparation and the demo configuration, so that all of
//! it can be tested without a window or a GL context.

pub mod config;
pub mod frame;
pub mod lighting;
pub mod shapes;
pub mod texture_image;
pub mod uniforms;
pub mod viewport;

pub use config::{ConfigError, DemoConfig, MaterialMode};
pub use frame::{FrameMatrices, ObjectMatrices, ObjectTransform};
pub use lighting::{Camera, Light, Material};
pub use shapes::{MeshData, MeshKind};
pub use texture_image::{PixelFormat, TextureImage, TextureImageError};
pub use viewport::Viewport;
