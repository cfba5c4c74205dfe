//! Module for anything related to rendering the scene.

pub mod scene;

pub use scene::{SceneObject, SceneRenderer};
