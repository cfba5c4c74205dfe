//! Camera, light and material descriptors.
//!
//! These are plain values set up once at startup. The renderer only reads them.

use glam::{Mat4, Vec3};
use serde::{Deserialize, Serialize};

/// A fixed camera described by its position, looking direction and up vector.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Camera {
    pub position: Vec3,
    pub front: Vec3,
    pub up: Vec3,
}

impl Camera {
    /// Right-handed look-at matrix towards `position + front`.
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.position, self.position + self.front, self.up)
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            position: Vec3::new(0.0, 0.0, 3.0),
            front: Vec3::new(0.0, 0.0, -1.0),
            up: Vec3::Y,
        }
    }
}

/// A point light with Phong colour terms.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Light {
    pub position: Vec3,
    pub ambient: Vec3,
    pub diffuse: Vec3,
    pub specular: Vec3,
}

impl Light {
    /// A white light at `position` with the demo's default intensities.
    pub fn white(position: Vec3) -> Self {
        Self {
            position,
            ambient: Vec3::splat(0.2),
            diffuse: Vec3::splat(0.5),
            specular: Vec3::splat(1.0),
        }
    }
}

impl Default for Light {
    fn default() -> Self {
        Self::white(Vec3::ZERO)
    }
}

/// Surface reflectance shared by every rendered object.
///
/// With textured materials only `shininess` is used, the colours come from the
/// diffuse and specular maps instead.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Material {
    pub ambient: Vec3,
    pub diffuse: Vec3,
    pub specular: Vec3,
    pub shininess: f32,
}

impl Default for Material {
    fn default() -> Self {
        Self {
            ambient: Vec3::new(1.0, 0.5, 0.31),
            diffuse: Vec3::new(1.0, 0.5, 0.31),
            specular: Vec3::splat(0.5),
            shininess: 32.0,
        }
    }
}
