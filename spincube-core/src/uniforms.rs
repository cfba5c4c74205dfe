//! Uniform names shared with the GLSL sources, and the scene-wide uniform values
//! derived from the lights, material and camera.

use glam::Vec3;

use crate::{
    config::MaterialMode,
    lighting::{Camera, Light, Material},
};

pub const MODEL: &str = "model";
pub const VIEW: &str = "view";
pub const PROJECTION: &str = "projection";
pub const NORMAL_TO_WORLD: &str = "normal_to_world";
pub const VIEW_POS: &str = "view_pos";

/// Texture unit the diffuse map is bound to in textured mode.
pub const DIFFUSE_UNIT: u32 = 0;
/// Texture unit the specular map is bound to in textured mode.
pub const SPECULAR_UNIT: u32 = 1;

/// Number of light slots declared by the fragment shader.
pub const LIGHT_SLOTS: usize = 2;

/// Name of a field of `lights[slot]`.
pub fn light_field(slot: usize, field: &str) -> String {
    format!("lights[{slot}].{field}")
}

/// Name of a field of `material`.
pub fn material_field(field: &str) -> String {
    format!("material.{field}")
}

/// A scalar or vector uniform value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum UniformValue {
    Int(i32),
    Float(f32),
    Vec3(Vec3),
}

/// Lighting, material and camera uniforms, written once per frame after the
/// objects are drawn.
#[derive(Debug, Clone, PartialEq)]
pub struct SceneUniforms {
    values: Vec<(String, UniformValue)>,
}

impl SceneUniforms {
    pub fn new(
        lights: &[Light; LIGHT_SLOTS],
        material: &Material,
        mode: MaterialMode,
        camera: &Camera,
    ) -> Self {
        let mut values = Vec::with_capacity(LIGHT_SLOTS * 4 + 5);

        for (slot, light) in lights.iter().enumerate() {
            values.push((light_field(slot, "position"), UniformValue::Vec3(light.position)));
            values.push((light_field(slot, "ambient"), UniformValue::Vec3(light.ambient)));
            values.push((light_field(slot, "diffuse"), UniformValue::Vec3(light.diffuse)));
            values.push((light_field(slot, "specular"), UniformValue::Vec3(light.specular)));
        }

        match mode {
            MaterialMode::Untextured => {
                values.push((material_field("ambient"), UniformValue::Vec3(material.ambient)));
                values.push((material_field("diffuse"), UniformValue::Vec3(material.diffuse)));
                values.push((material_field("specular"), UniformValue::Vec3(material.specular)));
            }
            MaterialMode::Textured => {
                values.push((material_field("diffuse"), UniformValue::Int(DIFFUSE_UNIT as i32)));
                values.push((material_field("specular"), UniformValue::Int(SPECULAR_UNIT as i32)));
            }
        }
        values.push((material_field("shininess"), UniformValue::Float(material.shininess)));

        values.push((VIEW_POS.to_string(), UniformValue::Vec3(camera.position)));

        Self { values }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, UniformValue)> {
        self.values.iter().map(|(name, value)| (name.as_str(), *value))
    }

    pub fn get(&self, name: &str) -> Option<UniformValue> {
        self.iter().find(|(n, _)| *n == name).map(|(_, value)| value)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}
