//! Demo configuration.
//!
//! Every field has a default, so a config file only needs to name what it changes.
//! Relative paths inside a config file are resolved against the directory the file
//! lives in.

use std::path::{Path, PathBuf};

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::{
    frame::ObjectTransform,
    lighting::{Camera, Light, Material},
    shapes::MeshKind,
    uniforms::LIGHT_SLOTS,
};

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("could not read config {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid config {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Selects how the material reaches the fragment shader.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MaterialMode {
    /// Material colours are uploaded directly.
    Untextured,
    /// Diffuse and specular colours are sampled from per-object maps.
    #[default]
    Textured,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    pub title: String,
    pub width: u32,
    pub height: u32,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "My spinning cube".to_string(),
            width: 640,
            height: 480,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShaderPaths {
    pub vertex: PathBuf,
    pub fragment: PathBuf,
}

impl Default for ShaderPaths {
    fn default() -> Self {
        Self {
            vertex: PathBuf::from("assets/shaders/spinningcube_withlight_vs.glsl"),
            fragment: PathBuf::from("assets/shaders/spinningcube_withlight_fs.glsl"),
        }
    }
}

/// Placement and texture maps of one rendered object.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ObjectConfig {
    #[serde(flatten)]
    pub transform: ObjectTransform,
    pub diffuse_map: PathBuf,
    pub specular_map: PathBuf,
}

impl ObjectConfig {
    /// Placement and bundled maps `kind` uses when the config is silent.
    pub fn default_for(kind: MeshKind) -> Self {
        let x = match kind {
            MeshKind::Cube => -0.5,
            MeshKind::Tetrahedron => 0.5,
        };
        let name = kind.name();
        Self {
            transform: ObjectTransform::new(Vec3::new(x, 0.0, 0.0), vec![Vec3::Y, Vec3::X]),
            diffuse_map: PathBuf::from(format!("assets/textures/{name}_diffuse.png")),
            specular_map: PathBuf::from(format!("assets/textures/{name}_specular.png")),
        }
    }
}

/// An object entry as written in a config file. Missing fields fall back to
/// the defaults of the object the entry describes.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ObjectEntry {
    translation: Option<Vec3>,
    rotation_axes: Option<Vec<Vec3>>,
    diffuse_map: Option<PathBuf>,
    specular_map: Option<PathBuf>,
}

impl ObjectEntry {
    fn into_config(self, kind: MeshKind) -> ObjectConfig {
        let mut config = ObjectConfig::default_for(kind);
        if let Some(translation) = self.translation {
            config.transform.translation = translation;
        }
        if let Some(rotation_axes) = self.rotation_axes {
            config.transform.rotation_axes = rotation_axes;
        }
        if let Some(diffuse_map) = self.diffuse_map {
            config.diffuse_map = diffuse_map;
        }
        if let Some(specular_map) = self.specular_map {
            config.specular_map = specular_map;
        }
        config
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ObjectEntries {
    cube: ObjectEntry,
    tetrahedron: ObjectEntry,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "ObjectEntries")]
pub struct ObjectsConfig {
    pub cube: ObjectConfig,
    pub tetrahedron: ObjectConfig,
}

impl ObjectsConfig {
    /// Both objects in draw order.
    pub fn iter(&self) -> impl Iterator<Item = (MeshKind, &ObjectConfig)> {
        MeshKind::ALL.into_iter().zip([&self.cube, &self.tetrahedron])
    }
}

impl From<ObjectEntries> for ObjectsConfig {
    fn from(entries: ObjectEntries) -> Self {
        Self {
            cube: entries.cube.into_config(MeshKind::Cube),
            tetrahedron: entries.tetrahedron.into_config(MeshKind::Tetrahedron),
        }
    }
}

impl Default for ObjectsConfig {
    fn default() -> Self {
        ObjectEntries::default().into()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    /// One of `off`, `error`, `warn`, `info`, `debug`, `trace`.
    pub level: String,
    /// Optional file receiving a copy of every log line.
    pub file: Option<PathBuf>,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            file: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DemoConfig {
    pub window: WindowConfig,
    pub shaders: ShaderPaths,
    pub material_mode: MaterialMode,
    pub camera: Camera,
    pub lights: [Light; LIGHT_SLOTS],
    pub material: Material,
    pub objects: ObjectsConfig,
    pub logging: LogConfig,
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            window: WindowConfig::default(),
            shaders: ShaderPaths::default(),
            material_mode: MaterialMode::default(),
            camera: Camera::default(),
            lights: [
                Light::white(Vec3::ZERO),
                Light::white(Vec3::new(-1.0, 0.0, 0.0)),
            ],
            material: Material::default(),
            objects: ObjectsConfig::default(),
            logging: LogConfig::default(),
        }
    }
}

impl DemoConfig {
    /// Reads a JSON config file and resolves its relative paths against the
    /// file's directory.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let mut config = Self::from_json(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        if let Some(base) = path.parent() {
            config.resolve_paths(base);
        }
        for (kind, object) in config.objects.iter() {
            let skipped = object.transform.zero_length_axes();
            if skipped > 0 {
                log::warn!("{}: ignoring {skipped} zero-length rotation axes", kind.name());
            }
        }
        log::debug!("loaded config {}", path.display());
        Ok(config)
    }

    pub fn from_json(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(text)
    }

    /// Prefixes every relative file path with `base`.
    pub fn resolve_paths(&mut self, base: &Path) {
        let resolve = |path: &mut PathBuf| {
            if path.is_relative() {
                *path = base.join(&*path);
            }
        };
        resolve(&mut self.shaders.vertex);
        resolve(&mut self.shaders.fragment);
        for object in [&mut self.objects.cube, &mut self.objects.tetrahedron] {
            resolve(&mut object.diffuse_map);
            resolve(&mut object.specular_map);
        }
        if let Some(file) = self.logging.file.as_mut() {
            resolve(file);
        }
    }
}
