//! The scene renderer.
//!
//! [`SceneRenderer`] owns every GPU resource of the demo together with the camera,
//! lights and material, and draws the cube and the tetrahedron once per call to
//! [`SceneRenderer::render`].

use std::sync::Arc;

use glow::HasContext;
use spincube_core::{
    Camera, DemoConfig, FrameMatrices, MaterialMode, MeshKind, ObjectTransform, Viewport,
    config::ObjectConfig,
    uniforms::{self, SceneUniforms},
};

use crate::abs::{Mesh, ShaderProgram, Texture, load_texture};

/// One drawable object: its mesh, its maps and where it sits.
pub struct SceneObject {
    kind: MeshKind,
    mesh: Mesh,
    diffuse_map: Texture,
    specular_map: Texture,
    transform: ObjectTransform,
}

impl SceneObject {
    /// Uploads the mesh of `kind` and loads both texture maps named by `config`.
    pub fn load(
        gl: &Arc<glow::Context>,
        kind: MeshKind,
        config: &ObjectConfig,
    ) -> Result<Self, String> {
        let mesh = Mesh::new(gl, kind.data())?;
        let diffuse_map = load_texture(gl, &config.diffuse_map)?;
        let specular_map = load_texture(gl, &config.specular_map)?;
        if diffuse_map.is_empty() || specular_map.is_empty() {
            log::warn!("{} is drawn with a blank texture map", kind.name());
        }

        Ok(Self {
            kind,
            mesh,
            diffuse_map,
            specular_map,
            transform: config.transform.clone(),
        })
    }

    pub fn kind(&self) -> MeshKind {
        self.kind
    }

    pub fn vertex_count(&self) -> usize {
        self.mesh.vertex_count()
    }

    pub fn transform(&self) -> &ObjectTransform {
        &self.transform
    }
}

/// Draws the two objects under one shared shader program.
pub struct SceneRenderer {
    gl: Arc<glow::Context>,
    program: ShaderProgram,
    objects: [SceneObject; 2],
    camera: Camera,
    scene_uniforms: SceneUniforms,
    material_mode: MaterialMode,
    viewport: Viewport,
}

impl SceneRenderer {
    /// Creates every GPU resource the scene needs and configures depth testing.
    ///
    /// Texture files that fail to load are replaced by blank textures, see
    /// [`load_texture`]. Other errors mean the GL could not allocate objects.
    pub fn new(
        gl: &Arc<glow::Context>,
        program: ShaderProgram,
        config: &DemoConfig,
        viewport: Viewport,
    ) -> Result<Self, String> {
        unsafe {
            gl.enable(glow::DEPTH_TEST);
            gl.depth_func(glow::LESS);
        }

        let objects = [
            SceneObject::load(gl, MeshKind::Cube, &config.objects.cube)?,
            SceneObject::load(gl, MeshKind::Tetrahedron, &config.objects.tetrahedron)?,
        ];

        let scene_uniforms = SceneUniforms::new(
            &config.lights,
            &config.material,
            config.material_mode,
            &config.camera,
        );

        // Resolve the per-object matrix uniforms up front.
        for name in [
            uniforms::MODEL,
            uniforms::VIEW,
            uniforms::PROJECTION,
            uniforms::NORMAL_TO_WORLD,
        ] {
            program.location(name);
        }

        Ok(Self {
            gl: Arc::clone(gl),
            program,
            objects,
            camera: config.camera,
            scene_uniforms,
            material_mode: config.material_mode,
            viewport,
        })
    }

    /// Draws one frame for the given elapsed time in seconds.
    pub fn render(&self, current_time: f64) {
        let frame = self.frame_matrices(current_time);

        unsafe {
            self.gl.clear(glow::COLOR_BUFFER_BIT | glow::DEPTH_BUFFER_BIT);
            self.gl.viewport(
                0,
                0,
                self.viewport.width() as i32,
                self.viewport.height() as i32,
            );
        }

        self.program.use_program();

        for (object, matrices) in self.objects.iter().zip(&frame.objects) {
            self.program.set_uniform(uniforms::MODEL, matrices.model);
            self.program.set_uniform(uniforms::VIEW, &frame.view);
            self.program.set_uniform(uniforms::PROJECTION, &frame.projection);
            self.program.set_uniform(uniforms::NORMAL_TO_WORLD, matrices.normal);

            if self.material_mode == MaterialMode::Textured {
                object.diffuse_map.bind(uniforms::DIFFUSE_UNIT);
                object.specular_map.bind(uniforms::SPECULAR_UNIT);
            }

            object.mesh.draw();
        }

        // Uploaded after the draws, so the very first frame is lit by zeroed lights.
        for (name, value) in self.scene_uniforms.iter() {
            self.program.set_uniform(name, value);
        }
    }

    /// Matrices [`SceneRenderer::render`] uploads for `current_time`.
    pub fn frame_matrices(&self, current_time: f64) -> FrameMatrices {
        FrameMatrices::compute(
            current_time,
            &self.camera,
            self.viewport,
            self.objects.iter().map(SceneObject::transform),
        )
    }

    /// Stores the new drawable size, used from the next frame on.
    pub fn resize(&mut self, viewport: Viewport) {
        self.viewport = viewport;
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn objects(&self) -> &[SceneObject] {
        &self.objects
    }
}
