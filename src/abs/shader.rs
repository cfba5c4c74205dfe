//! OpenGL Shaders
//!
//! This module defines the [`Shader`] and [`ShaderProgram`] structs for managing OpenGL shaders.
//! This module also provides the [`Uniform`] trait for setting uniform variables in shader
//! programs.

use std::{cell::RefCell, sync::Arc};

use fxhash::FxHashMap;
use glam::{Mat3, Mat4, Vec3};
use glow::HasContext;
use spincube_core::uniforms::UniformValue;

/// Placeholder used when the driver reports a failure without any log text.
const EMPTY_DIAGNOSTIC: &str = "<no diagnostic available>";

/// Errors raised while building a shader program. None of them are recoverable.
#[derive(Debug, thiserror::Error)]
pub enum ShaderError {
    #[error("could not create GL object: {0}")]
    Create(String),
    #[error("Vertex shader compilation failed!\n{0}")]
    VertexCompile(String),
    #[error("Fragment shader compilation failed!\n{0}")]
    FragmentCompile(String),
    #[error("Shader program linking failed!\n{0}")]
    Link(String),
}

fn diagnostic(log: &str) -> String {
    let log = log.trim();
    if log.is_empty() {
        EMPTY_DIAGNOSTIC.to_string()
    } else {
        log.to_string()
    }
}

/// Pipeline stage of a single shader.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShaderStage {
    Vertex,
    Fragment,
}

impl ShaderStage {
    fn gl_type(self) -> u32 {
        match self {
            ShaderStage::Vertex => glow::VERTEX_SHADER,
            ShaderStage::Fragment => glow::FRAGMENT_SHADER,
        }
    }

    /// Wraps a compile log into the error for this stage.
    pub fn compile_error(self, log: &str) -> ShaderError {
        match self {
            ShaderStage::Vertex => ShaderError::VertexCompile(diagnostic(log)),
            ShaderStage::Fragment => ShaderError::FragmentCompile(diagnostic(log)),
        }
    }
}

/// Represents an individual OpenGL shader.
pub struct Shader {
    gl: Arc<glow::Context>,
    id: glow::Shader,
}

impl Shader {
    /// Compiles a new shader from the given source code.
    pub fn new(
        gl: &Arc<glow::Context>,
        stage: ShaderStage,
        source: &str,
    ) -> Result<Self, ShaderError> {
        unsafe {
            let shader = gl.create_shader(stage.gl_type()).map_err(ShaderError::Create)?;
            gl.shader_source(shader, source);
            gl.compile_shader(shader);

            if !gl.get_shader_compile_status(shader) {
                let log = gl.get_shader_info_log(shader);
                gl.delete_shader(shader);
                return Err(stage.compile_error(&log));
            }

            Ok(Self {
                gl: Arc::clone(gl),
                id: shader,
            })
        }
    }
}

impl Drop for Shader {
    fn drop(&mut self) {
        unsafe {
            self.gl.delete_shader(self.id);
        }
    }
}

/// Represents a value that can be written to a uniform location.
pub trait Uniform {
    /// Writes the value to `location` of the currently used program.
    fn set_uniform(&self, gl: &glow::Context, location: &glow::UniformLocation);
}

impl Uniform for f32 {
    fn set_uniform(&self, gl: &glow::Context, location: &glow::UniformLocation) {
        unsafe {
            gl.uniform_1_f32(Some(location), *self);
        }
    }
}

impl Uniform for i32 {
    fn set_uniform(&self, gl: &glow::Context, location: &glow::UniformLocation) {
        unsafe {
            gl.uniform_1_i32(Some(location), *self);
        }
    }
}

impl Uniform for Vec3 {
    fn set_uniform(&self, gl: &glow::Context, location: &glow::UniformLocation) {
        unsafe {
            gl.uniform_3_f32(Some(location), self.x, self.y, self.z);
        }
    }
}

impl Uniform for Mat3 {
    fn set_uniform(&self, gl: &glow::Context, location: &glow::UniformLocation) {
        unsafe {
            gl.uniform_matrix_3_f32_slice(Some(location), false, &self.to_cols_array());
        }
    }
}

impl Uniform for Mat4 {
    fn set_uniform(&self, gl: &glow::Context, location: &glow::UniformLocation) {
        unsafe {
            gl.uniform_matrix_4_f32_slice(Some(location), false, self.as_ref());
        }
    }
}

impl Uniform for UniformValue {
    fn set_uniform(&self, gl: &glow::Context, location: &glow::UniformLocation) {
        match self {
            UniformValue::Int(value) => value.set_uniform(gl, location),
            UniformValue::Float(value) => value.set_uniform(gl, location),
            UniformValue::Vec3(value) => value.set_uniform(gl, location),
        }
    }
}

impl<T: Uniform> Uniform for &T {
    fn set_uniform(&self, gl: &glow::Context, location: &glow::UniformLocation) {
        (*self).set_uniform(gl, location);
    }
}

/// Represents an OpenGL shader program composed of multiple shaders.
///
/// Uniform locations are looked up once per name and cached. Names the program
/// does not expose are reported once and then silently ignored.
pub struct ShaderProgram {
    gl: Arc<glow::Context>,
    id: glow::Program,
    locations: RefCell<FxHashMap<String, Option<glow::UniformLocation>>>,
}

impl ShaderProgram {
    /// Compiles both stages and links them into a program.
    ///
    /// The stage objects are released before returning, whether or not linking
    /// succeeded.
    pub fn build(
        gl: &Arc<glow::Context>,
        vertex_source: &str,
        fragment_source: &str,
    ) -> Result<Self, ShaderError> {
        let vertex = Shader::new(gl, ShaderStage::Vertex, vertex_source)?;
        let fragment = Shader::new(gl, ShaderStage::Fragment, fragment_source)?;
        Self::new(gl, &[&vertex, &fragment])
    }

    /// Links a new shader program from the given shaders.
    pub fn new(gl: &Arc<glow::Context>, shaders: &[&Shader]) -> Result<Self, ShaderError> {
        unsafe {
            let program = gl.create_program().map_err(ShaderError::Create)?;

            for shader in shaders {
                gl.attach_shader(program, shader.id);
            }

            gl.link_program(program);

            for shader in shaders {
                gl.detach_shader(program, shader.id);
            }

            if !gl.get_program_link_status(program) {
                let log = gl.get_program_info_log(program);
                gl.delete_program(program);
                return Err(ShaderError::Link(diagnostic(&log)));
            }

            Ok(Self {
                gl: Arc::clone(gl),
                id: program,
                locations: RefCell::new(FxHashMap::default()),
            })
        }
    }

    /// Binds the shader program for use.
    pub fn use_program(&self) {
        unsafe {
            self.gl.use_program(Some(self.id));
        }
    }

    /// Returns the cached location of `name`, querying it on first use.
    pub fn location(&self, name: &str) -> Option<glow::UniformLocation> {
        if let Some(location) = self.locations.borrow().get(name) {
            return location.clone();
        }

        let location = unsafe { self.gl.get_uniform_location(self.id, name) };
        if location.is_none() {
            log::warn!("uniform `{name}` is not active in the program, writes to it are ignored");
        }
        self.locations
            .borrow_mut()
            .insert(name.to_string(), location.clone());
        location
    }

    /// Sets a uniform variable in the shader program. The program must be in use.
    pub fn set_uniform<T: Uniform>(&self, name: &str, value: T) {
        if let Some(location) = self.location(name) {
            value.set_uniform(&self.gl, &location);
        }
    }
}

impl Drop for ShaderProgram {
    fn drop(&mut self) {
        unsafe {
            self.gl.delete_program(self.id);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stage_errors_are_distinct() {
        let vertex = ShaderStage::Vertex.compile_error("0:3(1): error: syntax error");
        let fragment = ShaderStage::Fragment.compile_error("0:7(2): error: undeclared");

        assert!(matches!(vertex, ShaderError::VertexCompile(_)));
        assert!(matches!(fragment, ShaderError::FragmentCompile(_)));
        assert_eq!(
            vertex.to_string(),
            "Vertex shader compilation failed!\n0:3(1): error: syntax error"
        );
        assert_eq!(
            fragment.to_string(),
            "Fragment shader compilation failed!\n0:7(2): error: undeclared"
        );
    }

    #[test]
    fn test_link_error_message() {
        let err = ShaderError::Link(diagnostic("error: `frag_pos' not written\n"));
        assert_eq!(
            err.to_string(),
            "Shader program linking failed!\nerror: `frag_pos' not written"
        );
    }

    #[test]
    fn test_empty_diagnostic_is_replaced() {
        let err = ShaderStage::Vertex.compile_error("  \n");
        let ShaderError::VertexCompile(log) = &err else {
            panic!("unexpected error {err:?}");
        };
        assert!(!log.is_empty());
        assert_eq!(log, EMPTY_DIAGNOSTIC);
    }

    #[test]
    fn test_stage_gl_types() {
        assert_eq!(ShaderStage::Vertex.gl_type(), glow::VERTEX_SHADER);
        assert_eq!(ShaderStage::Fragment.gl_type(), glow::FRAGMENT_SHADER);
    }
}
