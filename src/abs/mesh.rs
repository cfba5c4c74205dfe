//! Mesh management module.
//!
//! This module defines the [`Mesh`] struct for managing static, non-indexed
//! triangle lists on the GPU side. Each attribute lives in its own buffer.

use std::sync::Arc;

use glow::HasContext;
use spincube_core::{
    MeshData,
    shapes::{COMPONENTS_3D, COMPONENTS_UV},
};

/// Attribute location of vertex positions in the vertex shader.
pub const POSITION_ATTRIBUTE: u32 = 0;
/// Attribute location of vertex normals in the vertex shader.
pub const NORMAL_ATTRIBUTE: u32 = 1;
/// Attribute location of texture coordinates in the vertex shader.
pub const TEXCOORD_ATTRIBUTE: u32 = 2;

/// Represents a mesh stored on the GPU side.
pub struct Mesh {
    gl: Arc<glow::Context>,
    vao: glow::VertexArray,
    buffers: [glow::Buffer; 3],
    vertex_count: usize,
}

/// Uploads `data` into a new array buffer and points `location` of the bound
/// vertex array at it.
fn attribute_buffer(
    gl: &glow::Context,
    location: u32,
    components: usize,
    data: &[f32],
) -> Result<glow::Buffer, String> {
    unsafe {
        let buffer = gl.create_buffer()?;
        gl.bind_buffer(glow::ARRAY_BUFFER, Some(buffer));
        gl.buffer_data_u8_slice(
            glow::ARRAY_BUFFER,
            std::slice::from_raw_parts(data.as_ptr() as *const u8, std::mem::size_of_val(data)),
            glow::STATIC_DRAW,
        );
        gl.vertex_attrib_pointer_f32(location, components as i32, glow::FLOAT, false, 0, 0);
        gl.enable_vertex_attrib_array(location);
        Ok(buffer)
    }
}

impl Mesh {
    /// Creates a new mesh from the given vertex attribute set.
    pub fn new(gl: &Arc<glow::Context>, data: &MeshData) -> Result<Self, String> {
        unsafe {
            let vao = gl.create_vertex_array()?;
            gl.bind_vertex_array(Some(vao));

            let positions =
                attribute_buffer(gl, POSITION_ATTRIBUTE, COMPONENTS_3D, data.positions())?;
            let normals = attribute_buffer(gl, NORMAL_ATTRIBUTE, COMPONENTS_3D, data.normals())?;
            let uvs = attribute_buffer(gl, TEXCOORD_ATTRIBUTE, COMPONENTS_UV, data.uvs())?;

            gl.bind_vertex_array(None);
            gl.bind_buffer(glow::ARRAY_BUFFER, None);

            Ok(Self {
                gl: Arc::clone(gl),
                vao,
                buffers: [positions, normals, uvs],
                vertex_count: data.vertex_count(),
            })
        }
    }

    /// Binds the vertex array and draws every vertex as a triangle list.
    pub fn draw(&self) {
        unsafe {
            self.gl.bind_vertex_array(Some(self.vao));
            self.gl.draw_arrays(glow::TRIANGLES, 0, self.vertex_count as i32);
            self.gl.bind_vertex_array(None);
        }
    }

    /// Returns the number of vertices drawn by [`Mesh::draw`].
    pub fn vertex_count(&self) -> usize {
        self.vertex_count
    }
}

impl Drop for Mesh {
    fn drop(&mut self) {
        unsafe {
            for buffer in self.buffers {
                self.gl.delete_buffer(buffer);
            }
            self.gl.delete_vertex_array(self.vao);
        }
    }
}
