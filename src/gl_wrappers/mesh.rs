//! Exports [`Mesh`].
use std::ffi::c_void;

use crate::render_vec::RenderVec;

/// A vertex array object plus the buffer feeding it.
///
/// Both objects are deleted on drop. A GL context must be current for the
/// whole lifetime of a `Mesh`.
pub struct Mesh {
    vao: gl::types::GLuint,
    vbo: gl::types::GLuint,
    vertex_count: gl::types::GLsizei,
}

impl Mesh {
    /// Upload `vertices` once and describe their attributes.
    pub fn new(vertices: &RenderVec) -> Self {
        let layout = vertices.layout();
        let stride: gl::types::GLsizei = vertices.stride().try_into().unwrap_or(0);
        let (vao, vbo) = unsafe {
            let mut vbo = 0;
            gl::GenBuffers(1, &mut vbo);
            let mut vao = 0;
            gl::GenVertexArrays(1, &mut vao);

            // bind the Vertex Array Object first, then bind and set vertex buffers, and then configure attributes
            gl::BindVertexArray(vao);
            gl::BindBuffer(gl::ARRAY_BUFFER, vbo);
            gl::BufferData(
                gl::ARRAY_BUFFER,
                vertices.gl_byte_size(),
                vertices.gl_data(),
                gl::STATIC_DRAW,
            );

            for (location, attrib, offset) in layout.offsets() {
                gl::VertexAttribPointer(
                    location,
                    attrib.components as gl::types::GLint,
                    attrib.gl_type.gl_enum(),
                    gl::FALSE,
                    stride,
                    offset as *const c_void,
                );
                gl::EnableVertexAttribArray(location);
            }

            // reset bound arrays
            gl::BindVertexArray(0);
            gl::BindBuffer(gl::ARRAY_BUFFER, 0);
            (vao, vbo)
        };
        log::debug!("mesh vao {vao}, vbo {vbo}, {} vertices", vertices.gl_len());
        Self {
            vao,
            vbo,
            vertex_count: vertices.gl_len(),
        }
    }

    pub fn vertex_count(&self) -> gl::types::GLsizei {
        self.vertex_count
    }

    /// Draw every vertex with primitive `mode` (`gl::TRIANGLES`, ...).
    pub fn draw(&self, mode: gl::types::GLenum) {
        unsafe {
            gl::BindVertexArray(self.vao);
            gl::DrawArrays(mode, 0, self.vertex_count);
            gl::BindVertexArray(0);
        }
    }
}

impl Drop for Mesh {
    fn drop(&mut self) {
        unsafe {
            gl::DeleteVertexArrays(1, &self.vao);
            gl::DeleteBuffers(1, &self.vbo);
        }
    }
}
