//! Exports [`Shader`], [`CompiledShader`] and [`ShaderType`].
use std::fmt;

use super::{GlApi, GlDriver};

/// Represents the type of a shader object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShaderType {
    /// This shader is a Vertex shader.
    Vertex,
    /// This shader is a Fragment shader.
    Fragment,
    /// This shader is a Geometry shader.
    Geometry,
    /// This shader is a Tessellation Control shader.
    TessControl,
    /// This shader is a Tessellation Evaluation shader.
    TessEvaluation,
    /// This shader is a Compute shader.
    Compute,
}

impl ShaderType {
    /// The `GLenum` passed to `glCreateShader`.
    pub fn gl_enum(self) -> gl::types::GLenum {
        match self {
            ShaderType::Vertex => gl::VERTEX_SHADER,
            ShaderType::Fragment => gl::FRAGMENT_SHADER,
            ShaderType::Geometry => gl::GEOMETRY_SHADER,
            ShaderType::TessControl => gl::TESS_CONTROL_SHADER,
            ShaderType::TessEvaluation => gl::TESS_EVALUATION_SHADER,
            ShaderType::Compute => gl::COMPUTE_SHADER,
        }
    }

    /// Guess the stage from a conventional file extension (`vert`, `frag`, ...).
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext {
            "vert" | "vs" => Some(ShaderType::Vertex),
            "frag" | "fs" => Some(ShaderType::Fragment),
            "geom" | "gs" => Some(ShaderType::Geometry),
            "tesc" => Some(ShaderType::TessControl),
            "tese" => Some(ShaderType::TessEvaluation),
            "comp" => Some(ShaderType::Compute),
            _ => None,
        }
    }
}

impl fmt::Display for ShaderType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ShaderType::Vertex => "vertex",
            ShaderType::Fragment => "fragment",
            ShaderType::Geometry => "geometry",
            ShaderType::TessControl => "tessellation control",
            ShaderType::TessEvaluation => "tessellation evaluation",
            ShaderType::Compute => "compute",
        };
        f.write_str(name)
    }
}

/// An uncompiled OpenGL shader object with its source already uploaded.
///
/// Deleted on drop unless it was turned into a [`CompiledShader`].
pub struct Shader<D: GlDriver = GlApi> {
    /// GL ID for this shader.
    id: gl::types::GLuint,
    kind: ShaderType,
    driver: D,
    /// Was this shader handed over to a [`CompiledShader`].
    was_compiled: bool,
}

impl<D: GlDriver> Shader<D> {
    /// Create a shader object of `kind` and upload `source` into it.
    pub fn new(driver: D, kind: ShaderType, source: &str) -> Self {
        let id = driver.create_shader(kind);
        driver.shader_source(id, source);
        Self {
            id,
            kind,
            driver,
            was_compiled: false,
        }
    }

    /// What stage this shader is.
    pub fn kind(&self) -> ShaderType {
        self.kind
    }

    /// Compile this shader.
    ///
    /// # Errors
    /// Errors with the driver's compile log if compilation was unsuccessful.
    /// The shader object is released before returning.
    pub fn compile(mut self) -> Result<CompiledShader<D>, String> {
        self.driver.compile_shader(self.id);
        if !self.driver.compile_status(self.id) {
            // `self` drops here, which deletes the shader object.
            return Err(self.driver.shader_info_log(self.id));
        }
        self.was_compiled = true;
        Ok(CompiledShader {
            id: self.id,
            kind: self.kind,
            driver: self.driver.clone(),
        })
    }
}

impl<D: GlDriver> Drop for Shader<D> {
    fn drop(&mut self) {
        if !self.was_compiled {
            self.driver.delete_shader(self.id);
        }
    }
}

/// A compiled shader object.
/// This can be attached to a [`Program`](super::Program); dropping it
/// afterwards only flags it for deletion, the driver keeps it alive until
/// the program lets go of it.
pub struct CompiledShader<D: GlDriver = GlApi> {
    /// GL ID for this compiled shader.
    id: gl::types::GLuint,
    kind: ShaderType,
    driver: D,
}

impl<D: GlDriver> CompiledShader<D> {
    /// Get the internal GL ID of this shader.
    pub fn id(&self) -> gl::types::GLuint {
        self.id
    }
    /// What stage this shader is.
    pub fn kind(&self) -> ShaderType {
        self.kind
    }
}

impl<D: GlDriver> Drop for CompiledShader<D> {
    fn drop(&mut self) {
        self.driver.delete_shader(self.id);
    }
}
