//! Exports [`Program`].
use std::{ffi::CString, mem::ManuallyDrop, ptr};

use super::{CompiledShader, GlApi, GlDriver};

/// Wrapper for an OpenGL program.
///
/// The program object is deleted when this is dropped.
///
/// <https://www.khronos.org/opengl/wiki/GLSL_Object#Program_objects>
pub struct Program<D: GlDriver = GlApi> {
    /// The internal OpenGL id for this object.
    id: gl::types::GLuint,
    driver: D,
}

impl<D: GlDriver> Program<D> {
    /// Allocate an empty, unlinked program object.
    pub fn empty(driver: D) -> Self {
        let id = driver.create_program();
        Self { id, driver }
    }

    /// Link a program straight from already compiled shaders.
    ///
    /// # Errors
    /// Errors with the driver's link log if linking failed. The program is
    /// released before returning.
    pub fn from_shaders(driver: D, shaders: &[&CompiledShader<D>]) -> Result<Self, String> {
        let program = Self::empty(driver);
        for shader in shaders {
            program.attach(shader);
        }
        program.link()
    }

    /// Attach a compiled shader to this program.
    pub fn attach(&self, shader: &CompiledShader<D>) {
        self.driver.attach_shader(self.id, shader.id());
    }

    /// Link the attached shaders.
    ///
    /// # Errors
    /// Errors with the driver's link log if linking failed. The program is
    /// released before returning.
    pub fn link(self) -> Result<Self, String> {
        self.driver.link_program(self.id);
        if !self.driver.link_status(self.id) {
            return Err(self.driver.program_info_log(self.id));
        }
        Ok(self)
    }

    /// Get the internal id of this program.
    pub fn id(&self) -> gl::types::GLuint {
        self.id
    }

    /// Make this the current program for subsequent draw calls.
    pub fn use_program(&self) {
        self.driver.use_program(self.id);
    }

    /// Get the location of a uniform in this program.
    ///
    /// Returns `None` if the uniform is not active or `name` contains interior nuls.
    pub fn uniform_location(&self, name: impl AsRef<str>) -> Option<gl::types::GLint> {
        let name = CString::new(name.as_ref()).ok()?;
        let location = self.driver.uniform_location(self.id, &name);
        (location >= 0).then_some(location)
    }

    /// Get the location of an attrib in this program.
    ///
    /// Returns `None` if the attribute is not active or `name` contains interior nuls.
    pub fn attrib_location(&self, name: impl AsRef<str>) -> Option<gl::types::GLint> {
        let name = CString::new(name.as_ref()).ok()?;
        let location = self.driver.attrib_location(self.id, &name);
        (location >= 0).then_some(location)
    }

    /// Give up ownership of the GL id. The caller becomes responsible for
    /// calling `glDeleteProgram`.
    pub fn into_raw(self) -> gl::types::GLuint {
        let mut this = ManuallyDrop::new(self);
        // SAFETY:
        // `this` is never dropped or touched again, so the driver is dropped exactly once.
        unsafe { ptr::drop_in_place(&mut this.driver) };
        this.id
    }
}

impl<D: GlDriver> Drop for Program<D> {
    fn drop(&mut self) {
        self.driver.delete_program(self.id);
    }
}
