//! Exports [`GlDriver`] and its production implementation [`GlApi`].
use std::{ffi::CStr, ptr::null_mut};

use gl::types::{GLchar, GLint, GLuint};

use super::ShaderType;

/// The OpenGL entry points used to build and drive shader programs.
///
/// Every call goes to whatever context is current on the calling thread.
/// [`GlApi`] forwards straight to the loaded `gl` function pointers; tests
/// swap in their own implementation to count allocations.
/// Shader and program handles keep a clone so they can release themselves.
pub trait GlDriver: Clone {
    fn create_program(&self) -> GLuint;
    fn delete_program(&self, program: GLuint);
    fn create_shader(&self, kind: ShaderType) -> GLuint;
    fn delete_shader(&self, shader: GLuint);
    fn shader_source(&self, shader: GLuint, source: &str);
    fn compile_shader(&self, shader: GLuint);
    fn compile_status(&self, shader: GLuint) -> bool;
    /// Full compiler log for `shader`, empty if the driver produced none.
    fn shader_info_log(&self, shader: GLuint) -> String;
    fn attach_shader(&self, program: GLuint, shader: GLuint);
    fn link_program(&self, program: GLuint);
    fn link_status(&self, program: GLuint) -> bool;
    /// Full linker log for `program`, empty if the driver produced none.
    fn program_info_log(&self, program: GLuint) -> String;
    fn use_program(&self, program: GLuint);
    fn uniform_location(&self, program: GLuint, name: &CStr) -> GLint;
    fn attrib_location(&self, program: GLuint, name: &CStr) -> GLint;
}

/// [`GlDriver`] backed by the global `gl` bindings.
///
/// `gl::load_with` must have been called and a context must be current
/// before any method is used.
#[derive(Debug, Clone, Copy, Default)]
pub struct GlApi;

/// Turn a raw info log into a `String`, dropping the trailing NUL(s).
pub(crate) fn log_to_string(mut raw: Vec<u8>) -> String {
    while raw.last() == Some(&0) {
        raw.pop();
    }
    String::from_utf8_lossy(&raw).into_owned()
}

impl GlDriver for GlApi {
    fn create_program(&self) -> GLuint {
        unsafe { gl::CreateProgram() }
    }
    fn delete_program(&self, program: GLuint) {
        unsafe { gl::DeleteProgram(program) }
    }
    fn create_shader(&self, kind: ShaderType) -> GLuint {
        unsafe { gl::CreateShader(kind.gl_enum()) }
    }
    fn delete_shader(&self, shader: GLuint) {
        unsafe { gl::DeleteShader(shader) }
    }
    fn shader_source(&self, shader: GLuint, source: &str) {
        // Passing the length means the text needs no NUL terminator.
        let ptr = source.as_ptr().cast::<GLchar>();
        let len: GLint = source.len().try_into().unwrap_or(GLint::MAX);
        // SAFETY:
        // `ptr` and `len` describe one live string for the duration of the call.
        unsafe { gl::ShaderSource(shader, 1, &ptr, &len) }
    }
    fn compile_shader(&self, shader: GLuint) {
        unsafe { gl::CompileShader(shader) }
    }
    fn compile_status(&self, shader: GLuint) -> bool {
        let mut success = 0;
        unsafe { gl::GetShaderiv(shader, gl::COMPILE_STATUS, &mut success) };
        success == GLint::from(gl::TRUE)
    }
    fn shader_info_log(&self, shader: GLuint) -> String {
        let mut length = 0;
        unsafe { gl::GetShaderiv(shader, gl::INFO_LOG_LENGTH, &mut length) };
        if length <= 0 {
            return String::new();
        }
        let mut infolog: Vec<u8> = vec![0; length as usize];
        let mut written = 0;
        // SAFETY:
        // `infolog` holds exactly `length` bytes, the size we tell GL it may write.
        unsafe {
            gl::GetShaderInfoLog(shader, length, &mut written, infolog.as_mut_ptr().cast());
        }
        infolog.truncate(written.max(0) as usize);
        log_to_string(infolog)
    }
    fn attach_shader(&self, program: GLuint, shader: GLuint) {
        unsafe { gl::AttachShader(program, shader) }
    }
    fn link_program(&self, program: GLuint) {
        unsafe { gl::LinkProgram(program) }
    }
    fn link_status(&self, program: GLuint) -> bool {
        let mut success = 0;
        unsafe { gl::GetProgramiv(program, gl::LINK_STATUS, &mut success) };
        success == GLint::from(gl::TRUE)
    }
    fn program_info_log(&self, program: GLuint) -> String {
        let mut length = 0;
        unsafe { gl::GetProgramiv(program, gl::INFO_LOG_LENGTH, &mut length) };
        if length <= 0 {
            return String::new();
        }
        let mut infolog: Vec<u8> = vec![0; length as usize];
        // SAFETY:
        // same contract as `shader_info_log`; a null length pointer is allowed.
        unsafe {
            gl::GetProgramInfoLog(program, length, null_mut(), infolog.as_mut_ptr().cast());
        }
        log_to_string(infolog)
    }
    fn use_program(&self, program: GLuint) {
        unsafe { gl::UseProgram(program) }
    }
    fn uniform_location(&self, program: GLuint, name: &CStr) -> GLint {
        unsafe { gl::GetUniformLocation(program, name.as_ptr()) }
    }
    fn attrib_location(&self, program: GLuint, name: &CStr) -> GLint {
        unsafe { gl::GetAttribLocation(program, name.as_ptr()) }
    }
}
