//! Standalone functions and modules to wrap the nitty-gritty of
//! OpenGL objects with Rust structs.
#[macro_use]
pub mod builder;
pub mod driver;
pub mod mesh;
pub mod program;
pub mod shader;

pub use builder::*;
pub use driver::*;
pub use mesh::*;
pub use program::*;
pub use shader::*;

/// Update the OpenGL viewport. Negative sizes never reach GL; values past
/// `i32::MAX` are clamped.
pub fn gl_upd_viewport(width: u32, height: u32) {
    let real_width = i32::try_from(width).unwrap_or(i32::MAX);
    let real_height = i32::try_from(height).unwrap_or(i32::MAX);
    // SAFETY:
    // gl::Viewport does not fail with non-negative values.
    unsafe {
        gl::Viewport(0, 0, real_width, real_height);
    }
}
