//! Small OpenGL demos built around one reusable piece: a shader program
//! builder that either hands back a linked [`Program`](gl_wrappers::Program)
//! or fails with the driver's log and nothing left allocated.
//!
//! ```no_run
//! use gl_triangles::{gl_wrappers::ShaderProgramBuilder, source::ShaderSources, stages};
//!
//! // A GL context must be current here.
//! let builder = ShaderProgramBuilder::new(ShaderSources::new("shaders"));
//! let program = builder.build(&stages![
//!     Vertex => "triangles.vert",
//!     Fragment => "triangles.frag",
//! ])?;
//! program.use_program();
//! # Ok::<(), gl_triangles::gl_wrappers::BuildError>(())
//! ```
pub mod color;
pub mod config;
pub mod demos;
#[macro_use]
pub mod gl_wrappers;
pub mod logging;
pub mod render_vec;
pub mod source;
pub mod window;

pub use gl;
pub use gl_wrappers::gl_upd_viewport;
