//! The tutorial programs. Each one owns its GPU state; nothing is global.
mod circle;
mod hello_triangle;
mod triangles;

pub use circle::{circle_vertices, Circle};
pub use hello_triangle::HelloTriangle;
pub use triangles::Triangles;

use crate::{config::DemoConfig, gl_wrappers::ShaderProgramBuilder, source::ShaderSources};

/// A builder reading from the configured shader directory and injecting
/// the configured GLSL version.
pub fn program_builder(config: &DemoConfig) -> ShaderProgramBuilder<ShaderSources> {
    ShaderProgramBuilder::new(
        ShaderSources::new(&config.shader_dir).with_version(config.glsl_version),
    )
}
