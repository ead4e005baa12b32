//! One triangle with a color per vertex, shaders embedded in the binary.
//!
//! The sources carry no `#version` line; the configured GLSL version is
//! added when they are read.
use anyhow::Result;

use super::program_builder;
use crate::{
    config::DemoConfig,
    gl_wrappers::{Mesh, Program, ShaderType, StageSpec},
    render_vec::{Attrib, RenderVec, VertexLayout},
    window::Demo,
};

const VERT_SHADER_SOURCE: &str = "
layout (location = 0) in vec3 aPos;
layout (location = 1) in vec3 aCol;
out vec3 vCol;
void main() {
    vCol = aCol;
    gl_Position = vec4(aPos, 1.0);
}
";

const FRAG_SHADER_SOURCE: &str = "
in vec3 vCol;
out vec4 FragColor;
void main() {
    FragColor = vec4(vCol, 1.0);
}
";

// position, color
const POSITION_COLOR: VertexLayout = VertexLayout(&[Attrib::floats(3), Attrib::floats(3)]);

#[rustfmt::skip]
const VERTICES: [f32; 18] = [
    -0.8, -0.6, 0.0,   1.0, 0.2, 0.2,
     0.0,  0.8, 0.0,   0.2, 1.0, 0.2,
     0.8, -0.6, 0.0,   0.2, 0.2, 1.0,
];

pub struct HelloTriangle {
    mesh: Mesh,
    program: Program,
}

impl Demo for HelloTriangle {
    fn init(config: &DemoConfig) -> Result<Self> {
        let program = program_builder(config).build(&[
            StageSpec::inline(ShaderType::Vertex, VERT_SHADER_SOURCE),
            StageSpec::inline(ShaderType::Fragment, FRAG_SHADER_SOURCE),
        ])?;
        let mesh = Mesh::new(&RenderVec::from_interleaved(POSITION_COLOR, VERTICES.to_vec()));
        Ok(Self { mesh, program })
    }

    fn draw(&mut self) {
        unsafe {
            gl::ClearColor(0.08, 0.08, 0.10, 1.0);
            gl::Clear(gl::COLOR_BUFFER_BIT);
        }
        self.program.use_program();
        self.mesh.draw(gl::TRIANGLES);
    }
}
