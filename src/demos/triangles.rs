//! Two flat-colored triangles, shaders loaded from files.
use anyhow::Result;

use super::program_builder;
use crate::{
    config::DemoConfig,
    gl_wrappers::{Mesh, Program},
    render_vec::{Attrib, RenderVec, VertexLayout},
    window::Demo,
};

const POSITION_2D: VertexLayout = VertexLayout(&[Attrib::floats(2)]);

#[rustfmt::skip]
const VERTICES: [f32; 12] = [
    -0.90, -0.90, // Triangle 1
     0.85, -0.90,
    -0.90,  0.85,
     0.90, -0.85, // Triangle 2
     0.90,  0.90,
    -0.85,  0.90,
];

pub struct Triangles {
    mesh: Mesh,
    program: Program,
}

impl Demo for Triangles {
    fn init(config: &DemoConfig) -> Result<Self> {
        let program = program_builder(config).build(&crate::stages![
            Vertex => "triangles.vert",
            Fragment => "triangles.frag",
        ])?;
        let mesh = Mesh::new(&RenderVec::from_interleaved(POSITION_2D, VERTICES.to_vec()));
        unsafe { gl::ClearColor(0.0, 0.0, 0.0, 1.0) };
        Ok(Self { mesh, program })
    }

    fn draw(&mut self) {
        unsafe { gl::Clear(gl::COLOR_BUFFER_BIT) };
        self.program.use_program();
        self.mesh.draw(gl::TRIANGLES);
    }
}
