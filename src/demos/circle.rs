//! A slowly spinning color wheel drawn as a triangle fan.
use std::{f32::consts::TAU, time::Instant};

use anyhow::Result;

use super::program_builder;
use crate::{
    color::hsv_to_rgb,
    config::DemoConfig,
    gl_wrappers::{Mesh, Program},
    render_vec::{Attrib, RenderVec, VertexLayout},
    window::Demo,
};

// position, color
const POSITION_2D_COLOR: VertexLayout = VertexLayout(&[Attrib::floats(2), Attrib::floats(3)]);

const SEGMENTS: usize = 96;
const RADIUS: f32 = 0.75;
/// Radians per second.
const SPIN_SPEED: f32 = 0.5;

/// Fan vertices: a white center, then `segments + 1` rim points (the
/// first repeated to close the fan) whose hue follows the angle.
pub fn circle_vertices(segments: usize, radius: f32) -> RenderVec {
    let mut vertices = RenderVec::new(POSITION_2D_COLOR);
    vertices.push(&[0.0, 0.0, 1.0, 1.0, 1.0]);
    for i in 0..=segments {
        let turn = (i % segments.max(1)) as f32 / segments.max(1) as f32;
        let angle = turn * TAU;
        let [r, g, b] = hsv_to_rgb(turn * 360.0, 1.0, 1.0);
        vertices.push(&[radius * angle.cos(), radius * angle.sin(), r, g, b]);
    }
    vertices
}

pub struct Circle {
    mesh: Mesh,
    program: Program,
    angle_location: Option<gl::types::GLint>,
    started: Instant,
}

impl Demo for Circle {
    fn init(config: &DemoConfig) -> Result<Self> {
        let program = program_builder(config).build(&crate::stages![
            Vertex => "circle.vert",
            Fragment => "circle.frag",
        ])?;
        let angle_location = program.uniform_location("uAngle");
        if angle_location.is_none() {
            log::warn!("uAngle is not an active uniform, the wheel will not spin");
        }
        let mesh = Mesh::new(&circle_vertices(SEGMENTS, RADIUS));
        Ok(Self {
            mesh,
            program,
            angle_location,
            started: Instant::now(),
        })
    }

    fn draw(&mut self) {
        unsafe {
            gl::ClearColor(0.08, 0.08, 0.10, 1.0);
            gl::Clear(gl::COLOR_BUFFER_BIT);
        }
        self.program.use_program();
        if let Some(location) = self.angle_location {
            let angle = self.started.elapsed().as_secs_f32() * SPIN_SPEED;
            unsafe { gl::Uniform1f(location, angle % TAU) };
        }
        self.mesh.draw(gl::TRIANGLE_FAN);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fan_has_center_and_closed_rim() {
        let vertices = circle_vertices(8, 1.0);
        assert_eq!(vertices.gl_len(), 1 + 9);

        let floats: &[f32] = bytemuck::cast_slice(vertices.as_bytes());
        let first_rim = &floats[5..10];
        let last_rim = &floats[floats.len() - 5..];
        for (a, b) in first_rim.iter().zip(last_rim) {
            assert!((a - b).abs() < 1e-5);
        }
    }

    #[test]
    fn rim_points_sit_on_radius() {
        let vertices = circle_vertices(16, 0.5);
        let floats: &[f32] = bytemuck::cast_slice(vertices.as_bytes());
        for vertex in floats.chunks(5).skip(1) {
            let r = (vertex[0] * vertex[0] + vertex[1] * vertex[1]).sqrt();
            assert!((r - 0.5).abs() < 1e-5);
        }
    }

    #[test]
    fn center_is_white() {
        let vertices = circle_vertices(4, 1.0);
        let floats: &[f32] = bytemuck::cast_slice(vertices.as_bytes());
        assert_eq!(&floats[..5], &[0.0, 0.0, 1.0, 1.0, 1.0]);
    }
}
