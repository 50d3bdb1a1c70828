use std::path::Path;

use gl::types::{GLint, GLsizei};

use crate::{
    graphics::{GraphicsError, ParticleBuffer, ShaderProgram},
    math::Mat4,
};

/// The matrices used to place particles on screen.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Transforms {
    pub projection: Mat4,
    pub camera: Mat4,
    pub model: Mat4,
}

/// Draws the particle buffer as unconnected points.
pub struct ParticleRenderer {
    program: ShaderProgram,
    projection_location: GLint,
    camera_location: GLint,
    model_location: GLint,
    color_interpolation_location: GLint,
}

impl ParticleRenderer {
    /// Compile the render program.
    ///
    /// # Safety
    ///
    /// Unsafe because:
    ///   - an OpenGL context must be current on this thread and must outlive
    ///     the returned renderer.
    pub unsafe fn new(
        vertex_shader: &Path,
        fragment_shader: &Path,
    ) -> Result<Self, GraphicsError> {
        let program =
            ShaderProgram::from_render_files(vertex_shader, fragment_shader)?;
        Ok(Self {
            projection_location: program.uniform_location("projectionMat"),
            camera_location: program.uniform_location("cameraMat"),
            model_location: program.uniform_location("modelMat"),
            color_interpolation_location: program
                .uniform_location("colorInterpolation"),
            program,
        })
    }

    /// Draw every particle.
    ///
    /// # Safety
    ///
    /// Unsafe because:
    ///   - the program's OpenGL context must be current on this thread.
    ///   - any compute writes to the particle buffer must already be visible,
    ///     see `ParticleIntegrator::integrate`.
    pub unsafe fn draw(
        &self,
        particles: &ParticleBuffer,
        transforms: &Transforms,
        color_interpolation: f32,
    ) {
        if particles.is_empty() {
            return;
        }

        gl::UseProgram(self.program.raw());
        gl::UniformMatrix4fv(
            self.projection_location,
            1,
            gl::FALSE,
            transforms.projection.as_ptr(),
        );
        gl::UniformMatrix4fv(
            self.camera_location,
            1,
            gl::FALSE,
            transforms.camera.as_ptr(),
        );
        gl::UniformMatrix4fv(
            self.model_location,
            1,
            gl::FALSE,
            transforms.model.as_ptr(),
        );
        gl::Uniform1f(self.color_interpolation_location, color_interpolation);

        particles.bind_vertex_array();
        gl::DrawArrays(gl::POINTS, 0, particles.particle_count() as GLsizei);

        gl::BindVertexArray(0);
        gl::UseProgram(0);
    }
}
