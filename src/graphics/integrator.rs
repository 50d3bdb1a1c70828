use std::path::Path;

use gl::types::{GLint, GLuint};

use crate::graphics::{GraphicsError, ParticleBuffer, ShaderProgram};

/// Must match `local_size_x` in the compute shader.
pub const WORK_GROUP_SIZE: usize = 240;

/// The number of work groups needed to cover every particle.
pub fn work_group_count(particle_count: usize) -> GLuint {
    ((particle_count + WORK_GROUP_SIZE - 1) / WORK_GROUP_SIZE) as GLuint
}

/// Runs the compute program which moves the particles each frame.
pub struct ParticleIntegrator {
    program: ShaderProgram,
    dt_location: GLint,
    collapse_location: GLint,
    particle_count_location: GLint,
}

impl ParticleIntegrator {
    /// Compile the compute program.
    ///
    /// # Safety
    ///
    /// Unsafe because:
    ///   - an OpenGL context must be current on this thread and must outlive
    ///     the returned integrator.
    pub unsafe fn new(compute_shader: &Path) -> Result<Self, GraphicsError> {
        let program = ShaderProgram::from_compute_file(compute_shader)?;
        Ok(Self {
            dt_location: program.uniform_location("dt"),
            collapse_location: program.uniform_location("collapse"),
            particle_count_location: program.uniform_location("particleCount"),
            program,
        })
    }

    /// Dispatch the compute program over every particle, then wait for its
    /// writes to become visible to every later GPU read.
    ///
    /// Nothing is dispatched for an empty buffer.
    ///
    /// # Safety
    ///
    /// Unsafe because:
    ///   - the program's OpenGL context must be current on this thread.
    pub unsafe fn integrate(
        &self,
        particles: &ParticleBuffer,
        dt: f32,
        collapse: i32,
    ) {
        if particles.is_empty() {
            return;
        }

        gl::UseProgram(self.program.raw());
        gl::Uniform1f(self.dt_location, dt);
        gl::Uniform1i(self.collapse_location, collapse);
        gl::Uniform1ui(
            self.particle_count_location,
            particles.particle_count() as GLuint,
        );
        particles.bind_storage();

        gl::DispatchCompute(work_group_count(particles.particle_count()), 1, 1);
        gl::MemoryBarrier(gl::ALL_BARRIER_BITS);

        gl::UseProgram(0);
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn work_groups_cover_every_particle() {
        assert_eq!(work_group_count(0), 0);
        assert_eq!(work_group_count(1), 1);
        assert_eq!(work_group_count(240), 1);
        assert_eq!(work_group_count(241), 2);
        assert_eq!(work_group_count(1_000_000), 4167);
    }
}
