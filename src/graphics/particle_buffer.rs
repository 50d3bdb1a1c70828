use std::ffi::c_void;

use gl::types::{GLsizei, GLsizeiptr, GLuint};
use memoffset::offset_of;

use crate::{graphics::GraphicsError, particles::Particle};

/// The storage buffer binding used by the compute shader.
pub const PARTICLE_STORAGE_BINDING: GLuint = 0;

/// Vertex attribute locations used by the render program.
pub const POSITION_LOCATION: GLuint = 0;
pub const START_COLOR_LOCATION: GLuint = 1;
pub const END_COLOR_LOCATION: GLuint = 2;

/// A vertex attribute which reads one vec4 field from each particle.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct ParticleAttribute {
    pub location: GLuint,
    pub offset: usize,
}

/// The attributes the render program reads from the particle buffer, in the
/// order of their shader locations.
pub fn particle_attributes() -> [ParticleAttribute; 3] {
    [
        ParticleAttribute {
            location: POSITION_LOCATION,
            offset: offset_of!(Particle, pos),
        },
        ParticleAttribute {
            location: START_COLOR_LOCATION,
            offset: offset_of!(Particle, start_color),
        },
        ParticleAttribute {
            location: END_COLOR_LOCATION,
            offset: offset_of!(Particle, end_color),
        },
    ]
}

/// The byte distance between consecutive particles in the buffer.
pub fn particle_stride() -> usize {
    std::mem::size_of::<Particle>()
}

/// All particles in a single GPU buffer, plus the vertex array which lets
/// the render program read them as points.
///
/// The same buffer is bound as a shader storage buffer when the compute
/// program integrates the particles.
pub struct ParticleBuffer {
    buffer: GLuint,
    vertex_array: GLuint,
    particle_count: usize,
}

impl ParticleBuffer {
    /// Upload the particles and configure the vertex array.
    ///
    /// An empty slice is valid and results in an empty buffer.
    ///
    /// # Safety
    ///
    /// Unsafe because:
    ///   - an OpenGL context must be current on this thread and must outlive
    ///     the returned buffer.
    pub unsafe fn new(particles: &[Particle]) -> Result<Self, GraphicsError> {
        let mut buffer: GLuint = 0;
        gl::GenBuffers(1, &mut buffer);
        if buffer == 0 {
            return Err(GraphicsError::UnableToCreateObject("buffer"));
        }

        let mut vertex_array: GLuint = 0;
        gl::GenVertexArrays(1, &mut vertex_array);
        if vertex_array == 0 {
            gl::DeleteBuffers(1, &buffer);
            return Err(GraphicsError::UnableToCreateObject("vertex array"));
        }

        let byte_size = (particles.len() * particle_stride()) as GLsizeiptr;
        gl::BindBuffer(gl::ARRAY_BUFFER, buffer);
        gl::BufferData(
            gl::ARRAY_BUFFER,
            byte_size,
            particles.as_ptr() as *const c_void,
            gl::DYNAMIC_COPY,
        );

        gl::BindVertexArray(vertex_array);
        for attribute in particle_attributes().iter() {
            gl::EnableVertexAttribArray(attribute.location);
            gl::VertexAttribPointer(
                attribute.location,
                4,
                gl::FLOAT,
                gl::FALSE,
                particle_stride() as GLsizei,
                attribute.offset as *const c_void,
            );
        }
        gl::BindVertexArray(0);
        gl::BindBuffer(gl::ARRAY_BUFFER, 0);

        log::info!(
            "Uploaded {} particles ({} bytes)",
            particles.len(),
            byte_size
        );

        Ok(Self {
            buffer,
            vertex_array,
            particle_count: particles.len(),
        })
    }

    /// The number of particles in the buffer.
    pub fn particle_count(&self) -> usize {
        self.particle_count
    }

    pub fn is_empty(&self) -> bool {
        self.particle_count == 0
    }

    /// Bind the buffer where the compute shader expects it.
    ///
    /// # Safety
    ///
    /// Unsafe because:
    ///   - the buffer's OpenGL context must be current on this thread.
    pub unsafe fn bind_storage(&self) {
        gl::BindBufferBase(
            gl::SHADER_STORAGE_BUFFER,
            PARTICLE_STORAGE_BINDING,
            self.buffer,
        );
    }

    /// Bind the vertex array for drawing.
    ///
    /// # Safety
    ///
    /// Unsafe because:
    ///   - the buffer's OpenGL context must be current on this thread.
    pub unsafe fn bind_vertex_array(&self) {
        gl::BindVertexArray(self.vertex_array);
    }
}

impl Drop for ParticleBuffer {
    /// # DANGER
    ///
    /// The buffer's OpenGL context must still be current when this instance
    /// is dropped.
    fn drop(&mut self) {
        unsafe {
            gl::DeleteVertexArrays(1, &self.vertex_array);
            gl::DeleteBuffers(1, &self.buffer);
        }
    }
}
