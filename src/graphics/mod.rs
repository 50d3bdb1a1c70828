//! OpenGL resources for integrating and drawing the particles.
//!
//! Every type here wraps raw GL objects and deletes them on drop, so each
//! must be dropped while its context is still current.

mod error;
mod integrator;
mod particle_buffer;
mod renderer;
mod scene;
mod shader;

pub use self::{
    error::GraphicsError,
    integrator::{work_group_count, ParticleIntegrator, WORK_GROUP_SIZE},
    particle_buffer::{
        particle_attributes, particle_stride, ParticleAttribute,
        ParticleBuffer, END_COLOR_LOCATION, PARTICLE_STORAGE_BINDING,
        POSITION_LOCATION, START_COLOR_LOCATION,
    },
    renderer::{ParticleRenderer, Transforms},
    scene::{scene_transforms, ParticleScene},
    shader::ShaderProgram,
};
