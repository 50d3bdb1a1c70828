mod grid;
mod sampling;

use std::path::PathBuf;

use thiserror::Error;

pub use self::{
    grid::{build_particle_grid, particles_from_images, try_build_particle_grid},
    sampling::{grid_to_pixel, ImageSampler},
};

/// The depth at which every particle starts.
pub const PARTICLE_DEPTH: f32 = -10.0;

/// Errors which can occur while building the particle grid.
#[derive(Debug, Error)]
pub enum ParticleError {
    #[error("Unable to load the image at {:?}", .0)]
    UnableToLoadImage(PathBuf, #[source] image::ImageError),

    #[error("The {} has no pixels", .0)]
    EmptyImage(String),
}

/// The datastructure used to represent a particle on the CPU and GPU.
///
/// Every field is a vec4 so the record matches the std430 layout used by the
/// compute shader. The w component of the positions, acceleration and
/// velocity is padding.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
#[repr(C)]
pub struct Particle {
    pub original_pos: [f32; 4],
    pub pos: [f32; 4],
    pub start_color: [f32; 4],
    pub end_color: [f32; 4],
    pub acceleration: [f32; 4],
    pub velocity: [f32; 4],
}

/// The shape of the particle grid and the world-space rectangle it covers.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct GridLayout {
    pub rows: u32,
    pub cols: u32,
    pub width: f32,
    pub height: f32,
}

impl GridLayout {
    /// The total number of particles in the grid.
    pub fn particle_count(&self) -> usize {
        self.rows as usize * self.cols as usize
    }

    /// The (row, col) for a row-major particle index.
    pub fn cell(&self, index: usize) -> (u32, u32) {
        let cols = self.cols as usize;
        ((index / cols) as u32, (index % cols) as u32)
    }

    /// The world-space position of a grid cell.
    ///
    /// Cell (0, 0) sits at the bottom left corner of the rectangle, which is
    /// centered on the origin.
    pub fn world_position(&self, row: u32, col: u32) -> [f32; 3] {
        let width_factor = self.width / self.cols as f32;
        let height_factor = self.height / self.rows as f32;
        [
            col as f32 * width_factor - self.width / 2.0,
            row as f32 * height_factor - self.height / 2.0,
            PARTICLE_DEPTH,
        ]
    }
}
