use std::path::Path;

use image::RgbaImage;
use rand::{rngs::StdRng, Rng, SeedableRng};

use super::{GridLayout, ImageSampler, Particle, ParticleError};

/// Build the particle grid, sampling colors from two images on disk.
///
/// Any problem with the images is logged and results in an empty grid. The
/// application keeps running, it just has nothing to draw.
pub fn build_particle_grid(
    layout: &GridLayout,
    start_image: &Path,
    end_image: &Path,
    seed: u64,
) -> Vec<Particle> {
    match try_build_particle_grid(layout, start_image, end_image, seed) {
        Ok(particles) => particles,
        Err(error) => {
            log::error!("Unable to build the particle grid: {:?}", error);
            vec![]
        }
    }
}

/// Build the particle grid, sampling colors from two images on disk.
pub fn try_build_particle_grid(
    layout: &GridLayout,
    start_image: &Path,
    end_image: &Path,
    seed: u64,
) -> Result<Vec<Particle>, ParticleError> {
    let start = load_rgba(start_image)?;
    let end = load_rgba(end_image)?;
    log::info!(
        "Sampling {}x{} particles from {:?} ({}x{}) and {:?} ({}x{})",
        layout.rows,
        layout.cols,
        start_image,
        start.width(),
        start.height(),
        end_image,
        end.width(),
        end.height(),
    );
    particles_from_images(layout, &start, &end, seed)
}

/// Build the particle grid from already-decoded images.
///
/// Fails when either image has no pixels. The result is fully determined by
/// the inputs, including the random acceleration jitter.
pub fn particles_from_images(
    layout: &GridLayout,
    start_image: &RgbaImage,
    end_image: &RgbaImage,
    seed: u64,
) -> Result<Vec<Particle>, ParticleError> {
    if is_empty(start_image) {
        return Err(ParticleError::EmptyImage("start image".to_owned()));
    }
    if is_empty(end_image) {
        return Err(ParticleError::EmptyImage("end image".to_owned()));
    }

    let start_sampler = ImageSampler::new(start_image, layout.rows, layout.cols);
    let end_sampler = ImageSampler::new(end_image, layout.rows, layout.cols);
    let mut rng = StdRng::seed_from_u64(seed);

    let particles = (0..layout.particle_count())
        .map(|index| {
            let (row, col) = layout.cell(index);
            let [x, y, z] = layout.world_position(row, col);
            Particle {
                original_pos: [x, y, z, 0.0],
                pos: [x, y, z, 0.0],
                start_color: start_sampler.sample(row, col),
                end_color: end_sampler.sample(row, col),
                acceleration: random_acceleration(&mut rng),
                velocity: [0.0; 4],
            }
        })
        .collect();
    Ok(particles)
}

fn is_empty(image: &RgbaImage) -> bool {
    image.width() == 0 || image.height() == 0
}

/// A tiny jitter sideways plus a small pull downward.
fn random_acceleration(rng: &mut impl Rng) -> [f32; 4] {
    let lateral = rng.gen::<f64>() / 1000.0 - rng.gen::<f64>() / 1000.0;
    let fall = rng.gen::<f64>() / 100.0;
    [(lateral / 100.0) as f32, (-fall / 100.0) as f32, 0.0, 0.0]
}

fn load_rgba(path: &Path) -> Result<RgbaImage, ParticleError> {
    let image = image::open(path)
        .map_err(|err| ParticleError::UnableToLoadImage(path.to_owned(), err))?
        .into_rgba8();
    if is_empty(&image) {
        return Err(ParticleError::EmptyImage(format!("image at {:?}", path)));
    }
    Ok(image)
}
