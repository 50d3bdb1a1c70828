use crate::{
    animation::AnimationState,
    config::Config,
    graphics::{
        GraphicsError, ParticleBuffer, ParticleIntegrator, ParticleRenderer,
        Transforms,
    },
    math::{projections, view, Mat4},
    particles::Particle,
};

/// Near and far planes of the orthographic projection.
const NEAR_PLANE: f32 = 0.1;
const FAR_PLANE: f32 = 1000.0;

/// Build the transforms which fit the world rectangle to the viewport.
pub fn scene_transforms(world_width: f32, world_height: f32) -> Transforms {
    let half_width = world_width / 2.0;
    let half_height = world_height / 2.0;
    Transforms {
        projection: projections::ortho(
            -half_width,
            half_width,
            -half_height,
            half_height,
            NEAR_PLANE,
            FAR_PLANE,
        ),
        camera: view::look_at([0.0, 0.0, 1.0], [0.0, 0.0, 0.0], [0.0, 1.0, 0.0]),
        model: Mat4::identity(),
    }
}

/// Every GPU resource needed to integrate and draw the particles.
pub struct ParticleScene {
    particles: ParticleBuffer,
    integrator: ParticleIntegrator,
    renderer: ParticleRenderer,
    transforms: Transforms,
    viewport: (i32, i32),
}

impl ParticleScene {
    /// Compile both programs and upload the particles.
    ///
    /// # Safety
    ///
    /// Unsafe because:
    ///   - an OpenGL context must be current on this thread and must outlive
    ///     the returned scene.
    pub unsafe fn new(
        config: &Config,
        particles: &[Particle],
        framebuffer_size: (i32, i32),
    ) -> Result<Self, GraphicsError> {
        let renderer = ParticleRenderer::new(
            &config.shaders.vertex,
            &config.shaders.fragment,
        )?;
        let integrator = ParticleIntegrator::new(&config.shaders.compute)?;
        let particles = ParticleBuffer::new(particles)?;
        Ok(Self {
            particles,
            integrator,
            renderer,
            transforms: scene_transforms(config.world_width, config.world_height),
            viewport: framebuffer_size,
        })
    }

    /// Track the framebuffer size for the next frame's viewport.
    pub fn resize(&mut self, framebuffer_size: (i32, i32)) {
        self.viewport = framebuffer_size;
    }

    pub fn particle_count(&self) -> usize {
        self.particles.particle_count()
    }

    /// Integrate and draw one frame.
    ///
    /// The compute dispatch and its memory barrier always come before the
    /// draw call which reads the particles.
    ///
    /// # Safety
    ///
    /// Unsafe because:
    ///   - the scene's OpenGL context must be current on this thread.
    pub unsafe fn render_frame(&self, animation: &AnimationState) {
        self.integrator.integrate(
            &self.particles,
            animation.last_interval(),
            animation.collapse_flag(),
        );

        let (width, height) = self.viewport;
        gl::BindFramebuffer(gl::FRAMEBUFFER, 0);
        gl::Viewport(0, 0, width, height);
        gl::Enable(gl::DEPTH_TEST);
        gl::Enable(gl::BLEND);
        gl::BlendFunc(gl::ONE, gl::ONE);
        gl::ClearColor(0.0, 0.0, 0.0, 1.0);
        gl::Clear(gl::COLOR_BUFFER_BIT | gl::DEPTH_BUFFER_BIT);

        self.renderer.draw(
            &self.particles,
            &self.transforms,
            animation.color_interpolation(),
        );
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use nalgebra::Vector4;

    #[test]
    fn world_corners_fill_the_viewport() {
        let transforms = scene_transforms(100.0, 100.0);
        let to_clip = transforms.projection * transforms.camera * transforms.model;

        let corner = to_clip * Vector4::new(-50.0, -50.0, -10.0, 1.0);
        assert!((corner.x + 1.0).abs() < 1e-5);
        assert!((corner.y + 1.0).abs() < 1e-5);

        let corner = to_clip * Vector4::new(50.0, 50.0, -10.0, 1.0);
        assert!((corner.x - 1.0).abs() < 1e-5);
        assert!((corner.y - 1.0).abs() < 1e-5);
        assert!(corner.z > -1.0 && corner.z < 1.0);
    }
}
