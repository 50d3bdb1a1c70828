//! The windowed application and its main loop.
//!
//! # Example
//!
//! ```no_run
//! use particle_image::{application::Application, config::Config};
//!
//! Application::new(Config::default())?.run()?;
//! # Ok::<(), anyhow::Error>(())
//! ```

mod error;
mod glfw_window;
mod key_bindings;

use anyhow::{Context, Result};
use glfw::WindowEvent;

pub use self::{
    error::WindowError,
    glfw_window::{EventReceiver, GlfwWindow},
    key_bindings::{command_for, Command, HELP_TEXT},
};
use crate::{
    animation::AnimationState, config::Config, graphics::ParticleScene,
    particles::build_particle_grid, timing::FrameTimer,
};

/// The application's state.
///
/// Fields are dropped in declaration order, so every GPU resource is released
/// while the window's OpenGL context is still alive.
pub struct Application {
    scene: ParticleScene,
    animation: AnimationState,
    timer: FrameTimer,
    config: Config,
    events: EventReceiver,
    window: GlfwWindow,
}

impl Application {
    /// Build a new instance of the application.
    ///
    /// Returns `Err()` if the config is invalid, the window or context cannot
    /// be created, or either shader program fails to build. Images which
    /// cannot be loaded only result in an empty particle grid.
    pub fn new(config: Config) -> Result<Self> {
        config.validate().context("Invalid configuration")?;

        let mut window = GlfwWindow::new(&config)
            .context("Unable to create the application window")?;
        let events = window.take_event_receiver()?;

        let particles = build_particle_grid(
            &config.grid_layout(),
            &config.start_image,
            &config.end_image,
            config.random_seed,
        );

        // Safe because the window's context was made current on this thread
        // when it was created, and the scene is dropped before the window.
        let scene = unsafe {
            ParticleScene::new(&config, &particles, window.get_framebuffer_size())
                .context("Unable to create the GPU resources")?
        };
        log::info!(
            "Ready with {} particles, press H for help",
            scene.particle_count()
        );

        Ok(Self {
            scene,
            animation: AnimationState::new(config.collapse_duration),
            timer: FrameTimer::new(
                config.fps_limit,
                config.fps_report_interval as usize,
            ),
            config,
            events,
            window,
        })
    }

    /// Run the application, blocks until the window is closed.
    pub fn run(mut self) -> Result<()> {
        while !self.window.should_close() {
            self.update();
            glfw::Context::swap_buffers(&mut *self.window);

            let events = self
                .window
                .flush_window_events(&self.events)
                .map(|(_, event)| event)
                .collect::<Vec<WindowEvent>>();
            for event in events {
                self.handle_event(event);
            }

            self.timer.sleep_to_limit();
        }
        Ok(())
    }

    /// Advance the animation and draw one frame.
    fn update(&mut self) {
        let interval = self.timer.start_frame();
        self.animation.advance(interval.as_secs_f32());

        if self.animation.frame_count() % self.config.fps_report_interval == 0
        {
            let title = format!(
                "{} - FPS: {:.2}",
                self.config.window_title,
                self.timer.fps()
            );
            self.window.set_title(&title);
        }

        // Safe because the scene's context is current on this thread for the
        // application's entire lifetime.
        unsafe {
            self.scene.render_frame(&self.animation);
        }
    }

    /// Handle window events and update the application state as needed.
    ///
    /// Nothing here is fatal. Commands which fail are logged and the
    /// application keeps running.
    fn handle_event(&mut self, event: WindowEvent) {
        log::trace!("{:?}", event);
        if let WindowEvent::FramebufferSize(width, height) = event {
            self.scene.resize((width, height));
            return;
        }

        match command_for(&event) {
            Some(Command::Quit) => self.window.set_should_close(true),
            Some(Command::PrintHelp) => println!("{}", HELP_TEXT),
            Some(Command::ToggleCollapse) => self.animation.toggle_collapse(),
            Some(Command::ToggleFullscreen) => {
                let result = self.window.toggle_fullscreen();
                warn_on_failure("toggle fullscreen", result);
            }
            None => (),
        }
    }
}

/// Log a failed runtime command instead of ending the main loop.
///
/// Returns true when the command succeeded.
fn warn_on_failure(command: &str, result: Result<(), WindowError>) -> bool {
    match result {
        Ok(()) => true,
        Err(err) => {
            log::warn!("Unable to {}: {:?}", command, err);
            false
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn missing_monitor_does_not_stop_the_application() {
        assert!(!warn_on_failure(
            "toggle fullscreen",
            Err(WindowError::NoPrimaryMonitor)
        ));
        assert!(!warn_on_failure(
            "toggle fullscreen",
            Err(WindowError::PrimaryVideoModeMissing)
        ));
    }

    #[test]
    fn successful_commands_are_reported() {
        assert!(warn_on_failure("toggle fullscreen", Ok(())));
    }
}
