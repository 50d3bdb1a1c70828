//! Run configuration.
//!
//! Everything that used to be a fixed constant (window size, grid size, asset
//! paths) lives here. A config is validated exactly once, before any window or
//! GPU resource is created.

use std::path::PathBuf;

use thiserror::Error;

use crate::particles::GridLayout;

/// Things which can be wrong with a configuration.
#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("The window must have a non-zero size, got {0}x{1}")]
    InvalidWindowSize(u32, u32),

    #[error("The particle grid must have at least one row and one column, got {rows}x{cols}")]
    EmptyGrid { rows: u32, cols: u32 },

    #[error("A {rows}x{cols} particle grid is too large to draw in one call")]
    GridTooLarge { rows: u32, cols: u32 },

    #[error("The world rectangle must have a positive size, got {0}x{1}")]
    InvalidWorldSize(f32, f32),

    #[error("The collapse duration must be positive, got {0}")]
    InvalidCollapseDuration(f32),

    #[error("The fps limit must be non-zero")]
    InvalidFpsLimit,

    #[error("The fps report interval must be at least one frame")]
    InvalidFpsReportInterval,
}

/// Paths to the GLSL sources for both GPU programs.
#[derive(Debug, Clone, PartialEq)]
pub struct ShaderPaths {
    pub vertex: PathBuf,
    pub fragment: PathBuf,
    pub compute: PathBuf,
}

impl Default for ShaderPaths {
    fn default() -> Self {
        Self {
            vertex: PathBuf::from("shaders/particles.vert"),
            fragment: PathBuf::from("shaders/particles.frag"),
            compute: PathBuf::from("shaders/particles.comp"),
        }
    }
}

/// Everything needed to start a run.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub window_title: String,
    pub window_width: u32,
    pub window_height: u32,

    /// The number of particle rows.
    pub rows: u32,

    /// The number of particle columns.
    pub cols: u32,

    /// Width of the world-space rectangle covered by the particle grid.
    pub world_width: f32,

    /// Height of the world-space rectangle covered by the particle grid.
    pub world_height: f32,

    /// Provides each particle's start color.
    pub start_image: PathBuf,

    /// Provides each particle's end color.
    pub end_image: PathBuf,

    pub shaders: ShaderPaths,

    /// Seed for the per-particle acceleration jitter.
    pub random_seed: u64,

    /// Seconds needed for the color interpolation to go from 0 to 1 once the
    /// collapse starts.
    pub collapse_duration: f32,

    pub vsync: bool,

    /// Optional cap on the frame rate, mostly useful when vsync is off.
    pub fps_limit: Option<u32>,

    /// The window title shows the fps once every this many frames.
    pub fps_report_interval: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            window_title: "Particle Image".to_owned(),
            window_width: 1000,
            window_height: 1000,
            rows: 1000,
            cols: 1000,
            world_width: 100.0,
            world_height: 100.0,
            start_image: PathBuf::from("assets/start.png"),
            end_image: PathBuf::from("assets/end.png"),
            shaders: ShaderPaths::default(),
            random_seed: 42,
            collapse_duration: 5.0,
            vsync: true,
            fps_limit: None,
            fps_report_interval: 60,
        }
    }
}

impl Config {
    /// Check every field, returning the first problem found.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.window_width == 0 || self.window_height == 0 {
            return Err(ConfigError::InvalidWindowSize(
                self.window_width,
                self.window_height,
            ));
        }
        if self.rows == 0 || self.cols == 0 {
            return Err(ConfigError::EmptyGrid {
                rows: self.rows,
                cols: self.cols,
            });
        }

        // glDrawArrays takes the vertex count as a GLsizei.
        let particle_count = self.rows as u64 * self.cols as u64;
        if particle_count > i32::MAX as u64 {
            return Err(ConfigError::GridTooLarge {
                rows: self.rows,
                cols: self.cols,
            });
        }

        if !(self.world_width > 0.0 && self.world_height > 0.0) {
            return Err(ConfigError::InvalidWorldSize(
                self.world_width,
                self.world_height,
            ));
        }
        if !(self.collapse_duration > 0.0) {
            return Err(ConfigError::InvalidCollapseDuration(
                self.collapse_duration,
            ));
        }
        if self.fps_limit == Some(0) {
            return Err(ConfigError::InvalidFpsLimit);
        }
        if self.fps_report_interval == 0 {
            return Err(ConfigError::InvalidFpsReportInterval);
        }
        Ok(())
    }

    /// The grid layout described by this config.
    pub fn grid_layout(&self) -> GridLayout {
        GridLayout {
            rows: self.rows,
            cols: self.cols,
            width: self.world_width,
            height: self.world_height,
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        assert_eq!(Config::default().validate(), Ok(()));
    }

    #[test]
    fn rejects_zero_window() {
        let config = Config {
            window_height: 0,
            ..Default::default()
        };
        assert_eq!(
            config.validate(),
            Err(ConfigError::InvalidWindowSize(1000, 0))
        );
    }

    #[test]
    fn rejects_empty_grid() {
        let config = Config {
            cols: 0,
            ..Default::default()
        };
        assert_eq!(
            config.validate(),
            Err(ConfigError::EmptyGrid { rows: 1000, cols: 0 })
        );
    }

    #[test]
    fn rejects_grid_larger_than_a_draw_call() {
        let config = Config {
            rows: 65536,
            cols: 65536,
            ..Default::default()
        };
        assert_eq!(
            config.validate(),
            Err(ConfigError::GridTooLarge {
                rows: 65536,
                cols: 65536
            })
        );
    }

    #[test]
    fn rejects_degenerate_world() {
        let config = Config {
            world_width: -1.0,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidWorldSize(_, _))
        ));

        let config = Config {
            world_height: f32::NAN,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidWorldSize(_, _))
        ));
    }

    #[test]
    fn rejects_bad_timing() {
        let config = Config {
            collapse_duration: 0.0,
            ..Default::default()
        };
        assert_eq!(
            config.validate(),
            Err(ConfigError::InvalidCollapseDuration(0.0))
        );

        let config = Config {
            fps_limit: Some(0),
            ..Default::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::InvalidFpsLimit));

        let config = Config {
            fps_report_interval: 0,
            ..Default::default()
        };
        assert_eq!(
            config.validate(),
            Err(ConfigError::InvalidFpsReportInterval)
        );
    }

    #[test]
    fn grid_layout_matches_fields() {
        let config = Config {
            rows: 3,
            cols: 4,
            world_width: 10.0,
            world_height: 20.0,
            ..Default::default()
        };
        assert_eq!(
            config.grid_layout(),
            GridLayout {
                rows: 3,
                cols: 4,
                width: 10.0,
                height: 20.0
            }
        );
    }
}
