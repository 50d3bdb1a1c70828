use std::{ffi::NulError, path::PathBuf};

use thiserror::Error;

#[derive(Error, Debug)]
pub enum GraphicsError {
    #[error("Unable to read the shader source at {:?}", .0)]
    UnableToReadShaderSource(PathBuf, #[source] std::io::Error),

    #[error("The shader source at {:?} contains a nul byte", .0)]
    InvalidShaderSource(PathBuf, #[source] NulError),

    #[error("Unable to compile the shader at {:?}\n{}", .0, .1)]
    ShaderCompileFailed(PathBuf, String),

    #[error("Unable to link the {} program\n{}", .0, .1)]
    ProgramLinkFailed(&'static str, String),

    #[error("The driver was unable to create a {}", .0)]
    UnableToCreateObject(&'static str),
}
