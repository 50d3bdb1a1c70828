use thiserror::Error;

/// Window Errors represent things which can go wrong while creating and
/// manipulating the GLFW window and its OpenGL context.
#[derive(Debug, Error)]
pub enum WindowError {
    #[error("Failed to initialize the GLFW library")]
    UnableToInitGLFW(#[from] glfw::InitError),

    #[error("Unable to create a {0}x{1} window with an OpenGL {2}.{3} core context")]
    WindowCreateFailed(u32, u32, u32, u32),

    #[error("The Window's event reciever has already been taken")]
    EventReceiverLost,

    #[error("There is no primary monitor available to this GLFW instance")]
    NoPrimaryMonitor,

    #[error("There is no video mode associated with the primary monitor")]
    PrimaryVideoModeMissing,
}
