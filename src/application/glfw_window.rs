use std::{
    ffi::CStr,
    os::raw::c_char,
    sync::mpsc::Receiver,
};

use glfw::{
    Context, OpenGlProfileHint, SwapInterval, WindowEvent, WindowHint,
    WindowMode,
};

use crate::{application::WindowError, config::Config, logging::PrettyList};

/// The OpenGL version required for compute shaders.
const GL_VERSION: (u32, u32) = (4, 3);

/// GLFW uses a Receiver for accepting window events. This type alias is more
/// convenient to write/read than the full name.
pub type EventReceiver = Receiver<(f64, WindowEvent)>;

/// All resources required for running a single-windowed GLFW application which
/// renders graphics using OpenGL.
///
/// GlfwWindow derefs as a raw GLFW window handle so application state can
/// configure the window however is convenient.
pub struct GlfwWindow {
    window_pos: (i32, i32),
    window_size: (i32, i32),
    window_handle: glfw::Window,

    /// The receiver for the Window's events.
    event_receiver: Option<EventReceiver>,

    /// The GLFW library instance.
    glfw: glfw::Glfw,
}

impl GlfwWindow {
    /// Create a new GLFW window with a current OpenGL context.
    ///
    /// The window starts in "windowed" mode and can be toggled into fullscreen
    /// or resized by the application. OpenGL function pointers are loaded
    /// before this returns.
    pub fn new(config: &Config) -> Result<Self, WindowError> {
        let mut glfw = glfw::init(glfw::FAIL_ON_ERRORS)?;

        let (major, minor) = GL_VERSION;
        glfw.window_hint(WindowHint::ContextVersion(major, minor));
        glfw.window_hint(WindowHint::OpenGlProfile(OpenGlProfileHint::Core));
        glfw.window_hint(WindowHint::OpenGlForwardCompat(true));
        glfw.window_hint(WindowHint::Resizable(true));

        let (mut window_handle, event_receiver) = glfw
            .create_window(
                config.window_width,
                config.window_height,
                &config.window_title,
                WindowMode::Windowed,
            )
            .ok_or(WindowError::WindowCreateFailed(
                config.window_width,
                config.window_height,
                major,
                minor,
            ))?;

        window_handle.make_current();
        gl::load_with(|symbol| window_handle.get_proc_address(symbol) as *const _);
        log_context_info();

        glfw.set_swap_interval(if config.vsync {
            SwapInterval::Sync(1)
        } else {
            SwapInterval::None
        });

        window_handle.set_key_polling(true);
        window_handle.set_framebuffer_size_polling(true);

        Ok(Self {
            window_pos: window_handle.get_pos(),
            window_size: window_handle.get_size(),
            event_receiver: Some(event_receiver),
            window_handle,
            glfw,
        })
    }

    /// Take ownership of this window's event reciever. This receiver can then
    /// be used to flush window events.
    pub fn take_event_receiver(
        &mut self,
    ) -> Result<EventReceiver, WindowError> {
        self.event_receiver
            .take()
            .ok_or(WindowError::EventReceiverLost)
    }

    /// Poll GLFW for window events and flush out into an iterator.
    pub fn flush_window_events<'events>(
        &mut self,
        event_receiver: &'events EventReceiver,
    ) -> glfw::FlushedMessages<'events, (f64, WindowEvent)> {
        self.glfw.poll_events();
        glfw::flush_messages(event_receiver)
    }

    /// Toggle application fullscreen.
    ///
    /// If the window is currently windowed then swap to fullscreen using
    /// whatever the primary monitor advertises as the primary video mode.
    ///
    /// If the window is currently fullscreen, then swap to windowed and
    /// restore the window's previous size and location.
    pub fn toggle_fullscreen(&mut self) -> Result<(), WindowError> {
        let is_fullscreen =
            self.window_handle.with_window_mode(|mode| match mode {
                WindowMode::Windowed => false,
                WindowMode::FullScreen(_) => true,
            });

        if is_fullscreen {
            let (x, y) = self.window_pos;
            let (w, h) = self.window_size;
            self.window_handle.set_monitor(
                WindowMode::Windowed,
                x,
                y,
                w as u32,
                h as u32,
                None,
            );
        } else {
            // Record the size and position of the non-fullscreen window
            // before switching modes.
            self.window_size = self.window_handle.get_size();
            self.window_pos = self.window_handle.get_pos();
            let window = &mut self.window_handle;
            self.glfw.with_primary_monitor_mut(
                |_, monitor_opt| -> Result<(), WindowError> {
                    let monitor =
                        monitor_opt.ok_or(WindowError::NoPrimaryMonitor)?;
                    let video_mode = monitor
                        .get_video_mode()
                        .ok_or(WindowError::PrimaryVideoModeMissing)?;
                    window.set_monitor(
                        WindowMode::FullScreen(monitor),
                        0,
                        0,
                        video_mode.width,
                        video_mode.height,
                        Some(video_mode.refresh_rate),
                    );
                    Ok(())
                },
            )?;
        }
        Ok(())
    }
}

impl std::ops::Deref for GlfwWindow {
    type Target = glfw::Window;

    fn deref(&self) -> &Self::Target {
        &self.window_handle
    }
}

impl std::ops::DerefMut for GlfwWindow {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.window_handle
    }
}

/// Log which driver is backing the current context.
fn log_context_info() {
    let entries = [
        ("vendor", gl::VENDOR),
        ("renderer", gl::RENDERER),
        ("version", gl::VERSION),
        ("glsl", gl::SHADING_LANGUAGE_VERSION),
    ]
    .iter()
    .map(|&(label, name)| format!("{}: {}", label, gl_string(name)))
    .collect::<Vec<String>>();
    log::info!("OpenGL context {}", PrettyList(&entries));
}

fn gl_string(name: gl::types::GLenum) -> String {
    // Safe because the context was made current and the function pointers
    // were loaded before this is called. GetString returns either null or a
    // static, nul-terminated string owned by the driver.
    unsafe {
        let ptr = gl::GetString(name);
        if ptr.is_null() {
            return "<unknown>".to_owned();
        }
        CStr::from_ptr(ptr as *const c_char)
            .to_string_lossy()
            .into_owned()
    }
}
