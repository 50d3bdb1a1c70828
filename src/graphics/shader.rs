use std::{
    ffi::CString,
    path::{Path, PathBuf},
};

use gl::types::{GLchar, GLenum, GLint, GLuint};

use crate::graphics::GraphicsError;

/// An owned OpenGL shader program which is deleted automatically when it
/// falls out of scope.
pub struct ShaderProgram {
    raw: GLuint,
    label: &'static str,
}

impl ShaderProgram {
    /// Compile and link a vertex + fragment program from GLSL files.
    ///
    /// # Safety
    ///
    /// Unsafe because:
    ///   - an OpenGL context must be current on this thread and must outlive
    ///     the returned program.
    pub unsafe fn from_render_files(
        vertex: &Path,
        fragment: &Path,
    ) -> Result<Self, GraphicsError> {
        let vertex_shader = compile_shader_file(vertex, gl::VERTEX_SHADER)?;
        let fragment_shader =
            match compile_shader_file(fragment, gl::FRAGMENT_SHADER) {
                Ok(shader) => shader,
                Err(err) => {
                    gl::DeleteShader(vertex_shader);
                    return Err(err);
                }
            };
        link_program("render", &[vertex_shader, fragment_shader])
    }

    /// Compile and link a compute program from a GLSL file.
    ///
    /// # Safety
    ///
    /// Unsafe because:
    ///   - an OpenGL context must be current on this thread and must outlive
    ///     the returned program.
    pub unsafe fn from_compute_file(
        compute: &Path,
    ) -> Result<Self, GraphicsError> {
        let compute_shader = compile_shader_file(compute, gl::COMPUTE_SHADER)?;
        link_program("compute", &[compute_shader])
    }

    /// Get the raw program handle.
    ///
    /// # Safety
    ///
    /// Unsafe because:
    ///   - Ownership is not transferred. The application must not use the
    ///     handle after the ShaderProgram is dropped.
    pub unsafe fn raw(&self) -> GLuint {
        self.raw
    }

    /// Find a uniform by name.
    ///
    /// Returns -1 when the uniform does not exist or was optimized away by
    /// the driver. OpenGL silently ignores writes to location -1, so a
    /// warning is logged instead of failing.
    ///
    /// # Safety
    ///
    /// Unsafe because:
    ///   - the program's OpenGL context must be current on this thread.
    pub unsafe fn uniform_location(&self, name: &str) -> GLint {
        let c_name = match CString::new(name) {
            Ok(c_name) => c_name,
            Err(_) => return -1,
        };
        let location = gl::GetUniformLocation(self.raw, c_name.as_ptr());
        if location < 0 {
            log::warn!(
                "The {} program has no active uniform named {:?}",
                self.label,
                name
            );
        }
        location
    }
}

impl Drop for ShaderProgram {
    /// # DANGER
    ///
    /// The program's OpenGL context must still be current when this instance
    /// is dropped.
    fn drop(&mut self) {
        unsafe {
            gl::DeleteProgram(self.raw);
        }
    }
}

/// Read a GLSL file and compile it into a shader object.
unsafe fn compile_shader_file(
    path: &Path,
    shader_type: GLenum,
) -> Result<GLuint, GraphicsError> {
    let source = std::fs::read_to_string(path).map_err(|err| {
        GraphicsError::UnableToReadShaderSource(path.to_owned(), err)
    })?;
    log::debug!("Compiling shader {:?}", path);
    compile_shader(path.to_owned(), &source, shader_type)
}

unsafe fn compile_shader(
    path: PathBuf,
    source: &str,
    shader_type: GLenum,
) -> Result<GLuint, GraphicsError> {
    let c_source = CString::new(source)
        .map_err(|err| GraphicsError::InvalidShaderSource(path.clone(), err))?;

    let shader = gl::CreateShader(shader_type);
    if shader == 0 {
        return Err(GraphicsError::UnableToCreateObject("shader"));
    }
    gl::ShaderSource(shader, 1, &c_source.as_ptr(), std::ptr::null());
    gl::CompileShader(shader);

    let mut status = gl::FALSE as GLint;
    gl::GetShaderiv(shader, gl::COMPILE_STATUS, &mut status);
    if status != gl::TRUE as GLint {
        let info_log = read_info_log(shader, gl::GetShaderiv, gl::GetShaderInfoLog);
        gl::DeleteShader(shader);
        return Err(GraphicsError::ShaderCompileFailed(path, info_log));
    }
    Ok(shader)
}

/// Link compiled shaders into a program. The shader objects are always
/// deleted, whether or not linking succeeds.
unsafe fn link_program(
    label: &'static str,
    shaders: &[GLuint],
) -> Result<ShaderProgram, GraphicsError> {
    let program = gl::CreateProgram();
    if program == 0 {
        for &shader in shaders {
            gl::DeleteShader(shader);
        }
        return Err(GraphicsError::UnableToCreateObject("program"));
    }

    for &shader in shaders {
        gl::AttachShader(program, shader);
    }
    gl::LinkProgram(program);
    for &shader in shaders {
        gl::DetachShader(program, shader);
        gl::DeleteShader(shader);
    }

    let mut status = gl::FALSE as GLint;
    gl::GetProgramiv(program, gl::LINK_STATUS, &mut status);
    if status != gl::TRUE as GLint {
        let info_log =
            read_info_log(program, gl::GetProgramiv, gl::GetProgramInfoLog);
        gl::DeleteProgram(program);
        return Err(GraphicsError::ProgramLinkFailed(label, info_log));
    }

    log::debug!("Linked the {} program", label);
    Ok(ShaderProgram {
        raw: program,
        label,
    })
}

/// Shaders and programs share the same shape of info log query.
unsafe fn read_info_log(
    object: GLuint,
    get_iv: unsafe fn(GLuint, GLenum, *mut GLint),
    get_log: unsafe fn(GLuint, i32, *mut i32, *mut GLchar),
) -> String {
    let mut log_length: GLint = 0;
    get_iv(object, gl::INFO_LOG_LENGTH, &mut log_length);
    if log_length <= 0 {
        return String::new();
    }

    let mut buffer = vec![0u8; log_length as usize];
    let mut written: GLint = 0;
    get_log(
        object,
        log_length,
        &mut written,
        buffer.as_mut_ptr() as *mut GLchar,
    );
    buffer.truncate(written.max(0) as usize);
    String::from_utf8_lossy(&buffer).trim_end().to_owned()
}
