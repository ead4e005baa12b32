//! Logger setup and the GL debug-output bridge.
use std::{
    ffi::{c_char, c_void, CStr},
    ptr::null,
    sync::Once,
};

/// Settings for [`init_logging`].
#[derive(Debug, Clone, Default)]
pub struct LoggingConfig {
    /// Filter directives such as `"gl_triangles=debug,gl=warn"`.
    /// Unset means `RUST_LOG`, or `info` when that is unset too.
    pub filter: Option<String>,
    /// Force colors on or off. Unset leaves it to terminal detection.
    pub color: Option<bool>,
}

static LOGGER: Once = Once::new();

/// Install `env_logger` as the `log` backend. Only the first call has any effect.
pub fn init_logging(config: LoggingConfig) {
    LOGGER.call_once(|| {
        let filter = config
            .filter
            .or_else(|| std::env::var("RUST_LOG").ok())
            .unwrap_or_else(|| "info".to_string());

        env_logger::Builder::new()
            .parse_filters(&filter)
            .write_style(match config.color {
                Some(true) => env_logger::WriteStyle::Always,
                Some(false) => env_logger::WriteStyle::Never,
                None => env_logger::WriteStyle::Auto,
            })
            .init();

        log::debug!("logger installed with filter '{filter}'");
    });
}

/// Map a `GL_DEBUG_SEVERITY_*` value to a log level.
pub fn gl_severity_level(severity: gl::types::GLenum) -> log::Level {
    match severity {
        gl::DEBUG_SEVERITY_HIGH => log::Level::Error,
        gl::DEBUG_SEVERITY_MEDIUM => log::Level::Warn,
        gl::DEBUG_SEVERITY_LOW => log::Level::Info,
        _ => log::Level::Debug,
    }
}

extern "system" fn gl_debug_output(
    _source: gl::types::GLenum,
    _output_type: gl::types::GLenum,
    id: gl::types::GLuint,
    severity: gl::types::GLenum,
    _length: gl::types::GLsizei,
    message: *const c_char,
    _user_param: *mut c_void,
) {
    if message.is_null() {
        return;
    }
    // SAFETY:
    // GL hands us a NUL terminated string valid for the duration of the callback.
    let message = unsafe { CStr::from_ptr(message) }.to_string_lossy();
    log::log!(target: "gl", gl_severity_level(severity), "[{id}] {message}");
}

/// Route `KHR_debug` messages into the logger.
///
/// Does nothing on contexts without debug output (before GL 4.3).
pub fn install_gl_debug_output() {
    if !gl::DebugMessageCallback::is_loaded() {
        log::debug!("GL debug output unavailable");
        return;
    }
    unsafe {
        gl::Enable(gl::DEBUG_OUTPUT);
        gl::Enable(gl::DEBUG_OUTPUT_SYNCHRONOUS);
        gl::DebugMessageCallback(Some(gl_debug_output), null());
    }
}
