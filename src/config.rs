//! Startup configuration for the demos.
//!
//! Everything platform dependent (context version, GLSL dialect) is decided
//! here once and handed down, so nothing below needs `cfg` branches.
use std::{env, fmt, path::PathBuf, str::FromStr};

/// Target GLSL version, written into `#version` directives.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GlslVersion(pub u16);

impl GlslVersion {
    /// GLSL 3.30, paired with a GL 3.3 core context.
    pub const V330: Self = Self(330);
    /// GLSL 4.10, the newest macOS ships.
    pub const V410: Self = Self(410);

    /// The version a core context on this host is expected to support.
    pub fn for_host() -> Self {
        if cfg!(target_os = "macos") {
            Self::V410
        } else {
            Self::V330
        }
    }

    /// The `#version` line for a core-profile shader.
    pub fn directive(self) -> String {
        format!("#version {} core", self.0)
    }

    /// The `major.minor` GL context version that introduced this GLSL version.
    pub fn context_version(self) -> (u8, u8) {
        match self.0 {
            0..=149 => (3, 0),
            150..=329 => (3, 2),
            330..=399 => (3, 3),
            v => (4, ((v - 400) / 10).min(6) as u8),
        }
    }
}

impl Default for GlslVersion {
    fn default() -> Self {
        Self::for_host()
    }
}

impl fmt::Display for GlslVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Error from parsing a [`GlslVersion`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseGlslVersionError(String);

impl fmt::Display for ParseGlslVersionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid GLSL version '{}', expected e.g. 330 or 410", self.0)
    }
}

impl std::error::Error for ParseGlslVersionError {}

impl FromStr for GlslVersion {
    type Err = ParseGlslVersionError;

    /// Accepts `330`, `4.10`, `410 core` and the like.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let number = trimmed
            .strip_suffix("core")
            .unwrap_or(trimmed)
            .trim()
            .replace('.', "");
        match number.parse::<u16>() {
            Ok(v) if (100..=460).contains(&v) && v % 10 == 0 => Ok(Self(v)),
            _ => Err(ParseGlslVersionError(s.to_string())),
        }
    }
}

/// Window, context and asset settings for a demo program.
#[derive(Debug, Clone)]
pub struct DemoConfig {
    pub title: String,
    pub width: u32,
    pub height: u32,
    /// GLSL version injected into sources that don't carry their own.
    pub glsl_version: GlslVersion,
    /// Requested `major.minor` core context.
    pub gl_version: (u8, u8),
    pub vsync: bool,
    /// Upper bound on frames per second when vsync is off.
    pub soft_fps_cap: u64,
    /// Directory relative shader paths resolve against.
    pub shader_dir: PathBuf,
}

/// Environment variable overriding [`DemoConfig::glsl_version`].
pub const ENV_GLSL_VERSION: &str = "DEMO_GLSL_VERSION";
/// Environment variable overriding [`DemoConfig::shader_dir`].
pub const ENV_SHADER_DIR: &str = "DEMO_SHADER_DIR";
/// Environment variable overriding [`DemoConfig::vsync`].
pub const ENV_VSYNC: &str = "DEMO_VSYNC";

impl Default for DemoConfig {
    fn default() -> Self {
        let glsl_version = GlslVersion::for_host();
        Self {
            title: "gl_triangles".to_string(),
            width: 800,
            height: 600,
            glsl_version,
            gl_version: glsl_version.context_version(),
            vsync: true,
            soft_fps_cap: 1000,
            shader_dir: PathBuf::from(concat!(env!("CARGO_MANIFEST_DIR"), "/shaders")),
        }
    }
}

impl DemoConfig {
    /// Defaults with a different window title.
    pub fn titled(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }

    /// Apply overrides from the process environment.
    ///
    /// # Errors
    /// Errors if `DEMO_GLSL_VERSION` is set but not a valid version.
    pub fn with_env_overrides(self) -> Result<Self, ParseGlslVersionError> {
        self.with_overrides(|key| env::var(key).ok())
    }

    /// Apply overrides looked up through `lookup`.
    pub fn with_overrides(
        mut self,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, ParseGlslVersionError> {
        if let Some(version) = lookup(ENV_GLSL_VERSION) {
            self.glsl_version = version.parse()?;
            self.gl_version = self.glsl_version.context_version();
        }
        if let Some(dir) = lookup(ENV_SHADER_DIR) {
            self.shader_dir = PathBuf::from(dir);
        }
        if let Some(vsync) = lookup(ENV_VSYNC) {
            self.vsync = !matches!(vsync.trim(), "0" | "false" | "off" | "no");
        }
        Ok(self)
    }
}
