//! Exports [`ShaderProgramBuilder`], the one-call way to get a linked [`Program`].
use std::{fmt, io, path::PathBuf};

use super::{GlApi, GlDriver, Program, Shader, ShaderType};
use crate::source::{SourceLocation, SourceProvider};

/// One stage to compile into a program.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StageSpec {
    pub kind: ShaderType,
    pub location: SourceLocation,
}

impl StageSpec {
    pub fn new(kind: ShaderType, location: SourceLocation) -> Self {
        Self { kind, location }
    }
    /// A stage read from a file.
    pub fn file(kind: ShaderType, path: impl Into<PathBuf>) -> Self {
        Self::new(kind, SourceLocation::path(path))
    }
    /// A stage read from a file, with the kind taken from its extension.
    pub fn from_path(path: impl Into<PathBuf>) -> Option<Self> {
        let path = path.into();
        let kind = ShaderType::from_extension(path.extension()?.to_str()?)?;
        Some(Self::file(kind, path))
    }
    /// A stage compiled from embedded text.
    pub fn inline(kind: ShaderType, text: &'static str) -> Self {
        Self::new(kind, SourceLocation::inline(kind.to_string(), text))
    }
}

/// Make a `Vec<StageSpec>` from file paths.
///
/// # Usage
/// ```no_run
/// let specs = gl_triangles::stages![
///     Vertex => "triangles.vert",
///     Fragment => "triangles.frag",
/// ];
/// ```
#[macro_export]
macro_rules! stages {
    ($($kind:ident => $path:expr),* $(,)?) => {
        vec![
            $($crate::gl_wrappers::StageSpec::file(
                $crate::gl_wrappers::ShaderType::$kind,
                $path,
            )),*
        ]
    };
}

/// Why a program could not be built.
///
/// Every GL object allocated before the failure has already been released.
#[derive(Debug)]
pub enum BuildError {
    /// No stages were given.
    NoStages,
    /// A stage's source text could not be read.
    SourceUnavailable {
        stage: ShaderType,
        location: SourceLocation,
        cause: io::Error,
    },
    /// The driver rejected a stage's source.
    CompileFailed {
        stage: ShaderType,
        location: SourceLocation,
        log: String,
    },
    /// The driver rejected the assembled program.
    LinkFailed { log: String },
}

impl BuildError {
    /// The driver's compile or link log, if this error carries one.
    pub fn driver_log(&self) -> Option<&str> {
        match self {
            BuildError::CompileFailed { log, .. } | BuildError::LinkFailed { log } => Some(log),
            _ => None,
        }
    }
}

impl fmt::Display for BuildError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BuildError::NoStages => write!(f, "no shader stages given"),
            BuildError::SourceUnavailable {
                stage,
                location,
                cause,
            } => write!(f, "cannot read {stage} shader source {location}: {cause}"),
            BuildError::CompileFailed {
                stage,
                location,
                log,
            } => write!(f, "{stage} shader {location} failed to compile:\n{log}"),
            BuildError::LinkFailed { log } => write!(f, "program failed to link:\n{log}"),
        }
    }
}

impl std::error::Error for BuildError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            BuildError::SourceUnavailable { cause, .. } => Some(cause),
            _ => None,
        }
    }
}

/// Compiles and links shader stages into a [`Program`].
///
/// Stateless between calls: every [`build`](Self::build) allocates fresh
/// objects, and a failed build leaves nothing behind.
pub struct ShaderProgramBuilder<P, D: GlDriver = GlApi> {
    driver: D,
    sources: P,
}

impl<P: SourceProvider> ShaderProgramBuilder<P, GlApi> {
    /// A builder on the current GL context.
    pub fn new(sources: P) -> Self {
        Self::with_driver(GlApi, sources)
    }
}

impl<P: SourceProvider, D: GlDriver> ShaderProgramBuilder<P, D> {
    pub fn with_driver(driver: D, sources: P) -> Self {
        Self { driver, sources }
    }

    pub fn sources(&self) -> &P {
        &self.sources
    }

    /// Compile every stage in order, attach it, then link.
    ///
    /// # Errors
    /// See [`BuildError`]. No program or shader object survives a failure.
    pub fn build(&self, stages: &[StageSpec]) -> Result<Program<D>, BuildError> {
        if stages.is_empty() {
            return Err(BuildError::NoStages);
        }
        let program = Program::empty(self.driver.clone());
        log::debug!("building program {} from {} stages", program.id(), stages.len());

        for spec in stages {
            let text = self
                .sources
                .read(&spec.location)
                .map_err(|cause| BuildError::SourceUnavailable {
                    stage: spec.kind,
                    location: spec.location.clone(),
                    cause,
                })?;

            let compiled = Shader::new(self.driver.clone(), spec.kind, &text)
                .compile()
                .map_err(|log| BuildError::CompileFailed {
                    stage: spec.kind,
                    location: spec.location.clone(),
                    log,
                })?;

            program.attach(&compiled);
            log::trace!("attached {} shader {} ({})", spec.kind, compiled.id(), spec.location);
            // `compiled` drops here; the program keeps the stage alive.
        }

        let program = program
            .link()
            .map_err(|log| BuildError::LinkFailed { log })?;
        log::debug!("linked program {}", program.id());
        Ok(program)
    }
}
