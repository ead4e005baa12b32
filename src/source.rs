//! Where shader text comes from.
use std::{
    borrow::Cow,
    fmt, fs, io,
    path::{Path, PathBuf},
};

use crate::config::GlslVersion;

/// Where one stage's source text lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceLocation {
    /// A file, relative paths resolve against the provider's directory.
    Path(PathBuf),
    /// Text embedded in the program. `name` only shows up in errors.
    Inline {
        name: Cow<'static, str>,
        text: Cow<'static, str>,
    },
}

impl SourceLocation {
    pub fn path(path: impl Into<PathBuf>) -> Self {
        SourceLocation::Path(path.into())
    }

    pub fn inline(name: impl Into<Cow<'static, str>>, text: impl Into<Cow<'static, str>>) -> Self {
        SourceLocation::Inline {
            name: name.into(),
            text: text.into(),
        }
    }
}

impl fmt::Display for SourceLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SourceLocation::Path(path) => write!(f, "{}", path.display()),
            SourceLocation::Inline { name, .. } => write!(f, "<inline:{name}>"),
        }
    }
}

/// Resolves a [`SourceLocation`] to shader text.
pub trait SourceProvider {
    /// # Errors
    /// Errors if the text can't be produced, e.g. the file is missing.
    fn read(&self, location: &SourceLocation) -> io::Result<String>;
}

/// The standard provider: files under a directory plus inline text,
/// with an optional `#version` directive added to sources lacking one.
#[derive(Debug, Clone, Default)]
pub struct ShaderSources {
    root: PathBuf,
    version: Option<GlslVersion>,
}

impl ShaderSources {
    /// Resolve relative paths against `root`. Sources are passed through untouched.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            version: None,
        }
    }

    /// Prepend `#version <version> core` to sources that have no `#version`.
    pub fn with_version(mut self, version: GlslVersion) -> Self {
        self.version = Some(version);
        self
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn resolve(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.root.join(path)
        }
    }

    fn finish(&self, text: String) -> String {
        match self.version {
            Some(version) if !has_version_directive(&text) => {
                format!("{}\n{}", version.directive(), text)
            }
            _ => text,
        }
    }
}

/// Whether the first code line, past blanks and `//` or `/* */` comments,
/// is a `#version` directive.
fn has_version_directive(text: &str) -> bool {
    let mut in_block = false;
    for line in text.lines() {
        let mut rest = line.trim();
        loop {
            if in_block {
                let Some(end) = rest.find("*/") else {
                    rest = "";
                    break;
                };
                rest = rest[end + 2..].trim_start();
                in_block = false;
            } else if let Some(after) = rest.strip_prefix("/*") {
                rest = after;
                in_block = true;
            } else {
                break;
            }
        }
        if rest.is_empty() || rest.starts_with("//") {
            continue;
        }
        return rest
            .strip_prefix('#')
            .is_some_and(|directive| directive.trim_start().starts_with("version"));
    }
    false
}

impl SourceProvider for ShaderSources {
    fn read(&self, location: &SourceLocation) -> io::Result<String> {
        let text = match location {
            SourceLocation::Path(path) => {
                let full = self.resolve(path);
                let text = fs::read_to_string(&full)?;
                if text.is_empty() {
                    return Err(io::Error::new(
                        io::ErrorKind::InvalidData,
                        format!("shader file '{}' is empty", full.display()),
                    ));
                }
                text
            }
            SourceLocation::Inline { text, .. } => text.to_string(),
        };
        Ok(self.finish(text))
    }
}
