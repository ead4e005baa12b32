//! A `GlDriver` that keeps GL objects in memory and counts them.
#![allow(dead_code)]

use std::{
    cell::{Cell, RefCell},
    collections::{BTreeMap, HashMap},
    ffi::CStr,
    io,
    rc::Rc,
};

use gl::types::{GLint, GLuint};
use gl_triangles::{
    gl_wrappers::{GlDriver, ShaderType},
    source::{SourceLocation, SourceProvider},
};

#[derive(Debug)]
pub struct FakeShader {
    pub kind: ShaderType,
    pub source: String,
    pub compiled: bool,
    pub log: String,
    /// `glDeleteShader` was called on it.
    pub released: bool,
}

#[derive(Debug, Default)]
pub struct FakeProgram {
    pub attached: Vec<GLuint>,
    pub linked: bool,
    pub log: String,
    pub released: bool,
}

#[derive(Debug, Default)]
struct State {
    next_id: GLuint,
    shaders: BTreeMap<GLuint, FakeShader>,
    programs: BTreeMap<GLuint, FakeProgram>,
    forced_link_error: Option<String>,
    current_program: GLuint,
}

/// Cheap to clone; clones share the same object tables.
#[derive(Debug, Clone, Default)]
pub struct CountingDriver {
    state: Rc<RefCell<State>>,
}

impl CountingDriver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every link fail with `log`.
    pub fn fail_links_with(&self, log: &str) {
        self.state.borrow_mut().forced_link_error = Some(log.to_string());
    }

    pub fn shaders_created(&self) -> usize {
        self.state.borrow().shaders.len()
    }
    pub fn programs_created(&self) -> usize {
        self.state.borrow().programs.len()
    }
    /// Shader objects nobody called `glDeleteShader` on.
    pub fn unreleased_shaders(&self) -> usize {
        self.state.borrow().shaders.values().filter(|s| !s.released).count()
    }
    /// Program objects nobody called `glDeleteProgram` on.
    pub fn live_programs(&self) -> usize {
        self.state.borrow().programs.values().filter(|p| !p.released).count()
    }
    pub fn is_live_program(&self, id: GLuint) -> bool {
        self.state
            .borrow()
            .programs
            .get(&id)
            .is_some_and(|p| !p.released)
    }
    pub fn attached_kinds(&self, program: GLuint) -> Vec<ShaderType> {
        let state = self.state.borrow();
        state.programs[&program]
            .attached
            .iter()
            .map(|id| state.shaders[id].kind)
            .collect()
    }
    pub fn shader_sources(&self) -> Vec<String> {
        self.state
            .borrow()
            .shaders
            .values()
            .map(|s| s.source.clone())
            .collect()
    }
    pub fn current_program(&self) -> GLuint {
        self.state.borrow().current_program
    }
    /// Live clones of this driver, including `self`.
    pub fn handles(&self) -> usize {
        Rc::strong_count(&self.state)
    }

    fn next_id(&self) -> GLuint {
        let mut state = self.state.borrow_mut();
        state.next_id += 1;
        state.next_id
    }
}

fn strip_version(src: &str) -> String {
    src.lines()
        .filter(|l| !l.trim_start().starts_with("#version"))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Just enough of a GLSL front end to tell the test sources apart:
/// a `main` must exist and the declarations before it must end in `;`.
fn fake_compile(src: &str) -> Result<(), String> {
    let body = strip_version(src);
    let Some(main_at) = body.find("void main") else {
        return Err("0:1(1): error: no function with name 'main'".to_string());
    };
    let declarations = body[..main_at].trim();
    if !declarations.is_empty() && !declarations.ends_with(';') && !declarations.ends_with('}') {
        return Err(format!(
            "0:1({}): error: syntax error, unexpected VOID, expecting ',' or ';'",
            main_at + 1
        ));
    }
    Ok(())
}

/// `(qualifier, name)` for each top-level `in`/`out`/`uniform` declaration.
fn declarations(src: &str) -> Vec<(String, String)> {
    let body = strip_version(src);
    let head = body.split("void main").next().unwrap_or("");
    head.split(';')
        .filter_map(|decl| {
            // Drop any `layout (...)` qualifier.
            let decl = decl.rsplit(')').next().unwrap_or(decl);
            let tokens: Vec<&str> = decl.split_whitespace().collect();
            match tokens.as_slice() {
                [qualifier, _ty, name] => Some((qualifier.to_string(), name.to_string())),
                _ => None,
            }
        })
        .collect()
}

impl GlDriver for CountingDriver {
    fn create_program(&self) -> GLuint {
        let id = self.next_id();
        self.state
            .borrow_mut()
            .programs
            .insert(id, FakeProgram::default());
        id
    }
    fn delete_program(&self, program: GLuint) {
        let mut state = self.state.borrow_mut();
        let fake = state.programs.get_mut(&program).expect("deleting unknown program");
        assert!(!fake.released, "program {program} deleted twice");
        fake.released = true;
    }
    fn create_shader(&self, kind: ShaderType) -> GLuint {
        let id = self.next_id();
        self.state.borrow_mut().shaders.insert(
            id,
            FakeShader {
                kind,
                source: String::new(),
                compiled: false,
                log: String::new(),
                released: false,
            },
        );
        id
    }
    fn delete_shader(&self, shader: GLuint) {
        let mut state = self.state.borrow_mut();
        let fake = state.shaders.get_mut(&shader).expect("deleting unknown shader");
        assert!(!fake.released, "shader {shader} deleted twice");
        fake.released = true;
    }
    fn shader_source(&self, shader: GLuint, source: &str) {
        self.state.borrow_mut().shaders.get_mut(&shader).unwrap().source = source.to_string();
    }
    fn compile_shader(&self, shader: GLuint) {
        let mut state = self.state.borrow_mut();
        let fake = state.shaders.get_mut(&shader).unwrap();
        match fake_compile(&fake.source) {
            Ok(()) => fake.compiled = true,
            Err(log) => fake.log = log,
        }
    }
    fn compile_status(&self, shader: GLuint) -> bool {
        self.state.borrow().shaders[&shader].compiled
    }
    fn shader_info_log(&self, shader: GLuint) -> String {
        self.state.borrow().shaders[&shader].log.clone()
    }
    fn attach_shader(&self, program: GLuint, shader: GLuint) {
        let mut state = self.state.borrow_mut();
        assert!(!state.shaders[&shader].released, "attaching a released shader");
        assert!(state.shaders[&shader].compiled, "attaching an uncompiled shader");
        state.programs.get_mut(&program).unwrap().attached.push(shader);
    }
    fn link_program(&self, program: GLuint) {
        let mut state = self.state.borrow_mut();
        let forced = state.forced_link_error.clone();

        let mut outputs = Vec::new();
        let mut inputs = Vec::new();
        for id in &state.programs[&program].attached {
            let shader = &state.shaders[id];
            for (qualifier, name) in declarations(&shader.source) {
                match (shader.kind, qualifier.as_str()) {
                    (ShaderType::Vertex, "out") => outputs.push(name),
                    (ShaderType::Fragment, "in") => inputs.push(name),
                    _ => {}
                }
            }
        }
        let missing = inputs.iter().find(|name| !outputs.contains(name)).cloned();

        let fake = state.programs.get_mut(&program).unwrap();
        if let Some(log) = forced {
            fake.log = log;
        } else if let Some(name) = missing {
            fake.log = format!(
                "error: fragment shader input `{name}' has no matching vertex shader output"
            );
        } else {
            fake.linked = true;
        }
    }
    fn link_status(&self, program: GLuint) -> bool {
        self.state.borrow().programs[&program].linked
    }
    fn program_info_log(&self, program: GLuint) -> String {
        self.state.borrow().programs[&program].log.clone()
    }
    fn use_program(&self, program: GLuint) {
        self.state.borrow_mut().current_program = program;
    }
    fn uniform_location(&self, program: GLuint, name: &CStr) -> GLint {
        let name = name.to_string_lossy();
        let state = self.state.borrow();
        let mut location = 0;
        for id in &state.programs[&program].attached {
            for (qualifier, declared) in declarations(&state.shaders[id].source) {
                if qualifier == "uniform" {
                    if declared == name {
                        return location;
                    }
                    location += 1;
                }
            }
        }
        -1
    }
    fn attrib_location(&self, program: GLuint, name: &CStr) -> GLint {
        let name = name.to_string_lossy();
        let state = self.state.borrow();
        let mut location = 0;
        for id in &state.programs[&program].attached {
            let shader = &state.shaders[id];
            if shader.kind != ShaderType::Vertex {
                continue;
            }
            for (qualifier, declared) in declarations(&shader.source) {
                if qualifier == "in" {
                    if declared == name {
                        return location;
                    }
                    location += 1;
                }
            }
        }
        -1
    }
}

/// Serves `Path` locations from memory and counts reads.
#[derive(Debug, Default)]
pub struct MemorySources {
    files: HashMap<String, String>,
    reads: Cell<usize>,
}

impl MemorySources {
    pub fn new() -> Self {
        Self::default()
    }
    pub fn with_file(mut self, path: &str, text: &str) -> Self {
        self.files.insert(path.to_string(), text.to_string());
        self
    }
    pub fn reads(&self) -> usize {
        self.reads.get()
    }
}

impl SourceProvider for MemorySources {
    fn read(&self, location: &SourceLocation) -> io::Result<String> {
        self.reads.set(self.reads.get() + 1);
        match location {
            SourceLocation::Path(path) => self
                .files
                .get(path.to_string_lossy().as_ref())
                .cloned()
                .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, "no such shader")),
            SourceLocation::Inline { text, .. } => Ok(text.to_string()),
        }
    }
}
