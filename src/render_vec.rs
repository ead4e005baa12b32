//! Interleaved vertex data and its attribute layout.
use std::ffi::c_void;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GlType {
    Float, // f32
}

impl GlType {
    pub const fn get_size(&self) -> usize {
        match *self {
            GlType::Float => std::mem::size_of::<f32>(),
        }
    }
    pub const fn gl_enum(&self) -> gl::types::GLenum {
        match *self {
            GlType::Float => gl::FLOAT,
        }
    }
}

/// One vertex attribute: `components` values of `gl_type`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Attrib {
    pub gl_type: GlType,
    pub components: usize,
}

impl Attrib {
    pub const fn floats(components: usize) -> Self {
        Self {
            gl_type: GlType::Float,
            components,
        }
    }
    pub const fn byte_size(&self) -> usize {
        self.components * self.gl_type.get_size()
    }
}

/// How a vertex is laid out: attributes in location order, tightly packed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct VertexLayout(pub &'static [Attrib]);

impl VertexLayout {
    /// Floats per vertex.
    pub fn components(&self) -> usize {
        self.0.iter().map(|a| a.components).sum()
    }
    /// Bytes per vertex.
    pub fn stride(&self) -> usize {
        self.0.iter().map(Attrib::byte_size).sum()
    }
    /// `(location, attrib, byte offset)` for each attribute.
    pub fn offsets(&self) -> impl Iterator<Item = (u32, Attrib, usize)> + '_ {
        self.0
            .iter()
            .scan(0, |offset, attrib| {
                let this = *offset;
                *offset += attrib.byte_size();
                Some((*attrib, this))
            })
            .enumerate()
            .map(|(location, (attrib, offset))| (location as u32, attrib, offset))
    }
}

/// Vertex data in one flat buffer, uploaded as-is.
#[derive(Clone, Debug)]
pub struct RenderVec {
    inner: Vec<f32>,
    layout: VertexLayout,
}

impl RenderVec {
    pub fn new(layout: VertexLayout) -> Self {
        Self {
            inner: vec![],
            layout,
        }
    }
    /// Wrap already interleaved data.
    ///
    /// # Panics
    /// Panics if `data` does not hold a whole number of vertices.
    pub fn from_interleaved(layout: VertexLayout, data: Vec<f32>) -> Self {
        assert!(
            layout.components() > 0 && data.len() % layout.components() == 0,
            "{} floats is not a whole number of {}-float vertices",
            data.len(),
            layout.components()
        );
        Self { inner: data, layout }
    }
    /// Append one vertex.
    ///
    /// # Panics
    /// Panics if `vertex` is not exactly one vertex wide.
    pub fn push(&mut self, vertex: &[f32]) {
        assert_eq!(vertex.len(), self.layout.components(), "vertex width mismatch");
        self.inner.extend_from_slice(vertex);
    }
    pub fn layout(&self) -> VertexLayout {
        self.layout
    }
    pub fn stride(&self) -> usize {
        self.layout.stride()
    }
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(self.inner.as_slice())
    }
    pub fn gl_byte_size(&self) -> isize {
        self.as_bytes().len().try_into().unwrap_or(isize::MAX)
    }
    /// Number of vertices.
    pub fn gl_len(&self) -> i32 {
        (self.inner.len() / self.layout.components().max(1))
            .try_into()
            .unwrap_or(i32::MAX)
    }
    pub fn gl_data(&self) -> *const c_void {
        self.inner.as_ptr().cast()
    }
}
