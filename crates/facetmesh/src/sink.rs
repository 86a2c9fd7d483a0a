use std::collections::BTreeMap;

pub const ATTR_POSITION: &str = "position";
pub const ATTR_BARY_COORD: &str = "aBaryCoord";
pub const ATTR_CENTER: &str = "aCenter";

/// Receiver for named vertex attribute buffers.
///
/// Implemented by whatever owns the GPU-side geometry; `FacetMesh::attach`
/// only ever talks to this trait.
pub trait AttributeSink {
    /// Stores `data` under `name`, interpreted as `item_size` floats per vertex.
    fn set_attribute(&mut self, name: &str, item_size: usize, data: &[f32]);
}

/// A single attribute buffer as recorded by [`AttributeTable`].
#[derive(Debug, Clone, PartialEq)]
pub struct AttributeBuffer {
    pub item_size: usize,
    pub data: Vec<f32>,
}

impl AttributeBuffer {
    pub fn count(&self) -> usize {
        if self.item_size == 0 {
            0
        } else {
            self.data.len() / self.item_size
        }
    }

    pub fn item(&self, index: usize) -> Option<&[f32]> {
        let start = index.checked_mul(self.item_size)?;
        self.data.get(start..start + self.item_size)
    }
}

/// In-memory sink keyed by attribute name.
#[derive(Debug, Clone, Default)]
pub struct AttributeTable {
    buffers: BTreeMap<String, AttributeBuffer>,
}

impl AttributeTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, name: &str) -> Option<&AttributeBuffer> {
        self.buffers.get(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.buffers.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.buffers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buffers.is_empty()
    }
}

impl AttributeSink for AttributeTable {
    fn set_attribute(&mut self, name: &str, item_size: usize, data: &[f32]) {
        self.buffers.insert(
            name.to_string(),
            AttributeBuffer {
                item_size,
                data: data.to_vec(),
            },
        );
    }
}
