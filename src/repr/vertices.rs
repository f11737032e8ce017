use crate::{error::*, node::*};

/// Dense store of vertex values; the position of a value is its index.
/// Values are compared by equality only, so lookups take `O(n)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VertexValues<V> {
    values: Vec<V>,
}

impl<V> Default for VertexValues<V> {
    fn default() -> Self {
        Self { values: Vec::new() }
    }
}

impl<V> VertexValues<V> {
    pub fn len(&self) -> NumNodes {
        node_from_usize(self.values.len())
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn get(&self, u: Node) -> Option<&V> {
        self.values.get(u as usize)
    }

    pub fn clear(&mut self) {
        self.values.clear();
    }

    pub fn iter(&self) -> std::slice::Iter<'_, V> {
        self.values.iter()
    }
}

impl<V: PartialEq> VertexValues<V> {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            values: Vec::with_capacity(capacity),
        }
    }

    pub fn position(&self, value: &V) -> Option<Node> {
        self.values
            .iter()
            .position(|v| v == value)
            .map(node_from_usize)
    }

    /// Appends `value` and returns its index
    pub fn push(&mut self, value: V) -> Result<Node> {
        if let Some(index) = self.position(&value) {
            return Err(GraphError::DuplicateVertex { index });
        }
        self.values.push(value);
        Ok(self.len() - 1)
    }

    /// Removes `value` and returns its former index
    pub fn remove(&mut self, value: &V) -> Result<Node> {
        let index = self.position(value).ok_or(GraphError::VertexNotFound)?;
        self.values.remove(index as usize);
        Ok(index)
    }
}
