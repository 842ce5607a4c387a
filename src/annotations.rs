//! Per-position annotation data
//!
//! The rendering engine is the sole writer of annotations: key/value
//! facts attached to contiguous runs of document text (clickable marker,
//! face, keymap, help text). This module defines the keys and values, the
//! read-only `AnnotationSource` view consumed by the extent resolver, and
//! a position-indexed `AnnotationStore` an engine can materialize into.

use std::collections::HashMap;

use crate::event::EventMap;
use crate::style::Face;

/// Keys under which annotation values are stored
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum AnnotationKey {
    /// The fixed marker carried by every binding's matched text
    Clickable,
    /// The binding's event keymap
    Keymap,
    /// Base render face
    Face,
    /// Mouse-hover face
    MouseFace,
    /// Help/tooltip text
    HelpText,
    /// Marks the run as not extending when text is typed at its right edge
    RearNonsticky,
    /// A caller-requested extra boolean key
    Flag(String),
}

/// Values attachable to a position
#[derive(Debug, Clone, PartialEq)]
pub enum AnnotationValue {
    Bool(bool),
    Face(Face),
    Text(String),
    Keymap(EventMap),
}

/// Read-only view of a document's annotations, addressed by absolute
/// byte position
pub trait AnnotationSource {
    /// Document length in positions
    fn len(&self) -> usize;

    /// Value stored at `pos` under `key`, if any
    fn annotation(&self, pos: usize, key: &AnnotationKey) -> Option<AnnotationValue>;

    /// Check if the document is empty
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Check if `pos` carries any value under `key`
    fn has_annotation(&self, pos: usize, key: &AnnotationKey) -> bool {
        self.annotation(pos, key).is_some()
    }
}

/// Position-indexed annotation storage for one document
#[derive(Debug, Default)]
pub struct AnnotationStore {
    cells: Vec<HashMap<AnnotationKey, AnnotationValue>>,
}

impl AnnotationStore {
    /// Create a store covering `len` positions
    pub fn new(len: usize) -> Self {
        Self {
            cells: vec![HashMap::new(); len],
        }
    }

    /// Resize to cover `len` positions, dropping annotations past the end
    pub fn resize(&mut self, len: usize) {
        self.cells.resize(len, HashMap::new());
    }

    /// Set a value at one position
    pub fn set(&mut self, pos: usize, key: AnnotationKey, value: AnnotationValue) {
        if let Some(cell) = self.cells.get_mut(pos) {
            cell.insert(key, value);
        }
    }

    /// Set a value over the half-open range `[start, end)`
    pub fn set_range(
        &mut self,
        start: usize,
        end: usize,
        key: AnnotationKey,
        value: AnnotationValue,
    ) {
        for pos in start..end.min(self.cells.len()) {
            self.cells[pos].insert(key.clone(), value.clone());
        }
    }

    /// Remove a key from one position
    pub fn remove(&mut self, pos: usize, key: &AnnotationKey) {
        if let Some(cell) = self.cells.get_mut(pos) {
            cell.remove(key);
        }
    }

    /// Remove a key from every position
    pub fn clear_key(&mut self, key: &AnnotationKey) {
        for cell in &mut self.cells {
            cell.remove(key);
        }
    }

    /// Remove several keys from every position
    pub fn clear_keys(&mut self, keys: &[AnnotationKey]) {
        for cell in &mut self.cells {
            for key in keys {
                cell.remove(key);
            }
        }
    }

    /// The face at a position, if any
    pub fn face_at(&self, pos: usize) -> Option<Face> {
        match self.annotation(pos, &AnnotationKey::Face) {
            Some(AnnotationValue::Face(face)) => Some(face),
            _ => None,
        }
    }
}

impl AnnotationSource for AnnotationStore {
    fn len(&self) -> usize {
        self.cells.len()
    }

    fn annotation(&self, pos: usize, key: &AnnotationKey) -> Option<AnnotationValue> {
        self.cells.get(pos).and_then(|cell| cell.get(key)).cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_range_and_get() {
        let mut store = AnnotationStore::new(20);
        store.set_range(5, 10, AnnotationKey::Clickable, AnnotationValue::Bool(true));

        assert!(!store.has_annotation(4, &AnnotationKey::Clickable));
        assert!(store.has_annotation(5, &AnnotationKey::Clickable));
        assert!(store.has_annotation(9, &AnnotationKey::Clickable));
        assert!(!store.has_annotation(10, &AnnotationKey::Clickable));
    }

    #[test]
    fn test_range_clamped_to_length() {
        let mut store = AnnotationStore::new(5);
        store.set_range(3, 100, AnnotationKey::Clickable, AnnotationValue::Bool(true));
        assert!(store.has_annotation(4, &AnnotationKey::Clickable));
        assert_eq!(store.len(), 5);
    }

    #[test]
    fn test_clear_key() {
        let mut store = AnnotationStore::new(10);
        store.set_range(0, 10, AnnotationKey::Clickable, AnnotationValue::Bool(true));
        store.set_range(
            0,
            10,
            AnnotationKey::HelpText,
            AnnotationValue::Text("tip".into()),
        );

        store.clear_key(&AnnotationKey::Clickable);

        assert!(!store.has_annotation(5, &AnnotationKey::Clickable));
        assert!(store.has_annotation(5, &AnnotationKey::HelpText));
    }

    #[test]
    fn test_face_at() {
        use crate::style::Color;

        let mut store = AnnotationStore::new(10);
        store.set(
            3,
            AnnotationKey::Face,
            AnnotationValue::Face(Face::fg(Color::Red)),
        );

        assert_eq!(store.face_at(3), Some(Face::fg(Color::Red)));
        assert_eq!(store.face_at(4), None);
    }

    #[test]
    fn test_flag_keys_are_distinct() {
        let mut store = AnnotationStore::new(5);
        store.set(
            0,
            AnnotationKey::Flag("visited".into()),
            AnnotationValue::Bool(true),
        );

        assert!(store.has_annotation(0, &AnnotationKey::Flag("visited".into())));
        assert!(!store.has_annotation(0, &AnnotationKey::Flag("other".into())));
    }
}
