use std::collections::HashSet;

use crate::foundation::core::LayerId;

/// Keyed record of elements whose entrance already played.
///
/// Survives remounts of the same element so entrances are not replayed. It is passed
/// explicitly to every runtime, so tests and separate previews each own one.
#[derive(Clone, Debug, Default)]
pub struct AnimationRegistry {
    shown: HashSet<LayerId>,
}

impl AnimationRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Return `true` when the element already reached `visible`.
    pub fn is_visible(&self, id: &LayerId) -> bool {
        self.shown.contains(id)
    }

    pub(crate) fn mark_visible(&mut self, id: &LayerId) {
        self.shown.insert(id.clone());
    }

    pub(crate) fn clear(&mut self, id: &LayerId) {
        self.shown.remove(id);
    }

    /// Forget every element, e.g. when the editor switches documents.
    pub fn reset(&mut self) {
        self.shown.clear();
    }

    /// Number of elements marked visible.
    pub fn len(&self) -> usize {
        self.shown.len()
    }

    /// Return `true` when nothing is marked visible.
    pub fn is_empty(&self) -> bool {
        self.shown.is_empty()
    }
}
