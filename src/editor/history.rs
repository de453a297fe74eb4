use std::collections::VecDeque;

/// Bounded whole-snapshot undo/redo stacks with explicit gesture coalescing.
///
/// Callers record the state *before* each mutation. While a gesture is open, the
/// snapshot taken at [`History::begin_gesture`] stands in for every mutation until
/// [`History::commit_gesture`], so a drag produces one entry instead of one per frame.
#[derive(Clone, Debug)]
pub struct History<T> {
    undo: VecDeque<T>,
    redo: VecDeque<T>,
    limit: usize,
    gesture: Option<Gesture<T>>,
}

#[derive(Clone, Debug)]
struct Gesture<T> {
    base: T,
    dirty: bool,
}

impl<T> History<T> {
    /// Create empty stacks keeping at most `limit` entries each.
    pub fn new(limit: usize) -> Self {
        Self {
            undo: VecDeque::new(),
            redo: VecDeque::new(),
            limit: limit.max(1),
            gesture: None,
        }
    }

    /// Record the state preceding a mutation.
    pub fn record(&mut self, before: T) {
        if let Some(g) = &mut self.gesture {
            g.dirty = true;
            return;
        }
        self.push_undo(before);
        self.redo.clear();
    }

    /// Open a gesture whose mutations collapse into one entry. Nested calls are ignored.
    pub fn begin_gesture(&mut self, base: T) -> bool {
        if self.gesture.is_some() {
            return false;
        }
        self.gesture = Some(Gesture { base, dirty: false });
        true
    }

    /// Close the open gesture. Returns `true` when it recorded an entry.
    pub fn commit_gesture(&mut self) -> bool {
        match self.gesture.take() {
            Some(Gesture { base, dirty: true }) => {
                self.push_undo(base);
                self.redo.clear();
                true
            }
            _ => false,
        }
    }

    /// Return `true` while a gesture is open.
    pub fn in_gesture(&self) -> bool {
        self.gesture.is_some()
    }

    /// Swap `current` for the previous snapshot.
    pub fn undo(&mut self, current: T) -> Result<T, T> {
        self.commit_gesture();
        match self.undo.pop_back() {
            Some(prev) => {
                push_bounded(&mut self.redo, current, self.limit);
                Ok(prev)
            }
            None => Err(current),
        }
    }

    /// Swap `current` for the next snapshot.
    pub fn redo(&mut self, current: T) -> Result<T, T> {
        self.commit_gesture();
        match self.redo.pop_back() {
            Some(next) => {
                push_bounded(&mut self.undo, current, self.limit);
                Ok(next)
            }
            None => Err(current),
        }
    }

    /// Number of undo entries.
    pub fn undo_len(&self) -> usize {
        self.undo.len()
    }

    /// Number of redo entries.
    pub fn redo_len(&self) -> usize {
        self.redo.len()
    }

    /// Drop every entry and any open gesture.
    pub fn clear(&mut self) {
        self.undo.clear();
        self.redo.clear();
        self.gesture = None;
    }

    fn push_undo(&mut self, before: T) {
        push_bounded(&mut self.undo, before, self.limit);
    }
}

fn push_bounded<T>(stack: &mut VecDeque<T>, item: T, limit: usize) {
    stack.push_back(item);
    while stack.len() > limit {
        stack.pop_front();
    }
}

#[cfg(test)]
#[path = "../../tests/unit/editor/history.rs"]
mod tests;
