//! Window dragging and drop-target swapping
//!
//! Neither piece touches playback state. [`DragSurface`] turns pointer
//! movement into an element offset the way a title-bar drag does;
//! [`SwapBoard`] swaps the contents of two named slots when one is dropped
//! onto the other.
//!
//! Hosts own these directly; the browser build exposes them as
//! `DragSurface` and `SwapBoard` classes next to the player.

/// Pointer-driven offset of a draggable element
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DragSurface {
    top: f64,
    left: f64,
    grab: Option<(f64, f64)>,
}

impl DragSurface {
    /// Surface resting at `(top, left)`
    pub fn new(top: f64, left: f64) -> Self {
        Self {
            top,
            left,
            grab: None,
        }
    }

    /// Start dragging from pointer position `(x, y)`
    pub fn pointer_down(&mut self, x: f64, y: f64) {
        self.grab = Some((x, y));
    }

    /// Follow the pointer; returns the new `(top, left)` while dragging
    pub fn pointer_move(&mut self, x: f64, y: f64) -> Option<(f64, f64)> {
        let (last_x, last_y) = self.grab?;

        self.left -= last_x - x;
        self.top -= last_y - y;
        self.grab = Some((x, y));

        Some((self.top, self.left))
    }

    pub fn pointer_up(&mut self) {
        self.grab = None;
    }

    pub fn is_dragging(&self) -> bool {
        self.grab.is_some()
    }

    pub fn offset(&self) -> (f64, f64) {
        (self.top, self.left)
    }
}

/// Named slots whose contents can be swapped by drag-and-drop
#[derive(Debug, Clone, PartialEq)]
pub struct SwapBoard<T> {
    slots: Vec<(String, T)>,
}

impl<T> SwapBoard<T> {
    pub fn new() -> Self {
        Self { slots: Vec::new() }
    }

    /// Add a slot; a duplicate name replaces the existing content
    pub fn insert(&mut self, name: impl Into<String>, content: T) {
        let name = name.into();
        match self.position(&name) {
            Some(i) => self.slots[i].1 = content,
            None => self.slots.push((name, content)),
        }
    }

    pub fn get(&self, name: &str) -> Option<&T> {
        self.position(name).map(|i| &self.slots[i].1)
    }

    /// Drop the content of `source` onto `target`, swapping the two
    ///
    /// Returns false (and changes nothing) for unknown slots or a drop onto
    /// the source itself.
    pub fn drop_onto(&mut self, source: &str, target: &str) -> bool {
        let (Some(from), Some(to)) = (self.position(source), self.position(target)) else {
            return false;
        };
        if from == to {
            return false;
        }

        let (low, high) = if from < to { (from, to) } else { (to, from) };
        let (head, tail) = self.slots.split_at_mut(high);
        std::mem::swap(&mut head[low].1, &mut tail[0].1);
        true
    }

    fn position(&self, name: &str) -> Option<usize> {
        self.slots.iter().position(|(slot, _)| slot == name)
    }
}

impl<T> Default for SwapBoard<T> {
    fn default() -> Self {
        Self::new()
    }
}
