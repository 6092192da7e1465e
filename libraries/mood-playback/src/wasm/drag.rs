//! WASM wrappers for window dragging and slot swapping

use crate::{DragSurface, SwapBoard};
use wasm_bindgen::prelude::*;

/// Draggable player window
///
/// The host forwards `mousedown`/`mousemove`/`mouseup` coordinates and
/// applies the returned `[top, left]` to the element style.
#[wasm_bindgen(js_name = DragSurface)]
pub struct WasmDragSurface {
    inner: DragSurface,
}

#[wasm_bindgen(js_class = DragSurface)]
impl WasmDragSurface {
    #[wasm_bindgen(constructor)]
    pub fn new(top: f64, left: f64) -> WasmDragSurface {
        Self {
            inner: DragSurface::new(top, left),
        }
    }

    #[wasm_bindgen(js_name = pointerDown)]
    pub fn pointer_down(&mut self, x: f64, y: f64) {
        self.inner.pointer_down(x, y);
    }

    /// New `[top, left]`, or `undefined` when no drag is active
    #[wasm_bindgen(js_name = pointerMove)]
    pub fn pointer_move(&mut self, x: f64, y: f64) -> Option<Vec<f64>> {
        self.inner
            .pointer_move(x, y)
            .map(|(top, left)| vec![top, left])
    }

    #[wasm_bindgen(js_name = pointerUp)]
    pub fn pointer_up(&mut self) {
        self.inner.pointer_up();
    }

    #[wasm_bindgen(js_name = isDragging)]
    pub fn is_dragging(&self) -> bool {
        self.inner.is_dragging()
    }
}

/// Drop targets holding element markup by slot name
#[wasm_bindgen(js_name = SwapBoard)]
pub struct WasmSwapBoard {
    inner: SwapBoard<String>,
}

#[wasm_bindgen(js_class = SwapBoard)]
impl WasmSwapBoard {
    #[wasm_bindgen(constructor)]
    pub fn new() -> WasmSwapBoard {
        Self {
            inner: SwapBoard::new(),
        }
    }

    pub fn insert(&mut self, name: String, content: String) {
        self.inner.insert(name, content);
    }

    pub fn get(&self, name: &str) -> Option<String> {
        self.inner.get(name).cloned()
    }

    /// Swap `source` and `target`; false if nothing changed
    #[wasm_bindgen(js_name = dropOnto)]
    pub fn drop_onto(&mut self, source: &str, target: &str) -> bool {
        self.inner.drop_onto(source, target)
    }
}

impl Default for WasmSwapBoard {
    fn default() -> Self {
        Self::new()
    }
}
