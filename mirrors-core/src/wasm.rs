//! WASM bindings for mirrors-core
//!
//! Provides a JavaScript-friendly API for the board engine.

use wasm_bindgen::prelude::*;

use crate::{Board, Coord, Position};

/// WASM-friendly wrapper around Board
#[wasm_bindgen]
pub struct WasmBoard {
    inner: Board,
}

#[wasm_bindgen]
impl WasmBoard {
    /// Create a board from rows of 'R'/'L' glyphs
    #[wasm_bindgen(constructor)]
    pub fn new(rows: Vec<String>) -> Result<WasmBoard, JsError> {
        Ok(WasmBoard { inner: Board::new(&rows)? })
    }

    /// Board side length
    pub fn size(&self) -> i16 {
        self.inner.size()
    }

    /// Fire a beam from ring cell (row, col). Returns number of cells destroyed.
    pub fn cast(&mut self, row: Coord, col: Coord) -> Result<u32, JsError> {
        Ok(self.inner.cast(Position::new(row, col))? as u32)
    }

    /// Undo the last cast. Returns number of cells restored.
    pub fn restore(&mut self) -> Result<u32, JsError> {
        Ok(self.inner.restore()? as u32)
    }

    /// Independent board after the first `casts` casts of this one
    pub fn branch(&self, casts: usize) -> Result<WasmBoard, JsError> {
        Ok(WasmBoard { inner: self.inner.branch(casts)? })
    }

    /// Fingerprint of the alive cells (as BigInt)
    pub fn fingerprint(&self) -> u64 {
        self.inner.fingerprint().to_u64()
    }

    #[wasm_bindgen(js_name = destroyedCount)]
    pub fn destroyed_count(&self) -> u32 {
        self.inner.destroyed_count() as u32
    }

    #[wasm_bindgen(js_name = allDestroyed)]
    pub fn all_destroyed(&self) -> bool {
        self.inner.all_destroyed()
    }

    #[wasm_bindgen(js_name = emptyLineCount)]
    pub fn empty_line_count(&self) -> u32 {
        self.inner.empty_line_count() as u32
    }

    /// Valid cast entries as [{row, col}, ...]
    #[wasm_bindgen(js_name = castCandidates)]
    pub fn cast_candidates(&self) -> Result<JsValue, JsError> {
        Ok(serde_wasm_bindgen::to_value(self.inner.cast_candidates())?)
    }

    /// Cast entries made so far as [{row, col}, ...]
    #[wasm_bindgen(js_name = castHistory)]
    pub fn cast_history(&self) -> Result<JsValue, JsError> {
        Ok(serde_wasm_bindgen::to_value(self.inner.cast_history())?)
    }

    /// Cells destroyed by the last cast as [{row, col}, ...]
    #[wasm_bindgen(js_name = lastCastDestroyed)]
    pub fn last_cast_destroyed(&self) -> Result<JsValue, JsError> {
        Ok(serde_wasm_bindgen::to_value(self.inner.last_cast_destroyed())?)
    }

    /// Rows with glyphs for alive cells and '.' for destroyed ones
    pub fn render(&self) -> Vec<String> {
        self.inner.render()
    }

    /// Clone the board
    #[wasm_bindgen(js_name = clone)]
    pub fn clone_board(&self) -> WasmBoard {
        WasmBoard { inner: self.inner.clone() }
    }
}
