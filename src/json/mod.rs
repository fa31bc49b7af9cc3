//! Purpose: Internal JSON decoding boundary used by the pipeline.
//! Exports: `parse` module with the decode helper and failure categories.
//! Role: Single seam for parser details so the pipeline avoids ad hoc decode logic.
//! Invariants: Input documents are decoded through this module only.
//! Invariants: Object key order is preserved (`serde_json` with `preserve_order`).

pub mod parse;
