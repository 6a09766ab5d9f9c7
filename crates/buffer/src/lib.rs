//! tessera-buffer: a piece-table document store for text editing.
//!
//! The document is assembled from immutable slices ("pieces") of two
//! append-only byte stores: the original text and everything inserted
//! since. Edits never move bytes; they swap one run of pieces for
//! another, which makes every mutation cheap to record and exact to
//! undo.
//!
//! # Overview
//!
//! The main type is [`PieceTable`], which provides:
//! - `replace` / `insert` / `erase` at arbitrary rune offsets
//! - grouped undo/redo that restores content, markers, and the line
//!   index together
//! - stable [markers](PieceTable::create_marker) with forward/backward
//!   bias that track every edit
//! - a per-line byte index for `lines` / `read_line`
//! - reads by rune or byte offset, plus sequential [`Reader`] adapters
//!
//! # Example
//!
//! ```
//! use tessera_buffer::{MarkerBias, PieceTable};
//!
//! let mut table = PieceTable::new(b"hello world");
//! table.replace(0, 5, "goodbye");
//! assert_eq!(table.text(), b"goodbye world");
//!
//! // Markers ride along with edits.
//! let marker = table.create_marker(8, MarkerBias::Forward);
//! table.insert(0, ">> ");
//! assert_eq!(table.marker_offset(marker), Ok(11));
//!
//! // Undo restores the exact prior state.
//! assert!(table.undo().is_some());
//! assert_eq!(table.text(), b"goodbye world");
//! assert_eq!(table.marker_offset(marker), Ok(8));
//! ```
//!
//! # Coordinates
//!
//! Public positions are rune (Unicode scalar) offsets unless a name says
//! bytes. Write positions are clamped to the document; out-of-range
//! reads return [`BufferError::OutOfRange`].
//!
//! # Concurrency
//!
//! Everything here is single-owner and synchronous. Each mutation
//! returns only after the piece swap, marker relocation, and line-index
//! update have all landed, so same-thread readers never see a torn
//! state. Cross-thread sharing needs an external lock.

mod history;
mod line_index;
mod piece;
mod reader;
mod store;
mod table;
mod types;

pub use reader::{Reader, TextSource};
pub use table::PieceTable;
pub use types::{BufferError, CaretPos, MarkerBias, MarkerId};
