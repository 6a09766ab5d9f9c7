use thiserror::Error;

/// Errors surfaced by read and marker accessors.
///
/// Mutations never fail: out-of-range write positions are clamped to the
/// document instead (see `PieceTable::replace`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum BufferError {
    /// A rune or byte index exceeds the current document length.
    #[error("offset {0} is out of range")]
    OutOfRange(usize),
    /// UTF-8 decoding failed at the given byte offset.
    #[error("invalid UTF-8 at byte offset {0}")]
    Decode(usize),
    /// A sequential read reached the end of the document.
    #[error("end of input")]
    EndOfInput,
    /// The marker id refers to a destroyed marker.
    #[error("marker is dead")]
    DeadMarker,
}

/// Which way a marker moves when text is inserted exactly at its offset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarkerBias {
    /// The marker follows inserted text.
    Forward,
    /// The marker stays put.
    Backward,
}

/// Opaque handle to a marker created with `PieceTable::create_marker`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MarkerId(pub(crate) u32);

/// Caret range to restore after an undo or redo, in rune offsets.
///
/// Undoing a batch yields one of these per reverted edit: the range the
/// restored text occupies, so a host can put its cursor (or selection)
/// back where the user expects it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CaretPos {
    pub start: usize,
    pub end: usize,
}
