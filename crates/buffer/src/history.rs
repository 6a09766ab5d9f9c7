//! Swap records and the undo/redo stacks.
//!
//! Every mutation pushes one invertible record. Records carry a batch id;
//! undo and redo always move a whole batch (a contiguous run of records
//! sharing an id), so grouped edits revert as one unit.

use crate::piece::{PieceIdx, PieceRange};
use crate::types::MarkerId;

/// How a record mutated the chain.
#[derive(Debug, Clone)]
pub(crate) enum RecordKind {
    /// A piece-range swap: `old` replaced by `new`.
    Swap { old: PieceRange, new: PieceRange },
    /// An in-place extension of the rightmost piece by a merged append.
    AppendDelta {
        piece: PieceIdx,
        runes: usize,
        bytes: usize,
    },
}

/// One invertible mutation.
#[derive(Debug, Clone)]
pub(crate) struct SwapRecord {
    pub(crate) kind: RecordKind,
    pub(crate) batch: u64,
    /// Rune offset where the edit begins.
    pub(crate) start_rune: usize,
    /// Rune/byte extent the edit removed.
    pub(crate) old_runes: usize,
    pub(crate) old_bytes: usize,
    /// Rune/byte extent the edit inserted.
    pub(crate) new_runes: usize,
    pub(crate) new_bytes: usize,
    /// Exact offsets of markers that sat inside the removed range; the
    /// inverse relocation rule cannot recover these, so they are restored
    /// verbatim on undo.
    pub(crate) marker_snapshot: Vec<(MarkerId, usize)>,
}

/// The undo and redo stacks.
#[derive(Debug, Default)]
pub(crate) struct History {
    undo: Vec<SwapRecord>,
    redo: Vec<SwapRecord>,
}

impl History {
    /// Records a fresh edit; anything redoable is discarded.
    pub(crate) fn push(&mut self, record: SwapRecord) {
        self.undo.push(record);
        self.redo.clear();
    }

    pub(crate) fn undo_depth(&self) -> usize {
        self.undo.len()
    }

    pub(crate) fn redo_depth(&self) -> usize {
        self.redo.len()
    }

    /// Pops the whole top batch off the undo stack, most recent record
    /// first. Empty when there is nothing to undo.
    pub(crate) fn pop_undo_batch(&mut self) -> Vec<SwapRecord> {
        Self::pop_batch(&mut self.undo)
    }

    /// Pops the whole top batch off the redo stack, in original apply
    /// order.
    pub(crate) fn pop_redo_batch(&mut self) -> Vec<SwapRecord> {
        Self::pop_batch(&mut self.redo)
    }

    /// Parks an undone record on the redo stack.
    pub(crate) fn park_undone(&mut self, record: SwapRecord) {
        self.redo.push(record);
    }

    /// Returns a redone record to the undo stack without touching the
    /// redo side.
    pub(crate) fn park_redone(&mut self, record: SwapRecord) {
        self.undo.push(record);
    }

    fn pop_batch(stack: &mut Vec<SwapRecord>) -> Vec<SwapRecord> {
        let Some(top) = stack.last() else {
            return Vec::new();
        };
        let batch = top.batch;
        let mut records = Vec::new();
        while stack.last().is_some_and(|r| r.batch == batch) {
            if let Some(record) = stack.pop() {
                records.push(record);
            }
        }
        records
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(batch: u64) -> SwapRecord {
        SwapRecord {
            kind: RecordKind::AppendDelta {
                piece: crate::piece::TAIL,
                runes: 1,
                bytes: 1,
            },
            batch,
            start_rune: 0,
            old_runes: 0,
            old_bytes: 0,
            new_runes: 1,
            new_bytes: 1,
            marker_snapshot: Vec::new(),
        }
    }

    #[test]
    fn test_push_discards_redo() {
        let mut history = History::default();
        history.push(record(0));
        for r in history.pop_undo_batch() {
            history.park_undone(r);
        }
        assert_eq!(history.redo_depth(), 1);

        history.push(record(1));
        assert_eq!(history.redo_depth(), 0);
        assert_eq!(history.undo_depth(), 1);
    }

    #[test]
    fn test_batch_pops_as_unit() {
        let mut history = History::default();
        history.push(record(7));
        history.push(record(7));
        history.push(record(8));

        assert_eq!(history.pop_undo_batch().len(), 1);
        assert_eq!(history.pop_undo_batch().len(), 2);
        assert!(history.pop_undo_batch().is_empty());
    }

    #[test]
    fn test_undo_then_redo_preserves_order() {
        let mut history = History::default();
        let mut a = record(3);
        a.start_rune = 1;
        let mut b = record(3);
        b.start_rune = 2;
        history.push(a);
        history.push(b);

        // Undo pops most recent first.
        let undone = history.pop_undo_batch();
        assert_eq!(undone[0].start_rune, 2);
        assert_eq!(undone[1].start_rune, 1);
        for r in undone {
            history.park_undone(r);
        }

        // Redo yields original apply order.
        let redone = history.pop_redo_batch();
        assert_eq!(redone[0].start_rune, 1);
        assert_eq!(redone[1].start_rune, 2);
    }
}
