//! The piece chain: arena-allocated, doubly-linked slices of the backing
//! stores, with permanent head/tail sentinels.
//!
//! Pieces are addressed by arena index rather than owning pointers. A
//! piece unlinked by a swap keeps its slot and its internal links, so the
//! undo record citing it can splice it straight back in; slots are
//! reclaimed only when the whole table is dropped or reset.

use crate::store::Source;

/// Arena index of a piece.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct PieceIdx(u32);

/// The head sentinel; its `next` is the first real piece.
pub(crate) const HEAD: PieceIdx = PieceIdx(0);
/// The tail sentinel; its `prev` is the last real piece.
pub(crate) const TAIL: PieceIdx = PieceIdx(1);

/// A contiguous slice of one backing store.
///
/// Store-relative rune and byte offsets are carried together so an
/// interior split needs a single rune-to-byte conversion. A piece is
/// never mutated after creation, with one exception: the rightmost piece
/// may be extended in place by the append-merge fast path, recorded as an
/// invertible delta.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Piece {
    pub(crate) source: Source,
    pub(crate) rune_off: usize,
    pub(crate) rune_len: usize,
    pub(crate) byte_off: usize,
    pub(crate) byte_len: usize,
    pub(crate) prev: PieceIdx,
    pub(crate) next: PieceIdx,
}

/// A contiguous sublist of the chain, or a zero-width boundary between
/// two adjacent pieces.
///
/// Boundary ranges name an insertion point: `first` holds the
/// predecessor and `last` the successor of the gap.
#[derive(Debug, Clone, Copy)]
pub(crate) struct PieceRange {
    pub(crate) first: PieceIdx,
    pub(crate) last: PieceIdx,
    pub(crate) boundary: bool,
}

impl PieceRange {
    /// Populated range spanning `first..=last`.
    pub(crate) fn span(first: PieceIdx, last: PieceIdx) -> Self {
        Self {
            first,
            last,
            boundary: false,
        }
    }

    /// Boundary range at the insertion point just before `successor`.
    pub(crate) fn boundary_before(list: &PieceList, successor: PieceIdx) -> Self {
        Self {
            first: list.get(successor).prev,
            last: successor,
            boundary: true,
        }
    }
}

#[derive(Debug)]
pub(crate) struct PieceList {
    arena: Vec<Piece>,
}

impl PieceList {
    pub(crate) fn new() -> Self {
        let sentinel = Piece {
            source: Source::Original,
            rune_off: 0,
            rune_len: 0,
            byte_off: 0,
            byte_len: 0,
            prev: HEAD,
            next: TAIL,
        };
        // arena[0] is HEAD, arena[1] is TAIL; an empty chain links them
        // directly to each other.
        Self {
            arena: vec![sentinel; 2],
        }
    }

    pub(crate) fn get(&self, idx: PieceIdx) -> &Piece {
        &self.arena[idx.0 as usize]
    }

    pub(crate) fn get_mut(&mut self, idx: PieceIdx) -> &mut Piece {
        &mut self.arena[idx.0 as usize]
    }

    /// Allocates a detached piece; its links point at itself until it is
    /// chained or spliced.
    pub(crate) fn alloc(
        &mut self,
        source: Source,
        rune_off: usize,
        rune_len: usize,
        byte_off: usize,
        byte_len: usize,
    ) -> PieceIdx {
        let idx = PieceIdx(self.arena.len() as u32);
        self.arena.push(Piece {
            source,
            rune_off,
            rune_len,
            byte_off,
            byte_len,
            prev: idx,
            next: idx,
        });
        idx
    }

    /// Number of real pieces in the chain.
    pub(crate) fn count(&self) -> usize {
        let mut n = 0;
        let mut idx = self.get(HEAD).next;
        while idx != TAIL {
            n += 1;
            idx = self.get(idx).next;
        }
        n
    }

    /// Sum of rune and byte lengths over the chain.
    pub(crate) fn totals(&self) -> (usize, usize) {
        let mut runes = 0;
        let mut bytes = 0;
        let mut idx = self.get(HEAD).next;
        while idx != TAIL {
            let p = self.get(idx);
            runes += p.rune_len;
            bytes += p.byte_len;
            idx = p.next;
        }
        (runes, bytes)
    }

    /// Locates the piece containing `rune_index`, walking from whichever
    /// end of the chain is closer.
    ///
    /// Returns the piece and the rune offset within it. Boundary ties
    /// resolve to the following piece, so index 0 yields the first real
    /// piece and `total` yields the tail sentinel.
    pub(crate) fn find_piece_at(&self, rune_index: usize, total: usize) -> (PieceIdx, usize) {
        if rune_index >= total {
            return (TAIL, 0);
        }

        if rune_index * 2 <= total {
            let mut start = 0;
            let mut idx = self.get(HEAD).next;
            while idx != TAIL {
                let len = self.get(idx).rune_len;
                if rune_index < start + len {
                    return (idx, rune_index - start);
                }
                start += len;
                idx = self.get(idx).next;
            }
            (TAIL, 0)
        } else {
            let mut end = total;
            let mut idx = self.get(TAIL).prev;
            while idx != HEAD {
                let len = self.get(idx).rune_len;
                if rune_index >= end - len {
                    return (idx, rune_index - (end - len));
                }
                end -= len;
                idx = self.get(idx).prev;
            }
            (TAIL, 0)
        }
    }

    /// Chains `pieces` together in order as a detached populated range.
    pub(crate) fn chain(&mut self, pieces: &[PieceIdx]) -> PieceRange {
        debug_assert!(!pieces.is_empty());
        for pair in pieces.windows(2) {
            self.get_mut(pair[0]).next = pair[1];
            self.get_mut(pair[1]).prev = pair[0];
        }
        PieceRange::span(pieces[0], pieces[pieces.len() - 1])
    }

    /// Replaces the linked `old` range with the detached `new` range,
    /// rewiring four links.
    ///
    /// `old` must currently be in the chain; its pieces keep their
    /// internal links so the inverse splice restores them byte-for-byte.
    pub(crate) fn splice(&mut self, old: PieceRange, new: PieceRange) {
        let (pred, succ) = if old.boundary {
            (old.first, old.last)
        } else {
            (self.get(old.first).prev, self.get(old.last).next)
        };

        if new.boundary {
            self.get_mut(pred).next = succ;
            self.get_mut(succ).prev = pred;
        } else {
            self.get_mut(pred).next = new.first;
            self.get_mut(new.first).prev = pred;
            self.get_mut(new.last).next = succ;
            self.get_mut(succ).prev = new.last;
        }
    }
}
