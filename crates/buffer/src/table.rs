//! The piece table: document edits, history, markers, and reads.
//!
//! The logical document is the concatenation of pieces over two
//! append-only stores. Every public mutation resolves rune positions to
//! store offsets, swaps a range of pieces for a replacement range, and
//! pushes the inverse onto the undo stack — then relocates markers and
//! replays the byte delta into the line index before returning, so a
//! caller never observes an intermediate state.

use crate::history::{History, RecordKind, SwapRecord};
use crate::line_index::LineIndex;
use crate::piece::{PieceIdx, PieceList, PieceRange, HEAD, TAIL};
use crate::store::{Source, TextStore};
use crate::types::{BufferError, CaretPos, MarkerBias, MarkerId};

/// The piece the current run of single-rune appends is extending.
#[derive(Debug, Clone, Copy)]
struct AppendState {
    piece: PieceIdx,
    /// Document rune length after the last append.
    end_rune: usize,
}

#[derive(Debug)]
struct Marker {
    offset: usize,
    bias: MarkerBias,
    alive: bool,
}

/// What a replacement carved out of the chain.
struct Isolation {
    old: PieceRange,
    /// Retained prefix of the first covered piece, when `start` fell in
    /// its interior.
    left: Option<PieceIdx>,
    /// Retained suffix of the last covered piece.
    right: Option<PieceIdx>,
    start_byte: usize,
    old_bytes: usize,
}

/// A piece-table document with grouped undo/redo, stable markers, and an
/// incrementally maintained line index.
///
/// All coordinates in the public API are rune (Unicode scalar) offsets
/// unless a name says bytes. The table is single-owner: share it across
/// threads only behind external synchronization.
#[derive(Debug)]
pub struct PieceTable {
    original: TextStore,
    modify: TextStore,
    pieces: PieceList,
    history: History,
    line_index: LineIndex,
    markers: Vec<Marker>,
    rune_len: usize,
    byte_len: usize,
    batch_nesting: u32,
    next_batch: u64,
    current_batch: u64,
    last_append: Option<AppendState>,
    changed: bool,
    /// Mutation counter for sampling debug assertions (debug builds only).
    #[cfg(debug_assertions)]
    debug_mutation_count: u64,
}

impl PieceTable {
    /// Creates a table over the given initial text.
    ///
    /// The bytes land in the immutable `original` store; the undo stack
    /// starts empty. Invalid UTF-8 is tolerated (each bad byte counts as
    /// one rune) and surfaces only from rune-reading calls.
    pub fn new(initial: &[u8]) -> Self {
        let mut table = Self {
            original: TextStore::new(),
            modify: TextStore::new(),
            pieces: PieceList::new(),
            history: History::default(),
            line_index: LineIndex::new(),
            markers: Vec::new(),
            rune_len: 0,
            byte_len: 0,
            batch_nesting: 0,
            next_batch: 0,
            current_batch: 0,
            last_append: None,
            changed: false,
            #[cfg(debug_assertions)]
            debug_mutation_count: 0,
        };
        table.load_original(initial);
        table
    }

    /// Discards all state and loads `text` as the new original.
    ///
    /// History, markers, and the line index are reset; marker ids created
    /// before this call are dead.
    pub fn set_text(&mut self, text: &[u8]) {
        self.original = TextStore::new();
        self.modify = TextStore::new();
        self.pieces = PieceList::new();
        self.history = History::default();
        self.line_index = LineIndex::new();
        self.markers.clear();
        self.rune_len = 0;
        self.byte_len = 0;
        self.batch_nesting = 0;
        self.last_append = None;
        self.load_original(text);
        self.changed = true;
        tracing::debug!(bytes = text.len(), "buffer reset");
    }

    fn load_original(&mut self, initial: &[u8]) {
        if initial.is_empty() {
            return;
        }
        self.original.set(initial);
        let runes = self.original.rune_len();
        let piece = self
            .pieces
            .alloc(Source::Original, 0, runes, 0, initial.len());
        let range = self.pieces.chain(&[piece]);
        let at = PieceRange::boundary_before(&self.pieces, TAIL);
        self.pieces.splice(at, range);
        self.rune_len = runes;
        self.byte_len = initial.len();
        // The initial text is not an edit; no checkpoint, no record.
        self.line_index.update_on_insert(0, initial);
    }

    // ==================== Mutations ====================

    /// Replaces `[start, end)` with `text`, returning the number of runes
    /// inserted.
    ///
    /// Offsets are clamped to the document, so the call never fails; a
    /// zero-width deletion of empty text is a no-op and pushes nothing.
    pub fn replace(&mut self, start: usize, end: usize, text: &str) -> usize {
        let start = start.min(self.rune_len);
        let end = end.clamp(start, self.rune_len);
        if start == end && text.is_empty() {
            return 0;
        }

        let batch = self.allocate_batch();
        if let Some(runes) = self.try_merge_append(start, end, text, batch) {
            return runes;
        }

        let prior_len = self.rune_len;
        let iso = self.isolate(start, end);

        let inserted = if text.is_empty() {
            None
        } else {
            let (rune_off, byte_off, runes) = self.modify.append(text);
            Some((
                self.pieces
                    .alloc(Source::Modify, rune_off, runes, byte_off, text.len()),
                runes,
            ))
        };

        let mut new_pieces = Vec::new();
        if let Some(left) = iso.left {
            new_pieces.push(left);
        }
        if let Some((piece, _)) = inserted {
            new_pieces.push(piece);
        }
        if let Some(right) = iso.right {
            new_pieces.push(right);
        }

        let new_range = if new_pieces.is_empty() {
            // Pure deletion with boundary-aligned ends: the replacement is
            // the insertion point where the old range sat.
            PieceRange {
                first: self.pieces.get(iso.old.first).prev,
                last: self.pieces.get(iso.old.last).next,
                boundary: true,
            }
        } else {
            self.pieces.chain(&new_pieces)
        };

        self.pieces.splice(iso.old, new_range);

        let old_runes = end - start;
        let new_runes = inserted.map_or(0, |(_, runes)| runes);

        self.line_index.checkpoint();
        if iso.old_bytes > 0 {
            self.line_index.update_on_delete(iso.start_byte, iso.old_bytes);
        }
        if !text.is_empty() {
            self.line_index.update_on_insert(iso.start_byte, text.as_bytes());
        }

        let marker_snapshot = self.relocate_markers(start, old_runes, new_runes);

        self.history.push(SwapRecord {
            kind: RecordKind::Swap {
                old: iso.old,
                new: new_range,
            },
            batch,
            start_rune: start,
            old_runes,
            old_bytes: iso.old_bytes,
            new_runes,
            new_bytes: text.len(),
            marker_snapshot,
        });

        self.rune_len = self.rune_len - old_runes + new_runes;
        self.byte_len = self.byte_len - iso.old_bytes + text.len();

        // A fresh append at the document end seeds the merge fast path.
        self.last_append = match inserted {
            Some((piece, runes)) if old_runes == 0 && start == prior_len => Some(AppendState {
                piece,
                end_rune: start + runes,
            }),
            _ => None,
        };

        self.note_mutation();
        tracing::trace!(start, end, inserted = new_runes, "replace");
        new_runes
    }

    /// Inserts `text` at the given rune offset.
    pub fn insert(&mut self, at: usize, text: &str) -> usize {
        self.replace(at, at, text)
    }

    /// Removes `[start, end)`, returning whether anything was removed.
    pub fn erase(&mut self, start: usize, end: usize) -> bool {
        let start = start.min(self.rune_len);
        let end = end.clamp(start, self.rune_len);
        if start == end {
            return false;
        }
        self.replace(start, end, "");
        true
    }

    /// The append-merge fast path: a single-rune insertion at the document
    /// end that directly continues the previous append extends the
    /// rightmost piece in place instead of growing the chain.
    fn try_merge_append(
        &mut self,
        start: usize,
        end: usize,
        text: &str,
        batch: u64,
    ) -> Option<usize> {
        if start != end || start != self.rune_len {
            return None;
        }
        let mut chars = text.chars();
        let ch = chars.next()?;
        if chars.next().is_some() {
            return None;
        }
        let state = self.last_append?;
        if state.end_rune != start {
            return None;
        }
        let piece = *self.pieces.get(state.piece);
        // The piece must still be rightmost and its bytes must end at the
        // modify store's tail, so the new rune extends it contiguously.
        if piece.next != TAIL || piece.byte_off + piece.byte_len != self.modify.byte_len() {
            return None;
        }

        self.modify.append(text);
        let bytes = ch.len_utf8();
        {
            let piece = self.pieces.get_mut(state.piece);
            piece.rune_len += 1;
            piece.byte_len += bytes;
        }

        self.line_index.checkpoint();
        self.line_index.update_on_insert(self.byte_len, text.as_bytes());
        let marker_snapshot = self.relocate_markers(start, 0, 1);

        self.history.push(SwapRecord {
            kind: RecordKind::AppendDelta {
                piece: state.piece,
                runes: 1,
                bytes,
            },
            batch,
            start_rune: start,
            old_runes: 0,
            old_bytes: 0,
            new_runes: 1,
            new_bytes: bytes,
            marker_snapshot,
        });

        self.rune_len += 1;
        self.byte_len += bytes;
        self.last_append = Some(AppendState {
            piece: state.piece,
            end_rune: self.rune_len,
        });

        self.note_mutation();
        tracing::trace!(at = start, "append merged");
        Some(1)
    }

    /// Carves out the pieces covering `[start, end)`.
    ///
    /// The old range keeps whole pieces so undo can restore them intact;
    /// interior endpoints manufacture retained left/right partial pieces
    /// that go into the replacement range instead.
    fn isolate(&mut self, start: usize, end: usize) -> Isolation {
        let (first, first_off) = self.pieces.find_piece_at(start, self.rune_len);
        let (last, last_off) = self.pieces.find_piece_at(end, self.rune_len);

        let start_byte = self.doc_byte_at(first, first_off);
        let end_byte = if start == end {
            start_byte
        } else {
            self.doc_byte_at(last, last_off)
        };

        let left = if first_off > 0 {
            let p = *self.pieces.get(first);
            let cut = self.store(p.source).rune_to_byte(p.rune_off + first_off);
            Some(self.pieces.alloc(
                p.source,
                p.rune_off,
                first_off,
                p.byte_off,
                cut - p.byte_off,
            ))
        } else {
            None
        };

        let right = if last_off > 0 {
            let p = *self.pieces.get(last);
            let cut = self.store(p.source).rune_to_byte(p.rune_off + last_off);
            Some(self.pieces.alloc(
                p.source,
                p.rune_off + last_off,
                p.rune_len - last_off,
                cut,
                p.byte_off + p.byte_len - cut,
            ))
        } else {
            None
        };

        let old = if start == end && first_off == 0 {
            PieceRange::boundary_before(&self.pieces, first)
        } else {
            // The covered span runs from `first` through the piece holding
            // `end - 1`; when `end` sits on a boundary that is the piece
            // before `last`.
            let last_covered = if last_off > 0 {
                last
            } else {
                self.pieces.get(last).prev
            };
            PieceRange::span(first, last_covered)
        };

        Isolation {
            old,
            left,
            right,
            start_byte,
            old_bytes: end_byte - start_byte,
        }
    }

    // ==================== Undo / redo ====================

    /// Undoes the most recent batch.
    ///
    /// Returns the caret ranges the reverted edits uncovered, one per
    /// record, or `None` when there is nothing to undo.
    pub fn undo(&mut self) -> Option<Vec<CaretPos>> {
        let records = self.history.pop_undo_batch();
        if records.is_empty() {
            return None;
        }

        let mut carets = Vec::with_capacity(records.len());
        for record in records {
            self.unapply(&record);
            carets.push(CaretPos {
                start: record.start_rune,
                end: record.start_rune + record.old_runes,
            });
            self.history.park_undone(record);
        }

        self.last_append = None;
        self.changed = true;
        self.note_history_move("undo");
        Some(carets)
    }

    /// Re-applies the most recently undone batch.
    pub fn redo(&mut self) -> Option<Vec<CaretPos>> {
        let records = self.history.pop_redo_batch();
        if records.is_empty() {
            return None;
        }

        let mut carets = Vec::with_capacity(records.len());
        for record in records {
            self.reapply(&record);
            carets.push(CaretPos {
                start: record.start_rune,
                end: record.start_rune + record.new_runes,
            });
            self.history.park_redone(record);
        }

        self.last_append = None;
        self.changed = true;
        self.note_history_move("redo");
        Some(carets)
    }

    fn unapply(&mut self, record: &SwapRecord) {
        match record.kind {
            RecordKind::Swap { old, new } => self.pieces.splice(new, old),
            RecordKind::AppendDelta { piece, runes, bytes } => {
                let piece = self.pieces.get_mut(piece);
                piece.rune_len -= runes;
                piece.byte_len -= bytes;
            }
        }
        self.rune_len = self.rune_len + record.old_runes - record.new_runes;
        self.byte_len = self.byte_len + record.old_bytes - record.new_bytes;
        self.line_index.undo();

        // Inverse relocation first, then exact restore of the offsets the
        // rule cannot recover.
        let _ = self.relocate_markers(record.start_rune, record.new_runes, record.old_runes);
        for &(id, offset) in &record.marker_snapshot {
            if let Some(marker) = self.markers.get_mut(id.0 as usize) {
                if marker.alive {
                    marker.offset = offset;
                }
            }
        }
    }

    fn reapply(&mut self, record: &SwapRecord) {
        match record.kind {
            RecordKind::Swap { old, new } => self.pieces.splice(old, new),
            RecordKind::AppendDelta { piece, runes, bytes } => {
                let piece = self.pieces.get_mut(piece);
                piece.rune_len += runes;
                piece.byte_len += bytes;
            }
        }
        self.rune_len = self.rune_len + record.new_runes - record.old_runes;
        self.byte_len = self.byte_len + record.new_bytes - record.old_bytes;
        self.line_index.redo();
        let _ = self.relocate_markers(record.start_rune, record.old_runes, record.new_runes);
    }

    fn note_history_move(&mut self, op: &'static str) {
        self.assert_consistent();
        tracing::trace!(
            op,
            undo_depth = self.history.undo_depth(),
            redo_depth = self.history.redo_depth(),
        );
    }

    // ==================== Batching ====================

    /// Opens (or joins) an undo batch; edits inside share one batch id
    /// and undo/redo as a unit.
    pub fn group_op(&mut self) {
        if self.batch_nesting == 0 {
            self.current_batch = self.next_batch;
            self.next_batch += 1;
        }
        self.batch_nesting += 1;
    }

    /// Closes the innermost `group_op`; only the outermost call ends the
    /// batch.
    pub fn ungroup_op(&mut self) {
        if self.batch_nesting == 0 {
            return;
        }
        self.batch_nesting -= 1;
        if self.batch_nesting == 0 {
            self.current_batch = self.next_batch;
            self.next_batch += 1;
        }
    }

    fn allocate_batch(&mut self) -> u64 {
        if self.batch_nesting > 0 {
            return self.current_batch;
        }
        self.current_batch = self.next_batch;
        self.next_batch += 1;
        self.current_batch
    }

    #[cfg(test)]
    pub(crate) fn current_batch(&self) -> u64 {
        self.current_batch
    }

    // ==================== Markers ====================

    /// Registers a marker at `rune_off` (clamped to the document) and
    /// returns its handle. Markers survive every edit, including undo and
    /// redo, until destroyed.
    pub fn create_marker(&mut self, rune_off: usize, bias: MarkerBias) -> MarkerId {
        let id = MarkerId(self.markers.len() as u32);
        self.markers.push(Marker {
            offset: rune_off.min(self.rune_len),
            bias,
            alive: true,
        });
        id
    }

    /// Current offset of a live marker.
    pub fn marker_offset(&self, id: MarkerId) -> Result<usize, BufferError> {
        match self.markers.get(id.0 as usize) {
            Some(marker) if marker.alive => Ok(marker.offset),
            _ => Err(BufferError::DeadMarker),
        }
    }

    /// Destroys a marker. The slot is swept lazily; the id is dead from
    /// here on.
    pub fn destroy_marker(&mut self, id: MarkerId) {
        if let Some(marker) = self.markers.get_mut(id.0 as usize) {
            marker.alive = false;
        }
    }

    /// Relocates live markers for an edit replacing `old` runes at
    /// `start` with `new` runes.
    ///
    /// Markers before the range hold still; markers past it shift by the
    /// length delta; markers inside collapse to `start`, then follow the
    /// inserted text iff their bias is forward. Returns the pre-edit
    /// offsets of the collapsed markers so undo can restore them exactly.
    fn relocate_markers(&mut self, start: usize, old: usize, new: usize) -> Vec<(MarkerId, usize)> {
        let end = start + old;
        let mut snapshot = Vec::new();

        for (i, marker) in self.markers.iter_mut().enumerate() {
            if !marker.alive {
                continue;
            }
            let offset = marker.offset;
            if offset < start {
                continue;
            }
            if offset > end {
                marker.offset = offset + new - old;
                continue;
            }

            if old > 0 {
                snapshot.push((MarkerId(i as u32), offset));
            }
            marker.offset = if new > 0 && marker.bias == MarkerBias::Forward {
                start + new
            } else {
                start
            };
        }
        snapshot
    }

    // ==================== Reads ====================

    /// Document length in runes.
    pub fn len(&self) -> usize {
        self.rune_len
    }

    pub fn is_empty(&self) -> bool {
        self.rune_len == 0
    }

    /// Document length in bytes.
    pub fn byte_len(&self) -> usize {
        self.byte_len
    }

    /// Number of real pieces in the chain.
    pub fn piece_count(&self) -> usize {
        self.pieces.count()
    }

    pub fn undo_depth(&self) -> usize {
        self.history.undo_depth()
    }

    pub fn redo_depth(&self) -> usize {
        self.history.redo_depth()
    }

    /// Whether content changed since the last call; reading resets the
    /// flag.
    pub fn changed(&mut self) -> bool {
        std::mem::take(&mut self.changed)
    }

    /// Byte offset of the given rune offset, clamped to the document end.
    pub fn rune_offset(&self, rune_index: usize) -> usize {
        let rune_index = rune_index.min(self.rune_len);
        let (piece, off) = self.pieces.find_piece_at(rune_index, self.rune_len);
        self.doc_byte_at(piece, off)
    }

    /// Copies document bytes starting at `byte_off` into `buf`; returns
    /// the count copied, zero at the end of the document.
    pub fn read_at(&self, buf: &mut [u8], byte_off: usize) -> usize {
        let mut copied = 0;
        let mut pos = 0;
        let mut idx = self.pieces.get(HEAD).next;
        while idx != TAIL && copied < buf.len() {
            let piece = self.pieces.get(idx);
            let piece_end = pos + piece.byte_len;
            if byte_off + copied < piece_end {
                let within = byte_off + copied - pos;
                let take = (piece.byte_len - within).min(buf.len() - copied);
                let src = self.store(piece.source).slice(piece.byte_off + within, take);
                buf[copied..copied + take].copy_from_slice(src);
                copied += take;
            }
            pos = piece_end;
            idx = piece.next;
        }
        copied
    }

    /// Reads the rune at the given rune offset.
    pub fn read_rune_at(&self, rune_index: usize) -> Result<char, BufferError> {
        if rune_index >= self.rune_len {
            return Err(BufferError::OutOfRange(rune_index));
        }
        let (idx, off) = self.pieces.find_piece_at(rune_index, self.rune_len);
        let piece = self.pieces.get(idx);
        let store = self.store(piece.source);
        let byte = store.rune_to_byte(piece.rune_off + off);
        store.decode_rune_at(byte).map(|(ch, _)| ch)
    }

    /// Decodes the rune starting at a document byte offset.
    ///
    /// `byte_off` must sit on a rune boundary; offsets inside a rune
    /// decode garbage or fail, exactly as raw UTF-8 would.
    pub fn read_rune_at_byte(&self, byte_off: usize) -> Result<(char, usize), BufferError> {
        if byte_off >= self.byte_len {
            return Err(BufferError::EndOfInput);
        }
        let (piece_start, idx) = self.piece_at_byte(byte_off);
        let piece = self.pieces.get(idx);
        let local = piece.byte_off + (byte_off - piece_start);
        self.store(piece.source).decode_rune_at(local)
    }

    /// Decodes the rune ending just before a document byte offset.
    pub fn read_rune_before_byte(&self, byte_off: usize) -> Result<(char, usize), BufferError> {
        if byte_off == 0 || byte_off > self.byte_len {
            return Err(BufferError::EndOfInput);
        }
        let (piece_start, idx) = self.piece_at_byte(byte_off - 1);
        let piece = self.pieces.get(idx);
        let local = piece.byte_off + (byte_off - piece_start);
        self.store(piece.source).decode_rune_before(local)
    }

    /// Number of logical lines. An empty document has none.
    pub fn lines(&self) -> usize {
        self.line_index.line_count()
    }

    /// Line `n`'s bytes (including its trailing line break) and the rune
    /// offset at which the line starts.
    pub fn read_line(&self, n: usize) -> Result<(Vec<u8>, usize), BufferError> {
        if n == 0 && self.line_index.line_count() == 0 {
            // Every editor asks for the line under the caret immediately,
            // so an empty document answers with an empty line.
            return Ok((Vec::new(), 0));
        }
        let entry = self
            .line_index
            .entry(n)
            .ok_or(BufferError::OutOfRange(n))?;
        let start = self
            .line_index
            .line_start(n)
            .ok_or(BufferError::OutOfRange(n))?;

        let mut bytes = vec![0; entry.byte_len];
        let copied = self.read_at(&mut bytes, start);
        bytes.truncate(copied);
        Ok((bytes, self.byte_to_rune(start)))
    }

    /// The whole document as bytes.
    pub fn text(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.byte_len);
        let mut idx = self.pieces.get(HEAD).next;
        while idx != TAIL {
            let piece = self.pieces.get(idx);
            out.extend_from_slice(self.store(piece.source).slice(piece.byte_off, piece.byte_len));
            idx = piece.next;
        }
        out
    }

    // ==================== Internal helpers ====================

    fn store(&self, source: Source) -> &TextStore {
        match source {
            Source::Original => &self.original,
            Source::Modify => &self.modify,
        }
    }

    /// Piece containing the document byte offset, plus the document byte
    /// offset at which that piece starts. `doc_byte` must be in range.
    fn piece_at_byte(&self, doc_byte: usize) -> (usize, PieceIdx) {
        let mut start = 0;
        let mut idx = self.pieces.get(HEAD).next;
        while idx != TAIL {
            let piece = self.pieces.get(idx);
            if doc_byte < start + piece.byte_len {
                return (start, idx);
            }
            start += piece.byte_len;
            idx = piece.next;
        }
        (start, TAIL)
    }

    /// Document byte offset of the position `off` runes into `piece`.
    fn doc_byte_at(&self, piece: PieceIdx, off: usize) -> usize {
        let mut acc = 0;
        let mut idx = self.pieces.get(HEAD).next;
        while idx != piece {
            acc += self.pieces.get(idx).byte_len;
            idx = self.pieces.get(idx).next;
        }
        if off == 0 {
            return acc;
        }
        let p = self.pieces.get(piece);
        let cut = self.store(p.source).rune_to_byte(p.rune_off + off);
        acc + (cut - p.byte_off)
    }

    /// Rune offset of a document byte offset that sits on a rune
    /// boundary.
    fn byte_to_rune(&self, byte_off: usize) -> usize {
        let mut bytes = 0;
        let mut runes = 0;
        let mut idx = self.pieces.get(HEAD).next;
        while idx != TAIL {
            let piece = self.pieces.get(idx);
            if byte_off < bytes + piece.byte_len {
                let store = self.store(piece.source);
                let target = piece.byte_off + (byte_off - bytes);
                let mut b = piece.byte_off;
                let mut r = 0;
                while b < target {
                    b += store.rune_width_at(b);
                    r += 1;
                }
                return runes + r;
            }
            bytes += piece.byte_len;
            runes += piece.rune_len;
            idx = piece.next;
        }
        runes
    }

    fn note_mutation(&mut self) {
        self.changed = true;
        self.assert_consistent();
    }

    /// Debug assertion: re-derives chain totals and the line index byte
    /// sum and checks them against the incremental counters.
    ///
    /// Sampled every 64th mutation so the O(n) walk doesn't tank tight
    /// edit loops. Compiled out in release builds.
    #[cfg(debug_assertions)]
    fn assert_consistent(&mut self) {
        self.debug_mutation_count += 1;
        if self.debug_mutation_count % 64 != 0 {
            return;
        }
        let (runes, bytes) = self.pieces.totals();
        assert_eq!(
            runes, self.rune_len,
            "piece chain rune total drifted after {} mutations",
            self.debug_mutation_count
        );
        assert_eq!(
            bytes, self.byte_len,
            "piece chain byte total drifted after {} mutations",
            self.debug_mutation_count
        );
        assert_eq!(
            self.line_index.byte_total(),
            self.byte_len,
            "line index byte total drifted after {} mutations",
            self.debug_mutation_count
        );
    }

    #[cfg(not(debug_assertions))]
    fn assert_consistent(&mut self) {}
}

impl Default for PieceTable {
    fn default() -> Self {
        Self::new(b"")
    }
}
