//! Append-only backing stores with a sparse rune-offset index.
//!
//! A document is assembled from slices of two stores: `original` (the
//! initial text, written exactly once) and `modify` (every inserted span,
//! appended at the tail). Bytes are never overwritten or moved, which is
//! what lets pieces and undo records reference them by plain offsets.
//!
//! Rune-to-byte conversion is the hot query. Each store keeps one byte
//! offset per [`INDEX_INTERVAL`] runes, so a lookup seeks the nearest
//! anchor at or below the target and decodes forward a bounded number of
//! runes.

use crate::types::BufferError;

/// Anchor spacing: one byte-offset anchor per this many runes.
const INDEX_INTERVAL: usize = 32;

/// Growth quantum for the byte buffer, to avoid frequent reallocation
/// under bursts of small appends.
const CHUNK_SIZE: usize = 4096;

/// Which backing store a piece cites.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Source {
    /// The immutable initial text.
    Original,
    /// Accumulated insertions.
    Modify,
}

/// An append-only byte buffer plus its sparse rune-offset index.
///
/// `anchors[i]` is the byte offset of rune `i * INDEX_INTERVAL`; the
/// offsets are strictly increasing. `anchors[0]` is always 0.
#[derive(Debug)]
pub(crate) struct TextStore {
    buf: Vec<u8>,
    anchors: Vec<usize>,
    rune_len: usize,
}

impl TextStore {
    pub(crate) fn new() -> Self {
        Self {
            buf: Vec::new(),
            anchors: vec![0],
            rune_len: 0,
        }
    }

    pub(crate) fn byte_len(&self) -> usize {
        self.buf.len()
    }

    pub(crate) fn rune_len(&self) -> usize {
        self.rune_len
    }

    /// One-shot initialization; returns the rune count.
    ///
    /// Tolerates invalid UTF-8: an undecodable byte counts as one rune of
    /// width one, and surfaces as [`BufferError::Decode`] only when read
    /// back as a rune. Raw byte reads always work.
    pub(crate) fn set(&mut self, bytes: &[u8]) -> usize {
        self.buf = bytes.to_vec();
        self.anchors.clear();
        self.anchors.push(0);
        self.rune_len = 0;

        let mut off = 0;
        while off < self.buf.len() {
            off += rune_width(&self.buf[off..]);
            self.rune_len += 1;
            if self.rune_len % INDEX_INTERVAL == 0 {
                self.anchors.push(off);
            }
        }
        self.rune_len
    }

    /// Appends `text`, returning its rune offset, byte offset, and rune
    /// count. Previously appended bytes are never touched.
    pub(crate) fn append(&mut self, text: &str) -> (usize, usize, usize) {
        self.ensure(text.len());

        let byte_off = self.buf.len();
        let rune_off = self.rune_len;
        self.buf.extend_from_slice(text.as_bytes());

        let mut count = 0;
        for (i, ch) in text.char_indices() {
            count += 1;
            self.rune_len += 1;
            if self.rune_len % INDEX_INTERVAL == 0 {
                self.anchors.push(byte_off + i + ch.len_utf8());
            }
        }
        (rune_off, byte_off, count)
    }

    /// Grows capacity in [`CHUNK_SIZE`] steps.
    fn ensure(&mut self, n: usize) {
        let needed = self.buf.len() + n;
        if needed <= self.buf.capacity() {
            return;
        }
        let target = needed.div_ceil(CHUNK_SIZE) * CHUNK_SIZE;
        self.buf.reserve_exact(target - self.buf.len());
    }

    /// Byte offset of the given rune offset.
    ///
    /// Seeks the nearest anchor at or below `rune_off`, then decodes
    /// forward at most `INDEX_INTERVAL - 1` runes. `rune_off` must not
    /// exceed the store's rune length.
    pub(crate) fn rune_to_byte(&self, rune_off: usize) -> usize {
        debug_assert!(rune_off <= self.rune_len);
        if rune_off >= self.rune_len {
            return self.buf.len();
        }

        let anchor = rune_off / INDEX_INTERVAL;
        let mut byte = self.anchors[anchor];
        let mut remaining = rune_off - anchor * INDEX_INTERVAL;
        while remaining > 0 {
            byte += rune_width(&self.buf[byte..]);
            remaining -= 1;
        }
        byte
    }

    /// Decodes the rune starting at `byte_off`.
    pub(crate) fn decode_rune_at(&self, byte_off: usize) -> Result<(char, usize), BufferError> {
        if byte_off >= self.buf.len() {
            return Err(BufferError::EndOfInput);
        }
        decode_rune(&self.buf[byte_off..]).ok_or(BufferError::Decode(byte_off))
    }

    /// Decodes the rune ending just before `byte_off`.
    pub(crate) fn decode_rune_before(&self, byte_off: usize) -> Result<(char, usize), BufferError> {
        if byte_off == 0 || byte_off > self.buf.len() {
            return Err(BufferError::EndOfInput);
        }

        // Walk back at most four bytes to find a start whose rune ends
        // exactly at `byte_off`.
        let floor = byte_off.saturating_sub(4);
        let mut start = byte_off - 1;
        loop {
            if let Some((ch, width)) = decode_rune(&self.buf[start..byte_off]) {
                if width == byte_off - start {
                    return Ok((ch, width));
                }
            }
            if start == floor {
                return Err(BufferError::Decode(byte_off - 1));
            }
            start -= 1;
        }
    }

    /// Width in bytes of the rune starting at `byte_off`.
    pub(crate) fn rune_width_at(&self, byte_off: usize) -> usize {
        rune_width(&self.buf[byte_off..])
    }

    pub(crate) fn slice(&self, byte_off: usize, len: usize) -> &[u8] {
        &self.buf[byte_off..byte_off + len]
    }
}

/// Decodes the first rune of `bytes`; `None` on invalid UTF-8 or empty
/// input.
pub(crate) fn decode_rune(bytes: &[u8]) -> Option<(char, usize)> {
    let take = bytes.len().min(4);
    let prefix = match core::str::from_utf8(&bytes[..take]) {
        Ok(s) => s,
        Err(err) => core::str::from_utf8(&bytes[..err.valid_up_to()]).ok()?,
    };
    prefix.chars().next().map(|c| (c, c.len_utf8()))
}

/// Width of the rune at the head of `bytes`; undecodable bytes advance by
/// one so that counting always terminates.
fn rune_width(bytes: &[u8]) -> usize {
    decode_rune(bytes).map_or(1, |(_, w)| w)
}
