//! Greedy paragraph wrapping with tab-stop expansion.
//!
//! The wrapper pulls shaped glyphs one break opportunity at a time and
//! packs them into visual lines. Lines break at UAX #14 opportunities;
//! a word too wide for any line degrades to grapheme-cluster breaks
//! until it has been placed. Tab runes are rewritten on the fly: their
//! advance becomes the distance to the next tab stop and they adopt the
//! space glyph's id and vertical metrics.
//!
//! Every paragraph rune lands in exactly one output line, in logical
//! order; the wrapper never fails.

use crate::breaker::Breaker;
use crate::fixed::Fixed;
use crate::glyph::{Glyph, VisualLine};

/// Buffered pull reader over the shaped glyph stream.
#[derive(Debug)]
struct GlyphReader<I> {
    glyphs: I,
    buf: Vec<Glyph>,
    /// The buffered word alone exceeds the line width.
    overflow: bool,
}

impl<I: Iterator<Item = Glyph>> GlyphReader<I> {
    /// Pulls one glyph into the buffer.
    fn next(&mut self) -> Option<Glyph> {
        let glyph = self.glyphs.next()?;
        self.buf.push(glyph);
        Some(glyph)
    }

    /// Summed advance of the buffered glyphs.
    fn advance(&self) -> Fixed {
        self.buf.iter().fold(Fixed::ZERO, |w, g| w + g.advance)
    }
}

/// Wraps one paragraph of shaped glyphs into visual lines.
///
/// `glyphs` yields the paragraph's shaped glyphs in logical order;
/// `paragraph` is the text they were shaped from. `max_width` bounds
/// each line's advance. Tab runes expand to the next multiple of
/// `tab_stop_interval`, taking `space_glyph`'s id, ascent, and descent.
pub fn wrap_paragraph<I>(
    glyphs: I,
    paragraph: &str,
    max_width: Fixed,
    tab_stop_interval: Fixed,
    space_glyph: &Glyph,
) -> Vec<VisualLine>
where
    I: IntoIterator<Item = Glyph>,
{
    let mut wrapper = LineWrapper {
        breaker: Breaker::new(paragraph),
        reader: GlyphReader {
            glyphs: glyphs.into_iter(),
            buf: Vec::new(),
            overflow: false,
        },
        paragraph: paragraph.chars().collect(),
        max_width,
        tab_interval: tab_stop_interval,
        space_glyph: *space_glyph,
        rune_off: 0,
        buf_rune_start: 0,
        fallback_until: None,
        line: VisualLine::default(),
    };

    let mut lines = Vec::new();
    loop {
        let line = wrapper.wrap_next_line();
        if line.glyphs.is_empty() {
            break;
        }
        lines.push(line);
    }
    tracing::trace!(lines = lines.len(), runes = wrapper.paragraph.len(), "wrapped paragraph");
    lines
}

struct LineWrapper<I> {
    breaker: Breaker,
    reader: GlyphReader<I>,
    paragraph: Vec<char>,
    max_width: Fixed,
    tab_interval: Fixed,
    space_glyph: Glyph,
    /// Paragraph rune offset just past the clusters pulled so far.
    rune_off: usize,
    /// Rune offset where the buffered glyphs start.
    buf_rune_start: usize,
    /// While set, break at grapheme boundaries until this word break.
    fallback_until: Option<usize>,
    line: VisualLine,
}

impl<I: Iterator<Item = Glyph>> LineWrapper<I> {
    /// Produces the next visual line; an empty line means the paragraph
    /// is exhausted.
    fn wrap_next_line(&mut self) -> VisualLine {
        debug_assert!(self.line.glyphs.is_empty());

        // A whole word held over from the previous line moves first; a
        // partially placed oversized word stays buffered for the
        // grapheme loop below.
        if !self.reader.buf.is_empty() && !self.reader.overflow {
            self.take_buffer();
        }

        loop {
            if let Some(limit) = self.fallback_until {
                if !self.emit_grapheme_chunks(limit) {
                    // Line filled mid-word; resume the fallback on the
                    // next line.
                    return std::mem::take(&mut self.line);
                }
                self.fallback_until = None;
                self.reader.overflow = false;
            }

            let Some(break_at) = self.breaker.next_word_break() else {
                // End of paragraph: whatever is buffered closes the line.
                self.take_buffer();
                return std::mem::take(&mut self.line);
            };

            if !self.read_to_break(break_at) {
                // A single word wider than the line. Emit what we have,
                // then break the word at grapheme boundaries.
                self.fallback_until = Some(break_at);
                self.breaker.rewind_to(self.buf_rune_start);
                if !self.line.glyphs.is_empty() {
                    return std::mem::take(&mut self.line);
                }
                continue;
            }

            if self.line.width + self.reader.advance() > self.max_width {
                // The word fits a line, just not this one: emit the line
                // and keep the word buffered for the next.
                return std::mem::take(&mut self.line);
            }

            self.take_buffer();
        }
    }

    /// Reads glyph clusters until the paragraph position reaches
    /// `break_at`, expanding tabs as they arrive. Returns false if the
    /// buffered advance alone exceeds the line width.
    fn read_to_break(&mut self, break_at: usize) -> bool {
        while self.rune_off < break_at {
            let Some(glyph) = self.reader.next() else {
                break;
            };
            if glyph.cluster_break {
                self.rune_off += glyph.runes;
                if self.paragraph[self.rune_off - 1] == '\t' {
                    self.expand_tab();
                }
            }
            if self.reader.advance() > self.max_width {
                self.reader.overflow = true;
                return false;
            }
        }
        true
    }

    /// Appends grapheme-sized chunks of the oversized word until `limit`
    /// is consumed. Returns false when the line fills first.
    fn emit_grapheme_chunks(&mut self, limit: usize) -> bool {
        while self.buf_rune_start < limit {
            let Some(brk) = self.breaker.next_grapheme_break() else {
                // Defensive: no grapheme boundary left, flush the rest.
                self.take_buffer();
                return true;
            };

            let (chunk, chunk_end) = self.chunk_to(brk);
            if chunk.is_empty() {
                // The glyph stream ran dry short of the break.
                self.buf_rune_start = chunk_end.max(brk);
                continue;
            }

            let advance = chunk.iter().fold(Fixed::ZERO, |w, g| w + g.advance);
            if !self.line.glyphs.is_empty() && self.line.width + advance > self.max_width {
                // Put the chunk back at the head of the buffer and hand
                // it to the next line.
                let rest = std::mem::replace(&mut self.reader.buf, chunk);
                self.reader.buf.extend(rest);
                self.breaker.mark_prev_unread();
                return false;
            }

            // A chunk wider than the line on an empty line is emitted
            // anyway; there is no smaller unit to break to.
            self.line.append(&chunk);
            self.buf_rune_start = chunk_end;
            self.breaker.advance_to(chunk_end);
        }
        true
    }

    /// Takes glyphs from the buffer head covering runes up to `brk`,
    /// pulling more from the stream as needed. Returns the chunk and the
    /// rune offset it actually reaches (clusters may overshoot).
    fn chunk_to(&mut self, brk: usize) -> (Vec<Glyph>, usize) {
        while self.rune_off < brk {
            let Some(glyph) = self.reader.next() else {
                break;
            };
            if glyph.cluster_break {
                self.rune_off += glyph.runes;
                if self.paragraph[self.rune_off - 1] == '\t' {
                    self.expand_tab();
                }
            }
        }

        let mut pos = self.buf_rune_start;
        let mut cut = None;
        for (i, glyph) in self.reader.buf.iter().enumerate() {
            if glyph.cluster_break {
                pos += glyph.runes;
                if pos >= brk {
                    cut = Some(i + 1);
                    break;
                }
            }
        }
        let cut = cut.unwrap_or(self.reader.buf.len());
        let chunk: Vec<Glyph> = self.reader.buf.drain(..cut).collect();
        (chunk, pos)
    }

    /// Moves all buffered glyphs onto the current line.
    fn take_buffer(&mut self) {
        if !self.reader.buf.is_empty() {
            let buf = std::mem::take(&mut self.reader.buf);
            self.line.append(&buf);
        }
        self.reader.overflow = false;
        self.buf_rune_start = self.rune_off;
    }

    /// Rewrites the just-buffered tab glyph: its advance becomes the gap
    /// to the next tab stop and it borrows the space glyph's id and
    /// vertical metrics.
    fn expand_tab(&mut self) {
        if !self.tab_interval.is_positive() {
            return;
        }
        // The tab begins after the committed line and any glyphs
        // buffered ahead of it in the same segment.
        let mut pos = self.line.width;
        if let Some((_, before)) = self.reader.buf.split_last() {
            for glyph in before {
                pos += glyph.advance;
            }
        }
        let next_stop = self.tab_interval * (pos.div_floor(self.tab_interval) + 1);
        let advance = next_stop - pos;
        if let Some(glyph) = self.reader.buf.last_mut() {
            glyph.advance = advance;
            glyph.id = self.space_glyph.id;
            glyph.ascent = self.space_glyph.ascent;
            glyph.descent = self.space_glyph.descent;
        }
    }
}
