//! Synchronized break-opportunity iterators over one paragraph.
//!
//! The wrapper drives two cursors over the same text: UAX #14 line-break
//! opportunities ("word breaks") and grapheme-cluster ends. Both sides
//! share one monotone position, so whichever iterator is consulted next
//! only ever yields offsets past everything already placed — and a
//! one-slot unread lets the wrapper push back the break it could not
//! fit.

use unicode_linebreak::linebreaks;
use unicode_segmentation::UnicodeSegmentation;

/// Break opportunities for a paragraph, as ascending rune offsets.
#[derive(Debug)]
pub(crate) struct Breaker {
    words: Vec<usize>,
    graphemes: Vec<usize>,
    word_cursor: usize,
    grapheme_cursor: usize,
    /// The most recently handed-out offset; both iterators skip at or
    /// below it.
    prev: usize,
    unread: bool,
}

impl Breaker {
    pub(crate) fn new(paragraph: &str) -> Self {
        // The segmenters speak byte offsets; precompute the rune offset
        // of every boundary byte.
        let mut rune_at_byte = vec![0usize; paragraph.len() + 1];
        let mut total = 0;
        for (runes, (byte, _)) in paragraph.char_indices().enumerate() {
            rune_at_byte[byte] = runes;
            total = runes + 1;
        }
        rune_at_byte[paragraph.len()] = total;

        let words = linebreaks(paragraph)
            .map(|(byte, _)| rune_at_byte[byte])
            .collect();
        let graphemes = paragraph
            .grapheme_indices(true)
            .map(|(byte, grapheme)| rune_at_byte[byte + grapheme.len()])
            .collect();

        Self {
            words,
            graphemes,
            word_cursor: 0,
            grapheme_cursor: 0,
            prev: 0,
            unread: false,
        }
    }

    /// Next line-break opportunity past the shared position.
    pub(crate) fn next_word_break(&mut self) -> Option<usize> {
        if self.unread {
            self.unread = false;
            return Some(self.prev);
        }
        while self.word_cursor < self.words.len() {
            let offset = self.words[self.word_cursor];
            self.word_cursor += 1;
            if offset > self.prev {
                self.prev = offset;
                return Some(offset);
            }
        }
        None
    }

    /// Next grapheme-cluster end past the shared position.
    pub(crate) fn next_grapheme_break(&mut self) -> Option<usize> {
        if self.unread {
            self.unread = false;
            return Some(self.prev);
        }
        while self.grapheme_cursor < self.graphemes.len() {
            let offset = self.graphemes[self.grapheme_cursor];
            self.grapheme_cursor += 1;
            if offset > self.prev {
                self.prev = offset;
                return Some(offset);
            }
        }
        None
    }

    /// Re-arms the most recently returned break so the next call hands
    /// it out again.
    pub(crate) fn mark_prev_unread(&mut self) {
        self.unread = true;
    }

    /// Moves the shared position back to `offset`, re-enabling breaks
    /// beyond it. Used when the wrapper falls back from a word break to
    /// the grapheme breaks inside that word.
    pub(crate) fn rewind_to(&mut self, offset: usize) {
        self.prev = offset;
        self.unread = false;
    }

    /// Moves the shared position forward to `offset` when consumed
    /// glyph clusters overshoot the announced break.
    pub(crate) fn advance_to(&mut self, offset: usize) {
        if offset > self.prev {
            self.prev = offset;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_word_breaks_ascii() {
        let mut breaker = Breaker::new("foo bar baz");
        assert_eq!(breaker.next_word_break(), Some(4));
        assert_eq!(breaker.next_word_break(), Some(8));
        assert_eq!(breaker.next_word_break(), Some(11));
        assert_eq!(breaker.next_word_break(), None);
    }

    #[test]
    fn test_word_breaks_after_tab() {
        let mut breaker = Breaker::new("\tX");
        assert_eq!(breaker.next_word_break(), Some(1));
        assert_eq!(breaker.next_word_break(), Some(2));
        assert_eq!(breaker.next_word_break(), None);
    }

    #[test]
    fn test_grapheme_breaks_are_rune_offsets() {
        // é as e + combining acute is one grapheme of two runes.
        let mut breaker = Breaker::new("ae\u{0301}b");
        assert_eq!(breaker.next_grapheme_break(), Some(1));
        assert_eq!(breaker.next_grapheme_break(), Some(3));
        assert_eq!(breaker.next_grapheme_break(), Some(4));
        assert_eq!(breaker.next_grapheme_break(), None);
    }

    #[test]
    fn test_unread_re_arms_last_break() {
        let mut breaker = Breaker::new("foo bar");
        assert_eq!(breaker.next_word_break(), Some(4));
        breaker.mark_prev_unread();
        assert_eq!(breaker.next_word_break(), Some(4));
        assert_eq!(breaker.next_word_break(), Some(7));
    }

    #[test]
    fn test_shared_position_filters_both_sides() {
        let mut breaker = Breaker::new("foo bar");
        assert_eq!(breaker.next_word_break(), Some(4));
        // Grapheme breaks at or below the word break are consumed.
        assert_eq!(breaker.next_grapheme_break(), Some(5));
    }

    #[test]
    fn test_rewind_reopens_interior_graphemes() {
        let mut breaker = Breaker::new("wide word");
        assert_eq!(breaker.next_word_break(), Some(5));
        breaker.rewind_to(0);
        assert_eq!(breaker.next_grapheme_break(), Some(1));
        assert_eq!(breaker.next_grapheme_break(), Some(2));
    }

    #[test]
    fn test_advance_to_skips_stale_breaks() {
        let mut breaker = Breaker::new("abcdef");
        breaker.advance_to(4);
        assert_eq!(breaker.next_grapheme_break(), Some(5));
    }

    #[test]
    fn test_empty_paragraph() {
        let mut breaker = Breaker::new("");
        assert_eq!(breaker.next_word_break(), None);
        assert_eq!(breaker.next_grapheme_break(), None);
    }
}
