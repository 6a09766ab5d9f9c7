//! tessera-layout: greedy line wrapping for shaped text.
//!
//! This crate takes one paragraph of shaped glyphs plus the text it was
//! shaped from and partitions it into visual lines of bounded width.
//! Lines break at UAX #14 opportunities; a word wider than the line
//! degrades to grapheme-cluster breaks so it still fits. Tab runes are
//! expanded to the next tab stop as they stream past, adopting the
//! space glyph's id and vertical metrics.
//!
//! The wrapper is deliberately ignorant of fonts and buffers: it sees
//! only [`Glyph`] values and the paragraph string. Shaping them is the
//! caller's job, which keeps this crate usable against any shaper that
//! can report cluster extents.
//!
//! # Example
//!
//! ```
//! use tessera_layout::{wrap_paragraph, Fixed, Glyph};
//!
//! let em = Fixed::from_int(10);
//! let space = Glyph {
//!     id: 0,
//!     runes: 1,
//!     cluster_break: true,
//!     advance: em,
//!     ascent: Fixed::from_int(8),
//!     descent: Fixed::from_int(2),
//! };
//! // A monospace shaping of "hello world".
//! let text = "hello world";
//! let glyphs: Vec<Glyph> = text.chars().map(|_| space).collect();
//!
//! let lines = wrap_paragraph(glyphs, text, em * 6, em * 4, &space);
//! assert_eq!(lines.len(), 2);
//! assert_eq!(lines[0].glyphs.len(), 6); // "hello "
//! assert_eq!(lines[1].glyphs.len(), 5); // "world"
//! ```

mod breaker;
mod fixed;
mod glyph;
mod wrapper;

pub use fixed::Fixed;
pub use glyph::{Glyph, VisualLine};
pub use wrapper::wrap_paragraph;
