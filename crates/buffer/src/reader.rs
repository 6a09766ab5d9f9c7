//! Sequential readers over the logical document.

use std::io;

use crate::store;
use crate::table::PieceTable;
use crate::types::BufferError;

/// The read capabilities a document offers its readers.
///
/// [`PieceTable`] is the canonical implementation; anything that can
/// answer these five queries can feed a [`Reader`] or the line wrapper's
/// paragraph loader.
pub trait TextSource {
    /// Length in runes.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Length in bytes.
    fn byte_len(&self) -> usize;

    /// Scatter-read bytes at a document byte offset; returns the count
    /// copied, zero at the end.
    fn read_at(&self, buf: &mut [u8], byte_off: usize) -> usize;

    /// Rune at a rune offset.
    fn read_rune_at(&self, rune_index: usize) -> Result<char, BufferError>;

    /// Byte offset of a rune offset.
    fn rune_offset(&self, rune_index: usize) -> usize;
}

impl TextSource for PieceTable {
    fn len(&self) -> usize {
        PieceTable::len(self)
    }

    fn byte_len(&self) -> usize {
        PieceTable::byte_len(self)
    }

    fn read_at(&self, buf: &mut [u8], byte_off: usize) -> usize {
        PieceTable::read_at(self, buf, byte_off)
    }

    fn read_rune_at(&self, rune_index: usize) -> Result<char, BufferError> {
        PieceTable::read_rune_at(self, rune_index)
    }

    fn rune_offset(&self, rune_index: usize) -> usize {
        PieceTable::rune_offset(self, rune_index)
    }
}

/// A restartable sequential reader.
///
/// Holds a byte position into the document and implements [`io::Read`]
/// and [`io::Seek`]. Reading during a batched edit is only safe at batch
/// boundaries; the reader itself never mutates the source.
#[derive(Debug)]
pub struct Reader<'a, S: TextSource + ?Sized> {
    source: &'a S,
    pos: usize,
}

impl<'a, S: TextSource + ?Sized> Reader<'a, S> {
    pub fn new(source: &'a S) -> Self {
        Self { source, pos: 0 }
    }

    /// Byte position of the next read.
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Reads from the current position to the end of the document.
    pub fn read_all(&mut self) -> Vec<u8> {
        let remaining = self.source.byte_len().saturating_sub(self.pos);
        let mut out = vec![0; remaining];
        let n = self.source.read_at(&mut out, self.pos);
        out.truncate(n);
        self.pos += n;
        out
    }

    /// Decodes the rune at the current position and advances past it.
    pub fn read_rune(&mut self) -> Result<char, BufferError> {
        let mut buf = [0u8; 4];
        let n = self.source.read_at(&mut buf, self.pos);
        if n == 0 {
            return Err(BufferError::EndOfInput);
        }
        let (ch, width) =
            store::decode_rune(&buf[..n]).ok_or(BufferError::Decode(self.pos))?;
        self.pos += width;
        Ok(ch)
    }
}

impl<S: TextSource + ?Sized> io::Read for Reader<'_, S> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let n = self.source.read_at(buf, self.pos);
        self.pos += n;
        Ok(n)
    }
}

impl<S: TextSource + ?Sized> io::Seek for Reader<'_, S> {
    fn seek(&mut self, pos: io::SeekFrom) -> io::Result<u64> {
        let len = self.source.byte_len() as i64;
        let target = match pos {
            io::SeekFrom::Start(n) => n as i64,
            io::SeekFrom::End(n) => len + n,
            io::SeekFrom::Current(n) => self.pos as i64 + n,
        };
        if target < 0 {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                "seek before document start",
            ));
        }
        self.pos = target as usize;
        Ok(self.pos as u64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Read, Seek, SeekFrom};

    #[test]
    fn test_read_all() {
        let mut table = PieceTable::new(b"");
        table.replace(0, 0, "hello,world.");

        let mut reader = Reader::new(&table);
        assert_eq!(reader.read_all(), b"hello,world.");
        // A second read from the end yields nothing.
        assert_eq!(reader.read_all(), b"");
    }

    #[test]
    fn test_io_read_in_chunks() {
        let mut table = PieceTable::new(b"");
        table.replace(0, 0, "hello");
        table.replace(5, 5, ",world");

        let mut reader = Reader::new(&table);
        let mut buf = [0u8; 4];
        assert_eq!(reader.read(&mut buf).expect("read"), 4);
        assert_eq!(&buf, b"hell");
        assert_eq!(reader.read(&mut buf).expect("read"), 4);
        assert_eq!(&buf, b"o,wo");
        assert_eq!(reader.read(&mut buf).expect("read"), 3);
        assert_eq!(&buf[..3], b"rld");
        assert_eq!(reader.read(&mut buf).expect("read"), 0);
    }

    #[test]
    fn test_seek_restarts() {
        let table = PieceTable::new(b"hello");
        let mut reader = Reader::new(&table);
        let _ = reader.read_all();

        reader.seek(SeekFrom::Start(1)).expect("seek");
        assert_eq!(reader.read_all(), b"ello");

        reader.seek(SeekFrom::End(-2)).expect("seek");
        assert_eq!(reader.read_all(), b"lo");

        assert!(reader.seek(SeekFrom::Current(-100)).is_err());
    }

    #[test]
    fn test_read_rune_sequential() {
        let table = PieceTable::new("a你b".as_bytes());
        let mut reader = Reader::new(&table);
        assert_eq!(reader.read_rune(), Ok('a'));
        assert_eq!(reader.read_rune(), Ok('你'));
        assert_eq!(reader.read_rune(), Ok('b'));
        assert_eq!(reader.read_rune(), Err(BufferError::EndOfInput));
    }

    #[test]
    fn test_reader_over_trait_object() {
        let table = PieceTable::new(b"abc");
        let source: &dyn TextSource = &table;
        let mut reader = Reader::new(source);
        assert_eq!(reader.read_all(), b"abc");
    }
}
