use std::io::{self, Read};

use crate::error::DecodeErrorKind;

/// A view over the input that may consume at most a fixed number of bytes.
///
/// A child view borrows its parent mutably and reads through it, so the
/// parent's budget shrinks along with the child's and the parent cannot be
/// touched until the child is dropped.
pub struct BoundedSource<'a> {
    inner: &'a mut dyn Read,
    remaining: u64,
    position: u64,
    consumed: u64,
    bounded: bool,
}

impl<'a> BoundedSource<'a> {
    /// Wraps the top of the input. The end of the stream is a legal boundary.
    pub fn unbounded(inner: &'a mut dyn Read) -> Self {
        Self {
            inner,
            remaining: u64::MAX,
            position: 0,
            consumed: 0,
            bounded: false,
        }
    }

    /// Limits `inner` to `length` bytes.
    pub fn new(inner: &'a mut dyn Read, length: u64) -> Self {
        Self {
            inner,
            remaining: length,
            position: 0,
            consumed: 0,
            bounded: true,
        }
    }

    /// Returns a view over the next `length` bytes of this one.
    pub fn bound(&mut self, length: u64) -> Result<BoundedSource<'_>, DecodeErrorKind> {
        if length > self.remaining {
            return Err(DecodeErrorKind::TruncatedChunk {
                requested: length,
                available: self.remaining,
            });
        }
        let position = self.position;
        Ok(BoundedSource {
            inner: self,
            remaining: length,
            position,
            consumed: 0,
            bounded: true,
        })
    }

    pub fn remaining(&self) -> u64 {
        self.remaining
    }

    /// The absolute offset of the next byte from the start of the input.
    pub fn position(&self) -> u64 {
        self.position
    }

    pub fn consumed(&self) -> u64 {
        self.consumed
    }

    pub fn is_bounded(&self) -> bool {
        self.bounded
    }

    pub fn is_exhausted(&self) -> bool {
        self.remaining == 0
    }

    /// Fills `buf` completely or fails without reading past the budget.
    pub fn read_bytes(&mut self, buf: &mut [u8]) -> Result<(), DecodeErrorKind> {
        let requested = buf.len() as u64;
        if requested > self.remaining {
            return Err(DecodeErrorKind::TruncatedChunk {
                requested,
                available: self.remaining,
            });
        }
        let filled = self.fill(buf)? as u64;
        if filled < requested {
            return Err(DecodeErrorKind::TruncatedChunk {
                requested,
                available: filled,
            });
        }
        Ok(())
    }

    /// Reads up to `buf.len()` bytes, stopping early only at the end of the
    /// budget or the stream. Returns the number of bytes read.
    pub fn fill(&mut self, buf: &mut [u8]) -> Result<usize, DecodeErrorKind> {
        let mut filled = 0;
        while filled < buf.len() {
            match self.read(&mut buf[filled..]) {
                Ok(0) => break,
                Ok(n) => filled += n,
                Err(err) if err.kind() == io::ErrorKind::Interrupted => continue,
                Err(err) => return Err(DecodeErrorKind::Io(err)),
            }
        }
        Ok(filled)
    }

    /// Reads the whole remaining budget.
    pub fn read_to_budget(&mut self) -> Result<Vec<u8>, DecodeErrorKind> {
        let mut data = Vec::new();
        self.read_to_end(&mut data)?;
        if self.bounded && self.remaining > 0 {
            return Err(DecodeErrorKind::TruncatedChunk {
                requested: self.remaining + data.len() as u64,
                available: data.len() as u64,
            });
        }
        Ok(data)
    }

    /// Discards exactly `length` bytes.
    pub fn skip(&mut self, length: u64) -> Result<(), DecodeErrorKind> {
        if length > self.remaining {
            return Err(DecodeErrorKind::TruncatedChunk {
                requested: length,
                available: self.remaining,
            });
        }
        let skipped = io::copy(&mut self.by_ref().take(length), &mut io::sink())?;
        if skipped < length {
            return Err(DecodeErrorKind::TruncatedChunk {
                requested: length,
                available: skipped,
            });
        }
        Ok(())
    }
}

impl Read for BoundedSource<'_> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        if self.remaining == 0 || buf.is_empty() {
            return Ok(0);
        }
        let max = (buf.len() as u64).min(self.remaining) as usize;
        let n = self.inner.read(&mut buf[..max])?;
        self.remaining -= n as u64;
        self.position += n as u64;
        self.consumed += n as u64;
        Ok(n)
    }
}
