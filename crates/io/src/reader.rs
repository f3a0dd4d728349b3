use bytes::{Buf, Bytes};

use super::{DecodeError, NeoRead};

/// Cursor over a borrowed byte slice.
///
/// Every read either takes the requested bytes or fails with
/// [`DecodeError::UnexpectedEof`] and leaves the cursor where it was.
pub struct SliceReader<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> SliceReader<'a> {
    #[inline]
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }

    /// Bytes read so far.
    #[inline]
    pub fn consumed(&self) -> usize {
        self.pos
    }

    /// The unread tail.
    #[inline]
    pub fn rest(&self) -> &'a [u8] {
        &self.data[self.pos..]
    }

    pub fn peek_u8(&self) -> Option<u8> {
        self.rest().first().copied()
    }

    fn take(&mut self, len: usize) -> Result<&'a [u8], DecodeError> {
        let rest = self.rest();
        if rest.len() < len {
            return Err(eof(len, rest.len()));
        }
        self.pos += len;
        Ok(&rest[..len])
    }
}

impl NeoRead for SliceReader<'_> {
    fn read_into(&mut self, buf: &mut [u8]) -> Result<(), DecodeError> {
        let chunk = self.take(buf.len())?;
        buf.copy_from_slice(chunk);
        Ok(())
    }

    #[inline]
    fn remaining(&self) -> usize {
        self.data.len() - self.pos
    }
}

/// Owned buffers, e.g. a raw transaction handed over by a relay, are read
/// by splitting off the front.
impl NeoRead for Bytes {
    fn read_into(&mut self, buf: &mut [u8]) -> Result<(), DecodeError> {
        let available = self.len();
        if available < buf.len() {
            return Err(eof(buf.len(), available));
        }
        let head = self.split_to(buf.len());
        buf.copy_from_slice(&head);
        Ok(())
    }

    #[inline]
    fn remaining(&self) -> usize {
        Buf::remaining(self)
    }
}

#[inline]
fn eof(needed: usize, remaining: usize) -> DecodeError {
    DecodeError::UnexpectedEof { needed, remaining }
}
