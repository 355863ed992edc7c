use crate::ProfileError;

/// Bounds-checked big-endian reader over a byte slice.
#[derive(Debug, Clone)]
pub struct ByteCursor<'a> {
    bytes: &'a [u8],
    pos: usize,
}

impl<'a> ByteCursor<'a> {
    pub fn new(bytes: &'a [u8]) -> Self {
        Self { bytes, pos: 0 }
    }

    pub fn at(bytes: &'a [u8], pos: usize) -> Self {
        Self { bytes, pos }
    }

    pub fn position(&self) -> usize {
        self.pos
    }

    pub fn seek(&mut self, pos: usize) {
        self.pos = pos;
    }

    pub fn remaining(&self) -> usize {
        self.bytes.len().saturating_sub(self.pos)
    }

    pub fn read_bytes(&mut self, len: usize) -> Result<&'a [u8], ProfileError> {
        let out = slice_at(self.bytes, self.pos, len)?;
        self.pos += len;
        Ok(out)
    }

    pub fn read_signature(&mut self) -> Result<[u8; 4], ProfileError> {
        let mut sig = [0u8; 4];
        sig.copy_from_slice(self.read_bytes(4)?);
        Ok(sig)
    }

    pub fn read_u32_be(&mut self) -> Result<u32, ProfileError> {
        Ok(u32::from_be_bytes(self.read_signature()?))
    }
}

/// `bytes[offset..offset + len]`, or [`ProfileError::Truncated`].
pub(crate) fn slice_at(bytes: &[u8], offset: usize, len: usize) -> Result<&[u8], ProfileError> {
    offset
        .checked_add(len)
        .and_then(|end| bytes.get(offset..end))
        .ok_or(ProfileError::Truncated {
            offset,
            len,
            available: bytes.len(),
        })
}
