//! Buffer Module
//!
//! Owned, growable byte buffer with a read cursor. Produced by the encoder,
//! handed to the transport, and returned from receive and RPC calls.

/// External term format version byte
pub const VERSION_MAGIC: u8 = 131;

/// Encoded term bytes
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EncodedBuffer {
    bytes: Vec<u8>,
    cursor: usize,
}

impl EncodedBuffer {
    /// Create an empty buffer
    pub fn new() -> Self {
        Self::default()
    }

    /// Wrap bytes received from the transport
    pub fn from_bytes(bytes: Vec<u8>) -> Self {
        Self { bytes, cursor: 0 }
    }

    /// Append the bytes of another buffer
    pub fn append(&mut self, other: &EncodedBuffer) {
        self.bytes.extend_from_slice(&other.bytes);
    }

    /// Mutable access to the underlying bytes for wire-level writers
    pub fn bytes_mut(&mut self) -> &mut Vec<u8> {
        &mut self.bytes
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }

    /// Current read position
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Move the read position forward by `n`, stopping at the end
    ///
    /// The cursor only moves forward.
    pub fn advance(&mut self, n: usize) {
        self.cursor = self.cursor.saturating_add(n).min(self.bytes.len());
    }

    /// Bytes from the cursor to the end
    pub fn remaining(&self) -> &[u8] {
        &self.bytes[self.cursor..]
    }
}

impl From<Vec<u8>> for EncodedBuffer {
    fn from(bytes: Vec<u8>) -> Self {
        Self::from_bytes(bytes)
    }
}

impl AsRef<[u8]> for EncodedBuffer {
    fn as_ref(&self) -> &[u8] {
        &self.bytes
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_bytes() {
        let buf = EncodedBuffer::from_bytes(vec![VERSION_MAGIC]);
        assert_eq!(buf.len(), 1);
        assert!(!buf.is_empty());
        assert!(EncodedBuffer::new().is_empty());
    }

    #[test]
    fn test_append() {
        let mut a = EncodedBuffer::from_bytes(vec![1, 2]);
        let b = EncodedBuffer::from_bytes(vec![3]);
        a.append(&b);
        assert_eq!(a.into_bytes(), vec![1, 2, 3]);
    }

    #[test]
    fn test_cursor_only_moves_forward() {
        let mut buf = EncodedBuffer::from_bytes(vec![1, 2, 3]);
        buf.advance(2);
        assert_eq!(buf.remaining(), &[3]);
        buf.advance(10);
        assert_eq!(buf.cursor(), 3);
        assert!(buf.remaining().is_empty());
        buf.advance(usize::MAX);
        assert_eq!(buf.cursor(), 3);
    }
}
