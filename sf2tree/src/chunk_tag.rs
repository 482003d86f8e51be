use std::fmt;

/// A four-byte chunk identifier, compared byte for byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ChunkTag([u8; 4]);

impl ChunkTag {
    pub const RIFF: ChunkTag = ChunkTag(*b"RIFF");
    pub const LIST: ChunkTag = ChunkTag(*b"LIST");
    pub const SFBK: ChunkTag = ChunkTag(*b"sfbk");
    pub const INFO: ChunkTag = ChunkTag(*b"INFO");
    pub const SDTA: ChunkTag = ChunkTag(*b"sdta");
    pub const PDTA: ChunkTag = ChunkTag(*b"pdta");

    pub const fn new(bytes: [u8; 4]) -> Self {
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8; 4] {
        &self.0
    }
}

impl From<[u8; 4]> for ChunkTag {
    fn from(bytes: [u8; 4]) -> Self {
        Self(bytes)
    }
}

impl fmt::Display for ChunkTag {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for &byte in &self.0 {
            if byte.is_ascii_graphic() || byte == b' ' {
                write!(f, "{}", byte as char)?;
            } else {
                write!(f, "\\x{:02X}", byte)?;
            }
        }
        Ok(())
    }
}
