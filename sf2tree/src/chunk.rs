use std::fmt;

use byteorder::{ByteOrder, LittleEndian};
use tracing::debug;

use crate::bounded_source::BoundedSource;
use crate::chunk_tag::ChunkTag;
use crate::error::DecodeErrorKind;

pub const CONTAINER_HEADER_SIZE: usize = 12;
pub const SUBCHUNK_HEADER_SIZE: usize = 8;

/// The magic that introduces a container chunk.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContainerKind {
    Riff,
    List,
}

impl ContainerKind {
    pub fn magic(&self) -> ChunkTag {
        match self {
            ContainerKind::Riff => ChunkTag::RIFF,
            ContainerKind::List => ChunkTag::LIST,
        }
    }
}

impl fmt::Display for ContainerKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ContainerKind::Riff => write!(f, "RIFF"),
            ContainerKind::List => write!(f, "LIST"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContainerHeader {
    pub kind: ContainerKind,
    pub tag: ChunkTag,
    /// The raw length field, which counts the type tag.
    pub declared_length: u32,
    /// The length of the children that follow the type tag.
    pub body_length: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubchunkHeader {
    pub tag: ChunkTag,
    pub length: u64,
}

/// Reads `N` header bytes. `None` means the source sits at a legal boundary.
fn read_header<const N: usize>(
    source: &mut BoundedSource,
) -> Result<Option<[u8; N]>, DecodeErrorKind> {
    let mut header = [0u8; N];
    let available = source.fill(&mut header)?;
    if available == 0 {
        if source.is_bounded() && !source.is_exhausted() {
            // The budget says more children follow, but the stream has ended.
            return Err(DecodeErrorKind::TruncatedChunk {
                requested: source.remaining(),
                available: 0,
            });
        }
        return Ok(None);
    }
    if available < N {
        return Err(DecodeErrorKind::MalformedHeader {
            expected: N,
            available: available as u64,
        });
    }
    Ok(Some(header))
}

/// Reads a 12-byte `RIFF` or `LIST` header.
pub fn read_container_header(
    source: &mut BoundedSource,
) -> Result<Option<ContainerHeader>, DecodeErrorKind> {
    let offset = source.position();
    let Some(header) = read_header::<CONTAINER_HEADER_SIZE>(source)? else {
        return Ok(None);
    };

    let magic = ChunkTag::new([header[0], header[1], header[2], header[3]]);
    let kind = match magic {
        ChunkTag::RIFF => ContainerKind::Riff,
        ChunkTag::LIST => ContainerKind::List,
        _ => return Err(DecodeErrorKind::InvalidContainerMagic { magic }),
    };
    let declared_length = LittleEndian::read_u32(&header[4..8]);
    let tag = ChunkTag::new([header[8], header[9], header[10], header[11]]);

    // The length field includes the type tag we have already consumed.
    let body_length = match declared_length.checked_sub(4) {
        Some(length) => length as u64,
        None => {
            return Err(DecodeErrorKind::MalformedHeader {
                expected: 4,
                available: declared_length as u64,
            });
        }
    };

    debug!(%kind, %tag, offset, body_length, "container header");
    Ok(Some(ContainerHeader {
        kind,
        tag,
        declared_length,
        body_length,
    }))
}

/// Reads an 8-byte sub-chunk header.
pub fn read_subchunk_header(
    source: &mut BoundedSource,
) -> Result<Option<SubchunkHeader>, DecodeErrorKind> {
    let offset = source.position();
    let Some(header) = read_header::<SUBCHUNK_HEADER_SIZE>(source)? else {
        return Ok(None);
    };

    let tag = ChunkTag::new([header[0], header[1], header[2], header[3]]);
    let length = LittleEndian::read_u32(&header[4..8]) as u64;

    debug!(%tag, offset, length, "sub-chunk header");
    Ok(Some(SubchunkHeader { tag, length }))
}

/// Consumes the pad byte that follows an odd-length chunk, if the enclosing
/// budget still holds one. The top of the input is never padded.
pub fn skip_pad_byte(source: &mut BoundedSource, length: u64) -> Result<(), DecodeErrorKind> {
    if length % 2 == 1 && source.is_bounded() && !source.is_exhausted() {
        source.skip(1)?;
    }
    Ok(())
}
