use std::fmt;
use std::io;

use thiserror::Error;

use crate::chunk::ContainerKind;
use crate::chunk_tag::ChunkTag;

/// The sequence of chunk tags from the outermost container down to the
/// chunk being decoded.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChunkPath(pub Vec<ChunkTag>);

impl ChunkPath {
    pub fn tags(&self) -> &[ChunkTag] {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for ChunkPath {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if self.0.is_empty() {
            return write!(f, "<root>");
        }
        for (i, tag) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, "/")?;
            }
            write!(f, "{tag}")?;
        }
        Ok(())
    }
}

/// The reason a decode was aborted.
#[derive(Debug, Error)]
pub enum DecodeErrorKind {
    #[error("expected a {expected}-byte chunk header, but only {available} bytes were available")]
    MalformedHeader { expected: usize, available: u64 },
    #[error("'{magic}' is neither a RIFF nor a LIST chunk")]
    InvalidContainerMagic { magic: ChunkTag },
    #[error("the {kind} chunk type '{tag}' is not known")]
    UnknownContainerType { kind: ContainerKind, tag: ChunkTag },
    #[error("the sub-chunk type '{tag}' is not known")]
    UnknownSubchunkType { tag: ChunkTag },
    #[error("tried to read {requested} bytes, but only {available} were available")]
    TruncatedChunk { requested: u64, available: u64 },
    #[error("the length {length} of the '{tag}' chunk is not a multiple of its {width}-byte record")]
    MisalignedChunk { tag: ChunkTag, length: u64, width: usize },
    #[error("the record {index} of the '{tag}' chunk ended before its {width} bytes were read")]
    TruncatedRecord { tag: ChunkTag, index: usize, width: usize },
    #[error("the '{tag}' field needs {expected} bytes, but only {available} were available")]
    TruncatedField { tag: ChunkTag, expected: usize, available: u64 },
    #[error("the '{tag}' chunk was left with {remaining} unread bytes")]
    ChunkNotDrained { tag: ChunkTag, remaining: u64 },
    #[error("containers are nested deeper than {limit} levels")]
    NestingTooDeep { limit: usize },
    #[error(transparent)]
    Io(#[from] io::Error),
}

/// Represents an error when decoding a SoundFont, along with the chunk path
/// where decoding stopped.
#[derive(Debug, Error)]
#[error("{kind} (at {path})")]
pub struct DecodeError {
    pub path: ChunkPath,
    #[source]
    pub kind: DecodeErrorKind,
}

impl DecodeError {
    pub fn new(path: ChunkPath, kind: DecodeErrorKind) -> Self {
        Self { path, kind }
    }

    pub fn kind(&self) -> &DecodeErrorKind {
        &self.kind
    }
}

/// Represents an error when validating decoder settings.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SettingsError {
    #[error("the maximum nesting depth must be between 1 and 256, but was {0}")]
    MaxDepthOutOfRange(usize),
}

/// Represents an error when extending a registry.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RegistryError {
    #[error("the tag '{tag}' is already registered as a {namespace} type")]
    DuplicateTag {
        namespace: &'static str,
        tag: ChunkTag,
    },
}
