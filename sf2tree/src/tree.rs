use std::fmt;

use crate::chunk::ContainerKind;
use crate::chunk_tag::ChunkTag;
use crate::error::ChunkPath;
use crate::records::{
    Bag, Generator, Instrument, Modulator, PresetHeader, SampleData, SampleHeader, TextField,
    VersionInfo,
};

/// A decoded `RIFF` or `LIST` chunk and its children in file order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContainerNode {
    pub kind: ContainerKind,
    pub tag: ChunkTag,
    /// The section name the registry gives this type.
    pub name: &'static str,
    /// The absolute offset of the container header.
    pub offset: u64,
    /// The body length, not counting the type tag.
    pub length: u64,
    pub children: Vec<Node>,
}

impl ContainerNode {
    pub fn iter(&self) -> impl Iterator<Item = &Node> {
        self.children.iter()
    }

    /// The first container below this one with the given tag, depth first.
    pub fn find_container(&self, tag: ChunkTag) -> Option<&ContainerNode> {
        self.children.iter().find_map(|child| match child {
            Node::Container(container) if container.tag == tag => Some(container),
            Node::Container(container) => container.find_container(tag),
            Node::Records(_) => None,
        })
    }

    /// The first record batch below this one with the given tag, depth first.
    pub fn find_records(&self, tag: ChunkTag) -> Option<&RecordBatch> {
        self.children.iter().find_map(|child| match child {
            Node::Records(batch) if batch.tag == tag => Some(batch),
            Node::Records(_) => None,
            Node::Container(container) => container.find_records(tag),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Container(ContainerNode),
    Records(RecordBatch),
}

impl Node {
    pub fn tag(&self) -> ChunkTag {
        match self {
            Node::Container(container) => container.tag,
            Node::Records(batch) => batch.tag,
        }
    }
}

/// The decoded contents of a sub-chunk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordBatch {
    pub tag: ChunkTag,
    pub description: &'static str,
    /// The absolute offset of the sub-chunk body.
    pub offset: u64,
    pub length: u64,
    pub count: usize,
    pub records: Records,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Records {
    Version(VersionInfo),
    Text(TextField),
    SampleData(SampleData),
    PresetHeaders(Vec<PresetHeader>),
    PresetBags(Vec<Bag>),
    PresetModulators(Vec<Modulator>),
    PresetGenerators(Vec<Generator>),
    Instruments(Vec<Instrument>),
    InstrumentBags(Vec<Bag>),
    InstrumentModulators(Vec<Modulator>),
    InstrumentGenerators(Vec<Generator>),
    SampleHeaders(Vec<SampleHeader>),
}

impl Records {
    pub fn len(&self) -> usize {
        match self {
            Records::Version(_) | Records::Text(_) | Records::SampleData(_) => 1,
            Records::PresetHeaders(records) => records.len(),
            Records::PresetBags(records) | Records::InstrumentBags(records) => records.len(),
            Records::PresetModulators(records) | Records::InstrumentModulators(records) => {
                records.len()
            }
            Records::PresetGenerators(records) | Records::InstrumentGenerators(records) => {
                records.len()
            }
            Records::Instruments(records) => records.len(),
            Records::SampleHeaders(records) => records.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// A condition that did not stop the decode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DecodeEvent {
    /// A sub-chunk with an unregistered tag was skipped.
    UnknownSubchunk {
        path: ChunkPath,
        tag: ChunkTag,
        offset: u64,
        length: u64,
    },
}

impl fmt::Display for DecodeEvent {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            DecodeEvent::UnknownSubchunk {
                path,
                tag,
                offset,
                length,
            } => write!(
                f,
                "skipped the unknown sub-chunk '{tag}' of {length} bytes at offset {offset} (in {path})"
            ),
        }
    }
}

/// The result of a successful decode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Decoded {
    pub root: ContainerNode,
    pub events: Vec<DecodeEvent>,
    /// The number of input bytes read, including the outermost header.
    pub consumed: u64,
}
