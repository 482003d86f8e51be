use std::collections::HashMap;
use std::collections::hash_map::Entry;

use crate::chunk_tag::ChunkTag;
use crate::error::RegistryError;

/// How the body of a registered container is decoded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContainerDecoder {
    /// A body made of further `RIFF`/`LIST` containers.
    Root { name: &'static str },
    /// A body made of tagged sub-chunks.
    Section { name: &'static str },
}

impl ContainerDecoder {
    pub fn name(&self) -> &'static str {
        match self {
            ContainerDecoder::Root { name } | ContainerDecoder::Section { name } => *name,
        }
    }
}

/// The record layout a fixed-width sub-chunk holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordKind {
    PresetHeaders,
    PresetBags,
    PresetModulators,
    PresetGenerators,
    Instruments,
    InstrumentBags,
    InstrumentModulators,
    InstrumentGenerators,
    SampleHeaders,
}

impl RecordKind {
    pub fn width(&self) -> usize {
        use crate::records::*;

        match self {
            RecordKind::PresetHeaders => PresetHeader::WIDTH,
            RecordKind::PresetBags | RecordKind::InstrumentBags => Bag::WIDTH,
            RecordKind::PresetModulators | RecordKind::InstrumentModulators => Modulator::WIDTH,
            RecordKind::PresetGenerators | RecordKind::InstrumentGenerators => Generator::WIDTH,
            RecordKind::Instruments => Instrument::WIDTH,
            RecordKind::SampleHeaders => SampleHeader::WIDTH,
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            RecordKind::PresetHeaders => "Preset Headers",
            RecordKind::PresetBags => "Preset Bags",
            RecordKind::PresetModulators => "Preset Modulators",
            RecordKind::PresetGenerators => "Preset Generators",
            RecordKind::Instruments => "Instruments",
            RecordKind::InstrumentBags => "Instrument Bags",
            RecordKind::InstrumentModulators => "Instrument Modulators",
            RecordKind::InstrumentGenerators => "Instrument Generators",
            RecordKind::SampleHeaders => "Sample Headers",
        }
    }
}

/// How the body of a registered sub-chunk is decoded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LeafDecoder {
    Version { description: &'static str },
    Text { description: &'static str },
    Records(RecordKind),
    SampleData { description: &'static str },
}

impl LeafDecoder {
    pub fn description(&self) -> &'static str {
        match self {
            LeafDecoder::Version { description }
            | LeafDecoder::Text { description }
            | LeafDecoder::SampleData { description } => *description,
            LeafDecoder::Records(kind) => kind.description(),
        }
    }
}

/// The three tag tables a decode dispatches on: `RIFF` types, `LIST` types
/// and sub-chunk types. Each namespace is independent.
#[derive(Debug, Clone, Default)]
pub struct Registry {
    riff: HashMap<ChunkTag, ContainerDecoder>,
    list: HashMap<ChunkTag, ContainerDecoder>,
    subchunks: HashMap<ChunkTag, LeafDecoder>,
}

fn register<T>(
    table: &mut HashMap<ChunkTag, T>,
    namespace: &'static str,
    tag: ChunkTag,
    decoder: T,
) -> Result<(), RegistryError> {
    match table.entry(tag) {
        Entry::Occupied(_) => Err(RegistryError::DuplicateTag { namespace, tag }),
        Entry::Vacant(entry) => {
            entry.insert(decoder);
            Ok(())
        }
    }
}

impl Registry {
    pub fn empty() -> Self {
        Self::default()
    }

    /// The tables for SoundFont 2 files.
    pub fn standard() -> Self {
        let riff = HashMap::from([(
            ChunkTag::SFBK,
            ContainerDecoder::Root {
                name: "SoundFont bank",
            },
        )]);

        let list = HashMap::from([
            (ChunkTag::INFO, ContainerDecoder::Section { name: "INFO" }),
            (ChunkTag::SDTA, ContainerDecoder::Section { name: "sdta" }),
            (ChunkTag::PDTA, ContainerDecoder::Section { name: "pdta" }),
        ]);

        let subchunks = HashMap::from([
            // INFO
            (tag(b"ifil"), version("SoundFont Version")),
            (tag(b"isng"), text("Target Sound Engine")),
            (tag(b"INAM"), text("Sound Font Bank Name")),
            (tag(b"irom"), text("Sound ROM Name")),
            (tag(b"iver"), version("Sound ROM Version")),
            (tag(b"ICRD"), text("Creation Date")),
            (tag(b"IENG"), text("Sound Designers and Engineers")),
            (tag(b"IPRD"), text("Target Product")),
            (tag(b"ICOP"), text("Copyright")),
            (tag(b"ICMT"), text("Comments")),
            (tag(b"ISFT"), text("Tools Used")),
            // sdta
            (tag(b"smpl"), sample_data("16-bit Samples")),
            (tag(b"sm24"), sample_data("24-bit Sample Low Bytes")),
            // pdta
            (tag(b"phdr"), LeafDecoder::Records(RecordKind::PresetHeaders)),
            (tag(b"pbag"), LeafDecoder::Records(RecordKind::PresetBags)),
            (tag(b"pmod"), LeafDecoder::Records(RecordKind::PresetModulators)),
            (tag(b"pgen"), LeafDecoder::Records(RecordKind::PresetGenerators)),
            (tag(b"inst"), LeafDecoder::Records(RecordKind::Instruments)),
            (tag(b"ibag"), LeafDecoder::Records(RecordKind::InstrumentBags)),
            (tag(b"imod"), LeafDecoder::Records(RecordKind::InstrumentModulators)),
            (tag(b"igen"), LeafDecoder::Records(RecordKind::InstrumentGenerators)),
            (tag(b"shdr"), LeafDecoder::Records(RecordKind::SampleHeaders)),
        ]);

        Self {
            riff,
            list,
            subchunks,
        }
    }

    pub fn register_riff(
        &mut self,
        tag: ChunkTag,
        decoder: ContainerDecoder,
    ) -> Result<(), RegistryError> {
        register(&mut self.riff, "RIFF", tag, decoder)
    }

    pub fn register_list(
        &mut self,
        tag: ChunkTag,
        decoder: ContainerDecoder,
    ) -> Result<(), RegistryError> {
        register(&mut self.list, "LIST", tag, decoder)
    }

    pub fn register_subchunk(
        &mut self,
        tag: ChunkTag,
        decoder: LeafDecoder,
    ) -> Result<(), RegistryError> {
        register(&mut self.subchunks, "sub-chunk", tag, decoder)
    }

    pub fn riff(&self, tag: ChunkTag) -> Option<ContainerDecoder> {
        self.riff.get(&tag).copied()
    }

    pub fn list(&self, tag: ChunkTag) -> Option<ContainerDecoder> {
        self.list.get(&tag).copied()
    }

    pub fn subchunk(&self, tag: ChunkTag) -> Option<LeafDecoder> {
        self.subchunks.get(&tag).copied()
    }
}

fn tag(bytes: &[u8; 4]) -> ChunkTag {
    ChunkTag::new(*bytes)
}

fn version(description: &'static str) -> LeafDecoder {
    LeafDecoder::Version { description }
}

fn text(description: &'static str) -> LeafDecoder {
    LeafDecoder::Text { description }
}

fn sample_data(description: &'static str) -> LeafDecoder {
    LeafDecoder::SampleData { description }
}
