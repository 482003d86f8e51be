mod error;

mod bounded_source;
mod chunk;
mod chunk_tag;
mod decoder;
mod decoder_settings;
mod records;
mod registry;
mod tree;

pub use self::bounded_source::BoundedSource;
pub use self::chunk::{
    CONTAINER_HEADER_SIZE, ContainerHeader, ContainerKind, SUBCHUNK_HEADER_SIZE, SubchunkHeader,
    read_container_header, read_subchunk_header,
};
pub use self::chunk_tag::ChunkTag;
pub use self::decoder::Decoder;
pub use self::decoder_settings::DecoderSettings;
pub use self::error::{ChunkPath, DecodeError, DecodeErrorKind, RegistryError, SettingsError};
pub use self::records::{
    Bag, FixedRecord, Generator, Instrument, Modulator, Name, PresetHeader, SampleData,
    SampleHeader, SampleType, TextField, VersionInfo,
};
pub use self::registry::{ContainerDecoder, LeafDecoder, RecordKind, Registry};
pub use self::tree::{ContainerNode, DecodeEvent, Decoded, Node, RecordBatch, Records};

use std::io::Read;

/// Decodes a SoundFont 2 file with the standard registry and default settings.
pub fn decode<R: Read>(reader: &mut R) -> Result<Decoded, DecodeError> {
    let registry = Registry::standard();
    Decoder::with_default_settings(&registry).decode(reader)
}
