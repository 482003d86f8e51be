use std::io::Read;

use tracing::{debug, trace, warn};

use crate::bounded_source::BoundedSource;
use crate::chunk::{
    self, CONTAINER_HEADER_SIZE, ContainerHeader, ContainerKind, SubchunkHeader,
};
use crate::chunk_tag::ChunkTag;
use crate::decoder_settings::DecoderSettings;
use crate::error::{ChunkPath, DecodeError, DecodeErrorKind, SettingsError};
use crate::records::{
    Bag, FixedRecord, Generator, Instrument, Modulator, PresetHeader, SampleData, SampleHeader,
    TextField, VersionInfo,
};
use crate::registry::{ContainerDecoder, LeafDecoder, RecordKind, Registry};
use crate::tree::{ContainerNode, DecodeEvent, Decoded, Node, RecordBatch, Records};

// Upper bound on the up-front allocation for a record batch, so that a
// bogus length field cannot reserve gigabytes before any record is read.
const MAX_PREALLOCATED_RECORDS: usize = 4096;

/// Decodes SoundFont chunk trees with a fixed registry and settings.
#[derive(Debug, Clone)]
pub struct Decoder<'r> {
    registry: &'r Registry,
    settings: DecoderSettings,
}

impl<'r> Decoder<'r> {
    pub fn new(registry: &'r Registry, settings: DecoderSettings) -> Result<Self, SettingsError> {
        settings.validate()?;

        Ok(Self { registry, settings })
    }

    pub fn with_default_settings(registry: &'r Registry) -> Self {
        Self {
            registry,
            settings: DecoderSettings::default(),
        }
    }

    pub fn settings(&self) -> &DecoderSettings {
        &self.settings
    }

    /// Decodes the outermost container of `reader` and everything inside it.
    ///
    /// The decode is all or nothing: on error no part of the tree is
    /// returned, and the error carries the path of the chunk that failed.
    pub fn decode<R: Read>(&self, reader: &mut R) -> Result<Decoded, DecodeError> {
        let mut context = Context {
            registry: self.registry,
            settings: &self.settings,
            path: Vec::new(),
            events: Vec::new(),
        };
        let mut source = BoundedSource::unbounded(reader);

        match context.decode_outermost(&mut source) {
            Ok(root) => Ok(Decoded {
                root,
                events: context.events,
                consumed: source.consumed(),
            }),
            Err(kind) => Err(DecodeError::new(ChunkPath(context.path), kind)),
        }
    }
}

/// The state of one decode pass. `path` is pushed on entry to each chunk and
/// popped only on success, so after a failure it names the failing chunk.
struct Context<'d> {
    registry: &'d Registry,
    settings: &'d DecoderSettings,
    path: Vec<ChunkTag>,
    events: Vec<DecodeEvent>,
}

impl Context<'_> {
    fn decode_outermost(
        &mut self,
        source: &mut BoundedSource,
    ) -> Result<ContainerNode, DecodeErrorKind> {
        let offset = source.position();
        let header = chunk::read_container_header(source)?.ok_or(
            DecodeErrorKind::MalformedHeader {
                expected: CONTAINER_HEADER_SIZE,
                available: 0,
            },
        )?;
        self.container(source, header, offset)
    }

    fn container(
        &mut self,
        source: &mut BoundedSource,
        header: ContainerHeader,
        offset: u64,
    ) -> Result<ContainerNode, DecodeErrorKind> {
        self.path.push(header.tag);
        if self.path.len() > self.settings.max_depth {
            return Err(DecodeErrorKind::NestingTooDeep {
                limit: self.settings.max_depth,
            });
        }

        let decoder = match header.kind {
            ContainerKind::Riff => self.registry.riff(header.tag),
            ContainerKind::List => self.registry.list(header.tag),
        }
        .ok_or(DecodeErrorKind::UnknownContainerType {
            kind: header.kind,
            tag: header.tag,
        })?;
        debug!(tag = %header.tag, name = decoder.name(), "entering container");

        let children = {
            let mut body = source.bound(header.body_length)?;
            let children = match decoder {
                ContainerDecoder::Root { .. } => self.root_body(&mut body)?,
                ContainerDecoder::Section { .. } => self.section_body(&mut body)?,
            };
            ensure_drained(&body, header.tag)?;
            children
        };
        if self.settings.word_aligned {
            chunk::skip_pad_byte(source, header.declared_length as u64)?;
        }

        self.path.pop();
        Ok(ContainerNode {
            kind: header.kind,
            tag: header.tag,
            name: decoder.name(),
            offset,
            length: header.body_length,
            children,
        })
    }

    /// A body of nested `RIFF`/`LIST` containers.
    fn root_body(&mut self, body: &mut BoundedSource) -> Result<Vec<Node>, DecodeErrorKind> {
        let mut children = Vec::new();
        loop {
            let offset = body.position();
            let Some(header) = chunk::read_container_header(body)? else {
                break;
            };
            children.push(Node::Container(self.container(body, header, offset)?));
        }
        Ok(children)
    }

    /// A body of tagged sub-chunks. Unknown tags are skipped and reported.
    fn section_body(&mut self, body: &mut BoundedSource) -> Result<Vec<Node>, DecodeErrorKind> {
        let mut children = Vec::new();
        while let Some(header) = chunk::read_subchunk_header(body)? {
            let offset = body.position();
            match self.registry.subchunk(header.tag) {
                Some(decoder) => {
                    self.path.push(header.tag);
                    let batch = {
                        let mut leaf = body.bound(header.length)?;
                        let batch = decode_leaf(&mut leaf, decoder, header, offset)?;
                        ensure_drained(&leaf, header.tag)?;
                        batch
                    };
                    self.path.pop();
                    children.push(Node::Records(batch));
                }
                None => {
                    if self.settings.strict {
                        self.path.push(header.tag);
                        return Err(DecodeErrorKind::UnknownSubchunkType { tag: header.tag });
                    }
                    warn!(tag = %header.tag, offset, length = header.length, "skipping unknown sub-chunk");
                    self.events.push(DecodeEvent::UnknownSubchunk {
                        path: ChunkPath(self.path.clone()),
                        tag: header.tag,
                        offset,
                        length: header.length,
                    });
                    body.skip(header.length)?;
                }
            }
            if self.settings.word_aligned {
                chunk::skip_pad_byte(body, header.length)?;
            }
        }
        Ok(children)
    }
}

fn ensure_drained(source: &BoundedSource, tag: ChunkTag) -> Result<(), DecodeErrorKind> {
    if !source.is_exhausted() {
        return Err(DecodeErrorKind::ChunkNotDrained {
            tag,
            remaining: source.remaining(),
        });
    }
    Ok(())
}

fn decode_leaf(
    source: &mut BoundedSource,
    decoder: LeafDecoder,
    header: SubchunkHeader,
    offset: u64,
) -> Result<RecordBatch, DecodeErrorKind> {
    let tag = header.tag;
    let records = match decoder {
        LeafDecoder::Version { .. } => Records::Version(read_version(source, tag)?),
        LeafDecoder::Text { .. } => Records::Text(TextField::from_bytes(&source.read_to_budget()?)),
        LeafDecoder::SampleData { .. } => {
            source.skip(header.length)?;
            Records::SampleData(SampleData {
                offset,
                length: header.length,
            })
        }
        LeafDecoder::Records(kind) => read_record_kind(source, tag, kind)?,
    };
    trace!(%tag, count = records.len(), "decoded sub-chunk");

    Ok(RecordBatch {
        tag,
        description: decoder.description(),
        offset,
        length: header.length,
        count: records.len(),
        records,
    })
}

fn read_version(source: &mut BoundedSource, tag: ChunkTag) -> Result<VersionInfo, DecodeErrorKind> {
    let truncated = |available| DecodeErrorKind::TruncatedField {
        tag,
        expected: VersionInfo::WIDTH,
        available,
    };
    if source.remaining() < VersionInfo::WIDTH as u64 {
        return Err(truncated(source.remaining()));
    }

    let mut data = [0u8; VersionInfo::WIDTH];
    source.read_bytes(&mut data).map_err(|err| match err {
        DecodeErrorKind::TruncatedChunk { available, .. } => truncated(available),
        other => other,
    })?;
    let version = VersionInfo::read(&mut &data[..])?;

    let excess = source.remaining();
    if excess > 0 {
        debug!(%tag, excess, "ignoring bytes after the version field");
        source.skip(excess)?;
    }
    Ok(version)
}

fn read_record_kind(
    source: &mut BoundedSource,
    tag: ChunkTag,
    kind: RecordKind,
) -> Result<Records, DecodeErrorKind> {
    Ok(match kind {
        RecordKind::PresetHeaders => {
            Records::PresetHeaders(read_records::<PresetHeader>(source, tag)?)
        }
        RecordKind::PresetBags => Records::PresetBags(read_records::<Bag>(source, tag)?),
        RecordKind::PresetModulators => {
            Records::PresetModulators(read_records::<Modulator>(source, tag)?)
        }
        RecordKind::PresetGenerators => {
            Records::PresetGenerators(read_records::<Generator>(source, tag)?)
        }
        RecordKind::Instruments => Records::Instruments(read_records::<Instrument>(source, tag)?),
        RecordKind::InstrumentBags => Records::InstrumentBags(read_records::<Bag>(source, tag)?),
        RecordKind::InstrumentModulators => {
            Records::InstrumentModulators(read_records::<Modulator>(source, tag)?)
        }
        RecordKind::InstrumentGenerators => {
            Records::InstrumentGenerators(read_records::<Generator>(source, tag)?)
        }
        RecordKind::SampleHeaders => {
            Records::SampleHeaders(read_records::<SampleHeader>(source, tag)?)
        }
    })
}

/// Reads the whole body as `length / T::WIDTH` records.
fn read_records<T: FixedRecord>(
    source: &mut BoundedSource,
    tag: ChunkTag,
) -> Result<Vec<T>, DecodeErrorKind> {
    let length = source.remaining();
    let width = T::WIDTH;
    if length % width as u64 != 0 {
        return Err(DecodeErrorKind::MisalignedChunk { tag, length, width });
    }

    let count = (length / width as u64) as usize;
    let mut records = Vec::with_capacity(count.min(MAX_PREALLOCATED_RECORDS));
    let mut data = vec![0u8; width];
    for index in 0..count {
        source.read_bytes(&mut data).map_err(|err| match err {
            DecodeErrorKind::TruncatedChunk { .. } => {
                DecodeErrorKind::TruncatedRecord { tag, index, width }
            }
            other => other,
        })?;
        records.push(T::read(&mut data.as_slice())?);
    }
    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn version_reads_two_little_endian_words() {
        let data = [0x02, 0x00, 0x01, 0x00];
        let mut input = &data[..];
        let mut source = BoundedSource::new(&mut input, 4);

        let version = read_version(&mut source, ChunkTag::new(*b"ifil")).unwrap();
        assert_eq!(version, VersionInfo { major: 2, minor: 1 });
        assert!(source.is_exhausted());
    }

    #[test]
    fn short_version_is_a_truncated_field() {
        let data = [0x02, 0x00];
        let mut input = &data[..];
        let mut source = BoundedSource::new(&mut input, 2);

        assert!(matches!(
            read_version(&mut source, ChunkTag::new(*b"iver")),
            Err(DecodeErrorKind::TruncatedField {
                expected: 4,
                available: 2,
                ..
            })
        ));
    }

    #[test]
    fn version_skips_excess_bytes() {
        let data = [0x02, 0x00, 0x04, 0x00, 0xAA, 0xBB];
        let mut input = &data[..];
        let mut source = BoundedSource::new(&mut input, 6);

        let version = read_version(&mut source, ChunkTag::new(*b"ifil")).unwrap();
        assert_eq!(version, VersionInfo { major: 2, minor: 4 });
        assert!(source.is_exhausted());
    }

    #[test]
    fn misaligned_body_reads_nothing() {
        let data = [0u8; 10];
        let mut input = &data[..];
        let mut source = BoundedSource::new(&mut input, 6);

        let result = read_records::<Bag>(&mut source, ChunkTag::new(*b"pbag"));
        assert!(matches!(
            result,
            Err(DecodeErrorKind::MisalignedChunk {
                length: 6,
                width: 4,
                ..
            })
        ));
        assert_eq!(source.consumed(), 0);
    }

    #[test]
    fn stream_ending_mid_record_is_a_truncated_record() {
        // The budget promises two generators but the stream holds one and a half.
        let data = [1u8, 0, 2, 0, 3, 0];
        let mut input = &data[..];
        let mut source = BoundedSource::new(&mut input, 8);

        assert!(matches!(
            read_records::<Generator>(&mut source, ChunkTag::new(*b"igen")),
            Err(DecodeErrorKind::TruncatedRecord {
                index: 1,
                width: 4,
                ..
            })
        ));
    }

    #[test]
    fn text_reads_exactly_the_body() {
        let data = b"EMU8000\0NEXT";
        let mut input = &data[..];
        let mut parent = BoundedSource::new(&mut input, 12);
        let header = SubchunkHeader {
            tag: ChunkTag::new(*b"isng"),
            length: 8,
        };

        let batch = {
            let mut leaf = parent.bound(8).unwrap();
            decode_leaf(
                &mut leaf,
                LeafDecoder::Text {
                    description: "Target Sound Engine",
                },
                header,
                0,
            )
            .unwrap()
        };
        assert_eq!(
            batch.records,
            Records::Text(TextField {
                value: b"EMU8000\0".to_vec()
            })
        );
        assert_eq!(batch.count, 1);
        assert_eq!(parent.remaining(), 4);
    }
}
