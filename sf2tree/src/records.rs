use std::borrow::Cow;
use std::fmt;
use std::io::{self, Read};

use byteorder::{LittleEndian, ReadBytesExt};

/// A record stored as a fixed number of bytes inside a sub-chunk.
pub trait FixedRecord: Sized {
    const WIDTH: usize;

    fn read<R: Read>(reader: &mut R) -> io::Result<Self>;
}

const NAME_LENGTH: usize = 20;

/// The name stored in a `phdr`, `inst` or `shdr` record, kept as raw bytes.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Name(Vec<u8>);

impl Name {
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// The name as text, with bytes that are not UTF-8 replaced.
    pub fn to_string_lossy(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.0)
    }
}

impl fmt::Display for Name {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(&self.to_string_lossy())
    }
}

impl PartialEq<str> for Name {
    fn eq(&self, other: &str) -> bool {
        self.0 == other.as_bytes()
    }
}

impl PartialEq<&str> for Name {
    fn eq(&self, other: &&str) -> bool {
        self.0 == other.as_bytes()
    }
}

/// Reads a zero-padded name field. The name ends at the first zero byte,
/// or fills the whole field if there is none.
fn read_name<R: Read>(reader: &mut R) -> io::Result<Name> {
    let mut data = [0u8; NAME_LENGTH];
    reader.read_exact(&mut data)?;
    Ok(name_from_field(&data))
}

pub(crate) fn name_from_field(field: &[u8]) -> Name {
    let end = field.iter().position(|&b| b == 0).unwrap_or(field.len());
    Name(field[..end].to_vec())
}

/// A `phdr` record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PresetHeader {
    pub name: Name,
    pub preset: u16,
    pub bank: u16,
    pub preset_bag_index: u16,
    pub library: u32,
    pub genre: u32,
    pub morphology: u32,
}

impl FixedRecord for PresetHeader {
    const WIDTH: usize = 38;

    fn read<R: Read>(reader: &mut R) -> io::Result<Self> {
        Ok(Self {
            name: read_name(reader)?,
            preset: reader.read_u16::<LittleEndian>()?,
            bank: reader.read_u16::<LittleEndian>()?,
            preset_bag_index: reader.read_u16::<LittleEndian>()?,
            library: reader.read_u32::<LittleEndian>()?,
            genre: reader.read_u32::<LittleEndian>()?,
            morphology: reader.read_u32::<LittleEndian>()?,
        })
    }
}

/// A `pbag` or `ibag` record: the first generator and modulator of a zone.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bag {
    pub generator_index: u16,
    pub modulator_index: u16,
}

impl FixedRecord for Bag {
    const WIDTH: usize = 4;

    fn read<R: Read>(reader: &mut R) -> io::Result<Self> {
        Ok(Self {
            generator_index: reader.read_u16::<LittleEndian>()?,
            modulator_index: reader.read_u16::<LittleEndian>()?,
        })
    }
}

/// A `pmod` or `imod` record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Modulator {
    pub source_operator: u16,
    pub destination_operator: u16,
    pub amount: i16,
    pub amount_source_operator: u16,
    pub transform_operator: u16,
}

impl FixedRecord for Modulator {
    const WIDTH: usize = 10;

    fn read<R: Read>(reader: &mut R) -> io::Result<Self> {
        Ok(Self {
            source_operator: reader.read_u16::<LittleEndian>()?,
            destination_operator: reader.read_u16::<LittleEndian>()?,
            amount: reader.read_i16::<LittleEndian>()?,
            amount_source_operator: reader.read_u16::<LittleEndian>()?,
            transform_operator: reader.read_u16::<LittleEndian>()?,
        })
    }
}

/// A `pgen` or `igen` record.
///
/// The amount is a union in the file format; it is kept as the raw word and
/// reinterpreted by the accessors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Generator {
    pub operator: u16,
    pub amount: u16,
}

impl Generator {
    pub fn amount_i16(&self) -> i16 {
        self.amount as i16
    }

    /// The amount as a `(low, high)` key or velocity range.
    pub fn amount_range(&self) -> (u8, u8) {
        let [lo, hi] = self.amount.to_le_bytes();
        (lo, hi)
    }
}

impl FixedRecord for Generator {
    const WIDTH: usize = 4;

    fn read<R: Read>(reader: &mut R) -> io::Result<Self> {
        Ok(Self {
            operator: reader.read_u16::<LittleEndian>()?,
            amount: reader.read_u16::<LittleEndian>()?,
        })
    }
}

/// An `inst` record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Instrument {
    pub name: Name,
    pub instrument_bag_index: u16,
}

impl FixedRecord for Instrument {
    const WIDTH: usize = 22;

    fn read<R: Read>(reader: &mut R) -> io::Result<Self> {
        Ok(Self {
            name: read_name(reader)?,
            instrument_bag_index: reader.read_u16::<LittleEndian>()?,
        })
    }
}

/// An `shdr` record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SampleHeader {
    pub name: Name,
    pub start: u32,
    pub end: u32,
    pub loop_start: u32,
    pub loop_end: u32,
    pub sample_rate: u32,
    pub original_pitch: u8,
    pub pitch_correction: i8,
    pub sample_link: u16,
    pub sample_type: u16,
}

impl SampleHeader {
    pub fn kind(&self) -> SampleType {
        SampleType(self.sample_type)
    }
}

impl FixedRecord for SampleHeader {
    const WIDTH: usize = 46;

    fn read<R: Read>(reader: &mut R) -> io::Result<Self> {
        Ok(Self {
            name: read_name(reader)?,
            start: reader.read_u32::<LittleEndian>()?,
            end: reader.read_u32::<LittleEndian>()?,
            loop_start: reader.read_u32::<LittleEndian>()?,
            loop_end: reader.read_u32::<LittleEndian>()?,
            sample_rate: reader.read_u32::<LittleEndian>()?,
            original_pitch: reader.read_u8()?,
            pitch_correction: reader.read_i8()?,
            sample_link: reader.read_u16::<LittleEndian>()?,
            sample_type: reader.read_u16::<LittleEndian>()?,
        })
    }
}

/// The `sfSampleType` word of a sample header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SampleType(pub u16);

impl SampleType {
    const MONO: u16 = 1;
    const RIGHT: u16 = 2;
    const LEFT: u16 = 4;
    const LINKED: u16 = 8;
    const ROM: u16 = 0x8000;

    pub fn is_mono(&self) -> bool {
        self.0 & Self::MONO != 0
    }

    pub fn is_right(&self) -> bool {
        self.0 & Self::RIGHT != 0
    }

    pub fn is_left(&self) -> bool {
        self.0 & Self::LEFT != 0
    }

    pub fn is_linked(&self) -> bool {
        self.0 & Self::LINKED != 0
    }

    pub fn is_rom(&self) -> bool {
        self.0 & Self::ROM != 0
    }
}

/// The `ifil` or `iver` version pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VersionInfo {
    pub major: u16,
    pub minor: u16,
}

impl VersionInfo {
    pub const WIDTH: usize = 4;

    pub fn read<R: Read>(reader: &mut R) -> io::Result<Self> {
        Ok(Self {
            major: reader.read_u16::<LittleEndian>()?,
            minor: reader.read_u16::<LittleEndian>()?,
        })
    }
}

/// A variable-length INFO text body, kept byte for byte as stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextField {
    pub value: Vec<u8>,
}

impl TextField {
    pub fn from_bytes(data: &[u8]) -> Self {
        Self {
            value: data.to_vec(),
        }
    }

    /// The value without the zero padding the format usually appends.
    pub fn trimmed(&self) -> &[u8] {
        let end = self
            .value
            .iter()
            .rposition(|&b| b != 0)
            .map_or(0, |last| last + 1);
        &self.value[..end]
    }

    /// The trimmed value as text, with bytes that are not UTF-8 replaced.
    pub fn to_string_lossy(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(self.trimmed())
    }
}

/// The position of an opaque sample data span in the input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SampleData {
    pub offset: u64,
    pub length: u64,
}
