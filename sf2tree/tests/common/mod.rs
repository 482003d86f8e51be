#![allow(dead_code)]

use byteorder::{LittleEndian, WriteBytesExt};

/// A sub-chunk with its header, followed directly by the next chunk.
pub fn subchunk(tag: &[u8; 4], body: &[u8]) -> Vec<u8> {
    let mut data = Vec::new();
    data.extend_from_slice(tag);
    data.write_u32::<LittleEndian>(body.len() as u32).unwrap();
    data.extend_from_slice(body);
    data
}

/// A sub-chunk padded to an even length, as word-aligned writers produce.
pub fn padded_subchunk(tag: &[u8; 4], body: &[u8]) -> Vec<u8> {
    let mut data = subchunk(tag, body);
    if body.len() % 2 == 1 {
        data.push(0);
    }
    data
}

fn container(magic: &[u8; 4], tag: &[u8; 4], children: &[Vec<u8>]) -> Vec<u8> {
    let body: Vec<u8> = children.concat();
    let mut data = Vec::new();
    data.extend_from_slice(magic);
    data.write_u32::<LittleEndian>(body.len() as u32 + 4).unwrap();
    data.extend_from_slice(tag);
    data.extend_from_slice(&body);
    data
}

pub fn list(tag: &[u8; 4], children: &[Vec<u8>]) -> Vec<u8> {
    container(b"LIST", tag, children)
}

pub fn riff(tag: &[u8; 4], children: &[Vec<u8>]) -> Vec<u8> {
    container(b"RIFF", tag, children)
}

pub fn name(value: &str) -> [u8; 20] {
    let mut field = [0u8; 20];
    field[..value.len()].copy_from_slice(value.as_bytes());
    field
}

pub fn version(major: u16, minor: u16) -> Vec<u8> {
    let mut data = Vec::new();
    data.write_u16::<LittleEndian>(major).unwrap();
    data.write_u16::<LittleEndian>(minor).unwrap();
    data
}

pub fn preset_header(name_value: &str, preset: u16, bank: u16, bag: u16) -> Vec<u8> {
    let mut data = name(name_value).to_vec();
    data.write_u16::<LittleEndian>(preset).unwrap();
    data.write_u16::<LittleEndian>(bank).unwrap();
    data.write_u16::<LittleEndian>(bag).unwrap();
    data.write_u32::<LittleEndian>(0).unwrap();
    data.write_u32::<LittleEndian>(0).unwrap();
    data.write_u32::<LittleEndian>(0).unwrap();
    data
}

pub fn pairs(values: &[(u16, u16)]) -> Vec<u8> {
    let mut data = Vec::new();
    for &(a, b) in values {
        data.write_u16::<LittleEndian>(a).unwrap();
        data.write_u16::<LittleEndian>(b).unwrap();
    }
    data
}

pub fn modulator(source: u16, destination: u16, amount: i16) -> Vec<u8> {
    let mut data = Vec::new();
    data.write_u16::<LittleEndian>(source).unwrap();
    data.write_u16::<LittleEndian>(destination).unwrap();
    data.write_i16::<LittleEndian>(amount).unwrap();
    data.write_u16::<LittleEndian>(0).unwrap();
    data.write_u16::<LittleEndian>(0).unwrap();
    data
}

pub fn instrument(name_value: &str, bag: u16) -> Vec<u8> {
    let mut data = name(name_value).to_vec();
    data.write_u16::<LittleEndian>(bag).unwrap();
    data
}

pub fn sample_header(name_value: &str, start: u32, end: u32, pitch: u8, correction: i8) -> Vec<u8> {
    let mut data = name(name_value).to_vec();
    data.write_u32::<LittleEndian>(start).unwrap();
    data.write_u32::<LittleEndian>(end).unwrap();
    data.write_u32::<LittleEndian>(start + 8).unwrap();
    data.write_u32::<LittleEndian>(end - 8).unwrap();
    data.write_u32::<LittleEndian>(22050).unwrap();
    data.write_u8(pitch).unwrap();
    data.write_i8(correction).unwrap();
    data.write_u16::<LittleEndian>(0).unwrap();
    data.write_u16::<LittleEndian>(1).unwrap();
    data
}

pub fn info(extra: &[Vec<u8>]) -> Vec<u8> {
    let mut children = vec![
        subchunk(b"ifil", &version(2, 1)),
        subchunk(b"isng", b"EMU8000\0"),
        subchunk(b"INAM", b"Test Bank\0"),
    ];
    children.extend_from_slice(extra);
    list(b"INFO", &children)
}

pub fn sdta() -> Vec<u8> {
    list(b"sdta", &[subchunk(b"smpl", &[0u8; 64])])
}

pub fn pdta(extra: &[Vec<u8>]) -> Vec<u8> {
    let phdr = [preset_header("Piano", 0, 1, 3), preset_header("EOP", 0, 0, 4)].concat();
    let inst = [instrument("Grand", 0), instrument("EOI", 1)].concat();
    let shdr = [sample_header("Grand C4", 0, 32, 60, -3), sample_header("EOS", 0, 8, 0, 0)].concat();

    let mut children = vec![
        subchunk(b"phdr", &phdr),
        subchunk(b"pbag", &pairs(&[(0, 0), (1, 0)])),
        subchunk(b"pmod", &modulator(0x0502, 48, -960)),
        subchunk(b"pgen", &pairs(&[(41, 0), (0, 0)])),
        subchunk(b"inst", &inst),
        subchunk(b"ibag", &pairs(&[(0, 0), (2, 0)])),
        subchunk(b"imod", &modulator(0x0102, 8, 300)),
        subchunk(b"igen", &pairs(&[(43, 0x7F00), (53, 0), (0, 0)])),
        subchunk(b"shdr", &shdr),
    ];
    children.extend_from_slice(extra);
    list(b"pdta", &children)
}

/// A small but complete SoundFont.
pub fn soundfont() -> Vec<u8> {
    riff(b"sfbk", &[info(&[]), sdta(), pdta(&[])])
}

/// The offset of the first occurrence of `tag` in `data`.
pub fn find(data: &[u8], tag: &[u8; 4]) -> usize {
    data.windows(4)
        .position(|window| window == tag)
        .unwrap()
}
