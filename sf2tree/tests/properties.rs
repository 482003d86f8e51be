mod common;

use common::*;
use proptest::prelude::*;
use sf2tree::{BoundedSource, ChunkTag, DecodeErrorKind, DecodeEvent, Records};

fn text_chunk() -> impl Strategy<Value = Vec<u8>> {
    prop::collection::vec(any::<u8>(), 0..40).prop_map(|body| subchunk(b"ICMT", &body))
}

fn unknown_chunk() -> impl Strategy<Value = Vec<u8>> {
    (any::<[u8; 4]>(), prop::collection::vec(any::<u8>(), 0..24)).prop_map(|(mut name, body)| {
        // Lower-case 'x' keeps the tag out of every registered namespace.
        name[0] = b'x';
        subchunk(&name, &body)
    })
}

proptest! {
    #[test]
    fn consumed_bytes_match_the_root_length(texts in prop::collection::vec(text_chunk(), 0..6)) {
        let data = riff(b"sfbk", &[info(&texts), sdta(), pdta(&[])]);
        let decoded = sf2tree::decode(&mut data.as_slice()).unwrap();

        prop_assert_eq!(decoded.consumed, decoded.root.length + 12);
        prop_assert_eq!(decoded.consumed, data.len() as u64);
    }

    #[test]
    fn record_chunks_decode_only_whole_records(length in 0usize..200) {
        let data = riff(b"sfbk", &[list(b"pdta", &[subchunk(b"pbag", &vec![0u8; length])])]);
        let result = sf2tree::decode(&mut data.as_slice());

        if length % 4 == 0 {
            let decoded = result.unwrap();
            let pbag = decoded.root.find_records(ChunkTag::new(*b"pbag")).unwrap();
            prop_assert_eq!(pbag.count, length / 4);
            prop_assert!(matches!(&pbag.records, Records::PresetBags(bags) if bags.len() == length / 4));
        } else {
            let error = result.unwrap_err();
            let misaligned = matches!(error.kind(), DecodeErrorKind::MisalignedChunk { width: 4, .. });
            prop_assert!(misaligned);
        }
    }

    #[test]
    fn one_event_per_unknown_subchunk(unknown in prop::collection::vec(unknown_chunk(), 0..8)) {
        let data = riff(b"sfbk", &[info(&unknown), sdta(), pdta(&[])]);
        let decoded = sf2tree::decode(&mut data.as_slice()).unwrap();

        prop_assert_eq!(decoded.events.len(), unknown.len());
        for event in &decoded.events {
            let DecodeEvent::UnknownSubchunk { tag, .. } = event;
            prop_assert_eq!(tag.as_bytes()[0], b'x');
        }
        prop_assert!(decoded.root.find_records(ChunkTag::new(*b"shdr")).is_some());
        prop_assert_eq!(decoded.consumed, data.len() as u64);
    }

    #[test]
    fn decoding_is_idempotent(texts in prop::collection::vec(text_chunk(), 0..4),
                              unknown in prop::collection::vec(unknown_chunk(), 0..4)) {
        let mut extra = texts;
        extra.extend(unknown);
        let data = riff(b"sfbk", &[info(&extra), sdta(), pdta(&[])]);

        let first = sf2tree::decode(&mut data.as_slice()).unwrap();
        let second = sf2tree::decode(&mut data.as_slice()).unwrap();
        prop_assert_eq!(first, second);
    }

    #[test]
    fn bounded_reads_never_pass_the_budget(budget in 0u64..64, request in 0usize..64) {
        let data = [0xA5u8; 128];
        let mut input = &data[..];
        let mut source = BoundedSource::new(&mut input, budget);

        let mut buf = vec![0u8; request];
        let result = source.read_bytes(&mut buf);

        if request as u64 <= budget {
            prop_assert!(result.is_ok());
        } else {
            let truncated = matches!(result, Err(DecodeErrorKind::TruncatedChunk { .. }));
            prop_assert!(truncated);
        }
        prop_assert!(source.consumed() <= budget);
        prop_assert!(128 - input.len() as u64 <= budget);
    }
}
