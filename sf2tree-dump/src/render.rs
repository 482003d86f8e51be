use std::io::{self, Write};

use sf2tree::{ContainerNode, Node, RecordBatch, Records};

/// Writes `root` as tab-indented text. With `summary` set, only the chunk
/// lines are written, not the records inside them.
pub fn render<W: Write>(out: &mut W, root: &ContainerNode, summary: bool) -> io::Result<()> {
    render_container(out, root, 0, summary)
}

fn indent<W: Write>(out: &mut W, depth: usize) -> io::Result<()> {
    for _ in 0..depth {
        write!(out, "\t")?;
    }
    Ok(())
}

fn render_container<W: Write>(
    out: &mut W,
    container: &ContainerNode,
    depth: usize,
    summary: bool,
) -> io::Result<()> {
    indent(out, depth)?;
    writeln!(
        out,
        "{} '{}' ({}, {} bytes at offset {})",
        container.kind, container.tag, container.name, container.length, container.offset
    )?;
    for child in container.iter() {
        match child {
            Node::Container(container) => render_container(out, container, depth + 1, summary)?,
            Node::Records(batch) => render_batch(out, batch, depth + 1, summary)?,
        }
    }
    Ok(())
}

fn render_batch<W: Write>(
    out: &mut W,
    batch: &RecordBatch,
    depth: usize,
    summary: bool,
) -> io::Result<()> {
    indent(out, depth)?;
    match &batch.records {
        Records::Version(version) => {
            return writeln!(
                out,
                "Sub-chunk {}: {} {}.{}",
                batch.tag, batch.description, version.major, version.minor
            );
        }
        Records::Text(text) => {
            return writeln!(
                out,
                "Sub-chunk {}: {}: {}",
                batch.tag,
                batch.description,
                text.to_string_lossy()
            );
        }
        Records::SampleData(span) => {
            return writeln!(
                out,
                "Sub-chunk {}: {}: {} bytes at offset {}",
                batch.tag, batch.description, span.length, span.offset
            );
        }
        _ => writeln!(
            out,
            "Section {} ({}, count {})",
            batch.tag, batch.description, batch.count
        )?,
    }
    if summary {
        return Ok(());
    }

    let depth = depth + 1;
    match &batch.records {
        Records::PresetHeaders(presets) => {
            for (i, preset) in presets.iter().enumerate() {
                indent(out, depth)?;
                writeln!(
                    out,
                    "{i}: Name: {}; preset: {}; bank: {}; bag index: {}; library: {}; genre: {}; morphology: {}",
                    preset.name,
                    preset.preset,
                    preset.bank,
                    preset.preset_bag_index,
                    preset.library,
                    preset.genre,
                    preset.morphology
                )?;
            }
        }
        Records::PresetBags(bags) | Records::InstrumentBags(bags) => {
            for (i, bag) in bags.iter().enumerate() {
                indent(out, depth)?;
                writeln!(
                    out,
                    "{i}: generator index: {}; modulator index: {}",
                    bag.generator_index, bag.modulator_index
                )?;
            }
        }
        Records::PresetModulators(modulators) | Records::InstrumentModulators(modulators) => {
            for (i, modulator) in modulators.iter().enumerate() {
                indent(out, depth)?;
                writeln!(
                    out,
                    "{i}: source: {}; destination: {}; amount: {}; amount source: {}; transform: {}",
                    modulator.source_operator,
                    modulator.destination_operator,
                    modulator.amount,
                    modulator.amount_source_operator,
                    modulator.transform_operator
                )?;
            }
        }
        Records::PresetGenerators(generators) | Records::InstrumentGenerators(generators) => {
            for (i, generator) in generators.iter().enumerate() {
                indent(out, depth)?;
                writeln!(
                    out,
                    "{i}: operator: {}; amount: {:X}",
                    generator.operator, generator.amount
                )?;
            }
        }
        Records::Instruments(instruments) => {
            for (i, instrument) in instruments.iter().enumerate() {
                indent(out, depth)?;
                writeln!(
                    out,
                    "{i}: Name: {}; bag index: {}",
                    instrument.name, instrument.instrument_bag_index
                )?;
            }
        }
        Records::SampleHeaders(samples) => {
            for (i, sample) in samples.iter().enumerate() {
                indent(out, depth)?;
                writeln!(
                    out,
                    "{i}: Name: {}; start: {}; end: {}; loop start: {}; loop end: {}; sample rate: {}",
                    sample.name,
                    sample.start,
                    sample.end,
                    sample.loop_start,
                    sample.loop_end,
                    sample.sample_rate
                )?;
                indent(out, depth + 1)?;
                writeln!(
                    out,
                    "pitch: {}; cents off: {}; sample link: {}; type: {}",
                    sample.original_pitch,
                    sample.pitch_correction,
                    sample.sample_link,
                    sample.sample_type
                )?;
            }
        }
        Records::Version(_) | Records::Text(_) | Records::SampleData(_) => {}
    }
    Ok(())
}
