use anyhow::{Context, Result};
use clap::Parser;

use std::fs::File;
use std::io::{self, BufWriter, Read};

use captify::ass_encoder::AssEncoder;
use captify::json_array_encoder::JsonArrayEncoder;
use captify::output_type::OutputType;
use captify::record::TranscriptionRecord;
use captify::segment_encoder::SegmentEncoder;
use captify::segments::normalize_segments;
use captify::srt_encoder::SrtEncoder;
use captify::vtt_encoder::VttEncoder;

fn main() -> Result<()> {
    captify::logging::init();
    let params = Params::parse();

    let record = read_record(params.input.as_deref())?;
    let segments = normalize_segments(record.segments);

    let stdout = io::stdout();
    let writer = BufWriter::new(stdout.lock());

    let mut encoder: Box<dyn SegmentEncoder> = match params.output_type {
        OutputType::Srt => Box::new(SrtEncoder::new(writer)),
        OutputType::Vtt => Box::new(VttEncoder::new(writer)),
        OutputType::Ass => Box::new(AssEncoder::new(writer)),
        OutputType::Json => Box::new(JsonArrayEncoder::new(writer)),
    };

    for segment in &segments {
        encoder.write_segment(segment)?;
    }
    encoder.close()?;

    Ok(())
}

#[derive(Parser, Debug)]
#[command(name = "captify")]
#[command(about = "Generate subtitles from Whisper-style transcription JSON")]
struct Params {
    /// Path to a transcription JSON file; reads stdin when omitted.
    #[arg(short = 'i', long = "input")]
    pub input: Option<String>,

    #[arg(
        short = 'o',
        long = "output-type",
        value_enum,
        default_value_t = OutputType::Vtt
    )]
    pub output_type: OutputType,
}

fn read_record(path: Option<&str>) -> Result<TranscriptionRecord> {
    let mut raw = String::new();
    match path {
        Some(path) => {
            File::open(path)
                .with_context(|| format!("failed to open '{path}'"))?
                .read_to_string(&mut raw)?;
        }
        None => {
            io::stdin().read_to_string(&mut raw)?;
        }
    }

    serde_json::from_str(&raw).context("failed to parse transcription JSON")
}
