//! Applies a 30 Hz low-pass and a 2.2 kHz high-pass to a WAVE file, writing one output each.
//!
//! Usage: `cargo run --example apply_filters -- <wav file path>`

use std::fs::File;
use std::io::{BufReader, BufWriter};

use riff_pcm::{WavContainer, WavFiltering};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let Some(path) = std::env::args().nth(1) else {
        eprintln!("Usage: apply_filters <wav file path>");
        std::process::exit(1);
    };

    let low_cutoff = 30.0;
    println!("\nApplying low-pass at {low_cutoff:.2} Hz to wav file: {path}\n");
    let mut wav = WavContainer::from_reader(BufReader::new(File::open(&path)?))?;
    wav.low_pass(low_cutoff)?;
    let low_name = "test-lowpass.wav";
    wav.write_to(BufWriter::new(File::create(low_name)?))?;
    println!("Wrote file with low-pass applied to {low_name}\n");

    let high_cutoff = 2_200.0;
    println!("Applying high-pass at {high_cutoff:.2} Hz to wav file: {path}\n");
    let mut wav = WavContainer::from_reader(BufReader::new(File::open(&path)?))?;
    wav.high_pass(high_cutoff)?;
    let high_name = "test-highpass.wav";
    wav.write_to(BufWriter::new(File::create(high_name)?))?;
    println!("Wrote file with high-pass applied to {high_name}\n");
    Ok(())
}
