//! Prints the chunk layout and levels of a WAVE file.
//!
//! Usage: `cargo run --example print_metadata -- <wav file path>`

use std::fs::File;
use std::io::BufReader;

use riff_pcm::{ReadOptions, WavContainer, WavStatistics, read_wav_with_options};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let Some(path) = std::env::args().nth(1) else {
        eprintln!("Usage: print_metadata <wav file path>");
        std::process::exit(1);
    };

    println!("\nReading wav file: {path}\n");
    let options = ReadOptions::default().with_max_chunk_size(1 << 30);
    let wav: WavContainer = read_wav_with_options(BufReader::new(File::open(&path)?), &options)?;

    print!("{wav}");
    if !wav.sound_data().is_empty() {
        println!("  Peak level: {:.2} dBFS", wav.peak_db()?);
        println!("  RMS level: {:.2} dBFS", wav.rms_db()?);
        for (channel, peak) in wav.channel_peaks()?.iter().enumerate() {
            println!("  Channel {channel} peak: {peak}");
        }
    }
    Ok(())
}
