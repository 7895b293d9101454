//! Creates a sine at -6 dB, then normalizes it to -16 dB, writing both versions.

use std::fs::File;
use std::io::BufWriter;
use std::time::Duration;

use riff_pcm::{Envelope, WavContainer, WavProcessing, WavStatistics, WavSynthesis};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let old_db = -6.0;
    let new_db = -16.0;

    println!("\nCreating example sine and then changing the amplitude:\n");

    let mut wav = WavContainer::new(2, 44_100, 16)?;
    wav.write_sine(174.0, Duration::from_secs(15), old_db, Envelope::None)?;

    let first = "test-sin-amp1.wav";
    wav.write_to(BufWriter::new(File::create(first)?))?;
    println!("Wrote sine at {old_db:.2} dB to {first}\n");
    print!("{wav}");
    println!("Measured peak: {:.2} dB", wav.peak_db()?);

    println!("\nNormalizing to {new_db:.2} dB\n");
    wav.normalize_to(new_db)?;

    let second = "test-sin-amp2.wav";
    wav.write_to(BufWriter::new(File::create(second)?))?;
    print!("{wav}");
    println!("Measured peak: {:.2} dB", wav.peak_db()?);
    println!("\nWrote sine at {new_db:.2} dB to {second}\n");
    Ok(())
}
