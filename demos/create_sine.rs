//! Writes a 20 second, 174 Hz stereo sine to `test-sin.wav`.
//!
//! Pass `--adsr` to shape the tone with the default envelope, or `--binaural` to put
//! 178 Hz on the right channel instead.

use std::fs::File;
use std::io::BufWriter;
use std::time::Duration;

use riff_pcm::{Envelope, WavContainer, WavStatistics, WavSynthesis};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let envelope = if args.iter().any(|a| a == "--adsr") {
        Envelope::adsr()
    } else {
        Envelope::None
    };

    let mut wav = WavContainer::new(2, 44_100, 16)?;
    let duration = Duration::from_secs(20);
    if args.iter().any(|a| a == "--binaural") {
        wav.write_binaural(174.0, 178.0, duration, 0.0, envelope)?;
    } else {
        wav.write_sine(174.0, duration, 0.0, envelope)?;
    }

    let file_name = "test-sin.wav";
    wav.write_to(BufWriter::new(File::create(file_name)?))?;
    println!(
        "Wrote {} bytes of sound data at {:.2} dB to {file_name}",
        wav.sound_data().len(),
        wav.peak_db()?
    );
    Ok(())
}
