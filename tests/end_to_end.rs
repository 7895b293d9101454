//! Synthesis, level changes and filtering driven through encode/decode cycles.

use std::time::Duration;

use riff_pcm::{
    Envelope, WavContainer, WavError, WavFiltering, WavProcessing, WavStatistics, WavSynthesis,
};

#[test]
fn sine_amplitude_and_normalization_scenario() {
    let mut wav = WavContainer::new(2, 44_100, 16).unwrap();
    wav.write_sine(174.0, Duration::from_secs(1), -6.0, Envelope::None)
        .unwrap();
    assert_eq!(wav.sound_data().len(), 176_400);
    assert_eq!(wav.riff_size().unwrap(), 36 + 176_400);
    assert!((wav.peak_db().unwrap() + 6.0).abs() < 0.5);

    let mut reread = WavContainer::from_bytes(&wav.to_bytes().unwrap()).unwrap();
    reread.normalize_to(-16.0).unwrap();
    let db = reread.peak_db().unwrap();
    assert!((db + 16.0).abs() < 0.1, "peak after normalize: {db}");

    let before = reread.sound_data().to_vec();
    reread.normalize_to(-16.0).unwrap();
    assert!((reread.peak_db().unwrap() - db).abs() < 0.01);
    let drift = before
        .chunks_exact(2)
        .zip(reread.sound_data().chunks_exact(2))
        .map(|(a, b)| {
            (i16::from_le_bytes([a[0], a[1]]) as i32 - i16::from_le_bytes([b[0], b[1]]) as i32)
                .abs()
        })
        .max()
        .unwrap();
    assert!(drift <= 1);
}

#[test]
fn synthesis_sizing_across_formats() {
    for (channels, rate, bits, millis) in [
        (1u16, 8_000u32, 8u16, 1_000u64),
        (2, 44_100, 16, 500),
        (2, 48_000, 24, 250),
        (1, 96_000, 32, 100),
    ] {
        let mut wav = WavContainer::new(channels, rate, bits).unwrap();
        wav.write_binaural(200.0, 210.0, Duration::from_millis(millis), -3.0, Envelope::adsr())
            .unwrap();
        let expected = (bits as u64 / 8) * channels as u64 * rate as u64 * millis / 1_000;
        assert_eq!(wav.sound_data().len() as u64, expected);
        assert_eq!(wav.riff_size().unwrap() as u64, 36 + expected);
        assert_eq!(wav.to_bytes().unwrap().len() as u64, 44 + expected);
    }
}

#[test]
fn filters_on_synthesized_tones() {
    // A 5 kHz tone is mostly removed by a 30 Hz low-pass and kept by a 2.2 kHz high-pass.
    let mut tone = WavContainer::new(2, 44_100, 16).unwrap();
    tone.write_sine(5_000.0, Duration::from_millis(200), -6.0, Envelope::None)
        .unwrap();
    let tone_peak = tone.peak_db().unwrap();

    let mut low = tone.clone();
    low.low_pass(30.0).unwrap();
    let mut high = tone.clone();
    high.high_pass(2_200.0).unwrap();

    let low_rms = low.rms_db().unwrap();
    let high_rms = high.rms_db().unwrap();
    let tone_rms = tone.rms_db().unwrap();
    assert!(low_rms < tone_rms - 20.0, "low-pass rms {low_rms}, tone {tone_rms}");
    assert!(high_rms > tone_rms - 3.0, "high-pass rms {high_rms}, tone {tone_rms}");
    assert!(high.peak_db().unwrap() <= tone_peak + 0.5);

    assert_eq!(low.sound_data().len(), tone.sound_data().len());
    assert_eq!(
        WavContainer::from_bytes(&low.to_bytes().unwrap()).unwrap(),
        low
    );
}

#[test]
fn low_pass_never_leaves_the_input_range() {
    let mut wav = WavContainer::new(1, 8_000, 8).unwrap();
    wav.write_binaural(3_999.0, 3_999.0, Duration::from_secs(1), 0.0, Envelope::None)
        .unwrap();
    let peak_before = wav.peak_amplitude().unwrap();
    wav.low_pass(1_000.0).unwrap();
    assert!(wav.peak_amplitude().unwrap() <= peak_before);
}

#[test]
fn operations_on_empty_containers() {
    let mut wav = WavContainer::new(2, 44_100, 24).unwrap();
    assert!(matches!(wav.peak_db(), Err(WavError::EmptyBuffer)));
    assert!(matches!(wav.normalize_to(-1.0), Err(WavError::EmptyBuffer)));
    wav.low_pass(100.0).unwrap();
    assert_eq!(wav.riff_size().unwrap(), 36);
}
