use hound::{SampleFormat, WavSpec, WavWriter};
use std::io::Cursor;
use crate::audio::Cue;
use crate::core::CueConfig;

const SAMPLE_RATE: u32 = 44100;

/// Renders a cue as an in-memory mono 16-bit WAV: a sine burst whose gain
/// ramps exponentially from `volume` down to a tenth of it.
pub fn render_cue_wav(cue: Cue, config: &CueConfig) -> anyhow::Result<Vec<u8>> {
    let frequency = match cue {
        Cue::Tick => config.tick_hz,
        Cue::Final => config.final_hz,
    };
    render_tone_wav(frequency, config.duration_ms, config.volume)
}

fn render_tone_wav(frequency: f32, duration_ms: u32, volume: f32) -> anyhow::Result<Vec<u8>> {
    let spec = WavSpec {
        channels: 1,
        sample_rate: SAMPLE_RATE,
        bits_per_sample: 16,
        sample_format: SampleFormat::Int,
    };

    let mut cursor = Cursor::new(Vec::new());
    {
        let mut writer = WavWriter::new(&mut cursor, spec)
            .map_err(|e| {
                log::error!("Failed to create WAV writer for cue tone: {}", e);
                anyhow::anyhow!("Failed to create WAV writer: {}", e)
            })?;

        let samples_per_second = spec.sample_rate as f32;
        let total_samples = (duration_ms as f32 / 1000.0 * samples_per_second) as u32;
        let peak = volume.clamp(0.0, 1.0);

        for i in 0..total_samples {
            let t = i as f32 / samples_per_second;
            let progress = i as f32 / total_samples.max(1) as f32;
            // 1.0 -> 0.1 over the length of the tone
            let envelope = 0.1f32.powf(progress);
            let sample = (t * frequency * 2.0 * std::f32::consts::PI).sin();
            let sample_value = (sample * peak * envelope * i16::MAX as f32) as i16;

            writer.write_sample(sample_value)
                .map_err(|e| {
                    log::error!("Failed to write cue tone sample: {}", e);
                    anyhow::anyhow!("Failed to write sample: {}", e)
                })?;
        }

        writer.finalize()
            .map_err(|e| {
                log::error!("Failed to finalize cue tone WAV: {}", e);
                anyhow::anyhow!("Failed to finalize WAV file: {}", e)
            })?;
    }

    Ok(cursor.into_inner())
}
